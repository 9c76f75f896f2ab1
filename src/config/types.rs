//! Configuration type definitions.

use crate::annotation::{ColorValue, DrawStatus};
use serde::{Deserialize, Serialize};

/// Status tag values used by the annotation store.
///
/// The data layer decides how START/UPDATE/END are spelled, so the engine is
/// handed these tags explicitly instead of hard-coding them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusConfig {
    /// Tag for the first event of a shape
    #[serde(default = "default_status_start")]
    pub start: String,

    /// Tag for intermediate events while a shape is being drawn
    #[serde(default = "default_status_update")]
    pub update: String,

    /// Tag for the finalized shape
    #[serde(default = "default_status_end")]
    pub end: String,
}

impl StatusConfig {
    /// Maps a raw status tag to its lifecycle phase.
    pub fn classify(&self, status: &str) -> DrawStatus {
        if status == self.end {
            DrawStatus::End
        } else if status == self.update {
            DrawStatus::Update
        } else if status == self.start {
            DrawStatus::Start
        } else {
            DrawStatus::Unknown
        }
    }

    /// Tag string for a lifecycle phase (`Unknown` maps to the update tag).
    pub fn tag(&self, status: DrawStatus) -> &str {
        match status {
            DrawStatus::Start => &self.start,
            DrawStatus::Update | DrawStatus::Unknown => &self.update,
            DrawStatus::End => &self.end,
        }
    }

    /// True when all three tags are non-empty and distinct.
    pub fn is_valid(&self) -> bool {
        !self.start.is_empty()
            && !self.update.is_empty()
            && !self.end.is_empty()
            && self.start != self.update
            && self.start != self.end
            && self.update != self.end
    }
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            start: default_status_start(),
            update: default_status_update(),
            end: default_status_end(),
        }
    }
}

/// Drawing defaults for annotations created through the input state machine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawingConfig {
    /// Default stroke color, either a decimal integer or a `#rrggbb` string
    #[serde(default)]
    pub default_color: ColorValue,

    /// Default normalized thickness in percent of slide width (valid range: 0.05 - 20.0)
    #[serde(default = "default_thickness")]
    pub default_thickness: f64,

    /// Default font size for text in pixels (valid range: 8.0 - 72.0)
    #[serde(default = "default_font_size")]
    pub default_font_size: f64,

    /// Font family name for text rendering (e.g., "Sans", "Monospace")
    #[serde(default = "default_font_family")]
    pub font_family: String,

    /// Font weight (e.g., "normal", "bold", "light", or 100-900)
    #[serde(default = "default_font_weight")]
    pub font_weight: String,

    /// Font style (e.g., "normal", "italic", "oblique")
    #[serde(default = "default_font_style")]
    pub font_style: String,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_color: ColorValue::default(),
            default_thickness: default_thickness(),
            default_font_size: default_font_size(),
            font_family: default_font_family(),
            font_weight: default_font_weight(),
            font_style: default_font_style(),
        }
    }
}

/// Accepted range for [`RenderConfig::curve_sample_step`].
pub const CURVE_SAMPLE_STEP_RANGE: std::ops::RangeInclusive<f64> = 0.001..=0.25;

/// Rendering and hit-testing tunables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Parameter step used when sampling curves for element-eraser hits
    /// (valid range: 0.001 - 0.25)
    #[serde(default = "default_curve_sample_step")]
    pub curve_sample_step: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            curve_sample_step: default_curve_sample_step(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

pub(crate) fn default_status_start() -> String {
    "DRAW_START".to_string()
}

pub(crate) fn default_status_update() -> String {
    "DRAW_UPDATE".to_string()
}

pub(crate) fn default_status_end() -> String {
    "DRAW_END".to_string()
}

fn default_thickness() -> f64 {
    1.0
}

fn default_font_size() -> f64 {
    16.0
}

fn default_font_family() -> String {
    "Sans".to_string()
}

fn default_font_weight() -> String {
    "normal".to_string()
}

fn default_font_style() -> String {
    "normal".to_string()
}

pub(crate) fn default_curve_sample_step() -> f64 {
    0.01
}

/// Clamps a curve sample step into [`CURVE_SAMPLE_STEP_RANGE`].
///
/// NaN survives `clamp`, so it falls back to the default.
pub(crate) fn clamp_curve_sample_step(step: f64) -> f64 {
    if step.is_nan() {
        default_curve_sample_step()
    } else {
        step.clamp(
            *CURVE_SAMPLE_STEP_RANGE.start(),
            *CURVE_SAMPLE_STEP_RANGE.end(),
        )
    }
}
