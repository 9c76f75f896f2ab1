//! Configuration file support for slidemark.
//!
//! Settings are loaded from `~/.config/slidemark/config.toml` (or an explicit
//! path). They cover the status tags used by the annotation store, drawing
//! defaults for the input state machine, and rendering tunables.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod types;

pub use types::{DrawingConfig, RenderConfig, StatusConfig};

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// # Example TOML
/// ```toml
/// [status]
/// start = "DRAW_START"
/// update = "DRAW_UPDATE"
/// end = "DRAW_END"
///
/// [drawing]
/// default_color = "#ff0000"
/// default_thickness = 0.5
/// default_font_size = 18.0
///
/// [render]
/// curve_sample_step = 0.01
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Status tags used by the annotation store
    #[serde(default)]
    pub status: StatusConfig,

    /// Defaults for newly drawn annotations
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Rendering and hit-testing tunables
    #[serde(default)]
    pub render: RenderConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped (or reset) and a warning is logged.
    ///
    /// Validated ranges:
    /// - `default_thickness`: 0.05 - 20.0
    /// - `default_font_size`: 8.0 - 72.0
    /// - `curve_sample_step`: 0.001 - 0.25
    /// - status tags: non-empty and distinct
    fn validate_and_clamp(&mut self) {
        if !self.status.is_valid() {
            log::warn!(
                "Invalid status tags ({:?}, {:?}, {:?}), falling back to defaults",
                self.status.start,
                self.status.update,
                self.status.end
            );
            self.status = StatusConfig::default();
        }

        if !(0.05..=20.0).contains(&self.drawing.default_thickness) {
            log::warn!(
                "Invalid default_thickness {:.2}, clamping to 0.05-20.0 range",
                self.drawing.default_thickness
            );
            self.drawing.default_thickness = self.drawing.default_thickness.clamp(0.05, 20.0);
        }

        if !(8.0..=72.0).contains(&self.drawing.default_font_size) {
            log::warn!(
                "Invalid default_font_size {:.1}, clamping to 8.0-72.0 range",
                self.drawing.default_font_size
            );
            self.drawing.default_font_size = self.drawing.default_font_size.clamp(8.0, 72.0);
        }

        if !types::CURVE_SAMPLE_STEP_RANGE.contains(&self.render.curve_sample_step) {
            log::warn!(
                "Invalid curve_sample_step {}, clamping to 0.001-0.25 range",
                self.render.curve_sample_step
            );
            self.render.curve_sample_step =
                types::clamp_curve_sample_step(self.render.curve_sample_step);
        }

        let valid_weight = matches!(
            self.drawing.font_weight.to_lowercase().as_str(),
            "normal" | "bold" | "light" | "ultralight" | "heavy" | "ultrabold"
        ) || self
            .drawing
            .font_weight
            .parse::<u32>()
            .is_ok_and(|w| (100..=900).contains(&w));

        if !valid_weight {
            log::warn!(
                "Invalid font_weight '{}', falling back to 'normal'",
                self.drawing.font_weight
            );
            self.drawing.font_weight = "normal".to_string();
        }

        if !matches!(
            self.drawing.font_style.to_lowercase().as_str(),
            "normal" | "italic" | "oblique"
        ) {
            log::warn!(
                "Invalid font_style '{}', falling back to 'normal'",
                self.drawing.font_style
            );
            self.drawing.font_style = "normal".to_string();
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("slidemark");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Loads configuration from `config_path`, or returns defaults if the file is missing.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or is not valid TOML.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let config = Self::from_toml(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Parses and validates a configuration from a TOML string.
    pub fn from_toml(source: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(source)?;
        config.validate_and_clamp();
        Ok(config)
    }

    /// Saves the current configuration to the default location.
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;
        self.save_to(&config_path)
    }

    /// Serializes the config to TOML and writes it to `config_path`,
    /// creating the parent directory when needed.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_path, config_str)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Saved config to {}", config_path.display());
        Ok(())
    }
}
