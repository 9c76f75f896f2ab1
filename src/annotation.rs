//! Annotation records exchanged with the whiteboard data store.
//!
//! The record layout is the de facto serialization contract with the storage
//! layer, so these types mirror it field for field (camelCase JSON). Payload
//! fields this crate does not interpret are carried through untouched.

use crate::config::StatusConfig;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Lifecycle phase of an annotation, resolved through a [`StatusConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawStatus {
    /// First event of a shape (draw-start)
    Start,
    /// Intermediate event while the user drags or types
    Update,
    /// Finalized shape
    End,
    /// Status tag not matching any configured value
    Unknown,
}

/// Discriminator for the shape carried by an annotation.
///
/// Unrecognized type strings are kept verbatim in [`AnnotationType::Other`] so
/// records round-trip; such annotations are never drawn or hit-tested.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AnnotationType {
    Line,
    Rectangle,
    Triangle,
    Ellipse,
    Pencil,
    /// Freehand stroke painted with destination-out compositing
    Eraser,
    /// Marker that hides earlier annotations it touches; never painted
    ElementEraser,
    Text,
    Other(String),
}

impl AnnotationType {
    /// Wire name of this type.
    pub fn as_str(&self) -> &str {
        match self {
            AnnotationType::Line => "line",
            AnnotationType::Rectangle => "rectangle",
            AnnotationType::Triangle => "triangle",
            AnnotationType::Ellipse => "ellipse",
            AnnotationType::Pencil => "pencil",
            AnnotationType::Eraser => "eraser",
            AnnotationType::ElementEraser => "elementEraser",
            AnnotationType::Text => "text",
            AnnotationType::Other(name) => name,
        }
    }
}

impl From<String> for AnnotationType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "line" => AnnotationType::Line,
            "rectangle" => AnnotationType::Rectangle,
            "triangle" => AnnotationType::Triangle,
            "ellipse" => AnnotationType::Ellipse,
            "pencil" => AnnotationType::Pencil,
            "eraser" => AnnotationType::Eraser,
            "elementEraser" => AnnotationType::ElementEraser,
            "text" => AnnotationType::Text,
            _ => AnnotationType::Other(value),
        }
    }
}

impl From<AnnotationType> for String {
    fn from(value: AnnotationType) -> Self {
        match value {
            AnnotationType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for AnnotationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Color as stored on the wire: an integer (decimal RGB) or a `#` hex string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorValue {
    /// Packed 0xRRGGBB value written as a decimal integer
    Int(i64),
    /// Non-integral number; truncated before formatting
    Float(f64),
    /// Usually `#rrggbb`, but any string is accepted
    Text(String),
}

impl Default for ColorValue {
    fn default() -> Self {
        ColorValue::Int(0)
    }
}

impl From<i64> for ColorValue {
    fn from(value: i64) -> Self {
        ColorValue::Int(value)
    }
}

impl From<&str> for ColorValue {
    fn from(value: &str) -> Self {
        ColorValue::Text(value.to_string())
    }
}

/// Shape-dependent payload of an annotation.
///
/// Every field is optional because the payload shape depends on the
/// annotation type and lifecycle phase; consumers treat a missing field as
/// empty/default content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationInfo {
    /// Flat normalized `x, y` pairs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<f64>>,
    /// Pencil opcodes (1 move, 2 line, 3 quadratic, 4 cubic), present once finalized
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commands: Option<Vec<i64>>,
    /// Normalized stroke thickness (percent of slide width)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thickness: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorValue>,
    /// Text box left edge (normalized)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    /// Text box top edge (normalized)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Font size in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    /// Font size normalized against the slide height
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calced_font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_color: Option<ColorValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_box_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_box_height: Option<f64>,
    /// Payload fields not interpreted here (`id`, `whiteboardId`, `type`, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AnnotationInfo {
    /// Flat point list, empty when absent.
    pub fn points(&self) -> &[f64] {
        self.points.as_deref().unwrap_or(&[])
    }

    /// Pencil command stream, empty when absent.
    pub fn commands(&self) -> &[i64] {
        self.commands.as_deref().unwrap_or(&[])
    }

    /// Normalized thickness, zero when absent.
    pub fn thickness(&self) -> f64 {
        self.thickness.unwrap_or(0.0)
    }
}

/// One persisted shape/drawing object on a whiteboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    /// Shape id, stable across the START/UPDATE/END lifecycle
    pub id: String,
    /// Raw status tag; interpret with [`StatusConfig::classify`]
    pub status: String,
    pub annotation_type: AnnotationType,
    #[serde(default)]
    pub annotation_info: AnnotationInfo,
    /// Owning whiteboard id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wb_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<f64>,
    /// Store-specific fields such as `_id`
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Annotation {
    /// Creates a record with the given identity and payload and no provenance metadata.
    pub fn new(
        id: impl Into<String>,
        status: impl Into<String>,
        annotation_type: AnnotationType,
        annotation_info: AnnotationInfo,
    ) -> Self {
        Self {
            id: id.into(),
            status: status.into(),
            annotation_type,
            annotation_info,
            wb_id: None,
            user_id: None,
            position: None,
            extra: Map::new(),
        }
    }

    /// Sets the owning whiteboard.
    pub fn on_whiteboard(mut self, whiteboard_id: impl Into<String>) -> Self {
        self.wb_id = Some(whiteboard_id.into());
        self
    }

    /// Lifecycle phase of this record under the given status tags.
    pub fn draw_status(&self, statuses: &StatusConfig) -> DrawStatus {
        statuses.classify(&self.status)
    }

    /// Whether this record is the finalized version of its shape.
    pub fn is_finished(&self, statuses: &StatusConfig) -> bool {
        self.draw_status(statuses) == DrawStatus::End
    }

    /// Whether this record is an element-eraser marker.
    pub fn is_element_eraser(&self) -> bool {
        self.annotation_type == AnnotationType::ElementEraser
    }
}
