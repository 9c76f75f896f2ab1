//! Font descriptor for text annotations.

use crate::config::DrawingConfig;
use serde::Serialize;

/// Font configuration for text rendering.
///
/// Text annotations only carry a size and color; family, weight and style
/// come from the local configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FontDescriptor {
    /// Font family name (e.g., "Sans", "Monospace", "JetBrains Mono")
    pub family: String,

    /// Font weight (e.g., "normal", "bold", "light" or numeric 100-900)
    pub weight: String,

    /// Font style (e.g., "normal", "italic", "oblique")
    pub style: String,
}

impl FontDescriptor {
    /// Creates a new font descriptor with the specified parameters.
    pub fn new(family: String, weight: String, style: String) -> Self {
        Self {
            family,
            weight,
            style,
        }
    }

    /// Builds the descriptor from the drawing section of the config.
    pub fn from_config(config: &DrawingConfig) -> Self {
        Self::new(
            config.font_family.clone(),
            config.font_weight.clone(),
            config.font_style.clone(),
        )
    }

    /// Converts this font descriptor to a Pango font description string.
    ///
    /// Format: "Family Style Weight Size"
    /// Example: "Sans Bold 32" or "Monospace Italic 24"
    pub fn to_pango_string(&self, size: f64) -> String {
        let mut parts = vec![self.family.clone()];

        if self.style.to_lowercase() != "normal" {
            parts.push(capitalize_first(&self.style));
        }

        if self.weight.to_lowercase() != "normal" {
            parts.push(capitalize_first(&self.weight));
        }

        parts.push(format!("{}", size.round() as i32));

        parts.join(" ")
    }
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self::from_config(&DrawingConfig::default())
    }
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}
