//! Shape derivation and rendering.
//!
//! This module turns annotation records into drawing calls:
//! - [`Shape`]: pixel-space geometry derived from a record
//! - [`Surface`]: the 2D drawing target, with a recording implementation
//!   and an optional Cairo one
//! - Rendering functions that paint shapes onto a surface

pub mod color;
pub mod font;
pub mod path;
pub mod render;
pub mod shape;
pub mod surface;

#[cfg(feature = "cairo")]
pub mod cairo_surface;

// Re-export commonly used types at module level
pub use color::{Color, format_color};
pub use font::FontDescriptor;
pub use render::{RenderOptions, render_annotation, render_annotations, render_shape};
pub use shape::Shape;
pub use surface::{CompositeMode, DrawOp, RecordingSurface, Stroke, Surface, TextStyle};

#[cfg(feature = "cairo")]
pub use cairo_surface::{CairoSurface, render_to_png};
