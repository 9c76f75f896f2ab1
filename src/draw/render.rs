//! Rendering functions for annotation shapes.

use super::font::FontDescriptor;
use super::shape::{EllipseCoordinates, LineCoordinates, Shape};
use super::surface::{CompositeMode, Stroke, Surface, TextStyle};
use crate::annotation::Annotation;
use crate::config::{Config, StatusConfig};
use crate::occlusion::OcclusionResolver;
use crate::util::Viewport;
use kurbo::{PathEl, Point};
use std::f64::consts::PI;

/// Settings shared by every shape in a render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Status tags used to tell finished pencil strokes from live ones
    pub statuses: StatusConfig,
    /// Family, weight and style for text annotations
    pub font: FontDescriptor,
    /// Pixel font size for text records that carry neither size field
    pub default_font_size: f64,
    /// Parameter step for sampling curves during occlusion tests
    pub curve_sample_step: f64,
}

impl RenderOptions {
    /// Builds render options from the loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            statuses: config.status.clone(),
            font: FontDescriptor::from_config(&config.drawing),
            default_font_size: config.drawing.default_font_size,
            curve_sample_step: config.render.curve_sample_step,
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Clears the surface and draws every annotation that is still visible.
///
/// Annotations are drawn in slice order, so later records paint on top.
/// Returns the visibility vector used for the pass.
pub fn render_annotations(
    surface: &mut dyn Surface,
    annotations: &[Annotation],
    viewport: Viewport,
    options: &RenderOptions,
) -> Vec<bool> {
    surface.clear(viewport);

    let visibility = OcclusionResolver::new(&options.statuses)
        .with_curve_step(options.curve_sample_step)
        .resolve(annotations, viewport);

    let mut drawn = 0usize;
    for (annotation, _) in annotations
        .iter()
        .zip(&visibility)
        .filter(|(_, visible)| **visible)
    {
        if render_annotation(surface, annotation, viewport, options) {
            drawn += 1;
        }
    }
    log::debug!(
        "rendered {drawn} of {} annotations at {}x{}",
        annotations.len(),
        viewport.width,
        viewport.height
    );

    visibility
}

/// Paints a single annotation.
///
/// Returns `false` when the record could not be turned into a shape; such
/// records are skipped without touching the surface.
pub fn render_annotation(
    surface: &mut dyn Surface,
    annotation: &Annotation,
    viewport: Viewport,
    options: &RenderOptions,
) -> bool {
    match Shape::from_annotation(annotation, viewport, &options.statuses) {
        Some(shape) => {
            render_shape(surface, &shape, options);
            true
        }
        None => {
            log::debug!(
                "skipping annotation {} ({})",
                annotation.id,
                annotation.annotation_type
            );
            false
        }
    }
}

/// Renders a single shape.
///
/// Dispatches to the matching rendering function. Element erasers are never
/// painted; they only take part in occlusion.
pub fn render_shape(surface: &mut dyn Surface, shape: &Shape, options: &RenderOptions) {
    match shape {
        Shape::Line { coords, stroke } => render_line(surface, coords, stroke),
        Shape::Rectangle { corners, stroke } => render_polygon(surface, corners, stroke),
        Shape::Triangle { coords, stroke } => render_polygon(
            surface,
            &[coords.top, coords.bottom_left, coords.bottom_right],
            stroke,
        ),
        Shape::Ellipse { coords, stroke } => render_ellipse(surface, coords, stroke),
        Shape::Pencil { path, stroke } => render_path(surface, path, stroke),
        Shape::Eraser { points, stroke } => render_eraser(surface, points, stroke),
        Shape::ElementEraser { .. } => {}
        Shape::Text {
            origin,
            lines,
            font_size,
            color,
            ..
        } => {
            let style = TextStyle {
                font: options
                    .font
                    .to_pango_string(font_size.unwrap_or(options.default_font_size)),
                size: font_size.unwrap_or(options.default_font_size),
                color: color.clone(),
            };
            render_text(surface, *origin, lines, &style);
        }
    }
}

/// Renders a straight line segment.
pub fn render_line(surface: &mut dyn Surface, coords: &LineCoordinates, stroke: &Stroke) {
    surface.set_composite(CompositeMode::SourceOver);
    surface.begin_path();
    surface.move_to(coords.start);
    surface.line_to(coords.end);
    surface.close_path();
    surface.stroke(stroke);
}

/// Renders a closed outline through `vertices`.
pub fn render_polygon(surface: &mut dyn Surface, vertices: &[Point], stroke: &Stroke) {
    let Some((first, rest)) = vertices.split_first() else {
        return;
    };

    surface.set_composite(CompositeMode::SourceOver);
    surface.begin_path();
    surface.move_to(*first);
    for vertex in rest {
        surface.line_to(*vertex);
    }
    surface.close_path();
    surface.stroke(stroke);
}

/// Renders an ellipse as four cubic Bézier quarters.
pub fn render_ellipse(surface: &mut dyn Surface, coords: &EllipseCoordinates, stroke: &Stroke) {
    render_path(surface, &coords.bezier_path(), stroke);
}

/// Strokes an arbitrary path with source-over compositing.
pub fn render_path(surface: &mut dyn Surface, path: &[PathEl], stroke: &Stroke) {
    surface.set_composite(CompositeMode::SourceOver);
    surface.begin_path();
    for el in path {
        surface.path_element(*el);
    }
    surface.stroke(stroke);
}

/// Renders a freehand eraser by punching a circle at each point.
///
/// All circles share one path and one destination-out stroke.
pub fn render_eraser(surface: &mut dyn Surface, points: &[Point], stroke: &Stroke) {
    surface.set_composite(CompositeMode::DestinationOut);
    surface.begin_path();
    for point in points {
        surface.arc(*point, stroke.width, 0.0, 2.0 * PI);
    }
    surface.stroke(stroke);
}

/// Renders text line by line from a top-left origin.
///
/// Lines are never wrapped; each one advances the baseline by the font size.
pub fn render_text(surface: &mut dyn Surface, origin: Point, lines: &[String], style: &TextStyle) {
    if lines.is_empty() {
        return;
    }

    surface.set_composite(CompositeMode::SourceOver);
    for (i, line) in lines.iter().enumerate() {
        let at = Point::new(origin.x, origin.y + i as f64 * style.size);
        surface.fill_text(line, at, style);
    }
}
