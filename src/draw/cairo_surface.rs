//! Cairo backend for the [`Surface`] trait.

use super::color::{BLACK, Color};
use super::render::{RenderOptions, render_annotations};
use super::surface::{CompositeMode, Stroke, Surface, TextStyle};
use crate::annotation::Annotation;
use crate::util::Viewport;
use anyhow::{Context as _, Result};
use kurbo::{Point, QuadBez};
use std::fs::File;
use std::path::Path;

/// Paints onto a borrowed Cairo context.
pub struct CairoSurface<'a> {
    ctx: &'a cairo::Context,
}

impl<'a> CairoSurface<'a> {
    pub fn new(ctx: &'a cairo::Context) -> Self {
        Self { ctx }
    }

    fn set_source(&self, hex: &str) {
        let color = Color::from_hex(hex).unwrap_or(BLACK);
        self.ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    }
}

impl Surface for CairoSurface<'_> {
    fn clear(&mut self, _viewport: Viewport) {
        self.ctx.save().ok();
        self.ctx.set_operator(cairo::Operator::Clear);
        let _ = self.ctx.paint();
        self.ctx.restore().ok();
    }

    fn set_composite(&mut self, mode: CompositeMode) {
        let operator = match mode {
            CompositeMode::SourceOver => cairo::Operator::Over,
            CompositeMode::DestinationOut => cairo::Operator::DestOut,
        };
        self.ctx.set_operator(operator);
    }

    fn begin_path(&mut self) {
        self.ctx.new_path();
    }

    fn move_to(&mut self, p: Point) {
        self.ctx.move_to(p.x, p.y);
    }

    fn line_to(&mut self, p: Point) {
        self.ctx.line_to(p.x, p.y);
    }

    fn quad_to(&mut self, ctrl: Point, end: Point) {
        // Cairo has no quadratic primitive; elevate to the equivalent cubic.
        let current = match self.ctx.has_current_point() {
            Ok(true) => self.ctx.current_point().ok(),
            _ => None,
        };
        let Some((x, y)) = current else {
            self.ctx.move_to(end.x, end.y);
            return;
        };
        let cubic = QuadBez::new(Point::new(x, y), ctrl, end).raise();
        self.ctx
            .curve_to(cubic.p1.x, cubic.p1.y, cubic.p2.x, cubic.p2.y, end.x, end.y);
    }

    fn cubic_to(&mut self, c1: Point, c2: Point, end: Point) {
        self.ctx.curve_to(c1.x, c1.y, c2.x, c2.y, end.x, end.y);
    }

    fn arc(&mut self, center: Point, radius: f64, start_angle: f64, end_angle: f64) {
        self.ctx
            .arc(center.x, center.y, radius, start_angle, end_angle);
    }

    fn close_path(&mut self) {
        self.ctx.close_path();
    }

    fn stroke(&mut self, stroke: &Stroke) {
        self.set_source(&stroke.color);
        self.ctx.set_line_width(stroke.width);
        self.ctx.set_line_cap(cairo::LineCap::Round);
        self.ctx.set_line_join(cairo::LineJoin::Round);
        let _ = self.ctx.stroke();
    }

    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle) {
        let layout = pangocairo::functions::create_layout(self.ctx);
        let font_desc = pango::FontDescription::from_string(&style.font);
        layout.set_font_description(Some(&font_desc));
        layout.set_text(text);

        // Layouts are positioned by their top-left corner.
        self.set_source(&style.color);
        self.ctx.move_to(at.x, at.y);
        pangocairo::functions::show_layout(self.ctx, &layout);
        self.ctx.new_path();
    }
}

/// Renders `annotations` onto a transparent image and writes it as PNG.
///
/// Returns the visibility vector of the pass.
pub fn render_to_png(
    annotations: &[Annotation],
    viewport: Viewport,
    options: &RenderOptions,
    output: &Path,
) -> Result<Vec<bool>> {
    let width = viewport.width.round().max(1.0) as i32;
    let height = viewport.height.round().max(1.0) as i32;

    let image = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height)
        .context("Failed to create image surface")?;
    let visibility = {
        let ctx = cairo::Context::new(&image).context("Failed to create cairo context")?;
        let mut surface = CairoSurface::new(&ctx);
        render_annotations(&mut surface, annotations, viewport, options)
    };
    image.flush();

    let mut file = File::create(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    image
        .write_to_png(&mut file)
        .with_context(|| format!("Failed to write PNG to {}", output.display()))?;

    log::info!("Wrote {}x{} render to {}", width, height, output.display());
    Ok(visibility)
}
