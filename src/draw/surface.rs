//! Drawing surface abstraction.
//!
//! The renderer talks to a [`Surface`], a small 2D path API shaped like an
//! HTML canvas context: build a path, then stroke it; draw text line by line.
//! [`RecordingSurface`] captures the calls as [`DrawOp`]s, which is what tests
//! and the `--ops` CLI output inspect. The Cairo backend lives behind the
//! `cairo` feature.

use crate::util::Viewport;
use kurbo::{PathEl, Point};
use serde::Serialize;

/// How newly drawn pixels combine with the existing surface content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompositeMode {
    /// Paint over existing content
    SourceOver,
    /// Punch transparency into existing content where the stroke lands
    DestinationOut,
}

/// Stroke parameters for a finished path.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    /// Line width in pixels
    pub width: f64,
    /// `#rrggbb` color
    pub color: String,
}

/// Parameters for one line of text.
///
/// Text is left-aligned and anchored at its top edge (hanging baseline).
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// Pango-style font description, e.g. `"Sans 16"`
    pub font: String,
    /// Font size in pixels
    pub size: f64,
    /// `#rrggbb` fill color
    pub color: String,
}

/// A 2D drawing target.
pub trait Surface {
    /// Clears the whole surface to transparent.
    fn clear(&mut self, viewport: Viewport);
    fn set_composite(&mut self, mode: CompositeMode);
    /// Starts a new path, discarding any unstroked one.
    fn begin_path(&mut self);
    fn move_to(&mut self, p: Point);
    fn line_to(&mut self, p: Point);
    fn quad_to(&mut self, ctrl: Point, end: Point);
    fn cubic_to(&mut self, c1: Point, c2: Point, end: Point);
    /// Adds a circular arc (angles in radians, clockwise in screen space).
    fn arc(&mut self, center: Point, radius: f64, start_angle: f64, end_angle: f64);
    fn close_path(&mut self);
    /// Strokes the current path.
    fn stroke(&mut self, stroke: &Stroke);
    /// Fills one line of text with its top-left corner at `at`.
    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle);

    /// Appends one path element.
    fn path_element(&mut self, el: PathEl) {
        match el {
            PathEl::MoveTo(p) => self.move_to(p),
            PathEl::LineTo(p) => self.line_to(p),
            PathEl::QuadTo(c, p) => self.quad_to(c, p),
            PathEl::CurveTo(c1, c2, p) => self.cubic_to(c1, c2, p),
            PathEl::ClosePath => self.close_path(),
        }
    }
}

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum DrawOp {
    Clear {
        width: f64,
        height: f64,
    },
    SetComposite {
        mode: CompositeMode,
    },
    BeginPath,
    MoveTo {
        x: f64,
        y: f64,
    },
    LineTo {
        x: f64,
        y: f64,
    },
    QuadTo {
        cx: f64,
        cy: f64,
        x: f64,
        y: f64,
    },
    CubicTo {
        c1x: f64,
        c1y: f64,
        c2x: f64,
        c2y: f64,
        x: f64,
        y: f64,
    },
    Arc {
        x: f64,
        y: f64,
        radius: f64,
        start: f64,
        end: f64,
    },
    ClosePath,
    Stroke {
        width: f64,
        color: String,
    },
    FillText {
        text: String,
        x: f64,
        y: f64,
        font: String,
        size: f64,
        color: String,
    },
}

impl DrawOp {
    /// Whether this op adds geometry to the current path.
    pub fn is_path_geometry(&self) -> bool {
        matches!(
            self,
            DrawOp::MoveTo { .. }
                | DrawOp::LineTo { .. }
                | DrawOp::QuadTo { .. }
                | DrawOp::CubicTo { .. }
                | DrawOp::Arc { .. }
                | DrawOp::ClosePath
        )
    }
}

/// Surface that records every call instead of painting.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded operations, oldest first.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Drains the recorded operations.
    pub fn take_ops(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }

    /// Number of strokes and text fills recorded, i.e. visible marks.
    pub fn paint_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Stroke { .. } | DrawOp::FillText { .. }))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, viewport: Viewport) {
        self.ops.push(DrawOp::Clear {
            width: viewport.width,
            height: viewport.height,
        });
    }

    fn set_composite(&mut self, mode: CompositeMode) {
        self.ops.push(DrawOp::SetComposite { mode });
    }

    fn begin_path(&mut self) {
        self.ops.push(DrawOp::BeginPath);
    }

    fn move_to(&mut self, p: Point) {
        self.ops.push(DrawOp::MoveTo { x: p.x, y: p.y });
    }

    fn line_to(&mut self, p: Point) {
        self.ops.push(DrawOp::LineTo { x: p.x, y: p.y });
    }

    fn quad_to(&mut self, ctrl: Point, end: Point) {
        self.ops.push(DrawOp::QuadTo {
            cx: ctrl.x,
            cy: ctrl.y,
            x: end.x,
            y: end.y,
        });
    }

    fn cubic_to(&mut self, c1: Point, c2: Point, end: Point) {
        self.ops.push(DrawOp::CubicTo {
            c1x: c1.x,
            c1y: c1.y,
            c2x: c2.x,
            c2y: c2.y,
            x: end.x,
            y: end.y,
        });
    }

    fn arc(&mut self, center: Point, radius: f64, start_angle: f64, end_angle: f64) {
        self.ops.push(DrawOp::Arc {
            x: center.x,
            y: center.y,
            radius,
            start: start_angle,
            end: end_angle,
        });
    }

    fn close_path(&mut self) {
        self.ops.push(DrawOp::ClosePath);
    }

    fn stroke(&mut self, stroke: &Stroke) {
        self.ops.push(DrawOp::Stroke {
            width: stroke.width,
            color: stroke.color.clone(),
        });
    }

    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle) {
        self.ops.push(DrawOp::FillText {
            text: text.to_string(),
            x: at.x,
            y: at.y,
            font: style.font.clone(),
            size: style.size,
            color: style.color.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_elements_dispatch_to_matching_ops() {
        let mut surface = RecordingSurface::new();
        surface.path_element(PathEl::MoveTo(Point::new(1.0, 2.0)));
        surface.path_element(PathEl::QuadTo(Point::new(3.0, 4.0), Point::new(5.0, 6.0)));
        surface.path_element(PathEl::ClosePath);

        assert_eq!(
            surface.ops(),
            &[
                DrawOp::MoveTo { x: 1.0, y: 2.0 },
                DrawOp::QuadTo {
                    cx: 3.0,
                    cy: 4.0,
                    x: 5.0,
                    y: 6.0
                },
                DrawOp::ClosePath,
            ]
        );
    }

    #[test]
    fn ops_serialize_with_tag() {
        let op = DrawOp::SetComposite {
            mode: CompositeMode::DestinationOut,
        };
        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "op": "setComposite", "mode": "destination-out" })
        );
    }

    #[test]
    fn take_ops_drains_recording() {
        let mut surface = RecordingSurface::new();
        surface.begin_path();
        surface.stroke(&Stroke {
            width: 2.0,
            color: "#000000".into(),
        });
        assert_eq!(surface.paint_count(), 1);
        assert_eq!(surface.take_ops().len(), 2);
        assert!(surface.ops().is_empty());
    }
}
