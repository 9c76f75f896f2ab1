//! Pixel-space shapes derived from annotation records.
//!
//! [`Shape::from_annotation`] is the single place where a record's normalized
//! payload is turned into pixel geometry. Both the renderer and the occlusion
//! resolver work on the result, so what gets hit-tested is exactly what gets drawn.

use super::color::format_color;
use super::path;
use super::surface::Stroke;
use crate::annotation::{Annotation, AnnotationInfo, AnnotationType};
use crate::config::StatusConfig;
use crate::util::Viewport;
use kurbo::{PathEl, Point};

/// Control-point offset factor for approximating a quarter ellipse with a cubic Bézier.
pub const KAPPA: f64 = 0.5522848;

/// Line endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineCoordinates {
    pub start: Point,
    pub end: Point,
}

/// Triangle vertices: apex and the two ends of the horizontal base.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleCoordinates {
    pub top: Point,
    pub bottom_left: Point,
    pub bottom_right: Point,
}

impl TriangleCoordinates {
    /// Edges in drawing order: apex to left, base, right back to apex.
    pub fn edges(&self) -> [(Point, Point); 3] {
        [
            (self.top, self.bottom_left),
            (self.bottom_left, self.bottom_right),
            (self.bottom_right, self.top),
        ]
    }
}

/// Ellipse as derived from a drag box.
///
/// `cx`/`cy` hold the *smaller* corner of the box and `rx`/`ry` the full box
/// width/height; the drawn ellipse is inscribed in
/// `[cx, cx + rx] x [cy, cy + ry]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipseCoordinates {
    pub cx: f64,
    pub cy: f64,
    pub rx: f64,
    pub ry: f64,
}

impl EllipseCoordinates {
    /// Geometric center of the drawn ellipse.
    pub fn center(&self) -> Point {
        Point::new(self.cx + self.rx / 2.0, self.cy + self.ry / 2.0)
    }

    /// Semi-axes of the drawn ellipse.
    pub fn semi_axes(&self) -> (f64, f64) {
        (self.rx / 2.0, self.ry / 2.0)
    }

    /// Four-segment cubic Bézier outline, starting at the left extreme.
    pub fn bezier_path(&self) -> [PathEl; 5] {
        let ox = (self.rx / 2.0) * KAPPA;
        let oy = (self.ry / 2.0) * KAPPA;
        let xe = self.cx + self.rx;
        let ye = self.cy + self.ry;
        let xm = self.cx + self.rx / 2.0;
        let ym = self.cy + self.ry / 2.0;
        let (cx, cy) = (self.cx, self.cy);

        [
            PathEl::MoveTo(Point::new(cx, ym)),
            PathEl::CurveTo(
                Point::new(cx, ym - oy),
                Point::new(xm - ox, cy),
                Point::new(xm, cy),
            ),
            PathEl::CurveTo(
                Point::new(xm + ox, cy),
                Point::new(xe, ym - oy),
                Point::new(xe, ym),
            ),
            PathEl::CurveTo(
                Point::new(xe, ym + oy),
                Point::new(xm + ox, ye),
                Point::new(xm, ye),
            ),
            PathEl::CurveTo(
                Point::new(xm - ox, ye),
                Point::new(cx, ym + oy),
                Point::new(cx, ym),
            ),
        ]
    }
}

/// Scales the two endpoints stored in `points[0..4]`.
pub fn line_coordinates(points: &[f64; 4], viewport: Viewport) -> LineCoordinates {
    LineCoordinates {
        start: viewport.point(points[0], points[1]),
        end: viewport.point(points[2], points[3]),
    }
}

/// Upward isoceles triangle inscribed in the drag box `points[0..4]`.
pub fn triangle_coordinates(points: &[f64; 4], viewport: Viewport) -> TriangleCoordinates {
    let x_bottom_left = points[0];
    let x_bottom_right = points[2];
    let y_bottom = points[3];
    let x_top = (x_bottom_right - x_bottom_left) / 2.0 + x_bottom_left;
    let y_top = points[1];

    TriangleCoordinates {
        top: viewport.point(x_top, y_top),
        bottom_left: viewport.point(x_bottom_left, y_bottom),
        bottom_right: viewport.point(x_bottom_right, y_bottom),
    }
}

/// Ellipse parameters from the drag box `points[0..4]`.
pub fn ellipse_coordinates(points: &[f64; 4], viewport: Viewport) -> EllipseCoordinates {
    let [x1, y1, x2, y2] = *points;
    let cx = if x1 < x2 { x1 } else { x2 };
    let cy = if y1 < y2 { y1 } else { y2 };

    EllipseCoordinates {
        cx: crate::util::scale(cx, viewport.width),
        cy: crate::util::scale(cy, viewport.height),
        rx: crate::util::scale(x2 - x1, viewport.width).abs(),
        ry: crate::util::scale(y2 - y1, viewport.height).abs(),
    }
}

/// Closed 4-point outline of the box with corners `points[0..2]` and `points[2..4]`.
pub fn rectangle_corners(points: &[f64; 4], viewport: Viewport) -> [Point; 4] {
    let [x1, y1, x2, y2] = *points;
    [
        viewport.point(x1, y1),
        viewport.point(x2, y1),
        viewport.point(x2, y2),
        viewport.point(x1, y2),
    ]
}

/// A drawable annotation in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Line {
        coords: LineCoordinates,
        stroke: Stroke,
    },
    Rectangle {
        corners: [Point; 4],
        stroke: Stroke,
    },
    Triangle {
        coords: TriangleCoordinates,
        stroke: Stroke,
    },
    Ellipse {
        coords: EllipseCoordinates,
        stroke: Stroke,
    },
    /// Pencil stroke; `path` is the polyline while drawing, the replayed
    /// command stream once finalized
    Pencil {
        path: Vec<PathEl>,
        stroke: Stroke,
    },
    /// Freehand eraser: one dab of radius `stroke.width` per point
    Eraser {
        points: Vec<Point>,
        stroke: Stroke,
    },
    /// Element-eraser probe points; never painted
    ElementEraser { points: Vec<Point> },
    Text {
        /// Top-left corner of the first line
        origin: Point,
        /// Text box size in pixels
        size: (f64, f64),
        lines: Vec<String>,
        /// Font size in pixels, also the line advance; `None` uses the
        /// configured default
        font_size: Option<f64>,
        color: String,
    },
}

impl Shape {
    /// Derives the pixel-space shape for an annotation.
    ///
    /// Returns `None` for unrecognized annotation types and for payloads too
    /// short to describe the shape; such records are skipped, never fatal.
    pub fn from_annotation(
        annotation: &Annotation,
        viewport: Viewport,
        statuses: &StatusConfig,
    ) -> Option<Shape> {
        let info = &annotation.annotation_info;
        let shape = match &annotation.annotation_type {
            AnnotationType::Line => Shape::Line {
                coords: line_coordinates(box_points(info)?, viewport),
                stroke: stroke_for(info, viewport),
            },
            AnnotationType::Rectangle => Shape::Rectangle {
                corners: rectangle_corners(box_points(info)?, viewport),
                stroke: stroke_for(info, viewport),
            },
            AnnotationType::Triangle => Shape::Triangle {
                coords: triangle_coordinates(box_points(info)?, viewport),
                stroke: stroke_for(info, viewport),
            },
            AnnotationType::Ellipse => Shape::Ellipse {
                coords: ellipse_coordinates(box_points(info)?, viewport),
                stroke: stroke_for(info, viewport),
            },
            AnnotationType::Pencil => {
                let points = info.points();
                let path = if annotation.is_finished(statuses) {
                    path::replay_commands(info.commands(), points, viewport)
                } else {
                    path::polyline(points, viewport)
                };
                if path.is_empty() {
                    log::debug!("pencil {} has no drawable path", annotation.id);
                    return None;
                }
                Shape::Pencil {
                    path,
                    stroke: stroke_for(info, viewport),
                }
            }
            AnnotationType::Eraser => Shape::Eraser {
                points: non_empty(viewport.points(info.points()))?,
                stroke: stroke_for(info, viewport),
            },
            AnnotationType::ElementEraser => Shape::ElementEraser {
                points: non_empty(viewport.points(info.points()))?,
            },
            AnnotationType::Text => text_shape(info, viewport)?,
            AnnotationType::Other(name) => {
                log::debug!("annotation {} has unknown type '{name}'", annotation.id);
                return None;
            }
        };
        Some(shape)
    }

    /// Pixel stroke width, zero for shapes without a stroke.
    pub fn stroke_width(&self) -> f64 {
        match self {
            Shape::Line { stroke, .. }
            | Shape::Rectangle { stroke, .. }
            | Shape::Triangle { stroke, .. }
            | Shape::Ellipse { stroke, .. }
            | Shape::Pencil { stroke, .. }
            | Shape::Eraser { stroke, .. } => stroke.width,
            Shape::ElementEraser { .. } | Shape::Text { .. } => 0.0,
        }
    }
}

fn box_points(info: &AnnotationInfo) -> Option<&[f64; 4]> {
    let points = info.points();
    let corners = points.get(..4).and_then(|p| <&[f64; 4]>::try_from(p).ok());
    if corners.is_none() {
        log::debug!("shape payload has {} coordinates, need 4", points.len());
    }
    corners
}

fn non_empty(points: Vec<Point>) -> Option<Vec<Point>> {
    if points.is_empty() { None } else { Some(points) }
}

fn stroke_for(info: &AnnotationInfo, viewport: Viewport) -> Stroke {
    Stroke {
        width: viewport.stroke_width(info.thickness()),
        color: format_color(info.color.as_ref()),
    }
}

fn text_shape(info: &AnnotationInfo, viewport: Viewport) -> Option<Shape> {
    let (Some(x), Some(y)) = (info.x, info.y) else {
        log::debug!("text payload has no position");
        return None;
    };

    // `fontSize` is already in pixels; older records only carry the
    // slide-height-relative `calcedFontSize`.
    let font_size = info
        .font_size
        .or_else(|| {
            info.calced_font_size
                .map(|size| crate::util::scale(size, viewport.height))
        });

    Some(Shape::Text {
        origin: viewport.point(x, y),
        size: (
            crate::util::scale(info.text_box_width.unwrap_or(0.0), viewport.width),
            crate::util::scale(info.text_box_height.unwrap_or(0.0), viewport.height),
        ),
        lines: info
            .text
            .as_deref()
            .map(|text| text.split('\n').map(str::to_string).collect())
            .unwrap_or_default(),
        font_size,
        color: format_color(info.font_color.as_ref().or(info.color.as_ref())),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::ColorValue;

    fn viewport() -> Viewport {
        Viewport::new(200.0, 100.0)
    }

    fn annotation(kind: AnnotationType, info: AnnotationInfo) -> Annotation {
        Annotation::new("a", StatusConfig::default().end, kind, info)
    }

    fn with_points(points: &[f64]) -> AnnotationInfo {
        AnnotationInfo {
            points: Some(points.to_vec()),
            thickness: Some(1.0),
            color: Some(ColorValue::Int(255)),
            ..AnnotationInfo::default()
        }
    }

    #[test]
    fn triangle_apex_sits_over_base_midpoint() {
        let tri = triangle_coordinates(&[10.0, 20.0, 50.0, 80.0], viewport());
        assert_eq!(tri.top, Point::new(60.0, 20.0));
        assert_eq!(tri.bottom_left, Point::new(20.0, 80.0));
        assert_eq!(tri.bottom_right, Point::new(100.0, 80.0));
    }

    #[test]
    fn ellipse_center_is_min_corner() {
        let oval = ellipse_coordinates(&[50.0, 60.0, 10.0, 20.0], viewport());
        assert_eq!(
            oval,
            EllipseCoordinates {
                cx: 20.0,
                cy: 20.0,
                rx: 80.0,
                ry: 40.0
            }
        );
        assert_eq!(oval.center(), Point::new(60.0, 40.0));
        assert_eq!(oval.semi_axes(), (40.0, 20.0));
    }

    #[test]
    fn ellipse_path_spans_box() {
        let oval = EllipseCoordinates {
            cx: 0.0,
            cy: 0.0,
            rx: 100.0,
            ry: 50.0,
        };
        let path = oval.bezier_path();
        assert_eq!(path[0], PathEl::MoveTo(Point::new(0.0, 25.0)));
        let ends: Vec<Point> = path[1..]
            .iter()
            .map(|el| match el {
                PathEl::CurveTo(_, _, p) => *p,
                other => panic!("unexpected element {other:?}"),
            })
            .collect();
        assert_eq!(
            ends,
            vec![
                Point::new(50.0, 0.0),
                Point::new(100.0, 25.0),
                Point::new(50.0, 50.0),
                Point::new(0.0, 25.0),
            ]
        );
        if let PathEl::CurveTo(c1, _, _) = path[1] {
            assert!((c1.y - (25.0 - 25.0 * KAPPA)).abs() < 1e-12);
        } else {
            panic!("expected a cubic, got {:?}", path[1]);
        }
    }

    #[test]
    fn rectangle_is_four_explicit_corners() {
        let corners = rectangle_corners(&[10.0, 10.0, 20.0, 40.0], viewport());
        assert_eq!(
            corners,
            [
                Point::new(20.0, 10.0),
                Point::new(40.0, 10.0),
                Point::new(40.0, 40.0),
                Point::new(20.0, 40.0),
            ]
        );
    }

    #[test]
    fn short_payloads_are_skipped() {
        let statuses = StatusConfig::default();
        let line = annotation(AnnotationType::Line, with_points(&[1.0, 2.0, 3.0]));
        assert!(Shape::from_annotation(&line, viewport(), &statuses).is_none());

        let eraser = annotation(AnnotationType::ElementEraser, with_points(&[5.0]));
        assert!(Shape::from_annotation(&eraser, viewport(), &statuses).is_none());

        let unknown = annotation(
            AnnotationType::Other("sticker".into()),
            with_points(&[1.0, 2.0, 3.0, 4.0]),
        );
        assert!(Shape::from_annotation(&unknown, viewport(), &statuses).is_none());
    }

    #[test]
    fn stroke_scales_with_width_and_formats_color() {
        let statuses = StatusConfig::default();
        let line = annotation(AnnotationType::Line, with_points(&[0.0, 0.0, 10.0, 10.0]));
        let shape = Shape::from_annotation(&line, viewport(), &statuses).unwrap();
        match shape {
            Shape::Line { stroke, coords } => {
                assert_eq!(stroke.width, 2.0);
                assert_eq!(stroke.color, "#0000ff");
                assert_eq!(coords.end, Point::new(20.0, 10.0));
            }
            other => panic!("expected line, got {other:?}"),
        }
    }

    #[test]
    fn pencil_mode_depends_on_status() {
        let statuses = StatusConfig::default();
        let mut info = with_points(&[0.0, 0.0, 10.0, 0.0, 20.0, 0.0]);
        info.commands = Some(vec![1, 3]);
        let mut pencil = annotation(AnnotationType::Pencil, info);

        let Some(Shape::Pencil { path, .. }) =
            Shape::from_annotation(&pencil, viewport(), &statuses)
        else {
            panic!("expected pencil");
        };
        assert_eq!(path.len(), 2);
        assert!(matches!(path[1], PathEl::QuadTo(..)));

        pencil.status = statuses.update.clone();
        let Some(Shape::Pencil { path, .. }) =
            Shape::from_annotation(&pencil, viewport(), &statuses)
        else {
            panic!("expected pencil");
        };
        assert_eq!(path.len(), 3);
        assert!(path[1..].iter().all(|el| matches!(el, PathEl::LineTo(_))));
    }

    #[test]
    fn finished_pencil_without_commands_is_skipped() {
        let statuses = StatusConfig::default();
        let pencil = annotation(AnnotationType::Pencil, with_points(&[0.0, 0.0, 1.0, 1.0]));
        assert!(Shape::from_annotation(&pencil, viewport(), &statuses).is_none());
    }

    #[test]
    fn text_splits_lines_and_scales_box() {
        let statuses = StatusConfig::default();
        let info = AnnotationInfo {
            x: Some(10.0),
            y: Some(10.0),
            text: Some("hello\nworld".into()),
            font_size: Some(18.0),
            font_color: Some(ColorValue::from("#ff0000")),
            text_box_width: Some(20.0),
            text_box_height: Some(5.0),
            ..AnnotationInfo::default()
        };
        let text = annotation(AnnotationType::Text, info);
        let Some(Shape::Text {
            origin,
            size,
            lines,
            font_size,
            color,
        }) = Shape::from_annotation(&text, viewport(), &statuses)
        else {
            panic!("expected text");
        };
        assert_eq!(origin, Point::new(20.0, 10.0));
        assert_eq!(size, (40.0, 5.0));
        assert_eq!(lines, vec!["hello", "world"]);
        assert_eq!(font_size, Some(18.0));
        assert_eq!(color, "#ff0000");
    }

    #[test]
    fn text_font_size_falls_back_to_normalized_size() {
        let statuses = StatusConfig::default();
        let info = AnnotationInfo {
            x: Some(0.0),
            y: Some(0.0),
            calced_font_size: Some(10.0),
            ..AnnotationInfo::default()
        };
        let text = annotation(AnnotationType::Text, info);
        let Some(Shape::Text {
            font_size, lines, ..
        }) = Shape::from_annotation(&text, viewport(), &statuses)
        else {
            panic!("expected text");
        };
        assert_eq!(font_size, Some(10.0));
        assert!(lines.is_empty());
    }
}
