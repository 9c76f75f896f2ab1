//! Coordinate scaling and small geometry helpers.
//!
//! Annotations are persisted in normalized slide coordinates: every value is a
//! percentage (0-100) of the slide width or height. Pixel coordinates are only
//! derived for the duration of a render or hit-test pass and never stored.

use kurbo::Point;
use serde::{Deserialize, Serialize};

// ============================================================================
// Normalization
// ============================================================================

/// Converts a normalized (0-100) value into pixels along `dimension`.
///
/// This is the only normalization rule used anywhere in the crate; no shape
/// type special-cases it.
pub fn scale(value: f64, dimension: f64) -> f64 {
    value / 100.0 * dimension
}

/// Inverse of [`scale`]: converts a pixel value back to a normalized percentage.
///
/// Returns `0.0` for a zero-sized dimension.
pub fn unscale(pixel: f64, dimension: f64) -> f64 {
    if dimension == 0.0 {
        return 0.0;
    }
    pixel / dimension * 100.0
}

/// Pixel stroke width for a normalized thickness.
///
/// Thickness scales with the slide width only, so strokes keep the same weight
/// regardless of the slide aspect ratio.
pub fn stroke_width(thickness: f64, slide_width: f64) -> f64 {
    thickness * slide_width / 100.0
}

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    a.distance(b)
}

/// Iterates a flat `[x0, y0, x1, y1, ...]` list as coordinate pairs.
///
/// A trailing unpaired value is ignored.
pub fn point_pairs(values: &[f64]) -> impl Iterator<Item = (f64, f64)> + '_ {
    values.chunks_exact(2).map(|pair| (pair[0], pair[1]))
}

// ============================================================================
// Viewport
// ============================================================================

/// Pixel size of the slide surface a pass renders to or hit-tests against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Slide width in pixels
    pub width: f64,
    /// Slide height in pixels
    pub height: f64,
}

impl Viewport {
    /// Creates a viewport of the given pixel size.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Maps a normalized `(x, y)` pair to a pixel-space point.
    pub fn point(&self, x: f64, y: f64) -> Point {
        Point::new(scale(x, self.width), scale(y, self.height))
    }

    /// Maps a pixel-space point back to normalized coordinates.
    pub fn normalize(&self, point: Point) -> (f64, f64) {
        (unscale(point.x, self.width), unscale(point.y, self.height))
    }

    /// Pixel stroke width for a normalized thickness on this slide.
    pub fn stroke_width(&self, thickness: f64) -> f64 {
        stroke_width(thickness, self.width)
    }

    /// Maps a flat normalized point list to pixel-space points.
    pub fn points(&self, values: &[f64]) -> Vec<Point> {
        point_pairs(values).map(|(x, y)| self.point(x, y)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_and_unscale_are_inverse() {
        for &dimension in &[1.0, 640.0, 1920.0, 333.3] {
            for &pixel in &[0.0, 1.0, 17.5, 320.0, 1000.0] {
                let round_trip = scale(unscale(pixel, dimension), dimension);
                assert!((round_trip - pixel).abs() < 1e-9, "{pixel} on {dimension}");
            }
        }
    }

    #[test]
    fn scale_is_linear() {
        assert_eq!(scale(50.0, 800.0), 400.0);
        assert_eq!(scale(0.0, 800.0), 0.0);
        assert_eq!(scale(100.0, 800.0), 800.0);
        assert_eq!(scale(10.0, 800.0) + scale(20.0, 800.0), scale(30.0, 800.0));
    }

    #[test]
    fn unscale_handles_zero_dimension() {
        assert_eq!(unscale(42.0, 0.0), 0.0);
    }

    #[test]
    fn stroke_width_ignores_height() {
        let wide = Viewport::new(1000.0, 100.0);
        let tall = Viewport::new(1000.0, 4000.0);
        assert_eq!(wide.stroke_width(0.5), 5.0);
        assert_eq!(tall.stroke_width(0.5), 5.0);
        assert_eq!(stroke_width(2.0, 300.0), 6.0);
    }

    #[test]
    fn point_pairs_drops_trailing_value() {
        let pairs: Vec<_> = point_pairs(&[1.0, 2.0, 3.0, 4.0, 5.0]).collect();
        assert_eq!(pairs, vec![(1.0, 2.0), (3.0, 4.0)]);
    }

    #[test]
    fn viewport_maps_points_both_ways() {
        let viewport = Viewport::new(200.0, 100.0);
        let p = viewport.point(25.0, 50.0);
        assert_eq!((p.x, p.y), (50.0, 50.0));
        assert_eq!(viewport.normalize(p), (25.0, 50.0));
        assert_eq!(distance(Point::new(0.0, 0.0), Point::new(3.0, 4.0)), 5.0);
    }
}
