//! Pencil stroke paths.
//!
//! A pencil stroke has two representations. While the user is still drawing,
//! `points` is a raw polyline. Once the stroke is finalized, an external curve
//! fitter attaches a command stream: integer opcodes paired with the flat point
//! array, each opcode consuming a fixed number of coordinates. Rendering and
//! element-eraser hit testing both replay the same path built here.

use crate::util::{Viewport, point_pairs};
use kurbo::{CubicBez, Line, PathEl, PathSeg, Point, QuadBez};

/// Opcode of a finalized pencil command stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathCommand {
    /// `1`: one point
    MoveTo,
    /// `2`: one point
    LineTo,
    /// `3`: control point, end point
    QuadTo,
    /// `4`: two control points, end point
    CubicTo,
}

impl PathCommand {
    /// Decodes a wire opcode.
    pub fn from_opcode(opcode: i64) -> Option<Self> {
        match opcode {
            1 => Some(PathCommand::MoveTo),
            2 => Some(PathCommand::LineTo),
            3 => Some(PathCommand::QuadTo),
            4 => Some(PathCommand::CubicTo),
            _ => None,
        }
    }

    /// Number of flat coordinate values the command consumes.
    pub fn operand_len(self) -> usize {
        match self {
            PathCommand::MoveTo | PathCommand::LineTo => 2,
            PathCommand::QuadTo => 4,
            PathCommand::CubicTo => 6,
        }
    }
}

/// Accumulator threaded through the command replay.
#[derive(Debug, Default)]
struct Replay {
    /// Index of the next unread coordinate in the point array
    cursor: usize,
    elements: Vec<PathEl>,
}

impl Replay {
    fn step(mut self, opcode: i64, points: &[f64], viewport: Viewport) -> Self {
        let Some(command) = PathCommand::from_opcode(opcode) else {
            log::trace!("skipping unknown pencil opcode {opcode}");
            return self;
        };

        let start = self.cursor;
        let end = start + command.operand_len();
        self.cursor = end;

        let Some(operands) = points.get(start..end) else {
            log::debug!(
                "pencil command {command:?} at coordinate {start} is truncated ({} available)",
                points.len()
            );
            return self;
        };

        let p = |i: usize| viewport.point(operands[i], operands[i + 1]);
        let element = match command {
            PathCommand::MoveTo => PathEl::MoveTo(p(0)),
            PathCommand::LineTo => PathEl::LineTo(p(0)),
            PathCommand::QuadTo => PathEl::QuadTo(p(0), p(2)),
            PathCommand::CubicTo => PathEl::CurveTo(p(0), p(2), p(4)),
        };
        self.elements.push(element);
        self
    }
}

/// Replays a finalized command stream against its point array.
///
/// Unknown opcodes are skipped without consuming coordinates. A command whose
/// operands run past the end of `points` produces nothing, but still advances
/// the cursor so later commands stay aligned with the original stream.
pub fn replay_commands(commands: &[i64], points: &[f64], viewport: Viewport) -> Vec<PathEl> {
    commands
        .iter()
        .fold(Replay::default(), |replay, &opcode| {
            replay.step(opcode, points, viewport)
        })
        .elements
}

/// Builds the live-drawing polyline: move to the first pair, line to the rest.
pub fn polyline(points: &[f64], viewport: Viewport) -> Vec<PathEl> {
    point_pairs(points)
        .enumerate()
        .map(|(i, (x, y))| {
            let p = viewport.point(x, y);
            if i == 0 {
                PathEl::MoveTo(p)
            } else {
                PathEl::LineTo(p)
            }
        })
        .collect()
}

/// Splits a path into drawable segments.
///
/// Follows canvas semantics: a drawing element with no current point only
/// establishes the current point at its end. `ClosePath` adds the closing
/// line back to the subpath start.
pub fn segments(elements: &[PathEl]) -> Vec<PathSeg> {
    let mut segs = Vec::new();
    let mut subpath_start: Option<Point> = None;
    let mut current: Option<Point> = None;

    for el in elements {
        match (*el, current) {
            (PathEl::MoveTo(p), _) => {
                subpath_start = Some(p);
                current = Some(p);
            }
            (PathEl::LineTo(p), Some(from)) => {
                segs.push(PathSeg::Line(Line::new(from, p)));
                current = Some(p);
            }
            (PathEl::QuadTo(c, p), Some(from)) => {
                segs.push(PathSeg::Quad(QuadBez::new(from, c, p)));
                current = Some(p);
            }
            (PathEl::CurveTo(c1, c2, p), Some(from)) => {
                segs.push(PathSeg::Cubic(CubicBez::new(from, c1, c2, p)));
                current = Some(p);
            }
            (PathEl::ClosePath, Some(from)) => {
                if let Some(start) = subpath_start {
                    if start != from {
                        segs.push(PathSeg::Line(Line::new(from, start)));
                    }
                    current = Some(start);
                }
            }
            (PathEl::LineTo(p), None)
            | (PathEl::QuadTo(_, p), None)
            | (PathEl::CurveTo(_, _, p), None) => {
                subpath_start = Some(p);
                current = Some(p);
            }
            (PathEl::ClosePath, None) => {}
        }
    }

    segs
}
