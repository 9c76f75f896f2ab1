//! Drawing tool selection.

use crate::annotation::AnnotationType;

/// Drawing tool selection.
///
/// The active tool determines which annotation type a pointer press creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Freehand pencil stroke (default)
    #[default]
    Pencil,
    /// Straight line between press and release
    Line,
    /// Axis-aligned rectangle from corner to corner
    Rectangle,
    /// Upward triangle inscribed in the drag box
    Triangle,
    /// Ellipse inscribed in the drag box
    Ellipse,
    /// Freehand eraser that punches through earlier strokes
    Eraser,
    /// Hides whole shapes under its points
    ElementEraser,
    /// Text box placed at the press point
    Text,
}

impl Tool {
    /// Annotation type produced by this tool.
    pub fn annotation_type(self) -> AnnotationType {
        match self {
            Tool::Pencil => AnnotationType::Pencil,
            Tool::Line => AnnotationType::Line,
            Tool::Rectangle => AnnotationType::Rectangle,
            Tool::Triangle => AnnotationType::Triangle,
            Tool::Ellipse => AnnotationType::Ellipse,
            Tool::Eraser => AnnotationType::Eraser,
            Tool::ElementEraser => AnnotationType::ElementEraser,
            Tool::Text => AnnotationType::Text,
        }
    }

    /// Whether dragging appends points instead of moving a second corner.
    pub fn is_freehand(self) -> bool {
        matches!(self, Tool::Pencil | Tool::Eraser | Tool::ElementEraser)
    }
}
