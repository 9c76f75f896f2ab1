use crate::annotation::DrawStatus;
use crate::input::{events::MouseButton, tool::Tool};

use super::{DrawingState, InputState};

impl InputState {
    /// Processes a mouse button press event.
    ///
    /// # Behavior
    /// - Left click while Idle: starts a shape with the current tool and emits START
    /// - Left click while writing text: commits the text box
    /// - Right click: cancels the shape in progress
    pub fn on_mouse_press(&mut self, button: MouseButton, x: f64, y: f64) {
        match button {
            MouseButton::Left => match &self.state {
                DrawingState::Idle => self.start_shape(x, y),
                DrawingState::WritingText { .. } => self.commit_text(),
                DrawingState::Drawing { .. } => {}
            },
            MouseButton::Right => self.cancel(),
            MouseButton::Middle => {}
        }
    }

    /// Processes mouse motion (dragging) events.
    ///
    /// Freehand tools append the position; box tools move the second corner.
    /// Every change emits an UPDATE.
    pub fn on_mouse_motion(&mut self, x: f64, y: f64) {
        let (nx, ny) = self.normalize(x, y);
        let DrawingState::Drawing { tool, id, points } = &mut self.state else {
            return;
        };

        if tool.is_freehand() {
            points.extend([nx, ny]);
        } else {
            points.truncate(2);
            points.extend([nx, ny]);
        }

        let (tool, id, points) = (*tool, id.clone(), points.clone());
        let annotation = self.shape_annotation(tool, &id, DrawStatus::Update, &points);
        self.emit(annotation);
    }

    /// Processes mouse button release events.
    ///
    /// When the left button is released during drawing, the shape is
    /// finalized at the release position, END is emitted, and the state
    /// returns to Idle.
    pub fn on_mouse_release(&mut self, button: MouseButton, x: f64, y: f64) {
        if button != MouseButton::Left {
            return;
        }

        let (nx, ny) = self.normalize(x, y);
        let DrawingState::Drawing { tool, id, mut points } =
            std::mem::replace(&mut self.state, DrawingState::Idle)
        else {
            return;
        };

        if tool.is_freehand() {
            if points.rchunks_exact(2).next() != Some(&[nx, ny][..]) {
                points.extend([nx, ny]);
            }
        } else {
            points.truncate(2);
            points.extend([nx, ny]);
        }

        log::debug!("finished {} {id} with {} points", tool.annotation_type(), points.len() / 2);
        let annotation = self.shape_annotation(tool, &id, DrawStatus::End, &points);
        self.emit(annotation);
    }

    fn start_shape(&mut self, x: f64, y: f64) {
        let (nx, ny) = self.normalize(x, y);
        let tool = self.current_tool;
        let id = self.next_shape_id();

        if tool == Tool::Text {
            let annotation = self.text_annotation(&id, DrawStatus::Start, nx, ny, "");
            self.emit(annotation);
            self.state = DrawingState::WritingText {
                id,
                x: nx,
                y: ny,
                buffer: String::new(),
            };
            return;
        }

        let points = if tool.is_freehand() {
            vec![nx, ny]
        } else {
            vec![nx, ny, nx, ny]
        };
        let annotation = self.shape_annotation(tool, &id, DrawStatus::Start, &points);
        self.emit(annotation);
        self.state = DrawingState::Drawing { tool, id, points };
    }

    /// Abandons the shape in progress, if any.
    pub fn cancel(&mut self) {
        match std::mem::replace(&mut self.state, DrawingState::Idle) {
            DrawingState::Idle => {}
            DrawingState::Drawing { id, .. } | DrawingState::WritingText { id, .. } => {
                self.discard(id)
            }
        }
    }
}
