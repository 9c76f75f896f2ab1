use crate::annotation::DrawStatus;
use crate::input::events::Key;

use super::{DrawingState, InputState};

impl InputState {
    /// Processes a key press.
    ///
    /// While writing text, characters, Return and Backspace edit the buffer
    /// and emit an UPDATE; Escape commits the box. While drawing a shape,
    /// Escape cancels it. Other keys are ignored.
    pub fn on_key_press(&mut self, key: Key) {
        if let DrawingState::WritingText { buffer, .. } = &mut self.state {
            let edited = match key {
                Key::Char(c) => {
                    buffer.push(c);
                    true
                }
                Key::Return => {
                    buffer.push('\n');
                    true
                }
                Key::Backspace => buffer.pop().is_some(),
                Key::Escape => {
                    self.commit_text();
                    return;
                }
                Key::Unknown => false,
            };
            if edited {
                self.emit_text(DrawStatus::Update);
            }
            return;
        }

        if key == Key::Escape {
            self.cancel();
        }
    }

    /// Finalizes the text box being written.
    ///
    /// An empty buffer is discarded instead of committed.
    pub(crate) fn commit_text(&mut self) {
        let DrawingState::WritingText { id, buffer, .. } = &self.state else {
            return;
        };
        if buffer.is_empty() {
            self.cancel();
            return;
        }

        log::debug!("committing text {id} ({} chars)", buffer.chars().count());
        self.emit_text(DrawStatus::End);
        self.state = DrawingState::Idle;
    }

    fn emit_text(&mut self, status: DrawStatus) {
        let DrawingState::WritingText { id, x, y, buffer } = &self.state else {
            return;
        };
        let annotation = self.text_annotation(id, status, *x, *y, buffer);
        self.emit(annotation);
    }
}
