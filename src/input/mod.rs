//! Input handling and tool state machine.
//!
//! This module translates pointer and keyboard events into annotation
//! messages. It keeps the current tool and drawing parameters, and runs the
//! state machine for the drawing modes (idle, drawing, writing text).

pub mod events;
pub mod state;
pub mod tool;

// Re-export commonly used types at module level
pub use events::{Key, MouseButton};
pub use state::{DrawingState, InputState, Outgoing};
pub use tool::Tool;
