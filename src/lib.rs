//! Whiteboard annotation rendering and occlusion engine.
//!
//! Annotations are stored in normalized slide coordinates. A render pass
//! resolves which records an element eraser has hidden ([`occlusion`]) and
//! paints the rest in order onto a [`draw::Surface`] ([`draw`]). The
//! [`input`] state machine produces new records from pointer and key events,
//! and [`session`] models the store they are written to.

pub mod annotation;
pub mod config;
pub mod draw;
pub mod input;
pub mod occlusion;
pub mod session;
pub mod util;

pub use annotation::{Annotation, AnnotationInfo, AnnotationType};
pub use config::Config;
pub use occlusion::{OcclusionResolver, compute_visibility};
