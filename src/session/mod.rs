//! Annotation storage.
//!
//! Models the data layer the engine reads from ([`AnnotationStore`], with the
//! in-memory [`MemoryStore`]) and moves a whiteboard's ordered annotation log
//! in and out of it as a [`SessionSnapshot`].

mod snapshot;
mod store;

pub use snapshot::{SessionSnapshot, apply_snapshot, read_annotations, snapshot_from_store};
pub use store::{AnnotationStore, MemoryStore, StoreError, StoreMode};
