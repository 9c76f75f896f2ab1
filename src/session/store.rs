//! Annotation store contract and an in-memory implementation.
//!
//! The renderer and resolver only need an ordered record list per
//! whiteboard; this module models the data layer that provides it.

use crate::annotation::Annotation;
use crate::config::StatusConfig;
use crate::input::Outgoing;
use thiserror::Error;

/// Errors raised by store operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("annotation {id} is already finished; finished records are immutable")]
    AlreadyFinished { id: String },
    #[error("annotation {id} has no whiteboard id")]
    MissingWhiteboard { id: String },
}

/// Data layer operations the engine relies on.
///
/// Implementations must return records in insertion order; occlusion
/// depends on it.
pub trait AnnotationStore {
    fn insert(&mut self, annotation: Annotation) -> Result<(), StoreError>;

    /// Inserts records in order, stopping at the first failure.
    ///
    /// Returns how many records were stored.
    fn insert_bulk(&mut self, annotations: Vec<Annotation>) -> Result<usize, StoreError> {
        let mut inserted = 0;
        for annotation in annotations {
            self.insert(annotation)?;
            inserted += 1;
        }
        Ok(inserted)
    }

    /// Most recent record carrying `id`.
    fn find_by_id(&self, id: &str) -> Option<&Annotation>;

    /// All records of a whiteboard, oldest first.
    fn annotations_for(&self, whiteboard_id: &str) -> Vec<Annotation>;

    /// Deletes the records of `id` that are not finished; returns how many.
    fn remove_unfinished(&mut self, id: &str) -> usize;

    /// Deletes every record of a whiteboard; returns how many.
    fn clear(&mut self, whiteboard_id: &str) -> usize;

    /// Removes the newest shape of a whiteboard (the one owning its last
    /// record) together with every record sharing its id, and returns that id.
    fn undo(&mut self, whiteboard_id: &str) -> Option<String>;
}

/// How [`MemoryStore`] treats repeated ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreMode {
    /// Keep every START/UPDATE/END record
    #[default]
    History,
    /// Keep only the latest record per id, at the position of the first one
    Latest,
}

/// In-memory [`AnnotationStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    statuses: StatusConfig,
    mode: StoreMode,
    records: Vec<Annotation>,
}

impl MemoryStore {
    pub fn new(statuses: StatusConfig, mode: StoreMode) -> Self {
        Self {
            statuses,
            mode,
            records: Vec::new(),
        }
    }

    /// Total number of stored records across all whiteboards.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Applies one message from the input state machine.
    pub fn apply(&mut self, message: Outgoing) -> Result<(), StoreError> {
        match message {
            Outgoing::Send(annotation) => self.insert(annotation),
            Outgoing::Discard { id } => {
                self.remove_unfinished(&id);
                Ok(())
            }
        }
    }

    fn is_finished(&self, id: &str) -> bool {
        self.records
            .iter()
            .any(|a| a.id == id && a.is_finished(&self.statuses))
    }
}

impl AnnotationStore for MemoryStore {
    fn insert(&mut self, annotation: Annotation) -> Result<(), StoreError> {
        if annotation.wb_id.is_none() {
            return Err(StoreError::MissingWhiteboard { id: annotation.id });
        }
        if self.is_finished(&annotation.id) {
            return Err(StoreError::AlreadyFinished { id: annotation.id });
        }

        match self.mode {
            StoreMode::History => self.records.push(annotation),
            StoreMode::Latest => {
                match self.records.iter_mut().find(|a| a.id == annotation.id) {
                    Some(existing) => *existing = annotation,
                    None => self.records.push(annotation),
                }
            }
        }
        Ok(())
    }

    fn find_by_id(&self, id: &str) -> Option<&Annotation> {
        self.records.iter().rev().find(|a| a.id == id)
    }

    fn annotations_for(&self, whiteboard_id: &str) -> Vec<Annotation> {
        self.records
            .iter()
            .filter(|a| a.wb_id.as_deref() == Some(whiteboard_id))
            .cloned()
            .collect()
    }

    fn remove_unfinished(&mut self, id: &str) -> usize {
        let before = self.records.len();
        let statuses = &self.statuses;
        self.records
            .retain(|a| a.id != id || a.is_finished(statuses));
        before - self.records.len()
    }

    fn clear(&mut self, whiteboard_id: &str) -> usize {
        let before = self.records.len();
        self.records
            .retain(|a| a.wb_id.as_deref() != Some(whiteboard_id));
        let removed = before - self.records.len();
        log::info!("cleared {removed} records from whiteboard {whiteboard_id}");
        removed
    }

    fn undo(&mut self, whiteboard_id: &str) -> Option<String> {
        let id = self
            .records
            .iter()
            .rev()
            .find(|a| a.wb_id.as_deref() == Some(whiteboard_id))
            .map(|a| a.id.clone())?;
        self.records.retain(|a| a.id != id);
        log::debug!("undid shape {id} on whiteboard {whiteboard_id}");
        Some(id)
    }
}
