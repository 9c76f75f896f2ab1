use super::store::{AnnotationStore, StoreError};
use crate::annotation::Annotation;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Ordered annotation log of one whiteboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub whiteboard_id: String,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl SessionSnapshot {
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }
}

/// Captures a whiteboard's records from a store.
pub fn snapshot_from_store(store: &dyn AnnotationStore, whiteboard_id: &str) -> SessionSnapshot {
    SessionSnapshot {
        whiteboard_id: whiteboard_id.to_string(),
        annotations: store.annotations_for(whiteboard_id),
    }
}

/// Inserts a snapshot's records into a store, in order.
///
/// Records without a whiteboard id are assigned the snapshot's.
pub fn apply_snapshot(
    snapshot: SessionSnapshot,
    store: &mut dyn AnnotationStore,
) -> Result<usize, StoreError> {
    let whiteboard_id = snapshot.whiteboard_id;
    let annotations = snapshot
        .annotations
        .into_iter()
        .map(|mut annotation| {
            if annotation.wb_id.is_none() {
                annotation.wb_id = Some(whiteboard_id.clone());
            }
            annotation
        })
        .collect();
    store.insert_bulk(annotations)
}

/// Reads an ordered annotation list from a JSON file.
///
/// Accepts either a bare array of records or a serialized [`SessionSnapshot`].
pub fn read_annotations(path: &Path) -> Result<Vec<Annotation>> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum AnnotationSource {
        List(Vec<Annotation>),
        Snapshot(SessionSnapshot),
    }

    let source: AnnotationSource = serde_json::from_slice(&bytes)
        .with_context(|| format!("failed to parse annotations from {}", path.display()))?;
    let annotations = match source {
        AnnotationSource::List(annotations) => annotations,
        AnnotationSource::Snapshot(snapshot) => snapshot.annotations,
    };
    log::debug!("parsed {} records from {}", annotations.len(), path.display());
    Ok(annotations)
}
