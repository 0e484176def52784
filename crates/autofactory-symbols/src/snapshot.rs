//! Immutable workspace snapshots
//!
//! A snapshot records pending document edits. Every edit returns a new
//! snapshot; nothing is shared mutably, so concurrent tasks hand back values
//! and a single fold after the join builds the final snapshot.

use std::{
    collections::BTreeMap,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};

use tokio::fs;
use tracing::debug;

use crate::{error::Result, models::ModuleId};

/// A pending change to one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentEdit {
    /// Add the document, or replace its content
    Write(String),
    /// Remove the document
    Remove,
}

/// A document edit together with its owning module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDocument {
    /// Module whose root contains the document
    pub module: ModuleId,
    /// Content to write, or removal
    pub edit: DocumentEdit,
}

/// Outcome of applying a snapshot to disk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppliedChanges {
    /// Documents whose content was written
    pub written: Vec<PathBuf>,
    /// Documents whose content already matched
    pub unchanged: Vec<PathBuf>,
    /// Documents deleted from disk
    pub removed: Vec<PathBuf>,
}

/// Immutable set of pending document edits, keyed by absolute path
#[derive(Debug, Clone, Default)]
pub struct WorkspaceSnapshot {
    documents: Arc<BTreeMap<PathBuf, PendingDocument>>,
}

impl WorkspaceSnapshot {
    /// Creates an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot where `path` is added or replaced with `content`
    pub fn with_document(
        &self,
        module: impl Into<ModuleId>,
        path: impl Into<PathBuf>,
        content: impl Into<String>,
    ) -> Self {
        self.with_edit(module.into(), path.into(), DocumentEdit::Write(content.into()))
    }

    /// Returns a snapshot where `path` is removed
    pub fn without_document(&self, module: impl Into<ModuleId>, path: impl Into<PathBuf>) -> Self {
        self.with_edit(module.into(), path.into(), DocumentEdit::Remove)
    }

    fn with_edit(&self, module: ModuleId, path: PathBuf, edit: DocumentEdit) -> Self {
        let mut documents = (*self.documents).clone();
        documents.insert(path, PendingDocument { module, edit });
        Self {
            documents: Arc::new(documents),
        }
    }

    /// Pending edit for a path
    pub fn get(&self, path: &Path) -> Option<&PendingDocument> {
        self.documents.get(path)
    }

    /// All pending edits in path order
    pub fn iter(&self) -> impl Iterator<Item = (&PathBuf, &PendingDocument)> {
        self.documents.iter()
    }

    /// Paths with a pending write
    pub fn written_paths(&self) -> Vec<PathBuf> {
        self.iter()
            .filter(|(_, document)| matches!(document.edit, DocumentEdit::Write(_)))
            .map(|(path, _)| path.clone())
            .collect()
    }

    /// Paths with a pending removal
    pub fn removed_paths(&self) -> Vec<PathBuf> {
        self.iter()
            .filter(|(_, document)| document.edit == DocumentEdit::Remove)
            .map(|(path, _)| path.clone())
            .collect()
    }

    /// Number of pending edits
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether there is nothing to apply
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Applies a snapshot to the local filesystem
///
/// Parent directories are created as needed. Removing a file that is already
/// gone is not an error.
pub async fn apply_to_disk(snapshot: &WorkspaceSnapshot) -> Result<AppliedChanges> {
    let mut applied = AppliedChanges::default();

    for (path, document) in snapshot.iter() {
        match &document.edit {
            DocumentEdit::Write(content) => {
                match fs::read(path).await {
                    Ok(existing) if existing == content.as_bytes() => {
                        applied.unchanged.push(path.clone());
                        continue;
                    }
                    Ok(_) => {}
                    Err(e) if e.kind() == ErrorKind::NotFound => {}
                    Err(e) => return Err(e.into()),
                }
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent).await?;
                }
                fs::write(path, content).await?;
                debug!(path = %path.display(), module = %document.module, "Wrote document");
                applied.written.push(path.clone());
            }
            DocumentEdit::Remove => match fs::remove_file(path).await {
                Ok(()) => {
                    debug!(path = %path.display(), module = %document.module, "Removed document");
                    applied.removed.push(path.clone());
                }
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            },
        }
    }

    Ok(applied)
}
