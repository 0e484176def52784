//! The symbol provider contract consumed by the generator

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::{
    error::Result,
    models::{ModuleInfo, TypeSymbol},
    snapshot::{AppliedChanges, WorkspaceSnapshot},
};

/// Supplies compiled symbol information and file I/O for a workspace
///
/// Symbol queries are synchronous views over an already compiled model;
/// file operations are async because they touch the disk.
#[async_trait]
pub trait SymbolProvider: Send + Sync {
    /// All modules of the workspace with their declared dependencies
    fn modules(&self) -> Result<Vec<ModuleInfo>>;

    /// Types declared in a module, in declaration order
    fn declared_types(&self, module: &str) -> Result<Vec<TypeSymbol>>;

    /// Resolves a namespace-qualified name with the given arity within the
    /// compiled view of `module` (its own types and those of its dependencies)
    fn resolve_type(&self, module: &str, qualified_name: &str, arity: usize) -> Option<TypeSymbol>;

    /// Whether `ty` implements `interface`, directly or transitively
    ///
    /// Generic instantiations are compared by their generic definition.
    fn implements(&self, module: &str, ty: &TypeSymbol, interface: &TypeSymbol) -> bool;

    /// Absolute paths of all documents currently belonging to a module
    async fn documents(&self, module: &str) -> Result<Vec<PathBuf>>;

    /// Raw bytes of a document
    async fn read_source(&self, path: &Path) -> Result<Vec<u8>>;

    /// Whether a document exists on disk
    async fn exists(&self, path: &Path) -> bool;

    /// Writes and removes the documents recorded in `snapshot`
    ///
    /// Writes whose content equals the file on disk are skipped.
    async fn apply_changes(&self, snapshot: &WorkspaceSnapshot) -> Result<AppliedChanges>;
}
