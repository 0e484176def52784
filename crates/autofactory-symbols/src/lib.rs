#![warn(missing_docs)]

//! Symbol model for autofactory
//!
//! Describes what the generator needs from a compiled workspace: modules and
//! their dependencies, declared types with constructors and methods, type
//! resolution, and document I/O through immutable workspace snapshots.

pub mod error;
pub mod manifest;
pub mod models;
pub mod provider;
pub mod scope;
pub mod snapshot;
pub mod type_ref;

// Re-export public API
pub use error::{Result, SymbolError};
pub use manifest::{ManifestProvider, ModuleManifest, WorkspaceManifest, MANIFEST_FILE_NAMES};
pub use models::{
    Accessibility, AttributeData, ConstructorSymbol, MethodSymbol, ModuleId, ModuleInfo,
    ParameterSymbol, TypeKind, TypeParameterSymbol, TypeSymbol,
};
pub use provider::SymbolProvider;
pub use scope::candidate_names;
pub use snapshot::{apply_to_disk, AppliedChanges, DocumentEdit, PendingDocument, WorkspaceSnapshot};
pub use type_ref::TypeRef;
