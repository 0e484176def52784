//! Error types for the symbol model

use thiserror::Error;

/// Errors raised by symbol providers and the type-reference parser
#[derive(Debug, Error)]
pub enum SymbolError {
    /// A module id not present in the workspace
    #[error("Module not found: {0}")]
    ModuleNotFound(String),

    /// Text that does not parse as a type reference
    #[error("Invalid type reference '{text}': {message}")]
    #[allow(missing_docs)]
    InvalidTypeReference { text: String, message: String },

    /// Malformed or inconsistent workspace manifest
    #[error("Manifest error: {0}")]
    Manifest(String),

    /// A snapshot document whose path lies outside its module root
    #[error("Document {path} is outside of module {module}")]
    #[allow(missing_docs)]
    DocumentOutsideModule { module: String, path: String },

    /// File system failure
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON manifest failure
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// YAML manifest failure
    #[error("YAML error: {0}")]
    YamlError(String),
}

impl From<serde_yaml::Error> for SymbolError {
    fn from(err: serde_yaml::Error) -> Self {
        SymbolError::YamlError(err.to_string())
    }
}

/// Result type for symbol operations
pub type Result<T> = std::result::Result<T, SymbolError>;
