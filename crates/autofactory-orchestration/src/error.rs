//! Error types for the orchestration crate

use autofactory_generation::GenerationError;
use autofactory_symbols::SymbolError;
use thiserror::Error;

/// Errors that abort an orchestration run
#[derive(Debug, Error)]
pub enum OrchestrationError {
    #[error("Circular dependency detected: {0}")]
    CircularDependency(String),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Symbols(#[from] SymbolError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid marker pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Module task failed: {0}")]
    TaskFailed(String),
}

impl OrchestrationError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            OrchestrationError::Generation(err) => err.exit_code(),
            OrchestrationError::Symbols(SymbolError::IoError(_)) | OrchestrationError::IoError(_) => 14,
            OrchestrationError::Symbols(_) => 17,
            OrchestrationError::CircularDependency(_) => 18,
            OrchestrationError::SerializationError(_) => 19,
            OrchestrationError::Pattern(_) | OrchestrationError::TaskFailed(_) => 20,
        }
    }
}

/// Result type for orchestration operations
pub type Result<T> = std::result::Result<T, OrchestrationError>;
