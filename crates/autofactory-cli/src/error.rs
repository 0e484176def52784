// CLI error types and exit codes

use autofactory_config::ConfigError;
use autofactory_generation::GenerationError;
use autofactory_orchestration::OrchestrationError;
use autofactory_symbols::SymbolError;
use thiserror::Error;

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Workspace error: {0}")]
    Symbols(#[from] SymbolError),

    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    #[error("Generation error: {0}")]
    Orchestration(#[from] OrchestrationError),
}

impl CliError {
    /// Get a user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            CliError::InvalidArgument { message } => {
                format!(
                    "Invalid argument: {}\n\nRun 'autofactory --help' for usage information.",
                    message
                )
            }
            CliError::Io(e) => format!("File operation failed: {}", e),
            CliError::Config(e) => {
                format!("Configuration error: {}\n\nCheck autofactory.toml and AUTOFACTORY_* variables.", e)
            }
            CliError::Symbols(e) => {
                format!("Could not load the workspace: {}\n\nPass --manifest to point at the symbol manifest.", e)
            }
            CliError::Generation(e) => format!("Factory generation failed: {}", e),
            CliError::Orchestration(e) => format!("Factory generation failed: {}", e),
        }
    }

    /// Get technical details for verbose mode
    pub fn technical_details(&self) -> String {
        format!("{:?}", self)
    }

    /// Process exit code
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgument { .. } => 2,
            CliError::Config(_) => 3,
            CliError::Io(_) => 14,
            CliError::Symbols(SymbolError::IoError(_)) => 14,
            CliError::Symbols(_) => 17,
            CliError::Generation(e) => e.exit_code(),
            CliError::Orchestration(e) => e.exit_code(),
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;
