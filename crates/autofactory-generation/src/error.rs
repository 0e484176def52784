//! Error types for factory generation

use autofactory_symbols::SymbolError;
use thiserror::Error;

/// Errors that abort a generation run
///
/// None of these are recovered locally: a single one aborts the whole run.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The marker carries no usable contract reference
    #[error("{}", missing_contract_message(.target, .reference.as_deref()))]
    MissingContract {
        /// Target the marker is attached to
        target: String,
        /// Reference text when one was given but could not be resolved
        reference: Option<String>,
    },

    /// A concrete generic argument of the contract reference does not resolve
    #[error("Cannot resolve generic argument '{argument}' of contract {contract} for {target}")]
    GenericArgumentUnresolved {
        /// Target the marker is attached to
        target: String,
        /// Contract reference as written
        contract: String,
        /// Offending argument
        argument: String,
    },

    /// A contract method returns a type the target does not implement
    #[error(
        "The factory method {method} of {contract} returns {return_type}, which is not implemented by {target}. \
         Does the marker map to the correct contract?"
    )]
    ContractMismatch {
        /// Target type
        target: String,
        /// Contract type
        contract: String,
        /// Contract method name
        method: String,
        /// Declared return type of the method
        return_type: String,
    },

    /// The contract exposes no creation method at all
    #[error("Contract {contract} of {target} declares no creation method")]
    EmptyContract {
        /// Target type
        target: String,
        /// Contract type
        contract: String,
    },

    /// No constructor could be selected for a contract method
    #[error("Could not select a constructor from {target} for {method}({parameters})")]
    ConstructorSelection {
        /// Target type
        target: String,
        /// Contract method name
        method: String,
        /// Comma-separated parameter names of the method
        parameters: String,
    },

    /// The module already fails to compile
    #[error("Module {module} does not compile: {}", .diagnostics.join("; "))]
    UpstreamCompilation {
        /// Module identifier
        module: String,
        /// Compiler diagnostics
        diagnostics: Vec<String>,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Template registration or rendering failed
    #[error("Template error: {0}")]
    Template(String),

    /// The symbol provider failed
    #[error(transparent)]
    Symbols(#[from] SymbolError),
}

fn missing_contract_message(target: &str, reference: Option<&str>) -> String {
    match reference {
        Some(reference) => format!("Contract '{}' of {} could not be resolved", reference, target),
        None => format!("The factory marker on {} does not name a contract", target),
    }
}

impl GenerationError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            GenerationError::MissingContract { .. } => 10,
            GenerationError::GenericArgumentUnresolved { .. } => 11,
            GenerationError::ContractMismatch { .. } | GenerationError::EmptyContract { .. } => 12,
            GenerationError::ConstructorSelection { .. } => 13,
            GenerationError::Io(_) => 14,
            GenerationError::UpstreamCompilation { .. } => 15,
            GenerationError::Template(_) => 16,
            GenerationError::Symbols(SymbolError::IoError(_)) => 14,
            GenerationError::Symbols(_) => 17,
        }
    }
}

impl From<handlebars::RenderError> for GenerationError {
    fn from(err: handlebars::RenderError) -> Self {
        GenerationError::Template(err.to_string())
    }
}

impl From<handlebars::TemplateError> for GenerationError {
    fn from(err: handlebars::TemplateError) -> Self {
        GenerationError::Template(err.to_string())
    }
}

/// Result type for generation operations
pub type Result<T> = std::result::Result<T, GenerationError>;
