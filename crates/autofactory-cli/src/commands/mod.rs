// Command handlers for the autofactory CLI

pub mod generate;
pub mod version;

pub use generate::GenerateCommand;
pub use version::VersionCommand;

use crate::error::CliResult;

/// Trait for command handlers
#[async_trait::async_trait]
pub trait Command: Send + Sync {
    /// Execute the command
    async fn execute(&self) -> CliResult<()>;
}
