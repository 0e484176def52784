// Display version information

use super::Command;
use crate::error::CliResult;
use crate::output::OutputStyle;

/// Display version information
pub struct VersionCommand;

impl VersionCommand {
    pub fn new() -> Self {
        Self
    }

    /// Get version information
    fn get_version_info() -> String {
        let options = autofactory_generation::BuildOptions::default();
        format!(
            "AutoFactory v{}\n\nBuild Information:\n  Profile: {}\n  Generated-code marker: {} {}",
            env!("CARGO_PKG_VERSION"),
            if cfg!(debug_assertions) { "debug" } else { "release" },
            options.generator_name,
            options.generator_version,
        )
    }
}

impl Default for VersionCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Command for VersionCommand {
    async fn execute(&self) -> CliResult<()> {
        let style = OutputStyle::default();
        println!("{}", style.header(&Self::get_version_info()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_info_mentions_marker() {
        let info = VersionCommand::get_version_info();
        assert!(info.starts_with(&format!("AutoFactory v{}", env!("CARGO_PKG_VERSION"))));
        assert!(info.contains("Generated-code marker: AutoFactory"));
    }
}
