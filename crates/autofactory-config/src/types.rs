//! Core configuration types

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Generator configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Substrings selecting which constructor annotations are forwarded
    pub attribute_import_list: Vec<String>,
    /// Copy contract method documentation onto generated methods
    pub write_xml_doc: bool,
    /// Wait for Enter before exiting after a fatal error
    pub pause_on_error: bool,
    /// Default template file; the built-in template when unset
    pub template_path: Option<PathBuf>,
    /// Directory searched for per-contract override templates
    pub template_dir: Option<PathBuf>,
    /// Incremental state file, relative to the workspace root
    pub state_file: PathBuf,
    /// Extension of generated files
    pub output_extension: String,
    /// Accepted marker annotation spellings
    pub marker_names: Vec<String>,
    /// Generator identity written into generated files
    pub generator_name: String,
    pub generator_version: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            attribute_import_list: Vec::new(),
            write_xml_doc: false,
            pause_on_error: false,
            template_path: None,
            template_dir: None,
            state_file: PathBuf::from(".autofactory").join("state.json"),
            output_extension: "cs".to_string(),
            marker_names: vec!["GenerateFactory".to_string(), "GenerateFactoryAttribute".to_string()],
            generator_name: "AutoFactory".to_string(),
            generator_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Checks the configuration for values the generator cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.marker_names.iter().all(|name| name.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "At least one marker name is required".to_string(),
            ));
        }
        if self.generator_name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "Generator name must not be empty".to_string(),
            ));
        }
        let extension = &self.output_extension;
        if extension.split('.').any(str::is_empty) || extension.contains(['/', '\\']) {
            return Err(ConfigError::Validation(format!(
                "Invalid output extension '{}': expected a bare extension such as 'cs' or 'g.cs'",
                extension
            )));
        }
        Ok(())
    }

    /// Returns a copy with relative paths resolved against `workspace`
    pub fn resolved(&self, workspace: &Path) -> Self {
        let resolve = |path: &Path| {
            if path.is_relative() {
                workspace.join(path)
            } else {
                path.to_path_buf()
            }
        };
        Self {
            template_path: self.template_path.as_deref().map(resolve),
            template_dir: self.template_dir.as_deref().map(resolve),
            state_file: resolve(&self.state_file),
            ..self.clone()
        }
    }
}

/// Loading, saving, and validating a configuration
pub trait ConfigStore {
    /// Load configuration
    fn load_config(&self) -> Result<GeneratorConfig>;
    /// Save configuration
    fn save_config(&self, config: &GeneratorConfig) -> Result<()>;
    /// Validate configuration
    fn validate_config(&self, config: &GeneratorConfig) -> Result<()> {
        config.validate()
    }
}
