//! Configuration manager implementation

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use tracing::debug;

use crate::{
    error::{ConfigError, Result},
    types::{ConfigStore, GeneratorConfig},
};

/// Name of the workspace configuration file
pub const CONFIG_FILE_NAME: &str = "autofactory.toml";

/// Prefix of environment overrides (`AUTOFACTORY_WRITE_XML_DOC=true`)
pub const ENV_PREFIX: &str = "AUTOFACTORY";

/// Configuration manager
pub struct ConfigManager {
    /// Workspace configuration file path
    config_path: PathBuf,
    /// Per-user configuration file, lowest priority
    user_config_path: Option<PathBuf>,
    /// Environment prefix
    env_prefix: String,
}

impl ConfigManager {
    /// Manager for the `autofactory.toml` of a workspace
    pub fn new(workspace: &Path) -> Self {
        Self {
            config_path: workspace.join(CONFIG_FILE_NAME),
            user_config_path: Self::user_config_path(),
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    /// Create with custom config path and no user-level layer
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            config_path: path,
            user_config_path: None,
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    /// Use a different environment prefix
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Workspace configuration file path
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Get user config path
    fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("autofactory").join("config.toml"))
    }
}

impl ConfigStore for ConfigManager {
    fn load_config(&self) -> Result<GeneratorConfig> {
        let mut builder = Config::builder();
        if let Some(user) = &self.user_config_path {
            builder = builder.add_source(File::from(user.clone()).required(false));
        }
        let builder = builder
            .add_source(File::from(self.config_path.clone()).required(false))
            .add_source(
                Environment::with_prefix(&self.env_prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("attribute_import_list")
                    .with_list_parse_key("marker_names"),
            );

        let config: GeneratorConfig = builder.build()?.try_deserialize()?;
        self.validate_config(&config)?;
        debug!(path = %self.config_path.display(), "Loaded configuration");
        Ok(config)
    }

    fn save_config(&self, config: &GeneratorConfig) -> Result<()> {
        self.validate_config(config)?;
        let toml = toml::to_string(config)?;
        let parent = self.config_path.parent().ok_or_else(|| {
            ConfigError::NotFound(format!("No parent directory for {}", self.config_path.display()))
        })?;
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.config_path, toml)?;
        Ok(())
    }
}
