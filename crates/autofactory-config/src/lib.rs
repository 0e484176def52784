//! AutoFactory configuration
//!
//! Loads [`GeneratorConfig`] from built-in defaults, the user configuration
//! directory, the workspace `autofactory.toml`, and `AUTOFACTORY_`
//! environment variables, in increasing priority.

pub mod error;
pub mod manager;
pub mod types;

pub use error::{ConfigError, Result};
pub use manager::{ConfigManager, CONFIG_FILE_NAME, ENV_PREFIX};
pub use types::{ConfigStore, GeneratorConfig};
