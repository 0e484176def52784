//! Persisted content digests of target source files
//!
//! The state file maps `module -> { source-relative path -> hex sha256 }`.
//! A fresh store is built from every successful run, so entries of modules
//! and files that are gone drop out on their own.

use std::{
    collections::BTreeMap,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tokio::fs;
use tracing::{debug, warn};

use crate::error::Result;

/// Hex sha256 of `content`
pub fn digest(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("{:x}", hasher.finalize())
}

/// Key under which a source path is stored (forward slashes)
pub fn source_key(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Digests of target sources per module
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HashStore {
    modules: BTreeMap<String, BTreeMap<String, String>>,
}

impl HashStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the store from `path`
    ///
    /// A missing file yields an empty store. An unreadable one is logged and
    /// discarded, so the next run regenerates everything and rewrites it.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path).await {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "No incremental state yet");
                return Ok(Self::new());
            }
            Err(err) => return Err(err.into()),
        };

        match serde_json::from_str(&content) {
            Ok(store) => Ok(store),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "Discarding unreadable incremental state");
                Ok(Self::new())
            }
        }
    }

    /// Writes the store to `path`, creating parent directories
    pub async fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).await?;
        debug!(path = %path.display(), modules = self.modules.len(), "Saved incremental state");
        Ok(())
    }

    /// Stored digest of a source
    pub fn get(&self, module: &str, source: &str) -> Option<&str> {
        self.modules.get(module)?.get(source).map(String::as_str)
    }

    /// Records the digest of a source
    pub fn record(&mut self, module: impl Into<String>, source: impl Into<String>, digest: impl Into<String>) {
        self.modules
            .entry(module.into())
            .or_default()
            .insert(source.into(), digest.into());
    }

    /// Sources recorded for a module
    pub fn sources(&self, module: &str) -> Vec<&str> {
        self.modules
            .get(module)
            .map(|sources| sources.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Modules with at least one recorded source
    pub fn modules(&self) -> Vec<&str> {
        self.modules.keys().map(String::as_str).collect()
    }

    /// Total number of recorded sources
    pub fn len(&self) -> usize {
        self.modules.values().map(BTreeMap::len).sum()
    }

    /// Whether nothing is recorded
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Default location of the state file inside a workspace
pub fn default_state_file(workspace: &Path) -> PathBuf {
    workspace.join(".autofactory").join("state.json")
}
