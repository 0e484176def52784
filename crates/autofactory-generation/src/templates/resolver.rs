//! Override template discovery
//!
//! A file named `<ContractFullName>.render` in the template directory replaces
//! the default template for factories implementing that contract.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::error::Result;

/// Extension of per-contract override templates
pub const OVERRIDE_EXTENSION: &str = "render";

/// Locates per-contract override templates
#[derive(Debug, Clone, Default)]
pub struct TemplateResolver {
    template_dir: Option<PathBuf>,
}

impl TemplateResolver {
    /// Creates a resolver searching `template_dir`
    pub fn new(template_dir: Option<PathBuf>) -> Self {
        Self { template_dir }
    }

    /// Path the override for a contract would have
    pub fn override_path(&self, contract_name: &str) -> Option<PathBuf> {
        self.template_dir
            .as_ref()
            .map(|dir| dir.join(format!("{}.{}", contract_name, OVERRIDE_EXTENSION)))
    }

    /// Loads every override template, keyed by contract name
    ///
    /// A missing template directory yields no overrides.
    pub fn load_overrides(&self) -> Result<BTreeMap<String, String>> {
        let mut overrides = BTreeMap::new();
        let Some(dir) = self.template_dir.as_deref().filter(|dir| dir.is_dir()) else {
            return Ok(overrides);
        };

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if let Some(contract) = contract_name_of(&path) {
                let content = fs::read_to_string(&path)?;
                debug!(contract = %contract, path = %path.display(), "Loaded override template");
                overrides.insert(contract, content);
            }
        }
        Ok(overrides)
    }
}

fn contract_name_of(path: &Path) -> Option<String> {
    if !path.is_file() || path.extension()?.to_str()? != OVERRIDE_EXTENSION {
        return None;
    }
    path.file_stem()?.to_str().map(str::to_string)
}
