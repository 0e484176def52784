//! Catalog of existing generator output
//!
//! The catalog is rebuilt from the documents on disk every run: any document
//! with the output extension that carries this generator's `GeneratedCode`
//! marker counts as previously generated.

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use autofactory_symbols::SymbolProvider;
use regex::Regex;
use tracing::debug;

use crate::error::Result;

/// Finds documents produced by a given generator
#[derive(Debug, Clone)]
pub struct GeneratedCatalog {
    marker: Regex,
    extension: String,
}

impl GeneratedCatalog {
    /// Creates a catalog for the generator named `generator_name`
    pub fn new(generator_name: &str, extension: impl Into<String>) -> Result<Self> {
        let pattern = format!(
            r#"\[\s*(?:global::)?(?:System\.CodeDom\.Compiler\.)?GeneratedCode(?:Attribute)?\s*\(\s*"{}""#,
            regex::escape(generator_name)
        );
        Ok(Self {
            marker: Regex::new(&pattern)?,
            extension: extension.into(),
        })
    }

    /// Whether `content` carries the generator marker
    pub fn is_generated(&self, content: &str) -> bool {
        self.marker.is_match(content)
    }

    /// Whether `path` ends with the output extension, which may span several dots
    pub fn has_output_extension(&self, path: &Path) -> bool {
        let suffix = format!(".{}", self.extension);
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.len() > suffix.len() && name.ends_with(&suffix))
    }

    /// Generated documents currently present in a module
    pub async fn scan(&self, provider: &dyn SymbolProvider, module: &str) -> Result<BTreeSet<PathBuf>> {
        let mut cataloged = BTreeSet::new();
        for path in provider.documents(module).await? {
            if !self.has_output_extension(&path) {
                continue;
            }
            let content = provider.read_source(&path).await?;
            if self.is_generated(&String::from_utf8_lossy(&content)) {
                cataloged.insert(path);
            }
        }
        debug!(module, count = cataloged.len(), "Cataloged generated documents");
        Ok(cataloged)
    }
}
