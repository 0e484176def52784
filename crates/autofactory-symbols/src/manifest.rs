//! Manifest-backed symbol provider
//!
//! A language front-end exports the compiled view of a workspace as a YAML or
//! JSON manifest: modules, their dependencies and diagnostics, and the types
//! each module declares. Documents themselves are ordinary files under each
//! module root.

use std::{
    collections::{HashMap, HashSet, VecDeque},
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::debug;
use walkdir::WalkDir;

use crate::{
    error::{Result, SymbolError},
    models::{ModuleInfo, TypeSymbol},
    provider::SymbolProvider,
    scope::candidate_names,
    snapshot::{apply_to_disk, AppliedChanges, WorkspaceSnapshot},
    type_ref::TypeRef,
};

/// Default manifest file names, probed in order
pub const MANIFEST_FILE_NAMES: [&str; 3] = [
    "autofactory.symbols.yaml",
    "autofactory.symbols.yml",
    "autofactory.symbols.json",
];

/// One module entry of a manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleManifest {
    /// Module identity, root, dependencies, and diagnostics
    #[serde(flatten)]
    pub info: ModuleInfo,
    /// Types declared in the module
    #[serde(default)]
    pub types: Vec<TypeSymbol>,
}

/// Root of a workspace manifest
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkspaceManifest {
    /// Modules in any order; dependencies are ordered later
    #[serde(default)]
    pub modules: Vec<ModuleManifest>,
}

impl WorkspaceManifest {
    /// Parses a manifest, choosing the format from the file extension
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(serde_json::from_str(content)?),
            _ => Ok(serde_yaml::from_str(content)?),
        }
    }
}

/// [`SymbolProvider`] over a [`WorkspaceManifest`] and the local filesystem
///
/// ```
/// use std::path::Path;
/// use autofactory_symbols::{ManifestProvider, SymbolProvider, WorkspaceManifest};
///
/// let manifest = WorkspaceManifest::parse(
///     "modules:\n  - id: app\n    root: does-not-exist\n",
///     Path::new("autofactory.symbols.yaml"),
/// )?;
/// let provider = ManifestProvider::new(manifest, Path::new("."))?;
/// assert_eq!(provider.modules()?.len(), 1);
/// # tokio_test::block_on(async {
/// assert!(provider.documents("app").await?.is_empty());
/// # Ok::<(), autofactory_symbols::SymbolError>(())
/// # })?;
/// # Ok::<(), autofactory_symbols::SymbolError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ManifestProvider {
    modules: Vec<ModuleInfo>,
    types: HashMap<String, Vec<TypeSymbol>>,
}

impl ManifestProvider {
    /// Builds a provider; relative module roots are resolved against `base_dir`
    pub fn new(manifest: WorkspaceManifest, base_dir: &Path) -> Result<Self> {
        let mut modules = Vec::with_capacity(manifest.modules.len());
        let mut types = HashMap::new();
        let mut seen = HashSet::new();

        for mut module in manifest.modules {
            if !seen.insert(module.info.id.clone()) {
                return Err(SymbolError::Manifest(format!(
                    "Duplicate module id: {}",
                    module.info.id
                )));
            }
            if module.info.root.is_relative() {
                module.info.root = base_dir.join(&module.info.root);
            }
            types.insert(module.info.id.clone(), module.types);
            modules.push(module.info);
        }

        for module in &modules {
            for dependency in &module.dependencies {
                if !seen.contains(dependency) {
                    return Err(SymbolError::Manifest(format!(
                        "Module {} depends on unknown module {}",
                        module.id, dependency
                    )));
                }
            }
        }

        Ok(Self { modules, types })
    }

    /// Loads a manifest file
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        let manifest = WorkspaceManifest::parse(&content, path)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        debug!(path = %path.display(), modules = manifest.modules.len(), "Loaded symbol manifest");
        Self::new(manifest, base_dir)
    }

    /// Finds the manifest inside a workspace directory
    pub fn discover(workspace: &Path) -> Result<PathBuf> {
        MANIFEST_FILE_NAMES
            .iter()
            .map(|name| workspace.join(name))
            .find(|candidate| candidate.is_file())
            .ok_or_else(|| {
                SymbolError::Manifest(format!(
                    "No symbol manifest found in {}",
                    workspace.display()
                ))
            })
    }

    fn module(&self, id: &str) -> Result<&ModuleInfo> {
        self.modules
            .iter()
            .find(|module| module.id == id)
            .ok_or_else(|| SymbolError::ModuleNotFound(id.to_string()))
    }

    /// The module itself followed by its transitive dependencies
    fn visible_modules<'a>(&'a self, id: &'a str) -> Vec<&'a str> {
        let mut visible = Vec::new();
        let mut queue = VecDeque::from([id]);
        while let Some(current) = queue.pop_front() {
            if visible.contains(&current) {
                continue;
            }
            visible.push(current);
            if let Some(module) = self.modules.iter().find(|m| m.id == current) {
                queue.extend(module.dependencies.iter().map(String::as_str));
            }
        }
        visible
    }

    fn resolve_in_scope(
        &self,
        module: &str,
        context: &TypeSymbol,
        reference: &TypeRef,
    ) -> Option<TypeSymbol> {
        candidate_names(reference, &context.namespace, &context.imports)
            .iter()
            .find_map(|candidate| self.resolve_type(module, candidate, reference.arity()))
    }
}

#[async_trait]
impl SymbolProvider for ManifestProvider {
    fn modules(&self) -> Result<Vec<ModuleInfo>> {
        Ok(self.modules.clone())
    }

    fn declared_types(&self, module: &str) -> Result<Vec<TypeSymbol>> {
        self.module(module)?;
        Ok(self.types.get(module).cloned().unwrap_or_default())
    }

    fn resolve_type(&self, module: &str, qualified_name: &str, arity: usize) -> Option<TypeSymbol> {
        let qualified_name = qualified_name.strip_prefix("global::").unwrap_or(qualified_name);
        self.visible_modules(module).into_iter().find_map(|visible| {
            self.types.get(visible).and_then(|types| {
                types
                    .iter()
                    .find(|ty| ty.arity() == arity && ty.qualified_name() == qualified_name)
                    .cloned()
            })
        })
    }

    fn implements(&self, module: &str, ty: &TypeSymbol, interface: &TypeSymbol) -> bool {
        let target = interface.metadata_name();
        let mut visited = HashSet::new();
        let mut queue: VecDeque<TypeSymbol> = VecDeque::from([ty.clone()]);

        while let Some(current) = queue.pop_front() {
            if !visited.insert(current.metadata_name()) {
                continue;
            }
            for reference in &current.interfaces {
                let Some(resolved) = self.resolve_in_scope(module, &current, reference) else {
                    continue;
                };
                if resolved.metadata_name() == target {
                    return true;
                }
                queue.push_back(resolved);
            }
        }

        false
    }

    async fn documents(&self, module: &str) -> Result<Vec<PathBuf>> {
        let root = self.module(module)?.root.clone();
        if !root.is_dir() {
            return Ok(Vec::new());
        }

        let mut documents = Vec::new();
        let walker = WalkDir::new(&root).sort_by_file_name().into_iter();
        for entry in walker.filter_entry(|entry| {
            entry.depth() == 0 || !entry.file_name().to_string_lossy().starts_with('.')
        }) {
            let entry = entry.map_err(|e| SymbolError::IoError(e.into()))?;
            if entry.file_type().is_file() {
                documents.push(entry.into_path());
            }
        }
        Ok(documents)
    }

    async fn read_source(&self, path: &Path) -> Result<Vec<u8>> {
        Ok(fs::read(path).await?)
    }

    async fn exists(&self, path: &Path) -> bool {
        fs::metadata(path).await.map(|m| m.is_file()).unwrap_or(false)
    }

    async fn apply_changes(&self, snapshot: &WorkspaceSnapshot) -> Result<AppliedChanges> {
        for (path, document) in snapshot.iter() {
            let root = &self.module(&document.module)?.root;
            if !path.starts_with(root) {
                return Err(SymbolError::DocumentOutsideModule {
                    module: document.module.clone(),
                    path: path.display().to_string(),
                });
            }
        }
        apply_to_disk(snapshot).await
    }
}
