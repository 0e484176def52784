//! Per-target generation pipeline
//!
//! resolve contract → collect creation methods → match constructors →
//! classify parameters → build model → render.

use std::path::PathBuf;

use autofactory_symbols::{ModuleInfo, SymbolProvider};
use tracing::debug;

use crate::{
    constructor_matcher::ConstructorMatcher,
    contract_resolver::ContractResolver,
    error::{GenerationError, Result},
    model_builder::{BuildOptions, ModelBuilder},
    models::GeneratedModel,
    naming,
    parameter_classifier::classify,
    scanner::{Target, TargetScanner},
    templates::FactoryRenderer,
};

/// Extension of generated files unless configured otherwise
pub const DEFAULT_OUTPUT_EXTENSION: &str = "cs";

/// Rendered output for one target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Qualified name of the target
    pub target: String,
    /// Absolute output path
    pub path: PathBuf,
    /// Rendered source text
    pub content: String,
}

/// Generates factories for targets
#[derive(Debug)]
pub struct FactoryGenerator {
    scanner: TargetScanner,
    builder: ModelBuilder,
    renderer: FactoryRenderer,
    output_extension: String,
}

impl FactoryGenerator {
    /// Creates a generator
    pub fn new(
        scanner: TargetScanner,
        options: BuildOptions,
        renderer: FactoryRenderer,
        output_extension: impl Into<String>,
    ) -> Self {
        Self {
            scanner,
            builder: ModelBuilder::new(options),
            renderer,
            output_extension: output_extension.into(),
        }
    }

    /// Creates a generator with default markers, options, and template
    pub fn with_defaults() -> Result<Self> {
        Ok(Self::new(
            TargetScanner::default(),
            BuildOptions::default(),
            FactoryRenderer::new()?,
            DEFAULT_OUTPUT_EXTENSION,
        ))
    }

    /// Target scanner in use
    pub fn scanner(&self) -> &TargetScanner {
        &self.scanner
    }

    /// Model construction options in use
    pub fn options(&self) -> &BuildOptions {
        self.builder.options()
    }

    /// Extension of generated files
    pub fn output_extension(&self) -> &str {
        &self.output_extension
    }

    /// Targets declared in a module
    pub fn scan(&self, provider: &dyn SymbolProvider, module: &ModuleInfo) -> Result<Vec<Target>> {
        let types = provider.declared_types(&module.id)?;
        Ok(self.scanner.scan(&module.id, &types))
    }

    /// Where the factory of `target` is written
    pub fn output_path(&self, module: &ModuleInfo, target: &Target) -> PathBuf {
        naming::output_path(&module.root, target, &self.output_extension)
    }

    /// Builds the model for a target without rendering it
    pub fn build_model(&self, provider: &dyn SymbolProvider, target: &Target) -> Result<GeneratedModel> {
        let resolver = ContractResolver::new(provider);
        let contract = resolver.resolve(target)?;
        let methods = resolver.creation_methods(&target.module, &contract);
        if methods.is_empty() {
            return Err(GenerationError::EmptyContract {
                target: target.qualified_name(),
                contract: contract.reference().to_string(),
            });
        }

        let matched = ConstructorMatcher::new(provider).match_methods(target, &contract, &methods)?;
        let classification = classify(&contract, &matched);
        Ok(self.builder.build(target, &contract, &matched, &classification))
    }

    /// Generates the factory source for a target
    pub fn generate(
        &self,
        provider: &dyn SymbolProvider,
        module: &ModuleInfo,
        target: &Target,
    ) -> Result<GeneratedFile> {
        let model = self.build_model(provider, target)?;
        let content = self.renderer.render(&model)?;
        let path = self.output_path(module, target);
        debug!(
            module = %module.id,
            target = %target.qualified_name(),
            contract = %model.contract,
            path = %path.display(),
            "Rendered factory"
        );
        Ok(GeneratedFile {
            target: target.qualified_name(),
            path,
            content,
        })
    }
}
