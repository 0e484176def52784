//! Handlebars rendering of generated models
//!
//! The default template is compiled into the binary and may be replaced by a
//! file. Per-contract overrides and transforms take precedence for factories
//! implementing their contract.

use std::{collections::HashSet, fs, path::Path};

use handlebars::Handlebars;
use tracing::debug;

use crate::{
    error::Result,
    models::GeneratedModel,
    templates::{resolver::TemplateResolver, transform::TransformRegistry},
};

/// Built-in factory template
pub const DEFAULT_TEMPLATE: &str = include_str!("factory.hbs");

const DEFAULT_TEMPLATE_NAME: &str = "factory";

/// Renders [`GeneratedModel`]s to source text
#[derive(Debug)]
pub struct FactoryRenderer {
    registry: Handlebars<'static>,
    overrides: HashSet<String>,
    transforms: TransformRegistry,
}

impl FactoryRenderer {
    /// Creates a renderer using the built-in template
    pub fn new() -> Result<Self> {
        Self::with_template(DEFAULT_TEMPLATE)
    }

    /// Creates a renderer with a custom default template
    pub fn with_template(template: &str) -> Result<Self> {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(handlebars::no_escape);
        registry.register_template_string(DEFAULT_TEMPLATE_NAME, template)?;
        Ok(Self {
            registry,
            overrides: HashSet::new(),
            transforms: TransformRegistry::new(),
        })
    }

    /// Creates a renderer with the default template read from `path`
    pub fn from_file(path: &Path) -> Result<Self> {
        let template = fs::read_to_string(path)?;
        debug!(path = %path.display(), "Loaded default template");
        Self::with_template(&template)
    }

    /// Registers the override templates found by `resolver`
    pub fn load_overrides(&mut self, resolver: &TemplateResolver) -> Result<usize> {
        let overrides = resolver.load_overrides()?;
        for (contract, template) in &overrides {
            self.register_override(contract, template)?;
        }
        Ok(overrides.len())
    }

    /// Registers an override template for one contract
    pub fn register_override(&mut self, contract_name: &str, template: &str) -> Result<()> {
        self.registry
            .register_template_string(&override_name(contract_name), template)?;
        self.overrides.insert(contract_name.to_string());
        Ok(())
    }

    /// Replaces the transform registry
    pub fn set_transforms(&mut self, transforms: TransformRegistry) {
        self.transforms = transforms;
    }

    /// Name of the template used for a contract
    pub fn template_for(&self, contract_name: &str) -> String {
        if self.overrides.contains(contract_name) {
            override_name(contract_name)
        } else {
            DEFAULT_TEMPLATE_NAME.to_string()
        }
    }

    /// Applies the contract's transform and renders the model
    pub fn render(&self, model: &GeneratedModel) -> Result<String> {
        let model = self.transforms.apply(model.clone());
        let template = self.template_for(&model.contract_name);
        Ok(self.registry.render(&template, &model)?)
    }
}

fn override_name(contract_name: &str) -> String {
    format!("override:{}", contract_name)
}
