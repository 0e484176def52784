//! Per-contract model transforms
//!
//! A transform rewrites the model of every factory implementing a given
//! contract before it is rendered.

use std::{collections::HashMap, fmt, sync::Arc};

use crate::models::GeneratedModel;

/// Rewrites a generated model before rendering
pub trait ModelTransform: Send + Sync {
    /// Returns the model to render
    fn transform(&self, model: GeneratedModel) -> GeneratedModel;
}

impl<F> ModelTransform for F
where
    F: Fn(GeneratedModel) -> GeneratedModel + Send + Sync,
{
    fn transform(&self, model: GeneratedModel) -> GeneratedModel {
        self(model)
    }
}

/// Transforms keyed by qualified contract name
#[derive(Clone, Default)]
pub struct TransformRegistry {
    transforms: HashMap<String, Arc<dyn ModelTransform>>,
}

impl TransformRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the transform for a contract, replacing any previous one
    pub fn register(&mut self, contract_name: impl Into<String>, transform: Arc<dyn ModelTransform>) {
        self.transforms.insert(contract_name.into(), transform);
    }

    /// Whether a transform exists for the contract
    pub fn contains(&self, contract_name: &str) -> bool {
        self.transforms.contains_key(contract_name)
    }

    /// Applies the contract's transform, if any
    pub fn apply(&self, model: GeneratedModel) -> GeneratedModel {
        match self.transforms.get(&model.contract_name) {
            Some(transform) => transform.transform(model),
            None => model,
        }
    }
}

impl fmt::Debug for TransformRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut contracts: Vec<&String> = self.transforms.keys().collect();
        contracts.sort();
        f.debug_struct("TransformRegistry")
            .field("contracts", &contracts)
            .finish()
    }
}
