//! Rendering of generated models
//!
//! Provides the handlebars renderer, per-contract override templates, and
//! per-contract model transforms.

pub mod engine;
pub mod resolver;
pub mod transform;

// Re-export public API
pub use engine::{FactoryRenderer, DEFAULT_TEMPLATE};
pub use resolver::{TemplateResolver, OVERRIDE_EXTENSION};
pub use transform::{ModelTransform, TransformRegistry};
