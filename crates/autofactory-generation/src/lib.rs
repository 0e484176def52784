#![warn(missing_docs)]

//! Factory generation for autofactory
//!
//! Finds marker-annotated targets, resolves the contract each factory must
//! implement, pairs contract methods with constructors, splits constructor
//! parameters into injected and exposed ones, and renders the resulting
//! model through handlebars templates.

pub mod constructor_matcher;
pub mod contract_resolver;
pub mod error;
pub mod generator;
pub mod model_builder;
pub mod models;
pub mod naming;
pub mod parameter_classifier;
pub mod scanner;
pub mod templates;

#[cfg(test)]
mod test_support;

// Re-export public API
pub use constructor_matcher::{select_constructor, ConstructorMatcher, MatchedMethod};
pub use contract_resolver::{ContractResolver, ResolvedContract};
pub use error::{GenerationError, Result};
pub use generator::{FactoryGenerator, GeneratedFile, DEFAULT_OUTPUT_EXTENSION};
pub use model_builder::{
    BuildOptions, ModelBuilder, DEBUGGER_NON_USER_CODE_ATTRIBUTE, GENERATED_CODE_ATTRIBUTE,
};
pub use models::{
    AttributeModel, ConstructorArgument, ConstructorModel, FieldModel, GeneratedModel,
    GenericParameter, MethodModel, ParameterModel,
};
pub use naming::{factory_name, is_generated_file_name, output_file_name, output_path};
pub use parameter_classifier::{classify, is_value_type, ParameterClassification};
pub use scanner::{Target, TargetScanner, DEFAULT_MARKER_NAMES};
pub use templates::{
    FactoryRenderer, ModelTransform, TemplateResolver, TransformRegistry, DEFAULT_TEMPLATE,
};
