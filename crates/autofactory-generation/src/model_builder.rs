//! Assembles the [`GeneratedModel`] for one target

use std::collections::HashMap;

use autofactory_symbols::{AttributeData, MethodSymbol, ParameterSymbol, TypeParameterSymbol, TypeRef};

use crate::{
    constructor_matcher::MatchedMethod,
    contract_resolver::ResolvedContract,
    models::{
        AttributeModel, ConstructorModel, FieldModel, GeneratedModel, GenericParameter,
        MethodModel, ParameterModel,
    },
    naming::factory_name,
    parameter_classifier::{is_value_type, ParameterClassification},
    scanner::Target,
};

/// Name of the generated-code marker annotation
pub const GENERATED_CODE_ATTRIBUTE: &str = "System.CodeDom.Compiler.GeneratedCode";

/// Name of the debugger marker annotation
pub const DEBUGGER_NON_USER_CODE_ATTRIBUTE: &str = "System.Diagnostics.DebuggerNonUserCode";

/// Options controlling model construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Substrings selecting which constructor annotations are forwarded
    pub attribute_import_list: Vec<String>,
    /// Forward documentation of contract methods
    pub write_doc: bool,
    /// Generator name written into the generated-code marker
    pub generator_name: String,
    /// Generator version written into the generated-code marker
    pub generator_version: String,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            attribute_import_list: Vec::new(),
            write_doc: false,
            generator_name: "AutoFactory".to_string(),
            generator_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Builds generated models from matched contracts
#[derive(Debug, Clone, Default)]
pub struct ModelBuilder {
    options: BuildOptions,
}

impl ModelBuilder {
    /// Creates a builder with the given options
    pub fn new(options: BuildOptions) -> Self {
        Self { options }
    }

    /// Options in use
    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// The two annotations appended to every generated class
    pub fn marker_attributes(&self) -> Vec<AttributeData> {
        vec![
            AttributeData::with_arguments(
                GENERATED_CODE_ATTRIBUTE,
                vec![
                    format!("\"{}\"", self.options.generator_name),
                    format!("\"{}\"", self.options.generator_version),
                ],
            ),
            AttributeData::new(DEBUGGER_NON_USER_CODE_ATTRIBUTE),
        ]
    }

    /// Builds the model of the factory for `target`
    ///
    /// `matched` and `classification.arguments` are parallel, one entry per
    /// creation method.
    pub fn build(
        &self,
        target: &Target,
        contract: &ResolvedContract,
        matched: &[MatchedMethod],
        classification: &ParameterClassification,
    ) -> GeneratedModel {
        let substitutions = contract.substitutions();

        let fields: Vec<FieldModel> = classification.injected.iter().map(field).collect();
        let constructor = if fields.is_empty() {
            None
        } else {
            Some(ConstructorModel {
                parameters: fields.clone(),
            })
        };

        let target_type = target.symbol.self_reference().to_string();
        let methods = matched
            .iter()
            .zip(&classification.arguments)
            .map(|(m, arguments)| MethodModel {
                name: m.method.name.clone(),
                return_type: m.method.return_type.to_string(),
                doc: if self.options.write_doc {
                    m.method.doc.clone()
                } else {
                    Vec::new()
                },
                generic_parameters: method_generics(&m.method),
                parameters: m.method.parameters.iter().map(parameter).collect(),
                arguments: arguments.clone(),
                target_type: target_type.clone(),
            })
            .collect();

        GeneratedModel {
            namespace: target.symbol.namespace.clone(),
            imports: self.imports(target),
            class_name: factory_name(target),
            generic_parameters: contract
                .open_parameters()
                .into_iter()
                .map(|(name, parameter)| generic_parameter(name, parameter, &substitutions))
                .collect(),
            contract: contract.reference().to_string(),
            contract_name: contract.qualified_name(),
            target_name: target.qualified_name(),
            attributes: self.class_attributes(target),
            fields,
            constructor,
            methods,
        }
    }

    /// Allow-listed constructor annotations of the target, then the markers
    fn class_attributes(&self, target: &Target) -> Vec<AttributeModel> {
        let mut attributes: Vec<AttributeData> = Vec::new();
        let forwarded = target
            .symbol
            .constructors
            .iter()
            .flat_map(|c| c.attributes.iter())
            .filter(|a| {
                self.options
                    .attribute_import_list
                    .iter()
                    .any(|entry| !entry.is_empty() && a.name.contains(entry.as_str()))
            });
        for attribute in forwarded {
            if !attributes.contains(attribute) {
                attributes.push(attribute.clone());
            }
        }
        attributes.extend(self.marker_attributes());
        attributes.iter().map(AttributeModel::from).collect()
    }

    fn imports(&self, target: &Target) -> Vec<String> {
        let mut imports: Vec<String> = Vec::new();
        for import in &target.symbol.imports {
            let import = import.trim();
            if import.is_empty() || import == target.symbol.namespace {
                continue;
            }
            if !imports.iter().any(|i| i == import) {
                imports.push(import.to_string());
            }
        }
        imports
    }
}

fn field(parameter: &ParameterSymbol) -> FieldModel {
    FieldModel {
        name: parameter.name.clone(),
        type_name: parameter.ty.to_string(),
        value_type: is_value_type(parameter),
    }
}

fn parameter(parameter: &ParameterSymbol) -> ParameterModel {
    let attributes: Vec<String> = parameter.attributes.iter().map(AttributeData::to_source).collect();
    let prefix = if attributes.is_empty() {
        String::new()
    } else {
        format!("[{}] ", attributes.join(", "))
    };
    ParameterModel {
        name: parameter.name.clone(),
        type_name: parameter.ty.to_string(),
        declaration: format!("{}{} {}", prefix, parameter.ty, parameter.name),
        attributes,
        value_type: is_value_type(parameter),
    }
}

fn generic_parameter(
    name: String,
    parameter: &TypeParameterSymbol,
    substitutions: &HashMap<String, TypeRef>,
) -> GenericParameter {
    let mut substituted = parameter.clone();
    substituted.constraint_types = parameter
        .constraint_types
        .iter()
        .map(|constraint| constraint.substitute(substitutions))
        .collect();
    GenericParameter {
        name,
        constraints: substituted.constraints(),
    }
}

fn method_generics(method: &MethodSymbol) -> Vec<GenericParameter> {
    method
        .type_parameters
        .iter()
        .map(|p| GenericParameter {
            name: p.name.clone(),
            constraints: p.constraints(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::ConstructorArgument,
        test_support::{class, interface, method, parameter as param},
    };
    use autofactory_symbols::ConstructorSymbol;

    fn widget() -> Target {
        let mut symbol = class("Acme.Widgets", "Widget");
        symbol.imports = vec![
            "System".to_string(),
            "Acme.Widgets".to_string(),
            "Acme.Logging".to_string(),
        ];
        let mut ctor = ConstructorSymbol::public(vec![param("logger", "ILogger"), param("name", "string")]);
        ctor.attributes = vec![AttributeData::new("Inject"), AttributeData::new("Obsolete")];
        symbol.constructors = vec![ctor];
        Target {
            module: "app".to_string(),
            symbol,
            marker: AttributeData::with_arguments("GenerateFactory", vec!["IWidgetFactory".to_string()]),
        }
    }

    fn widget_model(options: BuildOptions) -> GeneratedModel {
        let target = widget();
        let contract = ResolvedContract::open(interface("Acme.Widgets", "IWidgetFactory"));
        let mut create = method("Create", "IWidget", vec![param("name", "string")]);
        create.doc = vec!["Creates a widget.".to_string()];
        let matched = vec![MatchedMethod {
            method: create,
            constructor: target.symbol.constructors[0].clone(),
        }];
        let classification = ParameterClassification {
            injected: vec![param("logger", "ILogger")],
            arguments: vec![vec![
                ConstructorArgument::Injected("logger".to_string()),
                ConstructorArgument::Passed("name".to_string()),
            ]],
        };
        ModelBuilder::new(options).build(&target, &contract, &matched, &classification)
    }

    #[test]
    fn test_widget_model_shape() {
        let model = widget_model(BuildOptions::default());

        assert_eq!(model.class_name, "WidgetFactory");
        assert_eq!(model.namespace, "Acme.Widgets");
        assert_eq!(model.contract, "Acme.Widgets.IWidgetFactory");
        assert_eq!(model.fields.len(), 1);
        assert_eq!(model.fields[0].name, "logger");
        assert_eq!(model.constructor.as_ref().map(|c| c.parameters.len()), Some(1));
        assert_eq!(model.methods.len(), 1);
        assert_eq!(model.methods[0].target_type, "Acme.Widgets.Widget");
        assert_eq!(model.methods[0].parameters[0].declaration, "string name");
        assert!(model.methods[0].parameters[0].value_type);
        assert!(model.methods[0].doc.is_empty());
    }

    #[test]
    fn test_imports_drop_own_namespace() {
        let model = widget_model(BuildOptions::default());
        assert_eq!(model.imports, vec!["System", "Acme.Logging"]);
    }

    #[test]
    fn test_markers_always_appended_last() {
        let model = widget_model(BuildOptions::default());
        let names: Vec<_> = model.attributes.iter().map(|a| a.simple_name.as_str()).collect();
        assert_eq!(names, vec!["GeneratedCode", "DebuggerNonUserCode"]);
        assert!(model.attributes[0].source.contains("\"AutoFactory\""));
    }

    #[test]
    fn test_allow_listed_constructor_attributes_are_forwarded() {
        let options = BuildOptions {
            attribute_import_list: vec!["Inj".to_string()],
            ..BuildOptions::default()
        };
        let model = widget_model(options);
        let names: Vec<_> = model.attributes.iter().map(|a| a.simple_name.as_str()).collect();
        assert_eq!(names, vec!["Inject", "GeneratedCode", "DebuggerNonUserCode"]);
        assert!(model.has_attribute("Inject"));
        assert!(!model.has_attribute("Obsolete"));
    }

    #[test]
    fn test_doc_forwarded_when_enabled() {
        let options = BuildOptions {
            write_doc: true,
            ..BuildOptions::default()
        };
        let model = widget_model(options);
        assert_eq!(model.methods[0].doc, vec!["Creates a widget."]);
    }

    #[test]
    fn test_no_injected_parameters_means_no_constructor() {
        let target = widget();
        let contract = ResolvedContract::open(interface("Acme.Widgets", "IWidgetFactory"));
        let classification = ParameterClassification {
            injected: Vec::new(),
            arguments: Vec::new(),
        };
        let model = ModelBuilder::default().build(&target, &contract, &[], &classification);
        assert!(model.fields.is_empty());
        assert!(model.constructor.is_none());
    }

    #[test]
    fn test_open_parameter_keeps_substituted_constraints() {
        let mut factory = interface("Acme", "IFactory");
        let t = TypeParameterSymbol::new("T");
        let mut u = TypeParameterSymbol::new("U");
        u.reference_type = true;
        u.constraint_types = vec![TypeRef::parse("IComparable<T>").unwrap()];
        factory.type_parameters = vec![t, u];

        let mut contract = ResolvedContract::open(factory);
        contract.bindings[0] = Some(TypeRef::simple("Acme.Foo"));

        let classification = ParameterClassification {
            injected: Vec::new(),
            arguments: Vec::new(),
        };
        let model = ModelBuilder::default().build(&widget(), &contract, &[], &classification);

        assert_eq!(model.generic_parameters.len(), 1);
        assert_eq!(model.generic_parameters[0].name, "U");
        assert_eq!(
            model.generic_parameters[0].constraints,
            vec!["class", "IComparable<Acme.Foo>"]
        );
        assert_eq!(model.generic_class_name(), "WidgetFactory<U>");
        assert_eq!(model.contract, "Acme.IFactory<Acme.Foo, U>");
    }
}
