//! Renderer-agnostic model of a generated factory
//!
//! Everything here serializes to the data handed to templates. Annotations are
//! plain (name, arguments) pairs with their rendered source text; templates
//! test for them by name rather than through synthesized types.

use autofactory_symbols::AttributeData;
use serde::{ser::SerializeStruct, Serialize, Serializer};

/// One generated factory class
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedModel {
    /// Namespace of the target, reused for the factory
    pub namespace: String,
    /// Imports of the target's file, minus the target's own namespace
    pub imports: Vec<String>,
    /// Factory class name without type parameters (`WidgetFactory`)
    pub class_name: String,
    /// Type parameters of the factory (open contract positions)
    pub generic_parameters: Vec<GenericParameter>,
    /// Contract reference the factory implements
    pub contract: String,
    /// Qualified name of the contract definition
    pub contract_name: String,
    /// Qualified name of the target
    pub target_name: String,
    /// Class-level annotations, markers last
    pub attributes: Vec<AttributeModel>,
    /// One field per injected parameter
    pub fields: Vec<FieldModel>,
    /// Injecting constructor; absent when nothing is injected
    pub constructor: Option<ConstructorModel>,
    /// One creation method per contract method
    pub methods: Vec<MethodModel>,
}

impl GeneratedModel {
    /// Class name with type parameters (`WidgetFactory<U>`)
    pub fn generic_class_name(&self) -> String {
        if self.generic_parameters.is_empty() {
            self.class_name.clone()
        } else {
            let names: Vec<&str> = self.generic_parameters.iter().map(|p| p.name.as_str()).collect();
            format!("{}<{}>", self.class_name, names.join(", "))
        }
    }

    /// Whether an annotation with this simple name is present on the class
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a.simple_name == name)
    }
}

/// A type parameter with its constraint clauses
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenericParameter {
    /// Parameter name
    pub name: String,
    /// Constraint texts (`class`, `IDisposable`, `new()`); empty when unconstrained
    pub constraints: Vec<String>,
}

/// An annotation ready for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeModel {
    /// Name as written
    pub name: String,
    /// Name without namespace or `Attribute` suffix
    pub simple_name: String,
    /// Argument texts in order
    pub arguments: Vec<String>,
    /// Source text without brackets (`GeneratedCode("AutoFactory", "0.1.0")`)
    pub source: String,
}

impl From<&AttributeData> for AttributeModel {
    fn from(attribute: &AttributeData) -> Self {
        Self {
            name: attribute.name.clone(),
            simple_name: attribute.simple_name().to_string(),
            arguments: attribute.arguments.clone(),
            source: attribute.to_source(),
        }
    }
}

/// A field holding an injected dependency
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldModel {
    /// Field name, same as the constructor parameter
    pub name: String,
    /// Declared type text
    pub type_name: String,
    /// Value type or string
    pub value_type: bool,
}

/// The injecting constructor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstructorModel {
    /// Parameters in injected order, one per field
    pub parameters: Vec<FieldModel>,
}

/// A creation method parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterModel {
    /// Parameter name
    pub name: String,
    /// Declared type text
    pub type_name: String,
    /// Annotation source texts of the contract parameter
    pub attributes: Vec<String>,
    /// Value type or string
    pub value_type: bool,
    /// Full declaration (`[FromBody] string name`)
    pub declaration: String,
}

/// A creation method of the factory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodModel {
    /// Contract method name
    pub name: String,
    /// Return type with contract generics substituted
    pub return_type: String,
    /// Documentation lines forwarded from the contract method
    pub doc: Vec<String>,
    /// Method-level type parameters
    pub generic_parameters: Vec<GenericParameter>,
    /// Exposed parameters in contract order
    pub parameters: Vec<ParameterModel>,
    /// Arguments of the target constructor call, in constructor order
    pub arguments: Vec<ConstructorArgument>,
    /// Instantiated target type (`Acme.Widget`, `Acme.Widget<U>`)
    pub target_type: String,
}

/// How a constructor parameter of the target is supplied
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConstructorArgument {
    /// From a factory field
    Injected(String),
    /// The factory itself
    SelfReference,
    /// From the creation method's own parameter
    Passed(String),
}

impl ConstructorArgument {
    /// Expression passed to the constructor
    pub fn expression(&self) -> String {
        match self {
            ConstructorArgument::Injected(name) => format!("this.{}", name),
            ConstructorArgument::SelfReference => "this".to_string(),
            ConstructorArgument::Passed(name) => name.clone(),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ConstructorArgument::Injected(_) => "injected",
            ConstructorArgument::SelfReference => "self",
            ConstructorArgument::Passed(_) => "passed",
        }
    }

    fn name(&self) -> &str {
        match self {
            ConstructorArgument::Injected(name) | ConstructorArgument::Passed(name) => name,
            ConstructorArgument::SelfReference => "this",
        }
    }
}

impl Serialize for ConstructorArgument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ConstructorArgument", 3)?;
        state.serialize_field("kind", self.kind())?;
        state.serialize_field("name", self.name())?;
        state.serialize_field("expression", &self.expression())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argument_expressions() {
        assert_eq!(ConstructorArgument::Injected("logger".into()).expression(), "this.logger");
        assert_eq!(ConstructorArgument::SelfReference.expression(), "this");
        assert_eq!(ConstructorArgument::Passed("name".into()).expression(), "name");
    }

    #[test]
    fn test_argument_serializes_with_kind() {
        let json = serde_json::to_value(ConstructorArgument::Injected("logger".into())).unwrap();
        assert_eq!(json["kind"], "injected");
        assert_eq!(json["expression"], "this.logger");
    }

    #[test]
    fn test_attribute_model_from_data() {
        let data = AttributeData::with_arguments(
            "System.CodeDom.Compiler.GeneratedCode",
            vec!["\"AutoFactory\"".into(), "\"0.1.0\"".into()],
        );
        let model = AttributeModel::from(&data);
        assert_eq!(model.simple_name, "GeneratedCode");
        assert_eq!(
            model.source,
            "System.CodeDom.Compiler.GeneratedCode(\"AutoFactory\", \"0.1.0\")"
        );
    }
}
