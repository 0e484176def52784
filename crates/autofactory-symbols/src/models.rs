//! Symbol value types supplied by a [`SymbolProvider`](crate::SymbolProvider)

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::type_ref::TypeRef;

/// Stable identifier of a module (compilation unit)
pub type ModuleId = String;

/// A compilation unit of the workspace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleInfo {
    /// Stable identifier, used as the key of the incremental state
    pub id: ModuleId,
    /// Human-readable name
    #[serde(default)]
    pub name: String,
    /// Root directory; source paths are relative to it
    pub root: PathBuf,
    /// Identifiers of modules this module references
    #[serde(default)]
    pub dependencies: Vec<ModuleId>,
    /// Compilation errors reported for the module
    #[serde(default)]
    pub diagnostics: Vec<String>,
}

impl ModuleInfo {
    /// Whether the module compiles cleanly
    pub fn compiles(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Name for log output
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

/// Kind of a declared type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    /// Reference type; the only kind that can be a target
    #[default]
    Class,
    /// Value type
    Struct,
    /// Interface; the only kind that can be a contract
    Interface,
}

/// Declared accessibility of a member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum Accessibility {
    #[default]
    Public,
    Internal,
    Protected,
    Private,
}

/// An annotation as an ordered (name, argument-text) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeData {
    /// Annotation name as written (`Inject`, `global::System.Obsolete`)
    pub name: String,
    /// Argument texts in order
    #[serde(default)]
    pub arguments: Vec<String>,
}

impl AttributeData {
    /// Creates an annotation without arguments
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
        }
    }

    /// Creates an annotation with arguments
    pub fn with_arguments(name: impl Into<String>, arguments: Vec<String>) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }

    /// Last segment of the name, without qualifier
    pub fn simple_name(&self) -> &str {
        let name = self.name.rsplit("::").next().unwrap_or(&self.name);
        name.rsplit('.').next().unwrap_or(name)
    }

    /// Source text of the annotation body (`Name(arg1, arg2)`)
    pub fn to_source(&self) -> String {
        if self.arguments.is_empty() {
            self.name.clone()
        } else {
            format!("{}({})", self.name, self.arguments.join(", "))
        }
    }
}

/// Generic type parameter with its declared constraints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeParameterSymbol {
    /// Parameter name (`T`)
    pub name: String,
    /// `class` constraint
    #[serde(default)]
    pub reference_type: bool,
    /// `struct` constraint
    #[serde(default)]
    pub value_type: bool,
    /// `new()` constraint
    #[serde(default)]
    pub constructor_constraint: bool,
    /// Interface and base-class constraints
    #[serde(default)]
    pub constraint_types: Vec<TypeRef>,
}

impl TypeParameterSymbol {
    /// Creates an unconstrained parameter
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reference_type: false,
            value_type: false,
            constructor_constraint: false,
            constraint_types: Vec::new(),
        }
    }

    /// Constraint clauses in declaration order
    pub fn constraints(&self) -> Vec<String> {
        let mut constraints = Vec::new();
        if self.reference_type {
            constraints.push("class".to_string());
        }
        if self.value_type {
            constraints.push("struct".to_string());
        }
        constraints.extend(self.constraint_types.iter().map(ToString::to_string));
        if self.constructor_constraint {
            constraints.push("new()".to_string());
        }
        constraints
    }
}

/// A method or constructor parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSymbol {
    /// Parameter name
    pub name: String,
    /// Declared type, written `type` in manifests
    #[serde(rename = "type")]
    pub ty: TypeRef,
    /// Annotations on the parameter
    #[serde(default)]
    pub attributes: Vec<AttributeData>,
    /// Whether the type is a value type (strings count as value types)
    #[serde(default)]
    pub value_type: bool,
}

impl ParameterSymbol {
    /// Creates a parameter without annotations
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            attributes: Vec::new(),
            value_type: false,
        }
    }
}

/// A constructor declared on a type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructorSymbol {
    /// Only public constructors are candidates for factories
    #[serde(default)]
    pub accessibility: Accessibility,
    /// Parameters in declaration order
    #[serde(default)]
    pub parameters: Vec<ParameterSymbol>,
    /// Annotations on the constructor, forwarded through the allow-list
    #[serde(default)]
    pub attributes: Vec<AttributeData>,
}

impl ConstructorSymbol {
    /// Creates a public constructor
    pub fn public(parameters: Vec<ParameterSymbol>) -> Self {
        Self {
            accessibility: Accessibility::Public,
            parameters,
            attributes: Vec::new(),
        }
    }

    /// Whether a parameter with `name` exists
    pub fn has_parameter(&self, name: &str) -> bool {
        self.parameters.iter().any(|parameter| parameter.name == name)
    }
}

/// A method declared on a type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSymbol {
    /// Method name
    pub name: String,
    /// Declared return type
    pub return_type: TypeRef,
    /// Parameters in declaration order
    #[serde(default)]
    pub parameters: Vec<ParameterSymbol>,
    /// Method-level generic parameters
    #[serde(default)]
    pub type_parameters: Vec<TypeParameterSymbol>,
    /// Documentation comment text, one entry per line
    #[serde(default)]
    pub doc: Vec<String>,
}

/// A declared type as seen by the compiled view of a module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSymbol {
    /// Simple name without namespace or arity
    pub name: String,
    /// Containing namespace, empty for the global namespace
    #[serde(default)]
    pub namespace: String,
    /// Class, struct, or interface
    #[serde(default)]
    pub kind: TypeKind,
    /// Generic parameters of the type
    #[serde(default)]
    pub type_parameters: Vec<TypeParameterSymbol>,
    /// Directly implemented or extended interfaces
    #[serde(default)]
    pub interfaces: Vec<TypeRef>,
    /// Declared constructors in declaration order
    #[serde(default)]
    pub constructors: Vec<ConstructorSymbol>,
    /// Declared methods in declaration order
    #[serde(default)]
    pub methods: Vec<MethodSymbol>,
    /// Annotations on the type, including factory markers
    #[serde(default)]
    pub attributes: Vec<AttributeData>,
    /// Declaring file, relative to the module root
    #[serde(default)]
    pub source_path: PathBuf,
    /// Namespaces imported at the declaration site, in order
    #[serde(default)]
    pub imports: Vec<String>,
}

impl TypeSymbol {
    /// Namespace-qualified name without type parameters
    pub fn qualified_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }

    /// Metadata name (`Acme.Widget`1`)
    pub fn metadata_name(&self) -> String {
        if self.type_parameters.is_empty() {
            self.qualified_name()
        } else {
            format!("{}`{}", self.qualified_name(), self.type_parameters.len())
        }
    }

    /// Number of type parameters
    pub fn arity(&self) -> usize {
        self.type_parameters.len()
    }

    /// Qualified reference using the type's own parameter names
    pub fn self_reference(&self) -> TypeRef {
        TypeRef::generic(
            self.qualified_name(),
            self.type_parameters
                .iter()
                .map(|parameter| TypeRef::simple(parameter.name.clone()))
                .collect(),
        )
    }

    /// Whether the reference denotes this type's generic definition
    pub fn is_definition_of(&self, reference: &TypeRef) -> bool {
        reference.arity() == self.arity()
            && (reference.unaliased_name() == self.qualified_name()
                || (!reference.is_qualified() && reference.name == self.name))
    }
}
