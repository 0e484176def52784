//! Target scanning
//!
//! A target is a concrete type carrying the factory marker. The marker is
//! recognized under several spellings; the first matching annotation on a
//! type wins.

use std::path::Path;

use autofactory_symbols::{AttributeData, ModuleId, TypeKind, TypeSymbol};
use tracing::debug;

/// Marker spellings recognized by default
pub const DEFAULT_MARKER_NAMES: [&str; 2] = ["GenerateFactory", "GenerateFactoryAttribute"];

/// A concrete type marked for factory generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Owning module
    pub module: ModuleId,
    /// The marked type
    pub symbol: TypeSymbol,
    /// The marker annotation as found on the type
    pub marker: AttributeData,
}

impl Target {
    /// Namespace-qualified name of the target
    pub fn qualified_name(&self) -> String {
        self.symbol.qualified_name()
    }

    /// Number of type parameters of the target
    pub fn arity(&self) -> usize {
        self.symbol.arity()
    }

    /// Declaring file, relative to the module root
    pub fn source_path(&self) -> &Path {
        &self.symbol.source_path
    }

    /// Contract reference carried by the marker, if any
    ///
    /// Accepts `typeof(IFoo)`, a quoted name, or the bare reference text.
    pub fn contract_reference(&self) -> Option<String> {
        let argument = self.marker.arguments.first()?.trim();
        let argument = argument
            .strip_prefix("typeof(")
            .and_then(|rest| rest.strip_suffix(')'))
            .unwrap_or(argument)
            .trim();
        let argument = argument
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
            .unwrap_or(argument)
            .trim();
        if argument.is_empty() {
            None
        } else {
            Some(argument.to_string())
        }
    }
}

/// Finds marker-annotated types in a module
#[derive(Debug, Clone)]
pub struct TargetScanner {
    marker_names: Vec<String>,
}

impl TargetScanner {
    /// Creates a scanner accepting the given marker spellings
    pub fn new(marker_names: Vec<String>) -> Self {
        Self { marker_names }
    }

    /// Whether an annotation is one of the accepted markers
    pub fn is_marker(&self, attribute: &AttributeData) -> bool {
        let name = attribute.simple_name();
        self.marker_names.iter().any(|marker| marker == name)
    }

    /// Returns the targets among `types`, in declaration order
    pub fn scan(&self, module: &str, types: &[TypeSymbol]) -> Vec<Target> {
        types
            .iter()
            .filter(|ty| ty.kind != TypeKind::Interface)
            .filter_map(|ty| {
                let marker = ty.attributes.iter().find(|a| self.is_marker(a))?;
                debug!(module = %module, target = %ty.qualified_name(), marker = %marker.name, "Found factory target");
                Some(Target {
                    module: module.to_string(),
                    symbol: ty.clone(),
                    marker: marker.clone(),
                })
            })
            .collect()
    }
}

impl Default for TargetScanner {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER_NAMES.iter().map(|s| s.to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn ty(name: &str, kind: TypeKind, attributes: Vec<AttributeData>) -> TypeSymbol {
        TypeSymbol {
            name: name.to_string(),
            namespace: "Acme".to_string(),
            kind,
            type_parameters: Vec::new(),
            interfaces: Vec::new(),
            constructors: Vec::new(),
            methods: Vec::new(),
            attributes,
            source_path: PathBuf::from(format!("{}.cs", name)),
            imports: Vec::new(),
        }
    }

    fn marker(name: &str, argument: &str) -> AttributeData {
        AttributeData::with_arguments(name, vec![argument.to_string()])
    }

    #[test]
    fn test_scan_keeps_declaration_order() {
        let types = vec![
            ty("Zeta", TypeKind::Class, vec![marker("GenerateFactory", "typeof(IZ)")]),
            ty("Plain", TypeKind::Class, vec![AttributeData::new("Serializable")]),
            ty("Alpha", TypeKind::Class, vec![marker("GenerateFactoryAttribute", "typeof(IA)")]),
        ];
        let targets = TargetScanner::default().scan("core", &types);
        let names: Vec<_> = targets.iter().map(|t| t.symbol.name.as_str()).collect();
        assert_eq!(names, vec!["Zeta", "Alpha"]);
        assert!(targets.iter().all(|t| t.module == "core"));
    }

    #[test]
    fn test_interfaces_are_never_targets() {
        let types = vec![ty("IWidget", TypeKind::Interface, vec![marker("GenerateFactory", "IX")])];
        assert!(TargetScanner::default().scan("core", &types).is_empty());
    }

    #[test]
    fn test_qualified_marker_name_is_recognized() {
        let scanner = TargetScanner::default();
        assert!(scanner.is_marker(&AttributeData::new("Acme.Factories.GenerateFactory")));
        assert!(scanner.is_marker(&AttributeData::new("global::Acme.GenerateFactoryAttribute")));
        assert!(!scanner.is_marker(&AttributeData::new("GenerateFactoryOther")));
    }

    #[test]
    fn test_doubly_marked_type_yields_one_target() {
        let types = vec![ty(
            "Widget",
            TypeKind::Class,
            vec![
                marker("GenerateFactory", "typeof(IWidgetFactory)"),
                marker("GenerateFactoryAttribute", "typeof(IWidgetFactory)"),
            ],
        )];
        let targets = TargetScanner::default().scan("core", &types);
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].contract_reference().as_deref(), Some("IWidgetFactory"));
    }

    #[test]
    fn test_contract_reference_forms() {
        let mut target = Target {
            module: "core".to_string(),
            symbol: ty("Widget", TypeKind::Class, Vec::new()),
            marker: marker("GenerateFactory", "typeof( IFactory<Foo, U> )"),
        };
        assert_eq!(target.contract_reference().as_deref(), Some("IFactory<Foo, U>"));

        target.marker = marker("GenerateFactory", "\"IWidgetFactory\"");
        assert_eq!(target.contract_reference().as_deref(), Some("IWidgetFactory"));

        target.marker = AttributeData::new("GenerateFactory");
        assert_eq!(target.contract_reference(), None);

        target.marker = marker("GenerateFactory", "typeof()");
        assert_eq!(target.contract_reference(), None);
    }

    #[test]
    fn test_custom_marker_names() {
        let scanner = TargetScanner::new(vec!["AutoFactory".to_string()]);
        let types = vec![
            ty("A", TypeKind::Class, vec![AttributeData::new("AutoFactory")]),
            ty("B", TypeKind::Class, vec![AttributeData::new("GenerateFactory")]),
        ];
        let targets = scanner.scan("core", &types);
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].symbol.name, "A");
    }
}
