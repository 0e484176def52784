//! Symbol builders shared by unit tests

use std::path::{Path, PathBuf};

use autofactory_symbols::{
    ManifestProvider, MethodSymbol, ModuleInfo, ModuleManifest, ParameterSymbol, TypeKind,
    TypeRef, TypeSymbol, WorkspaceManifest,
};

pub(crate) fn class(namespace: &str, name: &str) -> TypeSymbol {
    TypeSymbol {
        name: name.to_string(),
        namespace: namespace.to_string(),
        kind: TypeKind::Class,
        type_parameters: Vec::new(),
        interfaces: Vec::new(),
        constructors: Vec::new(),
        methods: Vec::new(),
        attributes: Vec::new(),
        source_path: PathBuf::from(format!("{}.cs", name)),
        imports: Vec::new(),
    }
}

pub(crate) fn interface(namespace: &str, name: &str) -> TypeSymbol {
    TypeSymbol {
        kind: TypeKind::Interface,
        ..class(namespace, name)
    }
}

pub(crate) fn method(name: &str, return_type: &str, parameters: Vec<ParameterSymbol>) -> MethodSymbol {
    MethodSymbol {
        name: name.to_string(),
        return_type: TypeRef::simple(return_type),
        parameters,
        type_parameters: Vec::new(),
        doc: Vec::new(),
    }
}

pub(crate) fn parameter(name: &str, ty: &str) -> ParameterSymbol {
    ParameterSymbol::new(name, TypeRef::simple(ty))
}

/// Provider holding every type in a single module named `app`
pub(crate) fn stub_provider(types: Vec<TypeSymbol>) -> ManifestProvider {
    let manifest = WorkspaceManifest {
        modules: vec![ModuleManifest {
            info: ModuleInfo {
                id: "app".to_string(),
                name: "App".to_string(),
                root: PathBuf::from("app"),
                dependencies: Vec::new(),
                diagnostics: Vec::new(),
            },
            types,
        }],
    };
    ManifestProvider::new(manifest, Path::new("/workspace")).unwrap()
}
