//! Property-based tests for constructor selection and parameter classification

use std::collections::HashSet;

use autofactory_generation::{
    classify, select_constructor, MatchedMethod, ResolvedContract,
};
use autofactory_symbols::{
    ConstructorSymbol, MethodSymbol, ParameterSymbol, TypeKind, TypeRef, TypeSymbol,
};
use proptest::prelude::*;

const NAMES: &[&str] = &["logger", "name", "size", "clock", "cache", "options", "id"];

/// Strategy for a list of distinct parameter names
fn names_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::sample::subsequence(NAMES.to_vec(), 0..NAMES.len())
        .prop_shuffle()
        .prop_map(|names| names.into_iter().map(str::to_string).collect())
}

fn parameters(names: &[String]) -> Vec<ParameterSymbol> {
    names
        .iter()
        .map(|name| ParameterSymbol::new(name.clone(), TypeRef::simple(format!("T{}", name.len()))))
        .collect()
}

fn create(names: &[String]) -> MethodSymbol {
    MethodSymbol {
        name: "Create".to_string(),
        return_type: TypeRef::simple("IWidget"),
        parameters: parameters(names),
        type_parameters: Vec::new(),
        doc: Vec::new(),
    }
}

fn constructors_strategy() -> impl Strategy<Value = Vec<ConstructorSymbol>> {
    prop::collection::vec(names_strategy(), 1..6).prop_map(|lists| {
        lists
            .iter()
            .map(|names| ConstructorSymbol::public(parameters(names)))
            .collect()
    })
}

fn overlap(method: &MethodSymbol, constructor: &ConstructorSymbol) -> usize {
    method
        .parameters
        .iter()
        .filter(|p| constructor.has_parameter(&p.name))
        .count()
}

fn contract() -> ResolvedContract {
    ResolvedContract::open(TypeSymbol {
        name: "IWidgetFactory".to_string(),
        namespace: "Acme".to_string(),
        kind: TypeKind::Interface,
        type_parameters: Vec::new(),
        interfaces: Vec::new(),
        constructors: Vec::new(),
        methods: Vec::new(),
        attributes: Vec::new(),
        source_path: Default::default(),
        imports: Vec::new(),
    })
}

proptest! {
    /// The same inputs always select the same constructor
    #[test]
    fn prop_selection_is_deterministic(
        method_names in names_strategy(),
        constructors in constructors_strategy(),
    ) {
        let method = create(&method_names);
        let first = select_constructor(&method, &constructors).cloned();
        let second = select_constructor(&method, &constructors.clone()).cloned();
        prop_assert_eq!(first, second);
    }

    /// The selected constructor has the best overlap and comes first among equals
    #[test]
    fn prop_selection_prefers_best_overlap(
        method_names in names_strategy(),
        constructors in constructors_strategy(),
    ) {
        let method = create(&method_names);
        let selected = select_constructor(&method, &constructors).unwrap();
        let best = constructors.iter().map(|c| overlap(&method, c)).max().unwrap();
        prop_assert_eq!(overlap(&method, selected), best);

        let first_best = constructors.iter().find(|c| overlap(&method, c) == best).unwrap();
        prop_assert_eq!(selected, first_best);
    }

    /// Injected and exposed parameters are disjoint, injected ones are unique,
    /// and there is one constructor argument per constructor parameter
    #[test]
    fn prop_classification_partitions_parameters(
        methods in prop::collection::vec((names_strategy(), names_strategy()), 1..4),
    ) {
        let matched: Vec<MatchedMethod> = methods
            .iter()
            .map(|(method_names, ctor_names)| MatchedMethod {
                method: create(method_names),
                constructor: ConstructorSymbol::public(parameters(ctor_names)),
            })
            .collect();
        let classification = classify(&contract(), &matched);

        let exposed: HashSet<&str> = methods
            .iter()
            .flat_map(|(names, _)| names.iter().map(String::as_str))
            .collect();
        for injected in &classification.injected {
            prop_assert!(!exposed.contains(injected.name.as_str()));
        }

        let keys: HashSet<(String, String)> = classification
            .injected
            .iter()
            .map(|p| (p.name.clone(), p.ty.to_string()))
            .collect();
        prop_assert_eq!(keys.len(), classification.injected.len());

        prop_assert_eq!(classification.arguments.len(), matched.len());
        for (arguments, m) in classification.arguments.iter().zip(&matched) {
            prop_assert_eq!(arguments.len(), m.constructor.parameters.len());
        }
    }
}
