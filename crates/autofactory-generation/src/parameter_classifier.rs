//! Parameter classification
//!
//! Splits the parameters of the selected constructors into those the caller
//! supplies through a creation method and those the factory injects itself.

use std::collections::HashSet;

use autofactory_symbols::ParameterSymbol;

use crate::{
    constructor_matcher::MatchedMethod, contract_resolver::ResolvedContract,
    models::ConstructorArgument,
};

/// Injected parameters plus per-method constructor arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterClassification {
    /// Parameters supplied through the factory's constructor, in first-seen order
    pub injected: Vec<ParameterSymbol>,
    /// Constructor call arguments for each matched method, in constructor order
    pub arguments: Vec<Vec<ConstructorArgument>>,
}

/// Whether a parameter's type counts as a value type (strings included)
pub fn is_value_type(parameter: &ParameterSymbol) -> bool {
    let name = parameter.ty.unaliased_name();
    parameter.value_type || name.eq_ignore_ascii_case("string") || name.eq_ignore_ascii_case("system.string")
}

/// Classifies the parameters of all matched constructors
///
/// A parameter is exposed when its name appears in any contract method, a
/// self-reference when its type is the contract, and injected otherwise.
/// Injected parameters are deduplicated by name and type.
pub fn classify(contract: &ResolvedContract, matched: &[MatchedMethod]) -> ParameterClassification {
    let exposed: HashSet<&str> = matched
        .iter()
        .flat_map(|m| m.method.parameters.iter().map(|p| p.name.as_str()))
        .collect();
    let is_self = |parameter: &ParameterSymbol| contract.symbol.is_definition_of(&parameter.ty);

    let mut injected: Vec<ParameterSymbol> = Vec::new();
    let mut seen: HashSet<(String, String)> = HashSet::new();
    for parameter in matched.iter().flat_map(|m| m.constructor.parameters.iter()) {
        if exposed.contains(parameter.name.as_str()) || is_self(parameter) {
            continue;
        }
        if seen.insert((parameter.name.clone(), parameter.ty.to_string())) {
            injected.push(parameter.clone());
        }
    }

    let arguments = matched
        .iter()
        .map(|m| {
            m.constructor
                .parameters
                .iter()
                .map(|parameter| {
                    if injected.iter().any(|i| i.name == parameter.name) {
                        ConstructorArgument::Injected(parameter.name.clone())
                    } else if is_self(parameter) {
                        ConstructorArgument::SelfReference
                    } else {
                        ConstructorArgument::Passed(parameter.name.clone())
                    }
                })
                .collect()
        })
        .collect();

    ParameterClassification { injected, arguments }
}
