//! Constructor matching
//!
//! Pairs each contract creation method with a constructor of the target by
//! parameter names alone. Constructors are grouped by how many of the
//! method's parameter names they declare; the group whose count equals the
//! method's parameter count wins, otherwise the closest group does, and the
//! first constructor of that group in declaration order is selected.
//!
//! Parameter types are not considered, so two constructors with the same
//! name overlap are told apart only by declaration order.

use std::collections::BTreeMap;

use autofactory_symbols::{
    candidate_names, Accessibility, ConstructorSymbol, MethodSymbol, SymbolProvider,
};
use tracing::debug;

use crate::{
    contract_resolver::ResolvedContract,
    error::{GenerationError, Result},
    scanner::Target,
};

/// A creation method with the constructor selected for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedMethod {
    /// Creation method with contract type parameters substituted
    pub method: MethodSymbol,
    /// Constructor the method delegates to
    pub constructor: ConstructorSymbol,
}

/// Selects the constructor for a method among `constructors`
///
/// Only public constructors are candidates. Returns `None` when there is none.
pub fn select_constructor<'c>(
    method: &MethodSymbol,
    constructors: &'c [ConstructorSymbol],
) -> Option<&'c ConstructorSymbol> {
    let wanted = method.parameters.len();

    // Match count -> first constructor with that count, in declaration order.
    let mut groups: BTreeMap<usize, &ConstructorSymbol> = BTreeMap::new();
    for constructor in constructors
        .iter()
        .filter(|c| c.accessibility == Accessibility::Public)
    {
        let count = method
            .parameters
            .iter()
            .filter(|p| constructor.has_parameter(&p.name))
            .count();
        groups.entry(count).or_insert(constructor);
    }

    if let Some(exact) = groups.get(&wanted) {
        return Some(*exact);
    }
    groups
        .iter()
        .min_by_key(|(count, _)| count.abs_diff(wanted))
        .map(|(_, constructor)| *constructor)
}

/// Matches contract methods to target constructors
pub struct ConstructorMatcher<'a> {
    provider: &'a dyn SymbolProvider,
}

impl<'a> ConstructorMatcher<'a> {
    /// Creates a matcher over a symbol provider
    pub fn new(provider: &'a dyn SymbolProvider) -> Self {
        Self { provider }
    }

    /// Selects a constructor for every method, failing on the first method
    /// that cannot be served
    pub fn match_methods(
        &self,
        target: &Target,
        contract: &ResolvedContract,
        methods: &[MethodSymbol],
    ) -> Result<Vec<MatchedMethod>> {
        methods
            .iter()
            .map(|method| {
                self.check_return_type(target, contract, method)?;
                let constructor = select_constructor(method, &target.symbol.constructors)
                    .ok_or_else(|| GenerationError::ConstructorSelection {
                        target: target.qualified_name(),
                        method: method.name.clone(),
                        parameters: method
                            .parameters
                            .iter()
                            .map(|p| p.name.as_str())
                            .collect::<Vec<_>>()
                            .join(", "),
                    })?;
                debug!(
                    target = %target.qualified_name(),
                    method = %method.name,
                    parameters = constructor.parameters.len(),
                    "Selected constructor"
                );
                Ok(MatchedMethod {
                    method: method.clone(),
                    constructor: constructor.clone(),
                })
            })
            .collect()
    }

    /// The method must return a type the target implements, or the target itself
    fn check_return_type(
        &self,
        target: &Target,
        contract: &ResolvedContract,
        method: &MethodSymbol,
    ) -> Result<()> {
        let return_type = &method.return_type;
        if target.symbol.is_definition_of(return_type) {
            return Ok(());
        }

        let resolved = candidate_names(
            return_type,
            &contract.symbol.namespace,
            &contract.symbol.imports,
        )
        .iter()
        .find_map(|name| self.provider.resolve_type(&target.module, name, return_type.arity()));

        match resolved {
            Some(symbol)
                if symbol.metadata_name() == target.symbol.metadata_name()
                    || self.provider.implements(&target.module, &target.symbol, &symbol) =>
            {
                Ok(())
            }
            _ => Err(GenerationError::ContractMismatch {
                target: target.qualified_name(),
                contract: contract.reference().to_string(),
                method: method.name.clone(),
                return_type: return_type.to_string(),
            }),
        }
    }
}
