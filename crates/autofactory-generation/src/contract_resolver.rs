//! Contract resolution
//!
//! Turns the reference carried by a target's marker into the contract symbol
//! plus one binding per type-parameter position. Positions left open become
//! type parameters of the generated factory.

use std::collections::{HashMap, HashSet, VecDeque};

use autofactory_symbols::{
    candidate_names, MethodSymbol, SymbolProvider, TypeParameterSymbol, TypeRef, TypeSymbol,
};
use tracing::debug;

use crate::{
    error::{GenerationError, Result},
    scanner::Target,
};

/// Built-in type keywords that resolve to themselves
const KEYWORD_TYPES: &[&str] = &[
    "bool", "byte", "sbyte", "char", "decimal", "double", "float", "int", "uint", "long", "ulong",
    "short", "ushort", "object", "string", "nint", "nuint", "dynamic",
];

/// A contract with its marker bindings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedContract {
    /// The contract's generic definition
    pub symbol: TypeSymbol,
    /// Bound argument per type-parameter position; `None` where it stays open
    pub bindings: Vec<Option<TypeRef>>,
    open_names: Vec<String>,
}

impl ResolvedContract {
    /// Creates a contract where every type parameter stays open under its own name
    pub fn open(symbol: TypeSymbol) -> Self {
        let open_names = symbol.type_parameters.iter().map(|p| p.name.clone()).collect();
        let bindings = vec![None; symbol.arity()];
        Self {
            symbol,
            bindings,
            open_names,
        }
    }

    /// Namespace-qualified name of the contract
    pub fn qualified_name(&self) -> String {
        self.symbol.qualified_name()
    }

    /// Name each contract type parameter takes in the factory
    ///
    /// Bound positions map to their argument, open positions to the factory's
    /// own type parameter.
    pub fn substitutions(&self) -> HashMap<String, TypeRef> {
        self.symbol
            .type_parameters
            .iter()
            .enumerate()
            .map(|(index, parameter)| (parameter.name.clone(), self.argument(index)))
            .collect()
    }

    /// The contract's type parameters left open, with their factory-level names
    pub fn open_parameters(&self) -> Vec<(String, &TypeParameterSymbol)> {
        self.symbol
            .type_parameters
            .iter()
            .enumerate()
            .filter(|(index, _)| self.bindings[*index].is_none())
            .map(|(index, parameter)| (self.open_names[index].clone(), parameter))
            .collect()
    }

    /// The closed (or partially closed) reference the factory implements
    pub fn reference(&self) -> TypeRef {
        TypeRef::generic(
            self.qualified_name(),
            (0..self.symbol.arity()).map(|i| self.argument(i)).collect(),
        )
    }

    fn argument(&self, index: usize) -> TypeRef {
        match &self.bindings[index] {
            Some(bound) => bound.clone(),
            None => TypeRef::simple(self.open_names[index].clone()),
        }
    }
}

/// Resolves contract references against a module's compiled view
pub struct ContractResolver<'a> {
    provider: &'a dyn SymbolProvider,
}

impl<'a> ContractResolver<'a> {
    /// Creates a resolver over a symbol provider
    pub fn new(provider: &'a dyn SymbolProvider) -> Self {
        Self { provider }
    }

    /// Resolves the contract named by a target's marker
    ///
    /// The reference is looked up in the target's namespace, its enclosing
    /// namespaces, then each import in order; the first hit wins.
    pub fn resolve(&self, target: &Target) -> Result<ResolvedContract> {
        let text = target
            .contract_reference()
            .ok_or_else(|| GenerationError::MissingContract {
                target: target.qualified_name(),
                reference: None,
            })?;
        let reference = TypeRef::parse(&text)?;

        let symbol = self
            .lookup(target, &reference, &target.symbol.namespace, &target.symbol.imports)
            .ok_or_else(|| GenerationError::MissingContract {
                target: target.qualified_name(),
                reference: Some(text.clone()),
            })?;

        let open_names: Vec<String> = symbol.type_parameters.iter().map(|p| p.name.clone()).collect();
        let mut contract = ResolvedContract {
            bindings: vec![None; symbol.arity()],
            open_names,
            symbol,
        };

        if !reference.is_unbound_generic() {
            for (index, argument) in reference.arguments.iter().enumerate() {
                if argument.is_unbound() {
                    continue;
                }
                if self.is_open_argument(target, &contract.symbol, index, argument) {
                    contract.open_names[index] = argument.name.clone();
                    continue;
                }
                let resolved = self.resolve_argument(target, argument).ok_or_else(|| {
                    GenerationError::GenericArgumentUnresolved {
                        target: target.qualified_name(),
                        contract: text.clone(),
                        argument: argument.to_string(),
                    }
                })?;
                contract.bindings[index] = Some(resolved);
            }
        }

        debug!(
            target = %target.qualified_name(),
            contract = %contract.reference(),
            "Resolved contract"
        );
        Ok(contract)
    }

    /// Creation methods of a contract, with type parameters substituted
    ///
    /// When the contract declares no methods, its ancestor contracts are
    /// searched breadth-first.
    pub fn creation_methods(&self, module: &str, contract: &ResolvedContract) -> Vec<MethodSymbol> {
        let mut methods = Vec::new();
        let mut visited = HashSet::new();
        let mut queue = VecDeque::from([(contract.symbol.clone(), contract.substitutions())]);

        while let Some((symbol, substitutions)) = queue.pop_front() {
            if !visited.insert(symbol.metadata_name()) {
                continue;
            }
            if !symbol.methods.is_empty() {
                methods.extend(
                    symbol
                        .methods
                        .iter()
                        .map(|method| substitute_method(method, &substitutions)),
                );
                continue;
            }
            for parent in &symbol.interfaces {
                let parent = parent.substitute(&substitutions);
                let Some(parent_symbol) = candidate_names(&parent, &symbol.namespace, &symbol.imports)
                    .iter()
                    .find_map(|name| self.provider.resolve_type(module, name, parent.arity()))
                else {
                    continue;
                };
                let parent_substitutions = parent_symbol
                    .type_parameters
                    .iter()
                    .map(|p| p.name.clone())
                    .zip(parent.arguments.iter().cloned())
                    .collect();
                queue.push_back((parent_symbol, parent_substitutions));
            }
        }

        methods
    }

    fn lookup(
        &self,
        target: &Target,
        reference: &TypeRef,
        namespace: &str,
        imports: &[String],
    ) -> Option<TypeSymbol> {
        candidate_names(reference, namespace, imports)
            .iter()
            .find_map(|name| self.provider.resolve_type(&target.module, name, reference.arity()))
    }

    fn is_open_argument(
        &self,
        target: &Target,
        contract: &TypeSymbol,
        index: usize,
        argument: &TypeRef,
    ) -> bool {
        if !argument.arguments.is_empty() || argument.is_qualified() || !argument.suffix.is_empty() {
            return false;
        }
        target
            .symbol
            .type_parameters
            .iter()
            .any(|p| p.name == argument.name)
            || contract
                .type_parameters
                .get(index)
                .is_some_and(|p| p.name == argument.name)
    }

    fn resolve_argument(&self, target: &Target, argument: &TypeRef) -> Option<TypeRef> {
        let arguments = argument
            .arguments
            .iter()
            .map(|nested| self.resolve_argument(target, nested))
            .collect::<Option<Vec<_>>>()?;

        let is_keyword = argument.arguments.is_empty() && KEYWORD_TYPES.contains(&argument.name.as_str());
        let is_target_parameter = argument.arguments.is_empty()
            && target.symbol.type_parameters.iter().any(|p| p.name == argument.name);
        let name = if is_keyword || is_target_parameter {
            argument.name.clone()
        } else {
            self.lookup(target, argument, &target.symbol.namespace, &target.symbol.imports)?
                .qualified_name()
        };

        Some(TypeRef {
            name,
            arguments,
            suffix: argument.suffix.clone(),
        })
    }
}

fn substitute_method(method: &MethodSymbol, substitutions: &HashMap<String, TypeRef>) -> MethodSymbol {
    // Method-level type parameters shadow contract-level ones.
    let mut substitutions = substitutions.clone();
    for parameter in &method.type_parameters {
        substitutions.remove(&parameter.name);
    }

    let mut substituted = method.clone();
    substituted.return_type = method.return_type.substitute(&substitutions);
    for parameter in &mut substituted.parameters {
        parameter.ty = parameter.ty.substitute(&substitutions);
    }
    substituted
}
