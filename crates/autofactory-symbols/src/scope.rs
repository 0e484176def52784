//! Name lookup order for textual type references

use crate::type_ref::TypeRef;

/// Fully qualified candidates for `reference`, in lookup order
///
/// The declaring namespace comes first, then its enclosing namespaces, then
/// every imported namespace in declaration order, and finally the name as
/// written. Duplicates are dropped, keeping the first occurrence.
pub fn candidate_names(reference: &TypeRef, namespace: &str, imports: &[String]) -> Vec<String> {
    let name = reference.unaliased_name();
    let mut candidates: Vec<String> = Vec::new();

    if reference.name.starts_with("global::") {
        candidates.push(name.to_string());
        return candidates;
    }

    let mut scope = namespace;
    while !scope.is_empty() {
        push_unique(&mut candidates, format!("{}.{}", scope, name));
        scope = match scope.rfind('.') {
            Some(index) => &scope[..index],
            None => "",
        };
    }
    for import in imports {
        let import = import.trim();
        if !import.is_empty() {
            push_unique(&mut candidates, format!("{}.{}", import, name));
        }
    }
    push_unique(&mut candidates, name.to_string());

    candidates
}

fn push_unique(candidates: &mut Vec<String>, candidate: String) {
    if !candidates.contains(&candidate) {
        candidates.push(candidate);
    }
}
