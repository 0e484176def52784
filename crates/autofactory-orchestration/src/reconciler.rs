//! Obsolescence reconciliation
//!
//! Compares the outputs of this run with the cataloged outputs of the
//! previous ones. Cataloged files nothing generated this time are removed.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::PathBuf,
};

use autofactory_symbols::{ModuleId, WorkspaceSnapshot};

/// Difference between generated and cataloged outputs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Generated this run but not cataloged before
    pub new: BTreeSet<PathBuf>,
    /// Cataloged before but not generated this run, with the owning module
    pub obsolete: BTreeMap<PathBuf, ModuleId>,
}

impl Reconciliation {
    /// Adds a removal for every obsolete output to `snapshot`
    pub fn apply(&self, snapshot: &WorkspaceSnapshot) -> WorkspaceSnapshot {
        self.obsolete
            .iter()
            .fold(snapshot.clone(), |snapshot, (path, module)| {
                snapshot.without_document(module.clone(), path.clone())
            })
    }
}

/// Computes `new = generated - cataloged` and `obsolete = cataloged - generated`
pub fn reconcile(generated: &BTreeSet<PathBuf>, cataloged: &BTreeMap<PathBuf, ModuleId>) -> Reconciliation {
    Reconciliation {
        new: generated
            .iter()
            .filter(|path| !cataloged.contains_key(*path))
            .cloned()
            .collect(),
        obsolete: cataloged
            .iter()
            .filter(|(path, _)| !generated.contains(*path))
            .map(|(path, module)| (path.clone(), module.clone()))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autofactory_symbols::DocumentEdit;

    fn paths(names: &[&str]) -> BTreeSet<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    fn cataloged(names: &[&str]) -> BTreeMap<PathBuf, ModuleId> {
        names.iter().map(|n| (PathBuf::from(n), "app".to_string())).collect()
    }

    #[test]
    fn test_new_and_obsolete_sets() {
        let result = reconcile(&paths(&["a", "b"]), &cataloged(&["b", "c"]));
        assert_eq!(result.new, paths(&["a"]));
        assert_eq!(result.obsolete.keys().cloned().collect::<BTreeSet<_>>(), paths(&["c"]));
    }

    #[test]
    fn test_apply_adds_removals_only() {
        let snapshot = WorkspaceSnapshot::new().with_document("app", "a", "content");
        let result = reconcile(&paths(&["a"]), &cataloged(&["a", "old"]));

        let reconciled = result.apply(&snapshot);
        assert_eq!(reconciled.removed_paths(), vec![PathBuf::from("old")]);
        assert_eq!(reconciled.written_paths(), vec![PathBuf::from("a")]);
        assert_eq!(
            reconciled.get(&PathBuf::from("old")).map(|d| &d.edit),
            Some(&DocumentEdit::Remove)
        );
        // The input snapshot is untouched
        assert!(snapshot.removed_paths().is_empty());
    }

    #[test]
    fn test_nothing_cataloged() {
        let result = reconcile(&paths(&["a"]), &BTreeMap::new());
        assert_eq!(result.new, paths(&["a"]));
        assert!(result.obsolete.is_empty());
    }
}
