//! Dependency ordering of workspace modules

use std::collections::{HashMap, HashSet};

use autofactory_symbols::{ModuleId, ModuleInfo};

use crate::error::{OrchestrationError, Result};

/// Represents a level in the execution hierarchy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionLevel {
    /// Modules whose dependencies all live in earlier levels
    pub modules: Vec<ModuleId>,

    /// Level number (0 is first)
    pub level: usize,
}

/// Execution plan for the modules of a workspace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionPlan {
    /// Execution levels in dependency order
    pub levels: Vec<ExecutionLevel>,

    /// Total number of modules
    pub total_modules: usize,

    /// Width of the widest level
    pub max_parallelism: usize,
}

impl ExecutionPlan {
    /// Flattens the levels into a single order
    pub fn order(&self) -> Vec<ModuleId> {
        self.levels
            .iter()
            .flat_map(|level| level.modules.iter().cloned())
            .collect()
    }
}

/// Determines the order in which modules are processed
pub struct ExecutionOrderer {
    modules: Vec<ModuleId>,
    dependencies: HashMap<ModuleId, Vec<ModuleId>>,
    dependents: HashMap<ModuleId, Vec<ModuleId>>,
}

impl ExecutionOrderer {
    /// Creates an orderer over the given modules
    ///
    /// Dependencies on modules outside the set are ignored.
    pub fn new(modules: &[ModuleInfo]) -> Self {
        let ids: HashSet<&str> = modules.iter().map(|m| m.id.as_str()).collect();
        let mut dependencies: HashMap<ModuleId, Vec<ModuleId>> = HashMap::new();
        let mut dependents: HashMap<ModuleId, Vec<ModuleId>> = HashMap::new();

        for module in modules {
            let deps: Vec<ModuleId> = module
                .dependencies
                .iter()
                .filter(|d| ids.contains(d.as_str()) && **d != module.id)
                .cloned()
                .collect();
            for dep in &deps {
                dependents.entry(dep.clone()).or_default().push(module.id.clone());
            }
            dependencies.insert(module.id.clone(), deps);
        }

        Self {
            modules: modules.iter().map(|m| m.id.clone()).collect(),
            dependencies,
            dependents,
        }
    }

    /// Determines the processing order of all modules
    pub fn determine_order(&self) -> Result<Vec<ModuleId>> {
        Ok(self.create_plan()?.order())
    }

    /// Creates a level-based plan (modules in one level do not depend on each other)
    pub fn create_plan(&self) -> Result<ExecutionPlan> {
        let mut in_degree: HashMap<&str, usize> = self
            .modules
            .iter()
            .map(|m| (m.as_str(), self.dependencies.get(m).map_or(0, Vec::len)))
            .collect();

        // Kahn's algorithm, one level per round
        let mut levels = Vec::new();
        let mut processed: HashSet<&str> = HashSet::new();

        while processed.len() < self.modules.len() {
            let current_level: Vec<&str> = self
                .modules
                .iter()
                .map(String::as_str)
                .filter(|m| !processed.contains(m) && in_degree.get(m).copied().unwrap_or(0) == 0)
                .collect();

            if current_level.is_empty() {
                let remaining: Vec<&str> = self
                    .modules
                    .iter()
                    .map(String::as_str)
                    .filter(|m| !processed.contains(m))
                    .collect();
                return Err(OrchestrationError::CircularDependency(remaining.join(", ")));
            }

            for module in &current_level {
                processed.insert(*module);
                for dependent in self.dependents.get(*module).into_iter().flatten() {
                    if let Some(degree) = in_degree.get_mut(dependent.as_str()) {
                        *degree = degree.saturating_sub(1);
                    }
                }
            }

            levels.push(ExecutionLevel {
                modules: current_level.into_iter().map(str::to_string).collect(),
                level: levels.len(),
            });
        }

        let max_parallelism = levels.iter().map(|l| l.modules.len()).max().unwrap_or(0);

        Ok(ExecutionPlan {
            levels,
            total_modules: self.modules.len(),
            max_parallelism,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn module(id: &str, dependencies: &[&str]) -> ModuleInfo {
        ModuleInfo {
            id: id.to_string(),
            name: String::new(),
            root: PathBuf::from(id),
            dependencies: dependencies.iter().map(|d| d.to_string()).collect(),
            diagnostics: Vec::new(),
        }
    }

    #[test]
    fn test_dependencies_come_first() {
        let modules = vec![module("app", &["core", "data"]), module("data", &["core"]), module("core", &[])];
        let plan = ExecutionOrderer::new(&modules).create_plan().unwrap();

        assert_eq!(plan.levels.len(), 3);
        assert_eq!(plan.order(), vec!["core", "data", "app"]);
        assert_eq!(plan.total_modules, 3);
    }

    #[test]
    fn test_independent_modules_share_a_level() {
        let modules = vec![module("a", &[]), module("b", &[]), module("c", &["a"])];
        let plan = ExecutionOrderer::new(&modules).create_plan().unwrap();

        assert_eq!(plan.levels[0].modules, vec!["a", "b"]);
        assert_eq!(plan.levels[1].modules, vec!["c"]);
        assert_eq!(plan.max_parallelism, 2);
    }

    #[test]
    fn test_cycle_is_rejected() {
        let modules = vec![module("a", &["b"]), module("b", &["a"]), module("c", &[])];
        let err = ExecutionOrderer::new(&modules).determine_order().unwrap_err();

        match err {
            OrchestrationError::CircularDependency(names) => assert_eq!(names, "a, b"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_dependencies_are_ignored() {
        let modules = vec![module("app", &["external"])];
        let order = ExecutionOrderer::new(&modules).determine_order().unwrap();
        assert_eq!(order, vec!["app"]);
    }

    #[test]
    fn test_empty_workspace() {
        let plan = ExecutionOrderer::new(&[]).create_plan().unwrap();
        assert!(plan.levels.is_empty());
        assert_eq!(plan.max_parallelism, 0);
    }
}
