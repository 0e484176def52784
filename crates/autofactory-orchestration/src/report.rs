//! Run reports and statistics

use std::{path::PathBuf, time::Duration};

use serde::Serialize;

/// What happened to one target during a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetState {
    /// Source unchanged and output present
    Skipped,
    /// Factory rendered again
    Regenerated,
}

/// Per-target outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetReport {
    pub module: String,
    pub target: String,
    /// Output path
    pub path: PathBuf,
    pub state: TargetState,
}

/// Counters for a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStatistics {
    /// Modules processed
    pub modules: usize,
    /// Targets found
    pub targets: usize,
    /// Targets rendered again
    pub regenerated: usize,
    /// Targets skipped as unchanged
    pub skipped: usize,
    /// Files written (or that would be written in a dry run)
    pub written: usize,
    /// Rendered files whose content already matched
    pub unchanged: usize,
    /// Obsolete files removed (or that would be removed in a dry run)
    pub removed: usize,
}

/// Outcome of an orchestration run
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub statistics: RunStatistics,
    pub targets: Vec<TargetReport>,
    /// Files written, in path order
    pub written: Vec<PathBuf>,
    /// Files removed, in path order
    pub removed: Vec<PathBuf>,
    /// Nothing was written and no state was persisted
    pub dry_run: bool,
    #[serde(skip)]
    pub elapsed: Duration,
}

impl RunReport {
    /// One-line summary for log output
    pub fn summary(&self) -> String {
        let s = &self.statistics;
        format!(
            "{} targets in {} modules: {} regenerated, {} skipped, {} written, {} removed",
            s.targets, s.modules, s.regenerated, s.skipped, s.written, s.removed
        )
    }

    /// Targets in a given state
    pub fn targets_in(&self, state: TargetState) -> impl Iterator<Item = &TargetReport> {
        self.targets.iter().filter(move |t| t.state == state)
    }
}
