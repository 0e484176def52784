//! Incremental generation across all modules of a workspace
//!
//! One task per module catalogs existing output and generates factories. The
//! tasks are spawned in dependency order without waiting for each other and
//! then awaited together. Their results are folded into a single
//! [`WorkspaceSnapshot`] afterwards, so removals of obsolete output are only
//! added once every write is known.

use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    path::PathBuf,
    sync::Arc,
    time::Instant,
};

use autofactory_generation::{FactoryGenerator, GenerationError};
use autofactory_symbols::{ModuleId, ModuleInfo, SymbolProvider, WorkspaceSnapshot};
use tracing::{debug, info};

use crate::{
    catalog::GeneratedCatalog,
    error::{OrchestrationError, Result},
    execution_ordering::ExecutionOrderer,
    hash_store::{self, HashStore},
    reconciler::reconcile,
    report::{RunReport, RunStatistics, TargetReport, TargetState},
};

/// Options for an orchestration run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrchestratorOptions {
    /// Incremental state file
    pub state_file: PathBuf,
    /// Compute everything but write nothing
    pub dry_run: bool,
}

/// What a module task hands back
#[derive(Debug)]
struct ModuleOutcome {
    module: ModuleId,
    cataloged: BTreeSet<PathBuf>,
    targets: Vec<TargetOutcome>,
}

#[derive(Debug)]
struct TargetOutcome {
    target: String,
    source: String,
    digest: String,
    path: PathBuf,
    /// Rendered content, `None` when skipped
    content: Option<String>,
}

/// Runs generation over every module of a workspace
pub struct Orchestrator {
    provider: Arc<dyn SymbolProvider>,
    generator: Arc<FactoryGenerator>,
    catalog: Arc<GeneratedCatalog>,
    options: OrchestratorOptions,
}

impl Orchestrator {
    /// Creates an orchestrator
    pub fn new(
        provider: Arc<dyn SymbolProvider>,
        generator: FactoryGenerator,
        options: OrchestratorOptions,
    ) -> Result<Self> {
        let catalog = GeneratedCatalog::new(&generator.options().generator_name, generator.output_extension())?;
        Ok(Self {
            provider,
            generator: Arc::new(generator),
            catalog: Arc::new(catalog),
            options,
        })
    }

    /// Options in use
    pub fn options(&self) -> &OrchestratorOptions {
        &self.options
    }

    /// Runs one incremental generation pass
    ///
    /// Any error aborts the run before the state file is written. Files
    /// already applied are not rolled back; the next run repairs them through
    /// digest mismatch.
    pub async fn run(&self) -> Result<RunReport> {
        let started = Instant::now();
        let modules = self.provider.modules()?;
        let order = ExecutionOrderer::new(&modules).determine_order()?;
        let previous = Arc::new(HashStore::load(&self.options.state_file).await?);

        let mut by_id: HashMap<ModuleId, ModuleInfo> = modules.into_iter().map(|m| (m.id.clone(), m)).collect();
        let mut handles = Vec::with_capacity(order.len());
        for id in &order {
            let Some(module) = by_id.remove(id) else {
                continue;
            };
            let provider = Arc::clone(&self.provider);
            let generator = Arc::clone(&self.generator);
            let catalog = Arc::clone(&self.catalog);
            let previous = Arc::clone(&previous);
            handles.push(tokio::spawn(async move {
                process_module(provider.as_ref(), &generator, &catalog, &previous, module).await
            }));
        }

        // Full barrier: every module finishes before anything is reconciled.
        let mut outcomes = Vec::with_capacity(handles.len());
        let mut failure = None;
        for joined in futures::future::join_all(handles).await {
            match joined {
                Ok(Ok(outcome)) => outcomes.push(outcome),
                Ok(Err(err)) => {
                    failure.get_or_insert(err);
                }
                Err(err) => {
                    failure.get_or_insert(OrchestrationError::TaskFailed(err.to_string()));
                }
            }
        }
        if let Some(err) = failure {
            return Err(err);
        }

        let mut report = RunReport {
            dry_run: self.options.dry_run,
            ..Default::default()
        };
        let mut snapshot = WorkspaceSnapshot::new();
        let mut generated = BTreeSet::new();
        let mut cataloged = BTreeMap::new();
        let mut next = HashStore::new();

        for outcome in outcomes {
            report.statistics.modules += 1;
            for path in outcome.cataloged {
                cataloged.insert(path, outcome.module.clone());
            }
            for target in outcome.targets {
                next.record(outcome.module.clone(), target.source, target.digest);
                generated.insert(target.path.clone());
                let state = match target.content {
                    Some(content) => {
                        snapshot = snapshot.with_document(outcome.module.clone(), target.path.clone(), content);
                        TargetState::Regenerated
                    }
                    None => TargetState::Skipped,
                };
                report.targets.push(TargetReport {
                    module: outcome.module.clone(),
                    target: target.target,
                    path: target.path,
                    state,
                });
            }
        }

        let reconciliation = reconcile(&generated, &cataloged);
        debug!(
            new = reconciliation.new.len(),
            obsolete = reconciliation.obsolete.len(),
            "Reconciled generated output"
        );
        let snapshot = reconciliation.apply(&snapshot);

        if self.options.dry_run {
            report.written = snapshot.written_paths();
            report.removed = snapshot.removed_paths();
        } else {
            let applied = self.provider.apply_changes(&snapshot).await?;
            next.save(&self.options.state_file).await?;
            report.statistics.unchanged = applied.unchanged.len();
            report.written = applied.written;
            report.removed = applied.removed;
        }

        report.statistics.targets = report.targets.len();
        report.statistics.regenerated = report.targets_in(TargetState::Regenerated).count();
        report.statistics.skipped = report.targets_in(TargetState::Skipped).count();
        report.statistics.written = report.written.len();
        report.statistics.removed = report.removed.len();
        report.elapsed = started.elapsed();

        info!(dry_run = self.options.dry_run, "{}", report.summary());
        Ok(report)
    }
}

async fn process_module(
    provider: &dyn SymbolProvider,
    generator: &FactoryGenerator,
    catalog: &GeneratedCatalog,
    previous: &HashStore,
    module: ModuleInfo,
) -> Result<ModuleOutcome> {
    if !module.compiles() {
        return Err(GenerationError::UpstreamCompilation {
            module: module.id.clone(),
            diagnostics: module.diagnostics.clone(),
        }
        .into());
    }

    let cataloged = catalog.scan(provider, &module.id).await?;
    let targets = generator.scan(provider, &module)?;
    debug!(module = %module.display_name(), targets = targets.len(), "Scanned module");

    let mut digests: HashMap<PathBuf, String> = HashMap::new();
    let mut outcomes = Vec::with_capacity(targets.len());
    for target in &targets {
        let relative = target.source_path().to_path_buf();
        let digest = match digests.get(&relative) {
            Some(digest) => digest.clone(),
            None => {
                let bytes = provider.read_source(&module.root.join(&relative)).await?;
                let digest = hash_store::digest(&bytes);
                digests.insert(relative.clone(), digest.clone());
                digest
            }
        };
        let source = hash_store::source_key(&relative);
        let path = generator.output_path(&module, target);

        let unchanged = previous.get(&module.id, &source) == Some(digest.as_str());
        let content = if unchanged && provider.exists(&path).await {
            debug!(module = %module.id, target = %target.qualified_name(), "Source unchanged, skipping");
            None
        } else {
            Some(generator.generate(provider, &module, target)?.content)
        };

        outcomes.push(TargetOutcome {
            target: target.qualified_name(),
            source,
            digest,
            path,
            content,
        });
    }

    Ok(ModuleOutcome {
        module: module.id,
        cataloged,
        targets: outcomes,
    })
}
