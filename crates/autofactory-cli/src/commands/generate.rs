// Generate factories for a workspace

use std::path::{Path, PathBuf};
use std::sync::Arc;

use autofactory_config::{ConfigError, ConfigManager, ConfigStore, GeneratorConfig};
use autofactory_generation::{
    BuildOptions, FactoryGenerator, FactoryRenderer, TargetScanner, TemplateResolver,
};
use autofactory_orchestration::{Orchestrator, OrchestratorOptions, RunReport};
use autofactory_symbols::ManifestProvider;
use tracing::{debug, info};

use super::Command;
use crate::error::{CliError, CliResult};
use crate::logging::VerbosityLevel;
use crate::output::{self, OutputStyle};
use crate::pause;
use crate::router::GenerateArgs;

/// Runs one incremental generation pass
pub struct GenerateCommand {
    args: GenerateArgs,
}

impl GenerateCommand {
    pub fn new(args: GenerateArgs) -> Self {
        Self { args }
    }

    /// Workspace root from the arguments or the current directory
    pub fn workspace(&self) -> CliResult<PathBuf> {
        let workspace = match &self.args.workspace {
            Some(path) => path.clone(),
            None => std::env::current_dir()?,
        };
        if !workspace.is_dir() {
            return Err(CliError::InvalidArgument {
                message: format!("workspace {} is not a directory", workspace.display()),
            });
        }
        Ok(workspace)
    }

    /// Layered configuration with command-line overrides applied
    pub fn load_config(&self, workspace: &Path) -> CliResult<GeneratorConfig> {
        let manager = match &self.args.config {
            Some(path) if !path.is_file() => {
                return Err(ConfigError::NotFound(path.display().to_string()).into());
            }
            Some(path) => ConfigManager::with_path(path.clone()),
            None => ConfigManager::new(workspace),
        };
        let mut config = manager.load_config()?;

        if let Some(list) = &self.args.attribute_import_list {
            config.attribute_import_list = list.clone();
        }
        config.write_xml_doc |= self.args.doc;
        config.pause_on_error |= self.args.pause;
        if let Some(template) = &self.args.template {
            config.template_path = Some(template.clone());
        }
        if let Some(dir) = &self.args.template_dir {
            config.template_dir = Some(dir.clone());
        }

        manager.validate_config(&config)?;
        Ok(config.resolved(workspace))
    }

    /// Generator configured from `config`
    pub fn build_generator(config: &GeneratorConfig) -> CliResult<FactoryGenerator> {
        let mut renderer = match &config.template_path {
            Some(path) => FactoryRenderer::from_file(path)?,
            None => FactoryRenderer::new()?,
        };
        let overrides = renderer.load_overrides(&TemplateResolver::new(config.template_dir.clone()))?;
        debug!(overrides, "Loaded override templates");

        let options = BuildOptions {
            attribute_import_list: config.attribute_import_list.clone(),
            write_doc: config.write_xml_doc,
            generator_name: config.generator_name.clone(),
            generator_version: config.generator_version.clone(),
        };
        Ok(FactoryGenerator::new(
            TargetScanner::new(config.marker_names.clone()),
            options,
            renderer,
            config.output_extension.clone(),
        ))
    }

    /// Runs generation and returns the report without printing it
    pub async fn run(&self) -> CliResult<RunReport> {
        pause::request_pause_on_error(self.args.pause);
        let workspace = self.workspace()?;
        let config = self.load_config(&workspace)?;
        pause::request_pause_on_error(config.pause_on_error);

        let manifest = match &self.args.manifest {
            Some(path) => path.clone(),
            None => ManifestProvider::discover(&workspace)?,
        };
        debug!(workspace = %workspace.display(), manifest = %manifest.display(), "Loading workspace");
        let provider = ManifestProvider::load(&manifest).await?;

        let orchestrator = Orchestrator::new(
            Arc::new(provider),
            Self::build_generator(&config)?,
            OrchestratorOptions {
                state_file: config.state_file.clone(),
                dry_run: self.args.dry_run,
            },
        )?;
        Ok(orchestrator.run().await?)
    }

    fn print_report(&self, report: &RunReport) -> CliResult<()> {
        if self.args.json {
            let json = serde_json::to_string_pretty(report).map_err(std::io::Error::from)?;
            println!("{}", json);
            return Ok(());
        }

        let style = OutputStyle::default();
        if VerbosityLevel::Normal.should_output() {
            let (write, remove) = if report.dry_run {
                ("would write", "would remove")
            } else {
                ("write", "remove")
            };
            for path in &report.written {
                println!("{}", style.path_action(write, path));
            }
            for path in &report.removed {
                println!("{}", style.path_action(remove, path));
            }
        }
        if report.statistics.targets == 0 {
            output::print_warning("No types carry a factory marker");
        }
        if report.dry_run {
            output::print_info("Dry run: no files were changed and no state was saved");
        }
        output::print_success(&format!("{} (completed in {:.2?})", report.summary(), report.elapsed));
        Ok(())
    }
}

#[async_trait::async_trait]
impl Command for GenerateCommand {
    async fn execute(&self) -> CliResult<()> {
        let report = self.run().await?;
        info!(elapsed = ?report.elapsed, "completed in {:.2?}", report.elapsed);
        self.print_report(&report)
    }
}
