// Command routing and dispatch

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::commands::{Command, GenerateCommand, VersionCommand};
use crate::error::CliResult;

/// AutoFactory - incremental factory generator
#[derive(Parser, Debug)]
#[command(name = "autofactory")]
#[command(bin_name = "autofactory")]
#[command(about = "Generate factory classes for marker-annotated types")]
#[command(
    long_about = "AutoFactory scans the modules of a workspace for types carrying a factory marker, \
                  resolves the contract each factory implements, and writes a <Name>Factory.Generated \
                  file beside every target. Unchanged sources are skipped and factories without a \
                  target are removed.\n\nRunning without a subcommand is the same as 'autofactory generate'."
)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Options of the default generate command
    #[command(flatten)]
    pub generate: GenerateArgs,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimize output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate factories for the workspace
    #[command(about = "Generate, refresh, and clean up factories (default)")]
    Generate(GenerateArgs),

    /// Show version information
    #[command(about = "Show version information")]
    Version,
}

/// Options of the generate command
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateArgs {
    /// Workspace root (default: current directory)
    #[arg(short, long, value_name = "DIR")]
    pub workspace: Option<PathBuf>,

    /// Symbol manifest (default: autofactory.symbols.{yaml,yml,json} in the workspace)
    #[arg(short, long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Configuration file (default: autofactory.toml in the workspace)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Substrings of constructor annotations to forward onto factories
    #[arg(long, value_name = "NAMES", value_delimiter = ',')]
    pub attribute_import_list: Option<Vec<String>>,

    /// Copy contract method documentation onto generated methods
    #[arg(long)]
    pub doc: bool,

    /// Wait for Enter before exiting after an error
    #[arg(long)]
    pub pause: bool,

    /// Default template file
    #[arg(long, value_name = "FILE")]
    pub template: Option<PathBuf>,

    /// Directory with per-contract override templates (<Contract>.render)
    #[arg(long, value_name = "DIR")]
    pub template_dir: Option<PathBuf>,

    /// Report what would change without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Command router
pub struct CommandRouter;

impl CommandRouter {
    /// Parse CLI arguments and route to appropriate handler
    pub async fn route() -> CliResult<()> {
        let cli = Cli::parse();

        // Initialize logging based on CLI flags
        crate::logging::init_logging(cli.verbose, cli.quiet);

        Self::execute(&cli).await
    }

    /// Execute a command
    pub async fn execute(cli: &Cli) -> CliResult<()> {
        // Default to generate if no command specified
        let command = cli
            .command
            .clone()
            .unwrap_or_else(|| Commands::Generate(cli.generate.clone()));

        match command {
            Commands::Generate(args) => GenerateCommand::new(args).execute().await,
            Commands::Version => VersionCommand::new().execute().await,
        }
    }
}
