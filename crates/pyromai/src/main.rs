use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pyromai_core::config::{Config, OutputFormat};
use pyromai_core::{IndexError, IndexReport, ProjectIndexer};
use pyromai_python::PythonAnalyzer;
use pyromai_report::{json, text};

#[derive(Parser)]
#[command(name = "pyromai")]
#[command(about = "Analyze Python projects for code quality metrics and architecture layering")]
#[command(version)]
struct Cli {
    /// Path to the Python project to analyze
    path: PathBuf,

    /// Output format (defaults to the config file setting, then text)
    #[arg(long)]
    format: Option<OutputFormat>,

    /// Emit JSON without indentation
    #[arg(long)]
    compact: bool,

    /// Config file path (defaults to .pyromai.toml in the project or an ancestor)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Append a per-file table to the text report
    #[arg(long)]
    files: bool,

    /// Log per-file progress
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("path does not exist: {}", .0.display())]
    MissingPath(PathBuf),
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e:#}");
        process::exit(exit_code(&e));
    }
}

fn init_tracing(verbose: bool, quiet: bool) {
    let default = if quiet {
        "error"
    } else if verbose {
        "warn,pyromai=debug"
    } else {
        "warn,pyromai=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

/// Usage errors about the analysis root exit with 2, everything else with 1.
fn exit_code(err: &anyhow::Error) -> i32 {
    if err.downcast_ref::<CliError>().is_some() {
        return 2;
    }
    match err.downcast_ref::<IndexError>() {
        Some(IndexError::NotADirectory(_)) => 2,
        _ => 1,
    }
}

fn run(cli: &Cli) -> Result<()> {
    if !cli.path.exists() {
        return Err(CliError::MissingPath(cli.path.clone()).into());
    }

    let config = load_config(&cli.path, cli.config.as_deref())?;
    let format = cli.format.unwrap_or(config.output.format);
    let compact = cli.compact || config.output.compact;

    tracing::info!("Analyzing project: {}", cli.path.display());
    let report = run_index(&cli.path, &config)?;

    for skip in &report.skipped {
        tracing::warn!("skipping {}: {}", skip.path.display(), skip.reason);
    }

    match format {
        OutputFormat::Text => {
            print!("{}", text::format_report(&report.index, cli.files));
            print!("{}", text::format_skipped(&report.skipped));
        }
        OutputFormat::Json => {
            let out = json::format_report(&report.index, compact)
                .context("failed to serialize index")?;
            println!("{out}");
        }
    }

    Ok(())
}

fn load_config(project_path: &Path, config_path: Option<&Path>) -> Result<Config> {
    match config_path {
        Some(p) => Config::load(p),
        None => Ok(Config::load_or_default(project_path)),
    }
}

fn run_index(project_path: &Path, config: &Config) -> Result<IndexReport> {
    let analyzer = PythonAnalyzer::new().context("failed to initialize Python analyzer")?;
    let indexer = ProjectIndexer::new(project_path, Box::new(analyzer), config)?;
    Ok(indexer.index()?)
}
