//! stale-deps - Dependency health audit CLI tool
//!
//! Reports staleness, version drift and likely-unused packages for:
//! - Python (requirements.txt, pyproject.toml)
//! - Node.js (package.json)

use clap::{CommandFactory, Parser};
use stale_deps::cli::{CheckArgs, Cli, Command};
use stale_deps::orchestrator::Orchestrator;
use stale_deps::output::{create_formatter, OutputFormat};
use stale_deps::progress::Progress;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let Some(Command::Check(args)) = cli.command else {
        // No subcommand: show usage and succeed
        let _ = Cli::command().print_help();
        println!();
        return ExitCode::SUCCESS;
    };

    init_logging(args.verbose, args.quiet);

    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
async fn run(args: CheckArgs) -> anyhow::Result<ExitCode> {
    tracing::info!("stale-deps v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("target: {}", args.path.display());

    let config = args.to_config();
    let thresholds = config.thresholds;

    let orchestrator = Orchestrator::new(config)?;
    let progress = Progress::new(args.show_progress());
    let report = orchestrator.run_with_observer(&progress).await?;

    tracing::info!(
        "{} records, {} fetch errors",
        report.summary.total,
        report.summary.fetch_errors
    );

    // JSON mode keeps stdout empty when there is nothing to report
    let format = OutputFormat::from_cli(args.json);
    if report.is_empty() && format == OutputFormat::Json {
        eprintln!("No dependencies found in manifests.");
        return Ok(ExitCode::SUCCESS);
    }

    let formatter = create_formatter(format, thresholds);
    let mut stdout = io::stdout().lock();
    formatter.format(&report, &mut stdout)?;
    stdout.flush()?;

    Ok(ExitCode::SUCCESS)
}

/// Install the tracing subscriber; logs go to stderr
fn init_logging(verbose: bool, quiet: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    } else if quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}
