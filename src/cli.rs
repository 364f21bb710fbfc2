//! CLI argument parsing module for stale-deps

use crate::config::{AuditConfig, DEFAULT_CONCURRENCY};
use crate::health::{StalenessThresholds, DEFAULT_STALE_DAYS};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Audit dependency health: staleness, version drift, and unused packages
#[derive(Parser, Debug, Clone)]
#[command(
    name = "stale-deps",
    version,
    about = "Audit dependency health: staleness, version drift, and unused packages",
    long_about = "Audit dependency health: staleness, version drift, and unused packages.\n\
                  Supports requirements.txt, pyproject.toml, and package.json."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Audit dependencies in a project directory or manifest file
    Check(CheckArgs),
}

/// Options for `stale-deps check`
#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Project directory or manifest file path
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Output results as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Skip scanning .py files for imports
    #[arg(long)]
    pub no_import_check: bool,

    /// Days since the latest release before a package counts as stale
    #[arg(long, value_name = "N", default_value_t = DEFAULT_STALE_DAYS,
          value_parser = clap::value_parser!(i64).range(1..))]
    pub stale_days: i64,

    /// Days before a package counts as very stale (default: twice --stale-days)
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(i64).range(1..))]
    pub very_stale_days: Option<i64>,

    /// Maximum concurrent registry requests
    #[arg(long, value_name = "N", default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Enable verbose logging
    #[arg(long)]
    pub verbose: bool,

    /// Hide progress and warnings
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl CheckArgs {
    /// Staleness thresholds from the day options
    pub fn thresholds(&self) -> StalenessThresholds {
        let thresholds = StalenessThresholds::new(self.stale_days);
        match self.very_stale_days {
            Some(days) => thresholds.with_very_stale(days),
            None => thresholds,
        }
    }

    /// Build the run configuration
    pub fn to_config(&self) -> AuditConfig {
        AuditConfig::new(&self.path)
            .with_thresholds(self.thresholds())
            .with_import_check(!self.no_import_check)
            .with_concurrency(self.concurrency)
    }

    /// Whether to draw the progress bar
    pub fn show_progress(&self) -> bool {
        !self.quiet && !self.json
    }
}
