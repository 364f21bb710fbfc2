//! Output formatting for audit reports
//!
//! This module provides:
//! - Text output for human-readable display
//! - JSON output for machine processing

mod json;
mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

use crate::domain::AuditReport;
use crate::health::StalenessThresholds;
use std::io::Write;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Text,
    /// JSON array of records
    Json,
}

impl OutputFormat {
    /// Select the format from the `--json` flag
    pub fn from_cli(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format and write the audit report
    fn format(&self, report: &AuditReport, writer: &mut dyn Write) -> std::io::Result<()>;
}

/// Create an output formatter for the given format
pub fn create_formatter(
    format: OutputFormat,
    thresholds: StalenessThresholds,
) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(thresholds)),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}
