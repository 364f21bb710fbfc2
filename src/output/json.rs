//! JSON output formatter for machine processing
//!
//! Emits the records as a pretty-printed array. Failed lookups carry only
//! `error` beside the identifying fields.

use crate::domain::AuditReport;
use crate::output::OutputFormatter;
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &AuditReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(&report.records)?;
        writeln!(writer, "{}", json)
    }
}
