//! Audit report and summary types
//!
//! Provides the run-level result returned by the orchestrator and the
//! aggregate counts used for the summary line.

use super::DependencyHealth;
use crate::health::Staleness;
use serde::Serialize;

/// Aggregate counts over all health records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AuditSummary {
    /// Number of records
    pub total: usize,
    /// Records at or past the stale threshold (very-stale included)
    pub stale: usize,
    /// Records at or past the very-stale threshold
    pub very_stale: usize,
    /// Records at least one major version behind
    pub major_behind: usize,
    /// Records whose usage check came back negative
    pub not_imported: usize,
    /// Records whose registry lookup failed
    pub fetch_errors: usize,
}

impl AuditSummary {
    /// Compute summary counts from a list of records
    pub fn from_records(records: &[DependencyHealth]) -> Self {
        let mut summary = Self {
            total: records.len(),
            ..Self::default()
        };

        for record in records {
            match record.staleness() {
                Staleness::VeryStale => {
                    summary.very_stale += 1;
                    summary.stale += 1;
                }
                Staleness::Stale => summary.stale += 1,
                Staleness::Fresh | Staleness::Unknown => {}
            }

            if record
                .assessment()
                .is_some_and(|a| a.version_status.is_major())
            {
                summary.major_behind += 1;
            }
            if record.imported() == Some(false) {
                summary.not_imported += 1;
            }
            if record.is_error() {
                summary.fetch_errors += 1;
            }
        }

        summary
    }
}

/// Complete result of an audit run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditReport {
    /// One record per deduplicated dependency, in declaration order
    pub records: Vec<DependencyHealth>,
    /// Aggregate counts
    pub summary: AuditSummary,
    /// Non-fatal problems (unreadable or malformed manifests)
    pub warnings: Vec<String>,
    /// Whether import usage was resolved for PyPI records
    pub usage_checked: bool,
}

impl AuditReport {
    /// Create a report from records, computing the summary
    pub fn new(records: Vec<DependencyHealth>, warnings: Vec<String>, usage_checked: bool) -> Self {
        let summary = AuditSummary::from_records(&records);
        Self {
            records,
            summary,
            warnings,
            usage_checked,
        }
    }

    /// Returns true if no dependencies were audited
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
