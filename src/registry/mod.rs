//! Registry adapters for fetching release metadata
//!
//! This module provides:
//! - HTTP client shared foundation
//! - npm Registry adapter
//! - PyPI JSON API adapter

mod client;
mod npm;
mod pypi;

pub use client::{HttpClient, DEFAULT_TIMEOUT};
pub use npm::NpmAdapter;
pub use pypi::PyPIAdapter;

use crate::domain::Ecosystem;
use crate::error::RegistryError;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Latest release of a package as reported by its registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseInfo {
    /// Latest published version
    pub latest_version: String,
    /// Upload time of that version, if the registry reports a parseable one
    pub last_release_date: Option<DateTime<Utc>>,
}

impl ReleaseInfo {
    /// Create release info
    pub fn new(latest_version: impl Into<String>, last_release_date: Option<DateTime<Utc>>) -> Self {
        Self {
            latest_version: latest_version.into(),
            last_release_date,
        }
    }
}

/// Trait for registry adapters
#[async_trait]
pub trait RegistryAdapter: Send + Sync {
    /// Get the ecosystem this adapter handles
    fn ecosystem(&self) -> Ecosystem;

    /// Get the registry name used in error messages
    fn registry_name(&self) -> &'static str {
        self.ecosystem().registry_name()
    }

    /// Fetch the latest version and its release time for a package
    async fn fetch_release(&self, package: &str) -> Result<ReleaseInfo, RegistryError>;
}

/// Create a registry adapter for the given ecosystem
pub fn create_adapter(ecosystem: Ecosystem, client: HttpClient) -> Box<dyn RegistryAdapter> {
    match ecosystem {
        Ecosystem::Pypi => Box::new(PyPIAdapter::new(client)),
        Ecosystem::Npm => Box::new(NpmAdapter::new(client)),
    }
}

/// Parse a registry timestamp.
///
/// Accepts RFC 3339 (`Z` or numeric offset), naive ISO-8601 date-times
/// (taken as UTC) with a `T` or space separator and optional fractional
/// seconds, and bare dates (midnight UTC). Anything else yields `None`.
pub fn parse_release_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let with_t = raw.replacen(' ', "T", 1);
    if let Ok(dt) = DateTime::parse_from_rfc3339(&with_t) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&with_t, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
