//! Per-dependency health records
//!
//! A record is either fully assessed (registry data plus drift and staleness
//! classification) or failed with a single error message. The two shapes are
//! variants of one enum, so a record can never carry both or neither.

use super::{Ecosystem, RawDependency};
use crate::health::{Staleness, VersionStatus};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Final output record for one dependency
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyHealth {
    /// Package name as declared
    pub name: String,
    /// Ecosystem of the package
    pub ecosystem: Ecosystem,
    /// Declared pin or constraint
    pub pinned_version: Option<String>,
    /// Assessment or failure
    #[serde(flatten)]
    pub outcome: HealthOutcome,
}

/// Outcome of assessing a dependency
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum HealthOutcome {
    /// Registry lookup succeeded
    Assessed(Assessment),
    /// Registry lookup failed
    Failed {
        /// Human-readable failure reason
        error: String,
    },
}

/// Registry-derived health data for a dependency
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assessment {
    /// Latest published version
    pub latest_version: String,
    /// Upload time of the latest version, when the registry reports one
    pub last_release_date: Option<DateTime<Utc>>,
    /// Whole days since `last_release_date`
    pub days_since_update: Option<i64>,
    /// Drift between the pin and the latest version
    pub version_status: VersionStatus,
    /// Severity tier derived from `days_since_update`
    pub staleness: Staleness,
    /// Whether the package is imported by project sources (PyPI only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imported: Option<bool>,
}

impl DependencyHealth {
    /// Creates an assessed record
    pub fn assessed(dependency: &RawDependency, assessment: Assessment) -> Self {
        Self {
            name: dependency.name.clone(),
            ecosystem: dependency.ecosystem,
            pinned_version: dependency.pinned_version.clone(),
            outcome: HealthOutcome::Assessed(assessment),
        }
    }

    /// Creates a failed record
    pub fn failed(dependency: &RawDependency, error: impl Into<String>) -> Self {
        Self {
            name: dependency.name.clone(),
            ecosystem: dependency.ecosystem,
            pinned_version: dependency.pinned_version.clone(),
            outcome: HealthOutcome::Failed {
                error: error.into(),
            },
        }
    }

    /// Returns the assessment if the lookup succeeded
    pub fn assessment(&self) -> Option<&Assessment> {
        match &self.outcome {
            HealthOutcome::Assessed(assessment) => Some(assessment),
            HealthOutcome::Failed { .. } => None,
        }
    }

    /// Returns the failure message if the lookup failed
    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            HealthOutcome::Assessed(_) => None,
            HealthOutcome::Failed { error } => Some(error),
        }
    }

    /// Returns true if the lookup failed
    pub fn is_error(&self) -> bool {
        self.error().is_some()
    }

    /// Days since the latest release, if known
    pub fn days_since_update(&self) -> Option<i64> {
        self.assessment().and_then(|a| a.days_since_update)
    }

    /// Staleness tier; failed records are `Unknown`
    pub fn staleness(&self) -> Staleness {
        self.assessment()
            .map(|a| a.staleness)
            .unwrap_or(Staleness::Unknown)
    }

    /// Usage flag, if it was resolved
    pub fn imported(&self) -> Option<bool> {
        self.assessment().and_then(|a| a.imported)
    }
}
