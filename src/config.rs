//! Run configuration
//!
//! `AuditConfig` carries everything one audit needs. The CLI builds it from
//! arguments; library callers can start from `AuditConfig::new(path)`.

use crate::error::ConfigError;
use crate::health::StalenessThresholds;
use std::path::PathBuf;

/// Default number of concurrent registry lookups
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Configuration for one audit run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditConfig {
    /// Project directory or single manifest file
    pub path: PathBuf,
    /// Staleness thresholds
    pub thresholds: StalenessThresholds,
    /// Whether to scan Python sources for imports
    pub check_imports: bool,
    /// Maximum concurrent registry lookups
    pub concurrency: usize,
}

impl AuditConfig {
    /// Create a configuration with defaults for the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            thresholds: StalenessThresholds::default(),
            check_imports: true,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Set the staleness thresholds
    pub fn with_thresholds(mut self, thresholds: StalenessThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Enable or disable the import scan
    pub fn with_import_check(mut self, enabled: bool) -> Self {
        self.check_imports = enabled;
        self
    }

    /// Set the lookup concurrency
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Check option consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.concurrency == 0 {
            return Err(ConfigError::InvalidConcurrency {
                value: self.concurrency,
            });
        }

        let StalenessThresholds {
            stale_days,
            very_stale_days,
        } = self.thresholds;
        if stale_days < 1 {
            return Err(ConfigError::InvalidThreshold {
                message: format!("stale days must be at least 1, got {}", stale_days),
            });
        }
        if very_stale_days < stale_days {
            return Err(ConfigError::InvalidThreshold {
                message: format!(
                    "very-stale days ({}) must not be below stale days ({})",
                    very_stale_days, stale_days
                ),
            });
        }

        Ok(())
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self::new(".")
    }
}
