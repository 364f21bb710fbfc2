//! Staleness scoring based on the age of the latest release

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Default number of days after which a release counts as stale
pub const DEFAULT_STALE_DAYS: i64 = 365;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Severity tier for the age of a package's latest release
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Staleness {
    /// Release date unavailable
    Unknown,
    /// Released within the stale threshold
    Fresh,
    /// At or past the stale threshold
    Stale,
    /// At or past the very-stale threshold
    VeryStale,
}

impl Staleness {
    /// Get the plain label
    pub fn as_str(&self) -> &'static str {
        match self {
            Staleness::Unknown => "unknown",
            Staleness::Fresh => "fresh",
            Staleness::Stale => "stale",
            Staleness::VeryStale => "very-stale",
        }
    }
}

impl fmt::Display for Staleness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Day thresholds for the stale and very-stale tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StalenessThresholds {
    /// Days at which a release becomes stale
    pub stale_days: i64,
    /// Days at which a release becomes very stale
    pub very_stale_days: i64,
}

impl StalenessThresholds {
    /// Create thresholds with very-stale at twice the stale threshold
    pub fn new(stale_days: i64) -> Self {
        Self {
            stale_days,
            very_stale_days: stale_days.saturating_mul(2),
        }
    }

    /// Override the very-stale threshold
    pub fn with_very_stale(mut self, very_stale_days: i64) -> Self {
        self.very_stale_days = very_stale_days;
        self
    }

    /// Classify an age in days
    pub fn classify(&self, days: Option<i64>) -> Staleness {
        match days {
            None => Staleness::Unknown,
            Some(d) if d >= self.very_stale_days => Staleness::VeryStale,
            Some(d) if d >= self.stale_days => Staleness::Stale,
            Some(_) => Staleness::Fresh,
        }
    }
}

impl Default for StalenessThresholds {
    fn default() -> Self {
        Self::new(DEFAULT_STALE_DAYS)
    }
}

/// Whole days elapsed between `last_release` and `now`, rounded down.
pub fn age_days(last_release: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    now.signed_duration_since(last_release)
        .num_seconds()
        .div_euclid(SECONDS_PER_DAY)
}
