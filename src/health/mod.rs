//! Health assessment for dependencies
//!
//! This module provides:
//! - Version drift classification (pin vs latest release)
//! - Staleness scoring from the latest release date
//! - The assessor that turns registry data into health records

mod drift;
mod staleness;

pub use drift::{classify, parse_version, ReleaseVersion, VersionStatus};
pub use staleness::{age_days, Staleness, StalenessThresholds, DEFAULT_STALE_DAYS};

use crate::domain::{Assessment, DependencyHealth, Ecosystem, RawDependency};
use crate::error::RegistryError;
use crate::registry::ReleaseInfo;
use crate::usage::{is_imported, ImportSet};
use chrono::{DateTime, Utc};

/// Assessment engine that turns registry data into health records
pub struct HealthAssessor {
    /// Staleness thresholds
    thresholds: StalenessThresholds,
    /// Current time for age calculations
    now: DateTime<Utc>,
}

impl HealthAssessor {
    /// Create a new assessor using the current time
    pub fn new(thresholds: StalenessThresholds) -> Self {
        Self {
            thresholds,
            now: Utc::now(),
        }
    }

    /// Create a new assessor with a custom current time (for testing)
    pub fn with_time(thresholds: StalenessThresholds, now: DateTime<Utc>) -> Self {
        Self { thresholds, now }
    }

    /// Build the record for one dependency from its registry lookup result.
    ///
    /// `imports` is `None` when usage checking is disabled; usage is only
    /// resolved for PyPI dependencies.
    pub fn evaluate(
        &self,
        dependency: &RawDependency,
        lookup: &Result<ReleaseInfo, RegistryError>,
        imports: Option<&ImportSet>,
    ) -> DependencyHealth {
        match lookup {
            Ok(release) => {
                DependencyHealth::assessed(dependency, self.assess(dependency, release, imports))
            }
            Err(e) => DependencyHealth::failed(dependency, e.to_string()),
        }
    }

    /// Assess a dependency against successful registry data
    pub fn assess(
        &self,
        dependency: &RawDependency,
        release: &ReleaseInfo,
        imports: Option<&ImportSet>,
    ) -> Assessment {
        let days_since_update = release
            .last_release_date
            .map(|released| age_days(released, self.now));

        let imported = match (dependency.ecosystem, imports) {
            (Ecosystem::Pypi, Some(imports)) => Some(is_imported(&dependency.name, imports)),
            _ => None,
        };

        Assessment {
            latest_version: release.latest_version.clone(),
            last_release_date: release.last_release_date,
            days_since_update,
            version_status: classify(
                dependency.pinned_version.as_deref(),
                &release.latest_version,
            ),
            staleness: self.thresholds.classify(days_since_update),
            imported,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn assessor() -> HealthAssessor {
        HealthAssessor::with_time(StalenessThresholds::default(), fixed_time())
    }

    fn release(version: &str, days_ago: Option<i64>) -> ReleaseInfo {
        ReleaseInfo::new(version, days_ago.map(|d| fixed_time() - Duration::days(d)))
    }

    #[test]
    fn test_assess_stale_major() {
        let dep = RawDependency::pypi("requests", Some("1.0.0".to_string()));
        let assessment = assessor().assess(&dep, &release("2.31.0", Some(400)), None);

        assert_eq!(assessment.days_since_update, Some(400));
        assert_eq!(assessment.staleness, Staleness::Stale);
        assert!(assessment.version_status.is_major());
        assert_eq!(assessment.imported, None);
    }

    #[test]
    fn test_assess_without_release_date() {
        let dep = RawDependency::npm("left-pad", None);
        let assessment = assessor().assess(&dep, &release("1.3.0", None), None);

        assert_eq!(assessment.days_since_update, None);
        assert_eq!(assessment.staleness, Staleness::Unknown);
        assert_eq!(assessment.version_status, VersionStatus::Unpinned);
    }

    #[test]
    fn test_assess_resolves_usage_for_pypi_only() {
        let imports = ImportSet::from_names(["PIL"]);

        let pillow = RawDependency::pypi("Pillow", None);
        let assessment = assessor().assess(&pillow, &release("10.0.0", Some(5)), Some(&imports));
        assert_eq!(assessment.imported, Some(true));

        let unused = RawDependency::pypi("numpy", None);
        let assessment = assessor().assess(&unused, &release("1.26.0", Some(5)), Some(&imports));
        assert_eq!(assessment.imported, Some(false));

        let npm = RawDependency::npm("react", None);
        let assessment = assessor().assess(&npm, &release("18.2.0", Some(5)), Some(&imports));
        assert_eq!(assessment.imported, None);
    }

    #[test]
    fn test_evaluate_failed_lookup() {
        let dep = RawDependency::pypi("ghost", None);
        let lookup = Err(RegistryError::package_not_found("ghost", "PyPI"));
        let record = assessor().evaluate(&dep, &lookup, None);
        assert_eq!(record.error(), Some("not found on PyPI"));
    }
}
