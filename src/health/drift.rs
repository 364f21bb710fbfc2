//! Version drift classification
//!
//! Compares a declared pin or constraint against the latest published
//! version and reports how far behind the pin is.

use regex::Regex;
use semver::Version;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

// First run of digits and dots inside a constraint such as ">=2.28.0,<3"
static VERSION_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d[\d.]*").unwrap());

/// Relationship between a pinned version and the latest release
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionStatus {
    /// Pin matches (or is ahead of) the latest release
    UpToDate,
    /// No usable version in the declaration
    Unpinned,
    /// Major component differs
    Major { from: String, to: String },
    /// Minor component differs
    Minor { from: String, to: String },
    /// Only patch (or later) components differ
    Patch { from: String, to: String },
    /// Versions are not comparable and differ literally
    Behind { from: String, to: String },
}

impl VersionStatus {
    /// Get the plain category label
    pub fn label(&self) -> &'static str {
        match self {
            VersionStatus::UpToDate => "up-to-date",
            VersionStatus::Unpinned => "unpinned",
            VersionStatus::Major { .. } => "major",
            VersionStatus::Minor { .. } => "minor",
            VersionStatus::Patch { .. } => "patch",
            VersionStatus::Behind { .. } => "behind",
        }
    }

    /// Returns true for a major-version gap
    pub fn is_major(&self) -> bool {
        matches!(self, VersionStatus::Major { .. })
    }
}

impl fmt::Display for VersionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionStatus::UpToDate | VersionStatus::Unpinned => write!(f, "{}", self.label()),
            VersionStatus::Major { from, to }
            | VersionStatus::Minor { from, to }
            | VersionStatus::Patch { from, to }
            | VersionStatus::Behind { from, to } => {
                write!(f, "{} ({} → {})", self.label(), from, to)
            }
        }
    }
}

impl Serialize for VersionStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Classify the drift between a pinned constraint and the latest version.
///
/// A pin that is newer than the latest release (for example a pre-release
/// ahead of the stable line) is reported as up to date.
pub fn classify(pinned: Option<&str>, latest: &str) -> VersionStatus {
    let Some(pinned) = pinned else {
        return VersionStatus::Unpinned;
    };
    let Some(found) = VERSION_RUN_RE.find(pinned) else {
        return VersionStatus::Unpinned;
    };
    let candidate = found.as_str();

    let (from, to) = (candidate.to_string(), latest.to_string());
    match compare(candidate, latest) {
        Some(Gap { ordering, major, minor }) => match ordering {
            Ordering::Equal | Ordering::Greater => VersionStatus::UpToDate,
            Ordering::Less if major => VersionStatus::Major { from, to },
            Ordering::Less if minor => VersionStatus::Minor { from, to },
            Ordering::Less => VersionStatus::Patch { from, to },
        },
        None if candidate == latest => VersionStatus::UpToDate,
        None => VersionStatus::Behind { from, to },
    }
}

/// Outcome of comparing two parsed versions
struct Gap {
    ordering: Ordering,
    /// Major components differ
    major: bool,
    /// Minor components differ
    minor: bool,
}

// semver first, so npm pre-release identifiers keep their own ordering
fn compare(current: &str, newest: &str) -> Option<Gap> {
    if let (Some(c), Some(n)) = (parse_version(current), parse_version(newest)) {
        return Some(Gap {
            ordering: c.cmp(&n),
            major: c.major != n.major,
            minor: c.minor != n.minor,
        });
    }

    let (c, n) = (ReleaseVersion::parse(current)?, ReleaseVersion::parse(newest)?);
    Some(Gap {
        ordering: c.cmp(&n),
        major: c.major() != n.major(),
        minor: c.minor() != n.minor(),
    })
}

/// Parse a version leniently: strict semver first, then purely numeric
/// versions with one or two components padded with zeros.
pub fn parse_version(raw: &str) -> Option<Version> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);

    if let Ok(version) = Version::parse(trimmed) {
        return Some(version);
    }

    let mut parts: Vec<&str> = trimmed.split('.').collect();
    let numeric = parts
        .iter()
        .all(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()));
    if !numeric || parts.len() >= 3 {
        return None;
    }
    parts.resize(3, "0");
    Version::parse(&parts.join(".")).ok()
}

// PEP 440 public version, accepting the usual spelling variants
static PEP440_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)^v?
        (?P<release>\d+(?:\.\d+)*)
        (?:[-_.]?(?P<pre_l>alpha|a|beta|b|preview|pre|c|rc)[-_.]?(?P<pre_n>\d+)?)?
        (?:-(?P<post_n1>\d+)|[-_.]?(?P<post_l>post|rev|r)[-_.]?(?P<post_n2>\d+)?)?
        (?:[-_.]?(?P<dev_l>dev)[-_.]?(?P<dev_n>\d+)?)?
        (?:\+[a-z0-9]+(?:[-_.][a-z0-9]+)*)?$",
    )
    .unwrap()
});

/// A Python package version ordered by PEP 440 rules.
///
/// Release segments may have any length; leading zeros are dropped and
/// missing trailing segments compare as zero, so `2024.02.02` equals
/// `2024.2.2` and `1.0.0.0` equals `1.0`. Local labels are ignored.
#[derive(Debug, Clone)]
pub struct ReleaseVersion {
    release: Vec<u64>,
    /// Phase rank (a, b, rc) and number
    pre: Option<(u8, u64)>,
    post: Option<u64>,
    dev: Option<u64>,
}

impl ReleaseVersion {
    /// Parse a PEP 440 version, returning `None` for anything else
    pub fn parse(raw: &str) -> Option<Self> {
        let caps = PEP440_RE.captures(raw.trim())?;
        let number = |name: &str| -> Option<Option<u64>> {
            match caps.name(name) {
                Some(m) => m.as_str().parse().ok().map(Some),
                None => Some(None),
            }
        };

        let release = caps
            .name("release")?
            .as_str()
            .split('.')
            .map(|segment| segment.parse().ok())
            .collect::<Option<Vec<u64>>>()?;

        let pre = match caps.name("pre_l") {
            Some(label) => {
                let rank = match label.as_str().to_ascii_lowercase().as_str() {
                    "a" | "alpha" => 0,
                    "b" | "beta" => 1,
                    _ => 2,
                };
                Some((rank, number("pre_n")?.unwrap_or(0)))
            }
            None => None,
        };

        let post = match (number("post_n1")?, caps.name("post_l")) {
            (Some(n), _) => Some(n),
            (None, Some(_)) => Some(number("post_n2")?.unwrap_or(0)),
            (None, None) => None,
        };

        let dev = match caps.name("dev_l") {
            Some(_) => Some(number("dev_n")?.unwrap_or(0)),
            None => None,
        };

        Some(Self {
            release,
            pre,
            post,
            dev,
        })
    }

    /// First release segment
    pub fn major(&self) -> u64 {
        self.segment(0)
    }

    /// Second release segment, zero when absent
    pub fn minor(&self) -> u64 {
        self.segment(1)
    }

    fn segment(&self, index: usize) -> u64 {
        self.release.get(index).copied().unwrap_or(0)
    }

    // dev-only releases sort before pre-releases, which sort before finals;
    // a missing post sorts first and a missing dev sorts last
    fn suffix_key(&self) -> ((u8, u8, u64), Option<u64>, (bool, u64)) {
        let pre = match (self.pre, self.post, self.dev) {
            (Some((rank, n)), _, _) => (1, rank, n),
            (None, None, Some(_)) => (0, 0, 0),
            (None, _, _) => (2, 0, 0),
        };
        let dev = match self.dev {
            Some(n) => (false, n),
            None => (true, 0),
        };
        (pre, self.post, dev)
    }
}

impl Ord for ReleaseVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.release.len().max(other.release.len());
        (0..len)
            .map(|i| self.segment(i).cmp(&other.segment(i)))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.suffix_key().cmp(&other.suffix_key()))
    }
}

impl PartialOrd for ReleaseVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ReleaseVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ReleaseVersion {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_pin_up_to_date() {
        assert_eq!(classify(Some("==2.28.0"), "2.28.0"), VersionStatus::UpToDate);
    }

    #[test]
    fn test_major_behind() {
        let status = classify(Some("==1.0.0"), "2.0.0");
        assert!(status.to_string().starts_with("major"));
        assert!(status.is_major());
    }

    #[test]
    fn test_minor_behind() {
        let status = classify(Some("1.2.0"), "1.4.1");
        assert_eq!(status.to_string(), "minor (1.2.0 → 1.4.1)");
    }

    #[test]
    fn test_patch_behind() {
        let status = classify(Some("==2.0.0"), "2.0.5");
        assert!(status.to_string().starts_with("patch"));
    }

    #[test]
    fn test_unpinned() {
        assert_eq!(classify(None, "2.0.0"), VersionStatus::Unpinned);
        assert_eq!(classify(Some("latest"), "2.0.0"), VersionStatus::Unpinned);
        assert_eq!(classify(Some(""), "2.0.0"), VersionStatus::Unpinned);
    }

    #[test]
    fn test_operator_constraint_uses_first_version() {
        let status = classify(Some(">=2.0,<3"), "2.31.0");
        assert_eq!(status.to_string(), "minor (2.0 → 2.31.0)");
    }

    #[test]
    fn test_npm_caret_range() {
        let status = classify(Some("^4.17.21"), "4.17.21");
        assert_eq!(status, VersionStatus::UpToDate);
    }

    #[test]
    fn test_short_versions_are_padded() {
        assert_eq!(classify(Some("==1.0"), "1.0.0"), VersionStatus::UpToDate);
        assert!(classify(Some("1"), "2.0").is_major());
    }

    #[test]
    fn test_ahead_of_latest_is_up_to_date() {
        assert_eq!(classify(Some("==3.0.0"), "2.9.9"), VersionStatus::UpToDate);
    }

    #[test]
    fn test_unparseable_falls_back_to_literal_comparison() {
        assert_eq!(classify(Some("==1..2"), "1..2"), VersionStatus::UpToDate);
        assert_eq!(
            classify(Some("==1.0"), "nightly").to_string(),
            "behind (1.0 → nightly)"
        );
    }

    #[test]
    fn test_leading_zeros_are_insignificant() {
        assert_eq!(
            classify(Some("==2024.02.02"), "2024.2.2"),
            VersionStatus::UpToDate
        );
        assert_eq!(
            classify(Some("2024.02.02"), "2024.7.4").to_string(),
            "minor (2024.02.02 → 2024.7.4)"
        );
    }

    #[test]
    fn test_post_release_is_patch() {
        assert_eq!(
            classify(Some("==1.2.3"), "1.2.3.post1").to_string(),
            "patch (1.2.3 → 1.2.3.post1)"
        );
    }

    #[test]
    fn test_pre_release_latest() {
        assert_eq!(classify(Some("==2.0.0"), "2.1.0rc1").label(), "minor");
        assert_eq!(classify(Some("==3.0"), "3.0rc1"), VersionStatus::UpToDate);
    }

    #[test]
    fn test_four_segment_versions() {
        assert_eq!(classify(Some("==1.0.0.0"), "1.0.0"), VersionStatus::UpToDate);
        assert_eq!(classify(Some("==1.2.3.4"), "1.2.3.5").label(), "patch");
        assert_eq!(classify(Some("==1.2.3.4"), "2.0").label(), "major");
    }

    #[test]
    fn test_npm_prerelease_uses_semver_ordering() {
        assert_eq!(classify(Some("^2.0.0"), "2.0.0-next.3"), VersionStatus::UpToDate);
        assert_eq!(classify(Some("1.9.0"), "2.0.0-next.3").label(), "major");
    }

    #[test]
    fn test_release_version_ordering() {
        let v = |s: &str| ReleaseVersion::parse(s).unwrap();
        assert!(v("1.0.dev1") < v("1.0a1"));
        assert!(v("1.0a1") < v("1.0b2"));
        assert!(v("1.0b2") < v("1.0rc1"));
        assert!(v("1.0rc1") < v("1.0"));
        assert!(v("1.0") < v("1.0.post1"));
        assert!(v("1.0.post1.dev2") < v("1.0.post1"));
        assert_eq!(v("v1.0+ubuntu.1"), v("1.0"));
        assert_eq!(v("1.0-1"), v("1.0.post1"));
        assert_eq!(v("2024.02.02").minor(), 2);
        assert!(ReleaseVersion::parse("1.0.0-next.3").is_none());
        assert!(ReleaseVersion::parse("nightly").is_none());
    }

    #[test]
    fn test_parse_version_lenient() {
        assert_eq!(parse_version("v1.2.3"), Some(Version::new(1, 2, 3)));
        assert_eq!(parse_version("7"), Some(Version::new(7, 0, 0)));
        assert_eq!(parse_version("1.2"), Some(Version::new(1, 2, 0)));
        assert_eq!(parse_version("1."), None);
        assert_eq!(parse_version("1.2.3.4"), None);
    }

    #[test]
    fn test_classify_is_total_over_parseable_pairs() {
        let versions = ["0.1.0", "1.0.0", "1.0.1", "1.2.0", "2.0.0", "10.4.7"];
        for pinned in versions {
            for latest in versions {
                let status = classify(Some(pinned), latest);
                assert!(matches!(
                    status.label(),
                    "up-to-date" | "unpinned" | "major" | "minor" | "patch"
                ));
            }
        }
    }

    #[test]
    fn test_serialize_as_display_string() {
        let status = VersionStatus::Patch {
            from: "2.0.0".to_string(),
            to: "2.0.5".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&status).unwrap(),
            "\"patch (2.0.0 → 2.0.5)\""
        );
    }
}
