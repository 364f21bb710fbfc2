//! requirements.txt parser for pip projects
//!
//! Skips blank lines, comments, pip options (`-r`, `-e`, `--index-url`)
//! and bare VCS/URL lines.

use crate::domain::RawDependency;
use crate::error::ManifestError;
use crate::manifest::{ManifestKind, ManifestParser};
use crate::parser::parse_requirement;

/// Line prefixes that never declare a named dependency
const SKIP_PREFIXES: &[&str] = &["#", "-", "git+", "http"];

/// Parser for requirements.txt files
pub struct RequirementsTxtParser;

impl ManifestParser for RequirementsTxtParser {
    fn parse(&self, content: &str) -> Result<Vec<RawDependency>, ManifestError> {
        let dependencies = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter(|line| !SKIP_PREFIXES.iter().any(|p| line.starts_with(p)))
            .filter_map(parse_requirement)
            .map(|req| RawDependency::pypi(req.name, req.pinned_version))
            .collect();

        Ok(dependencies)
    }

    fn kind(&self) -> ManifestKind {
        ManifestKind::RequirementsTxt
    }
}
