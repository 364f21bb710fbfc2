//! Manifest file detection and parsing
//!
//! This module provides functionality to:
//! - Resolve a target path into the manifests to audit
//! - Parse dependencies from requirements.txt, pyproject.toml and package.json

mod detector;
mod package_json;
mod pyproject_toml;
mod requirements_txt;

pub use detector::{detect_manifests, resolve_target, ManifestInfo, Target};
pub use package_json::PackageJsonParser;
pub use pyproject_toml::PyprojectTomlParser;
pub use requirements_txt::RequirementsTxtParser;

use crate::domain::RawDependency;
use crate::error::ManifestError;
use std::fmt;
use std::path::Path;

/// Supported manifest formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManifestKind {
    /// Plain requirement list (`requirements.txt`)
    RequirementsTxt,
    /// Project metadata file (`pyproject.toml`)
    PyprojectToml,
    /// JSON package manifest (`package.json`)
    PackageJson,
}

impl ManifestKind {
    /// Returns all kinds in directory probe order
    pub fn all() -> &'static [ManifestKind] {
        &[
            ManifestKind::RequirementsTxt,
            ManifestKind::PyprojectToml,
            ManifestKind::PackageJson,
        ]
    }

    /// Returns the conventional file name
    pub fn filename(&self) -> &'static str {
        match self {
            ManifestKind::RequirementsTxt => "requirements.txt",
            ManifestKind::PyprojectToml => "pyproject.toml",
            ManifestKind::PackageJson => "package.json",
        }
    }

    /// Infer the kind of a single file: exact file name first, then extension
    pub fn from_path(path: &Path) -> Option<ManifestKind> {
        let file_name = path.file_name().and_then(|n| n.to_str())?;
        if let Some(kind) = Self::all().iter().find(|k| k.filename() == file_name) {
            return Some(*kind);
        }

        match path.extension().and_then(|e| e.to_str()) {
            Some("txt") => Some(ManifestKind::RequirementsTxt),
            Some("toml") => Some(ManifestKind::PyprojectToml),
            Some("json") => Some(ManifestKind::PackageJson),
            _ => None,
        }
    }
}

impl fmt::Display for ManifestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.filename())
    }
}

/// Trait for parsing manifest files
pub trait ManifestParser {
    /// Parse dependencies from manifest content
    fn parse(&self, content: &str) -> Result<Vec<RawDependency>, ManifestError>;

    /// Returns the manifest kind this parser handles
    fn kind(&self) -> ManifestKind;
}

/// Get a manifest parser for the specified kind
pub fn get_parser(kind: ManifestKind) -> Box<dyn ManifestParser> {
    match kind {
        ManifestKind::RequirementsTxt => Box::new(RequirementsTxtParser),
        ManifestKind::PyprojectToml => Box::new(PyprojectTomlParser),
        ManifestKind::PackageJson => Box::new(PackageJsonParser),
    }
}

/// Read and parse a manifest file
pub fn parse_manifest(path: &Path, kind: ManifestKind) -> Result<Vec<RawDependency>, ManifestError> {
    let content =
        std::fs::read_to_string(path).map_err(|e| ManifestError::read_error(path, e))?;

    get_parser(kind)
        .parse(&content)
        .map_err(|e| e.with_path(path))
}
