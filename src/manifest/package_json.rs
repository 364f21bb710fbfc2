//! package.json parser for Node.js projects
//!
//! Handles, in this order:
//! - dependencies
//! - devDependencies
//! - peerDependencies

use crate::domain::RawDependency;
use crate::error::ManifestError;
use crate::manifest::{ManifestKind, ManifestParser};
use serde_json::Value;
use std::path::PathBuf;

/// Dependency sections read from package.json
const SECTIONS: &[&str] = &["dependencies", "devDependencies", "peerDependencies"];

/// Parser for package.json files
pub struct PackageJsonParser;

impl ManifestParser for PackageJsonParser {
    fn parse(&self, content: &str) -> Result<Vec<RawDependency>, ManifestError> {
        let json: Value =
            serde_json::from_str(content).map_err(|e| ManifestError::JsonParseError {
                path: PathBuf::from("package.json"),
                message: e.to_string(),
            })?;

        let dependencies = SECTIONS
            .iter()
            .filter_map(|section| json.get(*section).and_then(Value::as_object))
            .flatten()
            .map(|(name, version)| RawDependency::npm(name.clone(), npm_pin(version)))
            .collect();

        Ok(dependencies)
    }

    fn kind(&self) -> ManifestKind {
        ManifestKind::PackageJson
    }
}

/// `*`, `latest`, empty and non-string specs are unpinned
fn npm_pin(version: &Value) -> Option<String> {
    match version.as_str()? {
        "" | "*" | "latest" => None,
        spec => Some(spec.to_string()),
    }
}
