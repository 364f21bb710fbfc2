//! pyproject.toml parser for Python projects
//!
//! Handles, in this order:
//! - project.dependencies (PEP 621)
//! - tool.poetry.dependencies (Poetry)
//! - project.optional-dependencies (PEP 621)

use crate::domain::RawDependency;
use crate::error::ManifestError;
use crate::manifest::{ManifestKind, ManifestParser};
use crate::parser::parse_requirement;
use std::path::PathBuf;
use toml::{Table, Value};

/// Parser for pyproject.toml files
pub struct PyprojectTomlParser;

impl ManifestParser for PyprojectTomlParser {
    fn parse(&self, content: &str) -> Result<Vec<RawDependency>, ManifestError> {
        let toml: Table = toml::from_str(content).map_err(|e: toml::de::Error| {
            ManifestError::TomlParseError {
                path: PathBuf::from("pyproject.toml"),
                message: e.message().to_string(),
            }
        })?;

        let mut dependencies = Vec::new();
        let project = toml.get("project");

        // Parse PEP 621 project.dependencies
        if let Some(deps) = project
            .and_then(|p| p.get("dependencies"))
            .and_then(|d| d.as_array())
        {
            push_requirements(deps, &mut dependencies);
        }

        // Parse Poetry dependencies
        if let Some(poetry_deps) = toml
            .get("tool")
            .and_then(|t| t.get("poetry"))
            .and_then(|p| p.get("dependencies"))
            .and_then(|d| d.as_table())
        {
            for (name, spec) in poetry_deps {
                // Skip python version requirement
                if name.eq_ignore_ascii_case("python") {
                    continue;
                }
                dependencies.push(RawDependency::pypi(name.clone(), poetry_pin(spec)));
            }
        }

        // Parse PEP 621 project.optional-dependencies
        if let Some(optional) = project
            .and_then(|p| p.get("optional-dependencies"))
            .and_then(|d| d.as_table())
        {
            for deps in optional.values().filter_map(Value::as_array) {
                push_requirements(deps, &mut dependencies);
            }
        }

        Ok(dependencies)
    }

    fn kind(&self) -> ManifestKind {
        ManifestKind::PyprojectToml
    }
}

fn push_requirements(values: &[Value], output: &mut Vec<RawDependency>) {
    for requirement in values
        .iter()
        .filter_map(Value::as_str)
        .filter_map(parse_requirement)
    {
        output.push(RawDependency::pypi(requirement.name, requirement.pinned_version));
    }
}

/// Poetry spec: a version string, or a table whose `version` key is the constraint
fn poetry_pin(spec: &Value) -> Option<String> {
    let version = match spec {
        Value::String(s) => s.as_str(),
        Value::Table(t) => t.get("version").and_then(Value::as_str)?,
        _ => return None,
    };

    match version.trim() {
        "" | "*" => None,
        _ => Some(version.to_string()),
    }
}
