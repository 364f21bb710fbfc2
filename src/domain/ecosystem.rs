//! Ecosystem type definitions for supported package registries

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported packaging ecosystems
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ecosystem {
    /// Python packages published on PyPI
    Pypi,
    /// JavaScript packages published on npm
    Npm,
}

impl Ecosystem {
    /// Returns the registry display name for this ecosystem
    pub fn registry_name(&self) -> &'static str {
        match self {
            Ecosystem::Pypi => "PyPI",
            Ecosystem::Npm => "npm",
        }
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.registry_name())
    }
}
