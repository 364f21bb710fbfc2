//! Raw dependency declarations

use super::{normalize, Ecosystem};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A dependency as declared in a manifest, before any registry lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDependency {
    /// Package name exactly as declared
    pub name: String,
    /// Exact pin or best available constraint, if any
    pub pinned_version: Option<String>,
    /// The ecosystem this dependency belongs to
    pub ecosystem: Ecosystem,
}

/// Deduplication key: normalized name plus ecosystem
pub type DependencyKey = (String, Ecosystem);

impl RawDependency {
    /// Creates a new dependency declaration
    pub fn new(
        name: impl Into<String>,
        pinned_version: Option<String>,
        ecosystem: Ecosystem,
    ) -> Self {
        Self {
            name: name.into(),
            pinned_version,
            ecosystem,
        }
    }

    /// Creates a PyPI dependency
    pub fn pypi(name: impl Into<String>, pinned_version: Option<String>) -> Self {
        Self::new(name, pinned_version, Ecosystem::Pypi)
    }

    /// Creates an npm dependency
    pub fn npm(name: impl Into<String>, pinned_version: Option<String>) -> Self {
        Self::new(name, pinned_version, Ecosystem::Npm)
    }

    /// Returns the key used to collapse duplicate declarations
    pub fn key(&self) -> DependencyKey {
        (normalize(&self.name), self.ecosystem)
    }
}

impl fmt::Display for RawDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.pinned_version {
            Some(pin) => write!(f, "{}@{} [{}]", self.name, pin, self.ecosystem),
            None => write!(f, "{} [{}]", self.name, self.ecosystem),
        }
    }
}

/// Remove duplicate declarations, keeping the first occurrence of each key.
pub fn dedupe(dependencies: Vec<RawDependency>) -> Vec<RawDependency> {
    let mut seen: HashSet<DependencyKey> = HashSet::new();
    dependencies
        .into_iter()
        .filter(|dep| seen.insert(dep.key()))
        .collect()
}
