//! Static usage detection for Python dependencies
//!
//! This module provides:
//! - A scanner that collects top-level imports from Python sources
//! - A resolver that matches declared package names against those imports

mod resolver;
mod scanner;

pub use resolver::{is_imported, is_imported_with, DEFAULT_ALIASES};
pub use scanner::{ImportScanner, DEFAULT_SKIP_DIRS};

use crate::domain::normalize;
use std::collections::{BTreeSet, HashSet};

/// Top-level module names imported anywhere in a source tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSet {
    /// Names as written in source
    names: BTreeSet<String>,
    /// Normalized view used for lookups
    normalized: HashSet<String>,
}

impl ImportSet {
    /// Create an empty import set
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an import set from module names
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new();
        for name in names {
            set.insert(name);
        }
        set
    }

    /// Add a module name
    pub fn insert(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.normalized.insert(normalize(&name));
        self.names.insert(name);
    }

    /// Returns true if `key` (already normalized) was imported
    pub fn contains_normalized(&self, key: &str) -> bool {
        self.normalized.contains(key)
    }

    /// Number of distinct module names
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if no imports were found
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate over module names in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}
