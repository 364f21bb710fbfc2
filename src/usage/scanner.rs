//! Python import scanner
//!
//! Walks a source tree and parses every `.py` file with tree-sitter,
//! collecting the top-level module of each absolute import.

use super::ImportSet;
use ignore::WalkBuilder;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use tree_sitter::{Node, Parser};

/// Directory names pruned from the walk (virtualenvs, caches, build output)
pub const DEFAULT_SKIP_DIRS: &[&str] = &[
    "venv",
    ".venv",
    "env",
    ".env",
    "node_modules",
    "__pycache__",
    ".git",
    "site-packages",
    "dist",
    "build",
    ".tox",
    ".nox",
    "eggs",
    ".eggs",
    "buck-out",
];

/// Collects imports from Python sources under a root directory
#[derive(Debug, Clone)]
pub struct ImportScanner {
    skip_dirs: Arc<HashSet<String>>,
}

impl Default for ImportScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl ImportScanner {
    /// Create a scanner with the default skip set
    pub fn new() -> Self {
        Self::with_skip_dirs(DEFAULT_SKIP_DIRS.iter().copied())
    }

    /// Create a scanner with a custom skip set
    pub fn with_skip_dirs<I, S>(dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            skip_dirs: Arc::new(dirs.into_iter().map(Into::into).collect()),
        }
    }

    /// Collect the top-level module names imported anywhere under `root`.
    ///
    /// Files that cannot be read or do not parse cleanly are skipped.
    pub fn collect_imports(&self, root: &Path) -> ImportSet {
        let mut imports = ImportSet::new();

        let mut parser = Parser::new();
        if let Err(e) = parser.set_language(&tree_sitter_python::LANGUAGE.into()) {
            tracing::warn!("python grammar unavailable, skipping import scan: {}", e);
            return imports;
        }

        let skip_dirs = Arc::clone(&self.skip_dirs);
        let walker = WalkBuilder::new(root)
            .standard_filters(false)
            .filter_entry(move |entry| {
                entry.depth() == 0
                    || !entry
                        .file_name()
                        .to_str()
                        .is_some_and(|name| skip_dirs.contains(name))
            })
            .build();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!("walk error: {}", e);
                    continue;
                }
            };

            let path = entry.path();
            let is_file = entry.file_type().is_some_and(|t| t.is_file());
            if !is_file || path.extension().and_then(|ext| ext.to_str()) != Some("py") {
                continue;
            }

            let bytes = match std::fs::read(path) {
                Ok(bytes) => bytes,
                Err(e) => {
                    tracing::debug!("skipping unreadable {}: {}", path.display(), e);
                    continue;
                }
            };
            let source = String::from_utf8_lossy(&bytes);

            if !collect_from_source(&mut parser, &source, &mut imports) {
                tracing::debug!("skipping {}: syntax error", path.display());
            }
        }

        tracing::debug!("found {} distinct imports under {}", imports.len(), root.display());
        imports
    }
}

/// Parse one source file and add its imports. Returns false on a parse failure.
fn collect_from_source(parser: &mut Parser, source: &str, imports: &mut ImportSet) -> bool {
    let Some(tree) = parser.parse(source, None) else {
        return false;
    };
    let root = tree.root_node();
    if root.has_error() {
        return false;
    }

    let bytes = source.as_bytes();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        match node.kind() {
            "import_statement" => {
                let mut cursor = node.walk();
                for target in node.children_by_field_name("name", &mut cursor) {
                    let dotted = match target.kind() {
                        "aliased_import" => target.child_by_field_name("name"),
                        "dotted_name" => Some(target),
                        _ => None,
                    };
                    if let Some(top) = dotted.and_then(|n| top_level(n, bytes)) {
                        imports.insert(top);
                    }
                }
            }
            "import_from_statement" => {
                // relative imports carry a `relative_import` node and are ignored
                if let Some(module) = node.child_by_field_name("module_name") {
                    if module.kind() == "dotted_name" {
                        if let Some(top) = top_level(module, bytes) {
                            imports.insert(top);
                        }
                    }
                }
            }
            "future_import_statement" => imports.insert("__future__"),
            _ => {
                let mut cursor = node.walk();
                stack.extend(node.children(&mut cursor));
            }
        }
    }

    true
}

fn top_level(node: Node<'_>, source: &[u8]) -> Option<String> {
    let text = node.utf8_text(source).ok()?;
    let first = text.split('.').next()?.trim();
    (!first.is_empty()).then(|| first.to_string())
}
