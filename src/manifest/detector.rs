//! Manifest file detection
//!
//! Resolves the user-supplied path into a project root plus the manifests
//! to audit. A file is audited on its own; a directory is probed for
//! requirements.txt, pyproject.toml and package.json.

use super::ManifestKind;
use crate::error::ConfigError;
use std::path::{Path, PathBuf};

/// A manifest selected for auditing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestInfo {
    /// Path to the manifest file
    pub path: PathBuf,
    /// Format of the manifest
    pub kind: ManifestKind,
}

impl ManifestInfo {
    /// Create a new ManifestInfo
    pub fn new(path: impl Into<PathBuf>, kind: ManifestKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

/// What a run audits: manifests plus the directory scanned for imports
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Project root (the directory, or the manifest's parent)
    pub root: PathBuf,
    /// Manifests in probe order
    pub manifests: Vec<ManifestInfo>,
}

/// Detect the known manifest files directly inside `dir`, in probe order
pub fn detect_manifests(dir: &Path) -> Vec<ManifestInfo> {
    ManifestKind::all()
        .iter()
        .map(|kind| ManifestInfo::new(dir.join(kind.filename()), *kind))
        .filter(|info| info.path.is_file())
        .collect()
}

/// Resolve a target path into a project root and its manifests
pub fn resolve_target(path: &Path) -> Result<Target, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::path_not_found(path));
    }

    if path.is_file() {
        let kind = ManifestKind::from_path(path).ok_or_else(|| ConfigError::UnsupportedManifest {
            path: path.to_path_buf(),
        })?;
        let root = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        return Ok(Target {
            root,
            manifests: vec![ManifestInfo::new(path, kind)],
        });
    }

    let manifests = detect_manifests(path);
    if manifests.is_empty() {
        return Err(ConfigError::no_manifest_found(path));
    }

    Ok(Target {
        root: path.to_path_buf(),
        manifests,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_detect_probe_order() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), "{}").unwrap();
        fs::write(dir.path().join("requirements.txt"), "").unwrap();
        fs::write(dir.path().join("pyproject.toml"), "").unwrap();

        let kinds: Vec<ManifestKind> = detect_manifests(dir.path())
            .into_iter()
            .map(|m| m.kind)
            .collect();
        assert_eq!(kinds, ManifestKind::all().to_vec());
    }

    #[test]
    fn test_resolve_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("requirements.txt"), "flask\n").unwrap();

        let target = resolve_target(dir.path()).unwrap();
        assert_eq!(target.root, dir.path());
        assert_eq!(target.manifests.len(), 1);
        assert_eq!(target.manifests[0].kind, ManifestKind::RequirementsTxt);
    }

    #[test]
    fn test_resolve_single_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("requirements-dev.txt");
        fs::write(&path, "pytest\n").unwrap();
        fs::write(dir.path().join("package.json"), "{}").unwrap();

        let target = resolve_target(&path).unwrap();
        assert_eq!(target.root, dir.path());
        assert_eq!(target.manifests, vec![ManifestInfo::new(&path, ManifestKind::RequirementsTxt)]);
    }

    #[test]
    fn test_resolve_missing_path() {
        let err = resolve_target(Path::new("/definitely/not/here")).unwrap_err();
        assert!(matches!(err, ConfigError::PathNotFound { .. }));
    }

    #[test]
    fn test_resolve_empty_directory() {
        let dir = TempDir::new().unwrap();
        let err = resolve_target(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::NoManifestFound { .. }));
    }

    #[test]
    fn test_resolve_unsupported_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("setup.py");
        fs::write(&path, "").unwrap();
        let err = resolve_target(&path).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedManifest { .. }));
    }
}
