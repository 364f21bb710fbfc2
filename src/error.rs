//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ConfigError: Run-level problems (bad path, no manifest, bad options), fatal
//! - ManifestError: Unreadable or malformed manifest, absorbed as a warning
//! - RegistryError: Per-dependency lookup failure, recorded on that dependency

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Package registry related errors
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Errors related to run configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Target path does not exist
    #[error("path does not exist: {path}")]
    PathNotFound { path: PathBuf },

    /// No recognized manifest in the target directory
    #[error("no requirements.txt, pyproject.toml, or package.json found in {path}")]
    NoManifestFound { path: PathBuf },

    /// A single file was given but its format cannot be determined
    #[error("unsupported manifest format: {path}")]
    UnsupportedManifest { path: PathBuf },

    /// Threshold values are inconsistent
    #[error("invalid staleness thresholds: {message}")]
    InvalidThreshold { message: String },

    /// Concurrency must be positive
    #[error("invalid concurrency '{value}': must be at least 1")]
    InvalidConcurrency { value: usize },
}

/// Errors related to manifest file operations
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Failed to read manifest file
    #[error("failed to read manifest file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing error (for package.json)
    #[error("could not parse {path}: {message}")]
    JsonParseError { path: PathBuf, message: String },

    /// TOML parsing error (for pyproject.toml)
    #[error("could not parse {path}: {message}")]
    TomlParseError { path: PathBuf, message: String },
}

/// Errors related to package registry communication
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Package not found in registry (HTTP 404)
    #[error("not found on {registry}")]
    PackageNotFound { package: String, registry: String },

    /// Transport failure or unexpected HTTP status
    #[error("network error: {message}")]
    NetworkError {
        package: String,
        registry: String,
        message: String,
    },

    /// Request exceeded the client timeout
    #[error("network error: timed out fetching '{package}' from {registry}")]
    Timeout { package: String, registry: String },

    /// Rate limit exceeded
    #[error("rate limit exceeded for {registry}")]
    RateLimitExceeded { registry: String },

    /// Response body did not match the expected schema
    #[error("bad JSON from {registry}: {message}")]
    InvalidResponse {
        package: String,
        registry: String,
        message: String,
    },

    /// The HTTP client could not be constructed
    #[error("failed to create HTTP client: {message}")]
    ClientBuild { message: String },
}

impl ConfigError {
    /// Creates a new PathNotFound error
    pub fn path_not_found(path: impl Into<PathBuf>) -> Self {
        ConfigError::PathNotFound { path: path.into() }
    }

    /// Creates a new NoManifestFound error
    pub fn no_manifest_found(path: impl Into<PathBuf>) -> Self {
        ConfigError::NoManifestFound { path: path.into() }
    }
}

impl ManifestError {
    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new JsonParseError
    pub fn json_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::JsonParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new TomlParseError
    pub fn toml_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::TomlParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns the same error attributed to `path`
    pub fn with_path(self, path: &Path) -> Self {
        match self {
            ManifestError::ReadError { source, .. } => ManifestError::read_error(path, source),
            ManifestError::JsonParseError { message, .. } => {
                ManifestError::json_parse_error(path, message)
            }
            ManifestError::TomlParseError { message, .. } => {
                ManifestError::toml_parse_error(path, message)
            }
        }
    }
}

impl RegistryError {
    /// Creates a new PackageNotFound error
    pub fn package_not_found(package: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::PackageNotFound {
            package: package.into(),
            registry: registry.into(),
        }
    }

    /// Creates a new NetworkError
    pub fn network_error(
        package: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::NetworkError {
            package: package.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidResponse error
    pub fn invalid_response(
        package: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::InvalidResponse {
            package: package.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(package: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::Timeout {
            package: package.into(),
            registry: registry.into(),
        }
    }
}
