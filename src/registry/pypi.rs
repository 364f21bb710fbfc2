//! PyPI JSON API adapter
//!
//! Fetches the latest release of a package from PyPI.
//! API endpoint: https://pypi.org/pypi/{package}/json

use crate::domain::Ecosystem;
use crate::error::RegistryError;
use crate::registry::{parse_release_timestamp, HttpClient, RegistryAdapter, ReleaseInfo};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;

/// PyPI API base URL
const PYPI_API_URL: &str = "https://pypi.org/pypi";

/// PyPI adapter
pub struct PyPIAdapter {
    client: HttpClient,
    base_url: String,
}

/// PyPI package metadata response
#[derive(Debug, Deserialize)]
struct PyPIResponse {
    info: PyPIInfo,
    /// Release files keyed by version
    #[serde(default)]
    releases: HashMap<String, Vec<PyPIFile>>,
}

#[derive(Debug, Deserialize)]
struct PyPIInfo {
    version: String,
}

/// Release file information; upload times are read loosely so a malformed
/// value only loses the release date
#[derive(Debug, Deserialize)]
struct PyPIFile {
    #[serde(default)]
    upload_time_iso_8601: serde_json::Value,
    #[serde(default)]
    upload_time: serde_json::Value,
}

impl PyPIFile {
    fn timestamp(&self) -> Option<&str> {
        [&self.upload_time_iso_8601, &self.upload_time]
            .into_iter()
            .filter_map(serde_json::Value::as_str)
            .find(|s| !s.is_empty())
    }
}

impl PyPIAdapter {
    /// Create a new PyPI adapter
    pub fn new(client: HttpClient) -> Self {
        Self::with_base_url(client, PYPI_API_URL)
    }

    /// Create an adapter against a different PyPI-compatible host
    pub fn with_base_url(client: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Build the URL for a package
    fn build_url(&self, package: &str) -> String {
        format!("{}/{}/json", self.base_url, package)
    }
}

#[async_trait]
impl RegistryAdapter for PyPIAdapter {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Pypi
    }

    async fn fetch_release(&self, package: &str) -> Result<ReleaseInfo, RegistryError> {
        let url = self.build_url(package);
        tracing::debug!("fetching {}", url);
        let response: PyPIResponse = self
            .client
            .get_json(&url, package, self.registry_name())
            .await?;

        let latest = response.info.version;
        // the last uploaded file of the latest release dates it
        let last_release_date = response
            .releases
            .get(&latest)
            .and_then(|files| files.last())
            .and_then(PyPIFile::timestamp)
            .and_then(parse_release_timestamp);

        Ok(ReleaseInfo::new(latest, last_release_date))
    }
}
