//! npm Registry adapter
//!
//! Fetches the latest release of a package from the npm registry.
//! API endpoint: https://registry.npmjs.org/{package}

use crate::domain::Ecosystem;
use crate::error::RegistryError;
use crate::registry::{parse_release_timestamp, HttpClient, RegistryAdapter, ReleaseInfo};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;

/// npm registry base URL
const NPM_REGISTRY_URL: &str = "https://registry.npmjs.org";

/// npm Registry adapter
pub struct NpmAdapter {
    client: HttpClient,
    base_url: String,
}

/// npm package document (only the fields we read)
#[derive(Debug, Deserialize)]
struct NpmPackageResponse {
    #[serde(rename = "dist-tags")]
    dist_tags: DistTags,
    /// Publish time keyed by version
    #[serde(default)]
    time: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct DistTags {
    latest: String,
}

impl NpmAdapter {
    /// Create a new npm adapter
    pub fn new(client: HttpClient) -> Self {
        Self::with_base_url(client, NPM_REGISTRY_URL)
    }

    /// Create an adapter against a different npm-compatible registry
    pub fn with_base_url(client: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Build the URL for a package
    fn build_url(&self, package: &str) -> String {
        format!("{}/{}", self.base_url, package)
    }
}

#[async_trait]
impl RegistryAdapter for NpmAdapter {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Npm
    }

    async fn fetch_release(&self, package: &str) -> Result<ReleaseInfo, RegistryError> {
        let url = self.build_url(package);
        tracing::debug!("fetching {}", url);
        let response: NpmPackageResponse = self
            .client
            .get_json(&url, package, self.registry_name())
            .await?;

        let latest = response.dist_tags.latest;
        let last_release_date = response
            .time
            .get(&latest)
            .and_then(serde_json::Value::as_str)
            .and_then(parse_release_timestamp);

        Ok(ReleaseInfo::new(latest, last_release_date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn adapter(base_url: &str) -> NpmAdapter {
        NpmAdapter::with_base_url(HttpClient::new().unwrap(), base_url)
    }

    #[test]
    fn test_npm_adapter_metadata() {
        let adapter = NpmAdapter::new(HttpClient::new().unwrap());
        assert_eq!(adapter.ecosystem(), Ecosystem::Npm);
        assert_eq!(adapter.registry_name(), "npm");
    }

    #[test]
    fn test_build_url_scoped_package() {
        let adapter = NpmAdapter::new(HttpClient::new().unwrap());
        assert_eq!(
            adapter.build_url("@types/node"),
            "https://registry.npmjs.org/@types/node"
        );
    }

    #[tokio::test]
    async fn test_fetch_release() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/lodash")
            .with_status(200)
            .with_body(
                r#"{
                    "dist-tags": {"latest": "4.17.21"},
                    "time": {
                        "created": "2012-04-23T16:37:11.912Z",
                        "modified": "2024-01-01T00:00:00.000Z",
                        "4.17.21": "2021-02-20T15:42:16.891Z"
                    }
                }"#,
            )
            .create_async()
            .await;

        let release = adapter(&server.url()).fetch_release("lodash").await.unwrap();
        assert_eq!(release.latest_version, "4.17.21");
        let date = release.last_release_date.unwrap();
        assert_eq!(
            date.date_naive(),
            Utc.with_ymd_and_hms(2021, 2, 20, 0, 0, 0).unwrap().date_naive()
        );
    }

    #[tokio::test]
    async fn test_fetch_release_without_time() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/tiny")
            .with_status(200)
            .with_body(r#"{"dist-tags": {"latest": "1.0.0"}}"#)
            .create_async()
            .await;

        let release = adapter(&server.url()).fetch_release("tiny").await.unwrap();
        assert_eq!(release.last_release_date, None);
    }

    #[tokio::test]
    async fn test_fetch_release_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/nope")
            .with_status(404)
            .create_async()
            .await;

        let err = adapter(&server.url()).fetch_release("nope").await.unwrap_err();
        assert_eq!(err.to_string(), "not found on npm");
    }

    #[tokio::test]
    async fn test_fetch_release_missing_dist_tags() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/odd")
            .with_status(200)
            .with_body(r#"{"name": "odd"}"#)
            .create_async()
            .await;

        let err = adapter(&server.url()).fetch_release("odd").await.unwrap_err();
        assert!(err.to_string().starts_with("bad JSON from npm"));
    }
}
