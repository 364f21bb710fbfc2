//! HTTP client shared foundation
//!
//! This module provides a shared HTTP client with:
//! - Configurable timeout and User-Agent
//! - Opt-in exponential backoff on HTTP 429
//! - Status and body mapping to `RegistryError`

use crate::error::RegistryError;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Default timeout for HTTP requests (10 seconds)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default User-Agent header
const DEFAULT_USER_AGENT: &str = concat!("stale-deps/", env!("CARGO_PKG_VERSION"));

/// Base delay for exponential backoff (in milliseconds)
const BASE_DELAY_MS: u64 = 250;

/// HTTP client wrapper used by every registry adapter
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    max_retries: u32,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, RegistryError> {
        Self::with_config(DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(timeout: Duration, user_agent: &str) -> Result<Self, RegistryError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .default_headers(headers)
            .build()
            .map_err(|e| RegistryError::ClientBuild {
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            max_retries: 0,
        })
    }

    /// Retry rate-limited requests up to `max_retries` times
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Perform a GET request, mapping HTTP failures to registry errors
    pub async fn get_with_context(
        &self,
        url: &str,
        package: &str,
        registry: &str,
    ) -> Result<reqwest::Response, RegistryError> {
        let mut delay = BASE_DELAY_MS;
        let mut attempt = 0;

        loop {
            let response = self.client.get(url).send().await.map_err(|e| {
                if e.is_timeout() {
                    RegistryError::timeout(package, registry)
                } else {
                    RegistryError::network_error(package, registry, e.to_string())
                }
            })?;

            match response.status() {
                StatusCode::TOO_MANY_REQUESTS if attempt < self.max_retries => {
                    tracing::debug!("{} rate limited, retrying in {}ms", registry, delay);
                    tokio::time::sleep(Duration::from_millis(delay)).await;
                    delay *= 2;
                    attempt += 1;
                }
                StatusCode::TOO_MANY_REQUESTS => {
                    return Err(RegistryError::RateLimitExceeded {
                        registry: registry.to_string(),
                    });
                }
                StatusCode::NOT_FOUND => {
                    return Err(RegistryError::package_not_found(package, registry));
                }
                status if !status.is_success() => {
                    return Err(RegistryError::network_error(
                        package,
                        registry,
                        format!("HTTP {}", status),
                    ));
                }
                _ => return Ok(response),
            }
        }
    }

    /// Perform a GET request and decode the JSON body into `T`
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        package: &str,
        registry: &str,
    ) -> Result<T, RegistryError> {
        let response = self.get_with_context(url, package, registry).await?;
        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                RegistryError::timeout(package, registry)
            } else {
                RegistryError::network_error(package, registry, e.to_string())
            }
        })?;

        serde_json::from_slice(&body)
            .map_err(|e| RegistryError::invalid_response(package, registry, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Probe {
        name: String,
    }

    #[test]
    fn test_http_client_creation() {
        let client = HttpClient::new().unwrap();
        assert_eq!(client.max_retries, 0);
    }

    #[test]
    fn test_http_client_with_max_retries() {
        let client = HttpClient::new().unwrap().with_max_retries(2);
        assert_eq!(client.max_retries, 2);
    }

    #[test]
    fn test_default_constants() {
        assert_eq!(DEFAULT_TIMEOUT, Duration::from_secs(10));
        assert!(DEFAULT_USER_AGENT.starts_with("stale-deps/"));
    }

    #[tokio::test]
    async fn test_get_json_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/probe")
            .match_header("accept", "application/json")
            .with_status(200)
            .with_body(r#"{"name": "ok"}"#)
            .create_async()
            .await;

        let client = HttpClient::new().unwrap();
        let probe: Probe = client
            .get_json(&format!("{}/probe", server.url()), "probe", "PyPI")
            .await
            .unwrap();
        assert_eq!(probe.name, "ok");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_json_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/missing")
            .with_status(404)
            .create_async()
            .await;

        let client = HttpClient::new().unwrap();
        let err = client
            .get_json::<Probe>(&format!("{}/missing", server.url()), "missing", "npm")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "not found on npm");
    }

    #[tokio::test]
    async fn test_get_json_server_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/boom")
            .with_status(503)
            .create_async()
            .await;

        let client = HttpClient::new().unwrap();
        let err = client
            .get_json::<Probe>(&format!("{}/boom", server.url()), "boom", "PyPI")
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("network error"));
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn test_get_json_bad_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/garbage")
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let client = HttpClient::new().unwrap();
        let err = client
            .get_json::<Probe>(&format!("{}/garbage", server.url()), "garbage", "PyPI")
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("bad JSON from PyPI"));
    }

    #[tokio::test]
    async fn test_rate_limit_without_retries() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/limited")
            .with_status(429)
            .expect(1)
            .create_async()
            .await;

        let client = HttpClient::new().unwrap();
        let err = client
            .get_json::<Probe>(&format!("{}/limited", server.url()), "limited", "npm")
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::RateLimitExceeded { .. }));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_rate_limit_retries_when_enabled() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/limited")
            .with_status(429)
            .expect(2)
            .create_async()
            .await;

        let client = HttpClient::new().unwrap().with_max_retries(1);
        let err = client
            .get_json::<Probe>(&format!("{}/limited", server.url()), "limited", "npm")
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::RateLimitExceeded { .. }));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let client = HttpClient::new().unwrap();
        let err = client
            .get_json::<Probe>("http://127.0.0.1:1/unreachable", "x", "PyPI")
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("network error"));
    }
}
