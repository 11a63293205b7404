//! HTTP transport capability used by the RPC client.
//!
//! The client never builds HTTP requests itself; it hands a serialized body
//! to a [`Transport`] and gets the raw response text back. Tests swap in
//! their own implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use thiserror::Error;

/// Transport-level failures.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The transport's own deadline fired.
    #[error("request timed out")]
    Timeout,

    /// The endpoint could not be reached (refused, DNS, reset).
    #[error("{0}")]
    Connection(String),
}

/// Posts a JSON body to an endpoint and returns the response body.
///
/// Implementations return the body whatever the HTTP status; deciding what
/// the payload means is up to the caller.
#[async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    async fn post_json(
        &self,
        url: &str,
        body: String,
        timeout: Duration,
    ) -> Result<String, TransportError>;
}

/// Default transport built on `reqwest`.
///
/// Idle connections are not kept: every call opens a fresh connection, which
/// also keeps the client usable from the short-lived runtimes behind
/// blocking calls.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransport {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(0)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Falling back to default HTTP client");
                reqwest::Client::new()
            });
        Self { client }
    }

    /// Wrap an existing `reqwest` client (proxy settings, TLS roots...).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(
        &self,
        url: &str,
        body: String,
        timeout: Duration,
    ) -> Result<String, TransportError> {
        let resp = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .timeout(timeout)
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = resp.status();
        if !status.is_success() {
            tracing::debug!(url = %url, status = %status, "Node returned non-success status");
        }

        resp.text().await.map_err(map_reqwest_error)
    }
}

fn map_reqwest_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Connection(e.to_string())
    }
}
