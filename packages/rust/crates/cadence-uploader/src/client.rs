//! HTTP client for custom metrics: `POST <base>/_metrics/custom/<name>`.
//!
//! The schedule runs synchronously, so the client owns a current-thread tokio
//! runtime and blocks on each request.

use std::time::{Duration, Instant};

use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};
use tokio::runtime::Runtime;

use crate::credentials::Credentials;
use crate::error::{ConfigError, UploadError};

/// One metric sample as sent on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricPoint {
    /// Unix seconds the sample refers to.
    pub timestamp: i64,
    /// Sample value.
    pub value: u64,
}

/// Destination for metric points; the seam between the schedule and HTTP.
pub trait MetricSink {
    /// Deliver one point, returning the HTTP status of an accepted upload.
    ///
    /// # Errors
    ///
    /// Any [`UploadError`]; its kind decides whether the schedule retries.
    fn send(&self, point: &MetricPoint) -> Result<u16, UploadError>;
}

/// Resolve the custom-metric endpoint relative to `base_url`.
///
/// Relative resolution follows RFC 3986: a base without a trailing slash has
/// its last path segment replaced.
///
/// # Errors
///
/// [`ConfigError::InvalidUrl`] when the join fails.
pub fn metric_endpoint(base_url: &Url, source_name: &str) -> Result<Url, ConfigError> {
    base_url
        .join(&format!("_metrics/custom/{source_name}"))
        .map_err(|error| ConfigError::InvalidUrl {
            url: base_url.to_string(),
            reason: error.to_string(),
        })
}

/// Blocking metrics client with basic auth.
#[derive(Debug)]
pub struct MetricClient {
    runtime: Runtime,
    http: Client,
    endpoint: Url,
    credentials: Credentials,
}

impl MetricClient {
    /// Build a client posting to `endpoint`.
    ///
    /// # Errors
    ///
    /// [`UploadError::Runtime`] if the runtime cannot start,
    /// [`UploadError::Transport`] if the HTTP client cannot be built.
    pub fn new(
        endpoint: Url,
        credentials: Credentials,
        timeout: Duration,
        insecure_tls: bool,
    ) -> Result<Self, UploadError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(UploadError::Runtime)?;
        let http = Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(insecure_tls)
            .build()?;
        Ok(Self {
            runtime,
            http,
            endpoint,
            credentials,
        })
    }

    /// Endpoint this client posts to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn post(&self, body: String) -> Result<StatusCode, UploadError> {
        let started = Instant::now();
        let response = self
            .http
            .post(self.endpoint.clone())
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .inspect_err(|error| {
                tracing::debug!(
                    event = "cadence.client.request_failed",
                    url = %self.endpoint,
                    elapsed_ms = started.elapsed().as_millis(),
                    error = %error,
                    "metric upload request failed"
                );
            })?;
        let status = response.status();
        tracing::debug!(
            event = "cadence.client.response",
            url = %self.endpoint,
            status = %status,
            elapsed_ms = started.elapsed().as_millis(),
            "metric upload answered"
        );
        Ok(status)
    }
}

impl MetricSink for MetricClient {
    fn send(&self, point: &MetricPoint) -> Result<u16, UploadError> {
        let body = serde_json::to_string(point)?;
        let now = chrono::Local::now();
        tracing::info!(
            event = "cadence.client.posting",
            unix = now.timestamp(),
            at = %now.format("%a %b %e %H:%M:%S %Y"),
            "posting"
        );
        let status = self.runtime.block_on(self.post(body))?;
        if status != StatusCode::OK {
            return Err(UploadError::Rejected(status.as_u16()));
        }
        Ok(status.as_u16())
    }
}
