//! Request execution seam.
//!
//! Views never talk to the network directly: the detail view posts a worker
//! job that calls a [`RequestExecutor`]. Tests substitute a stub.

use super::models::{HttpRequest, HttpResponse};
use crate::domain::error::{ReqError, Result};
use std::time::{Duration, Instant};

/// Executes one HTTP request synchronously.
///
/// Called from worker threads only, so blocking is fine.
pub trait RequestExecutor: Send + Sync {
    /// Sends `request` and collects the full response.
    ///
    /// # Errors
    ///
    /// [`ReqError::Http`] for connection, TLS, timeout or body read failures.
    /// Non-2xx statuses are responses, not errors.
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse>;
}

/// [`RequestExecutor`] backed by a blocking reqwest client.
#[derive(Debug, Clone)]
pub struct ReqwestExecutor {
    client: reqwest::blocking::Client,
}

impl ReqwestExecutor {
    /// Builds a client with the given request timeout.
    ///
    /// # Errors
    ///
    /// [`ReqError::Http`] if the TLS backend cannot be initialized.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("reqtui/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl RequestExecutor for ReqwestExecutor {
    #[tracing::instrument(level = "debug", skip(self, request), fields(method = %request.method, url = %request.url))]
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let method = reqwest::Method::from_bytes(request.method.as_str().as_bytes())
            .map_err(|e| ReqError::invalid(e.to_string()))?;

        let mut builder = self.client.request(method, &request.url);
        if !request.query_params.is_empty() {
            builder = builder.query(&request.query_params);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if !request.body.is_empty() {
            builder = builder.body(request.body.clone());
        }

        let started = Instant::now();
        let response = builder.send()?;
        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.to_string(),
                    value.to_str().unwrap_or("<binary>").to_string(),
                )
            })
            .collect();
        let body = response.text()?;
        let duration_ms = started.elapsed().as_millis();

        tracing::debug!(status = status.as_u16(), duration_ms, body_len = body.len(), "response received");

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body,
            duration_ms,
        })
    }
}
