//! HTTP request and response value types.

use crate::domain::error::{ReqError, Result};
use crate::domain::validation::validate_url;
use crate::domain::{Endpoint, HttpMethod};
use std::collections::BTreeMap;

/// A fully resolved request ready for execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub query_params: BTreeMap<String, String>,
    pub body: String,
}

impl HttpRequest {
    /// Builds a request from a saved endpoint.
    ///
    /// # Errors
    ///
    /// [`ReqError::InvalidInput`] when the endpoint has no URL or an invalid one.
    pub fn from_endpoint(endpoint: &Endpoint) -> Result<Self> {
        let url = validate_url(&endpoint.url)?;
        if url.is_empty() {
            return Err(ReqError::invalid("set a URL before sending (press u)"));
        }
        Ok(Self {
            method: endpoint.method,
            url,
            headers: endpoint.headers.clone(),
            query_params: endpoint.query_params.clone(),
            body: endpoint.request_body.clone(),
        })
    }
}

/// A received response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub headers: BTreeMap<String, String>,
    pub body: String,
    pub duration_ms: u128,
}

impl HttpResponse {
    /// `true` for 2xx statuses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Status line, e.g. `200 OK (123 ms)`.
    #[must_use]
    pub fn status_line(&self) -> String {
        format!("{} {} ({} ms)", self.status, self.status_text, self.duration_ms)
    }
}
