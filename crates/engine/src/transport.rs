// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Transport abstraction for HTTP delivery.
//!
//! Provides a trait-based transport layer that enables:
//! - Real HTTP POSTs for production
//! - Mock transports for unit testing

use std::time::Duration;

use serde_json::Value;

/// Error type for transport operations.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request could not be sent or no response arrived.
    #[error("request failed: {0}")]
    RequestFailed(String),

    /// The response body could not be read.
    #[error("unreadable response body: {0}")]
    UnreadableBody(String),
}

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// A received HTTP response, reduced to what outcome classification needs.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: String,
}

/// Transport trait for authenticated JSON POSTs.
///
/// This trait abstracts over the actual HTTP mechanism, allowing
/// for easy testing with mock implementations.
pub trait PushTransport: Send + Sync {
    /// POST a JSON body to a URL with basic auth credentials.
    fn post(
        &self,
        url: &str,
        body: &Value,
        username: &str,
        password: &str,
    ) -> TransportResult<HttpResponse>;
}

/// HTTP transport implementation using a blocking reqwest client.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Create a new HTTP transport.
    ///
    /// Certificate verification is disabled: peer sites in deployed
    /// configurations routinely run on self-signed certificates.
    pub fn new() -> TransportResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .danger_accept_invalid_certs(true)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| TransportError::RequestFailed(e.to_string()))?;

        Ok(HttpTransport { client })
    }
}

impl PushTransport for HttpTransport {
    fn post(
        &self,
        url: &str,
        body: &Value,
        username: &str,
        password: &str,
    ) -> TransportResult<HttpResponse> {
        let response = self
            .client
            .post(url)
            .basic_auth(username, Some(password))
            .json(body)
            .send()
            .map_err(|e| TransportError::RequestFailed(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| TransportError::UnreadableBody(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
#[path = "transport_tests.rs"]
mod tests;
