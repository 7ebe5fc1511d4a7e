// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Push client: delivers serialized payloads to remote site endpoints and
//! classifies the outcome.
//!
//! Each entity type has a fixed endpoint path and a fixed response field
//! carrying the identifier the receiver assigned. Both are a compatibility
//! surface shared with deployed receiver endpoints and must not be renamed.

use serde_json::{json, Value};

use hs_core::{EntityType, RemoteSite};

use crate::transport::{HttpTransport, PushTransport, TransportError};

/// Error type for push operations.
#[derive(Debug, thiserror::Error)]
pub enum PushError {
    /// The remote site rejected the credentials (HTTP 403).
    #[error("remote site rejected the credentials")]
    InvalidCredentials,

    /// The remote site accepted the push but its response carried no
    /// assigned identifier.
    #[error("remote site returned no identifier for the pushed entity")]
    NoRemoteId,

    /// Any status other than 200 or 403.
    #[error("unexpected response status: {0}")]
    UnexpectedStatus(u16),

    /// The remote site answered a connection test with a failure report.
    #[error("remote site reported: {0}")]
    RemoteFailure(String),

    /// The request never completed.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Result type for push operations.
pub type PushResult<T> = Result<T, PushError>;

/// A successful push outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushReceipt {
    /// Identifier the remote site assigned to the created entity.
    pub remote_id: i64,
    /// Optional human-readable message from the receiver.
    pub message: Option<String>,
}

/// Receiver endpoint path for an entity type.
fn endpoint(entity_type: EntityType) -> &'static str {
    match entity_type {
        EntityType::Content => "/api/receive-content",
        EntityType::Media => "/api/media-sync",
        EntityType::Menu => "/api/receive-menu-link",
        EntityType::TaxonomyTerm => "/api/taxonomy-sync",
    }
}

/// Response field carrying the remote-assigned identifier.
fn remote_id_field(entity_type: EntityType) -> &'static str {
    match entity_type {
        EntityType::Content => "nid",
        EntityType::Media => "media_id",
        EntityType::Menu => "remote_menu_link_id",
        EntityType::TaxonomyTerm => "remote_tid",
    }
}

/// Client for pushing payloads to remote sites.
pub struct PushClient<T: PushTransport = HttpTransport> {
    transport: T,
}

impl PushClient<HttpTransport> {
    /// Create a push client with the default HTTP transport.
    pub fn new() -> PushResult<Self> {
        Ok(PushClient {
            transport: HttpTransport::new()?,
        })
    }
}

impl<T: PushTransport> PushClient<T> {
    /// Create a push client with a custom transport (for testing).
    pub fn with_transport(transport: T) -> Self {
        PushClient { transport }
    }

    /// Push a serialized payload to the site's endpoint for the entity type.
    ///
    /// Outcomes: 403 means bad credentials; 200 with a numeric identifier in
    /// the expected field is success; 200 without one (including an
    /// unparseable body) is [`PushError::NoRemoteId`]; anything else is
    /// [`PushError::UnexpectedStatus`].
    pub fn push(
        &self,
        site: &RemoteSite,
        entity_type: EntityType,
        payload: &Value,
    ) -> PushResult<PushReceipt> {
        let url = format!("{}{}", site.url.trim_end_matches('/'), endpoint(entity_type));

        tracing::debug!(site = %site.name, %url, entity_type = %entity_type, "pushing payload");

        let response = self
            .transport
            .post(&url, payload, &site.username, &site.password)?;

        match response.status {
            403 => Err(PushError::InvalidCredentials),
            200 => {
                let parsed: Value =
                    serde_json::from_str(&response.body).unwrap_or(Value::Null);
                let remote_id = parsed[remote_id_field(entity_type)]
                    .as_i64()
                    .ok_or(PushError::NoRemoteId)?;
                let message = parsed["message"].as_str().map(String::from);

                Ok(PushReceipt { remote_id, message })
            }
            other => Err(PushError::UnexpectedStatus(other)),
        }
    }

    /// Probe a site's receiving endpoint with a connection test.
    ///
    /// Returns the receiver's message on success.
    pub fn test_connection(&self, site: &RemoteSite) -> PushResult<String> {
        let url = format!("{}/rest-endpoint", site.url.trim_end_matches('/'));
        let payload = json!({"action": "test_connection"});

        let response = self
            .transport
            .post(&url, &payload, &site.username, &site.password)?;

        match response.status {
            403 => Err(PushError::InvalidCredentials),
            200 => {
                let parsed: Value =
                    serde_json::from_str(&response.body).unwrap_or(Value::Null);
                let message = parsed["message"].as_str().unwrap_or("").to_string();

                if parsed["status"] == "success" {
                    Ok(if message.is_empty() {
                        "connection established".to_string()
                    } else {
                        message
                    })
                } else if message.is_empty() {
                    Err(PushError::RemoteFailure("unrecognized response".to_string()))
                } else {
                    Err(PushError::RemoteFailure(message))
                }
            }
            other => Err(PushError::UnexpectedStatus(other)),
        }
    }
}

#[cfg(test)]
#[path = "push_tests.rs"]
mod tests;
