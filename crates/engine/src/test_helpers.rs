// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test doubles for push and dispatch tests.

#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::dispatch::Messenger;
use crate::transport::{HttpResponse, PushTransport, TransportError, TransportResult};

/// One recorded request seen by [`MockTransport`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub body: Value,
    pub username: String,
    pub password: String,
}

#[derive(Default)]
struct MockState {
    responses: Vec<TransportResult<HttpResponse>>,
    requests: Vec<RecordedRequest>,
}

/// Scriptable transport double.
///
/// Clones share state, so a test can hand one clone to the client and keep
/// another to inspect recorded requests. Responses are served in the order
/// they were scripted; a request beyond the script fails the test.
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        MockTransport::default()
    }

    pub fn respond(self, status: u16, body: &str) -> Self {
        self.state.lock().unwrap().responses.push(Ok(HttpResponse {
            status,
            body: body.to_string(),
        }));
        self
    }

    pub fn fail(self, message: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .responses
            .push(Err(TransportError::RequestFailed(message.to_string())));
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }
}

impl PushTransport for MockTransport {
    fn post(
        &self,
        url: &str,
        body: &Value,
        username: &str,
        password: &str,
    ) -> TransportResult<HttpResponse> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(RecordedRequest {
            url: url.to_string(),
            body: body.clone(),
            username: username.to_string(),
            password: password.to_string(),
        });

        assert!(!state.responses.is_empty(), "unscripted request to {url}");
        state.responses.remove(0)
    }
}

/// Messenger double collecting every notification.
#[derive(Default)]
pub struct CollectingMessenger {
    pub successes: Vec<String>,
    pub errors: Vec<String>,
}

impl Messenger for CollectingMessenger {
    fn success(&mut self, message: &str) {
        self.successes.push(message.to_string());
    }

    fn error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }
}
