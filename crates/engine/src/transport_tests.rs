// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;

#[test]
fn http_transport_builds() {
    HttpTransport::new().unwrap();
}

#[test]
fn transport_error_messages() {
    let err = TransportError::RequestFailed("connection refused".to_string());
    assert_eq!(err.to_string(), "request failed: connection refused");

    let err = TransportError::UnreadableBody("truncated".to_string());
    assert_eq!(err.to_string(), "unreadable response body: truncated");
}
