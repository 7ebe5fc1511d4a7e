// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::test_helpers::MockTransport;
use serde_json::json;
use yare::parameterized;

fn partner() -> RemoteSite {
    RemoteSite {
        name: "Partner A".to_string(),
        url: "https://partner-a.example/".to_string(),
        username: "sync".to_string(),
        password: "secret".to_string(),
        content_types: Vec::new(),
        vocabularies: Vec::new(),
        menus: Vec::new(),
        languages: Vec::new(),
    }
}

#[test]
fn successful_push_returns_receipt() {
    let transport = MockTransport::new().respond(200, r#"{"nid": 900, "message": "Created node 900"}"#);
    let client = PushClient::with_transport(transport.clone());

    let receipt = client
        .push(&partner(), EntityType::Content, &json!({"content": {}}))
        .unwrap();

    assert_eq!(receipt.remote_id, 900);
    assert_eq!(receipt.message.as_deref(), Some("Created node 900"));

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].url,
        "https://partner-a.example/api/receive-content"
    );
    assert_eq!(requests[0].username, "sync");
    assert_eq!(requests[0].password, "secret");
    assert_eq!(requests[0].body, json!({"content": {}}));
}

#[parameterized(
    content = { EntityType::Content, "/api/receive-content", r#"{"nid": 11}"# },
    media = { EntityType::Media, "/api/media-sync", r#"{"media_id": 12}"# },
    menu = { EntityType::Menu, "/api/receive-menu-link", r#"{"remote_menu_link_id": 13}"# },
    term = { EntityType::TaxonomyTerm, "/api/taxonomy-sync", r#"{"remote_tid": 14}"# },
)]
fn endpoint_and_id_field_per_entity_type(entity_type: EntityType, path: &str, body: &str) {
    let transport = MockTransport::new().respond(200, body);
    let client = PushClient::with_transport(transport.clone());

    let receipt = client.push(&partner(), entity_type, &json!({})).unwrap();
    assert!(receipt.remote_id >= 11);
    assert_eq!(
        transport.requests()[0].url,
        format!("https://partner-a.example{path}")
    );
}

#[test]
fn forbidden_maps_to_invalid_credentials() {
    let transport = MockTransport::new().respond(403, "");
    let client = PushClient::with_transport(transport);

    let err = client
        .push(&partner(), EntityType::Content, &json!({}))
        .unwrap_err();
    assert!(matches!(err, PushError::InvalidCredentials));
}

#[parameterized(
    empty = { "" },
    garbage = { "not json" },
    wrong_field = { r#"{"id": 900}"# },
    non_numeric = { r#"{"nid": "soon"}"# },
)]
fn ok_without_identifier_maps_to_no_remote_id(body: &str) {
    let transport = MockTransport::new().respond(200, body);
    let client = PushClient::with_transport(transport);

    let err = client
        .push(&partner(), EntityType::Content, &json!({}))
        .unwrap_err();
    assert!(matches!(err, PushError::NoRemoteId));
}

#[parameterized(
    server_error = { 500 },
    not_found = { 404 },
    unauthorized = { 401 },
)]
fn other_statuses_map_to_unexpected_status(status: u16) {
    let transport = MockTransport::new().respond(status, "");
    let client = PushClient::with_transport(transport);

    let err = client
        .push(&partner(), EntityType::Media, &json!({}))
        .unwrap_err();
    assert!(matches!(err, PushError::UnexpectedStatus(s) if s == status));
}

#[test]
fn transport_failure_propagates() {
    let transport = MockTransport::new().fail("connection refused");
    let client = PushClient::with_transport(transport);

    let err = client
        .push(&partner(), EntityType::Content, &json!({}))
        .unwrap_err();
    assert!(matches!(err, PushError::Transport(_)));
    assert!(err.to_string().contains("connection refused"));
}

#[test]
fn test_connection_hits_rest_endpoint() {
    let transport =
        MockTransport::new().respond(200, r#"{"status": "success", "message": "All good"}"#);
    let client = PushClient::with_transport(transport.clone());

    let message = client.test_connection(&partner()).unwrap();
    assert_eq!(message, "All good");

    let requests = transport.requests();
    assert_eq!(requests[0].url, "https://partner-a.example/rest-endpoint");
    assert_eq!(requests[0].body, json!({"action": "test_connection"}));
}

#[test]
fn test_connection_success_without_message_gets_default() {
    let transport = MockTransport::new().respond(200, r#"{"status": "success"}"#);
    let client = PushClient::with_transport(transport);

    assert_eq!(
        client.test_connection(&partner()).unwrap(),
        "connection established"
    );
}

#[test]
fn test_connection_failure_report() {
    let transport =
        MockTransport::new().respond(200, r#"{"status": "error", "message": "module disabled"}"#);
    let client = PushClient::with_transport(transport);

    let err = client.test_connection(&partner()).unwrap_err();
    assert!(matches!(err, PushError::RemoteFailure(m) if m == "module disabled"));
}

#[test]
fn test_connection_unrecognized_body() {
    let transport = MockTransport::new().respond(200, "<html>login</html>");
    let client = PushClient::with_transport(transport);

    let err = client.test_connection(&partner()).unwrap_err();
    assert!(matches!(err, PushError::RemoteFailure(m) if m == "unrecognized response"));
}

#[test]
fn test_connection_forbidden() {
    let transport = MockTransport::new().respond(403, "");
    let client = PushClient::with_transport(transport);

    let err = client.test_connection(&partner()).unwrap_err();
    assert!(matches!(err, PushError::InvalidCredentials));
}
