// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use std::fs;
use std::path::Path;

const CONFIG: &str = r#"
db = "sync.db"
entities = "entities.json"

[[sites]]
name = "Partner A"
url = "https://partner-a.example"
username = "sync"
password = "secret"
content_types = ["article"]
menus = ["main"]
vocabularies = ["topics"]
"#;

const ENTITIES: &str = r#"{
    "content": {
        "42": {
            "id": 42,
            "content_type": "article",
            "language": "en",
            "title": "Launch Notice",
            "body": "We are live."
        }
    },
    "media": {
        "7": {
            "id": 7,
            "name": "Logo",
            "kind": "image",
            "url": "https://hub.example/files/logo.png",
            "filename": "logo.png"
        }
    }
}"#;

fn setup(dir: &Path) -> Config {
    fs::write(dir.join("hubsync.toml"), CONFIG).unwrap();
    fs::write(dir.join("entities.json"), ENTITIES).unwrap();
    Config::load(&dir.join("hubsync.toml")).unwrap()
}

#[test]
fn enqueue_writes_tasks_into_the_configured_db() {
    let dir = tempfile::tempdir().unwrap();
    let config = setup(dir.path());

    enqueue(
        &config,
        &EnqueueTarget::Content {
            id: 42,
            language: None,
        },
    )
    .unwrap();

    let db = Database::open(&config.db_path()).unwrap();
    let tasks = db.list_tasks().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "Launch Notice");
    assert_eq!(tasks[0].remote_site, "Partner A");
}

#[test]
fn enqueue_missing_entity_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = setup(dir.path());

    let err = enqueue(
        &config,
        &EnqueueTarget::Content {
            id: 999,
            language: None,
        },
    )
    .unwrap_err();
    assert!(matches!(err, Error::Enqueue(_)));
}

#[test]
fn enqueue_media_reaches_every_site() {
    let dir = tempfile::tempdir().unwrap();
    let config = setup(dir.path());

    enqueue(&config, &EnqueueTarget::Media { id: 7 }).unwrap();

    let db = Database::open(&config.db_path()).unwrap();
    assert_eq!(db.list_tasks().unwrap().len(), 1);
}

#[test]
fn remove_reports_missing_task() {
    let dir = tempfile::tempdir().unwrap();
    let config = setup(dir.path());

    let err = remove(&config, 999).unwrap_err();
    assert!(matches!(
        err,
        Error::Core(hs_core::Error::TaskNotFound(999))
    ));
}

#[test]
fn remove_deletes_queued_task() {
    let dir = tempfile::tempdir().unwrap();
    let config = setup(dir.path());

    enqueue(
        &config,
        &EnqueueTarget::Content {
            id: 42,
            language: None,
        },
    )
    .unwrap();

    let db = Database::open(&config.db_path()).unwrap();
    let task_id = db.list_tasks().unwrap()[0].id;
    drop(db);

    remove(&config, task_id).unwrap();

    let db = Database::open(&config.db_path()).unwrap();
    assert!(db.list_tasks().unwrap().is_empty());
}

#[test]
fn listing_commands_tolerate_empty_state() {
    let dir = tempfile::tempdir().unwrap();
    let config = setup(dir.path());

    queue(&config).unwrap();
    relations(&config).unwrap();
    logs(&config, 1).unwrap();
    sites(&config).unwrap();
}

#[test]
fn test_connection_rejects_unknown_site() {
    let dir = tempfile::tempdir().unwrap();
    let config = setup(dir.path());

    let err = test_connection(&config, "Partner X").unwrap_err();
    assert!(matches!(
        err,
        Error::Dispatch(DispatchError::UnknownSite(_))
    ));
}
