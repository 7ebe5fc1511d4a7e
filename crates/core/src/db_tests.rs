// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::task::{Operation, TaskStatus};

fn test_db() -> Database {
    Database::open_in_memory().unwrap()
}

fn sample_task(local_id: i64, site: &str, language: Option<&str>) -> SyncTask {
    SyncTask::new(
        local_id,
        EntityType::Content,
        "Launch Notice".to_string(),
        site.to_string(),
        language.map(String::from),
    )
}

fn sample_relation(local_id: i64, site: &str, language: Option<&str>) -> RelationRecord {
    RelationRecord {
        id: 0,
        local_id,
        title: "Launch Notice".to_string(),
        remote_id: 900,
        content_type: "article".to_string(),
        entity_type: EntityType::Content,
        remote_site: site.to_string(),
        language: language.map(String::from),
        operation_date: Utc::now(),
    }
}

#[test]
fn enqueue_and_get_task() {
    let db = test_db();
    let id = db.enqueue_task(&sample_task(42, "Partner A", Some("en"))).unwrap();
    assert!(id > 0);

    let task = db.get_task(id).unwrap();
    assert_eq!(task.id, id);
    assert_eq!(task.local_id, 42);
    assert_eq!(task.entity_type, EntityType::Content);
    assert_eq!(task.title, "Launch Notice");
    assert_eq!(task.remote_site, "Partner A");
    assert_eq!(task.operation, Operation::Create);
    assert_eq!(task.status, TaskStatus::Awaiting);
    assert_eq!(task.language.as_deref(), Some("en"));
}

#[test]
fn get_missing_task_fails() {
    let db = test_db();
    let err = db.get_task(999).unwrap_err();
    assert!(matches!(err, Error::TaskNotFound(999)));
}

#[test]
fn duplicate_enqueue_is_allowed() {
    let db = test_db();
    let first = db.enqueue_task(&sample_task(42, "Partner A", Some("en"))).unwrap();
    let second = db.enqueue_task(&sample_task(42, "Partner A", Some("en"))).unwrap();
    assert_ne!(first, second);
    assert_eq!(db.list_tasks().unwrap().len(), 2);
}

#[test]
fn remove_task_is_idempotent() {
    let db = test_db();
    let id = db.enqueue_task(&sample_task(42, "Partner A", None)).unwrap();

    db.remove_task(id).unwrap();
    assert!(!db.task_exists(id).unwrap());

    // Removing again is not an error.
    db.remove_task(id).unwrap();
    db.remove_task(999).unwrap();
}

#[test]
fn list_tasks_ordered_by_id() {
    let db = test_db();
    db.enqueue_task(&sample_task(1, "Partner A", None)).unwrap();
    db.enqueue_task(&sample_task(2, "Partner B", None)).unwrap();
    db.enqueue_task(&sample_task(3, "Partner A", None)).unwrap();

    let tasks = db.list_tasks().unwrap();
    let locals: Vec<i64> = tasks.iter().map(|t| t.local_id).collect();
    assert_eq!(locals, vec![1, 2, 3]);
}

#[test]
fn unknown_entity_tag_surfaces_typed_error() {
    let db = test_db();
    db.conn
        .execute(
            "INSERT INTO sync_queue (local_id, entity_type, title, remote_site,
             operation, status, created_at)
             VALUES (1, 'widget', 'Bad', 'Partner A', 'create', 'awaiting', ?1)",
            params![Utc::now().to_rfc3339()],
        )
        .unwrap();

    let id = db.conn.last_insert_rowid();
    let err = db.get_task(id).unwrap_err();
    assert!(matches!(err, Error::UnsupportedEntityType(s) if s == "widget"));

    let err = db.list_tasks().unwrap_err();
    assert!(matches!(err, Error::UnsupportedEntityType(_)));
}

#[test]
fn relation_exists_matches_language_exactly() {
    let db = test_db();
    db.insert_relation(&sample_relation(42, "Partner A", Some("en")))
        .unwrap();

    assert!(db.relation_exists(42, "Partner A", Some("en")).unwrap());
    assert!(!db.relation_exists(42, "Partner A", Some("fr")).unwrap());
    assert!(!db.relation_exists(42, "Partner A", None).unwrap());
    assert!(!db.relation_exists(42, "Partner B", Some("en")).unwrap());
    assert!(!db.relation_exists(7, "Partner A", Some("en")).unwrap());
}

#[test]
fn relation_exists_with_null_language() {
    let db = test_db();
    db.insert_relation(&sample_relation(7, "Partner B", None))
        .unwrap();

    assert!(db.relation_exists(7, "Partner B", None).unwrap());
    assert!(!db.relation_exists(7, "Partner B", Some("en")).unwrap());
}

#[test]
fn find_relation_round_trips() {
    let db = test_db();
    let record = sample_relation(42, "Partner A", Some("en"));
    db.insert_relation(&record).unwrap();

    let found = db
        .find_relation(42, "Partner A", Some("en"))
        .unwrap()
        .unwrap();
    assert_eq!(found.local_id, 42);
    assert_eq!(found.remote_id, 900);
    assert_eq!(found.content_type, "article");
    assert_eq!(found.entity_type, EntityType::Content);
    assert_eq!(found.language.as_deref(), Some("en"));

    assert!(db.find_relation(42, "Partner A", None).unwrap().is_none());
}

#[test]
fn list_relations_oldest_first() {
    let db = test_db();
    db.insert_relation(&sample_relation(1, "Partner A", None)).unwrap();
    db.insert_relation(&sample_relation(2, "Partner A", None)).unwrap();

    let records = db.list_relations().unwrap();
    assert_eq!(records.len(), 2);
    assert!(records[0].id < records[1].id);
    assert_eq!(records[0].local_id, 1);
}

#[test]
fn append_and_get_logs() {
    let db = test_db();
    db.append_log(5, "first attempt failed").unwrap();
    db.append_log(5, "second attempt succeeded").unwrap();
    db.append_log(6, "unrelated").unwrap();

    let entries = db.get_logs(5).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].message, "first attempt failed");
    assert_eq!(entries[1].message, "second attempt succeeded");
    assert_eq!(entries[0].task_id, 5);

    assert_eq!(db.count_logs().unwrap(), 3);
    assert!(db.get_logs(99).unwrap().is_empty());
}

#[test]
fn record_success_is_atomic() {
    let mut db = test_db();
    let task_id = db.enqueue_task(&sample_task(42, "Partner A", Some("en"))).unwrap();

    let record = sample_relation(42, "Partner A", Some("en"));
    db.record_success(task_id, &record, "delivered as 900")
        .unwrap();

    assert!(!db.task_exists(task_id).unwrap());
    assert!(db.relation_exists(42, "Partner A", Some("en")).unwrap());

    let entries = db.get_logs(task_id).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].message, "delivered as 900");
}

#[test]
fn open_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("sync.db");

    let db = Database::open(&path).unwrap();
    db.enqueue_task(&sample_task(1, "Partner A", None)).unwrap();
    assert!(path.exists());
}

#[test]
fn migrations_upgrade_legacy_relations_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sync.db");

    // Seed a database whose relations table predates per-language delivery.
    {
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE sync_relations (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                local_id INTEGER NOT NULL,
                title TEXT NOT NULL,
                remote_id INTEGER NOT NULL,
                content_type TEXT,
                remote_site TEXT NOT NULL,
                operation_date TEXT NOT NULL
            );",
        )
        .unwrap();
        conn.execute(
            "INSERT INTO sync_relations (local_id, title, remote_id, content_type,
             remote_site, operation_date)
             VALUES (1, 'Old', 10, 'article', 'Partner A', ?1)",
            params![Utc::now().to_rfc3339()],
        )
        .unwrap();
    }

    let db = Database::open(&path).unwrap();

    // Columns exist now and new-style inserts work.
    db.insert_relation(&sample_relation(2, "Partner B", Some("en")))
        .unwrap();
    assert!(db.relation_exists(2, "Partner B", Some("en")).unwrap());

    // The legacy row still counts for the duplicate guard.
    assert!(db.relation_exists(1, "Partner A", None).unwrap());
}

#[test]
fn migrations_are_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sync.db");

    {
        let db = Database::open(&path).unwrap();
        db.enqueue_task(&sample_task(42, "Partner A", None)).unwrap();
    }

    // Reopening re-runs migrations without error or data loss.
    let db = Database::open(&path).unwrap();
    assert_eq!(db.list_tasks().unwrap().len(), 1);
}
