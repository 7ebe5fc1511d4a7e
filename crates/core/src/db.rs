// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! SQLite-backed storage for the sync queue, relation registry, and audit log.
//!
//! The [`Database`] struct provides all durable state the engine shares:
//! pending [`SyncTask`] rows, immutable [`RelationRecord`] rows, and the
//! append-only [`AuditLogEntry`] log.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use crate::error::{Error, Result};
use crate::task::{AuditLogEntry, EntityType, RelationRecord, SyncTask};

/// SQL schema for the synchronization database.
pub const SCHEMA: &str = r#"
-- Pending synchronization tasks, one row per (entity, remote site) pair.
-- Duplicates are allowed by design; the relation registry de-duplicates
-- at push time.
CREATE TABLE IF NOT EXISTS sync_queue (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    local_id INTEGER NOT NULL,
    entity_type TEXT NOT NULL,
    title TEXT NOT NULL,
    remote_site TEXT NOT NULL,
    operation TEXT NOT NULL DEFAULT 'create',
    status TEXT NOT NULL DEFAULT 'awaiting',
    language TEXT,
    created_at TEXT NOT NULL
);

-- Local-to-remote identifier mappings, written once per successful push.
-- Never updated or deleted by the engine.
CREATE TABLE IF NOT EXISTS sync_relations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    local_id INTEGER NOT NULL,
    title TEXT NOT NULL,
    remote_id INTEGER NOT NULL,
    content_type TEXT,
    entity_type TEXT NOT NULL,
    remote_site TEXT NOT NULL,
    language TEXT,
    operation_date TEXT NOT NULL
);

-- Append-only dispatch outcome log, keyed by queue task id.
CREATE TABLE IF NOT EXISTS audit_log (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    task_id INTEGER NOT NULL,
    message TEXT NOT NULL,
    created_at TEXT NOT NULL
);

-- Indexes
CREATE INDEX IF NOT EXISTS idx_queue_site ON sync_queue(remote_site);
CREATE INDEX IF NOT EXISTS idx_relations_lookup
    ON sync_relations(local_id, remote_site, language);
CREATE INDEX IF NOT EXISTS idx_log_task ON audit_log(task_id);
"#;

/// Parse a string value from the database, boxing the typed error into a
/// rusqlite conversion failure so [`lift`] can recover it.
fn parse_db<T>(value: &str) -> std::result::Result<T, rusqlite::Error>
where
    T: std::str::FromStr<Err = Error>,
{
    value.parse().map_err(|e: Error| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Recover a typed [`Error`] boxed by [`parse_db`], so callers see
/// `UnsupportedEntityType` and friends instead of a generic database error.
fn lift(e: rusqlite::Error) -> Error {
    match e {
        rusqlite::Error::FromSqlConversionFailure(idx, ty, boxed) => {
            match boxed.downcast::<Error>() {
                Ok(err) => *err,
                Err(boxed) => {
                    Error::Database(rusqlite::Error::FromSqlConversionFailure(idx, ty, boxed))
                }
            }
        }
        other => Error::Database(other),
    }
}

/// Parse an RFC3339 timestamp from the database.
fn parse_timestamp(
    value: &str,
    column: &str,
) -> std::result::Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(Error::CorruptedData(format!(
                    "invalid timestamp '{value}' in column '{column}'"
                ))),
            )
        })
}

/// Run schema creation and all migrations on a database connection.
///
/// This is the single migration path for all consumers (engine and CLI).
/// It applies the canonical schema and runs idempotent migrations to upgrade
/// older databases that may be missing columns.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    migrate_add_relation_columns(conn)?;
    Ok(())
}

/// Migration: Add entity_type and language columns to sync_relations.
///
/// Early deployments tracked relations per entity id only; per-language
/// delivery and non-content entity types arrived later.
fn migrate_add_relation_columns(conn: &Connection) -> Result<()> {
    let columns = ["entity_type", "language"];

    for column in columns {
        let has_column: bool = conn
            .query_row(
                "SELECT COUNT(*) > 0 FROM pragma_table_info('sync_relations') WHERE name = ?1",
                [column],
                |row| row.get(0),
            )
            .unwrap_or(false);

        if !has_column {
            let sql = format!("ALTER TABLE sync_relations ADD COLUMN {column} TEXT");
            conn.execute(&sql, [])?;
        }
    }

    Ok(())
}

/// SQLite database connection with sync queue, relation, and log operations.
pub struct Database {
    /// The underlying SQLite connection.
    pub conn: Connection,
}

impl Database {
    /// Open a database connection at the given path, creating and migrating if needed.
    pub fn open(path: &Path) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;

        // Enable foreign keys and WAL mode for concurrency
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )?;

        let db = Database { conn };
        run_migrations(&db.conn)?;
        Ok(db)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        let db = Database { conn };
        run_migrations(&db.conn)?;
        Ok(db)
    }

    /// Append a task to the sync queue. Returns the assigned task id.
    ///
    /// No duplicate constraint is enforced here.
    pub fn enqueue_task(&self, task: &SyncTask) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO sync_queue (local_id, entity_type, title, remote_site,
             operation, status, language, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                task.local_id,
                task.entity_type.as_str(),
                task.title,
                task.remote_site,
                task.operation.as_str(),
                task.status.as_str(),
                task.language,
                task.created_at.to_rfc3339(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Get a task by id.
    pub fn get_task(&self, id: i64) -> Result<SyncTask> {
        let task = self
            .conn
            .query_row(
                "SELECT id, local_id, entity_type, title, remote_site,
                        operation, status, language, created_at
                 FROM sync_queue WHERE id = ?1",
                params![id],
                Self::map_task_row,
            )
            .optional()
            .map_err(lift)?;

        task.ok_or(Error::TaskNotFound(id))
    }

    /// Delete a task from the queue. Removing a missing id is not an error.
    pub fn remove_task(&self, id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM sync_queue WHERE id = ?1", params![id])?;
        Ok(())
    }

    /// Check if a task exists.
    pub fn task_exists(&self, id: i64) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sync_queue WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// List all queued tasks for the operator view.
    pub fn list_tasks(&self) -> Result<Vec<SyncTask>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, local_id, entity_type, title, remote_site,
                    operation, status, language, created_at
             FROM sync_queue ORDER BY id",
        )?;

        let tasks = stmt
            .query_map([], Self::map_task_row)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(lift)?;

        Ok(tasks)
    }

    fn map_task_row(row: &rusqlite::Row<'_>) -> std::result::Result<SyncTask, rusqlite::Error> {
        let entity_str: String = row.get(2)?;
        let operation_str: String = row.get(5)?;
        let status_str: String = row.get(6)?;
        let created_str: String = row.get(8)?;

        Ok(SyncTask {
            id: row.get(0)?,
            local_id: row.get(1)?,
            entity_type: parse_db(&entity_str)?,
            title: row.get(3)?,
            remote_site: row.get(4)?,
            operation: parse_db(&operation_str)?,
            status: parse_db(&status_str)?,
            language: row.get(7)?,
            created_at: parse_timestamp(&created_str, "created_at")?,
        })
    }

    /// Check whether a `(local_id, remote_site, language)` mapping already
    /// exists. This is the duplicate-delivery guard.
    pub fn relation_exists(
        &self,
        local_id: i64,
        remote_site: &str,
        language: Option<&str>,
    ) -> Result<bool> {
        let count: i64 = match language {
            Some(lang) => self.conn.query_row(
                "SELECT COUNT(*) FROM sync_relations
                 WHERE local_id = ?1 AND remote_site = ?2 AND language = ?3",
                params![local_id, remote_site, lang],
                |row| row.get(0),
            )?,
            None => self.conn.query_row(
                "SELECT COUNT(*) FROM sync_relations
                 WHERE local_id = ?1 AND remote_site = ?2 AND language IS NULL",
                params![local_id, remote_site],
                |row| row.get(0),
            )?,
        };
        Ok(count > 0)
    }

    /// Insert a relation record. Returns the assigned row id.
    pub fn insert_relation(&self, record: &RelationRecord) -> Result<i64> {
        Self::insert_relation_on(&self.conn, record)
    }

    fn insert_relation_on(conn: &Connection, record: &RelationRecord) -> Result<i64> {
        conn.execute(
            "INSERT INTO sync_relations (local_id, title, remote_id, content_type,
             entity_type, remote_site, language, operation_date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                record.local_id,
                record.title,
                record.remote_id,
                record.content_type,
                record.entity_type.as_str(),
                record.remote_site,
                record.language,
                record.operation_date.to_rfc3339(),
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// List all relation records, oldest first.
    pub fn list_relations(&self) -> Result<Vec<RelationRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, local_id, title, remote_id, content_type,
                    entity_type, remote_site, language, operation_date
             FROM sync_relations ORDER BY id",
        )?;

        let records = stmt
            .query_map([], Self::map_relation_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(records)
    }

    /// Find the relation record for a `(local_id, remote_site, language)`
    /// triple, if one exists.
    pub fn find_relation(
        &self,
        local_id: i64,
        remote_site: &str,
        language: Option<&str>,
    ) -> Result<Option<RelationRecord>> {
        let record = match language {
            Some(lang) => self
                .conn
                .query_row(
                    "SELECT id, local_id, title, remote_id, content_type,
                            entity_type, remote_site, language, operation_date
                     FROM sync_relations
                     WHERE local_id = ?1 AND remote_site = ?2 AND language = ?3",
                    params![local_id, remote_site, lang],
                    Self::map_relation_row,
                )
                .optional()?,
            None => self
                .conn
                .query_row(
                    "SELECT id, local_id, title, remote_id, content_type,
                            entity_type, remote_site, language, operation_date
                     FROM sync_relations
                     WHERE local_id = ?1 AND remote_site = ?2 AND language IS NULL",
                    params![local_id, remote_site],
                    Self::map_relation_row,
                )
                .optional()?,
        };
        Ok(record)
    }

    fn map_relation_row(
        row: &rusqlite::Row<'_>,
    ) -> std::result::Result<RelationRecord, rusqlite::Error> {
        let entity_str: String = row.get(5)?;
        let date_str: String = row.get(8)?;

        Ok(RelationRecord {
            id: row.get(0)?,
            local_id: row.get(1)?,
            title: row.get(2)?,
            remote_id: row.get(3)?,
            content_type: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
            entity_type: parse_db::<EntityType>(&entity_str)?,
            remote_site: row.get(6)?,
            language: row.get(7)?,
            operation_date: parse_timestamp(&date_str, "operation_date")?,
        })
    }

    /// Append an audit log entry for a task. Returns the assigned entry id.
    pub fn append_log(&self, task_id: i64, message: &str) -> Result<i64> {
        Self::append_log_on(&self.conn, task_id, message)
    }

    fn append_log_on(conn: &Connection, task_id: i64, message: &str) -> Result<i64> {
        conn.execute(
            "INSERT INTO audit_log (task_id, message, created_at)
             VALUES (?1, ?2, ?3)",
            params![task_id, message, Utc::now().to_rfc3339()],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Get all audit log entries for a task, oldest first.
    pub fn get_logs(&self, task_id: i64) -> Result<Vec<AuditLogEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, task_id, message, created_at
             FROM audit_log WHERE task_id = ?1 ORDER BY id",
        )?;

        let entries = stmt
            .query_map(params![task_id], |row| {
                let created_str: String = row.get(3)?;
                Ok(AuditLogEntry {
                    id: row.get(0)?,
                    task_id: row.get(1)?,
                    message: row.get(2)?,
                    created_at: parse_timestamp(&created_str, "created_at")?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    /// Count all audit log entries (across all tasks).
    pub fn count_logs(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM audit_log", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Record a successful push: delete the queue row, insert the relation
    /// record, and append the success log entry in a single transaction.
    ///
    /// A crash between delivery and this call is recovered by the push-time
    /// relation check on the next dispatch (idempotent resend on the
    /// receiver side).
    pub fn record_success(
        &mut self,
        task_id: i64,
        record: &RelationRecord,
        log_message: &str,
    ) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM sync_queue WHERE id = ?1", params![task_id])?;
        Self::insert_relation_on(&tx, record)?;
        Self::append_log_on(&tx, task_id, log_message)?;
        tx.commit()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "db_tests.rs"]
mod tests;
