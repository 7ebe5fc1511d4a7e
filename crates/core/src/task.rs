// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Core synchronization types: SyncTask, RelationRecord, and AuditLogEntry.
//!
//! A [`SyncTask`] is one pending unit of work targeting one local entity and
//! one remote site. A [`RelationRecord`] is the durable proof that a push
//! succeeded, mapping the local identifier to the identifier the remote site
//! assigned. [`AuditLogEntry`] rows record every dispatch outcome.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// The kind of local entity a sync task refers to.
///
/// Dispatch branches on this tag to select the matching serializer and
/// receiver endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    /// A content item (document), possibly with translations and a
    /// composite structure tree.
    Content,
    /// A media asset (image, audio, video, document file, remote video).
    Media,
    /// A navigation menu link.
    Menu,
    /// A taxonomy term within a vocabulary.
    TaxonomyTerm,
}

impl EntityType {
    /// Returns the string representation used in storage and on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Content => "content",
            EntityType::Media => "media",
            EntityType::Menu => "menu",
            EntityType::TaxonomyTerm => "taxonomy_term",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "content" => Ok(EntityType::Content),
            "media" => Ok(EntityType::Media),
            "menu" => Ok(EntityType::Menu),
            "taxonomy_term" => Ok(EntityType::TaxonomyTerm),
            _ => Err(Error::UnsupportedEntityType(s.to_string())),
        }
    }
}

/// The synchronization operation a task asks for.
///
/// Only creation is supported; updates of already-delivered content are
/// guarded off by the relation registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Create the entity on the remote site.
    Create,
}

impl Operation {
    /// Returns the string representation used in storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Create => "create",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Operation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "create" => Ok(Operation::Create),
            _ => Err(Error::InvalidOperation(s.to_string())),
        }
    }
}

/// Workflow status of a queued task.
///
/// Tasks are deleted on success and retained unchanged on failure, so the
/// only persisted status is `awaiting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Waiting for an operator (or automation) to trigger dispatch.
    Awaiting,
}

impl TaskStatus {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Awaiting => "awaiting",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "awaiting" => Ok(TaskStatus::Awaiting),
            _ => Err(Error::InvalidStatus(s.to_string())),
        }
    }
}

/// One pending unit of synchronization work.
///
/// Duplicates are allowed: the same `(local_id, remote_site)` pair may be
/// enqueued more than once. De-duplication happens at push time against the
/// relation registry, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncTask {
    /// Database-assigned queue identifier.
    pub id: i64,
    /// Identifier of the local entity to push.
    pub local_id: i64,
    /// Which serializer/endpoint pair handles this task.
    pub entity_type: EntityType,
    /// Title of the entity at enqueue time (for the operator view).
    pub title: String,
    /// Name of the destination site in the site registry.
    pub remote_site: String,
    /// Requested operation.
    pub operation: Operation,
    /// Queue status.
    pub status: TaskStatus,
    /// Language variant to push. Only content tasks carry one; `None` means
    /// the entity's default language.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// When the task was enqueued.
    pub created_at: DateTime<Utc>,
}

impl SyncTask {
    /// Creates a new awaiting `create` task with the current timestamp.
    ///
    /// The id is assigned by the database on insert.
    pub fn new(
        local_id: i64,
        entity_type: EntityType,
        title: String,
        remote_site: String,
        language: Option<String>,
    ) -> Self {
        SyncTask {
            id: 0,
            local_id,
            entity_type,
            title,
            remote_site,
            operation: Operation::Create,
            status: TaskStatus::Awaiting,
            language,
            created_at: Utc::now(),
        }
    }
}

/// A durable local-to-remote identifier mapping, written once per successful
/// push per `(local_id, remote_site, language)`.
///
/// Its presence is the sole authority for "already synced": the dispatcher
/// checks it before every push and refuses to deliver twice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationRecord {
    /// Database-assigned identifier.
    pub id: i64,
    /// Local entity identifier.
    pub local_id: i64,
    /// Entity title at push time.
    pub title: String,
    /// Identifier assigned by the remote site.
    pub remote_id: i64,
    /// Content bundle for content pushes; the legacy markers `media`,
    /// `link`, and `taxonomy` for the other entity types.
    pub content_type: String,
    /// Which entity type was pushed.
    pub entity_type: EntityType,
    /// Destination site name.
    pub remote_site: String,
    /// Language variant that was pushed, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// When the push succeeded.
    pub operation_date: DateTime<Utc>,
}

/// An append-only record of one dispatch outcome for a queued task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    /// Database-assigned identifier.
    pub id: i64,
    /// The queue task this entry belongs to.
    pub task_id: i64,
    /// Human-readable outcome description.
    pub message: String,
    /// When the entry was written.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
