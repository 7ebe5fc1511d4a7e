// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! hs-core: Shared library for the hubsync content synchronization engine.
//!
//! This crate provides the data model, SQLite storage (sync queue, relation
//! registry, audit log), payload serializers, and the remote site registry
//! used by the hs-engine dispatcher and the hubsync CLI.

pub mod db;
pub mod entity;
pub mod error;
pub mod payload;
pub mod site;
pub mod task;

pub use db::Database;
pub use entity::{
    ContentItem, EntityStore, MediaAsset, MediaKind, MemoryStore, MenuLink, StructureNode,
    TaxonomyTerm, Translation,
};
pub use error::{Error, Result};
pub use payload::MAX_STRUCTURE_DEPTH;
pub use site::{RemoteSite, SiteRegistry};
pub use task::{AuditLogEntry, EntityType, Operation, RelationRecord, SyncTask, TaskStatus};
