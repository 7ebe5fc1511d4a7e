// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for hs-core operations.

use thiserror::Error;

/// All possible errors that can occur in hs-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("sync task not found: {0}")]
    TaskNotFound(i64),

    #[error(
        "unsupported entity type: '{0}'\n  hint: valid types are: content, media, menu, taxonomy_term"
    )]
    UnsupportedEntityType(String),

    #[error("invalid operation: '{0}'\n  hint: the only valid operation is: create")]
    InvalidOperation(String),

    #[error("invalid task status: '{0}'\n  hint: the only valid status is: awaiting")]
    InvalidStatus(String),

    #[error("unsupported media type: '{0}'")]
    UnsupportedMediaType(String),

    #[error("no file attached to media {0}")]
    MediaFileMissing(i64),

    #[error("structure tree deeper than {0} levels, refusing to serialize")]
    StructureTooDeep(usize),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupted data: {0}")]
    CorruptedData(String),
}

/// A specialized Result type for hs-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
