// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the hubsync CLI.

use thiserror::Error;

/// All possible errors the CLI can surface.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file could not be read or parsed.
    #[error("config error: {0}")]
    Config(String),

    /// Storage or serialization failure.
    #[error(transparent)]
    Core(#[from] hs_core::Error),

    /// Enqueue failure.
    #[error(transparent)]
    Enqueue(#[from] hs_engine::EnqueueError),

    /// Dispatch failure.
    #[error(transparent)]
    Dispatch(#[from] hs_engine::DispatchError),

    /// Push or connection-test failure.
    #[error(transparent)]
    Push(#[from] hs_engine::PushError),

    /// Filesystem failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for CLI operations.
pub type Result<T> = std::result::Result<T, Error>;
