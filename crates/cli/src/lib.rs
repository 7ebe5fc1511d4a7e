// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! hsrs - library backing the `hubsync` CLI.
//!
//! The binary is a thin operator surface over [`hs_core`] (model, storage,
//! serializers) and [`hs_engine`] (push client, dispatcher). Configuration
//! comes from `hubsync.toml`; the local entities are read from a JSON
//! fixture through [`hs_core::MemoryStore`].

mod cli;
mod commands;

pub mod config;
pub mod error;

pub use cli::{Cli, Command, EnqueueTarget};
pub use config::Config;
pub use error::{Error, Result};

/// Initialize stderr logging from the `HUBSYNC_LOG` filter variable.
///
/// Defaults to `warn` when the variable is unset.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("HUBSYNC_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Run a parsed CLI invocation.
pub fn run(cli: Cli) -> Result<()> {
    let config = Config::load(&cli.config)?;
    tracing::debug!(config = %cli.config.display(), "configuration loaded");

    match cli.command {
        Command::Enqueue { target } => commands::enqueue(&config, &target),
        Command::Queue => commands::queue(&config),
        Command::Dispatch { task_id } => commands::dispatch(&config, task_id),
        Command::Remove { task_id } => commands::remove(&config, task_id),
        Command::Logs { task_id } => commands::logs(&config, task_id),
        Command::Relations => commands::relations(&config),
        Command::Sites => commands::sites(&config),
        Command::TestConnection { site } => commands::test_connection(&config, &site),
    }
}
