// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hubsync")]
#[command(about = "Push content, media, menu links, and taxonomy terms to remote peer sites")]
#[command(
    long_about = "Push content, media, menu links, and taxonomy terms to remote peer sites.\n\n\
    Entities are queued per subscribing site, dispatched over authenticated HTTP,\n\
    and tracked in a local relation registry so nothing is delivered twice."
)]
pub struct Cli {
    /// Path to the configuration file.
    #[arg(long, short, global = true, default_value = "hubsync.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Queue an entity for every subscribing site
    Enqueue {
        #[command(subcommand)]
        target: EnqueueTarget,
    },

    /// List pending synchronization tasks
    Queue,

    /// Push one queued task to its remote site
    #[command(arg_required_else_help = true)]
    Dispatch {
        /// Task id from the queue
        task_id: i64,
    },

    /// Remove a task from the queue without pushing it
    #[command(arg_required_else_help = true)]
    Remove {
        /// Task id from the queue
        task_id: i64,
    },

    /// Show the audit log for a task
    #[command(arg_required_else_help = true)]
    Logs {
        /// Task id from the queue
        task_id: i64,
    },

    /// List recorded local-to-remote relations
    Relations,

    /// List configured remote sites and their subscriptions
    Sites,

    /// Probe a remote site's receiving endpoint
    #[command(arg_required_else_help = true)]
    TestConnection {
        /// Site name from the configuration
        site: String,
    },
}

#[derive(Subcommand)]
pub enum EnqueueTarget {
    /// Queue a content item (filtered by each site's content types)
    Content {
        /// Local content id
        id: i64,

        /// Language variant to push (defaults to the item's own language)
        #[arg(long, short)]
        language: Option<String>,
    },

    /// Queue a media asset (every configured site receives media)
    Media {
        /// Local media id
        id: i64,
    },

    /// Queue a menu link (filtered by each site's menus)
    Menu {
        /// Local menu link id
        id: i64,
    },

    /// Queue a taxonomy term (filtered by each site's vocabularies)
    Term {
        /// Local term id
        id: i64,
    },
}
