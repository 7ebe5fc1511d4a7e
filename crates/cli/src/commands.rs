// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Command handlers: each maps one subcommand to engine operations and
//! plain-text output.

use chrono::{DateTime, Utc};

use hs_core::{Database, MemoryStore};
use hs_engine::{
    enqueue_content, enqueue_media, enqueue_menu_link, enqueue_term, DispatchError, Dispatcher,
    Messenger, PushClient,
};

use crate::cli::EnqueueTarget;
use crate::config::Config;
use crate::error::{Error, Result};

/// Messenger printing successes to stdout.
///
/// Failures are not printed here: a failed dispatch propagates as an error
/// and is reported once through the CLI's error path.
struct ConsoleMessenger;

impl Messenger for ConsoleMessenger {
    fn success(&mut self, message: &str) {
        println!("{message}");
    }

    fn error(&mut self, _message: &str) {}
}

fn format_time(time: &DateTime<Utc>) -> String {
    time.format("%Y-%m-%d %H:%M:%S").to_string()
}

fn open_db(config: &Config) -> Result<Database> {
    Ok(Database::open(&config.db_path())?)
}

fn load_store(config: &Config) -> Result<MemoryStore> {
    Ok(MemoryStore::from_json_file(&config.entities_path())?)
}

pub fn enqueue(config: &Config, target: &EnqueueTarget) -> Result<()> {
    let db = open_db(config)?;
    let store = load_store(config)?;
    let sites = config.registry();

    let task_ids = match target {
        EnqueueTarget::Content { id, language } => {
            enqueue_content(&db, &store, &sites, *id, language.as_deref())?
        }
        EnqueueTarget::Media { id } => enqueue_media(&db, &store, &sites, *id)?,
        EnqueueTarget::Menu { id } => enqueue_menu_link(&db, &store, &sites, *id)?,
        EnqueueTarget::Term { id } => enqueue_term(&db, &store, &sites, *id)?,
    };

    if task_ids.is_empty() {
        println!("no site subscribes to this entity; nothing queued");
    } else {
        let ids: Vec<String> = task_ids.iter().map(|id| id.to_string()).collect();
        println!("queued {} task(s): {}", task_ids.len(), ids.join(", "));
    }
    Ok(())
}

pub fn queue(config: &Config) -> Result<()> {
    let db = open_db(config)?;
    let tasks = db.list_tasks()?;

    if tasks.is_empty() {
        println!("queue is empty");
        return Ok(());
    }

    println!(
        "{:>5}  {:<13}  {:>8}  {:<28}  {:<20}  {:<5}  {}",
        "ID", "TYPE", "LOCAL", "TITLE", "SITE", "LANG", "CREATED"
    );
    for task in tasks {
        println!(
            "{:>5}  {:<13}  {:>8}  {:<28}  {:<20}  {:<5}  {}",
            task.id,
            task.entity_type.as_str(),
            task.local_id,
            task.title,
            task.remote_site,
            task.language.as_deref().unwrap_or("-"),
            format_time(&task.created_at),
        );
    }
    Ok(())
}

pub fn dispatch(config: &Config, task_id: i64) -> Result<()> {
    let mut db = open_db(config)?;
    let store = load_store(config)?;
    let sites = config.registry();
    let client = PushClient::new()?;
    let mut messenger = ConsoleMessenger;

    let mut dispatcher = Dispatcher::new(&mut db, &store, &sites, client, &mut messenger);
    dispatcher.dispatch(task_id)?;
    Ok(())
}

pub fn remove(config: &Config, task_id: i64) -> Result<()> {
    let db = open_db(config)?;

    // Surface a missing id instead of silently succeeding.
    let task = db.get_task(task_id)?;
    db.remove_task(task_id)?;
    println!("removed task {} ('{}')", task.id, task.title);
    Ok(())
}

pub fn logs(config: &Config, task_id: i64) -> Result<()> {
    let db = open_db(config)?;
    let entries = db.get_logs(task_id)?;

    if entries.is_empty() {
        println!("no log entries for task {task_id}");
        return Ok(());
    }

    for entry in entries {
        println!("{}  {}", format_time(&entry.created_at), entry.message);
    }
    Ok(())
}

pub fn relations(config: &Config) -> Result<()> {
    let db = open_db(config)?;
    let records = db.list_relations()?;

    if records.is_empty() {
        println!("no relations recorded");
        return Ok(());
    }

    println!(
        "{:>5}  {:<13}  {:>8}  {:>8}  {:<28}  {:<20}  {:<5}  {}",
        "ID", "TYPE", "LOCAL", "REMOTE", "TITLE", "SITE", "LANG", "DATE"
    );
    for record in records {
        println!(
            "{:>5}  {:<13}  {:>8}  {:>8}  {:<28}  {:<20}  {:<5}  {}",
            record.id,
            record.entity_type.as_str(),
            record.local_id,
            record.remote_id,
            record.title,
            record.remote_site,
            record.language.as_deref().unwrap_or("-"),
            format_time(&record.operation_date),
        );
    }
    Ok(())
}

pub fn sites(config: &Config) -> Result<()> {
    let registry = config.registry();

    if registry.is_empty() {
        println!("no sites configured");
        return Ok(());
    }

    for site in &registry {
        println!("{}  {}", site.name, site.url);
        if !site.content_types.is_empty() {
            println!("  content types: {}", site.content_types.join(", "));
        }
        if !site.menus.is_empty() {
            println!("  menus:         {}", site.menus.join(", "));
        }
        if !site.vocabularies.is_empty() {
            println!("  vocabularies:  {}", site.vocabularies.join(", "));
        }
        if !site.languages.is_empty() {
            println!("  languages:     {}", site.languages.join(", "));
        }
    }
    Ok(())
}

pub fn test_connection(config: &Config, site_name: &str) -> Result<()> {
    let registry = config.registry();
    let site = registry
        .get(site_name)
        .ok_or_else(|| DispatchError::UnknownSite(site_name.to_string()))
        .map_err(Error::Dispatch)?;

    let client = PushClient::new()?;
    let message = client.test_connection(site)?;
    println!("{}: {}", site.name, message);
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
