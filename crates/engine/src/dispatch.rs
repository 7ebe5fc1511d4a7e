// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Dispatcher: drives one queued task through serialization, duplicate
//! guarding, delivery, and bookkeeping.
//!
//! Every collaborator is injected: storage, entity store, site registry,
//! push client, and the messenger that surfaces outcomes to whoever
//! triggered the dispatch. Outcome contract:
//!
//! - unknown task id: error, no audit entry, no notification
//! - any other failure: task stays queued, exactly one audit entry, one
//!   messenger error
//! - success: queue row deleted, relation written, audit entry appended
//!   (atomically), one messenger success

use chrono::Utc;
use serde_json::Value;

use hs_core::{
    payload, Database, EntityStore, EntityType, RelationRecord, SiteRegistry, SyncTask,
};

use crate::push::{PushClient, PushError};
use crate::transport::{HttpTransport, PushTransport};

/// User-visible outcome sink.
///
/// The CLI prints to the console; a future web surface would render status
/// messages; tests collect them.
pub trait Messenger {
    /// Report a successful push.
    fn success(&mut self, message: &str);

    /// Report a failed push.
    fn error(&mut self, message: &str);
}

/// Error type for dispatch operations.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// No queued task with this id.
    #[error("sync task not found: {0}")]
    TaskNotFound(i64),

    /// The task names a site absent from the registry.
    #[error("no site named '{0}' is configured")]
    UnknownSite(String),

    /// The local entity vanished between enqueue and dispatch.
    #[error("{entity_type} {id} no longer exists in the entity store")]
    EntityGone {
        /// Entity type of the vanished entity.
        entity_type: EntityType,
        /// Identifier that failed to resolve.
        id: i64,
    },

    /// A relation for this `(entity, site, language)` already exists.
    #[error("'{title}' was already synchronized to {site}")]
    AlreadySynchronized {
        /// Title of the entity, for the operator message.
        title: String,
        /// Destination site name.
        site: String,
    },

    /// Serialization or storage failure.
    #[error(transparent)]
    Core(#[from] hs_core::Error),

    /// Delivery failure.
    #[error(transparent)]
    Push(#[from] PushError),
}

/// Result type for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Dispatches queued tasks to their remote sites.
pub struct Dispatcher<'a, T: PushTransport = HttpTransport> {
    db: &'a mut Database,
    store: &'a dyn EntityStore,
    sites: &'a SiteRegistry,
    client: PushClient<T>,
    messenger: &'a mut dyn Messenger,
}

impl<'a, T: PushTransport> Dispatcher<'a, T> {
    /// Create a dispatcher over injected collaborators.
    pub fn new(
        db: &'a mut Database,
        store: &'a dyn EntityStore,
        sites: &'a SiteRegistry,
        client: PushClient<T>,
        messenger: &'a mut dyn Messenger,
    ) -> Self {
        Dispatcher {
            db,
            store,
            sites,
            client,
            messenger,
        }
    }

    /// Dispatch one queued task.
    ///
    /// On success the task is removed from the queue; on failure it stays
    /// queued for a later retry. Either way the outcome lands in the audit
    /// log, except when the task id itself is unknown.
    pub fn dispatch(&mut self, task_id: i64) -> DispatchResult<()> {
        let task = self.db.get_task(task_id).map_err(|e| match e {
            hs_core::Error::TaskNotFound(id) => DispatchError::TaskNotFound(id),
            other => DispatchError::Core(other),
        })?;

        match self.deliver(&task) {
            Ok((record, receiver_message)) => {
                let log_message = match receiver_message {
                    Some(msg) => msg,
                    None => format!(
                        "'{}' pushed to {} (remote id {})",
                        record.title, record.remote_site, record.remote_id
                    ),
                };
                self.db.record_success(task.id, &record, &log_message)?;
                self.messenger.success(&log_message);
                tracing::info!(
                    task_id = task.id,
                    remote_id = record.remote_id,
                    site = %record.remote_site,
                    "push succeeded"
                );
                Ok(())
            }
            Err(err) => {
                let message = err.to_string();
                self.db.append_log(task.id, &message)?;
                self.messenger.error(&message);
                tracing::warn!(task_id = task.id, error = %message, "push failed");
                Err(err)
            }
        }
    }

    fn deliver(&self, task: &SyncTask) -> DispatchResult<(RelationRecord, Option<String>)> {
        let site = self
            .sites
            .get(&task.remote_site)
            .ok_or_else(|| DispatchError::UnknownSite(task.remote_site.clone()))?;

        let language = task.language.as_deref();
        if self
            .db
            .relation_exists(task.local_id, &site.name, language)?
        {
            return Err(DispatchError::AlreadySynchronized {
                title: task.title.clone(),
                site: site.name.clone(),
            });
        }

        let (body, content_type, title) = self.build_payload(task)?;
        let receipt = self.client.push(site, task.entity_type, &body)?;

        let record = RelationRecord {
            id: 0,
            local_id: task.local_id,
            title,
            remote_id: receipt.remote_id,
            content_type,
            entity_type: task.entity_type,
            remote_site: site.name.clone(),
            language: task.language.clone(),
            operation_date: Utc::now(),
        };

        Ok((record, receipt.message))
    }

    /// Serialize the task's entity. Returns the wire body, the relation
    /// record's content-type marker, and the title at push time.
    fn build_payload(&self, task: &SyncTask) -> DispatchResult<(Value, String, String)> {
        let gone = || DispatchError::EntityGone {
            entity_type: task.entity_type,
            id: task.local_id,
        };

        match task.entity_type {
            EntityType::Content => {
                let item = self.store.content(task.local_id).ok_or_else(gone)?;
                let language = task.language.as_deref();
                let body = payload::content_payload(self.store, item, language)?;
                let (_, title, _) = item.localized(language);
                Ok((body, item.content_type.clone(), title.to_string()))
            }
            EntityType::Media => {
                let asset = self.store.media(task.local_id).ok_or_else(gone)?;
                let body = payload::media_payload(asset)?;
                Ok((body, "media".to_string(), asset.name.clone()))
            }
            EntityType::Menu => {
                let link = self.store.menu_link(task.local_id).ok_or_else(gone)?;
                let body = payload::menu_link_payload(link);
                Ok((body, "link".to_string(), link.title.clone()))
            }
            EntityType::TaxonomyTerm => {
                let term = self.store.term(task.local_id).ok_or_else(gone)?;
                let body = payload::term_payload(self.store, term);
                Ok((body, "taxonomy".to_string(), term.name.clone()))
            }
        }
    }

    /// Probe a site's receiving endpoint. Not queue-related; surfaces the
    /// same credential/status classification as a real push.
    pub fn test_connection(&self, site_name: &str) -> DispatchResult<String> {
        let site = self
            .sites
            .get(site_name)
            .ok_or_else(|| DispatchError::UnknownSite(site_name.to_string()))?;

        Ok(self.client.test_connection(site)?)
    }
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
