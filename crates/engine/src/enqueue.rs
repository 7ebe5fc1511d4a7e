// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Subscription-filtered enqueueing.
//!
//! One task per matching remote site. Content is filtered by content type,
//! menu links by menu name, taxonomy terms by vocabulary. Media has no
//! filter: every configured site gets a task. A site matching nothing is
//! not an error; the result is simply fewer (possibly zero) tasks.

use hs_core::{Database, EntityStore, EntityType, SiteRegistry, SyncTask};

/// Error type for enqueue operations.
#[derive(Debug, thiserror::Error)]
pub enum EnqueueError {
    /// The local entity does not exist in the store.
    #[error("{entity_type} {id} not found in the entity store")]
    EntityNotFound {
        /// Entity type that was requested.
        entity_type: EntityType,
        /// Identifier that failed to resolve.
        id: i64,
    },

    /// Storage failure.
    #[error(transparent)]
    Core(#[from] hs_core::Error),
}

/// Result type for enqueue operations.
pub type EnqueueResult<T> = Result<T, EnqueueError>;

fn push_task(
    db: &Database,
    local_id: i64,
    entity_type: EntityType,
    title: &str,
    site: &str,
    language: Option<&str>,
) -> EnqueueResult<i64> {
    let task = SyncTask::new(
        local_id,
        entity_type,
        title.to_string(),
        site.to_string(),
        language.map(String::from),
    );
    let id = db.enqueue_task(&task)?;
    tracing::info!(task_id = id, %entity_type, local_id, site, "task enqueued");
    Ok(id)
}

/// Enqueue a content item for every site subscribing to its content type.
///
/// The queued title is the requested language variant's title when one
/// exists, so the operator view shows what will actually be pushed.
pub fn enqueue_content(
    db: &Database,
    store: &dyn EntityStore,
    sites: &SiteRegistry,
    id: i64,
    language: Option<&str>,
) -> EnqueueResult<Vec<i64>> {
    let item = store.content(id).ok_or(EnqueueError::EntityNotFound {
        entity_type: EntityType::Content,
        id,
    })?;
    let (_, title, _) = item.localized(language);

    let mut task_ids = Vec::new();
    for site in sites {
        if site.wants_content_type(&item.content_type) {
            task_ids.push(push_task(
                db,
                id,
                EntityType::Content,
                title,
                &site.name,
                language,
            )?);
        }
    }
    Ok(task_ids)
}

/// Enqueue a media asset for every configured site.
pub fn enqueue_media(
    db: &Database,
    store: &dyn EntityStore,
    sites: &SiteRegistry,
    id: i64,
) -> EnqueueResult<Vec<i64>> {
    let asset = store.media(id).ok_or(EnqueueError::EntityNotFound {
        entity_type: EntityType::Media,
        id,
    })?;

    let mut task_ids = Vec::new();
    for site in sites {
        task_ids.push(push_task(
            db,
            id,
            EntityType::Media,
            &asset.name,
            &site.name,
            None,
        )?);
    }
    Ok(task_ids)
}

/// Enqueue a menu link for every site subscribing to its menu.
///
/// Disabled links are never enqueued.
pub fn enqueue_menu_link(
    db: &Database,
    store: &dyn EntityStore,
    sites: &SiteRegistry,
    id: i64,
) -> EnqueueResult<Vec<i64>> {
    let link = store.menu_link(id).ok_or(EnqueueError::EntityNotFound {
        entity_type: EntityType::Menu,
        id,
    })?;

    if !link.enabled {
        tracing::debug!(local_id = id, "menu link disabled, nothing enqueued");
        return Ok(Vec::new());
    }

    let mut task_ids = Vec::new();
    for site in sites {
        if site.wants_menu(&link.menu_name) {
            task_ids.push(push_task(
                db,
                id,
                EntityType::Menu,
                &link.title,
                &site.name,
                None,
            )?);
        }
    }
    Ok(task_ids)
}

/// Enqueue a taxonomy term for every site subscribing to its vocabulary.
pub fn enqueue_term(
    db: &Database,
    store: &dyn EntityStore,
    sites: &SiteRegistry,
    id: i64,
) -> EnqueueResult<Vec<i64>> {
    let term = store.term(id).ok_or(EnqueueError::EntityNotFound {
        entity_type: EntityType::TaxonomyTerm,
        id,
    })?;

    let mut task_ids = Vec::new();
    for site in sites {
        if site.wants_vocabulary(&term.vocabulary) {
            task_ids.push(push_task(
                db,
                id,
                EntityType::TaxonomyTerm,
                &term.name,
                &site.name,
                None,
            )?);
        }
    }
    Ok(task_ids)
}

#[cfg(test)]
#[path = "enqueue_tests.rs"]
mod tests;
