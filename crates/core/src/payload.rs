// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Transport payload builders.
//!
//! Each entity type has its own wire shape; the field names here are a
//! binding compatibility surface shared with deployed receiver endpoints
//! and must not be renamed. Content items carry their composite structure
//! tree, serialized recursively with a defensive depth bound.

use serde_json::{json, Map, Value};

use crate::entity::{ContentItem, EntityStore, MediaAsset, MediaKind, MenuLink, StructureNode, TaxonomyTerm};
use crate::error::{Error, Result};

/// Maximum structure tree depth accepted by the serializer.
///
/// The data model is a tree by convention only; a cyclic reference would
/// recurse forever without this bound.
pub const MAX_STRUCTURE_DEPTH: usize = 32;

/// Serialize a media asset to its wire shape.
///
/// File-backed kinds become `{type, url, filename}`; remote video becomes
/// `{type: "remote_video", url}` (no file is ever downloaded). Any other
/// bundle is a hard failure.
pub fn media_payload(asset: &MediaAsset) -> Result<Value> {
    match &asset.kind {
        MediaKind::RemoteVideo => Ok(json!({
            "type": "remote_video",
            "url": asset.url,
        })),
        kind if kind.is_file_backed() => {
            let filename = asset
                .filename
                .as_deref()
                .ok_or(Error::MediaFileMissing(asset.id))?;
            Ok(json!({
                "type": kind.as_str(),
                "url": asset.url,
                "filename": filename,
            }))
        }
        MediaKind::Other(bundle) => Err(Error::UnsupportedMediaType(bundle.clone())),
        // is_file_backed covers every remaining named kind
        kind => Err(Error::UnsupportedMediaType(kind.as_str().to_string())),
    }
}

/// Serialize a content item to its wire shape.
///
/// The payload is `{"content": {...}, "entity_type": <bundle>,
/// "paragraphs": [...]}`. The requested language variant is used when it
/// exists, otherwise the default language. A referenced media asset is
/// embedded when it resolves and is shippable; a dangling or unsupported
/// reference is skipped, never an error.
pub fn content_payload(
    store: &dyn EntityStore,
    item: &ContentItem,
    language: Option<&str>,
) -> Result<Value> {
    let (langcode, title, body) = item.localized(language);

    let mut content = Map::new();
    content.insert("title".into(), json!(title));
    content.insert("body".into(), json!(body));
    content.insert("nid".into(), json!(item.id));
    content.insert("content_type".into(), json!(item.content_type));
    content.insert("language".into(), json!(langcode));

    if let Some(media_id) = item.media {
        if let Some(asset) = store.media(media_id) {
            if let Ok(media) = media_payload(asset) {
                content.insert("media".into(), media);
            }
        }
    }

    let paragraphs = item
        .structures
        .iter()
        .map(|node| structure_payload(node, 0))
        .collect::<Result<Vec<_>>>()?;

    Ok(json!({
        "content": Value::Object(content),
        "entity_type": item.content_type,
        "paragraphs": paragraphs,
    }))
}

/// Serialize one structure node and, recursively, its children.
///
/// Children are attached inside `fields` under their relation field name,
/// as an ordered list. A node with no children serializes to its scalar
/// fields alone.
pub fn structure_payload(node: &StructureNode, depth: usize) -> Result<Value> {
    if depth >= MAX_STRUCTURE_DEPTH {
        return Err(Error::StructureTooDeep(MAX_STRUCTURE_DEPTH));
    }

    let mut fields = Map::new();
    for (name, value) in &node.fields {
        fields.insert(name.clone(), json!(value));
    }
    for (field_name, children) in &node.children {
        let serialized = children
            .iter()
            .map(|child| structure_payload(child, depth + 1))
            .collect::<Result<Vec<_>>>()?;
        fields.insert(field_name.clone(), Value::Array(serialized));
    }

    Ok(json!({
        "id": node.id,
        "type": node.node_type,
        "fields": Value::Object(fields),
    }))
}

/// Serialize a menu link to its wire shape.
///
/// `link__uri` keeps the double underscore the receiver validates against.
pub fn menu_link_payload(link: &MenuLink) -> Value {
    json!({
        "id": link.id,
        "title": link.title,
        "bundle": link.bundle,
        "menu_name": link.menu_name,
        "link__uri": link.link_uri,
    })
}

/// Serialize a taxonomy term to its wire shape.
///
/// The vocabulary label falls back to an empty string when the vocabulary
/// is unknown to the store.
pub fn term_payload(store: &dyn EntityStore, term: &TaxonomyTerm) -> Value {
    let vocabulary = store.vocabulary_label(&term.vocabulary).unwrap_or("");
    json!({
        "tid": term.id,
        "name": term.name,
        "vid": term.vocabulary,
        "vocabulary": vocabulary,
    })
}

#[cfg(test)]
#[path = "payload_tests.rs"]
mod tests;
