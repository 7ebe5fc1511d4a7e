// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Local entity model and the store boundary the engine reads through.
//!
//! The engine never owns the authoritative content; it consumes it through
//! the [`EntityStore`] trait. [`MemoryStore`] is the bundled implementation,
//! deserializable from a JSON fixture, used by the CLI and by tests.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::Result;

/// The bundle of a media asset, deciding how it is serialized.
///
/// `Other` captures bundles the sync engine does not know how to ship; they
/// are a hard failure in the media serializer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    /// Image file.
    Image,
    /// Audio file.
    Audio,
    /// Locally hosted video file.
    Video,
    /// Document file (PDF and the like).
    Document,
    /// Remotely hosted video, referenced by URL only (no file).
    RemoteVideo,
    /// Any other bundle. Unsupported for synchronization.
    #[serde(untagged)]
    Other(String),
}

impl MediaKind {
    /// Returns the string representation used on the wire.
    pub fn as_str(&self) -> &str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Audio => "audio",
            MediaKind::Video => "video",
            MediaKind::Document => "document",
            MediaKind::RemoteVideo => "remote_video",
            MediaKind::Other(s) => s,
        }
    }

    /// Returns true for bundles backed by a downloadable file.
    pub fn is_file_backed(&self) -> bool {
        matches!(
            self,
            MediaKind::Image | MediaKind::Audio | MediaKind::Video | MediaKind::Document
        )
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "image" => MediaKind::Image,
            "audio" => MediaKind::Audio,
            "video" => MediaKind::Video,
            "document" => MediaKind::Document,
            "remote_video" => MediaKind::RemoteVideo,
            other => MediaKind::Other(other.to_string()),
        })
    }
}

/// A media asset. Large files are always referenced by URL, never shipped
/// as bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaAsset {
    /// Local identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Bundle of the asset.
    pub kind: MediaKind,
    /// Downloadable URL for file-backed kinds, or the remote video URL.
    pub url: String,
    /// Filename for file-backed kinds. `None` for remote video.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

/// One node of a composite structure tree.
///
/// The tree shape is by convention: nothing in the data model prevents a
/// cyclic reference, which is why serialization enforces a depth bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureNode {
    /// Local identifier.
    pub id: i64,
    /// Bundle of the node (e.g. `text_block`, `accordion`).
    pub node_type: String,
    /// Scalar and translatable field values, keyed by field name.
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
    /// Child nodes, keyed by the relation field name that references them.
    /// Order within each list is significant.
    #[serde(default)]
    pub children: BTreeMap<String, Vec<StructureNode>>,
}

/// A translated variant of a content item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    /// Translated title.
    pub title: String,
    /// Translated body.
    pub body: String,
}

/// A content item in its default language, with optional translations and
/// an optional composite structure tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Local identifier.
    pub id: i64,
    /// Content type (bundle), e.g. `article`.
    pub content_type: String,
    /// Default language code.
    pub language: String,
    /// Title in the default language.
    pub title: String,
    /// Body in the default language.
    pub body: String,
    /// Reference to a primary media asset, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<i64>,
    /// Composite structure tree owned by this item.
    #[serde(default)]
    pub structures: Vec<StructureNode>,
    /// Translated variants, keyed by language code.
    #[serde(default)]
    pub translations: BTreeMap<String, Translation>,
}

impl ContentItem {
    /// Resolves the `(language, title, body)` to push for a requested
    /// language. Falls back to the default language when no variant exists
    /// or no language was requested.
    pub fn localized<'a>(&'a self, language: Option<&'a str>) -> (&'a str, &'a str, &'a str) {
        if let Some(lang) = language {
            if let Some(tr) = self.translations.get(lang) {
                return (lang, &tr.title, &tr.body);
            }
        }
        (&self.language, &self.title, &self.body)
    }
}

/// A navigation menu link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuLink {
    /// Local identifier.
    pub id: i64,
    /// Link title.
    pub title: String,
    /// Bundle of the link entity.
    pub bundle: String,
    /// Name of the menu this link belongs to.
    pub menu_name: String,
    /// The link target URI.
    pub link_uri: String,
    /// Disabled links are listed but never enqueued.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// A taxonomy term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxonomyTerm {
    /// Local identifier.
    pub id: i64,
    /// Term name.
    pub name: String,
    /// Machine name of the vocabulary the term belongs to.
    pub vocabulary: String,
}

/// Read access to the authoritative content store.
///
/// The store is an external collaborator; the engine only ever reads
/// through this boundary, which also keeps dispatch tests free of any real
/// content backend.
pub trait EntityStore {
    /// Look up a content item by id.
    fn content(&self, id: i64) -> Option<&ContentItem>;

    /// Look up a media asset by id.
    fn media(&self, id: i64) -> Option<&MediaAsset>;

    /// Look up a menu link by id.
    fn menu_link(&self, id: i64) -> Option<&MenuLink>;

    /// Look up a taxonomy term by id.
    fn term(&self, id: i64) -> Option<&TaxonomyTerm>;

    /// Resolve a vocabulary machine name to its human-readable label.
    fn vocabulary_label(&self, vocabulary: &str) -> Option<&str>;
}

/// In-memory [`EntityStore`], loadable from a JSON fixture.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryStore {
    /// Content items by id.
    #[serde(default)]
    pub content: BTreeMap<i64, ContentItem>,
    /// Media assets by id.
    #[serde(default)]
    pub media: BTreeMap<i64, MediaAsset>,
    /// Menu links by id.
    #[serde(default)]
    pub menu_links: BTreeMap<i64, MenuLink>,
    /// Taxonomy terms by id.
    #[serde(default)]
    pub terms: BTreeMap<i64, TaxonomyTerm>,
    /// Vocabulary labels by machine name.
    #[serde(default)]
    pub vocabularies: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Loads a store from a JSON fixture file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Adds a content item (builder style, for tests and fixtures).
    pub fn with_content(mut self, item: ContentItem) -> Self {
        self.content.insert(item.id, item);
        self
    }

    /// Adds a media asset.
    pub fn with_media(mut self, asset: MediaAsset) -> Self {
        self.media.insert(asset.id, asset);
        self
    }

    /// Adds a menu link.
    pub fn with_menu_link(mut self, link: MenuLink) -> Self {
        self.menu_links.insert(link.id, link);
        self
    }

    /// Adds a taxonomy term.
    pub fn with_term(mut self, term: TaxonomyTerm) -> Self {
        self.terms.insert(term.id, term);
        self
    }

    /// Adds a vocabulary label.
    pub fn with_vocabulary(mut self, machine_name: &str, label: &str) -> Self {
        self.vocabularies
            .insert(machine_name.to_string(), label.to_string());
        self
    }
}

impl EntityStore for MemoryStore {
    fn content(&self, id: i64) -> Option<&ContentItem> {
        self.content.get(&id)
    }

    fn media(&self, id: i64) -> Option<&MediaAsset> {
        self.media.get(&id)
    }

    fn menu_link(&self, id: i64) -> Option<&MenuLink> {
        self.menu_links.get(&id)
    }

    fn term(&self, id: i64) -> Option<&TaxonomyTerm> {
        self.terms.get(&id)
    }

    fn vocabulary_label(&self, vocabulary: &str) -> Option<&str> {
        self.vocabularies.get(vocabulary).map(String::as_str)
    }
}

#[cfg(test)]
#[path = "entity_tests.rs"]
mod tests;
