// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Remote site registry and subscription filters.
//!
//! Each remote peer site has its own connection details and an allow-list
//! of what it subscribes to: content types for documents, menu names for
//! menu links, vocabularies for taxonomy terms. Media has no filter field —
//! every configured site receives every media asset. That asymmetry is
//! inherited from the deployed configuration format and is intentional.

use serde::{Deserialize, Serialize};

/// One configured remote peer site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteSite {
    /// Unique site name, referenced by queue rows and relation records.
    pub name: String,
    /// Base URL of the site (endpoint paths are appended to it).
    pub url: String,
    /// HTTP basic auth username.
    pub username: String,
    /// HTTP basic auth password.
    pub password: String,
    /// Content types this site subscribes to.
    #[serde(default)]
    pub content_types: Vec<String>,
    /// Vocabularies this site subscribes to.
    #[serde(default)]
    pub vocabularies: Vec<String>,
    /// Menus this site subscribes to.
    #[serde(default)]
    pub menus: Vec<String>,
    /// Languages configured for this site (informational; delivery language
    /// is chosen per task).
    #[serde(default)]
    pub languages: Vec<String>,
}

impl RemoteSite {
    /// Returns true if this site subscribes to the given content type.
    pub fn wants_content_type(&self, content_type: &str) -> bool {
        self.content_types.iter().any(|t| t == content_type)
    }

    /// Returns true if this site subscribes to the given menu.
    pub fn wants_menu(&self, menu_name: &str) -> bool {
        self.menus.iter().any(|m| m == menu_name)
    }

    /// Returns true if this site subscribes to the given vocabulary.
    pub fn wants_vocabulary(&self, vocabulary: &str) -> bool {
        self.vocabularies.iter().any(|v| v == vocabulary)
    }
}

/// Ordered collection of configured remote sites.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteRegistry {
    sites: Vec<RemoteSite>,
}

impl SiteRegistry {
    /// Creates a registry from a list of sites, preserving order.
    pub fn new(sites: Vec<RemoteSite>) -> Self {
        SiteRegistry { sites }
    }

    /// Look up a site by name.
    pub fn get(&self, name: &str) -> Option<&RemoteSite> {
        self.sites.iter().find(|s| s.name == name)
    }

    /// Iterate over all sites in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = &RemoteSite> {
        self.sites.iter()
    }

    /// Number of configured sites.
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    /// Returns true if no sites are configured.
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}

impl<'a> IntoIterator for &'a SiteRegistry {
    type Item = &'a RemoteSite;
    type IntoIter = std::slice::Iter<'a, RemoteSite>;

    fn into_iter(self) -> Self::IntoIter {
        self.sites.iter()
    }
}

#[cfg(test)]
#[path = "site_tests.rs"]
mod tests;
