// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI configuration management.
//!
//! Configuration lives in `hubsync.toml` (overridable with `--config`) and
//! includes:
//! - `db`: path to the synchronization queue database
//! - `entities`: path to the JSON entity fixture the store reads
//! - `[[sites]]`: the remote site registry
//!
//! Relative paths are resolved against the config file's directory, so a
//! deployment can be moved wholesale.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use hs_core::{RemoteSite, SiteRegistry};

use crate::error::{Error, Result};

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "hubsync.toml";

fn default_db() -> PathBuf {
    PathBuf::from("hubsync.db")
}

fn default_entities() -> PathBuf {
    PathBuf::from("entities.json")
}

/// CLI configuration loaded from `hubsync.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Path to the queue database.
    #[serde(default = "default_db")]
    pub db: PathBuf,
    /// Path to the JSON entity fixture.
    #[serde(default = "default_entities")]
    pub entities: PathBuf,
    /// Remote sites, in configuration order.
    #[serde(default)]
    pub sites: Vec<RemoteSite>,

    /// Directory the config file was loaded from; anchors relative paths.
    #[serde(skip)]
    base_dir: PathBuf,
}

impl Config {
    /// Loads configuration from the given file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {}", path.display(), e)))?;
        let mut config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse {}: {}", path.display(), e)))?;

        config.base_dir = path.parent().unwrap_or(Path::new(".")).to_path_buf();
        Ok(config)
    }

    /// Resolved path to the queue database.
    pub fn db_path(&self) -> PathBuf {
        self.resolve(&self.db)
    }

    /// Resolved path to the entity fixture.
    pub fn entities_path(&self) -> PathBuf {
        self.resolve(&self.entities)
    }

    /// The configured sites as a registry.
    pub fn registry(&self) -> SiteRegistry {
        SiteRegistry::new(self.sites.clone())
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
