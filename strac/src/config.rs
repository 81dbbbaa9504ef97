// SPDX-FileCopyrightText: 2026 Strac contributors
// SPDX-License-Identifier: MIT

use serde::Deserialize;
use std::path::Path;

use crate::error::ConfigError;
use crate::node::Selector;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path or `file:` URI of the Store database
    pub store_database_connection: String,

    /// Comma-separated bundle names shown under the root, or `ALL`
    pub root_store_bundles: String,

    /// Comma-separated package name prefixes shown under the root, or `ALL`
    pub root_store_packages: String,

    /// Log level
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_database_connection: String::new(),
            root_store_bundles: String::new(),
            root_store_packages: String::new(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn bundle_selectors(&self) -> Vec<Selector> {
        Selector::parse_list(&self.root_store_bundles)
    }

    pub fn package_selectors(&self) -> Vec<Selector> {
        Selector::parse_list(&self.root_store_packages)
    }
}
