// SPDX-FileCopyrightText: 2026 Strac contributors
// SPDX-License-Identifier: MIT

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Nothing in the repository answers to this path and revision.
    #[error("No node {path} at revision {}", .revision.as_deref().unwrap_or("latest"))]
    NoSuchNode {
        path: String,
        revision: Option<String>,
    },

    /// A blob referenced by a method or comment does not exist.
    #[error("Source blob {blob_id} of {owner} is missing from tw_blob")]
    MissingSource { blob_id: i64, owner: String },

    #[error("Unsupported repository type: {0}")]
    UnsupportedType(String),

    #[error("No Store database driver is available")]
    DriverUnavailable,

    #[error("Store database error: {0}")]
    Store(#[from] strac_store_db::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl Error {
    pub fn no_such_node(path: impl Into<String>, revision: Option<&str>) -> Self {
        Self::NoSuchNode {
            path: path.into(),
            revision: revision.map(str::to_owned),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),
}
