// SPDX-FileCopyrightText: 2026 Strac contributors
// SPDX-License-Identifier: MIT

//! Error types for Store database operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for Store database operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during Store database operations.
#[derive(Error, Debug)]
pub enum Error {
    /// SQLite error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Failed to open database with context
    #[error("Failed to open database at '{path}': {source}")]
    DatabaseOpen {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Database file not found
    #[error("Database not found at: {0}")]
    DatabaseNotFound(PathBuf),

    /// A tw_blob payload is not valid base64
    #[error("Blob {blob_id} is not valid base64: {source}")]
    BlobDecode {
        blob_id: i64,
        #[source]
        source: data_encoding::DecodeError,
    },
}
