// SPDX-FileCopyrightText: 2026 Strac contributors
// SPDX-License-Identifier: MIT

//! Database connection management.

use std::path::Path;

use rusqlite::{Connection, OpenFlags};
use tracing::debug;

use crate::error::{Error, Result};
use crate::schema::{CODE_SCHEMA_SQL, COMPONENT_SCHEMA_SQL};

/// Oldest SQLite able to run the latest-version queries (window functions).
pub const MIN_SQLITE_VERSION: i32 = 3_025_000;

/// Version of the linked SQLite library, as `MAJOR * 1000000 + MINOR * 1000 + PATCH`.
pub fn sqlite_version_number() -> i32 {
    rusqlite::version_number()
}

/// Database open mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    /// Read-only access (what the projection uses)
    ReadOnly,
    /// Create new database if it doesn't exist
    Create,
}

/// SQLite connection to a Store database.
///
/// One connection per repository session; statements are prepared per call
/// and their cursors are released when the call returns.
#[derive(Debug)]
pub struct StoreDb {
    pub(crate) conn: Connection,
}

impl StoreDb {
    /// Open a Store database read-only.
    ///
    /// `descriptor` is either a filesystem path or an SQLite `file:` URI.
    pub fn open_readonly(descriptor: &str) -> Result<Self> {
        if descriptor.starts_with("file:") {
            let conn = Connection::open_with_flags(
                descriptor,
                OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_URI,
            )
            .map_err(|e| Error::DatabaseOpen {
                path: descriptor.into(),
                source: e,
            })?;
            debug!("Opened Store database {descriptor}");
            return Ok(Self { conn });
        }
        Self::open(descriptor, OpenMode::ReadOnly)
    }

    /// Open or create a database at a custom path.
    pub fn open<P: AsRef<Path>>(path: P, mode: OpenMode) -> Result<Self> {
        let path = path.as_ref();
        let flags = match mode {
            OpenMode::ReadOnly => {
                if !path.exists() {
                    return Err(Error::DatabaseNotFound(path.to_owned()));
                }
                OpenFlags::SQLITE_OPEN_READ_ONLY
            }
            OpenMode::Create => OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE,
        };

        let conn = Connection::open_with_flags(path, flags).map_err(|e| Error::DatabaseOpen {
            path: path.to_owned(),
            source: e,
        })?;
        let db = Self { conn };

        if mode == OpenMode::Create {
            db.create_schema()?;
        }

        debug!("Opened Store database at {} ({:?})", path.display(), mode);
        Ok(db)
    }

    /// Create an in-memory database (for testing).
    ///
    /// The database is initialized with the full schema.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.create_schema()?;
        debug!("Created in-memory Store database");
        Ok(db)
    }

    /// Create the Store tables and views.
    pub fn create_schema(&self) -> Result<()> {
        self.conn.execute_batch(COMPONENT_SCHEMA_SQL)?;
        self.conn.execute_batch(CODE_SCHEMA_SQL)?;
        debug!("Created Store schema");
        Ok(())
    }

    /// Get raw connection (for advanced usage).
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Check if the database has the Store component tables.
    pub fn has_schema(&self) -> Result<bool> {
        let count: i32 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='tw_package'",
            [],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Close the connection, reporting any error SQLite raises while doing so.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| Error::Sqlite(e))
    }
}
