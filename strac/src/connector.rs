// SPDX-FileCopyrightText: 2026 Strac contributors
// SPDX-License-Identifier: MIT

//! Repository type registration.
//!
//! Whether Store repositories can be offered depends on a database driver
//! being usable. The driver is probed once when the connector is built and
//! handed in, so a connector without one simply declines every request.

use strac_store_db::{MIN_SQLITE_VERSION, StoreDb, sqlite_version_number};
use tracing::{debug, warn};

use crate::api::RepositoryConnector;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::repository::StoreRepository;

/// Repository type name served by [`StoreConnector`].
pub const STORE_TYPE: &str = "store";

/// Selection priority among connectors serving the same type.
pub const STORE_PRIORITY: u32 = 4;

/// Opens connections to Store databases.
pub trait StoreDriver {
    fn name(&self) -> &'static str;

    /// Open the database behind a connection descriptor for reading.
    fn open(&self, descriptor: &str) -> Result<StoreDb>;
}

/// The bundled SQLite driver.
#[derive(Debug, Clone, Copy)]
pub struct SqliteDriver {
    version: i32,
}

impl SqliteDriver {
    /// The driver, if the linked SQLite is new enough.
    pub fn probe() -> Option<Self> {
        let version = sqlite_version_number();
        if version < MIN_SQLITE_VERSION {
            warn!(version, required = MIN_SQLITE_VERSION, "SQLite is too old for Store queries");
            return None;
        }
        Some(Self { version })
    }

    pub fn version(&self) -> i32 {
        self.version
    }
}

impl StoreDriver for SqliteDriver {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn open(&self, descriptor: &str) -> Result<StoreDb> {
        Ok(StoreDb::open_readonly(descriptor)?)
    }
}

/// Serves the `store` repository type when a driver is available.
pub struct StoreConnector {
    driver: Option<Box<dyn StoreDriver>>,
}

impl StoreConnector {
    pub fn new(driver: Option<Box<dyn StoreDriver>>) -> Self {
        Self { driver }
    }

    /// A connector using the SQLite driver, if it passes its probe.
    pub fn probe() -> Self {
        Self::new(SqliteDriver::probe().map(|d| Box::new(d) as Box<dyn StoreDriver>))
    }
}

impl RepositoryConnector for StoreConnector {
    type Repository = StoreRepository;

    fn supported_types(&self) -> Vec<(&'static str, u32)> {
        if self.driver.is_some() {
            vec![(STORE_TYPE, STORE_PRIORITY)]
        } else {
            Vec::new()
        }
    }

    fn get_repository(&self, repos_type: &str, config: &Config) -> Result<StoreRepository> {
        if repos_type != STORE_TYPE {
            return Err(Error::UnsupportedType(repos_type.to_owned()));
        }
        let driver = self.driver.as_ref().ok_or(Error::DriverUnavailable)?;
        debug!(
            driver = driver.name(),
            connection = %config.store_database_connection,
            "Connecting to Store database"
        );
        let db = driver.open(&config.store_database_connection)?;
        Ok(StoreRepository::with_config(db, config))
    }
}
