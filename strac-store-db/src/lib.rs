// SPDX-FileCopyrightText: 2026 Strac contributors
// SPDX-License-Identifier: MIT

//! SQLite interface for a Smalltalk Store database.
//!
//! Store keeps bundles, packages, namespaces, classes, methods and shared
//! variables in a flat set of `tw_*` tables, with every piece of source text
//! held base64-encoded in `tw_blob`. This crate is the only place that talks
//! SQL: it runs parameterized, read-only queries and hands back typed rows
//! with blob text already decoded.
//!
//! **Architecture**: This is the Database Layer of Strac. The node tree in the
//! `strac` crate is built entirely on top of the queries defined here.
//!
//! # Example
//!
//! ```ignore
//! use strac_store_db::{ComponentKind, StoreDb};
//!
//! let db = StoreDb::open_readonly("/srv/store/store.sqlite")?;
//! if let Some(pkg) = db.component_by_name(ComponentKind::Package, "TestPackage1", None)? {
//!     for class in db.package_classes(pkg.id)? {
//!         println!("{}", class.qualified_name());
//!     }
//! }
//! ```

mod blob;
mod connection;
mod error;
mod query;
mod schema;
mod types;
mod write;

pub use blob::{decode_blob, encode_blob};
pub use connection::{MIN_SQLITE_VERSION, OpenMode, StoreDb, sqlite_version_number};
pub use error::{Error, Result};
pub use types::*;
pub use write::*;
