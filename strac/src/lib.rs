// SPDX-FileCopyrightText: 2026 Strac contributors
// SPDX-License-Identifier: MIT

//! Strac: a Smalltalk Store database seen as a version-control repository.
//!
//! Store keeps code in relational tables. Strac projects those tables onto a
//! virtual tree a repository browser can walk:
//!
//! ```text
//! /                                    root (configured bundles and packages)
//! /TestBundle                          bundle
//! /TestPackage1                        package
//! /TestPackage1/StracTest              namespace
//! /TestPackage1/StracTest.StracClass11 class
//! /TestPackage1/Core.Object            class extension
//! ```
//!
//! Leaves render as Trac wiki pages. Revisions are package versions; history
//! and changesets are stubs, since the supported schema exposes no event log.
//!
//! # Example
//!
//! ```ignore
//! use strac::{Config, Repository, RepositoryConnector, StoreConnector};
//!
//! let connector = StoreConnector::probe();
//! let repos = connector.get_repository("store", &Config::from_file("strac.toml".as_ref())?)?;
//! let node = repos.get_node("/TestPackage1/StracTest.StracClass11", None)?;
//! println!("{}", node.content()?.unwrap_or_default());
//! ```

pub mod api;
pub mod changeset;
pub mod config;
pub mod connector;
pub mod error;
pub mod node;
pub mod repository;

pub use api::{Change, ChangeKind, HistoryEntry, NodeKind, Repository, RepositoryConnector};
pub use changeset::Changeset;
pub use config::Config;
pub use connector::{SqliteDriver, StoreConnector, StoreDriver};
pub use error::{ConfigError, Error, Result};
pub use node::{Entries, Node, RootNode, Selector};
pub use repository::StoreRepository;
