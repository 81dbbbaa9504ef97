// SPDX-FileCopyrightText: 2026 Strac contributors
// SPDX-License-Identifier: MIT

use std::time::SystemTime;

use strac_store_core::{VirtualPath, canonicalize};
use strac_store_db::{ComponentKind, StoreDb};
use tracing::debug;

use crate::api::{Change, ChangeKind, HistoryEntry, Repository};
use crate::changeset::Changeset;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::node::{BundleNode, Node, PackageNode, RootNode, Selector, Session};

/// Revision string some hosts send in place of no revision.
const NONE_REVISION: &str = "None";

/// A Store database seen as a repository.
///
/// Owns the only connection; every node borrows it.
#[derive(Debug)]
pub struct StoreRepository {
    db: StoreDb,
    bundles: Vec<Selector>,
    packages: Vec<Selector>,
}

impl StoreRepository {
    pub fn new(db: StoreDb, bundles: Vec<Selector>, packages: Vec<Selector>) -> Self {
        Self {
            db,
            bundles,
            packages,
        }
    }

    /// Open the configured database read-only.
    pub fn from_config(config: &Config) -> Result<Self> {
        let db = StoreDb::open_readonly(&config.store_database_connection)?;
        Ok(Self::with_config(db, config))
    }

    /// Use an open database with the root selectors from `config`.
    pub fn with_config(db: StoreDb, config: &Config) -> Self {
        debug!(
            bundles = %config.root_store_bundles,
            packages = %config.root_store_packages,
            "Opening Store repository"
        );
        Self::new(db, config.bundle_selectors(), config.package_selectors())
    }

    pub fn root(&self) -> RootNode<'_> {
        RootNode::new(&self.db, self.bundles.clone(), self.packages.clone())
    }

    pub fn close(self) -> Result<()> {
        Ok(self.db.close()?)
    }

    fn is_component(&self, name: &str) -> Result<bool> {
        Ok(self.db.component_exists(ComponentKind::Bundle, name)?
            || self.db.component_exists(ComponentKind::Package, name)?)
    }
}

fn effective_rev(rev: Option<&str>) -> Option<&str> {
    rev.filter(|rev| *rev != NONE_REVISION)
}

impl Repository for StoreRepository {
    /// Resolve a path: the root, a bundle, a package, or a leaf in a package.
    ///
    /// A single segment is tried as a bundle first. For longer paths only the
    /// last two segments count, as package and qualified name.
    fn get_node(&self, path: &str, rev: Option<&str>) -> Result<Node<'_>> {
        let rev = effective_rev(rev);
        let session = Session::new(&self.db);
        let not_found = || Error::no_such_node(path, rev);

        match VirtualPath::parse(path) {
            VirtualPath::Root => Ok(Node::Root(self.root())),
            VirtualPath::Named(name) => {
                if let Some(bundle) = BundleNode::with_name(session, &name, rev)? {
                    return Ok(Node::Bundle(bundle));
                }
                PackageNode::with_name(session, &name, rev)?
                    .map(Node::Package)
                    .ok_or_else(not_found)
            }
            VirtualPath::Member { package, name } => {
                let Some(package) = PackageNode::with_name(session, &package, rev)? else {
                    return Err(not_found());
                };
                package.resolve_subnode(&name)?.ok_or_else(not_found)
            }
        }
    }

    fn normalize_path(&self, path: Option<&str>) -> Result<String> {
        canonicalize(path, |name| self.is_component(name))
    }

    fn normalize_rev(&self, rev: Option<&str>) -> Option<String> {
        rev.map(str::to_owned)
    }

    fn get_oldest_rev(&self) -> Option<String> {
        None
    }

    fn get_youngest_rev(&self) -> Option<String> {
        None
    }

    fn previous_rev(&self, _rev: &str) -> Option<String> {
        None
    }

    fn next_rev(&self, _rev: &str, _path: &str) -> Option<String> {
        None
    }

    fn rev_older_than(&self, _rev1: &str, _rev2: &str) -> Option<bool> {
        None
    }

    fn get_path_history(
        &self,
        path: &str,
        rev: Option<&str>,
        _limit: Option<usize>,
    ) -> Vec<HistoryEntry> {
        vec![HistoryEntry {
            path: path.to_owned(),
            revision: rev.map(str::to_owned),
            change: ChangeKind::Edit,
        }]
    }

    fn get_changeset(&self, _rev: &str) -> Result<Changeset> {
        Ok(Changeset::placeholder(None))
    }

    fn get_changesets(&self, _start: SystemTime, _stop: SystemTime) -> Vec<Changeset> {
        Vec::new()
    }

    fn get_changes(
        &self,
        old_path: &str,
        old_rev: Option<&str>,
        new_path: &str,
        new_rev: Option<&str>,
    ) -> Result<Vec<Change<'_>>> {
        let old = self.get_node(old_path, old_rev)?;
        let new = self.get_node(new_path, new_rev)?;
        Ok(vec![Change {
            old,
            new,
            kind: ChangeKind::Edit,
            changeset: Changeset::placeholder(new_rev),
        }])
    }

    fn clear(&self, _youngest_rev: Option<&str>) {}
}
