// SPDX-FileCopyrightText: 2026 Strac contributors
// SPDX-License-Identifier: MIT

use strac_store_db::StoreDb;
use tracing::warn;

use super::{BundleNode, Entries, Node, PackageNode, Session};

/// Selector that stands for every bundle or every package.
pub const ALL_SENTINEL: &str = "ALL";

/// Revision reported by the root, which has no version of its own.
pub const ROOT_REVISION: &str = "ONLY";

/// One item of a configured selector list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    All,
    /// A bundle name, or a package name prefix.
    Named(String),
}

impl Selector {
    /// Parse a comma-separated list. Items are trimmed and empty items dropped.
    pub fn parse_list(list: &str) -> Vec<Selector> {
        list.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(|item| match item {
                ALL_SENTINEL => Selector::All,
                name => Selector::Named(name.to_owned()),
            })
            .collect()
    }
}

/// The repository root: the configured bundles, then the configured packages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootNode<'a> {
    session: Session<'a>,
    bundles: Vec<Selector>,
    packages: Vec<Selector>,
}

impl<'a> RootNode<'a> {
    pub fn new(db: &'a StoreDb, bundles: Vec<Selector>, packages: Vec<Selector>) -> Self {
        Self {
            session: Session::new(db),
            bundles,
            packages,
        }
    }

    pub fn bundle_selectors(&self) -> &[Selector] {
        &self.bundles
    }

    pub fn package_selectors(&self) -> &[Selector] {
        &self.packages
    }

    /// One stage per selector, in declaration order.
    ///
    /// A selector that matches nothing contributes no entries.
    pub(crate) fn entries(&self) -> Entries<'a> {
        let session = self.session;
        let mut entries = Entries::empty();
        for selector in self.bundles.iter().cloned() {
            entries = entries.then(move || {
                let bundles = match selector {
                    Selector::All => BundleNode::all(session)?,
                    Selector::Named(name) => {
                        let found = BundleNode::with_name(session, &name, None)?;
                        if found.is_none() {
                            warn!(bundle = %name, "Configured root bundle not found");
                        }
                        found.into_iter().collect()
                    }
                };
                Ok(bundles.into_iter().map(Node::Bundle).collect())
            });
        }
        for selector in self.packages.iter().cloned() {
            entries = entries.then(move || {
                let packages = match selector {
                    Selector::All => PackageNode::all(session)?,
                    Selector::Named(prefix) => {
                        let found = PackageNode::with_prefix(session, &prefix)?;
                        if found.is_empty() {
                            warn!(prefix = %prefix, "No package matches configured root prefix");
                        }
                        found
                    }
                };
                Ok(packages.into_iter().map(Node::Package).collect())
            });
        }
        entries
    }
}
