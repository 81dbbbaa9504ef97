// SPDX-FileCopyrightText: 2026 Strac contributors
// SPDX-License-Identifier: MIT

use strac_store_db::{ComponentKind, ComponentVersion};

use super::{Entries, Node, PackageNode, Session};
use crate::error::Result;

/// A published version of a bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleNode<'a> {
    session: Session<'a>,
    id: i64,
    name: String,
    version: String,
    path: String,
}

impl<'a> BundleNode<'a> {
    pub(crate) fn from_row(session: Session<'a>, row: ComponentVersion) -> Self {
        Self {
            session,
            path: format!("/{}", row.name),
            id: row.id,
            name: row.name,
            version: row.version,
        }
    }

    /// The given version, or the latest one when `version` is `None`.
    pub(crate) fn with_name(
        session: Session<'a>,
        name: &str,
        version: Option<&str>,
    ) -> Result<Option<Self>> {
        let row = session.component_by_name(ComponentKind::Bundle, name, version)?;
        Ok(row.map(|row| Self::from_row(session, row)))
    }

    /// Latest version of every bundle, by name.
    pub(crate) fn all(session: Session<'a>) -> Result<Vec<Self>> {
        Ok(session
            .latest_components(ComponentKind::Bundle)?
            .into_iter()
            .map(|row| Self::from_row(session, row))
            .collect())
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Sub-bundles first, then member packages.
    pub(crate) fn entries(&self) -> Entries<'a> {
        let session = self.session;
        let id = self.id;
        Entries::empty()
            .then(move || {
                Ok(session
                    .sub_bundles(id)?
                    .into_iter()
                    .map(|row| Node::Bundle(BundleNode::from_row(session, row)))
                    .collect())
            })
            .then(move || {
                Ok(session
                    .bundle_packages(id)?
                    .into_iter()
                    .map(|row| Node::Package(PackageNode::from_row(session, row)))
                    .collect())
            })
    }
}
