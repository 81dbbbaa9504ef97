// SPDX-FileCopyrightText: 2026 Strac contributors
// SPDX-License-Identifier: MIT

use std::collections::{BTreeMap, BTreeSet};

use strac_store_core::{Method, Protocol, QualifiedName, SharedVariable};
use strac_store_db::{ComponentKind, ComponentVersion};
use tracing::debug;

use super::{
    ClassBody, ClassExtensionNode, ClassNode, Entries, ExtensionBody, NamespaceBody,
    NamespaceNode, Node, Session,
};
use crate::error::{Error, Result};

/// A published version of a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageNode<'a> {
    session: Session<'a>,
    id: i64,
    name: String,
    version: String,
    path: String,
}

impl<'a> PackageNode<'a> {
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
        let row = session.component_by_name(ComponentKind::Package, name, version)?;
        Ok(row.map(|row| Self::from_row(session, row)))
    }

    /// Latest version of every package, by name.
    pub(crate) fn all(session: Session<'a>) -> Result<Vec<Self>> {
        Ok(session
            .latest_components(ComponentKind::Package)?
            .into_iter()
            .map(|row| Self::from_row(session, row))
            .collect())
    }

    /// Latest version of every package whose name starts with `prefix`.
    pub(crate) fn with_prefix(session: Session<'a>, prefix: &str) -> Result<Vec<Self>> {
        Ok(session
            .latest_components_with_prefix(ComponentKind::Package, prefix)?
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

    pub(crate) fn session(&self) -> Session<'a> {
        self.session
    }

    /// Namespaces, then classes, then extended classes.
    ///
    /// An extended class is one this package has methods for but does not
    /// define. All leaves are named only.
    pub(crate) fn entries(&self) -> Entries<'a> {
        let namespaces = self.clone();
        let classes = self.clone();
        let extensions = self.clone();
        Entries::empty()
            .then(move || {
                Ok(namespaces
                    .session
                    .package_namespaces(namespaces.id)?
                    .into_iter()
                    .map(|entry| {
                        let name = QualifiedName::from_parts(&entry.environment, &entry.name);
                        Node::Namespace(NamespaceNode::named(namespaces.clone(), name))
                    })
                    .collect())
            })
            .then(move || {
                Ok(classes
                    .session
                    .package_classes(classes.id)?
                    .into_iter()
                    .map(|entry| {
                        let name = QualifiedName::from_parts(&entry.environment, &entry.name);
                        Node::Class(ClassNode::named(classes.clone(), name))
                    })
                    .collect())
            })
            .then(move || {
                let pkg = extensions;
                let defined: BTreeSet<QualifiedName> = pkg
                    .session
                    .package_classes(pkg.id)?
                    .into_iter()
                    .map(|entry| QualifiedName::from_parts(&entry.environment, &entry.name))
                    .collect();
                let touched: BTreeSet<QualifiedName> = pkg
                    .session
                    .package_method_class_names(pkg.id)?
                    .iter()
                    .map(|class_name| QualifiedName::from_method_class(class_name))
                    .collect();
                Ok(touched
                    .difference(&defined)
                    .map(|name| {
                        Node::ClassExtension(ClassExtensionNode::named(pkg.clone(), name.clone()))
                    })
                    .collect())
            })
    }

    /// Resolve a namespace, class or class extension by qualified name.
    ///
    /// The `Root.Smalltalk.` prefix is optional. A namespace definition wins
    /// over a class definition, which wins over bare methods. `None` when the
    /// package has none of these for the name.
    pub fn resolve_subnode(&self, qualified_name: &str) -> Result<Option<Node<'a>>> {
        let name = QualifiedName::new(qualified_name);
        debug!(package = %self.name, version = %self.version, name = %name, "Resolving subnode");

        let mut shared_variables: Vec<SharedVariable> = self
            .session
            .shared_variables(self.id, name.full())?
            .into_iter()
            .map(|row| SharedVariable {
                name: row.name,
                definition: row.definition,
            })
            .collect();
        shared_variables.sort();

        if let Some(row) =
            self.session
                .namespace_definition(self.id, name.environment(), name.simple_name())?
        {
            let body = NamespaceBody {
                id: row.id,
                definition: row.definition,
                comment_id: row.comment_id,
                shared_variables,
            };
            return Ok(Some(Node::Namespace(NamespaceNode::fully_initialized(
                self.clone(),
                name,
                body,
            ))));
        }

        let instance_protocols = self.protocols_for(name.full())?;
        let class_protocols = self.protocols_for(&name.metaclass())?;

        if let Some(row) =
            self.session
                .class_definition(self.id, name.environment(), name.simple_name())?
        {
            let body = ClassBody {
                id: row.id,
                definition: row.definition,
                comment_id: row.comment_id,
                instance_protocols,
                class_protocols,
                shared_variables,
            };
            return Ok(Some(Node::Class(ClassNode::fully_initialized(
                self.clone(),
                name,
                body,
            ))));
        }

        if instance_protocols.is_empty() && class_protocols.is_empty() {
            return Ok(None);
        }
        let body = ExtensionBody {
            instance_protocols,
            class_protocols,
            shared_variables,
        };
        Ok(Some(Node::ClassExtension(
            ClassExtensionNode::fully_initialized(self.clone(), name, body),
        )))
    }

    /// Methods this package defines for `class_name`, grouped into protocols
    /// in browser order.
    ///
    /// Sources are fetched in one batch after the method rows.
    fn protocols_for(&self, class_name: &str) -> Result<Vec<Protocol>> {
        let rows = self.session.methods_for_class(self.id, class_name)?;
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let source_ids: Vec<i64> = rows
            .iter()
            .map(|row| row.source_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let sources = self.session.blob_texts(&source_ids)?;

        let mut protocols: BTreeMap<String, Protocol> = BTreeMap::new();
        for row in rows {
            let source = sources
                .get(&row.source_id)
                .cloned()
                .ok_or_else(|| Error::MissingSource {
                    blob_id: row.source_id,
                    owner: format!("{class_name}>>{}", row.name),
                })?;
            protocols
                .entry(row.protocol.clone())
                .or_insert_with(|| Protocol::new(row.protocol))
                .add_method(Method {
                    name: row.name,
                    source,
                });
        }

        let mut protocols: Vec<Protocol> = protocols.into_values().collect();
        protocols.sort();
        Ok(protocols)
    }

    /// Text of a comment blob; empty for comment ID 0.
    pub(crate) fn comment_text(&self, comment_id: i64, owner: &QualifiedName) -> Result<String> {
        if comment_id == 0 {
            return Ok(String::new());
        }
        self.session
            .blob_text(comment_id)?
            .ok_or_else(|| Error::MissingSource {
                blob_id: comment_id,
                owner: owner.display_name().to_owned(),
            })
    }
}
