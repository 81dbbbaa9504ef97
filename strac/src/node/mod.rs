// SPDX-FileCopyrightText: 2026 Strac contributors
// SPDX-License-Identifier: MIT

//! The virtual node tree.
//!
//! Directory nodes (root, bundles, packages) enumerate children; leaf nodes
//! (namespaces, classes, class extensions) render content. Leaves come in two
//! states. A *named* leaf knows only its package and qualified name and is
//! what directory listings produce. A *fully initialized* leaf also carries
//! its definition, comment, protocols and shared variables, and is what path
//! resolution produces. Asking a named leaf for content resolves it first.

mod bundle;
mod class;
mod entries;
mod extension;
mod namespace;
mod package;
mod root;

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Deref;
use std::time::SystemTime;

use strac_store_core::CONTENT_TYPE_WIKI;
use strac_store_db::StoreDb;

use crate::api::{ChangeKind, HistoryEntry, NodeKind};
use crate::error::{Error, Result};

pub use bundle::BundleNode;
pub use class::{ClassBody, ClassNode};
pub use entries::Entries;
pub use extension::{ClassExtensionNode, ExtensionBody};
pub use namespace::{NamespaceBody, NamespaceNode};
pub use package::PackageNode;
pub use root::{ALL_SENTINEL, ROOT_REVISION, RootNode, Selector};

/// The database a node was read from.
///
/// Two handles are equal when they point at the same connection.
#[derive(Clone, Copy)]
pub(crate) struct Session<'a>(&'a StoreDb);

impl<'a> Session<'a> {
    pub(crate) fn new(db: &'a StoreDb) -> Self {
        Session(db)
    }
}

impl Deref for Session<'_> {
    type Target = StoreDb;

    fn deref(&self) -> &StoreDb {
        self.0
    }
}

impl PartialEq for Session<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.0, other.0)
    }
}

impl Eq for Session<'_> {}

impl fmt::Debug for Session<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Session")
    }
}

/// Any node of the virtual tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<'a> {
    Root(RootNode<'a>),
    Bundle(BundleNode<'a>),
    Package(PackageNode<'a>),
    Namespace(NamespaceNode<'a>),
    Class(ClassNode<'a>),
    ClassExtension(ClassExtensionNode<'a>),
}

impl<'a> Node<'a> {
    pub fn path(&self) -> &str {
        match self {
            Node::Root(_) => "/",
            Node::Bundle(n) => n.path(),
            Node::Package(n) => n.path(),
            Node::Namespace(n) => n.path(),
            Node::Class(n) => n.path(),
            Node::ClassExtension(n) => n.path(),
        }
    }

    /// Name shown in listings.
    pub fn name(&self) -> Cow<'_, str> {
        match self {
            Node::Root(_) => Cow::Borrowed(""),
            Node::Bundle(n) => Cow::Borrowed(n.name()),
            Node::Package(n) => Cow::Borrowed(n.name()),
            Node::Namespace(n) => Cow::Owned(n.display_name()),
            Node::Class(n) => Cow::Borrowed(n.qualified_name().display_name()),
            Node::ClassExtension(n) => Cow::Owned(n.display_name()),
        }
    }

    /// The version this node belongs to. Leaves share their package's.
    pub fn revision(&self) -> &str {
        match self {
            Node::Root(_) => ROOT_REVISION,
            Node::Bundle(n) => n.version(),
            Node::Package(n) => n.version(),
            Node::Namespace(n) => n.package().version(),
            Node::Class(n) => n.package().version(),
            Node::ClassExtension(n) => n.package().version(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Root(_) | Node::Bundle(_) | Node::Package(_) => NodeKind::Directory,
            Node::Namespace(_) | Node::Class(_) | Node::ClassExtension(_) => NodeKind::File,
        }
    }

    /// Path at which this node was created; nodes are never moved.
    pub fn created_path(&self) -> &str {
        self.path()
    }

    /// Revision in which this node was created.
    pub fn created_rev(&self) -> &str {
        self.revision()
    }

    /// Owning package of a leaf.
    pub fn package(&self) -> Option<&PackageNode<'a>> {
        match self {
            Node::Namespace(n) => Some(n.package()),
            Node::Class(n) => Some(n.package()),
            Node::ClassExtension(n) => Some(n.package()),
            Node::Root(_) | Node::Bundle(_) | Node::Package(_) => None,
        }
    }

    /// Whether a leaf already carries its full content. Directories always do.
    pub fn is_fully_initialized(&self) -> bool {
        match self {
            Node::Namespace(n) => n.body().is_some(),
            Node::Class(n) => n.body().is_some(),
            Node::ClassExtension(n) => n.body().is_some(),
            Node::Root(_) | Node::Bundle(_) | Node::Package(_) => true,
        }
    }

    /// Fetch everything a named leaf is missing.
    pub fn materialize(&self) -> Result<Node<'a>> {
        if self.is_fully_initialized() {
            return Ok(self.clone());
        }
        let (package, name) = match self {
            Node::Namespace(n) => (n.package(), n.qualified_name()),
            Node::Class(n) => (n.package(), n.qualified_name()),
            Node::ClassExtension(n) => (n.package(), n.qualified_name()),
            Node::Root(_) | Node::Bundle(_) | Node::Package(_) => return Ok(self.clone()),
        };
        package
            .resolve_subnode(name.full())?
            .ok_or_else(|| Error::no_such_node(self.path(), Some(self.revision())))
    }

    /// Children of a directory, in listing order. Leaves have none.
    pub fn entries(&self) -> Entries<'a> {
        match self {
            Node::Root(n) => n.entries(),
            Node::Bundle(n) => n.entries(),
            Node::Package(n) => n.entries(),
            Node::Namespace(_) | Node::Class(_) | Node::ClassExtension(_) => Entries::empty(),
        }
    }

    /// Rendered wiki text of a leaf; `None` for directories.
    pub fn content(&self) -> Result<Option<String>> {
        if self.kind() == NodeKind::Directory {
            return Ok(None);
        }
        let node = if self.is_fully_initialized() {
            Cow::Borrowed(self)
        } else {
            Cow::Owned(self.materialize()?)
        };
        node.render()
    }

    pub fn content_type(&self) -> Option<&'static str> {
        match self.kind() {
            NodeKind::File => Some(CONTENT_TYPE_WIKI),
            NodeKind::Directory => None,
        }
    }

    /// Length in bytes of the rendered content.
    pub fn content_length(&self) -> Result<Option<usize>> {
        Ok(self.content()?.map(|content| content.len()))
    }

    /// Nodes are their own only history entry.
    pub fn history(&self) -> Vec<HistoryEntry> {
        vec![HistoryEntry {
            path: self.path().to_owned(),
            revision: Some(self.revision().to_owned()),
            change: ChangeKind::Edit,
        }]
    }

    /// Previous `(path, revision)` of this node; Store exposes none.
    pub fn previous(&self) -> Option<(String, String)> {
        None
    }

    pub fn properties(&self) -> BTreeMap<String, String> {
        BTreeMap::new()
    }

    pub fn last_modified(&self) -> Option<SystemTime> {
        None
    }

    fn render(&self) -> Result<Option<String>> {
        match self {
            Node::Namespace(n) => n.render(),
            Node::Class(n) => n.render(),
            Node::ClassExtension(n) => Ok(n.render()),
            Node::Root(_) | Node::Bundle(_) | Node::Package(_) => Ok(None),
        }
    }
}

/// Path of a leaf inside `package`.
pub(crate) fn leaf_path(package: &PackageNode<'_>, display_name: &str) -> String {
    format!("{}/{}", package.path(), display_name)
}
