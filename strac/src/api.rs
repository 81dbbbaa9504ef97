// SPDX-FileCopyrightText: 2026 Strac contributors
// SPDX-License-Identifier: MIT

//! The version-control interface a repository browser consumes.
//!
//! These traits mirror what a host framework asks of a repository backend:
//! a connector that says which repository types it can open, and a
//! repository that resolves paths to nodes and answers revision queries.

use std::time::SystemTime;

use crate::changeset::Changeset;
use crate::config::Config;
use crate::error::Result;
use crate::node::Node;

/// Whether a node lists children or carries content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Directory,
    File,
}

/// How a path changed in a changeset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Add,
    Copy,
    Delete,
    Edit,
    Move,
}

/// One step in the history of a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub path: String,
    pub revision: Option<String>,
    pub change: ChangeKind,
}

/// A node pair reported by [`Repository::get_changes`].
#[derive(Debug, Clone)]
pub struct Change<'a> {
    pub old: Node<'a>,
    pub new: Node<'a>,
    pub kind: ChangeKind,
    pub changeset: Changeset,
}

/// Opens repositories of the types it supports.
pub trait RepositoryConnector {
    type Repository: Repository;

    /// `(type name, priority)` pairs this connector can serve right now.
    ///
    /// An empty list declines selection.
    fn supported_types(&self) -> Vec<(&'static str, u32)>;

    fn get_repository(&self, repos_type: &str, config: &Config) -> Result<Self::Repository>;
}

/// Read access to a versioned tree.
pub trait Repository {
    /// Resolve `path` at `rev` (latest when absent).
    fn get_node(&self, path: &str, rev: Option<&str>) -> Result<Node<'_>>;

    /// Canonical form of `path`.
    fn normalize_path(&self, path: Option<&str>) -> Result<String>;

    fn normalize_rev(&self, rev: Option<&str>) -> Option<String>;

    fn get_oldest_rev(&self) -> Option<String>;

    fn get_youngest_rev(&self) -> Option<String>;

    fn previous_rev(&self, rev: &str) -> Option<String>;

    fn next_rev(&self, rev: &str, path: &str) -> Option<String>;

    /// Whether `rev1` precedes `rev2`; `None` when unknown.
    fn rev_older_than(&self, rev1: &str, rev2: &str) -> Option<bool>;

    fn get_path_history(
        &self,
        path: &str,
        rev: Option<&str>,
        limit: Option<usize>,
    ) -> Vec<HistoryEntry>;

    fn get_changeset(&self, rev: &str) -> Result<Changeset>;

    /// Changesets published between `start` and `stop`.
    fn get_changesets(&self, start: SystemTime, stop: SystemTime) -> Vec<Changeset>;

    fn get_changes(
        &self,
        old_path: &str,
        old_rev: Option<&str>,
        new_path: &str,
        new_rev: Option<&str>,
    ) -> Result<Vec<Change<'_>>>;

    /// Drop any cached state.
    fn clear(&self, youngest_rev: Option<&str>);
}
