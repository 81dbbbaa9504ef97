// SPDX-FileCopyrightText: 2026 Strac contributors
// SPDX-License-Identifier: MIT

//! Changeset stubs.
//!
//! A Store publication would map to a changeset, but the supported schema
//! has no event log to build one from. Every changeset is a placeholder that
//! explains this.

use std::collections::BTreeMap;
use std::time::SystemTime;

use crate::api::{ChangeKind, NodeKind};

pub const PLACEHOLDER_MESSAGE: &str =
    "Changeset history is not available for Store repositories.";

pub const PLACEHOLDER_AUTHOR: &str = "strac";

/// One path touched by a changeset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangesetEntry {
    pub path: String,
    pub kind: NodeKind,
    pub change: ChangeKind,
    pub base_path: Option<String>,
    pub base_rev: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Changeset {
    pub rev: Option<String>,
    pub message: String,
    pub author: String,
    pub date: SystemTime,
}

impl Changeset {
    pub fn placeholder(rev: Option<&str>) -> Self {
        Self {
            rev: rev.map(str::to_owned),
            message: PLACEHOLDER_MESSAGE.to_owned(),
            author: PLACEHOLDER_AUTHOR.to_owned(),
            date: SystemTime::now(),
        }
    }

    pub fn changes(&self) -> Vec<ChangesetEntry> {
        Vec::new()
    }

    pub fn properties(&self) -> BTreeMap<String, String> {
        BTreeMap::new()
    }
}
