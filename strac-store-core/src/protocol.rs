// SPDX-FileCopyrightText: 2026 Strac contributors
// SPDX-License-Identifier: MIT

//! Protocols, methods and shared variables, in browser order.
//!
//! Smalltalk browsers list initialization protocols first, private ones last
//! and everything else alphabetically in between. Methods and shared
//! variables are listed alphabetically.

use std::cmp::Ordering;

/// Protocol names containing one of these sort first.
const BEFORE_KEYWORDS: &[&str] = &["initialize-release", "initial"];

/// Protocol names containing one of these sort last.
const AFTER_KEYWORDS: &[&str] = &["private", "pvt"];

/// Where a protocol falls in browser order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProtocolRank {
    Initialization,
    Ordinary,
    Private,
}

impl ProtocolRank {
    /// Rank a protocol name by case-insensitive keyword match.
    pub fn of(name: &str) -> Self {
        let lower = name.to_lowercase();
        if BEFORE_KEYWORDS.iter().any(|k| lower.contains(k)) {
            ProtocolRank::Initialization
        } else if AFTER_KEYWORDS.iter().any(|k| lower.contains(k)) {
            ProtocolRank::Private
        } else {
            ProtocolRank::Ordinary
        }
    }
}

/// A single method and its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    pub name: String,
    pub source: String,
}

impl Ord for Method {
    fn cmp(&self, other: &Self) -> Ordering {
        // Listed by name; the source only keeps `Ord` consistent with `Eq`.
        self.name
            .cmp(&other.name)
            .then_with(|| self.source.cmp(&other.source))
    }
}

impl PartialOrd for Method {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A named method category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Protocol {
    name: String,
    rank: ProtocolRank,
    methods: Vec<Method>,
}

impl Protocol {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            rank: ProtocolRank::of(&name),
            name,
            methods: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rank(&self) -> ProtocolRank {
        self.rank
    }

    /// Add a method, keeping the list in name order.
    pub fn add_method(&mut self, method: Method) {
        let at = self.methods.partition_point(|m| m <= &method);
        self.methods.insert(at, method);
    }

    pub fn methods(&self) -> &[Method] {
        &self.methods
    }
}

impl Ord for Protocol {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank
            .cmp(&other.rank)
            .then_with(|| self.name.cmp(&other.name))
    }
}

impl PartialOrd for Protocol {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A class- or namespace-scoped variable declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedVariable {
    pub name: String,
    pub definition: String,
}

impl Ord for SharedVariable {
    fn cmp(&self, other: &Self) -> Ordering {
        // Listed by name; the definition only keeps `Ord` consistent with `Eq`.
        self.name
            .cmp(&other.name)
            .then_with(|| self.definition.cmp(&other.definition))
    }
}

impl PartialOrd for SharedVariable {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
