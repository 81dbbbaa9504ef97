// SPDX-FileCopyrightText: 2026 Strac contributors
// SPDX-License-Identifier: MIT

//! Database row types for Store metadata.

/// The two versioned component kinds Store publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Bundle,
    Package,
}

impl ComponentKind {
    /// Table holding one row per published version.
    pub(crate) fn table(self) -> &'static str {
        match self {
            ComponentKind::Bundle => "tw_bundle",
            ComponentKind::Package => "tw_package",
        }
    }
}

/// One published version of a bundle or package.
///
/// This represents a row from `tw_bundle` or `tw_package`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentVersion {
    /// Database row ID
    pub id: i64,
    /// Component name, shared by all its versions
    pub name: String,
    /// Version string (e.g., "1.0")
    pub version: String,
}

/// A namespace or class as listed in a package, without its definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentEntry {
    /// Simple name (e.g., "StracClass11")
    pub name: String,
    /// Enclosing environment (e.g., "Root.Smalltalk.StracTest")
    pub environment: String,
}

impl EnvironmentEntry {
    /// Environment and name joined into a fully-qualified name.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.environment, self.name)
    }
}

/// Definition row of a namespace or class, with its definition text decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionRow {
    /// Database row ID
    pub id: i64,
    /// Blob ID of the comment, 0 when there is none
    pub comment_id: i64,
    /// Decoded definition source
    pub definition: String,
}

/// A method row from `tw_methodsview`, before its source is fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodRow {
    /// Database row ID
    pub id: i64,
    /// Selector
    pub name: String,
    /// Protocol (method category); empty when Store recorded none
    pub protocol: String,
    /// Blob ID of the method source
    pub source_id: i64,
}

/// A shared variable row, with its definition decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedVariableRow {
    pub name: String,
    pub definition: String,
}
