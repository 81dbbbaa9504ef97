// SPDX-FileCopyrightText: 2026 Strac contributors
// SPDX-License-Identifier: MIT

//! Core Store projection semantics.
//!
//! Everything here is IO-free: the types and functions operate on values
//! already fetched from a Store database, so they can be tested without one.
//!
//! **Architecture**: This is the Core Layer of Strac, sitting between the
//! database crate and the node tree.
//!
//! # Key Modules
//!
//! - `name` - Fully-qualified Smalltalk names and the `Root.Smalltalk` prefix
//! - `path` - Virtual path parsing and canonicalization
//! - `protocol` - Protocols, methods, shared variables and their ordering
//! - `format` - Rendering node content as Trac wiki markup

pub mod format;
pub mod name;
pub mod path;
pub mod protocol;

pub use format::{CONTENT_TYPE_WIKI, WikiWriter};
pub use name::{QualifiedName, ROOT_ENVIRONMENT, ROOT_PREFIX, strip_root_prefix};
pub use path::{VirtualPath, canonicalize};
pub use protocol::{Method, Protocol, ProtocolRank, SharedVariable};
