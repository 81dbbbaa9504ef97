// SPDX-FileCopyrightText: 2026 Strac contributors
// SPDX-License-Identifier: MIT

//! Virtual paths over a Store repository.
//!
//! A canonical path has one of three shapes:
//!
//! - `/` - the repository root
//! - `/<name>` - a bundle or a package
//! - `/<package>/<qualified name>` - a namespace, class or class extension
//!
//! Anything longer reduces to one of these by dropping the leading segments,
//! which is how bundle nesting (`/Bundle/Package/Class`) collapses. Parsing
//! and canonicalization never fail; names that do not exist are left for the
//! caller to report.

use std::fmt;

use crate::name::strip_root_prefix;

/// A parsed virtual path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VirtualPath {
    Root,
    /// A single segment: a bundle or a package, to be decided by lookup.
    Named(String),
    /// A namespace, class or extension inside a package.
    Member { package: String, name: String },
}

impl VirtualPath {
    /// Split a path into its significant segments.
    ///
    /// Empty segments are ignored, so `""`, `"/"` and `"//"` are all the
    /// root. Only the last two segments of longer paths are kept.
    pub fn parse(path: &str) -> Self {
        let segments: Vec<&str> = segments(path).collect();
        match segments.as_slice() {
            [] => VirtualPath::Root,
            [name] => VirtualPath::Named((*name).to_owned()),
            [.., package, name] => VirtualPath::Member {
                package: (*package).to_owned(),
                name: (*name).to_owned(),
            },
        }
    }
}

impl fmt::Display for VirtualPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VirtualPath::Root => f.write_str("/"),
            VirtualPath::Named(name) => write!(f, "/{name}"),
            VirtualPath::Member { package, name } => write!(f, "/{package}/{name}"),
        }
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Reduce a path to its canonical form.
///
/// `is_component` answers whether a name belongs to a known bundle or
/// package. When the last segment is one, everything before it is dropped.
/// Otherwise the last segment is a class or namespace name and loses its
/// `Root.Smalltalk.` prefix. `None` is the root.
pub fn canonicalize<E>(
    path: Option<&str>,
    mut is_component: impl FnMut(&str) -> Result<bool, E>,
) -> Result<String, E> {
    let Some(path) = path else {
        return Ok("/".to_owned());
    };
    let segments: Vec<&str> = segments(path).collect();
    let Some(&last) = segments.last() else {
        return Ok("/".to_owned());
    };

    if is_component(last)? {
        return Ok(format!("/{last}"));
    }

    let name = strip_root_prefix(last);
    if name != last && is_component(name)? {
        return Ok(format!("/{name}"));
    }

    let canonical = match segments.len() {
        1 => VirtualPath::Named(name.to_owned()),
        n => VirtualPath::Member {
            package: segments[n - 2].to_owned(),
            name: name.to_owned(),
        },
    };
    Ok(canonical.to_string())
}


#[cfg(test)]
mod proptests {
    use std::convert::Infallible;

    use proptest::prelude::*;

    use super::*;

    fn segment() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("TestBundle".to_owned()),
            Just("TestPackage1".to_owned()),
            Just("Root.Smalltalk.TestPackage1".to_owned()),
            Just(String::new()),
            "(Root\\.Smalltalk\\.){0,2}[A-Za-z][A-Za-z0-9.]{0,12}",
        ]
    }

    fn known(name: &str) -> Result<bool, Infallible> {
        Ok(name == "TestBundle" || name == "TestPackage1")
    }

    proptest! {
        #[test]
        fn proptest_canonicalize_idempotent(parts in prop::collection::vec(segment(), 0..5)) {
            let path = format!("/{}", parts.join("/"));
            let once = canonicalize(Some(&path), known).unwrap();
            let twice = canonicalize(Some(&once), known).unwrap();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn proptest_canonical_form_parses_back(parts in prop::collection::vec(segment(), 0..5)) {
            let path = parts.join("/");
            let canonical = canonicalize(Some(&path), known).unwrap();
            prop_assert_eq!(VirtualPath::parse(&canonical).to_string(), canonical);
        }
    }
}
