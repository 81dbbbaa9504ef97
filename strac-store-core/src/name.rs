// SPDX-FileCopyrightText: 2026 Strac contributors
// SPDX-License-Identifier: MIT

//! Fully-qualified Smalltalk names.

use derive_more::Display;

/// The environment every VisualWorks name ultimately lives in.
pub const ROOT_ENVIRONMENT: &str = "Root.Smalltalk";

/// `ROOT_ENVIRONMENT` followed by the separator.
pub const ROOT_PREFIX: &str = "Root.Smalltalk.";

/// Metaclass suffix Store appends to class names of class-side methods.
pub const METACLASS_SUFFIX: &str = " class";

/// Remove every leading `Root.Smalltalk.` from a name.
///
/// A name that consists of nothing but the prefix is returned unchanged so the
/// result is never empty.
pub fn strip_root_prefix(name: &str) -> &str {
    let mut rest = name;
    while let Some(stripped) = rest.strip_prefix(ROOT_PREFIX) {
        if stripped.is_empty() {
            break;
        }
        rest = stripped;
    }
    rest
}

/// A class or namespace name, always held in its `Root.Smalltalk.`-prefixed form.
///
/// `StracTest.StracClass11` and `Root.Smalltalk.StracTest.StracClass11` build
/// equal values.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub struct QualifiedName(String);

impl QualifiedName {
    pub fn new(name: &str) -> Self {
        if name.starts_with(ROOT_PREFIX) {
            QualifiedName(name.to_owned())
        } else {
            QualifiedName(format!("{ROOT_PREFIX}{name}"))
        }
    }

    /// Build from an environment string and a simple name, as Store stores them.
    pub fn from_parts(environment: &str, name: &str) -> Self {
        Self::new(&format!("{environment}.{name}"))
    }

    /// The prefixed form, as used by `tw_methodsview.classname`.
    pub fn full(&self) -> &str {
        &self.0
    }

    /// Everything before the last separator.
    pub fn environment(&self) -> &str {
        self.split().0
    }

    /// Everything after the last separator.
    pub fn simple_name(&self) -> &str {
        self.split().1
    }

    /// The name as shown to users and used in paths.
    pub fn display_name(&self) -> &str {
        strip_root_prefix(&self.0)
    }

    /// The class name Store records for class-side methods.
    pub fn metaclass(&self) -> String {
        format!("{}{METACLASS_SUFFIX}", self.0)
    }

    /// Turn a `tw_methodsview.classname` into the name of the instance-side class.
    pub fn from_method_class(class_name: &str) -> Self {
        Self::new(
            class_name
                .strip_suffix(METACLASS_SUFFIX)
                .unwrap_or(class_name),
        )
    }

    fn split(&self) -> (&str, &str) {
        // The prefix guarantees at least one separator.
        self.0.rsplit_once('.').unwrap_or((ROOT_ENVIRONMENT, &self.0))
    }
}

impl AsRef<str> for QualifiedName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
