// SPDX-FileCopyrightText: 2026 Strac contributors
// SPDX-License-Identifier: MIT

//! Trac wiki rendering of namespace, class and extension content.
//!
//! Source text goes in `{{{ }}}` blocks, sections get `=== ... ===` headings
//! and protocol names are set as `''{name}''`. A section whose collection is
//! empty is left out entirely, heading included.

use crate::protocol::{Protocol, SharedVariable};

/// MIME type of rendered leaf content.
pub const CONTENT_TYPE_WIKI: &str = "text/x-trac-wiki";

/// Section headings, each with the separator that precedes it.
pub mod heading {
    pub const CLASS_COMMENT: &str = "=== Class Comment ===";
    pub const NAMESPACE_COMMENT: &str = "=== Namespace Comment ===";
    pub const INSTANCE_METHODS: &str = "=== Instance-Side Methods ===";
    pub const CLASS_METHODS: &str = "\n=== Class-Side Methods ===";
    pub const CLASS_SHARED_VARIABLES: &str = "\n=== Class Shared Variables ===";
    pub const NAMESPACE_SHARED_VARIABLES: &str = "=== Namespace Shared Variables ===";
}

/// Accumulates one rendered document.
#[derive(Debug, Default)]
pub struct WikiWriter {
    out: String,
}

impl WikiWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The definition block that opens namespace and class documents.
    pub fn definition(&mut self, definition: &str) -> &mut Self {
        self.code_block(definition.trim());
        self.out.push('\n');
        self
    }

    /// The opening line of a class extension document.
    pub fn extension_header(&mut self, class_name: &str, package_name: &str) -> &mut Self {
        self.out.push_str("Class {{{");
        self.out.push_str(class_name);
        self.out.push_str("}}}, as extended by {{{");
        self.out.push_str(package_name);
        self.out.push_str("}}}.\n\n");
        self
    }

    /// A comment section; skipped when the comment is empty.
    pub fn comment(&mut self, heading: &str, comment: &str) -> &mut Self {
        if !comment.is_empty() {
            self.out.push_str(heading);
            self.out.push_str("\n\n");
            self.out.push_str(comment.trim());
            self.out.push_str("\n\n");
        }
        self
    }

    /// A protocols section with every method's source; skipped when empty.
    ///
    /// Protocols and methods are written in the order given.
    pub fn protocols(&mut self, heading: &str, protocols: &[Protocol]) -> &mut Self {
        if protocols.is_empty() {
            return self;
        }
        self.out.push_str(heading);
        self.out.push('\n');
        for protocol in protocols {
            self.out.push_str("\n''{");
            self.out.push_str(protocol.name());
            self.out.push_str("}''\n\n");
            for method in protocol.methods() {
                self.code_block(method.source.trim());
            }
        }
        self
    }

    /// A shared variables section; skipped when empty.
    pub fn shared_variables(&mut self, heading: &str, variables: &[SharedVariable]) -> &mut Self {
        if variables.is_empty() {
            return self;
        }
        self.out.push_str(heading);
        self.out.push_str("\n\n");
        for variable in variables {
            self.code_block(&variable.definition);
        }
        self
    }

    pub fn finish(self) -> String {
        self.out
    }

    fn code_block(&mut self, text: &str) {
        self.out.push_str("{{{\n");
        self.out.push_str(text);
        self.out.push_str("\n}}}\n");
    }
}
