// SPDX-FileCopyrightText: 2026 Strac contributors
// SPDX-License-Identifier: MIT

use strac_store_core::format::heading;
use strac_store_core::{Protocol, QualifiedName, SharedVariable, WikiWriter};

use super::{Node, PackageNode, leaf_path};
use crate::error::{Error, Result};

/// Everything fetched for a fully initialized class.
///
/// The comment itself is read when content is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassBody {
    pub id: i64,
    pub definition: String,
    /// Blob ID of the class comment, 0 when there is none
    pub comment_id: i64,
    pub instance_protocols: Vec<Protocol>,
    pub class_protocols: Vec<Protocol>,
    pub shared_variables: Vec<SharedVariable>,
}

/// A class defined by a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassNode<'a> {
    package: PackageNode<'a>,
    name: QualifiedName,
    path: String,
    body: Option<ClassBody>,
}

impl<'a> ClassNode<'a> {
    pub(crate) fn named(package: PackageNode<'a>, name: QualifiedName) -> Self {
        Self {
            path: leaf_path(&package, name.display_name()),
            package,
            name,
            body: None,
        }
    }

    pub(crate) fn fully_initialized(
        package: PackageNode<'a>,
        name: QualifiedName,
        body: ClassBody,
    ) -> Self {
        Self {
            body: Some(body),
            ..Self::named(package, name)
        }
    }

    pub fn package(&self) -> &PackageNode<'a> {
        &self.package
    }

    pub fn qualified_name(&self) -> &QualifiedName {
        &self.name
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn body(&self) -> Option<&ClassBody> {
        self.body.as_ref()
    }

    /// The class comment, empty when the class has none.
    ///
    /// A named class is resolved through its package first.
    pub fn comment(&self) -> Result<String> {
        if let Some(body) = &self.body {
            return self.package.comment_text(body.comment_id, &self.name);
        }
        match self.package.resolve_subnode(self.name.full())? {
            Some(Node::Class(full)) => full.comment(),
            _ => Err(Error::no_such_node(&self.path, Some(self.package.version()))),
        }
    }

    pub(crate) fn render(&self) -> Result<Option<String>> {
        let Some(body) = &self.body else {
            return Ok(None);
        };
        let comment = self.comment()?;
        let mut out = WikiWriter::new();
        out.definition(&body.definition)
            .comment(heading::CLASS_COMMENT, &comment)
            .protocols(heading::INSTANCE_METHODS, &body.instance_protocols)
            .protocols(heading::CLASS_METHODS, &body.class_protocols)
            .shared_variables(heading::CLASS_SHARED_VARIABLES, &body.shared_variables);
        Ok(Some(out.finish()))
    }
}
