// SPDX-FileCopyrightText: 2026 Strac contributors
// SPDX-License-Identifier: MIT

use strac_store_core::format::heading;
use strac_store_core::{QualifiedName, SharedVariable, WikiWriter};

use super::{Node, PackageNode, leaf_path};
use crate::error::{Error, Result};

const DISPLAY_PREFIX: &str = "* Namespace: ";

/// Everything fetched for a fully initialized namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceBody {
    pub id: i64,
    pub definition: String,
    pub comment_id: i64,
    pub shared_variables: Vec<SharedVariable>,
}

/// A namespace defined by a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceNode<'a> {
    package: PackageNode<'a>,
    name: QualifiedName,
    path: String,
    body: Option<NamespaceBody>,
}

impl<'a> NamespaceNode<'a> {
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
        body: NamespaceBody,
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

    pub fn display_name(&self) -> String {
        format!("{DISPLAY_PREFIX}{}", self.name.display_name())
    }

    pub fn body(&self) -> Option<&NamespaceBody> {
        self.body.as_ref()
    }

    /// The namespace comment, empty when there is none.
    ///
    /// A named namespace is resolved through its package first.
    pub fn comment(&self) -> Result<String> {
        if let Some(body) = &self.body {
            return self.package.comment_text(body.comment_id, &self.name);
        }
        match self.package.resolve_subnode(self.name.full())? {
            Some(Node::Namespace(full)) => full.comment(),
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
            .comment(heading::NAMESPACE_COMMENT, &comment)
            .shared_variables(heading::NAMESPACE_SHARED_VARIABLES, &body.shared_variables);
        Ok(Some(out.finish()))
    }
}
