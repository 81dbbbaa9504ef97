// SPDX-FileCopyrightText: 2026 Strac contributors
// SPDX-License-Identifier: MIT

use strac_store_core::format::heading;
use strac_store_core::{Protocol, QualifiedName, SharedVariable, WikiWriter};

use super::{PackageNode, leaf_path};

const DISPLAY_PREFIX: &str = "* Extension: ";

/// Methods and shared variables a package adds to a class it does not define.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionBody {
    pub instance_protocols: Vec<Protocol>,
    pub class_protocols: Vec<Protocol>,
    pub shared_variables: Vec<SharedVariable>,
}

/// A class as extended by a package. There is no row behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassExtensionNode<'a> {
    package: PackageNode<'a>,
    name: QualifiedName,
    path: String,
    body: Option<ExtensionBody>,
}

impl<'a> ClassExtensionNode<'a> {
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
        body: ExtensionBody,
    ) -> Self {
        Self {
            body: Some(body),
            ..Self::named(package, name)
        }
    }

    pub fn package(&self) -> &PackageNode<'a> {
        &self.package
    }

    /// Name of the extended class.
    pub fn qualified_name(&self) -> &QualifiedName {
        &self.name
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn display_name(&self) -> String {
        format!("{DISPLAY_PREFIX}{}", self.name.display_name())
    }

    pub fn body(&self) -> Option<&ExtensionBody> {
        self.body.as_ref()
    }

    pub(crate) fn render(&self) -> Option<String> {
        let body = self.body.as_ref()?;
        let mut out = WikiWriter::new();
        out.extension_header(self.name.display_name(), self.package.name())
            .protocols(heading::INSTANCE_METHODS, &body.instance_protocols)
            .protocols(heading::CLASS_METHODS, &body.class_protocols)
            .shared_variables(heading::CLASS_SHARED_VARIABLES, &body.shared_variables);
        Some(out.finish())
    }
}
