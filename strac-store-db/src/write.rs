// SPDX-FileCopyrightText: 2026 Strac contributors
// SPDX-License-Identifier: MIT

//! Write operations for the Store database.
//!
//! Strac never writes to a production Store. These exist to build fixture
//! databases for tests and demos.

use rusqlite::params;

use crate::blob::encode_blob;
use crate::connection::StoreDb;
use crate::error::Result;
use crate::types::ComponentKind;

/// Parameters for publishing a bundle or package version.
#[derive(Debug, Clone, Default)]
pub struct PublishParams {
    pub name: String,
    pub version: String,
    /// Publication time (Unix timestamp); the latest one is the default version
    pub timestamp: i64,
}

/// Parameters for a namespace or class definition.
#[derive(Debug, Clone, Default)]
pub struct DefinitionParams {
    /// Simple name
    pub name: String,
    /// Enclosing environment, e.g. "Root.Smalltalk"
    pub environment: String,
    /// Definition source
    pub definition: String,
    /// Comment text, if any
    pub comment: Option<String>,
}

/// Parameters for a method.
#[derive(Debug, Clone, Default)]
pub struct MethodParams {
    /// Fully-qualified class name, with a " class" suffix for class-side methods
    pub class_name: String,
    pub name: String,
    pub protocol: String,
    pub source: String,
}

/// Parameters for a shared variable.
#[derive(Debug, Clone, Default)]
pub struct SharedVariableParams {
    pub name: String,
    /// Fully-qualified name of the declaring class or namespace
    pub environment: String,
    pub definition: String,
}

impl StoreDb {
    /// Store text in `tw_blob`, encoded the way Store encodes it.
    ///
    /// Returns the blob ID.
    pub fn insert_blob(&self, text: &str) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO tw_blob (blobtype, blobdata) VALUES (0, ?1)",
            params![encode_blob(text)],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Publish a bundle or package version.
    pub fn publish_component(&self, kind: ComponentKind, params: &PublishParams) -> Result<i64> {
        let sql = format!(
            "INSERT INTO {} (name, version, timestamp) VALUES (?1, ?2, ?3)",
            kind.table()
        );
        self.conn
            .execute(&sql, params![params.name, params.version, params.timestamp])?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Record `sub_bundle_id` as a member of `bundle_id`.
    pub fn add_sub_bundle(&self, bundle_id: i64, sub_bundle_id: i64) -> Result<()> {
        self.conn.execute(
            "INSERT OR IGNORE INTO tw_bundles (bundleref, subbundleref) VALUES (?1, ?2)",
            params![bundle_id, sub_bundle_id],
        )?;
        Ok(())
    }

    /// Record `package_id` as a member of `bundle_id`.
    pub fn add_bundle_package(&self, bundle_id: i64, package_id: i64) -> Result<()> {
        self.conn.execute(
            "INSERT OR IGNORE INTO tw_packages (bundleref, packageref) VALUES (?1, ?2)",
            params![bundle_id, package_id],
        )?;
        Ok(())
    }

    /// Insert a namespace definition (not yet linked to any package).
    pub fn insert_namespace(&self, params: &DefinitionParams) -> Result<i64> {
        let (definition_id, comment_id) = self.insert_definition_blobs(params)?;
        self.conn.execute(
            r#"
            INSERT INTO tw_namespace (name, environmentstring, commentid, definitionid)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![params.name, params.environment, comment_id, definition_id],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Insert a class definition (not yet linked to any package).
    pub fn insert_class(&self, params: &DefinitionParams) -> Result<i64> {
        let (definition_id, comment_id) = self.insert_definition_blobs(params)?;
        self.conn.execute(
            r#"
            INSERT INTO tw_class (name, environmentstring, commentid, definitionid)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![params.name, params.environment, comment_id, definition_id],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Insert a method and its source blob (not yet linked to any package).
    pub fn insert_method(&self, params: &MethodParams) -> Result<i64> {
        let source_id = self.insert_blob(&params.source)?;
        self.insert_method_row(params, source_id)
    }

    /// Insert a method pointing at an existing (or missing) source blob.
    pub fn insert_method_row(&self, params: &MethodParams, source_id: i64) -> Result<i64> {
        self.conn.execute(
            r#"
            INSERT INTO tw_methods (name, classname, protocolname, sourcecodeid)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![params.name, params.class_name, params.protocol, source_id],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Insert a shared variable and its definition blob.
    pub fn insert_shared_variable(&self, params: &SharedVariableParams) -> Result<i64> {
        let definition_id = self.insert_blob(&params.definition)?;
        self.conn.execute(
            r#"
            INSERT INTO tw_data (name, environmentstring, definitionid)
            VALUES (?1, ?2, ?3)
            "#,
            params![params.name, params.environment, definition_id],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Link a namespace into a package version.
    pub fn link_namespace(&self, package_id: i64, namespace_id: i64) -> Result<()> {
        self.link("tw_pkgnamespaces", "namespaceref", package_id, namespace_id)
    }

    /// Link a class into a package version.
    pub fn link_class(&self, package_id: i64, class_id: i64) -> Result<()> {
        self.link("tw_pkgclasses", "classref", package_id, class_id)
    }

    /// Link a method into a package version.
    pub fn link_method(&self, package_id: i64, method_id: i64) -> Result<()> {
        self.link("tw_pkgmethods", "methodref", package_id, method_id)
    }

    /// Link a shared variable into a package version.
    pub fn link_shared_variable(&self, package_id: i64, data_id: i64) -> Result<()> {
        self.link("tw_pkgdata", "dataref", package_id, data_id)
    }

    fn link(&self, table: &'static str, column: &'static str, package_id: i64, id: i64) -> Result<()> {
        let sql = format!("INSERT OR IGNORE INTO {table} (packageref, {column}) VALUES (?1, ?2)");
        self.conn.execute(&sql, params![package_id, id])?;
        Ok(())
    }

    fn insert_definition_blobs(&self, params: &DefinitionParams) -> Result<(i64, i64)> {
        let definition_id = self.insert_blob(&params.definition)?;
        let comment_id = match &params.comment {
            Some(comment) => self.insert_blob(comment)?,
            None => 0,
        };
        Ok((definition_id, comment_id))
    }
}
