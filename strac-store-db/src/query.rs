// SPDX-FileCopyrightText: 2026 Strac contributors
// SPDX-License-Identifier: MIT

//! Read query operations for the Store database.
//!
//! Every query is parameterized. The only SQL text built at run time is a
//! table name taken from [`ComponentKind`] and the placeholder list of a
//! batched `IN (...)` clause.

use std::collections::HashMap;

use rusqlite::{OptionalExtension, Row, params, params_from_iter};

use crate::blob::decode_blob;
use crate::connection::StoreDb;
use crate::error::Result;
use crate::types::{
    ComponentKind, ComponentVersion, DefinitionRow, EnvironmentEntry, MethodRow,
    SharedVariableRow,
};

/// Upper bound on bound parameters per batched blob query.
const BLOB_BATCH: usize = 500;

fn component_row(row: &Row<'_>) -> rusqlite::Result<ComponentVersion> {
    Ok(ComponentVersion {
        id: row.get(0)?,
        name: row.get(1)?,
        version: row.get(2)?,
    })
}

fn environment_row(row: &Row<'_>) -> rusqlite::Result<EnvironmentEntry> {
    Ok(EnvironmentEntry {
        name: row.get(0)?,
        environment: row.get(1)?,
    })
}

impl StoreDb {
    /// Query a bundle or package by name.
    ///
    /// With `version` set, that exact version is returned. Without it, the
    /// most recently published version wins; equal timestamps are broken by
    /// the highest primary key.
    pub fn component_by_name(
        &self,
        kind: ComponentKind,
        name: &str,
        version: Option<&str>,
    ) -> Result<Option<ComponentVersion>> {
        let found = match version {
            Some(version) => {
                let sql = format!(
                    r#"
                    SELECT primarykey, name, version FROM {}
                    WHERE name = ?1 AND version = ?2
                    ORDER BY timestamp DESC, primarykey DESC
                    LIMIT 1
                    "#,
                    kind.table()
                );
                let mut stmt = self.conn.prepare_cached(&sql)?;
                stmt.query_row(params![name, version], component_row)
                    .optional()?
            }
            None => {
                let sql = format!(
                    r#"
                    SELECT primarykey, name, version FROM {}
                    WHERE name = ?1
                    ORDER BY timestamp DESC, primarykey DESC
                    LIMIT 1
                    "#,
                    kind.table()
                );
                let mut stmt = self.conn.prepare_cached(&sql)?;
                stmt.query_row(params![name], component_row).optional()?
            }
        };
        Ok(found)
    }

    /// Check whether any version of a bundle or package with this name exists.
    pub fn component_exists(&self, kind: ComponentKind, name: &str) -> Result<bool> {
        let sql = format!("SELECT 1 FROM {} WHERE name = ?1 LIMIT 1", kind.table());
        let mut stmt = self.conn.prepare_cached(&sql)?;
        Ok(stmt.exists(params![name])?)
    }

    /// Latest version of every bundle or package, ordered by name.
    pub fn latest_components(&self, kind: ComponentKind) -> Result<Vec<ComponentVersion>> {
        let sql = format!(
            r#"
            SELECT primarykey, name, version FROM (
                SELECT primarykey, name, version,
                       ROW_NUMBER() OVER (
                           PARTITION BY name ORDER BY timestamp DESC, primarykey DESC
                       ) AS recency
                FROM {}
            )
            WHERE recency = 1
            ORDER BY name
            "#,
            kind.table()
        );
        let mut stmt = self.conn.prepare_cached(&sql)?;
        let rows = stmt.query_map([], component_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Latest version of every bundle or package whose name starts with `prefix`.
    ///
    /// The comparison is exact and case-sensitive; `%` and `_` in the prefix
    /// are ordinary characters.
    pub fn latest_components_with_prefix(
        &self,
        kind: ComponentKind,
        prefix: &str,
    ) -> Result<Vec<ComponentVersion>> {
        let sql = format!(
            r#"
            SELECT primarykey, name, version FROM (
                SELECT primarykey, name, version,
                       ROW_NUMBER() OVER (
                           PARTITION BY name ORDER BY timestamp DESC, primarykey DESC
                       ) AS recency
                FROM {}
                WHERE substr(name, 1, length(?1)) = ?1
            )
            WHERE recency = 1
            ORDER BY name
            "#,
            kind.table()
        );
        let mut stmt = self.conn.prepare_cached(&sql)?;
        let rows = stmt.query_map(params![prefix], component_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Bundles listed as members of a bundle.
    pub fn sub_bundles(&self, bundle_id: i64) -> Result<Vec<ComponentVersion>> {
        let mut stmt = self.conn.prepare_cached(
            r#"
            SELECT b.primarykey, b.name, b.version
            FROM tw_bundles m
            JOIN tw_bundle b ON b.primarykey = m.subbundleref
            WHERE m.bundleref = ?1
            ORDER BY b.name, b.primarykey
            "#,
        )?;
        let rows = stmt.query_map(params![bundle_id], component_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Packages listed as members of a bundle.
    pub fn bundle_packages(&self, bundle_id: i64) -> Result<Vec<ComponentVersion>> {
        let mut stmt = self.conn.prepare_cached(
            r#"
            SELECT p.primarykey, p.name, p.version
            FROM tw_packages m
            JOIN tw_package p ON p.primarykey = m.packageref
            WHERE m.bundleref = ?1
            ORDER BY p.name, p.primarykey
            "#,
        )?;
        let rows = stmt.query_map(params![bundle_id], component_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Namespaces defined by a package.
    pub fn package_namespaces(&self, package_id: i64) -> Result<Vec<EnvironmentEntry>> {
        let mut stmt = self.conn.prepare_cached(
            r#"
            SELECT name, environmentstring FROM tw_pkgnamespacesview
            WHERE packageref = ?1
            ORDER BY environmentstring, name
            "#,
        )?;
        let rows = stmt.query_map(params![package_id], environment_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Classes defined by a package.
    pub fn package_classes(&self, package_id: i64) -> Result<Vec<EnvironmentEntry>> {
        let mut stmt = self.conn.prepare_cached(
            r#"
            SELECT name, environmentstring FROM tw_pkgclassesview
            WHERE packageref = ?1
            ORDER BY environmentstring, name
            "#,
        )?;
        let rows = stmt.query_map(params![package_id], environment_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Distinct class names (metaclasses included) that have methods in a package.
    pub fn package_method_class_names(&self, package_id: i64) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare_cached(
            r#"
            SELECT DISTINCT classname FROM tw_methodsview
            WHERE packageref = ?1
            ORDER BY classname
            "#,
        )?;
        let rows = stmt.query_map(params![package_id], |row| row.get(0))?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Definition of a namespace within a package.
    pub fn namespace_definition(
        &self,
        package_id: i64,
        environment: &str,
        name: &str,
    ) -> Result<Option<DefinitionRow>> {
        let mut stmt = self.conn.prepare_cached(
            r#"
            SELECT primarykey, commentid, blobdata FROM tw_pkgnamespacesandsourcesview
            WHERE packageref = ?1 AND name = ?2 AND environmentstring = ?3
            ORDER BY primarykey
            LIMIT 1
            "#,
        )?;
        let raw = stmt
            .query_row(params![package_id, name, environment], raw_definition)
            .optional()?;
        raw.map(RawDefinition::decode).transpose()
    }

    /// Definition of a class within a package.
    pub fn class_definition(
        &self,
        package_id: i64,
        environment: &str,
        name: &str,
    ) -> Result<Option<DefinitionRow>> {
        let mut stmt = self.conn.prepare_cached(
            r#"
            SELECT primarykey, commentid, blobdata FROM tw_pkgclassesandsourcesview
            WHERE packageref = ?1 AND name = ?2 AND environmentstring = ?3
            ORDER BY primarykey
            LIMIT 1
            "#,
        )?;
        let raw = stmt
            .query_row(params![package_id, name, environment], raw_definition)
            .optional()?;
        raw.map(RawDefinition::decode).transpose()
    }

    /// Methods a package defines for `class_name` (use `"<name> class"` for the metaclass).
    pub fn methods_for_class(&self, package_id: i64, class_name: &str) -> Result<Vec<MethodRow>> {
        let mut stmt = self.conn.prepare_cached(
            r#"
            SELECT primarykey, name, coalesce(protocolname, ''), sourcecodeid FROM tw_methodsview
            WHERE packageref = ?1 AND classname = ?2
            ORDER BY protocolname, name
            "#,
        )?;
        let rows = stmt.query_map(params![package_id, class_name], |row| {
            Ok(MethodRow {
                id: row.get(0)?,
                name: row.get(1)?,
                protocol: row.get(2)?,
                source_id: row.get(3)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Shared variables a package declares in `environment`.
    pub fn shared_variables(
        &self,
        package_id: i64,
        environment: &str,
    ) -> Result<Vec<SharedVariableRow>> {
        let mut stmt = self.conn.prepare_cached(
            r#"
            SELECT primarykey, name, blobdata FROM tw_dataandsourcesview
            WHERE packageref = ?1 AND environmentstring = ?2
            ORDER BY name
            "#,
        )?;
        let rows = stmt.query_map(params![package_id, environment], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Option<String>>(2)?,
            ))
        })?;
        let raw = rows.collect::<rusqlite::Result<Vec<_>>>()?;

        raw.into_iter()
            .map(|(id, name, data)| {
                Ok(SharedVariableRow {
                    name,
                    definition: decode_blob(id, data.as_deref().unwrap_or_default())?,
                })
            })
            .collect()
    }

    /// Decoded text of a single blob, or `None` if no such blob exists.
    pub fn blob_text(&self, blob_id: i64) -> Result<Option<String>> {
        let mut stmt =
            self.conn
                .prepare_cached("SELECT blobdata FROM tw_blob WHERE primarykey = ?1")?;
        let data: Option<Option<String>> = stmt
            .query_row(params![blob_id], |row| row.get(0))
            .optional()?;
        data.map(|data| decode_blob(blob_id, data.as_deref().unwrap_or_default()))
            .transpose()
    }

    /// Decoded text of many blobs, keyed by blob ID.
    ///
    /// IDs without a blob row are absent from the result.
    pub fn blob_texts(&self, blob_ids: &[i64]) -> Result<HashMap<i64, String>> {
        let mut texts = HashMap::with_capacity(blob_ids.len());
        for chunk in blob_ids.chunks(BLOB_BATCH) {
            let placeholders = vec!["?"; chunk.len()].join(", ");
            let sql = format!(
                "SELECT primarykey, blobdata FROM tw_blob WHERE primarykey IN ({placeholders})"
            );
            let mut stmt = self.conn.prepare(&sql)?;
            let rows = stmt.query_map(params_from_iter(chunk.iter()), |row| {
                Ok((row.get::<_, i64>(0)?, row.get::<_, Option<String>>(1)?))
            })?;
            let raw = rows.collect::<rusqlite::Result<Vec<_>>>()?;
            for (id, data) in raw {
                texts.insert(id, decode_blob(id, data.as_deref().unwrap_or_default())?);
            }
        }
        Ok(texts)
    }
}

struct RawDefinition {
    id: i64,
    comment_id: i64,
    data: Option<String>,
}

fn raw_definition(row: &Row<'_>) -> rusqlite::Result<RawDefinition> {
    Ok(RawDefinition {
        id: row.get(0)?,
        comment_id: row.get::<_, Option<i64>>(1)?.unwrap_or(0),
        data: row.get(2)?,
    })
}

impl RawDefinition {
    fn decode(self) -> Result<DefinitionRow> {
        Ok(DefinitionRow {
            id: self.id,
            comment_id: self.comment_id,
            definition: decode_blob(self.id, self.data.as_deref().unwrap_or_default())?,
        })
    }
}
