// SPDX-FileCopyrightText: 2026 Strac contributors
// SPDX-License-Identifier: MIT

//! Smoke tests for strac-store-db.
//!
//! These tests verify the schema and the read queries against an in-memory
//! database populated through the fixture writer.

use strac_store_db::{
    ComponentKind, DefinitionParams, MethodParams, OpenMode, PublishParams, SharedVariableParams,
    StoreDb,
};

fn publish(db: &StoreDb, kind: ComponentKind, name: &str, version: &str, timestamp: i64) -> i64 {
    db.publish_component(
        kind,
        &PublishParams {
            name: name.into(),
            version: version.into(),
            timestamp,
        },
    )
    .unwrap()
}

/// Verify schema creation and empty queries work.
#[test]
fn test_schema_creation() {
    let db = StoreDb::open_memory().unwrap();
    assert!(db.has_schema().unwrap());
    assert!(db.latest_components(ComponentKind::Bundle).unwrap().is_empty());
    assert!(!db.component_exists(ComponentKind::Package, "Anything").unwrap());
}

/// Latest version is chosen by timestamp, ties by highest id.
#[test]
fn test_latest_version() {
    let db = StoreDb::open_memory().unwrap();
    publish(&db, ComponentKind::Package, "Pkg", "1.0", 100);
    publish(&db, ComponentKind::Package, "Pkg", "1.2", 300);
    publish(&db, ComponentKind::Package, "Pkg", "1.1", 200);

    let latest = db
        .component_by_name(ComponentKind::Package, "Pkg", None)
        .unwrap()
        .unwrap();
    assert_eq!(latest.version, "1.2");

    let pinned = db
        .component_by_name(ComponentKind::Package, "Pkg", Some("1.0"))
        .unwrap()
        .unwrap();
    assert_eq!(pinned.version, "1.0");

    assert!(
        db.component_by_name(ComponentKind::Package, "Pkg", Some("9.9"))
            .unwrap()
            .is_none()
    );

    publish(&db, ComponentKind::Bundle, "Tied", "a", 500);
    let second = publish(&db, ComponentKind::Bundle, "Tied", "b", 500);
    let tied = db
        .component_by_name(ComponentKind::Bundle, "Tied", None)
        .unwrap()
        .unwrap();
    assert_eq!(tied.id, second);
    assert_eq!(
        db.latest_components(ComponentKind::Bundle).unwrap()[0].version,
        "b"
    );
}

/// Prefix matching is literal and case-sensitive.
#[test]
fn test_prefix_matching() {
    let db = StoreDb::open_memory().unwrap();
    publish(&db, ComponentKind::Package, "UIBasics-Support", "1", 1);
    publish(&db, ComponentKind::Package, "UIBasics-Support", "2", 2);
    publish(&db, ComponentKind::Package, "UIBasicsXNotes", "1", 1);
    publish(&db, ComponentKind::Package, "uibasics-lower", "1", 1);

    let found = db
        .latest_components_with_prefix(ComponentKind::Package, "UIBasics-")
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "UIBasics-Support");
    assert_eq!(found[0].version, "2");

    let wildcard = db
        .latest_components_with_prefix(ComponentKind::Package, "UIBasics_")
        .unwrap();
    assert!(wildcard.is_empty());
}

/// Bundle membership lists sub-bundles and packages separately.
#[test]
fn test_bundle_membership() {
    let db = StoreDb::open_memory().unwrap();
    let bundle = publish(&db, ComponentKind::Bundle, "Outer", "1", 1);
    let inner = publish(&db, ComponentKind::Bundle, "Inner", "1", 1);
    let package = publish(&db, ComponentKind::Package, "Pkg", "1", 1);
    db.add_sub_bundle(bundle, inner).unwrap();
    db.add_bundle_package(bundle, package).unwrap();

    let subs = db.sub_bundles(bundle).unwrap();
    assert_eq!(subs.len(), 1);
    assert_eq!(subs[0].name, "Inner");

    let packages = db.bundle_packages(bundle).unwrap();
    assert_eq!(packages.len(), 1);
    assert_eq!(packages[0].id, package);
    assert!(db.bundle_packages(inner).unwrap().is_empty());
}

/// Definitions, methods and shared variables come back decoded.
#[test]
fn test_code_rows() {
    let db = StoreDb::open_memory().unwrap();
    let package = publish(&db, ComponentKind::Package, "Pkg", "1", 1);

    let class = db
        .insert_class(&DefinitionParams {
            name: "Widget".into(),
            environment: "Root.Smalltalk.Demo".into(),
            definition: "Smalltalk.Demo defineClass: #Widget\n\tsuperclass: #{Core.Object}".into(),
            comment: None,
        })
        .unwrap();
    db.link_class(package, class).unwrap();

    let method = db
        .insert_method(&MethodParams {
            class_name: "Root.Smalltalk.Demo.Widget".into(),
            name: "size".into(),
            protocol: "accessing".into(),
            source: "size\n\t^0".into(),
        })
        .unwrap();
    db.link_method(package, method).unwrap();

    let var = db
        .insert_shared_variable(&SharedVariableParams {
            name: "Count".into(),
            environment: "Root.Smalltalk.Demo.Widget".into(),
            definition: "Demo.Widget defineSharedVariable: #Count".into(),
        })
        .unwrap();
    db.link_shared_variable(package, var).unwrap();

    let classes = db.package_classes(package).unwrap();
    assert_eq!(classes.len(), 1);
    assert_eq!(classes[0].qualified_name(), "Root.Smalltalk.Demo.Widget");

    let definition = db
        .class_definition(package, "Root.Smalltalk.Demo", "Widget")
        .unwrap()
        .unwrap();
    assert_eq!(definition.id, class);
    assert_eq!(definition.comment_id, 0);
    assert!(definition.definition.contains("\n\tsuperclass:"));

    assert!(
        db.namespace_definition(package, "Root.Smalltalk.Demo", "Widget")
            .unwrap()
            .is_none()
    );

    let methods = db
        .methods_for_class(package, "Root.Smalltalk.Demo.Widget")
        .unwrap();
    assert_eq!(methods.len(), 1);
    assert_eq!(methods[0].protocol, "accessing");

    let sources = db.blob_texts(&[methods[0].source_id, 9999]).unwrap();
    assert_eq!(sources.len(), 1);
    assert_eq!(sources[&methods[0].source_id], "size\n\t^0");

    let vars = db
        .shared_variables(package, "Root.Smalltalk.Demo.Widget")
        .unwrap();
    assert_eq!(vars.len(), 1);
    assert_eq!(vars[0].name, "Count");

    assert_eq!(
        db.package_method_class_names(package).unwrap(),
        vec!["Root.Smalltalk.Demo.Widget".to_string()]
    );
}

/// Batched blob lookups cross the chunk boundary without losing rows.
#[test]
fn test_blob_batches() {
    let db = StoreDb::open_memory().unwrap();
    let ids: Vec<i64> = (0..1200)
        .map(|i| db.insert_blob(&format!("blob {i}")).unwrap())
        .collect();
    let texts = db.blob_texts(&ids).unwrap();
    assert_eq!(texts.len(), ids.len());
    assert_eq!(texts[&ids[1100]], "blob 1100");
    assert!(db.blob_text(-1).unwrap().is_none());
}

/// Read-only opens see data written by an earlier read-write session.
#[test]
fn test_readonly_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.sqlite");

    {
        let db = StoreDb::open(&path, OpenMode::Create).unwrap();
        publish(&db, ComponentKind::Bundle, "Base VisualWorks", "7.6", 1);
        db.close().unwrap();
    }

    let db = StoreDb::open_readonly(path.to_str().unwrap()).unwrap();
    assert!(db.component_exists(ComponentKind::Bundle, "Base VisualWorks").unwrap());
    assert!(db.insert_blob("nope").is_err());

    let missing = dir.path().join("missing.sqlite");
    assert!(StoreDb::open_readonly(missing.to_str().unwrap()).is_err());
}
