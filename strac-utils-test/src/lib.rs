// SPDX-FileCopyrightText: 2026 Strac contributors
// SPDX-License-Identifier: MIT

//! Test utilities for Strac.
//!
//! This crate builds the fixture Store database the tests of every Strac
//! crate run against, and provides proptest strategies over its names.
//!
//! The fixture holds:
//!
//! - `TestBundle` 1.0 (`TestPackage1`, `TestPackage2`) and 1.1 (adds the
//!   sub-bundle `TestSubBundle`)
//! - `TestSubBundle` 1.0 (`TestPackage3`)
//! - `Base VisualWorks` 7.6 (the `UIBasics-*` packages)
//! - `TestPackage1` 1.0 and 1.1: namespace `StracTest`, class
//!   `StracTest.StracClass11`, and an extension of `Core.Object`
//! - `TestPackage2` 1.0: class `StracClass21`; 1.2 adds a shared variable to
//!   it and extends `StracTest.StracClass11` and `Core.Object`
//! - `TestPackage3` 1.0, an empty package
//! - `UIBasicsExtras` 1.0, whose name starts with `UIBasics` but not `UIBasics-`

use std::path::{Path, PathBuf};

use proptest::prelude::*;
use strac_store_db::{
    ComponentKind, DefinitionParams, MethodParams, OpenMode, PublishParams, Result,
    SharedVariableParams, StoreDb,
};
use tempfile::TempDir;

pub const BUNDLE_NAMES: &[&str] = &["Base VisualWorks", "TestBundle", "TestSubBundle"];

pub const UIBASICS_PACKAGES: &[&str] = &[
    "UIBasics-Collections",
    "UIBasics-Components",
    "UIBasics-Controllers",
    "UIBasics-Datasets",
    "UIBasics-Internationalization",
    "UIBasics-Notebook",
    "UIBasics-Support",
];

pub const STRAC_CLASS11_DEFINITION: &str = "Smalltalk.StracTest defineClass: #StracClass11
\tsuperclass: #{Core.Object}
\tindexedType: #none
\tprivate: false
\tinstanceVariableNames: 'one two '
\tclassInstanceVariableNames: ''
\timports: ''
\tcategory: 'TestPackage1'";

pub const STRAC_CLASS11_COMMENT: &str = "StracClass1 has a class comment.  Hooray!

Instance Variables:
\tone\t<Object>\tdescription of one
\ttwo\t<Object>\tdescription of two
";

pub const INITIALIZE_SOURCE: &str = "initialize
\t\"Initialize a newly created instance. This method must answer the receiver.\"

\t\" *** Edit the following to properly initialize instance variables ***\"
\tone := nil.
\ttwo := nil.
\t\" *** And replace this comment with additional initialization code *** \"
\t^self
";

pub const NEW_SOURCE: &str = "new
\t\"Answer a newly created and initialized instance.\"

\t^super new initialize
";

pub const STRAC_TEST_DEFINITION: &str = "Smalltalk defineNameSpace: #StracTest
\tprivate: false
\timports: '
\t\t\tprivate Smalltalk.*
\t\t\tprivate Core.*
\t\t\t'
\tcategory: 'TestPackage1'";

pub const STRAC_TEST_COMMENT: &str = "Namespaces can have comments, too!";

pub const SOMETHING_OR_OTHER_DEFINITION: &str =
    "Smalltalk.StracTest defineSharedVariable: #SomethingOrOther
\tprivate: false
\tconstant: false
\tcategory: 'testing'
\tinitializer: 'Array new: 5'";

pub const VAR_NAME_DEFINITION: &str = "Smalltalk.StracClass21 defineSharedVariable: #VarName
\tprivate: false
\tconstant: false
\tcategory: 'testing'
\tinitializer: 'Array new: 5'";

pub const STRAC_CLASS21_DEFINITION: &str = "Smalltalk defineClass: #StracClass21
\tsuperclass: #{Core.Object}
\tindexedType: #none
\tprivate: false
\tinstanceVariableNames: ''
\tclassInstanceVariableNames: ''
\timports: ''
\tcategory: 'TestPackage2'";

/// An in-memory Store database holding the fixture data.
pub fn fixture_db() -> StoreDb {
    let db = StoreDb::open_memory().expect("Failed to create in-memory database");
    populate(&db).expect("Failed to populate fixture database");
    db
}

/// The fixture database written to a file in a temporary directory.
///
/// The directory, and the file, are removed when the value is dropped.
pub struct FixtureFile {
    _dir: TempDir,
    path: PathBuf,
}

impl FixtureFile {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temporary directory");
        let path = dir.path().join("store.sqlite");
        let db = StoreDb::open(&path, OpenMode::Create).expect("Failed to create fixture file");
        populate(&db).expect("Failed to populate fixture file");
        db.close().expect("Failed to close fixture file");
        Self { _dir: dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read-only SQLite URI for the database.
    pub fn uri(&self) -> String {
        format!("file:{}?mode=ro", self.path.display())
    }
}

/// Write the fixture data into an empty Store schema.
pub fn populate(db: &StoreDb) -> Result<()> {
    let mut timestamp = 0;
    let mut publish = |kind: ComponentKind, name: &str, version: &str| {
        timestamp += 100;
        db.publish_component(
            kind,
            &PublishParams {
                name: name.into(),
                version: version.into(),
                timestamp,
            },
        )
    };

    let pkg1_0 = publish(ComponentKind::Package, "TestPackage1", "1.0")?;
    let pkg2_0 = publish(ComponentKind::Package, "TestPackage2", "1.0")?;
    let pkg3_0 = publish(ComponentKind::Package, "TestPackage3", "1.0")?;
    let pkg1_1 = publish(ComponentKind::Package, "TestPackage1", "1.1")?;
    let pkg2_2 = publish(ComponentKind::Package, "TestPackage2", "1.2")?;
    let mut uibasics = Vec::new();
    for name in UIBASICS_PACKAGES {
        uibasics.push(publish(ComponentKind::Package, name, "7.6")?);
    }
    publish(ComponentKind::Package, "UIBasicsExtras", "1.0")?;

    let bundle1_0 = publish(ComponentKind::Bundle, "TestBundle", "1.0")?;
    let sub_bundle = publish(ComponentKind::Bundle, "TestSubBundle", "1.0")?;
    let bundle1_1 = publish(ComponentKind::Bundle, "TestBundle", "1.1")?;
    let base = publish(ComponentKind::Bundle, "Base VisualWorks", "7.6")?;

    db.add_bundle_package(bundle1_0, pkg1_0)?;
    db.add_bundle_package(bundle1_0, pkg2_0)?;
    db.add_sub_bundle(bundle1_1, sub_bundle)?;
    db.add_bundle_package(bundle1_1, pkg1_1)?;
    db.add_bundle_package(bundle1_1, pkg2_2)?;
    db.add_bundle_package(sub_bundle, pkg3_0)?;
    for id in uibasics {
        db.add_bundle_package(base, id)?;
    }

    populate_test_package1(db, &[pkg1_0, pkg1_1])?;
    populate_test_package2(db, pkg2_0, pkg2_2)?;
    Ok(())
}

fn method(class_name: &str, protocol: &str, name: &str, source: &str) -> MethodParams {
    MethodParams {
        class_name: class_name.into(),
        name: name.into(),
        protocol: protocol.into(),
        source: source.into(),
    }
}

fn populate_test_package1(db: &StoreDb, versions: &[i64]) -> Result<()> {
    let namespace = db.insert_namespace(&DefinitionParams {
        name: "StracTest".into(),
        environment: "Root.Smalltalk".into(),
        definition: STRAC_TEST_DEFINITION.into(),
        comment: Some(STRAC_TEST_COMMENT.into()),
    })?;
    let namespace_var = db.insert_shared_variable(&SharedVariableParams {
        name: "SomethingOrOther".into(),
        environment: "Root.Smalltalk.StracTest".into(),
        definition: SOMETHING_OR_OTHER_DEFINITION.into(),
    })?;
    let class = db.insert_class(&DefinitionParams {
        name: "StracClass11".into(),
        environment: "Root.Smalltalk.StracTest".into(),
        definition: STRAC_CLASS11_DEFINITION.into(),
        comment: Some(STRAC_CLASS11_COMMENT.into()),
    })?;

    let class_name = "Root.Smalltalk.StracTest.StracClass11";
    let metaclass_name = "Root.Smalltalk.StracTest.StracClass11 class";
    let methods = [
        method(class_name, "accessing", "two:", "two: anObject\n\ttwo := anObject"),
        method(class_name, "initialize-release", "initialize", INITIALIZE_SOURCE),
        method(class_name, "accessing", "one", "one\n\t^one"),
        method(class_name, "accessing", "two", "two\n\t^two"),
        method(class_name, "accessing", "one:", "one: anObject\n\tone := anObject"),
        method(metaclass_name, "instance creation", "new", NEW_SOURCE),
        method(
            "Root.Smalltalk.Core.Object",
            "converting",
            "asStracObject",
            "asStracObject\n\t^StracTest.StracClass11 new",
        ),
    ];
    let mut method_ids = Vec::new();
    for params in &methods {
        method_ids.push(db.insert_method(params)?);
    }

    for &package in versions {
        db.link_namespace(package, namespace)?;
        db.link_shared_variable(package, namespace_var)?;
        db.link_class(package, class)?;
        for &id in &method_ids {
            db.link_method(package, id)?;
        }
    }
    Ok(())
}

fn populate_test_package2(db: &StoreDb, v1_0: i64, v1_2: i64) -> Result<()> {
    let class = db.insert_class(&DefinitionParams {
        name: "StracClass21".into(),
        environment: "Root.Smalltalk".into(),
        definition: STRAC_CLASS21_DEFINITION.into(),
        comment: None,
    })?;
    let var = db.insert_shared_variable(&SharedVariableParams {
        name: "VarName".into(),
        environment: "Root.Smalltalk.StracClass21".into(),
        definition: VAR_NAME_DEFINITION.into(),
    })?;
    let extension_methods = [
        method(
            "Root.Smalltalk.StracTest.StracClass11",
            "extensions",
            "fromPackage2",
            "fromPackage2\n\t^true",
        ),
        method(
            "Root.Smalltalk.StracTest.StracClass11 class",
            "private",
            "secretInstance",
            "secretInstance\n\t^self new",
        ),
        method(
            "Root.Smalltalk.Core.Object class",
            "instance creation",
            "stracDefault",
            "stracDefault\n\t^self new",
        ),
    ];

    db.link_class(v1_0, class)?;
    db.link_class(v1_2, class)?;
    db.link_shared_variable(v1_2, var)?;
    for params in &extension_methods {
        let id = db.insert_method(params)?;
        db.link_method(v1_2, id)?;
    }
    Ok(())
}

/// Names of every bundle and package in the fixture.
pub fn component_names() -> Vec<&'static str> {
    let mut names = vec![
        "TestBundle",
        "TestSubBundle",
        "Base VisualWorks",
        "TestPackage1",
        "TestPackage2",
        "TestPackage3",
        "UIBasicsExtras",
    ];
    names.extend_from_slice(UIBASICS_PACKAGES);
    names
}

/// A segment naming a fixture bundle or package.
pub fn arb_component_name() -> impl Strategy<Value = String> {
    proptest::sample::select(component_names()).prop_map(str::to_owned)
}

/// A dotted class or namespace name, with or without the `Root.Smalltalk.` prefix.
pub fn arb_qualified_name() -> impl Strategy<Value = String> {
    (
        prop::option::of(Just("Root.Smalltalk.")),
        prop::collection::vec("[A-Z][A-Za-z0-9]{0,8}", 1..4),
    )
        .prop_map(|(prefix, parts)| format!("{}{}", prefix.unwrap_or_default(), parts.join(".")))
}

/// A path segment that may or may not name something in the fixture.
pub fn arb_segment() -> impl Strategy<Value = String> {
    prop_oneof![
        arb_component_name(),
        arb_qualified_name(),
        Just(String::new()),
    ]
}

/// A virtual path of up to five segments, optionally rooted.
pub fn arb_virtual_path() -> impl Strategy<Value = String> {
    (any::<bool>(), prop::collection::vec(arb_segment(), 0..5)).prop_map(|(rooted, segments)| {
        let joined = segments.join("/");
        if rooted { format!("/{joined}") } else { joined }
    })
}
