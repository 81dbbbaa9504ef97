// SPDX-FileCopyrightText: 2026 Strac contributors
// SPDX-License-Identifier: MIT

//! Repository tests against the fixture Store database.

use std::time::SystemTime;

use proptest::prelude::*;
use rstest::rstest;
use strac::node::ROOT_REVISION;
use strac::{
    ChangeKind, Config, Error, Node, NodeKind, Repository, RepositoryConnector, Selector,
    StoreConnector, StoreRepository,
};
use strac_store_db::{
    ComponentKind, DefinitionParams, MethodParams, PublishParams, StoreDb,
};
use strac_utils_test::{
    BUNDLE_NAMES, FixtureFile, STRAC_CLASS11_COMMENT, STRAC_TEST_COMMENT, UIBASICS_PACKAGES,
    arb_virtual_path, fixture_db,
};

fn repository(bundles: &str, packages: &str) -> StoreRepository {
    StoreRepository::new(
        fixture_db(),
        Selector::parse_list(bundles),
        Selector::parse_list(packages),
    )
}

fn entry_names(node: &Node<'_>) -> Vec<String> {
    node.entries()
        .map(|entry| entry.unwrap().name().into_owned())
        .collect()
}

fn entry_paths(node: &Node<'_>) -> Vec<String> {
    node.entries()
        .map(|entry| entry.unwrap().path().to_owned())
        .collect()
}

const STRAC_CLASS11_CONTENT: &str = "{{{
Smalltalk.StracTest defineClass: #StracClass11
\tsuperclass: #{Core.Object}
\tindexedType: #none
\tprivate: false
\tinstanceVariableNames: 'one two '
\tclassInstanceVariableNames: ''
\timports: ''
\tcategory: 'TestPackage1'
}}}

=== Class Comment ===

StracClass1 has a class comment.  Hooray!

Instance Variables:
\tone\t<Object>\tdescription of one
\ttwo\t<Object>\tdescription of two

=== Instance-Side Methods ===

''{initialize-release}''

{{{
initialize
\t\"Initialize a newly created instance. This method must answer the receiver.\"

\t\" *** Edit the following to properly initialize instance variables ***\"
\tone := nil.
\ttwo := nil.
\t\" *** And replace this comment with additional initialization code *** \"
\t^self
}}}

''{accessing}''

{{{
one
\t^one
}}}
{{{
one: anObject
\tone := anObject
}}}
{{{
two
\t^two
}}}
{{{
two: anObject
\ttwo := anObject
}}}

=== Class-Side Methods ===

''{instance creation}''

{{{
new
\t\"Answer a newly created and initialized instance.\"

\t^super new initialize
}}}
";

const STRAC_TEST_CONTENT: &str = "{{{
Smalltalk defineNameSpace: #StracTest
\tprivate: false
\timports: '
\t\t\tprivate Smalltalk.*
\t\t\tprivate Core.*
\t\t\t'
\tcategory: 'TestPackage1'
}}}

=== Namespace Comment ===

Namespaces can have comments, too!

=== Namespace Shared Variables ===

{{{
Smalltalk.StracTest defineSharedVariable: #SomethingOrOther
\tprivate: false
\tconstant: false
\tcategory: 'testing'
\tinitializer: 'Array new: 5'
}}}
";

const STRAC_CLASS11_EXTENSION_CONTENT: &str = "Class {{{StracTest.StracClass11}}}, as extended by {{{TestPackage2}}}.

=== Instance-Side Methods ===

''{extensions}''

{{{
fromPackage2
\t^true
}}}

=== Class-Side Methods ===

''{private}''

{{{
secretInstance
\t^self new
}}}
";

/// A single bundle selector lists only that bundle, at its latest version.
#[test]
fn test_root_bundle_selector() {
    let repos = repository("TestBundle", "");
    let root = repos.get_node("/", None).unwrap();

    assert_eq!(root.name(), "");
    assert_eq!(root.revision(), ROOT_REVISION);
    assert_eq!(root.kind(), NodeKind::Directory);
    assert_eq!(root.content().unwrap(), None);

    let children: Vec<Node<'_>> = root.entries().map(Result::unwrap).collect();
    assert_eq!(children.len(), 1);
    assert!(matches!(&children[0], Node::Bundle(b) if b.name() == "TestBundle" && b.version() == "1.1"));
}

/// A package prefix lists every package whose name starts with it.
#[test]
fn test_root_package_prefix() {
    let repos = repository("", "TestPackage");
    let root = Node::Root(repos.root());
    assert_eq!(
        entry_names(&root),
        vec!["TestPackage1", "TestPackage2", "TestPackage3"]
    );
}

/// `ALL` yields every bundle exactly once, each at its most recent version.
#[test]
fn test_root_all_bundles() {
    let repos = repository("ALL", "");
    let children: Vec<Node<'_>> = Node::Root(repos.root())
        .entries()
        .map(Result::unwrap)
        .collect();

    let names: Vec<String> = children.iter().map(|c| c.name().into_owned()).collect();
    assert_eq!(names, BUNDLE_NAMES);
    for child in &children {
        assert!(matches!(child, Node::Bundle(_)));
    }
    let test_bundle = children.iter().find(|c| c.name() == "TestBundle").unwrap();
    assert_eq!(test_bundle.revision(), "1.1");
}

/// `ALL` packages lists each package once.
#[test]
fn test_root_all_packages() {
    let repos = repository("", "ALL");
    let children: Vec<Node<'_>> = Node::Root(repos.root())
        .entries()
        .map(Result::unwrap)
        .collect();
    assert_eq!(children.len(), 3 + UIBASICS_PACKAGES.len() + 1);
    assert!(children.iter().all(|c| matches!(c, Node::Package(_))));
}

/// Bundles come before packages, each in selector order.
#[test]
fn test_root_selector_lists() {
    let repos = repository("TestBundle, Base VisualWorks", "TestPackage, UIBasics-");
    let names = entry_names(&Node::Root(repos.root()));

    let mut expected = vec![
        "TestBundle",
        "Base VisualWorks",
        "TestPackage1",
        "TestPackage2",
        "TestPackage3",
    ];
    expected.extend_from_slice(UIBASICS_PACKAGES);
    assert_eq!(names, expected);
    assert!(!names.iter().any(|n| n == "UIBasicsExtras"));
}

/// Selectors that match nothing are skipped, not reported as errors.
#[test_log::test]
fn test_root_unresolvable_selectors() {
    let repos = repository("NoSuchBundle, TestBundle", "NoSuchPrefix");
    assert_eq!(entry_names(&Node::Root(repos.root())), vec!["TestBundle"]);
}

/// Enumeration is single pass.
#[test]
fn test_entries_single_pass() {
    let repos = repository("ALL", "");
    let mut entries = repos.get_node("/", None).unwrap().entries();
    assert_eq!(entries.by_ref().count(), BUNDLE_NAMES.len());
    assert!(entries.next().is_none());
}

/// Bundles list sub-bundles before packages.
#[rstest]
#[case::first_version(Some("1.0"), vec!["TestPackage1", "TestPackage2"])]
#[case::latest(None, vec!["TestSubBundle", "TestPackage1", "TestPackage2"])]
fn test_bundle_entries(#[case] rev: Option<&str>, #[case] expected: Vec<&str>) {
    let repos = repository("", "");
    let bundle = repos.get_node("/TestBundle", rev).unwrap();
    assert_eq!(bundle.kind(), NodeKind::Directory);
    assert_eq!(bundle.content().unwrap(), None);
    assert_eq!(entry_names(&bundle), expected);
}

/// A bundle's packages are the versions it was published with.
#[test]
fn test_bundle_pins_package_versions() {
    let repos = repository("", "");
    let bundle = repos.get_node("/TestBundle", Some("1.0")).unwrap();
    let revisions: Vec<String> = bundle
        .entries()
        .map(|e| e.unwrap().revision().to_owned())
        .collect();
    assert_eq!(revisions, vec!["1.0", "1.0"]);
}

/// Namespaces, then classes, then extensions, all named only.
#[test]
fn test_package_entries() {
    let repos = repository("", "");
    let package = repos.get_node("/TestPackage1", None).unwrap();
    assert_eq!(package.revision(), "1.1");

    let children: Vec<Node<'_>> = package.entries().map(Result::unwrap).collect();
    let shapes: Vec<(&str, &str)> = children
        .iter()
        .map(|c| {
            let kind = match c {
                Node::Namespace(_) => "namespace",
                Node::Class(_) => "class",
                Node::ClassExtension(_) => "extension",
                _ => "other",
            };
            (kind, c.path())
        })
        .collect();
    assert_eq!(
        shapes,
        vec![
            ("namespace", "/TestPackage1/StracTest"),
            ("class", "/TestPackage1/StracTest.StracClass11"),
            ("extension", "/TestPackage1/Core.Object"),
        ]
    );
    for child in &children {
        assert!(!child.is_fully_initialized());
        assert_eq!(child.kind(), NodeKind::File);
        assert_eq!(child.revision(), "1.1");
    }
}

/// A defined class and an extended class each appear exactly once.
#[test]
fn test_package_classes_and_extensions() {
    let repos = repository("", "");
    let package = repos.get_node("/TestPackage2", None).unwrap();
    assert_eq!(
        entry_names(&package),
        vec![
            "StracClass21",
            "* Extension: Core.Object",
            "* Extension: StracTest.StracClass11",
        ]
    );

    let first = repos.get_node("/TestPackage2", Some("1.0")).unwrap();
    assert_eq!(entry_names(&first), vec!["StracClass21"]);
}

/// A class renders definition, comment, then instance and class protocols.
#[test]
fn test_class_content() {
    let repos = repository("", "");
    let node = repos
        .get_node("/TestPackage1/StracTest.StracClass11", Some("1.0"))
        .unwrap();

    assert_eq!(node.name(), "StracTest.StracClass11");
    assert_eq!(node.revision(), "1.0");
    assert_eq!(node.kind(), NodeKind::File);
    assert_eq!(node.path(), "/TestPackage1/StracTest.StracClass11");
    assert_eq!(node.created_path(), node.path());
    assert_eq!(node.created_rev(), node.revision());
    assert_eq!(node.content_type(), Some("text/x-trac-wiki"));
    assert!(node.is_fully_initialized());

    let content = node.content().unwrap().unwrap();
    assert_eq!(content, STRAC_CLASS11_CONTENT);
    assert_eq!(node.content_length().unwrap(), Some(content.len()));
}

/// Protocols are grouped and ordered the way a browser shows them.
#[test]
fn test_class_protocols() {
    let repos = repository("", "");
    let Node::Class(class) = repos
        .get_node("/TestPackage1/StracTest.StracClass11", None)
        .unwrap()
    else {
        panic!("Expected a class node");
    };
    let body = class.body().unwrap();

    let instance: Vec<&str> = body.instance_protocols.iter().map(|p| p.name()).collect();
    assert_eq!(instance, vec!["initialize-release", "accessing"]);
    let accessors: Vec<&str> = body.instance_protocols[1]
        .methods()
        .iter()
        .map(|m| m.name.as_str())
        .collect();
    assert_eq!(accessors, vec!["one", "one:", "two", "two:"]);

    let class_side: Vec<&str> = body.class_protocols.iter().map(|p| p.name()).collect();
    assert_eq!(class_side, vec!["instance creation"]);
    assert!(body.shared_variables.is_empty());
}

/// A zero comment ID means no comment and no comment section.
#[test]
fn test_class_without_comment() {
    let repos = repository("", "");
    let node = repos.get_node("/TestPackage2/StracClass21", None).unwrap();
    let Node::Class(class) = &node else {
        panic!("Expected a class node");
    };
    assert_eq!(class.comment().unwrap(), "");

    let content = node.content().unwrap().unwrap();
    assert!(!content.contains("=== Class Comment ==="));
    assert!(!content.contains("Methods ==="));
    assert!(content.ends_with(
        "\n=== Class Shared Variables ===\n\n{{{\nSmalltalk.StracClass21 defineSharedVariable: #VarName\n\tprivate: false\n\tconstant: false\n\tcategory: 'testing'\n\tinitializer: 'Array new: 5'\n}}}\n"
    ));

    let earlier = repos
        .get_node("/TestPackage2/StracClass21", Some("1.0"))
        .unwrap()
        .content()
        .unwrap()
        .unwrap();
    assert!(!earlier.contains("Shared Variables"));
}

/// A namespace renders definition, comment and shared variables.
#[test]
fn test_namespace_content() {
    let repos = repository("", "");
    let node = repos.get_node("/TestPackage1/StracTest", None).unwrap();
    assert!(matches!(node, Node::Namespace(_)));
    assert_eq!(node.name(), "* Namespace: StracTest");
    assert_eq!(node.path(), "/TestPackage1/StracTest");
    assert_eq!(node.content().unwrap().unwrap(), STRAC_TEST_CONTENT);
}

/// An extension renders a header in place of a definition.
#[test]
fn test_extension_content() {
    let repos = repository("", "");
    let node = repos
        .get_node("/TestPackage2/StracTest.StracClass11", None)
        .unwrap();
    assert!(matches!(node, Node::ClassExtension(_)));
    assert_eq!(node.name(), "* Extension: StracTest.StracClass11");
    assert_eq!(node.content().unwrap().unwrap(), STRAC_CLASS11_EXTENSION_CONTENT);
}

/// The `Root.Smalltalk.` prefix does not change what a name resolves to.
#[rstest]
#[case("TestPackage2", "StracTest.StracClass11")]
#[case("TestPackage1", "StracTest.StracClass11")]
#[case("TestPackage1", "StracTest")]
#[case("TestPackage1", "Core.Object")]
#[case("TestPackage2", "StracClass21")]
fn test_prefix_insensitive(#[case] package: &str, #[case] name: &str) {
    let repos = repository("", "");
    let bare = repos.get_node(&format!("/{package}/{name}"), None).unwrap();
    let prefixed = repos
        .get_node(&format!("/{package}/Root.Smalltalk.{name}"), None)
        .unwrap();
    assert_eq!(bare, prefixed);
    assert_eq!(bare.path(), prefixed.path());
    assert_eq!(bare.content().unwrap(), prefixed.content().unwrap());
}

/// Listed leaves fetch their content when asked for it.
#[test]
fn test_named_leaf_materializes() {
    let repos = repository("", "");
    let package = repos.get_node("/TestPackage1", Some("1.0")).unwrap();
    let class = package
        .entries()
        .map(Result::unwrap)
        .find(|n| matches!(n, Node::Class(_)))
        .unwrap();
    assert!(!class.is_fully_initialized());
    assert_eq!(class.content().unwrap().unwrap(), STRAC_CLASS11_CONTENT);

    let full = class.materialize().unwrap();
    assert!(full.is_fully_initialized());
    assert_eq!(
        full,
        repos
            .get_node("/TestPackage1/StracTest.StracClass11", Some("1.0"))
            .unwrap()
    );
}

/// Listed leaves read their comment without being materialized first.
#[test]
fn test_named_leaf_comment() {
    let repos = repository("", "");
    let package = repos.get_node("/TestPackage1", Some("1.0")).unwrap();
    let entries: Vec<Node<'_>> = package.entries().map(Result::unwrap).collect();

    let Some(Node::Class(class)) = entries.iter().find(|n| matches!(n, Node::Class(_))) else {
        panic!("no class listed in /TestPackage1");
    };
    assert!(class.body().is_none());
    assert_eq!(class.comment().unwrap(), STRAC_CLASS11_COMMENT);

    let Some(Node::Namespace(namespace)) = entries.iter().find(|n| matches!(n, Node::Namespace(_)))
    else {
        panic!("no namespace listed in /TestPackage1");
    };
    assert!(namespace.body().is_none());
    assert_eq!(namespace.comment().unwrap(), STRAC_TEST_COMMENT);
}

/// A bundle prefix in front of a package path is ignored.
#[test]
fn test_bundle_prefixed_path() {
    let repos = repository("", "");
    let via_bundle = repos
        .get_node("/TestBundle/TestPackage1/StracTest.StracClass11", None)
        .unwrap();
    let direct = repos
        .get_node("/TestPackage1/StracTest.StracClass11", None)
        .unwrap();
    assert_eq!(via_bundle, direct);
}

#[rstest]
#[case::missing_package("/NoSuchPackage", None)]
#[case::missing_version("/TestPackage1", Some("9.9"))]
#[case::missing_class("/TestPackage2/Baaaaarf", None)]
#[case::missing_owner("/NoSuchPackage/StracTest.StracClass11", None)]
#[case::not_in_version("/TestPackage2/StracTest.StracClass11", Some("1.0"))]
fn test_no_such_node(#[case] path: &str, #[case] rev: Option<&str>) {
    let repos = repository("", "");
    match repos.get_node(path, rev) {
        Err(Error::NoSuchNode {
            path: reported,
            revision,
        }) => {
            assert_eq!(reported, path);
            assert_eq!(revision.as_deref(), rev);
        }
        other => panic!("Expected NoSuchNode, got {other:?}"),
    }
}

/// The string "None" stands for no revision.
#[test]
fn test_none_revision() {
    let repos = repository("", "");
    let node = repos.get_node("/TestPackage1", Some("None")).unwrap();
    assert_eq!(node.revision(), "1.1");
}

#[rstest]
#[case::root(None, "/")]
#[case::slash(Some("/"), "/")]
#[case::bundle(Some("/TestBundle"), "/TestBundle")]
#[case::package(Some("/TestPackage2"), "/TestPackage2")]
#[case::prefixed_class(
    Some("/TestPackage2/Root.Smalltalk.StracTest.StracClass11"),
    "/TestPackage2/StracTest.StracClass11"
)]
#[case::package_in_bundle(Some("/TestBundle/TestPackage2"), "/TestPackage2")]
#[case::bundle_in_bundle(Some("/TestBundle/TestSubBundle"), "/TestSubBundle")]
#[case::class_in_bundle(
    Some("/TestBundle/TestPackage2/StracTest.StracClass11"),
    "/TestPackage2/StracTest.StracClass11"
)]
fn test_normalize_path(#[case] path: Option<&str>, #[case] expected: &str) {
    let repos = repository("", "");
    assert_eq!(repos.normalize_path(path).unwrap(), expected);
}

/// Normalizing a normalized path changes nothing.
#[test]
fn test_normalize_path_idempotent() {
    let repos = repository("", "");
    proptest!(|(path in arb_virtual_path())| {
        let once = repos.normalize_path(Some(&path)).unwrap();
        let twice = repos.normalize_path(Some(&once)).unwrap();
        prop_assert_eq!(once, twice);
    });
}

/// History and changesets are placeholders that never fail.
#[test]
fn test_revision_stubs() {
    let repos = repository("TestBundle", "");
    let now = SystemTime::now();

    assert!(repos.get_changesets(now, now).is_empty());
    assert_eq!(repos.get_oldest_rev(), None);
    assert_eq!(repos.get_youngest_rev(), None);
    assert_eq!(repos.previous_rev("1.1"), None);
    assert_eq!(repos.next_rev("1.0", "/TestPackage1"), None);
    assert_eq!(repos.rev_older_than("1.0", "1.1"), None);
    assert_eq!(repos.normalize_rev(Some("1.0")).as_deref(), Some("1.0"));

    let changeset = repos.get_changeset(ROOT_REVISION).unwrap();
    assert!(changeset.changes().is_empty());
    assert!(changeset.properties().is_empty());

    let root = repos.get_node("/", None).unwrap();
    assert_eq!(root.previous(), None);
    assert_eq!(root.last_modified(), None);
    assert!(root.properties().is_empty());

    let package = repos.get_node("/TestPackage1", Some("None")).unwrap();
    let history = package.history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].change, ChangeKind::Edit);
    assert_eq!(history[0].revision.as_deref(), Some("1.1"));

    let path_history = repos.get_path_history("/", None, None);
    assert_eq!(path_history.len(), 1);
    assert_eq!(path_history[0].path, "/");

    let changes = repos
        .get_changes("/TestPackage1", Some("1.0"), "/TestPackage1", Some("1.1"))
        .unwrap();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].kind, ChangeKind::Edit);
    assert_eq!(changes[0].old.revision(), "1.0");
    assert_eq!(changes[0].new.revision(), "1.1");
    assert_eq!(changes[0].changeset.rev.as_deref(), Some("1.1"));

    repos.clear(None);
}

/// A method whose source blob is gone fails its class, not silently.
#[test]
fn test_missing_method_source() {
    let db = StoreDb::open_memory().unwrap();
    let package = db
        .publish_component(
            ComponentKind::Package,
            &PublishParams {
                name: "Broken".into(),
                version: "1.0".into(),
                timestamp: 1,
            },
        )
        .unwrap();
    let class = db
        .insert_class(&DefinitionParams {
            name: "Orphan".into(),
            environment: "Root.Smalltalk".into(),
            definition: "Smalltalk defineClass: #Orphan".into(),
            comment: None,
        })
        .unwrap();
    db.link_class(package, class).unwrap();
    let method = db
        .insert_method_row(
            &MethodParams {
                class_name: "Root.Smalltalk.Orphan".into(),
                name: "lost".into(),
                protocol: "accessing".into(),
                source: String::new(),
            },
            9999,
        )
        .unwrap();
    db.link_method(package, method).unwrap();

    let repos = StoreRepository::new(db, vec![], vec![]);
    assert!(matches!(
        repos.get_node("/Broken/Orphan", None),
        Err(Error::MissingSource { blob_id: 9999, .. })
    ));
    // Listing still works; only the broken leaf fails.
    let listing = repos.get_node("/Broken", None).unwrap();
    assert_eq!(entry_names(&listing), vec!["Orphan"]);
}

/// A comment ID without a blob fails when the comment is read.
#[test]
fn test_missing_comment() {
    let db = StoreDb::open_memory().unwrap();
    let package = db
        .publish_component(
            ComponentKind::Package,
            &PublishParams {
                name: "Broken".into(),
                version: "1.0".into(),
                timestamp: 1,
            },
        )
        .unwrap();
    let class = db
        .insert_class(&DefinitionParams {
            name: "Uncommented".into(),
            environment: "Root.Smalltalk".into(),
            definition: "Smalltalk defineClass: #Uncommented".into(),
            comment: None,
        })
        .unwrap();
    db.connection()
        .execute(
            "UPDATE tw_class SET commentid = 4242 WHERE primarykey = ?1",
            [class],
        )
        .unwrap();
    db.link_class(package, class).unwrap();

    let repos = StoreRepository::new(db, vec![], vec![]);
    let node = repos.get_node("/Broken/Uncommented", None).unwrap();
    assert!(matches!(
        node.content(),
        Err(Error::MissingSource { blob_id: 4242, .. })
    ));
}

/// The connector opens an on-disk Store read-only, by path or by URI.
#[test]
fn test_connector_opens_file() {
    let fixture = FixtureFile::new();
    let connector = StoreConnector::probe();

    for connection in [fixture.path().display().to_string(), fixture.uri()] {
        let config = Config {
            store_database_connection: connection,
            root_store_bundles: "TestBundle".into(),
            ..Config::default()
        };
        let repos = connector.get_repository("store", &config).unwrap();
        let root = repos.get_node("/", None).unwrap();
        assert_eq!(entry_names(&root), vec!["TestBundle"]);
        drop(root);
        repos.close().unwrap();
    }
}
