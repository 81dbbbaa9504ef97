// SPDX-FileCopyrightText: 2026 Strac contributors
// SPDX-License-Identifier: MIT

//! Store schema definitions.
//!
//! Only the tables and views Strac reads are described here. A production
//! Store database carries many more (blessings, properties, prerequisites);
//! they are irrelevant to the projection.

/// Component tables and their membership relations.
pub const COMPONENT_SCHEMA_SQL: &str = r#"
create table if not exists tw_blob (
    primarykey integer primary key autoincrement not null,
    blobtype   integer not null default 0,
    blobdata   text
);

create table if not exists tw_bundle (
    primarykey integer primary key autoincrement not null,
    name       text not null,
    version    text not null,
    timestamp  integer not null,
    commentid  integer not null default 0
);

create index if not exists IndexBundleName on tw_bundle(name, timestamp);

create table if not exists tw_package (
    primarykey integer primary key autoincrement not null,
    name       text not null,
    version    text not null,
    timestamp  integer not null,
    commentid  integer not null default 0
);

create index if not exists IndexPackageName on tw_package(name, timestamp);

create table if not exists tw_bundles (
    bundleref    integer not null,
    subbundleref integer not null,
    primary key (bundleref, subbundleref)
);

create table if not exists tw_packages (
    bundleref  integer not null,
    packageref integer not null,
    primary key (bundleref, packageref)
);
"#;

/// Code tables, their package links and the views over them.
pub const CODE_SCHEMA_SQL: &str = r#"
create table if not exists tw_namespace (
    primarykey        integer primary key autoincrement not null,
    name              text not null,
    environmentstring text not null,
    commentid         integer not null default 0,
    definitionid      integer not null
);

create table if not exists tw_pkgnamespaces (
    packageref   integer not null,
    namespaceref integer not null,
    primary key (packageref, namespaceref)
);

create table if not exists tw_class (
    primarykey        integer primary key autoincrement not null,
    name              text not null,
    environmentstring text not null,
    commentid         integer not null default 0,
    definitionid      integer not null
);

create table if not exists tw_pkgclasses (
    packageref integer not null,
    classref   integer not null,
    primary key (packageref, classref)
);

create table if not exists tw_methods (
    primarykey   integer primary key autoincrement not null,
    name         text not null,
    classname    text not null,
    protocolname text,
    sourcecodeid integer not null
);

create table if not exists tw_pkgmethods (
    packageref integer not null,
    methodref  integer not null,
    primary key (packageref, methodref)
);

create index if not exists IndexPkgMethods on tw_pkgmethods(packageref);

create table if not exists tw_data (
    primarykey        integer primary key autoincrement not null,
    name              text not null,
    environmentstring text not null,
    definitionid      integer not null
);

create table if not exists tw_pkgdata (
    packageref integer not null,
    dataref    integer not null,
    primary key (packageref, dataref)
);

create view if not exists tw_pkgnamespacesview as
    select p.packageref, n.primarykey, n.name, n.environmentstring, n.commentid, n.definitionid
    from tw_pkgnamespaces p
    join tw_namespace n on n.primarykey = p.namespaceref;

create view if not exists tw_pkgnamespacesandsourcesview as
    select v.packageref, v.primarykey, v.name, v.environmentstring, v.commentid, b.blobdata
    from tw_pkgnamespacesview v
    join tw_blob b on b.primarykey = v.definitionid;

create view if not exists tw_pkgclassesview as
    select p.packageref, c.primarykey, c.name, c.environmentstring, c.commentid, c.definitionid
    from tw_pkgclasses p
    join tw_class c on c.primarykey = p.classref;

create view if not exists tw_pkgclassesandsourcesview as
    select v.packageref, v.primarykey, v.name, v.environmentstring, v.commentid, b.blobdata
    from tw_pkgclassesview v
    join tw_blob b on b.primarykey = v.definitionid;

create view if not exists tw_methodsview as
    select p.packageref, m.primarykey, m.name, m.classname, m.protocolname, m.sourcecodeid
    from tw_pkgmethods p
    join tw_methods m on m.primarykey = p.methodref;

create view if not exists tw_dataandsourcesview as
    select p.packageref, d.primarykey, d.name, d.environmentstring, b.blobdata
    from tw_pkgdata p
    join tw_data d on d.primarykey = p.dataref
    join tw_blob b on b.primarykey = d.definitionid;
"#;
