use std::{fs, path::PathBuf};

use introspect::{
    ConstructorQuery,
    MethodQuery,
    SymbolTable,
    TypeKind,
    TypeName,
    TypeQuery,
    TypeRef,
    TypeSource,
    Visibility,
    java::{File, Project},
};
use uuid::Uuid;

fn fixture_root(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("java")
        .join(name)
}

fn temp_root() -> PathBuf {
    let root = std::env::temp_dir().join(format!("introspect-java-{}", Uuid::new_v4()));
    fs::create_dir_all(&root).expect("create temp root");
    root
}

fn zoo() -> SymbolTable {
    Project::scan_blocking(&fixture_root("zoo"))
        .expect("scan zoo fixture")
        .into_symbol_table()
}

fn get(table: &SymbolTable, name: &str) -> TypeRef {
    table.get(name).unwrap_or_else(|| panic!("{name} should be in the table"))
}

fn names(found: &[TypeRef]) -> Vec<String> {
    found.iter().map(|t| t.qualified_name()).collect()
}

#[test]
fn scan_finds_every_declared_type() {
    let table = zoo();
    let mut all: Vec<String> = table.iter().map(|t| t.qualified_name()).collect();
    all.sort();

    assert_eq!(
        all,
        vec![
            "com.zoo.Animal",
            "com.zoo.Cat",
            "com.zoo.Dog",
            "com.zoo.Habitat",
            "com.zoo.Keeper",
            "com.zoo.Keeper.Badge",
            "com.zoo.Mammal",
            "com.zoo.Pet",
            "com.zoo.birds.Parrot",
            "com.zoo.birds.Penguin",
            "com.zoolike.Impostor",
        ]
    );
}

#[test]
fn type_references_are_qualified() {
    let table = zoo();

    let dog = get(&table, "com.zoo.Dog");
    assert_eq!(dog.superclass(), Some(&TypeName::from("com.zoo.Mammal")));
    assert_eq!(dog.interfaces(), &[TypeName::from("com.zoo.Pet")]);
    let field_types: Vec<&str> = dog.fields().iter().map(|f| f.field_type.as_str()).collect();
    assert_eq!(field_types, vec!["java.lang.String", "java.lang.String", "int"]);

    // on-demand import
    let penguin = get(&table, "com.zoo.birds.Penguin");
    assert_eq!(penguin.interfaces(), &[TypeName::from("com.zoo.Animal")]);

    let keeper = get(&table, "com.zoo.Keeper");
    let animals = MethodQuery::in_type(&keeper)
        .with_exact_name("animals")
        .expect("valid filters")
        .find_method_or_fail();
    assert_eq!(animals.return_type.as_str(), "java.util.List");

    let badge = get(&table, "com.zoo.Keeper.Badge");
    assert_eq!(badge.package(), "com.zoo");
    assert_eq!(badge.enclosing(), Some("Keeper"));
}

#[test]
fn enums_get_implicit_members() {
    let table = zoo();
    let habitat = get(&table, "com.zoo.Habitat");
    assert_eq!(habitat.kind(), TypeKind::Enum);
    assert_eq!(habitat.fields().len(), 3);
    assert!(habitat.fields().iter().all(|f| f.is_static));

    let values = MethodQuery::in_type(&habitat)
        .with_exact_name("values")
        .expect("valid filters")
        .find_method_or_fail();
    assert_eq!(values.return_type.as_str(), "com.zoo.Habitat[]");

    MethodQuery::in_type(&habitat)
        .with_exact_name("valueOf")
        .and_then(|q| q.with_exact_arg_types(["java.lang.String"]))
        .expect("valid filters")
        .find_method_or_fail();

    assert!(ConstructorQuery::in_class(&habitat).find_constructors().is_empty());
}

#[test]
fn package_scope_respects_segment_boundaries() {
    let table = zoo();
    let query = TypeQuery::in_containing_package("com.zoo")
        .and_then(|q| q.with_simple_name_containing("Impostor"))
        .expect("valid filters");
    assert!(query.find_classes(&table).is_empty());

    let exact = TypeQuery::in_exact_package("com.zoo").expect("valid package");
    assert_eq!(exact.find_classes(&table).len(), 8);
}

#[test]
fn sub_types_are_found_through_the_scanned_tree() {
    let table = zoo();
    let query = TypeQuery::in_containing_package("com.zoo")
        .and_then(|q| q.with_sub_type_of("com.zoo.Animal"))
        .expect("valid filters");

    assert_eq!(
        names(&query.find_classes(&table)),
        vec![
            "com.zoo.Cat",
            "com.zoo.Dog",
            "com.zoo.Mammal",
            "com.zoo.Pet",
            "com.zoo.birds.Parrot",
            "com.zoo.birds.Penguin",
        ]
    );
}

#[test]
fn sub_type_links_outside_the_scope_are_not_followed() {
    let table = zoo();
    let query = TypeQuery::in_exact_package("com.zoo.birds")
        .and_then(|q| q.with_sub_type_of("com.zoo.Animal"))
        .expect("valid filters");

    // Parrot reaches Animal only through Pet, which lives in com.zoo
    let found = query.find_class_or_fail(&table);
    assert_eq!(found.simple_name(), "Penguin");

    let parrot = get(&table, "com.zoo.birds.Parrot");
    assert!(table.is_assignable(&parrot, &TypeName::from("com.zoo.Animal")));
}

#[test]
fn overloads_in_swapped_order_are_ambiguous() {
    let table = zoo();
    let dog = get(&table, "com.zoo.Dog");

    let err = MethodQuery::in_type(&dog)
        .with_exact_name("fetch")
        .and_then(|q| q.with_exact_arg_types(["int", "java.lang.String"]))
        .expect("valid filters")
        .find_method()
        .unwrap_err();
    assert_eq!(err.matches().len(), 2);

    let single = MethodQuery::in_type(&dog)
        .with_exact_name("fetch")
        .and_then(|q| q.with_exact_arg_types(["java.lang.String"]))
        .expect("valid filters")
        .find_method_or_fail();
    assert_eq!(single.return_type, TypeName::void());

    let adopt = MethodQuery::in_type(&dog)
        .with_return_type("com.zoo.Dog")
        .expect("valid filters")
        .find_method_or_fail();
    assert!(adopt.is_static);
    assert_eq!(adopt.name, "adopt");
}

#[test]
fn varargs_and_arrays_match_as_arrays() {
    let table = zoo();
    let cat = get(&table, "com.zoo.Cat");

    let scores = MethodQuery::in_type(&cat)
        .with_return_type("int[]")
        .and_then(|q| q.with_exact_arg_types(["java.lang.String...", "int[][]"]))
        .expect("valid filters")
        .find_method_or_fail();
    assert_eq!(scores.name, "scores");
    assert_eq!(scores.parameters[1].as_str(), "java.lang.String[]");
}

#[test]
fn constructors_follow_java_rules() {
    let table = zoo();

    let dog = get(&table, "com.zoo.Dog");
    assert_eq!(ConstructorQuery::in_class(&dog).find_constructors().len(), 2);
    let private_only = ConstructorQuery::in_class(&dog)
        .with_exact_arg_types(["int"])
        .expect("valid filters")
        .find_constructor()
        .unwrap_err();
    assert!(private_only.is_not_found());
    assert!(
        dog.constructors()
            .iter()
            .any(|c| c.visibility == Visibility::Private)
    );

    let cat = get(&table, "com.zoo.Cat");
    let err = ConstructorQuery::in_class(&cat)
        .with_exact_arg_types(["java.lang.String", "int"])
        .expect("valid filters")
        .find_constructor()
        .unwrap_err();
    assert_eq!(err.kind(), "MultipleConstructorsFoundError");

    // no declared constructor means an implicit public no-arg one
    let keeper = get(&table, "com.zoo.Keeper");
    ConstructorQuery::in_class(&keeper)
        .with_no_args()
        .expect("valid filters")
        .find_constructor_or_fail();
}

#[test]
fn interface_members_default_to_public() {
    let table = zoo();
    let animal = get(&table, "com.zoo.Animal");
    assert!(animal.is_interface());
    assert!(
        animal
            .methods()
            .iter()
            .all(|m| m.visibility == Visibility::Public)
    );
    assert!(ConstructorQuery::in_class(&animal).find_constructors().is_empty());
}

#[test]
fn files_with_syntax_errors_are_kept() {
    let root = temp_root();
    let dir = root.join("com").join("broken");
    fs::create_dir_all(&dir).expect("create package dir");
    fs::write(
        dir.join("Half.java"),
        "package com.broken;\n\npublic class Half {\n    public void ok() {}\n    public void bad( {\n",
    )
    .expect("write source");

    let project = Project::scan_blocking(&root).expect("scan temp root");
    assert_eq!(project.files().len(), 1);
    assert!(project.files()[0].has_errors());
    assert_eq!(project.files()[0].package(), Some("com.broken"));

    let _ = fs::remove_dir_all(root);
}

#[test]
fn empty_directory_yields_no_types() {
    let root = temp_root();
    let project = Project::scan_blocking(&root).expect("scan temp root");
    assert!(project.symbol_table().is_empty());

    let query = TypeQuery::in_containing_package("com.example").expect("valid package");
    assert!(query.find_classes(&project).is_empty());

    let _ = fs::remove_dir_all(root);
}

#[test]
fn single_file_reports_imports_and_package() {
    let file = File::from_source(
        PathBuf::from("Shelter.java"),
        "package com.shelter;\nimport java.util.*;\nimport static java.lang.Math.max;\nimport \
         com.zoo.Dog;\n\nclass Shelter { Dog resident; }\n"
            .to_string(),
    )
    .expect("parse source");

    assert_eq!(file.package(), Some("com.shelter"));
    assert!(!file.has_errors());
    let imports: Vec<(&str, bool, bool)> = file
        .imports()
        .iter()
        .map(|i| (i.path.as_str(), i.wildcard, i.is_static))
        .collect();
    assert_eq!(
        imports,
        vec![
            ("java.util", true, false),
            ("java.lang.Math.max", false, true),
            ("com.zoo.Dog", false, false),
        ]
    );
    assert_eq!(file.types().len(), 1);
    assert_eq!(file.types()[0].visibility(), Visibility::Package);
}

#[tokio::test(flavor = "multi_thread")]
async fn async_scan_matches_blocking_scan() {
    let root = fixture_root("zoo");
    let scanned = Project::scan(&root).await.expect("async scan");
    let blocking = Project::scan_blocking(&root).expect("blocking scan");

    assert_eq!(scanned.symbol_table().len(), blocking.symbol_table().len());
    assert_eq!(scanned.files().len(), 10);
}

#[test]
fn symbol_table_survives_json_round_trip() {
    let table = zoo();
    let root = temp_root();
    let path = root.join("zoo.json");

    table.save_json(&path).expect("save table");
    let loaded = SymbolTable::load_json(&path).expect("load table");

    assert_eq!(loaded.len(), table.len());
    assert_eq!(get(&loaded, "com.zoo.Dog"), get(&table, "com.zoo.Dog"));

    let _ = fs::remove_dir_all(root);
}

#[test]
fn simple_names_qualify_against_the_scanned_tree() {
    let table = zoo();
    let dog = get(&table, "com.zoo.Dog");

    let adopt = MethodQuery::in_type(&dog)
        .with_return_type(table.qualify("Dog"))
        .and_then(|q| q.with_exact_arg_types([table.qualify("String")]))
        .expect("valid filters")
        .find_method_or_fail();
    assert_eq!(adopt.name, "adopt");

    assert_eq!(table.qualify("Badge").as_str(), "com.zoo.Keeper.Badge");
    assert_eq!(table.qualify("Habitat[]").as_str(), "com.zoo.Habitat[]");
}
