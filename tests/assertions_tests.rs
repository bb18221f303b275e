use introspect::{
    FieldDescriptor,
    MethodDescriptor,
    SymbolTable,
    TypeDescriptor,
    TypeKind,
    TypeName,
    TypeRef,
    Visibility,
    assertions::*,
};

fn shapes() -> SymbolTable {
    SymbolTable::from_types([
        TypeDescriptor::builder()
            .package("app.geo")
            .simple_name("Measurable")
            .kind(TypeKind::Interface)
            .methods([MethodDescriptor::new("area", "double", Vec::<&str>::new())])
            .build(),
        TypeDescriptor::builder()
            .package("app.geo")
            .simple_name("Printable")
            .kind(TypeKind::Interface)
            .build(),
        TypeDescriptor::builder()
            .package("app.geo")
            .simple_name("Shape")
            .superclass("java.lang.Object")
            .interfaces([TypeName::from("app.geo.Measurable")])
            .methods([
                MethodDescriptor::new("area", "double", Vec::<&str>::new()),
                MethodDescriptor::new("secret", "void", Vec::<&str>::new())
                    .with_visibility(Visibility::Private),
            ])
            .build(),
        TypeDescriptor::builder()
            .package("app.geo")
            .simple_name("Rect")
            .superclass("app.geo.Shape")
            .fields([
                FieldDescriptor::new("width", "int"),
                FieldDescriptor::new("height", "int"),
                FieldDescriptor::new("label", "java.lang.String"),
            ])
            .methods([MethodDescriptor::new("scale", "void", ["double"])])
            .build(),
    ])
}

fn get(table: &SymbolTable, name: &str) -> TypeRef {
    table.get(name).unwrap_or_else(|| panic!("{name} should be in the table"))
}

#[test]
fn direct_superclass_is_checked() {
    let table = shapes();
    assert_directly_extends(&get(&table, "app.geo.Rect"), "app.geo.Shape");
    assert_directly_extends(&get(&table, "app.geo.Shape"), "java.lang.Object");
}

#[test]
#[should_panic(
    expected = "Unexpected class hierarchy for class Rect ==> expected: <java.lang.Object> but was: <app.geo.Shape>"
)]
fn indirect_superclass_is_not_direct() {
    let table = shapes();
    assert_directly_extends(&get(&table, "app.geo.Rect"), "java.lang.Object");
}

#[test]
#[should_panic(expected = "expected: <java.lang.Object> but was: <null>")]
fn interfaces_have_no_superclass() {
    let table = shapes();
    assert_directly_extends(&get(&table, "app.geo.Measurable"), "java.lang.Object");
}

#[test]
fn inherited_interfaces_count() {
    let table = shapes();
    let rect = get(&table, "app.geo.Rect");
    assert_implements_interface(&table, &rect, &get(&table, "app.geo.Measurable"));
    assert_does_not_implement_interface(&table, &rect, &get(&table, "app.geo.Printable"));
}

#[test]
#[should_panic(expected = "Expected Rect to implement Printable interface, but it does not appear to")]
fn missing_interface_panics() {
    let table = shapes();
    assert_implements_interface(
        &table,
        &get(&table, "app.geo.Rect"),
        &get(&table, "app.geo.Printable"),
    );
}

#[test]
#[should_panic(expected = "Expected implementedInterface argument to be an interface but was Shape")]
fn interface_argument_must_be_an_interface() {
    let table = shapes();
    assert_implements_interface(
        &table,
        &get(&table, "app.geo.Rect"),
        &get(&table, "app.geo.Shape"),
    );
}

#[test]
#[should_panic(expected = "Expected subtype argument to NOT be an interface but was Measurable")]
fn subtype_argument_must_be_a_class() {
    let table = shapes();
    assert_does_not_implement_interface(
        &table,
        &get(&table, "app.geo.Measurable"),
        &get(&table, "app.geo.Printable"),
    );
}

#[test]
fn member_variable_types_count_repeats() {
    let table = shapes();
    let rect = get(&table, "app.geo.Rect");
    assert_class_contains_member_variable_types(&rect, &["int", "java.lang.String", "int"]);
}

#[test]
#[should_panic(expected = "Rect is missing an expected member variable of type int")]
fn member_variable_types_need_enough_fields() {
    let table = shapes();
    let rect = get(&table, "app.geo.Rect");
    assert_class_contains_member_variable_types(&rect, &["int", "int", "int"]);
}

#[test]
fn public_method_names_include_inherited_ones() {
    let table = shapes();
    let rect = get(&table, "app.geo.Rect");
    assert_class_contains_member_method_names(&table, &rect, &["scale", "area", "toString"]);
    assert_class_does_not_contain_member_method_names(&table, &rect, &["secret", "draw"]);
}

#[test]
#[should_panic(expected = "Rect is missing an expected method: draw")]
fn missing_method_name_panics() {
    let table = shapes();
    let rect = get(&table, "app.geo.Rect");
    assert_class_contains_member_method_names(&table, &rect, &["draw"]);
}

#[test]
#[should_panic(expected = "Rect contains an unexpected method: area")]
fn unexpected_method_name_panics() {
    let table = shapes();
    let rect = get(&table, "app.geo.Rect");
    assert_class_does_not_contain_member_method_names(&table, &rect, &["area"]);
}
