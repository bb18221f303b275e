//! Assertions over type structure, for use in grading tests.
//!
//! Each function panics with a descriptive message when the assertion does
//! not hold, so it reports through the test harness like `assert!`.

use std::fmt;

use crate::{
    constants::OBJECT_METHOD_NAMES,
    descriptor::TypeDescriptor,
    source::TypeSource,
    types::TypeName,
};

/// Asserts that `subclass` names `expected_superclass` as its direct
/// superclass.
#[track_caller]
pub fn assert_directly_extends(subclass: &TypeDescriptor, expected_superclass: impl Into<TypeName>) {
    let expected = expected_superclass.into();
    let actual = subclass.superclass();

    assert!(
        actual == Some(&expected),
        "Unexpected class hierarchy for class {} ==> expected: <{expected}> but was: <{}>",
        subclass.simple_name(),
        Shown(actual)
    );
}

/// Asserts that the class `subtype` implements `interface`, directly or
/// through resolvable supertypes.
#[track_caller]
pub fn assert_implements_interface<S: TypeSource + ?Sized>(
    source: &S,
    subtype: &TypeDescriptor,
    interface: &TypeDescriptor,
) {
    check_interface_arguments("implementedInterface", subtype, interface);
    assert!(
        source.is_assignable(subtype, &interface.type_name()),
        "Expected {} to implement {} interface, but it does not appear to",
        subtype.simple_name(),
        interface.simple_name()
    );
}

/// Asserts that the class `subtype` does not implement `interface`.
#[track_caller]
pub fn assert_does_not_implement_interface<S: TypeSource + ?Sized>(
    source: &S,
    subtype: &TypeDescriptor,
    interface: &TypeDescriptor,
) {
    check_interface_arguments("notImplementedInterface", subtype, interface);
    assert!(
        !source.is_assignable(subtype, &interface.type_name()),
        "Expected {} to NOT implement {} interface, but it does appear to",
        subtype.simple_name(),
        interface.simple_name()
    );
}

/// Asserts that `class` declares fields of the given types. Repeated types
/// need as many fields.
#[track_caller]
pub fn assert_class_contains_member_variable_types(class: &TypeDescriptor, expected: &[&str]) {
    let mut found: Vec<&TypeName> = class.fields().iter().map(|f| &f.field_type).collect();

    for expected_type in expected {
        let expected_type = TypeName::from(*expected_type);
        let position = found.iter().position(|t| **t == expected_type);
        assert!(
            position.is_some(),
            "{} is missing an expected member variable of type {expected_type}",
            class.simple_name()
        );
        if let Some(i) = position {
            found.remove(i);
        }
    }
}

/// Asserts that `class` has public methods (declared or inherited) with the
/// given names. Repeated names need as many overloads.
#[track_caller]
pub fn assert_class_contains_member_method_names<S: TypeSource + ?Sized>(
    source: &S,
    class: &TypeDescriptor,
    expected: &[&str],
) {
    let mut found = public_method_names(source, class);

    for name in expected {
        let position = found.iter().position(|n| n == name);
        assert!(
            position.is_some(),
            "{} is missing an expected method: {name}",
            class.simple_name()
        );
        if let Some(i) = position {
            found.remove(i);
        }
    }
}

/// Asserts that `class` has no public method (declared or inherited) with
/// any of the given names.
#[track_caller]
pub fn assert_class_does_not_contain_member_method_names<S: TypeSource + ?Sized>(
    source: &S,
    class: &TypeDescriptor,
    unexpected: &[&str],
) {
    let found = public_method_names(source, class);

    for name in unexpected {
        assert!(
            !found.iter().any(|n| n == name),
            "{} contains an unexpected method: {name}",
            class.simple_name()
        );
    }
}

/// Names of every public method, one entry per overload, including those
/// inherited from `java.lang.Object` by classes.
fn public_method_names<S: TypeSource + ?Sized>(source: &S, class: &TypeDescriptor) -> Vec<String> {
    let mut names: Vec<String> = source
        .public_methods(class)
        .into_iter()
        .map(|m| m.name)
        .collect();
    if !class.is_interface() {
        names.extend(
            OBJECT_METHOD_NAMES
                .iter()
                .filter(|n| !names.iter().any(|m| m == *n))
                .map(|n| n.to_string())
                .collect::<Vec<_>>(),
        );
    }
    names
}

/// Checks that the interface argument is an interface and the subtype is
/// not.
#[track_caller]
fn check_interface_arguments(role: &str, subtype: &TypeDescriptor, interface: &TypeDescriptor) {
    assert!(
        interface.is_interface(),
        "Expected {role} argument to be an interface but was {}",
        interface.simple_name()
    );
    assert!(
        !subtype.is_interface(),
        "Expected subtype argument to NOT be an interface but was {}",
        subtype.simple_name()
    );
}

/// Renders an optional type name like Java renders `null`.
struct Shown<'a>(Option<&'a TypeName>);

impl fmt::Display for Shown<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(name) => write!(f, "{name}"),
            None => f.write_str("null"),
        }
    }
}
