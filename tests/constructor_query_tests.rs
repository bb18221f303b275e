use std::sync::Arc;

use introspect::{
    ConstructorDescriptor,
    ConstructorQuery,
    FilterError,
    TypeDescriptor,
    TypeRef,
    Visibility,
};

fn account() -> TypeRef {
    Arc::new(
        TypeDescriptor::builder()
            .package("pkg.bank")
            .simple_name("Account")
            .constructors([
                ConstructorDescriptor::new(["java.lang.String"]),
                ConstructorDescriptor::new(["java.lang.Integer", "java.lang.String"]),
                ConstructorDescriptor::no_args().with_visibility(Visibility::Private),
            ])
            .build(),
    )
}

fn pair() -> TypeRef {
    Arc::new(
        TypeDescriptor::builder()
            .package("pkg.bank")
            .simple_name("Pair")
            .constructors([
                ConstructorDescriptor::new(["int", "java.lang.String"]),
                ConstructorDescriptor::new(["java.lang.String", "int"]),
            ])
            .build(),
    )
}

#[test]
fn argument_order_does_not_matter() {
    let account = account();

    for order in [
        ["java.lang.String", "java.lang.Integer"],
        ["java.lang.Integer", "java.lang.String"],
    ] {
        let found = ConstructorQuery::in_class(&account)
            .with_exact_arg_types(order)
            .expect("valid filters")
            .find_constructor()
            .expect("unique two-argument constructor");
        assert_eq!(found.parameters.len(), 2);
    }
}

#[test]
fn only_public_constructors_are_candidates() {
    let account = account();
    assert_eq!(ConstructorQuery::in_class(&account).find_constructors().len(), 2);

    let err = ConstructorQuery::in_class(&account)
        .with_no_args()
        .expect("valid filters")
        .find_constructor()
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.kind(), "NoConstructorFoundError");
    assert_eq!(
        err.message(),
        "No constructor found in class pkg.bank.Account matching criteria: {ConstructorQuery | \
         class: class pkg.bank.Account, exactArgTypes: []}"
    );
}

#[test]
fn permuted_overloads_are_ambiguous() {
    let pair = pair();
    let err = ConstructorQuery::in_class(&pair)
        .with_exact_arg_types(["java.lang.String", "int"])
        .expect("valid filters")
        .find_constructor()
        .unwrap_err();

    assert_eq!(err.kind(), "MultipleConstructorsFoundError");
    assert_eq!(err.matches().len(), 2);
    assert!(err.message().starts_with(
        "Multiple constructors in type class pkg.bank.Pair ([public (int, java.lang.String), \
         public (java.lang.String, int)]) matched criteria"
    ));
}

#[test]
#[should_panic(expected = "Failed with MultipleConstructorsFoundError")]
fn or_fail_panics_on_ambiguity() {
    let pair = pair();
    ConstructorQuery::in_class(&pair).find_constructor_or_fail();
}

#[test]
fn or_fail_returns_the_unique_match() {
    let account = account();
    let found = ConstructorQuery::in_class(&account)
        .with_exact_arg_types(["java.lang.String"])
        .expect("valid filters")
        .find_constructor_or_fail();
    assert_eq!(found.to_string(), "public (java.lang.String)");
}

#[test]
fn arg_types_are_single_use() {
    let account = account();
    let query = ConstructorQuery::in_class(&account)
        .with_no_args()
        .expect("valid filters");

    let err = query.with_exact_arg_types(["int"]).unwrap_err();
    assert_eq!(
        err,
        FilterError::AlreadySet {
            filter:   "Exact arg types",
            existing: "[]".to_string(),
        }
    );
}
