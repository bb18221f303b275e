use introspect::{
    ConstructorDescriptor,
    ConstructorQuery,
    Grade,
    IntrospectionGrader,
    MethodDescriptor,
    MethodQuery,
    QueryConstraint,
    SymbolTable,
    TypeDescriptor,
    TypeQuery,
    grade::show_results,
};

fn library() -> SymbolTable {
    SymbolTable::from_types([
        TypeDescriptor::builder()
            .package("edu.library")
            .simple_name("Book")
            .methods([
                MethodDescriptor::new("title", "java.lang.String", Vec::<&str>::new()),
                MethodDescriptor::new("checkOut", "boolean", ["java.lang.String"]),
            ])
            .constructors([ConstructorDescriptor::new(["java.lang.String", "int"])])
            .build(),
        TypeDescriptor::builder()
            .package("edu.library")
            .simple_name("Shelf")
            .build(),
    ])
}

#[test]
fn type_query_that_matches_earns_full_marks() {
    let table = library();
    let result = IntrospectionGrader::builder()
        .req_name("1")
        .out_of(10.0)
        .target(
            TypeQuery::in_exact_package("edu.library")
                .and_then(|q| q.with_exact_simple_name("Book"))
                .expect("valid filters"),
        )
        .table(table)
        .reason("Book class exists")
        .run();

    assert_eq!(result.grade_value(), 10.0);
    assert_eq!(result.out_of_value(), 10.0);
    assert_eq!(result.reason(), "Book class exists");
    assert_eq!(result.matches(), &["edu.library.Book".to_string()]);
}

#[test]
fn must_not_match_fails_and_names_the_offenders() {
    let table = library();
    let book = table.get("edu.library.Book").expect("book in table");

    let result = IntrospectionGrader::builder()
        .req_name("2")
        .out_of(5.0)
        .target(
            MethodQuery::in_type(&book)
                .with_name_containing("check")
                .expect("valid filters"),
        )
        .table(table)
        .constraint(QueryConstraint::MustNotMatch)
        .reason("No checkout logic yet")
        .run();

    assert_eq!(result.grade_value(), 0.0);
    assert_eq!(
        result.reason(),
        "No checkout logic yet (1 matched: public boolean checkOut(java.lang.String))"
    );
}

#[test]
fn exact_count_constraint() {
    let table = library();
    let query = TypeQuery::in_exact_package("edu.library").expect("valid package");

    let two = IntrospectionGrader::builder()
        .req_name("3")
        .out_of(4.0)
        .target(query.clone())
        .table(table.clone())
        .constraint(QueryConstraint::MustMatchExactlyNTimes(2))
        .reason("two types")
        .build();
    assert_eq!(two.grade().grade_value(), 4.0);

    let three = IntrospectionGrader::builder()
        .req_name("3")
        .out_of(4.0)
        .target(query)
        .table(table)
        .constraint(QueryConstraint::MustMatchExactlyNTimes(3))
        .reason("three types")
        .run();
    assert_eq!(three.grade_value(), 0.0);
    assert!(three.reason().ends_with("(2 matched: edu.library.Book, edu.library.Shelf)"));
}

#[test]
fn missing_reason_falls_back_to_the_constraint() {
    let table = library();
    let book = table.get("edu.library.Book").expect("book in table");

    let result = IntrospectionGrader::builder()
        .req_name("4")
        .out_of(2.0)
        .target(
            ConstructorQuery::in_class(&book)
                .with_no_args()
                .expect("valid filters"),
        )
        .table(table)
        .run();

    assert_eq!(
        result.reason(),
        "Query Constraint: Must match at least once. (nothing matched)"
    );
}

#[test]
fn results_render_with_a_total() {
    let table = library();
    let query = TypeQuery::in_exact_package("edu.library").expect("valid package");
    let results = vec![
        IntrospectionGrader::builder()
            .req_name("types")
            .out_of(3.0)
            .target(query.clone())
            .table(table.clone())
            .reason("has types")
            .run(),
        IntrospectionGrader::builder()
            .req_name("no types")
            .out_of(2.0)
            .target(query)
            .table(table)
            .constraint(QueryConstraint::MustNotMatch)
            .reason("should be empty")
            .run(),
    ];

    let rendered = show_results(&results);
    assert!(rendered.contains("Requirement"));
    assert!(rendered.contains("Total"));
    assert!(rendered.contains("3.00/5.00"));
    assert_eq!(Grade::new(1.5, 2.0).to_string(), "1.50/2.00");
}
