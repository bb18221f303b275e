//! # introspect
//!
//! Structural queries over Java types for graders: find the classes in a
//! package, the methods of a type, or the constructors of a class, and insist
//! on exactly one match when a test needs it.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Assertions over type structure
pub mod assertions;
/// Environment-driven settings
pub mod config;
/// A module defining a bunch of constant values to be used throughout
pub mod constants;
/// Descriptions of types and their members
pub mod descriptor;
/// For all things related to grading
pub mod grade;
/// For loading type structure from Java sources
pub mod java;
/// For all parsers used
pub mod parsers;
/// Type, method, and constructor queries
pub mod query;
/// Where queries get their types from
pub mod source;
/// Type names, visibilities, and kinds
pub mod types;
/// Utility functions for convenience
pub mod util;

pub use descriptor::{
    ConstructorDescriptor,
    FieldDescriptor,
    MethodDescriptor,
    TypeDescriptor,
    TypeRef,
};
pub use grade::{Grade, GradeResult, IntrospectionGrader, QueryConstraint, Target};
pub use java::Project;
pub use query::{
    ArgTypeList,
    ClassLookupError,
    ConstructorLookupError,
    ConstructorQuery,
    Criteria,
    FilterError,
    LookupError,
    MethodLookupError,
    MethodQuery,
    TypeQuery,
};
pub use source::{SymbolTable, TypeSource};
pub use types::{TypeKind, TypeName, Visibility};

/// Defined for convenience
type Dict = std::collections::HashMap<String, String>;
