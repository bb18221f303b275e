//! Turning query results into grades.

/// Introspection-based graders.
pub mod introspection;
/// Grades and their tabular display.
pub mod results;

pub use introspection::{IntrospectionGrader, QueryConstraint, Target};
pub use results::{Grade, GradeResult, show_results};
