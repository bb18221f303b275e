#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::fmt;

use bon::Builder;
use itertools::Itertools;
use tracing::warn;

use super::results::{Grade, GradeResult};
use crate::{
    query::{ConstructorQuery, MethodQuery, TypeQuery},
    source::SymbolTable,
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
/// An enum to represent the constraint of a query.
pub enum QueryConstraint {
    #[default]
    /// The query must match at least once.
    MustMatchAtLeastOnce,
    /// The query must match exactly this many times.
    MustMatchExactlyNTimes(usize),
    /// Must not match.
    MustNotMatch,
}

impl QueryConstraint {
    /// True if `count` matches satisfy the constraint.
    pub fn is_satisfied_by(&self, count: usize) -> bool {
        match self {
            QueryConstraint::MustMatchAtLeastOnce => count > 0,
            QueryConstraint::MustMatchExactlyNTimes(n) => count == *n,
            QueryConstraint::MustNotMatch => count == 0,
        }
    }
}

impl fmt::Display for QueryConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryConstraint::MustMatchAtLeastOnce => write!(f, "Must match at least once"),
            QueryConstraint::MustMatchExactlyNTimes(n) => write!(f, "Must match exactly {n} times"),
            QueryConstraint::MustNotMatch => write!(f, "Must not match"),
        }
    }
}

/// The query a grader runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Types in a package.
    Type(TypeQuery),
    /// Methods of a type.
    Method(MethodQuery),
    /// Constructors of a type.
    Constructor(ConstructorQuery),
}

impl Target {
    /// Runs the query and names what it found.
    pub fn matches(&self, table: &SymbolTable) -> Vec<String> {
        match self {
            Target::Type(q) => q
                .find_classes(table)
                .iter()
                .map(|t| t.qualified_name())
                .collect(),
            Target::Method(q) => q.find_methods().iter().map(ToString::to_string).collect(),
            Target::Constructor(q) => q
                .find_constructors()
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Type(q) => q.fmt(f),
            Target::Method(q) => q.fmt(f),
            Target::Constructor(q) => q.fmt(f),
        }
    }
}

impl From<TypeQuery> for Target {
    fn from(q: TypeQuery) -> Self {
        Target::Type(q)
    }
}

impl From<MethodQuery> for Target {
    fn from(q: MethodQuery) -> Self {
        Target::Method(q)
    }
}

impl From<ConstructorQuery> for Target {
    fn from(q: ConstructorQuery) -> Self {
        Target::Constructor(q)
    }
}

#[derive(Clone, Builder)]
#[builder(on(String, into))]
/// Awards points when a structural query finds what a requirement expects.
pub struct IntrospectionGrader {
    /// The name of the requirement.
    #[builder(getter)]
    req_name:   String,
    /// The grade for the requirement.
    #[builder(getter)]
    out_of:     f64,
    /// The query to run.
    #[builder(into)]
    #[builder(getter)]
    target:     Target,
    /// The symbol table the query runs against.
    #[builder(getter)]
    table:      SymbolTable,
    /// The constraint of the query.
    #[builder(default)]
    #[builder(getter)]
    constraint: QueryConstraint,
    /// The reason to share with the student.
    #[builder(default)]
    #[builder(getter)]
    reason:     String,
}

impl IntrospectionGrader {
    /// Runs the query and grades the result against the constraint.
    pub fn grade(&self) -> GradeResult {
        let reason = if self.reason.trim().is_empty() {
            warn!(
                requirement = %self.req_name,
                "No reason provided for introspection grading. Feedback to student will not be \
                 very helpful."
            );
            format!("Query Constraint: {}.", self.constraint)
        } else {
            self.reason.clone()
        };

        let found = self.target.matches(&self.table);
        let (grade, reason) = if self.constraint.is_satisfied_by(found.len()) {
            (self.out_of, reason)
        } else {
            let detail = match found.len() {
                0 => "nothing matched".to_string(),
                n => format!("{n} matched: {}", found.iter().join(", ")),
            };
            (0.0, format!("{reason} ({detail})"))
        };

        GradeResult::builder()
            .requirement(self.req_name.clone())
            .grade(Grade::new(grade, self.out_of))
            .reason(reason)
            .matches(found)
            .build()
    }

    /// Builds and runs the grader.
    pub fn run(self) -> GradeResult {
        self.grade()
    }
}

impl<S> IntrospectionGraderBuilder<S>
where
    S: introspection_grader_builder::IsComplete,
{
    /// Build the grader and immediately execute it.
    pub fn run(self) -> GradeResult {
        self.build().run()
    }
}
