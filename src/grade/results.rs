#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::fmt::Display;

use bon::Builder;
use serde::{Deserialize, Serialize};
use tabled::{Table, Tabled, settings::Style};

#[derive(Clone, Default, Debug, PartialEq, Builder, Serialize, Deserialize)]
/// A struct representing a grade
pub struct Grade {
    /// The actual grade received
    #[builder(getter)]
    pub grade:  f64,
    /// The maximum grade possible
    #[builder(getter)]
    pub out_of: f64,
}

impl Grade {
    /// Creates a new grade -
    /// * `grade` - The actual grade received
    /// * `out_of` - The maximum grade possible
    pub fn new(grade: f64, out_of: f64) -> Self {
        Self { grade, out_of }
    }
}

impl Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}/{:.2}", self.grade, self.out_of)
    }
}

#[derive(Tabled, Clone, Default, Debug, Builder, Serialize, Deserialize)]
#[builder(on(String, into))]
/// A struct to store grading results and display them
pub struct GradeResult {
    #[tabled(rename = "Requirement")]
    /// * `requirement`: refers to Requirement ID
    #[builder(getter)]
    pub(crate) requirement: String,
    #[tabled(rename = "Grade")]
    /// * `grade`: grade received for above Requirement
    #[builder(default)]
    #[builder(getter)]
    pub(crate) grade:       Grade,
    #[tabled(rename = "Reason")]
    /// * `reason`: the reason for penalties applied, if any
    #[builder(getter)]
    pub(crate) reason:      String,
    #[tabled(skip)]
    /// * `matches`: what the graded query found
    #[builder(default)]
    #[builder(with = FromIterator::from_iter)]
    #[builder(getter)]
    pub(crate) matches:     Vec<String>,
}

impl GradeResult {
    /// Returns the numeric grade value.
    pub fn grade_value(&self) -> f64 {
        self.grade.grade
    }

    /// Returns the numeric out-of value.
    pub fn out_of_value(&self) -> f64 {
        self.grade.out_of
    }

    /// Returns the requirement name.
    pub fn requirement(&self) -> &str {
        &self.requirement
    }

    /// Returns the reason shown to the student.
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Returns the names of everything the query matched.
    pub fn matches(&self) -> &[String] {
        &self.matches
    }
}

/// Renders results as a table with a total row.
pub fn show_results(results: &[GradeResult]) -> String {
    let (grade, out_of) = results
        .iter()
        .fold((0.0, 0.0), |(g, o), r| (g + r.grade_value(), o + r.out_of_value()));

    let mut rows = results.to_vec();
    rows.push(
        GradeResult::builder()
            .requirement("Total")
            .grade(Grade::new(grade, out_of))
            .reason("-")
            .build(),
    );

    Table::new(rows).with(Style::modern()).to_string()
}
