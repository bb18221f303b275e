#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::fmt;

use itertools::Itertools;

use crate::types::TypeName;

/// Raised by an entry point or `with_*` call when the requested filter is
/// malformed or conflicts with one already on the query.
///
/// These are composition mistakes: nothing has been scanned yet when one is
/// returned.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// An empty name, package, or type was supplied.
    #[error("Cannot provide null or empty {0}")]
    Empty(&'static str),
    /// The package has no `a.b` segment pair, which would scan far too much.
    #[error("Cannot specify a top-level package filter: '{0}'")]
    TopLevelPackage(String),
    /// A single-use filter was set a second time, or after its counterpart.
    #[error("{filter} filter already exists: {existing}")]
    AlreadySet {
        /// Which filter, eg. `Exact simple name` or `Return type`.
        filter:   &'static str,
        /// The value that is already in place.
        existing: String,
    },
    /// An exact name was requested after substring filters.
    #[error("Name filter(s) already exist(s): [{}]", .0.join(", "))]
    NameFiltersAlreadySet(Vec<String>),
    /// Argument-type lists are capped to bound the permutation search.
    #[error("withExactArgTypes will not accept more than {max} arguments: [{}]", .given.iter().join(", "))]
    TooManyArgTypes {
        /// The cap.
        max:   usize,
        /// What the caller passed.
        given: Vec<TypeName>,
    },
    /// One of the argument types was blank.
    #[error("argTypes contained a null: [{}]", .0.iter().join(", "))]
    BlankArgType(Vec<TypeName>),
}

impl FilterError {
    /// True when the error is about filter state (a filter set twice or
    /// combined with its counterpart) rather than about a bad argument.
    pub fn is_state_error(&self) -> bool {
        matches!(
            self,
            FilterError::AlreadySet { .. } | FilterError::NameFiltersAlreadySet(_)
        )
    }
}

/// Something a query can be resolved against: it knows how to describe
/// itself and its failures.
pub trait Criteria: fmt::Display + fmt::Debug + Clone {
    /// What a successful lookup yields.
    type Match: fmt::Debug + Clone;

    /// Name reported when nothing matched, eg. `NoClassFoundError`.
    const NOT_FOUND: &'static str;

    /// Name reported when more than one candidate matched.
    const MULTIPLE_FOUND: &'static str;

    /// Message for an empty match set.
    fn not_found_message(&self) -> String;

    /// Message for a match set with more than one element.
    fn multiple_found_message(&self, matches: &[Self::Match]) -> String;
}

/// Raised by the unique-result terminals (`find_class`, `find_method`,
/// `find_constructor`).
///
/// The message is rendered when the error is built, from the query exactly
/// as it stood.
#[derive(thiserror::Error, Debug, Clone)]
pub enum LookupError<Q: Criteria> {
    /// Nothing matched.
    #[error("{message}")]
    NotFound {
        /// The query that came up empty.
        query:   Q,
        /// Rendered diagnostic.
        message: String,
    },
    /// More than one candidate matched.
    #[error("{message}")]
    MultipleFound {
        /// The query that was too loose.
        query:   Q,
        /// Every match, in result order.
        matches: Vec<Q::Match>,
        /// Rendered diagnostic.
        message: String,
    },
}

impl<Q: Criteria> LookupError<Q> {
    /// Builds a not-found error for `query`.
    pub fn not_found(query: Q) -> Self {
        let message = query.not_found_message();
        LookupError::NotFound { query, message }
    }

    /// Builds a multiple-found error for `query` and its matches.
    pub fn multiple_found(query: Q, matches: Vec<Q::Match>) -> Self {
        let message = query.multiple_found_message(&matches);
        LookupError::MultipleFound {
            query,
            matches,
            message,
        }
    }

    /// The originating query.
    pub fn query(&self) -> &Q {
        match self {
            LookupError::NotFound { query, .. } | LookupError::MultipleFound { query, .. } => query,
        }
    }

    /// The offending matches; empty for a not-found error.
    pub fn matches(&self) -> &[Q::Match] {
        match self {
            LookupError::NotFound { .. } => Default::default(),
            LookupError::MultipleFound { matches, .. } => matches,
        }
    }

    /// The rendered diagnostic.
    pub fn message(&self) -> &str {
        match self {
            LookupError::NotFound { message, .. } | LookupError::MultipleFound { message, .. } => {
                message
            }
        }
    }

    /// Name of the failure kind, eg. `MultipleMethodsFoundError`.
    pub fn kind(&self) -> &'static str {
        match self {
            LookupError::NotFound { .. } => Q::NOT_FOUND,
            LookupError::MultipleFound { .. } => Q::MULTIPLE_FOUND,
        }
    }

    /// True for the not-found case.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LookupError::NotFound { .. })
    }
}
