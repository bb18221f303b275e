#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Structural queries over types, methods, and constructors.
//!
//! Every query is an immutable value: each `with_*` call validates the
//! filters already present and returns a new query with one more filter, or
//! a [`FilterError`]. Each query kind offers the same three terminals:
//!
//! | terminal            | 0 matches        | 1 match | many matches         |
//! |---------------------|------------------|---------|----------------------|
//! | `find_*s`           | empty `Vec`      | `[m]`   | all of them          |
//! | `find_*`            | `NotFound`       | `m`     | `MultipleFound`      |
//! | `find_*_or_fail`    | panic            | `m`     | panic                |

/// Type queries.
mod class;
/// Constructor queries.
mod constructor;
/// Filter-state and lookup errors.
mod error;
/// Unordered argument-type matching.
mod matcher;
/// Method queries.
mod method;
/// Name filters shared by type and method queries.
mod name;
/// Cardinality resolution.
mod resolve;

pub use class::{ClassLookupError, TypeQuery};
pub use constructor::{ConstructorLookupError, ConstructorQuery};
pub use error::{Criteria, FilterError, LookupError};
pub use matcher::ArgTypeList;
pub use method::{MethodLookupError, MethodQuery};
