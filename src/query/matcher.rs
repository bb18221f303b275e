#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::fmt;

use itertools::Itertools;

use super::error::FilterError;
use crate::{constants::MAX_ARGUMENTS, types::TypeName};

/// An argument-type filter whose order does not matter but whose
/// multiplicities do: `[int, int, String]` only matches parameter lists with
/// two `int`s and one `String`.
///
/// Capped at [`MAX_ARGUMENTS`] entries so that enumerating every ordering
/// stays tractable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArgTypeList(Vec<TypeName>);

impl ArgTypeList {
    /// Validates and stores the given types.
    ///
    /// Fails if there are more than [`MAX_ARGUMENTS`] types or if any of them
    /// is blank.
    pub fn new<I, T>(types: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = T>,
        T: Into<TypeName>,
    {
        let types: Vec<TypeName> = types.into_iter().map(Into::into).collect();

        if types.len() > MAX_ARGUMENTS {
            return Err(FilterError::TooManyArgTypes {
                max:   MAX_ARGUMENTS,
                given: types,
            });
        }
        if types.iter().any(TypeName::is_blank) {
            return Err(FilterError::BlankArgType(types));
        }

        Ok(Self(types))
    }

    /// Number of types.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for the no-argument filter.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Every distinct ordering of the types.
    ///
    /// Repeated types collapse: `[int, int]` has one ordering, not two. The
    /// empty list has exactly one ordering, itself.
    pub fn orderings(&self) -> Vec<Vec<TypeName>> {
        if self.0.is_empty() {
            return vec![Vec::new()];
        }

        self.0
            .iter()
            .cloned()
            .permutations(self.0.len())
            .unique()
            .collect()
    }
}

impl fmt::Display for ArgTypeList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.iter().join(", "))
    }
}
