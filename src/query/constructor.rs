use std::{collections::BTreeSet, fmt};

use itertools::Itertools;
use tracing::debug;

use super::{
    error::{Criteria, FilterError, LookupError},
    matcher::ArgTypeList,
    resolve,
};
use crate::{
    descriptor::{ConstructorDescriptor, TypeRef},
    types::TypeName,
};

/// Error returned by [`ConstructorQuery::find_constructor`].
pub type ConstructorLookupError = LookupError<ConstructorQuery>;

/// Finds public constructors of one type by argument types, in any order.
///
/// With no filter, every public constructor matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorQuery {
    /// Type whose constructors are searched.
    owner:     TypeRef,
    /// Required argument types, in any order.
    arg_types: Option<ArgTypeList>,
}

impl ConstructorQuery {
    /// Starts a query over the public constructors of `owner`.
    pub fn in_class(owner: &TypeRef) -> Self {
        Self {
            owner:     TypeRef::clone(owner),
            arg_types: None,
        }
    }

    /// Requires the no-argument constructor. Same as passing an empty list
    /// to [`ConstructorQuery::with_exact_arg_types`].
    pub fn with_no_args(&self) -> Result<Self, FilterError> {
        self.with_exact_arg_types(Vec::<TypeName>::new())
    }

    /// Requires exactly these parameter types, in any order, with repeats
    /// counted.
    pub fn with_exact_arg_types<I, T>(&self, arg_types: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = T>,
        T: Into<TypeName>,
    {
        if let Some(existing) = &self.arg_types {
            return Err(FilterError::AlreadySet {
                filter:   "Exact arg types",
                existing: existing.to_string(),
            });
        }

        Ok(Self {
            arg_types: Some(ArgTypeList::new(arg_types)?),
            ..self.clone()
        })
    }

    /// The type being searched.
    pub fn owner(&self) -> &TypeRef {
        &self.owner
    }

    /// Every matching public constructor, in declaration order.
    pub fn find_constructors(&self) -> Vec<ConstructorDescriptor> {
        let public: Vec<&ConstructorDescriptor> = self.owner.public_constructors().collect();

        let found: Vec<ConstructorDescriptor> = match &self.arg_types {
            None => public.into_iter().cloned().collect(),
            Some(arg_types) => {
                // look each ordering up positionally, like an exact signature lookup
                let mut matched = BTreeSet::new();
                for ordering in arg_types.orderings() {
                    if let Some(i) = public.iter().position(|c| c.parameters == ordering) {
                        matched.insert(i);
                    }
                }
                matched.into_iter().map(|i| public[i].clone()).collect()
            }
        };

        debug!(query = %self, matches = found.len(), "constructor query");
        found
    }

    /// The unique matching constructor.
    pub fn find_constructor(&self) -> Result<ConstructorDescriptor, ConstructorLookupError> {
        resolve::unique(self, self.find_constructors())
    }

    /// The unique matching constructor; panics with the lookup diagnostic
    /// otherwise.
    #[track_caller]
    pub fn find_constructor_or_fail(&self) -> ConstructorDescriptor {
        resolve::or_fail(self.find_constructor())
    }
}

impl Criteria for ConstructorQuery {
    type Match = ConstructorDescriptor;

    const MULTIPLE_FOUND: &'static str = "MultipleConstructorsFoundError";
    const NOT_FOUND: &'static str = "NoConstructorFoundError";

    fn not_found_message(&self) -> String {
        format!("No constructor found in {} matching criteria: {self}", self.owner)
    }

    fn multiple_found_message(&self, matches: &[ConstructorDescriptor]) -> String {
        format!(
            "Multiple constructors in type {} ([{}]) matched criteria: {self}",
            self.owner,
            matches.iter().join(", ")
        )
    }
}

impl fmt::Display for ConstructorQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ConstructorQuery | class: {}", self.owner)?;
        if let Some(arg_types) = &self.arg_types {
            write!(f, ", exactArgTypes: {arg_types}")?;
        }
        f.write_str("}")
    }
}
