#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{collections::BTreeSet, fmt};

use itertools::Itertools;
use tracing::debug;

use super::{
    error::{Criteria, FilterError, LookupError},
    matcher::ArgTypeList,
    name::NameFilter,
    resolve,
};
use crate::{
    config,
    descriptor::{MethodDescriptor, TypeRef},
    types::TypeName,
};

/// Error returned by [`MethodQuery::find_method`].
pub type MethodLookupError = LookupError<MethodQuery>;

/// One predicate over a candidate method.
type MethodFilter<'a> = Box<dyn Fn(&MethodDescriptor) -> bool + 'a>;

/// Finds methods declared on one type by name, return type, and argument
/// types.
///
/// Argument types are unordered: `with_exact_arg_types(["int", "String"])`
/// also matches `m(String, int)`. Methods injected by coverage
/// instrumentation never match.
///
/// ```
/// use std::sync::Arc;
/// use introspect::{MethodDescriptor, MethodQuery, TypeDescriptor};
///
/// let zoo = Arc::new(
///     TypeDescriptor::builder()
///         .package("pkg.zoo")
///         .simple_name("Zoo")
///         .methods([
///             MethodDescriptor::new("getElephant", "pkg.zoo.Elephant", ["java.lang.String"]),
///             MethodDescriptor::new("setName", "void", ["java.lang.String"]),
///         ])
///         .build(),
/// );
///
/// let getter = MethodQuery::in_type(&zoo)
///     .with_return_type("pkg.zoo.Elephant")?
///     .with_name_containing("get")?
///     .find_method()?;
/// assert_eq!(getter.name, "getElephant");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodQuery {
    /// Type whose declared methods are searched.
    owner:       TypeRef,
    /// Required return type, `void` included.
    return_type: Option<TypeName>,
    /// Method-name constraint.
    name:        NameFilter,
    /// Required argument types, in any order.
    arg_types:   Option<ArgTypeList>,
}

impl MethodQuery {
    /// Starts a query over the methods declared on `owner`.
    pub fn in_type(owner: &TypeRef) -> Self {
        Self {
            owner:       TypeRef::clone(owner),
            return_type: None,
            name:        NameFilter::Any,
            arg_types:   None,
        }
    }

    /// Requires this exact (erased) return type.
    ///
    /// Fails if a return type, or `void`, is already required.
    pub fn with_return_type(&self, return_type: impl Into<TypeName>) -> Result<Self, FilterError> {
        self.ensure_return_type_not_set()?;
        let return_type = return_type.into();
        if return_type.is_blank() {
            return Err(FilterError::Empty("return type"));
        }

        Ok(Self {
            return_type: Some(return_type),
            ..self.clone()
        })
    }

    /// Requires a `void` return.
    ///
    /// Fails if a return type is already required.
    pub fn with_void_return_type(&self) -> Result<Self, FilterError> {
        self.ensure_return_type_not_set()?;
        Ok(Self {
            return_type: Some(TypeName::void()),
            ..self.clone()
        })
    }

    /// Requires the method name to equal `name`.
    ///
    /// Fails if any name filter is already set.
    pub fn with_exact_name(&self, name: &str) -> Result<Self, FilterError> {
        Ok(Self {
            name: self.name.exact(name, "Exact name", "method name")?,
            ..self.clone()
        })
    }

    /// Requires the method name to contain `substring`. Repeatable; every
    /// substring must appear.
    ///
    /// Fails if an exact name is set.
    pub fn with_name_containing(&self, substring: &str) -> Result<Self, FilterError> {
        Ok(Self {
            name: self
                .name
                .containing(substring, "Exact name", "method name substring")?,
            ..self.clone()
        })
    }

    /// Requires exactly these parameter types, in any order, with repeats
    /// counted.
    ///
    /// Fails if argument types are already required, if more than
    /// [`crate::constants::MAX_ARGUMENTS`] are given, or if one is blank.
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

    /// Every matching method, in declaration order.
    ///
    /// One full filter set is built per ordering of the argument types and a
    /// method matches if any set accepts it.
    pub fn find_methods(&self) -> Vec<MethodDescriptor> {
        let candidates = self.owner.methods();
        let filter_sets = self.filter_sets();
        let mut matched = BTreeSet::new();

        for filters in &filter_sets {
            matched.extend(
                candidates
                    .iter()
                    .enumerate()
                    .filter(|&(_, m)| filters.iter().all(|accepts| accepts(m)))
                    .map(|(i, _)| i),
            );
        }

        let config = config::get();
        let found: Vec<MethodDescriptor> = matched
            .into_iter()
            .map(|i| &candidates[i])
            .filter(|m| !config.is_excluded_method(&m.name))
            .cloned()
            .collect();

        debug!(
            query = %self,
            candidates = candidates.len(),
            filter_sets = filter_sets.len(),
            matches = found.len(),
            "method query"
        );
        found
    }

    /// The unique matching method.
    pub fn find_method(&self) -> Result<MethodDescriptor, MethodLookupError> {
        resolve::unique(self, self.find_methods())
    }

    /// The unique matching method; panics with the lookup diagnostic
    /// otherwise.
    #[track_caller]
    pub fn find_method_or_fail(&self) -> MethodDescriptor {
        resolve::or_fail(self.find_method())
    }

    /// Filters that do not depend on argument order.
    fn fixed_filters(&self) -> Vec<MethodFilter<'_>> {
        let mut filters: Vec<MethodFilter<'_>> = Vec::new();

        if let Some(return_type) = &self.return_type {
            filters.push(Box::new(move |m: &MethodDescriptor| m.return_type == *return_type));
        }
        filters.push(Box::new(move |m: &MethodDescriptor| self.name.matches(&m.name)));

        filters
    }

    /// One complete filter set per argument ordering, or a single set when no
    /// argument types are required.
    fn filter_sets(&self) -> Vec<Vec<MethodFilter<'_>>> {
        let Some(arg_types) = &self.arg_types else {
            return vec![self.fixed_filters()];
        };

        arg_types
            .orderings()
            .into_iter()
            .map(|ordering| {
                let mut filters = self.fixed_filters();
                filters.push(Box::new(move |m: &MethodDescriptor| m.parameters == ordering));
                filters
            })
            .collect()
    }

    /// Fails if a return type or `void` is already required.
    fn ensure_return_type_not_set(&self) -> Result<(), FilterError> {
        match &self.return_type {
            Some(existing) => Err(FilterError::AlreadySet {
                filter:   "Return type",
                existing: existing.to_string(),
            }),
            None => Ok(()),
        }
    }
}

impl Criteria for MethodQuery {
    type Match = MethodDescriptor;

    const MULTIPLE_FOUND: &'static str = "MultipleMethodsFoundError";
    const NOT_FOUND: &'static str = "NoMethodFoundError";

    fn not_found_message(&self) -> String {
        format!("No method found in {} matching criteria: {self}", self.owner)
    }

    fn multiple_found_message(&self, matches: &[MethodDescriptor]) -> String {
        format!(
            "Multiple methods in type {} ({}) matching criteria: {self}",
            self.owner,
            matches.iter().map(|m| m.name.as_str()).join(", ")
        )
    }
}

impl fmt::Display for MethodQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{MethodQuery | class: {}", self.owner)?;
        if let Some(return_type) = &self.return_type {
            write!(f, ", returnType: {return_type}")?;
        }
        match &self.name {
            NameFilter::Any => {}
            NameFilter::Exact(name) => write!(f, ", exactMethodName: {name}")?,
            NameFilter::Containing(_) => {
                write!(f, ", methodNameContainingSubstrings: {}", self.name)?
            }
        }
        if let Some(arg_types) = &self.arg_types {
            write!(f, ", exactArgTypes: {arg_types}")?;
        }
        f.write_str("}")
    }
}
