#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{
    collections::{HashMap, HashSet, VecDeque},
    fmt,
};

use itertools::Itertools;
use tracing::debug;

use super::{
    error::{Criteria, FilterError, LookupError},
    name::NameFilter,
    resolve,
};
use crate::{
    descriptor::{TypeDescriptor, TypeRef},
    source::TypeSource,
    types::TypeName,
};

/// Error returned by [`TypeQuery::find_class`].
pub type ClassLookupError = LookupError<TypeQuery>;

/// Finds types by package, simple name, and supertype.
///
/// Start with [`TypeQuery::in_exact_package`] or
/// [`TypeQuery::in_containing_package`], narrow with the `with_*` filters,
/// and finish with one of:
///
/// * [`TypeQuery::find_classes`]: every match, possibly none.
/// * [`TypeQuery::find_class`]: the unique match, or a [`ClassLookupError`].
/// * [`TypeQuery::find_class_or_fail`]: the unique match, or a test failure.
///
/// ```
/// use introspect::{SymbolTable, TypeDescriptor, TypeQuery};
///
/// let table = SymbolTable::from_types([
///     TypeDescriptor::builder().package("pkg.sample").simple_name("RequestHandler").build(),
///     TypeDescriptor::builder().package("pkg.sample").simple_name("Request").build(),
/// ]);
///
/// let handler = TypeQuery::in_containing_package("pkg.sample")?
///     .with_simple_name_containing("Handler")?
///     .find_class(&table)?;
/// assert_eq!(handler.simple_name(), "RequestHandler");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeQuery {
    /// Package the scan starts from.
    package:       String,
    /// Only the package itself, not its sub-packages, may hold matches.
    exact_package: bool,
    /// Simple-name constraint.
    name:          NameFilter,
    /// Required supertype, if any.
    sub_type_of:   Option<TypeName>,
}

impl TypeQuery {
    /// Starts a query over exactly `package`, excluding sub-packages.
    pub fn in_exact_package(package: &str) -> Result<Self, FilterError> {
        Self::new(package, true)
    }

    /// Starts a query over `package` and all of its sub-packages.
    pub fn in_containing_package(package: &str) -> Result<Self, FilterError> {
        Self::new(package, false)
    }

    /// Validates the package and builds an unfiltered query.
    fn new(package: &str, exact_package: bool) -> Result<Self, FilterError> {
        if package.is_empty() {
            return Err(FilterError::Empty("package name"));
        }
        // needs at least one `a.b` pair somewhere in the name
        if !package
            .split('.')
            .tuple_windows()
            .any(|(a, b)| !a.is_empty() && !b.is_empty())
        {
            return Err(FilterError::TopLevelPackage(package.to_string()));
        }

        Ok(Self {
            package: package.to_string(),
            exact_package,
            name: NameFilter::Any,
            sub_type_of: None,
        })
    }

    /// Requires the simple name to equal `name`.
    ///
    /// Fails if any name filter is already set.
    pub fn with_exact_simple_name(&self, name: &str) -> Result<Self, FilterError> {
        Ok(Self {
            name: self.name.exact(name, "Exact simple name", "class name")?,
            ..self.clone()
        })
    }

    /// Requires the simple name to contain `substring`. Repeatable; every
    /// substring must appear.
    ///
    /// Fails if an exact simple name is set.
    pub fn with_simple_name_containing(&self, substring: &str) -> Result<Self, FilterError> {
        Ok(Self {
            name: self
                .name
                .containing(substring, "Exact simple name", "class name substring")?,
            ..self.clone()
        })
    }

    /// Requires matches to extend or implement `supertype`, through types
    /// inside the scanned package tree.
    ///
    /// Fails if a supertype filter is already set.
    pub fn with_sub_type_of(&self, supertype: impl Into<TypeName>) -> Result<Self, FilterError> {
        if let Some(existing) = &self.sub_type_of {
            return Err(FilterError::AlreadySet {
                filter:   "Sub type",
                existing: format!("'{existing}'"),
            });
        }
        let supertype = supertype.into();
        if supertype.is_blank() {
            return Err(FilterError::Empty("supertype"));
        }

        Ok(Self {
            sub_type_of: Some(supertype),
            ..self.clone()
        })
    }

    /// Package the query scans.
    pub fn package(&self) -> &str {
        &self.package
    }

    /// True if sub-packages are excluded.
    pub fn is_exact_package(&self) -> bool {
        self.exact_package
    }

    /// Every type matching the query, ordered by qualified name.
    ///
    /// An unknown or empty package yields an empty result rather than an
    /// error.
    pub fn find_classes<S: TypeSource + ?Sized>(&self, source: &S) -> Vec<TypeRef> {
        let scanned = source.types_under(&self.package);
        if scanned.is_empty() {
            debug!(package = %self.package, "no discoverable types");
            return Vec::new();
        }

        let scope: HashMap<String, &TypeRef> =
            scanned.iter().map(|t| (t.qualified_name(), t)).collect();

        let mut found: Vec<TypeRef> = scanned
            .iter()
            .filter(|t| !self.exact_package || t.package() == self.package)
            .filter(|t| self.has_supertype(t, &scope))
            .filter(|t| self.name.matches(t.simple_name()))
            .cloned()
            .collect();

        found.sort_by_key(|t| t.qualified_name());
        found.dedup_by_key(|t| t.qualified_name());

        debug!(
            query = %self,
            scanned = scanned.len(),
            matches = found.len(),
            "type query"
        );
        found
    }

    /// The unique matching type.
    pub fn find_class<S: TypeSource + ?Sized>(&self, source: &S) -> Result<TypeRef, ClassLookupError> {
        resolve::unique(self, self.find_classes(source))
    }

    /// The unique matching type; panics with the lookup diagnostic otherwise.
    #[track_caller]
    pub fn find_class_or_fail<S: TypeSource + ?Sized>(&self, source: &S) -> TypeRef {
        resolve::or_fail(self.find_class(source))
    }

    /// True if no supertype is required, or if `ty` reaches it through
    /// supertypes that are themselves in `scope`.
    fn has_supertype(&self, ty: &TypeDescriptor, scope: &HashMap<String, &TypeRef>) -> bool {
        let target = match &self.sub_type_of {
            None => return true,
            Some(target) if *target == TypeName::object() => return true,
            Some(target) => target,
        };

        let mut seen = HashSet::new();
        let mut queue: VecDeque<&TypeName> = ty.supertypes().collect();

        while let Some(next) = queue.pop_front() {
            if next == target {
                return true;
            }
            if !seen.insert(next.as_str()) {
                continue;
            }
            if let Some(parent) = scope.get(next.as_str()) {
                queue.extend(parent.supertypes());
            }
        }

        false
    }
}

impl Criteria for TypeQuery {
    type Match = TypeRef;

    const MULTIPLE_FOUND: &'static str = "MultipleClassesFoundError";
    const NOT_FOUND: &'static str = "NoClassFoundError";

    fn not_found_message(&self) -> String {
        format!(
            "No class found under package '{}' matching criteria: {self}",
            self.package
        )
    }

    fn multiple_found_message(&self, matches: &[TypeRef]) -> String {
        format!(
            "Multiple classes ({}) under package '{}' matching criteria: {self}",
            matches.iter().map(|t| t.simple_name()).join(", "),
            self.package
        )
    }
}

impl fmt::Display for TypeQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{TypeQuery | packageName: {} (include subpackages: {})",
            self.package, !self.exact_package
        )?;
        match &self.name {
            NameFilter::Any => {}
            NameFilter::Exact(_) => write!(f, ", searching for exactSimpleName: {}", self.name)?,
            NameFilter::Containing(_) => {
                write!(f, ", filtering on classNameContainingSubstrings: {}", self.name)?
            }
        }
        let sub_type_of = self.sub_type_of.clone().unwrap_or_else(TypeName::object);
        write!(f, ", scanning for subTypes of: '{sub_type_of}'}}")
    }
}
