use std::fmt;

use super::error::FilterError;

/// Name constraint shared by type and method queries: either one exact
/// name, or any number of substrings that must all appear.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) enum NameFilter {
    /// No constraint.
    #[default]
    Any,
    /// Name must equal this.
    Exact(String),
    /// Name must contain each of these (case-sensitive), in insertion order.
    Containing(Vec<String>),
}

impl NameFilter {
    /// Sets the exact name; fails if any name filter is already in place.
    ///
    /// * `label`: how errors refer to the filter, eg. `Exact simple name`.
    /// * `noun`: how errors refer to the value, eg. `class name`.
    pub(crate) fn exact(
        &self,
        name: &str,
        label: &'static str,
        noun: &'static str,
    ) -> Result<Self, FilterError> {
        self.ensure_not_exact(label)?;
        if let NameFilter::Containing(existing) = self {
            return Err(FilterError::NameFiltersAlreadySet(existing.clone()));
        }
        if name.is_empty() {
            return Err(FilterError::Empty(noun));
        }

        Ok(NameFilter::Exact(name.to_string()))
    }

    /// Adds a required substring; fails only if an exact name is set.
    pub(crate) fn containing(
        &self,
        substring: &str,
        label: &'static str,
        noun: &'static str,
    ) -> Result<Self, FilterError> {
        self.ensure_not_exact(label)?;
        if substring.is_empty() {
            return Err(FilterError::Empty(noun));
        }

        let mut substrings = match self {
            NameFilter::Containing(existing) => existing.clone(),
            _ => Vec::new(),
        };
        if !substrings.iter().any(|s| s == substring) {
            substrings.push(substring.to_string());
        }

        Ok(NameFilter::Containing(substrings))
    }

    /// Fails if an exact name has been set.
    fn ensure_not_exact(&self, label: &'static str) -> Result<(), FilterError> {
        match self {
            NameFilter::Exact(existing) => Err(FilterError::AlreadySet {
                filter:   label,
                existing: format!("'{existing}'"),
            }),
            _ => Ok(()),
        }
    }

    /// True if `name` satisfies the constraint.
    pub(crate) fn matches(&self, name: &str) -> bool {
        match self {
            NameFilter::Any => true,
            NameFilter::Exact(exact) => name == exact,
            NameFilter::Containing(substrings) => substrings.iter().all(|s| name.contains(s.as_str())),
        }
    }
}

impl fmt::Display for NameFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameFilter::Any => Ok(()),
            NameFilter::Exact(name) => write!(f, "'{name}'"),
            NameFilter::Containing(substrings) => write!(f, "[{}]", substrings.join(", ")),
        }
    }
}
