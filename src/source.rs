#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{
    collections::{BTreeMap, HashSet, VecDeque},
    path::Path,
    sync::Arc,
};

use anyhow::{Context, Result};
use tracing::debug;

use crate::{
    constants::JAVA_LANG_TYPES,
    descriptor::{MethodDescriptor, TypeDescriptor, TypeRef},
    types::{TypeName, Visibility},
};

/// Anything that can enumerate declared types and answer hierarchy questions
/// about them.
///
/// Queries only ever read from a source; each terminal call scans it afresh.
pub trait TypeSource {
    /// Every type declared in `package` or any of its sub-packages.
    ///
    /// Sub-packages are matched on `.` boundaries: `pkg.a` contains `pkg.a.b`
    /// but not `pkg.ab`.
    fn types_under(&self, package: &str) -> Vec<TypeRef>;

    /// Looks a type up by its fully qualified name.
    fn resolve(&self, name: &TypeName) -> Option<TypeRef>;

    /// True if `ty` is `target`, or extends / implements it through any chain
    /// of resolvable supertypes. Everything is assignable to
    /// `java.lang.Object`.
    fn is_assignable(&self, ty: &TypeDescriptor, target: &TypeName) -> bool {
        if *target == TypeName::object() || ty.type_name() == *target {
            return true;
        }

        let mut seen = HashSet::new();
        let mut queue: VecDeque<TypeName> = ty.supertypes().cloned().collect();

        while let Some(next) = queue.pop_front() {
            if next == *target {
                return true;
            }
            if !seen.insert(next.clone()) {
                continue;
            }
            if let Some(resolved) = self.resolve(&next) {
                queue.extend(resolved.supertypes().cloned());
            }
        }

        false
    }

    /// Public methods declared on `ty` or inherited from any resolvable
    /// supertype. An override hides the method it overrides.
    fn public_methods(&self, ty: &TypeDescriptor) -> Vec<MethodDescriptor> {
        let mut methods: Vec<MethodDescriptor> = Vec::new();
        let mut signatures = HashSet::new();
        let mut seen = HashSet::new();
        let mut queue: VecDeque<TypeName> = VecDeque::new();

        let mut collect = |owner: &TypeDescriptor, methods: &mut Vec<MethodDescriptor>| {
            for method in owner
                .methods()
                .iter()
                .filter(|m| m.visibility == Visibility::Public)
            {
                if signatures.insert(method.signature()) {
                    methods.push(method.clone());
                }
            }
        };

        collect(ty, &mut methods);
        queue.extend(ty.supertypes().cloned());

        while let Some(next) = queue.pop_front() {
            if !seen.insert(next.clone()) {
                continue;
            }
            if let Some(resolved) = self.resolve(&next) {
                collect(resolved.as_ref(), &mut methods);
                queue.extend(resolved.supertypes().cloned());
            }
        }

        methods
    }
}

/// In-memory symbol table keyed by fully qualified name.
///
/// Iteration order is the qualified-name order, which is what makes query
/// results stable.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    /// Types by qualified name.
    types: BTreeMap<String, TypeRef>,
}

impl SymbolTable {
    /// Returns an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from descriptors; later duplicates replace earlier ones.
    pub fn from_types(types: impl IntoIterator<Item = TypeDescriptor>) -> Self {
        let mut table = Self::new();
        for ty in types {
            table.insert(ty);
        }
        table
    }

    /// Adds (or replaces) a type and returns the shared handle to it.
    pub fn insert(&mut self, ty: TypeDescriptor) -> TypeRef {
        let ty = Arc::new(ty);
        self.types.insert(ty.qualified_name(), Arc::clone(&ty));
        ty
    }

    /// Looks a type up by qualified name.
    pub fn get(&self, qualified_name: &str) -> Option<TypeRef> {
        self.types.get(qualified_name).cloned()
    }

    /// Every type with the given simple name, in any package.
    pub fn find_by_simple_name(&self, simple_name: &str) -> Vec<TypeRef> {
        self.types
            .values()
            .filter(|t| t.simple_name() == simple_name)
            .cloned()
            .collect()
    }

    /// Qualifies a simple type name the way a reader of the table would:
    /// a unique table type with that simple name, then `java.lang`.
    ///
    /// Dotted names, primitives, `void`, and names nothing claims are
    /// returned unchanged. Array dimensions are kept.
    pub fn qualify(&self, name: impl Into<TypeName>) -> TypeName {
        let name = name.into();
        let base = name.base();
        if name.is_void() || name.is_blank() || base.contains('.') {
            return name;
        }
        if TypeName::from(base).is_primitive() || self.types.contains_key(base) {
            return name;
        }

        match self.find_by_simple_name(base).as_slice() {
            [only] => name.with_base(&only.qualified_name()),
            [] if JAVA_LANG_TYPES.contains(&base) => name.with_base(&format!("java.lang.{base}")),
            _ => name,
        }
    }

    /// Number of types in the table.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// True if the table holds no types.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// All types in qualified-name order.
    pub fn iter(&self) -> impl Iterator<Item = &TypeRef> {
        self.types.values()
    }

    /// Serializes the table as a JSON array of type descriptors.
    pub fn to_json(&self) -> Result<String> {
        let types: Vec<&TypeDescriptor> = self.types.values().map(Arc::as_ref).collect();
        serde_json::to_string_pretty(&types).context("Failed to serialize symbol table")
    }

    /// Reads a table from a JSON array of type descriptors.
    pub fn from_json(json: &str) -> Result<Self> {
        let types: Vec<TypeDescriptor> =
            serde_json::from_str(json).context("Failed to parse symbol table JSON")?;
        Ok(Self::from_types(types))
    }

    /// Reads a table from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read symbol table: {}", path.display()))?;
        let table = Self::from_json(&json)
            .with_context(|| format!("Invalid symbol table: {}", path.display()))?;
        debug!(types = table.len(), path = %path.display(), "loaded symbol table");
        Ok(table)
    }

    /// Writes the table to a JSON file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)
            .with_context(|| format!("Could not write symbol table: {}", path.display()))
    }
}

impl FromIterator<TypeDescriptor> for SymbolTable {
    fn from_iter<T: IntoIterator<Item = TypeDescriptor>>(iter: T) -> Self {
        Self::from_types(iter)
    }
}

impl TypeSource for SymbolTable {
    fn types_under(&self, package: &str) -> Vec<TypeRef> {
        let prefix = format!("{package}.");
        self.types
            .values()
            .filter(|t| t.package() == package || t.package().starts_with(&prefix))
            .cloned()
            .collect()
    }

    fn resolve(&self, name: &TypeName) -> Option<TypeRef> {
        if name.dimensions() > 0 {
            return None;
        }
        self.get(name.as_str())
    }
}
