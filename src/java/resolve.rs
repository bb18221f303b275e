use std::collections::{HashMap, HashSet};

use super::file::Import;
use crate::{
    constants::JAVA_LANG_TYPES,
    types::TypeName,
};

/// Turns the type names written in one file into fully qualified names.
///
/// A simple name is tried, in order, against: types declared in the same
/// file, single-type imports, types in the same package, on-demand (`.*`)
/// imports, and `java.lang`. Anything still unresolved is left as written.
pub(crate) struct NameResolver<'a> {
    /// Package of the file, empty for the default package.
    package: &'a str,
    /// Imports made by the file.
    imports: &'a [Import],
    /// Names of types declared in the file (simple and `Outer.Inner` forms)
    /// to their qualified names.
    local:   &'a HashMap<String, String>,
    /// Qualified names of every type found in the project.
    known:   &'a HashSet<String>,
}

impl<'a> NameResolver<'a> {
    /// Creates a resolver for one file.
    pub(crate) fn new(
        package: &'a str,
        imports: &'a [Import],
        local: &'a HashMap<String, String>,
        known: &'a HashSet<String>,
    ) -> Self {
        Self {
            package,
            imports,
            local,
            known,
        }
    }

    /// Qualifies `name`, keeping its array dimensions.
    pub(crate) fn qualify(&self, name: &TypeName) -> TypeName {
        if name.is_primitive() || name.is_void() || name.is_blank() {
            return name.clone();
        }

        let base = name.base();
        if name.dimensions() > 0 && TypeName::from(base).is_primitive() {
            return name.clone();
        }

        match self.qualify_base(base) {
            Some(qualified) => name.with_base(&qualified),
            None => name.clone(),
        }
    }

    /// Qualifies a dotted or simple base name, if anything claims it.
    fn qualify_base(&self, base: &str) -> Option<String> {
        if let Some(qualified) = self.local.get(base) {
            return Some(qualified.clone());
        }

        // `Outer.Inner` where `Outer` is itself resolvable
        if let Some((head, rest)) = base.split_once('.') {
            return self
                .qualify_simple(head)
                .map(|outer| format!("{outer}.{rest}"));
        }

        self.qualify_simple(base)
    }

    /// Qualifies a single identifier.
    fn qualify_simple(&self, simple: &str) -> Option<String> {
        if let Some(qualified) = self.local.get(simple) {
            return Some(qualified.clone());
        }

        let suffix = format!(".{simple}");
        if let Some(import) = self
            .imports
            .iter()
            .find(|i| !i.wildcard && !i.is_static && i.path.ends_with(&suffix))
        {
            return Some(import.path.clone());
        }

        let same_package = if self.package.is_empty() {
            simple.to_string()
        } else {
            format!("{}.{simple}", self.package)
        };
        if self.known.contains(&same_package) {
            return Some(same_package);
        }

        if let Some(candidate) = self
            .imports
            .iter()
            .filter(|i| i.wildcard && !i.is_static)
            .map(|i| format!("{}.{simple}", i.path))
            .find(|candidate| self.known.contains(candidate))
        {
            return Some(candidate);
        }

        let java_lang = format!("java.lang.{simple}");
        if JAVA_LANG_TYPES.contains(&simple) || self.known.contains(&java_lang) {
            return Some(java_lang);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn import(path: &str, wildcard: bool) -> Import {
        Import {
            path: path.to_string(),
            wildcard,
            is_static: false,
        }
    }

    #[test]
    fn resolution_order() {
        let imports = vec![import("java.util.List", false), import("pkg.model", true)];
        let local = HashMap::from([("Node".to_string(), "pkg.app.Tree.Node".to_string())]);
        let known: HashSet<String> = ["pkg.app.Helper", "pkg.model.Animal", "pkg.model.Helper"]
            .into_iter()
            .map(String::from)
            .collect();
        let resolver = NameResolver::new("pkg.app", &imports, &local, &known);

        let q = |s: &str| resolver.qualify(&TypeName::from(s)).to_string();
        assert_eq!(q("Node[]"), "pkg.app.Tree.Node[]");
        assert_eq!(q("List<String>"), "java.util.List");
        assert_eq!(q("Helper"), "pkg.app.Helper");
        assert_eq!(q("Animal"), "pkg.model.Animal");
        assert_eq!(q("String"), "java.lang.String");
        assert_eq!(q("int[][]"), "int[][]");
        assert_eq!(q("Mystery"), "Mystery");
        assert_eq!(q("java.util.Map"), "java.util.Map");
    }
}
