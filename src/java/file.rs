#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{
    collections::HashMap,
    hash::{Hash, Hasher},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tree_sitter::Node;

use super::parser::Parser;
use crate::{
    constants::{IMPORT_QUERY, JAVA_LANG_ENUM, JAVA_LANG_RECORD, PACKAGE_QUERY},
    descriptor::{ConstructorDescriptor, FieldDescriptor, MethodDescriptor, TypeDescriptor},
    types::{TypeKind, TypeName, Visibility},
};

/// An import declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Import {
    /// Dotted path as written, without any trailing `.*`.
    pub path:      String,
    /// `import a.b.*;`
    pub wildcard:  bool,
    /// `import static ...;`
    pub is_static: bool,
}

impl Import {
    /// Reads an import declaration such as `import static a.B.*;`.
    fn parse(text: &str) -> Option<Self> {
        let body = text
            .trim()
            .strip_prefix("import")?
            .trim()
            .trim_end_matches(';');
        let (is_static, body) = match body.strip_prefix("static") {
            Some(rest) if rest.starts_with(char::is_whitespace) => (true, rest),
            _ => (false, body),
        };

        let path: String = body.split_whitespace().collect();
        let (path, wildcard) = match path.strip_suffix(".*") {
            Some(prefix) => (prefix.to_string(), true),
            None => (path, false),
        };
        if path.is_empty() {
            return None;
        }

        Some(Self {
            path,
            wildcard,
            is_static,
        })
    }
}

#[derive(Debug, Clone)]
/// Struct representing a java file
pub struct File {
    /// path to java file.
    path:       PathBuf,
    /// package the java file belongs to.
    package:    Option<String>,
    /// imports made by the java file.
    imports:    Vec<Import>,
    /// every type declared in the file, nested ones included; type
    /// references are still as written
    types:      Vec<TypeDescriptor>,
    /// tree-sitter had to recover from syntax errors
    has_errors: bool,
}

/// Two `File`s are equal if their paths are equal
impl PartialEq for File {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

/// Based on PartialEq
impl Eq for File {}

/// Hash based on path
impl Hash for File {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

impl File {
    /// Reads and parses the file at `path`.
    pub fn new(path: PathBuf) -> Result<Self> {
        let source_code = std::fs::read_to_string(&path)
            .with_context(|| format!("Could not read file: {:?}", &path))?;
        Self::from_source(path, source_code)
    }

    /// Parses `source_code` as if it had been read from `path`.
    pub fn from_source(path: PathBuf, source_code: String) -> Result<Self> {
        let parser = Parser::new(source_code)?;

        let package = parser
            .query(PACKAGE_QUERY)?
            .first()
            .and_then(|m| m.get("name"))
            .map(|name| name.split_whitespace().collect::<String>());

        let imports = parser
            .query(IMPORT_QUERY)?
            .into_iter()
            .filter_map(|m| m.get("import").and_then(|text| Import::parse(text)))
            .collect();

        let mut extractor = Extractor {
            parser: &parser,
            package: package.clone().unwrap_or_default(),
            types: Vec::new(),
        };
        let root = parser.root();
        for node in named_children(root) {
            extractor.declaration(node, None, Visibility::Package, &HashMap::new());
        }

        Ok(Self {
            path,
            package,
            imports,
            types: extractor.types,
            has_errors: parser.has_errors(),
        })
    }

    /// Path the file was read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Declared package, if any.
    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    /// Import declarations in source order.
    pub fn imports(&self) -> &[Import] {
        &self.imports
    }

    /// Declared types with names as written in the source.
    pub fn types(&self) -> &[TypeDescriptor] {
        &self.types
    }

    /// True if the file contained syntax errors; the types extracted from it
    /// may be incomplete.
    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    /// Maps every name a type declared in this file can be referred to by
    /// from inside the file (simple name, `Outer.Inner`) to its qualified
    /// name.
    pub(crate) fn local_names(&self) -> HashMap<String, String> {
        let mut local = HashMap::new();
        for ty in &self.types {
            let qualified = ty.qualified_name();
            let relative = match ty.enclosing() {
                Some(enclosing) => format!("{enclosing}.{}", ty.simple_name()),
                None => ty.simple_name().to_string(),
            };
            local.insert(relative, qualified.clone());
            local
                .entry(ty.simple_name().to_string())
                .or_insert(qualified);
        }
        local
    }
}

/// Type variables in scope, mapped to their erasure.
type TypeVars = HashMap<String, TypeName>;

/// Walks declarations and collects type descriptors.
struct Extractor<'p> {
    /// parsed file
    parser:  &'p Parser,
    /// package of the file
    package: String,
    /// collected descriptors, outermost first
    types:   Vec<TypeDescriptor>,
}

/// Named children of `node`, collected so the cursor can be dropped.
fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

/// Keyword modifiers on a declaration.
#[derive(Debug, Default)]
struct Modifiers {
    /// explicit access keyword, if any
    visibility: Option<Visibility>,
    /// `static` present
    is_static:  bool,
}

impl Modifiers {
    /// Reads the `modifiers` child of `node`, if present.
    fn of(node: Node<'_>) -> Self {
        let mut modifiers = Self::default();
        let Some(list) = named_children(node)
            .into_iter()
            .find(|c| c.kind() == "modifiers")
        else {
            return modifiers;
        };

        let mut cursor = list.walk();
        for keyword in list.children(&mut cursor) {
            match keyword.kind() {
                "public" => modifiers.visibility = Some(Visibility::Public),
                "protected" => modifiers.visibility = Some(Visibility::Protected),
                "private" => modifiers.visibility = Some(Visibility::Private),
                "static" => modifiers.is_static = true,
                _ => {}
            }
        }
        modifiers
    }

    /// Explicit visibility, or `default` when none was written.
    fn visibility_or(&self, default: Visibility) -> Visibility {
        self.visibility.unwrap_or(default)
    }
}

impl Extractor<'_> {
    /// Text of `node`.
    fn text(&self, node: Node<'_>) -> &str {
        self.parser.text(node)
    }

    /// Reads a type node, erasing any type variable in scope.
    fn type_name(&self, node: Node<'_>, vars: &TypeVars) -> TypeName {
        let name = TypeName::from(self.text(node));
        match vars.get(name.base()) {
            Some(erasure) => name.with_base(erasure.base()),
            None => name,
        }
    }

    /// Appends C-style dimensions (`int a[]`) to `base`.
    fn with_dimensions(&self, base: &TypeName, dimensions: Option<Node<'_>>) -> TypeName {
        match dimensions {
            Some(dims) => {
                let extra = self.text(dims).matches('[').count();
                TypeName::from_parts(base.base(), base.dimensions() + extra)
            }
            None => base.clone(),
        }
    }

    /// Adds any type parameters declared on `node` to `vars`.
    fn type_parameters(&self, node: Node<'_>, vars: &TypeVars) -> TypeVars {
        let mut vars = vars.clone();
        let Some(params) = node.child_by_field_name("type_parameters") else {
            return vars;
        };

        for param in named_children(params)
            .into_iter()
            .filter(|p| p.kind() == "type_parameter")
        {
            let children = named_children(param);
            let Some(name) = children.iter().find(|c| c.kind() == "type_identifier") else {
                continue;
            };
            let erasure = children
                .iter()
                .find(|c| c.kind() == "type_bound")
                .and_then(|bound| named_children(*bound).into_iter().next())
                .map(|first| self.type_name(first, &vars))
                .unwrap_or_else(TypeName::object);
            vars.insert(self.text(*name).to_string(), erasure);
        }
        vars
    }

    /// Handles one node that may be a type declaration, recursing into
    /// nested declarations.
    ///
    /// * `enclosing`: dotted names of the enclosing types.
    /// * `default_visibility`: visibility when no modifier is written.
    fn declaration(
        &mut self,
        node: Node<'_>,
        enclosing: Option<&str>,
        default_visibility: Visibility,
        outer_vars: &TypeVars,
    ) {
        let kind = match node.kind() {
            "class_declaration" => TypeKind::Class,
            "interface_declaration" => TypeKind::Interface,
            "enum_declaration" => TypeKind::Enum,
            "record_declaration" => TypeKind::Record,
            "annotation_type_declaration" => TypeKind::Annotation,
            _ => return,
        };
        let Some(name_node) = node.child_by_field_name("name") else {
            return;
        };
        let simple_name = self.text(name_node).to_string();
        let modifiers = Modifiers::of(node);
        let visibility = modifiers.visibility_or(default_visibility);
        let vars = self.type_parameters(node, outer_vars);

        let superclass = match kind {
            TypeKind::Class => Some(
                node.child_by_field_name("superclass")
                    .and_then(|s| named_children(s).into_iter().next())
                    .map(|t| self.type_name(t, &vars))
                    .unwrap_or_else(TypeName::object),
            ),
            TypeKind::Enum => Some(TypeName::from(JAVA_LANG_ENUM)),
            TypeKind::Record => Some(TypeName::from(JAVA_LANG_RECORD)),
            TypeKind::Interface | TypeKind::Annotation => None,
        };

        let interfaces = self.interfaces(node, &vars);

        let member_default = if kind.is_interface() {
            Visibility::Public
        } else {
            Visibility::Package
        };
        let nested_enclosing = match enclosing {
            Some(outer) => format!("{outer}.{simple_name}"),
            None => simple_name.clone(),
        };

        let mut members = Members::default();
        let mut nested = Vec::new();
        if let Some(body) = node.child_by_field_name("body") {
            for member in self.body_members(body) {
                match member.kind() {
                    "field_declaration" | "constant_declaration" => {
                        self.fields(member, kind, member_default, &vars, &mut members);
                    }
                    "method_declaration" | "annotation_type_element_declaration" => {
                        self.method(member, member_default, &vars, &mut members);
                    }
                    "constructor_declaration" => {
                        self.constructor(member, kind, member_default, &vars, &mut members);
                    }
                    "enum_constant" => {
                        let Some(constant) = member.child_by_field_name("name") else {
                            continue;
                        };
                        members.fields.push(
                            FieldDescriptor::new(self.text(constant), simple_name.as_str())
                                .with_static(true),
                        );
                    }
                    _ => nested.push(member),
                }
            }
        }

        match kind {
            TypeKind::Record => {
                self.record_members(node, visibility, &vars, &mut members);
            }
            TypeKind::Enum => {
                members.methods.push(
                    MethodDescriptor::new(
                        "values",
                        TypeName::from_parts(&simple_name, 1),
                        Vec::<TypeName>::new(),
                    )
                    .with_static(true),
                );
                members.methods.push(
                    MethodDescriptor::new("valueOf", simple_name.as_str(), ["String"])
                        .with_static(true),
                );
                if members.constructors.is_empty() {
                    members
                        .constructors
                        .push(ConstructorDescriptor::no_args().with_visibility(Visibility::Private));
                }
            }
            TypeKind::Class if members.constructors.is_empty() => {
                members
                    .constructors
                    .push(ConstructorDescriptor::no_args().with_visibility(visibility));
            }
            _ => {}
        }

        self.types.push(
            TypeDescriptor::builder()
                .package(self.package.clone())
                .simple_name(simple_name)
                .maybe_enclosing(enclosing.map(str::to_string))
                .kind(kind)
                .visibility(visibility)
                .maybe_superclass(superclass)
                .interfaces(interfaces)
                .fields(members.fields)
                .methods(members.methods)
                .constructors(members.constructors)
                .build(),
        );

        for child in nested {
            self.declaration(child, Some(&nested_enclosing), member_default, &vars);
        }
    }

    /// Interfaces a type implements or, for an interface, extends.
    fn interfaces(&self, node: Node<'_>, vars: &TypeVars) -> Vec<TypeName> {
        let clause = node.child_by_field_name("interfaces").or_else(|| {
            named_children(node)
                .into_iter()
                .find(|c| c.kind() == "extends_interfaces")
        });

        clause
            .and_then(|c| {
                named_children(c)
                    .into_iter()
                    .find(|t| t.kind() == "type_list")
            })
            .map(|list| {
                named_children(list)
                    .into_iter()
                    .map(|t| self.type_name(t, vars))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Member declarations of a class, interface, enum, record, or
    /// annotation body. Enum constants come first.
    fn body_members<'t>(&self, body: Node<'t>) -> Vec<Node<'t>> {
        let mut members = Vec::new();
        for child in named_children(body) {
            if child.kind() == "enum_body_declarations" {
                members.extend(named_children(child));
            } else {
                members.push(child);
            }
        }
        members
    }

    /// Fields from a field or interface-constant declaration.
    fn fields(
        &self,
        node: Node<'_>,
        owner: TypeKind,
        default_visibility: Visibility,
        vars: &TypeVars,
        members: &mut Members,
    ) {
        let Some(type_node) = node.child_by_field_name("type") else {
            return;
        };
        let modifiers = Modifiers::of(node);
        let base = self.type_name(type_node, vars);
        let is_static = modifiers.is_static || owner.is_interface();

        let mut cursor = node.walk();
        for declarator in node.children_by_field_name("declarator", &mut cursor) {
            let Some(name) = declarator.child_by_field_name("name") else {
                continue;
            };
            let field_type = self.with_dimensions(&base, declarator.child_by_field_name("dimensions"));
            members.fields.push(
                FieldDescriptor::new(self.text(name), field_type)
                    .with_visibility(modifiers.visibility_or(default_visibility))
                    .with_static(is_static),
            );
        }
    }

    /// A method or annotation element.
    fn method(
        &self,
        node: Node<'_>,
        default_visibility: Visibility,
        vars: &TypeVars,
        members: &mut Members,
    ) {
        let (Some(name), Some(return_node)) =
            (node.child_by_field_name("name"), node.child_by_field_name("type"))
        else {
            return;
        };
        let modifiers = Modifiers::of(node);
        let vars = self.type_parameters(node, vars);
        let return_type = self.with_dimensions(
            &self.type_name(return_node, &vars),
            node.child_by_field_name("dimensions"),
        );
        let parameters = node
            .child_by_field_name("parameters")
            .map(|p| self.parameters(p, &vars))
            .unwrap_or_default();

        members.methods.push(
            MethodDescriptor::new(self.text(name), return_type, parameters)
                .with_visibility(modifiers.visibility_or(default_visibility))
                .with_static(modifiers.is_static),
        );
    }

    /// An explicit constructor.
    fn constructor(
        &self,
        node: Node<'_>,
        owner: TypeKind,
        default_visibility: Visibility,
        vars: &TypeVars,
        members: &mut Members,
    ) {
        let modifiers = Modifiers::of(node);
        let vars = self.type_parameters(node, vars);
        let parameters = node
            .child_by_field_name("parameters")
            .map(|p| self.parameters(p, &vars))
            .unwrap_or_default();
        // enum constructors are always private
        let visibility = if owner == TypeKind::Enum {
            Visibility::Private
        } else {
            modifiers.visibility_or(default_visibility)
        };

        members
            .constructors
            .push(ConstructorDescriptor::new(parameters).with_visibility(visibility));
    }

    /// Component fields, accessors, and the canonical constructor of a record.
    fn record_members(
        &self,
        node: Node<'_>,
        visibility: Visibility,
        vars: &TypeVars,
        members: &mut Members,
    ) {
        let components: Vec<(String, TypeName)> = node
            .child_by_field_name("parameters")
            .map(|p| self.named_parameters(p, vars))
            .unwrap_or_default();

        for (name, ty) in &components {
            members.fields.push(
                FieldDescriptor::new(name.as_str(), ty.clone()).with_visibility(Visibility::Private),
            );
            if !members
                .methods
                .iter()
                .any(|m| m.name == *name && m.parameters.is_empty())
            {
                members
                    .methods
                    .push(MethodDescriptor::new(name.as_str(), ty.clone(), Vec::<TypeName>::new()));
            }
        }

        let canonical: Vec<TypeName> = components.into_iter().map(|(_, ty)| ty).collect();
        if !members.constructors.iter().any(|c| c.parameters == canonical) {
            members
                .constructors
                .push(ConstructorDescriptor::new(canonical).with_visibility(visibility));
        }
    }

    /// Parameter types of a `formal_parameters` node.
    fn parameters(&self, node: Node<'_>, vars: &TypeVars) -> Vec<TypeName> {
        self.named_parameters(node, vars)
            .into_iter()
            .map(|(_, ty)| ty)
            .collect()
    }

    /// Parameter names and types of a `formal_parameters` node. Receiver
    /// parameters are skipped; varargs add one dimension.
    fn named_parameters(&self, node: Node<'_>, vars: &TypeVars) -> Vec<(String, TypeName)> {
        let mut params = Vec::new();
        for param in named_children(node) {
            match param.kind() {
                "formal_parameter" => {
                    let (Some(ty), Some(name)) =
                        (param.child_by_field_name("type"), param.child_by_field_name("name"))
                    else {
                        continue;
                    };
                    let ty = self.with_dimensions(
                        &self.type_name(ty, vars),
                        param.child_by_field_name("dimensions"),
                    );
                    params.push((self.text(name).to_string(), ty));
                }
                "spread_parameter" => {
                    let children = named_children(param);
                    let ty = children
                        .iter()
                        .find(|c| !matches!(c.kind(), "modifiers" | "variable_declarator"));
                    let name = children
                        .iter()
                        .find(|c| c.kind() == "variable_declarator")
                        .and_then(|d| d.child_by_field_name("name"));
                    if let (Some(ty), Some(name)) = (ty, name) {
                        let ty = self.type_name(*ty, vars);
                        params.push((
                            self.text(name).to_string(),
                            TypeName::from_parts(ty.base(), ty.dimensions() + 1),
                        ));
                    }
                }
                _ => {}
            }
        }
        params
    }
}

/// Members gathered while walking a type body.
#[derive(Debug, Default)]
struct Members {
    /// declared fields
    fields:       Vec<FieldDescriptor>,
    /// declared methods
    methods:      Vec<MethodDescriptor>,
    /// declared constructors
    constructors: Vec<ConstructorDescriptor>,
}
