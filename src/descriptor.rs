#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Immutable descriptions of declared types and their members.
//!
//! Descriptors are produced by a [`crate::TypeSource`] (the Java loader or a
//! JSON symbol table) and shared as [`TypeRef`] handles. Queries never build
//! or alter them.

use std::{fmt, sync::Arc};

use bon::Builder;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::types::{TypeKind, TypeName, Visibility};

/// Cheap, shareable handle to a type descriptor.
pub type TypeRef = Arc<TypeDescriptor>;

/// A declared field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field name.
    pub name:       String,
    /// Declared (erased) type.
    pub field_type: TypeName,
    /// Access level.
    #[serde(default)]
    pub visibility: Visibility,
    /// `static` modifier present.
    #[serde(default)]
    pub is_static:  bool,
}

impl FieldDescriptor {
    /// A public instance field.
    pub fn new(name: impl Into<String>, field_type: impl Into<TypeName>) -> Self {
        Self {
            name:       name.into(),
            field_type: field_type.into(),
            visibility: Visibility::Public,
            is_static:  false,
        }
    }

    /// Returns a copy with the given visibility.
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Returns a copy marked `static`.
    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }
}

/// A declared method: name, return type, and ordered parameter types.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodDescriptor {
    /// Method name.
    pub name:        String,
    /// Erased return type, `void` when nothing is returned.
    pub return_type: TypeName,
    /// Erased parameter types in declaration order.
    #[serde(default)]
    pub parameters:  Vec<TypeName>,
    /// Access level.
    #[serde(default)]
    pub visibility:  Visibility,
    /// `static` modifier present.
    #[serde(default)]
    pub is_static:   bool,
}

impl MethodDescriptor {
    /// A public instance method.
    pub fn new<P>(
        name: impl Into<String>,
        return_type: impl Into<TypeName>,
        parameters: impl IntoIterator<Item = P>,
    ) -> Self
    where
        P: Into<TypeName>,
    {
        Self {
            name:        name.into(),
            return_type: return_type.into(),
            parameters:  parameters.into_iter().map(Into::into).collect(),
            visibility:  Visibility::Public,
            is_static:   false,
        }
    }

    /// Returns a copy with the given visibility.
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Returns a copy marked `static`.
    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    /// Name plus parameter types; two methods with the same signature
    /// override one another.
    pub fn signature(&self) -> (String, Vec<TypeName>) {
        (self.name.clone(), self.parameters.clone())
    }
}

impl fmt::Display for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = self.visibility.keyword();
        if !keyword.is_empty() {
            write!(f, "{keyword} ")?;
        }
        if self.is_static {
            f.write_str("static ")?;
        }
        write!(
            f,
            "{} {}({})",
            self.return_type,
            self.name,
            self.parameters.iter().join(", ")
        )
    }
}

/// A declared constructor: only its parameter list and access level.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConstructorDescriptor {
    /// Erased parameter types in declaration order.
    #[serde(default)]
    pub parameters: Vec<TypeName>,
    /// Access level.
    #[serde(default)]
    pub visibility: Visibility,
}

impl ConstructorDescriptor {
    /// A public constructor.
    pub fn new<P>(parameters: impl IntoIterator<Item = P>) -> Self
    where
        P: Into<TypeName>,
    {
        Self {
            parameters: parameters.into_iter().map(Into::into).collect(),
            visibility: Visibility::Public,
        }
    }

    /// A public constructor taking no arguments.
    pub fn no_args() -> Self {
        Self::new(Vec::<TypeName>::new())
    }

    /// Returns a copy with the given visibility.
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }
}

impl fmt::Display for ConstructorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = self.visibility.keyword();
        if !keyword.is_empty() {
            write!(f, "{keyword} ")?;
        }
        write!(f, "({})", self.parameters.iter().join(", "))
    }
}

/// A declared class, interface, enum, record, or annotation type.
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// Containing package, empty for the default package.
    #[builder(default, into)]
    #[serde(default)]
    package:      String,
    /// Simple name as written in the declaration.
    #[builder(into)]
    simple_name:  String,
    /// Dotted simple names of the enclosing types, for nested declarations.
    #[builder(into)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    enclosing:    Option<String>,
    /// Kind of declaration.
    #[builder(default)]
    #[serde(default)]
    kind:         TypeKind,
    /// Access level.
    #[builder(default)]
    #[serde(default)]
    visibility:   Visibility,
    /// Direct superclass, if one is declared or implied.
    #[builder(into)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    superclass:   Option<TypeName>,
    /// Directly implemented (or, for interfaces, extended) interfaces.
    #[builder(default, with = FromIterator::from_iter)]
    #[serde(default)]
    interfaces:   Vec<TypeName>,
    /// Declared fields in declaration order.
    #[builder(default, with = FromIterator::from_iter)]
    #[serde(default)]
    fields:       Vec<FieldDescriptor>,
    /// Declared methods in declaration order.
    #[builder(default, with = FromIterator::from_iter)]
    #[serde(default)]
    methods:      Vec<MethodDescriptor>,
    /// Declared constructors in declaration order.
    #[builder(default, with = FromIterator::from_iter)]
    #[serde(default)]
    constructors: Vec<ConstructorDescriptor>,
}

impl TypeDescriptor {
    /// Containing package, empty for the default package.
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Simple name, eg. `Inner` for `pkg.Outer.Inner`.
    pub fn simple_name(&self) -> &str {
        &self.simple_name
    }

    /// Dotted names of enclosing types, if nested.
    pub fn enclosing(&self) -> Option<&str> {
        self.enclosing.as_deref()
    }

    /// Kind of declaration.
    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Access level.
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Direct superclass, if any.
    pub fn superclass(&self) -> Option<&TypeName> {
        self.superclass.as_ref()
    }

    /// Direct interfaces.
    pub fn interfaces(&self) -> &[TypeName] {
        &self.interfaces
    }

    /// Declared fields.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Declared methods of every visibility.
    pub fn methods(&self) -> &[MethodDescriptor] {
        &self.methods
    }

    /// Declared constructors of every visibility.
    pub fn constructors(&self) -> &[ConstructorDescriptor] {
        &self.constructors
    }

    /// Public constructors only.
    pub fn public_constructors(&self) -> impl Iterator<Item = &ConstructorDescriptor> {
        self.constructors
            .iter()
            .filter(|c| c.visibility == Visibility::Public)
    }

    /// True for interfaces and annotation types.
    pub fn is_interface(&self) -> bool {
        self.kind.is_interface()
    }

    /// Package, enclosing types, and simple name joined with `.`.
    pub fn qualified_name(&self) -> String {
        [
            self.package.as_str(),
            self.enclosing.as_deref().unwrap_or_default(),
            self.simple_name.as_str(),
        ]
        .into_iter()
        .filter(|part| !part.is_empty())
        .join(".")
    }

    /// This type's name as a [`TypeName`].
    pub fn type_name(&self) -> TypeName {
        TypeName::from_parts(&self.qualified_name(), 0)
    }

    /// Superclass followed by interfaces.
    pub fn supertypes(&self) -> impl Iterator<Item = &TypeName> {
        self.superclass.iter().chain(self.interfaces.iter())
    }

    /// Rewrites every type reference in this descriptor with `qualify`.
    pub(crate) fn qualify_with(mut self, qualify: impl Fn(&TypeName) -> TypeName) -> Self {
        self.superclass = self.superclass.as_ref().map(&qualify);
        self.interfaces = self.interfaces.iter().map(&qualify).collect();
        for field in &mut self.fields {
            field.field_type = qualify(&field.field_type);
        }
        for method in &mut self.methods {
            method.return_type = qualify(&method.return_type);
            method.parameters = method.parameters.iter().map(&qualify).collect();
        }
        for constructor in &mut self.constructors {
            constructor.parameters = constructor.parameters.iter().map(&qualify).collect();
        }
        self
    }
}

/// Renders like `class pkg.Name` or `interface pkg.Name`.
impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.qualified_name())
    }
}
