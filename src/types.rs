use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    constants::{JAVA_LANG_OBJECT, PRIMITIVE_TYPES, VOID},
    parsers::parser,
};

/// An erased, textual reference to a type: `java.lang.String`, `int`,
/// `int[]`, or `void`.
///
/// Two names are equal iff their erased text is equal. Generic arguments are
/// dropped when a name is parsed and varargs become one array dimension.
/// Deserialized names go through the same erasure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct TypeName(String);

/// Raised when text cannot be read as a type reference.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("`{text}` is not a valid type reference: {reason}")]
pub struct TypeNameError {
    /// The offending text.
    text:   String,
    /// What the grammar expected.
    reason: String,
}

impl TypeName {
    /// Parses `text` as a type reference, erasing generics and normalizing
    /// whitespace.
    pub fn parse(text: &str) -> Result<Self, TypeNameError> {
        let parts = parser::type_ref(text).map_err(|e| TypeNameError {
            text:   text.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self::from_parts(&parts.base, parts.dimensions))
    }

    /// Builds a name from a base and a number of array dimensions.
    pub fn from_parts(base: &str, dimensions: usize) -> Self {
        Self(format!("{base}{}", "[]".repeat(dimensions)))
    }

    /// The `void` pseudo-type, used as a return type.
    pub fn void() -> Self {
        Self(VOID.to_string())
    }

    /// `java.lang.Object`, to which every reference type is assignable.
    pub fn object() -> Self {
        Self(JAVA_LANG_OBJECT.to_string())
    }

    /// The erased text of this name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The name without any trailing array dimensions.
    pub fn base(&self) -> &str {
        self.0.trim_end_matches("[]")
    }

    /// Number of array dimensions.
    pub fn dimensions(&self) -> usize {
        (self.0.len() - self.base().len()) / 2
    }

    /// Last dotted segment of the base name plus its dimensions, eg.
    /// `String[]` for `java.lang.String[]`.
    pub fn simple_name(&self) -> String {
        let base = self.base();
        let simple = base.rsplit('.').next().unwrap_or(base);
        format!("{simple}{}", "[]".repeat(self.dimensions()))
    }

    /// Returns a copy of this name with its base replaced, keeping dimensions.
    pub fn with_base(&self, base: &str) -> Self {
        Self::from_parts(base, self.dimensions())
    }

    /// True for `int`, `boolean`, and the other primitive types (not arrays
    /// of them).
    pub fn is_primitive(&self) -> bool {
        self.dimensions() == 0 && PRIMITIVE_TYPES.contains(&self.0.as_str())
    }

    /// True for `void`.
    pub fn is_void(&self) -> bool {
        self.0 == VOID
    }

    /// True if nothing but whitespace was supplied.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

/// Lenient conversion: text that does not parse is kept verbatim (trimmed),
/// so blank input stays detectable with [`TypeName::is_blank`].
impl From<&str> for TypeName {
    fn from(text: &str) -> Self {
        Self::parse(text).unwrap_or_else(|_| Self(text.trim().to_string()))
    }
}

impl From<String> for TypeName {
    fn from(text: String) -> Self {
        Self::from(text.as_str())
    }
}

impl From<TypeName> for String {
    fn from(name: TypeName) -> Self {
        name.0
    }
}

impl From<&TypeName> for TypeName {
    fn from(name: &TypeName) -> Self {
        name.clone()
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Access level of a type or member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// `public`
    #[default]
    Public,
    /// `protected`
    Protected,
    /// no modifier
    Package,
    /// `private`
    Private,
}

impl Visibility {
    /// Java keyword for this visibility, empty for package-private.
    pub fn keyword(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Package => "",
            Visibility::Private => "private",
        }
    }
}

/// What sort of declaration a type descriptor stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    /// - Class
    #[default]
    Class,
    /// - Interface
    Interface,
    /// - Enum
    Enum,
    /// - Record
    Record,
    /// - Annotation type
    Annotation,
}

impl TypeKind {
    /// True for interfaces and annotation types.
    pub fn is_interface(&self) -> bool {
        matches!(self, TypeKind::Interface | TypeKind::Annotation)
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TypeKind::Class => "class",
            TypeKind::Interface => "interface",
            TypeKind::Enum => "enum",
            TypeKind::Record => "record",
            TypeKind::Annotation => "annotation",
        };
        f.write_str(name)
    }
}
