#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Largest argument-type list accepted by `with_exact_arg_types`; keeps the
/// permutation search at or below 8! orderings.
pub const MAX_ARGUMENTS: usize = 8;

/// Method names injected by coverage instrumentation; never reported as
/// matches.
pub const SYNTHETIC_METHOD_NAMES: &[&str] = &["$jacocoInit"];

/// Fully qualified name of the root of the class hierarchy.
pub const JAVA_LANG_OBJECT: &str = "java.lang.Object";

/// Implicit superclass of every enum.
pub const JAVA_LANG_ENUM: &str = "java.lang.Enum";

/// Implicit superclass of every record.
pub const JAVA_LANG_RECORD: &str = "java.lang.Record";

/// Pseudo-type used for methods that return nothing.
pub const VOID: &str = "void";

/// The eight primitive types.
pub const PRIMITIVE_TYPES: &[&str] =
    &["boolean", "byte", "char", "short", "int", "long", "float", "double"];

/// Simple names resolved against `java.lang` when nothing else claims them.
pub const JAVA_LANG_TYPES: &[&str] = &[
    "Object",
    "String",
    "StringBuilder",
    "StringBuffer",
    "CharSequence",
    "Boolean",
    "Byte",
    "Character",
    "Short",
    "Integer",
    "Long",
    "Float",
    "Double",
    "Number",
    "Math",
    "Enum",
    "Record",
    "Class",
    "Comparable",
    "Iterable",
    "Runnable",
    "AutoCloseable",
    "Cloneable",
    "Thread",
    "Void",
    "System",
    "Throwable",
    "Exception",
    "Error",
    "RuntimeException",
    "IllegalArgumentException",
    "IllegalStateException",
    "IndexOutOfBoundsException",
    "NullPointerException",
    "UnsupportedOperationException",
    "Override",
    "Deprecated",
    "FunctionalInterface",
    "SuppressWarnings",
];

/// Default number of directory levels the Java loader descends.
pub const DEFAULT_SCAN_DEPTH: i8 = 15;

/// Environment variable holding extra comma-separated synthetic method names.
pub const EXCLUDED_METHODS_ENV: &str = "INTROSPECT_EXCLUDED_METHODS";

/// Environment variable overriding [`DEFAULT_SCAN_DEPTH`].
pub const SCAN_DEPTH_ENV: &str = "INTROSPECT_SCAN_DEPTH";

/// Tree-sitter query that returns imports made
/// * `import`: the whole declaration, eg. `import static a.B.*;`
pub const IMPORT_QUERY: &str = include_str!("java/queries/import.scm");

/// Tree-sitter query that returns name of the package
/// * `name`: name of the package
pub const PACKAGE_QUERY: &str = include_str!("java/queries/package.scm");

/// Public methods every class inherits from `java.lang.Object`.
pub const OBJECT_METHOD_NAMES: &[&str] =
    &["equals", "hashCode", "toString", "getClass", "notify", "notifyAll", "wait"];
