#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// The pieces of a type reference once generic arguments have been erased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRefParts {
    /// Dotted base name, eg. `java.util.List` or `int`.
    pub base:       String,
    /// Number of array dimensions, counting a trailing `...` as one.
    pub dimensions: usize,
}

peg::parser! {
    /// Grammar for Java type references as they appear in source code or on
    /// the command line.
    pub grammar parser() for str {
        /// matches any number of whitespace characters
        rule whitespace() = quiet!{[' ' | '\n' | '\t' | '\r']*}

        /// matches a java identifier
        rule identifier() -> &'input str
            = $(['a'..='z' | 'A'..='Z' | '_' | '$']
                ['a'..='z' | 'A'..='Z' | '0'..='9' | '_' | '$']*)

        /// matches a (possibly nested) generic argument list, which is discarded
        rule type_arguments()
            = "<" (type_arguments() / (!['<' | '>'] [_]))* ">"

        /// matches a type annotation such as `@NonNull` or `@Size(max = 3)`
        rule annotation()
            = "@" (identifier() ++ ".") whitespace()
              ("(" (!")" [_])* ")")? whitespace()

        /// matches one dotted segment, dropping any generic arguments
        rule segment() -> &'input str
            = s:identifier() whitespace() type_arguments()? { s }

        /// matches `[]` pairs following the base name
        rule dimensions() -> usize
            = d:(whitespace() "[" whitespace() "]")* { d.len() }

        /// matches a varargs marker
        rule varargs() -> usize
            = whitespace() "..." { 1 }

        /// parses a complete type reference
        pub rule type_ref() -> TypeRefParts
            = whitespace()
              annotation()*
              segments:(segment() ++ (whitespace() "." whitespace()))
              d:dimensions()
              v:varargs()?
              whitespace()
            {
                TypeRefParts {
                    base:       segments.join("."),
                    dimensions: d + v.unwrap_or(0),
                }
            }
    }
}

#[cfg(test)]
mod tests {
    use super::parser;

    #[test]
    fn erases_generic_arguments() {
        let parts = parser::type_ref("Map<String, List<Integer>>").unwrap();
        assert_eq!(parts.base, "Map");
        assert_eq!(parts.dimensions, 0);
    }

    #[test]
    fn counts_array_and_varargs_dimensions() {
        assert_eq!(parser::type_ref("int[][]").unwrap().dimensions, 2);
        assert_eq!(parser::type_ref("String...").unwrap().dimensions, 1);
        assert_eq!(parser::type_ref("String[] ...").unwrap().dimensions, 2);
    }

    #[test]
    fn keeps_qualified_and_nested_segments() {
        let parts = parser::type_ref("java.util.Map.Entry<K, V>").unwrap();
        assert_eq!(parts.base, "java.util.Map.Entry");

        let parts = parser::type_ref("Outer<String>.Inner").unwrap();
        assert_eq!(parts.base, "Outer.Inner");
    }

    #[test]
    fn skips_type_annotations() {
        let parts = parser::type_ref("@NonNull String").unwrap();
        assert_eq!(parts.base, "String");
    }

    #[test]
    fn rejects_garbage() {
        assert!(parser::type_ref("").is_err());
        assert!(parser::type_ref("123abc").is_err());
        assert!(parser::type_ref("List<").is_err());
    }
}
