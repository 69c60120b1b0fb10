//! Grammar variants of textual type names.
//!
//! The parser is generic over a [`TypeNameSyntax`], which decides where identifiers end
//! and how nested types are separated. Only the reflection grammar
//! (`Namespace.Outer+Inner[]`) is provided.

/// Identifier terminator and nested-type separator policy of a type name grammar.
pub trait TypeNameSyntax {
    /// Separator between an enclosing type and a nested type
    const NESTED_SEPARATOR: char;

    /// Returns `true` if `c` ends an identifier when it appears unescaped
    fn is_reserved(c: char) -> bool;
}

/// Grammar of `Type.FullName` and `Type.AssemblyQualifiedName`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReflectionSyntax;

impl TypeNameSyntax for ReflectionSyntax {
    const NESTED_SEPARATOR: char = '+';

    fn is_reserved(c: char) -> bool {
        matches!(c, ',' | '+' | '&' | '*' | '[' | ']')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflection_reserved() {
        for c in [',', '+', '&', '*', '[', ']'] {
            assert!(ReflectionSyntax::is_reserved(c));
        }
        for c in ['.', '`', '=', ' ', '\\', 'a', '<'] {
            assert!(!ReflectionSyntax::is_reserved(c));
        }
        assert_eq!(ReflectionSyntax::NESTED_SEPARATOR, '+');
    }
}
