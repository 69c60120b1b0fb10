use std::fmt;

use crate::metadata::typesystem::{CorLibTypeSig, TypeDefOrRef};

/// Represents a parsed type, as described by a reflection type name
#[derive(Debug, Clone, PartialEq)]
pub enum TypeSignature {
    /// Canonical corlib primitive (`System.Int32`, `System.String`, ...)
    CorLib(CorLibTypeSig),
    /// CIL Class
    Class(TypeDefOrRef),
    /// CIL value-type
    ValueType(TypeDefOrRef),
    /// Generic type parameter (`!n`)
    GenericParamType(u32),
    /// Generic method parameter (`!!n`)
    GenericParamMethod(u32),
    /// A pointer to a type
    Ptr(Box<TypeSignature>),
    /// Type by reference
    ByRef(Box<TypeSignature>),
    /// Single dimension array with zero lower bound
    SzArray(Box<TypeSignature>),
    /// Array
    Array(SignatureArray),
    /// Generic type and its arguments
    GenericInst(Box<TypeSignature>, Vec<TypeSignature>),
}

/// A general, possibly multi-dimensional array
#[derive(Debug, Clone, PartialEq)]
pub struct SignatureArray {
    /// The type in the array
    pub base: Box<TypeSignature>,
    /// The number of dimensions
    pub rank: u32,
    /// Sizes of the leading dimensions (can be less than 'rank')
    pub sizes: Vec<u32>,
    /// Lower bounds of the leading dimensions (can be less than 'rank')
    pub lower_bounds: Vec<i32>,
}

impl TypeSignature {
    /// Returns `true` for `Class` and `ValueType` signatures
    #[must_use]
    pub fn is_class_or_value_type(&self) -> bool {
        matches!(self, TypeSignature::Class(_) | TypeSignature::ValueType(_))
    }

    /// The named type this signature denotes, if it is not a composite.
    ///
    /// A canonical primitive yields its corlib reference.
    #[must_use]
    pub fn type_def_or_ref(&self) -> Option<TypeDefOrRef> {
        match self {
            TypeSignature::Class(t) | TypeSignature::ValueType(t) => Some(t.clone()),
            TypeSignature::CorLib(prim) => Some(TypeDefOrRef::TypeRef(prim.type_ref.clone())),
            _ => None,
        }
    }

    /// The signature wrapped by a pointer, by-ref, array or generic instance
    #[must_use]
    pub fn next(&self) -> Option<&TypeSignature> {
        match self {
            TypeSignature::Ptr(inner)
            | TypeSignature::ByRef(inner)
            | TypeSignature::SzArray(inner)
            | TypeSignature::GenericInst(inner, _) => Some(inner),
            TypeSignature::Array(array) => Some(&array.base),
            _ => None,
        }
    }
}

impl fmt::Display for SignatureArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[", self.base)?;

        if self.rank == 1 && self.sizes.is_empty() && self.lower_bounds.is_empty() {
            return write!(f, "*]");
        }

        for dim in 0..self.rank as usize {
            if dim > 0 {
                write!(f, ",")?;
            }

            let lower = self.lower_bounds.get(dim).copied();
            let size = self.sizes.get(dim).copied();
            match (lower, size) {
                (Some(lower), Some(size)) => {
                    write!(f, "{}..{}", lower, i64::from(lower) + i64::from(size) - 1)?;
                }
                (Some(lower), None) => write!(f, "{}...", lower)?,
                (None, Some(size)) => write!(f, "0..{}", i64::from(size) - 1)?,
                (None, None) => {}
            }
        }

        write!(f, "]")
    }
}

impl fmt::Display for TypeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeSignature::CorLib(prim) => write!(f, "{}", prim),
            TypeSignature::Class(t) | TypeSignature::ValueType(t) => write!(f, "{}", t),
            TypeSignature::GenericParamType(index) => write!(f, "!{}", index),
            TypeSignature::GenericParamMethod(index) => write!(f, "!!{}", index),
            TypeSignature::Ptr(inner) => write!(f, "{}*", inner),
            TypeSignature::ByRef(inner) => write!(f, "{}&", inner),
            TypeSignature::SzArray(inner) => write!(f, "{}[]", inner),
            TypeSignature::Array(array) => write!(f, "{}", array),
            TypeSignature::GenericInst(base, args) => {
                write!(f, "{}[", base)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "[{}]", arg)?;
                }
                write!(f, "]")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::metadata::typesystem::{AssemblyRef, ResolutionScope, TypeRef};

    fn class(namespace: &str, name: &str) -> TypeSignature {
        let type_ref = TypeRef::new(namespace, name);
        type_ref.set_resolution_scope(ResolutionScope::AssemblyRef(Arc::new(AssemblyRef::new(
            "Asm",
        ))));
        TypeSignature::Class(TypeDefOrRef::TypeRef(Arc::new(type_ref)))
    }

    #[test]
    fn test_display_suffixes() {
        let base = class("N", "T");

        let sig = TypeSignature::SzArray(Box::new(TypeSignature::Ptr(Box::new(base.clone()))));
        assert_eq!(sig.to_string(), "N.T*[]");

        let sig = TypeSignature::ByRef(Box::new(base));
        assert_eq!(sig.to_string(), "N.T&");
    }

    #[test]
    fn test_display_generic_variables() {
        assert_eq!(TypeSignature::GenericParamType(0).to_string(), "!0");
        assert_eq!(TypeSignature::GenericParamMethod(2).to_string(), "!!2");
    }

    #[test]
    fn test_display_array_dimensions() {
        let array = SignatureArray {
            base: Box::new(class("", "T")),
            rank: 3,
            sizes: vec![10],
            lower_bounds: vec![-1, 5],
        };
        assert_eq!(TypeSignature::Array(array).to_string(), "T[-1..8,5...,]");

        let single = SignatureArray {
            base: Box::new(class("", "T")),
            rank: 1,
            sizes: vec![],
            lower_bounds: vec![],
        };
        assert_eq!(TypeSignature::Array(single).to_string(), "T[*]");
    }

    #[test]
    fn test_display_generic_inst() {
        let sig = TypeSignature::GenericInst(
            Box::new(class("System.Collections.Generic", "Dictionary`2")),
            vec![class("N", "K"), TypeSignature::GenericParamType(1)],
        );
        assert_eq!(
            sig.to_string(),
            "System.Collections.Generic.Dictionary`2[[N.K],[!1]]"
        );
    }

    #[test]
    fn test_next_and_named() {
        let base = class("N", "T");
        let sig = TypeSignature::Ptr(Box::new(base.clone()));

        assert_eq!(sig.next(), Some(&base));
        assert!(sig.type_def_or_ref().is_none());
        assert!(!sig.is_class_or_value_type());
        assert!(base.is_class_or_value_type());
        assert_eq!(base.type_def_or_ref().map(|t| t.full_name()), Some("N.T".to_string()));
    }
}
