//! Application of type suffixes (`[]`, `[,]`, `[[A]]`, `&`, `*`) to a parsed base type.
//!
//! Suffixes are collected while reading and applied afterwards, first suffix innermost.

use crate::{
    metadata::signatures::{SignatureArray, TypeSignature},
    Error, Result,
};

/// A type suffix read after a type name, waiting to be applied to it
#[derive(Debug, Clone, PartialEq)]
pub enum TypeSpecifier {
    /// `[]`
    SzArray,
    /// `[,]`, `[*]`, `[0..9]`, `[-1...]` ...
    Array {
        /// Number of dimensions, at least 1
        rank: u32,
        /// Sizes of the leading dimensions
        sizes: Vec<u32>,
        /// Lower bounds of the leading dimensions
        lower_bounds: Vec<i32>,
    },
    /// `[[A],[B]]` or `[A,B]`
    GenericInst(Vec<TypeSignature>),
    /// `&`
    ByRef,
    /// `*`
    Pointer,
}

/// Applies type suffixes to a base signature
pub struct TypeSignatureBuilder;

impl TypeSignatureBuilder {
    /// Wraps `base` in `specs`, first suffix innermost.
    ///
    /// `N.T*[]` therefore yields an SZ array of pointers to `N.T`.
    ///
    /// # Errors
    /// Returns [`Error::UnsupportedConstruct`] if a generic instantiation is applied to
    /// something other than a class or value type.
    pub fn fold(base: TypeSignature, specs: Vec<TypeSpecifier>) -> Result<TypeSignature> {
        specs.into_iter().try_fold(base, Self::apply)
    }

    /// Wraps `signature` in a single suffix
    ///
    /// # Errors
    /// See [`TypeSignatureBuilder::fold`].
    pub fn apply(signature: TypeSignature, spec: TypeSpecifier) -> Result<TypeSignature> {
        Ok(match spec {
            TypeSpecifier::SzArray => TypeSignature::SzArray(Box::new(signature)),
            TypeSpecifier::Array {
                rank,
                sizes,
                lower_bounds,
            } => TypeSignature::Array(SignatureArray {
                base: Box::new(signature),
                rank,
                sizes,
                lower_bounds,
            }),
            TypeSpecifier::GenericInst(args) => {
                if !signature.is_class_or_value_type() {
                    return Err(Error::UnsupportedConstruct(format!(
                        "Generic instantiation of '{}'",
                        signature
                    )));
                }
                TypeSignature::GenericInst(Box::new(signature), args)
            }
            TypeSpecifier::ByRef => TypeSignature::ByRef(Box::new(signature)),
            TypeSpecifier::Pointer => TypeSignature::Ptr(Box::new(signature)),
        })
    }
}
