//! Parsing of reflection type names and assembly names.
//!
//! This module converts the textual names produced by `Type.FullName` and
//! `Type.AssemblyQualifiedName` into [`TypeSignature`] trees, registering every referenced
//! type and assembly with a destination [`TypeNameContext`].
//!
//! # Architecture
//!
//! - [`scanner`] - Forward-only character cursor
//! - [`lexer`] - Identifiers, escapes and checked decimal integers
//! - [`syntax`] - Identifier terminators and nested separator of a grammar
//! - [`parser`] - Recursive descent over the grammar, bounded by a [`guard::RecursionGuard`]
//! - [`builder`] - Folds type suffixes onto the named base type
//!
//! # Entry Points
//!
//! | Function | Result |
//! |----------|--------|
//! | [`parse_type_signature`] | Full signature, including arrays, pointers and generic instances |
//! | [`parse_type_ref`] | Named type only; composites are rejected |
//! | [`parse_assembly_ref`] | Assembly display name, without a context |
//!
//! Each has a `try_` twin that returns `None` instead of an error.
//!
//! # Examples
//!
//! ```rust
//! use cilname::prelude::*;
//!
//! let context = ModuleContext::new("App.exe");
//! let sig = parse_type_signature(
//!     &context,
//!     "System.Collections.Generic.List`1[[System.Int32, mscorlib]], mscorlib",
//!     Some(&context),
//! )?;
//!
//! match sig {
//!     TypeSignature::GenericInst(base, args) => {
//!         assert_eq!(base.to_string(), "System.Collections.Generic.List`1");
//!         assert!(matches!(args[0], TypeSignature::CorLib(_)));
//!     }
//!     _ => unreachable!(),
//! }
//! # Ok::<(), cilname::Error>(())
//! ```

use log::debug;

use crate::{
    metadata::{
        signatures::TypeSignature,
        typesystem::{AssemblyRef, AssemblyRefFinder, TypeDefOrRef, TypeNameContext},
    },
    Result,
};

pub mod builder;
pub mod guard;
pub mod lexer;
pub mod parser;
pub mod scanner;
pub mod syntax;

pub use builder::{TypeSignatureBuilder, TypeSpecifier};
pub use guard::{RecursionGuard, MAX_RECURSION_DEPTH};
pub use lexer::LexicalReader;
pub use parser::{TypeNameParser, MAX_ARRAY_SIZE, MAX_TYPE_NAME_LENGTH};
pub use scanner::Scanner;
pub use syntax::{ReflectionSyntax, TypeNameSyntax};

/// Parses `full_name` into a type signature.
///
/// ## Arguments
/// * `context` - Destination context that registers the referenced types and assemblies
/// * `full_name` - Reflection type name, optionally assembly-qualified
/// * `finder` - Supplies assemblies for names without an assembly qualifier
///
/// # Errors
/// Returns an error if `full_name` is not a valid type name; see [`crate::ErrorKind`].
pub fn parse_type_signature<C: TypeNameContext + ?Sized>(
    context: &C,
    full_name: &str,
    finder: Option<&dyn AssemblyRefFinder>,
) -> Result<TypeSignature> {
    TypeNameParser::<C, ReflectionSyntax>::new(context, full_name, finder)?.parse_signature()
}

/// Like [`parse_type_signature`], but returns `None` on failure
pub fn try_parse_type_signature<C: TypeNameContext + ?Sized>(
    context: &C,
    full_name: &str,
    finder: Option<&dyn AssemblyRefFinder>,
) -> Option<TypeSignature> {
    parse_type_signature(context, full_name, finder)
        .map_err(|e| debug!("Failed to parse type name '{}': {}", full_name, e))
        .ok()
}

/// Parses `full_name` into the named type it denotes.
///
/// A canonical primitive yields its corlib reference; a local definition yields the
/// definition.
///
/// # Errors
/// Returns [`crate::Error::UnsupportedConstruct`] if `full_name` describes an array, pointer,
/// by-ref, generic instance or generic variable, and any error of [`parse_type_signature`].
pub fn parse_type_ref<C: TypeNameContext + ?Sized>(
    context: &C,
    full_name: &str,
    finder: Option<&dyn AssemblyRefFinder>,
) -> Result<TypeDefOrRef> {
    TypeNameParser::<C, ReflectionSyntax>::new(context, full_name, finder)?.parse_type_ref()
}

/// Like [`parse_type_ref`], but returns `None` on failure
pub fn try_parse_type_ref<C: TypeNameContext + ?Sized>(
    context: &C,
    full_name: &str,
    finder: Option<&dyn AssemblyRefFinder>,
) -> Option<TypeDefOrRef> {
    parse_type_ref(context, full_name, finder)
        .map_err(|e| debug!("Failed to parse type name '{}': {}", full_name, e))
        .ok()
}

/// Parses an assembly display name such as
/// `"mscorlib, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089"`.
///
/// The result is not registered anywhere and keeps a null token.
///
/// # Errors
/// Returns an error if the name is empty, a key has an invalid value, or input remains after
/// the last key.
pub fn parse_assembly_ref(full_name: &str) -> Result<AssemblyRef> {
    if full_name.len() > MAX_TYPE_NAME_LENGTH {
        return Err(malformed_error!(
            "Assembly name too long - {} bytes",
            full_name.len()
        ));
    }

    let mut lexer = LexicalReader::<ReflectionSyntax>::new(full_name);
    let assembly = parser::read_assembly_ref(&mut lexer)?;
    parser::expect_end(&mut lexer)?;
    Ok(assembly)
}

/// Like [`parse_assembly_ref`], but returns `None` on failure
pub fn try_parse_assembly_ref(full_name: &str) -> Option<AssemblyRef> {
    parse_assembly_ref(full_name)
        .map_err(|e| debug!("Failed to parse assembly name '{}': {}", full_name, e))
        .ok()
}
