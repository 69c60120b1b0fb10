//! # cilname Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the cilname library. Import this module to get quick access to the parser entry
//! points, the destination context and the nodes a parse produces.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all cilname operations
pub use crate::Error;

/// Category of an error
pub use crate::ErrorKind;

/// The result type used throughout cilname
pub use crate::Result;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// Parse functions for type names and assembly names
pub use crate::metadata::typename::{
    parse_assembly_ref, parse_type_ref, parse_type_signature, try_parse_assembly_ref,
    try_parse_type_ref, try_parse_type_signature,
};

/// Parser configuration limits
pub use crate::metadata::typename::{MAX_ARRAY_SIZE, MAX_RECURSION_DEPTH, MAX_TYPE_NAME_LENGTH};

// ================================================================================================
// Destination Context
// ================================================================================================

/// Registration and resolution hooks, and the in-memory module implementing them
pub use crate::metadata::typesystem::{AssemblyRefFinder, ModuleContext, TypeNameContext};

// ================================================================================================
// Type System
// ================================================================================================

/// Named types and their scopes
pub use crate::metadata::typesystem::{
    ResolutionScope, TypeDef, TypeDefFlags, TypeDefOrRef, TypeDefRc, TypeRef, TypeRefRc,
};

/// Assembly references
pub use crate::metadata::typesystem::{AssemblyFlags, AssemblyRef, AssemblyRefRc};

/// Canonical corlib primitives
pub use crate::metadata::typesystem::{CilPrimitiveKind, CorLibTypeSig};

// ================================================================================================
// Signatures
// ================================================================================================

/// Type signature trees
pub use crate::metadata::signatures::{SignatureArray, TypeSignature};

// ================================================================================================
// Identity and Tokens
// ================================================================================================

/// Assembly identity, version and strong name data
pub use crate::metadata::identity::{AssemblyIdentity, AssemblyVersion, Identity};

/// Metadata token type for referencing registered nodes
pub use crate::metadata::token::Token;
