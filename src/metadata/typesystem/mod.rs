//! Type system nodes produced by the type name parser.
//!
//! This module holds the named building blocks a [`crate::metadata::signatures::TypeSignature`]
//! refers to, and the destination context that owns them.
//!
//! # Key Components
//!
//! - [`TypeRef`] / [`TypeDef`] / [`TypeDefOrRef`] - Named types, referenced or defined locally
//! - [`ResolutionScope`] - Enclosing type or defining assembly of a [`TypeRef`]
//! - [`AssemblyRef`] - Assembly reference with version, culture, strong name and flags
//! - [`CilPrimitiveKind`] / [`CorLibTypeSig`] - Canonical corlib primitives
//! - [`TypeNameContext`] / [`AssemblyRefFinder`] / [`ModuleContext`] - Destination context
//!
//! # Thread Safety
//!
//! All nodes are shared through [`std::sync::Arc`] and are immutable after registration,
//! except for the write-once resolution scope of a [`TypeRef`].

mod assemblyref;
mod base;
mod context;
mod primitives;

pub use assemblyref::{AssemblyFlags, AssemblyRef, AssemblyRefRc};
pub use base::{
    ResolutionScope, TypeDef, TypeDefFlags, TypeDefOrRef, TypeDefRc, TypeRef, TypeRefRc,
};
pub use context::{AssemblyRefFinder, ModuleContext, TypeNameContext};
pub use primitives::{CilPrimitiveKind, CorLibTypeSig, ELEMENT_TYPE};
