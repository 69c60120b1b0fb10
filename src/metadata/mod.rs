//! Type name parsing and the metadata nodes it produces.
//!
//! This module contains everything needed to turn a reflection type name into CIL type
//! signatures: the parser itself, the `TypeRef` / `AssemblyRef` nodes it registers, the
//! signature trees it returns and the assembly identities that qualify them.
//!
//! # Key Components
//!
//! - [`typename`] - Recursive descent parser for type and assembly names
//! - [`typesystem`] - Type references, local definitions and destination contexts
//! - [`signatures`] - `TypeSignature` trees
//! - [`identity`] - Assembly identities, versions and strong name keys
//! - [`token`] - Metadata table row references assigned to registered nodes
//!
//! # Examples
//!
//! ```rust
//! use cilname::metadata::{
//!     identity::{AssemblyIdentity, AssemblyVersion},
//!     signatures::TypeSignature,
//!     typename::parse_type_signature,
//!     typesystem::{ModuleContext, TypeDefFlags},
//! };
//!
//! let context = ModuleContext::new("App.exe").with_assembly(AssemblyIdentity::new(
//!     "App",
//!     AssemblyVersion::new(1, 0, 0, 0),
//!     None,
//!     None,
//! ));
//! context.define_type("App", "Point", TypeDefFlags::VALUE_TYPE);
//!
//! let sig = parse_type_signature(&context, "App.Point*", None)?;
//! match sig {
//!     TypeSignature::Ptr(inner) => assert!(matches!(*inner, TypeSignature::ValueType(_))),
//!     _ => unreachable!(),
//! }
//! # Ok::<(), cilname::Error>(())
//! ```

/// Implementation of assembly identities and strong name keys
pub mod identity;
/// Implementation of the type signatures produced by the parser
pub mod signatures;
/// Commonly used metadata token type
pub mod token;
/// Implementation of the reflection type name parser
pub mod typename;
/// Implementation of type references, definitions and destination contexts
pub mod typesystem;
