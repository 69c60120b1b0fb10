//! Assembly identity for .NET reflection names.
//!
//! This module holds the pieces of an assembly identity that appear in an
//! assembly-qualified type name: simple name, version, culture and strong name.
//!
//! # ECMA-335 References
//!
//! - **Section II.6.3**: Referencing assemblies - defines assembly reference format
//! - **Section II.22.5**: AssemblyRef table - defines assembly reference structure
//! - **Section II.6.2.1.3**: PublicKeyToken - defines public key token computation
//!
//! See: <https://ecma-international.org/publications-and-standards/standards/ecma-335/>
//!
//! # Module Structure
//!
//! - [`assembly`] - Assembly identity with name, version, culture, and strong name
//! - [`cryptographic`] - Public keys, public key tokens and token derivation
//!
//! # Thread Safety
//!
//! All types in this module are plain owned data and are [`Send`] and [`Sync`].

pub use assembly::{AssemblyIdentity, AssemblyVersion};
pub(crate) use assembly::format_full_name;
pub use cryptographic::{AssemblyHashAlgorithm, Identity};

pub mod assembly;
pub mod cryptographic;
