// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # cilname
//!
//! [![Crates.io](https://img.shields.io/crates/v/cilname.svg)](https://crates.io/crates/cilname)
//! [![Documentation](https://docs.rs/cilname/badge.svg)](https://docs.rs/cilname)
//! [![License](https://img.shields.io/badge/license-Apache--2.0-blue.svg)](https://github.com/BinFlip/cilname/blob/main/LICENSE-APACHE)
//!
//! Parser for .NET reflection type names. `cilname` turns strings such as
//! ``System.Collections.Generic.Dictionary`2[[System.String, mscorlib],[MyApp.Item, MyApp]]``
//! into CIL type signatures, creating the `TypeRef` and `AssemblyRef` nodes they reference
//! in a destination module.
//!
//! ## Features
//!
//! - **Full reflection grammar** - Nested types, generic instances, generic variables,
//!   SZ and multi-dimensional arrays, pointers, by-refs and escaped identifiers
//! - **Assembly display names** - `Version`, `Culture`, `PublicKey`, `PublicKeyToken`,
//!   `Retargetable` and `ContentType` keys
//! - **Canonical primitives** - `System.Int32, mscorlib` resolves to the module's corlib type
//! - **Local definitions** - Names of types defined by the module resolve to their `TypeDef`
//! - **Bounded** - Recursion depth, input length and integer literals are all checked, so
//!   hostile input fails with an error instead of exhausting the stack
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! cilname = "0.1"
//! ```
//!
//! ### Using the Prelude
//!
//! ```rust
//! use cilname::prelude::*;
//!
//! let context = ModuleContext::new("App.exe");
//! let sig = parse_type_signature(&context, "MyApp.Outer+Inner[], MyApp", None)?;
//!
//! match sig {
//!     TypeSignature::SzArray(element) => {
//!         let inner = element.type_def_or_ref().unwrap();
//!         assert_eq!(inner.name(), "Inner");
//!     }
//!     _ => unreachable!(),
//! }
//! # Ok::<(), cilname::Error>(())
//! ```
//!
//! ### Assembly Names
//!
//! ```rust
//! use cilname::metadata::typename::parse_assembly_ref;
//!
//! let asm = parse_assembly_ref(
//!     "mscorlib, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089",
//! )?;
//! assert_eq!(asm.version.to_string(), "4.0.0.0");
//! assert!(asm.culture.is_none());
//! # Ok::<(), cilname::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`metadata::typename`] - Scanner, lexer and recursive descent parser
//! - [`metadata::typesystem`] - `TypeRef`, `TypeDef`, `AssemblyRef` and destination contexts
//! - [`metadata::signatures`] - The `TypeSignature` trees produced by the parser
//! - [`metadata::identity`] - Assembly identities, versions and strong name keys
//! - [`metadata::token`] - Metadata tokens assigned to registered nodes
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T>`]. A rejected name is reported once, with an
//! [`ErrorKind`] describing the category; the `try_*` entry points log the error and return
//! `None` instead.
//!
//! ## Development and Testing
//!
//! ### Fuzzing
//!
//! ```bash
//! cargo +nightly fuzz run typename --release
//! ```
//!
//! ### Testing
//!
//! ```bash
//! cargo test
//! cargo bench
//! ```
#[macro_use]
pub(crate) mod error;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use cilname::prelude::*;
///
/// let context = ModuleContext::new("App.exe");
/// let type_ref = parse_type_ref(&context, "System.String", Some(&context))?;
/// assert_eq!(type_ref.full_name(), "System.String");
/// # Ok::<(), cilname::Error>(())
/// ```
pub mod prelude;

/// Type names, type references, assembly identities and signatures.
///
/// # Example
///
/// ```rust
/// use cilname::metadata::{typename::parse_type_signature, typesystem::ModuleContext};
///
/// let context = ModuleContext::new("App.exe");
/// let sig = parse_type_signature(&context, "!!0&", None)?;
/// assert_eq!(sig.to_string(), "!!0&");
/// # Ok::<(), cilname::Error>(())
/// ```
pub mod metadata;

/// `cilname` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `cilname` Error type
///
/// # Examples
///
/// ```rust
/// use cilname::{metadata::typename::parse_assembly_ref, Error};
///
/// match parse_assembly_ref("Asm, PublicKeyToken=abc") {
///     Ok(asm) => println!("Parsed {}", asm.name),
///     Err(Error::Malformed { message, .. }) => println!("Malformed: {}", message),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
pub use error::Error;

/// Category of an [`Error`]
pub use error::ErrorKind;
