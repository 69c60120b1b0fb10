//! Type signatures produced from reflection type names.
//!
//! A [`TypeSignature`] is an immutable tree: named leaves (canonical primitives, class and
//! value type references, generic variables) wrapped by pointer, by-ref, array and generic
//! instantiation nodes. The outermost node is the last suffix of the textual name, so
//! `N.T*[]` is an SZ array of pointers to `N.T`.
//!
//! # Example
//!
//! ```rust
//! use cilname::prelude::*;
//!
//! let context = ModuleContext::new("Demo.dll");
//! let sig = parse_type_signature(&context, "N.T*[]", None)?;
//!
//! match &sig {
//!     TypeSignature::SzArray(inner) => assert!(matches!(**inner, TypeSignature::Ptr(_))),
//!     _ => unreachable!(),
//! }
//! assert_eq!(sig.to_string(), "N.T*[]");
//! # Ok::<(), cilname::Error>(())
//! ```

mod types;

pub use types::*;
