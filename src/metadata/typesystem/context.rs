//! Destination contexts for parsed type names.
//!
//! The parser never creates metadata rows on its own. Every `TypeRef` and `AssemblyRef` it
//! builds is handed to a [`TypeNameContext`], which assigns row ids and tokens and may
//! substitute canonical primitives or local definitions. [`ModuleContext`] is the in-memory
//! reference implementation, backed by lock-free maps so that several parsers can target the
//! same module from different threads.
//!
//! # Key Components
//!
//! - [`TypeNameContext`] - Registration and resolution hooks used by the parser
//! - [`AssemblyRefFinder`] - Supplies an assembly for unqualified type names
//! - [`ModuleContext`] - Concrete module with corlib primitives and local type definitions
//!
//! # Examples
//!
//! ```rust
//! use cilname::prelude::*;
//!
//! let context = ModuleContext::new("App.exe");
//! let sig = parse_type_signature(&context, "System.Int32", Some(&context))?;
//! assert!(matches!(sig, TypeSignature::CorLib(ref p) if p.kind == CilPrimitiveKind::I4));
//! # Ok::<(), cilname::Error>(())
//! ```

use std::sync::{
    atomic::{AtomicU32, Ordering},
    Arc, OnceLock,
};

use crossbeam_skiplist::SkipMap;
use dashmap::DashMap;
use strum::IntoEnumIterator;

use crate::metadata::{
    identity::{AssemblyIdentity, AssemblyVersion, Identity},
    signatures::TypeSignature,
    token::Token,
    typesystem::{
        base::scoped_type_ref, AssemblyRef, AssemblyRefRc, CilPrimitiveKind, CorLibTypeSig,
        TypeDef, TypeDefFlags, TypeDefRc, TypeRef, TypeRefRc,
    },
};

/// Assembly names that always denote a core library
const CORLIB_NAMES: [&str; 4] = [
    "mscorlib",
    "System.Private.CoreLib",
    "System.Runtime",
    "netstandard",
];

/// Supplies the defining assembly of a type name that has no assembly qualifier.
///
/// Called with the outermost type of a nested chain. Any closure of the matching signature
/// is a finder.
///
/// ```rust
/// use std::sync::Arc;
/// use cilname::prelude::*;
///
/// let system = Arc::new(AssemblyRef::new("System"));
/// let finder = move |t: &TypeRef| (t.namespace == "System.Net").then(|| system.clone());
///
/// let context = ModuleContext::new("App.exe");
/// let sig = parse_type_signature(&context, "System.Net.WebClient", Some(&finder))?;
/// let named = sig.type_def_or_ref().unwrap();
/// let type_ref = named.as_type_ref().unwrap();
/// assert_eq!(type_ref.defining_assembly().unwrap().name, "System");
/// # Ok::<(), cilname::Error>(())
/// ```
pub trait AssemblyRefFinder {
    /// Returns the assembly defining `non_nested`, or `None` if unknown
    fn find_assembly_ref(&self, non_nested: &TypeRef) -> Option<AssemblyRefRc>;
}

impl<F> AssemblyRefFinder for F
where
    F: Fn(&TypeRef) -> Option<AssemblyRefRc>,
{
    fn find_assembly_ref(&self, non_nested: &TypeRef) -> Option<AssemblyRefRc> {
        self(non_nested)
    }
}

/// The module a type name is parsed into.
pub trait TypeNameContext {
    /// Identity of the assembly owning this module, if it has one
    fn assembly(&self) -> Option<&AssemblyIdentity>;

    /// Returns the canonical signature for `namespace.name` if `assembly` is a core library
    /// and the name is one of its primitives.
    fn resolve_canonical_primitive(
        &self,
        namespace: &str,
        name: &str,
        assembly: &AssemblyRef,
    ) -> Option<TypeSignature>;

    /// Returns the local definition `type_ref` denotes, if `assembly` is this module's
    /// assembly and the type (including its nesting) is defined here.
    fn resolve_local_definition(
        &self,
        assembly: &AssemblyRef,
        type_ref: &TypeRef,
    ) -> Option<TypeDefRc>;

    /// Assigns a row id and token to `type_ref` and takes ownership of it
    fn register_type_ref(&self, type_ref: TypeRef) -> TypeRefRc;

    /// Assigns a row id and token to `assembly_ref` and takes ownership of it
    fn register_assembly_ref(&self, assembly_ref: AssemblyRef) -> AssemblyRefRc;
}

/// In-memory module that parsed type names are registered with.
///
/// Holds the canonical corlib primitives, the types defined by the module and every
/// `TypeRef` / `AssemblyRef` registered by parsers. Nodes built by a parse that later failed
/// stay registered.
pub struct ModuleContext {
    /// Module name, e.g. `App.exe`
    name: String,
    /// Identity of the owning assembly
    assembly: Option<AssemblyIdentity>,
    /// Identity of the core library primitives resolve into
    corlib_identity: AssemblyIdentity,
    /// Registered corlib reference, created on first use
    corlib: OnceLock<AssemblyRefRc>,
    /// Canonical primitives indexed by `CilPrimitiveKind`, created on first use
    corlib_types: OnceLock<Vec<CorLibTypeSig>>,
    type_refs: SkipMap<Token, TypeRefRc>,
    type_defs: SkipMap<Token, TypeDefRc>,
    assembly_refs: SkipMap<Token, AssemblyRefRc>,
    type_defs_by_fullname: DashMap<String, Token>,
    next_type_ref: AtomicU32,
    next_type_def: AtomicU32,
    next_assembly_ref: AtomicU32,
}

impl ModuleContext {
    /// Create a module without an assembly, referencing `mscorlib 4.0.0.0` as corlib
    pub fn new(name: impl Into<String>) -> Self {
        ModuleContext {
            name: name.into(),
            assembly: None,
            corlib_identity: AssemblyIdentity::new(
                "mscorlib",
                AssemblyVersion::new(4, 0, 0, 0),
                None,
                Some(Identity::Token(vec![
                    0xb7, 0x7a, 0x5c, 0x56, 0x19, 0x34, 0xe0, 0x89,
                ])),
            ),
            corlib: OnceLock::new(),
            corlib_types: OnceLock::new(),
            type_refs: SkipMap::new(),
            type_defs: SkipMap::new(),
            assembly_refs: SkipMap::new(),
            type_defs_by_fullname: DashMap::new(),
            next_type_ref: AtomicU32::new(1),
            next_type_def: AtomicU32::new(1),
            next_assembly_ref: AtomicU32::new(1),
        }
    }

    /// Set the identity of the assembly owning this module
    #[must_use]
    pub fn with_assembly(mut self, identity: AssemblyIdentity) -> Self {
        self.assembly = Some(identity);
        self
    }

    /// Set the core library that canonical primitives are resolved into
    #[must_use]
    pub fn with_corlib(mut self, identity: AssemblyIdentity) -> Self {
        self.corlib_identity = identity;
        self.corlib = OnceLock::new();
        self.corlib_types = OnceLock::new();
        self
    }

    /// Name of the module
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` if this module belongs to its own core library
    pub fn is_corlib(&self) -> bool {
        self.assembly
            .as_ref()
            .is_some_and(|asm| asm.name.eq_ignore_ascii_case(&self.corlib_identity.name))
    }

    /// The registered reference to the core library
    pub fn corlib(&self) -> AssemblyRefRc {
        self.corlib
            .get_or_init(|| {
                self.register_assembly_ref(AssemblyRef::from_identity(&self.corlib_identity))
            })
            .clone()
    }

    /// The canonical signature of `kind`
    pub fn corlib_type(&self, kind: CilPrimitiveKind) -> CorLibTypeSig {
        self.corlib_types()[kind as usize].clone()
    }

    fn corlib_types(&self) -> &[CorLibTypeSig] {
        self.corlib_types.get_or_init(|| {
            let corlib = self.corlib();
            CilPrimitiveKind::iter()
                .map(|kind| CorLibTypeSig {
                    kind,
                    type_ref: self.register_type_ref(scoped_type_ref(
                        kind.namespace(),
                        kind.name(),
                        corlib.clone(),
                    )),
                })
                .collect()
        })
    }

    /// Define a top-level type in this module
    pub fn define_type(
        &self,
        namespace: impl Into<String>,
        name: impl Into<String>,
        flags: TypeDefFlags,
    ) -> TypeDefRc {
        self.insert_type_def(namespace.into(), name.into(), flags, None)
    }

    /// Define a type nested in `declaring_type`
    pub fn define_nested_type(
        &self,
        declaring_type: &TypeDefRc,
        name: impl Into<String>,
        flags: TypeDefFlags,
    ) -> TypeDefRc {
        self.insert_type_def(
            String::new(),
            name.into(),
            flags,
            Some(declaring_type.clone()),
        )
    }

    fn insert_type_def(
        &self,
        namespace: String,
        name: String,
        flags: TypeDefFlags,
        declaring_type: Option<TypeDefRc>,
    ) -> TypeDefRc {
        let rid = self.next_type_def.fetch_add(1, Ordering::Relaxed);
        let token = Token::from_parts(Token::TYPE_DEF, rid);

        let type_def = Arc::new(TypeDef {
            rid,
            token,
            namespace,
            name,
            flags,
            declaring_type,
        });

        self.type_defs.insert(token, type_def.clone());
        // A later definition with the same full name shadows the earlier one in lookups
        self.type_defs_by_fullname
            .insert(type_def.full_name(), token);

        type_def
    }

    /// Look up a local definition by its metadata full name (`N.Outer/Inner`)
    pub fn find_type_def(&self, full_name: &str) -> Option<TypeDefRc> {
        let token = *self.type_defs_by_fullname.get(full_name)?;
        self.type_def(token)
    }

    /// Get a local definition by token
    pub fn type_def(&self, token: Token) -> Option<TypeDefRc> {
        self.type_defs.get(&token).map(|entry| entry.value().clone())
    }

    /// Get a registered type reference by token
    pub fn type_ref(&self, token: Token) -> Option<TypeRefRc> {
        self.type_refs.get(&token).map(|entry| entry.value().clone())
    }

    /// Get a registered assembly reference by token
    pub fn assembly_ref(&self, token: Token) -> Option<AssemblyRefRc> {
        self.assembly_refs
            .get(&token)
            .map(|entry| entry.value().clone())
    }

    /// Number of registered type references
    pub fn type_ref_count(&self) -> usize {
        self.type_refs.len()
    }

    /// Number of registered assembly references
    pub fn assembly_ref_count(&self) -> usize {
        self.assembly_refs.len()
    }

    /// Returns `true` if `assembly` denotes the assembly owning this module.
    ///
    /// The public key token form of the reference's full name must match the full name of
    /// the module's assembly, in public key or public key token form. A module without an
    /// assembly owns nothing, not even the current-assembly sentinel.
    pub fn is_own_assembly(&self, assembly: &AssemblyRef) -> bool {
        match &self.assembly {
            Some(own) => {
                let full_name = assembly.full_name_token();
                full_name == own.full_name() || full_name == own.full_name_token()
            }
            None => false,
        }
    }

    fn is_corlib_reference(&self, assembly: &AssemblyRef) -> bool {
        if assembly.name.eq_ignore_ascii_case(&self.corlib_identity.name)
            || CORLIB_NAMES
                .iter()
                .any(|name| assembly.name.eq_ignore_ascii_case(name))
        {
            return true;
        }

        // Inside corlib itself, unqualified names refer to corlib
        self.is_corlib() && (assembly.is_current_assembly() || self.is_own_assembly(assembly))
    }
}

impl TypeNameContext for ModuleContext {
    fn assembly(&self) -> Option<&AssemblyIdentity> {
        self.assembly.as_ref()
    }

    fn resolve_canonical_primitive(
        &self,
        namespace: &str,
        name: &str,
        assembly: &AssemblyRef,
    ) -> Option<TypeSignature> {
        let kind = CilPrimitiveKind::from_name(namespace, name)?;
        if !self.is_corlib_reference(assembly) {
            return None;
        }

        Some(TypeSignature::CorLib(self.corlib_type(kind)))
    }

    fn resolve_local_definition(
        &self,
        assembly: &AssemblyRef,
        type_ref: &TypeRef,
    ) -> Option<TypeDefRc> {
        if !self.is_own_assembly(assembly) {
            return None;
        }

        self.find_type_def(&type_ref.full_name())
    }

    fn register_type_ref(&self, mut type_ref: TypeRef) -> TypeRefRc {
        let rid = self.next_type_ref.fetch_add(1, Ordering::Relaxed);
        type_ref.rid = rid;
        type_ref.token = Token::from_parts(Token::TYPE_REF, rid);

        let type_ref = Arc::new(type_ref);
        self.type_refs.insert(type_ref.token, type_ref.clone());
        type_ref
    }

    fn register_assembly_ref(&self, mut assembly_ref: AssemblyRef) -> AssemblyRefRc {
        let rid = self.next_assembly_ref.fetch_add(1, Ordering::Relaxed);
        assembly_ref.rid = rid;
        assembly_ref.token = Token::from_parts(Token::ASSEMBLY_REF, rid);

        let assembly_ref = Arc::new(assembly_ref);
        self.assembly_refs
            .insert(assembly_ref.token, assembly_ref.clone());
        assembly_ref
    }
}

impl AssemblyRefFinder for ModuleContext {
    fn find_assembly_ref(&self, non_nested: &TypeRef) -> Option<AssemblyRefRc> {
        if self.type_defs_by_fullname.contains_key(&non_nested.full_name()) {
            return self
                .assembly
                .as_ref()
                .map(|own| self.register_assembly_ref(AssemblyRef::from_identity(own)));
        }

        if CilPrimitiveKind::from_name(&non_nested.namespace, &non_nested.name).is_some() {
            return Some(self.corlib());
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn own_identity() -> AssemblyIdentity {
        AssemblyIdentity::new("App", AssemblyVersion::new(1, 0, 0, 0), None, None)
    }

    #[test]
    fn test_registration_assigns_tokens() {
        let context = ModuleContext::new("App.exe");

        let first = context.register_type_ref(TypeRef::new("N", "A"));
        let second = context.register_type_ref(TypeRef::new("N", "B"));
        let asm = context.register_assembly_ref(AssemblyRef::new("Asm"));

        assert_eq!(first.token, Token(0x0100_0001));
        assert_eq!(second.token, Token(0x0100_0002));
        assert_eq!(second.rid, 2);
        assert_eq!(asm.token, Token(0x2300_0001));
        assert_eq!(context.type_ref(first.token), Some(first));
        assert_eq!(context.assembly_ref(asm.token), Some(asm));
        assert_eq!(context.type_ref_count(), 2);
    }

    #[test]
    fn test_corlib_defaults() {
        let context = ModuleContext::new("App.exe");
        let corlib = context.corlib();

        assert_eq!(corlib.name, "mscorlib");
        assert_eq!(
            corlib.full_name(),
            "mscorlib, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089"
        );
        assert!(Arc::ptr_eq(&corlib, &context.corlib()));
        assert_eq!(context.assembly_ref_count(), 1);

        let int32 = context.corlib_type(CilPrimitiveKind::I4);
        assert_eq!(int32.type_ref.name, "Int32");
        assert_eq!(int32.type_ref.defining_assembly(), Some(&corlib));
        assert_eq!(context.type_ref_count(), 18);
    }

    #[test]
    fn test_canonical_primitive() {
        let context = ModuleContext::new("App.exe");

        let mscorlib = AssemblyRef::new("MSCORLIB");
        let runtime = AssemblyRef::new("System.Runtime");
        let other = AssemblyRef::new("Other");

        assert!(context
            .resolve_canonical_primitive("System", "String", &mscorlib)
            .is_some());
        assert!(context
            .resolve_canonical_primitive("System", "Object", &runtime)
            .is_some());
        assert!(context
            .resolve_canonical_primitive("System", "String", &other)
            .is_none());
        assert!(context
            .resolve_canonical_primitive("System", "Uri", &mscorlib)
            .is_none());
    }

    #[test]
    fn test_canonical_primitive_in_corlib_module() {
        let identity = AssemblyIdentity::new("MyCore", AssemblyVersion::new(1, 0, 0, 0), None, None);
        let context = ModuleContext::new("MyCore.dll")
            .with_assembly(identity.clone())
            .with_corlib(identity.clone());

        assert!(context.is_corlib());
        assert!(context
            .resolve_canonical_primitive("System", "Int32", &AssemblyRef::current_assembly())
            .is_some());
        assert!(context
            .resolve_canonical_primitive("System", "Int32", &AssemblyRef::from_identity(&identity))
            .is_some());
    }

    #[test]
    fn test_local_definition() {
        let context = ModuleContext::new("App.exe").with_assembly(own_identity());
        let outer = context.define_type("N", "Outer", TypeDefFlags::empty());
        let inner = context.define_nested_type(&outer, "Inner", TypeDefFlags::VALUE_TYPE);

        assert_eq!(outer.token, Token(0x0200_0001));
        assert_eq!(inner.full_name(), "N.Outer/Inner");

        let own = AssemblyRef::from_identity(&own_identity());
        let outer_ref = Arc::new(TypeRef::new("N", "Outer"));
        let inner_ref = TypeRef::nested("Inner", outer_ref.clone());

        assert_eq!(
            context.resolve_local_definition(&own, &inner_ref),
            Some(inner)
        );
        assert_eq!(
            context.resolve_local_definition(&own, &outer_ref),
            Some(outer)
        );
        assert!(context
            .resolve_local_definition(&AssemblyRef::new("App"), &outer_ref)
            .is_none());
        assert!(context
            .resolve_local_definition(&own, &TypeRef::new("N", "Missing"))
            .is_none());
    }

    #[test]
    fn test_own_assembly() {
        let token_identity = AssemblyIdentity::new(
            "App",
            AssemblyVersion::new(1, 0, 0, 0),
            None,
            Some(Identity::Token(vec![
                0xb7, 0x7a, 0x5c, 0x56, 0x19, 0x34, 0xe0, 0x89,
            ])),
        );
        let context = ModuleContext::new("App.exe").with_assembly(token_identity.clone());

        let mut by_key = AssemblyRef::new("App");
        by_key.version = AssemblyVersion::new(1, 0, 0, 0);
        by_key.identifier = Some(Identity::PubKey(vec![
            0, 0, 0, 0, 0, 0, 0, 0, 4, 0, 0, 0, 0, 0, 0, 0,
        ]));
        assert!(context.is_own_assembly(&by_key));
        assert!(context.is_own_assembly(&AssemblyRef::from_identity(&token_identity)));

        let mut other_key = by_key.clone();
        other_key.identifier = Some(Identity::PubKey(vec![1; 16]));
        assert!(!context.is_own_assembly(&other_key));
        assert!(!context.is_own_assembly(&AssemblyRef::current_assembly()));

        // An own identity known by key matches references by token
        let key_identity = AssemblyIdentity::from_assembly_ref(&by_key);
        let context = ModuleContext::new("App.exe").with_assembly(key_identity);
        assert!(context.is_own_assembly(&AssemblyRef::from_identity(&token_identity)));
        assert!(context.is_own_assembly(&by_key));
    }

    #[test]
    fn test_no_assembly_owns_nothing() {
        let context = ModuleContext::new("App.exe");
        context.define_type("N", "Local", TypeDefFlags::empty());

        assert!(!context.is_own_assembly(&AssemblyRef::current_assembly()));
        assert!(context
            .resolve_local_definition(&AssemblyRef::current_assembly(), &TypeRef::new("N", "Local"))
            .is_none());
        assert!(context
            .find_assembly_ref(&TypeRef::new("N", "Local"))
            .is_none());
    }

    #[test]
    fn test_finder() {
        let context = ModuleContext::new("App.exe").with_assembly(own_identity());
        context.define_type("N", "Local", TypeDefFlags::empty());

        let local = context.find_assembly_ref(&TypeRef::new("N", "Local")).unwrap();
        assert_eq!(local.name, "App");
        assert!(!local.token.is_null());

        let prim = context
            .find_assembly_ref(&TypeRef::new("System", "Boolean"))
            .unwrap();
        assert!(Arc::ptr_eq(&prim, &context.corlib()));

        assert!(context
            .find_assembly_ref(&TypeRef::new("N", "Unknown"))
            .is_none());
    }

    #[test]
    fn test_context_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ModuleContext>();
    }
}
