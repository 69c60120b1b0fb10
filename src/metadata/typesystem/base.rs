use std::{
    fmt,
    sync::{Arc, OnceLock},
};

use bitflags::bitflags;

use crate::metadata::{token::Token, typesystem::AssemblyRefRc};

/// A reference to a `TypeRef`
pub type TypeRefRc = Arc<TypeRef>;
/// A reference to a `TypeDef`
pub type TypeDefRc = Arc<TypeDef>;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    /// Kind flags of a local type definition
    pub struct TypeDefFlags: u32 {
        /// The type derives from `System.ValueType` or `System.Enum`
        const VALUE_TYPE = 0x0001;
    }
}

/// Where a `TypeRef` is resolved: an assembly for top-level types, the enclosing type for
/// nested ones.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolutionScope {
    /// Top-level type, defined in the referenced assembly
    AssemblyRef(AssemblyRefRc),
    /// Nested type, defined inside the referenced type
    TypeRef(TypeRefRc),
}

/// A named reference to a type.
///
/// The resolution scope is write-once. Nested references receive their enclosing type when
/// created; the root of a nested chain receives its assembly once the whole chain (and the
/// optional assembly qualifier after it) was read.
#[derive(Debug, Clone)]
pub struct TypeRef {
    /// `RowID`
    pub rid: u32,
    /// Token
    pub token: Token,
    /// Namespace, empty for nested types and types in the global namespace
    pub namespace: String,
    /// Name
    pub name: String,
    scope: OnceLock<ResolutionScope>,
}

impl TypeRef {
    /// Create an unregistered, unscoped type reference
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        TypeRef {
            rid: 0,
            token: Token::default(),
            namespace: namespace.into(),
            name: name.into(),
            scope: OnceLock::new(),
        }
    }

    /// Create an unregistered reference to a type nested in `enclosing`
    pub fn nested(name: impl Into<String>, enclosing: TypeRefRc) -> Self {
        let type_ref = TypeRef::new(String::new(), name);
        let _ = type_ref.scope.set(ResolutionScope::TypeRef(enclosing));
        type_ref
    }

    /// Splits `id` at its last `.` into namespace and name.
    ///
    /// ```rust
    /// use cilname::metadata::typesystem::TypeRef;
    ///
    /// assert_eq!(TypeRef::split_name("System.Collections.List"), ("System.Collections", "List"));
    /// assert_eq!(TypeRef::split_name("Plain"), ("", "Plain"));
    /// ```
    #[must_use]
    pub fn split_name(id: &str) -> (&str, &str) {
        match id.rfind('.') {
            Some(pos) => (&id[..pos], &id[pos + 1..]),
            None => ("", id),
        }
    }

    /// The resolution scope, if one was assigned
    pub fn resolution_scope(&self) -> Option<&ResolutionScope> {
        self.scope.get()
    }

    /// Assign the resolution scope. Returns `false` if a scope was already set.
    pub fn set_resolution_scope(&self, scope: ResolutionScope) -> bool {
        self.scope.set(scope).is_ok()
    }

    /// The enclosing type of a nested reference
    pub fn declaring_type(&self) -> Option<&TypeRefRc> {
        match self.scope.get() {
            Some(ResolutionScope::TypeRef(enclosing)) => Some(enclosing),
            _ => None,
        }
    }

    /// Returns `true` if this reference is scoped by another type
    pub fn is_nested(&self) -> bool {
        self.declaring_type().is_some()
    }

    /// The assembly of the outermost enclosing type, if it was resolved
    pub fn defining_assembly(&self) -> Option<&AssemblyRefRc> {
        let mut current = self;
        loop {
            match current.scope.get()? {
                ResolutionScope::AssemblyRef(asm) => return Some(asm),
                ResolutionScope::TypeRef(enclosing) => current = enclosing,
            }
        }
    }

    /// Metadata full name, nested levels separated by `/` (e.g. `N.T/U`)
    #[must_use]
    pub fn full_name(&self) -> String {
        self.join_name('/')
    }

    /// Reflection full name, nested levels separated by `+` (e.g. `N.T+U`)
    #[must_use]
    pub fn reflection_name(&self) -> String {
        self.join_name('+')
    }

    fn join_name(&self, separator: char) -> String {
        let own = if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        };

        match self.declaring_type() {
            Some(enclosing) => format!("{}{}{}", enclosing.join_name(separator), separator, own),
            None => own,
        }
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        self.namespace == other.namespace
            && self.name == other.name
            && self.scope.get() == other.scope.get()
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reflection_name())
    }
}

/// A type defined in the module a destination context describes.
#[derive(Debug, Clone)]
pub struct TypeDef {
    /// `RowID`
    pub rid: u32,
    /// Token
    pub token: Token,
    /// Namespace, empty for nested types
    pub namespace: String,
    /// Name
    pub name: String,
    /// Kind flags
    pub flags: TypeDefFlags,
    /// Enclosing definition of a nested type
    pub declaring_type: Option<TypeDefRc>,
}

impl TypeDef {
    /// Returns `true` if the type is a value type
    #[must_use]
    pub fn is_value_type(&self) -> bool {
        self.flags.contains(TypeDefFlags::VALUE_TYPE)
    }

    /// Metadata full name, nested levels separated by `/`
    #[must_use]
    pub fn full_name(&self) -> String {
        let own = if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        };

        match &self.declaring_type {
            Some(enclosing) => format!("{}/{}", enclosing.full_name(), own),
            None => own,
        }
    }
}

impl PartialEq for TypeDef {
    fn eq(&self, other: &Self) -> bool {
        self.namespace == other.namespace
            && self.name == other.name
            && self.flags == other.flags
            && self.declaring_type == other.declaring_type
    }
}

/// A named type, either defined locally or referenced.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDefOrRef {
    /// Local definition
    TypeDef(TypeDefRc),
    /// Reference to a type resolved elsewhere
    TypeRef(TypeRefRc),
}

impl TypeDefOrRef {
    /// Namespace of the underlying type
    #[must_use]
    pub fn namespace(&self) -> &str {
        match self {
            TypeDefOrRef::TypeDef(def) => &def.namespace,
            TypeDefOrRef::TypeRef(r) => &r.namespace,
        }
    }

    /// Name of the underlying type
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            TypeDefOrRef::TypeDef(def) => &def.name,
            TypeDefOrRef::TypeRef(r) => &r.name,
        }
    }

    /// Metadata full name of the underlying type
    #[must_use]
    pub fn full_name(&self) -> String {
        match self {
            TypeDefOrRef::TypeDef(def) => def.full_name(),
            TypeDefOrRef::TypeRef(r) => r.full_name(),
        }
    }

    /// Token assigned by the destination context
    #[must_use]
    pub fn token(&self) -> Token {
        match self {
            TypeDefOrRef::TypeDef(def) => def.token,
            TypeDefOrRef::TypeRef(r) => r.token,
        }
    }

    /// The underlying reference, if this is not a local definition
    #[must_use]
    pub fn as_type_ref(&self) -> Option<&TypeRefRc> {
        match self {
            TypeDefOrRef::TypeRef(r) => Some(r),
            TypeDefOrRef::TypeDef(_) => None,
        }
    }

    /// The underlying definition, if this is a local definition
    #[must_use]
    pub fn as_type_def(&self) -> Option<&TypeDefRc> {
        match self {
            TypeDefOrRef::TypeDef(def) => Some(def),
            TypeDefOrRef::TypeRef(_) => None,
        }
    }
}

impl fmt::Display for TypeDefOrRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDefOrRef::TypeDef(def) => write!(f, "{}", def.full_name().replace('/', "+")),
            TypeDefOrRef::TypeRef(r) => write!(f, "{}", r),
        }
    }
}

/// Build an unregistered root reference already scoped to `assembly`
pub(crate) fn scoped_type_ref(namespace: &str, name: &str, assembly: AssemblyRefRc) -> TypeRef {
    let type_ref = TypeRef::new(namespace, name);
    let _ = type_ref.set_resolution_scope(ResolutionScope::AssemblyRef(assembly));
    type_ref
}
