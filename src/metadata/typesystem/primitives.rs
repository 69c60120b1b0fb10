use std::fmt;

use strum::{EnumCount, EnumIter, IntoEnumIterator};

use crate::metadata::typesystem::TypeRefRc;

#[allow(non_snake_case, missing_docs)]
/// Element type ids of the canonical primitives, §II.23.1.16
pub mod ELEMENT_TYPE {
    pub const VOID: u8 = 0x01;
    pub const BOOLEAN: u8 = 0x02;
    pub const CHAR: u8 = 0x03;
    pub const I1: u8 = 0x04;
    pub const U1: u8 = 0x05;
    pub const I2: u8 = 0x06;
    pub const U2: u8 = 0x07;
    pub const I4: u8 = 0x08;
    pub const U4: u8 = 0x09;
    pub const I8: u8 = 0x0a;
    pub const U8: u8 = 0x0b;
    pub const R4: u8 = 0x0c;
    pub const R8: u8 = 0x0d;
    pub const STRING: u8 = 0x0e;
    pub const TYPEDBYREF: u8 = 0x16;
    // System.IntPtr
    pub const I: u8 = 0x18;
    // System.UIntPtr
    pub const U: u8 = 0x19;
    // System.Object
    pub const OBJECT: u8 = 0x1c;
}

/// The primitive types every corlib defines, which signatures refer to by element type
/// instead of by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount)]
pub enum CilPrimitiveKind {
    /// System.Void - represents no value
    Void,
    /// System.Boolean - true/false value
    Boolean,
    /// System.Char - Unicode 16-bit character
    Char,
    /// System.SByte - signed 8-bit integer
    I1,
    /// System.Byte - unsigned 8-bit integer
    U1,
    /// System.Int16 - signed 16-bit integer
    I2,
    /// System.UInt16 - unsigned 16-bit integer
    U2,
    /// System.Int32 - signed 32-bit integer
    I4,
    /// System.UInt32 - unsigned 32-bit integer
    U4,
    /// System.Int64 - signed 64-bit integer
    I8,
    /// System.UInt64 - unsigned 64-bit integer
    U8,
    /// System.Single - 32-bit floating point
    R4,
    /// System.Double - 64-bit floating point
    R8,
    /// System.String - immutable string of Unicode characters
    String,
    /// System.TypedReference - type-safe pointer (used by compiler)
    TypedReference,
    /// System.IntPtr - native sized signed integer
    I,
    /// System.UIntPtr - native sized unsigned integer
    U,
    /// System.Object - base class for all reference types
    Object,
}

impl CilPrimitiveKind {
    /// Get the element type of this primitive
    #[must_use]
    pub fn element_type(&self) -> u8 {
        match self {
            CilPrimitiveKind::Void => ELEMENT_TYPE::VOID,
            CilPrimitiveKind::Boolean => ELEMENT_TYPE::BOOLEAN,
            CilPrimitiveKind::Char => ELEMENT_TYPE::CHAR,
            CilPrimitiveKind::I1 => ELEMENT_TYPE::I1,
            CilPrimitiveKind::U1 => ELEMENT_TYPE::U1,
            CilPrimitiveKind::I2 => ELEMENT_TYPE::I2,
            CilPrimitiveKind::U2 => ELEMENT_TYPE::U2,
            CilPrimitiveKind::I4 => ELEMENT_TYPE::I4,
            CilPrimitiveKind::U4 => ELEMENT_TYPE::U4,
            CilPrimitiveKind::I8 => ELEMENT_TYPE::I8,
            CilPrimitiveKind::U8 => ELEMENT_TYPE::U8,
            CilPrimitiveKind::R4 => ELEMENT_TYPE::R4,
            CilPrimitiveKind::R8 => ELEMENT_TYPE::R8,
            CilPrimitiveKind::String => ELEMENT_TYPE::STRING,
            CilPrimitiveKind::TypedReference => ELEMENT_TYPE::TYPEDBYREF,
            CilPrimitiveKind::I => ELEMENT_TYPE::I,
            CilPrimitiveKind::U => ELEMENT_TYPE::U,
            CilPrimitiveKind::Object => ELEMENT_TYPE::OBJECT,
        }
    }

    /// Get the namespace of this type
    #[must_use]
    pub fn namespace(&self) -> &'static str {
        "System"
    }

    /// Get the short name (without namespace)
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            CilPrimitiveKind::Void => "Void",
            CilPrimitiveKind::Boolean => "Boolean",
            CilPrimitiveKind::Char => "Char",
            CilPrimitiveKind::I1 => "SByte",
            CilPrimitiveKind::U1 => "Byte",
            CilPrimitiveKind::I2 => "Int16",
            CilPrimitiveKind::U2 => "UInt16",
            CilPrimitiveKind::I4 => "Int32",
            CilPrimitiveKind::U4 => "UInt32",
            CilPrimitiveKind::I8 => "Int64",
            CilPrimitiveKind::U8 => "UInt64",
            CilPrimitiveKind::R4 => "Single",
            CilPrimitiveKind::R8 => "Double",
            CilPrimitiveKind::String => "String",
            CilPrimitiveKind::TypedReference => "TypedReference",
            CilPrimitiveKind::I => "IntPtr",
            CilPrimitiveKind::U => "UIntPtr",
            CilPrimitiveKind::Object => "Object",
        }
    }

    /// Look up a primitive by namespace and name. Both are compared case-sensitively.
    #[must_use]
    pub fn from_name(namespace: &str, name: &str) -> Option<Self> {
        if namespace != "System" {
            return None;
        }

        CilPrimitiveKind::iter().find(|kind| kind.name() == name)
    }

    /// Returns `true` for primitives that are value types
    #[must_use]
    pub fn is_value_type(&self) -> bool {
        !matches!(self, CilPrimitiveKind::String | CilPrimitiveKind::Object)
    }
}

/// A canonical corlib primitive signature.
///
/// Each destination context owns one instance per [`CilPrimitiveKind`], bound to a `TypeRef`
/// into its corlib.
#[derive(Debug, Clone, PartialEq)]
pub struct CorLibTypeSig {
    /// Which primitive this is
    pub kind: CilPrimitiveKind,
    /// Reference to the defining type in corlib
    pub type_ref: TypeRefRc,
}

impl CorLibTypeSig {
    /// Element type of the primitive
    #[must_use]
    pub fn element_type(&self) -> u8 {
        self.kind.element_type()
    }
}

impl fmt::Display for CorLibTypeSig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.kind.namespace(), self.kind.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_primitives() {
        assert_eq!(CilPrimitiveKind::COUNT, 18);
        for kind in CilPrimitiveKind::iter() {
            assert_eq!(CilPrimitiveKind::from_name("System", kind.name()), Some(kind));
        }
    }

    #[test]
    fn test_from_name() {
        assert_eq!(
            CilPrimitiveKind::from_name("System", "Int32"),
            Some(CilPrimitiveKind::I4)
        );
        assert_eq!(CilPrimitiveKind::from_name("System", "int32"), None);
        assert_eq!(CilPrimitiveKind::from_name("Other", "Int32"), None);
        assert_eq!(CilPrimitiveKind::from_name("System", "ValueType"), None);
    }

    #[test]
    fn test_element_types() {
        assert_eq!(CilPrimitiveKind::I4.element_type(), 0x08);
        assert_eq!(CilPrimitiveKind::String.element_type(), 0x0e);
        assert_eq!(CilPrimitiveKind::Object.element_type(), 0x1c);
        assert!(CilPrimitiveKind::I4.is_value_type());
        assert!(!CilPrimitiveKind::Object.is_value_type());
    }
}
