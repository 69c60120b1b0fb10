use std::fmt;
use std::hash::{Hash, Hasher};

/// A metadata token identifying a node registered with a destination context.
///
/// Tokens consist of a 32-bit value where:
/// - The high byte (bits 24-31) indicates the table type
/// - The low 24 bits (bits 0-23) indicate the row index (rid) within that table
///
/// A null token (value 0) marks nodes that were never registered, such as the result
/// of a context-free [`crate::metadata::typename::parse_assembly_ref`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Token(pub u32);

impl Token {
    /// Table id of `TypeRef` rows
    pub const TYPE_REF: u8 = 0x01;
    /// Table id of `TypeDef` rows
    pub const TYPE_DEF: u8 = 0x02;
    /// Table id of `AssemblyRef` rows
    pub const ASSEMBLY_REF: u8 = 0x23;

    /// Creates a new token from a raw 32-bit value
    #[must_use]
    pub fn new(value: u32) -> Self {
        Token(value)
    }

    /// Creates a token from a table id and a row index.
    ///
    /// Rows above `0x00FF_FFFF` are truncated to the 24 bit row field.
    #[must_use]
    pub fn from_parts(table: u8, row: u32) -> Self {
        Token((u32::from(table) << 24) | (row & 0x00FF_FFFF))
    }

    /// Returns the raw token value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Extracts the table type from the token (high byte)
    #[must_use]
    pub fn table(&self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Extracts the row index from the token (low 24 bits)
    #[must_use]
    pub fn row(&self) -> u32 {
        self.0 & 0x00FF_FFFF
    }

    /// Returns true if this is a null token (value 0)
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for Token {
    fn from(value: u32) -> Self {
        Token(value)
    }
}

impl From<Token> for u32 {
    fn from(token: Token) -> Self {
        token.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Token(0x{:08x}, table: 0x{:02x}, row: {})",
            self.0,
            self.table(),
            self.row()
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_from_parts() {
        let token = Token::from_parts(Token::TYPE_REF, 5);
        assert_eq!(token.value(), 0x0100_0005);
        assert_eq!(token.table(), Token::TYPE_REF);
        assert_eq!(token.row(), 5);

        let asm = Token::from_parts(Token::ASSEMBLY_REF, 1);
        assert_eq!(asm.value(), 0x2300_0001);
    }

    #[test]
    fn test_token_row_truncated() {
        let token = Token::from_parts(Token::TYPE_DEF, 0x0100_0002);
        assert_eq!(token.table(), Token::TYPE_DEF);
        assert_eq!(token.row(), 2);
    }

    #[test]
    fn test_token_is_null() {
        assert!(Token::default().is_null());
        assert!(!Token(0x0200_0001).is_null());
    }

    #[test]
    fn test_token_from_conversion() {
        let token: Token = 0x2300_0004u32.into();
        let back: u32 = token.into();
        assert_eq!(back, 0x2300_0004);
    }

    #[test]
    fn test_token_display() {
        assert_eq!(format!("{}", Token(0x0100_0001)), "0x01000001");
        assert_eq!(
            format!("{:?}", Token(0x0100_0001)),
            "Token(0x01000001, table: 0x01, row: 1)"
        );
    }
}
