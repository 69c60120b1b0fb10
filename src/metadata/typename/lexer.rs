//! Lexical layer of the type name parser.
//!
//! [`LexicalReader`] turns the characters of a [`Scanner`] into identifiers and decimal
//! integers. It knows nothing about the structure of a type name beyond which characters end
//! an identifier, which is decided by the [`TypeNameSyntax`] it is instantiated with.
//!
//! # Identifiers
//!
//! A backslash escapes the following character, which then becomes part of the identifier
//! even if it is reserved. Leading whitespace is skipped. Type name identifiers keep
//! embedded and trailing whitespace; assembly keys and values stop at whitespace and `=`.
//!
//! # Integers
//!
//! Decimal literals are accumulated with checked arithmetic and fail with
//! [`Error::IntegerOverflow`] instead of wrapping.

use std::marker::PhantomData;

use crate::{
    metadata::typename::{scanner::Scanner, syntax::TypeNameSyntax, ReflectionSyntax},
    Error, Result,
};

/// Identifier and integer reader on top of a [`Scanner`].
pub struct LexicalReader<'a, S: TypeNameSyntax = ReflectionSyntax> {
    scanner: Scanner<'a>,
    _syntax: PhantomData<S>,
}

impl<'a, S: TypeNameSyntax> LexicalReader<'a, S> {
    /// Create a new reader over `input`
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        LexicalReader {
            scanner: Scanner::new(input),
            _syntax: PhantomData,
        }
    }

    /// Returns the next character without consuming it
    #[must_use]
    pub fn peek(&self) -> Option<char> {
        self.scanner.peek()
    }

    /// Consumes and returns the next character
    pub fn advance(&mut self) -> Option<char> {
        self.scanner.advance()
    }

    /// Consumes the next character if it equals `expected`
    pub fn eat(&mut self, expected: char) -> bool {
        self.scanner.eat(expected)
    }

    /// Current byte offset into the input
    #[must_use]
    pub fn pos(&self) -> usize {
        self.scanner.pos()
    }

    /// Skips whitespace and consumes `expected`.
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] if the next non-whitespace character is something else.
    pub fn expect(&mut self, expected: char) -> Result<()> {
        self.skip_whitespace();
        match self.scanner.advance() {
            Some(c) if c == expected => Ok(()),
            Some(c) => Err(malformed_error!(
                "Expected '{}' at offset {}, found '{}'",
                expected,
                self.pos() - c.len_utf8(),
                c
            )),
            None => Err(malformed_error!(
                "Expected '{}', found end of input",
                expected
            )),
        }
    }

    /// Returns `true` if at least one more character can be read
    #[must_use]
    pub fn has_more_data(&self) -> bool {
        self.scanner.has_more_data()
    }

    /// The input that has not been consumed yet
    #[must_use]
    pub fn remaining(&self) -> &'a str {
        self.scanner.remaining()
    }

    /// Skips whitespace characters
    pub fn skip_whitespace(&mut self) {
        while self.scanner.peek().is_some_and(char::is_whitespace) {
            self.scanner.advance();
        }
    }

    /// Skips whitespace and returns the next character without consuming it
    pub fn peek_non_whitespace(&mut self) -> Option<char> {
        self.skip_whitespace();
        self.scanner.peek()
    }

    /// Reads an identifier.
    ///
    /// ## Arguments
    /// * `stop_at_whitespace` - Whitespace ends the identifier instead of being part of it
    /// * `stop_at_equal_sign` - `=` ends the identifier instead of being part of it
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] if the identifier is empty or the input ends right after
    /// an escape character.
    pub fn read_id(&mut self, stop_at_whitespace: bool, stop_at_equal_sign: bool) -> Result<String> {
        self.skip_whitespace();

        let start = self.pos();
        let mut id = String::new();
        while let Some(c) = self.scanner.peek() {
            if c == '\\' {
                self.scanner.advance();
                id.push(self.read_escaped()?);
                continue;
            }

            if S::is_reserved(c)
                || (stop_at_whitespace && c.is_whitespace())
                || (stop_at_equal_sign && c == '=')
            {
                break;
            }

            id.push(c);
            self.scanner.advance();
        }

        if id.is_empty() {
            return Err(malformed_error!("Expected an identifier at offset {}", start));
        }

        Ok(id)
    }

    /// Reads the simple name of an assembly.
    ///
    /// The name runs until `,` or `]`, honours escapes and is trimmed.
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] if the trimmed name is empty.
    pub fn read_assembly_name_id(&mut self) -> Result<String> {
        self.skip_whitespace();

        let start = self.pos();
        let mut name = String::new();
        while let Some(c) = self.scanner.peek() {
            match c {
                '\\' => {
                    self.scanner.advance();
                    name.push(self.read_escaped()?);
                }
                ',' | ']' => break,
                _ => {
                    name.push(c);
                    self.scanner.advance();
                }
            }
        }

        let name = name.trim();
        if name.is_empty() {
            return Err(malformed_error!(
                "Expected an assembly name at offset {}",
                start
            ));
        }

        Ok(name.to_string())
    }

    fn read_escaped(&mut self) -> Result<char> {
        self.scanner
            .advance()
            .ok_or_else(|| malformed_error!("Unexpected end of input after '\\'"))
    }

    /// Reads an unsigned decimal integer after optional whitespace.
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] if no digit follows and [`Error::IntegerOverflow`] if the
    /// value does not fit in 32 bits.
    pub fn read_uint32(&mut self) -> Result<u32> {
        self.skip_whitespace();

        let start = self.pos();
        let mut value: u32 = 0;
        let mut digits = 0;
        while let Some(digit) = self.scanner.peek().and_then(|c| c.to_digit(10)) {
            self.scanner.advance();
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(digit))
                .ok_or(Error::IntegerOverflow(start))?;
            digits += 1;
        }

        if digits == 0 {
            return Err(malformed_error!("Expected an integer at offset {}", start));
        }

        Ok(value)
    }

    /// Reads a signed decimal integer after optional whitespace.
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] if no digit follows and [`Error::IntegerOverflow`] if the
    /// value is outside of `i32`.
    pub fn read_int32(&mut self) -> Result<i32> {
        self.skip_whitespace();

        let start = self.pos();
        let negative = self.scanner.eat('-');
        let magnitude = i64::from(self.read_uint32()?);
        let value = if negative { -magnitude } else { magnitude };

        i32::try_from(value).map_err(|_| Error::IntegerOverflow(start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn reader(input: &str) -> LexicalReader<'_> {
        LexicalReader::new(input)
    }

    #[test]
    fn test_read_id_stops_at_reserved() {
        let mut lexer = reader("  N.T`1[");
        assert_eq!(lexer.read_id(false, false).unwrap(), "N.T`1");
        assert_eq!(lexer.peek(), Some('['));
    }

    #[test]
    fn test_read_id_keeps_inner_whitespace() {
        let mut lexer = reader("My Type , Asm");
        assert_eq!(lexer.read_id(false, false).unwrap(), "My Type ");
        assert_eq!(lexer.peek(), Some(','));
    }

    #[test]
    fn test_read_id_assembly_key() {
        let mut lexer = reader(" Version = 1.0");
        assert_eq!(lexer.read_id(true, true).unwrap(), "Version");
        assert_eq!(lexer.peek_non_whitespace(), Some('='));
    }

    #[test]
    fn test_read_id_escapes() {
        let mut lexer = reader(r"A\+B\,C\\D+E");
        assert_eq!(lexer.read_id(false, false).unwrap(), r"A+B,C\D");
        assert_eq!(lexer.peek(), Some('+'));
    }

    #[test]
    fn test_read_id_errors() {
        assert_eq!(
            reader("").read_id(false, false).unwrap_err().kind(),
            ErrorKind::MalformedSyntax
        );
        assert_eq!(
            reader("[]").read_id(false, false).unwrap_err().kind(),
            ErrorKind::MalformedSyntax
        );
        assert_eq!(
            reader("T\\").read_id(false, false).unwrap_err().kind(),
            ErrorKind::MalformedSyntax
        );
    }

    #[test]
    fn test_read_assembly_name_id() {
        let mut lexer = reader("  My Asm  , Version=1.0");
        assert_eq!(lexer.read_assembly_name_id().unwrap(), "My Asm");
        assert_eq!(lexer.peek(), Some(','));

        let mut lexer = reader(r"A\]sm]");
        assert_eq!(lexer.read_assembly_name_id().unwrap(), "A]sm");
        assert_eq!(lexer.peek(), Some(']'));

        assert!(reader("  ,").read_assembly_name_id().is_err());
    }

    #[test]
    fn test_read_uint32() {
        assert_eq!(reader(" 0").read_uint32().unwrap(), 0);
        assert_eq!(reader("4294967295").read_uint32().unwrap(), u32::MAX);

        let err = reader("4294967296").read_uint32().unwrap_err();
        assert!(matches!(err, Error::IntegerOverflow(0)));

        let err = reader("x").read_uint32().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedSyntax);
    }

    #[test]
    fn test_read_uint32_stops_at_non_digit() {
        let mut lexer = reader("12..5");
        assert_eq!(lexer.read_uint32().unwrap(), 12);
        assert_eq!(lexer.peek(), Some('.'));
    }

    #[test]
    fn test_read_int32() {
        assert_eq!(reader("-2147483648").read_int32().unwrap(), i32::MIN);
        assert_eq!(reader("2147483647").read_int32().unwrap(), i32::MAX);
        assert_eq!(reader("-0").read_int32().unwrap(), 0);

        assert_eq!(
            reader("2147483648").read_int32().unwrap_err().kind(),
            ErrorKind::IntegerOverflow
        );
        assert_eq!(
            reader("-2147483649").read_int32().unwrap_err().kind(),
            ErrorKind::IntegerOverflow
        );
        assert_eq!(
            reader("-").read_int32().unwrap_err().kind(),
            ErrorKind::MalformedSyntax
        );
    }

    #[test]
    fn test_expect() {
        let mut lexer = reader("  ]x");
        assert!(lexer.expect(']').is_ok());
        assert!(lexer.expect(']').is_err());
        assert!(reader("").expect(']').is_err());
    }
}
