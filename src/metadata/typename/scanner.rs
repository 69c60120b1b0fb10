//! Character cursor over a type name.
//!
//! [`Scanner`] is a forward-only cursor over a `&str`, handing out one `char` at a time.
//! End of input is reported as `None`.

/// Forward-only character cursor over borrowed input.
pub struct Scanner<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Scanner<'a> {
    /// Create a new `Scanner` positioned at the start of `input`
    ///
    /// ## Arguments
    /// * 'input' - The text to scan
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Scanner { input, position: 0 }
    }

    /// Returns the next character without consuming it, or `None` at end of input
    #[must_use]
    pub fn peek(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    /// Consumes and returns the next character, or `None` at end of input
    pub fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += c.len_utf8();
        Some(c)
    }

    /// Consumes the next character if it equals `expected`
    pub fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.position += expected.len_utf8();
            true
        } else {
            false
        }
    }

    /// Get the current byte offset into the input
    #[must_use]
    pub fn pos(&self) -> usize {
        self.position
    }

    /// Returns `true` if at least one more character can be read
    #[must_use]
    pub fn has_more_data(&self) -> bool {
        self.position < self.input.len()
    }

    /// The input that has not been consumed yet
    #[must_use]
    pub fn remaining(&self) -> &'a str {
        &self.input[self.position..]
    }
}
