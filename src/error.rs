use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which covers every way a type or assembly name can be rejected.
///
/// All failures are deterministic functions of the input text and the answers given by the
/// destination context. Nothing here is fatal to the host process; every variant describes the
/// rejection of exactly one input string.
///
/// # Error Categories
///
/// - [`Error::Malformed`] - Unexpected character, missing token or trailing input
/// - [`Error::IntegerOverflow`] - A decimal literal does not fit its target integer type
/// - [`Error::InvalidArrayBound`] / [`Error::InvalidArraySize`] - Array dimension out of range
/// - [`Error::UnsupportedConstruct`] - A construct was applied to an incompatible base type
/// - [`Error::RecursionLimit`] - Nesting exceeded the recursion bound
///
/// Use [`Error::kind`] to branch on the category without matching every field.
///
/// # Examples
///
/// ```rust
/// use cilname::{metadata::typename::parse_assembly_ref, Error, ErrorKind};
///
/// match parse_assembly_ref("MyAsm, Version=1.2.99999999999.4") {
///     Ok(asm) => println!("parsed {}", asm.name),
///     Err(e) => assert_eq!(e.kind(), ErrorKind::IntegerOverflow),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The input does not follow the type name grammar.
    ///
    /// Raised for unexpected characters, missing delimiters, empty identifiers and
    /// extra input after a complete name. The error includes the source location where
    /// the malformation was detected for debugging purposes.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// An integer literal would overflow its target type.
    ///
    /// The associated value is the character offset at which the literal started.
    #[error("Integer overflow in literal at offset {0}")]
    IntegerOverflow(usize),

    /// An array dimension has an upper bound below its lower bound.
    #[error("Invalid array bound - upper {upper} < lower {lower}")]
    InvalidArrayBound {
        /// The declared lower bound
        lower: i32,
        /// The declared upper bound
        upper: i64,
    },

    /// The computed size of an array dimension is zero or larger than `0x1FFFFFFF`.
    #[error("Invalid array dimension size - {0}")]
    InvalidArraySize(i64),

    /// A construct was applied to a base type that cannot carry it.
    ///
    /// Raised when a generic instantiation targets something other than a class or
    /// value type reference, or when a named type was requested but the input describes
    /// an array, pointer, by-ref, generic instance or generic variable.
    #[error("Unsupported construct - {0}")]
    UnsupportedConstruct(String),

    /// Recursion limit reached.
    ///
    /// To prevent stack overflow on adversarial input, the depth of nested type names is
    /// bounded. The associated value shows the recursion limit that was reached.
    #[error("Reach the maximum recursion level allowed - {0}")]
    RecursionLimit(usize),
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Unexpected character, missing expected token, or extra trailing input
    MalformedSyntax,
    /// A decimal literal does not fit the integer type it is read into
    IntegerOverflow,
    /// Non-positive or over-large computed size, or upper < lower
    InvalidArrayBound,
    /// A construct requiring a class or value type received an incompatible base
    UnsupportedConstruct,
    /// Nesting went beyond the recursion bound
    StackDepthExceeded,
}

impl Error {
    /// Returns the category this error belongs to.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Malformed { .. } => ErrorKind::MalformedSyntax,
            Error::IntegerOverflow(_) => ErrorKind::IntegerOverflow,
            Error::InvalidArrayBound { .. } | Error::InvalidArraySize(_) => {
                ErrorKind::InvalidArrayBound
            }
            Error::UnsupportedConstruct(_) => ErrorKind::UnsupportedConstruct,
            Error::RecursionLimit(_) => ErrorKind::StackDepthExceeded,
        }
    }
}
