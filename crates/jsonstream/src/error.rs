use core::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

/// Error returned by [`Decoder`](crate::Decoder) and
/// [`StringReader`](crate::StringReader).
///
/// `E` is the error type of the underlying [`ByteSource`](crate::ByteSource).
#[derive(Error, Debug, PartialEq)]
pub enum DecodeError<E> {
    /// The byte source failed. The error is passed through untouched.
    #[error("{0}")]
    Source(E),
    /// The input could not be tokenized.
    #[error("{error} on line {line} at column {column}")]
    Syntax {
        /// What went wrong.
        error: SyntaxError,
        /// Line of the last separator boundary, starting at 1.
        line: usize,
        /// Column of the last separator boundary, starting at 1.
        column: usize,
    },
    /// A string reader was requested but the next token is not a string.
    #[error("token is not a string value")]
    NotString,
}

impl<E> DecodeError<E> {
    /// Returns the syntax error, if this is one.
    #[must_use]
    pub fn syntax(&self) -> Option<&SyntaxError> {
        match self {
            DecodeError::Syntax { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Returns `true` if the byte source failed.
    #[must_use]
    pub fn is_source(&self) -> bool {
        matches!(self, DecodeError::Source(_))
    }
}

/// Lexical errors. Each one is terminal for the token being read.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    /// A token cannot start with this byte.
    #[error("bad input byte 0x{0:02x}")]
    UnexpectedByte(u8),
    /// A `true`, `false` or `null` literal was misspelled.
    #[error("unexpected input 0x{0:02x} while reading literal")]
    BadLiteralByte(u8),
    /// The input ended inside a literal.
    #[error("unexpected end of input while reading literal")]
    UnexpectedEndOfLiteral,
    /// The input ended before the closing quote of a string.
    #[error("unexpected end of input while reading string")]
    UnexpectedEndOfString,
    /// A backslash was followed by a byte outside the escape table.
    #[error("bad escape character 0x{0:02x} while reading string")]
    BadEscape(u8),
    /// A `\u` escape contained a non-hex digit.
    #[error("bad unicode escape character 0x{0:02x} while reading string")]
    BadUnicodeEscape(u8),
    /// A high surrogate was not followed by another `\u` escape.
    #[error("expected '{expected}' for second surrogate, got bad byte 0x{found:02x}")]
    ExpectedSurrogateEscape {
        /// The byte that had to come next, `\` or `u`.
        expected: char,
        /// The byte that was found instead.
        found: u8,
    },
    /// A high surrogate was followed by something other than a low surrogate.
    #[error("incomplete surrogate pair")]
    IncompleteSurrogatePair,
    /// A number literal did not fit in the scratch buffer.
    #[error("number is too long (limit {limit} bytes)")]
    NumberTooLong {
        /// The configured scratch capacity.
        limit: usize,
    },
    /// The integer text could not be parsed as an `i64`.
    #[error("failed to scan int: {0}")]
    InvalidInteger(ParseIntError),
    /// The float text could not be parsed as an `f64`.
    #[error("failed to scan float: {0}")]
    InvalidFloat(ParseFloatError),
    /// The float text is well formed but its magnitude does not fit an `f64`.
    #[error("failed to scan float: value out of range")]
    FloatOutOfRange,
    /// A decoded string was not valid UTF-8.
    #[error("invalid utf-8 in string after {valid_up_to} bytes")]
    InvalidUtf8 {
        /// Length of the valid prefix.
        valid_up_to: usize,
    },
}

#[cfg(feature = "std")]
impl From<DecodeError<std::io::Error>> for std::io::Error {
    fn from(err: DecodeError<std::io::Error>) -> Self {
        match err {
            DecodeError::Source(err) => err,
            other => std::io::Error::new(std::io::ErrorKind::InvalidData, other),
        }
    }
}
