use alloc::vec::Vec;

use crate::{error::SyntaxError, token::Token};

/// Scanned number text, tagged by whether a `.`, `e` or `E` was seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NumberLexeme<'a> {
    Integer(&'a str),
    Float(&'a str),
}

impl NumberLexeme<'_> {
    pub(crate) fn to_token(self) -> Result<Token, SyntaxError> {
        match self {
            NumberLexeme::Integer(text) => text
                .parse::<i64>()
                .map(Token::Integer)
                .map_err(SyntaxError::InvalidInteger),
            NumberLexeme::Float(text) => match text.parse::<f64>() {
                Ok(value) if value.is_finite() => Ok(Token::Float(value)),
                Ok(_) => Err(SyntaxError::FloatOutOfRange),
                Err(err) => Err(SyntaxError::InvalidFloat(err)),
            },
        }
    }
}

/// Bounded scratch space for one number literal. Allocated once per decoder
/// and cleared between numbers.
#[derive(Debug)]
pub(crate) struct NumberScratch {
    buf: Vec<u8>,
    limit: usize,
    is_float: bool,
}

impl NumberScratch {
    pub(crate) fn new(limit: usize) -> Self {
        Self {
            buf: Vec::with_capacity(limit),
            limit,
            is_float: false,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.buf.clear();
        self.is_float = false;
    }

    /// Bytes that may appear in a number literal. No grammar is applied;
    /// `1-2` and `4..` are scanned whole and rejected by the conversion.
    #[inline]
    pub(crate) fn accepts(b: u8) -> bool {
        matches!(b, b'0'..=b'9' | b'-' | b'.' | b'e' | b'E')
    }

    pub(crate) fn push(&mut self, b: u8) -> Result<(), SyntaxError> {
        debug_assert!(Self::accepts(b));
        if self.buf.len() == self.limit {
            return Err(SyntaxError::NumberTooLong { limit: self.limit });
        }
        if matches!(b, b'.' | b'e' | b'E') {
            self.is_float = true;
        }
        self.buf.push(b);
        Ok(())
    }

    pub(crate) fn lexeme(&self) -> NumberLexeme<'_> {
        // Only ASCII bytes are ever pushed.
        let text = core::str::from_utf8(&self.buf).unwrap_or_default();
        if self.is_float {
            NumberLexeme::Float(text)
        } else {
            NumberLexeme::Integer(text)
        }
    }
}
