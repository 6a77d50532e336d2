//! The token-level pull API.
//!
//! `next_token` skips separators, classifies the first significant byte and
//! hands off to the literal matcher, the number scanner, or the string reader.
//! Nothing here tracks nesting: `1,2,3` at the top level is three integers and
//! `}}` is two delimiters. Callers that need grammar checks layer them on top.

use alloc::{string::String, vec::Vec};

use bstr::ByteVec;

use crate::{
    cursor::{Cursor, Position},
    error::{DecodeError, SyntaxError},
    literal_buffer::{ExpectedLiteralBuffer, Step},
    numbers::NumberScratch,
    options::{DecoderOptions, Utf8Mode},
    source::ByteSource,
    string_reader::StringReader,
    token::{Delim, Token},
};

/// A pull-based tokenizer over a [`ByteSource`].
///
/// Each call to [`next_token`](Self::next_token) reads just enough input to
/// produce one [`Token`]. The decoder is also an [`Iterator`] over
/// `Result<Token, DecodeError<_>>`.
///
/// After any error other than [`DecodeError::NotString`] the position within
/// the input is unspecified and the decoder should be discarded.
pub struct Decoder<S> {
    cursor: Cursor<S>,
    number: NumberScratch,
    options: DecoderOptions,
}

impl<S: ByteSource> Decoder<S> {
    /// Creates a decoder with [`DecoderOptions::default`].
    pub fn new(source: S) -> Self {
        Self::with_options(source, DecoderOptions::default())
    }

    /// Creates a decoder with the given options.
    pub fn with_options(source: S, options: DecoderOptions) -> Self {
        Self {
            cursor: Cursor::new(source, options.buffer_size),
            number: NumberScratch::new(options.max_number_len),
            options,
        }
    }

    /// Returns the next token, or `None` once only separators remain.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::Syntax`] for malformed or truncated tokens.
    /// - [`DecodeError::Source`] if the byte source fails.
    pub fn next_token(&mut self) -> Result<Option<Token>, DecodeError<S::Error>> {
        let Some(first) = self.skip()? else {
            return Ok(None);
        };
        self.read_token(first).map(Some)
    }

    /// Returns a reader over the body of the next token, which must be a
    /// string. The opening quote is consumed; nothing else is read until the
    /// reader is used.
    ///
    /// Returns `Ok(None)` if the input holds no more tokens.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::NotString`] if the next token is not a string. The
    ///   token is left unread and can still be fetched with
    ///   [`next_token`](Self::next_token).
    /// - [`DecodeError::Source`] if the byte source fails.
    pub fn string_reader(
        &mut self,
    ) -> Result<Option<StringReader<'_, S>>, DecodeError<S::Error>> {
        let Some(first) = self.skip()? else {
            return Ok(None);
        };
        if first != b'"' {
            self.cursor.unread(first);
            return Err(DecodeError::NotString);
        }
        Ok(Some(StringReader::new(&mut self.cursor)))
    }

    /// Position of the last separator boundary.
    pub fn position(&self) -> Position {
        self.cursor.position()
    }

    /// The options this decoder was created with.
    pub fn options(&self) -> &DecoderOptions {
        &self.options
    }

    /// Borrows the underlying source.
    pub fn get_ref(&self) -> &S {
        self.cursor.get_ref()
    }

    /// Returns the underlying source. Bytes already buffered are lost.
    pub fn into_inner(self) -> S {
        self.cursor.into_inner()
    }

    fn skip(&mut self) -> Result<Option<u8>, DecodeError<S::Error>> {
        self.cursor.skip_separators().map_err(DecodeError::Source)
    }

    fn read_token(&mut self, first: u8) -> Result<Token, DecodeError<S::Error>> {
        if let Some(delim) = Delim::from_byte(first) {
            return Ok(Token::Delim(delim));
        }

        match first {
            b'"' => self.read_string().map(Token::String),
            b't' | b'f' | b'n' => self.read_literal(first),
            b'-' | b'.' | b'0'..=b'9' => {
                self.cursor.unread(first);
                self.read_number()
            }
            _ => Err(self.cursor.syntax_error(SyntaxError::UnexpectedByte(first))),
        }
    }

    fn read_literal(&mut self, first: u8) -> Result<Token, DecodeError<S::Error>> {
        let Some(mut literal) = ExpectedLiteralBuffer::new(first) else {
            return Err(self.cursor.syntax_error(SyntaxError::UnexpectedByte(first)));
        };

        loop {
            let Some(b) = self.cursor.next().map_err(DecodeError::Source)? else {
                return Err(self.cursor.syntax_error(SyntaxError::UnexpectedEndOfLiteral));
            };
            match literal.step(b) {
                Step::NeedMore => {}
                Step::Done(token) => return Ok(token),
                Step::Reject => {
                    return Err(self.cursor.syntax_error(SyntaxError::BadLiteralByte(b)));
                }
            }
        }
    }

    fn read_number(&mut self) -> Result<Token, DecodeError<S::Error>> {
        self.number.clear();

        while let Some(b) = self.cursor.next().map_err(DecodeError::Source)? {
            if !NumberScratch::accepts(b) {
                self.cursor.unread(b);
                break;
            }
            if let Err(err) = self.number.push(b) {
                return Err(self.cursor.syntax_error(err));
            }
        }

        self.number
            .lexeme()
            .to_token()
            .map_err(|err| self.cursor.syntax_error(err))
    }

    fn read_string(&mut self) -> Result<String, DecodeError<S::Error>> {
        let mut bytes = Vec::new();
        StringReader::new(&mut self.cursor).drain_into(&mut bytes)?;

        match self.options.utf8_mode {
            Utf8Mode::Strict => bytes.into_string().map_err(|err| {
                self.cursor.syntax_error(SyntaxError::InvalidUtf8 {
                    valid_up_to: err.utf8_error().valid_up_to(),
                })
            }),
            Utf8Mode::Lossy => Ok(bytes.into_string_lossy()),
        }
    }
}

impl<S: ByteSource> Iterator for Decoder<S> {
    type Item = Result<Token, DecodeError<S::Error>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}
