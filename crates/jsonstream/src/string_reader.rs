//! Lazy decoding of a string body.
//!
//! [`StringDecoder`] is the escape state machine: it is fed raw bytes that
//! follow an opening quote and queues decoded bytes. [`StringReader`] drives
//! it from the decoder's cursor. Both `Decoder::next_token` and
//! `Decoder::string_reader` go through the same reader, the former simply
//! draining it, so the two paths cannot disagree about escapes.
//!
//! States:
//! - `Default`: `"` finishes the string, `\` starts an escape, anything else
//!   is passed through.
//! - `Escape`: one of `"\/bfnrt`, or `u` to start a unicode escape.
//! - `UnicodeHex`: four hex digits forming one UTF-16 code unit.
//! - `SurrogateContinuation`: after a high surrogate, the literal `\u` that
//!   must introduce its low half.

use alloc::vec::Vec;

use log::trace;

use crate::{
    cursor::Cursor,
    error::{DecodeError, SyntaxError},
    escape_buffer::{UnicodeEscapeBuffer, combine_surrogates, is_high_surrogate, is_low_surrogate},
    source::ByteSource,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Default,
    Escape,
    UnicodeHex,
    SurrogateContinuation { seen_backslash: bool },
    Finished,
}

/// Decoded bytes waiting to be handed out. Holds at most one UTF-8 encoded
/// scalar.
#[derive(Debug, Default, Clone, Copy)]
struct OutputQueue {
    bytes: [u8; 4],
    start: u8,
    end: u8,
}

impl OutputQueue {
    fn push_byte(&mut self, b: u8) {
        debug_assert!(self.is_empty());
        self.bytes[0] = b;
        self.start = 0;
        self.end = 1;
    }

    fn push_char(&mut self, c: char) {
        debug_assert!(self.is_empty());
        let len = c.encode_utf8(&mut self.bytes).len();
        self.start = 0;
        // A UTF-8 scalar is at most four bytes.
        self.end = u8::try_from(len).unwrap_or(4);
    }

    fn pop(&mut self) -> Option<u8> {
        if self.is_empty() {
            return None;
        }
        let b = self.bytes[usize::from(self.start)];
        self.start += 1;
        Some(b)
    }

    fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// The escape state machine for one string body.
#[derive(Debug, Clone)]
pub(crate) struct StringDecoder {
    state: State,
    unicode: UnicodeEscapeBuffer,
    high_surrogate: Option<u16>,
    queue: OutputQueue,
}

impl StringDecoder {
    pub(crate) fn new() -> Self {
        Self {
            state: State::Default,
            unicode: UnicodeEscapeBuffer::new(),
            high_surrogate: None,
            queue: OutputQueue::default(),
        }
    }

    /// `true` once the closing quote has been seen.
    pub(crate) fn is_finished(&self) -> bool {
        self.state == State::Finished
    }

    /// Takes the next decoded byte, if one is queued.
    pub(crate) fn pop(&mut self) -> Option<u8> {
        self.queue.pop()
    }

    /// Advances the state machine by one raw byte. Must only be called while
    /// the queue is empty and the string is not finished.
    pub(crate) fn feed(&mut self, b: u8) -> Result<(), SyntaxError> {
        debug_assert!(self.queue.is_empty());
        match self.state {
            State::Default => match b {
                b'"' => self.state = State::Finished,
                b'\\' => self.state = State::Escape,
                _ => self.queue.push_byte(b),
            },
            State::Escape => {
                if b == b'u' {
                    self.unicode.reset();
                    self.state = State::UnicodeHex;
                    return Ok(());
                }
                let decoded = match b {
                    b'"' | b'\\' | b'/' => b,
                    b'b' => 0x08,
                    b'f' => 0x0C,
                    b'n' => b'\n',
                    b'r' => b'\r',
                    b't' => b'\t',
                    _ => return Err(SyntaxError::BadEscape(b)),
                };
                self.queue.push_byte(decoded);
                self.state = State::Default;
            }
            State::UnicodeHex => {
                if let Some(unit) = self.unicode.feed(b)? {
                    self.unit(unit)?;
                }
            }
            State::SurrogateContinuation {
                seen_backslash: false,
            } => {
                if b != b'\\' {
                    return Err(SyntaxError::ExpectedSurrogateEscape {
                        expected: '\\',
                        found: b,
                    });
                }
                self.state = State::SurrogateContinuation {
                    seen_backslash: true,
                };
            }
            State::SurrogateContinuation {
                seen_backslash: true,
            } => {
                if b != b'u' {
                    return Err(SyntaxError::ExpectedSurrogateEscape {
                        expected: 'u',
                        found: b,
                    });
                }
                self.unicode.reset();
                self.state = State::UnicodeHex;
            }
            State::Finished => debug_assert!(false, "fed a finished string"),
        }
        Ok(())
    }

    /// Handles one complete `\uXXXX` code unit.
    fn unit(&mut self, unit: u16) -> Result<(), SyntaxError> {
        match self.high_surrogate.take() {
            None if is_high_surrogate(unit) => {
                self.high_surrogate = Some(unit);
                self.state = State::SurrogateContinuation {
                    seen_backslash: false,
                };
                return Ok(());
            }
            // A lone low surrogate has no scalar value of its own.
            None => self.queue.push_char(
                char::from_u32(u32::from(unit)).unwrap_or(char::REPLACEMENT_CHARACTER),
            ),
            Some(high) if is_low_surrogate(unit) => {
                self.queue.push_char(combine_surrogates(high, unit));
            }
            Some(_) => return Err(SyntaxError::IncompleteSurrogatePair),
        }
        self.state = State::Default;
        Ok(())
    }
}

/// Incremental reader over the decoded body of one string token.
///
/// Obtained from [`Decoder::string_reader`](crate::Decoder::string_reader).
/// The reader borrows the decoder mutably, so no other token can be read
/// while it is alive. Once the closing quote has been consumed every further
/// read reports exhaustion (`Ok(None)` / `Ok(0)`), never an error.
///
/// Dropping the reader before it is finished leaves the decoder inside the
/// string body; call [`skip`](Self::skip) first if tokenizing should
/// continue.
///
/// The bytes produced are exactly the decoded string and are not checked for
/// UTF-8 validity.
pub struct StringReader<'a, S: ByteSource> {
    cursor: &'a mut Cursor<S>,
    decoder: StringDecoder,
    decoded: usize,
    // Raised after `read_into` already produced bytes; returned by the next call.
    deferred: Option<DecodeError<S::Error>>,
}

impl<'a, S: ByteSource> StringReader<'a, S> {
    /// The opening quote must already have been consumed from `cursor`.
    pub(crate) fn new(cursor: &'a mut Cursor<S>) -> Self {
        Self {
            cursor,
            decoder: StringDecoder::new(),
            decoded: 0,
            deferred: None,
        }
    }

    /// Returns the next decoded byte, or `None` after the closing quote.
    ///
    /// # Errors
    ///
    /// A malformed escape, the end of the input before the closing quote, or a
    /// failure of the byte source.
    pub fn next_byte(&mut self) -> Result<Option<u8>, DecodeError<S::Error>> {
        if let Some(err) = self.deferred.take() {
            return Err(err);
        }
        loop {
            if let Some(b) = self.decoder.pop() {
                self.decoded += 1;
                return Ok(Some(b));
            }
            if self.decoder.is_finished() {
                return Ok(None);
            }

            let Some(b) = self.cursor.next().map_err(DecodeError::Source)? else {
                return Err(self.cursor.syntax_error(SyntaxError::UnexpectedEndOfString));
            };
            self.decoder
                .feed(b)
                .map_err(|err| self.cursor.syntax_error(err))?;

            if self.decoder.is_finished() {
                trace!("string finished after {} decoded bytes", self.decoded);
            }
        }
    }

    /// Reads decoded bytes into `buf`, returning how many were written.
    ///
    /// Returns early, with at least one byte, rather than block on the source
    /// once the already-buffered input has been used up. `Ok(0)` means the
    /// string is finished (or `buf` is empty).
    ///
    /// # Errors
    ///
    /// Same as [`next_byte`](Self::next_byte). An error hit after some bytes
    /// were written is held back: this call returns those bytes and the next
    /// call returns the error.
    pub fn read_into(&mut self, buf: &mut [u8]) -> Result<usize, DecodeError<S::Error>> {
        let mut n = 0;
        while n < buf.len() {
            if n > 0 && self.decoder.queue.is_empty() && !self.cursor.has_buffered() {
                break;
            }
            match self.next_byte() {
                Ok(Some(b)) => {
                    buf[n] = b;
                    n += 1;
                }
                Ok(None) => break,
                Err(err) if n > 0 => {
                    self.deferred = Some(err);
                    break;
                }
                Err(err) => return Err(err),
            }
        }
        Ok(n)
    }

    /// Appends the rest of the string to `out` and returns how many bytes were
    /// appended.
    ///
    /// # Errors
    ///
    /// Same as [`next_byte`](Self::next_byte). Bytes decoded before the error
    /// remain in `out`.
    pub fn drain_into(&mut self, out: &mut Vec<u8>) -> Result<usize, DecodeError<S::Error>> {
        let start = out.len();
        while let Some(b) = self.next_byte()? {
            out.push(b);
        }
        Ok(out.len() - start)
    }

    /// Consumes and discards the rest of the string, leaving the decoder
    /// positioned after the closing quote.
    ///
    /// # Errors
    ///
    /// Same as [`next_byte`](Self::next_byte).
    pub fn skip(&mut self) -> Result<(), DecodeError<S::Error>> {
        while self.next_byte()?.is_some() {}
        Ok(())
    }

    /// `true` once the closing quote has been consumed and every decoded byte
    /// has been returned.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.deferred.is_none() && self.decoder.is_finished() && self.decoder.queue.is_empty()
    }

    /// Number of decoded bytes returned so far.
    #[must_use]
    pub fn decoded_len(&self) -> usize {
        self.decoded
    }
}

#[cfg(feature = "std")]
impl<S> std::io::Read for StringReader<'_, S>
where
    S: ByteSource<Error = std::io::Error>,
{
    /// Decode errors become [`std::io::ErrorKind::InvalidData`]; errors of
    /// the underlying source are returned unchanged.
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.read_into(buf).map_err(std::io::Error::from)
    }
}
