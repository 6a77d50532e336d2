//! Byte cursor: chunked reads from a [`ByteSource`] with one byte of pushback.
//!
//! The cursor owns a read buffer that is allocated once and refilled in
//! place. `next()` drains, in order, the pushback slot, the buffered bytes,
//! and finally the source itself. A read of zero bytes marks the end of the
//! stream; any other read failure is returned as-is and never retried.
//!
//! Line and column are advanced only by [`Cursor::skip_separators`], so
//! reported positions point at the start of the token being read rather than
//! at the exact byte that failed.

use alloc::{vec, vec::Vec};
use core::fmt;

use log::{debug, trace};

use crate::{
    error::{DecodeError, SyntaxError},
    source::ByteSource,
};

/// A line/column pair, both starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Line number, incremented on every line feed.
    pub line: usize,
    /// Column within the line.
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {} at column {}", self.line, self.column)
    }
}

pub(crate) struct Cursor<S> {
    source: S,
    buffer: Vec<u8>,
    filled: usize,
    offset: usize,
    pushback: Option<u8>,
    eof: bool,
    line: usize,
    column: usize,
}

impl<S: ByteSource> Cursor<S> {
    pub(crate) fn new(source: S, buffer_size: usize) -> Self {
        Self {
            source,
            buffer: vec![0; buffer_size.max(1)],
            filled: 0,
            offset: 0,
            pushback: None,
            eof: false,
            line: 1,
            column: 1,
        }
    }

    /// Returns the next byte, or `None` once the source is exhausted.
    #[inline]
    pub(crate) fn next(&mut self) -> Result<Option<u8>, S::Error> {
        if let Some(b) = self.pushback.take() {
            return Ok(Some(b));
        }

        if self.offset == self.filled && !self.refill()? {
            return Ok(None);
        }

        let b = self.buffer[self.offset];
        self.offset += 1;
        Ok(Some(b))
    }

    /// Pushes `b` back so the next call to [`next`](Self::next) returns it.
    ///
    /// Only one byte may be pending at a time.
    #[inline]
    pub(crate) fn unread(&mut self, b: u8) {
        debug_assert!(
            self.pushback.is_none(),
            "second pushback before the first was consumed"
        );
        self.pushback = Some(b);
    }

    /// Returns `true` if [`next`](Self::next) can answer without touching the
    /// source.
    #[inline]
    pub(crate) fn has_buffered(&self) -> bool {
        self.pushback.is_some() || self.offset < self.filled
    }

    fn refill(&mut self) -> Result<bool, S::Error> {
        if self.eof {
            return Ok(false);
        }

        let n = self.source.read(&mut self.buffer)?;
        trace!("refilled read buffer with {n} bytes");
        if n == 0 {
            self.eof = true;
            return Ok(false);
        }

        self.filled = n.min(self.buffer.len());
        self.offset = 0;
        Ok(true)
    }

    /// Skips whitespace, `,` and `:`, returning the first significant byte,
    /// or `None` at the end of the stream.
    pub(crate) fn skip_separators(&mut self) -> Result<Option<u8>, S::Error> {
        while let Some(b) = self.next()? {
            if b == b'\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }

            if !matches!(b, b' ' | b'\t' | b'\r' | b'\n' | b',' | b':') {
                return Ok(Some(b));
            }
        }
        Ok(None)
    }

    pub(crate) fn position(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
        }
    }

    /// Wraps `err` with the current position.
    pub(crate) fn syntax_error(&self, err: SyntaxError) -> DecodeError<S::Error> {
        debug!("syntax error on line {} at column {}: {err}", self.line, self.column);
        DecodeError::Syntax {
            error: err,
            line: self.line,
            column: self.column,
        }
    }

    pub(crate) fn into_inner(self) -> S {
        self.source
    }

    pub(crate) fn get_ref(&self) -> &S {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use quickcheck_macros::quickcheck;

    use super::*;

    fn drain<S: ByteSource>(cursor: &mut Cursor<S>) -> Vec<u8>
    where
        S::Error: fmt::Debug,
    {
        let mut out = Vec::new();
        while let Some(b) = cursor.next().unwrap() {
            out.push(b);
        }
        out
    }

    #[test]
    fn reads_across_refills() {
        let mut cursor = Cursor::new(&b"abcdefg"[..], 3);
        assert_eq!(drain(&mut cursor), b"abcdefg");
        assert_eq!(cursor.next().unwrap(), None);
    }

    #[test]
    fn pushback_is_returned_first() {
        let mut cursor = Cursor::new(&b"xy"[..], 1);
        assert_eq!(cursor.next().unwrap(), Some(b'x'));
        cursor.unread(b'x');
        assert!(cursor.has_buffered());
        assert_eq!(drain(&mut cursor), b"xy");
    }

    #[test]
    fn pushback_survives_end_of_stream() {
        let mut cursor = Cursor::new(&b"7"[..], 8);
        assert_eq!(cursor.next().unwrap(), Some(b'7'));
        assert_eq!(cursor.next().unwrap(), None);
        cursor.unread(b'7');
        assert_eq!(cursor.next().unwrap(), Some(b'7'));
        assert_eq!(cursor.next().unwrap(), None);
    }

    #[test]
    fn zero_buffer_size_is_clamped() {
        let mut cursor = Cursor::new(&b"ok"[..], 0);
        assert_eq!(drain(&mut cursor), b"ok");
    }

    #[test]
    fn skip_tracks_lines_and_columns() {
        let mut cursor = Cursor::new(&b" ,:\n\t x"[..], 4);
        assert_eq!(cursor.skip_separators().unwrap(), Some(b'x'));
        assert_eq!(cursor.position(), Position { line: 2, column: 4 });
        assert_eq!(cursor.skip_separators().unwrap(), None);
    }

    #[test]
    fn separators_only_is_end_of_stream() {
        let mut cursor = Cursor::new(&b"   \t   \n\n :,,, "[..], 1024);
        assert_eq!(cursor.skip_separators().unwrap(), None);
        assert_eq!(cursor.position().line, 3);
    }

    #[quickcheck]
    fn any_buffer_size_yields_same_bytes(data: Vec<u8>, buffer_size: u8) -> bool {
        let mut cursor = Cursor::new(data.as_slice(), usize::from(buffer_size));
        drain(&mut cursor) == data
    }
}
