use alloc::{string::String, vec::Vec};
use std::io;

use crate::{DecodeError, Decoder, DecoderOptions, Token};

/// Error returned by [`FailingReader`] once its data runs out.
pub const RANDOM_IO_ERROR: &str = "random IO error";

/// Yields its data one byte per read, then fails with a non-EOF error.
pub struct FailingReader {
    data: Vec<u8>,
    offset: usize,
}

impl FailingReader {
    pub fn new(data: &str) -> Self {
        Self {
            data: data.as_bytes().to_vec(),
            offset: 0,
        }
    }
}

impl io::Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        match self.data.get(self.offset) {
            Some(&b) => {
                buf[0] = b;
                self.offset += 1;
                Ok(1)
            }
            None => Err(io::Error::other(RANDOM_IO_ERROR)),
        }
    }
}

/// Hands out its data in reads of the given sizes (cycled), ignoring larger
/// caller buffers.
pub struct ChunkedReader {
    data: Vec<u8>,
    offset: usize,
    sizes: Vec<usize>,
    turn: usize,
}

impl ChunkedReader {
    pub fn new(data: impl Into<Vec<u8>>, sizes: &[usize]) -> Self {
        let mut sizes: Vec<usize> = sizes.iter().map(|&s| s.max(1)).collect();
        if sizes.is_empty() {
            sizes.push(usize::MAX);
        }
        Self {
            data: data.into(),
            offset: 0,
            sizes,
            turn: 0,
        }
    }
}

impl io::Read for ChunkedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let size = self.sizes[self.turn % self.sizes.len()];
        self.turn += 1;
        let n = size.min(buf.len()).min(self.data.len() - self.offset);
        buf[..n].copy_from_slice(&self.data[self.offset..self.offset + n]);
        self.offset += n;
        Ok(n)
    }
}

pub fn decoder(input: &str) -> Decoder<&[u8]> {
    Decoder::new(input.as_bytes())
}

/// Collects every token, stopping at the first error.
pub fn tokens(input: &str) -> Result<Vec<Token>, DecodeError<io::Error>> {
    decoder(input).collect()
}

pub fn tokens_with<R: io::Read>(
    source: R,
    options: DecoderOptions,
) -> Result<Vec<Token>, DecodeError<io::Error>> {
    Decoder::with_options(source, options).collect()
}

/// Encodes `s` as a JSON string literal the way a conservative writer would:
/// short escapes where they exist and `\uXXXX` (with surrogate pairs) for
/// everything outside printable ASCII.
pub fn escape_ascii(s: &str) -> String {
    use core::fmt::Write;

    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '/' => out.push_str("\\/"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ' '..='~' => out.push(c),
            c => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    write!(out, "\\u{unit:04X}").unwrap();
                }
            }
        }
    }
    out.push('"');
    out
}
