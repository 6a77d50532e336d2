#![allow(missing_docs, dead_code)]

use std::io;

use jsonstream::{Decoder, Token};

pub const RANDOM_IO_ERROR: &str = "random IO error";

/// Yields its data one byte per read, then fails with a non-EOF error.
pub struct FailingReader(pub &'static [u8]);

impl io::Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.0.split_first() {
            Some((&b, rest)) if !buf.is_empty() => {
                buf[0] = b;
                self.0 = rest;
                Ok(1)
            }
            Some(_) => Ok(0),
            None => Err(io::Error::other(RANDOM_IO_ERROR)),
        }
    }
}

/// Renders every token separated by a space, or the first error.
pub fn render_tokens(input: &[u8]) -> String {
    let mut out = Vec::new();
    for token in Decoder::new(input) {
        match token {
            Ok(token) => out.push(token.to_string()),
            Err(err) => {
                out.push(format!("error: {err}"));
                break;
            }
        }
    }
    out.join(" ")
}

pub fn collect(input: &str) -> Vec<Token> {
    Decoder::new(input.as_bytes())
        .collect::<Result<_, _>>()
        .expect("valid input")
}
