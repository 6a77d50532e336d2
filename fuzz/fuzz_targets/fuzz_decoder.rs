#![no_main]
use std::io;

use arbitrary::Arbitrary;
use jsonstream::{DecodeError, Decoder, DecoderOptions, Token, Utf8Mode};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    buffer_size: u8,
    splits: Vec<u8>,
    data: Vec<u8>,
}

/// Serves `data` in the read sizes listed in `splits`, cycling through them.
struct Split<'a> {
    data: &'a [u8],
    splits: &'a [u8],
    next: usize,
}

impl io::Read for Split<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let want = if self.splits.is_empty() {
            buf.len()
        } else {
            let s = usize::from(self.splits[self.next % self.splits.len()]).max(1);
            self.next += 1;
            s
        };
        let n = want.min(buf.len()).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

fn options(buffer_size: u8) -> DecoderOptions {
    DecoderOptions {
        buffer_size: usize::from(buffer_size),
        utf8_mode: Utf8Mode::Lossy,
        ..Default::default()
    }
}

/// Decodes everything eagerly, stopping at the first error.
fn eager(input: &Input) -> (Vec<Token>, bool) {
    let source = Split {
        data: &input.data,
        splits: &input.splits,
        next: 0,
    };
    let mut tokens = Vec::new();
    for token in Decoder::with_options(source, options(input.buffer_size)) {
        match token {
            Ok(token) => tokens.push(token),
            Err(_) => return (tokens, true),
        }
    }
    (tokens, false)
}

/// Decodes with every string routed through a `StringReader`, pulled one byte
/// at a time.
fn lazy(input: &Input) -> (Vec<Token>, bool) {
    let mut decoder = Decoder::with_options(&input.data[..], options(input.buffer_size));
    let mut tokens = Vec::new();
    loop {
        match decoder.string_reader() {
            Ok(Some(mut reader)) => {
                let mut bytes = Vec::new();
                loop {
                    match reader.next_byte() {
                        Ok(Some(b)) => bytes.push(b),
                        Ok(None) => break,
                        Err(_) => return (tokens, true),
                    }
                }
                assert_eq!(reader.decoded_len(), bytes.len());
                tokens.push(Token::String(String::from_utf8_lossy(&bytes).into_owned()));
            }
            Ok(None) => return (tokens, false),
            Err(DecodeError::NotString) => match decoder.next_token() {
                Ok(Some(token)) => {
                    assert!(!matches!(token, Token::String(_)));
                    tokens.push(token);
                }
                Ok(None) => unreachable!("NotString implies a pending token"),
                Err(_) => return (tokens, true),
            },
            Err(_) => return (tokens, true),
        }
    }
}

fn same(a: &[Token], b: &[Token]) -> bool {
    a.len() == b.len()
        && a.iter().zip(b).all(|pair| match pair {
            (Token::Float(x), Token::Float(y)) => x.to_bits() == y.to_bits(),
            (x, y) => x == y,
        })
}

fuzz_target!(|input: Input| {
    let (eager_tokens, eager_failed) = eager(&input);
    let (lazy_tokens, lazy_failed) = lazy(&input);

    assert!(same(&eager_tokens, &lazy_tokens), "{eager_tokens:?} != {lazy_tokens:?}");
    assert_eq!(eager_failed, lazy_failed);

    // A lone JSON string accepted by serde_json decodes to the same text.
    if let Ok(serde_json::Value::String(expected)) = serde_json::from_slice(&input.data) {
        if !eager_failed && eager_tokens.len() == 1 {
            assert_eq!(eager_tokens[0], Token::String(expected));
        }
    }

    // Rendering and re-decoding is stable for everything that decoded.
    assert!(
        eager_tokens
            .iter()
            .all(|t| !matches!(t, Token::Float(f) if !f.is_finite()))
    );
    let rendered: Vec<u8> = eager_tokens
        .iter()
        .flat_map(|t| format!("{t} ").into_bytes())
        .collect();
    let (again, failed) = eager(&Input {
        buffer_size: input.buffer_size,
        splits: Vec::new(),
        data: rendered,
    });
    assert!(!failed);
    assert!(same(&eager_tokens, &again));
});
