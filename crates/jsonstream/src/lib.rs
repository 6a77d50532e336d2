//! A streaming, pull-based tokenizer for JSON-like byte streams.
//!
//! [`Decoder`] turns any [`ByteSource`] into a sequence of [`Token`]s:
//! delimiters, booleans, `null`, integers, floats and strings. It does not
//! build a tree and does not check that brackets balance; `,` and `:` are
//! skipped like whitespace. Only one byte of lookahead is ever held, and the
//! body of a string can be streamed through a [`StringReader`] instead of
//! being materialized.
//!
//! ```rust
//! use jsonstream::{Decoder, Delim, Token};
//!
//! let mut decoder = Decoder::new(&br#"{"k": [1, 2.5, null]}"#[..]);
//! let tokens = decoder.by_ref().collect::<Result<Vec<_>, _>>().unwrap();
//! assert_eq!(
//!     tokens,
//!     vec![
//!         Token::Delim(Delim::ObjectStart),
//!         Token::String("k".into()),
//!         Token::Delim(Delim::ArrayStart),
//!         Token::Integer(1),
//!         Token::Float(2.5),
//!         Token::Null,
//!         Token::Delim(Delim::ArrayEnd),
//!         Token::Delim(Delim::ObjectEnd),
//!     ]
//! );
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
extern crate alloc;

mod cursor;
mod decoder;
mod error;
mod escape_buffer;
mod literal_buffer;
mod numbers;
mod options;
mod source;
mod string_reader;
mod token;

#[cfg(all(test, feature = "std"))]
mod tests;

pub use cursor::Position;
pub use decoder::Decoder;
pub use error::{DecodeError, SyntaxError};
pub use options::{DecoderOptions, Utf8Mode};
pub use source::ByteSource;
pub use string_reader::StringReader;
pub use token::{Delim, Token};
