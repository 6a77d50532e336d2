#![allow(missing_docs)]

mod common;

use std::io::{self, BufReader, Read};

use common::{FailingReader, RANDOM_IO_ERROR, collect};
use jsonstream::{DecodeError, Decoder, Delim, SyntaxError, Token};

#[test]
fn decodes_from_any_reader() {
    let text = r#"{"name": "Ferris", "legs": 10, "claws": [true, false]}"#;
    let expected = collect(text);

    let reader = BufReader::with_capacity(3, io::Cursor::new(text.as_bytes().to_vec()));
    let decoded: Vec<Token> = Decoder::new(reader).collect::<Result<_, _>>().unwrap();
    assert_eq!(decoded, expected);
    assert_eq!(decoded[0], Token::Delim(Delim::ObjectStart));
    assert_eq!(decoded[4], Token::Integer(10));
}

#[test]
fn io_copy_streams_a_string_value() {
    let payload = "x".repeat(10_000);
    let doc = format!(r#"["{payload}", 7]"#);
    let mut decoder = Decoder::new(doc.as_bytes());

    assert_eq!(
        decoder.next_token().unwrap(),
        Some(Token::Delim(Delim::ArrayStart))
    );
    let mut sink = Vec::new();
    {
        let mut reader = decoder.string_reader().unwrap().unwrap();
        let copied = io::copy(&mut reader, &mut sink).unwrap();
        assert_eq!(copied, 10_000);
        assert!(reader.is_finished());
    }
    assert_eq!(sink, payload.as_bytes());
    assert_eq!(decoder.next_token().unwrap(), Some(Token::Integer(7)));
    assert_eq!(
        decoder.next_token().unwrap(),
        Some(Token::Delim(Delim::ArrayEnd))
    );
    assert_eq!(decoder.next_token().unwrap(), None);
}

#[test]
fn syntax_errors_become_invalid_data() {
    let mut decoder = Decoder::new(&br#""bad \q""#[..]);
    let mut reader = decoder.string_reader().unwrap().unwrap();
    let mut out = String::new();
    let err = reader.read_to_string(&mut out).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    assert_eq!(
        err.to_string(),
        "bad escape character 0x71 while reading string on line 1 at column 2"
    );
}

#[test]
fn source_errors_are_not_wrapped() {
    let mut decoder = Decoder::new(FailingReader(b"[tr"));
    assert_eq!(
        decoder.next_token().unwrap(),
        Some(Token::Delim(Delim::ArrayStart))
    );
    let err = decoder.next_token().unwrap_err();
    assert!(err.is_source());
    assert!(err.syntax().is_none());

    let io_err = io::Error::from(err);
    assert_eq!(io_err.kind(), io::ErrorKind::Other);
    assert_eq!(io_err.to_string(), RANDOM_IO_ERROR);
}

#[test]
fn truncated_literal_is_a_syntax_error_not_eof() {
    let err = Decoder::new(&b"fals"[..]).next_token().unwrap_err();
    assert!(matches!(
        err,
        DecodeError::Syntax {
            error: SyntaxError::UnexpectedEndOfLiteral,
            line: 1,
            column: 2,
        }
    ));
}

#[test]
fn syntax_error_is_reported_once_in_the_chain() {
    let err = Decoder::new(&b"  nope"[..]).next_token().unwrap_err();
    assert_eq!(
        err.to_string(),
        "unexpected input 0x6f while reading literal on line 1 at column 4"
    );
    assert!(std::error::Error::source(&err).is_none());
}
