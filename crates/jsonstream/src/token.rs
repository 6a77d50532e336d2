use alloc::string::String;
use core::fmt::{self, Write};

/// One of the four structural delimiters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Delim {
    /// `{`
    ObjectStart,
    /// `}`
    ObjectEnd,
    /// `[`
    ArrayStart,
    /// `]`
    ArrayEnd,
}

impl Delim {
    /// Maps a byte to its delimiter, if it is one.
    #[must_use]
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            b'{' => Some(Delim::ObjectStart),
            b'}' => Some(Delim::ObjectEnd),
            b'[' => Some(Delim::ArrayStart),
            b']' => Some(Delim::ArrayEnd),
            _ => None,
        }
    }

    /// The byte this delimiter was read from.
    #[must_use]
    pub fn as_byte(self) -> u8 {
        match self {
            Delim::ObjectStart => b'{',
            Delim::ObjectEnd => b'}',
            Delim::ArrayStart => b'[',
            Delim::ArrayEnd => b']',
        }
    }
}

impl fmt::Display for Delim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(self.as_byte() as char)
    }
}

/// A single lexical token.
///
/// Tokens own their payload; nothing borrows from the decoder.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Token {
    /// `{`, `}`, `[` or `]`.
    Delim(Delim),
    /// `true` or `false`.
    Bool(bool),
    /// `null`.
    Null,
    /// A number without `.`, `e` or `E`.
    Integer(i64),
    /// A number with `.`, `e` or `E`.
    Float(f64),
    /// A fully decoded string.
    String(String),
}

impl Token {
    /// Returns `true` if the token is a [`Delim`].
    #[must_use]
    pub fn is_delim(&self) -> bool {
        matches!(self, Token::Delim(_))
    }

    /// Returns the string payload, if any.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Token::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<Delim> for Token {
    fn from(d: Delim) -> Self {
        Token::Delim(d)
    }
}

/// Renders the token as JSON text.
///
/// Non-finite floats have no JSON spelling and are written as `null`.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Delim(d) => d.fmt(f),
            Token::Bool(b) => f.write_str(if *b { "true" } else { "false" }),
            Token::Null => f.write_str("null"),
            Token::Integer(i) => write!(f, "{i}"),
            Token::Float(n) if !n.is_finite() => f.write_str("null"),
            // `Debug` keeps a `.0` or exponent so the text re-reads as a float.
            Token::Float(n) => write!(f, "{n:?}"),
            Token::String(s) => {
                f.write_char('"')?;
                write_escaped_string(s, f)?;
                f.write_char('"')
            }
        }
    }
}

/// Writes `src` with JSON string escapes applied, without surrounding quotes.
pub(crate) fn write_escaped_string<W: Write>(src: &str, dst: &mut W) -> fmt::Result {
    for c in src.chars() {
        match c {
            '"' => dst.write_str("\\\"")?,
            '\\' => dst.write_str("\\\\")?,
            '\u{0008}' => dst.write_str("\\b")?,
            '\u{000C}' => dst.write_str("\\f")?,
            '\n' => dst.write_str("\\n")?,
            '\r' => dst.write_str("\\r")?,
            '\t' => dst.write_str("\\t")?,
            c if c.is_control() => write!(dst, "\\u{:04x}", c as u32)?,
            c => dst.write_char(c)?,
        }
    }
    Ok(())
}
