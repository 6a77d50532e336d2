/// Configuration options for the [`Decoder`](crate::Decoder).
///
/// # Examples
///
/// ```rust
/// use jsonstream::{Decoder, DecoderOptions, Utf8Mode};
///
/// let options = DecoderOptions {
///     buffer_size: 4096,
///     utf8_mode: Utf8Mode::Lossy,
///     ..Default::default()
/// };
/// let decoder = Decoder::with_options(&b"[]"[..], options);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderOptions {
    /// Number of bytes requested from the source on every refill.
    ///
    /// The read buffer is allocated once with this capacity and reused. A
    /// value of zero is treated as one.
    ///
    /// # Default
    ///
    /// `1024`
    pub buffer_size: usize,

    /// Longest number literal, in bytes, that the decoder will accept.
    ///
    /// Numbers are accumulated in a scratch buffer of this size before being
    /// converted. A literal that does not fit is rejected with
    /// [`SyntaxError::NumberTooLong`](crate::SyntaxError::NumberTooLong)
    /// rather than truncated.
    ///
    /// # Default
    ///
    /// `64`
    pub max_number_len: usize,

    /// How invalid UTF-8 inside string tokens returned by
    /// [`Decoder::next_token`](crate::Decoder::next_token) is handled.
    ///
    /// [`StringReader`](crate::StringReader) always yields the raw decoded
    /// bytes and is not affected.
    ///
    /// # Default
    ///
    /// [`Utf8Mode::Strict`]
    pub utf8_mode: Utf8Mode,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            buffer_size: 1024,
            max_number_len: 64,
            utf8_mode: Utf8Mode::Strict,
        }
    }
}

/// Handling of string bodies that do not decode to valid UTF-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Utf8Mode {
    /// Reject the token with
    /// [`SyntaxError::InvalidUtf8`](crate::SyntaxError::InvalidUtf8).
    #[default]
    Strict,
    /// Replace every invalid sequence with U+FFFD.
    Lossy,
}
