//! Accumulation of the four hex digits of a `\uXXXX` escape, plus the UTF-16
//! helpers needed to turn code units into scalar values.
//!
//! [`UnicodeEscapeBuffer`] takes ASCII hex digits one at a time (either case)
//! and yields the 16-bit code unit once exactly four have been seen, resetting
//! itself for the next escape. It does not interpret surrogates; that is the
//! string decoder's job.

use crate::error::SyntaxError;

#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct UnicodeEscapeBuffer {
    value: u16,
    len: u8,
}

impl UnicodeEscapeBuffer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Clears any accumulated digits.
    pub(crate) fn reset(&mut self) {
        self.value = 0;
        self.len = 0;
    }

    /// Feeds one byte of the escape.
    ///
    /// - `Ok(None)` while fewer than four digits have been seen.
    /// - `Ok(Some(unit))` on the fourth digit; the buffer is reset.
    /// - `Err` if `b` is not an ASCII hex digit.
    pub(crate) fn feed(&mut self, b: u8) -> Result<Option<u16>, SyntaxError> {
        let digit = match b {
            b'0'..=b'9' => b - b'0',
            b'a'..=b'f' => b - b'a' + 10,
            b'A'..=b'F' => b - b'A' + 10,
            _ => return Err(SyntaxError::BadUnicodeEscape(b)),
        };

        self.value = (self.value << 4) | u16::from(digit);
        self.len += 1;

        if self.len == 4 {
            let unit = self.value;
            self.reset();
            Ok(Some(unit))
        } else {
            Ok(None)
        }
    }
}

#[inline]
pub(crate) fn is_high_surrogate(unit: u16) -> bool {
    (0xD800..=0xDBFF).contains(&unit)
}

#[inline]
pub(crate) fn is_low_surrogate(unit: u16) -> bool {
    (0xDC00..=0xDFFF).contains(&unit)
}

/// Combines a high and a low surrogate into the scalar value they encode.
#[inline]
pub(crate) fn combine_surrogates(high: u16, low: u16) -> char {
    debug_assert!(is_high_surrogate(high) && is_low_surrogate(low));
    let code = 0x10000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
    char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER)
}
