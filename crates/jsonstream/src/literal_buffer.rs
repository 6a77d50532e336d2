use crate::token::Token;

/// What happened after feeding one more byte into the literal matcher?
#[derive(Debug, PartialEq)]
pub(crate) enum Step {
    /// Byte matched, but the literal is not finished yet.
    NeedMore,
    /// Byte matched *and* it was the last byte of the literal.
    Done(Token),
    /// Byte did **not** match the expected one.
    Reject,
}

/// Remaining bytes of a `true`, `false` or `null` literal, after its first
/// byte has been seen.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct ExpectedLiteralBuffer {
    rest: &'static [u8],
    token: LiteralKind,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum LiteralKind {
    Null,
    True,
    False,
}

impl ExpectedLiteralBuffer {
    /// Starts matching after the first byte (`n`, `t`, or `f`).
    pub(crate) fn new(first: u8) -> Option<Self> {
        let (rest, token) = match first {
            b'n' => (&b"ull"[..], LiteralKind::Null),
            b't' => (&b"rue"[..], LiteralKind::True),
            b'f' => (&b"alse"[..], LiteralKind::False),
            _ => return None,
        };
        Some(Self { rest, token })
    }

    /// Gives the matcher the next input byte.
    pub(crate) fn step(&mut self, b: u8) -> Step {
        match self.rest.split_first() {
            Some((&expected, rest)) if expected == b => {
                self.rest = rest;
                if rest.is_empty() {
                    Step::Done(match self.token {
                        LiteralKind::Null => Token::Null,
                        LiteralKind::True => Token::Bool(true),
                        LiteralKind::False => Token::Bool(false),
                    })
                } else {
                    Step::NeedMore
                }
            }
            _ => Step::Reject,
        }
    }
}
