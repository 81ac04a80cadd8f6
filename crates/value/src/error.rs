//! Error types for the value model.

use std::fmt;

use thiserror::Error;

/// What the parser was looking for when it gave up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    /// Any JSON value.
    Value,
    /// A literal such as `true`, `false` or `null`.
    Literal(&'static str),
    /// A digit inside a number.
    Digit,
    /// `,` or `]` after an array element.
    ArrayCommaOrEnd,
    /// `,` or `}` after an object member.
    ObjectCommaOrEnd,
    /// A quoted object key.
    ObjectKey,
    /// `:` between key and value.
    Colon,
    /// The closing `"` of a string.
    ClosingQuote,
    /// A valid escape sequence after `\`.
    Escape,
    /// A printable character (control characters must be escaped).
    UnescapedChar,
    /// Nothing but whitespace after the top-level value.
    EndOfInput,
    /// Container nesting within the parser limit.
    NestingWithinLimit,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Value => f.write_str("a JSON value"),
            Expected::Literal(lit) => write!(f, "literal `{lit}`"),
            Expected::Digit => f.write_str("a digit"),
            Expected::ArrayCommaOrEnd => f.write_str("`,` or `]`"),
            Expected::ObjectCommaOrEnd => f.write_str("`,` or `}`"),
            Expected::ObjectKey => f.write_str("a quoted object key"),
            Expected::Colon => f.write_str("`:`"),
            Expected::ClosingQuote => f.write_str("closing quote"),
            Expected::Escape => f.write_str("a valid escape sequence"),
            Expected::UnescapedChar => f.write_str("an escaped control character"),
            Expected::EndOfInput => f.write_str("end of input"),
            Expected::NestingWithinLimit => f.write_str("nesting within limit"),
        }
    }
}

/// Malformed JSON text. `position` is a byte offset into the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("syntax error at position {position}: expected {expected}")]
pub struct SyntaxError {
    pub position: usize,
    pub expected: Expected,
}

impl SyntaxError {
    pub(crate) fn new(position: usize, expected: Expected) -> Self {
        Self { position, expected }
    }
}

/// Text that is not a valid decimal number, or one that does not fit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumberError {
    #[error("invalid number: {0:?}")]
    Invalid(String),
    #[error("number out of range: {0}")]
    OutOfRange(String),
}
