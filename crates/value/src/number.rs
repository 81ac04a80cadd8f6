//! JSON numbers that keep their exact textual form.

use std::fmt;
use std::str::FromStr;

use crate::decimal::Decimal;
use crate::error::NumberError;

/// JSON number stored as its validated lexeme.
///
/// Nothing is converted until a caller asks for a concrete type, so
/// `0.1`, `49.99` or a 30-digit integer survive a parse/write cycle byte for
/// byte. Equality is textual: `1.0` and `1` are different numbers here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Number {
    repr: String,
}

impl Number {
    /// Validate `text` against the JSON number grammar.
    pub fn from_lexeme(text: &str) -> Result<Self, NumberError> {
        if scan_number(text.as_bytes(), 0) == Ok(text.len()) {
            Ok(Self {
                repr: text.to_string(),
            })
        } else {
            Err(NumberError::Invalid(text.to_string()))
        }
    }

    /// `None` for NaN and infinities, which JSON cannot express.
    pub fn from_f64(f: f64) -> Option<Self> {
        if !f.is_finite() {
            return None;
        }
        let repr = if f.fract() == 0.0 && f.abs() < 1e15 {
            format!("{}", f as i64)
        } else {
            format!("{f}")
        };
        Some(Self { repr })
    }

    pub fn as_str(&self) -> &str {
        &self.repr
    }

    /// True when the lexeme has no fraction or exponent part.
    pub fn is_integer(&self) -> bool {
        !self.repr.bytes().any(|b| matches!(b, b'.' | b'e' | b'E'))
    }

    pub fn as_i64(&self) -> Option<i64> {
        if self.is_integer() {
            self.repr.parse().ok()
        } else {
            self.as_decimal().and_then(|d| d.to_i64())
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        if self.is_integer() {
            self.repr.parse().ok()
        } else {
            self.as_i64().and_then(|i| u64::try_from(i).ok())
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.repr.parse().ok()
    }

    /// Exact decimal value, if it fits [`Decimal`].
    pub fn as_decimal(&self) -> Option<Decimal> {
        self.repr.parse().ok()
    }
}

impl FromStr for Number {
    type Err = NumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Number::from_lexeme(s)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr)
    }
}

macro_rules! number_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Number {
                fn from(v: $t) -> Self {
                    Self { repr: v.to_string() }
                }
            }
        )*
    };
}

number_from_int!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128, usize, isize);

impl From<Decimal> for Number {
    fn from(d: Decimal) -> Self {
        Self {
            repr: d.to_string(),
        }
    }
}

/// Scan a JSON number starting at `x`.
///
/// Grammar: `-? (0 | [1-9][0-9]*) (. [0-9]+)? ([eE] [+-]? [0-9]+)?`.
/// Returns the end offset, or the offset where a digit was required.
pub(crate) fn scan_number(data: &[u8], mut x: usize) -> Result<usize, usize> {
    let len = data.len();
    if x < len && data[x] == b'-' {
        x += 1;
    }
    match data.get(x) {
        Some(b'0') => x += 1,
        Some(b'1'..=b'9') => {
            while x < len && data[x].is_ascii_digit() {
                x += 1;
            }
        }
        _ => return Err(x),
    }
    if x < len && data[x] == b'.' {
        x = scan_digits(data, x + 1)?;
    }
    if x < len && (data[x] == b'e' || data[x] == b'E') {
        x += 1;
        if x < len && (data[x] == b'+' || data[x] == b'-') {
            x += 1;
        }
        x = scan_digits(data, x)?;
    }
    Ok(x)
}

/// At least one digit.
fn scan_digits(data: &[u8], start: usize) -> Result<usize, usize> {
    let mut x = start;
    while x < data.len() && data[x].is_ascii_digit() {
        x += 1;
    }
    if x == start {
        Err(start)
    } else {
        Ok(x)
    }
}
