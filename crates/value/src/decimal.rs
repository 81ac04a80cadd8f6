//! Fixed-point base-10 numbers for monetary values.
//!
//! A decimal is a signed `i128` mantissa and a scale: the value is
//! `mantissa * 10^-scale`. Text conversion is exact in both directions, so a
//! price such as `49.99` never passes through binary floating point.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::error::NumberError;

/// Largest scale a decimal may carry; `10^38` is the first power of ten that
/// no longer fits an `i128`.
pub const MAX_SCALE: u32 = 38;

#[derive(Debug, Clone, Copy, Default)]
pub struct Decimal {
    mantissa: i128,
    scale: u32,
}

impl Decimal {
    pub const ZERO: Decimal = Decimal {
        mantissa: 0,
        scale: 0,
    };

    /// Build `mantissa * 10^-scale`. Returns `None` when `scale > MAX_SCALE`.
    pub fn new(mantissa: i128, scale: u32) -> Option<Self> {
        (scale <= MAX_SCALE).then_some(Self { mantissa, scale })
    }

    pub fn mantissa(&self) -> i128 {
        self.mantissa
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn is_integer(&self) -> bool {
        let n = self.normalized();
        n.scale == 0
    }

    /// Integral value, when the decimal has no fractional part and fits `i64`.
    pub fn to_i64(&self) -> Option<i64> {
        let n = self.normalized();
        if n.scale != 0 {
            return None;
        }
        i64::try_from(n.mantissa).ok()
    }

    /// Nearest `f64`. Lossy by nature; only for display and arithmetic callers.
    pub fn to_f64(&self) -> f64 {
        // Going through text keeps the conversion correctly rounded.
        self.to_string().parse().unwrap_or(f64::NAN)
    }

    /// Same value with trailing fractional zeros removed.
    pub fn normalized(&self) -> Self {
        let mut mantissa = self.mantissa;
        let mut scale = self.scale;
        while scale > 0 && mantissa % 10 == 0 {
            mantissa /= 10;
            scale -= 1;
        }
        Self { mantissa, scale }
    }

    fn rescaled(&self, scale: u32) -> Option<i128> {
        let factor = 10i128.checked_pow(scale - self.scale)?;
        self.mantissa.checked_mul(factor)
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        let (a, b) = (self.normalized(), other.normalized());
        a.mantissa == b.mantissa && a.scale == b.scale
    }
}

impl Eq for Decimal {}

impl Hash for Decimal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let n = self.normalized();
        n.mantissa.hash(state);
        n.scale.hash(state);
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b) = (self.normalized(), other.normalized());
        let scale = a.scale.max(b.scale);
        match (a.rescaled(scale), b.rescaled(scale)) {
            (Some(x), Some(y)) => x.cmp(&y),
            _ => a.to_f64().total_cmp(&b.to_f64()),
        }
    }
}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<i32> for Decimal {
    fn from(v: i32) -> Self {
        Self {
            mantissa: v.into(),
            scale: 0,
        }
    }
}

impl From<i64> for Decimal {
    fn from(v: i64) -> Self {
        Self {
            mantissa: v.into(),
            scale: 0,
        }
    }
}

impl From<u32> for Decimal {
    fn from(v: u32) -> Self {
        Self {
            mantissa: v.into(),
            scale: 0,
        }
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.scale == 0 {
            return write!(f, "{}", self.mantissa);
        }
        let digits = self.mantissa.unsigned_abs().to_string();
        let scale = self.scale as usize;
        let padded = if digits.len() <= scale {
            format!("{}{}", "0".repeat(scale + 1 - digits.len()), digits)
        } else {
            digits
        };
        let (int, frac) = padded.split_at(padded.len() - scale);
        if self.mantissa < 0 {
            f.write_str("-")?;
        }
        write!(f, "{int}.{frac}")
    }
}

impl FromStr for Decimal {
    type Err = NumberError;

    /// Accepts JSON number syntax: `-?digits(.digits)?([eE][+-]?digits)?`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || NumberError::Invalid(s.to_string());
        let overflow = || NumberError::OutOfRange(s.to_string());
        let bytes = s.as_bytes();
        let mut x = 0;
        let negative = bytes.first() == Some(&b'-');
        if negative {
            x += 1;
        }

        let mut mantissa: i128 = 0;
        let push_digit = |m: &mut i128, d: u8| -> Result<(), NumberError> {
            *m = m
                .checked_mul(10)
                .and_then(|m| m.checked_add((d - b'0') as i128))
                .ok_or_else(overflow)?;
            Ok(())
        };

        let int_start = x;
        while x < bytes.len() && bytes[x].is_ascii_digit() {
            push_digit(&mut mantissa, bytes[x])?;
            x += 1;
        }
        if x == int_start {
            return Err(invalid());
        }

        let mut frac_len: i64 = 0;
        if x < bytes.len() && bytes[x] == b'.' {
            x += 1;
            let frac_start = x;
            while x < bytes.len() && bytes[x].is_ascii_digit() {
                push_digit(&mut mantissa, bytes[x])?;
                x += 1;
            }
            if x == frac_start {
                return Err(invalid());
            }
            frac_len = (x - frac_start) as i64;
        }

        let mut exponent: i64 = 0;
        if x < bytes.len() && (bytes[x] == b'e' || bytes[x] == b'E') {
            x += 1;
            let exp_negative = match bytes.get(x) {
                Some(b'-') => {
                    x += 1;
                    true
                }
                Some(b'+') => {
                    x += 1;
                    false
                }
                _ => false,
            };
            let exp_start = x;
            while x < bytes.len() && bytes[x].is_ascii_digit() {
                exponent = exponent
                    .checked_mul(10)
                    .and_then(|e| e.checked_add((bytes[x] - b'0') as i64))
                    .ok_or_else(overflow)?;
                x += 1;
            }
            if x == exp_start {
                return Err(invalid());
            }
            if exp_negative {
                exponent = -exponent;
            }
        }
        if x != bytes.len() {
            return Err(invalid());
        }

        let mut scale = frac_len - exponent;
        if mantissa == 0 {
            // Any exponent is valid on zero; keep the written scale where it fits.
            scale = scale.clamp(0, MAX_SCALE as i64);
        } else if scale < 0 {
            let factor = u32::try_from(-scale)
                .ok()
                .and_then(|p| 10i128.checked_pow(p))
                .ok_or_else(overflow)?;
            mantissa = mantissa.checked_mul(factor).ok_or_else(overflow)?;
            scale = 0;
        }
        let scale = u32::try_from(scale)
            .ok()
            .filter(|s| *s <= MAX_SCALE)
            .ok_or_else(overflow)?;
        if negative {
            mantissa = -mantissa;
        }
        Ok(Self { mantissa, scale })
    }
}
