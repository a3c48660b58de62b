//! Fixed-precision decimal numbers
//!
//! A value is `mantissa / 10^scale`. Addition is exact: operands are aligned
//! to the larger scale before adding, so `11.11 + 22.22 + 33.33` is exactly
//! `66.66`.

use std::fmt;
use std::str::FromStr;

use super::error::{DomainError, DomainResult};

/// Largest number of fraction digits accepted.
pub const MAX_SCALE: u32 = 28;

/// Exact decimal with an explicit scale.
///
/// Equality is structural: `1.0` and `1.00` differ in scale and compare unequal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Decimal {
    mantissa: i128,
    scale: u32,
}

impl Decimal {
    pub const ZERO: Decimal = Decimal::new(0, 0);
    pub const ONE: Decimal = Decimal::new(1, 0);
    pub const TEN: Decimal = Decimal::new(10, 0);

    /// Unchecked constructor for literals.
    ///
    /// `scale` must not exceed `MAX_SCALE`; larger scales cannot be aligned
    /// with other operands and make every addition report overflow. Use
    /// `try_new` for scales that are not known in advance.
    pub const fn new(mantissa: i128, scale: u32) -> Self {
        Self { mantissa, scale }
    }

    /// Checked constructor; rejects scales above `MAX_SCALE`.
    pub fn try_new(mantissa: i128, scale: u32) -> DomainResult<Self> {
        if scale > MAX_SCALE {
            return Err(DomainError::InvalidDecimal {
                input: format!("{mantissa}e-{scale}"),
                reason: format!("scale {scale} exceeds {MAX_SCALE}"),
            });
        }
        Ok(Self::new(mantissa, scale))
    }

    pub fn mantissa(&self) -> i128 {
        self.mantissa
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Rescale to a larger scale without losing precision.
    fn rescale(&self, scale: u32) -> Option<i128> {
        let factor = 10i128.checked_pow(scale.checked_sub(self.scale)?)?;
        self.mantissa.checked_mul(factor)
    }

    /// Exact addition; `None` on overflow.
    pub fn checked_add(self, other: Decimal) -> Option<Decimal> {
        let scale = self.scale.max(other.scale);
        let lhs = self.rescale(scale)?;
        let rhs = other.rescale(scale)?;
        Some(Decimal::new(lhs.checked_add(rhs)?, scale))
    }
}

impl FromStr for Decimal {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        let invalid = |reason: &str| DomainError::InvalidDecimal {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let (negative, body) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };
        let (int_part, frac_part) = match body.split_once('.') {
            Some((i, f)) => (i, f),
            None => (body, ""),
        };

        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid("no digits"));
        }
        if !int_part
            .chars()
            .chain(frac_part.chars())
            .all(|c| c.is_ascii_digit())
        {
            return Err(invalid("unexpected character"));
        }
        let scale = frac_part.len() as u32;
        if scale > MAX_SCALE {
            return Err(invalid("too many fraction digits"));
        }

        let digits = format!("{int_part}{frac_part}");
        let magnitude: i128 = digits
            .parse()
            .map_err(|_| invalid("value out of range"))?;
        let mantissa = if negative { -magnitude } else { magnitude };
        Ok(Decimal::new(mantissa, scale))
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.mantissa.unsigned_abs().to_string();
        let sign = if self.mantissa < 0 { "-" } else { "" };
        if self.scale == 0 {
            return write!(f, "{sign}{digits}");
        }
        let scale = self.scale as usize;
        let padded = format!("{digits:0>width$}", width = scale + 1);
        let (int_part, frac_part) = padded.split_at(padded.len() - scale);
        write!(f, "{sign}{int_part}.{frac_part}")
    }
}
