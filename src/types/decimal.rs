//! Fixed-point decimal stored as an `(integer, fraction)` pair.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PredicateError, Result};

/// Number of decimal digits held in [`Decimal12::fraction`].
pub const FRAC_DIGITS: u32 = 9;

/// `10^FRAC_DIGITS`.
pub const FRAC_RATIO: i64 = 1_000_000_000;

/// A 12-byte decimal: 64-bit integer part and a 9-digit fractional part.
///
/// Both parts carry the sign of the value, so `-1.5` is `(-1, -500000000)`.
/// Ordering is lexicographic over `(integer, fraction)`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Decimal12 {
    /// Integer part.
    pub integer: i64,
    /// Fractional part scaled by [`FRAC_RATIO`].
    pub fraction: i32,
}

impl Decimal12 {
    /// Creates a decimal from its raw parts.
    #[must_use]
    pub const fn new(integer: i64, fraction: i32) -> Self {
        Decimal12 { integer, fraction }
    }

    /// Creates a decimal from an unscaled integer with `scale` fractional digits.
    ///
    /// # Errors
    ///
    /// Returns an error if `scale` exceeds [`FRAC_DIGITS`] or the integer part
    /// does not fit in an `i64`.
    pub fn from_scaled(unscaled: i128, scale: u32) -> Result<Self> {
        if scale > FRAC_DIGITS {
            return Err(PredicateError::ConversionError(format!(
                "decimal scale {scale} exceeds {FRAC_DIGITS} fractional digits"
            )));
        }
        let divisor = 10_i128.pow(scale);
        let integer = i64::try_from(unscaled / divisor).map_err(|_| {
            PredicateError::ConversionError(format!("decimal {unscaled} overflows integer part"))
        })?;
        let fraction = ((unscaled % divisor) * 10_i128.pow(FRAC_DIGITS - scale)) as i32;
        Ok(Decimal12 { integer, fraction })
    }

    fn is_negative(&self) -> bool {
        self.integer < 0 || self.fraction < 0
    }
}

impl FromStr for Decimal12 {
    type Err = PredicateError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: &str| PredicateError::InvalidLiteral {
            field_type: "DECIMAL",
            literal: s.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = s.trim();
        let (negative, digits) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };
        let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, ""));

        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid("no digits"));
        }
        if !int_part.bytes().chain(frac_part.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid("expected digits with an optional '.'"));
        }
        if frac_part.len() > FRAC_DIGITS as usize {
            return Err(invalid("more than 9 fractional digits"));
        }

        let magnitude: u64 = if int_part.is_empty() {
            0
        } else {
            int_part
                .parse()
                .map_err(|_| invalid("integer part out of range"))?
        };
        let integer = if negative {
            0_i64.checked_sub_unsigned(magnitude)
        } else {
            i64::try_from(magnitude).ok()
        }
        .ok_or_else(|| invalid("integer part out of range"))?;

        let mut fraction: i32 = 0;
        for (i, b) in frac_part.bytes().enumerate() {
            fraction += i32::from(b - b'0') * 10_i32.pow(FRAC_DIGITS - 1 - i as u32);
        }
        if negative {
            fraction = -fraction;
        }
        Ok(Decimal12::new(integer, fraction))
    }
}

impl fmt::Display for Decimal12 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            f.write_str("-")?;
        }
        write!(f, "{}", self.integer.unsigned_abs())?;
        if self.fraction != 0 {
            let frac = format!("{:09}", self.fraction.unsigned_abs());
            write!(f, ".{}", frac.trim_end_matches('0'))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positive() {
        let d: Decimal12 = "12.5".parse().unwrap();
        assert_eq!(d, Decimal12::new(12, 500_000_000));
    }

    #[test]
    fn test_parse_negative_carries_sign_on_both_parts() {
        let d: Decimal12 = "-1.25".parse().unwrap();
        assert_eq!(d, Decimal12::new(-1, -250_000_000));
        let d: Decimal12 = "-0.5".parse().unwrap();
        assert_eq!(d, Decimal12::new(0, -500_000_000));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!("".parse::<Decimal12>().is_err());
        assert!("1.2.3".parse::<Decimal12>().is_err());
        assert!("1.0000000001".parse::<Decimal12>().is_err());
        assert!("abc".parse::<Decimal12>().is_err());
        assert!("99999999999999999999".parse::<Decimal12>().is_err());
    }

    #[test]
    fn test_parse_integer_part_limits() {
        let min: Decimal12 = "-9223372036854775808".parse().unwrap();
        assert_eq!(min, Decimal12::new(i64::MIN, 0));
        let max: Decimal12 = "9223372036854775807.5".parse().unwrap();
        assert_eq!(max, Decimal12::new(i64::MAX, 500_000_000));
        assert!("9223372036854775808".parse::<Decimal12>().is_err());
        assert!("-9223372036854775809".parse::<Decimal12>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Decimal12::new(4, 4).to_string(), "4.000000004");
        assert_eq!(Decimal12::new(12, 500_000_000).to_string(), "12.5");
        assert_eq!(Decimal12::new(0, -500_000_000).to_string(), "-0.5");
        assert_eq!(Decimal12::new(7, 0).to_string(), "7");
    }

    #[test]
    fn test_lexicographic_order() {
        assert!(Decimal12::new(1, 999) < Decimal12::new(2, 0));
        assert!(Decimal12::new(2, 1) > Decimal12::new(2, 0));
    }

    #[test]
    fn test_from_scaled() {
        assert_eq!(
            Decimal12::from_scaled(-1_250, 3).unwrap(),
            Decimal12::new(-1, -250_000_000)
        );
        assert!(Decimal12::from_scaled(1, 10).is_err());
    }
}
