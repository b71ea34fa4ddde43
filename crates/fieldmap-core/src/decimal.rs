//! Fixed-point decimal numbers.
//!
//! A [`Decimal`] is an integer mantissa with a base-10 scale:
//! `Decimal::new(35, 1)` is `3.5`. The representable range is a 96-bit
//! mantissa with at most 28 fractional digits. Parsing rejects anything
//! outside that range instead of rounding.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use thiserror::Error;

/// Largest magnitude of the mantissa (2^96 - 1).
pub const MAX_MANTISSA: i128 = (1 << 96) - 1;

/// Largest number of fractional digits.
pub const MAX_SCALE: u8 = 28;

/// Errors from parsing or constructing a [`Decimal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseDecimalError {
    #[error("invalid decimal literal")]
    Invalid,
    #[error("decimal mantissa exceeds 96 bits")]
    Overflow,
    #[error("decimal has more than 28 fractional digits")]
    TooPrecise,
}

/// Fixed-point decimal. Equality is numeric: `3.5 == 3.50`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decimal {
    mantissa: i128,
    scale: u8,
}

impl Decimal {
    pub const ZERO: Decimal = Decimal {
        mantissa: 0,
        scale: 0,
    };

    pub fn new(mantissa: i128, scale: u8) -> Result<Self, ParseDecimalError> {
        if scale > MAX_SCALE {
            return Err(ParseDecimalError::TooPrecise);
        }
        if mantissa.unsigned_abs() > MAX_MANTISSA.unsigned_abs() {
            return Err(ParseDecimalError::Overflow);
        }
        Ok(Self { mantissa, scale })
    }

    pub fn mantissa(&self) -> i128 {
        self.mantissa
    }

    pub fn scale(&self) -> u8 {
        self.scale
    }

    pub fn is_negative(&self) -> bool {
        self.mantissa < 0
    }

    /// Strips trailing fractional zeros: `3.500` becomes `3.5`.
    pub fn normalize(self) -> Self {
        let mut mantissa = self.mantissa;
        let mut scale = self.scale;
        while scale > 0 && mantissa % 10 == 0 {
            mantissa /= 10;
            scale -= 1;
        }
        Self { mantissa, scale }
    }
}

impl From<i32> for Decimal {
    fn from(value: i32) -> Self {
        Self {
            mantissa: i128::from(value),
            scale: 0,
        }
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        let (a, b) = (self.normalize(), other.normalize());
        a.mantissa == b.mantissa && a.scale == b.scale
    }
}

impl Eq for Decimal {}

impl Hash for Decimal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let normalized = self.normalize();
        normalized.mantissa.hash(state);
        normalized.scale.hash(state);
    }
}

/// Accepts surrounding whitespace, an optional sign, and digits with at most
/// one decimal point. Exponents and group separators are rejected.
impl FromStr for Decimal {
    type Err = ParseDecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (negative, digits) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };

        let mut mantissa: i128 = 0;
        let mut scale: u8 = 0;
        let mut seen_point = false;
        let mut seen_digit = false;
        // Fractional zeros not yet followed by a significant digit.
        let mut pending_zeros: u32 = 0;

        for byte in digits.bytes() {
            match byte {
                b'0' if seen_point => {
                    seen_digit = true;
                    pending_zeros += 1;
                }
                b'0'..=b'9' => {
                    seen_digit = true;
                    for _ in 0..pending_zeros {
                        push_digit(&mut mantissa, &mut scale, 0, true)?;
                    }
                    pending_zeros = 0;
                    push_digit(&mut mantissa, &mut scale, byte - b'0', seen_point)?;
                }
                b'.' if !seen_point => seen_point = true,
                _ => return Err(ParseDecimalError::Invalid),
            }
        }

        // Trailing zeros keep the written scale where it fits; dropping the
        // rest does not change the value.
        for _ in 0..pending_zeros {
            if push_digit(&mut mantissa, &mut scale, 0, true).is_err() {
                break;
            }
        }

        if !seen_digit {
            return Err(ParseDecimalError::Invalid);
        }

        Ok(Self {
            mantissa: if negative { -mantissa } else { mantissa },
            scale,
        })
    }
}

fn push_digit(
    mantissa: &mut i128,
    scale: &mut u8,
    digit: u8,
    fractional: bool,
) -> Result<(), ParseDecimalError> {
    if fractional && *scale == MAX_SCALE {
        return Err(ParseDecimalError::TooPrecise);
    }
    let next = *mantissa * 10 + i128::from(digit);
    if next > MAX_MANTISSA {
        return Err(ParseDecimalError::Overflow);
    }
    *mantissa = next;
    if fractional {
        *scale += 1;
    }
    Ok(())
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        let digits = self.mantissa.unsigned_abs().to_string();
        let scale = usize::from(self.scale);
        if scale == 0 {
            return write!(f, "{sign}{digits}");
        }

        let padded = if digits.len() <= scale {
            format!("{}{digits}", "0".repeat(scale - digits.len() + 1))
        } else {
            digits
        };
        let (integral, fractional) = padded.split_at(padded.len() - scale);
        write!(f, "{sign}{integral}.{fractional}")
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn parses_fixed_point_literals() {
        assert_eq!(dec("3.5"), Decimal::new(35, 1).unwrap());
        assert_eq!(dec("-0.25"), Decimal::new(-25, 2).unwrap());
        assert_eq!(dec("+7"), Decimal::from(7));
        assert_eq!(dec(" 42 "), Decimal::from(42));
        assert_eq!(dec(".5"), Decimal::new(5, 1).unwrap());
        assert_eq!(dec("5."), Decimal::from(5));
        assert_eq!(dec("2.500").scale(), 3);
    }

    #[test]
    fn trailing_zeros_never_overflow() {
        assert_eq!(dec("10.0000000000000000000000000000"), Decimal::from(10));
        assert_eq!(dec("1.00000000000000000000000000000"), Decimal::from(1));
        assert_eq!(
            dec("79228162514264337593543950335.0"),
            Decimal::new(MAX_MANTISSA, 0).unwrap()
        );
        assert_eq!(dec("-0.0000000000000000000000000000000"), Decimal::ZERO);
    }

    #[test]
    fn equality_ignores_trailing_zeros() {
        assert_eq!(dec("3.50"), dec("3.5"));
        assert_eq!(dec("0.000"), Decimal::ZERO);
        assert_ne!(dec("3.05"), dec("3.5"));
    }

    #[test]
    fn rejects_malformed_input() {
        for raw in ["", "-", ".", "1e5", "1,000.5", "1.2.3", "abc", "--1", "0x10", "1 000"] {
            assert_eq!(raw.parse::<Decimal>(), Err(ParseDecimalError::Invalid), "{raw}");
        }
    }

    #[test]
    fn rejects_values_outside_range() {
        assert_eq!(
            "79228162514264337593543950336".parse::<Decimal>(),
            Err(ParseDecimalError::Overflow)
        );
        assert!("79228162514264337593543950335".parse::<Decimal>().is_ok());
        assert_eq!(
            "79228162514264337593543950335.1".parse::<Decimal>(),
            Err(ParseDecimalError::Overflow)
        );
        assert_eq!(
            "0.00000000000000000000000000001".parse::<Decimal>(),
            Err(ParseDecimalError::TooPrecise)
        );
        assert_eq!(Decimal::new(1, 29), Err(ParseDecimalError::TooPrecise));
    }

    #[test]
    fn formats_with_scale() {
        assert_eq!(Decimal::new(35, 1).unwrap().to_string(), "3.5");
        assert_eq!(Decimal::new(-5, 3).unwrap().to_string(), "-0.005");
        assert_eq!(Decimal::new(0, 2).unwrap().to_string(), "0.00");
        assert_eq!(Decimal::new(1200, 0).unwrap().to_string(), "1200");
    }

    proptest! {
        #[test]
        fn display_round_trips(mantissa in -MAX_MANTISSA..=MAX_MANTISSA, scale in 0..=MAX_SCALE) {
            let value = Decimal::new(mantissa, scale).unwrap();
            let reparsed: Decimal = value.to_string().parse().unwrap();
            prop_assert_eq!(reparsed, value);
            prop_assert_eq!(reparsed.scale(), value.scale());
        }
    }
}
