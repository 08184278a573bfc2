//! The numeric tower value type.
//!
//! This module provides the [`Number`] enum, the closed union of the three
//! numeric kinds this crate operates on:
//!
//! - `Int`: an arbitrary-precision signed integer ([`num_bigint::BigInt`])
//! - `Float`: an IEEE-754 double, including NaN, infinities, and signed zero
//! - `Decimal`: a fixed-scale base-10 value with 28-29 significant digits
//!   ([`rust_decimal::Decimal`])
//!
//! Equality and ordering are *numeric*, not structural: `Number::from(2)`
//! equals `Number::from(2.0)` equals a decimal `2`, while NaN is unequal to
//! everything including itself. A total order over all three kinds
//! (including NaN) is available through [`crate::compare`].
//!
//! ## Examples
//!
//! ```rust
//! use numtower::Number;
//!
//! let int = Number::from(42);
//! let float = Number::from(42.0);
//! assert_eq!(int, float);
//! assert!(Number::from(f64::NAN) != Number::from(f64::NAN));
//! ```

use num_bigint::{BigInt, Sign};
use num_traits::{Signed, ToPrimitive, Zero};
use rust_decimal::Decimal;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A value of the numeric tower: big integer, double, or fixed-scale decimal.
#[derive(Clone, Debug)]
pub enum Number {
    Int(BigInt),
    Float(f64),
    Decimal(Decimal),
}

impl Number {
    /// Returns `true` if this is an arbitrary-precision integer.
    #[inline]
    #[must_use]
    pub const fn is_int(&self) -> bool {
        matches!(self, Number::Int(_))
    }

    /// Returns `true` if this is a double.
    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }

    /// Returns `true` if this is a fixed-scale decimal.
    #[inline]
    #[must_use]
    pub const fn is_decimal(&self) -> bool {
        matches!(self, Number::Decimal(_))
    }

    /// Returns `true` if this value is a NaN double.
    #[inline]
    #[must_use]
    pub fn is_nan(&self) -> bool {
        matches!(self, Number::Float(f) if f.is_nan())
    }

    /// Returns `true` if the value is numerically zero (either sign).
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            Number::Int(i) => i.is_zero(),
            Number::Float(f) => *f == 0.0,
            Number::Decimal(d) => d.is_zero(),
        }
    }

    /// Returns `true` if the value carries a negative sign.
    ///
    /// `-0.0` counts as negative, matching how it renders; NaN does not.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        match self {
            Number::Int(i) => i.sign() == Sign::Minus,
            Number::Float(f) => f.is_sign_negative() && !f.is_nan(),
            Number::Decimal(d) => d.is_sign_negative(),
        }
    }

    /// Converts to an `f64` when possible.
    ///
    /// Integers wider than the double range convert to infinity; this is
    /// lossy and intended for display-adjacent uses only.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Number::Int(i) => i.to_f64(),
            Number::Float(f) => Some(*f),
            Number::Decimal(d) => d.to_f64(),
        }
    }

    /// Converts to an `i64` when the value is an integer in range.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use numtower::Number;
    ///
    /// assert_eq!(Number::from(42.0).as_i64(), Some(42));
    /// assert_eq!(Number::from(42.5).as_i64(), None);
    /// ```
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Int(i) => i.to_i64(),
            Number::Float(f) => {
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                    Some(*f as i64)
                } else {
                    None
                }
            }
            Number::Decimal(d) => {
                if d.fract().is_zero() {
                    d.to_i64()
                } else {
                    None
                }
            }
        }
    }

    /// Returns the absolute value of this number.
    #[must_use]
    pub fn abs(&self) -> Number {
        match self {
            Number::Int(i) => Number::Int(i.abs()),
            Number::Float(f) => Number::Float(f.abs()),
            Number::Decimal(d) => Number::Decimal(d.abs()),
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        if self.is_nan() || other.is_nan() {
            return false;
        }
        crate::compare(self, other) == Ordering::Equal
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.is_nan() || other.is_nan() {
            return None;
        }
        Some(crate::compare(self, other))
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let spec = crate::FormatSpec::default();
        let text = crate::format_number(self, &spec).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl From<BigInt> for Number {
    fn from(value: BigInt) -> Self {
        Number::Int(value)
    }
}

impl From<Decimal> for Number {
    fn from(value: Decimal) -> Self {
        Number::Decimal(value)
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number::Int(BigInt::from(value))
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Int(BigInt::from(value))
    }
}

impl From<u32> for Number {
    fn from(value: u32) -> Self {
        Number::Int(BigInt::from(value))
    }
}

impl From<u64> for Number {
    fn from(value: u64) -> Self {
        Number::Int(BigInt::from(value))
    }
}

impl From<f32> for Number {
    fn from(value: f32) -> Self {
        Number::Float(value as f64)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

impl Serialize for Number {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Number::Int(i) => match i.to_i64() {
                Some(small) => serializer.serialize_i64(small),
                None => serializer.collect_str(i),
            },
            Number::Float(f) => serializer.serialize_f64(*f),
            Number::Decimal(d) => serializer.collect_str(d),
        }
    }
}

impl<'de> Deserialize<'de> for Number {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct NumberVisitor;

        impl<'de> Visitor<'de> for NumberVisitor {
            type Value = Number;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an integer, float, or decimal string")
            }

            fn visit_i64<E>(self, value: i64) -> Result<Number, E> {
                Ok(Number::from(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Number, E> {
                Ok(Number::from(value))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Number, E> {
                Ok(Number::Float(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<Number, E>
            where
                E: de::Error,
            {
                if let Ok(i) = BigInt::from_str(value) {
                    return Ok(Number::Int(i));
                }
                if let Ok(d) = Decimal::from_str(value) {
                    return Ok(Number::Decimal(d));
                }
                Err(E::custom(format!("invalid number literal: {value:?}")))
            }
        }

        deserializer.deserialize_any(NumberVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_queries() {
        assert!(Number::from(1).is_int());
        assert!(Number::from(1.0).is_float());
        assert!(Number::from(Decimal::new(15, 1)).is_decimal());
        assert!(Number::from(f64::NAN).is_nan());
        assert!(!Number::from(1.0).is_nan());
    }

    #[test]
    fn test_sign_queries() {
        assert!(Number::from(-1).is_negative());
        assert!(Number::from(-0.0).is_negative());
        assert!(!Number::from(0.0).is_negative());
        assert!(!Number::from(f64::NAN).is_negative());
        assert!(Number::from(0.0).is_zero());
        assert!(Number::from(-0.0).is_zero());
    }

    #[test]
    fn test_as_i64() {
        assert_eq!(Number::from(7).as_i64(), Some(7));
        assert_eq!(Number::from(7.0).as_i64(), Some(7));
        assert_eq!(Number::from(7.5).as_i64(), None);
        assert_eq!(Number::from(Decimal::new(70, 1)).as_i64(), Some(7));
        assert_eq!(Number::from(f64::INFINITY).as_i64(), None);
    }

    #[test]
    fn test_numeric_equality_crosses_kinds() {
        assert_eq!(Number::from(2), Number::from(2.0));
        assert_eq!(Number::from(2.5), Number::from(Decimal::new(25, 1)));
        assert_ne!(Number::from(2), Number::from(2.5));
    }

    #[test]
    fn test_nan_is_unequal_and_unordered() {
        let nan = Number::from(f64::NAN);
        assert_ne!(nan, nan.clone());
        assert_eq!(nan.partial_cmp(&Number::from(0)), None);
    }

    #[test]
    fn test_display_uses_default_format() {
        assert_eq!(Number::from(42).to_string(), "42");
        assert_eq!(Number::from(1.5).to_string(), "1.5");
        assert_eq!(Number::from(2.0).to_string(), "2.0");
        assert_eq!(Number::from(-0.0).to_string(), "-0.0");
    }
}
