//! Floor-division arithmetic for doubles.
//!
//! The modulo and divmod here follow the floored-division convention: the
//! remainder takes the sign of the divisor, and the quotient is the floor
//! of the true quotient. This differs from the hardware remainder, which
//! takes the sign of the dividend.
//!
//! [`float_power`] layers the full special-case table for `x^y` over the
//! hardware `powf`, rejecting domain errors (a negative base with a
//! fractional exponent, zero to a negative power) instead of producing NaN
//! and reporting finite-overflow explicitly.
//!
//! ## Examples
//!
//! ```rust
//! use numtower::{float_divmod, float_mod};
//!
//! assert_eq!(float_mod(5.0, -3.0).unwrap(), -1.0);
//! assert_eq!(float_divmod(7.0, 2.0).unwrap(), (3.0, 1.0));
//! assert_eq!(float_divmod(-7.0, 2.0).unwrap(), (-4.0, 1.0));
//! ```

use crate::error::{Error, Result};

/// Floored modulo: the result has the divisor's sign.
///
/// A zero result carries the divisor's sign as well, so `mod(-2, 2)` is
/// `0.0` and `mod(2, -2)` is `-0.0`.
///
/// # Errors
///
/// Returns a zero-division error when `y` is zero.
pub fn float_mod(x: f64, y: f64) -> Result<f64> {
    if y == 0.0 {
        return Err(Error::zero_division("float modulo"));
    }
    let mut r = x % y;
    if r != 0.0 {
        if (r < 0.0) != (y < 0.0) {
            r += y;
        }
    } else {
        r = 0.0f64.copysign(y);
    }
    Ok(r)
}

/// Floored division and modulo together: returns `(quotient, remainder)`
/// with `quotient = floor(x / y)` and the remainder as in [`float_mod`].
///
/// The quotient is nudged against rounding drift in `(x - r) / y` so the
/// identity `x = quotient * y + remainder` holds to the last bit where
/// the doubles allow it.
///
/// # Errors
///
/// Returns a zero-division error when `y` is zero.
pub fn float_divmod(x: f64, y: f64) -> Result<(f64, f64)> {
    if y == 0.0 {
        return Err(Error::zero_division("float divmod()"));
    }
    let r = float_mod(x, y)?;
    let mut div = (x - r) / y;
    if div != 0.0 {
        let floored = div.floor();
        div = if div - floored > 0.5 {
            floored + 1.0
        } else {
            floored
        };
    } else {
        // quotient underflowed; keep the sign of the true quotient
        div = 0.0f64.copysign(x / y);
    }
    Ok((div, r))
}

/// Raises `x` to the power `y` with the full special-case table.
///
/// `1^y` and `x^0` are `1.0` even for NaN operands. Infinite operands
/// resolve by magnitude; a negative zero or negative infinity result
/// appears only for a negative base with an odd integer exponent.
///
/// # Errors
///
/// Returns a zero-division error for a zero base with a negative
/// exponent, a value error for a negative base with a fractional
/// exponent, and an overflow error when the true result is finite but
/// exceeds the double range.
pub fn float_power(x: f64, y: f64) -> Result<f64> {
    if x == 1.0 || y == 0.0 {
        return Ok(1.0);
    }
    if x.is_nan() || y.is_nan() {
        return Ok(f64::NAN);
    }
    if x.is_infinite() {
        return Ok(if x > 0.0 {
            if y > 0.0 {
                f64::INFINITY
            } else {
                0.0
            }
        } else if is_odd_integer(y) {
            if y > 0.0 {
                f64::NEG_INFINITY
            } else {
                -0.0
            }
        } else if y > 0.0 {
            f64::INFINITY
        } else {
            0.0
        });
    }
    if y.is_infinite() {
        let ax = x.abs();
        return Ok(if ax > 1.0 {
            if y > 0.0 {
                f64::INFINITY
            } else {
                0.0
            }
        } else if ax == 1.0 {
            1.0
        } else if y > 0.0 {
            0.0
        } else {
            f64::INFINITY
        });
    }
    if x == 0.0 {
        if y < 0.0 {
            return Err(Error::zero_division(
                "0.0 cannot be raised to a negative power",
            ));
        }
        return Ok(if x.is_sign_negative() && is_odd_integer(y) {
            -0.0
        } else {
            0.0
        });
    }
    if x < 0.0 && y.fract() != 0.0 {
        return Err(Error::value(
            "negative number cannot be raised to a fractional power",
        ));
    }
    let r = x.powf(y);
    if r.is_finite() {
        Ok(r)
    } else {
        Err(Error::overflow("result too large"))
    }
}

fn is_odd_integer(y: f64) -> bool {
    y.fract() == 0.0 && (y / 2.0).fract() != 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(f: f64) -> u64 {
        f.to_bits()
    }

    #[test]
    fn test_mod_sign_follows_divisor() {
        assert_eq!(float_mod(5.0, 3.0).unwrap(), 2.0);
        assert_eq!(float_mod(5.0, -3.0).unwrap(), -1.0);
        assert_eq!(float_mod(-5.0, 3.0).unwrap(), 1.0);
        assert_eq!(float_mod(-5.0, -3.0).unwrap(), -2.0);
    }

    #[test]
    fn test_mod_zero_result_carries_divisor_sign() {
        assert_eq!(bits(float_mod(-2.0, 2.0).unwrap()), bits(0.0));
        assert_eq!(bits(float_mod(2.0, -2.0).unwrap()), bits(-0.0));
    }

    #[test]
    fn test_mod_by_zero() {
        let err = float_mod(1.0, 0.0).unwrap_err();
        assert!(matches!(err, Error::ZeroDivision(_)));
        assert_eq!(err.message(), "float modulo");
    }

    #[test]
    fn test_divmod_basics() {
        assert_eq!(float_divmod(7.0, 2.0).unwrap(), (3.0, 1.0));
        assert_eq!(float_divmod(-7.0, 2.0).unwrap(), (-4.0, 1.0));
        assert_eq!(float_divmod(7.0, -2.0).unwrap(), (-4.0, -1.0));
        assert_eq!(float_divmod(-7.0, -2.0).unwrap(), (3.0, -1.0));
        assert_eq!(float_divmod(7.5, 2.5).unwrap(), (3.0, 0.0));
    }

    #[test]
    fn test_divmod_identity_holds() {
        for (x, y) in [(7.1, 2.3), (-9.4, 3.7), (12.0, -5.0), (1e-3, 7.0)] {
            let (q, r) = float_divmod(x, y).unwrap();
            assert_eq!(q.fract(), 0.0);
            assert!((q * y + r - x).abs() <= 1e-9 * x.abs().max(1.0), "{x} {y}");
        }
    }

    #[test]
    fn test_divmod_tiny_over_huge_floors_to_minus_one() {
        // the true quotient is a small negative, so the floor is -1 and
        // the remainder wraps up to the divisor
        assert_eq!(float_divmod(-1e-300, 1e300).unwrap(), (-1.0, 1e300));
        let err = float_divmod(1.0, 0.0).unwrap_err();
        assert_eq!(err.message(), "float divmod()");
    }

    #[test]
    fn test_divmod_zero_quotient_keeps_sign() {
        let (q, r) = float_divmod(-0.0, 3.0).unwrap();
        assert_eq!(bits(q), bits(-0.0));
        assert_eq!(bits(r), bits(0.0));
        let (q, r) = float_divmod(0.0, -3.0).unwrap();
        assert_eq!(bits(q), bits(-0.0));
        assert_eq!(bits(r), bits(-0.0));
    }

    #[test]
    fn test_power_trivial_cases() {
        assert_eq!(float_power(1.0, f64::NAN).unwrap(), 1.0);
        assert_eq!(float_power(f64::NAN, 0.0).unwrap(), 1.0);
        assert!(float_power(f64::NAN, 2.0).unwrap().is_nan());
        assert!(float_power(2.0, f64::NAN).unwrap().is_nan());
        assert_eq!(float_power(2.0, 10.0).unwrap(), 1024.0);
    }

    #[test]
    fn test_power_infinite_base() {
        assert_eq!(float_power(f64::INFINITY, 2.0).unwrap(), f64::INFINITY);
        assert_eq!(float_power(f64::INFINITY, -2.0).unwrap(), 0.0);
        assert_eq!(
            float_power(f64::NEG_INFINITY, 3.0).unwrap(),
            f64::NEG_INFINITY
        );
        assert_eq!(float_power(f64::NEG_INFINITY, 2.0).unwrap(), f64::INFINITY);
        assert_eq!(bits(float_power(f64::NEG_INFINITY, -3.0).unwrap()), bits(-0.0));
        assert_eq!(float_power(f64::NEG_INFINITY, -2.0).unwrap(), 0.0);
    }

    #[test]
    fn test_power_infinite_exponent() {
        assert_eq!(float_power(2.0, f64::INFINITY).unwrap(), f64::INFINITY);
        assert_eq!(float_power(2.0, f64::NEG_INFINITY).unwrap(), 0.0);
        assert_eq!(float_power(0.5, f64::INFINITY).unwrap(), 0.0);
        assert_eq!(float_power(0.5, f64::NEG_INFINITY).unwrap(), f64::INFINITY);
        assert_eq!(float_power(-1.0, f64::INFINITY).unwrap(), 1.0);
        assert_eq!(float_power(-1.0, f64::NEG_INFINITY).unwrap(), 1.0);
    }

    #[test]
    fn test_power_zero_base() {
        assert_eq!(float_power(0.0, 2.0).unwrap(), 0.0);
        assert_eq!(bits(float_power(-0.0, 3.0).unwrap()), bits(-0.0));
        assert_eq!(bits(float_power(-0.0, 2.0).unwrap()), bits(0.0));
        let err = float_power(0.0, -1.0).unwrap_err();
        assert!(matches!(err, Error::ZeroDivision(_)));
    }

    #[test]
    fn test_power_negative_base() {
        assert_eq!(float_power(-2.0, 3.0).unwrap(), -8.0);
        assert_eq!(float_power(-2.0, 2.0).unwrap(), 4.0);
        let err = float_power(-2.0, 0.5).unwrap_err();
        assert!(matches!(err, Error::Value(_)));
    }

    #[test]
    fn test_power_overflow() {
        let err = float_power(10.0, 1000.0).unwrap_err();
        assert!(matches!(err, Error::Overflow(_)));
        // a genuinely infinite result is not an overflow
        assert_eq!(float_power(f64::INFINITY, 1.0).unwrap(), f64::INFINITY);
    }
}
