//! Bit-exact hexadecimal float codec.
//!
//! [`hex_encode`] writes any double as `[sign]0x[h].[hex digits]p[±exp]`,
//! a form that round-trips through [`hex_decode`] without loss.
//! [`hex_decode`] additionally accepts arbitrary-precision hex significands
//! and any power-of-two exponent, rounding to the nearest double with ties
//! to even and reporting overflow past the double range.
//!
//! ## Examples
//!
//! ```rust
//! use numtower::{hex_decode, hex_encode};
//!
//! assert_eq!(hex_encode(3.0), "0x1.8p+1");
//! assert_eq!(hex_decode("0x1.8p+1").unwrap(), 3.0);
//! assert_eq!(hex_decode(hex_encode(0.1).as_str()).unwrap(), 0.1);
//! ```

use crate::error::{Error, Result};
use num_bigint::BigUint;
use num_traits::{One, ToPrimitive, Zero};

const EXP_BITS: u64 = 0x7FF;
const FRAC_MASK: u64 = (1 << 52) - 1;
const SIGN_MASK: u64 = 1 << 63;

/// Splits a finite nonzero double into `(negative, significand, exponent)`
/// with `value = ±significand * 2^exponent` held exactly.
pub(crate) fn decompose(f: f64) -> (bool, u64, i64) {
    let bits = f.to_bits();
    let negative = bits & SIGN_MASK != 0;
    let exp_field = (bits >> 52) & EXP_BITS;
    let frac = bits & FRAC_MASK;
    if exp_field == 0 {
        (negative, frac, -1074)
    } else {
        (negative, frac | (1 << 52), exp_field as i64 - 1075)
    }
}

/// Encodes a double in hexadecimal float notation.
///
/// Finite values produce `[sign]0x[0|1].[fraction]p[±exp]` with the
/// fraction trimmed to its shortest form (at least one digit). The
/// exponent of a subnormal is pinned at `-1022` with a `0.` lead. NaN and
/// the infinities encode as `nan`, `inf`, and `-inf`.
///
/// # Examples
///
/// ```rust
/// use numtower::hex_encode;
///
/// assert_eq!(hex_encode(1.0), "0x1.0p+0");
/// assert_eq!(hex_encode(-2.5), "-0x1.4p+1");
/// assert_eq!(hex_encode(5e-324), "0x0.0000000000001p-1022");
/// assert_eq!(hex_encode(f64::NEG_INFINITY), "-inf");
/// ```
#[must_use]
pub fn hex_encode(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value == f64::INFINITY {
        return "inf".to_string();
    }
    if value == f64::NEG_INFINITY {
        return "-inf".to_string();
    }

    let bits = value.to_bits();
    let sign = if bits & SIGN_MASK != 0 { "-" } else { "" };
    let exp_field = (bits >> 52) & EXP_BITS;
    let frac = bits & FRAC_MASK;

    let lead = if exp_field == 0 { '0' } else { '1' };
    let exp = if exp_field == 0 {
        if frac == 0 {
            0
        } else {
            -1022
        }
    } else {
        exp_field as i64 - 1023
    };

    let mut mantissa = format!("{frac:013x}");
    while mantissa.len() > 1 && mantissa.ends_with('0') {
        mantissa.pop();
    }

    let exp_sign = if exp < 0 { '-' } else { '+' };
    format!("{sign}0x{lead}.{mantissa}p{exp_sign}{}", exp.abs())
}

/// Decodes hexadecimal float notation into the nearest double.
///
/// Accepts optional surrounding whitespace, an optional sign, an optional
/// `0x`/`0X` prefix, hex digits with at most one point, and an optional
/// `p`/`P` power-of-two exponent. The words `inf`, `infinity`, and `nan`
/// (any case, optionally signed) are also accepted. The significand may
/// carry arbitrarily many digits; the result is correctly rounded with
/// ties to even.
///
/// # Errors
///
/// Returns a value error for malformed input and an overflow error when
/// the rounded value exceeds the double range.
///
/// # Examples
///
/// ```rust
/// use numtower::hex_decode;
///
/// assert_eq!(hex_decode("0x1.8p+1").unwrap(), 3.0);
/// assert_eq!(hex_decode("  -0X1p4  ").unwrap(), -16.0);
/// assert_eq!(hex_decode("1.8").unwrap(), 1.5);
/// assert!(hex_decode("0x1p1024").is_err());
/// ```
pub fn hex_decode(text: &str) -> Result<f64> {
    let invalid = || Error::value("invalid hexadecimal floating-point string");
    let trimmed = text.trim();
    let mut rest = trimmed;

    let negative = match rest.as_bytes().first() {
        Some(b'-') => {
            rest = &rest[1..];
            true
        }
        Some(b'+') => {
            rest = &rest[1..];
            false
        }
        _ => false,
    };

    let lowered = rest.to_ascii_lowercase();
    if lowered == "inf" || lowered == "infinity" {
        return Ok(if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }
    if lowered == "nan" {
        return Ok(f64::NAN);
    }

    if let Some(stripped) = rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X")) {
        rest = stripped;
    }

    let mut chars = rest.chars().peekable();
    let mut significand = BigUint::zero();
    let mut digits = 0u32;
    let mut frac_digits = 0i64;
    let mut seen_point = false;

    while let Some(&c) = chars.peek() {
        if let Some(d) = c.to_digit(16) {
            significand = significand * 16u8 + d;
            digits += 1;
            if seen_point {
                frac_digits += 1;
            }
            chars.next();
        } else if c == '.' && !seen_point {
            seen_point = true;
            chars.next();
        } else {
            break;
        }
    }
    if digits == 0 {
        return Err(invalid());
    }

    let mut exp2: i64 = 0;
    if matches!(chars.peek(), Some('p' | 'P')) {
        chars.next();
        let exp_negative = match chars.peek() {
            Some('-') => {
                chars.next();
                true
            }
            Some('+') => {
                chars.next();
                false
            }
            _ => false,
        };
        let mut exp_digits = 0u32;
        while let Some(&c) = chars.peek() {
            if let Some(d) = c.to_digit(10) {
                exp2 = exp2.saturating_mul(10).saturating_add(i64::from(d));
                exp_digits += 1;
                chars.next();
            } else {
                break;
            }
        }
        if exp_digits == 0 {
            return Err(invalid());
        }
        if exp_negative {
            exp2 = -exp2;
        }
    }
    if chars.next().is_some() {
        return Err(invalid());
    }

    let exp = exp2.saturating_sub(4 * frac_digits);
    assemble(negative, significand, exp)
}

/// Rounds `±significand * 2^exponent` to the nearest double, ties to even.
fn assemble(negative: bool, mut significand: BigUint, mut exponent: i64) -> Result<f64> {
    let signed_zero = if negative { -0.0 } else { 0.0 };
    if significand.is_zero() {
        return Ok(signed_zero);
    }

    let nbits = significand.bits() as i64;
    // shift right far enough to fit 53 bits and stay above the denormal floor
    let shift = (nbits - 53).max((-1074i64).saturating_sub(exponent));
    if shift > 0 {
        if shift > nbits {
            return Ok(signed_zero);
        }
        if shift == nbits {
            // the kept part is zero; round up only past the halfway point
            let half = BigUint::one() << (nbits - 1) as u64;
            if significand > half {
                significand = BigUint::one();
                exponent += shift;
            } else {
                return Ok(signed_zero);
            }
        } else {
            let tail = &significand % (BigUint::one() << shift as u64);
            let half = BigUint::one() << (shift - 1) as u64;
            let mut kept = significand >> shift as u64;
            let round_up = match tail.cmp(&half) {
                std::cmp::Ordering::Greater => true,
                std::cmp::Ordering::Less => false,
                std::cmp::Ordering::Equal => (&kept % 2u8) == BigUint::one(),
            };
            if round_up {
                kept += 1u8;
            }
            significand = kept;
            exponent += shift;
        }
    }

    // rounding may have grown the significand past 53 bits (e.g. all ones)
    let mut nbits = significand.bits() as i64;
    if nbits > 53 {
        significand >>= (nbits - 53) as u64;
        exponent += nbits - 53;
        nbits = significand.bits() as i64;
    }

    let msb_exp = exponent.saturating_add(nbits - 1);
    if msb_exp > 1023 {
        return Err(Error::overflow("hexadecimal value too large to represent as a float"));
    }

    let bits = if msb_exp >= -1022 {
        // normal: left-justify to 53 bits and drop the implicit leading one
        let m53 = significand << (53 - nbits) as u64;
        let frac = (m53 - (BigUint::one() << 52u8))
            .to_u64()
            .unwrap_or_else(|| unreachable!("52-bit fraction fits in u64"));
        let biased = (msb_exp + 1023) as u64;
        (biased << 52) | frac
    } else {
        // subnormal: exponent sits at the floor, so the field is the
        // significand shifted into place (always below 2^52 here)
        let field = significand << (exponent + 1074) as u64;
        field.to_u64().unwrap_or_else(|| unreachable!("subnormal field fits in u64"))
    };

    let bits = if negative { bits | SIGN_MASK } else { bits };
    Ok(f64::from_bits(bits))
}
