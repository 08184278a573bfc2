//! Cross-kind total ordering and hash-consistent hashing.
//!
//! [`compare`] orders any two tower values exactly, with no rounding: an
//! integer against a double is compared through the double's integral and
//! fractional parts, a double against a decimal through exact big-integer
//! cross-multiplication of their scaled significands.
//!
//! NaN gets a fixed slot in the total order, above negative infinity and
//! below every other value, so that sorting mixed sequences is stable and
//! deterministic. Two NaNs compare equal here even though `==` on
//! [`Number`] treats NaN as unequal to itself.
//!
//! [`number_hash`] reduces every value to a rational residue modulo the
//! Mersenne prime `2^61 - 1`, which guarantees the equality law: whenever
//! `compare(a, b)` is `Equal`, `number_hash(a) == number_hash(b)`, across
//! kinds.
//!
//! ## Examples
//!
//! ```rust
//! use std::cmp::Ordering;
//! use numtower::{compare, number_hash, Number};
//!
//! let a = Number::from(2);
//! let b = Number::from(2.0);
//! assert_eq!(compare(&a, &b), Ordering::Equal);
//! assert_eq!(number_hash(&a), number_hash(&b));
//! ```

use crate::value::Number;
use num_bigint::{BigInt, BigUint};
use num_traits::{FromPrimitive, Signed, ToPrimitive};
use rust_decimal::Decimal;
use std::cmp::Ordering;

/// The hash modulus, a Mersenne prime. `2^61 = 1 (mod MODULUS)`, which
/// lets binary exponents reduce modulo 61.
const MODULUS: u64 = (1 << 61) - 1;

/// Hash of positive infinity; negative infinity hashes to its negation.
const INF_HASH: i64 = 314_159;

/// Compares two tower values under the exact total order.
///
/// The order agrees with the mathematical value wherever one exists.
/// NaN sorts above negative infinity and below everything else, and two
/// NaNs are equal to each other.
#[must_use]
pub fn compare(a: &Number, b: &Number) -> Ordering {
    match (a, b) {
        (Number::Int(x), Number::Int(y)) => x.cmp(y),
        (Number::Float(x), Number::Float(y)) => cmp_f64(*x, *y),
        (Number::Decimal(x), Number::Decimal(y)) => x.cmp(y),
        (Number::Int(x), Number::Float(y)) => cmp_int_f64(x, *y),
        (Number::Float(x), Number::Int(y)) => cmp_int_f64(y, *x).reverse(),
        (Number::Int(x), Number::Decimal(y)) => cmp_int_dec(x, y),
        (Number::Decimal(x), Number::Int(y)) => cmp_int_dec(y, x).reverse(),
        (Number::Float(x), Number::Decimal(y)) => cmp_f64_dec(*x, y),
        (Number::Decimal(x), Number::Float(y)) => cmp_f64_dec(*y, x).reverse(),
    }
}

/// Doubles under the total order: NaN slots just above negative infinity.
fn cmp_f64(x: f64, y: f64) -> Ordering {
    if let Some(ord) = x.partial_cmp(&y) {
        return ord;
    }
    match (x.is_nan(), y.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => {
            if y == f64::NEG_INFINITY {
                Ordering::Greater
            } else {
                Ordering::Less
            }
        }
        (false, true) => {
            if x == f64::NEG_INFINITY {
                Ordering::Less
            } else {
                Ordering::Greater
            }
        }
        (false, false) => unreachable!("partial_cmp is total on non-NaN doubles"),
    }
}

/// Integer against double, exactly: compare against the truncated part
/// first, then break ties on the fractional remainder.
fn cmp_int_f64(i: &BigInt, f: f64) -> Ordering {
    if f.is_nan() {
        // every integer sits above the NaN slot
        return Ordering::Greater;
    }
    if f == f64::INFINITY {
        return Ordering::Less;
    }
    if f == f64::NEG_INFINITY {
        return Ordering::Greater;
    }
    let trunc = f.trunc();
    let Some(trunc_int) = BigInt::from_f64(trunc) else {
        return if f > 0.0 {
            Ordering::Less
        } else {
            Ordering::Greater
        };
    };
    match i.cmp(&trunc_int) {
        Ordering::Equal => {
            let frac = f - trunc;
            if frac > 0.0 {
                Ordering::Less
            } else if frac < 0.0 {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        }
        other => other,
    }
}

/// Integer against decimal via exact scaling. Any integer wider than the
/// decimal's 96-bit significand range is decided by sign alone.
fn cmp_int_dec(i: &BigInt, d: &Decimal) -> Ordering {
    if i.magnitude().bits() > 96 {
        return if i.is_negative() {
            Ordering::Less
        } else {
            Ordering::Greater
        };
    }
    let scaled = i * BigInt::from(10u8).pow(d.scale());
    scaled.cmp(&BigInt::from(d.mantissa()))
}

/// Double against decimal via exact cross-multiplication of the binary
/// and decimal significands.
fn cmp_f64_dec(f: f64, d: &Decimal) -> Ordering {
    if f.is_nan() {
        return Ordering::Less;
    }
    if f == f64::INFINITY {
        return Ordering::Greater;
    }
    if f == f64::NEG_INFINITY {
        return Ordering::Less;
    }
    // decimals cap below 8e28, so a larger double is decided by sign
    if f.abs() >= 1e29 {
        return if f > 0.0 {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    let (negative, m2, e2) = crate::hexfloat::decompose(f);
    let mut lhs = BigInt::from(m2);
    if negative {
        lhs = -lhs;
    }
    let rhs = BigInt::from(d.mantissa());
    let ten = BigInt::from(10u8).pow(d.scale());
    if e2 >= 0 {
        ((lhs << e2 as u64) * ten).cmp(&rhs)
    } else {
        (lhs * ten).cmp(&(rhs << (-e2) as u64))
    }
}

/// Hashes a tower value so that order-equal values hash equal.
///
/// Finite values hash to their rational residue modulo `2^61 - 1`, with
/// the sign applied afterwards. NaN hashes to `0`; the infinities hash to
/// `314159` and `-314159`.
#[must_use]
pub fn number_hash(value: &Number) -> i64 {
    match value {
        Number::Int(i) => hash_bigint(i),
        Number::Float(f) => hash_f64(*f),
        Number::Decimal(d) => hash_decimal(d),
    }
}

fn hash_bigint(i: &BigInt) -> i64 {
    let residue = (i.magnitude() % BigUint::from(MODULUS))
        .to_u64()
        .unwrap_or(0) as i64;
    if i.is_negative() {
        -residue
    } else {
        residue
    }
}

fn hash_f64(f: f64) -> i64 {
    if f.is_nan() {
        return 0;
    }
    if f == f64::INFINITY {
        return INF_HASH;
    }
    if f == f64::NEG_INFINITY {
        return -INF_HASH;
    }
    if f == f.trunc() {
        // from_f64 on a finite integral double is exact
        return match BigInt::from_f64(f) {
            Some(i) => hash_bigint(&i),
            None => 0,
        };
    }
    let (negative, mut m, mut e) = crate::hexfloat::decompose(f);
    let shift = m.trailing_zeros();
    m >>= shift;
    e += i64::from(shift);
    // m * 2^e (mod P): since 2^61 = 1 (mod P), reduce e modulo 61
    let j = e.rem_euclid(61) as u32;
    let residue = (((m as u128) << j) % u128::from(MODULUS)) as i64;
    if negative {
        -residue
    } else {
        residue
    }
}

fn hash_decimal(d: &Decimal) -> i64 {
    if d.fract().is_zero() {
        let whole = BigInt::from(d.mantissa()) / BigInt::from(10u8).pow(d.scale());
        return hash_bigint(&whole);
    }
    let mantissa = d.mantissa().unsigned_abs();
    let residue = (mantissa % u128::from(MODULUS)) as u64;
    // m / 10^s (mod P) via Fermat inverse of the denominator
    let denom = mod_pow(10, u64::from(d.scale()));
    let inverse = mod_pow(denom, MODULUS - 2);
    let residue = mod_mul(residue, inverse) as i64;
    if d.is_sign_negative() {
        -residue
    } else {
        residue
    }
}

fn mod_mul(a: u64, b: u64) -> u64 {
    ((u128::from(a) * u128::from(b)) % u128::from(MODULUS)) as u64
}

fn mod_pow(mut base: u64, mut exp: u64) -> u64 {
    base %= MODULUS;
    let mut acc = 1u64;
    while exp > 0 {
        if exp & 1 == 1 {
            acc = mod_mul(acc, base);
        }
        base = mod_mul(base, base);
        exp >>= 1;
    }
    acc
}
