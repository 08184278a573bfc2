//! Numeric tower formatting, comparison, and hashing.
//!
//! This crate implements the display and ordering semantics of a dynamic
//! numeric tower over three kinds of values: arbitrary-precision integers,
//! IEEE-754 doubles, and fixed-scale decimals. It provides:
//!
//! - **Formatting**: the `[[fill]align][sign][#][0][width][,][.precision][type]`
//!   mini-language over all three kinds, with exact decimal rounding,
//!   locale-aware separators, and correct treatment of signed zero, NaN,
//!   and the infinities ([`format_number`], [`format_str`])
//! - **Comparison and hashing**: an exact cross-kind total order and a
//!   hash that agrees with it, so `2`, `2.0`, and a decimal `2.00` land in
//!   the same hash bucket ([`compare`], [`number_hash`])
//! - **Hex-float codec**: a bit-exact `0x1.8p+1` encoding of doubles and a
//!   decoder that accepts arbitrary-precision significands with correct
//!   round-to-nearest-even ([`hex_encode`], [`hex_decode`])
//! - **Floored float arithmetic**: modulo and divmod where the remainder
//!   follows the divisor's sign, and a fully specified power function
//!   ([`float_mod`], [`float_divmod`], [`float_power`])
//!
//! ## Examples
//!
//! ```rust
//! use numtower::{format_str, Number};
//!
//! let n = Number::from(1234.5);
//! assert_eq!(format_str(&n, ",.2f").unwrap(), "1,234.50");
//! assert_eq!(format_str(&n, "+12.1e").unwrap(), "    +1.2e+03");
//! ```
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

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod compare;
pub mod error;
pub mod floatops;
pub mod hexfloat;
pub mod render;
pub mod spec;
pub mod value;

pub use compare::{compare, number_hash};
pub use error::{Error, Result};
pub use floatops::{float_divmod, float_mod, float_power};
pub use hexfloat::{hex_decode, hex_encode};
pub use render::{render, render_decimal, render_float, render_int};
pub use spec::{align_text, Align, FormatSpec, Locale, SignMode};
pub use value::Number;

/// Formats a number with the invariant locale.
///
/// Renders the absolute magnitude through the kind-specific renderer, then
/// applies the alternate-form prefix, sign, fill, and width.
///
/// # Errors
///
/// Returns a value error for an invalid spec/kind combination and an
/// overflow error for `c` out of range.
///
/// # Examples
///
/// ```rust
/// use numtower::{format_number, FormatSpec, Number};
///
/// let spec = FormatSpec::parse("08.2f").unwrap();
/// assert_eq!(format_number(&Number::from(5), &spec).unwrap(), "00005.00");
/// ```
pub fn format_number(value: &Number, spec: &FormatSpec) -> Result<String> {
    format_number_with_locale(value, spec, &Locale::invariant())
}

/// Formats a number with an explicit locale (consulted by the `'n'` code).
pub fn format_number_with_locale(
    value: &Number,
    spec: &FormatSpec,
    locale: &Locale,
) -> Result<String> {
    let is_positive = !value.is_negative();
    if spec.type_code == Some('c') && !is_positive {
        return Err(Error::overflow("%c arg not in range(0x100)"));
    }

    let mut digits = render::render(value, spec, locale)?;

    if spec.alternate {
        let prefix = match spec.type_code {
            Some('x') => "0x",
            Some('X') => "0X",
            Some('o') => "0o",
            Some('b') => "0b",
            _ => "",
        };
        if !prefix.is_empty() {
            // zero padding goes between the prefix and the digits
            let pads_after_prefix = match spec.align {
                Some(align) => align == Align::AfterSign,
                None => spec.zero_pad,
            };
            if pads_after_prefix {
                if let Some(width) = spec.width {
                    let sign_len = match (is_positive, spec.sign) {
                        (false, _) => 1,
                        (true, SignMode::Minus) => 0,
                        (true, _) => 1,
                    };
                    let target = width.saturating_sub(sign_len + prefix.len());
                    while digits.chars().count() < target {
                        digits.insert(0, spec.fill);
                    }
                }
            }
            digits.insert_str(0, prefix);
        }
    }

    Ok(align_text(&digits, value.is_zero(), is_positive, spec))
}

/// Parses a format specification and formats in one step.
///
/// # Errors
///
/// Returns a value error for a malformed spec string in addition to the
/// errors of [`format_number`].
///
/// # Examples
///
/// ```rust
/// use numtower::{format_str, Number};
///
/// assert_eq!(format_str(&Number::from(255), "#06x").unwrap(), "0x00ff");
/// assert_eq!(format_str(&Number::from(-42), "*>8").unwrap(), "*****-42");
/// ```
pub fn format_str(value: &Number, text: &str) -> Result<String> {
    let spec = FormatSpec::parse(text)?;
    format_number(value, &spec)
}
