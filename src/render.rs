//! Digit rendering for the numeric tower.
//!
//! The renderers here turn an unsigned magnitude plus a [`FormatSpec`] into
//! an unsigned digit string: no sign, no padding. Sign and width handling
//! belong to [`crate::align_text`], which callers apply afterwards.
//!
//! Three entry points cover the three numeric kinds:
//!
//! - [`render_int`] for big-integer magnitudes (`d`, `n`, `x`, `X`, `o`,
//!   `b`, `c`, and the float-style codes `e`, `f`, `%`, `g`)
//! - [`render_float`] for doubles (`f`, `F`, `e`, `E`, `%`, `g`, `G`, `n`,
//!   and the default "repr-like" format)
//! - [`render_decimal`] for fixed-scale decimals (same codes as floats)
//!
//! All non-trivial rounding runs through a shared decimal-digit engine
//! ([`Digits`]) that rounds half-up (away from zero) at arbitrary
//! significant- or fractional-digit positions, with full carry propagation:
//! rounding `9.99` at two significant digits yields `10`, re-measuring the
//! digit count and bumping the exponent.

use crate::error::{Error, Result};
use crate::spec::{FormatSpec, Locale};
use crate::value::Number;
use num_bigint::BigUint;
use num_traits::Zero;
use rust_decimal::Decimal;

/// An unsigned decimal significand: `value = 0.d1 d2 ... dn * 10^exp`.
///
/// The digit vector holds significant digits only (no leading or trailing
/// zeros); an empty vector is zero. This representation makes half-up
/// rounding, fixed/scientific assembly, and exponent arithmetic exact for
/// every source kind.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Digits {
    digits: Vec<u8>,
    exp: i32,
}

impl Digits {
    fn zero() -> Self {
        Digits {
            digits: Vec::new(),
            exp: 0,
        }
    }

    fn is_zero(&self) -> bool {
        self.digits.is_empty()
    }

    fn from_biguint(value: &BigUint) -> Self {
        if value.is_zero() {
            return Digits::zero();
        }
        let text = value.to_string();
        let exp = text.len() as i32;
        let mut digits: Vec<u8> = text.bytes().map(|b| b - b'0').collect();
        while digits.last() == Some(&0) {
            digits.pop();
        }
        Digits { digits, exp }
    }

    fn from_decimal(value: &Decimal) -> Self {
        let mantissa = value.mantissa().unsigned_abs();
        if mantissa == 0 {
            return Digits::zero();
        }
        let text = mantissa.to_string();
        let exp = text.len() as i32 - value.scale() as i32;
        let mut digits: Vec<u8> = text.bytes().map(|b| b - b'0').collect();
        while digits.last() == Some(&0) {
            digits.pop();
        }
        Digits { digits, exp }
    }

    /// Builds from a finite non-negative double, correctly rounded to
    /// `sig` significant digits by the standard library's float-to-decimal
    /// conversion.
    fn from_f64_rounded(value: f64, sig: usize) -> Self {
        Digits::parse_sci(&format!("{:.*e}", sig - 1, value))
    }

    /// Builds from a finite non-negative double using the shortest
    /// round-trip digit sequence.
    fn from_f64_shortest(value: f64) -> Self {
        Digits::parse_sci(&format!("{value:e}"))
    }

    /// Parses `d[.ddd]e±x` as produced by the standard formatter.
    fn parse_sci(text: &str) -> Self {
        let (mantissa, exp_text) = text.split_once('e').unwrap_or((text, "0"));
        let exp10: i32 = exp_text.parse().unwrap_or(0);
        let mut digits: Vec<u8> = mantissa
            .bytes()
            .filter(|b| b.is_ascii_digit())
            .map(|b| b - b'0')
            .collect();
        while digits.last() == Some(&0) {
            digits.pop();
        }
        if digits == [0] || digits.is_empty() {
            return Digits::zero();
        }
        Digits {
            digits,
            exp: exp10 + 1,
        }
    }

    /// Rounds half-up (away from zero) at `keep` significant digits.
    ///
    /// A carry out of the leading digit re-measures the digit count: the
    /// result becomes a single `1` and the exponent grows by one.
    fn round_sig(&mut self, keep: usize) {
        if self.digits.len() <= keep {
            return;
        }
        let round_up = self.digits[keep] >= 5;
        self.digits.truncate(keep);
        if round_up {
            let mut carried = true;
            for digit in self.digits.iter_mut().rev() {
                *digit += 1;
                if *digit == 10 {
                    *digit = 0;
                } else {
                    carried = false;
                    break;
                }
            }
            if carried {
                self.digits.clear();
                self.digits.push(1);
                self.exp += 1;
            }
        }
        while self.digits.last() == Some(&0) {
            self.digits.pop();
        }
        if self.digits.is_empty() {
            // all kept digits rounded away downward; value was below half a unit
            self.exp = 0;
        }
    }

    /// Rounds half-up at `frac` digits after the decimal point.
    fn round_frac(&mut self, frac: i32) {
        if self.is_zero() {
            return;
        }
        let sig = self.exp + frac;
        if sig >= self.digits.len() as i32 {
            return;
        }
        if sig < 0 {
            *self = Digits::zero();
        } else if sig == 0 {
            if self.digits[0] >= 5 {
                self.digits.clear();
                self.digits.push(1);
                self.exp += 1;
            } else {
                *self = Digits::zero();
            }
        } else {
            self.round_sig(sig as usize);
        }
    }

    /// Renders in fixed-point form.
    ///
    /// With `frac = Some(n)` the fractional part is padded to exactly `n`
    /// digits; with `None` it is minimal, but never shorter than
    /// `min_frac` digits. The integer part is grouped with `sep` when
    /// given.
    fn to_fixed(&self, frac: Option<usize>, min_frac: usize, sep: Option<char>, point: char) -> String {
        let len = self.digits.len() as i32;
        let int_part = if self.exp <= 0 {
            "0".to_string()
        } else {
            let mut text = String::new();
            for pos in 0..self.exp {
                if pos < len {
                    text.push((b'0' + self.digits[pos as usize]) as char);
                } else {
                    text.push('0');
                }
            }
            text
        };

        let mut frac_digits = String::new();
        if self.exp < 0 {
            for _ in 0..(-self.exp) {
                frac_digits.push('0');
            }
            for &d in &self.digits {
                frac_digits.push((b'0' + d) as char);
            }
        } else if self.exp < len {
            for &d in &self.digits[self.exp as usize..] {
                frac_digits.push((b'0' + d) as char);
            }
        }

        match frac {
            Some(n) => {
                frac_digits.truncate(n);
                while frac_digits.len() < n {
                    frac_digits.push('0');
                }
            }
            None => {
                while frac_digits.len() < min_frac {
                    frac_digits.push('0');
                }
            }
        }

        let int_part = match sep {
            Some(sep) => group_digits(&int_part, sep),
            None => int_part,
        };
        if frac_digits.is_empty() {
            int_part
        } else {
            format!("{int_part}{point}{frac_digits}")
        }
    }

    /// Renders in scientific notation with a sign-prefixed exponent of at
    /// least two digits. `frac = Some(n)` pads the mantissa fraction to
    /// exactly `n` digits; `None` keeps it minimal.
    fn to_scientific(&self, frac: Option<usize>, marker: char, point: char) -> String {
        let lead = match self.digits.first() {
            Some(&d) => (b'0' + d) as char,
            None => '0',
        };
        let mut rest: String = self.digits[1.min(self.digits.len())..]
            .iter()
            .map(|&d| (b'0' + d) as char)
            .collect();
        if let Some(n) = frac {
            rest.truncate(n);
            while rest.len() < n {
                rest.push('0');
            }
        }
        let exp10 = if self.is_zero() { 0 } else { self.exp - 1 };
        let exp_sign = if exp10 < 0 { '-' } else { '+' };
        if rest.is_empty() {
            format!("{lead}{marker}{exp_sign}{:02}", exp10.abs())
        } else {
            format!("{lead}{point}{rest}{marker}{exp_sign}{:02}", exp10.abs())
        }
    }
}

/// Inserts a separator every three digits, counting from the right.
fn group_digits(int_part: &str, sep: char) -> String {
    let digits: Vec<char> = int_part.chars().collect();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (pos, c) in digits.iter().enumerate() {
        if pos > 0 && (digits.len() - pos) % 3 == 0 {
            out.push(sep);
        }
        out.push(*c);
    }
    out
}

/// Separators in effect for a given type code: `'n'` consults the locale,
/// everything else uses the invariant point and the `,` flag.
fn separators(spec: &FormatSpec, locale: &Locale) -> (Option<char>, char) {
    if spec.type_code == Some('n') {
        let sep = locale.use_grouping.then_some(locale.thousands_sep);
        (sep, locale.decimal_point)
    } else {
        let sep = spec.thousands.then_some(',');
        (sep, '.')
    }
}

fn unknown_code(code: char, kind: &str) -> Error {
    Error::value(format!(
        "unknown format code '{code}' for object of type '{kind}'"
    ))
}

fn precision_not_allowed() -> Error {
    Error::value("precision not allowed in integer format specifier")
}

/// Renders an unsigned big-integer magnitude.
///
/// # Errors
///
/// Returns a value error for an unrecognized type code or for a precision
/// combined with `d`/`x`/`X`/`o`/`b`/`c` or no code at all, and an
/// overflow error for `c` with a magnitude above `0xFF`. `n` with a
/// precision renders through the general format instead.
///
/// # Examples
///
/// ```rust
/// use num_bigint::BigUint;
/// use numtower::{render_int, FormatSpec, Locale};
///
/// let spec = FormatSpec::default().with_type_code('x');
/// let digits = render_int(&BigUint::from(255u32), &spec, &Locale::invariant()).unwrap();
/// assert_eq!(digits, "ff");
/// ```
pub fn render_int(magnitude: &BigUint, spec: &FormatSpec, locale: &Locale) -> Result<String> {
    let (sep, point) = separators(spec, locale);
    match spec.type_code {
        None | Some('d') => {
            if spec.precision.is_some() {
                return Err(precision_not_allowed());
            }
            let text = magnitude.to_string();
            Ok(match sep {
                Some(sep) => group_digits(&text, sep),
                None => text,
            })
        }
        Some('n') if spec.precision.is_none() => {
            let text = magnitude.to_string();
            Ok(match sep {
                Some(sep) => group_digits(&text, sep),
                None => text,
            })
        }
        Some(code @ ('x' | 'X' | 'o' | 'b')) => {
            if spec.precision.is_some() {
                return Err(precision_not_allowed());
            }
            let radix = match code {
                'o' => 8,
                'b' => 2,
                _ => 16,
            };
            let text = magnitude.to_str_radix(radix);
            Ok(if code == 'X' { text.to_uppercase() } else { text })
        }
        Some('c') => {
            if spec.precision.is_some() {
                return Err(precision_not_allowed());
            }
            match num_traits::ToPrimitive::to_u32(magnitude) {
                Some(byte) if byte <= 0xFF => Ok(char::from(byte as u8).to_string()),
                _ => Err(Error::overflow("%c arg not in range(0x100)")),
            }
        }
        Some('f' | 'F') => {
            let prec = spec.precision.unwrap_or(6);
            let mut dg = Digits::from_biguint(magnitude);
            dg.round_frac(prec as i32);
            Ok(dg.to_fixed(Some(prec), 0, sep, point))
        }
        Some(code @ ('e' | 'E')) => {
            let prec = spec.precision.unwrap_or(6);
            let mut dg = Digits::from_biguint(magnitude);
            dg.round_sig(prec + 1);
            Ok(dg.to_scientific(Some(prec), code, point))
        }
        Some('%') => {
            let prec = spec.precision.unwrap_or(6);
            let mut dg = Digits::from_biguint(magnitude);
            dg.exp += 2;
            dg.round_frac(prec as i32);
            Ok(format!("{}%", dg.to_fixed(Some(prec), 0, sep, point)))
        }
        Some(code @ ('g' | 'G' | 'n')) => {
            let prec = spec.precision.unwrap_or(6).max(1);
            let marker = if code == 'G' { 'E' } else { 'e' };
            let dg = Digits::from_biguint(magnitude);
            Ok(general_format(dg, prec, 0, marker, sep, point))
        }
        Some(code) => Err(unknown_code(code, "int")),
    }
}

/// Renders a non-negative double magnitude (the caller strips the sign).
///
/// NaN and infinity render as `nan`/`inf`, uppercased for the uppercase
/// type codes.
///
/// # Errors
///
/// Returns a value error for an unrecognized type code.
///
/// # Examples
///
/// ```rust
/// use numtower::{render_float, FormatSpec, Locale};
///
/// let spec = FormatSpec::default().with_precision(2).with_type_code('f');
/// let digits = render_float(1234.5, &spec, &Locale::invariant()).unwrap();
/// assert_eq!(digits, "1234.50");
/// ```
pub fn render_float(magnitude: f64, spec: &FormatSpec, locale: &Locale) -> Result<String> {
    debug_assert!(magnitude.is_nan() || magnitude >= 0.0);
    let upper = matches!(spec.type_code, Some('E' | 'F' | 'G'));
    if magnitude.is_nan() {
        return Ok(if upper { "NAN" } else { "nan" }.to_string());
    }
    if magnitude.is_infinite() {
        return Ok(if upper { "INF" } else { "inf" }.to_string());
    }

    let (sep, point) = separators(spec, locale);
    match spec.type_code {
        None => Ok(default_format_float(magnitude, spec.precision, sep, point)),
        Some('f' | 'F') => {
            let prec = spec.precision.unwrap_or(6);
            let text = format!("{magnitude:.prec$}");
            Ok(apply_grouping(&text, sep, point))
        }
        Some(code @ ('e' | 'E')) => {
            let prec = spec.precision.unwrap_or(6);
            let text = format!("{magnitude:.prec$e}");
            Ok(rewrite_exponent(&text, code))
        }
        Some('%') => {
            let prec = spec.precision.unwrap_or(6);
            let text = format!("{:.prec$}", magnitude * 100.0);
            Ok(format!("{}%", apply_grouping(&text, sep, point)))
        }
        Some(code @ ('g' | 'G' | 'n')) => {
            let prec = spec.precision.unwrap_or(6).max(1);
            let marker = if code == 'G' { 'E' } else { 'e' };
            let dg = Digits::from_f64_rounded(magnitude, 17);
            Ok(general_format(dg, prec, 0, marker, sep, point))
        }
        Some(code) => Err(unknown_code(code, "float")),
    }
}

/// Renders an unsigned fixed-scale decimal magnitude.
///
/// Accepts the same type codes as floats; the integer codes are rejected.
///
/// # Errors
///
/// Returns a value error for an unrecognized type code.
pub fn render_decimal(magnitude: &Decimal, spec: &FormatSpec, locale: &Locale) -> Result<String> {
    let (sep, point) = separators(spec, locale);
    let dg = Digits::from_decimal(magnitude);
    match spec.type_code {
        None => Ok(default_format_decimal(dg, spec.precision, sep, point)),
        Some('f' | 'F') => {
            let prec = spec.precision.unwrap_or(6);
            let mut dg = dg;
            dg.round_frac(prec as i32);
            Ok(dg.to_fixed(Some(prec), 0, sep, point))
        }
        Some(code @ ('e' | 'E')) => {
            let prec = spec.precision.unwrap_or(6);
            let mut dg = dg;
            dg.round_sig(prec + 1);
            Ok(dg.to_scientific(Some(prec), code, point))
        }
        Some('%') => {
            let prec = spec.precision.unwrap_or(6);
            let mut dg = dg;
            dg.exp += 2;
            dg.round_frac(prec as i32);
            Ok(format!("{}%", dg.to_fixed(Some(prec), 0, sep, point)))
        }
        Some(code @ ('g' | 'G' | 'n')) => {
            let prec = spec.precision.unwrap_or(6).max(1);
            let marker = if code == 'G' { 'E' } else { 'e' };
            Ok(general_format(dg, prec, 0, marker, sep, point))
        }
        Some(code) => Err(unknown_code(code, "decimal")),
    }
}

/// Renders the absolute magnitude of any tower value.
pub fn render(value: &Number, spec: &FormatSpec, locale: &Locale) -> Result<String> {
    match value {
        Number::Int(i) => render_int(i.magnitude(), spec, locale),
        Number::Float(f) => render_float(f.abs(), spec, locale),
        Number::Decimal(d) => render_decimal(&d.abs(), spec, locale),
    }
}

/// The general format shared by `g`/`G`/`n` and the precision-carrying
/// default format.
///
/// Counts integer digits `d`; switches to scientific notation when the
/// count exceeds the precision (re-checking after rounding, since a carry
/// such as `999999.5 -> 1000000` grows the count) or when the nonzero
/// magnitude falls below `1e-4`. Otherwise renders fixed-point with
/// `max(precision - d, 0)` fractional digits, suppressing a fractional
/// part that rounds away entirely.
fn general_format(
    mut dg: Digits,
    prec: usize,
    min_frac: usize,
    marker: char,
    sep: Option<char>,
    point: char,
) -> String {
    if !dg.is_zero() && dg.exp < -3 {
        dg.round_sig(prec);
        return dg.to_scientific(None, marker, point);
    }
    let int_digits = dg.exp.max(1);
    if int_digits > prec as i32 {
        dg.round_sig(prec);
        return dg.to_scientific(None, marker, point);
    }
    dg.round_frac(prec as i32 - int_digits);
    if dg.exp.max(1) > prec as i32 {
        // carry overflowed the fixed window, e.g. 999999.5 at six digits
        return dg.to_scientific(None, marker, point);
    }
    dg.to_fixed(None, min_frac, sep, point)
}

/// The default ("repr-like") float format: scientific once the magnitude
/// reaches `1e12` or drops to `9e-5`, otherwise fixed with at least one
/// fractional digit. A supplied precision routes through the general
/// format instead, keeping the trailing-digit rule.
fn default_format_float(
    magnitude: f64,
    precision: Option<usize>,
    sep: Option<char>,
    point: char,
) -> String {
    if magnitude == 0.0 {
        return format!("0{point}0");
    }
    if let Some(prec) = precision {
        let dg = Digits::from_f64_rounded(magnitude, 17);
        return general_format(dg, prec.max(1), 1, 'e', sep, point);
    }
    let dg = Digits::from_f64_shortest(magnitude);
    if magnitude >= 1e12 || magnitude <= 9e-5 {
        dg.to_scientific(None, 'e', point)
    } else {
        dg.to_fixed(None, 1, sep, point)
    }
}

/// The default decimal format follows the same threshold law as floats,
/// tested exactly on the digit representation.
fn default_format_decimal(
    dg: Digits,
    precision: Option<usize>,
    sep: Option<char>,
    point: char,
) -> String {
    if dg.is_zero() {
        return format!("0{point}0");
    }
    if let Some(prec) = precision {
        return general_format(dg, prec.max(1), 1, 'e', sep, point);
    }
    // value >= 1e12 has at least 13 integer digits; value <= 9e-5 sits at
    // exponent -4 with a lone 9 or a smaller leading digit
    let big = dg.exp >= 13;
    let small = dg.exp < -4 || (dg.exp == -4 && (dg.digits[0] < 9 || dg.digits.len() == 1));
    if big || small {
        dg.to_scientific(None, 'e', point)
    } else {
        dg.to_fixed(None, 1, sep, point)
    }
}

/// Regroups a std-formatted fixed-point string (`1234.50`) with the given
/// separators.
fn apply_grouping(text: &str, sep: Option<char>, point: char) -> String {
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text, None),
    };
    let int_part = match sep {
        Some(sep) => group_digits(int_part, sep),
        None => int_part.to_string(),
    };
    match frac_part {
        Some(frac) => format!("{int_part}{point}{frac}"),
        None => int_part,
    }
}

/// Rewrites the exponent of a std-formatted scientific string to the
/// sign-prefixed, two-digit-minimum form (`1.5e3` -> `1.5e+03`).
fn rewrite_exponent(text: &str, marker: char) -> String {
    let (mantissa, exp_text) = match text.split_once('e') {
        Some(parts) => parts,
        None => (text, "0"),
    };
    let exp10: i32 = exp_text.parse().unwrap_or(0);
    let exp_sign = if exp10 < 0 { '-' } else { '+' };
    format!("{mantissa}{marker}{exp_sign}{:02}", exp10.abs())
}
