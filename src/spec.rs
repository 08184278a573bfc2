//! Format specification, locale table, and text alignment.
//!
//! This module provides the structured description of *how* a number should
//! be rendered:
//!
//! - [`FormatSpec`]: fill, alignment, sign mode, width, precision, type code
//! - [`FormatSpec::parse`]: the `[[fill]align][sign][#][0][width][,][.precision][type]`
//!   mini-language
//! - [`Locale`]: the culture-specific separators passed through to the
//!   `'n'` type code
//! - [`align_text`]: final sign/fill/width assembly over already-rendered
//!   digits
//!
//! The renderers in [`crate::render`] consume a `FormatSpec` and produce an
//! unsigned digit string; `align_text` then applies the sign and pads to the
//! requested width.
//!
//! ## Examples
//!
//! ```rust
//! use numtower::FormatSpec;
//!
//! let spec = FormatSpec::parse("*>+10.2f").unwrap();
//! assert_eq!(spec.fill, '*');
//! assert_eq!(spec.width, Some(10));
//! assert_eq!(spec.precision, Some(2));
//! assert_eq!(spec.type_code, Some('f'));
//! ```

use crate::error::{Error, Result};

/// Alignment direction for padded output.
///
/// Corresponds to the `<`, `>`, `^`, and `=` alignment characters. Numbers
/// default to right alignment when no alignment is given.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    /// `<`: digits first, fill after.
    Left,
    /// `>`: fill first, digits after (default for numbers).
    Right,
    /// `^`: fill split on both sides, extra fill on the right.
    Center,
    /// `=`: sign first, then fill, then digits (used by zero padding).
    AfterSign,
}

impl Align {
    fn from_char(c: char) -> Option<Align> {
        match c {
            '<' => Some(Align::Left),
            '>' => Some(Align::Right),
            '^' => Some(Align::Center),
            '=' => Some(Align::AfterSign),
            _ => None,
        }
    }
}

/// Sign rendering mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SignMode {
    /// `-`: sign only on negative values (default).
    #[default]
    Minus,
    /// `+`: explicit sign on every value.
    Plus,
    /// ` `: leading space on non-negative values.
    Space,
}

/// A parsed format specification.
///
/// Field semantics follow the standard format mini-language. `precision`
/// can never be negative (it is unsigned); combining a precision with an
/// integer type code is rejected by the renderer rather than the parser,
/// because validity depends on the kind of value being formatted.
///
/// # Examples
///
/// ```rust
/// use numtower::FormatSpec;
///
/// let spec = FormatSpec::default().with_precision(2).with_type_code('f');
/// assert_eq!(spec.precision, Some(2));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct FormatSpec {
    pub fill: char,
    pub align: Option<Align>,
    pub sign: SignMode,
    pub alternate: bool,
    pub zero_pad: bool,
    pub width: Option<usize>,
    pub thousands: bool,
    pub precision: Option<usize>,
    pub type_code: Option<char>,
}

impl Default for FormatSpec {
    fn default() -> Self {
        FormatSpec {
            fill: ' ',
            align: None,
            sign: SignMode::default(),
            alternate: false,
            zero_pad: false,
            width: None,
            thousands: false,
            precision: None,
            type_code: None,
        }
    }
}

impl FormatSpec {
    /// Parses a format specification string.
    ///
    /// Grammar: `[[fill]align][sign][#][0][width][,][.precision][type]`.
    ///
    /// # Errors
    ///
    /// Returns a value error when a `.` is not followed by digits, when the
    /// width or precision does not fit a machine word, or when unconsumed
    /// characters remain after the type code.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use numtower::FormatSpec;
    ///
    /// assert!(FormatSpec::parse("08,.3e").is_ok());
    /// assert!(FormatSpec::parse(".f").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<FormatSpec> {
        let chars: Vec<char> = text.chars().collect();
        let mut spec = FormatSpec::default();
        let mut pos = 0;
        let mut explicit_fill = false;

        if chars.len() >= 2 {
            if let Some(align) = Align::from_char(chars[1]) {
                spec.fill = chars[0];
                spec.align = Some(align);
                explicit_fill = true;
                pos = 2;
            }
        }
        if pos == 0 && !chars.is_empty() {
            if let Some(align) = Align::from_char(chars[0]) {
                spec.align = Some(align);
                pos = 1;
            }
        }

        match chars.get(pos) {
            Some('+') => {
                spec.sign = SignMode::Plus;
                pos += 1;
            }
            Some('-') => {
                spec.sign = SignMode::Minus;
                pos += 1;
            }
            Some(' ') => {
                spec.sign = SignMode::Space;
                pos += 1;
            }
            _ => {}
        }

        if chars.get(pos) == Some(&'#') {
            spec.alternate = true;
            pos += 1;
        }

        if chars.get(pos) == Some(&'0') {
            spec.zero_pad = true;
            if !explicit_fill {
                spec.fill = '0';
            }
            pos += 1;
        }

        let width_start = pos;
        while chars.get(pos).is_some_and(|c| c.is_ascii_digit()) {
            pos += 1;
        }
        if pos > width_start {
            let digits: String = chars[width_start..pos].iter().collect();
            let width = digits
                .parse::<usize>()
                .map_err(|_| Error::value(format!("width out of range in format spec '{text}'")))?;
            spec.width = Some(width);
        }

        if chars.get(pos) == Some(&',') {
            spec.thousands = true;
            pos += 1;
        }

        if chars.get(pos) == Some(&'.') {
            pos += 1;
            let prec_start = pos;
            while chars.get(pos).is_some_and(|c| c.is_ascii_digit()) {
                pos += 1;
            }
            if pos == prec_start {
                return Err(Error::value(format!(
                    "format spec '{text}' missing precision"
                )));
            }
            let digits: String = chars[prec_start..pos].iter().collect();
            let precision = digits.parse::<usize>().map_err(|_| {
                Error::value(format!("precision out of range in format spec '{text}'"))
            })?;
            spec.precision = Some(precision);
        }

        if pos < chars.len() {
            spec.type_code = Some(chars[pos]);
            pos += 1;
        }
        if pos != chars.len() {
            return Err(Error::value(format!("invalid format spec '{text}'")));
        }

        Ok(spec)
    }

    /// Sets the minimum field width.
    #[must_use]
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    /// Sets the precision (fractional or significant digits, per type code).
    #[must_use]
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = Some(precision);
        self
    }

    /// Sets the presentation type code (`d`, `f`, `e`, `g`, `x`, ...).
    #[must_use]
    pub fn with_type_code(mut self, code: char) -> Self {
        self.type_code = Some(code);
        self
    }

    /// Sets the sign rendering mode.
    #[must_use]
    pub fn with_sign(mut self, sign: SignMode) -> Self {
        self.sign = sign;
        self
    }

    /// Enables the thousands separator (`,`).
    #[must_use]
    pub fn with_thousands(mut self) -> Self {
        self.thousands = true;
        self
    }
}

/// Culture-specific number separators, passed through to the `'n'` type
/// code. The invariant locale uses `.` and performs no digit grouping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Locale {
    pub decimal_point: char,
    pub thousands_sep: char,
    pub use_grouping: bool,
}

impl Locale {
    /// The invariant locale: `.` decimal point, no grouping.
    #[must_use]
    pub fn invariant() -> Self {
        Locale {
            decimal_point: '.',
            thousands_sep: ',',
            use_grouping: false,
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::invariant()
    }
}

/// Applies sign, fill, and width to rendered digits.
///
/// `digits` must carry no sign of its own; the caller supplies the value's
/// sign through `is_positive` (note `-0.0` is not positive). Numbers align
/// right by default; the zero-pad flag pads between the sign and the digits.
///
/// # Examples
///
/// ```rust
/// use numtower::{align_text, FormatSpec};
///
/// let spec = FormatSpec::parse("08").unwrap();
/// assert_eq!(align_text("3.14", false, false, &spec), "-0003.14");
/// ```
#[must_use]
pub fn align_text(digits: &str, is_zero: bool, is_positive: bool, spec: &FormatSpec) -> String {
    debug_assert!(!is_zero || !digits.is_empty());

    let sign = if !is_positive {
        "-"
    } else {
        match spec.sign {
            SignMode::Minus => "",
            SignMode::Plus => "+",
            SignMode::Space => " ",
        }
    };

    let width = spec.width.unwrap_or(0);
    let content_len = sign.chars().count() + digits.chars().count();
    if content_len >= width {
        return format!("{sign}{digits}");
    }

    let pad = width - content_len;
    let align = match spec.align {
        Some(align) => align,
        None if spec.zero_pad => Align::AfterSign,
        None => Align::Right,
    };
    let fill: String = std::iter::repeat(spec.fill).take(pad).collect();
    match align {
        Align::Left => format!("{sign}{digits}{fill}"),
        Align::Right => format!("{fill}{sign}{digits}"),
        Align::AfterSign => format!("{sign}{fill}{digits}"),
        Align::Center => {
            let left = pad / 2;
            let lfill: String = std::iter::repeat(spec.fill).take(left).collect();
            let rfill: String = std::iter::repeat(spec.fill).take(pad - left).collect();
            format!("{lfill}{sign}{digits}{rfill}")
        }
    }
}
