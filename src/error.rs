//! Error types for numeric formatting, parsing, and arithmetic.
//!
//! Every fallible operation in this crate reports one of three error kinds,
//! mirroring the exception taxonomy of the formatting language this crate
//! is compatible with:
//!
//! - **Value errors**: malformed textual input, unknown or incompatible
//!   format type codes, domain errors (e.g. a negative base raised to a
//!   fractional power)
//! - **Overflow errors**: the result does not fit the target representation
//!   (hex-float exponent above the double range, character codes outside a
//!   single byte)
//! - **Zero-division errors**: modulo or division by zero, zero raised to a
//!   negative power
//!
//! Errors are raised synchronously at the point of detection; no partial
//! result is ever returned alongside an error.
//!
//! ## Examples
//!
//! ```rust
//! use numtower::{hex_decode, Error};
//!
//! let err = hex_decode("0x").unwrap_err();
//! assert!(matches!(err, Error::Value(_)));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors raised by formatting, comparison, codec,
/// and float-arithmetic operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Malformed input or an invalid combination of format fields.
    #[error("ValueError: {0}")]
    Value(String),

    /// Result exceeds the representable range of the target type.
    #[error("OverflowError: {0}")]
    Overflow(String),

    /// Division or modulo by zero, or zero raised to a negative power.
    #[error("ZeroDivisionError: {0}")]
    ZeroDivision(String),
}

impl Error {
    /// Creates a value error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use numtower::Error;
    ///
    /// let err = Error::value("unknown format code 'q'");
    /// assert!(err.to_string().contains("ValueError"));
    /// ```
    pub fn value<T: fmt::Display>(msg: T) -> Self {
        Error::Value(msg.to_string())
    }

    /// Creates an overflow error with a display message.
    pub fn overflow<T: fmt::Display>(msg: T) -> Self {
        Error::Overflow(msg.to_string())
    }

    /// Creates a zero-division error with a display message.
    pub fn zero_division<T: fmt::Display>(msg: T) -> Self {
        Error::ZeroDivision(msg.to_string())
    }

    /// Returns the message carried by this error, without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            Error::Value(msg) | Error::Overflow(msg) | Error::ZeroDivision(msg) => msg,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_kind() {
        assert_eq!(Error::value("bad spec").to_string(), "ValueError: bad spec");
        assert_eq!(
            Error::overflow("too big").to_string(),
            "OverflowError: too big"
        );
        assert_eq!(
            Error::zero_division("float modulo").to_string(),
            "ZeroDivisionError: float modulo"
        );
    }

    #[test]
    fn test_message_strips_prefix() {
        assert_eq!(Error::value("bad spec").message(), "bad spec");
    }
}
