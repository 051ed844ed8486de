//! Error types for the native bridge.
//!
//! Failures reach the caller through one of two channels:
//!
//! - **Local validation**: a builder rejected a combination of options, an
//!   argument could not be marshaled, or a capability is missing. These are
//!   detected host-side and never cross the native boundary.
//! - **Native errors**: the native parser reported an [`ErrorCode`] together
//!   with the byte index where it stopped. These are wrapped unchanged in
//!   [`Error::Native`].
//!
//! Loading failures ([`Error::LibraryNotFound`], [`Error::Load`],
//! [`Error::SymbolNotFound`]) are reported when the shared library is opened.
//!
//! ## Examples
//!
//! ```rust
//! use lexical_bridge::{Error, ErrorCode};
//!
//! let err = Error::native(ErrorCode::InvalidDigit, 3);
//! assert_eq!(err.code(), Some(ErrorCode::InvalidDigit));
//! assert_eq!(err.index(), Some(3));
//! assert!(err.to_string().contains("index 3"));
//! ```

use std::fmt;
use thiserror::Error;

use crate::capability::Capability;

/// Error codes reported by the native library.
///
/// The discriminants are fixed by the native ABI and must not change.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Integral overflow occurred during numeric parsing.
    Overflow = -1,
    /// Integral underflow occurred during numeric parsing.
    Underflow = -2,
    /// Invalid digit found before string termination.
    InvalidDigit = -3,
    /// Empty byte array found.
    Empty = -4,
    /// Empty mantissa found.
    EmptyMantissa = -5,
    /// Empty exponent found.
    EmptyExponent = -6,
    /// Empty integer found.
    EmptyInteger = -7,
    /// Empty fraction found.
    EmptyFraction = -8,
    /// Invalid positive mantissa sign was found.
    InvalidPositiveMantissaSign = -9,
    /// Mantissa sign was required, but not found.
    MissingMantissaSign = -10,
    /// Exponent was present but not allowed.
    InvalidExponent = -11,
    /// Invalid positive exponent sign was found.
    InvalidPositiveExponentSign = -12,
    /// Exponent sign was required, but not found.
    MissingExponentSign = -13,
    /// Exponent was present without fraction component.
    ExponentWithoutFraction = -14,
    /// Integer had invalid leading zeros.
    InvalidLeadingZeros = -15,
}

impl ErrorCode {
    /// Every code, in discriminant order.
    pub const ALL: [ErrorCode; 15] = [
        ErrorCode::Overflow,
        ErrorCode::Underflow,
        ErrorCode::InvalidDigit,
        ErrorCode::Empty,
        ErrorCode::EmptyMantissa,
        ErrorCode::EmptyExponent,
        ErrorCode::EmptyInteger,
        ErrorCode::EmptyFraction,
        ErrorCode::InvalidPositiveMantissaSign,
        ErrorCode::MissingMantissaSign,
        ErrorCode::InvalidExponent,
        ErrorCode::InvalidPositiveExponentSign,
        ErrorCode::MissingExponentSign,
        ErrorCode::ExponentWithoutFraction,
        ErrorCode::InvalidLeadingZeros,
    ];

    /// Converts a raw native code into an [`ErrorCode`].
    ///
    /// Returns `None` for values outside the fixed enumeration.
    #[must_use]
    pub const fn from_raw(code: i32) -> Option<Self> {
        match code {
            -1 => Some(ErrorCode::Overflow),
            -2 => Some(ErrorCode::Underflow),
            -3 => Some(ErrorCode::InvalidDigit),
            -4 => Some(ErrorCode::Empty),
            -5 => Some(ErrorCode::EmptyMantissa),
            -6 => Some(ErrorCode::EmptyExponent),
            -7 => Some(ErrorCode::EmptyInteger),
            -8 => Some(ErrorCode::EmptyFraction),
            -9 => Some(ErrorCode::InvalidPositiveMantissaSign),
            -10 => Some(ErrorCode::MissingMantissaSign),
            -11 => Some(ErrorCode::InvalidExponent),
            -12 => Some(ErrorCode::InvalidPositiveExponentSign),
            -13 => Some(ErrorCode::MissingExponentSign),
            -14 => Some(ErrorCode::ExponentWithoutFraction),
            -15 => Some(ErrorCode::InvalidLeadingZeros),
            _ => None,
        }
    }

    /// Returns the raw ABI value.
    #[inline]
    #[must_use]
    pub const fn as_raw(self) -> i32 {
        self as i32
    }

    /// Human-readable description, without the index.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            ErrorCode::Overflow => "Numeric overflow occurred at index",
            ErrorCode::Underflow => "Numeric underflow occurred at index",
            ErrorCode::InvalidDigit => "Invalid digit found at index",
            ErrorCode::Empty => "Empty input found, starting at index",
            ErrorCode::EmptyMantissa => "Empty mantissa found, starting at index",
            ErrorCode::EmptyExponent => "Empty exponent found, starting at index",
            ErrorCode::EmptyInteger => "Empty integer found, starting at index",
            ErrorCode::EmptyFraction => "Empty fraction found, starting at index",
            ErrorCode::InvalidPositiveMantissaSign => {
                "Invalid \"+\" sign found for mantissa, starting at index"
            }
            ErrorCode::MissingMantissaSign => {
                "Missing required sign for mantissa, starting at index"
            }
            ErrorCode::InvalidExponent => "Disallowed exponent was found, starting at index",
            ErrorCode::InvalidPositiveExponentSign => {
                "Invalid \"+\" sign found for exponent, starting at index"
            }
            ErrorCode::MissingExponentSign => {
                "Missing required sign for exponent, starting at index"
            }
            ErrorCode::ExponentWithoutFraction => {
                "Exponent found without fraction, starting at index"
            }
            ErrorCode::InvalidLeadingZeros => {
                "Number was found with invalid leading zeros at index"
            }
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_overflow(self) -> bool {
        matches!(self, ErrorCode::Overflow)
    }

    #[inline]
    #[must_use]
    pub const fn is_underflow(self) -> bool {
        matches!(self, ErrorCode::Underflow)
    }

    #[inline]
    #[must_use]
    pub const fn is_invalid_digit(self) -> bool {
        matches!(self, ErrorCode::InvalidDigit)
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, ErrorCode::Empty)
    }

    #[inline]
    #[must_use]
    pub const fn is_empty_mantissa(self) -> bool {
        matches!(self, ErrorCode::EmptyMantissa)
    }

    #[inline]
    #[must_use]
    pub const fn is_empty_exponent(self) -> bool {
        matches!(self, ErrorCode::EmptyExponent)
    }

    #[inline]
    #[must_use]
    pub const fn is_empty_integer(self) -> bool {
        matches!(self, ErrorCode::EmptyInteger)
    }

    #[inline]
    #[must_use]
    pub const fn is_empty_fraction(self) -> bool {
        matches!(self, ErrorCode::EmptyFraction)
    }

    #[inline]
    #[must_use]
    pub const fn is_invalid_positive_mantissa_sign(self) -> bool {
        matches!(self, ErrorCode::InvalidPositiveMantissaSign)
    }

    #[inline]
    #[must_use]
    pub const fn is_missing_mantissa_sign(self) -> bool {
        matches!(self, ErrorCode::MissingMantissaSign)
    }

    #[inline]
    #[must_use]
    pub const fn is_invalid_exponent(self) -> bool {
        matches!(self, ErrorCode::InvalidExponent)
    }

    #[inline]
    #[must_use]
    pub const fn is_invalid_positive_exponent_sign(self) -> bool {
        matches!(self, ErrorCode::InvalidPositiveExponentSign)
    }

    #[inline]
    #[must_use]
    pub const fn is_missing_exponent_sign(self) -> bool {
        matches!(self, ErrorCode::MissingExponentSign)
    }

    #[inline]
    #[must_use]
    pub const fn is_exponent_without_fraction(self) -> bool {
        matches!(self, ErrorCode::ExponentWithoutFraction)
    }

    #[inline]
    #[must_use]
    pub const fn is_invalid_leading_zeros(self) -> bool {
        matches!(self, ErrorCode::InvalidLeadingZeros)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// The error struct exactly as the native library lays it out.
///
/// `code` is kept as a raw `i32` so that an out-of-range value coming back
/// from the library is detected by [`NativeError::decode`] instead of being
/// materialized as an invalid enum.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NativeError {
    pub code: i32,
    pub index: usize,
}

impl NativeError {
    /// Creates the raw struct for a known code.
    #[inline]
    #[must_use]
    pub const fn new(code: ErrorCode, index: usize) -> Self {
        NativeError {
            code: code.as_raw(),
            index,
        }
    }

    /// Converts the raw struct into the crate error.
    #[must_use]
    pub fn decode(self) -> Error {
        match ErrorCode::from_raw(self.code) {
            Some(code) => Error::Native {
                code,
                index: self.index,
            },
            None => Error::UnknownErrorCode {
                code: self.code,
                index: self.index,
            },
        }
    }
}

/// Represents all possible errors raised by the bridge.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Error reported by the native parser.
    #[error("{code} {index}")]
    Native { code: ErrorCode, index: usize },

    /// The native library returned a code outside the known enumeration.
    #[error("Unknown native error code {code} at index {index}")]
    UnknownErrorCode { code: i32, index: usize },

    /// A tagged value carried a discriminant outside its enumeration.
    #[error("Invalid discriminant {0} in native tagged value")]
    InvalidTag(u32),

    /// A number format failed validation.
    #[error("Invalid number format: {0}")]
    InvalidFormat(String),

    /// An options bundle failed validation.
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// A host argument could not be marshaled.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The loaded library was built without a required capability.
    #[error("Operation requires the {0} capability, which the native library lacks")]
    Unsupported(Capability),

    /// A tagged option was absent where a value was required.
    #[error("Expected a value, found none")]
    NoValue,

    /// No candidate path produced a loadable library.
    #[error("Native library not found, searched: {}", searched.join(", "))]
    LibraryNotFound { searched: Vec<String> },

    /// A library file exists but could not be opened.
    #[error("Failed to load native library '{path}': {reason}")]
    Load { path: String, reason: String },

    /// A required symbol is not exported by the library.
    #[error("Symbol '{0}' not found in native library")]
    SymbolNotFound(String),

    /// A process configuration accessor failed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a native error from a known code.
    #[must_use]
    pub fn native(code: ErrorCode, index: usize) -> Self {
        Error::Native { code, index }
    }

    /// Creates a number-format validation error.
    pub fn invalid_format(msg: &str) -> Self {
        Error::InvalidFormat(msg.to_string())
    }

    /// Creates an options validation error.
    pub fn invalid_options(msg: &str) -> Self {
        Error::InvalidOptions(msg.to_string())
    }

    /// Creates an argument marshaling error.
    pub fn invalid_argument(msg: &str) -> Self {
        Error::InvalidArgument(msg.to_string())
    }

    /// Creates a configuration error.
    pub fn config(msg: &str) -> Self {
        Error::Config(msg.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lexical_bridge::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Native error code, if this error came from the native parser.
    #[must_use]
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Error::Native { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Byte index of a native error.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        match self {
            Error::Native { index, .. } | Error::UnknownErrorCode { index, .. } => Some(*index),
            _ => None,
        }
    }

    /// Whether the error was detected before any native call.
    #[must_use]
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Error::InvalidFormat(_)
                | Error::InvalidOptions(_)
                | Error::InvalidArgument(_)
                | Error::Unsupported(_)
        )
    }
}

impl From<NativeError> for Error {
    fn from(err: NativeError) -> Self {
        err.decode()
    }
}

pub type Result<T> = std::result::Result<T, Error>;
