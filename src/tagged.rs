//! Tagged values returned across the native boundary.
//!
//! The native library returns small `#[repr(C)]` structs by value:
//!
//! | Type                 | Layout                                        |
//! |----------------------|-----------------------------------------------|
//! | [`RawOption<T>`]     | `{ u32 tag; T value }`, tag `Some = 0`, `Nil = 1` |
//! | [`RawResult<T>`]     | `{ u32 tag; union { T; Error } }`, tag `Ok = 0`, `Err = 1` |
//! | [`RawPartialResult<T>`] | `RawResult<Tuple<T>>`, where `Tuple = { T x; size_t y }` |
//!
//! Payload fields are private. The only way to get at them is through the
//! `decode` methods, which read the tag first and then exactly one arm, so
//! reading the payload of the wrong variant cannot be written.
//!
//! ```rust
//! use lexical_bridge::tagged::{RawOption, RawResult};
//! use lexical_bridge::{ErrorCode, NativeError};
//!
//! let found = RawOption::some(0u64);
//! assert_eq!(found.decode().unwrap(), Some(0));
//! assert_eq!(RawOption::<u64>::nil().decode().unwrap(), None);
//!
//! let failed = RawResult::<i32>::err(NativeError::new(ErrorCode::Empty, 0));
//! assert_eq!(failed.decode().unwrap_err().code(), Some(ErrorCode::Empty));
//! ```

// Union payloads are read only after the tag check.
#![allow(unsafe_code)]

use std::fmt;

use crate::error::{Error, NativeError, Result};

const OPTION_SOME: u32 = 0;
const OPTION_NIL: u32 = 1;
const RESULT_OK: u32 = 0;
const RESULT_ERR: u32 = 1;

/// Optional value with an explicit discriminant.
///
/// The payload is always present in memory; when the tag is `Nil` it holds
/// whatever the writer left there and is never read.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct RawOption<T: Copy> {
    tag: u32,
    value: T,
}

impl<T: Copy> RawOption<T> {
    #[inline]
    #[must_use]
    pub const fn some(value: T) -> Self {
        RawOption {
            tag: OPTION_SOME,
            value,
        }
    }

    /// Absent value. The payload is zeroed with `T::default()`.
    #[inline]
    #[must_use]
    pub fn nil() -> Self
    where
        T: Default,
    {
        RawOption {
            tag: OPTION_NIL,
            value: T::default(),
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_some(&self) -> bool {
        self.tag == OPTION_SOME
    }

    /// Reads the tag, then the payload only when the tag is `Some`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTag`] when the tag is neither `Some` nor `Nil`.
    pub fn decode(self) -> Result<Option<T>> {
        match self.tag {
            OPTION_SOME => Ok(Some(self.value)),
            OPTION_NIL => Ok(None),
            tag => Err(Error::InvalidTag(tag)),
        }
    }

    /// Like [`RawOption::decode`], but absence is an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoValue`] when the tag is `Nil`.
    pub fn require(self) -> Result<T> {
        self.decode()?.ok_or(Error::NoValue)
    }
}

impl<T: Copy + Default> From<Option<T>> for RawOption<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => RawOption::some(value),
            None => RawOption::nil(),
        }
    }
}

impl<T: Copy + Default> Default for RawOption<T> {
    fn default() -> Self {
        RawOption::nil()
    }
}

impl<T: Copy + fmt::Debug> fmt::Debug for RawOption<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.decode() {
            Ok(value) => f.debug_tuple("RawOption").field(&value).finish(),
            Err(_) => f.debug_tuple("RawOption").field(&self.tag).finish(),
        }
    }
}

/// A value paired with the number of bytes consumed to produce it.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tuple<T: Copy> {
    pub x: T,
    pub y: usize,
}

impl<T: Copy> Tuple<T> {
    #[inline]
    #[must_use]
    pub const fn new(x: T, y: usize) -> Self {
        Tuple { x, y }
    }

    #[inline]
    #[must_use]
    pub const fn into_pair(self) -> (T, usize) {
        (self.x, self.y)
    }
}

#[repr(C)]
#[derive(Clone, Copy)]
union ResultUnion<T: Copy> {
    value: T,
    error: NativeError,
}

/// Success or failure with an explicit discriminant.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct RawResult<T: Copy> {
    tag: u32,
    data: ResultUnion<T>,
}

/// Result whose success arm also carries the consumed byte count.
pub type RawPartialResult<T> = RawResult<Tuple<T>>;

impl<T: Copy> RawResult<T> {
    #[inline]
    #[must_use]
    pub const fn ok(value: T) -> Self {
        RawResult {
            tag: RESULT_OK,
            data: ResultUnion { value },
        }
    }

    #[inline]
    #[must_use]
    pub const fn err(error: NativeError) -> Self {
        RawResult {
            tag: RESULT_ERR,
            data: ResultUnion { error },
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.tag == RESULT_OK
    }

    /// Reads the tag, then exactly the matching union arm.
    ///
    /// # Errors
    ///
    /// Returns the decoded native error for `Err`, or
    /// [`Error::InvalidTag`] for an unknown discriminant.
    pub fn decode(self) -> Result<T> {
        match self.tag {
            // SAFETY: the writer initialized `value` when it set the Ok tag.
            RESULT_OK => Ok(unsafe { self.data.value }),
            // SAFETY: the writer initialized `error` when it set the Err tag.
            RESULT_ERR => Err(unsafe { self.data.error }.decode()),
            tag => Err(Error::InvalidTag(tag)),
        }
    }
}

impl<T: Copy> RawResult<Tuple<T>> {
    /// Creates a successful partial result.
    #[inline]
    #[must_use]
    pub const fn ok_partial(value: T, consumed: usize) -> Self {
        RawResult::ok(Tuple::new(value, consumed))
    }

    /// Decodes into `(value, consumed_byte_count)`.
    ///
    /// # Errors
    ///
    /// Same as [`RawResult::decode`].
    pub fn decode_partial(self) -> Result<(T, usize)> {
        self.decode().map(Tuple::into_pair)
    }
}

impl<T: Copy> From<std::result::Result<T, NativeError>> for RawResult<T> {
    fn from(value: std::result::Result<T, NativeError>) -> Self {
        match value {
            Ok(value) => RawResult::ok(value),
            Err(error) => RawResult::err(error),
        }
    }
}

impl<T: Copy + fmt::Debug> fmt::Debug for RawResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.decode() {
            Ok(value) => f.debug_tuple("Ok").field(&value).finish(),
            Err(err) => f.debug_tuple("Err").field(&err).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::mem::{align_of, offset_of, size_of};

    #[test]
    fn test_option_layout() {
        assert_eq!(offset_of!(RawOption<u64>, value), 8);
        assert_eq!(size_of::<RawOption<u64>>(), 16);
        assert_eq!(size_of::<RawOption<u8>>(), 8);
    }

    #[test]
    fn test_result_layout() {
        assert_eq!(offset_of!(RawResult<i8>, data), align_of::<usize>());
        assert_eq!(
            size_of::<RawResult<i8>>(),
            align_of::<usize>() + size_of::<NativeError>()
        );
        assert_eq!(offset_of!(Tuple<i32>, y), align_of::<usize>());
    }

    #[test]
    fn test_option_zero_is_present() {
        assert_eq!(RawOption::some(0u32).decode().unwrap(), Some(0));
        assert!(RawOption::some(0u32).is_some());
    }

    #[test]
    fn test_option_nil() {
        let nil = RawOption::<u64>::nil();
        assert!(!nil.is_some());
        assert_eq!(nil.decode().unwrap(), None);
        assert!(matches!(nil.require(), Err(Error::NoValue)));
    }

    #[test]
    fn test_option_from_std() {
        let raw: RawOption<u32> = Some(7).into();
        assert_eq!(raw.require().unwrap(), 7);
        let raw: RawOption<u32> = None.into();
        assert_eq!(raw.decode().unwrap(), None);
    }

    #[test]
    fn test_option_invalid_tag() {
        let raw = RawOption { tag: 9, value: 1u8 };
        assert!(matches!(raw.decode(), Err(Error::InvalidTag(9))));
    }

    #[test]
    fn test_result_ok() {
        let raw = RawResult::ok(10i8);
        assert!(raw.is_ok());
        assert_eq!(raw.decode().unwrap(), 10);
    }

    #[test]
    fn test_result_err() {
        let raw = RawResult::<f64>::err(NativeError::new(ErrorCode::InvalidDigit, 4));
        let err = raw.decode().unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::InvalidDigit));
        assert_eq!(err.index(), Some(4));
    }

    #[test]
    fn test_result_invalid_tag() {
        let raw = RawResult {
            tag: 2,
            data: ResultUnion { value: 1u16 },
        };
        assert!(matches!(raw.decode(), Err(Error::InvalidTag(2))));
    }

    #[test]
    fn test_partial_result() {
        let raw = RawPartialResult::ok_partial(10i32, 2);
        assert_eq!(raw.decode_partial().unwrap(), (10, 2));

        let raw = RawPartialResult::<i32>::err(NativeError::new(ErrorCode::Empty, 0));
        assert_eq!(raw.decode_partial().unwrap_err().code(), Some(ErrorCode::Empty));
    }

    #[test]
    fn test_tuple_into_pair() {
        assert_eq!(Tuple::new(8i8, 255).into_pair(), (8, 255));
    }
}
