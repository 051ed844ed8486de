//! The packed number-format word and its validating builder.
//!
//! A [`NumberFormat`] is a single `u64` describing the grammar of a numeric
//! literal. It combines independent boolean flags with four 7-bit
//! punctuation characters:
//!
//! | Bits      | Contents                                 |
//! |-----------|------------------------------------------|
//! | `[0, 13)` | grammar flags ([`NumberFormatFlags`])     |
//! | `[18, 25)`| default exponent character               |
//! | `[25, 32)`| backup exponent character (radix > 10)   |
//! | `[32, 45)`| digit-separator placement flags          |
//! | `[50, 57)`| decimal point character                  |
//! | `[57, 64)`| digit separator character                |
//!
//! Words are only produced by [`NumberFormatBuilder::build`] (or the
//! compile-time presets in [`crate::presets`], which go through the same
//! checks), and are never mutated. [`NumberFormat::rebuild`] copies every
//! field back into a fresh builder.
//!
//! ## Examples
//!
//! ```rust
//! use lexical_bridge::{NumberFormat, NumberFormatBuilder};
//!
//! let format = NumberFormatBuilder::new()
//!     .with_digit_separator(b'_')
//!     .with_internal_digit_separator(true)
//!     .with_required_digits(true)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(format.digit_separator(), b'_');
//! assert!(format.integer_internal_digit_separator());
//! assert_eq!(format.rebuild().build().unwrap(), format);
//!
//! // A decimal point that collides with the exponent character is rejected.
//! assert!(NumberFormatBuilder::new().with_decimal_point(b'e').build().is_err());
//! ```

use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Mask applied to every packed punctuation character.
pub const CHAR_MASK: u64 = 0x7F;
pub const EXPONENT_DEFAULT_SHIFT: u32 = 18;
pub const EXPONENT_BACKUP_SHIFT: u32 = 25;
pub const DECIMAL_POINT_SHIFT: u32 = 50;
pub const DIGIT_SEPARATOR_SHIFT: u32 = 57;

bitflags! {
    /// Boolean grammar flags of a [`NumberFormat`].
    ///
    /// Composite constants (`REQUIRED_DIGITS`, `INTERNAL_DIGIT_SEPARATOR`, ...)
    /// are unions of primitive flags and carry no state of their own.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct NumberFormatFlags: u64 {
        /// Digits are required before the decimal point.
        const REQUIRED_INTEGER_DIGITS = 1 << 0;
        /// Digits are required after the decimal point.
        const REQUIRED_FRACTION_DIGITS = 1 << 1;
        /// Digits are required after the exponent character.
        const REQUIRED_EXPONENT_DIGITS = 1 << 2;
        /// A positive sign before the mantissa is not allowed.
        const NO_POSITIVE_MANTISSA_SIGN = 1 << 3;
        /// A sign before the mantissa is required.
        const REQUIRED_MANTISSA_SIGN = 1 << 4;
        /// Exponent notation is not allowed.
        const NO_EXPONENT_NOTATION = 1 << 5;
        /// A positive sign before the exponent is not allowed.
        const NO_POSITIVE_EXPONENT_SIGN = 1 << 6;
        /// A sign before the exponent is required.
        const REQUIRED_EXPONENT_SIGN = 1 << 7;
        /// An exponent without fraction is not allowed.
        const NO_EXPONENT_WITHOUT_FRACTION = 1 << 8;
        /// Special values (NaN, infinity) are not allowed.
        const NO_SPECIAL = 1 << 9;
        /// Special values are case-sensitive.
        const CASE_SENSITIVE_SPECIAL = 1 << 10;
        /// Leading zeros before an integer are not allowed.
        const NO_INTEGER_LEADING_ZEROS = 1 << 11;
        /// Leading zeros before a float are not allowed.
        const NO_FLOAT_LEADING_ZEROS = 1 << 12;

        const INTEGER_INTERNAL_DIGIT_SEPARATOR = 1 << 32;
        const INTEGER_LEADING_DIGIT_SEPARATOR = 1 << 33;
        const INTEGER_TRAILING_DIGIT_SEPARATOR = 1 << 34;
        const INTEGER_CONSECUTIVE_DIGIT_SEPARATOR = 1 << 35;
        const FRACTION_INTERNAL_DIGIT_SEPARATOR = 1 << 36;
        const FRACTION_LEADING_DIGIT_SEPARATOR = 1 << 37;
        const FRACTION_TRAILING_DIGIT_SEPARATOR = 1 << 38;
        const FRACTION_CONSECUTIVE_DIGIT_SEPARATOR = 1 << 39;
        const EXPONENT_INTERNAL_DIGIT_SEPARATOR = 1 << 40;
        const EXPONENT_LEADING_DIGIT_SEPARATOR = 1 << 41;
        const EXPONENT_TRAILING_DIGIT_SEPARATOR = 1 << 42;
        const EXPONENT_CONSECUTIVE_DIGIT_SEPARATOR = 1 << 43;
        /// Digit separators are allowed inside special values.
        const SPECIAL_DIGIT_SEPARATOR = 1 << 44;

        const REQUIRED_DIGITS = Self::REQUIRED_INTEGER_DIGITS.bits()
            | Self::REQUIRED_FRACTION_DIGITS.bits()
            | Self::REQUIRED_EXPONENT_DIGITS.bits();

        const INTERNAL_DIGIT_SEPARATOR = Self::INTEGER_INTERNAL_DIGIT_SEPARATOR.bits()
            | Self::FRACTION_INTERNAL_DIGIT_SEPARATOR.bits()
            | Self::EXPONENT_INTERNAL_DIGIT_SEPARATOR.bits();

        const LEADING_DIGIT_SEPARATOR = Self::INTEGER_LEADING_DIGIT_SEPARATOR.bits()
            | Self::FRACTION_LEADING_DIGIT_SEPARATOR.bits()
            | Self::EXPONENT_LEADING_DIGIT_SEPARATOR.bits();

        const TRAILING_DIGIT_SEPARATOR = Self::INTEGER_TRAILING_DIGIT_SEPARATOR.bits()
            | Self::FRACTION_TRAILING_DIGIT_SEPARATOR.bits()
            | Self::EXPONENT_TRAILING_DIGIT_SEPARATOR.bits();

        const CONSECUTIVE_DIGIT_SEPARATOR = Self::INTEGER_CONSECUTIVE_DIGIT_SEPARATOR.bits()
            | Self::FRACTION_CONSECUTIVE_DIGIT_SEPARATOR.bits()
            | Self::EXPONENT_CONSECUTIVE_DIGIT_SEPARATOR.bits();

        const INTEGER_DIGIT_SEPARATOR_FLAG_MASK = Self::INTEGER_INTERNAL_DIGIT_SEPARATOR.bits()
            | Self::INTEGER_LEADING_DIGIT_SEPARATOR.bits()
            | Self::INTEGER_TRAILING_DIGIT_SEPARATOR.bits()
            | Self::INTEGER_CONSECUTIVE_DIGIT_SEPARATOR.bits();

        const FRACTION_DIGIT_SEPARATOR_FLAG_MASK = Self::FRACTION_INTERNAL_DIGIT_SEPARATOR.bits()
            | Self::FRACTION_LEADING_DIGIT_SEPARATOR.bits()
            | Self::FRACTION_TRAILING_DIGIT_SEPARATOR.bits()
            | Self::FRACTION_CONSECUTIVE_DIGIT_SEPARATOR.bits();

        const EXPONENT_DIGIT_SEPARATOR_FLAG_MASK = Self::EXPONENT_INTERNAL_DIGIT_SEPARATOR.bits()
            | Self::EXPONENT_LEADING_DIGIT_SEPARATOR.bits()
            | Self::EXPONENT_TRAILING_DIGIT_SEPARATOR.bits()
            | Self::EXPONENT_CONSECUTIVE_DIGIT_SEPARATOR.bits();

        const DIGIT_SEPARATOR_FLAG_MASK = Self::INTEGER_DIGIT_SEPARATOR_FLAG_MASK.bits()
            | Self::FRACTION_DIGIT_SEPARATOR_FLAG_MASK.bits()
            | Self::EXPONENT_DIGIT_SEPARATOR_FLAG_MASK.bits()
            | Self::SPECIAL_DIGIT_SEPARATOR.bits();

        /// Every flag that only makes sense when exponent notation is allowed.
        const EXPONENT_FLAG_MASK = Self::REQUIRED_EXPONENT_DIGITS.bits()
            | Self::NO_POSITIVE_EXPONENT_SIGN.bits()
            | Self::REQUIRED_EXPONENT_SIGN.bits()
            | Self::NO_EXPONENT_WITHOUT_FRACTION.bits()
            | Self::EXPONENT_DIGIT_SEPARATOR_FLAG_MASK.bits();
    }
}

impl NumberFormatFlags {
    /// Every bit that belongs to a flag rather than a packed character.
    pub const FLAG_MASK: NumberFormatFlags = NumberFormatFlags::all();
}

// Punctuation rules. Letters are excluded because they are digits in radixes
// above 10.

const fn is_valid_decimal_point(ch: u8) -> bool {
    !matches!(ch, b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'+' | b'-') && ch.is_ascii()
}

const fn is_valid_digit_separator(ch: u8) -> bool {
    ch != b'.' && is_valid_decimal_point(ch)
}

const fn is_valid_exponent_default(ch: u8) -> bool {
    !matches!(ch, b'0'..=b'9' | b'+' | b'-') && ch.is_ascii()
}

const fn is_valid_exponent_backup(ch: u8) -> bool {
    is_valid_decimal_point(ch)
}

const fn is_valid_punctuation(
    separated: bool,
    separator: u8,
    decimal: u8,
    exponent: u8,
    backup: u8,
) -> bool {
    (!separated || (separator != decimal && separator != exponent && separator != backup))
        && decimal != exponent
        && decimal != backup
        && exponent != backup
}

/// True when the consecutive flag is the only separator flag of a region.
const fn only_consecutive(flags: NumberFormatFlags, mask: NumberFormatFlags, consecutive: NumberFormatFlags) -> bool {
    flags.bits() & mask.bits() == consecutive.bits()
}

#[inline]
const fn pack_char(ch: u8, shift: u32) -> u64 {
    (ch as u64 & CHAR_MASK) << shift
}

#[inline]
const fn unpack_char(bits: u64, shift: u32) -> u8 {
    ((bits >> shift) & CHAR_MASK) as u8
}

/// Immutable, validated number-format word.
///
/// The layout is `#[repr(transparent)]` over `u64` so it crosses the native
/// boundary unchanged.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct NumberFormat(u64);

/// Staging area for a [`NumberFormat`].
///
/// Nothing is checked until [`NumberFormatBuilder::build`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NumberFormatBuilder {
    flags: NumberFormatFlags,
    digit_separator: u8,
    decimal_point: u8,
    exponent_default: u8,
    exponent_backup: u8,
}

impl Default for NumberFormatBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NumberFormatBuilder {
    /// Creates a builder with no flags, no digit separator, `.` as the
    /// decimal point, `e` as the exponent and `^` as the backup exponent.
    #[must_use]
    pub const fn new() -> Self {
        NumberFormatBuilder {
            flags: NumberFormatFlags::empty(),
            digit_separator: 0,
            decimal_point: b'.',
            exponent_default: b'e',
            exponent_backup: b'^',
        }
    }

    #[must_use]
    pub const fn with_digit_separator(mut self, ch: u8) -> Self {
        self.digit_separator = ch;
        self
    }

    #[must_use]
    pub const fn with_decimal_point(mut self, ch: u8) -> Self {
        self.decimal_point = ch;
        self
    }

    #[must_use]
    pub const fn with_exponent_default(mut self, ch: u8) -> Self {
        self.exponent_default = ch;
        self
    }

    #[must_use]
    pub const fn with_exponent_backup(mut self, ch: u8) -> Self {
        self.exponent_backup = ch;
        self
    }

    /// Sets or clears every bit of `flag`.
    #[must_use]
    pub const fn with_flag(mut self, flag: NumberFormatFlags, value: bool) -> Self {
        self.flags = if value {
            self.flags.union(flag)
        } else {
            self.flags.difference(flag)
        };
        self
    }

    #[must_use]
    pub const fn flags(&self) -> NumberFormatFlags {
        self.flags
    }

    #[must_use]
    pub const fn digit_separator(&self) -> u8 {
        self.digit_separator
    }

    #[must_use]
    pub const fn decimal_point(&self) -> u8 {
        self.decimal_point
    }

    #[must_use]
    pub const fn exponent_default(&self) -> u8 {
        self.exponent_default
    }

    #[must_use]
    pub const fn exponent_backup(&self) -> u8 {
        self.exponent_backup
    }

    /// Returns the first rule the staged fields break, if any.
    #[must_use]
    pub const fn check(&self) -> Option<&'static str> {
        type F = NumberFormatFlags;
        let flags = self.flags;
        // Without a placement flag the separator is not packed.
        let separated = flags.intersects(F::DIGIT_SEPARATOR_FLAG_MASK);
        if separated && !is_valid_digit_separator(self.digit_separator) {
            return Some("digit separator must not be a letter, digit, '+', '-' or '.'");
        }
        if !is_valid_decimal_point(self.decimal_point) {
            return Some("decimal point must not be a letter, digit, '+' or '-'");
        }
        if !is_valid_exponent_default(self.exponent_default) {
            return Some("exponent character must not be a digit, '+' or '-'");
        }
        if !is_valid_exponent_backup(self.exponent_backup) {
            return Some("backup exponent character must not be a letter, digit, '+' or '-'");
        }
        if !is_valid_punctuation(
            separated,
            self.digit_separator,
            self.decimal_point,
            self.exponent_default,
            self.exponent_backup,
        ) {
            return Some("punctuation characters must be distinct");
        }
        if flags.contains(F::NO_EXPONENT_NOTATION) && flags.intersects(F::EXPONENT_FLAG_MASK) {
            return Some("exponent flags set while exponent notation is disabled");
        }
        if flags.contains(F::NO_POSITIVE_MANTISSA_SIGN) && flags.contains(F::REQUIRED_MANTISSA_SIGN) {
            return Some("mantissa sign cannot be both required and restricted");
        }
        if flags.contains(F::NO_POSITIVE_EXPONENT_SIGN) && flags.contains(F::REQUIRED_EXPONENT_SIGN) {
            return Some("exponent sign cannot be both required and restricted");
        }
        if flags.contains(F::NO_SPECIAL)
            && flags.intersects(F::CASE_SENSITIVE_SPECIAL.union(F::SPECIAL_DIGIT_SEPARATOR))
        {
            return Some("special value flags set while special values are disabled");
        }
        if only_consecutive(
            flags,
            F::INTEGER_DIGIT_SEPARATOR_FLAG_MASK,
            F::INTEGER_CONSECUTIVE_DIGIT_SEPARATOR,
        ) || only_consecutive(
            flags,
            F::FRACTION_DIGIT_SEPARATOR_FLAG_MASK,
            F::FRACTION_CONSECUTIVE_DIGIT_SEPARATOR,
        ) || only_consecutive(
            flags,
            F::EXPONENT_DIGIT_SEPARATOR_FLAG_MASK,
            F::EXPONENT_CONSECUTIVE_DIGIT_SEPARATOR,
        ) {
            return Some("consecutive digit separators require another placement in the same region");
        }
        None
    }

    /// Packs the staged fields without validating them.
    const fn pack(&self) -> u64 {
        let mut bits = self.flags.bits();
        if self.flags.intersects(NumberFormatFlags::DIGIT_SEPARATOR_FLAG_MASK) {
            bits |= pack_char(self.digit_separator, DIGIT_SEPARATOR_SHIFT);
        }
        bits |= pack_char(self.decimal_point, DECIMAL_POINT_SHIFT);
        bits |= pack_char(self.exponent_default, EXPONENT_DEFAULT_SHIFT);
        bits |= pack_char(self.exponent_backup, EXPONENT_BACKUP_SHIFT);
        bits
    }

    /// Validates the staged fields and produces the immutable word.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] naming the first violated rule.
    #[must_use = "this returns the result of the operation, errors must be handled"]
    pub fn build(&self) -> Result<NumberFormat> {
        match self.check() {
            Some(reason) => Err(Error::invalid_format(reason)),
            None => Ok(NumberFormat(self.pack())),
        }
    }

    /// Compile-time build for constant presets.
    ///
    /// An invalid builder fails constant evaluation.
    pub(crate) const fn build_const(&self) -> NumberFormat {
        match self.check() {
            Some(_) => panic!("invalid number format preset"),
            None => NumberFormat(self.pack()),
        }
    }
}

impl NumberFormat {
    /// Raw 64-bit word.
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Validates an existing word, such as one read back from storage.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] when the word breaks a builder rule or
    /// carries bits outside the documented layout.
    pub fn from_bits(bits: u64) -> Result<Self> {
        let rebuilt = NumberFormat(bits).rebuild().build()?;
        if rebuilt.0 != bits {
            return Err(Error::InvalidFormat(format!(
                "word {:#018x} has bits outside the number format layout",
                bits
            )));
        }
        Ok(rebuilt)
    }

    /// Creates a fresh builder for this type.
    #[must_use]
    pub const fn builder() -> NumberFormatBuilder {
        NumberFormatBuilder::new()
    }

    /// Copies every field into a new builder.
    #[must_use]
    pub const fn rebuild(self) -> NumberFormatBuilder {
        NumberFormatBuilder {
            flags: self.flags(),
            digit_separator: self.digit_separator(),
            decimal_point: self.decimal_point(),
            exponent_default: self.exponent_default(),
            exponent_backup: self.exponent_backup(),
        }
    }

    /// The flag bits of the word, without packed characters.
    #[inline]
    #[must_use]
    pub const fn flags(self) -> NumberFormatFlags {
        NumberFormatFlags::from_bits_truncate(self.0)
    }

    /// True when any bit of `flags` is set.
    #[inline]
    #[must_use]
    pub const fn intersects(self, flags: NumberFormatFlags) -> bool {
        self.0 & flags.bits() != 0
    }

    /// Digit separator, or `0` when no separator flags are set.
    #[inline]
    #[must_use]
    pub const fn digit_separator(self) -> u8 {
        unpack_char(self.0, DIGIT_SEPARATOR_SHIFT)
    }

    #[inline]
    #[must_use]
    pub const fn decimal_point(self) -> u8 {
        unpack_char(self.0, DECIMAL_POINT_SHIFT)
    }

    #[inline]
    #[must_use]
    pub const fn exponent_default(self) -> u8 {
        unpack_char(self.0, EXPONENT_DEFAULT_SHIFT)
    }

    #[inline]
    #[must_use]
    pub const fn exponent_backup(self) -> u8 {
        unpack_char(self.0, EXPONENT_BACKUP_SHIFT)
    }

    /// Exponent character used for `radix`.
    ///
    /// Non-decimal radixes use the backup character, since `e` is a digit
    /// from radix 15 upwards.
    #[inline]
    #[must_use]
    pub const fn exponent(self, radix: u32) -> u8 {
        if radix != 10 {
            self.exponent_backup()
        } else {
            self.exponent_default()
        }
    }
}

impl TryFrom<u64> for NumberFormat {
    type Error = Error;

    fn try_from(bits: u64) -> Result<Self> {
        NumberFormat::from_bits(bits)
    }
}

impl From<NumberFormat> for u64 {
    fn from(format: NumberFormat) -> Self {
        format.0
    }
}

impl fmt::Debug for NumberFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NumberFormat")
            .field("flags", &self.flags())
            .field("digit_separator", &char::from(self.digit_separator()))
            .field("decimal_point", &char::from(self.decimal_point()))
            .field("exponent_default", &char::from(self.exponent_default()))
            .field("exponent_backup", &char::from(self.exponent_backup()))
            .finish()
    }
}

impl fmt::Display for NumberFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

/// Generates the per-flag getter on [`NumberFormat`] and the getter/setter
/// pair on [`NumberFormatBuilder`]. Composite flags test with "any bit set"
/// and set every member bit.
macro_rules! flag_accessors {
    ($($(#[$doc:meta])* $getter:ident, $setter:ident => $flag:ident;)*) => {
        impl NumberFormat {
            $(
                $(#[$doc])*
                #[inline]
                #[must_use]
                pub const fn $getter(self) -> bool {
                    self.intersects(NumberFormatFlags::$flag)
                }
            )*
        }

        impl NumberFormatBuilder {
            $(
                #[inline]
                #[must_use]
                pub const fn $getter(&self) -> bool {
                    self.flags.intersects(NumberFormatFlags::$flag)
                }

                #[inline]
                #[must_use]
                pub const fn $setter(self, value: bool) -> Self {
                    self.with_flag(NumberFormatFlags::$flag, value)
                }
            )*
        }
    };
}

flag_accessors! {
    /// Digits are required before the decimal point.
    required_integer_digits, with_required_integer_digits => REQUIRED_INTEGER_DIGITS;
    /// Digits are required after the decimal point.
    required_fraction_digits, with_required_fraction_digits => REQUIRED_FRACTION_DIGITS;
    /// Digits are required after the exponent character.
    required_exponent_digits, with_required_exponent_digits => REQUIRED_EXPONENT_DIGITS;
    /// Any of the three `required_*_digits` flags.
    required_digits, with_required_digits => REQUIRED_DIGITS;
    no_positive_mantissa_sign, with_no_positive_mantissa_sign => NO_POSITIVE_MANTISSA_SIGN;
    required_mantissa_sign, with_required_mantissa_sign => REQUIRED_MANTISSA_SIGN;
    no_exponent_notation, with_no_exponent_notation => NO_EXPONENT_NOTATION;
    no_positive_exponent_sign, with_no_positive_exponent_sign => NO_POSITIVE_EXPONENT_SIGN;
    required_exponent_sign, with_required_exponent_sign => REQUIRED_EXPONENT_SIGN;
    no_exponent_without_fraction, with_no_exponent_without_fraction => NO_EXPONENT_WITHOUT_FRACTION;
    no_special, with_no_special => NO_SPECIAL;
    case_sensitive_special, with_case_sensitive_special => CASE_SENSITIVE_SPECIAL;
    no_integer_leading_zeros, with_no_integer_leading_zeros => NO_INTEGER_LEADING_ZEROS;
    no_float_leading_zeros, with_no_float_leading_zeros => NO_FLOAT_LEADING_ZEROS;
    integer_internal_digit_separator, with_integer_internal_digit_separator => INTEGER_INTERNAL_DIGIT_SEPARATOR;
    fraction_internal_digit_separator, with_fraction_internal_digit_separator => FRACTION_INTERNAL_DIGIT_SEPARATOR;
    exponent_internal_digit_separator, with_exponent_internal_digit_separator => EXPONENT_INTERNAL_DIGIT_SEPARATOR;
    internal_digit_separator, with_internal_digit_separator => INTERNAL_DIGIT_SEPARATOR;
    integer_leading_digit_separator, with_integer_leading_digit_separator => INTEGER_LEADING_DIGIT_SEPARATOR;
    fraction_leading_digit_separator, with_fraction_leading_digit_separator => FRACTION_LEADING_DIGIT_SEPARATOR;
    exponent_leading_digit_separator, with_exponent_leading_digit_separator => EXPONENT_LEADING_DIGIT_SEPARATOR;
    leading_digit_separator, with_leading_digit_separator => LEADING_DIGIT_SEPARATOR;
    integer_trailing_digit_separator, with_integer_trailing_digit_separator => INTEGER_TRAILING_DIGIT_SEPARATOR;
    fraction_trailing_digit_separator, with_fraction_trailing_digit_separator => FRACTION_TRAILING_DIGIT_SEPARATOR;
    exponent_trailing_digit_separator, with_exponent_trailing_digit_separator => EXPONENT_TRAILING_DIGIT_SEPARATOR;
    trailing_digit_separator, with_trailing_digit_separator => TRAILING_DIGIT_SEPARATOR;
    integer_consecutive_digit_separator, with_integer_consecutive_digit_separator => INTEGER_CONSECUTIVE_DIGIT_SEPARATOR;
    fraction_consecutive_digit_separator, with_fraction_consecutive_digit_separator => FRACTION_CONSECUTIVE_DIGIT_SEPARATOR;
    exponent_consecutive_digit_separator, with_exponent_consecutive_digit_separator => EXPONENT_CONSECUTIVE_DIGIT_SEPARATOR;
    consecutive_digit_separator, with_consecutive_digit_separator => CONSECUTIVE_DIGIT_SEPARATOR;
    special_digit_separator, with_special_digit_separator => SPECIAL_DIGIT_SEPARATOR;
}
