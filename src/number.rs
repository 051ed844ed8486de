//! Host numeric types that cross the native boundary.
//!
//! Every type implementing [`Number`] knows its symbol stem, its value at the
//! boundary and which options bundles its parse and write calls take. The
//! trait is sealed: the native library exports functions for a fixed set of
//! types only.
//!
//! `BigInt` and `BigUint` map onto the 128-bit entry points through the
//! wide-integer codec, so out-of-range values wrap modulo 2^128 instead of
//! failing.

use num_bigint::{BigInt, BigUint};

use crate::options::{
    NativeOptions, ParseFloatOptions, ParseIntegerOptions, WriteFloatOptions, WriteIntegerOptions,
};
use crate::wide::{WideInt128, WideUInt128};

/// Stems of the types every build of the native library exports.
pub const STEMS: [&str; 12] = [
    "i8", "i16", "i32", "i64", "isize", "u8", "u16", "u32", "u64", "usize", "f32", "f64",
];

/// Stems only exported when the library has 128-bit support.
pub const WIDE_STEMS: [&str; 2] = ["i128", "u128"];

mod private {
    pub trait Sealed {}
}

/// A numeric type with native parse and write entry points.
pub trait Number: private::Sealed + Sized {
    /// Value as passed to and returned from the native call.
    type Raw: Copy;

    /// Options accepted by `_with_options` parse calls.
    type ParseOptions: NativeOptions;

    /// Options accepted by `_with_options` write calls.
    type WriteOptions: NativeOptions;

    /// Symbol stem, such as `"u64"` in `lexical_atou64`.
    const STEM: &'static str;

    /// Whether the type needs 128-bit support in the native library.
    const WIDE: bool;

    fn to_raw(&self) -> Self::Raw;

    fn from_raw(raw: Self::Raw) -> Self;
}

macro_rules! number_impl {
    ($($t:ty => $stem:literal, $parse:ty, $write:ty, $wide:literal;)*) => {$(
        impl private::Sealed for $t {}

        impl Number for $t {
            type Raw = $t;
            type ParseOptions = $parse;
            type WriteOptions = $write;

            const STEM: &'static str = $stem;
            const WIDE: bool = $wide;

            #[inline]
            fn to_raw(&self) -> $t {
                *self
            }

            #[inline]
            fn from_raw(raw: $t) -> Self {
                raw
            }
        }
    )*};
}

number_impl! {
    i8 => "i8", ParseIntegerOptions, WriteIntegerOptions, false;
    i16 => "i16", ParseIntegerOptions, WriteIntegerOptions, false;
    i32 => "i32", ParseIntegerOptions, WriteIntegerOptions, false;
    i64 => "i64", ParseIntegerOptions, WriteIntegerOptions, false;
    isize => "isize", ParseIntegerOptions, WriteIntegerOptions, false;
    u8 => "u8", ParseIntegerOptions, WriteIntegerOptions, false;
    u16 => "u16", ParseIntegerOptions, WriteIntegerOptions, false;
    u32 => "u32", ParseIntegerOptions, WriteIntegerOptions, false;
    u64 => "u64", ParseIntegerOptions, WriteIntegerOptions, false;
    usize => "usize", ParseIntegerOptions, WriteIntegerOptions, false;
    f32 => "f32", ParseFloatOptions, WriteFloatOptions, false;
    f64 => "f64", ParseFloatOptions, WriteFloatOptions, false;
    i128 => "i128", ParseIntegerOptions, WriteIntegerOptions, true;
    u128 => "u128", ParseIntegerOptions, WriteIntegerOptions, true;
}

impl private::Sealed for BigInt {}

impl Number for BigInt {
    type Raw = i128;
    type ParseOptions = ParseIntegerOptions;
    type WriteOptions = WriteIntegerOptions;

    const STEM: &'static str = "i128";
    const WIDE: bool = true;

    fn to_raw(&self) -> i128 {
        WideInt128::from_bigint(self).to_i128()
    }

    fn from_raw(raw: i128) -> Self {
        WideInt128::from_i128(raw).to_bigint()
    }
}

impl private::Sealed for BigUint {}

impl Number for BigUint {
    type Raw = u128;
    type ParseOptions = ParseIntegerOptions;
    type WriteOptions = WriteIntegerOptions;

    const STEM: &'static str = "u128";
    const WIDE: bool = true;

    fn to_raw(&self) -> u128 {
        WideUInt128::from_biguint(self).to_u128()
    }

    fn from_raw(raw: u128) -> Self {
        WideUInt128::from_u128(raw).to_biguint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stems() {
        assert_eq!(<i8 as Number>::STEM, "i8");
        assert_eq!(<f64 as Number>::STEM, "f64");
        assert_eq!(<BigUint as Number>::STEM, "u128");
        assert!(<i128 as Number>::WIDE);
        assert!(!<usize as Number>::WIDE);
        for stem in STEMS {
            assert!(!WIDE_STEMS.contains(&stem));
        }
    }

    #[test]
    fn test_bigint_wraps() {
        let big = BigUint::from(1u8) << 128usize;
        assert_eq!(big.to_raw(), 0);
        let big = (BigUint::from(1u8) << 128usize) + BigUint::from(5u8);
        assert_eq!(big.to_raw(), 5);

        let negative = BigInt::from(-1);
        assert_eq!(negative.to_raw(), -1);
        let wrapped = BigInt::from(1u8) << 127usize;
        assert_eq!(wrapped.to_raw(), i128::MIN);
    }

    #[test]
    fn test_bigint_from_raw() {
        assert_eq!(BigInt::from_raw(i128::MIN), -(BigInt::from(1u8) << 127usize));
        assert_eq!(BigUint::from_raw(u128::MAX), (BigUint::from(1u8) << 128usize) - 1u8);
    }
}
