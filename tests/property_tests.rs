//! Property-based tests for the pure codecs: number-format words, tagged
//! values and wide integers.

use lexical_bridge::tagged::{RawOption, RawResult};
use lexical_bridge::*;
use num_bigint::{BigInt, BigUint};
use proptest::prelude::*;

const PUNCTUATION: &[u8] = &[b'_', b'\'', b',', b'.', b'e', b'^', b'p', b'#', b'@', b'!', b'~'];
const SEPARATORS: &[u8] = &[b'_', b'\'', b',', b'#', b'@', b'~'];
const DECIMAL_POINTS: &[u8] = &[b'.', b',', b'#', b'@', b'~'];

fn primitive_flags() -> Vec<NumberFormatFlags> {
    let all = NumberFormatFlags::all().bits();
    (0..64)
        .filter(|bit| all & (1u64 << bit) != 0)
        .map(|bit| NumberFormatFlags::from_bits_retain(1u64 << bit))
        .collect()
}

fn composites() -> Vec<NumberFormatFlags> {
    type F = NumberFormatFlags;
    vec![
        F::REQUIRED_DIGITS,
        F::INTERNAL_DIGIT_SEPARATOR,
        F::LEADING_DIGIT_SEPARATOR,
        F::TRAILING_DIGIT_SEPARATOR,
        F::CONSECUTIVE_DIGIT_SEPARATOR,
        F::DIGIT_SEPARATOR_FLAG_MASK,
        F::EXPONENT_FLAG_MASK,
    ]
}

fn builder(flags: u64, chars: [u8; 4]) -> NumberFormatBuilder {
    NumberFormatBuilder::new()
        .with_flag(NumberFormatFlags::from_bits_truncate(flags), true)
        .with_digit_separator(chars[0])
        .with_decimal_point(chars[1])
        .with_exponent_default(chars[2])
        .with_exponent_backup(chars[3])
}

fn wrap_unsigned(n: &BigUint) -> BigUint {
    n % (BigUint::from(1u8) << 128usize)
}

fn wrap_signed(n: &BigInt) -> BigInt {
    let modulus = BigInt::from(1u8) << 128usize;
    let half = BigInt::from(1u8) << 127usize;
    let mut r = n % &modulus;
    if r < BigInt::from(0) {
        r += &modulus;
    }
    if r >= half {
        r -= &modulus;
    }
    r
}

proptest! {
    // Any word the builder accepts survives rebuild().build().
    #[test]
    fn prop_format_roundtrip(
        flags in any::<u64>(),
        chars in prop::array::uniform4(prop::sample::select(PUNCTUATION)),
    ) {
        if let Ok(format) = builder(flags, chars).build() {
            prop_assert_eq!(format.rebuild().build().unwrap(), format);
            prop_assert_eq!(NumberFormat::from_bits(format.bits()).unwrap(), format);
        }
    }

    #[test]
    fn prop_format_rejection_is_total(
        flags in any::<u64>(),
        chars in prop::array::uniform4(prop::sample::select(PUNCTUATION)),
    ) {
        let staged = builder(flags, chars);
        prop_assert_eq!(staged.build().is_ok(), staged.check().is_none());
    }

    #[test]
    fn prop_flag_independence(flag in prop::sample::select(primitive_flags())) {
        let staged = NumberFormatBuilder::new().with_flag(flag, true);
        if let Ok(format) = staged.build() {
            prop_assert_eq!(format.flags(), flag);
            for other in primitive_flags() {
                prop_assert_eq!(format.intersects(other), other == flag);
            }
            for mask in composites() {
                prop_assert_eq!(format.intersects(mask), mask.contains(flag));
            }
        }
    }

    #[test]
    fn prop_packed_character_isolation(
        separator in prop::sample::select(SEPARATORS),
        decimal in prop::sample::select(DECIMAL_POINTS),
    ) {
        prop_assume!(separator != decimal);
        let base = NumberFormatBuilder::new().with_internal_digit_separator(true);

        let format = base.with_digit_separator(separator).build().unwrap();
        prop_assert_eq!(format.digit_separator(), separator);
        prop_assert_eq!(format.decimal_point(), b'.');
        prop_assert_eq!(format.exponent_default(), b'e');
        prop_assert_eq!(format.exponent_backup(), b'^');

        let format = base
            .with_digit_separator(separator)
            .with_decimal_point(decimal)
            .build()
            .unwrap();
        prop_assert_eq!(format.digit_separator(), separator);
        prop_assert_eq!(format.decimal_point(), decimal);
        prop_assert_eq!(format.exponent_default(), b'e');
        prop_assert_eq!(format.flags(), NumberFormatFlags::INTERNAL_DIGIT_SEPARATOR);
    }

    #[test]
    fn prop_wide_unsigned_wraps(bytes in prop::collection::vec(any::<u8>(), 0..40)) {
        let n = BigUint::from_bytes_le(&bytes);
        prop_assert_eq!(WideUInt128::from_biguint(&n).to_biguint(), wrap_unsigned(&n));
    }

    #[test]
    fn prop_wide_signed_wraps(bytes in prop::collection::vec(any::<u8>(), 0..40)) {
        let n = BigInt::from_signed_bytes_le(&bytes);
        prop_assert_eq!(WideInt128::from_bigint(&n).to_bigint(), wrap_signed(&n));
    }

    #[test]
    fn prop_wide_native_integers(n in any::<i128>(), m in any::<u128>()) {
        prop_assert_eq!(WideInt128::from_i128(n).to_bigint(), BigInt::from(n));
        prop_assert_eq!(WideUInt128::from_u128(m).to_biguint(), BigUint::from(m));
        prop_assert_eq!(WideInt128::from_bigint(&BigInt::from(n)).to_i128(), n);
    }

    #[test]
    fn prop_option_totality(value in any::<u64>()) {
        prop_assert_eq!(RawOption::some(value).decode().unwrap(), Some(value));
        prop_assert_eq!(RawOption::<u64>::nil().decode().unwrap(), None);
        prop_assert!(matches!(RawOption::<u64>::nil().require(), Err(Error::NoValue)));
    }

    #[test]
    fn prop_result_totality(value in any::<i64>(), raw in any::<i32>(), index in any::<usize>()) {
        prop_assert_eq!(RawResult::ok(value).decode().unwrap(), value);

        let err = RawResult::<i64>::err(NativeError { code: raw, index }).decode().unwrap_err();
        prop_assert_eq!(err.index(), Some(index));
        match ErrorCode::from_raw(raw) {
            Some(code) => prop_assert_eq!(err.code(), Some(code)),
            None => prop_assert!(
                matches!(err, Error::UnknownErrorCode { code, .. } if code == raw),
                "unexpected error {:?}",
                err
            ),
        }
    }

    #[test]
    fn prop_partial_result(value in any::<i32>(), consumed in any::<usize>()) {
        let decoded = RawResult::ok_partial(value, consumed).decode_partial().unwrap();
        prop_assert_eq!(decoded, (value, consumed));
    }
}

#[test]
fn test_known_bad_configurations() {
    assert!(NumberFormatBuilder::new()
        .with_decimal_point(b'e')
        .build()
        .is_err());
    assert!(NumberFormatBuilder::new()
        .with_no_exponent_notation(true)
        .with_required_exponent_digits(true)
        .build()
        .is_err());
    assert!(NumberFormatBuilder::new()
        .with_integer_consecutive_digit_separator(true)
        .build()
        .is_err());
}

#[test]
fn test_error_code_values() {
    assert_eq!(ErrorCode::Overflow.as_raw(), -1);
    assert_eq!(ErrorCode::InvalidLeadingZeros.as_raw(), -15);
    for code in ErrorCode::ALL {
        assert_eq!(ErrorCode::from_raw(code.as_raw()), Some(code));
    }
}
