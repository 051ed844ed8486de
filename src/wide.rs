//! 128-bit integers as fixed 16-byte buffers.
//!
//! The native library exchanges 128-bit integers by value. On the host side
//! they are carried as a 16-byte, 16-aligned buffer in native byte order and
//! converted to and from arbitrary-precision [`BigInt`] / [`BigUint`] values.
//!
//! Encoding is total: any host integer is reduced modulo 2^128 before its
//! bytes are taken, so out-of-range input wraps instead of failing.
//!
//! ## Examples
//!
//! ```rust
//! use lexical_bridge::wide::WideUInt128;
//! use num_bigint::{BigInt, BigUint};
//!
//! let big = BigInt::from(1u8) << 128;
//! assert_eq!(WideUInt128::from_bigint(&big).to_biguint(), BigUint::from(0u8));
//! ```

use std::fmt;

use num_bigint::{BigInt, BigUint, Sign};

/// Byte width of the native 128-bit integer.
pub const WIDTH: usize = 16;

/// Takes the low 128 bits of a host integer as little-endian bytes.
///
/// `to_signed_bytes_le` yields minimal two's complement, so sign-extending
/// and truncating to 16 bytes is exactly reduction modulo 2^128.
fn low_bytes_le(value: &BigInt) -> [u8; WIDTH] {
    let fill = if value.sign() == Sign::Minus { 0xFF } else { 0x00 };
    let mut out = [fill; WIDTH];
    for (dst, src) in out.iter_mut().zip(value.to_signed_bytes_le()) {
        *dst = src;
    }
    out
}

/// Unsigned 128-bit integer in native byte order.
#[repr(C, align(16))]
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct WideUInt128 {
    bytes: [u8; WIDTH],
}

/// Signed, two's-complement 128-bit integer in native byte order.
#[repr(C, align(16))]
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct WideInt128 {
    bytes: [u8; WIDTH],
}

impl WideUInt128 {
    /// Wraps a native-order buffer.
    #[inline]
    #[must_use]
    pub const fn from_ne_bytes(bytes: [u8; WIDTH]) -> Self {
        WideUInt128 { bytes }
    }

    #[inline]
    #[must_use]
    pub const fn to_ne_bytes(self) -> [u8; WIDTH] {
        self.bytes
    }

    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; WIDTH] {
        &self.bytes
    }

    #[inline]
    #[must_use]
    pub const fn from_u128(value: u128) -> Self {
        WideUInt128 {
            bytes: value.to_ne_bytes(),
        }
    }

    #[inline]
    #[must_use]
    pub const fn to_u128(self) -> u128 {
        u128::from_ne_bytes(self.bytes)
    }

    /// Encodes `value mod 2^128`.
    #[must_use]
    pub fn from_bigint(value: &BigInt) -> Self {
        Self::from_u128(u128::from_le_bytes(low_bytes_le(value)))
    }

    /// Encodes `value mod 2^128`.
    #[must_use]
    pub fn from_biguint(value: &BigUint) -> Self {
        Self::from_bigint(&BigInt::from(value.clone()))
    }

    /// Decodes the buffer as an unsigned integer.
    #[must_use]
    pub fn to_biguint(&self) -> BigUint {
        BigUint::from(self.to_u128())
    }

    /// Decodes the buffer as an unsigned integer, widened to [`BigInt`].
    #[must_use]
    pub fn to_bigint(&self) -> BigInt {
        BigInt::from(self.to_u128())
    }
}

impl WideInt128 {
    /// Wraps a native-order buffer.
    #[inline]
    #[must_use]
    pub const fn from_ne_bytes(bytes: [u8; WIDTH]) -> Self {
        WideInt128 { bytes }
    }

    #[inline]
    #[must_use]
    pub const fn to_ne_bytes(self) -> [u8; WIDTH] {
        self.bytes
    }

    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; WIDTH] {
        &self.bytes
    }

    #[inline]
    #[must_use]
    pub const fn from_i128(value: i128) -> Self {
        WideInt128 {
            bytes: value.to_ne_bytes(),
        }
    }

    #[inline]
    #[must_use]
    pub const fn to_i128(self) -> i128 {
        i128::from_ne_bytes(self.bytes)
    }

    /// Encodes `value mod 2^128`, reinterpreted as two's complement.
    #[must_use]
    pub fn from_bigint(value: &BigInt) -> Self {
        Self::from_i128(i128::from_le_bytes(low_bytes_le(value)))
    }

    /// Decodes the buffer as a two's-complement integer.
    #[must_use]
    pub fn to_bigint(&self) -> BigInt {
        BigInt::from(self.to_i128())
    }
}

impl From<u128> for WideUInt128 {
    fn from(value: u128) -> Self {
        WideUInt128::from_u128(value)
    }
}

impl From<WideUInt128> for u128 {
    fn from(value: WideUInt128) -> Self {
        value.to_u128()
    }
}

impl From<i128> for WideInt128 {
    fn from(value: i128) -> Self {
        WideInt128::from_i128(value)
    }
}

impl From<WideInt128> for i128 {
    fn from(value: WideInt128) -> Self {
        value.to_i128()
    }
}

impl fmt::Debug for WideUInt128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("WideUInt128").field(&self.to_u128()).finish()
    }
}

impl fmt::Debug for WideInt128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("WideInt128").field(&self.to_i128()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_pow(n: u32) -> BigInt {
        BigInt::from(1u8) << n
    }

    #[test]
    fn test_layout() {
        assert_eq!(std::mem::size_of::<WideUInt128>(), 16);
        assert_eq!(std::mem::align_of::<WideUInt128>(), 16);
        assert_eq!(std::mem::size_of::<WideInt128>(), 16);
        assert_eq!(std::mem::align_of::<WideInt128>(), 16);
    }

    #[test]
    fn test_unsigned_small() {
        let wide = WideUInt128::from_bigint(&BigInt::from(128));
        assert_eq!(wide.to_biguint(), BigUint::from(128u32));
        assert_eq!(wide.to_u128(), 128);
    }

    #[test]
    fn test_unsigned_wraps_at_2_pow_128() {
        let wide = WideUInt128::from_bigint(&two_pow(128));
        assert_eq!(wide.to_biguint(), BigUint::from(0u8));
    }

    #[test]
    fn test_unsigned_keeps_2_pow_127() {
        let wide = WideUInt128::from_bigint(&two_pow(127));
        assert_eq!(wide.to_bigint(), two_pow(127));
    }

    #[test]
    fn test_unsigned_negative_wraps() {
        let wide = WideUInt128::from_bigint(&BigInt::from(-1));
        assert_eq!(wide.to_u128(), u128::MAX);
    }

    #[test]
    fn test_signed_roundtrip() {
        for value in [0i128, 1, -1, i128::MIN, i128::MAX, -128, 12345678901234567890] {
            let wide = WideInt128::from_bigint(&BigInt::from(value));
            assert_eq!(wide.to_i128(), value);
        }
    }

    #[test]
    fn test_signed_wraps_to_twos_complement() {
        let wide = WideInt128::from_bigint(&two_pow(127));
        assert_eq!(wide.to_bigint(), -two_pow(127));

        let wide = WideInt128::from_bigint(&(two_pow(128) + BigInt::from(5)));
        assert_eq!(wide.to_i128(), 5);
    }

    #[test]
    fn test_native_byte_order() {
        let wide = WideUInt128::from_u128(1);
        assert_eq!(wide.to_ne_bytes(), 1u128.to_ne_bytes());
    }

    #[test]
    fn test_from_biguint() {
        let big = BigUint::from(u128::MAX) + BigUint::from(2u8);
        assert_eq!(WideUInt128::from_biguint(&big).to_u128(), 1);
    }
}
