// Path: crates/contract-sdk/src/types/big_uint.rs
//! Arbitrary-precision unsigned integer.
//!
//! The magnitude is held inline as its minimal big-endian byte string (zero
//! is the empty string), which is also the value's canonical top-level
//! encoding, so storage writes and argument passing never reserialize.
//!
//! Arithmetic faults mirror the chain's trap semantics: subtraction below
//! zero and division by zero abort execution. The `checked_*` variants are
//! for contract logic that wants to guard with `require` instead.

use core::cmp::Ordering;
use core::fmt;
use core::ops::{Add, AddAssign, Div, Mul, Rem, Sub, SubAssign};

use alloc::string::String;
use alloc::vec::Vec;

use keel_codec::{
    DecodeCursor, DecodeError, EncodeError, NestedDecode, NestedEncode, NestedEncodeOutput,
    TopDecode, TopEncode, TypeAbi,
};

/// An arbitrary-precision unsigned integer.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct BigUint {
    /// Minimal big-endian magnitude; empty means zero.
    bytes: Vec<u8>,
}

/// Strips leading zero bytes.
fn trim_leading_zeros(bytes: &[u8]) -> &[u8] {
    let first_nonzero = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    &bytes[first_nonzero..]
}

impl BigUint {
    /// Zero.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Builds a value from a big-endian magnitude; leading zeros are
    /// stripped so the representation stays canonical.
    pub fn from_bytes_be(bytes: &[u8]) -> Self {
        Self {
            bytes: trim_leading_zeros(bytes).to_vec(),
        }
    }

    /// Builds a value from a machine word.
    pub fn from_u64(value: u64) -> Self {
        Self::from_bytes_be(&value.to_be_bytes())
    }

    /// The minimal big-endian magnitude (empty for zero).
    pub fn to_bytes_be(&self) -> &[u8] {
        &self.bytes
    }

    /// Converts to a machine word if the value fits.
    pub fn to_u64(&self) -> Option<u64> {
        if self.bytes.len() > 8 {
            return None;
        }
        let mut value = 0u64;
        for byte in &self.bytes {
            value = (value << 8) | u64::from(*byte);
        }
        Some(value)
    }

    /// True for zero.
    pub fn is_zero(&self) -> bool {
        self.bytes.is_empty()
    }

    /// `self + other`.
    pub fn checked_add(&self, other: &Self) -> Self {
        let (long, short) = if self.bytes.len() >= other.bytes.len() {
            (&self.bytes, &other.bytes)
        } else {
            (&other.bytes, &self.bytes)
        };
        let mut result = Vec::with_capacity(long.len() + 1);
        let mut carry = 0u16;
        for i in 0..long.len() {
            let a = u16::from(long[long.len() - 1 - i]);
            let b = if i < short.len() {
                u16::from(short[short.len() - 1 - i])
            } else {
                0
            };
            let sum = a + b + carry;
            result.push((sum & 0xFF) as u8);
            carry = sum >> 8;
        }
        if carry != 0 {
            result.push(carry as u8);
        }
        result.reverse();
        Self { bytes: result }
    }

    /// `self - other`, or `None` when the result would be negative.
    pub fn checked_sub(&self, other: &Self) -> Option<Self> {
        if self < other {
            return None;
        }
        let mut result = Vec::with_capacity(self.bytes.len());
        let mut borrow = 0i16;
        for i in 0..self.bytes.len() {
            let a = i16::from(self.bytes[self.bytes.len() - 1 - i]);
            let b = if i < other.bytes.len() {
                i16::from(other.bytes[other.bytes.len() - 1 - i])
            } else {
                0
            };
            let mut diff = a - b - borrow;
            if diff < 0 {
                diff += 256;
                borrow = 1;
            } else {
                borrow = 0;
            }
            result.push(diff as u8);
        }
        result.reverse();
        Some(Self::from_bytes_be(&result))
    }

    /// `self * other`.
    pub fn checked_mul(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }
        // Schoolbook multiplication over little-endian limbs.
        let a: Vec<u8> = self.bytes.iter().rev().copied().collect();
        let b: Vec<u8> = other.bytes.iter().rev().copied().collect();
        let mut acc = alloc::vec![0u32; a.len() + b.len()];
        for (i, &x) in a.iter().enumerate() {
            for (j, &y) in b.iter().enumerate() {
                acc[i + j] += u32::from(x) * u32::from(y);
            }
            // Normalize eagerly so the u32 accumulators cannot overflow.
            let mut carry = 0u32;
            for cell in acc.iter_mut() {
                let value = *cell + carry;
                *cell = value & 0xFF;
                carry = value >> 8;
            }
        }
        let result: Vec<u8> = acc.iter().rev().map(|cell| *cell as u8).collect();
        Self::from_bytes_be(&result)
    }

    /// `(self / other, self % other)`, or `None` for a zero divisor.
    pub fn checked_div_rem(&self, other: &Self) -> Option<(Self, Self)> {
        if other.is_zero() {
            return None;
        }
        if self < other {
            return Some((Self::zero(), self.clone()));
        }
        // Binary long division: walk the dividend's bits from the most
        // significant down, shifting the remainder and subtracting the
        // divisor whenever it fits.
        let total_bits = self.bytes.len() * 8;
        let mut quotient = alloc::vec![0u8; self.bytes.len()];
        let mut remainder = Self::zero();
        for bit in 0..total_bits {
            let byte = self.bytes[bit / 8];
            let bit_value = (byte >> (7 - (bit % 8))) & 1;
            remainder = remainder.shift_left_one();
            if bit_value == 1 {
                remainder = remainder.checked_add(&Self::from_u64(1));
            }
            if remainder >= *other {
                remainder = match remainder.checked_sub(other) {
                    Some(r) => r,
                    None => unreachable!("remainder >= divisor was just checked"),
                };
                quotient[bit / 8] |= 1 << (7 - (bit % 8));
            }
        }
        Some((Self::from_bytes_be(&quotient), remainder))
    }

    fn shift_left_one(&self) -> Self {
        if self.is_zero() {
            return Self::zero();
        }
        let mut result = Vec::with_capacity(self.bytes.len() + 1);
        let mut carry = 0u8;
        for byte in self.bytes.iter().rev() {
            result.push((byte << 1) | carry);
            carry = byte >> 7;
        }
        if carry != 0 {
            result.push(carry);
        }
        result.reverse();
        Self { bytes: result }
    }
}

impl From<u64> for BigUint {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl Ord for BigUint {
    fn cmp(&self, other: &Self) -> Ordering {
        // Both magnitudes are minimal, so length decides first.
        match self.bytes.len().cmp(&other.bytes.len()) {
            Ordering::Equal => self.bytes.cmp(&other.bytes),
            ordering => ordering,
        }
    }
}

impl PartialOrd for BigUint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for BigUint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            write!(f, "BigUint(0x00)")
        } else {
            write!(f, "BigUint(0x{})", hex::encode(&self.bytes))
        }
    }
}

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, |$a:ident, $b:ident| $body:expr) => {
        impl $trait for BigUint {
            type Output = BigUint;
            fn $method(self, rhs: BigUint) -> BigUint {
                let ($a, $b) = (&self, &rhs);
                $body
            }
        }

        impl $trait<&BigUint> for &BigUint {
            type Output = BigUint;
            fn $method(self, rhs: &BigUint) -> BigUint {
                let ($a, $b) = (self, rhs);
                $body
            }
        }
    };
}

impl_binary_op!(Add, add, |a, b| a.checked_add(b));
impl_binary_op!(Sub, sub, |a, b| match a.checked_sub(b) {
    Some(result) => result,
    None => panic!("big integer underflow"),
});
impl_binary_op!(Mul, mul, |a, b| a.checked_mul(b));
impl_binary_op!(Div, div, |a, b| match a.checked_div_rem(b) {
    Some((quotient, _)) => quotient,
    None => panic!("big integer division by zero"),
});
impl_binary_op!(Rem, rem, |a, b| match a.checked_div_rem(b) {
    Some((_, remainder)) => remainder,
    None => panic!("big integer division by zero"),
});

impl AddAssign<&BigUint> for BigUint {
    fn add_assign(&mut self, rhs: &BigUint) {
        *self = self.checked_add(rhs);
    }
}

impl SubAssign<&BigUint> for BigUint {
    fn sub_assign(&mut self, rhs: &BigUint) {
        *self = match self.checked_sub(rhs) {
            Some(result) => result,
            None => panic!("big integer underflow"),
        };
    }
}

impl TopEncode for BigUint {
    fn top_encode(&self) -> Result<Vec<u8>, EncodeError> {
        Ok(self.bytes.clone())
    }
}

impl TopDecode for BigUint {
    fn top_decode(input: &[u8]) -> Result<Self, DecodeError> {
        Ok(Self::from_bytes_be(input))
    }
}

impl NestedEncode for BigUint {
    fn dep_encode<O: NestedEncodeOutput>(&self, out: &mut O) -> Result<(), EncodeError> {
        keel_codec::nested::write_length_prefix(out, self.bytes.len())?;
        out.write(&self.bytes);
        Ok(())
    }
}

impl NestedDecode for BigUint {
    fn dep_decode(input: &mut DecodeCursor<'_>) -> Result<Self, DecodeError> {
        let len = input.read_length_prefix()?;
        Ok(Self::from_bytes_be(input.read_bytes(len)?))
    }
}

impl TypeAbi for BigUint {
    fn type_name() -> String {
        String::from("BigUint")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn zero_encodes_to_the_empty_buffer() {
        assert_eq!(BigUint::zero().top_encode().unwrap(), Vec::<u8>::new());
        assert_eq!(BigUint::from_u64(0).to_bytes_be(), &[] as &[u8]);
        assert_eq!(BigUint::top_decode(&[]).unwrap(), BigUint::zero());
    }

    #[test]
    fn minimal_representation() {
        assert_eq!(BigUint::from_u64(999).to_bytes_be(), &[0x03, 0xE7]);
        assert_eq!(BigUint::from_bytes_be(&[0, 0, 1]).to_bytes_be(), &[1]);
    }

    #[test]
    fn subtraction_scenario() {
        // fromU64(1000) - fromU64(1) == the two-byte minimal form of 999
        let result = BigUint::from_u64(1000) - BigUint::from_u64(1);
        assert_eq!(result.top_encode().unwrap(), vec![0x03, 0xE7]);
    }

    #[test]
    #[should_panic(expected = "big integer underflow")]
    fn subtraction_below_zero_traps() {
        let _ = BigUint::from_u64(1) - BigUint::from_u64(2);
    }

    #[test]
    fn addition_carries_across_limbs() {
        let a = BigUint::from_bytes_be(&[0xFF, 0xFF, 0xFF]);
        let b = BigUint::from_u64(1);
        assert_eq!((a + b).to_bytes_be(), &[1, 0, 0, 0]);
    }

    #[test]
    fn multiplication() {
        let a = BigUint::from_u64(0xFFFF_FFFF);
        let b = BigUint::from_u64(0xFFFF_FFFF);
        let expected = 0xFFFF_FFFFu64 * 0xFFFF_FFFFu64;
        assert_eq!((a * b).to_u64().unwrap(), expected);

        // Past the u64 range: (2^64 - 1) * 2
        let a = BigUint::from_u64(u64::MAX);
        let doubled = a.checked_mul(&BigUint::from_u64(2));
        assert_eq!(
            doubled.to_bytes_be(),
            &[0x01, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE]
        );
    }

    #[test]
    fn division_and_remainder() {
        let a = BigUint::from_u64(1_000_000_007);
        let b = BigUint::from_u64(12_345);
        let (q, r) = a.checked_div_rem(&b).unwrap();
        assert_eq!(q.to_u64().unwrap(), 1_000_000_007 / 12_345);
        assert_eq!(r.to_u64().unwrap(), 1_000_000_007 % 12_345);

        // A dividend wider than one machine word.
        let wide = BigUint::from_u64(u64::MAX).checked_mul(&BigUint::from_u64(3));
        let (q, r) = wide.checked_div_rem(&BigUint::from_u64(3)).unwrap();
        assert_eq!(q, BigUint::from_u64(u64::MAX));
        assert!(r.is_zero());
    }

    #[test]
    #[should_panic(expected = "division by zero")]
    fn division_by_zero_traps() {
        let _ = BigUint::from_u64(5) / BigUint::zero();
    }

    #[test]
    fn ordering_follows_magnitude() {
        assert!(BigUint::from_u64(256) > BigUint::from_u64(255));
        assert!(BigUint::zero() < BigUint::from_u64(1));
        let wide = BigUint::from_bytes_be(&[1, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert!(wide > BigUint::from_u64(u64::MAX));
    }

    #[test]
    fn to_u64_bounds() {
        assert_eq!(BigUint::from_u64(u64::MAX).to_u64(), Some(u64::MAX));
        let wide = BigUint::from_bytes_be(&[1, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(wide.to_u64(), None);
    }

    #[test]
    fn nested_form_is_length_prefixed() {
        let value = BigUint::from_u64(999);
        let mut out = Vec::new();
        value.dep_encode(&mut out).unwrap();
        assert_eq!(out, vec![0, 0, 0, 2, 0x03, 0xE7]);

        let mut cursor = DecodeCursor::new(&out);
        assert_eq!(BigUint::dep_decode(&mut cursor).unwrap(), value);
    }

    #[test]
    fn top_decode_accepts_padded_input() {
        assert_eq!(
            BigUint::top_decode(&[0, 0, 3]).unwrap(),
            BigUint::from_u64(3)
        );
    }
}
