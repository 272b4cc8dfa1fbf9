// Path: crates/contract-sdk/src/types/address.rs
//! The 32-byte account address.

use core::fmt;

use alloc::string::String;
use alloc::vec::Vec;

use keel_codec::{
    DecodeCursor, DecodeError, EncodeError, NestedDecode, NestedEncode, NestedEncodeOutput,
    TopDecode, TopEncode, TypeAbi,
};

/// A 32-byte account address.
///
/// Fixed-width, so it nests with no length prefix and its top-level form is
/// the raw 32 bytes. The all-zero address is the conventional "no address"
/// placeholder.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address([u8; 32]);

impl Address {
    /// Wraps raw address bytes.
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// The all-zero placeholder address.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Validated construction from a slice: exactly 32 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, DecodeError> {
        Ok(Self(<[u8; 32]>::top_decode(bytes)?))
    }

    /// The raw address bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// The raw address bytes as an owned vector.
    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    /// True for the all-zero placeholder.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl From<[u8; 32]> for Address {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address(0x{})", hex::encode(self.0))
    }
}

impl NestedEncode for Address {
    const FIXED_WIDTH: Option<usize> = Some(32);

    fn dep_encode<O: NestedEncodeOutput>(&self, out: &mut O) -> Result<(), EncodeError> {
        out.write(&self.0);
        Ok(())
    }
}

impl NestedDecode for Address {
    fn dep_decode(input: &mut DecodeCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self(<[u8; 32]>::dep_decode(input)?))
    }
}

impl TopEncode for Address {
    fn top_encode(&self) -> Result<Vec<u8>, EncodeError> {
        Ok(self.0.to_vec())
    }
}

impl TopDecode for Address {
    fn top_decode(input: &[u8]) -> Result<Self, DecodeError> {
        Self::from_slice(input)
    }
}

impl TypeAbi for Address {
    fn type_name() -> String {
        String::from("Address")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_and_validation() {
        let address = Address::new([7u8; 32]);
        let top = address.top_encode().unwrap();
        assert_eq!(top.len(), 32);
        assert_eq!(Address::top_decode(&top).unwrap(), address);

        assert!(Address::from_slice(&[1, 2, 3]).is_err());
        assert!(Address::from_slice(&[0u8; 33]).is_err());
    }

    #[test]
    fn nested_form_has_no_prefix() {
        let address = Address::new([9u8; 32]);
        let mut out = Vec::new();
        address.dep_encode(&mut out).unwrap();
        assert_eq!(out.len(), 32);
        assert_eq!(Address::FIXED_WIDTH, Some(32));
    }

    #[test]
    fn debug_is_hex() {
        let mut bytes = [0u8; 32];
        bytes[0] = 0xAB;
        let rendered = alloc::format!("{:?}", Address::new(bytes));
        assert!(rendered.starts_with("Address(0xab00"));
    }
}
