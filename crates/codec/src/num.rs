// Path: crates/codec/src/num.rs
//! Codec implementations for fixed-width unsigned integers and `bool`.
//!
//! Nested form: exact-width big-endian, no prefix. Top-level form: minimal
//! big-endian with leading zero bytes stripped, so zero is the empty buffer.

use alloc::vec::Vec;

use crate::error::{DecodeError, EncodeError};
use crate::nested::{DecodeCursor, NestedDecode, NestedEncode, NestedEncodeOutput};
use crate::top::{TopDecode, TopEncode};

/// Encodes `value` as its minimal big-endian representation.
///
/// Zero encodes to the empty vector.
pub fn top_encode_uint(value: u64) -> Vec<u8> {
    let full = value.to_be_bytes();
    let first_nonzero = full.iter().position(|b| *b != 0).unwrap_or(full.len());
    full[first_nonzero..].to_vec()
}

/// Decodes a minimal (or zero-padded) big-endian unsigned integer of at most
/// `width` bytes. The empty input decodes to zero.
pub fn top_decode_uint(input: &[u8], width: usize) -> Result<u64, DecodeError> {
    if input.len() > width {
        return Err(DecodeError::InputTooLong);
    }
    let mut value = 0u64;
    for byte in input {
        value = (value << 8) | u64::from(*byte);
    }
    Ok(value)
}

macro_rules! impl_uint_codec {
    ($ty:ty, $width:expr) => {
        impl NestedEncode for $ty {
            const FIXED_WIDTH: Option<usize> = Some($width);

            fn dep_encode<O: NestedEncodeOutput>(&self, out: &mut O) -> Result<(), EncodeError> {
                out.write(&self.to_be_bytes());
                Ok(())
            }
        }

        impl NestedDecode for $ty {
            fn dep_decode(input: &mut DecodeCursor<'_>) -> Result<Self, DecodeError> {
                let bytes = input.read_bytes($width)?;
                let mut raw = [0u8; $width];
                raw.copy_from_slice(bytes);
                Ok(<$ty>::from_be_bytes(raw))
            }
        }

        impl TopEncode for $ty {
            fn top_encode(&self) -> Result<Vec<u8>, EncodeError> {
                Ok(top_encode_uint(u64::from(*self)))
            }
        }

        impl TopDecode for $ty {
            fn top_decode(input: &[u8]) -> Result<Self, DecodeError> {
                let wide = top_decode_uint(input, $width)?;
                // The width check above guarantees the cast is lossless.
                Ok(wide as $ty)
            }
        }
    };
}

impl_uint_codec!(u8, 1);
impl_uint_codec!(u16, 2);
impl_uint_codec!(u32, 4);
impl_uint_codec!(u64, 8);

impl NestedEncode for bool {
    const FIXED_WIDTH: Option<usize> = Some(1);

    fn dep_encode<O: NestedEncodeOutput>(&self, out: &mut O) -> Result<(), EncodeError> {
        out.push_byte(u8::from(*self));
        Ok(())
    }
}

impl NestedDecode for bool {
    fn dep_decode(input: &mut DecodeCursor<'_>) -> Result<Self, DecodeError> {
        match input.read_byte()? {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(DecodeError::InvalidValue("bool byte must be 0 or 1")),
        }
    }
}

impl TopEncode for bool {
    fn top_encode(&self) -> Result<Vec<u8>, EncodeError> {
        u8::from(*self).top_encode()
    }
}

impl TopDecode for bool {
    fn top_decode(input: &[u8]) -> Result<Self, DecodeError> {
        match u8::top_decode(input)? {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(DecodeError::InvalidValue("bool byte must be 0 or 1")),
        }
    }
}

impl NestedEncode for () {
    const FIXED_WIDTH: Option<usize> = Some(0);

    fn dep_encode<O: NestedEncodeOutput>(&self, _out: &mut O) -> Result<(), EncodeError> {
        Ok(())
    }
}

impl NestedDecode for () {
    fn dep_decode(_input: &mut DecodeCursor<'_>) -> Result<Self, DecodeError> {
        Ok(())
    }
}

impl TopEncode for () {
    fn top_encode(&self) -> Result<Vec<u8>, EncodeError> {
        Ok(Vec::new())
    }
}

impl TopDecode for () {
    fn top_decode(input: &[u8]) -> Result<Self, DecodeError> {
        if input.is_empty() {
            Ok(())
        } else {
            Err(DecodeError::InputTooLong)
        }
    }
}
