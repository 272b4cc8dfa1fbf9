// Path: crates/codec/src/bytes.rs
//! Codec implementations for UTF-8 strings, fixed byte arrays and vectors of
//! encodable values.
//!
//! `Vec<u8>` needs no dedicated impl: through the generic `Vec<T>` path a
//! byte string nested-encodes as a 4-byte length prefix plus raw bytes, and
//! top-encodes to itself verbatim (u8 is width-1 fixed), which is exactly the
//! byte-string contract.

use alloc::string::String;
use alloc::vec::Vec;

use crate::error::{DecodeError, EncodeError};
use crate::nested::{
    write_length_prefix, DecodeCursor, NestedDecode, NestedEncode, NestedEncodeOutput,
};
use crate::top::{TopDecode, TopEncode};

impl NestedEncode for String {
    fn dep_encode<O: NestedEncodeOutput>(&self, out: &mut O) -> Result<(), EncodeError> {
        write_length_prefix(out, self.len())?;
        out.write(self.as_bytes());
        Ok(())
    }
}

impl NestedDecode for String {
    fn dep_decode(input: &mut DecodeCursor<'_>) -> Result<Self, DecodeError> {
        let len = input.read_length_prefix()?;
        let bytes = input.read_bytes(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| DecodeError::Utf8)
    }
}

impl TopEncode for String {
    fn top_encode(&self) -> Result<Vec<u8>, EncodeError> {
        Ok(self.as_bytes().to_vec())
    }
}

impl TopDecode for String {
    fn top_decode(input: &[u8]) -> Result<Self, DecodeError> {
        String::from_utf8(input.to_vec()).map_err(|_| DecodeError::Utf8)
    }
}

impl<const N: usize> NestedEncode for [u8; N] {
    const FIXED_WIDTH: Option<usize> = Some(N);

    fn dep_encode<O: NestedEncodeOutput>(&self, out: &mut O) -> Result<(), EncodeError> {
        out.write(self);
        Ok(())
    }
}

impl<const N: usize> NestedDecode for [u8; N] {
    fn dep_decode(input: &mut DecodeCursor<'_>) -> Result<Self, DecodeError> {
        let bytes = input.read_bytes(N)?;
        let mut raw = [0u8; N];
        raw.copy_from_slice(bytes);
        Ok(raw)
    }
}

impl<const N: usize> TopEncode for [u8; N] {
    fn top_encode(&self) -> Result<Vec<u8>, EncodeError> {
        Ok(self.to_vec())
    }
}

impl<const N: usize> TopDecode for [u8; N] {
    fn top_decode(input: &[u8]) -> Result<Self, DecodeError> {
        if input.len() != N {
            return Err(if input.len() < N {
                DecodeError::InputTooShort
            } else {
                DecodeError::InputTooLong
            });
        }
        let mut raw = [0u8; N];
        raw.copy_from_slice(input);
        Ok(raw)
    }
}

/// Serializes the elements of `items` back-to-back with no prefix.
pub(crate) fn encode_items<T: NestedEncode>(items: &[T]) -> Result<Vec<u8>, EncodeError> {
    let mut payload = Vec::new();
    for item in items {
        item.dep_encode(&mut payload)?;
    }
    Ok(payload)
}

/// Decodes elements from `cursor` until it is depleted.
pub(crate) fn decode_items<T: NestedDecode>(
    cursor: &mut DecodeCursor<'_>,
) -> Result<Vec<T>, DecodeError> {
    let mut items = Vec::new();
    while !cursor.is_depleted() {
        items.push(T::dep_decode(cursor)?);
    }
    Ok(items)
}

impl<T: NestedEncode> NestedEncode for Vec<T> {
    fn dep_encode<O: NestedEncodeOutput>(&self, out: &mut O) -> Result<(), EncodeError> {
        let payload = encode_items(self)?;
        write_length_prefix(out, payload.len())?;
        out.write(&payload);
        Ok(())
    }
}

impl<T: NestedDecode> NestedDecode for Vec<T> {
    fn dep_decode(input: &mut DecodeCursor<'_>) -> Result<Self, DecodeError> {
        let mut inner = input.read_prefixed()?;
        decode_items(&mut inner)
    }
}

impl<T: NestedEncode> TopEncode for Vec<T> {
    /// Fixed-width elements serialize to the raw element concatenation; the
    /// slot boundary plus the element width delimit the sequence. Dynamic
    /// elements keep the length-prefixed nested form.
    fn top_encode(&self) -> Result<Vec<u8>, EncodeError> {
        if T::FIXED_WIDTH.is_some() {
            encode_items(self)
        } else {
            let mut out = Vec::new();
            self.dep_encode(&mut out)?;
            Ok(out)
        }
    }
}

impl<T: NestedDecode + NestedEncode> TopDecode for Vec<T> {
    fn top_decode(input: &[u8]) -> Result<Self, DecodeError> {
        if let Some(width) = T::FIXED_WIDTH {
            if width > 0 && input.len() % width != 0 {
                return Err(DecodeError::InvalidValue(
                    "byte length is not a multiple of the element width",
                ));
            }
            let mut cursor = DecodeCursor::new(input);
            let items = decode_items(&mut cursor)?;
            cursor.finish()?;
            Ok(items)
        } else {
            let mut cursor = DecodeCursor::new(input);
            let items = Self::dep_decode(&mut cursor)?;
            cursor.finish()?;
            Ok(items)
        }
    }
}
