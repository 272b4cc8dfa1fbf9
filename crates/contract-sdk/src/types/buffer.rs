// Path: crates/contract-sdk/src/types/buffer.rs
//! The growable byte buffer, the universal serialization medium.

use core::fmt;

use alloc::string::String;
use alloc::vec::Vec;

use keel_codec::{
    DecodeCursor, DecodeError, EncodeError, NestedDecode, NestedEncode, NestedEncodeOutput,
    TopDecode, TopEncode, TypeAbi,
};

/// A growable byte buffer.
///
/// Every higher type encodes into one of these; it doubles as a
/// [`NestedEncodeOutput`] so values serialize straight into it. ABI name:
/// `"bytes"`.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Buffer {
    bytes: Vec<u8>,
}

impl Buffer {
    /// An empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies `bytes` into a new buffer.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec(),
        }
    }

    /// Wraps an owned byte vector without copying.
    pub fn from_vec(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Byte length.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True when the buffer holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Borrows the content.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Unwraps the content.
    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }

    /// Appends raw bytes.
    pub fn append_bytes(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    /// Appends another buffer's content.
    pub fn append_buffer(&mut self, other: &Buffer) {
        self.bytes.extend_from_slice(&other.bytes);
    }

    /// Copies out the sub-slice `[offset, offset + len)`, or `None` when out
    /// of range.
    pub fn copy_slice(&self, offset: usize, len: usize) -> Option<Vec<u8>> {
        self.bytes.get(offset..offset + len).map(|s| s.to_vec())
    }
}

impl From<Vec<u8>> for Buffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_vec(bytes)
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Buffer(0x{})", hex::encode(&self.bytes))
    }
}

impl NestedEncodeOutput for Buffer {
    fn write(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }
}

impl NestedEncode for Buffer {
    fn dep_encode<O: NestedEncodeOutput>(&self, out: &mut O) -> Result<(), EncodeError> {
        keel_codec::nested::write_length_prefix(out, self.bytes.len())?;
        out.write(&self.bytes);
        Ok(())
    }
}

impl NestedDecode for Buffer {
    fn dep_decode(input: &mut DecodeCursor<'_>) -> Result<Self, DecodeError> {
        let len = input.read_length_prefix()?;
        Ok(Self::from_bytes(input.read_bytes(len)?))
    }
}

impl TopEncode for Buffer {
    fn top_encode(&self) -> Result<Vec<u8>, EncodeError> {
        Ok(self.bytes.clone())
    }
}

impl TopDecode for Buffer {
    fn top_decode(input: &[u8]) -> Result<Self, DecodeError> {
        Ok(Self::from_bytes(input))
    }
}

impl TypeAbi for Buffer {
    fn type_name() -> String {
        String::from("bytes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn top_form_is_identity() {
        let buffer = Buffer::from_bytes(&[1, 2, 3]);
        assert_eq!(buffer.top_encode().unwrap(), vec![1, 2, 3]);
        assert_eq!(Buffer::top_decode(&[1, 2, 3]).unwrap(), buffer);
    }

    #[test]
    fn serializes_as_a_nested_output() {
        let mut buffer = Buffer::new();
        42u32.dep_encode(&mut buffer).unwrap();
        true.dep_encode(&mut buffer).unwrap();
        assert_eq!(buffer.as_bytes(), &[0, 0, 0, 42, 1]);
    }

    #[test]
    fn copy_slice_bounds() {
        let buffer = Buffer::from_bytes(&[1, 2, 3, 4]);
        assert_eq!(buffer.copy_slice(1, 2), Some(vec![2, 3]));
        assert_eq!(buffer.copy_slice(3, 2), None);
    }
}
