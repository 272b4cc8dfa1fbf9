// Path: crates/codec/src/top.rs
//! The standalone (top-level) encoding contract.

use alloc::vec::Vec;

use crate::error::{DecodeError, EncodeError};
use crate::nested::{DecodeCursor, NestedDecode, NestedEncode};

/// The byte form used when a value is the entire content of a slot: one call
/// argument, one return value, or one storage entry.
///
/// Because the slot boundary already delimits the value, redundant framing is
/// dropped: integers shrink to their minimal big-endian representation and
/// byte strings are written verbatim.
pub trait TopEncode {
    /// Returns the canonical standalone byte representation of `self`.
    fn top_encode(&self) -> Result<Vec<u8>, EncodeError>;
}

/// The inverse of [`TopEncode`].
///
/// For every unsigned scalar type the empty input decodes to zero; this is
/// what gives never-written storage slots their default value without a
/// single storage write.
pub trait TopDecode: Sized {
    /// Decodes a value from the full content of a slot.
    fn top_decode(input: &[u8]) -> Result<Self, DecodeError>;
}

/// Top-encodes a composite by reusing its nested form.
///
/// Structs and tuples have identical top-level and nested bodies (the
/// field-by-field concatenation); only length-prefixed leaf types differ
/// between the two modes.
pub fn top_encode_from_nested<T: NestedEncode>(value: &T) -> Result<Vec<u8>, EncodeError> {
    let mut out = Vec::new();
    value.dep_encode(&mut out)?;
    Ok(out)
}

/// Top-decodes a composite by running its nested decoder over the whole
/// input and requiring full consumption.
pub fn top_decode_from_nested<T: NestedDecode>(input: &[u8]) -> Result<T, DecodeError> {
    let mut cursor = DecodeCursor::new(input);
    let value = T::dep_decode(&mut cursor)?;
    cursor.finish()?;
    Ok(value)
}
