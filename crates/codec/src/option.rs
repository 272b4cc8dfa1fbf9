// Path: crates/codec/src/option.rs
//! Codec implementation for `Option<T>`.
//!
//! Nested form: an explicit presence tag (`0` absent, `1` present) followed
//! by the nested payload. Top-level form: the empty buffer for `None`, and
//! `[1] ++ nested(T)` for `Some`.
//!
//! The top-level form infers absence from buffer emptiness. For a payload
//! type whose own valid encoding can be empty this is ambiguous: such a
//! round trip is lossy and callers should prefer the nested form (or a
//! non-optional slot) for those types. The ambiguity is inherited from the
//! chain ABI and is deliberately not "fixed" here.

use alloc::vec::Vec;

use crate::error::{DecodeError, EncodeError};
use crate::nested::{DecodeCursor, NestedDecode, NestedEncode, NestedEncodeOutput};
use crate::top::{TopDecode, TopEncode};

impl<T: NestedEncode> NestedEncode for Option<T> {
    fn dep_encode<O: NestedEncodeOutput>(&self, out: &mut O) -> Result<(), EncodeError> {
        match self {
            None => {
                out.push_byte(0);
                Ok(())
            }
            Some(value) => {
                out.push_byte(1);
                value.dep_encode(out)
            }
        }
    }
}

impl<T: NestedDecode> NestedDecode for Option<T> {
    fn dep_decode(input: &mut DecodeCursor<'_>) -> Result<Self, DecodeError> {
        match input.read_byte()? {
            0 => Ok(None),
            1 => Ok(Some(T::dep_decode(input)?)),
            _ => Err(DecodeError::InvalidValue("option tag must be 0 or 1")),
        }
    }
}

impl<T: NestedEncode> TopEncode for Option<T> {
    fn top_encode(&self) -> Result<Vec<u8>, EncodeError> {
        match self {
            None => Ok(Vec::new()),
            Some(value) => {
                let mut out = Vec::new();
                out.push(1);
                value.dep_encode(&mut out)?;
                Ok(out)
            }
        }
    }
}

impl<T: NestedDecode> TopDecode for Option<T> {
    fn top_decode(input: &[u8]) -> Result<Self, DecodeError> {
        if input.is_empty() {
            return Ok(None);
        }
        let mut cursor = DecodeCursor::new(input);
        match cursor.read_byte()? {
            1 => {
                let value = T::dep_decode(&mut cursor)?;
                cursor.finish()?;
                Ok(Some(value))
            }
            _ => Err(DecodeError::InvalidValue("option tag must be 1")),
        }
    }
}
