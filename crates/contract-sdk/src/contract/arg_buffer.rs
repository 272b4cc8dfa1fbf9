// Path: crates/contract-sdk/src/contract/arg_buffer.rs
//! The outbound call argument list.

use alloc::vec::Vec;

use keel_codec::{EncodeError, TopEncode, TopEncodeMultiOutput};

/// An ordered list of already-top-encoded argument slots, used to assemble
/// cross-contract calls before handing them to the send primitives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgBuffer {
    args: Vec<Vec<u8>>,
}

impl ArgBuffer {
    /// An empty argument list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one typed argument in its top-level form.
    pub fn push_arg<T: TopEncode>(&mut self, value: &T) -> Result<(), EncodeError> {
        self.args.push(value.top_encode()?);
        Ok(())
    }

    /// Appends one pre-encoded argument slot.
    pub fn push_arg_bytes(&mut self, bytes: Vec<u8>) {
        self.args.push(bytes);
    }

    /// The encoded slots.
    pub fn as_slots(&self) -> &[Vec<u8>] {
        &self.args
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// True when no slots are held.
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }
}

impl TopEncodeMultiOutput for ArgBuffer {
    fn push_arg_raw(&mut self, bytes: Vec<u8>) {
        self.args.push(bytes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BigUint;
    use alloc::vec;

    #[test]
    fn slots_are_top_encoded() {
        let mut args = ArgBuffer::new();
        args.push_arg(&7u32).unwrap();
        args.push_arg(&BigUint::from_u64(999)).unwrap();
        args.push_arg_bytes(vec![0xAA]);
        assert_eq!(
            args.as_slots(),
            &[vec![7], vec![0x03, 0xE7], vec![0xAA]]
        );
    }
}
