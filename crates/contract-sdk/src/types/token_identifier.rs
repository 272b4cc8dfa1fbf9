// Path: crates/contract-sdk/src/types/token_identifier.rs
//! Token identifier: a validated wrapper around the raw ticker bytes.

use core::fmt;

use alloc::string::String;
use alloc::vec::Vec;

use keel_codec::{
    DecodeCursor, DecodeError, EncodeError, NestedDecode, NestedEncode, NestedEncodeOutput,
    TopDecode, TopEncode, TypeAbi,
};

/// A token identifier: an uppercase alphanumeric ticker of 3 to 10
/// characters, optionally followed by `-` and a 6-character lowercase hex
/// nonce assigned at issuance (`WARP-1a2b3c`).
///
/// Construction does not reject malformed bytes -- identifiers arrive from
/// arguments and storage, where decoding must not trap on shape alone --
/// but [`TokenIdentifier::is_valid`] is the check contract logic is
/// expected to `require` before acting on one.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TokenIdentifier {
    bytes: Vec<u8>,
}

impl TokenIdentifier {
    /// Wraps raw identifier bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec(),
        }
    }

    /// The raw identifier bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The ticker part, up to the issuance nonce separator.
    pub fn ticker(&self) -> &[u8] {
        match self.bytes.iter().position(|b| *b == b'-') {
            Some(pos) => &self.bytes[..pos],
            None => &self.bytes,
        }
    }

    /// Shape validation; see the type docs.
    pub fn is_valid(&self) -> bool {
        let (ticker, nonce) = match self.bytes.iter().position(|b| *b == b'-') {
            Some(pos) => (&self.bytes[..pos], Some(&self.bytes[pos + 1..])),
            None => (&self.bytes[..], None),
        };
        if ticker.len() < 3 || ticker.len() > 10 {
            return false;
        }
        if !ticker
            .iter()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        {
            return false;
        }
        match nonce {
            None => true,
            Some(nonce) => {
                nonce.len() == 6
                    && nonce
                        .iter()
                        .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(b))
            }
        }
    }
}

impl fmt::Debug for TokenIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match core::str::from_utf8(&self.bytes) {
            Ok(text) => write!(f, "TokenIdentifier({text})"),
            Err(_) => write!(f, "TokenIdentifier(0x{})", hex::encode(&self.bytes)),
        }
    }
}

impl NestedEncode for TokenIdentifier {
    fn dep_encode<O: NestedEncodeOutput>(&self, out: &mut O) -> Result<(), EncodeError> {
        keel_codec::nested::write_length_prefix(out, self.bytes.len())?;
        out.write(&self.bytes);
        Ok(())
    }
}

impl NestedDecode for TokenIdentifier {
    fn dep_decode(input: &mut DecodeCursor<'_>) -> Result<Self, DecodeError> {
        let len = input.read_length_prefix()?;
        Ok(Self::from_bytes(input.read_bytes(len)?))
    }
}

impl TopEncode for TokenIdentifier {
    fn top_encode(&self) -> Result<Vec<u8>, EncodeError> {
        Ok(self.bytes.clone())
    }
}

impl TopDecode for TokenIdentifier {
    fn top_decode(input: &[u8]) -> Result<Self, DecodeError> {
        Ok(Self::from_bytes(input))
    }
}

impl TypeAbi for TokenIdentifier {
    fn type_name() -> String {
        String::from("TokenIdentifier")
    }
}
