// Path: crates/codec/src/error.rs
//! Error types for the codec layer.
//!
//! Decode errors are always fatal for the call that triggered them: the
//! contract runtime converts them into a host trap, never into a partial
//! result. The enums here exist so that the layers *below* the trap boundary
//! (codec, mappers, tests) can propagate failures with `?` and assert on
//! specific variants.

use thiserror::Error;

/// A trait for assigning a stable, machine-readable string code to an error.
pub trait ErrorCode {
    /// Returns the unique, stable string identifier for this error variant.
    fn code(&self) -> &'static str;
}

/// Errors produced while encoding a value.
///
/// Encoding is infallible for every well-formed value; the only failure mode
/// is a payload whose byte length does not fit the 4-byte nested length
/// prefix.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// A nested payload exceeded the 4-byte length prefix range.
    #[error("payload length exceeds the u32 nested length prefix")]
    LengthOverflow,
}

impl ErrorCode for EncodeError {
    fn code(&self) -> &'static str {
        match self {
            Self::LengthOverflow => "CODEC_LENGTH_OVERFLOW",
        }
    }
}

/// Errors produced while decoding a byte input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The input ended before the value was fully decoded.
    #[error("unexpected end of input")]
    InputTooShort,
    /// The input carried more bytes than the target type can hold.
    ///
    /// This is the "invalid bytes length" case: top-decoding more than
    /// `size_of::<T>()` bytes into a fixed-width scalar, or trailing garbage
    /// after a fully decoded top-level composite.
    #[error("input too long for the target type")]
    InputTooLong,
    /// The bytes were structurally valid but carried an illegal value.
    #[error("invalid value: {0}")]
    InvalidValue(&'static str),
    /// An enum discriminant byte outside the declared variant range.
    #[error("unknown enum discriminant {discriminant} (variant count {variant_count})")]
    InvalidEnumDiscriminant {
        /// The discriminant byte found in the input.
        discriminant: u8,
        /// The number of variants the enum declares.
        variant_count: u8,
    },
    /// A string payload was not valid UTF-8.
    #[error("invalid UTF-8 in string payload")]
    Utf8,
    /// The argument stream ended while a multi-value still expected input.
    #[error("too few arguments")]
    MultiTooFewArguments,
    /// The argument stream carried arguments no parameter consumed.
    #[error("too many arguments")]
    MultiTooManyArguments,
}

impl ErrorCode for DecodeError {
    fn code(&self) -> &'static str {
        match self {
            Self::InputTooShort => "CODEC_INPUT_TOO_SHORT",
            Self::InputTooLong => "CODEC_INPUT_TOO_LONG",
            Self::InvalidValue(_) => "CODEC_INVALID_VALUE",
            Self::InvalidEnumDiscriminant { .. } => "CODEC_INVALID_ENUM_DISCRIMINANT",
            Self::Utf8 => "CODEC_INVALID_UTF8",
            Self::MultiTooFewArguments => "CODEC_TOO_FEW_ARGUMENTS",
            Self::MultiTooManyArguments => "CODEC_TOO_MANY_ARGUMENTS",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    extern crate std;
    use std::string::ToString;

    #[test]
    fn codes_are_stable() {
        assert_eq!(DecodeError::InputTooShort.code(), "CODEC_INPUT_TOO_SHORT");
        assert_eq!(
            DecodeError::InvalidEnumDiscriminant {
                discriminant: 9,
                variant_count: 3
            }
            .code(),
            "CODEC_INVALID_ENUM_DISCRIMINANT"
        );
        assert_eq!(EncodeError::LengthOverflow.code(), "CODEC_LENGTH_OVERFLOW");
    }

    #[test]
    fn display_carries_context() {
        let err = DecodeError::InvalidEnumDiscriminant {
            discriminant: 7,
            variant_count: 4,
        };
        assert_eq!(
            err.to_string(),
            "unknown enum discriminant 7 (variant count 4)"
        );
    }
}
