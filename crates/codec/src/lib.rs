// Path: crates/codec/src/lib.rs
#![no_std]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

//! # Keel Codec
//!
//! The canonical binary codec for everything a Keel contract sends to or
//! receives from the chain: call arguments, call results, storage slots, and
//! the payloads nested inside them.
//!
//! ## Architectural Role
//!
//! As the base crate of the workspace, `keel-codec` has minimal dependencies
//! and is itself a dependency of every other crate. Centralizing the codec
//! here guarantees that all components agree byte-for-byte on the encoding of
//! any value, which is what makes the flat key-value storage layout and the
//! cross-contract argument format deterministic.
//!
//! ## The two encoding modes
//!
//! Every encodable value has two byte forms:
//!
//! - **Top-level**: used when the value is the *entire* content of a slot
//!   (one call argument, one return value, one storage entry). Redundant
//!   framing is omitted: unsigned integers shrink to their minimal big-endian
//!   form (zero becomes the empty buffer), byte strings are stored verbatim.
//! - **Nested**: used when the value is embedded inside another value. The
//!   form is always self-delimiting: fixed-width scalars are written at their
//!   exact width, variable-width payloads get a 4-byte big-endian length
//!   prefix.
//!
//! The invariant `decode(encode(x)) == x` holds for both modes, and the empty
//! buffer top-decodes to the zero/default value of every unsigned scalar.

/// Re-exported so macro-generated code can name alloc types through this
/// crate from both std and no_std consumers.
pub extern crate alloc;

/// Stable machine-readable codes and the error enums of the codec layer.
pub mod error;
/// The `NestedEncode`/`NestedDecode` traits and the decode cursor.
pub mod nested;
/// The `TopEncode`/`TopDecode` traits and whole-buffer helpers.
pub mod top;
/// Codec implementations for unsigned integers and `bool`.
pub mod num;
/// Codec implementations for byte strings, strings, arrays and vectors.
pub mod bytes;
/// Codec implementation and ambiguity notes for `Option<T>`.
pub mod option;
/// Codec implementations for fixed-arity tuples.
pub mod tuple;
/// The multi-value (argument stream) codec and its container types.
pub mod multi;
/// The `TypeAbi` trait mapping codec types to ABI type names.
pub mod type_abi;

pub use error::{DecodeError, EncodeError, ErrorCode};
pub use multi::{
    MultiValue1, MultiValue2, MultiValue3, MultiValue4, MultiValue5, MultiValueEncoded,
    OptionalValue, TopDecodeMulti, TopDecodeMultiInput, TopEncodeMulti, TopEncodeMultiOutput,
};
pub use nested::{DecodeCursor, NestedDecode, NestedEncode, NestedEncodeOutput};
pub use top::{top_decode_from_nested, top_encode_from_nested, TopDecode, TopEncode};
pub use type_abi::TypeAbi;

// Derive macros re-exported under the trait names, serde-style, so a single
// `use keel_codec::TopEncode` brings both the trait and its derive.
pub use keel_macros::{NestedDecode, NestedEncode, TopDecode, TopEncode, TypeAbi};
