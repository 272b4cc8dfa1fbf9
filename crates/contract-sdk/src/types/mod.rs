// Path: crates/contract-sdk/src/types/mod.rs
//! The value types a contract manipulates.
//!
//! All of them are plain values implementing the codec traits directly, so
//! the same type flows unchanged through storage slots, call arguments,
//! result slots and nested composites.

mod address;
mod big_uint;
mod buffer;
mod dynamic_array;
mod token_identifier;

pub use address::Address;
pub use big_uint::BigUint;
pub use buffer::Buffer;
pub use dynamic_array::{DynamicArray, DynamicArrayIter};
pub use token_identifier::TokenIdentifier;
