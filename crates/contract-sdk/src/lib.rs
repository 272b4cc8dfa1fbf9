// Path: crates/contract-sdk/src/lib.rs
#![no_std]
#![forbid(unsafe_code)]

//! # Keel Contract SDK
//!
//! The runtime library Keel smart contracts are written against: the value
//! types a contract manipulates (`BigUint`, `Buffer`, `Address`,
//! `TokenIdentifier`, `DynamicArray`), the storage-mapper layer that builds
//! persistent arrays, queues, sets and maps out of the chain's flat
//! key-value store, and the per-invocation plumbing (context object,
//! blockchain/call-value/send wrappers, argument loading, result
//! finishing).
//!
//! The host is reached exclusively through the trait family in [`api`];
//! contracts and mappers are generic over `A: VmApi` and receive their API
//! instance explicitly, scoped to one invocation. There is no process-wide
//! state: every mapper re-derives its storage key and re-reads storage on
//! each access.
//!
//! Execution is single-threaded, synchronous and non-reentrant. All errors
//! are fatal to the call: decode failures, failed `require` checks and
//! arithmetic faults abort execution through the host error primitive, and
//! the chain reverts every storage write of the aborted call.

extern crate alloc;

pub mod api;
pub mod contract;
pub mod storage;
pub mod types;

pub use api::VmApi;
pub use contract::ContractContext;
pub use types::{Address, BigUint, Buffer, DynamicArray, TokenIdentifier};

// The endpoint-dispatch attribute, re-exported so contract crates only
// depend on the SDK.
pub use keel_macros::keel_contract;
