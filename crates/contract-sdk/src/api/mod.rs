// Path: crates/contract-sdk/src/api/mod.rs
//! The host interface: the fixed set of primitives a Keel node exposes to a
//! running contract, split into granular capability traits.
//!
//! Every primitive either succeeds or traps the whole execution; none of
//! them return recoverable errors to the contract. Payloads cross the
//! boundary as owned byte vectors; amounts travel as minimal big-endian
//! magnitudes (the same form `BigUint` encodes to).
//!
//! Implementations: the WASM import shims in the node runtime, and the
//! in-memory mock in `keel-vm-mock` used by every integration test.

mod blockchain;
mod call;
mod misc;
mod storage;

pub use blockchain::BlockchainApi;
pub use call::{CallArgsApi, CallValueApi, SendApi};
pub use misc::{CryptoApi, ErrorApi, LogApi};
pub use storage::StorageApi;

/// The full host interface, as one bound.
///
/// `Clone + 'static` lets value wrappers and mappers hold their own cheap
/// copy of the API object; implementations are expected to be a shared
/// handle onto per-invocation state, not the state itself.
pub trait VmApi:
    StorageApi
    + CallArgsApi
    + CallValueApi
    + BlockchainApi
    + SendApi
    + LogApi
    + CryptoApi
    + ErrorApi
    + Clone
    + 'static
{
}

impl<T> VmApi for T where
    T: StorageApi
        + CallArgsApi
        + CallValueApi
        + BlockchainApi
        + SendApi
        + LogApi
        + CryptoApi
        + ErrorApi
        + Clone
        + 'static
{
}
