// Path: crates/contract-sdk/src/api/storage.rs
//! Key-value storage primitives.

use alloc::vec::Vec;

/// Load/store over the chain's flat byte-string key-value store.
///
/// A key that was never written loads as the empty vector; storing the empty
/// vector clears the slot. There is no separate delete primitive and no
/// schema: the key-naming convention of the mapper layer *is* the schema.
pub trait StorageApi {
    /// Returns the bytes stored under `key`, empty if the slot was never
    /// written or was cleared.
    fn storage_load(&self, key: &[u8]) -> Vec<u8>;

    /// Overwrites the slot under `key`. Storing an empty value clears it.
    fn storage_store(&self, key: &[u8], value: &[u8]);
}
