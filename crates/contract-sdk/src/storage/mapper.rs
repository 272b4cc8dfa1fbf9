// Path: crates/contract-sdk/src/storage/mapper.rs
//! The mapper base trait and the typed load/store helpers every mapper is
//! built from.

use alloc::format;
use alloc::vec::Vec;

use keel_codec::{TopDecode, TopEncode};

use crate::api::VmApi;

use super::StorageKey;

/// A storage accessor constructed transiently around a base key.
pub trait StorageMapper<A: VmApi> {
    /// Creates the mapper. Nothing is read or written until an operation
    /// runs.
    fn new(api: A, base_key: StorageKey) -> Self;
}

/// Loads and top-decodes the slot at `key`; the empty slot yields the
/// type's zero/default decoding. Malformed bytes abort the call.
pub(super) fn storage_get<A: VmApi, T: TopDecode>(api: &A, key: &StorageKey) -> T {
    let raw = api.storage_load(key.as_bytes());
    match T::top_decode(&raw) {
        Ok(value) => value,
        Err(err) => api.signal_error(&format!("storage decode error: {err}")),
    }
}

/// Top-encodes `value` and overwrites the slot at `key`.
pub(super) fn storage_set<A: VmApi, T: TopEncode>(api: &A, key: &StorageKey, value: &T) {
    match value.top_encode() {
        Ok(bytes) => api.storage_store(key.as_bytes(), &bytes),
        Err(err) => api.signal_error(&format!("storage encode error: {err}")),
    }
}

/// Clears the slot at `key` by storing the empty value.
pub(super) fn storage_clear<A: VmApi>(api: &A, key: &StorageKey) {
    api.storage_store(key.as_bytes(), &[]);
}

/// True when the slot at `key` holds no bytes.
pub(super) fn storage_is_empty<A: VmApi>(api: &A, key: &StorageKey) -> bool {
    api.storage_load(key.as_bytes()).is_empty()
}

/// The raw bytes of the slot at `key`.
pub(super) fn storage_raw<A: VmApi>(api: &A, key: &StorageKey) -> Vec<u8> {
    api.storage_load(key.as_bytes())
}
