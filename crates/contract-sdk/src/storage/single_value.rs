// Path: crates/contract-sdk/src/storage/single_value.rs
//! The single-slot mapper.

use core::marker::PhantomData;

use alloc::vec::Vec;

use keel_codec::{TopDecode, TopEncode};

use crate::api::VmApi;

use super::mapper::{storage_clear, storage_get, storage_is_empty, storage_raw, storage_set};
use super::{StorageKey, StorageMapper};

/// One logical storage slot holding a single encodable value.
///
/// `get` on a never-written slot returns the type's empty-buffer decoding:
/// zero for unsigned scalars, the default value for `default_on_empty`
/// structs. Fixed-width types without an empty form (addresses) trap on an
/// empty slot; check [`SingleValueMapper::is_empty`] first for those.
#[derive(Clone)]
pub struct SingleValueMapper<A, T> {
    api: A,
    key: StorageKey,
    _phantom: PhantomData<T>,
}

impl<A: VmApi, T> StorageMapper<A> for SingleValueMapper<A, T> {
    fn new(api: A, base_key: StorageKey) -> Self {
        Self {
            api,
            key: base_key,
            _phantom: PhantomData,
        }
    }
}

impl<A: VmApi, T: TopEncode + TopDecode> SingleValueMapper<A, T> {
    /// Decodes the current slot content.
    pub fn get(&self) -> T {
        storage_get(&self.api, &self.key)
    }

    /// Overwrites the slot.
    pub fn set(&self, value: &T) {
        storage_set(&self.api, &self.key, value);
    }

    /// Clears the slot.
    pub fn clear(&self) {
        storage_clear(&self.api, &self.key);
    }

    /// True when the slot holds no bytes.
    pub fn is_empty(&self) -> bool {
        storage_is_empty(&self.api, &self.key)
    }

    /// Read-modify-write in one expression; returns the closure's result.
    ///
    /// Not atomic against anything -- there is no concurrent writer in the
    /// execution model, so plain read-then-write is safe by construction.
    pub fn update<R, F: FnOnce(&mut T) -> R>(&self, f: F) -> R {
        let mut value = self.get();
        let result = f(&mut value);
        self.set(&value);
        result
    }

    /// The raw stored bytes.
    pub fn raw_bytes(&self) -> Vec<u8> {
        storage_raw(&self.api, &self.key)
    }
}
