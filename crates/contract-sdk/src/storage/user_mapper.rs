// Path: crates/contract-sdk/src/storage/user_mapper.rs
//! The address <-> id registry mapper.

use crate::api::VmApi;
use crate::types::Address;

use super::mapper::{storage_get, storage_is_empty, storage_set};
use super::{StorageKey, StorageMapper};

const ADDRESS_TO_ID_SUFFIX: &[u8] = b"_address_to_id";
const ID_TO_ADDRESS_SUFFIX: &[u8] = b"_id_to_address";
const COUNT_SUFFIX: &[u8] = b"_count";

/// A bidirectional registry assigning compact sequential ids to addresses.
///
/// Ids start at 1 and are handed out in registration order; id `0` means
/// "unknown". Used wherever per-participant storage keys would otherwise
/// embed a full 32-byte address segment.
#[derive(Clone)]
pub struct UserMapper<A> {
    api: A,
    base_key: StorageKey,
}

impl<A: VmApi> StorageMapper<A> for UserMapper<A> {
    fn new(api: A, base_key: StorageKey) -> Self {
        Self { api, base_key }
    }
}

impl<A: VmApi> UserMapper<A> {
    fn address_to_id_key(&self, address: &Address) -> StorageKey {
        self.base_key.suffixed_item(ADDRESS_TO_ID_SUFFIX, address)
    }

    fn id_to_address_key(&self, id: u32) -> StorageKey {
        self.base_key.suffixed_item(ID_TO_ADDRESS_SUFFIX, &id)
    }

    fn count_key(&self) -> StorageKey {
        self.base_key.suffixed(COUNT_SUFFIX)
    }

    /// Number of registered addresses.
    pub fn count(&self) -> u32 {
        storage_get(&self.api, &self.count_key())
    }

    /// The id of `address`, or `0` when unregistered.
    pub fn get_id(&self, address: &Address) -> u32 {
        storage_get(&self.api, &self.address_to_id_key(address))
    }

    /// The id of `address`; aborts the call when unregistered.
    pub fn get_id_non_zero(&self, address: &Address) -> u32 {
        match self.get_id(address) {
            0 => self.api.signal_error("unknown address"),
            id => id,
        }
    }

    /// The address registered under `id`, if any.
    pub fn get_address(&self, id: u32) -> Option<Address> {
        if id == 0 || storage_is_empty(&self.api, &self.id_to_address_key(id)) {
            return None;
        }
        Some(storage_get(&self.api, &self.id_to_address_key(id)))
    }

    /// The id of `address`, registering it with the next sequential id on
    /// first sight. Idempotent.
    pub fn get_or_create_id(&self, address: &Address) -> u32 {
        let existing = self.get_id(address);
        if existing != 0 {
            return existing;
        }
        let new_id = self.count() + 1;
        storage_set(&self.api, &self.count_key(), &new_id);
        storage_set(&self.api, &self.address_to_id_key(address), &new_id);
        storage_set(&self.api, &self.id_to_address_key(new_id), address);
        new_id
    }
}
