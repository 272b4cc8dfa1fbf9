// Path: crates/contract-sdk/src/storage/map_mapper.rs
//! The ordered associative mapper.

use core::marker::PhantomData;

use keel_codec::{NestedEncode, TopDecode, TopEncode};

use crate::api::VmApi;

use super::mapper::{storage_clear, storage_get, storage_set};
use super::{SetMapper, StorageKey, StorageMapper};

const MAPPED_SUFFIX: &[u8] = b".mapped";

/// A persistent map: a [`SetMapper`] of keys plus one `.mapped<key>` value
/// slot per key. Iteration follows the key set's insertion order.
///
/// Value slots are keyed by key *content*, not by set membership, so every
/// removal path clears the value slot alongside the key -- otherwise
/// orphaned `.mapped` slots would leak and resurface if the key were ever
/// re-inserted.
#[derive(Clone)]
pub struct MapMapper<A, K, V> {
    api: A,
    base_key: StorageKey,
    keys: SetMapper<A, K>,
    _phantom: PhantomData<V>,
}

impl<A: VmApi, K, V> StorageMapper<A> for MapMapper<A, K, V> {
    fn new(api: A, base_key: StorageKey) -> Self {
        let keys = SetMapper::new(api.clone(), base_key.clone());
        Self {
            api,
            base_key,
            keys,
            _phantom: PhantomData,
        }
    }
}

impl<A: VmApi, K, V> MapMapper<A, K, V> {
    /// Number of entries.
    pub fn len(&self) -> u32 {
        self.keys.len()
    }

    /// True when the map is empty.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<A: VmApi, K: NestedEncode, V> MapMapper<A, K, V> {
    fn value_key(&self, key: &K) -> StorageKey {
        self.base_key.suffixed_item(MAPPED_SUFFIX, key)
    }

    /// O(1) key membership.
    pub fn contains_key(&self, key: &K) -> bool {
        self.keys.contains(key)
    }
}

impl<A, K, V> MapMapper<A, K, V>
where
    A: VmApi,
    K: NestedEncode + TopEncode + TopDecode,
    V: TopEncode + TopDecode,
{
    /// Reads the value under `key`, if present.
    pub fn get(&self, key: &K) -> Option<V> {
        if !self.contains_key(key) {
            return None;
        }
        Some(storage_get(&self.api, &self.value_key(key)))
    }

    /// Inserts or overwrites; returns the previous value if the key was
    /// present.
    pub fn insert(&self, key: &K, value: &V) -> Option<V> {
        let previous = self.get(key);
        self.keys.insert(key);
        storage_set(&self.api, &self.value_key(key), value);
        previous
    }

    /// Removes the entry under `key`, returning its value if present. The
    /// value slot is cleared together with the key.
    pub fn remove(&self, key: &K) -> Option<V> {
        if !self.keys.remove(key) {
            return None;
        }
        let value = storage_get(&self.api, &self.value_key(key));
        storage_clear(&self.api, &self.value_key(key));
        Some(value)
    }

    /// Iterates `(key, value)` pairs in key insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (K, V)> + '_ {
        self.keys.iter().map(move |key| {
            let value = storage_get(&self.api, &self.value_key(&key));
            (key, value)
        })
    }

    /// Iterates keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.keys.iter()
    }

    /// Iterates values in key insertion order.
    pub fn values(&self) -> impl Iterator<Item = V> + '_ {
        self.iter().map(|(_, value)| value)
    }

    /// Removes every entry. Value slots are cleared *before* the key set,
    /// so an interrupted clear cannot leave orphaned values behind.
    pub fn clear(&self) {
        for key in self.keys.iter() {
            storage_clear(&self.api, &self.value_key(&key));
        }
        self.keys.clear();
    }

    /// The upsert primitive: a view of the slot under `key`, tagged by
    /// current membership.
    pub fn entry(&self, key: K) -> Entry<'_, A, K, V> {
        if self.contains_key(&key) {
            Entry::Occupied(OccupiedEntry { map: self, key })
        } else {
            Entry::Vacant(VacantEntry { map: self, key })
        }
    }
}

/// A view of one map slot, tagged by whether the key is present.
pub enum Entry<'a, A, K, V> {
    /// The key is present.
    Occupied(OccupiedEntry<'a, A, K, V>),
    /// The key is absent.
    Vacant(VacantEntry<'a, A, K, V>),
}

/// Entry view for a present key.
pub struct OccupiedEntry<'a, A, K, V> {
    map: &'a MapMapper<A, K, V>,
    key: K,
}

/// Entry view for an absent key.
pub struct VacantEntry<'a, A, K, V> {
    map: &'a MapMapper<A, K, V>,
    key: K,
}

impl<'a, A, K, V> Entry<'a, A, K, V>
where
    A: VmApi,
    K: NestedEncode + TopEncode + TopDecode,
    V: TopEncode + TopDecode,
{
    /// Returns the existing value unchanged, or inserts `default` and
    /// returns it. Never double-inserts the key.
    pub fn or_insert(self, default: V) -> V {
        match self {
            Entry::Occupied(entry) => entry.get(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Like [`Entry::or_insert`] with a lazily-built default.
    pub fn or_insert_with<F: FnOnce() -> V>(self, default: F) -> V {
        match self {
            Entry::Occupied(entry) => entry.get(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// The borrowed key.
    pub fn key(&self) -> &K {
        match self {
            Entry::Occupied(entry) => &entry.key,
            Entry::Vacant(entry) => &entry.key,
        }
    }
}

impl<'a, A, K, V> OccupiedEntry<'a, A, K, V>
where
    A: VmApi,
    K: NestedEncode + TopEncode + TopDecode,
    V: TopEncode + TopDecode,
{
    /// Reads the current value.
    pub fn get(&self) -> V {
        storage_get(&self.map.api, &self.map.value_key(&self.key))
    }

    /// Read-modify-write on the value; returns the closure's result.
    pub fn update<R, F: FnOnce(&mut V) -> R>(&self, f: F) -> R {
        let mut value = self.get();
        let result = f(&mut value);
        storage_set(&self.map.api, &self.map.value_key(&self.key), &value);
        result
    }

    /// Removes the entry, returning its value.
    pub fn remove(self) -> V {
        match self.map.remove(&self.key) {
            Some(value) => value,
            // an occupied entry's key is present by construction
            None => unreachable!("occupied entry vanished mid-call"),
        }
    }
}

impl<'a, A, K, V> VacantEntry<'a, A, K, V>
where
    A: VmApi,
    K: NestedEncode + TopEncode + TopDecode,
    V: TopEncode + TopDecode,
{
    /// Inserts `value` under the vacant key and returns it.
    pub fn insert(self, value: V) -> V {
        self.map.insert(&self.key, &value);
        value
    }
}
