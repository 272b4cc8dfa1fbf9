// Path: crates/contract-sdk/src/storage/unordered_set_mapper.rs
//! The insert-only set mapper.

use core::marker::PhantomData;

use keel_codec::{NestedEncode, TopDecode, TopEncode};

use crate::api::VmApi;

use super::mapper::{storage_clear, storage_get, storage_set};
use super::{StorageKey, StorageMapper, VecMapper};

const INDEX_SUFFIX: &[u8] = b".index";

/// A write-once set: an array of elements plus one `.index<element>` slot
/// per element holding its 1-based array position (`0` = absent).
///
/// Supports insertion, membership, iteration and clearing only -- there is
/// deliberately no removal path. Use [`super::SetMapper`] when elements
/// must be removable; this variant exists for accumulate-only registries
/// where the cheaper array backing is enough.
#[derive(Clone)]
pub struct UnorderedSetMapper<A, T> {
    api: A,
    base_key: StorageKey,
    items: VecMapper<A, T>,
    _phantom: PhantomData<T>,
}

impl<A: VmApi, T> StorageMapper<A> for UnorderedSetMapper<A, T> {
    fn new(api: A, base_key: StorageKey) -> Self {
        let items = VecMapper::new(api.clone(), base_key.clone());
        Self {
            api,
            base_key,
            items,
            _phantom: PhantomData,
        }
    }
}

impl<A: VmApi, T: NestedEncode> UnorderedSetMapper<A, T> {
    fn index_key(&self, value: &T) -> StorageKey {
        self.base_key.suffixed_item(INDEX_SUFFIX, value)
    }

    fn index_of(&self, value: &T) -> u32 {
        storage_get(&self.api, &self.index_key(value))
    }

    /// O(1) membership check.
    pub fn contains(&self, value: &T) -> bool {
        self.index_of(value) != 0
    }
}

impl<A: VmApi, T> UnorderedSetMapper<A, T> {
    /// Number of elements.
    pub fn len(&self) -> u32 {
        self.items.len()
    }

    /// True when the set is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<A: VmApi, T: NestedEncode + TopEncode + TopDecode> UnorderedSetMapper<A, T> {
    /// Inserts `value`; returns `false` without touching storage when it is
    /// already present.
    pub fn insert(&self, value: &T) -> bool {
        if self.contains(value) {
            return false;
        }
        let index = self.items.push(value);
        storage_set(&self.api, &self.index_key(value), &index);
        true
    }

    /// Iterates elements in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.items.iter()
    }

    /// Removes every element and index slot. O(n).
    pub fn clear(&self) {
        for value in self.items.iter() {
            storage_clear(&self.api, &self.index_key(&value));
        }
        self.items.clear();
    }
}
