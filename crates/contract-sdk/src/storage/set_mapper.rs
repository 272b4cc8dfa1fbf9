// Path: crates/contract-sdk/src/storage/set_mapper.rs
//! The insertion-ordered set mapper.

use core::marker::PhantomData;

use keel_codec::{NestedEncode, TopDecode, TopEncode};

use crate::api::VmApi;

use super::mapper::{storage_clear, storage_get, storage_set};
use super::queue_mapper::NULL_ID;
use super::{QueueMapper, StorageKey, StorageMapper};

const NODE_ID_SUFFIX: &[u8] = b".node_id";

/// A persistent set with O(1) membership, insertion and removal, iterating
/// in insertion order.
///
/// Backed 1:1 by a [`QueueMapper`] plus one `.node_id<element>` slot per
/// element holding that element's node id (`0` = absent). The element's
/// nested encoding is the key segment, so element equality is byte equality
/// of encodings.
#[derive(Clone)]
pub struct SetMapper<A, T> {
    api: A,
    base_key: StorageKey,
    queue: QueueMapper<A, T>,
    _phantom: PhantomData<T>,
}

impl<A: VmApi, T> StorageMapper<A> for SetMapper<A, T> {
    fn new(api: A, base_key: StorageKey) -> Self {
        let queue = QueueMapper::new(api.clone(), base_key.clone());
        Self {
            api,
            base_key,
            queue,
            _phantom: PhantomData,
        }
    }
}

impl<A: VmApi, T: NestedEncode> SetMapper<A, T> {
    fn node_id_key(&self, value: &T) -> StorageKey {
        self.base_key.suffixed_item(NODE_ID_SUFFIX, value)
    }

    fn node_id(&self, value: &T) -> u32 {
        storage_get(&self.api, &self.node_id_key(value))
    }

    /// O(1) membership check.
    pub fn contains(&self, value: &T) -> bool {
        self.node_id(value) != NULL_ID
    }
}

impl<A: VmApi, T> SetMapper<A, T> {
    /// Number of elements.
    pub fn len(&self) -> u32 {
        self.queue.len()
    }

    /// True when the set is empty.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl<A: VmApi, T: NestedEncode + TopEncode + TopDecode> SetMapper<A, T> {
    /// Inserts `value`; returns `false` without touching storage when it is
    /// already present.
    pub fn insert(&self, value: &T) -> bool {
        if self.contains(value) {
            return false;
        }
        let node_id = self.queue.push_back(value);
        storage_set(&self.api, &self.node_id_key(value), &node_id);
        true
    }

    /// Removes `value`; returns `false` when it was absent.
    pub fn remove(&self, value: &T) -> bool {
        let node_id = self.node_id(value);
        if node_id == NULL_ID {
            return false;
        }
        self.queue.remove_by_node_id(node_id);
        storage_clear(&self.api, &self.node_id_key(value));
        true
    }

    /// Iterates elements in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.queue.iter()
    }

    /// Removes every element. O(n).
    pub fn clear(&self) {
        // membership slots first; they live under separate keys, so the
        // queue links stay walkable during the pass
        for (_, value) in self.queue.iter_nodes() {
            storage_clear(&self.api, &self.node_id_key(&value));
        }
        self.queue.clear();
    }
}
