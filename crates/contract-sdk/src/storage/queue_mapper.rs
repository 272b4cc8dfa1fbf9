// Path: crates/contract-sdk/src/storage/queue_mapper.rs
//! The doubly-linked queue mapper.

use core::marker::PhantomData;

use keel_codec::{NestedDecode, NestedEncode, TopDecode, TopEncode};

use crate::api::VmApi;

use super::mapper::{storage_clear, storage_get, storage_is_empty, storage_set};
use super::{StorageKey, StorageMapper};

const INFO_SUFFIX: &[u8] = b".info";
const NODE_LINKS_SUFFIX: &[u8] = b".node_links";
const VALUE_SUFFIX: &[u8] = b".value";

/// The null node id.
pub(super) const NULL_ID: u32 = 0;

/// The queue's bookkeeping record.
///
/// An empty queue is represented by *clearing* the `.info` slot, not by
/// writing four zeros; the `default_on_empty` policy makes the empty slot
/// decode back to the all-zero record.
#[derive(
    TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, Default, PartialEq, Eq, Debug,
)]
#[codec(default_on_empty)]
pub struct QueueInfo {
    /// Number of live nodes.
    pub len: u32,
    /// Front node id, `0` when empty.
    pub front: u32,
    /// Back node id, `0` when empty.
    pub back: u32,
    /// Monotonic node-id generator; ids are never reused, so a stale id can
    /// never alias a later insertion.
    pub new: u32,
}

/// Neighbor links of one live node.
///
/// Unlike [`QueueInfo`] this record is always written explicitly (eight
/// bytes, even when both links are null): the emptiness of the links slot
/// is what distinguishes a live node from a removed or never-inserted one.
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, Default, PartialEq, Eq, Debug)]
struct NodeLinks {
    previous: u32,
    next: u32,
}

/// A persistent doubly-linked list over three key families: one `.info`
/// record, and per node id a `.node_links<id>` record plus a `.value<id>`
/// slot.
///
/// Push/pop at either end and removal by node id are O(1): each rewires at
/// most two neighbor records.
#[derive(Clone)]
pub struct QueueMapper<A, T> {
    api: A,
    base_key: StorageKey,
    _phantom: PhantomData<T>,
}

impl<A: VmApi, T> StorageMapper<A> for QueueMapper<A, T> {
    fn new(api: A, base_key: StorageKey) -> Self {
        Self {
            api,
            base_key,
            _phantom: PhantomData,
        }
    }
}

impl<A: VmApi, T> QueueMapper<A, T> {
    fn info_key(&self) -> StorageKey {
        self.base_key.suffixed(INFO_SUFFIX)
    }

    fn links_key(&self, id: u32) -> StorageKey {
        self.base_key.suffixed_item(NODE_LINKS_SUFFIX, &id)
    }

    fn value_key(&self, id: u32) -> StorageKey {
        self.base_key.suffixed_item(VALUE_SUFFIX, &id)
    }

    fn info(&self) -> QueueInfo {
        storage_get(&self.api, &self.info_key())
    }

    fn store_info(&self, info: &QueueInfo) {
        if info.len == 0 {
            // empty-queue convention: clear instead of writing zeros
            storage_clear(&self.api, &self.info_key());
        } else {
            storage_set(&self.api, &self.info_key(), info);
        }
    }

    fn links(&self, id: u32) -> NodeLinks {
        storage_get(&self.api, &self.links_key(id))
    }

    fn node_exists(&self, id: u32) -> bool {
        id != NULL_ID && !storage_is_empty(&self.api, &self.links_key(id))
    }

    /// Number of live nodes.
    pub fn len(&self) -> u32 {
        self.info().len
    }

    /// True when the queue holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The front node id, `0` when empty.
    pub fn front_node_id(&self) -> u32 {
        self.info().front
    }

    /// The back node id, `0` when empty.
    pub fn back_node_id(&self) -> u32 {
        self.info().back
    }
}

impl<A: VmApi, T: TopEncode + TopDecode> QueueMapper<A, T> {
    /// Appends a value at the back; returns the new node's id.
    pub fn push_back(&self, value: &T) -> u32 {
        let mut info = self.info();
        let new_id = info.new + 1;
        info.new = new_id;

        if info.len == 0 {
            info.front = new_id;
            info.back = new_id;
            storage_set(&self.api, &self.links_key(new_id), &NodeLinks::default());
        } else {
            let old_back = info.back;
            let mut back_links = self.links(old_back);
            back_links.next = new_id;
            storage_set(&self.api, &self.links_key(old_back), &back_links);
            storage_set(
                &self.api,
                &self.links_key(new_id),
                &NodeLinks {
                    previous: old_back,
                    next: NULL_ID,
                },
            );
            info.back = new_id;
        }

        storage_set(&self.api, &self.value_key(new_id), value);
        info.len += 1;
        self.store_info(&info);
        new_id
    }

    /// Prepends a value at the front; returns the new node's id.
    pub fn push_front(&self, value: &T) -> u32 {
        let mut info = self.info();
        let new_id = info.new + 1;
        info.new = new_id;

        if info.len == 0 {
            info.front = new_id;
            info.back = new_id;
            storage_set(&self.api, &self.links_key(new_id), &NodeLinks::default());
        } else {
            let old_front = info.front;
            let mut front_links = self.links(old_front);
            front_links.previous = new_id;
            storage_set(&self.api, &self.links_key(old_front), &front_links);
            storage_set(
                &self.api,
                &self.links_key(new_id),
                &NodeLinks {
                    previous: NULL_ID,
                    next: old_front,
                },
            );
            info.front = new_id;
        }

        storage_set(&self.api, &self.value_key(new_id), value);
        info.len += 1;
        self.store_info(&info);
        new_id
    }

    /// The front value, if any.
    pub fn front(&self) -> Option<T> {
        match self.info().front {
            NULL_ID => None,
            id => Some(storage_get(&self.api, &self.value_key(id))),
        }
    }

    /// The back value, if any.
    pub fn back(&self) -> Option<T> {
        match self.info().back {
            NULL_ID => None,
            id => Some(storage_get(&self.api, &self.value_key(id))),
        }
    }

    /// Reads the value stored at a live node id.
    pub fn get_by_node_id(&self, id: u32) -> Option<T> {
        if self.node_exists(id) {
            Some(storage_get(&self.api, &self.value_key(id)))
        } else {
            None
        }
    }

    /// Removes and returns the front value.
    pub fn pop_front(&self) -> Option<T> {
        match self.info().front {
            NULL_ID => None,
            id => {
                let value = storage_get(&self.api, &self.value_key(id));
                self.remove_by_node_id(id);
                Some(value)
            }
        }
    }

    /// Removes and returns the back value.
    pub fn pop_back(&self) -> Option<T> {
        match self.info().back {
            NULL_ID => None,
            id => {
                let value = storage_get(&self.api, &self.value_key(id));
                self.remove_by_node_id(id);
                Some(value)
            }
        }
    }

    /// Unlinks the node with the given id, rewiring its neighbors.
    ///
    /// Removing the null id, a never-inserted id or an already-removed id
    /// is a no-op returning `false`.
    pub fn remove_by_node_id(&self, id: u32) -> bool {
        if !self.node_exists(id) {
            return false;
        }
        let links = self.links(id);
        let mut info = self.info();

        if links.previous == NULL_ID {
            info.front = links.next;
        } else {
            let mut previous_links = self.links(links.previous);
            previous_links.next = links.next;
            storage_set(&self.api, &self.links_key(links.previous), &previous_links);
        }

        if links.next == NULL_ID {
            info.back = links.previous;
        } else {
            let mut next_links = self.links(links.next);
            next_links.previous = links.previous;
            storage_set(&self.api, &self.links_key(links.next), &next_links);
        }

        storage_clear(&self.api, &self.links_key(id));
        storage_clear(&self.api, &self.value_key(id));
        info.len -= 1;
        self.store_info(&info);
        true
    }

    /// Removes every node and clears the bookkeeping record. O(n).
    pub fn clear(&self) {
        let mut id = self.info().front;
        while id != NULL_ID {
            let next = self.links(id).next;
            storage_clear(&self.api, &self.links_key(id));
            storage_clear(&self.api, &self.value_key(id));
            id = next;
        }
        storage_clear(&self.api, &self.info_key());
    }

    /// Iterates values front to back, following `next` links.
    pub fn iter(&self) -> QueueMapperIter<'_, A, T> {
        QueueMapperIter {
            mapper: self,
            current: self.info().front,
        }
    }

    /// Iterates `(node id, value)` pairs front to back.
    pub fn iter_nodes(&self) -> QueueMapperNodeIter<'_, A, T> {
        QueueMapperNodeIter {
            mapper: self,
            current: self.info().front,
        }
    }
}

/// Forward iterator over queue values.
pub struct QueueMapperIter<'a, A, T> {
    mapper: &'a QueueMapper<A, T>,
    current: u32,
}

impl<A: VmApi, T: TopEncode + TopDecode> Iterator for QueueMapperIter<'_, A, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.current == NULL_ID {
            return None;
        }
        let value = storage_get(&self.mapper.api, &self.mapper.value_key(self.current));
        self.current = self.mapper.links(self.current).next;
        Some(value)
    }
}

/// Forward iterator over `(node id, value)` pairs.
pub struct QueueMapperNodeIter<'a, A, T> {
    mapper: &'a QueueMapper<A, T>,
    current: u32,
}

impl<A: VmApi, T: TopEncode + TopDecode> Iterator for QueueMapperNodeIter<'_, A, T> {
    type Item = (u32, T);

    fn next(&mut self) -> Option<(u32, T)> {
        if self.current == NULL_ID {
            return None;
        }
        let id = self.current;
        let value = storage_get(&self.mapper.api, &self.mapper.value_key(id));
        self.current = self.mapper.links(id).next;
        Some((id, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keel_codec::{TopDecode, TopEncode};

    #[test]
    fn empty_info_decodes_from_the_empty_buffer() {
        let info = QueueInfo::top_decode(&[]).unwrap();
        assert_eq!(info, QueueInfo::default());
        assert_eq!(info.len, 0);
        assert_eq!(info.front, 0);
        assert_eq!(info.back, 0);
        assert_eq!(info.new, 0);
    }

    #[test]
    fn default_info_encodes_to_the_empty_buffer() {
        let encoded = QueueInfo::default().top_encode().unwrap();
        assert!(encoded.is_empty());
    }

    #[test]
    fn live_info_encodes_all_four_counters() {
        let info = QueueInfo {
            len: 1,
            front: 4,
            back: 4,
            new: 7,
        };
        let encoded = info.top_encode().unwrap();
        assert_eq!(encoded.len(), 16);
        assert_eq!(QueueInfo::top_decode(&encoded).unwrap(), info);
    }

    #[test]
    fn node_links_always_encode_explicitly() {
        // NodeLinks is deliberately not default_on_empty: the all-null
        // record must be distinguishable from a cleared slot.
        let encoded = NodeLinks::default().top_encode().unwrap();
        assert_eq!(encoded, [0u8; 8].to_vec());
    }
}
