// Path: crates/contract-sdk/src/storage/mod.rs
//! The storage-mapper layer: persistent arrays, queues, sets and maps built
//! over the chain's flat key-value store.
//!
//! There is no schema or catalog on chain. All structure is expressed
//! through deterministic key naming: a mapper owns a base key and derives
//! per-entry keys by appending ASCII suffixes (`.len`, `.item`, `.info`,
//! `.node_links`, `.value`, `.index`, `.node_id`, `.mapped`) and
//! nested-encoded segments (indices, node ids, element keys). Mappers are
//! constructed transiently per access -- only the bytes persist -- and every
//! operation re-reads storage fresh.
//!
//! Storage failures do not exist at this layer: the host either succeeds or
//! traps the whole call. The mappers therefore never return `Result`;
//! malformed stored bytes (which can only follow a key collision or an
//! outside writer) abort the call through the error primitive.

mod key;
mod map_mapper;
mod mapper;
mod queue_mapper;
mod set_mapper;
mod single_value;
mod unordered_set_mapper;
mod user_mapper;
mod vec_mapper;

pub use key::StorageKey;
pub use map_mapper::{Entry, MapMapper, OccupiedEntry, VacantEntry};
pub use mapper::StorageMapper;
pub use queue_mapper::{QueueInfo, QueueMapper, QueueMapperIter, QueueMapperNodeIter};
pub use set_mapper::SetMapper;
pub use single_value::SingleValueMapper;
pub use unordered_set_mapper::UnorderedSetMapper;
pub use user_mapper::UserMapper;
pub use vec_mapper::{VecMapper, VecMapperIter};
