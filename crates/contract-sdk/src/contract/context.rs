// Path: crates/contract-sdk/src/contract/context.rs
//! The per-invocation context object.

use alloc::format;
use alloc::vec::Vec;

use keel_codec::{NestedEncode, TopDecode, TopEncodeMulti};

use crate::api::VmApi;
use crate::storage::{StorageKey, StorageMapper};

use super::args::{EndpointArgLoader, FinishMultiOutput};
use super::{BlockchainWrapper, CallValueWrapper, SendWrapper};

/// The single object through which a contract reaches the host: wrapper
/// construction, typed argument/result access, storage mapper construction,
/// `require`-style guards and event emission.
///
/// One context is built per invocation and passed (by reference) wherever
/// host access is needed; nothing outlives the call frame and nothing is
/// process-global.
#[derive(Clone)]
pub struct ContractContext<A> {
    api: A,
}

impl<A: VmApi> ContractContext<A> {
    /// Wraps a host API instance.
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// The underlying API handle.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Blockchain metadata view.
    pub fn blockchain(&self) -> BlockchainWrapper<A> {
        BlockchainWrapper::new(self.api.clone())
    }

    /// Attached-payment view.
    pub fn call_value(&self) -> CallValueWrapper<A> {
        CallValueWrapper::new(self.api.clone())
    }

    /// Outbound transfer/call view.
    pub fn send(&self) -> SendWrapper<A> {
        SendWrapper::new(self.api.clone())
    }

    /// Constructs a storage mapper rooted at `base_key`.
    pub fn storage<M: StorageMapper<A>>(&self, base_key: &[u8]) -> M {
        M::new(self.api.clone(), StorageKey::new(base_key))
    }

    /// Constructs a storage mapper rooted at a pre-built key (base name
    /// plus argument segments).
    pub fn storage_at<M: StorageMapper<A>>(&self, key: StorageKey) -> M {
        M::new(self.api.clone(), key)
    }

    /// Aborts the call with `message` when `condition` is false.
    ///
    /// This is the only sanctioned guard for logical preconditions; it is
    /// not recoverable, and the chain reverts every prior storage write of
    /// the aborted call.
    pub fn require(&self, condition: bool, message: &str) {
        if !condition {
            self.api.signal_error(message);
        }
    }

    /// Aborts the call unconditionally.
    pub fn signal_error(&self, message: &str) -> ! {
        self.api.signal_error(message)
    }

    /// Guard: the caller must be the contract owner.
    pub fn require_caller_is_owner(&self) {
        self.require(
            self.api.caller() == self.api.owner(),
            "caller is not the contract owner",
        );
    }

    /// Guard: the call must carry no payment. Applied by the dispatcher to
    /// every endpoint not marked payable.
    pub fn deny_payment(&self) {
        self.require(self.call_value().is_unpaid(), "endpoint is not payable");
    }

    /// Decodes argument slot `index` as `T`, aborting the call on malformed
    /// input.
    pub fn arg<T: TopDecode>(&self, index: usize) -> T {
        let raw = self.api.arg_bytes(index);
        match T::top_decode(&raw) {
            Ok(value) => value,
            Err(err) => self
                .api
                .signal_error(&format!("argument decode error: {err}")),
        }
    }

    /// Number of argument slots supplied by the caller.
    pub fn arg_count(&self) -> usize {
        self.api.arg_count()
    }

    /// A typed walker over all argument slots.
    pub fn arg_loader(&self) -> EndpointArgLoader<A> {
        EndpointArgLoader::new(self.api.clone())
    }

    /// Encodes `value` into the call's result slots.
    pub fn finish_multi<T: TopEncodeMulti>(&self, value: &T) {
        FinishMultiOutput::new(self.api.clone()).finish(value);
    }

    /// Nested-encodes a value into one event topic.
    pub fn topic<T: NestedEncode>(&self, value: &T) -> Vec<u8> {
        let mut bytes = Vec::new();
        if let Err(err) = value.dep_encode(&mut bytes) {
            self.api.signal_error(&format!("topic encode error: {err}"));
        }
        bytes
    }

    /// Emits an event: the name becomes the first topic.
    pub fn emit_event(&self, name: &str, topics: &[Vec<u8>], data: &[u8]) {
        let mut all_topics = Vec::with_capacity(topics.len() + 1);
        all_topics.push(name.as_bytes().to_vec());
        all_topics.extend_from_slice(topics);
        self.api.write_log(&all_topics, data);
    }
}
