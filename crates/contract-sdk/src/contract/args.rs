// Path: crates/contract-sdk/src/contract/args.rs
//! Typed access to the call's argument and result slots.

use alloc::format;
use alloc::vec::Vec;

use keel_codec::{
    DecodeError, TopDecodeMulti, TopDecodeMultiInput, TopEncodeMulti, TopEncodeMultiOutput,
};

use crate::api::VmApi;

/// Walks the call's argument slots in order, decoding typed parameters.
///
/// Implements [`TopDecodeMultiInput`], so plain values consume one slot
/// while `OptionalValue` / `MultiValueN` / `MultiValueEncoded` apply their
/// own slot arithmetic. Any decode failure aborts the call.
pub struct EndpointArgLoader<A> {
    api: A,
    next: usize,
    count: usize,
}

impl<A: VmApi> EndpointArgLoader<A> {
    /// Creates a loader positioned at the first argument.
    pub fn new(api: A) -> Self {
        let count = api.arg_count();
        Self {
            api,
            next: 0,
            count,
        }
    }

    /// Decodes the next parameter, aborting the call on malformed input or
    /// a missing argument.
    pub fn next_arg<T: TopDecodeMulti>(&mut self) -> T {
        match T::multi_decode(self) {
            Ok(value) => value,
            Err(err) => self
                .api
                .signal_error(&format!("argument decode error: {err}")),
        }
    }

    /// Aborts the call if any argument slot was left unconsumed.
    pub fn assert_depleted(&self) {
        if self.has_next() {
            self.api.signal_error("too many arguments");
        }
    }
}

impl<A: VmApi> TopDecodeMultiInput for EndpointArgLoader<A> {
    fn has_next(&self) -> bool {
        self.next < self.count
    }

    fn next_arg_raw(&mut self) -> Result<Vec<u8>, DecodeError> {
        if !self.has_next() {
            return Err(DecodeError::MultiTooFewArguments);
        }
        let bytes = self.api.arg_bytes(self.next);
        self.next += 1;
        Ok(bytes)
    }
}

/// Routes encoded result slots into the host's finish primitive.
pub struct FinishMultiOutput<A> {
    api: A,
}

impl<A: VmApi> FinishMultiOutput<A> {
    /// Creates an output writing through `api`.
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// Encodes `value` into however many result slots it occupies.
    pub fn finish<T: TopEncodeMulti>(&mut self, value: &T) {
        if let Err(err) = value.multi_encode(self) {
            self.api
                .signal_error(&format!("result encode error: {err}"));
        }
    }
}

impl<A: VmApi> TopEncodeMultiOutput for FinishMultiOutput<A> {
    fn push_arg_raw(&mut self, bytes: Vec<u8>) {
        self.api.finish(&bytes);
    }
}
