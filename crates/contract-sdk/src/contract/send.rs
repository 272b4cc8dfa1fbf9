// Path: crates/contract-sdk/src/contract/send.rs
//! Typed view over the outbound transfer and call primitives.

use alloc::vec::Vec;

use crate::api::VmApi;
use crate::types::{Address, BigUint, TokenIdentifier};

use super::ArgBuffer;

/// Outbound transfers, token builtins and cross-contract calls.
#[derive(Clone)]
pub struct SendWrapper<A> {
    api: A,
}

impl<A: VmApi> SendWrapper<A> {
    pub(super) fn new(api: A) -> Self {
        Self { api }
    }

    /// Transfers native coin from the contract to `to`.
    pub fn direct(&self, to: &Address, amount: &BigUint) {
        self.api.transfer_native(to, amount.to_bytes_be());
    }

    /// Transfers a token from the contract to `to`.
    pub fn direct_token(&self, to: &Address, token: &TokenIdentifier, amount: &BigUint) {
        self.api
            .transfer_token(to, token.as_bytes(), amount.to_bytes_be());
    }

    /// Mints `amount` of `token` into the contract's balance.
    pub fn mint(&self, token: &TokenIdentifier, amount: &BigUint) {
        self.api.mint_token(token.as_bytes(), amount.to_bytes_be());
    }

    /// Burns `amount` of `token` from the contract's balance.
    pub fn burn(&self, token: &TokenIdentifier, amount: &BigUint) {
        self.api.burn_token(token.as_bytes(), amount.to_bytes_be());
    }

    /// Synchronously executes `endpoint` on `to`, returning the callee's
    /// raw result slots.
    pub fn execute_on_dest(
        &self,
        to: &Address,
        value: &BigUint,
        endpoint: &str,
        args: &ArgBuffer,
    ) -> Vec<Vec<u8>> {
        self.api.execute_on_dest(
            to,
            value.to_bytes_be(),
            endpoint.as_bytes(),
            args.as_slots(),
        )
    }

    /// Deploys a new contract, returning its address.
    pub fn deploy_contract(&self, code: &[u8], value: &BigUint, args: &ArgBuffer) -> Address {
        self.api
            .deploy_contract(code, value.to_bytes_be(), args.as_slots())
    }

    /// Dispatches an asynchronous call and terminates this execution.
    ///
    /// Control never returns; the callback later runs as a fresh
    /// invocation, so persist any state it needs *before* calling this.
    pub fn async_call(
        &self,
        to: &Address,
        value: &BigUint,
        endpoint: &str,
        args: &ArgBuffer,
    ) -> ! {
        self.api.async_call(
            to,
            value.to_bytes_be(),
            endpoint.as_bytes(),
            args.as_slots(),
        )
    }
}
