// Path: crates/contract-sdk/src/api/call.rs
//! Call-frame primitives: argument retrieval, result slots, attached
//! payment, and outbound call dispatch.

use alloc::vec::Vec;

use crate::types::Address;

/// Access to the current call's argument and result slots.
pub trait CallArgsApi {
    /// Number of argument slots the caller supplied.
    fn arg_count(&self) -> usize;

    /// The raw bytes of argument slot `index`. Out-of-range indices trap.
    fn arg_bytes(&self, index: usize) -> Vec<u8>;

    /// Appends one result slot to the call's output.
    fn finish(&self, bytes: &[u8]);
}

/// Access to the payment attached to the current call.
pub trait CallValueApi {
    /// The attached native-coin amount, as a minimal big-endian magnitude
    /// (empty when nothing was attached).
    fn transferred_value(&self) -> Vec<u8>;

    /// The attached token payment, if any: `(token identifier bytes,
    /// minimal big-endian amount)`.
    fn token_payment(&self) -> Option<(Vec<u8>, Vec<u8>)>;
}

/// Outbound transfers, token builtins and cross-contract calls.
///
/// The synchronous variant returns the callee's result slots into the
/// current execution. The asynchronous variant *terminates* the current
/// execution: control never returns, and the callback later runs as a fresh
/// invocation, so any state the callback needs must already be persisted.
pub trait SendApi {
    /// Transfers native coin from the contract to `to`.
    fn transfer_native(&self, to: &Address, amount: &[u8]);

    /// Transfers `token` from the contract to `to` via the builtin transfer
    /// function.
    fn transfer_token(&self, to: &Address, token: &[u8], amount: &[u8]);

    /// Mints `amount` of `token` into the contract's balance.
    fn mint_token(&self, token: &[u8], amount: &[u8]);

    /// Burns `amount` of `token` from the contract's balance.
    fn burn_token(&self, token: &[u8], amount: &[u8]);

    /// Synchronously executes `endpoint` on the contract at `to`, returning
    /// its result slots.
    fn execute_on_dest(
        &self,
        to: &Address,
        value: &[u8],
        endpoint: &[u8],
        args: &[Vec<u8>],
    ) -> Vec<Vec<u8>>;

    /// Dispatches an asynchronous call and terminates this execution.
    fn async_call(&self, to: &Address, value: &[u8], endpoint: &[u8], args: &[Vec<u8>]) -> !;

    /// Deploys a new contract from `code`, returning its address.
    fn deploy_contract(&self, code: &[u8], value: &[u8], args: &[Vec<u8>]) -> Address;
}
