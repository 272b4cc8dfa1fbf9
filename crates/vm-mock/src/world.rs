// Path: crates/vm-mock/src/world.rs
//! The mock chain world: everything a single invocation can observe or
//! mutate.

use std::collections::{BTreeMap, BTreeSet};

use keel_contract_sdk::types::{Address, BigUint};

/// One emitted log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// Topic list; the first topic is the event name by SDK convention.
    pub topics: Vec<Vec<u8>>,
    /// Data payload.
    pub data: Vec<u8>,
}

/// One outbound transfer issued through the send primitives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRecord {
    /// Recipient.
    pub to: Address,
    /// `None` for native coin, `Some(token bytes)` for a token transfer.
    pub token: Option<Vec<u8>>,
    /// Amount moved.
    pub amount: BigUint,
}

/// One synchronous cross-contract call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncCallRecord {
    /// Callee.
    pub to: Address,
    /// Attached native value.
    pub value: BigUint,
    /// Endpoint name bytes.
    pub endpoint: Vec<u8>,
    /// Argument slots.
    pub args: Vec<Vec<u8>>,
}

/// One asynchronous call, recorded just before the execution terminates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsyncCallRecord {
    /// Callee.
    pub to: Address,
    /// Attached native value.
    pub value: BigUint,
    /// Endpoint name bytes.
    pub endpoint: Vec<u8>,
    /// Argument slots.
    pub args: Vec<Vec<u8>>,
}

/// One contract deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployRecord {
    /// Address assigned to the new contract.
    pub address: Address,
    /// Deployed code bytes.
    pub code: Vec<u8>,
    /// Attached native value.
    pub value: BigUint,
    /// Constructor argument slots.
    pub args: Vec<Vec<u8>>,
}

/// The in-memory chain state behind a [`crate::MockVm`].
#[derive(Debug, Default)]
pub struct World {
    pub(crate) storage: BTreeMap<Vec<u8>, Vec<u8>>,
    pub(crate) args: Vec<Vec<u8>>,
    pub(crate) results: Vec<Vec<u8>>,

    pub(crate) caller: Address,
    pub(crate) contract_address: Address,
    pub(crate) owner: Address,

    pub(crate) block_nonce: u64,
    pub(crate) block_timestamp: u64,
    pub(crate) block_round: u64,
    pub(crate) block_epoch: u64,

    pub(crate) native_balances: BTreeMap<Address, BigUint>,
    pub(crate) token_balances: BTreeMap<(Address, Vec<u8>), BigUint>,
    pub(crate) call_value: BigUint,
    pub(crate) token_payment: Option<(Vec<u8>, BigUint)>,

    pub(crate) logs: Vec<LogRecord>,
    pub(crate) transfers: Vec<TransferRecord>,
    pub(crate) sync_calls: Vec<SyncCallRecord>,
    pub(crate) async_calls: Vec<AsyncCallRecord>,
    /// Preprogrammed result slots for synchronous calls, keyed by
    /// `(callee, endpoint bytes)`.
    pub(crate) sync_call_results: BTreeMap<(Address, Vec<u8>), Vec<Vec<u8>>>,
    pub(crate) deployments: Vec<DeployRecord>,
    /// `(key, message, signature)` triples the mock treats as valid.
    pub(crate) valid_signatures: BTreeSet<(Vec<u8>, Vec<u8>, Vec<u8>)>,
}
