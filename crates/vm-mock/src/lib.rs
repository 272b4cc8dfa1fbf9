// Path: crates/vm-mock/src/lib.rs
#![forbid(unsafe_code)]

//! # Keel Mock VM
//!
//! An in-memory implementation of the full host interface for testing
//! contracts, mappers and codec flows without a node: storage is a
//! `BTreeMap`, arguments and results are plain slot vectors, and every
//! outbound effect (transfer, log, call) is recorded for assertion.
//!
//! Host traps are modeled as panics carrying the error message, so tests
//! assert on them with `#[should_panic(expected = "...")]`. An
//! asynchronous call records itself and then unwinds, mirroring "terminates
//! the current execution".

use std::cell::RefCell;
use std::rc::Rc;

use keel_contract_sdk::api::{
    BlockchainApi, CallArgsApi, CallValueApi, CryptoApi, ErrorApi, LogApi, SendApi, StorageApi,
};
use keel_contract_sdk::types::{Address, BigUint};

mod world;

pub use world::{AsyncCallRecord, DeployRecord, LogRecord, SyncCallRecord, TransferRecord, World};

/// A shared handle onto one mock chain world.
///
/// Cloning shares the world, which is what the SDK expects of an API
/// object: every wrapper and mapper holds its own cheap copy.
#[derive(Clone, Default)]
pub struct MockVm {
    world: Rc<RefCell<World>>,
}

impl MockVm {
    /// A fresh, empty world.
    pub fn new() -> Self {
        Self::default()
    }

    // --- test setup -------------------------------------------------------

    /// Sets the caller of the next dispatched call.
    pub fn set_caller(&self, caller: Address) {
        self.world.borrow_mut().caller = caller;
    }

    /// Sets the executing contract's address.
    pub fn set_contract_address(&self, address: Address) {
        self.world.borrow_mut().contract_address = address;
    }

    /// Sets the contract owner.
    pub fn set_owner(&self, owner: Address) {
        self.world.borrow_mut().owner = owner;
    }

    /// Sets block metadata in one call.
    pub fn set_block(&self, nonce: u64, timestamp: u64, round: u64, epoch: u64) {
        let mut world = self.world.borrow_mut();
        world.block_nonce = nonce;
        world.block_timestamp = timestamp;
        world.block_round = round;
        world.block_epoch = epoch;
    }

    /// Sets an account's native balance.
    pub fn set_native_balance(&self, address: Address, amount: BigUint) {
        self.world.borrow_mut().native_balances.insert(address, amount);
    }

    /// Sets an account's balance of `token`.
    pub fn set_token_balance(&self, address: Address, token: &[u8], amount: BigUint) {
        self.world
            .borrow_mut()
            .token_balances
            .insert((address, token.to_vec()), amount);
    }

    /// Attaches native payment to the next dispatched call.
    pub fn set_call_value(&self, amount: BigUint) {
        self.world.borrow_mut().call_value = amount;
    }

    /// Attaches a token payment to the next dispatched call.
    pub fn set_token_payment(&self, token: &[u8], amount: BigUint) {
        self.world.borrow_mut().token_payment = Some((token.to_vec(), amount));
    }

    /// Removes any attached payment.
    pub fn clear_payment(&self) {
        let mut world = self.world.borrow_mut();
        world.call_value = BigUint::zero();
        world.token_payment = None;
    }

    /// Sets the argument slots of the next dispatched call.
    pub fn set_args(&self, args: Vec<Vec<u8>>) {
        let mut world = self.world.borrow_mut();
        world.args = args;
        world.results.clear();
    }

    /// Programs the result slots a synchronous call to `(to, endpoint)`
    /// will return.
    pub fn program_sync_call(&self, to: Address, endpoint: &str, results: Vec<Vec<u8>>) {
        self.world
            .borrow_mut()
            .sync_call_results
            .insert((to, endpoint.as_bytes().to_vec()), results);
    }

    /// Registers a `(key, message, signature)` triple as a valid ed25519
    /// signature.
    pub fn register_valid_signature(&self, key: &[u8], message: &[u8], signature: &[u8]) {
        self.world.borrow_mut().valid_signatures.insert((
            key.to_vec(),
            message.to_vec(),
            signature.to_vec(),
        ));
    }

    /// Seeds a raw storage slot.
    pub fn set_storage_raw(&self, key: &[u8], value: &[u8]) {
        self.world
            .borrow_mut()
            .storage
            .insert(key.to_vec(), value.to_vec());
    }

    // --- test inspection --------------------------------------------------

    /// The raw bytes currently stored under `key`.
    pub fn storage_raw(&self, key: &[u8]) -> Vec<u8> {
        self.world.borrow().storage.get(key).cloned().unwrap_or_default()
    }

    /// Number of non-empty storage slots.
    pub fn storage_slot_count(&self) -> usize {
        self.world
            .borrow()
            .storage
            .values()
            .filter(|v| !v.is_empty())
            .count()
    }

    /// Takes (and clears) the result slots produced so far.
    pub fn take_results(&self) -> Vec<Vec<u8>> {
        std::mem::take(&mut self.world.borrow_mut().results)
    }

    /// The emitted logs.
    pub fn logs(&self) -> Vec<LogRecord> {
        self.world.borrow().logs.clone()
    }

    /// The recorded outbound transfers.
    pub fn transfers(&self) -> Vec<TransferRecord> {
        self.world.borrow().transfers.clone()
    }

    /// The recorded synchronous calls.
    pub fn sync_calls(&self) -> Vec<SyncCallRecord> {
        self.world.borrow().sync_calls.clone()
    }

    /// The recorded asynchronous calls.
    pub fn async_calls(&self) -> Vec<AsyncCallRecord> {
        self.world.borrow().async_calls.clone()
    }

    /// The recorded contract deployments.
    pub fn deployments(&self) -> Vec<DeployRecord> {
        self.world.borrow().deployments.clone()
    }

    /// An account's native balance.
    pub fn native_balance_of(&self, address: &Address) -> BigUint {
        self.world
            .borrow()
            .native_balances
            .get(address)
            .cloned()
            .unwrap_or_default()
    }

    /// An account's balance of `token`.
    pub fn token_balance_of(&self, address: &Address, token: &[u8]) -> BigUint {
        self.world
            .borrow()
            .token_balances
            .get(&(*address, token.to_vec()))
            .cloned()
            .unwrap_or_default()
    }

    fn debit_native(&self, from: &Address, amount: &BigUint) {
        let balance = self.native_balance_of(from);
        match balance.checked_sub(amount) {
            Some(rest) => {
                self.world
                    .borrow_mut()
                    .native_balances
                    .insert(*from, rest);
            }
            None => self.signal_error("insufficient funds"),
        }
    }

    fn credit_native(&self, to: &Address, amount: &BigUint) {
        let balance = self.native_balance_of(to);
        self.world
            .borrow_mut()
            .native_balances
            .insert(*to, balance.checked_add(amount));
    }

    fn debit_token(&self, from: &Address, token: &[u8], amount: &BigUint) {
        let balance = self.token_balance_of(from, token);
        match balance.checked_sub(amount) {
            Some(rest) => {
                self.world
                    .borrow_mut()
                    .token_balances
                    .insert((*from, token.to_vec()), rest);
            }
            None => self.signal_error("insufficient token funds"),
        }
    }

    fn credit_token(&self, to: &Address, token: &[u8], amount: &BigUint) {
        let balance = self.token_balance_of(to, token);
        self.world
            .borrow_mut()
            .token_balances
            .insert((*to, token.to_vec()), balance.checked_add(amount));
    }
}

impl StorageApi for MockVm {
    fn storage_load(&self, key: &[u8]) -> Vec<u8> {
        let value = self
            .world
            .borrow()
            .storage
            .get(key)
            .cloned()
            .unwrap_or_default();
        tracing::debug!(key = %hex::encode(key), len = value.len(), "storage load");
        value
    }

    fn storage_store(&self, key: &[u8], value: &[u8]) {
        tracing::debug!(key = %hex::encode(key), len = value.len(), "storage store");
        let mut world = self.world.borrow_mut();
        if value.is_empty() {
            world.storage.remove(key);
        } else {
            world.storage.insert(key.to_vec(), value.to_vec());
        }
    }
}

impl CallArgsApi for MockVm {
    fn arg_count(&self) -> usize {
        self.world.borrow().args.len()
    }

    fn arg_bytes(&self, index: usize) -> Vec<u8> {
        match self.world.borrow().args.get(index) {
            Some(bytes) => bytes.clone(),
            None => panic!("argument index out of range"),
        }
    }

    fn finish(&self, bytes: &[u8]) {
        self.world.borrow_mut().results.push(bytes.to_vec());
    }
}

impl CallValueApi for MockVm {
    fn transferred_value(&self) -> Vec<u8> {
        self.world.borrow().call_value.to_bytes_be().to_vec()
    }

    fn token_payment(&self) -> Option<(Vec<u8>, Vec<u8>)> {
        self.world
            .borrow()
            .token_payment
            .as_ref()
            .map(|(token, amount)| (token.clone(), amount.to_bytes_be().to_vec()))
    }
}

impl BlockchainApi for MockVm {
    fn caller(&self) -> Address {
        self.world.borrow().caller
    }

    fn own_address(&self) -> Address {
        self.world.borrow().contract_address
    }

    fn owner(&self) -> Address {
        self.world.borrow().owner
    }

    fn block_nonce(&self) -> u64 {
        self.world.borrow().block_nonce
    }

    fn block_timestamp(&self) -> u64 {
        self.world.borrow().block_timestamp
    }

    fn block_round(&self) -> u64 {
        self.world.borrow().block_round
    }

    fn block_epoch(&self) -> u64 {
        self.world.borrow().block_epoch
    }

    fn native_balance(&self, address: &Address) -> Vec<u8> {
        self.native_balance_of(address).to_bytes_be().to_vec()
    }

    fn token_balance(&self, address: &Address, token: &[u8]) -> Vec<u8> {
        self.token_balance_of(address, token).to_bytes_be().to_vec()
    }
}

impl SendApi for MockVm {
    fn transfer_native(&self, to: &Address, amount: &[u8]) {
        let amount = BigUint::from_bytes_be(amount);
        let own = self.own_address();
        self.debit_native(&own, &amount);
        self.credit_native(to, &amount);
        self.world.borrow_mut().transfers.push(TransferRecord {
            to: *to,
            token: None,
            amount,
        });
    }

    fn transfer_token(&self, to: &Address, token: &[u8], amount: &[u8]) {
        let amount = BigUint::from_bytes_be(amount);
        let own = self.own_address();
        self.debit_token(&own, token, &amount);
        self.credit_token(to, token, &amount);
        self.world.borrow_mut().transfers.push(TransferRecord {
            to: *to,
            token: Some(token.to_vec()),
            amount,
        });
    }

    fn mint_token(&self, token: &[u8], amount: &[u8]) {
        let amount = BigUint::from_bytes_be(amount);
        let own = self.own_address();
        self.credit_token(&own, token, &amount);
    }

    fn burn_token(&self, token: &[u8], amount: &[u8]) {
        let amount = BigUint::from_bytes_be(amount);
        let own = self.own_address();
        self.debit_token(&own, token, &amount);
    }

    fn execute_on_dest(
        &self,
        to: &Address,
        value: &[u8],
        endpoint: &[u8],
        args: &[Vec<u8>],
    ) -> Vec<Vec<u8>> {
        tracing::debug!(
            endpoint = %String::from_utf8_lossy(endpoint),
            "synchronous cross-contract call"
        );
        self.world.borrow_mut().sync_calls.push(SyncCallRecord {
            to: *to,
            value: BigUint::from_bytes_be(value),
            endpoint: endpoint.to_vec(),
            args: args.to_vec(),
        });
        self.world
            .borrow()
            .sync_call_results
            .get(&(*to, endpoint.to_vec()))
            .cloned()
            .unwrap_or_default()
    }

    fn deploy_contract(&self, code: &[u8], value: &[u8], args: &[Vec<u8>]) -> Address {
        // deterministic, collision-free mock addresses: 0xDE prefix + index
        let index = self.world.borrow().deployments.len() as u8;
        let mut bytes = [0xDEu8; 32];
        bytes[31] = index + 1;
        let address = Address::new(bytes);
        self.world.borrow_mut().deployments.push(DeployRecord {
            address,
            code: code.to_vec(),
            value: BigUint::from_bytes_be(value),
            args: args.to_vec(),
        });
        address
    }

    fn async_call(&self, to: &Address, value: &[u8], endpoint: &[u8], args: &[Vec<u8>]) -> ! {
        self.world.borrow_mut().async_calls.push(AsyncCallRecord {
            to: *to,
            value: BigUint::from_bytes_be(value),
            endpoint: endpoint.to_vec(),
            args: args.to_vec(),
        });
        // the real host never returns control after dispatching
        panic!(
            "async call dispatched: {}",
            String::from_utf8_lossy(endpoint)
        );
    }
}

impl LogApi for MockVm {
    fn write_log(&self, topics: &[Vec<u8>], data: &[u8]) {
        self.world.borrow_mut().logs.push(LogRecord {
            topics: topics.to_vec(),
            data: data.to_vec(),
        });
    }
}

impl CryptoApi for MockVm {
    fn verify_ed25519(&self, key: &[u8], message: &[u8], signature: &[u8]) -> bool {
        self.world.borrow().valid_signatures.contains(&(
            key.to_vec(),
            message.to_vec(),
            signature.to_vec(),
        ))
    }
}

impl ErrorApi for MockVm {
    fn signal_error(&self, message: &str) -> ! {
        panic!("{message}")
    }
}
