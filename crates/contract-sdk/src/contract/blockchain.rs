// Path: crates/contract-sdk/src/contract/blockchain.rs
//! Typed view over the blockchain metadata primitives.

use crate::api::VmApi;
use crate::types::{Address, BigUint, TokenIdentifier};

/// Block, transaction and account metadata, decoded into SDK types.
#[derive(Clone)]
pub struct BlockchainWrapper<A> {
    api: A,
}

impl<A: VmApi> BlockchainWrapper<A> {
    pub(super) fn new(api: A) -> Self {
        Self { api }
    }

    /// The account that triggered the current call.
    pub fn caller(&self) -> Address {
        self.api.caller()
    }

    /// The executing contract's own address.
    pub fn own_address(&self) -> Address {
        self.api.own_address()
    }

    /// The contract owner.
    pub fn owner(&self) -> Address {
        self.api.owner()
    }

    /// Height of the block being built.
    pub fn block_nonce(&self) -> u64 {
        self.api.block_nonce()
    }

    /// Timestamp of the block being built, in seconds.
    pub fn block_timestamp(&self) -> u64 {
        self.api.block_timestamp()
    }

    /// Consensus round of the block being built.
    pub fn block_round(&self) -> u64 {
        self.api.block_round()
    }

    /// Epoch of the block being built.
    pub fn block_epoch(&self) -> u64 {
        self.api.block_epoch()
    }

    /// Native-coin balance of `address`.
    pub fn native_balance(&self, address: &Address) -> BigUint {
        BigUint::from_bytes_be(&self.api.native_balance(address))
    }

    /// `token` balance of `address`.
    pub fn token_balance(&self, address: &Address, token: &TokenIdentifier) -> BigUint {
        BigUint::from_bytes_be(&self.api.token_balance(address, token.as_bytes()))
    }
}
