// Path: crates/contract-sdk/src/api/blockchain.rs
//! Block, transaction and account metadata getters.

use alloc::vec::Vec;

use crate::types::Address;

/// Read-only chain context for the current invocation.
pub trait BlockchainApi {
    /// The account that signed/triggered the current call.
    fn caller(&self) -> Address;

    /// The address of the executing contract.
    fn own_address(&self) -> Address;

    /// The owner of the executing contract.
    fn owner(&self) -> Address;

    /// Height of the block being built.
    fn block_nonce(&self) -> u64;

    /// Timestamp of the block being built, in seconds.
    fn block_timestamp(&self) -> u64;

    /// Consensus round of the block being built.
    fn block_round(&self) -> u64;

    /// Epoch of the block being built.
    fn block_epoch(&self) -> u64;

    /// Native-coin balance of `address`, as a minimal big-endian magnitude.
    fn native_balance(&self, address: &Address) -> Vec<u8>;

    /// Balance of `token` held by `address`, as a minimal big-endian
    /// magnitude.
    fn token_balance(&self, address: &Address, token: &[u8]) -> Vec<u8>;
}
