// Path: crates/contract-sdk/src/api/misc.rs
//! Logging, signature verification and the error primitive.

use alloc::vec::Vec;

/// Event log emission.
pub trait LogApi {
    /// Writes one log entry with its topic list and data payload.
    fn write_log(&self, topics: &[Vec<u8>], data: &[u8]);
}

/// Host-side signature verification.
pub trait CryptoApi {
    /// Verifies an ed25519 signature.
    fn verify_ed25519(&self, key: &[u8], message: &[u8], signature: &[u8]) -> bool;
}

/// The error primitive: aborts the whole call.
///
/// There is no recovery path. The message becomes visible off-chain; every
/// storage write of the aborted call is rolled back by the node.
pub trait ErrorApi {
    /// Signals a fatal error and never returns.
    fn signal_error(&self, message: &str) -> !;
}
