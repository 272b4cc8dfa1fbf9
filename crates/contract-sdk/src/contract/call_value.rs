// Path: crates/contract-sdk/src/contract/call_value.rs
//! Typed view over the attached-payment primitives.

use crate::api::VmApi;
use crate::types::{BigUint, TokenIdentifier};

/// The payment attached to the current call.
#[derive(Clone)]
pub struct CallValueWrapper<A> {
    api: A,
}

impl<A: VmApi> CallValueWrapper<A> {
    pub(super) fn new(api: A) -> Self {
        Self { api }
    }

    /// The attached native-coin amount (zero when nothing was attached).
    pub fn native_value(&self) -> BigUint {
        BigUint::from_bytes_be(&self.api.transferred_value())
    }

    /// The attached token payment, if any.
    pub fn token_payment(&self) -> Option<(TokenIdentifier, BigUint)> {
        self.api.token_payment().map(|(token, amount)| {
            (
                TokenIdentifier::from_bytes(&token),
                BigUint::from_bytes_be(&amount),
            )
        })
    }

    /// True when neither native coin nor a token was attached.
    pub fn is_unpaid(&self) -> bool {
        self.native_value().is_zero() && self.api.token_payment().is_none()
    }
}
