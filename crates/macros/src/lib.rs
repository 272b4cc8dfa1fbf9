// Path: crates/macros/src/lib.rs
//! Procedural macros for the Keel contract SDK.
//!
//! Two families live here:
//!
//! - derives for the codec traits (`NestedEncode`, `NestedDecode`,
//!   `TopEncode`, `TopDecode`, `TypeAbi`) on structs and fieldless enums,
//!   including the `#[codec(default_on_empty)]` top-level policy;
//! - the `#[keel_contract]` attribute, which turns an impl block with
//!   `#[init]`/`#[endpoint]`/`#[view]` methods into an endpoint dispatcher
//!   plus an ABI description.

use proc_macro::TokenStream;

mod codec_derive;
mod contract;

/// Derives the self-delimiting nested encoding: field-by-field concatenation
/// for structs, a single discriminant byte for fieldless enums.
#[proc_macro_derive(NestedEncode, attributes(codec))]
pub fn derive_nested_encode(input: TokenStream) -> TokenStream {
    codec_derive::nested_encode(input)
}

/// Derives the inverse of [`macro@NestedEncode`].
#[proc_macro_derive(NestedDecode, attributes(codec))]
pub fn derive_nested_decode(input: TokenStream) -> TokenStream {
    codec_derive::nested_decode(input)
}

/// Derives the standalone top-level encoding. With
/// `#[codec(default_on_empty)]` on a struct, a value equal to
/// `Self::default()` encodes to the empty buffer.
#[proc_macro_derive(TopEncode, attributes(codec))]
pub fn derive_top_encode(input: TokenStream) -> TokenStream {
    codec_derive::top_encode(input)
}

/// Derives the inverse of [`macro@TopEncode`]. With
/// `#[codec(default_on_empty)]` on a struct, the empty buffer decodes to
/// `Self::default()` without running any field decoder.
#[proc_macro_derive(TopDecode, attributes(codec))]
pub fn derive_top_decode(input: TokenStream) -> TokenStream {
    codec_derive::top_decode(input)
}

/// Derives `TypeAbi` with the type's own name as its ABI name.
#[proc_macro_derive(TypeAbi)]
pub fn derive_type_abi(input: TokenStream) -> TokenStream {
    codec_derive::type_abi(input)
}

/// Turns an impl block into a contract module.
///
/// Methods tagged `#[init]`, `#[endpoint]` or `#[view]` (with optional
/// `#[payable]` and `#[only_owner]` markers) become arms of a generated
/// `dispatch(&self, endpoint: &str) -> bool` method: arguments are decoded
/// from the call's argument slots, the method is invoked, and its return
/// value is encoded into the call's result slots. A `contract_abi()`
/// constructor describing every endpoint is generated alongside.
///
/// The impl block's type must expose
/// `fn context(&self) -> &ContractContext<A>`; the generated code routes all
/// host access through it.
#[proc_macro_attribute]
pub fn keel_contract(args: TokenStream, input: TokenStream) -> TokenStream {
    contract::expand(args, input)
}
