// Path: crates/macros/src/contract.rs
//! Expansion of the `#[keel_contract]` attribute.
//!
//! The generated `dispatch` method is the runtime face of the contract: it
//! matches on the called endpoint name, decodes the declared arguments from
//! the call's argument slots, runs the ownership/payment guards, invokes the
//! user method and encodes its return value into the result slots. The
//! generated `contract_abi` constructor describes the same endpoints for the
//! ABI artifact.

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, FnArg, ImplItem, ItemImpl, LitStr, Pat, ReturnType, Type};

/// How a method is exposed.
#[derive(Clone, Copy, PartialEq)]
enum EndpointKind {
    Init,
    Endpoint,
    View,
}

struct EndpointMethod {
    kind: EndpointKind,
    exported_name: String,
    method_ident: syn::Ident,
    payable: bool,
    only_owner: bool,
    inputs: Vec<(String, Type)>,
    output: Option<Type>,
}

/// Extracts and removes the endpoint marker attributes from a method,
/// returning its exposure description if any marker was present.
fn extract_endpoint(method: &mut syn::ImplItemFn) -> syn::Result<Option<EndpointMethod>> {
    let mut kind = None;
    let mut exported_name = None;
    let mut payable = false;
    let mut only_owner = false;

    let mut parse_error = None;
    method.attrs.retain(|attr| {
        let path = attr.path();
        let matched_kind = if path.is_ident("init") {
            Some(EndpointKind::Init)
        } else if path.is_ident("endpoint") {
            Some(EndpointKind::Endpoint)
        } else if path.is_ident("view") {
            Some(EndpointKind::View)
        } else {
            None
        };

        if let Some(k) = matched_kind {
            kind = Some(k);
            // An optional string literal renames the exported endpoint.
            if !matches!(attr.meta, syn::Meta::Path(_)) {
                match attr.parse_args::<LitStr>() {
                    Ok(lit) => exported_name = Some(lit.value()),
                    Err(err) => parse_error = Some(err),
                }
            }
            return false;
        }
        if path.is_ident("payable") {
            payable = true;
            return false;
        }
        if path.is_ident("only_owner") {
            only_owner = true;
            return false;
        }
        true
    });
    if let Some(err) = parse_error {
        return Err(err);
    }

    let Some(kind) = kind else {
        return Ok(None);
    };

    let exported_name = match kind {
        EndpointKind::Init => "init".to_string(),
        _ => exported_name.unwrap_or_else(|| method.sig.ident.to_string()),
    };

    let mut inputs = Vec::new();
    for (index, arg) in method.sig.inputs.iter().enumerate() {
        match arg {
            FnArg::Receiver(_) => {}
            FnArg::Typed(pat_type) => {
                let name = match pat_type.pat.as_ref() {
                    Pat::Ident(pat_ident) => pat_ident.ident.to_string(),
                    _ => format!("arg{index}"),
                };
                inputs.push((name, (*pat_type.ty).clone()));
            }
        }
    }

    let output = match &method.sig.output {
        ReturnType::Default => None,
        ReturnType::Type(_, ty) => Some((**ty).clone()),
    };

    Ok(Some(EndpointMethod {
        kind,
        exported_name,
        method_ident: method.sig.ident.clone(),
        payable,
        only_owner,
        inputs,
        output,
    }))
}

pub fn expand(_args: TokenStream, input: TokenStream) -> TokenStream {
    let mut item_impl = parse_macro_input!(input as ItemImpl);
    let self_ty = item_impl.self_ty.clone();
    let (impl_generics, _ty_generics, where_clause) = item_impl.generics.split_for_impl();

    let contract_name = match self_ty.as_ref() {
        Type::Path(type_path) => type_path
            .path
            .segments
            .last()
            .map(|segment| segment.ident.to_string())
            .unwrap_or_else(|| "contract".to_string()),
        _ => "contract".to_string(),
    };

    let mut endpoints = Vec::new();
    for item in &mut item_impl.items {
        if let ImplItem::Fn(method) = item {
            match extract_endpoint(method) {
                Ok(Some(endpoint)) => endpoints.push(endpoint),
                Ok(None) => {}
                Err(err) => return err.to_compile_error().into(),
            }
        }
    }

    let mut match_arms = Vec::new();
    let mut abi_entries = Vec::new();

    for endpoint in &endpoints {
        let name = &endpoint.exported_name;
        let method_ident = &endpoint.method_ident;

        let owner_guard = if endpoint.only_owner {
            quote! { __ctx.require_caller_is_owner(); }
        } else {
            quote! {}
        };
        let payment_guard = if endpoint.payable {
            quote! {}
        } else {
            quote! { __ctx.deny_payment(); }
        };

        let arg_idents: Vec<syn::Ident> = endpoint
            .inputs
            .iter()
            .map(|(arg_name, _)| quote::format_ident!("__arg_{}", arg_name))
            .collect();
        let arg_loads = endpoint.inputs.iter().zip(&arg_idents).map(|((_, ty), ident)| {
            quote! { let #ident: #ty = __loader.next_arg(); }
        });

        let call_and_finish = if endpoint.output.is_some() {
            quote! {
                let __result = self.#method_ident(#(#arg_idents),*);
                __ctx.finish_multi(&__result);
            }
        } else {
            quote! { self.#method_ident(#(#arg_idents),*); }
        };

        match_arms.push(quote! {
            #name => {
                let __ctx = self.context();
                #owner_guard
                #payment_guard
                #[allow(unused_mut)]
                let mut __loader = __ctx.arg_loader();
                #(#arg_loads)*
                __loader.assert_depleted();
                #call_and_finish
                true
            }
        });

        let mutability = match endpoint.kind {
            EndpointKind::View => quote! { keel_abi::EndpointMutability::Readonly },
            _ => quote! { keel_abi::EndpointMutability::Mutable },
        };
        let flag_payable = if endpoint.payable {
            quote! { __endpoint.flags |= keel_abi::EndpointFlags::PAYABLE; }
        } else {
            quote! {}
        };
        let flag_only_owner = if endpoint.only_owner {
            quote! { __endpoint.flags |= keel_abi::EndpointFlags::ONLY_OWNER; }
        } else {
            quote! {}
        };
        let add_inputs = endpoint.inputs.iter().map(|(arg_name, ty)| {
            quote! {
                __endpoint.add_input(
                    #arg_name,
                    <#ty as keel_codec::TypeAbi>::type_name(),
                    <#ty as keel_codec::TypeAbi>::IS_VARIADIC,
                );
            }
        });
        let add_output = endpoint.output.as_ref().map(|ty| {
            quote! {
                __endpoint.add_output(
                    <#ty as keel_codec::TypeAbi>::type_name(),
                    <#ty as keel_codec::TypeAbi>::IS_VARIADIC,
                );
            }
        });
        let register = match endpoint.kind {
            EndpointKind::Init => quote! { __abi.set_constructor(__endpoint); },
            _ => quote! { __abi.add_endpoint(__endpoint); },
        };
        abi_entries.push(quote! {
            {
                let mut __endpoint = keel_abi::EndpointAbi::new(#name, #mutability);
                #flag_payable
                #flag_only_owner
                #(#add_inputs)*
                #add_output
                #register
            }
        });
    }

    let generated = quote! {
        impl #impl_generics #self_ty #where_clause {
            /// Routes a call to the endpoint named `endpoint`.
            ///
            /// Returns `false` when no endpoint with that name exists;
            /// malformed arguments and failed guards abort the call through
            /// the host error primitive.
            pub fn dispatch(&self, endpoint: &str) -> bool {
                match endpoint {
                    #(#match_arms)*
                    _ => false,
                }
            }

            /// Builds the ABI description of this contract's endpoints.
            pub fn contract_abi() -> keel_abi::ContractAbi {
                let mut __abi = keel_abi::ContractAbi::new(#contract_name);
                #(#abi_entries)*
                __abi
            }
        }
    };

    let output = quote! {
        #item_impl
        #generated
    };
    output.into()
}
