// Path: crates/macros/src/codec_derive.rs
//! Derive implementations for the codec traits.
//!
//! Structs encode as the concatenation of their fields' nested encodings in
//! declaration order, with no tag and no field count; decoding is
//! schema-driven by the declared field sequence. Fieldless enums encode as a
//! single discriminant byte, validated against the variant count on decode.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, GenericParam, Generics, Index};

/// Adds a `keel_codec` trait bound to every type parameter, mirroring the
/// standard-derive convention.
fn add_trait_bounds(mut generics: Generics, bound: TokenStream2) -> Generics {
    for param in &mut generics.params {
        if let GenericParam::Type(type_param) = param {
            type_param
                .bounds
                .push(syn::parse2(bound.clone()).expect("internal: malformed trait bound"));
        }
    }
    generics
}

/// True when the item carries `#[codec(default_on_empty)]`.
fn has_default_on_empty(input: &DeriveInput) -> bool {
    input.attrs.iter().any(|attr| {
        if !attr.path().is_ident("codec") {
            return false;
        }
        matches!(
            attr.parse_args::<syn::Ident>(),
            Ok(ident) if ident == "default_on_empty"
        )
    })
}

/// Per-field accessor expressions (`self.name` / `self.0`) plus the struct
/// constructor shape.
enum StructShape {
    Named(Vec<syn::Ident>),
    Tuple(usize),
    Unit,
}

fn struct_shape(fields: &Fields) -> StructShape {
    match fields {
        Fields::Named(named) => StructShape::Named(
            named
                .named
                .iter()
                .map(|f| f.ident.clone().expect("named field"))
                .collect(),
        ),
        Fields::Unnamed(unnamed) => StructShape::Tuple(unnamed.unnamed.len()),
        Fields::Unit => StructShape::Unit,
    }
}

fn field_types(fields: &Fields) -> Vec<&syn::Type> {
    fields.iter().map(|f| &f.ty).collect()
}

/// Requires the enum to be fieldless and returns its variant idents.
fn fieldless_variants(data: &syn::DataEnum, trait_name: &str) -> Result<Vec<syn::Ident>, syn::Error> {
    let mut variants = Vec::new();
    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                format!("{trait_name} can only be derived for enums without payloads"),
            ));
        }
        variants.push(variant.ident.clone());
    }
    Ok(variants)
}

pub fn nested_encode(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let generics = add_trait_bounds(input.generics.clone(), quote!(keel_codec::NestedEncode));
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let body = match &input.data {
        Data::Struct(data) => {
            let types = field_types(&data.fields);
            let width = quote! {
                keel_codec::nested::sum_widths(&[
                    #(<#types as keel_codec::NestedEncode>::FIXED_WIDTH,)*
                ])
            };
            let encodes = match struct_shape(&data.fields) {
                StructShape::Named(idents) => idents
                    .iter()
                    .map(|ident| quote! { keel_codec::NestedEncode::dep_encode(&self.#ident, out)?; })
                    .collect::<Vec<_>>(),
                StructShape::Tuple(len) => (0..len)
                    .map(|i| {
                        let index = Index::from(i);
                        quote! { keel_codec::NestedEncode::dep_encode(&self.#index, out)?; }
                    })
                    .collect(),
                StructShape::Unit => Vec::new(),
            };
            quote! {
                const FIXED_WIDTH: ::core::option::Option<usize> = #width;

                fn dep_encode<O: keel_codec::NestedEncodeOutput>(
                    &self,
                    out: &mut O,
                ) -> ::core::result::Result<(), keel_codec::EncodeError> {
                    #(#encodes)*
                    ::core::result::Result::Ok(())
                }
            }
        }
        Data::Enum(data) => {
            let variants = match fieldless_variants(data, "NestedEncode") {
                Ok(v) => v,
                Err(err) => return err.to_compile_error().into(),
            };
            let arms = variants.iter().enumerate().map(|(i, ident)| {
                let discriminant = i as u8;
                quote! { Self::#ident => #discriminant, }
            });
            quote! {
                const FIXED_WIDTH: ::core::option::Option<usize> = ::core::option::Option::Some(1);

                fn dep_encode<O: keel_codec::NestedEncodeOutput>(
                    &self,
                    out: &mut O,
                ) -> ::core::result::Result<(), keel_codec::EncodeError> {
                    let discriminant: u8 = match self { #(#arms)* };
                    out.push_byte(discriminant);
                    ::core::result::Result::Ok(())
                }
            }
        }
        Data::Union(_) => {
            return syn::Error::new_spanned(&input.ident, "unions are not encodable")
                .to_compile_error()
                .into()
        }
    };

    quote! {
        impl #impl_generics keel_codec::NestedEncode for #name #ty_generics #where_clause {
            #body
        }
    }
    .into()
}

pub fn nested_decode(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let generics = add_trait_bounds(input.generics.clone(), quote!(keel_codec::NestedDecode));
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let body = match &input.data {
        Data::Struct(data) => {
            let constructor = match struct_shape(&data.fields) {
                StructShape::Named(idents) => {
                    let fields = idents.iter().map(|ident| {
                        quote! { #ident: keel_codec::NestedDecode::dep_decode(input)?, }
                    });
                    quote! { Self { #(#fields)* } }
                }
                StructShape::Tuple(len) => {
                    let fields = (0..len)
                        .map(|_| quote! { keel_codec::NestedDecode::dep_decode(input)?, });
                    quote! { Self( #(#fields)* ) }
                }
                StructShape::Unit => quote! { Self },
            };
            quote! {
                fn dep_decode(
                    input: &mut keel_codec::DecodeCursor<'_>,
                ) -> ::core::result::Result<Self, keel_codec::DecodeError> {
                    ::core::result::Result::Ok(#constructor)
                }
            }
        }
        Data::Enum(data) => {
            let variants = match fieldless_variants(data, "NestedDecode") {
                Ok(v) => v,
                Err(err) => return err.to_compile_error().into(),
            };
            let count = variants.len() as u8;
            let arms = variants.iter().enumerate().map(|(i, ident)| {
                let discriminant = i as u8;
                quote! { #discriminant => ::core::result::Result::Ok(Self::#ident), }
            });
            quote! {
                fn dep_decode(
                    input: &mut keel_codec::DecodeCursor<'_>,
                ) -> ::core::result::Result<Self, keel_codec::DecodeError> {
                    match input.read_byte()? {
                        #(#arms)*
                        other => ::core::result::Result::Err(
                            keel_codec::DecodeError::InvalidEnumDiscriminant {
                                discriminant: other,
                                variant_count: #count,
                            },
                        ),
                    }
                }
            }
        }
        Data::Union(_) => {
            return syn::Error::new_spanned(&input.ident, "unions are not decodable")
                .to_compile_error()
                .into()
        }
    };

    quote! {
        impl #impl_generics keel_codec::NestedDecode for #name #ty_generics #where_clause {
            #body
        }
    }
    .into()
}

pub fn top_encode(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let default_on_empty = has_default_on_empty(&input);
    let generics = add_trait_bounds(input.generics.clone(), quote!(keel_codec::NestedEncode));
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let body = match &input.data {
        Data::Struct(_) => {
            let default_check = if default_on_empty {
                quote! {
                    if *self == <Self as ::core::default::Default>::default() {
                        return ::core::result::Result::Ok(keel_codec::alloc::vec::Vec::new());
                    }
                }
            } else {
                quote! {}
            };
            quote! {
                fn top_encode(
                    &self,
                ) -> ::core::result::Result<keel_codec::alloc::vec::Vec<u8>, keel_codec::EncodeError> {
                    #default_check
                    keel_codec::top_encode_from_nested(self)
                }
            }
        }
        Data::Enum(data) => {
            let variants = match fieldless_variants(data, "TopEncode") {
                Ok(v) => v,
                Err(err) => return err.to_compile_error().into(),
            };
            let arms = variants.iter().enumerate().map(|(i, ident)| {
                let discriminant = i as u8;
                quote! { Self::#ident => #discriminant, }
            });
            quote! {
                fn top_encode(
                    &self,
                ) -> ::core::result::Result<keel_codec::alloc::vec::Vec<u8>, keel_codec::EncodeError> {
                    let discriminant: u8 = match self { #(#arms)* };
                    keel_codec::TopEncode::top_encode(&discriminant)
                }
            }
        }
        Data::Union(_) => {
            return syn::Error::new_spanned(&input.ident, "unions are not encodable")
                .to_compile_error()
                .into()
        }
    };

    quote! {
        impl #impl_generics keel_codec::TopEncode for #name #ty_generics #where_clause {
            #body
        }
    }
    .into()
}

pub fn top_decode(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let default_on_empty = has_default_on_empty(&input);
    let generics = add_trait_bounds(input.generics.clone(), quote!(keel_codec::NestedDecode));
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let body = match &input.data {
        Data::Struct(_) => {
            let default_check = if default_on_empty {
                quote! {
                    if input.is_empty() {
                        return ::core::result::Result::Ok(
                            <Self as ::core::default::Default>::default(),
                        );
                    }
                }
            } else {
                quote! {}
            };
            quote! {
                fn top_decode(
                    input: &[u8],
                ) -> ::core::result::Result<Self, keel_codec::DecodeError> {
                    #default_check
                    keel_codec::top_decode_from_nested(input)
                }
            }
        }
        Data::Enum(data) => {
            let variants = match fieldless_variants(data, "TopDecode") {
                Ok(v) => v,
                Err(err) => return err.to_compile_error().into(),
            };
            let count = variants.len() as u8;
            let arms = variants.iter().enumerate().map(|(i, ident)| {
                let discriminant = i as u8;
                quote! { #discriminant => ::core::result::Result::Ok(Self::#ident), }
            });
            quote! {
                fn top_decode(
                    input: &[u8],
                ) -> ::core::result::Result<Self, keel_codec::DecodeError> {
                    match <u8 as keel_codec::TopDecode>::top_decode(input)? {
                        #(#arms)*
                        other => ::core::result::Result::Err(
                            keel_codec::DecodeError::InvalidEnumDiscriminant {
                                discriminant: other,
                                variant_count: #count,
                            },
                        ),
                    }
                }
            }
        }
        Data::Union(_) => {
            return syn::Error::new_spanned(&input.ident, "unions are not decodable")
                .to_compile_error()
                .into()
        }
    };

    quote! {
        impl #impl_generics keel_codec::TopDecode for #name #ty_generics #where_clause {
            #body
        }
    }
    .into()
}

pub fn type_abi(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let name_literal = name.to_string();
    let generics = add_trait_bounds(input.generics.clone(), quote!(keel_codec::TypeAbi));
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    quote! {
        impl #impl_generics keel_codec::TypeAbi for #name #ty_generics #where_clause {
            fn type_name() -> keel_codec::alloc::string::String {
                keel_codec::alloc::string::String::from(#name_literal)
            }
        }
    }
    .into()
}
