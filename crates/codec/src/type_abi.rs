// Path: crates/codec/src/type_abi.rs
//! Maps codec types to the human-readable type names used in the ABI
//! artifact.
//!
//! ABI names are a separate vocabulary from Rust type names: byte buffers
//! are `"bytes"`, managed wrappers keep their chain-facing names, and
//! generic wrappers render their arguments inside angle brackets.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::multi::{
    MultiValue1, MultiValue2, MultiValue3, MultiValue4, MultiValue5, MultiValueEncoded,
    OptionalValue,
};

/// Provides the ABI-facing name of a type, plus the signature properties the
/// ABI validator needs.
pub trait TypeAbi {
    /// The human-readable ABI type name.
    fn type_name() -> String;

    /// True for types that consume a variable number of trailing argument
    /// slots and are therefore only legal in final position.
    const IS_VARIADIC: bool = false;
}

macro_rules! impl_type_abi_literal {
    ($($ty:ty => $name:literal,)+) => {
        $(
            impl TypeAbi for $ty {
                fn type_name() -> String {
                    String::from($name)
                }
            }
        )+
    };
}

impl_type_abi_literal! {
    u8 => "u8",
    u16 => "u16",
    u32 => "u32",
    u64 => "u64",
    bool => "bool",
    () => "unit",
    String => "utf-8 string",
}

impl<const N: usize> TypeAbi for [u8; N] {
    fn type_name() -> String {
        format!("array{N}<u8>")
    }
}

impl<T: TypeAbi> TypeAbi for Vec<T> {
    fn type_name() -> String {
        // Plain byte strings are "bytes"; anything else is a typed list.
        if T::type_name() == "u8" {
            String::from("bytes")
        } else {
            format!("List<{}>", T::type_name())
        }
    }
}

impl<T: TypeAbi> TypeAbi for Option<T> {
    fn type_name() -> String {
        format!("Option<{}>", T::type_name())
    }
}

impl<T: TypeAbi> TypeAbi for OptionalValue<T> {
    fn type_name() -> String {
        format!("optional<{}>", T::type_name())
    }

    const IS_VARIADIC: bool = true;
}

impl<T: TypeAbi> TypeAbi for MultiValueEncoded<T> {
    fn type_name() -> String {
        format!("variadic<{}>", T::type_name())
    }

    const IS_VARIADIC: bool = true;
}

macro_rules! impl_type_abi_multi {
    ($($name:ident: ($($elem:ident),+),)+) => {
        $(
            impl<$($elem: TypeAbi,)+> TypeAbi for $name<$($elem,)+> {
                fn type_name() -> String {
                    let names: Vec<String> = alloc::vec![$($elem::type_name(),)+];
                    format!("multi<{}>", names.join(","))
                }
            }
        )+
    };
}

impl_type_abi_multi! {
    MultiValue1: (T0),
    MultiValue2: (T0, T1),
    MultiValue3: (T0, T1, T2),
    MultiValue4: (T0, T1, T2, T3),
    MultiValue5: (T0, T1, T2, T3, T4),
}

macro_rules! impl_type_abi_tuple {
    ($(($($elem:ident),+),)+) => {
        $(
            impl<$($elem: TypeAbi,)+> TypeAbi for ($($elem,)+) {
                fn type_name() -> String {
                    let names: Vec<String> = alloc::vec![$($elem::type_name(),)+];
                    format!("tuple<{}>", names.join(","))
                }
            }
        )+
    };
}

impl_type_abi_tuple! {
    (T0),
    (T0, T1),
    (T0, T1, T2),
    (T0, T1, T2, T3),
    (T0, T1, T2, T3, T4),
}
