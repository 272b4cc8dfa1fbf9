// Path: crates/codec/src/tuple.rs
//! Codec implementations for fixed-arity tuples.
//!
//! A tuple encodes as the back-to-back nested encoding of its elements, in
//! order, with no separator and no length prefix: the arity is known at
//! compile time, so the element decoders delimit each other.

use alloc::vec::Vec;

use crate::error::{DecodeError, EncodeError};
use crate::nested::{
    sum_widths, DecodeCursor, NestedDecode, NestedEncode, NestedEncodeOutput,
};
use crate::top::{top_decode_from_nested, top_encode_from_nested, TopDecode, TopEncode};

macro_rules! impl_tuple_codec {
    ($(($($name:ident . $idx:tt),+))+) => {
        $(
            impl<$($name: NestedEncode,)+> NestedEncode for ($($name,)+) {
                const FIXED_WIDTH: Option<usize> =
                    sum_widths(&[$($name::FIXED_WIDTH,)+]);

                fn dep_encode<O: NestedEncodeOutput>(
                    &self,
                    out: &mut O,
                ) -> Result<(), EncodeError> {
                    $(self.$idx.dep_encode(out)?;)+
                    Ok(())
                }
            }

            impl<$($name: NestedDecode,)+> NestedDecode for ($($name,)+) {
                fn dep_decode(input: &mut DecodeCursor<'_>) -> Result<Self, DecodeError> {
                    Ok(($($name::dep_decode(input)?,)+))
                }
            }

            impl<$($name: NestedEncode,)+> TopEncode for ($($name,)+) {
                fn top_encode(&self) -> Result<Vec<u8>, EncodeError> {
                    top_encode_from_nested(self)
                }
            }

            impl<$($name: NestedDecode,)+> TopDecode for ($($name,)+) {
                fn top_decode(input: &[u8]) -> Result<Self, DecodeError> {
                    top_decode_from_nested(input)
                }
            }
        )+
    };
}

impl_tuple_codec! {
    (T0.0)
    (T0.0, T1.1)
    (T0.0, T1.1, T2.2)
    (T0.0, T1.1, T2.2, T3.3)
    (T0.0, T1.1, T2.2, T3.3, T4.4)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn pair_is_plain_concatenation() {
        let value = (5u16, vec![0xAAu8]);
        let mut out = Vec::new();
        value.dep_encode(&mut out).unwrap();
        assert_eq!(out, vec![0, 5, 0, 0, 0, 1, 0xAA]);

        let decoded: (u16, Vec<u8>) = top_decode_from_nested(&out).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn all_fixed_elements_make_a_fixed_tuple() {
        assert_eq!(<(u8, u32)>::FIXED_WIDTH, Some(5));
        assert_eq!(<(u8, Vec<u8>)>::FIXED_WIDTH, None);
    }

    #[test]
    fn top_decode_rejects_trailing_bytes() {
        let mut out = Vec::new();
        (1u8, 2u8).dep_encode(&mut out).unwrap();
        out.push(0);
        assert!(<(u8, u8)>::top_decode(&out).is_err());
    }
}
