// Path: crates/codec/tests/roundtrip_props.rs
//! Property tests for the round-trip law: decode(encode(x)) == x under both
//! encoding modes, for arbitrary values.

use keel_codec::{
    top_decode_from_nested, top_encode_from_nested, DecodeCursor, NestedDecode, NestedEncode,
    TopDecode, TopEncode,
};
use proptest::prelude::*;

fn nested_roundtrip<T>(value: &T) -> T
where
    T: NestedEncode + NestedDecode,
{
    let bytes = top_encode_from_nested(value).unwrap();
    let mut cursor = DecodeCursor::new(&bytes);
    let decoded = T::dep_decode(&mut cursor).unwrap();
    cursor.finish().unwrap();
    decoded
}

fn top_roundtrip<T>(value: &T) -> T
where
    T: TopEncode + TopDecode,
{
    T::top_decode(&value.top_encode().unwrap()).unwrap()
}

proptest! {
    #[test]
    fn u64_top_roundtrip(value: u64) {
        prop_assert_eq!(top_roundtrip(&value), value);
    }

    #[test]
    fn u64_top_form_is_minimal(value: u64) {
        let bytes = value.top_encode().unwrap();
        if let Some(first) = bytes.first() {
            prop_assert_ne!(*first, 0u8);
        } else {
            prop_assert_eq!(value, 0);
        }
    }

    #[test]
    fn u32_nested_roundtrip(value: u32) {
        prop_assert_eq!(nested_roundtrip(&value), value);
    }

    #[test]
    fn u16_both_modes(value: u16) {
        prop_assert_eq!(top_roundtrip(&value), value);
        prop_assert_eq!(nested_roundtrip(&value), value);
    }

    #[test]
    fn byte_string_roundtrip(value: Vec<u8>) {
        prop_assert_eq!(top_roundtrip(&value), value.clone());
        prop_assert_eq!(nested_roundtrip(&value), value);
    }

    #[test]
    fn string_roundtrip(value: String) {
        prop_assert_eq!(top_roundtrip(&value), value.clone());
        prop_assert_eq!(nested_roundtrip(&value), value);
    }

    #[test]
    fn fixed_width_list_roundtrip(value: Vec<u64>) {
        prop_assert_eq!(top_roundtrip(&value), value.clone());
        prop_assert_eq!(nested_roundtrip(&value), value);
    }

    #[test]
    fn dynamic_list_roundtrip(value: Vec<Vec<u8>>) {
        prop_assert_eq!(top_roundtrip(&value), value.clone());
        prop_assert_eq!(nested_roundtrip(&value), value);
    }

    #[test]
    fn option_nested_roundtrip(value: Option<u64>) {
        prop_assert_eq!(nested_roundtrip(&value), value);
    }

    #[test]
    fn pair_roundtrip(a: u32, b: Vec<u8>) {
        let value = (a, b);
        prop_assert_eq!(top_roundtrip(&value), value.clone());
        prop_assert_eq!(nested_roundtrip(&value), value);
    }

    #[test]
    fn nested_encoding_of_pair_is_concatenation(a: u32, b: u64) {
        let pair = (a, b);
        let encoded = top_encode_from_nested(&pair).unwrap();
        let mut expected = Vec::new();
        a.dep_encode(&mut expected).unwrap();
        b.dep_encode(&mut expected).unwrap();
        prop_assert_eq!(encoded, expected);
    }
}

#[test]
fn top_decode_of_nested_composite_requires_full_consumption() {
    let mut bytes = top_encode_from_nested(&(1u8, 2u8)).unwrap();
    bytes.push(0xFF);
    assert!(top_decode_from_nested::<(u8, u8)>(&bytes).is_err());
}
