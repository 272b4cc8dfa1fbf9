// Path: crates/codec/src/multi.rs
//! The multi-value codec: how endpoint parameters and results map onto the
//! flat stream of top-level-encoded argument slots.
//!
//! Every plain [`TopEncode`]/[`TopDecode`] type occupies exactly one slot
//! (blanket impls below). Three container types bend that rule:
//!
//! - [`MultiValueN`](MultiValue2) occupies N slots, one per element;
//! - [`OptionalValue`] occupies zero or one trailing slot;
//! - [`MultiValueEncoded`] consumes every remaining slot.
//!
//! The latter two only make sense in final position; that constraint is a
//! property of the endpoint *signature* and is enforced when the ABI is
//! built, not at runtime.

use alloc::vec::Vec;
use core::marker::PhantomData;

use crate::error::{DecodeError, EncodeError};
use crate::nested::{DecodeCursor, NestedDecode, NestedEncode, NestedEncodeOutput};
use crate::top::{TopDecode, TopEncode};

/// A sink for top-level-encoded argument slots.
pub trait TopEncodeMultiOutput {
    /// Appends one already-encoded argument slot.
    fn push_arg_raw(&mut self, bytes: Vec<u8>);
}

impl TopEncodeMultiOutput for Vec<Vec<u8>> {
    fn push_arg_raw(&mut self, bytes: Vec<u8>) {
        self.push(bytes);
    }
}

/// A source of top-level-encoded argument slots.
pub trait TopDecodeMultiInput {
    /// True while at least one slot remains.
    fn has_next(&self) -> bool;

    /// Takes the next slot, or fails with [`DecodeError::MultiTooFewArguments`].
    fn next_arg_raw(&mut self) -> Result<Vec<u8>, DecodeError>;
}

/// A [`TopDecodeMultiInput`] over an in-memory argument list.
#[derive(Debug)]
pub struct VecMultiInput {
    args: Vec<Vec<u8>>,
    next: usize,
}

impl VecMultiInput {
    /// Creates an input over `args`, starting at the first slot.
    pub fn new(args: Vec<Vec<u8>>) -> Self {
        Self { args, next: 0 }
    }
}

impl TopDecodeMultiInput for VecMultiInput {
    fn has_next(&self) -> bool {
        self.next < self.args.len()
    }

    fn next_arg_raw(&mut self) -> Result<Vec<u8>, DecodeError> {
        if !self.has_next() {
            return Err(DecodeError::MultiTooFewArguments);
        }
        let arg = core::mem::take(&mut self.args[self.next]);
        self.next += 1;
        Ok(arg)
    }
}

/// Encoding onto the argument stream; a value may occupy any number of
/// slots.
pub trait TopEncodeMulti {
    /// Appends the slots of `self` to the stream.
    fn multi_encode<O: TopEncodeMultiOutput>(&self, out: &mut O) -> Result<(), EncodeError>;
}

/// Decoding from the argument stream.
pub trait TopDecodeMulti: Sized {
    /// Consumes as many slots as this type occupies.
    fn multi_decode<I: TopDecodeMultiInput>(input: &mut I) -> Result<Self, DecodeError>;
}

impl<T: TopEncode> TopEncodeMulti for T {
    fn multi_encode<O: TopEncodeMultiOutput>(&self, out: &mut O) -> Result<(), EncodeError> {
        out.push_arg_raw(self.top_encode()?);
        Ok(())
    }
}

impl<T: TopDecode> TopDecodeMulti for T {
    fn multi_decode<I: TopDecodeMultiInput>(input: &mut I) -> Result<Self, DecodeError> {
        let raw = input.next_arg_raw()?;
        T::top_decode(&raw)
    }
}

/// An argument that may be omitted entirely from the end of the call.
///
/// Distinct from `Option<T>`: absence means the slot does not exist at all,
/// not that an empty slot was passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionalValue<T> {
    /// The argument was supplied.
    Some(T),
    /// The argument slot was absent.
    None,
}

impl<T> OptionalValue<T> {
    /// Converts into a plain `Option`.
    pub fn into_option(self) -> Option<T> {
        match self {
            OptionalValue::Some(value) => Some(value),
            OptionalValue::None => None,
        }
    }

    /// True when the argument was supplied.
    pub fn is_some(&self) -> bool {
        matches!(self, OptionalValue::Some(_))
    }
}

impl<T> From<Option<T>> for OptionalValue<T> {
    fn from(option: Option<T>) -> Self {
        match option {
            Some(value) => OptionalValue::Some(value),
            None => OptionalValue::None,
        }
    }
}

impl<T: TopEncodeMulti> TopEncodeMulti for OptionalValue<T> {
    fn multi_encode<O: TopEncodeMultiOutput>(&self, out: &mut O) -> Result<(), EncodeError> {
        match self {
            OptionalValue::Some(value) => value.multi_encode(out),
            OptionalValue::None => Ok(()),
        }
    }
}

impl<T: TopDecodeMulti> TopDecodeMulti for OptionalValue<T> {
    fn multi_decode<I: TopDecodeMultiInput>(input: &mut I) -> Result<Self, DecodeError> {
        if input.has_next() {
            Ok(OptionalValue::Some(T::multi_decode(input)?))
        } else {
            Ok(OptionalValue::None)
        }
    }
}

macro_rules! impl_multi_value {
    ($(#[$doc:meta] $name:ident: ($($elem:ident . $idx:tt),+))+) => {
        $(
            #[$doc]
            #[derive(Debug, Clone, PartialEq, Eq)]
            pub struct $name<$($elem,)+>($(#[doc = "One grouped value."] pub $elem,)+);

            impl<$($elem,)+> From<($($elem,)+)> for $name<$($elem,)+> {
                fn from(tuple: ($($elem,)+)) -> Self {
                    $name($(tuple.$idx,)+)
                }
            }

            impl<$($elem,)+> $name<$($elem,)+> {
                /// Unpacks the grouped values.
                pub fn into_tuple(self) -> ($($elem,)+) {
                    ($(self.$idx,)+)
                }
            }

            impl<$($elem: NestedEncode,)+> NestedEncode for $name<$($elem,)+> {
                fn dep_encode<O: NestedEncodeOutput>(
                    &self,
                    out: &mut O,
                ) -> Result<(), EncodeError> {
                    $(self.$idx.dep_encode(out)?;)+
                    Ok(())
                }
            }

            impl<$($elem: NestedDecode,)+> NestedDecode for $name<$($elem,)+> {
                fn dep_decode(input: &mut DecodeCursor<'_>) -> Result<Self, DecodeError> {
                    Ok($name($($elem::dep_decode(input)?,)+))
                }
            }

            impl<$($elem: TopEncodeMulti,)+> TopEncodeMulti for $name<$($elem,)+> {
                fn multi_encode<O: TopEncodeMultiOutput>(
                    &self,
                    out: &mut O,
                ) -> Result<(), EncodeError> {
                    $(self.$idx.multi_encode(out)?;)+
                    Ok(())
                }
            }

            impl<$($elem: TopDecodeMulti,)+> TopDecodeMulti for $name<$($elem,)+> {
                fn multi_decode<I: TopDecodeMultiInput>(
                    input: &mut I,
                ) -> Result<Self, DecodeError> {
                    Ok($name($($elem::multi_decode(input)?,)+))
                }
            }
        )+
    };
}

impl_multi_value! {
    /// One value occupying one argument slot (trivial grouping).
    MultiValue1: (T0.0)
    /// Two values occupying two consecutive argument slots.
    MultiValue2: (T0.0, T1.1)
    /// Three values occupying three consecutive argument slots.
    MultiValue3: (T0.0, T1.1, T2.2)
    /// Four values occupying four consecutive argument slots.
    MultiValue4: (T0.0, T1.1, T2.2, T3.3)
    /// Five values occupying five consecutive argument slots.
    MultiValue5: (T0.0, T1.1, T2.2, T3.3, T4.4)
}

/// A variadic sequence of independently top-level-encoded items, consuming
/// every remaining argument slot.
///
/// Items are held raw and decoded on demand, so a malformed trailing
/// argument only fails when it is actually read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiValueEncoded<T> {
    raw: Vec<Vec<u8>>,
    _phantom: PhantomData<T>,
}

impl<T> Default for MultiValueEncoded<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> MultiValueEncoded<T> {
    /// Creates an empty sequence.
    pub fn new() -> Self {
        Self {
            raw: Vec::new(),
            _phantom: PhantomData,
        }
    }

    /// Wraps an already-encoded slot list.
    pub fn from_raw(raw: Vec<Vec<u8>>) -> Self {
        Self {
            raw,
            _phantom: PhantomData,
        }
    }

    /// Number of raw slots held (items may span several slots each).
    pub fn raw_len(&self) -> usize {
        self.raw.len()
    }

    /// True when no slots are held.
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Borrows the raw slots.
    pub fn raw_slots(&self) -> &[Vec<u8>] {
        &self.raw
    }
}

impl<T: TopEncodeMulti> MultiValueEncoded<T> {
    /// Appends one item, encoding it into however many slots it occupies.
    pub fn push(&mut self, item: &T) -> Result<(), EncodeError> {
        item.multi_encode(&mut self.raw)
    }
}

impl<T: TopDecodeMulti> MultiValueEncoded<T> {
    /// Decodes every held item.
    pub fn decode_all(self) -> Result<Vec<T>, DecodeError> {
        let mut input = VecMultiInput::new(self.raw);
        let mut items = Vec::new();
        while input.has_next() {
            items.push(T::multi_decode(&mut input)?);
        }
        Ok(items)
    }
}

impl<T: TopEncodeMulti> TopEncodeMulti for MultiValueEncoded<T> {
    fn multi_encode<O: TopEncodeMultiOutput>(&self, out: &mut O) -> Result<(), EncodeError> {
        for slot in &self.raw {
            out.push_arg_raw(slot.clone());
        }
        Ok(())
    }
}

impl<T: TopDecodeMulti> TopDecodeMulti for MultiValueEncoded<T> {
    fn multi_decode<I: TopDecodeMultiInput>(input: &mut I) -> Result<Self, DecodeError> {
        let mut raw = Vec::new();
        while input.has_next() {
            raw.push(input.next_arg_raw()?);
        }
        Ok(Self::from_raw(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn plain_value_occupies_one_slot() {
        let mut out: Vec<Vec<u8>> = Vec::new();
        42u32.multi_encode(&mut out).unwrap();
        assert_eq!(out, vec![vec![42]]);

        let mut input = VecMultiInput::new(out);
        assert_eq!(u32::multi_decode(&mut input).unwrap(), 42);
        assert!(!input.has_next());
    }

    #[test]
    fn multi_value_nested_form_is_plain_concatenation() {
        let value = MultiValue2::from((0xABu8, 0x0102u16));
        let mut nested = Vec::new();
        value.dep_encode(&mut nested).unwrap();

        let mut expected = Vec::new();
        0xABu8.dep_encode(&mut expected).unwrap();
        0x0102u16.dep_encode(&mut expected).unwrap();
        assert_eq!(nested, expected);

        let mut cursor = DecodeCursor::new(&nested);
        let decoded = MultiValue2::<u8, u16>::dep_decode(&mut cursor).unwrap();
        assert_eq!(decoded, value);
        assert!(cursor.finish().is_ok());
    }

    #[test]
    fn multi_value_spans_slots() {
        let value = MultiValue3::from((1u8, 2u8, 3u8));
        let mut out: Vec<Vec<u8>> = Vec::new();
        value.multi_encode(&mut out).unwrap();
        assert_eq!(out.len(), 3);

        let mut input = VecMultiInput::new(out);
        let decoded = MultiValue3::<u8, u8, u8>::multi_decode(&mut input).unwrap();
        assert_eq!(decoded.into_tuple(), (1, 2, 3));
    }

    #[test]
    fn optional_value_absent_when_stream_ends() {
        let mut input = VecMultiInput::new(vec![]);
        let decoded = OptionalValue::<u64>::multi_decode(&mut input).unwrap();
        assert_eq!(decoded, OptionalValue::None);

        let mut input = VecMultiInput::new(vec![vec![9]]);
        let decoded = OptionalValue::<u64>::multi_decode(&mut input).unwrap();
        assert_eq!(decoded, OptionalValue::Some(9));
    }

    #[test]
    fn variadic_drains_the_stream() {
        let mut input = VecMultiInput::new(vec![vec![1], vec![], vec![2]]);
        let decoded = MultiValueEncoded::<u32>::multi_decode(&mut input).unwrap();
        assert_eq!(decoded.raw_len(), 3);
        assert_eq!(decoded.decode_all().unwrap(), vec![1, 0, 2]);
    }

    #[test]
    fn variadic_of_pairs_consumes_two_slots_per_item() {
        let mut seq: MultiValueEncoded<MultiValue2<u8, u8>> = MultiValueEncoded::new();
        seq.push(&MultiValue2::from((1u8, 2u8))).unwrap();
        seq.push(&MultiValue2::from((3u8, 4u8))).unwrap();
        assert_eq!(seq.raw_len(), 4);

        let items = seq.decode_all().unwrap();
        assert_eq!(items[0].clone().into_tuple(), (1, 2));
        assert_eq!(items[1].clone().into_tuple(), (3, 4));
    }

    #[test]
    fn missing_argument_is_an_error() {
        let mut input = VecMultiInput::new(vec![]);
        assert_eq!(
            u8::multi_decode(&mut input),
            Err(DecodeError::MultiTooFewArguments)
        );
    }
}
