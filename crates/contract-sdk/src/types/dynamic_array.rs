// Path: crates/contract-sdk/src/types/dynamic_array.rs
//! A dynamic array packed into a single buffer.
//!
//! Elements are stored back-to-back as their nested encodings. When the
//! element type is fixed-width, `get` is pure offset arithmetic; for
//! variable-width elements it is an O(n) sequential scan -- that cost is
//! part of the type's contract, not hidden behind caching.

use core::marker::PhantomData;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use keel_codec::{
    DecodeCursor, DecodeError, EncodeError, NestedDecode, NestedEncode, NestedEncodeOutput,
    TopDecode, TopEncode, TypeAbi,
};

use super::Buffer;

/// A sequence of `T` packed into one buffer as back-to-back nested
/// encodings.
///
/// Top-level encoding follows the element kind: fixed-width elements
/// serialize to the raw buffer verbatim (the slot boundary and the element
/// width delimit the items); variable-width elements keep the
/// length-prefixed nested form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamicArray<T> {
    buffer: Buffer,
    len: u32,
    _phantom: PhantomData<T>,
}

impl<T> Default for DynamicArray<T> {
    fn default() -> Self {
        Self {
            buffer: Buffer::new(),
            len: 0,
            _phantom: PhantomData,
        }
    }
}

impl<T> DynamicArray<T> {
    /// An empty array.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of elements.
    pub fn len(&self) -> u32 {
        self.len
    }

    /// True when no elements are held.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The packed element bytes.
    pub fn as_buffer(&self) -> &Buffer {
        &self.buffer
    }
}

impl<T: NestedEncode + NestedDecode> DynamicArray<T> {
    /// Appends one element.
    pub fn push(&mut self, value: &T) -> Result<(), EncodeError> {
        value.dep_encode(&mut self.buffer)?;
        self.len += 1;
        Ok(())
    }

    /// Returns the element at `index`, or `None` when out of range.
    pub fn get(&self, index: u32) -> Option<T> {
        if index >= self.len {
            return None;
        }
        let bytes = self.buffer.as_bytes();
        if let Some(width) = T::FIXED_WIDTH {
            let start = index as usize * width;
            let mut cursor = DecodeCursor::new(&bytes[start..start + width]);
            match T::dep_decode(&mut cursor) {
                Ok(value) => Some(value),
                // push() only ever appends valid encodings
                Err(_) => unreachable!("array buffer holds a malformed element"),
            }
        } else {
            let mut cursor = DecodeCursor::new(bytes);
            for _ in 0..index {
                if T::dep_decode(&mut cursor).is_err() {
                    unreachable!("array buffer holds a malformed element");
                }
            }
            match T::dep_decode(&mut cursor) {
                Ok(value) => Some(value),
                Err(_) => unreachable!("array buffer holds a malformed element"),
            }
        }
    }

    /// Removes the element at `index`, rebuilding the packed buffer as
    /// `items[..index] ++ items[index + 1..]`. Returns `false` when out of
    /// range.
    pub fn remove(&mut self, index: u32) -> bool {
        if index >= self.len {
            return false;
        }
        let bytes = self.buffer.as_bytes();
        let (start, end) = match T::FIXED_WIDTH {
            Some(width) => {
                let start = index as usize * width;
                (start, start + width)
            }
            None => {
                let mut cursor = DecodeCursor::new(bytes);
                let mut start = 0usize;
                for _ in 0..index {
                    if T::dep_decode(&mut cursor).is_err() {
                        unreachable!("array buffer holds a malformed element");
                    }
                    start = bytes.len() - cursor.remaining();
                }
                if T::dep_decode(&mut cursor).is_err() {
                    unreachable!("array buffer holds a malformed element");
                }
                (start, bytes.len() - cursor.remaining())
            }
        };
        let mut rebuilt = Vec::with_capacity(bytes.len() - (end - start));
        rebuilt.extend_from_slice(&bytes[..start]);
        rebuilt.extend_from_slice(&bytes[end..]);
        self.buffer = Buffer::from_vec(rebuilt);
        self.len -= 1;
        true
    }

    /// Builds an array from a vector of elements.
    pub fn from_vec(items: &[T]) -> Result<Self, EncodeError> {
        let mut array = Self::new();
        for item in items {
            array.push(item)?;
        }
        Ok(array)
    }

    /// Decodes every element into a vector.
    pub fn to_vec(&self) -> Vec<T> {
        let mut cursor = DecodeCursor::new(self.buffer.as_bytes());
        let mut items = Vec::with_capacity(self.len as usize);
        for _ in 0..self.len {
            match T::dep_decode(&mut cursor) {
                Ok(value) => items.push(value),
                Err(_) => unreachable!("array buffer holds a malformed element"),
            }
        }
        items
    }

    /// Validates a packed payload and counts its elements.
    fn parse(bytes: &[u8]) -> Result<(Buffer, u32), DecodeError> {
        let mut cursor = DecodeCursor::new(bytes);
        let mut count: u32 = 0;
        while !cursor.is_depleted() {
            T::dep_decode(&mut cursor)?;
            count += 1;
        }
        Ok((Buffer::from_bytes(bytes), count))
    }
}

impl<T: NestedEncode + NestedDecode> NestedEncode for DynamicArray<T> {
    fn dep_encode<O: NestedEncodeOutput>(&self, out: &mut O) -> Result<(), EncodeError> {
        keel_codec::nested::write_length_prefix(out, self.buffer.len())?;
        out.write(self.buffer.as_bytes());
        Ok(())
    }
}

impl<T: NestedEncode + NestedDecode> NestedDecode for DynamicArray<T> {
    fn dep_decode(input: &mut DecodeCursor<'_>) -> Result<Self, DecodeError> {
        let len = input.read_length_prefix()?;
        let payload = input.read_bytes(len)?;
        let (buffer, count) = Self::parse(payload)?;
        Ok(Self {
            buffer,
            len: count,
            _phantom: PhantomData,
        })
    }
}

impl<T: NestedEncode + NestedDecode> TopEncode for DynamicArray<T> {
    fn top_encode(&self) -> Result<Vec<u8>, EncodeError> {
        if T::FIXED_WIDTH.is_some() {
            Ok(self.buffer.as_bytes().to_vec())
        } else {
            let mut out = Vec::new();
            self.dep_encode(&mut out)?;
            Ok(out)
        }
    }
}

impl<T: NestedEncode + NestedDecode> TopDecode for DynamicArray<T> {
    fn top_decode(input: &[u8]) -> Result<Self, DecodeError> {
        if let Some(width) = T::FIXED_WIDTH {
            if width > 0 && input.len() % width != 0 {
                return Err(DecodeError::InvalidValue(
                    "byte length is not a multiple of the element width",
                ));
            }
            let (buffer, count) = Self::parse(input)?;
            Ok(Self {
                buffer,
                len: count,
                _phantom: PhantomData,
            })
        } else {
            let mut cursor = DecodeCursor::new(input);
            let array = Self::dep_decode(&mut cursor)?;
            cursor.finish()?;
            Ok(array)
        }
    }
}

impl<T: TypeAbi> TypeAbi for DynamicArray<T> {
    fn type_name() -> String {
        format!("List<{}>", T::type_name())
    }
}

/// Decoding iterator over a [`DynamicArray`].
pub struct DynamicArrayIter<'a, T> {
    cursor: DecodeCursor<'a>,
    remaining: u32,
    _phantom: PhantomData<T>,
}

impl<T: NestedEncode + NestedDecode> DynamicArray<T> {
    /// Iterates the elements in order, decoding lazily.
    pub fn iter(&self) -> DynamicArrayIter<'_, T> {
        DynamicArrayIter {
            cursor: DecodeCursor::new(self.buffer.as_bytes()),
            remaining: self.len,
            _phantom: PhantomData,
        }
    }
}

impl<T: NestedDecode> Iterator for DynamicArrayIter<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        match T::dep_decode(&mut self.cursor) {
            Ok(value) => Some(value),
            Err(_) => unreachable!("array buffer holds a malformed element"),
        }
    }
}
