//! Conversion between [`Tag`] trees and [`DynamicValue`] trees.
//!
//! Both directions are pure: the input is only read and the output is a new,
//! independently owned tree. A failed conversion returns no partial tree.
//!
//! The two directions are not inverses of each other. Decoding widens every
//! integer tag to `i64` and every float tag to `f64`; encoding picks `Int` and
//! `Double` tags and turns booleans into `Int` tags holding `0` or `1`:
//!
//! ```
//! use dirty::{codec, DynamicValue, Tag};
//!
//! let tag = codec::encode(&DynamicValue::Bool(true)).unwrap();
//! assert_eq!(tag, Tag::Int(1));
//! assert_eq!(codec::decode(&tag).unwrap(), DynamicValue::Int(1));
//! ```
use std::convert::TryFrom;

use crate::dynamic::{DynamicValue, Map};
use crate::error::{Error, Result};
use crate::{Compound, Tag, TagKind, TagList};

/// What to do with a list whose elements encode to different tag kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListPolicy {
    /// Fail with [`HeterogeneousList`][crate::error::ErrorKind::HeterogeneousList].
    Strict,
    /// Declare the kind of the first element and keep the rest as they are.
    /// Such a list cannot be written as binary NBT.
    Trusting,
}

/// What to do with an integer that does not fit in an `Int` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegerPolicy {
    /// Fail with [`IntegerOverflow`][crate::error::ErrorKind::IntegerOverflow].
    Strict,
    /// Keep the low 32 bits.
    Truncate,
}

/// Encoder turns [`DynamicValue`]s into [`Tag`]s.
///
/// The default encoder is strict about both lists and integers. The lossy
/// encoder reproduces what plugins built on the game's own tag classes do:
/// trust list contents and truncate integers to 32 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Encoder {
    pub lists: ListPolicy,
    pub integers: IntegerPolicy,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::strict()
    }
}

impl Encoder {
    pub fn strict() -> Self {
        Self {
            lists: ListPolicy::Strict,
            integers: IntegerPolicy::Strict,
        }
    }

    pub fn lossy() -> Self {
        Self {
            lists: ListPolicy::Trusting,
            integers: IntegerPolicy::Truncate,
        }
    }

    /// Encode a value into a new tag tree.
    pub fn encode(&self, value: &DynamicValue) -> Result<Tag> {
        match value {
            DynamicValue::Map(map) => self.encode_map(map).map(Tag::Compound),
            DynamicValue::List(items) => self.encode_list(items).map(Tag::List),
            other => self.encode_value(other),
        }
    }

    fn encode_map(&self, map: &Map) -> Result<Compound> {
        let mut compound = Compound::with_capacity(map.len());
        for (key, value) in map {
            compound.insert(key.clone(), self.encode(value)?);
        }
        Ok(compound)
    }

    fn encode_list(&self, items: &[DynamicValue]) -> Result<TagList> {
        let mut tags = Vec::with_capacity(items.len());
        for item in items {
            tags.push(self.encode(item)?);
        }

        match self.lists {
            ListPolicy::Strict => TagList::try_from_items(tags),
            ListPolicy::Trusting => Ok(TagList::from_items(tags)),
        }
    }

    fn encode_value(&self, value: &DynamicValue) -> Result<Tag> {
        Ok(match value {
            DynamicValue::Text(s) => Tag::String(s.clone()),
            DynamicValue::Int(v) => Tag::Int(self.narrow(*v)?),
            DynamicValue::Float(v) => Tag::Double(*v),
            DynamicValue::Bool(v) => Tag::Int(i32::from(*v)),
            DynamicValue::ByteBuffer(v) => Tag::ByteArray(v.clone()),
            DynamicValue::IntSequence(v) => Tag::IntArray(v.clone()),
            DynamicValue::LongSequence(v) => Tag::LongArray(v.clone()),
            DynamicValue::Null => return Err(Error::null_not_encodable()),
            DynamicValue::Map(_) | DynamicValue::List(_) => {
                return Err(Error::unsupported_value("nested value"))
            }
        })
    }

    fn narrow(&self, v: i64) -> Result<i32> {
        match self.integers {
            IntegerPolicy::Strict => i32::try_from(v).map_err(|_| Error::integer_overflow(v)),
            IntegerPolicy::Truncate => Ok(v as i32),
        }
    }
}

/// Encode a value with the strict [`Encoder`].
pub fn encode(value: &DynamicValue) -> Result<Tag> {
    Encoder::strict().encode(value)
}

/// Decode a tag tree into a new dynamic value.
///
/// Fails with [`UnsupportedTagKind`][crate::error::ErrorKind::UnsupportedTagKind]
/// if the tree contains an `End` node.
pub fn decode(tag: &Tag) -> Result<DynamicValue> {
    match tag {
        Tag::Compound(compound) => decode_compound(compound),
        Tag::List(list) => decode_list(list),
        other => decode_value(other),
    }
}

fn decode_compound(compound: &Compound) -> Result<DynamicValue> {
    let mut map = Map::with_capacity(compound.len());
    for (key, value) in compound {
        map.insert(key.clone(), decode(value)?);
    }
    Ok(DynamicValue::Map(map))
}

fn decode_list(list: &TagList) -> Result<DynamicValue> {
    let mut items = Vec::with_capacity(list.len());
    for item in list {
        items.push(decode(item)?);
    }
    Ok(DynamicValue::List(items))
}

fn decode_value(tag: &Tag) -> Result<DynamicValue> {
    Ok(match tag {
        Tag::String(s) => DynamicValue::Text(s.clone()),
        Tag::Byte(v) => DynamicValue::Int(*v as i64),
        Tag::Short(v) => DynamicValue::Int(*v as i64),
        Tag::Int(v) => DynamicValue::Int(*v as i64),
        Tag::Long(v) => DynamicValue::Int(*v),
        Tag::Float(v) => DynamicValue::Float(*v as f64),
        Tag::Double(v) => DynamicValue::Float(*v),
        Tag::ByteArray(v) => DynamicValue::ByteBuffer(v.clone()),
        Tag::IntArray(v) => DynamicValue::IntSequence(v.clone()),
        Tag::LongArray(v) => DynamicValue::LongSequence(v.clone()),
        Tag::End | Tag::List(_) | Tag::Compound(_) => {
            return Err(Error::unsupported_tag(tag.kind()))
        }
    })
}
