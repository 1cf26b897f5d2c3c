//! dirty reads, converts and edits the NBT tag trees that *Minecraft: Java
//! Edition* uses to persist items, block entities and entities.
//!
//! The crate is built around two tree types:
//!
//! * [`Tag`], the strongly typed tree as stored by the game, and
//! * [`DynamicValue`], a JSON-compatible tree used for display and editing.
//!
//! [`codec`] converts between the two. The conversion is deliberately not
//! symmetric: booleans only exist on the dynamic side and become `Int` tags
//! of `0` or `1` when encoded, and every integer tag decodes to a 64-bit
//! integer.
//!
//! ```
//! use dirty::{codec, json, tag, Tag};
//!
//! let item = tag!({
//!     "id": "minecraft:stone",
//!     "Count": 3i8,
//! });
//!
//! let value = codec::decode(&item).unwrap();
//! assert_eq!(json::to_string(&value).unwrap(), r#"{"id":"minecraft:stone","Count":3}"#);
//!
//! // The way back widens nothing and picks 32-bit ints for integers.
//! let back = codec::encode(&value).unwrap();
//! assert_eq!(back.get_key("Count").unwrap(), Some(&Tag::Int(3)));
//! ```
//!
//! # Editing in place
//!
//! [`Tag`] has key and index based accessors ([`Tag::get_key`],
//! [`Tag::set_key`], [`Tag::append`], ...) that take dynamic values and
//! encode them on the way in. A textual [`path::Path`] such as
//! `Data.Inventory[0].tag` can address nested nodes.
//!
//! # Where trees come from
//!
//! The tree is always owned by something else: a file, a running server, a
//! test fixture. [`source::TagSource`] is the boundary to such owners, with
//! [`source::FileSource`] reading and writing NBT files (optionally gzip
//! compressed) through the [`nbt`] module. Differences between game versions
//! live behind [`bridge::HostBridge`].

pub mod bridge;
pub mod codec;
pub mod dynamic;
pub mod error;
pub mod json;
pub mod naming;
pub mod nbt;
pub mod path;
pub mod snbt;
pub mod source;
pub mod structure;

mod macros;
mod tag;

pub use dynamic::{to_dynamic, DynamicValue};
pub use tag::*;

#[cfg(test)]
mod test;

use std::convert::TryFrom;

/// The kind of an NBT tag. This does not carry the value or the name of the data.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[cfg_attr(feature = "arbitrary1", derive(arbitrary::Arbitrary))]
#[repr(u8)]
pub enum TagKind {
    /// Represents the end of a Compound object, or the element kind of an
    /// empty list.
    End = 0,
    /// Equivalent to i8.
    Byte = 1,
    /// Equivalent to i16.
    Short = 2,
    /// Equivalent to i32.
    Int = 3,
    /// Equivalent to i64
    Long = 4,
    /// Equivalent to f32.
    Float = 5,
    /// Equivalent to f64.
    Double = 6,
    /// Represents as array of Byte (i8).
    ByteArray = 7,
    /// Represents a Unicode string.
    String = 8,
    /// Represents a list of other objects, all of the same kind.
    List = 9,
    /// Represents a struct-like structure.
    Compound = 10,
    /// Represents as array of Int (i32).
    IntArray = 11,
    /// Represents as array of Long (i64).
    LongArray = 12,
}

impl TryFrom<u8> for TagKind {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, ()> {
        use TagKind::*;
        Ok(match value {
            0 => End,
            1 => Byte,
            2 => Short,
            3 => Int,
            4 => Long,
            5 => Float,
            6 => Double,
            7 => ByteArray,
            8 => String,
            9 => List,
            10 => Compound,
            11 => IntArray,
            12 => LongArray,
            13..=u8::MAX => return Err(()),
        })
    }
}

impl From<TagKind> for u8 {
    fn from(kind: TagKind) -> Self {
        kind as u8
    }
}
