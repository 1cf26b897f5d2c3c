//! Binary NBT, as written by *Minecraft: Java Edition*.
//!
//! This module only deals with uncompressed data, see
//! [`FileSource`][crate::source::FileSource] for gzip handling.
//!
//! ```
//! use dirty::nbt::{self, NamedTag};
//! use dirty::tag;
//!
//! let root = NamedTag::new("", tag!({"DataVersion": 3465}));
//! let bytes = nbt::to_bytes(&root).unwrap();
//! assert_eq!(nbt::from_bytes(&bytes).unwrap(), root);
//! ```
mod read;
mod write;

use std::io::{Read, Write};

use crate::error::Result;
use crate::Tag;

pub use self::read::Reader;

/// Compounds and lists nested deeper than this are rejected when reading.
/// The game uses the same limit.
pub const MAX_DEPTH: usize = 512;

/// A root tag along with its name. The name is usually the empty string.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedTag {
    pub name: String,
    pub tag: Tag,
}

impl NamedTag {
    pub fn new(name: impl Into<String>, tag: Tag) -> Self {
        Self {
            name: name.into(),
            tag,
        }
    }
}

/// Read one named tag from `reader`.
pub fn read<R: Read>(reader: R) -> Result<NamedTag> {
    Reader::new(reader).read_named()
}

/// Parse a named tag from a byte slice. Trailing bytes are ignored.
pub fn from_bytes(bytes: &[u8]) -> Result<NamedTag> {
    read(bytes)
}

/// Write a named tag to `writer`.
///
/// Fails if the tree contains an `End` node or a list whose elements do not
/// match its declared element kind.
pub fn write<W: Write>(mut writer: W, root: &NamedTag) -> Result<()> {
    write::write_named(&mut writer, &root.name, &root.tag)
}

pub fn to_bytes(root: &NamedTag) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write(&mut buf, root)?;
    Ok(buf)
}
