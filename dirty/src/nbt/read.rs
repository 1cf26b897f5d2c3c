use std::convert::TryFrom;
use std::io::Read;

use byteorder::{BigEndian, ReadBytesExt};

use crate::error::{Error, Result};
use crate::{Compound, Tag, TagKind, TagList};

use super::{NamedTag, MAX_DEPTH};

/// Reader builds owned tag trees from any `Read`. Does not do decompression.
pub struct Reader<R: Read> {
    reader: R,
}

impl<R: Read> Reader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Consumes this reader, returning the underlying value.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Read a tag id, a name and the payload for that tag.
    pub fn read_named(&mut self) -> Result<NamedTag> {
        let kind = self.read_kind()?;
        if kind == TagKind::End {
            return Err(Error::bespoke("invalid nbt: root tag is End"));
        }
        let name = self.read_size_prefixed_string()?;
        let tag = self.read_payload(kind)?;
        Ok(NamedTag { name, tag })
    }

    fn read_kind(&mut self) -> Result<TagKind> {
        let id = self.reader.read_u8()?;
        TagKind::try_from(id).map_err(|_| Error::invalid_tag(id))
    }

    fn read_size_prefixed_string(&mut self) -> Result<String> {
        let len = self.reader.read_u16::<BigEndian>()? as usize;

        let mut buf = vec![0; len];
        self.reader.read_exact(&mut buf[..])?;

        match cesu8::from_java_cesu8(&buf[..]) {
            Ok(s) => Ok(s.into_owned()),
            Err(_) => Err(Error::nonunicode(buf)),
        }
    }

    fn read_len(&mut self) -> Result<usize> {
        let len = self.reader.read_i32::<BigEndian>()?;
        // Negative lengths are read as empty.
        Ok(usize::try_from(len).unwrap_or(0))
    }

    /// Read the payload of a `kind` tag. Lists and compounds are read with an
    /// explicit stack of open containers rather than by recursion.
    fn read_payload(&mut self, kind: TagKind) -> Result<Tag> {
        if !is_container(kind) {
            return self.read_value(kind);
        }

        let mut current = self.open(kind)?;
        let mut parents: Vec<Layer> = Vec::new();
        loop {
            match self.next_kind(&mut current)? {
                Some(kind) if is_container(kind) => {
                    // The root container is depth 1.
                    if parents.len() + 2 > MAX_DEPTH {
                        return Err(Error::bespoke(format!(
                            "invalid nbt: nested deeper than {}",
                            MAX_DEPTH
                        )));
                    }
                    let child = self.open(kind)?;
                    parents.push(std::mem::replace(&mut current, child));
                }
                Some(kind) => {
                    let value = self.read_value(kind)?;
                    current.attach(value);
                }
                None => match parents.pop() {
                    Some(parent) => {
                        let done = std::mem::replace(&mut current, parent);
                        current.attach(done.into_tag());
                    }
                    None => return Ok(current.into_tag()),
                },
            }
        }
    }

    /// Read the header of a list or compound.
    fn open(&mut self, kind: TagKind) -> Result<Layer> {
        Ok(match kind {
            TagKind::List => {
                let element = self.read_kind()?;
                let remaining = self.read_len()?;
                if element == TagKind::End && remaining > 0 {
                    return Err(Error::bespoke("invalid nbt: list of End with elements"));
                }
                Layer::List {
                    element,
                    remaining,
                    items: Vec::with_capacity(remaining.min(4096)),
                }
            }
            _ => Layer::Compound {
                compound: Compound::new(),
                key: String::new(),
            },
        })
    }

    /// The kind of the next payload in `layer`, or `None` once it is complete.
    fn next_kind(&mut self, layer: &mut Layer) -> Result<Option<TagKind>> {
        match layer {
            Layer::List {
                element, remaining, ..
            } => {
                if *remaining == 0 {
                    return Ok(None);
                }
                *remaining -= 1;
                Ok(Some(*element))
            }
            Layer::Compound { key, .. } => {
                let kind = self.read_kind()?;
                if kind == TagKind::End {
                    return Ok(None);
                }
                *key = self.read_size_prefixed_string()?;
                Ok(Some(kind))
            }
        }
    }

    /// Read a payload that holds no other tags.
    fn read_value(&mut self, kind: TagKind) -> Result<Tag> {
        Ok(match kind {
            TagKind::Byte => Tag::Byte(self.reader.read_i8()?),
            TagKind::Short => Tag::Short(self.reader.read_i16::<BigEndian>()?),
            TagKind::Int => Tag::Int(self.reader.read_i32::<BigEndian>()?),
            TagKind::Long => Tag::Long(self.reader.read_i64::<BigEndian>()?),
            TagKind::Float => Tag::Float(self.reader.read_f32::<BigEndian>()?),
            TagKind::Double => Tag::Double(self.reader.read_f64::<BigEndian>()?),
            TagKind::String => Tag::String(self.read_size_prefixed_string()?),
            TagKind::ByteArray => {
                let len = self.read_len()?;
                let mut buf = Vec::with_capacity(len.min(4096));
                (&mut self.reader).take(len as u64).read_to_end(&mut buf)?;
                if buf.len() != len {
                    return Err(Error::from(std::io::Error::from(
                        std::io::ErrorKind::UnexpectedEof,
                    )));
                }
                Tag::ByteArray(buf.into_iter().map(|b| b as i8).collect())
            }
            TagKind::IntArray => {
                let len = self.read_len()?;
                let mut buf = Vec::with_capacity(len.min(4096));
                for _ in 0..len {
                    buf.push(self.reader.read_i32::<BigEndian>()?);
                }
                Tag::IntArray(buf)
            }
            TagKind::LongArray => {
                let len = self.read_len()?;
                let mut buf = Vec::with_capacity(len.min(4096));
                for _ in 0..len {
                    buf.push(self.reader.read_i64::<BigEndian>()?);
                }
                Tag::LongArray(buf)
            }
            TagKind::End | TagKind::List | TagKind::Compound => {
                return Err(Error::unsupported_tag(kind))
            }
        })
    }
}

fn is_container(kind: TagKind) -> bool {
    matches!(kind, TagKind::List | TagKind::Compound)
}

/// A list or compound that is still being read.
enum Layer {
    List {
        element: TagKind,
        remaining: usize,
        items: Vec<Tag>,
    },
    Compound {
        compound: Compound,
        /// Name of the entry whose payload is read next.
        key: String,
    },
}

impl Layer {
    fn attach(&mut self, tag: Tag) {
        match self {
            Layer::List { items, .. } => items.push(tag),
            Layer::Compound { compound, key } => {
                compound.insert(std::mem::take(key), tag);
            }
        }
    }

    fn into_tag(self) -> Tag {
        match self {
            Layer::List { element, items, .. } => Tag::List(TagList::from_parts(element, items)),
            Layer::Compound { compound, .. } => Tag::Compound(compound),
        }
    }
}
