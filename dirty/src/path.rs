//! Key and index based access to a tag tree, and textual paths through it.
//!
//! Compounds are addressed by key, lists by index. Reads of missing keys or
//! out of bounds indices give `None`; using a key on a list, or an index on a
//! compound, is an error. Writes take [`DynamicValue`]s and encode them before
//! touching the tree, so a value that fails to encode leaves the tree as it
//! was.
//!
//! ```
//! use dirty::{path::Path, tag, DynamicValue};
//!
//! let mut player = tag!({"Inventory": [{"id": "minecraft:stone", "Count": 1i8}]});
//! let path: Path = "Inventory[0].id".parse().unwrap();
//! assert_eq!(player.pointer(&path).unwrap().unwrap(), "minecraft:stone");
//!
//! player.set_at(&path, Some(&DynamicValue::from("minecraft:dirt"))).unwrap();
//! assert_eq!(player.pointer(&path).unwrap().unwrap(), "minecraft:dirt");
//! ```
use std::fmt;
use std::str::FromStr;

use crate::codec::Encoder;
use crate::error::{Error, Result};
use crate::{DynamicValue, Tag};

impl Tag {
    /// The child at `key` if this is a compound.
    pub fn get_key(&self, key: &str) -> Result<Option<&Tag>> {
        match self {
            Tag::Compound(c) => Ok(c.get(key)),
            other => Err(Error::not_a_compound(other.kind())),
        }
    }

    pub fn get_key_mut(&mut self, key: &str) -> Result<Option<&mut Tag>> {
        match self {
            Tag::Compound(c) => Ok(c.get_mut(key)),
            other => Err(Error::not_a_compound(other.kind())),
        }
    }

    /// The element at `index` if this is a list.
    pub fn get_index(&self, index: usize) -> Result<Option<&Tag>> {
        match self {
            Tag::List(l) => Ok(l.get(index)),
            other => Err(Error::not_a_list(other.kind())),
        }
    }

    pub fn get_index_mut(&mut self, index: usize) -> Result<Option<&mut Tag>> {
        match self {
            Tag::List(l) => Ok(l.get_mut(index)),
            other => Err(Error::not_a_list(other.kind())),
        }
    }

    /// Store `value` at `key`, replacing what was there. `None` removes the
    /// key instead. Returns the stored tag.
    pub fn set_key(&mut self, key: &str, value: Option<&DynamicValue>) -> Result<Option<&Tag>> {
        self.set_key_with(key, value, &Encoder::default())
    }

    pub fn set_key_with(
        &mut self,
        key: &str,
        value: Option<&DynamicValue>,
        encoder: &Encoder,
    ) -> Result<Option<&Tag>> {
        let compound = match self {
            Tag::Compound(c) => c,
            other => return Err(Error::not_a_compound(other.kind())),
        };

        match value {
            None => {
                compound.shift_remove(key);
                Ok(None)
            }
            Some(value) => {
                let tag = encoder.encode(value)?;
                let (index, _) = compound.insert_full(key.to_owned(), tag);
                Ok(compound.get_index(index).map(|(_, v)| v))
            }
        }
    }

    /// Remove `key` from a compound, returning the removed tag.
    pub fn remove(&mut self, key: &str) -> Result<Option<Tag>> {
        match self {
            Tag::Compound(c) => Ok(c.shift_remove(key)),
            other => Err(Error::not_a_compound(other.kind())),
        }
    }

    /// Replace the element at `index` of a list. The index must be in
    /// bounds, use [`Tag::append`] to grow the list.
    pub fn set_index(&mut self, index: usize, value: &DynamicValue) -> Result<&Tag> {
        self.set_index_with(index, value, &Encoder::default())
    }

    pub fn set_index_with(
        &mut self,
        index: usize,
        value: &DynamicValue,
        encoder: &Encoder,
    ) -> Result<&Tag> {
        let list = match self {
            Tag::List(l) => l,
            other => return Err(Error::not_a_list(other.kind())),
        };
        if index >= list.len() {
            return Err(Error::index_out_of_range(index, list.len()));
        }
        list.replace(index, encoder.encode(value)?)
    }

    /// Add `value` to the end of a list, returning the stored tag.
    pub fn append(&mut self, value: &DynamicValue) -> Result<&Tag> {
        self.append_with(value, &Encoder::default())
    }

    pub fn append_with(&mut self, value: &DynamicValue, encoder: &Encoder) -> Result<&Tag> {
        let list = match self {
            Tag::List(l) => l,
            other => return Err(Error::not_a_list(other.kind())),
        };
        list.push(encoder.encode(value)?)
    }

    /// Walk `path` from this tag.
    pub fn pointer(&self, path: &Path) -> Result<Option<&Tag>> {
        let mut current = self;
        for segment in path.segments() {
            let next = match segment {
                Segment::Key(key) => current.get_key(key)?,
                Segment::Index(index) => current.get_index(*index)?,
            };
            match next {
                Some(next) => current = next,
                None => return Ok(None),
            }
        }
        Ok(Some(current))
    }

    pub fn pointer_mut(&mut self, path: &Path) -> Result<Option<&mut Tag>> {
        let mut current = self;
        for segment in path.segments() {
            let next = match segment {
                Segment::Key(key) => current.get_key_mut(key)?,
                Segment::Index(index) => current.get_index_mut(*index)?,
            };
            match next {
                Some(next) => current = next,
                None => return Ok(None),
            }
        }
        Ok(Some(current))
    }

    /// Set the node `path` points at. The parent must exist. A `None` value
    /// removes a compound key, and is an error for a list index.
    pub fn set_at(&mut self, path: &Path, value: Option<&DynamicValue>) -> Result<()> {
        self.set_at_with(path, value, &Encoder::default())
    }

    pub fn set_at_with(
        &mut self,
        path: &Path,
        value: Option<&DynamicValue>,
        encoder: &Encoder,
    ) -> Result<()> {
        let (parent, last) = path
            .split_last()
            .ok_or_else(|| Error::invalid_path(&path.to_string(), "cannot replace the root"))?;
        let node = self
            .pointer_mut(&parent)?
            .ok_or_else(|| Error::bespoke(format!("nothing at {}", parent)))?;

        match last {
            Segment::Key(key) => node.set_key_with(key, value, encoder).map(|_| ()),
            Segment::Index(index) => {
                let value = value.ok_or_else(Error::null_not_encodable)?;
                node.set_index_with(*index, value, encoder).map(|_| ())
            }
        }
    }

    /// Append to the list `path` points at.
    pub fn append_at(&mut self, path: &Path, value: &DynamicValue) -> Result<()> {
        self.append_at_with(path, value, &Encoder::default())
    }

    pub fn append_at_with(
        &mut self,
        path: &Path,
        value: &DynamicValue,
        encoder: &Encoder,
    ) -> Result<()> {
        let node = self
            .pointer_mut(path)?
            .ok_or_else(|| Error::bespoke(format!("nothing at {}", path)))?;
        node.append_with(value, encoder).map(|_| ())
    }
}

/// One step of a [`Path`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Key(String),
    Index(usize),
}

/// A path from a root tag to one of its descendants, eg
/// `Data.Player.Inventory[3].tag`.
///
/// Keys are separated by dots, list indices are written in brackets. Keys
/// containing `.`, `[` or `"` can be double quoted, with `\"` and `\\`
/// escapes. The empty string is the path to the root itself.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.segments.push(Segment::Key(key.into()));
        self
    }

    pub fn index(mut self, index: usize) -> Self {
        self.segments.push(Segment::Index(index));
        self
    }

    /// The path to the parent, and the final step. `None` for the root.
    pub fn split_last(&self) -> Option<(Path, &Segment)> {
        let (last, rest) = self.segments.split_last()?;
        Some((
            Path {
                segments: rest.to_vec(),
            },
            last,
        ))
    }
}

impl FromStr for Path {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut chars = s.chars().peekable();

        if s.is_empty() {
            return Ok(Path::root());
        }

        loop {
            match chars.peek() {
                Some('[') => {
                    chars.next();
                    let mut digits = String::new();
                    loop {
                        match chars.next() {
                            Some(']') => break,
                            Some(c) if c.is_ascii_digit() => digits.push(c),
                            Some(_) => return Err(Error::invalid_path(s, "index must be a number")),
                            None => return Err(Error::invalid_path(s, "unclosed '['")),
                        }
                    }
                    let index = digits
                        .parse()
                        .map_err(|_| Error::invalid_path(s, "index must be a number"))?;
                    segments.push(Segment::Index(index));
                }
                Some('"') => {
                    chars.next();
                    let mut key = String::new();
                    loop {
                        match chars.next() {
                            Some('"') => break,
                            Some('\\') => match chars.next() {
                                Some(c @ ('"' | '\\')) => key.push(c),
                                _ => return Err(Error::invalid_path(s, "bad escape in key")),
                            },
                            Some(c) => key.push(c),
                            None => return Err(Error::invalid_path(s, "unclosed quote")),
                        }
                    }
                    segments.push(Segment::Key(key));
                }
                Some('.') | None => return Err(Error::invalid_path(s, "empty key")),
                Some(_) => {
                    let mut key = String::new();
                    while let Some(&c) = chars.peek() {
                        if c == '.' || c == '[' {
                            break;
                        }
                        key.push(c);
                        chars.next();
                    }
                    segments.push(Segment::Key(key));
                }
            }

            match chars.peek() {
                None => break,
                Some('[') => {}
                Some('.') => {
                    chars.next();
                }
                Some(_) => return Err(Error::invalid_path(s, "expected '.' or '['")),
            }
        }

        Ok(Path { segments })
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Index(index) => write!(f, "[{}]", index)?,
                Segment::Key(key) => {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    if key.is_empty() || key.contains(|c: char| matches!(c, '.' | '[' | '"')) {
                        f.write_str("\"")?;
                        for c in key.chars() {
                            if c == '"' || c == '\\' {
                                f.write_str("\\")?;
                            }
                            write!(f, "{}", c)?;
                        }
                        f.write_str("\"")?;
                    } else {
                        f.write_str(key)?;
                    }
                }
            }
        }
        Ok(())
    }
}
