//! Owners of tag trees.
//!
//! A [`TagSource`] hands out a copy of the tree it owns and takes a new tree
//! back. The crate never reaches into an owner any other way, so anything
//! that can produce and accept a [`Tag`] can be edited: a file on disk, an
//! item inside a running server, a fixture in a test.
//!
//! Sources are not synchronised. If several threads share one, they need to
//! wrap it in a lock themselves.
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use log::debug;

use crate::error::Result;
use crate::nbt::{self, NamedTag};
use crate::Tag;

pub trait TagSource {
    /// Read the current tree.
    fn read(&mut self) -> Result<Tag>;

    /// Replace the tree.
    fn write(&mut self, tag: Tag) -> Result<()>;
}

/// Load the tree from `source`, let `f` change it, and store it back.
///
/// If `f` fails the source is left untouched.
///
/// ```
/// use dirty::source::{modify, MemorySource, TagSource};
/// use dirty::{tag, DynamicValue};
///
/// let mut source = MemorySource::new(tag!({"Count": 1i8}));
/// modify(&mut source, |tag| tag.set_key("Count", Some(&DynamicValue::Int(64))).map(|_| ())).unwrap();
/// assert_eq!(source.read().unwrap(), tag!({"Count": 64}));
/// ```
pub fn modify<S, F, T>(source: &mut S, f: F) -> Result<T>
where
    S: TagSource + ?Sized,
    F: FnOnce(&mut Tag) -> Result<T>,
{
    let mut tag = source.read()?;
    let out = f(&mut tag)?;
    source.write(tag)?;
    Ok(out)
}

/// A tree held in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct MemorySource {
    tag: Tag,
}

impl MemorySource {
    pub fn new(tag: Tag) -> Self {
        Self { tag }
    }

    pub fn into_inner(self) -> Tag {
        self.tag
    }
}

impl TagSource for MemorySource {
    fn read(&mut self) -> Result<Tag> {
        Ok(self.tag.clone())
    }

    fn write(&mut self, tag: Tag) -> Result<()> {
        self.tag = tag;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    None,
    Gzip,
}

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// An NBT file, like `level.dat` or a player's `.dat` file.
///
/// Compression is detected when reading, and the same compression and root
/// name are used when writing back. A file that has not been read yet is
/// written gzip compressed with an empty root name, like the game does.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    compression: Compression,
    root_name: String,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            compression: Compression::Gzip,
            root_name: String::new(),
        }
    }

    /// Write to `path` instead, keeping the compression and root name seen so far.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn compression(&self) -> Compression {
        self.compression
    }

    pub fn root_name(&self) -> &str {
        &self.root_name
    }
}

impl TagSource for FileSource {
    fn read(&mut self) -> Result<Tag> {
        let raw = fs::read(&self.path)?;

        let (compression, data) = if raw.starts_with(&GZIP_MAGIC) {
            let mut data = vec![];
            GzDecoder::new(raw.as_slice()).read_to_end(&mut data)?;
            (Compression::Gzip, data)
        } else {
            (Compression::None, raw)
        };

        let root = nbt::from_bytes(&data)?;
        debug!(
            "read {} ({:?}, {} bytes, root {:?})",
            self.path.display(),
            compression,
            data.len(),
            root.name
        );

        self.compression = compression;
        self.root_name = root.name;
        Ok(root.tag)
    }

    fn write(&mut self, tag: Tag) -> Result<()> {
        let root = NamedTag::new(self.root_name.clone(), tag);
        let data = nbt::to_bytes(&root)?;

        let out = match self.compression {
            Compression::None => data,
            Compression::Gzip => {
                let mut encoder = GzEncoder::new(vec![], flate2::Compression::default());
                encoder.write_all(&data)?;
                encoder.finish()?
            }
        };

        fs::write(&self.path, &out)?;
        debug!(
            "wrote {} ({:?}, {} bytes)",
            self.path.display(),
            self.compression,
            out.len()
        );
        Ok(())
    }
}
