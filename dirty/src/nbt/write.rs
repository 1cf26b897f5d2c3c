use std::convert::TryFrom;
use std::io::Write;

use byteorder::{BigEndian, WriteBytesExt};

use crate::error::{Error, Result};
use crate::{Compound, Tag, TagKind, TagList};

pub(crate) trait WriteNbt: Write {
    fn write_kind(&mut self, kind: TagKind) -> Result<()> {
        self.write_u8(kind.into())?;
        Ok(())
    }

    fn write_size_prefixed_str(&mut self, s: &str) -> Result<()> {
        let s = cesu8::to_java_cesu8(s);
        let len = u16::try_from(s.len())
            .map_err(|_| Error::bespoke(format!("string too long: {} bytes", s.len())))?;
        self.write_u16::<BigEndian>(len)?;
        self.write_all(&s)?;
        Ok(())
    }

    fn write_len(&mut self, len: usize) -> Result<()> {
        let len =
            i32::try_from(len).map_err(|_| Error::bespoke(format!("len too large: {}", len)))?;
        self.write_i32::<BigEndian>(len)?;
        Ok(())
    }

    // Deep trees recurse through here, keep it a plain dispatch.
    fn write_payload(&mut self, tag: &Tag) -> Result<()> {
        match tag {
            Tag::List(list) => self.write_list(list),
            Tag::Compound(compound) => self.write_compound(compound),
            other => self.write_value(other),
        }
    }

    fn write_list(&mut self, list: &TagList) -> Result<()> {
        list.check_homogeneous()?;
        self.write_kind(list.element())?;
        self.write_len(list.len())?;
        for item in list {
            self.write_payload(item)?;
        }
        Ok(())
    }

    fn write_compound(&mut self, compound: &Compound) -> Result<()> {
        for (name, value) in compound {
            self.write_kind(value.kind())?;
            self.write_size_prefixed_str(name)?;
            self.write_payload(value)?;
        }
        self.write_kind(TagKind::End)
    }

    fn write_value(&mut self, tag: &Tag) -> Result<()> {
        match tag {
            Tag::Byte(v) => self.write_i8(*v)?,
            Tag::Short(v) => self.write_i16::<BigEndian>(*v)?,
            Tag::Int(v) => self.write_i32::<BigEndian>(*v)?,
            Tag::Long(v) => self.write_i64::<BigEndian>(*v)?,
            Tag::Float(v) => self.write_f32::<BigEndian>(*v)?,
            Tag::Double(v) => self.write_f64::<BigEndian>(*v)?,
            Tag::String(s) => self.write_size_prefixed_str(s)?,
            Tag::ByteArray(v) => {
                self.write_len(v.len())?;
                let bytes: Vec<u8> = v.iter().map(|&b| b as u8).collect();
                self.write_all(&bytes)?;
            }
            Tag::IntArray(v) => {
                self.write_len(v.len())?;
                for i in v {
                    self.write_i32::<BigEndian>(*i)?;
                }
            }
            Tag::LongArray(v) => {
                self.write_len(v.len())?;
                for i in v {
                    self.write_i64::<BigEndian>(*i)?;
                }
            }
            Tag::End | Tag::List(_) | Tag::Compound(_) => {
                return Err(Error::unsupported_tag(tag.kind()))
            }
        }
        Ok(())
    }
}

impl<T> WriteNbt for T where T: Write {}

pub(crate) fn write_named<W: Write>(writer: &mut W, name: &str, tag: &Tag) -> Result<()> {
    // An End root has no name or payload.
    if let Tag::End = tag {
        return Err(Error::unsupported_tag(TagKind::End));
    }
    writer.write_kind(tag.kind())?;
    writer.write_size_prefixed_str(name)?;
    writer.write_payload(tag)
}
