//! Stringified NBT, the text form used by in-game commands.
//!
//! [`Tag`] implements [`Display`](fmt::Display) in this format:
//!
//! ```
//! use dirty::tag;
//!
//! let item = tag!({"id": "minecraft:stone", "Count": 3i8, "display": {"Name": "\"Rock\""}});
//! assert_eq!(
//!     item.to_string(),
//!     r#"{id:"minecraft:stone",Count:3b,display:{Name:"\"Rock\""}}"#
//! );
//! ```
use std::fmt::{self, Display, Write};

use crate::Tag;

impl Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Never valid in a tree, rendered as nothing.
            Tag::End => Ok(()),
            Tag::Byte(v) => write!(f, "{}b", v),
            Tag::Short(v) => write!(f, "{}s", v),
            Tag::Int(v) => write!(f, "{}", v),
            Tag::Long(v) => write!(f, "{}L", v),
            Tag::Float(v) => write!(f, "{}f", v),
            Tag::Double(v) => write!(f, "{}d", v),
            Tag::String(s) => write_quoted(f, s),
            Tag::ByteArray(v) => write_array(f, "B", v.iter().map(|b| Tag::Byte(*b))),
            Tag::IntArray(v) => write_array(f, "I", v.iter().map(|i| Tag::Int(*i))),
            Tag::LongArray(v) => write_array(f, "L", v.iter().map(|l| Tag::Long(*l))),
            Tag::List(list) => {
                f.write_char('[')?;
                for (i, item) in list.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    item.fmt(f)?;
                }
                f.write_char(']')
            }
            Tag::Compound(compound) => {
                f.write_char('{')?;
                for (i, (key, value)) in compound.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    if is_bare_key(key) {
                        f.write_str(key)?;
                    } else {
                        write_quoted(f, key)?;
                    }
                    f.write_char(':')?;
                    value.fmt(f)?;
                }
                f.write_char('}')
            }
        }
    }
}

fn write_array(
    f: &mut fmt::Formatter<'_>,
    prefix: &str,
    items: impl Iterator<Item = Tag>,
) -> fmt::Result {
    write!(f, "[{};", prefix)?;
    for (i, item) in items.enumerate() {
        if i > 0 {
            f.write_char(',')?;
        }
        item.fmt(f)?;
    }
    f.write_char(']')
}

fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in s.chars() {
        if c == '"' || c == '\\' {
            f.write_char('\\')?;
        }
        f.write_char(c)?;
    }
    f.write_char('"')
}

/// Keys made only of these characters can be written without quotes.
pub fn is_bare_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '+' | '-'))
}
