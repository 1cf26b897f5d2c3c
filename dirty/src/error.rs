//! Contains the Error and Result type used throughout the crate.
use std::fmt::Display;

use crate::TagKind;

/// An error from converting, editing, reading or writing a tag tree.
///
/// Every error carries a human readable message and an [`ErrorKind`] that
/// callers can match on. Errors never leave a tree half-modified: the
/// operation that raised one had no effect.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    msg: String,
    kind: ErrorKind,
}

#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Any other errors. Users should not match on this variant and should
    /// instead use a wildcard `_`. Errors in this category may be moved to new variants.
    Other,

    /// A tag of this kind cannot be converted, eg an `End` node in a tree.
    UnsupportedTagKind(TagKind),

    /// A dynamic value has no tag representation, eg a map with non-string keys.
    UnsupportedValueKind,

    /// A key based operation was used on something other than a compound.
    NotACompound(TagKind),

    /// An index based operation was used on something other than a list.
    NotAList(TagKind),

    IndexOutOfRange { index: usize, len: usize },

    /// Null has no tag representation.
    NullNotEncodable,

    /// List elements do not all have the same kind.
    HeterogeneousList { expected: TagKind, found: TagKind },

    /// Integer does not fit in the tag it is being encoded as.
    IntegerOverflow(i128),

    /// A textual path could not be parsed.
    InvalidPath,

    /// No host bridge handles the given data version.
    UnsupportedVersion(Option<i32>),

    /// Byte read from binary NBT is not a tag id.
    InvalidTag(u8),

    /// Binary NBT ended part way through a value.
    UnexpectedEof,

    /// Expected unicode string data but was not valid. Contained bytes are
    /// the invalid data.
    Nonunicode(Vec<u8>),

    Io,

    Json,
}

/// Convenience type for Result.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Get the kind of error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub(crate) fn bespoke(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            kind: ErrorKind::Other,
        }
    }

    pub(crate) fn unsupported_tag(kind: TagKind) -> Self {
        Self {
            msg: format!("unsupported tag kind: {:?}", kind),
            kind: ErrorKind::UnsupportedTagKind(kind),
        }
    }

    pub(crate) fn unsupported_value(what: impl Display) -> Self {
        Self {
            msg: format!("unsupported value kind: {}", what),
            kind: ErrorKind::UnsupportedValueKind,
        }
    }

    pub(crate) fn not_a_compound(found: TagKind) -> Self {
        Self {
            msg: format!("expected compound, found {:?}", found),
            kind: ErrorKind::NotACompound(found),
        }
    }

    pub(crate) fn not_a_list(found: TagKind) -> Self {
        Self {
            msg: format!("expected list, found {:?}", found),
            kind: ErrorKind::NotAList(found),
        }
    }

    pub(crate) fn index_out_of_range(index: usize, len: usize) -> Self {
        Self {
            msg: format!("index {} out of range for list of length {}", index, len),
            kind: ErrorKind::IndexOutOfRange { index, len },
        }
    }

    pub(crate) fn null_not_encodable() -> Self {
        Self {
            msg: "null cannot be encoded as a tag".to_owned(),
            kind: ErrorKind::NullNotEncodable,
        }
    }

    pub(crate) fn heterogeneous_list(expected: TagKind, found: TagKind) -> Self {
        Self {
            msg: format!(
                "heterogeneous list: expected {:?} elements, found {:?}",
                expected, found
            ),
            kind: ErrorKind::HeterogeneousList { expected, found },
        }
    }

    pub(crate) fn integer_overflow(value: impl Into<i128>) -> Self {
        let value = value.into();
        Self {
            msg: format!("integer {} does not fit in the target tag", value),
            kind: ErrorKind::IntegerOverflow(value),
        }
    }

    pub(crate) fn invalid_path(path: &str, reason: &str) -> Self {
        Self {
            msg: format!("invalid path {:?}: {}", path, reason),
            kind: ErrorKind::InvalidPath,
        }
    }

    pub(crate) fn unsupported_version(version: Option<i32>) -> Self {
        let msg = match version {
            Some(v) => format!("no host bridge for data version {}", v),
            None => "could not detect data version".to_owned(),
        };
        Self {
            msg,
            kind: ErrorKind::UnsupportedVersion(version),
        }
    }

    pub(crate) fn invalid_tag(tag: u8) -> Self {
        Self {
            msg: format!("invalid nbt tag value: {}", tag),
            kind: ErrorKind::InvalidTag(tag),
        }
    }

    pub(crate) fn nonunicode(data: Vec<u8>) -> Self {
        Self {
            msg: format!(
                "invalid nbt string: nonunicode: {}",
                String::from_utf8_lossy(&data)
            ),
            kind: ErrorKind::Nonunicode(data),
        }
    }
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.msg)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::UnexpectedEof => Self {
                msg: "eof: unexpectedly ran out of input".to_owned(),
                kind: ErrorKind::UnexpectedEof,
            },
            _ => Self {
                msg: format!("io error: {}", e),
                kind: ErrorKind::Io,
            },
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        // Errors raised by our own Serialize/Deserialize impls arrive here
        // flattened into text, so keep the json kind for all of them.
        Self {
            msg: format!("json error: {}", e),
            kind: ErrorKind::Json,
        }
    }
}

impl serde::de::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        Error::bespoke(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T>(msg: T) -> Self
    where
        T: Display,
    {
        Error::bespoke(msg.to_string())
    }
}
