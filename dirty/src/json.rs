//! JSON text for dynamic values, and through the codec for tags.
//!
//! Object keys keep the order they had in the tree.
//!
//! ```
//! use dirty::codec::Encoder;
//! use dirty::{json, Tag};
//!
//! let tag = json::tag_from_json(r#"{"Count": 3, "id": "stone"}"#, &Encoder::strict()).unwrap();
//! assert_eq!(tag.get_key("Count").unwrap(), Some(&Tag::Int(3)));
//! assert_eq!(json::tag_to_json(&tag, false).unwrap(), r#"{"Count":3,"id":"stone"}"#);
//! ```
use crate::codec::{self, Encoder};
use crate::error::{Error, Result};
use crate::{DynamicValue, Tag};

/// Render JSON text. NaN and the infinities have no JSON form and fail with
/// [`UnsupportedValueKind`][crate::error::ErrorKind::UnsupportedValueKind].
pub fn to_string(value: &DynamicValue) -> Result<String> {
    check_finite(value)?;
    Ok(serde_json::to_string(value)?)
}

pub fn to_string_pretty(value: &DynamicValue) -> Result<String> {
    check_finite(value)?;
    Ok(serde_json::to_string_pretty(value)?)
}

fn check_finite(value: &DynamicValue) -> Result<()> {
    let mut pending = vec![value];
    while let Some(value) = pending.pop() {
        match value {
            DynamicValue::Float(v) if !v.is_finite() => {
                return Err(Error::unsupported_value(format!("float {}", v)));
            }
            DynamicValue::List(items) => pending.extend(items),
            DynamicValue::Map(map) => pending.extend(map.values()),
            _ => {}
        }
    }
    Ok(())
}

/// Parse JSON text. Integers outside the range of `i64` are rejected.
pub fn from_str(s: &str) -> Result<DynamicValue> {
    Ok(serde_json::from_str(s)?)
}

/// Decode `tag` and render it as JSON.
pub fn tag_to_json(tag: &Tag, pretty: bool) -> Result<String> {
    let value = codec::decode(tag)?;
    if pretty {
        to_string_pretty(&value)
    } else {
        to_string(&value)
    }
}

/// Parse JSON text and encode it into a tag with `encoder`.
pub fn tag_from_json(s: &str, encoder: &Encoder) -> Result<Tag> {
    encoder.encode(&from_str(s)?)
}
