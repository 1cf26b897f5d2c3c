mod de;
mod ser;

use indexmap::IndexMap;

pub use self::ser::{to_dynamic, Serializer};

/// The children of a [`DynamicValue::Map`].
pub type Map = IndexMap<String, DynamicValue>;

/// DynamicValue is the generic, JSON-compatible side of the codec. It is what
/// gets printed, edited and exchanged with tools.
///
/// Unlike [`Tag`][crate::Tag] it has a single integer and a single float
/// variant, a boolean and a null. Byte, int and long arrays are kept distinct
/// so that a tree decoded from a [`Tag`][crate::Tag] keeps its arrays when
/// encoded again.
///
/// ```
/// # use dirty::DynamicValue;
/// let value: DynamicValue = dirty::json::from_str(r#"{"Count": 3, "id": "stone"}"#).unwrap();
/// assert_eq!(value.get("Count"), Some(&DynamicValue::Int(3)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum DynamicValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    ByteBuffer(Vec<i8>),
    IntSequence(Vec<i32>),
    LongSequence(Vec<i64>),
    List(Vec<DynamicValue>),
    Map(Map),
}

impl DynamicValue {
    /// Short name of the variant, for messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            DynamicValue::Null => "null",
            DynamicValue::Bool(_) => "bool",
            DynamicValue::Int(_) => "int",
            DynamicValue::Float(_) => "float",
            DynamicValue::Text(_) => "text",
            DynamicValue::ByteBuffer(_) => "byte buffer",
            DynamicValue::IntSequence(_) => "int sequence",
            DynamicValue::LongSequence(_) => "long sequence",
            DynamicValue::List(_) => "list",
            DynamicValue::Map(_) => "map",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, DynamicValue::Null)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            DynamicValue::Int(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            DynamicValue::Int(v) => Some(v as f64),
            DynamicValue::Float(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            DynamicValue::Bool(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            DynamicValue::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&Vec<DynamicValue>> {
        match self {
            DynamicValue::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            DynamicValue::Map(v) => Some(v),
            _ => None,
        }
    }

    /// Look up a key if this is a map.
    pub fn get(&self, key: &str) -> Option<&DynamicValue> {
        self.as_map().and_then(|m| m.get(key))
    }
}

impl Default for DynamicValue {
    fn default() -> Self {
        DynamicValue::Null
    }
}

// ------------- From<T> impls -------------

macro_rules! from {
    ($type:ty, $variant:ident $(, $($part:tt)+)?) => {
        impl From<$type> for DynamicValue {
            fn from(val: $type) -> Self {
                Self::$variant(val$($($part)+)?)
            }
        }
    };
}
from!(bool, Bool);
from!(i8, Int, as i64);
from!(i16, Int, as i64);
from!(i32, Int, as i64);
from!(i64, Int);
from!(u8, Int, as i64);
from!(u16, Int, as i64);
from!(u32, Int, as i64);
from!(f32, Float, as f64);
from!(f64, Float);
from!(String, Text);
from!(&str, Text, .to_owned());
from!(Vec<i8>, ByteBuffer);
from!(Vec<i32>, IntSequence);
from!(Vec<i64>, LongSequence);
from!(Vec<DynamicValue>, List);
from!(Map, Map);

impl<T: Into<DynamicValue>> From<Option<T>> for DynamicValue {
    fn from(val: Option<T>) -> Self {
        val.map_or(DynamicValue::Null, Into::into)
    }
}
