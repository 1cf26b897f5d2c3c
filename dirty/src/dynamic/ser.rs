use std::convert::TryFrom;

use serde::ser::{self, Impossible, Serialize, SerializeMap as _, SerializeSeq as _};

use crate::error::{Error, Result};

use super::{DynamicValue, Map};

impl Serialize for DynamicValue {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            DynamicValue::Null => serializer.serialize_unit(),
            DynamicValue::Bool(v) => serializer.serialize_bool(*v),
            DynamicValue::Int(v) => serializer.serialize_i64(*v),
            DynamicValue::Float(v) => serializer.serialize_f64(*v),
            DynamicValue::Text(v) => serializer.serialize_str(v),
            // Arrays go out as plain number sequences, bytes keep their sign.
            DynamicValue::ByteBuffer(v) => v.serialize(serializer),
            DynamicValue::IntSequence(v) => v.serialize(serializer),
            DynamicValue::LongSequence(v) => v.serialize(serializer),
            DynamicValue::List(v) => {
                let mut seq = serializer.serialize_seq(Some(v.len()))?;
                for el in v {
                    seq.serialize_element(el)?;
                }
                seq.end()
            }
            DynamicValue::Map(v) => {
                let mut map = serializer.serialize_map(Some(v.len()))?;
                for (key, value) in v {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

/// Convert any `T: Serialize` into a [`DynamicValue`].
///
/// ```
/// use serde::Serialize;
/// use dirty::{to_dynamic, DynamicValue};
///
/// #[derive(Serialize)]
/// struct Enchantment {
///     id: &'static str,
///     lvl: i16,
/// }
///
/// let v = to_dynamic(Enchantment { id: "minecraft:sharpness", lvl: 5 }).unwrap();
/// assert_eq!(v.get("lvl"), Some(&DynamicValue::Int(5)));
/// ```
///
/// # Errors
///
/// Fails with [`UnsupportedValueKind`][crate::error::ErrorKind::UnsupportedValueKind]
/// if `T` contains a map with non-string keys or an integer that does not
/// fit in an `i64`.
pub fn to_dynamic<T>(value: T) -> Result<DynamicValue>
where
    T: Serialize,
{
    value.serialize(&mut Serializer)
}

// The serializer below follows serde_json's value serializer
// https://github.com/serde-rs/json/blob/master/src/value/ser.rs
//
// The source uses the MIT license, which is repeated here:
//
// Permission is hereby granted, free of charge, to any
// person obtaining a copy of this software and associated
// documentation files (the "Software"), to deal in the
// Software without restriction, including without
// limitation the rights to use, copy, modify, merge,
// publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software
// is furnished to do so, subject to the following
// conditions:
//
// The above copyright notice and this permission notice
// shall be included in all copies or substantial portions
// of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF
// ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED
// TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A
// PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT
// SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY
// CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR
// IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
// DEALINGS IN THE SOFTWARE.

/// Serializer whose output is a [`DynamicValue`].
///
/// This is the serializer that backs [`to_dynamic`].
pub struct Serializer;

impl<'a> serde::Serializer for &'a mut Serializer {
    type Ok = DynamicValue;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeTupleVariant;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeStructVariant;

    fn serialize_bool(self, v: bool) -> Result<DynamicValue> {
        Ok(DynamicValue::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<DynamicValue> {
        Ok(DynamicValue::Int(v as i64))
    }

    fn serialize_i16(self, v: i16) -> Result<DynamicValue> {
        Ok(DynamicValue::Int(v as i64))
    }

    fn serialize_i32(self, v: i32) -> Result<DynamicValue> {
        Ok(DynamicValue::Int(v as i64))
    }

    fn serialize_i64(self, v: i64) -> Result<DynamicValue> {
        Ok(DynamicValue::Int(v))
    }

    fn serialize_i128(self, v: i128) -> Result<DynamicValue> {
        i64::try_from(v)
            .map(DynamicValue::Int)
            .map_err(|_| Error::unsupported_value(format!("integer {} wider than i64", v)))
    }

    fn serialize_u8(self, v: u8) -> Result<DynamicValue> {
        Ok(DynamicValue::Int(v as i64))
    }

    fn serialize_u16(self, v: u16) -> Result<DynamicValue> {
        Ok(DynamicValue::Int(v as i64))
    }

    fn serialize_u32(self, v: u32) -> Result<DynamicValue> {
        Ok(DynamicValue::Int(v as i64))
    }

    fn serialize_u64(self, v: u64) -> Result<DynamicValue> {
        i64::try_from(v)
            .map(DynamicValue::Int)
            .map_err(|_| Error::unsupported_value(format!("integer {} wider than i64", v)))
    }

    fn serialize_u128(self, v: u128) -> Result<DynamicValue> {
        i64::try_from(v)
            .map(DynamicValue::Int)
            .map_err(|_| Error::unsupported_value(format!("integer {} wider than i64", v)))
    }

    fn serialize_f32(self, v: f32) -> Result<DynamicValue> {
        Ok(DynamicValue::Float(v as f64))
    }

    fn serialize_f64(self, v: f64) -> Result<DynamicValue> {
        Ok(DynamicValue::Float(v))
    }

    fn serialize_char(self, v: char) -> Result<DynamicValue> {
        Ok(DynamicValue::Text(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<DynamicValue> {
        Ok(DynamicValue::Text(v.to_owned()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<DynamicValue> {
        Ok(DynamicValue::ByteBuffer(v.iter().map(|&b| b as i8).collect()))
    }

    fn serialize_none(self) -> Result<DynamicValue> {
        Ok(DynamicValue::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<DynamicValue>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<DynamicValue> {
        Ok(DynamicValue::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<DynamicValue> {
        Ok(DynamicValue::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<DynamicValue> {
        Ok(DynamicValue::Text(variant.to_owned()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<DynamicValue>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<DynamicValue>
    where
        T: ?Sized + Serialize,
    {
        let mut map = Map::new();
        map.insert(variant.to_owned(), to_dynamic(value)?);
        Ok(DynamicValue::Map(map))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq> {
        Ok(SerializeVec {
            vec: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Ok(SerializeTupleVariant {
            name: variant.to_owned(),
            vec: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<Self::SerializeMap> {
        Ok(SerializeMap {
            map: Map::with_capacity(len.unwrap_or(0)),
            next_key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<Self::SerializeStruct> {
        self.serialize_map(Some(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Ok(SerializeStructVariant {
            name: variant.to_owned(),
            map: Map::with_capacity(len),
        })
    }
}

pub struct SerializeVec {
    vec: Vec<DynamicValue>,
}

pub struct SerializeTupleVariant {
    name: String,
    vec: Vec<DynamicValue>,
}

pub struct SerializeMap {
    map: Map,
    next_key: Option<String>,
}

pub struct SerializeStructVariant {
    name: String,
    map: Map,
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = DynamicValue;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_dynamic(value)?);
        Ok(())
    }

    fn end(self) -> Result<DynamicValue> {
        Ok(DynamicValue::List(self.vec))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = DynamicValue;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<DynamicValue> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = DynamicValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<DynamicValue> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleVariant for SerializeTupleVariant {
    type Ok = DynamicValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_dynamic(value)?);
        Ok(())
    }

    fn end(self) -> Result<DynamicValue> {
        let mut object = Map::new();
        object.insert(self.name, DynamicValue::List(self.vec));
        Ok(DynamicValue::Map(object))
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = DynamicValue;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.next_key = Some(key.serialize(MapKeySerializer)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .next_key
            .take()
            .ok_or_else(|| Error::bespoke("serialize_value called before serialize_key"))?;
        self.map.insert(key, to_dynamic(value)?);
        Ok(())
    }

    fn end(self) -> Result<DynamicValue> {
        Ok(DynamicValue::Map(self.map))
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = DynamicValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_owned(), to_dynamic(value)?);
        Ok(())
    }

    fn end(self) -> Result<DynamicValue> {
        ser::SerializeMap::end(self)
    }
}

impl ser::SerializeStructVariant for SerializeStructVariant {
    type Ok = DynamicValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_owned(), to_dynamic(value)?);
        Ok(())
    }

    fn end(self) -> Result<DynamicValue> {
        let mut object = Map::new();
        object.insert(self.name, DynamicValue::Map(self.map));
        Ok(DynamicValue::Map(object))
    }
}

/// Only strings and chars can be map keys.
struct MapKeySerializer;

fn key_must_be_a_string(found: &str) -> Error {
    Error::unsupported_value(format!("map key must be a string, found {}", found))
}

impl serde::Serializer for MapKeySerializer {
    type Ok = String;
    type Error = Error;

    type SerializeSeq = Impossible<String, Error>;
    type SerializeTuple = Impossible<String, Error>;
    type SerializeTupleStruct = Impossible<String, Error>;
    type SerializeTupleVariant = Impossible<String, Error>;
    type SerializeMap = Impossible<String, Error>;
    type SerializeStruct = Impossible<String, Error>;
    type SerializeStructVariant = Impossible<String, Error>;

    fn serialize_str(self, value: &str) -> Result<String> {
        Ok(value.to_owned())
    }

    fn serialize_char(self, value: char) -> Result<String> {
        Ok(value.to_string())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<String> {
        Ok(variant.to_owned())
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<String>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_bool(self, _value: bool) -> Result<String> {
        Err(key_must_be_a_string("bool"))
    }

    fn serialize_i8(self, _value: i8) -> Result<String> {
        Err(key_must_be_a_string("i8"))
    }

    fn serialize_i16(self, _value: i16) -> Result<String> {
        Err(key_must_be_a_string("i16"))
    }

    fn serialize_i32(self, _value: i32) -> Result<String> {
        Err(key_must_be_a_string("i32"))
    }

    fn serialize_i64(self, _value: i64) -> Result<String> {
        Err(key_must_be_a_string("i64"))
    }

    fn serialize_u8(self, _value: u8) -> Result<String> {
        Err(key_must_be_a_string("u8"))
    }

    fn serialize_u16(self, _value: u16) -> Result<String> {
        Err(key_must_be_a_string("u16"))
    }

    fn serialize_u32(self, _value: u32) -> Result<String> {
        Err(key_must_be_a_string("u32"))
    }

    fn serialize_u64(self, _value: u64) -> Result<String> {
        Err(key_must_be_a_string("u64"))
    }

    fn serialize_f32(self, _value: f32) -> Result<String> {
        Err(key_must_be_a_string("f32"))
    }

    fn serialize_f64(self, _value: f64) -> Result<String> {
        Err(key_must_be_a_string("f64"))
    }

    fn serialize_bytes(self, _value: &[u8]) -> Result<String> {
        Err(key_must_be_a_string("bytes"))
    }

    fn serialize_none(self) -> Result<String> {
        Err(key_must_be_a_string("none"))
    }

    fn serialize_some<T>(self, _value: &T) -> Result<String>
    where
        T: ?Sized + Serialize,
    {
        Err(key_must_be_a_string("option"))
    }

    fn serialize_unit(self) -> Result<String> {
        Err(key_must_be_a_string("unit"))
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<String> {
        Err(key_must_be_a_string("unit struct"))
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<String>
    where
        T: ?Sized + Serialize,
    {
        Err(key_must_be_a_string("enum"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(key_must_be_a_string("sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(key_must_be_a_string("tuple"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(key_must_be_a_string("tuple struct"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(key_must_be_a_string("enum"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(key_must_be_a_string("map"))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Err(key_must_be_a_string("struct"))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(key_must_be_a_string("enum"))
    }
}
