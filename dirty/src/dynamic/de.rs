use std::convert::TryFrom;
use std::fmt;

use serde::de::{self, Deserialize, MapAccess, SeqAccess, Visitor};

use super::{DynamicValue, Map};

impl<'de> Deserialize<'de> for DynamicValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_any(DynamicVisitor)
    }
}

struct DynamicVisitor;

impl<'de> Visitor<'de> for DynamicVisitor {
    type Value = DynamicValue;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("any JSON value")
    }

    fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(DynamicValue::Bool(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(DynamicValue::Int(v))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        // Whole numbers are always integers, even when they do not fit.
        i64::try_from(v)
            .map(DynamicValue::Int)
            .map_err(|_| E::custom(format!("integer {} is out of range for i64", v)))
    }

    fn visit_i128<E>(self, v: i128) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        i64::try_from(v)
            .map(DynamicValue::Int)
            .map_err(|_| E::custom(format!("integer {} is out of range for i64", v)))
    }

    fn visit_u128<E>(self, v: u128) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        i64::try_from(v)
            .map(DynamicValue::Int)
            .map_err(|_| E::custom(format!("integer {} is out of range for i64", v)))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(DynamicValue::Float(v))
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(DynamicValue::Text(v.to_owned()))
    }

    fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(DynamicValue::Text(v))
    }

    fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(DynamicValue::ByteBuffer(v.iter().map(|&b| b as i8).collect()))
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(DynamicValue::Null)
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(DynamicValue::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Deserialize::deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut v = Vec::<DynamicValue>::with_capacity(seq.size_hint().unwrap_or(0));

        while let Some(el) = seq.next_element()? {
            v.push(el);
        }

        Ok(DynamicValue::List(v))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let first = match map.next_key::<String>()? {
            Some(key) => key,
            None => return Ok(DynamicValue::Map(Map::new())),
        };

        // serde_json hands numbers over as a map holding their text.
        if first == NUMBER_TOKEN {
            let text: String = map.next_value()?;
            return number(&text).map_err(de::Error::custom);
        }

        let mut m = Map::with_capacity(map.size_hint().unwrap_or(0) + 1);
        m.insert(first, map.next_value()?);
        while let Some((key, value)) = map.next_entry::<String, DynamicValue>()? {
            m.insert(key, value);
        }

        Ok(DynamicValue::Map(m))
    }
}

const NUMBER_TOKEN: &str = "$serde_json::private::Number";

/// Classify a JSON number by its text. Numbers without a fraction or an
/// exponent are integers and must fit in `i64`.
fn number(text: &str) -> Result<DynamicValue, String> {
    if text.contains(|c| matches!(c, '.' | 'e' | 'E')) {
        match text.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(DynamicValue::Float(v)),
            _ => Err(format!("number {} is out of range for f64", text)),
        }
    } else {
        text.parse::<i64>()
            .map(DynamicValue::Int)
            .map_err(|_| format!("integer {} is out of range for i64", text))
    }
}
