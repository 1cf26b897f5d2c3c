use std::collections::BTreeMap;

use serde::Serialize;

use crate::dynamic::Map;
use crate::error::ErrorKind;
use crate::{to_dynamic, DynamicValue};

#[derive(Serialize)]
struct Item {
    id: String,
    count: u8,
    damage: Option<i32>,
    tags: Vec<&'static str>,
}

#[derive(Serialize)]
enum Slot {
    Head,
    Hand(u8),
}

#[test]
fn struct_to_map() {
    let item = Item {
        id: "minecraft:stick".into(),
        count: 3,
        damage: None,
        tags: vec!["a"],
    };

    let value = to_dynamic(&item).unwrap();
    let mut expected = Map::new();
    expected.insert("id".into(), DynamicValue::from("minecraft:stick"));
    expected.insert("count".into(), DynamicValue::Int(3));
    expected.insert("damage".into(), DynamicValue::Null);
    expected.insert("tags".into(), DynamicValue::List(vec![DynamicValue::from("a")]));
    assert_eq!(value, DynamicValue::Map(expected));
}

#[test]
fn enums() {
    assert_eq!(to_dynamic(Slot::Head).unwrap(), DynamicValue::from("Head"));
    assert_eq!(
        to_dynamic(Slot::Hand(1)).unwrap().get("Hand"),
        Some(&DynamicValue::Int(1))
    );
}

#[test]
fn non_string_keys_rejected() {
    let mut map = BTreeMap::new();
    map.insert(1, "one");
    let err = to_dynamic(&map).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::UnsupportedValueKind);
}

#[test]
fn wide_integers_rejected() {
    assert_eq!(to_dynamic(i64::MAX as u64).unwrap(), DynamicValue::Int(i64::MAX));
    let err = to_dynamic(u64::MAX).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::UnsupportedValueKind);
}

#[test]
fn from_conversions() {
    assert_eq!(DynamicValue::from(Some(2u8)), DynamicValue::Int(2));
    assert_eq!(DynamicValue::from(None::<i32>), DynamicValue::Null);
    assert_eq!(DynamicValue::from(true).as_bool(), Some(true));
    assert_eq!(DynamicValue::default(), DynamicValue::Null);
    assert!(DynamicValue::Null.is_null());
}

#[test]
fn accessors() {
    assert_eq!(DynamicValue::Int(2).as_f64(), Some(2.0));
    assert_eq!(DynamicValue::Float(2.0).as_i64(), None);
    assert_eq!(DynamicValue::from("x").as_str(), Some("x"));
    assert_eq!(DynamicValue::Int(1).get("a"), None);
    assert_eq!(DynamicValue::List(vec![]).kind_name(), "list");
}
