use crate::codec::{decode, encode, Encoder};
use crate::dynamic::Map;
use crate::error::{ErrorKind, Result};
use crate::{tag, DynamicValue, Tag, TagKind, TagList};

fn map(entries: Vec<(&str, DynamicValue)>) -> DynamicValue {
    DynamicValue::Map(
        entries
            .into_iter()
            .map(|(k, v)| (k.to_owned(), v))
            .collect::<Map>(),
    )
}

#[test]
fn decode_widens_numbers() -> Result<()> {
    let tag = tag!({
        "b": 1i8,
        "s": 2i16,
        "i": 3,
        "l": 4i64,
        "f": 1.5f32,
        "d": 2.5,
    });

    let value = decode(&tag)?;
    assert_eq!(value.get("b"), Some(&DynamicValue::Int(1)));
    assert_eq!(value.get("s"), Some(&DynamicValue::Int(2)));
    assert_eq!(value.get("i"), Some(&DynamicValue::Int(3)));
    assert_eq!(value.get("l"), Some(&DynamicValue::Int(4)));
    assert_eq!(value.get("f"), Some(&DynamicValue::Float(1.5)));
    assert_eq!(value.get("d"), Some(&DynamicValue::Float(2.5)));
    Ok(())
}

#[test]
fn decode_keeps_arrays_distinct() -> Result<()> {
    let tag = tag!({
        "bytes": [B; 1, 2],
        "ints": [I; 3],
        "longs": [L; 4],
    });

    let value = decode(&tag)?;
    assert_eq!(value.get("bytes"), Some(&DynamicValue::ByteBuffer(vec![1, 2])));
    assert_eq!(value.get("ints"), Some(&DynamicValue::IntSequence(vec![3])));
    assert_eq!(value.get("longs"), Some(&DynamicValue::LongSequence(vec![4])));
    Ok(())
}

#[test]
fn decode_keeps_key_order() -> Result<()> {
    let tag = tag!({"z": 1, "a": 2, "m": 3});
    let value = decode(&tag)?;
    let keys: Vec<_> = value.as_map().unwrap().keys().cloned().collect();
    assert_eq!(keys, ["z", "a", "m"]);
    Ok(())
}

#[test]
fn decode_end_fails() {
    let err = decode(&Tag::End).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::UnsupportedTagKind(TagKind::End));

    let nested = tag!({"inner": {"bad": (Tag::End)}});
    let err = decode(&nested).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::UnsupportedTagKind(TagKind::End));
}

#[test]
fn encode_picks_int_and_double() -> Result<()> {
    let value = map(vec![
        ("n", DynamicValue::Int(7)),
        ("x", DynamicValue::Float(0.25)),
        ("t", DynamicValue::from("hi")),
    ]);
    assert_eq!(encode(&value)?, tag!({"n": 7, "x": 0.25, "t": "hi"}));
    Ok(())
}

#[test]
fn bool_encodes_to_int() -> Result<()> {
    assert_eq!(encode(&DynamicValue::Bool(true))?, Tag::Int(1));
    assert_eq!(encode(&DynamicValue::Bool(false))?, Tag::Int(0));

    // Decoding does not give the bool back.
    assert_eq!(decode(&Tag::Int(1))?, DynamicValue::Int(1));
    Ok(())
}

#[test]
fn null_is_not_encodable() {
    let err = encode(&DynamicValue::Null).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::NullNotEncodable);

    let nested = map(vec![("a", DynamicValue::List(vec![DynamicValue::Null]))]);
    let err = encode(&nested).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::NullNotEncodable);
}

#[test]
fn strict_integers_overflow() {
    let err = encode(&DynamicValue::Int(1 << 40)).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::IntegerOverflow(1 << 40));

    let err = encode(&DynamicValue::Int(i32::MIN as i64 - 1)).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::IntegerOverflow(i32::MIN as i128 - 1));
}

#[test]
fn lossy_integers_truncate() -> Result<()> {
    let tag = Encoder::lossy().encode(&DynamicValue::Int((1 << 32) + 5))?;
    assert_eq!(tag, Tag::Int(5));
    Ok(())
}

#[test]
fn strict_lists_must_be_homogeneous() {
    let value = DynamicValue::List(vec![DynamicValue::Int(1), DynamicValue::from("two")]);
    let err = encode(&value).unwrap_err();
    assert_eq!(
        err.kind(),
        &ErrorKind::HeterogeneousList {
            expected: TagKind::Int,
            found: TagKind::String
        }
    );
}

#[test]
fn trusting_lists_take_first_kind() -> Result<()> {
    let value = DynamicValue::List(vec![DynamicValue::Int(1), DynamicValue::from("two")]);
    let tag = Encoder::lossy().encode(&value)?;

    let list = tag.as_list().unwrap();
    assert_eq!(list.element(), TagKind::Int);
    assert_eq!(list.len(), 2);
    assert!(list.check_homogeneous().is_err());
    Ok(())
}

#[test]
fn empty_list_has_end_kind() -> Result<()> {
    let tag = encode(&DynamicValue::List(vec![]))?;
    assert_eq!(tag, Tag::List(TagList::new()));
    assert_eq!(tag.as_list().unwrap().element(), TagKind::End);
    Ok(())
}

#[test]
fn round_trip_through_dynamic() -> Result<()> {
    let original = tag!({
        "id": "minecraft:written_book",
        "tag": {
            "pages": ["one", "two"],
            "generation": 2,
            "resolved": [B; 1],
            "nested": [{"a": 1}, {"b": 2}],
        }
    });

    let back = encode(&decode(&original)?)?;
    assert_eq!(back, original);
    Ok(())
}

#[test]
fn round_trip_changes_narrow_kinds() -> Result<()> {
    let original = tag!({"Count": 3i8, "Health": 20.0f32});
    let back = encode(&decode(&original)?)?;
    assert_eq!(back, tag!({"Count": 3, "Health": 20.0}));
    Ok(())
}

#[test]
fn encode_leaves_input_alone() -> Result<()> {
    let value = map(vec![("a", DynamicValue::List(vec![DynamicValue::Int(1)]))]);
    let copy = value.clone();
    let _ = encode(&value)?;
    assert_eq!(value, copy);
    Ok(())
}

#[test]
fn dynamic_survives_encode_then_decode() -> Result<()> {
    let value = map(vec![
        ("name", DynamicValue::from("Steve")),
        ("level", DynamicValue::Int(30)),
        ("xp", DynamicValue::Float(0.25)),
        ("seed", DynamicValue::ByteBuffer(vec![-128, 0, 127])),
        ("pos", DynamicValue::IntSequence(vec![i32::MIN, 64, i32::MAX])),
        ("uuid", DynamicValue::LongSequence(vec![i64::MIN, i64::MAX])),
        (
            "lore",
            DynamicValue::List(vec![DynamicValue::from("a"), DynamicValue::from("b")]),
        ),
        (
            "nested",
            DynamicValue::List(vec![map(vec![("k", DynamicValue::List(vec![]))])]),
        ),
    ]);

    assert_eq!(decode(&encode(&value)?)?, value);
    Ok(())
}

#[test]
fn bools_come_back_as_ints() -> Result<()> {
    let value = map(vec![
        ("on", DynamicValue::Bool(true)),
        ("off", DynamicValue::Bool(false)),
        ("flags", DynamicValue::List(vec![DynamicValue::Bool(true)])),
    ]);

    let back = decode(&encode(&value)?)?;
    assert_ne!(back, value);
    assert_eq!(
        back,
        map(vec![
            ("on", DynamicValue::Int(1)),
            ("off", DynamicValue::Int(0)),
            ("flags", DynamicValue::List(vec![DynamicValue::Int(1)])),
        ])
    );
    Ok(())
}

/// Alternating lists and compounds, `depth` deep.
fn deep_tag(depth: usize) -> Tag {
    let mut tag = Tag::compound();
    for i in 1..depth {
        tag = if i % 2 == 0 {
            let mut outer = crate::Compound::new();
            outer.insert("a".to_owned(), tag);
            Tag::Compound(outer)
        } else {
            Tag::List(TagList::from_items(vec![tag]))
        };
    }
    tag
}

#[test]
fn deepest_tree_converts() -> Result<()> {
    let tag = deep_tag(crate::nbt::MAX_DEPTH);
    let value = decode(&tag)?;
    let back = encode(&value)?;
    assert_eq!(back.kind(), tag.kind());

    let bytes = crate::nbt::to_bytes(&crate::nbt::NamedTag::new("", back))?;
    assert!(crate::nbt::from_bytes(&bytes).is_ok());
    Ok(())
}
