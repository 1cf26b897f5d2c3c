use crate::codec::Encoder;
use crate::error::{ErrorKind, Result};
use crate::path::{Path, Segment};
use crate::{tag, DynamicValue, Tag, TagKind};

fn inventory() -> Tag {
    tag!({
        "Inventory": [
            {"id": "minecraft:stone", "Count": 3i8},
            {"id": "minecraft:dirt", "Count": 64i8},
        ],
        "Health": 20.0f32,
    })
}

#[test]
fn missing_key_is_absent() -> Result<()> {
    let tag = inventory();
    assert_eq!(tag.get_key("Nope")?, None);
    Ok(())
}

#[test]
fn get_key_on_list_fails() {
    let tag = tag!([1, 2]);
    let err = tag.get_key("a").unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::NotACompound(TagKind::List));
}

#[test]
fn get_index_on_compound_fails() {
    let err = inventory().get_index(0).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::NotAList(TagKind::Compound));
}

#[test]
fn index_past_end_is_absent() -> Result<()> {
    let tag = tag!([1, 2]);
    assert_eq!(tag.get_index(1)?, Some(&Tag::Int(2)));
    assert_eq!(tag.get_index(2)?, None);
    Ok(())
}

#[test]
fn set_key_encodes_and_returns_stored() -> Result<()> {
    let mut tag = inventory();
    let stored = tag.set_key("Score", Some(&DynamicValue::Int(10)))?;
    assert_eq!(stored, Some(&Tag::Int(10)));
    assert_eq!(tag.get_key("Score")?, Some(&Tag::Int(10)));
    Ok(())
}

#[test]
fn set_key_none_removes() -> Result<()> {
    let mut tag = inventory();
    assert_eq!(tag.set_key("Health", None)?, None);
    assert_eq!(tag.get_key("Health")?, None);

    // Removing something absent is fine.
    assert_eq!(tag.set_key("Health", None)?, None);
    Ok(())
}

#[test]
fn set_key_replaces_in_place() -> Result<()> {
    let mut tag = tag!({"a": 1, "b": 2, "c": 3});
    tag.set_key("b", Some(&DynamicValue::from("two")))?;
    let keys: Vec<_> = tag.as_compound().unwrap().keys().cloned().collect();
    assert_eq!(keys, ["a", "b", "c"]);
    assert_eq!(tag.get_key("b")?.unwrap(), "two");
    Ok(())
}

#[test]
fn failed_set_changes_nothing() {
    let mut tag = inventory();
    let before = tag.clone();
    let err = tag
        .set_key("Big", Some(&DynamicValue::Int(i64::MAX)))
        .unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::IntegerOverflow(i64::MAX as i128));
    assert_eq!(tag, before);
}

#[test]
fn set_key_with_lossy_encoder() -> Result<()> {
    let mut tag = Tag::compound();
    tag.set_key_with("Big", Some(&DynamicValue::Int(1 << 33)), &Encoder::lossy())?;
    assert_eq!(tag.get_key("Big")?, Some(&Tag::Int(0)));
    Ok(())
}

#[test]
fn set_index_at_len_is_out_of_range() {
    let mut tag = tag!([1, 2]);
    let err = tag.set_index(2, &DynamicValue::Int(3)).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::IndexOutOfRange { index: 2, len: 2 });
}

#[test]
fn set_index_replaces() -> Result<()> {
    let mut tag = tag!([1, 2]);
    assert_eq!(tag.set_index(0, &DynamicValue::Int(5))?, &Tag::Int(5));
    assert_eq!(tag, tag!([5, 2]));
    Ok(())
}

#[test]
fn set_index_keeps_list_homogeneous() {
    let mut tag = tag!([1, 2]);
    let err = tag.set_index(0, &DynamicValue::from("x")).unwrap_err();
    assert_eq!(
        err.kind(),
        &ErrorKind::HeterogeneousList {
            expected: TagKind::Int,
            found: TagKind::String
        }
    );
    assert_eq!(tag, tag!([1, 2]));
}

#[test]
fn single_element_list_can_change_kind() -> Result<()> {
    let mut tag = tag!([1]);
    tag.set_index(0, &DynamicValue::from("x"))?;
    assert_eq!(tag.as_list().unwrap().element(), TagKind::String);
    Ok(())
}

#[test]
fn append_grows_list() -> Result<()> {
    let mut tag = tag!([]);
    tag.append(&DynamicValue::from("a"))?;
    tag.append(&DynamicValue::from("b"))?;
    assert_eq!(tag, tag!(["a", "b"]));
    assert_eq!(tag.as_list().unwrap().element(), TagKind::String);
    Ok(())
}

#[test]
fn append_wrong_kind_fails() {
    let mut tag = tag!(["a"]);
    assert!(tag.append(&DynamicValue::Int(1)).is_err());
    assert_eq!(tag.as_list().unwrap().len(), 1);
}

#[test]
fn append_to_compound_fails() {
    let mut tag = inventory();
    let err = tag.append(&DynamicValue::Int(1)).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::NotAList(TagKind::Compound));
}

#[test]
fn remove_returns_old() -> Result<()> {
    let mut tag = inventory();
    assert_eq!(tag.remove("Health")?, Some(Tag::Float(20.0)));
    assert_eq!(tag.remove("Health")?, None);
    Ok(())
}

#[test]
fn parse_path() -> Result<()> {
    let path: Path = r#"Inventory[1].tag."display.Name""#.parse()?;
    assert_eq!(
        path.segments(),
        [
            Segment::Key("Inventory".into()),
            Segment::Index(1),
            Segment::Key("tag".into()),
            Segment::Key("display.Name".into()),
        ]
    );
    Ok(())
}

#[test]
fn parse_root_path() -> Result<()> {
    let path: Path = "".parse()?;
    assert!(path.is_root());
    assert_eq!(path, Path::root());
    Ok(())
}

#[test]
fn parse_bad_paths() {
    for bad in &["a..b", "a[", "a[x]", "a[0]b", ".a", "a.", r#""open"#, r#""\n""#] {
        let err = bad.parse::<Path>().unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidPath, "{}", bad);
    }
}

#[test]
fn display_path_parses_back() -> Result<()> {
    let path = Path::root()
        .key("Data")
        .key("odd.key")
        .index(0)
        .key(r#"quote"d"#);
    let text = path.to_string();
    assert_eq!(text, r#"Data."odd.key"[0]."quote\"d""#);
    assert_eq!(text.parse::<Path>()?, path);
    Ok(())
}

#[test]
fn pointer_walks_tree() -> Result<()> {
    let tag = inventory();
    let path: Path = "Inventory[1].Count".parse()?;
    assert_eq!(tag.pointer(&path)?, Some(&Tag::Byte(64)));

    let missing: Path = "Inventory[5].Count".parse()?;
    assert_eq!(tag.pointer(&missing)?, None);

    let wrong: Path = "Health.x".parse()?;
    assert_eq!(
        tag.pointer(&wrong).unwrap_err().kind(),
        &ErrorKind::NotACompound(TagKind::Float)
    );
    Ok(())
}

#[test]
fn set_at_nested() -> Result<()> {
    let mut tag = inventory();
    let path: Path = "Inventory[0].tag".parse()?;
    let value = crate::json::from_str(r#"{"Damage": 4}"#)?;
    tag.set_at(&path, Some(&value))?;
    assert_eq!(tag.pointer(&path)?, Some(&tag!({"Damage": 4})));
    Ok(())
}

#[test]
fn set_at_missing_parent_fails() -> Result<()> {
    let mut tag = inventory();
    let path: Path = "Nope.tag".parse()?;
    let err = tag.set_at(&path, Some(&DynamicValue::Int(1))).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::Other);
    Ok(())
}

#[test]
fn set_at_root_fails() {
    let mut tag = inventory();
    let err = tag.set_at(&Path::root(), Some(&DynamicValue::Int(1))).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::InvalidPath);
}

#[test]
fn set_at_index_with_null_fails() -> Result<()> {
    let mut tag = inventory();
    let path: Path = "Inventory[0]".parse()?;
    let err = tag.set_at(&path, None).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::NullNotEncodable);
    Ok(())
}

#[test]
fn append_at_nested() -> Result<()> {
    let mut tag = inventory();
    let path: Path = "Inventory".parse()?;
    let value = crate::json::from_str(r#"{"id": "minecraft:apple", "Count": 1}"#)?;
    tag.append_at(&path, &value)?;
    assert_eq!(tag.pointer(&path)?.unwrap().as_list().unwrap().len(), 3);
    Ok(())
}
