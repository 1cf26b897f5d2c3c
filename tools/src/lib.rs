//! The work behind the `dirty` command line tool. Everything here operates
//! on trees in memory so the binary only deals with arguments and files.
use std::error::Error;
use std::fmt::Display;

use dirty::bridge::{uuid_to_ints, HostBridge};
use dirty::codec::Encoder;
use dirty::path::Path;
use dirty::structure;
use dirty::{json, DynamicValue, Tag};

pub type Result<T> = std::result::Result<T, Box<dyn Error>>;

#[derive(Debug)]
pub struct ErrorMessage(pub String);
impl std::error::Error for ErrorMessage {}

impl Display for ErrorMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    PrettyJson,
    Snbt,
}

impl Format {
    pub fn new(pretty: bool, snbt: bool) -> Self {
        match (pretty, snbt) {
            (_, true) => Format::Snbt,
            (true, false) => Format::PrettyJson,
            (false, false) => Format::Json,
        }
    }
}

pub fn render(tag: &Tag, format: Format) -> Result<String> {
    Ok(match format {
        Format::Json => json::tag_to_json(tag, false)?,
        Format::PrettyJson => json::tag_to_json(tag, true)?,
        Format::Snbt => tag.to_string(),
    })
}

/// Render the node at `path`, or `null` when there is none.
pub fn get(root: &Tag, path: &Path, format: Format) -> Result<String> {
    match root.pointer(path)? {
        Some(node) => render(node, format),
        None => Ok("null".to_owned()),
    }
}

/// Set the node at `path` to the JSON value `value`. JSON `null` removes a
/// compound key.
pub fn set(root: &mut Tag, path: &Path, value: &str, encoder: &Encoder) -> Result<()> {
    let value = json::from_str(value)?;
    let value = match value {
        DynamicValue::Null => None,
        v => Some(v),
    };
    root.set_at_with(path, value.as_ref(), encoder)?;
    Ok(())
}

pub fn append(root: &mut Tag, path: &Path, value: &str, encoder: &Encoder) -> Result<()> {
    let value = json::from_str(value)?;
    root.append_at_with(path, &value, encoder)?;
    Ok(())
}

/// Render the custom data of the item compound at `path`.
pub fn item(root: &Tag, path: &Path, bridge: &dyn HostBridge, format: Format) -> Result<String> {
    let item = root
        .pointer(path)?
        .ok_or_else(|| ErrorMessage(format!("no item at {}", path)))?;
    match bridge.item_tag(item)? {
        Some(tag) => render(tag, format),
        None => Ok("null".to_owned()),
    }
}

/// Replace the custom data of the item compound at `path` with the JSON value
/// `value`. JSON `null` removes it.
pub fn set_item(
    root: &mut Tag,
    path: &Path,
    value: &str,
    bridge: &dyn HostBridge,
    encoder: &Encoder,
) -> Result<()> {
    let tag = match json::from_str(value)? {
        DynamicValue::Null => None,
        v => Some(encoder.encode(&v)?),
    };
    let item = root
        .pointer_mut(path)?
        .ok_or_else(|| ErrorMessage(format!("no item at {}", path)))?;
    bridge.set_item_tag(item, tag)?;
    Ok(())
}

// Where chunks keep block entities and entities, newest layout first.
const BLOCK_ENTITIES: [&str; 2] = ["block_entities", "Level.TileEntities"];
const ENTITIES: [&str; 2] = ["Entities", "Level.Entities"];

fn first_list<'a>(root: &'a Tag, paths: &[&str]) -> Result<&'a [Tag]> {
    for path in paths {
        if let Some(tag) = root.pointer(&path.parse()?)? {
            return tag
                .as_list()
                .map(|list| list.as_slice())
                .ok_or_else(|| ErrorMessage(format!("{} is not a list", path)).into());
        }
    }
    Ok(&[])
}

/// The block entity at `pos` in a chunk.
pub fn block_entity(chunk: &Tag, pos: [i32; 3]) -> Result<Option<&Tag>> {
    let found = first_list(chunk, &BLOCK_ENTITIES)?.iter().find(|entity| {
        ["x", "y", "z"].iter().zip(pos).all(|(key, want)| {
            matches!(entity.get_key(key), Ok(Some(v)) if v.as_i64() == Some(i64::from(want)))
        })
    });
    Ok(found)
}

/// The entity with the given UUID, stored either as an int array or as the
/// older pair of longs.
pub fn find_entity<'a>(root: &'a Tag, uuid: &str) -> Result<Option<&'a Tag>> {
    let ints = uuid_to_ints(uuid).ok_or_else(|| ErrorMessage(format!("not a UUID: {}", uuid)))?;
    let long = |hi: i32, lo: i32| ((hi as u32 as i64) << 32) | lo as u32 as i64;
    let most = long(ints[0], ints[1]);
    let least = long(ints[2], ints[3]);

    let found = first_list(root, &ENTITIES)?.iter().find(|entity| {
        if let Ok(Some(Tag::IntArray(id))) = entity.get_key("UUID") {
            return id[..] == ints[..];
        }
        let half = |key: &str| entity.get_key(key).ok().flatten().and_then(Tag::as_i64);
        half("UUIDMost") == Some(most) && half("UUIDLeast") == Some(least)
    });
    Ok(found)
}

/// Render the block entity at `pos`, or `null` when there is none.
pub fn block(chunk: &Tag, pos: [i32; 3], format: Format) -> Result<String> {
    match block_entity(chunk, pos)? {
        Some(tag) => render(tag, format),
        None => Ok("null".to_owned()),
    }
}

/// Render the entity with `uuid`, or `null` when there is none.
pub fn entity(root: &Tag, uuid: &str, format: Format) -> Result<String> {
    match find_entity(root, uuid)? {
        Some(tag) => render(tag, format),
        None => Ok("null".to_owned()),
    }
}

/// The structures of a chunk as a JSON array.
pub fn structures(chunk: &Tag, pretty: bool) -> Result<String> {
    let found = structure::structures(chunk)
        .iter()
        .map(|s| s.to_dynamic())
        .collect::<dirty::error::Result<Vec<_>>>()?;
    let list = DynamicValue::List(found);
    Ok(if pretty {
        json::to_string_pretty(&list)?
    } else {
        json::to_string(&list)?
    })
}

#[cfg(test)]
mod test {
    use dirty::bridge::bridge_for;
    use dirty::tag;

    use super::*;

    fn player() -> Tag {
        tag!({
            "DataVersion": 3465,
            "Inventory": [{"id": "minecraft:stick", "Count": 1i8, "tag": {"Damage": 2}}],
        })
    }

    #[test]
    fn format_flags() {
        assert_eq!(Format::new(false, false), Format::Json);
        assert_eq!(Format::new(true, false), Format::PrettyJson);
        assert_eq!(Format::new(true, true), Format::Snbt);
    }

    #[test]
    fn get_renders_node() {
        let path = "Inventory[0].Count".parse().unwrap();
        assert_eq!(get(&player(), &path, Format::Json).unwrap(), "1");
        assert_eq!(get(&player(), &path, Format::Snbt).unwrap(), "1b");

        let missing = "Inventory[3]".parse().unwrap();
        assert_eq!(get(&player(), &missing, Format::Json).unwrap(), "null");
    }

    #[test]
    fn set_and_remove() {
        let mut root = player();
        let path = "Inventory[0].tag.Damage".parse().unwrap();
        set(&mut root, &path, "5", &Encoder::strict()).unwrap();
        assert_eq!(get(&root, &path, Format::Json).unwrap(), "5");

        set(&mut root, &path, "null", &Encoder::strict()).unwrap();
        assert_eq!(get(&root, &path, Format::Json).unwrap(), "null");
    }

    #[test]
    fn set_respects_encoder() {
        let mut root = player();
        let path = "Big".parse().unwrap();
        assert!(set(&mut root, &path, "4294967296", &Encoder::strict()).is_err());
        set(&mut root, &path, "4294967296", &Encoder::lossy()).unwrap();
        assert_eq!(root.get_key("Big").unwrap(), Some(&Tag::Int(0)));
    }

    #[test]
    fn append_to_inventory() {
        let mut root = player();
        let path = "Inventory".parse().unwrap();
        append(&mut root, &path, r#"{"id": "minecraft:apple"}"#, &Encoder::strict()).unwrap();
        assert_eq!(
            get(&root, &"Inventory[1].id".parse().unwrap(), Format::Json).unwrap(),
            r#""minecraft:apple""#
        );
    }

    #[test]
    fn item_tag_through_bridge() {
        let bridge = bridge_for(3465).unwrap();
        let path = "Inventory[0]".parse().unwrap();
        assert_eq!(
            item(&player(), &path, bridge, Format::Json).unwrap(),
            r#"{"Damage":2}"#
        );

        let missing = "Inventory[1]".parse().unwrap();
        assert!(item(&player(), &missing, bridge, Format::Json).is_err());
    }

    #[test]
    fn set_item_through_bridge() {
        let bridge = bridge_for(3465).unwrap();
        let path = "Inventory[0]".parse().unwrap();
        let mut root = player();

        set_item(&mut root, &path, r#"{"Unbreakable": true}"#, bridge, &Encoder::strict()).unwrap();
        assert_eq!(
            item(&root, &path, bridge, Format::Json).unwrap(),
            r#"{"Unbreakable":1}"#
        );

        set_item(&mut root, &path, "null", bridge, &Encoder::strict()).unwrap();
        assert_eq!(item(&root, &path, bridge, Format::Json).unwrap(), "null");

        let components = bridge_for(3953).unwrap();
        set_item(&mut root, &path, r#"{"minecraft:max_stack_size": 1}"#, components, &Encoder::strict())
            .unwrap();
        assert_eq!(
            get(&root, &"Inventory[0].components".parse().unwrap(), Format::Snbt).unwrap(),
            r#"{"minecraft:max_stack_size":1}"#
        );
    }

    #[test]
    fn block_entity_by_position() {
        let chunk = tag!({
            "block_entities": [
                {"id": "minecraft:chest", "x": 1, "y": -60, "z": 3, "Items": []},
                {"id": "minecraft:sign", "x": 1, "y": -59, "z": 3},
            ]
        });
        assert_eq!(
            block(&chunk, [1, -59, 3], Format::Json).unwrap(),
            r#"{"id":"minecraft:sign","x":1,"y":-59,"z":3}"#
        );
        assert_eq!(block(&chunk, [0, 0, 0], Format::Json).unwrap(), "null");

        let old = tag!({
            "Level": {"TileEntities": [{"id": "minecraft:furnace", "x": 5, "y": 64, "z": -2}]}
        });
        let found = block_entity(&old, [5, 64, -2]).unwrap().unwrap();
        assert_eq!(found.get_key("id").unwrap(), Some(&Tag::from("minecraft:furnace")));

        assert_eq!(block(&tag!({}), [0, 0, 0], Format::Json).unwrap(), "null");
        assert!(block(&tag!({"block_entities": 1}), [0, 0, 0], Format::Json).is_err());
    }

    #[test]
    fn entity_by_uuid() {
        let uuid = "069a79f4-44e9-4726-a5be-fca90e38aaf5";
        let ints = uuid_to_ints(uuid).unwrap();
        let entities = tag!({
            "Entities": [
                {"id": "minecraft:cow", "UUID": [I; 1, 2, 3, 4]},
                {"id": "minecraft:pig", "UUID": [I; ints[0], ints[1], ints[2], ints[3]]},
            ]
        });
        assert_eq!(
            find_entity(&entities, uuid).unwrap().unwrap().get_key("id").unwrap(),
            Some(&Tag::from("minecraft:pig"))
        );

        let old = tag!({
            "Level": {"Entities": [{
                "id": "minecraft:sheep",
                "UUIDMost": 0x069a79f444e94726i64,
                "UUIDLeast": 0xa5befca90e38aaf5u64 as i64,
            }]}
        });
        assert_eq!(
            entity(&old, uuid, Format::Json).unwrap(),
            format!(
                r#"{{"id":"minecraft:sheep","UUIDMost":{},"UUIDLeast":{}}}"#,
                0x069a79f444e94726i64,
                0xa5befca90e38aaf5u64 as i64
            )
        );

        assert_eq!(entity(&entities, "00000000-0000-0000-0000-000000000000", Format::Json).unwrap(), "null");
        assert!(entity(&entities, "Notch", Format::Json).is_err());
    }

    #[test]
    fn structures_as_json() {
        let chunk = tag!({
            "structures": {"starts": {
                "minecraft:igloo": {"id": "minecraft:igloo", "BB": [I; 0, 0, 0, 1, 1, 1]},
            }}
        });
        assert_eq!(
            structures(&chunk, false).unwrap(),
            r#"[{"name":"igloo","min":[0,0,0],"max":[1,1,1]}]"#
        );
    }
}
