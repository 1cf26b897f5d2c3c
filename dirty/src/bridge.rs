//! Differences between game versions.
//!
//! Where an item keeps its custom data, how it stores its count, and how a
//! player head names its owner all changed over the years. Each
//! [`HostBridge`] knows one range of data versions; [`bridge_for`] picks the
//! right one and [`Host`] remembers the pick.
//!
//! ```
//! use dirty::bridge::Host;
//! use dirty::tag;
//!
//! let player = tag!({"DataVersion": 3465, "SelectedItem": {"id": "minecraft:stick", "Count": 1i8, "tag": {"Damage": 0}}});
//! let host = Host::detect(&player).unwrap();
//! let item = player.get_key("SelectedItem").unwrap().unwrap();
//! assert_eq!(host.bridge().unwrap().item_tag(item).unwrap(), Some(&tag!({"Damage": 0})));
//! ```
use std::convert::TryFrom;

use log::debug;
use once_cell::sync::OnceCell;

use crate::error::{Error, Result};
use crate::{Compound, Tag, TagList};

/// First data version with flattened, namespaced ids (1.13).
pub const FLATTENING: i32 = 1451;
/// First data version storing UUIDs as int arrays (1.16).
pub const INT_ARRAY_UUIDS: i32 = 2566;
/// First data version with item components (1.20.5).
pub const ITEM_COMPONENTS: i32 = 3837;

pub trait HostBridge: Send + Sync {
    fn name(&self) -> &'static str;

    fn supports(&self, data_version: i32) -> bool;

    /// The custom data of an item compound, if it has any.
    fn item_tag<'a>(&self, item: &'a Tag) -> Result<Option<&'a Tag>>;

    /// Replace the custom data of an item compound. `None` removes it.
    fn set_item_tag(&self, item: &mut Tag, tag: Option<Tag>) -> Result<()>;

    /// A new item compound.
    fn new_item(&self, id: &str, count: i32) -> Result<Tag>;

    /// A player head showing the skin `texture` (base64 textures property),
    /// owned by the profile `id`.
    fn skull(&self, id: &str, texture: &str) -> Result<Tag>;
}

/// Items from 1.13 up to 1.20.4: custom data under `tag`, a byte `Count`
/// and a `SkullOwner` compound on heads.
#[derive(Debug)]
pub struct LegacyItems {
    name: &'static str,
    from: i32,
    until: i32,
}

/// Items from 1.20.5: custom data under `components` and an int `count`.
#[derive(Debug)]
pub struct ComponentItems;

static PRE_1_16: LegacyItems = LegacyItems {
    name: "legacy-1.13",
    from: FLATTENING,
    until: INT_ARRAY_UUIDS,
};

static PRE_1_20_5: LegacyItems = LegacyItems {
    name: "legacy-1.16",
    from: INT_ARRAY_UUIDS,
    until: ITEM_COMPONENTS,
};

static COMPONENTS: ComponentItems = ComponentItems;

static BRIDGES: [&dyn HostBridge; 3] = [&PRE_1_16, &PRE_1_20_5, &COMPONENTS];

/// Find the bridge handling `data_version`.
pub fn bridge_for(data_version: i32) -> Result<&'static dyn HostBridge> {
    let bridge = BRIDGES
        .iter()
        .copied()
        .find(|b| b.supports(data_version))
        .ok_or_else(|| Error::unsupported_version(Some(data_version)))?;
    debug!("data version {} uses bridge {}", data_version, bridge.name());
    Ok(bridge)
}

/// The data version recorded in a root tag, either at the top level as in
/// player and chunk files, or under `Data` as in `level.dat`.
pub fn data_version(root: &Tag) -> Option<i32> {
    let version = match root.get_key("DataVersion").ok()? {
        Some(v) => v,
        None => root.get_key("Data").ok()??.get_key("DataVersion").ok()??,
    };
    version.as_i64().and_then(|v| i32::try_from(v).ok())
}

/// The game a tree came from. The bridge is looked up once, on first use.
#[derive(Debug)]
pub struct Host {
    data_version: i32,
    bridge: OnceCell<&'static dyn HostBridge>,
}

impl std::fmt::Debug for dyn HostBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Host {
    pub fn new(data_version: i32) -> Self {
        Self {
            data_version,
            bridge: OnceCell::new(),
        }
    }

    /// A host for the version recorded in `root`.
    pub fn detect(root: &Tag) -> Result<Self> {
        data_version(root)
            .map(Self::new)
            .ok_or_else(|| Error::unsupported_version(None))
    }

    pub fn data_version(&self) -> i32 {
        self.data_version
    }

    pub fn bridge(&self) -> Result<&'static dyn HostBridge> {
        self.bridge
            .get_or_try_init(|| bridge_for(self.data_version))
            .map(|b| *b)
    }
}

fn item_compound(item: &mut Tag) -> Result<&mut Compound> {
    let kind = item.kind();
    item.as_compound_mut()
        .ok_or_else(|| Error::not_a_compound(kind))
}

fn texture_property(name_key: &str, value_key: &str, texture: &str) -> Tag {
    let mut property = Compound::new();
    if !name_key.is_empty() {
        property.insert(name_key.to_owned(), Tag::from("textures"));
    }
    property.insert(value_key.to_owned(), Tag::from(texture));
    Tag::List(TagList::from_items(vec![Tag::Compound(property)]))
}

/// Parse a hyphenated or plain hex UUID into the four ints the game stores,
/// most significant first.
pub fn uuid_to_ints(id: &str) -> Option<[i32; 4]> {
    let hex: String = id.chars().filter(|&c| c != '-').collect();
    if hex.len() != 32 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let v = u128::from_str_radix(&hex, 16).ok()?;
    Some([
        (v >> 96) as i32,
        (v >> 64) as i32,
        (v >> 32) as i32,
        v as i32,
    ])
}

impl LegacyItems {
    fn owner_id(&self, id: &str) -> Tag {
        match uuid_to_ints(id) {
            Some(ints) if self.from >= INT_ARRAY_UUIDS => Tag::IntArray(ints.to_vec()),
            _ => Tag::from(id),
        }
    }
}

impl HostBridge for LegacyItems {
    fn name(&self) -> &'static str {
        self.name
    }

    fn supports(&self, data_version: i32) -> bool {
        (self.from..self.until).contains(&data_version)
    }

    fn item_tag<'a>(&self, item: &'a Tag) -> Result<Option<&'a Tag>> {
        item.get_key("tag")
    }

    fn set_item_tag(&self, item: &mut Tag, tag: Option<Tag>) -> Result<()> {
        let item = item_compound(item)?;
        match tag {
            Some(tag) => item.insert("tag".to_owned(), tag),
            None => item.shift_remove("tag"),
        };
        Ok(())
    }

    fn new_item(&self, id: &str, count: i32) -> Result<Tag> {
        let count = i8::try_from(count).map_err(|_| Error::integer_overflow(count))?;
        let mut item = Compound::new();
        item.insert("id".to_owned(), Tag::from(id));
        item.insert("Count".to_owned(), Tag::Byte(count));
        Ok(Tag::Compound(item))
    }

    fn skull(&self, id: &str, texture: &str) -> Result<Tag> {
        let mut properties = Compound::new();
        properties.insert("textures".to_owned(), texture_property("", "Value", texture));

        let mut owner = Compound::new();
        owner.insert("Id".to_owned(), self.owner_id(id));
        owner.insert("Properties".to_owned(), Tag::Compound(properties));

        let mut tag = Compound::new();
        tag.insert("SkullOwner".to_owned(), Tag::Compound(owner));

        let mut item = self.new_item("minecraft:player_head", 1)?;
        self.set_item_tag(&mut item, Some(Tag::Compound(tag)))?;
        Ok(item)
    }
}

impl HostBridge for ComponentItems {
    fn name(&self) -> &'static str {
        "components-1.20.5"
    }

    fn supports(&self, data_version: i32) -> bool {
        data_version >= ITEM_COMPONENTS
    }

    fn item_tag<'a>(&self, item: &'a Tag) -> Result<Option<&'a Tag>> {
        item.get_key("components")
    }

    fn set_item_tag(&self, item: &mut Tag, tag: Option<Tag>) -> Result<()> {
        let item = item_compound(item)?;
        match tag {
            Some(tag) => item.insert("components".to_owned(), tag),
            None => item.shift_remove("components"),
        };
        Ok(())
    }

    fn new_item(&self, id: &str, count: i32) -> Result<Tag> {
        let mut item = Compound::new();
        item.insert("id".to_owned(), Tag::from(id));
        item.insert("count".to_owned(), Tag::Int(count));
        Ok(Tag::Compound(item))
    }

    fn skull(&self, id: &str, texture: &str) -> Result<Tag> {
        let mut profile = Compound::new();
        match uuid_to_ints(id) {
            Some(ints) => profile.insert("id".to_owned(), Tag::IntArray(ints.to_vec())),
            None => profile.insert("name".to_owned(), Tag::from(id)),
        };
        profile.insert(
            "properties".to_owned(),
            texture_property("name", "value", texture),
        );

        let mut components = Compound::new();
        components.insert("minecraft:profile".to_owned(), Tag::Compound(profile));

        let mut item = self.new_item("minecraft:player_head", 1)?;
        self.set_item_tag(&mut item, Some(Tag::Compound(components)))?;
        Ok(item)
    }
}
