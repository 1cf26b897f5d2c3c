//! Structures recorded in chunk data.
//!
//! Chunks remember which structures (villages, outposts, fortresses...) start
//! in them. This module reads those records into plain names and boxes:
//!
//! ```
//! use dirty::structure::{structures, BoundingBox};
//! use dirty::tag;
//!
//! let chunk = tag!({
//!     "structures": {
//!         "starts": {
//!             "minecraft:pillager_outpost": {
//!                 "id": "minecraft:pillager_outpost",
//!                 "Children": [{"BB": [I; 0, 64, 0, 15, 80, 15]}],
//!             },
//!             "minecraft:village_plains": {"id": "INVALID"},
//!         }
//!     }
//! });
//!
//! let found = structures(&chunk);
//! assert_eq!(found.len(), 1);
//! assert_eq!(found[0].name, "pillager_outpost");
//! assert_eq!(found[0].bounds, BoundingBox::from_coords(0, 64, 0, 15, 80, 15));
//! ```
use serde::Serialize;

use crate::error::Result;
use crate::naming::to_snake_case;
use crate::{DynamicValue, Tag};

/// An inclusive box of block coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoundingBox {
    pub min: [i32; 3],
    pub max: [i32; 3],
}

impl BoundingBox {
    /// Build a box from two corners. The game marks unbounded boxes with
    /// `i32::MIN` and `i32::MAX`, those give `None`.
    pub fn from_coords(ax: i32, ay: i32, az: i32, bx: i32, by: i32, bz: i32) -> Option<Self> {
        let all = [ax, ay, az, bx, by, bz];
        if all.iter().any(|&c| c == i32::MIN || c == i32::MAX) {
            return None;
        }
        Some(Self {
            min: [ax, ay, az],
            max: [bx, by, bz],
        })
    }

    /// Read a `BB` tag: an int array, or a list of ints, holding the six
    /// coordinates min first.
    pub fn from_tag(tag: &Tag) -> Option<Self> {
        let coords: Vec<i32> = match tag {
            Tag::IntArray(v) => v.clone(),
            Tag::List(list) => list
                .iter()
                .map(|t| match t {
                    Tag::Int(v) => Some(*v),
                    _ => None,
                })
                .collect::<Option<_>>()?,
            _ => return None,
        };
        match coords[..] {
            [ax, ay, az, bx, by, bz] => Self::from_coords(ax, ay, az, bx, by, bz),
            _ => None,
        }
    }

    /// The smallest box holding both boxes.
    pub fn union(&self, other: &Self) -> Self {
        let mut out = *self;
        for i in 0..3 {
            out.min[i] = out.min[i].min(other.min[i]);
            out.max[i] = out.max[i].max(other.max[i]);
        }
        out
    }

    pub fn contains(&self, pos: [i32; 3]) -> bool {
        (0..3).all(|i| self.min[i] <= pos[i] && pos[i] <= self.max[i])
    }
}

/// A structure found in a chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructureInfo {
    /// The structure's name in snake case without its namespace, eg
    /// `pillager_outpost`.
    pub name: String,
    /// Absent when the chunk holds no usable box for it.
    #[serde(flatten)]
    pub bounds: Option<BoundingBox>,
}

impl StructureInfo {
    /// The form shown to users: `{"name": .., "min": [..], "max": [..]}`.
    pub fn to_dynamic(&self) -> Result<DynamicValue> {
        crate::to_dynamic(self)
    }
}

/// Normalise a structure id like `minecraft:pillager_outpost`,
/// `Pillager_Outpost` or `EndCity` to snake case.
pub fn structure_name(id: &str) -> String {
    let bare = id.rsplit(':').next().unwrap_or(id);
    bare.split('_')
        .map(to_snake_case)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// The structures starting in `chunk`.
///
/// Both the 1.18+ layout (`structures.starts`) and the older one
/// (`Level.Structures.Starts`) are understood. Starts with id `INVALID` are
/// placeholders and are skipped.
pub fn structures(chunk: &Tag) -> Vec<StructureInfo> {
    let starts = lookup(chunk, &["structures", "starts"])
        .or_else(|| lookup(chunk, &["Level", "Structures", "Starts"]))
        .and_then(Tag::as_compound);

    let starts = match starts {
        Some(starts) => starts,
        None => return vec![],
    };

    starts
        .iter()
        .filter_map(|(key, start)| {
            let id = match start.get_key("id").ok().flatten().and_then(Tag::as_str) {
                Some("INVALID") => return None,
                Some(id) => id,
                None => key.as_str(),
            };
            Some(StructureInfo {
                name: structure_name(id),
                bounds: start_bounds(start),
            })
        })
        .collect()
}

fn lookup<'a>(tag: &'a Tag, keys: &[&str]) -> Option<&'a Tag> {
    keys.iter()
        .try_fold(tag, |tag, key| tag.get_key(key).ok().flatten())
}

fn start_bounds(start: &Tag) -> Option<BoundingBox> {
    if let Some(bb) = start.get_key("BB").ok().flatten() {
        return BoundingBox::from_tag(bb);
    }

    let children = start.get_key("Children").ok().flatten()?.as_list()?;
    children
        .iter()
        .filter_map(|child| BoundingBox::from_tag(child.get_key("BB").ok().flatten()?))
        .reduce(|a, b| a.union(&b))
}
