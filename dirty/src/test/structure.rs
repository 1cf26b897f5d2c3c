use crate::json;
use crate::structure::{structure_name, structures, BoundingBox, StructureInfo};
use crate::tag;

#[test]
fn sentinel_coords_give_no_box() {
    assert!(BoundingBox::from_coords(0, 0, 0, 1, 1, 1).is_some());
    assert!(BoundingBox::from_coords(i32::MIN, 0, 0, 1, 1, 1).is_none());
    assert!(BoundingBox::from_coords(0, 0, 0, 1, i32::MAX, 1).is_none());
}

#[test]
fn box_from_tag() {
    assert_eq!(
        BoundingBox::from_tag(&tag!([I; 1, 2, 3, 4, 5, 6])),
        BoundingBox::from_coords(1, 2, 3, 4, 5, 6)
    );
    assert_eq!(
        BoundingBox::from_tag(&tag!([1, 2, 3, 4, 5, 6])),
        BoundingBox::from_coords(1, 2, 3, 4, 5, 6)
    );
    assert_eq!(BoundingBox::from_tag(&tag!([I; 1, 2, 3])), None);
    assert_eq!(BoundingBox::from_tag(&tag!("nope")), None);
}

#[test]
fn union_and_contains() {
    let a = BoundingBox::from_coords(0, 0, 0, 5, 5, 5).unwrap();
    let b = BoundingBox::from_coords(-3, 2, 1, 2, 9, 4).unwrap();
    let u = a.union(&b);
    assert_eq!(u, BoundingBox::from_coords(-3, 0, 0, 5, 9, 5).unwrap());
    assert!(u.contains([-3, 9, 5]));
    assert!(!a.contains([6, 0, 0]));
}

#[test]
fn names_are_snake_case() {
    assert_eq!(structure_name("minecraft:pillager_outpost"), "pillager_outpost");
    assert_eq!(structure_name("Pillager_Outpost"), "pillager_outpost");
    assert_eq!(structure_name("EndCity"), "end_city");
    assert_eq!(structure_name("Fortress"), "fortress");
}

#[test]
fn old_chunk_layout() {
    let chunk = tag!({
        "Level": {
            "Structures": {
                "Starts": {
                    "Fortress": {"id": "Fortress", "BB": [I; -10, 30, -10, 40, 90, 40]},
                    "Village": {"id": "INVALID"},
                }
            }
        }
    });

    assert_eq!(
        structures(&chunk),
        [StructureInfo {
            name: "fortress".into(),
            bounds: BoundingBox::from_coords(-10, 30, -10, 40, 90, 40),
        }]
    );
}

#[test]
fn children_boxes_are_joined() {
    let chunk = tag!({
        "structures": {
            "starts": {
                "minecraft:village_plains": {
                    "id": "minecraft:village_plains",
                    "Children": [
                        {"BB": [I; 0, 60, 0, 10, 70, 10]},
                        {"BB": [I; 20, 62, -5, 30, 66, 5]},
                        {"id": "no box"},
                    ],
                },
            }
        }
    });

    let found = structures(&chunk);
    assert_eq!(found[0].name, "village_plains");
    assert_eq!(found[0].bounds, BoundingBox::from_coords(0, 60, -5, 30, 70, 10));
}

#[test]
fn chunk_without_structures() {
    assert!(structures(&tag!({"Status": "full"})).is_empty());
    assert!(structures(&tag!([1])).is_empty());
}

#[test]
fn info_as_json() {
    let info = StructureInfo {
        name: "end_city".into(),
        bounds: BoundingBox::from_coords(1, 2, 3, 4, 5, 6),
    };
    let value = info.to_dynamic().unwrap();
    assert_eq!(
        json::to_string(&value).unwrap(),
        r#"{"name":"end_city","min":[1,2,3],"max":[4,5,6]}"#
    );

    let unbounded = StructureInfo {
        name: "end_city".into(),
        bounds: None,
    };
    assert_eq!(
        json::to_string(&unbounded.to_dynamic().unwrap()).unwrap(),
        r#"{"name":"end_city"}"#
    );
}
