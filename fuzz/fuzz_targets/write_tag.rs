#![no_main]
use libfuzzer_sys::fuzz_target;

use dirty::nbt::{self, NamedTag};
use dirty::{Compound, Tag};

fuzz_target!(|v: Tag| {
    let mut inner = Compound::new();
    inner.insert("".to_string(), v);

    let root = NamedTag::new("", Tag::Compound(inner));
    if let Ok(bs) = nbt::to_bytes(&root) {
        let read = nbt::from_bytes(&bs).unwrap();
        assert_eq!(nbt::to_bytes(&read).unwrap(), bs);
    }
});
