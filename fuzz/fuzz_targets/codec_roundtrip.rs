#![no_main]
use libfuzzer_sys::fuzz_target;

use dirty::codec::{self, Encoder};
use dirty::Tag;

fuzz_target!(|v: Tag| {
    if let Ok(value) = codec::decode(&v) {
        // Decoded values fit in a tag again, but longs may be truncated.
        let tag = Encoder::lossy().encode(&value).unwrap();
        codec::decode(&tag).unwrap();
    }
});
