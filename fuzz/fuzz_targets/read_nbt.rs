#![no_main]
use libfuzzer_sys::fuzz_target;

use dirty::nbt;

fuzz_target!(|data: &[u8]| {
    if let Ok(root) = nbt::from_bytes(data) {
        // Anything read must be writable and read back.
        let bs = nbt::to_bytes(&root).unwrap();
        nbt::from_bytes(&bs).unwrap();
    }
});
