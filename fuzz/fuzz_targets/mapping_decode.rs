#![no_main]

use libfuzzer_sys::fuzz_target;
use sourcemap_check::sourcemap::{decode_mappings, encode_mappings};

fuzz_target!(|data: &[u8]| {
    if let Ok(mappings) = std::str::from_utf8(data) {
        if let Ok(lines) = decode_mappings(mappings) {
            let reencoded = encode_mappings(&lines);
            assert_eq!(decode_mappings(&reencoded), Ok(lines));
        }
    }
});
