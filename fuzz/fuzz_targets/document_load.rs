#![no_main]

use libfuzzer_sys::fuzz_target;
use sourcemap_check::SourceMapDocument;
use std::path::Path;

fuzz_target!(|data: &[u8]| {
    if let Ok(json) = std::str::from_utf8(data) {
        if let Ok(doc) = SourceMapDocument::from_json(json) {
            let _ = doc.decode_mappings(Path::new("fuzz.js.map"));
        }
    }
});
