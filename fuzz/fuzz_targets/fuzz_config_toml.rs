#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Config parsing with unknown-key collection should never panic
        let _ = vmselect::config::parse_with_warnings(Path::new("fuzz.toml"), content);
        let _ = toml::from_str::<vmselect::Config>(content);
    }
});
