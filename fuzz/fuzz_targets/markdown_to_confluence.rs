#![no_main]

use libfuzzer_sys::fuzz_target;
use wikiscribe::{ConfluenceOptions, convert_bytes};

fuzz_target!(|data: &[u8]| {
    let options = ConfluenceOptions::default();
    if let Ok(first) = convert_bytes(data, &options) {
        // Rendering is deterministic.
        let second = convert_bytes(data, &options).expect("second conversion failed");
        assert_eq!(first.value, second.value);
    }
});
