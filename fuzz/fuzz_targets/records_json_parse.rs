//! Fuzz target for ROI record JSON parsing.

#![no_main]

use libfuzzer_sys::fuzz_target;
use roishapes::convert::convert_batch;
use roishapes::record::io_json::from_records_json_str;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(records) = from_records_json_str(text) {
            let _ = convert_batch(&records);
        }
    }
});
