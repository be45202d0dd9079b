//! Fuzz target for ImageJ `.roi` decoding and conversion.
//!
//! This fuzzer feeds arbitrary byte sequences to the ROI decoder and the
//! shape converter, checking for panics, crashes, or hangs.

#![no_main]

use libfuzzer_sys::fuzz_target;
use roishapes::convert::fuzz_convert_roi_bytes;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let _ = fuzz_convert_roi_bytes(data);
});
