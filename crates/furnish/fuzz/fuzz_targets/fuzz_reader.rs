//! Fuzz target for the observation reader.
//!
//! Feeds arbitrary bytes through both the JSON and delimited paths. Errors
//! are fine; panics are not.

#![no_main]

use furnish::input::{InputFormat, ObservationReader};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10_000 {
        return;
    }

    let reader = ObservationReader::new();
    let _ = reader.read_bytes(data, InputFormat::Json);
    for delimiter in [b',', b'\t', b';', b'|'] {
        let _ = reader.read_bytes(data, InputFormat::Delimited(delimiter));
    }
});
