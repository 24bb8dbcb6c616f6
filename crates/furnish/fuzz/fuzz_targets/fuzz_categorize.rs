//! Fuzz target for the classifier.
//!
//! Splits the input into text, URL and label and checks that
//! classification never panics and always yields at least one room.

#![no_main]

use std::sync::OnceLock;

use furnish::Classifier;
use libfuzzer_sys::fuzz_target;

static CLASSIFIER: OnceLock<Classifier> = OnceLock::new();

fuzz_target!(|data: &[u8]| {
    let classifier = CLASSIFIER.get_or_init(|| Classifier::builtin().unwrap());

    if let Ok(input) = std::str::from_utf8(data) {
        let mut parts = input.splitn(3, '\n');
        let text = parts.next().unwrap_or("");
        let url = parts.next();
        let label = parts.next();

        let result = classifier.categorize(text, url, label);
        assert!(!result.room_types.is_empty());
        if result.product_type.is_none() {
            assert!(result.fixture_type.is_none());
        }
    }
});
