//! Fuzz target for dataset reference parsing.

#![no_main]

use ecgstage::kaggle::resolve::parse_dataset_input;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if let Ok(reference) = parse_dataset_input(input) {
            // Display output must parse back to the same reference.
            let again = parse_dataset_input(&reference.to_string()).expect("reparse");
            assert_eq!(again, reference);
        }
    }
});
