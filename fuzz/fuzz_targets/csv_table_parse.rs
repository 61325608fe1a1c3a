//! Fuzz target for CSV table parsing and validation.
//!
//! This fuzzer feeds arbitrary byte sequences to the CSV table reader and,
//! when parsing succeeds, runs validation and preview rendering on the
//! result, checking for panics, crashes, or hangs.

#![no_main]

use ecgstage::table::from_csv_slice;
use ecgstage::validation::{validate_table, ValidateOptions};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    if let Ok(table) = from_csv_slice(data) {
        let report = validate_table(&table, "fuzz.csv", &ValidateOptions::default());
        let _ = report.to_string();
    }
});
