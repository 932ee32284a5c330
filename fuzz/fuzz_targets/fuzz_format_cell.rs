//! Fuzz target for cell value formatting.
//!
//! Formatting accepts any JSON value for any column type and never panics.

#![no_main]

use dr_common::{format_cell, ColumnType};
use libfuzzer_sys::fuzz_target;

const TYPES: [ColumnType; 4] = [
    ColumnType::Text,
    ColumnType::Number,
    ColumnType::Date,
    ColumnType::Percentage,
];

fuzz_target!(|data: &[u8]| {
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };
    for column_type in TYPES {
        let _ = format_cell(Some(&value), column_type);
    }
});
