//! Fuzz target for CSV ingestion and checking.
//!
//! This fuzzer tests that:
//! 1. Reading arbitrary bytes as CSV never panics
//! 2. Checking and fixing any table that was read never panics
//! 3. Fixing leaves the table's shape unchanged

#![no_main]

use libfuzzer_sys::fuzz_target;
use tablemusthave::{CsvOptions, MustHave, Requirement, Table};

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    let Ok(mut table) = Table::from_csv(data, &CsvOptions::default()) else {
        return;
    };
    let Some(first) = table.colnames().first().map(|c| c.to_string()) else {
        return;
    };

    let mut spec = MustHave::new()
        .with(Requirement::columns_named([first.to_uppercase()]))
        .with(Requirement::values_in_set(first.clone(), ["a", "B_", "c c"]))
        .with(Requirement::some_value(first.clone()))
        .with(Requirement::unique_values(first.clone()));
    if let Ok(req) = Requirement::values_matching(first, "^[a-z]") {
        spec.append(req);
    }

    let rows = table.row_count();
    let columns = table.column_count();
    let _ = spec.report(&table);
    spec.fix(&mut table);
    assert_eq!(table.row_count(), rows);
    assert_eq!(table.column_count(), columns);
    let _ = spec.report(&table);
});
