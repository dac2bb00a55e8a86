//! Example: Check a sequencing sample sheet against the CHOP requirements.
//!
//! Usage:
//!   cargo run --example check_usda -- <file_path> [--fix] [--json]
//!
//! Set `RUST_LOG=tablemusthave=debug` to see each check and repair.

use std::env;
use std::path::Path;

use tablemusthave::{CsvOptions, MustHave, Requirement, Table};
use tracing_subscriber::EnvFilter;

const CHOP_MANDATORY: &[&str] = &[
    "SampleID",
    "SampleType",
    "reverse_barcode_plate",
    "reverse_barcode_location",
    "forward_barcode_plate",
    "forward_barcode_location",
    "flow_cell_id",
];

fn specification() -> tablemusthave::Result<MustHave> {
    let mut spec = MustHave::new()
        .with(Requirement::columns_named(CHOP_MANDATORY.iter().copied()))
        .with(Requirement::columns_matching("^[0-9A-Za-z._]+$")?)
        .with(Requirement::columns_matching("^[A-Za-z]")?)
        .with(Requirement::values_matching("SampleID", "^[0-9A-Za-z.]+$")?)
        .with(Requirement::values_matching("SampleID", "^[A-Za-z]")?)
        .with(Requirement::unique_values("SampleID"))
        .with(Requirement::values_matching("reverse_barcode_location", "^[A-H][0-9]{2}$")?)
        .with(Requirement::unique_values_together([
            "reverse_barcode_location",
            "reverse_barcode_plate",
            "forward_barcode_location",
            "forward_barcode_plate",
        ])?)
        .with(Requirement::values_matching("forward_barcode_location", "^[A-H][0-9]{2}$")?);
    spec.extend(CHOP_MANDATORY.iter().map(|c| Requirement::some_value(*c)));
    Ok(spec)
}

fn main() -> tablemusthave::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example check_usda -- <file_path> [--fix] [--json]");
        std::process::exit(1);
    }

    let path = Path::new(&args[1]);
    let fix = args.iter().any(|a| a == "--fix");
    let json = args.iter().any(|a| a == "--json");

    let spec = specification()?;

    if !json {
        for description in spec.descriptions() {
            println!("{}", description);
        }
        println!();
    }

    let mut table = Table::from_path(path, &CsvOptions::default())?;
    if fix {
        spec.fix(&mut table);
    }

    let report = spec.report(&table);
    if json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report);
        println!();
        println!(
            "{} passed, {} failed, {} did not apply",
            report.passed(),
            report.failed(),
            report.skipped()
        );
    }

    if !report.is_success() {
        std::process::exit(2);
    }
    Ok(())
}
