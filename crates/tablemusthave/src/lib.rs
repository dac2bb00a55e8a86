//! tablemusthave: declarative data-quality requirements for tabular data.
//!
//! A [`MustHave`] specification is an ordered list of [`Requirement`]s. Checking
//! a [`Table`] against it yields one [`CheckResult`] per requirement: all good,
//! doesn't apply (the requirement's columns are missing), or still needs
//! something. Some requirements can also fix the table in place.
//!
//! # Example
//!
//! ```
//! use tablemusthave::{CsvOptions, MustHave, Requirement, Table};
//!
//! let csv = "SampleID,SampleType\nS1,stool\nS1,NA\n";
//! let table = Table::from_csv(csv.as_bytes(), &CsvOptions::default()).unwrap();
//!
//! let spec = MustHave::new()
//!     .with(Requirement::columns_named(["SampleID", "SampleType"]))
//!     .with(Requirement::unique_values("SampleID"))
//!     .with(Requirement::some_value("SampleType"));
//!
//! for (requirement, result) in spec.check(&table) {
//!     println!("{}\n{}", requirement, result.message());
//! }
//! ```

pub mod error;
pub mod requirement;
pub mod result;
pub mod table;

mod musthave;

pub use error::{Result, TableMustHaveError};
pub use musthave::{MustHave, Report, ReportEntry};
pub use requirement::{
    ColumnsMatching, ColumnsNamed, Requirement, Rule, SomeValueFor, UniqueValuesFor, ValuesInSet,
    ValuesMatching,
};
pub use result::{CheckResult, Repeat, Shortfall, Status};
pub use table::{Cell, CsvOptions, IntoCell, NullValues, Table, normalize_name};
