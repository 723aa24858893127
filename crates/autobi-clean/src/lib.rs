#![forbid(unsafe_code)]
//! autobi-clean: normalize and repair a raw table.
//!
//! The pipeline runs five steps once, in a fixed order:
//! trim → type coercion → dedup → numeric imputation → text imputation.
//! Per-column failures (a column that does not fully parse as numbers or
//! datetimes) leave that column unchanged; nothing here returns an error.

pub mod cleaner;
pub mod parse;
pub mod report;
pub mod steps;
pub mod traits;

pub use cleaner::{clean, DataCleaner};
pub use report::{CleaningReport, Conversion, Imputation};
pub use traits::CleanStep;
