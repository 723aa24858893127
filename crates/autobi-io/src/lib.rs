#![forbid(unsafe_code)]
//! autobi-io: reading raw tables and writing what the pipeline produces.
//!
//! Everything here returns `Result`; the analysis crates never touch files.

pub mod config;
pub mod error;
pub mod export;
pub mod readers;
pub mod writers;

pub use config::load_config_file;
pub use error::{Error, Result};
pub use export::{load_chart_specs, read_export, write_export, ExportDocument};
pub use readers::csv::{read_table, CsvReader};
pub use writers::csv::CsvWriter;
pub use writers::jsonl::JsonlWriter;
