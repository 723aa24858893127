#![forbid(unsafe_code)]
//! Auto-BI: clean an uploaded table, classify its columns and recommend charts.
//!
//! This crate re-exports the workspace members under one name:
//!
//! ```no_run
//! use autobi::{charts, clean, infer, io};
//!
//! let raw = io::read_table("sales.csv")?;
//! let (table, _report) = clean::clean(&raw);
//! let schema = infer::infer_schema(&table);
//! for spec in charts::recommend(&schema, &table) {
//!     let plot = charts::resolve(&table, &spec);
//!     println!("{:?} {}", plot.mark, plot.title);
//! }
//! # Ok::<(), autobi::io::Error>(())
//! ```

pub use autobi_charts as charts;
pub use autobi_clean as clean;
pub use autobi_core as data;
pub use autobi_infer as infer;
pub use autobi_io as io;
