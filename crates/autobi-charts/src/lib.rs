#![forbid(unsafe_code)]
//! autobi-charts: recommend chart specs from a schema and resolve a spec
//! against a cleaned table into a concrete plot instruction.
//!
//! Both entry points are infallible. Resolution degrades to a documented
//! fallback (a scatter of the first two columns) instead of failing, so it
//! is safe to call speculatively on tables of unknown shape.

pub mod aggregate;
pub mod recommend;
pub mod resolve;
pub mod spec;

pub use aggregate::{aggregate, Measure};
pub use recommend::recommend;
pub use resolve::{resolve, Fallback, Mark, PlotData, ResolvedPlot};
pub use spec::{Aggregation, ChartSpec, ChartType};
