#![forbid(unsafe_code)]
//! autobi-core: the tabular data abstraction shared by every pipeline stage.
//!
//! - `types`: `Scalar`, `Column`, `Table` (ordered named columns, equal length).
//! - `schema`: the declared element type of a column and its dtype tag.
//! - `hash`: blake3 fingerprints used for distinct counts and row dedup.
//! - `config`: analysis thresholds and cleaning policies.
//!
//! No I/O lives here; readers and writers are in `autobi-io`.

pub mod config;
pub mod error;
pub mod hash;
pub mod prelude;
pub mod schema;
pub mod types;

pub use error::{Error, Result};
