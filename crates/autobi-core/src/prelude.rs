//! Convenient re-exports for downstream crates.

pub use crate::config::{AllMissingPolicy, AnalysisConfig, ConfigFile};
pub use crate::error::{Error, Result};
pub use crate::hash::{fingerprint_row, fingerprint_scalar, Fingerprint};
pub use crate::schema::DataType;
pub use crate::types::{Column, Scalar, Table};
