//! Descriptive record of what a cleaning run did. Nothing downstream reads it
//! to make decisions.

use serde::{Deserialize, Serialize};

use autobi_core::types::Scalar;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CleaningReport {
    pub rows_before: usize,
    pub rows_after: usize,
    pub duplicates_removed: usize,
    /// Applied steps in order; all five are always listed.
    pub steps: Vec<String>,
    /// Columns the coercion step retyped.
    #[serde(default)]
    pub conversions: Vec<Conversion>,
    /// Columns whose missing entries were filled.
    #[serde(default)]
    pub imputed: Vec<Imputation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversion {
    pub column: String,
    /// dtype tag of the new column type.
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Imputation {
    pub column: String,
    /// Number of entries that were missing and got `value`.
    pub filled: usize,
    pub value: Scalar,
}
