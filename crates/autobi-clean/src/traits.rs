//! Step trait shared by every cleaning transformation.

use autobi_core::types::Table;

use crate::report::CleaningReport;

/// One transformation of the cleaning pipeline.
///
/// Invariants:
/// - `apply` never fails; a column it cannot transform is left as-is.
/// - `apply` preserves the table shape invariant (equal column lengths).
pub trait CleanStep {
    /// Stable step name recorded in `CleaningReport.steps`.
    fn name(&self) -> &'static str;

    fn apply(&self, table: &mut Table, report: &mut CleaningReport);
}
