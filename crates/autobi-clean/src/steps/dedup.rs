use std::collections::HashSet;

use autobi_core::hash::fingerprint_row;
use autobi_core::types::Table;

use crate::report::CleaningReport;
use crate::traits::CleanStep;

/// Drop rows identical to an earlier row across every column (missing
/// entries included). Survivors keep their relative order.
#[derive(Debug, Default)]
pub struct DropDuplicates;

impl CleanStep for DropDuplicates {
    fn name(&self) -> &'static str {
        "dedup"
    }

    fn apply(&self, table: &mut Table, report: &mut CleaningReport) {
        let rows = table.num_rows();
        let mut seen = HashSet::with_capacity(rows);
        let keep: Vec<usize> = (0..rows)
            .filter(|&idx| seen.insert(fingerprint_row(table, idx)))
            .collect();

        let removed = rows - keep.len();
        if removed > 0 {
            tracing::debug!(removed, "dropped duplicate rows");
            *table = table.take_rows(&keep);
        }
        report.duplicates_removed = removed;
    }
}
