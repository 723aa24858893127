//! Runs the cleaning steps in order and assembles the report.

use autobi_core::config::AnalysisConfig;
use autobi_core::types::Table;

use crate::report::CleaningReport;
use crate::steps::{CoerceTypes, DropDuplicates, ImputeNumeric, ImputeText, TrimText};
use crate::traits::CleanStep;

#[derive(Debug, Clone, Default)]
pub struct DataCleaner {
    cfg: AnalysisConfig,
}

impl DataCleaner {
    pub fn new(cfg: AnalysisConfig) -> Self {
        Self { cfg }
    }

    /// The pipeline, in the order it runs. Order matters: trimming precedes
    /// coercion so `" 5 "` parses, and imputation sees the deduplicated rows.
    pub fn steps(&self) -> Vec<Box<dyn CleanStep>> {
        vec![
            Box::new(TrimText),
            Box::new(CoerceTypes {
                datetime_formats: self.cfg.datetime_formats.clone(),
            }),
            Box::new(DropDuplicates),
            Box::new(ImputeNumeric {
                all_missing: self.cfg.all_missing_numeric,
            }),
            Box::new(ImputeText {
                placeholder: self.cfg.missing_text_placeholder.clone(),
            }),
        ]
    }

    /// Clean a copy of `table`. The input is never modified.
    pub fn clean(&self, table: &Table) -> (Table, CleaningReport) {
        let mut out = table.clone();
        let mut report = CleaningReport {
            rows_before: table.num_rows(),
            ..Default::default()
        };

        for step in self.steps() {
            step.apply(&mut out, &mut report);
            tracing::debug!(step = step.name(), rows = out.num_rows(), "cleaning step applied");
            report.steps.push(step.name().to_string());
        }

        report.rows_after = out.num_rows();
        (out, report)
    }
}

/// Clean with the default configuration.
pub fn clean(table: &Table) -> (Table, CleaningReport) {
    DataCleaner::default().clean(table)
}
