use autobi_core::schema::DataType;
use autobi_core::types::{Scalar, Table};

use crate::report::CleaningReport;
use crate::traits::CleanStep;

/// Render every present value of a text column as a string and strip
/// surrounding whitespace. Missing entries stay `Scalar::Null`.
#[derive(Debug, Default)]
pub struct TrimText;

impl CleanStep for TrimText {
    fn name(&self) -> &'static str {
        "trim"
    }

    fn apply(&self, table: &mut Table, _report: &mut CleaningReport) {
        for col in table
            .columns
            .iter_mut()
            .filter(|c| c.data_type == DataType::Utf8)
        {
            for v in col.values.iter_mut() {
                if let Some(text) = v.to_text() {
                    *v = Scalar::Str(text.trim().to_string());
                }
            }
        }
    }
}
