use autobi_core::schema::DataType;
use autobi_core::types::Table;

use crate::parse::{parse_datetimes, parse_numeric};
use crate::report::{CleaningReport, Conversion};
use crate::traits::CleanStep;

/// Retype text columns whose present values all parse as numbers (tried
/// first) or all parse as datetimes. A column with any unparseable value is
/// left exactly as it was.
#[derive(Debug)]
pub struct CoerceTypes {
    pub datetime_formats: Vec<String>,
}

impl CleanStep for CoerceTypes {
    fn name(&self) -> &'static str {
        "type_coercion"
    }

    fn apply(&self, table: &mut Table, report: &mut CleaningReport) {
        for col in table
            .columns
            .iter_mut()
            .filter(|c| c.data_type == DataType::Utf8)
        {
            if let Some((data_type, values)) = parse_numeric(&col.values) {
                tracing::debug!(column = %col.name, to = %data_type, "coerced text column");
                col.data_type = data_type;
                col.values = values;
            } else if let Some(values) = parse_datetimes(&col.values, &self.datetime_formats) {
                tracing::debug!(column = %col.name, to = %DataType::Datetime, "coerced text column");
                col.data_type = DataType::Datetime;
                col.values = values;
            } else {
                continue;
            }
            report.conversions.push(Conversion {
                column: col.name.clone(),
                to: col.data_type.dtype_tag().to_string(),
            });
        }
    }
}
