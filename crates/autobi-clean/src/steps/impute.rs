use std::cmp::Ordering;

use autobi_core::config::AllMissingPolicy;
use autobi_core::schema::DataType;
use autobi_core::types::{Column, Scalar, Table};

use crate::report::{CleaningReport, Imputation};
use crate::traits::CleanStep;

/// Fill missing entries of numeric columns with the column median.
///
/// An integer column whose median is fractional is widened to `Float64` so
/// the median can be stored exactly. Columns with no present value follow
/// `all_missing`.
#[derive(Debug)]
pub struct ImputeNumeric {
    pub all_missing: AllMissingPolicy,
}

impl CleanStep for ImputeNumeric {
    fn name(&self) -> &'static str {
        "impute_numeric"
    }

    fn apply(&self, table: &mut Table, report: &mut CleaningReport) {
        for col in table.columns.iter_mut().filter(|c| c.is_numeric()) {
            let missing = col.null_count();
            if missing == 0 {
                continue;
            }

            let fill = match median(col) {
                Some(m) => fill_value(col, m),
                None => match self.all_missing {
                    AllMissingPolicy::Leave => {
                        tracing::debug!(column = %col.name, "no median; leaving entries missing");
                        continue;
                    }
                    AllMissingPolicy::Zero => zero_of(col.data_type),
                },
            };

            tracing::debug!(column = %col.name, filled = missing, value = %fill, "imputed numeric column");
            for v in col.values.iter_mut().filter(|v| v.is_null()) {
                *v = fill.clone();
            }
            report.imputed.push(Imputation {
                column: col.name.clone(),
                filled: missing,
                value: fill,
            });
        }
    }
}

/// Fill missing entries of text columns with a fixed placeholder.
#[derive(Debug)]
pub struct ImputeText {
    pub placeholder: String,
}

impl CleanStep for ImputeText {
    fn name(&self) -> &'static str {
        "impute_text"
    }

    fn apply(&self, table: &mut Table, report: &mut CleaningReport) {
        for col in table
            .columns
            .iter_mut()
            .filter(|c| c.data_type == DataType::Utf8)
        {
            let missing = col.null_count();
            if missing == 0 {
                continue;
            }
            let fill = Scalar::Str(self.placeholder.clone());
            for v in col.values.iter_mut().filter(|v| v.is_null()) {
                *v = fill.clone();
            }
            report.imputed.push(Imputation {
                column: col.name.clone(),
                filled: missing,
                value: fill,
            });
        }
    }
}

/// Median of the present, non-NaN values.
pub fn median(col: &Column) -> Option<f64> {
    let mut xs: Vec<f64> = col
        .present()
        .filter_map(Scalar::as_f64)
        .filter(|x| !x.is_nan())
        .collect();
    if xs.is_empty() {
        return None;
    }
    xs.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let mid = xs.len() / 2;
    if xs.len() % 2 == 1 {
        Some(xs[mid])
    } else {
        Some((xs[mid - 1] + xs[mid]) / 2.0)
    }
}

/// The scalar to write for median `m`, widening an integer column when `m`
/// has a fractional part.
fn fill_value(col: &mut Column, m: f64) -> Scalar {
    if col.data_type == DataType::Int64 {
        if m.fract() == 0.0 && m >= i64::MIN as f64 && m <= i64::MAX as f64 {
            return Scalar::I64(m as i64);
        }
        widen_to_float(col);
    }
    Scalar::F64(m)
}

fn widen_to_float(col: &mut Column) {
    col.data_type = DataType::Float64;
    for v in col.values.iter_mut() {
        if let Scalar::I64(i) = v {
            *v = Scalar::F64(*i as f64);
        }
    }
}

fn zero_of(data_type: DataType) -> Scalar {
    match data_type {
        DataType::Int64 => Scalar::I64(0),
        _ => Scalar::F64(0.0),
    }
}
