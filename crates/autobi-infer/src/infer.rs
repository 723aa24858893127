//! Role classification and schema construction.
//!
//! Rules, first match wins:
//! 1. datetime or boolean columns are dimensions;
//! 2. numeric columns are measures when their distinct count exceeds the
//!    threshold, dimensions otherwise (a 1–5 rating or a year is a category);
//! 3. everything else (text) is a dimension.
//!
//! Text is never a measure, whatever its cardinality.

use std::collections::HashSet;

use autobi_core::config::AnalysisConfig;
use autobi_core::hash::fingerprint_scalar;
use autobi_core::schema::DataType;
use autobi_core::types::{Column, Scalar, Table};

use crate::schema::{FieldMap, FieldSchema, Role, Schema};

#[derive(Debug, Clone)]
pub struct SchemaInferer {
    measure_distinct_threshold: usize,
}

impl Default for SchemaInferer {
    fn default() -> Self {
        Self::new(&AnalysisConfig::default())
    }
}

impl SchemaInferer {
    pub fn new(cfg: &AnalysisConfig) -> Self {
        Self {
            measure_distinct_threshold: cfg.measure_distinct_threshold,
        }
    }

    pub fn classify_role(&self, column: &Column) -> Role {
        match column.data_type {
            DataType::Datetime | DataType::Boolean => Role::Dimension,
            DataType::Int64 | DataType::Float64 => {
                if distinct_count(column) > self.measure_distinct_threshold {
                    Role::Measure
                } else {
                    Role::Dimension
                }
            }
            DataType::Utf8 => Role::Dimension,
        }
    }

    pub fn infer_schema(&self, table: &Table) -> Schema {
        let mut fields = FieldMap::new();
        for col in &table.columns {
            let field = FieldSchema {
                role: self.classify_role(col),
                dtype: col.data_type.dtype_tag().to_string(),
                distinct: distinct_count(col),
            };
            tracing::trace!(
                column = %col.name,
                role = ?field.role,
                dtype = %field.dtype,
                distinct = field.distinct,
                "inferred field"
            );
            fields.insert(col.name.clone(), field);
        }
        Schema {
            row_count: table.num_rows(),
            fields,
        }
    }
}

/// Number of distinct present values; missing entries and NaN are not counted.
pub fn distinct_count(column: &Column) -> usize {
    column
        .present()
        .filter(|v| !matches!(v, Scalar::F64(f) if f.is_nan()))
        .map(fingerprint_scalar)
        .collect::<HashSet<_>>()
        .len()
}

/// Classify with the default threshold.
pub fn classify_role(column: &Column) -> Role {
    SchemaInferer::default().classify_role(column)
}

/// Infer with the default threshold.
pub fn infer_schema(table: &Table) -> Schema {
    SchemaInferer::default().infer_schema(table)
}
