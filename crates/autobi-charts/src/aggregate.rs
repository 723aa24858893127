//! Hash group-by used to pre-aggregate bar, line and heatmap data.
//!
//! Groups are keyed by a blake3 fingerprint of the key tuple and emitted
//! sorted by key, so the output does not depend on input row order. Rows with
//! a missing key are dropped.

use std::collections::HashMap;

use blake3::Hasher;

use autobi_core::hash::hash_scalar;
use autobi_core::schema::DataType;
use autobi_core::types::{scalar_tuple_cmp, Column, Scalar, Table};

use crate::spec::Aggregation;

/// What each group reduces to.
#[derive(Debug, Clone, Copy)]
pub enum Measure<'a> {
    /// Number of rows in the group.
    Rows,
    /// `agg` over the present values of `column`.
    Values { column: &'a Column, agg: Aggregation },
}

struct Group {
    key: Vec<Scalar>,
    rows: Vec<usize>,
}

/// Group `keys` (all of equal length) and reduce each group by `measure`.
///
/// The result holds one column per key followed by the measure column named
/// `out_name`; if that name is already taken by a key, the aggregation name
/// is appended. A key named twice is grouped on once.
pub fn aggregate(keys: &[&Column], measure: Measure<'_>, out_name: &str) -> Table {
    let mut distinct: Vec<&Column> = Vec::with_capacity(keys.len());
    for &key in keys {
        if distinct.iter().all(|k| k.name != key.name) {
            distinct.push(key);
        }
    }
    let keys = distinct.as_slice();
    let n = keys.first().map_or(0, |c| c.len());

    let mut index: HashMap<[u8; 32], usize> = HashMap::new();
    let mut groups: Vec<Group> = Vec::new();
    for row in 0..n {
        let key: Vec<Scalar> = keys.iter().map(|c| c.values[row].clone()).collect();
        if key.iter().any(Scalar::is_null) {
            continue;
        }
        let mut hasher = Hasher::new();
        for k in &key {
            hash_scalar(k, &mut hasher);
        }
        let slot = *index.entry(*hasher.finalize().as_bytes()).or_insert_with(|| {
            groups.push(Group {
                key,
                rows: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].rows.push(row);
    }
    groups.sort_by(|a, b| scalar_tuple_cmp(&a.key, &b.key));

    let mut columns: Vec<Column> = keys
        .iter()
        .enumerate()
        .map(|(i, c)| {
            Column::new(
                c.name.clone(),
                c.data_type,
                groups.iter().map(|g| g.key[i].clone()).collect(),
            )
        })
        .collect();

    let (data_type, values): (DataType, Vec<Scalar>) = match measure {
        Measure::Rows => (
            DataType::Int64,
            groups.iter().map(|g| Scalar::I64(g.rows.len() as i64)).collect(),
        ),
        Measure::Values { column, agg } => (
            output_type(column.data_type, agg),
            groups.iter().map(|g| reduce(column, &g.rows, agg)).collect(),
        ),
    };

    let name = unique_name(out_name, &measure, &columns);
    columns.push(Column::new(name, data_type, values));
    Table { columns }
}

fn unique_name(base: &str, measure: &Measure<'_>, keys: &[Column]) -> String {
    if keys.iter().all(|c| c.name != base) {
        return base.to_string();
    }
    let suffix = match measure {
        Measure::Rows => "rows",
        Measure::Values { agg, .. } => agg.as_str(),
    };
    format!("{base}_{suffix}")
}

fn output_type(input: DataType, agg: Aggregation) -> DataType {
    match agg {
        Aggregation::Count => DataType::Int64,
        Aggregation::Mean => DataType::Float64,
        Aggregation::Sum | Aggregation::Min | Aggregation::Max => {
            if input == DataType::Int64 {
                DataType::Int64
            } else {
                DataType::Float64
            }
        }
    }
}

fn reduce(column: &Column, rows: &[usize], agg: Aggregation) -> Scalar {
    let present = rows
        .iter()
        .map(|&r| &column.values[r])
        .filter(|v| !v.is_null() && !matches!(v, Scalar::F64(f) if f.is_nan()));

    if agg == Aggregation::Count {
        return Scalar::I64(present.count() as i64);
    }

    if column.data_type == DataType::Int64 && agg != Aggregation::Mean {
        let ints = present.filter_map(|v| match v {
            Scalar::I64(i) => Some(*i),
            _ => None,
        });
        return match agg {
            Aggregation::Sum => Scalar::I64(ints.fold(0i64, i64::saturating_add)),
            Aggregation::Min => ints.min().map_or(Scalar::Null, Scalar::I64),
            _ => ints.max().map_or(Scalar::Null, Scalar::I64),
        };
    }

    let xs: Vec<f64> = present.filter_map(Scalar::as_f64).collect();
    match agg {
        Aggregation::Sum => Scalar::F64(xs.iter().sum()),
        Aggregation::Mean if xs.is_empty() => Scalar::Null,
        Aggregation::Mean => Scalar::F64(xs.iter().sum::<f64>() / xs.len() as f64),
        Aggregation::Min => xs.into_iter().reduce(f64::min).map_or(Scalar::Null, Scalar::F64),
        _ => xs.into_iter().reduce(f64::max).map_or(Scalar::Null, Scalar::F64),
    }
}
