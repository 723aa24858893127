//! Rule-table chart recommendation.
//!
//! Rules run in a fixed order and each one fires independently, so a table
//! can receive several charts. Every rule reads the same [`Roles`] view.

use autobi_core::schema::is_datetime_tag;
use autobi_core::types::Table;
use autobi_infer::schema::{Role, Schema};

use crate::spec::{Aggregation, ChartSpec, ChartType};

/// Column names grouped by what the rules need, each in table column order.
#[derive(Debug, Default)]
struct Roles<'a> {
    /// Every dimension, datetimes included.
    dimensions: Vec<&'a str>,
    /// Dimensions that are not datetimes; time has its own line rule.
    categories: Vec<&'a str>,
    measures: Vec<&'a str>,
    /// Datetime columns of the cleaned table, whatever their role.
    dates: Vec<&'a str>,
}

impl<'a> Roles<'a> {
    fn new(schema: &'a Schema, table: &'a Table) -> Self {
        let dates: Vec<&str> = table
            .columns
            .iter()
            .filter(|c| is_datetime_tag(c.data_type.dtype_tag()))
            .map(|c| c.name.as_str())
            .collect();
        let categories = schema
            .fields
            .iter()
            .filter(|(name, f)| {
                f.role == Role::Dimension && !f.is_datetime() && !dates.contains(name)
            })
            .map(|(name, _)| name)
            .collect();
        Self {
            dimensions: schema.dimensions(),
            categories,
            measures: schema.measures(),
            dates,
        }
    }
}

struct Rule {
    name: &'static str,
    applies: fn(&Roles<'_>) -> bool,
    build: fn(&Roles<'_>) -> ChartSpec,
}

const RULES: &[Rule] = &[
    Rule {
        name: "date_measure_line",
        applies: |r| !r.dates.is_empty() && !r.measures.is_empty(),
        build: |r| {
            ChartSpec::new(ChartType::Line, r.dates[0])
                .with_y(r.measures[0])
                .with_agg(Aggregation::Sum)
                .titled(format!("{} over time", r.measures[0]))
                .because("Date + measure → line")
        },
    },
    Rule {
        name: "dimension_measure_bar",
        applies: |r| !r.categories.is_empty() && !r.measures.is_empty(),
        build: |r| {
            ChartSpec::new(ChartType::Bar, r.categories[0])
                .with_y(r.measures[0])
                .with_agg(Aggregation::Sum)
                .titled(format!("Top {} by {}", r.categories[0], r.measures[0]))
                .because("Dim + measure → bar")
        },
    },
    Rule {
        name: "measure_histogram",
        applies: |r| !r.measures.is_empty(),
        build: |r| {
            ChartSpec::new(ChartType::Histogram, r.measures[0])
                .titled(format!("Distribution of {}", r.measures[0]))
                .because("Univariate measure → histogram")
        },
    },
    Rule {
        name: "measure_pair_scatter",
        applies: |r| r.measures.len() >= 2,
        build: |r| {
            ChartSpec::new(ChartType::Scatter, r.measures[0])
                .with_y(r.measures[1])
                .titled(format!("{} vs {}", r.measures[0], r.measures[1]))
                .because("Two measures → scatter")
        },
    },
    Rule {
        name: "dimension_pair_heatmap",
        applies: |r| r.dimensions.len() >= 2 && !r.measures.is_empty(),
        build: |r| {
            ChartSpec::new(ChartType::Heatmap, r.dimensions[0])
                .with_y(r.dimensions[1])
                .with_z(r.measures[0])
                .with_agg(Aggregation::Sum)
                .titled(format!(
                    "Heatmap of {} by {} and {}",
                    r.measures[0], r.dimensions[0], r.dimensions[1]
                ))
                .because("Two dims + measure → heatmap")
        },
    },
];

/// Recommend charts for a cleaned `table` and its `schema`.
///
/// Deterministic: the same inputs always give the same specs in the same
/// order. A schema with no dimension and no measure yields nothing.
pub fn recommend(schema: &Schema, table: &Table) -> Vec<ChartSpec> {
    let roles = Roles::new(schema, table);
    RULES
        .iter()
        .filter(|rule| (rule.applies)(&roles))
        .map(|rule| {
            let spec = (rule.build)(&roles);
            tracing::trace!(rule = rule.name, chart = %spec.chart_type, x = %spec.x, "rule fired");
            spec
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use autobi_core::schema::DataType;
    use autobi_core::types::{Column, Scalar};
    use autobi_infer::infer_schema;
    use chrono::NaiveDate;

    fn dates(n: usize) -> Column {
        let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        Column::new(
            "date",
            DataType::Datetime,
            (0..n)
                .map(|i| {
                    let d = base + chrono::Days::new(i as u64);
                    Scalar::DateTime(d.and_hms_opt(0, 0, 0).unwrap())
                })
                .collect(),
        )
    }

    fn sales_table() -> Table {
        let regions = ["north", "south", "east", "west", "central"];
        Table::new(vec![
            dates(200),
            Column::utf8("region", (0..200).map(|i| Some(regions[i % 5]))),
            Column::float64("sales", (0..200).map(|i| Some(i as f64 * 1.5))),
        ])
        .unwrap()
    }

    #[test]
    fn date_region_sales_gives_line_bar_histogram_heatmap() {
        let table = sales_table();
        let recs = recommend(&infer_schema(&table), &table);
        let kinds: Vec<(&ChartType, &str, Option<&str>)> = recs
            .iter()
            .map(|r| (&r.chart_type, r.x.as_str(), r.y.as_deref()))
            .collect();
        assert_eq!(
            kinds,
            vec![
                (&ChartType::Line, "date", Some("sales")),
                (&ChartType::Bar, "region", Some("sales")),
                (&ChartType::Histogram, "sales", None),
                (&ChartType::Heatmap, "date", Some("region")),
            ]
        );
        assert_eq!(recs[3].z.as_deref(), Some("sales"));
        assert_eq!(recs[3].title, "Heatmap of sales by date and region");
        assert_eq!(recs[0].title, "sales over time");
        assert_eq!(recs[1].title, "Top region by sales");
        assert_eq!(recs[2].rationale.as_deref(), Some("Univariate measure → histogram"));
    }

    #[test]
    fn two_measures_and_two_dimensions() {
        let table = Table::new(vec![
            Column::utf8("shop", (0..50).map(|i| Some(format!("s{}", i % 3)))),
            Column::utf8("tier", (0..50).map(|i| Some(format!("t{}", i % 2)))),
            Column::int64("units", (0..50).map(Some)),
            Column::float64("price", (0..50).map(|i| Some(i as f64 / 4.0))),
        ])
        .unwrap();
        let recs = recommend(&infer_schema(&table), &table);
        let types: Vec<&str> = recs.iter().map(|r| r.chart_type.as_str()).collect();
        assert_eq!(types, vec!["bar", "histogram", "scatter", "heatmap"]);
        let heat = &recs[3];
        assert_eq!((heat.x.as_str(), heat.y.as_deref(), heat.z.as_deref()), ("shop", Some("tier"), Some("units")));
        assert_eq!(heat.title, "Heatmap of units by shop and tier");
        assert_eq!(recs[2].title, "units vs price");
    }

    #[test]
    fn no_roles_no_recommendations() {
        let table = Table::default();
        assert!(recommend(&infer_schema(&table), &table).is_empty());
        let dims_only = Table::new(vec![Column::utf8("a", [Some("x")])]).unwrap();
        assert!(recommend(&infer_schema(&dims_only), &dims_only).is_empty());
    }

    #[test]
    fn recommendations_are_deterministic() {
        let table = sales_table();
        let schema = infer_schema(&table);
        assert_eq!(recommend(&schema, &table), recommend(&schema, &table));
    }
}
