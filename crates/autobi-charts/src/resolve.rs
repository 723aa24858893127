//! Turn a [`ChartSpec`] into a concrete plot instruction.
//!
//! Each chart type has one resolver returning `Result<ResolvedPlot, Fallback>`.
//! An `Err` is not surfaced: it selects the generic fallback, a scatter of the
//! first two columns, tagged with the reason. Heatmap value selection is a
//! first-match list of strategies, see [`Z_STRATEGIES`].

use serde::{Deserialize, Serialize};

use autobi_core::types::{Column, Table};

use crate::aggregate::{aggregate, Measure};
use crate::spec::{Aggregation, ChartSpec, ChartType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    Bar,
    Line,
    Histogram,
    Scatter,
    Box,
    Heatmap,
}

/// Rows the renderer should draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "table", rename_all = "lowercase")]
pub enum PlotData {
    /// The cleaned table as given.
    Source,
    /// A pre-aggregated table whose columns match the plot axes.
    Aggregated(Table),
}

/// Why the generic scatter was drawn instead of the requested chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fallback {
    MissingColumn,
    NoNumericColumn,
    UnknownChartType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedPlot {
    pub mark: Mark,
    pub x: Option<String>,
    pub y: Option<String>,
    pub z: Option<String>,
    pub color: Option<String>,
    pub agg: Option<Aggregation>,
    pub title: String,
    pub data: PlotData,
    pub fallback: Option<Fallback>,
}

impl ResolvedPlot {
    fn source(mark: Mark, spec: &ChartSpec, table: &Table) -> Self {
        Self {
            mark,
            x: None,
            y: None,
            z: None,
            color: present(table, spec.color.as_deref()).map(|c| c.name.clone()),
            agg: None,
            title: spec.title.clone(),
            data: PlotData::Source,
            fallback: None,
        }
    }
}

/// Resolve `spec` against `table`. Never fails.
pub fn resolve(table: &Table, spec: &ChartSpec) -> ResolvedPlot {
    let resolved = match &spec.chart_type {
        ChartType::Bar => grouped(table, spec, Mark::Bar),
        ChartType::Line => grouped(table, spec, Mark::Line),
        ChartType::Histogram => histogram(table, spec),
        ChartType::Scatter => scatter(table, spec),
        ChartType::Box => box_plot(table, spec),
        ChartType::Heatmap => heatmap(table, spec),
        ChartType::Other(_) => Err(Fallback::UnknownChartType),
    };
    resolved.unwrap_or_else(|reason| {
        tracing::debug!(chart = %spec.chart_type, ?reason, "falling back to scatter");
        fallback_scatter(table, spec, reason)
    })
}

/// The named column, if the name is set, non-empty and in the table.
fn present<'a>(table: &'a Table, name: Option<&str>) -> Option<&'a Column> {
    name.filter(|n| !n.is_empty()).and_then(|n| table.column(n))
}

fn required<'a>(table: &'a Table, name: &str) -> Result<&'a Column, Fallback> {
    present(table, Some(name)).ok_or(Fallback::MissingColumn)
}

/// Bar and line: aggregate `y` per `x` when `y` is numeric, else count rows.
fn grouped(table: &Table, spec: &ChartSpec, mark: Mark) -> Result<ResolvedPlot, Fallback> {
    let x = required(table, &spec.x)?;
    let (measure, out, agg) = match present(table, spec.y.as_deref()).filter(|c| c.is_numeric()) {
        Some(y) => (
            Measure::Values {
                column: y,
                agg: spec.agg,
            },
            y.name.as_str(),
            Some(spec.agg),
        ),
        None => (Measure::Rows, "count", None),
    };
    let data = aggregate(&[x], measure, out);
    Ok(ResolvedPlot {
        x: Some(x.name.clone()),
        y: data.columns.last().map(|c| c.name.clone()),
        agg,
        data: PlotData::Aggregated(data),
        ..ResolvedPlot::source(mark, spec, table)
    })
}

fn histogram(table: &Table, spec: &ChartSpec) -> Result<ResolvedPlot, Fallback> {
    let x = required(table, &spec.x)?;
    Ok(ResolvedPlot {
        x: Some(x.name.clone()),
        ..ResolvedPlot::source(Mark::Histogram, spec, table)
    })
}

fn scatter(table: &Table, spec: &ChartSpec) -> Result<ResolvedPlot, Fallback> {
    let x = required(table, &spec.x)?;
    Ok(ResolvedPlot {
        x: Some(x.name.clone()),
        y: present(table, spec.y.as_deref()).map(|c| c.name.clone()),
        ..ResolvedPlot::source(Mark::Scatter, spec, table)
    })
}

/// Distribution of `y`, or of `x` when `y` is unset.
fn box_plot(table: &Table, spec: &ChartSpec) -> Result<ResolvedPlot, Fallback> {
    let target = present(table, spec.y.as_deref())
        .or_else(|| present(table, Some(&spec.x)))
        .ok_or(Fallback::MissingColumn)?;
    Ok(ResolvedPlot {
        y: Some(target.name.clone()),
        ..ResolvedPlot::source(Mark::Box, spec, table)
    })
}

type ZStrategy = for<'a> fn(&'a Table, &ChartSpec) -> Option<&'a Column>;

/// Heatmap value column candidates, tried in order.
const Z_STRATEGIES: [ZStrategy; 3] = [named_z, numeric_y, first_numeric];

fn named_z<'a>(table: &'a Table, spec: &ChartSpec) -> Option<&'a Column> {
    present(table, spec.z.as_deref()).filter(|c| c.is_numeric())
}

fn numeric_y<'a>(table: &'a Table, spec: &ChartSpec) -> Option<&'a Column> {
    present(table, spec.y.as_deref()).filter(|c| c.is_numeric())
}

fn first_numeric<'a>(table: &'a Table, _spec: &ChartSpec) -> Option<&'a Column> {
    table.columns.iter().find(|c| c.is_numeric())
}

fn heatmap(table: &Table, spec: &ChartSpec) -> Result<ResolvedPlot, Fallback> {
    let z = Z_STRATEGIES
        .iter()
        .find_map(|strategy| strategy(table, spec))
        .ok_or(Fallback::NoNumericColumn)?;
    let x = required(table, &spec.x)?;
    let y = required(table, spec.y.as_deref().unwrap_or_default())?;

    let data = aggregate(
        &[x, y],
        Measure::Values {
            column: z,
            agg: spec.agg,
        },
        &z.name,
    );
    Ok(ResolvedPlot {
        x: Some(x.name.clone()),
        y: Some(y.name.clone()),
        z: data.columns.last().map(|c| c.name.clone()),
        agg: Some(spec.agg),
        data: PlotData::Aggregated(data),
        ..ResolvedPlot::source(Mark::Heatmap, spec, table)
    })
}

/// Scatter of the first two columns, whichever exist.
fn fallback_scatter(table: &Table, spec: &ChartSpec, reason: Fallback) -> ResolvedPlot {
    let mut names = table.columns.iter().map(|c| c.name.clone());
    ResolvedPlot {
        x: names.next(),
        y: names.next(),
        fallback: Some(reason),
        ..ResolvedPlot::source(Mark::Scatter, spec, table)
    }
}
