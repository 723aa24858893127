//! Declarative chart requests.
//!
//! A `ChartSpec` names columns; it owns no data. JSON keys `type`, `x`, `y`,
//! `color`, `z`, `agg`, `title` are part of the export format and must not
//! change. The rationale is written as `why`.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChartType {
    Bar,
    Line,
    Histogram,
    Scatter,
    Box,
    Heatmap,
    /// Any other name; resolution treats it as unknown.
    Other(String),
}

impl ChartType {
    pub fn as_str(&self) -> &str {
        match self {
            ChartType::Bar => "bar",
            ChartType::Line => "line",
            ChartType::Histogram => "histogram",
            ChartType::Scatter => "scatter",
            ChartType::Box => "box",
            ChartType::Heatmap => "heatmap",
            ChartType::Other(name) => name,
        }
    }
}

impl From<&str> for ChartType {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "bar" => ChartType::Bar,
            "line" => ChartType::Line,
            "histogram" => ChartType::Histogram,
            "scatter" => ChartType::Scatter,
            "box" => ChartType::Box,
            "heatmap" => ChartType::Heatmap,
            _ => ChartType::Other(s.to_string()),
        }
    }
}

impl From<String> for ChartType {
    fn from(s: String) -> Self {
        ChartType::from(s.as_str())
    }
}

impl From<ChartType> for String {
    fn from(t: ChartType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Simplified aggregations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    #[default]
    Sum,
    Mean,
    Count,
    Min,
    Max,
}

impl Aggregation {
    pub fn as_str(self) -> &'static str {
        match self {
            Aggregation::Sum => "sum",
            Aggregation::Mean => "mean",
            Aggregation::Count => "count",
            Aggregation::Min => "min",
            Aggregation::Max => "max",
        }
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Aggregation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sum" => Ok(Aggregation::Sum),
            "mean" | "avg" => Ok(Aggregation::Mean),
            "count" => Ok(Aggregation::Count),
            "min" => Ok(Aggregation::Min),
            "max" => Ok(Aggregation::Max),
            other => Err(format!("unknown aggregation '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSpec {
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    #[serde(default)]
    pub x: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Value axis of a heatmap.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<String>,
    #[serde(default)]
    pub agg: Aggregation,
    #[serde(default)]
    pub title: String,
    #[serde(
        default,
        rename = "why",
        alias = "rationale",
        skip_serializing_if = "Option::is_none"
    )]
    pub rationale: Option<String>,
}

impl ChartSpec {
    pub fn new(chart_type: impl Into<ChartType>, x: impl Into<String>) -> Self {
        Self {
            chart_type: chart_type.into(),
            x: x.into(),
            y: None,
            color: None,
            z: None,
            agg: Aggregation::Sum,
            title: String::new(),
            rationale: None,
        }
    }

    /// A user-built chart: empty `y`/`color` mean unset, and the title reads
    /// `"Bar — region vs sales"`.
    pub fn custom(
        chart_type: impl Into<ChartType>,
        x: impl Into<String>,
        y: Option<&str>,
        color: Option<&str>,
        agg: Aggregation,
    ) -> Self {
        let chart_type = chart_type.into();
        let x = x.into();
        let y = y.filter(|s| !s.is_empty()).map(str::to_string);
        let color = color.filter(|s| !s.is_empty()).map(str::to_string);
        let mut title = format!("{} — {}", capitalize(chart_type.as_str()), x);
        if let Some(y) = &y {
            title.push_str(" vs ");
            title.push_str(y);
        }
        Self {
            chart_type,
            x,
            y,
            color,
            z: None,
            agg,
            title,
            rationale: None,
        }
    }

    pub fn with_y(mut self, y: impl Into<String>) -> Self {
        self.y = Some(y.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_z(mut self, z: impl Into<String>) -> Self {
        self.z = Some(z.into());
        self
    }

    pub fn with_agg(mut self, agg: Aggregation) -> Self {
        self.agg = agg;
        self
    }

    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn because(mut self, rationale: impl Into<String>) -> Self {
        self.rationale = Some(rationale.into());
        self
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_export_keys() {
        let spec = ChartSpec::new(ChartType::Bar, "region")
            .with_y("sales")
            .titled("Top region by sales")
            .because("Dim + measure → bar");
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["type"], "bar");
        assert_eq!(json["x"], "region");
        assert_eq!(json["y"], "sales");
        assert_eq!(json["agg"], "sum");
        assert_eq!(json["title"], "Top region by sales");
        assert_eq!(json["why"], "Dim + measure → bar");
        assert!(json.get("color").is_none());
        assert!(json.get("z").is_none());
    }

    #[test]
    fn unknown_type_parses_instead_of_failing() {
        let spec: ChartSpec = serde_json::from_str(r#"{"type":"pie","x":"a"}"#).unwrap();
        assert_eq!(spec.chart_type, ChartType::Other("pie".into()));
        assert_eq!(spec.agg, Aggregation::Sum);
        let back = serde_json::to_value(&spec).unwrap();
        assert_eq!(back["type"], "pie");
    }

    #[test]
    fn rationale_alias_is_accepted() {
        let spec: ChartSpec =
            serde_json::from_str(r#"{"type":"line","x":"d","rationale":"because"}"#).unwrap();
        assert_eq!(spec.rationale.as_deref(), Some("because"));
    }

    #[test]
    fn custom_title_and_empty_fields() {
        let spec = ChartSpec::custom("heatmap", "region", Some(""), Some(""), Aggregation::Mean);
        assert_eq!(spec.title, "Heatmap — region");
        assert_eq!(spec.y, None);
        assert_eq!(spec.color, None);

        let spec = ChartSpec::custom("bar", "region", Some("sales"), None, Aggregation::Sum);
        assert_eq!(spec.title, "Bar — region vs sales");
    }

    #[test]
    fn aggregation_names() {
        assert_eq!("avg".parse::<Aggregation>().unwrap(), Aggregation::Mean);
        assert!("median".parse::<Aggregation>().is_err());
        let aggs: Vec<Aggregation> = serde_json::from_str(r#"["sum","mean","count","min","max"]"#).unwrap();
        assert_eq!(aggs.len(), 5);
    }
}
