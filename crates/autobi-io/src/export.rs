//! Export of `{schema, recommendations}` and loading chart specs back.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use autobi_charts::spec::ChartSpec;
use autobi_infer::schema::Schema;

use crate::error::Result;

/// What `chart_specs.json` holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub schema: Schema,
    pub recommendations: Vec<ChartSpec>,
}

impl ExportDocument {
    pub fn new(schema: Schema, recommendations: Vec<ChartSpec>) -> Self {
        Self {
            schema,
            recommendations,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub fn write_export(path: impl AsRef<Path>, doc: &ExportDocument) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, doc.to_json_pretty()?)?;
    tracing::debug!(path = %path.display(), charts = doc.recommendations.len(), "wrote export");
    Ok(())
}

pub fn read_export(path: impl AsRef<Path>) -> Result<ExportDocument> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SpecFile {
    Document(ExportDocument),
    Many(Vec<ChartSpec>),
    One(ChartSpec),
}

impl From<SpecFile> for Vec<ChartSpec> {
    fn from(file: SpecFile) -> Self {
        match file {
            SpecFile::Document(doc) => doc.recommendations,
            SpecFile::Many(specs) => specs,
            SpecFile::One(spec) => vec![spec],
        }
    }
}

/// Load chart specs from a JSON or YAML file (chosen by extension) holding a
/// single spec, a list of specs, or an export document.
pub fn load_chart_specs(path: impl AsRef<Path>) -> Result<Vec<ChartSpec>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let yaml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));
    if yaml {
        parse_chart_specs_yaml(&text)
    } else {
        parse_chart_specs_json(&text)
    }
}

pub fn parse_chart_specs_json(text: &str) -> Result<Vec<ChartSpec>> {
    let file: SpecFile = serde_json::from_str(text)?;
    Ok(file.into())
}

pub fn parse_chart_specs_yaml(text: &str) -> Result<Vec<ChartSpec>> {
    let file: SpecFile = serde_yaml::from_str(text)?;
    Ok(file.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use autobi_charts::spec::{Aggregation, ChartType};
    use autobi_infer::schema::{FieldMap, FieldSchema, Role};

    fn doc() -> ExportDocument {
        let mut fields = FieldMap::new();
        fields.insert(
            "sales",
            FieldSchema {
                role: Role::Measure,
                dtype: "float64".into(),
                distinct: 40,
            },
        );
        ExportDocument::new(
            Schema {
                row_count: 40,
                fields,
            },
            vec![ChartSpec::new(ChartType::Histogram, "sales")
                .titled("Distribution of sales")
                .because("Univariate measure → histogram")],
        )
    }

    #[test]
    fn export_json_shape() {
        let v: serde_json::Value = serde_json::from_str(&doc().to_json_pretty().unwrap()).unwrap();
        assert_eq!(v["schema"]["row_count"], 40);
        assert_eq!(v["schema"]["fields"]["sales"]["role"], "measure");
        assert_eq!(v["recommendations"][0]["type"], "histogram");
        assert_eq!(v["recommendations"][0]["why"], "Univariate measure → histogram");
    }

    #[test]
    fn spec_files_in_every_shape() {
        let json = doc().to_json_pretty().unwrap();
        assert_eq!(parse_chart_specs_json(&json).unwrap(), doc().recommendations);

        let one = parse_chart_specs_json(r#"{"type":"bar","x":"region","y":"sales"}"#).unwrap();
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].y.as_deref(), Some("sales"));

        let many = parse_chart_specs_yaml(
            "- type: line\n  x: date\n  y: sales\n  agg: mean\n- type: pie\n  x: region\n",
        )
        .unwrap();
        assert_eq!(many.len(), 2);
        assert_eq!(many[0].agg, Aggregation::Mean);
        assert_eq!(many[1].chart_type, ChartType::Other("pie".into()));
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(parse_chart_specs_json("[1, 2]").is_err());
        assert!(parse_chart_specs_yaml("just text").is_err());
    }
}
