//! Analysis configuration that downstream crates can serialize/deserialize.
//!
//! Only knobs that change pipeline output live here. Presentation state
//! (palettes, light/dark mode) belongs to whatever renders the plots.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Date/time layouts tried, in order, when coercing text to datetimes.
pub const DEFAULT_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y",
    "%m/%d/%Y %H:%M:%S",
    "%d.%m.%Y",
];

/// What imputation does with a numeric column that has no present value, so
/// no median exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AllMissingPolicy {
    /// Keep every entry missing.
    #[default]
    Leave,
    /// Fill every entry with zero.
    Zero,
}

impl std::str::FromStr for AllMissingPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "leave" => Ok(Self::Leave),
            "zero" => Ok(Self::Zero),
            other => Err(Error::Config(format!(
                "unknown all-missing policy '{other}' (expected 'leave' or 'zero')"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// A numeric column is a measure iff its distinct count exceeds this.
    pub measure_distinct_threshold: usize,

    /// Text written into missing entries of text columns.
    pub missing_text_placeholder: String,

    /// Fallback for numeric columns with no median.
    pub all_missing_numeric: AllMissingPolicy,

    /// chrono format strings tried when coercing text to datetimes.
    /// RFC 3339 timestamps are always accepted in addition to these.
    pub datetime_formats: Vec<String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            measure_distinct_threshold: 15,
            missing_text_placeholder: "Missing".to_string(),
            all_missing_numeric: AllMissingPolicy::Leave,
            datetime_formats: DEFAULT_DATETIME_FORMATS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Partial configuration as read from a YAML file; unset fields keep the
/// value they already had.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub measure_distinct_threshold: Option<usize>,
    pub missing_text_placeholder: Option<String>,
    pub all_missing_numeric: Option<AllMissingPolicy>,
    pub datetime_formats: Option<Vec<String>>,
}

impl AnalysisConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `AUTOBI_MEASURE_DISTINCT_THRESHOLD`: distinct count above which a numeric column is a measure
    /// - `AUTOBI_MISSING_PLACEHOLDER`: text used to fill missing text entries
    /// - `AUTOBI_ALL_MISSING_NUMERIC`: `leave` or `zero`
    /// - `AUTOBI_DATETIME_FORMATS`: comma-separated chrono formats
    ///
    /// Unparseable values are ignored.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(s) = std::env::var("AUTOBI_MEASURE_DISTINCT_THRESHOLD") {
            if let Ok(v) = s.trim().parse::<usize>() {
                cfg.measure_distinct_threshold = v;
            }
        }

        if let Ok(s) = std::env::var("AUTOBI_MISSING_PLACEHOLDER") {
            cfg.missing_text_placeholder = s;
        }

        if let Ok(s) = std::env::var("AUTOBI_ALL_MISSING_NUMERIC") {
            if let Ok(v) = s.parse::<AllMissingPolicy>() {
                cfg.all_missing_numeric = v;
            }
        }

        if let Ok(s) = std::env::var("AUTOBI_DATETIME_FORMATS") {
            let formats: Vec<String> = s
                .split(',')
                .map(|f| f.trim().to_string())
                .filter(|f| !f.is_empty())
                .collect();
            if !formats.is_empty() {
                cfg.datetime_formats = formats;
            }
        }

        cfg
    }

    /// Overlay the fields a config file sets.
    pub fn apply_file(&mut self, file: &ConfigFile) {
        if let Some(v) = file.measure_distinct_threshold {
            self.measure_distinct_threshold = v;
        }
        if let Some(v) = &file.missing_text_placeholder {
            self.missing_text_placeholder = v.clone();
        }
        if let Some(v) = file.all_missing_numeric {
            self.all_missing_numeric = v;
        }
        if let Some(v) = &file.datetime_formats {
            self.datetime_formats = v.clone();
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.datetime_formats.iter().any(|f| f.trim().is_empty()) {
            return Err(Error::Config("empty datetime format".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_thresholds() {
        let cfg = AnalysisConfig::default();
        assert_eq!(cfg.measure_distinct_threshold, 15);
        assert_eq!(cfg.missing_text_placeholder, "Missing");
        assert_eq!(cfg.all_missing_numeric, AllMissingPolicy::Leave);
        assert!(cfg.datetime_formats.iter().any(|f| f == "%Y-%m-%d"));
    }

    #[test]
    fn file_overlay_only_touches_set_fields() {
        let mut cfg = AnalysisConfig::default();
        let file = ConfigFile {
            measure_distinct_threshold: Some(3),
            all_missing_numeric: Some(AllMissingPolicy::Zero),
            ..Default::default()
        };
        cfg.apply_file(&file);
        assert_eq!(cfg.measure_distinct_threshold, 3);
        assert_eq!(cfg.all_missing_numeric, AllMissingPolicy::Zero);
        assert_eq!(cfg.missing_text_placeholder, "Missing");
    }

    #[test]
    fn policy_parses_case_insensitively() {
        assert_eq!("ZERO".parse::<AllMissingPolicy>().unwrap(), AllMissingPolicy::Zero);
        assert!("median".parse::<AllMissingPolicy>().is_err());
    }

    #[test]
    fn config_roundtrips_through_json() {
        let cfg = AnalysisConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let back: AnalysisConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }
}
