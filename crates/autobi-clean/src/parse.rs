//! All-or-nothing reinterpretation of text values as numbers or datetimes.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use autobi_core::schema::DataType;
use autobi_core::types::Scalar;

/// Parse every present value as a number.
///
/// Returns `Int64` when every value is an integer, `Float64` when every value
/// is a finite number, and `None` as soon as one value is neither. Missing
/// entries stay missing. A column with no present value is not converted.
pub fn parse_numeric(values: &[Scalar]) -> Option<(DataType, Vec<Scalar>)> {
    if values.iter().all(Scalar::is_null) {
        return None;
    }

    if let Some(ints) = values
        .iter()
        .map(|v| match v {
            Scalar::Null => Some(Scalar::Null),
            Scalar::I64(i) => Some(Scalar::I64(*i)),
            other => other
                .to_text()
                .and_then(|s| s.parse::<i64>().ok())
                .map(Scalar::I64),
        })
        .collect::<Option<Vec<_>>>()
    {
        return Some((DataType::Int64, ints));
    }

    values
        .iter()
        .map(|v| match v {
            Scalar::Null => Some(Scalar::Null),
            other => other
                .as_f64()
                .or_else(|| other.to_text().and_then(|s| parse_finite_f64(&s)))
                .filter(|f| f.is_finite())
                .map(Scalar::F64),
        })
        .collect::<Option<Vec<_>>>()
        .map(|floats| (DataType::Float64, floats))
}

/// Parse every present value as a datetime, trying `formats` in order.
/// Same all-or-nothing contract as [`parse_numeric`].
pub fn parse_datetimes(values: &[Scalar], formats: &[String]) -> Option<Vec<Scalar>> {
    if values.iter().all(Scalar::is_null) {
        return None;
    }

    values
        .iter()
        .map(|v| match v {
            Scalar::Null => Some(Scalar::Null),
            Scalar::DateTime(dt) => Some(Scalar::DateTime(*dt)),
            Scalar::Str(s) => parse_datetime(s, formats).map(Scalar::DateTime),
            _ => None,
        })
        .collect()
}

/// Parse one datetime. Date-only layouts land on midnight; RFC 3339 input is
/// normalized to UTC.
pub fn parse_datetime(s: &str, formats: &[String]) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    for fmt in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
        if let Some(dt) = NaiveDate::parse_from_str(s, fmt)
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
        {
            return Some(dt);
        }
    }
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.naive_utc())
}

fn parse_finite_f64(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|f| f.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use autobi_core::config::AnalysisConfig;

    fn strs(values: &[Option<&str>]) -> Vec<Scalar> {
        values
            .iter()
            .map(|v| v.map_or(Scalar::Null, |s| Scalar::Str(s.to_string())))
            .collect()
    }

    #[test]
    fn integers_stay_integers() {
        let (dt, vals) = parse_numeric(&strs(&[Some("5"), None, Some("-7")])).unwrap();
        assert_eq!(dt, DataType::Int64);
        assert_eq!(vals, vec![Scalar::I64(5), Scalar::Null, Scalar::I64(-7)]);
    }

    #[test]
    fn mixed_ints_and_floats_become_floats() {
        let (dt, vals) = parse_numeric(&strs(&[Some("1"), Some("2.5"), Some("1e3")])).unwrap();
        assert_eq!(dt, DataType::Float64);
        assert_eq!(vals, vec![Scalar::F64(1.0), Scalar::F64(2.5), Scalar::F64(1000.0)]);
    }

    #[test]
    fn one_bad_value_rejects_the_whole_column() {
        assert!(parse_numeric(&strs(&[Some("1"), Some("two"), Some("3")])).is_none());
        assert!(parse_numeric(&strs(&[Some("1"), Some("inf")])).is_none());
    }

    #[test]
    fn all_missing_is_not_converted() {
        assert!(parse_numeric(&strs(&[None, None])).is_none());
        assert!(parse_datetimes(&strs(&[None]), &AnalysisConfig::default().datetime_formats).is_none());
    }

    #[test]
    fn dates_and_datetimes_parse() {
        let formats = AnalysisConfig::default().datetime_formats;
        let d = parse_datetime("2024-03-01", &formats).unwrap();
        assert_eq!(d.to_string(), "2024-03-01 00:00:00");
        let dt = parse_datetime("2024-03-01T12:30:00", &formats).unwrap();
        assert_eq!(dt.to_string(), "2024-03-01 12:30:00");
        let us = parse_datetime("03/15/2024", &formats).unwrap();
        assert_eq!(us.to_string(), "2024-03-15 00:00:00");
        let rfc = parse_datetime("2024-03-01T12:30:00+02:00", &formats).unwrap();
        assert_eq!(rfc.to_string(), "2024-03-01 10:30:00");
        assert!(parse_datetime("north", &formats).is_none());
    }

    #[test]
    fn datetime_column_is_all_or_nothing() {
        let formats = AnalysisConfig::default().datetime_formats;
        assert!(parse_datetimes(&strs(&[Some("2024-01-01"), Some("soon")]), &formats).is_none());
        let ok = parse_datetimes(&strs(&[Some("2024-01-01"), None]), &formats).unwrap();
        assert!(matches!(ok[0], Scalar::DateTime(_)));
        assert_eq!(ok[1], Scalar::Null);
    }
}
