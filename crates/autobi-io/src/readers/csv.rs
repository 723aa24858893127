//! CSV reader with per-column type sniffing.
//!
//! Sniffing is deliberately light: empty fields are missing, a column is
//! `Int64` if every present value parses as an integer, `Float64` if every
//! present value is a finite number, `Boolean` if every present value is
//! `true`/`false` in any case, and raw untrimmed `Utf8` otherwise. Dates are
//! left as text for the cleaner.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use autobi_core::schema::DataType;
use autobi_core::types::{Column, Scalar, Table};

use crate::error::{Error, Result};

pub struct CsvReader<R: Read> {
    inner: csv::Reader<R>,
}

impl CsvReader<File> {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let f = File::open(path)?;
        Ok(Self::from_reader(f))
    }
}

impl<R: Read> CsvReader<R> {
    pub fn from_reader(reader: R) -> Self {
        let inner = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::None)
            .from_reader(reader);
        Self { inner }
    }

    /// Read every record and sniff column types.
    pub fn read_table(&mut self) -> Result<Table> {
        let headers: Vec<String> = self.inner.headers()?.iter().map(str::to_string).collect();
        let mut raw: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];

        for record in self.inner.records() {
            let record = record?;
            for (ci, field) in record.iter().enumerate() {
                if let Some(col) = raw.get_mut(ci) {
                    col.push((!field.is_empty()).then(|| field.to_string()));
                }
            }
        }

        let columns = headers
            .into_iter()
            .zip(raw)
            .map(|(name, values)| sniff_column(name, values))
            .collect();
        let table = Table::new(columns)?;
        tracing::debug!(
            rows = table.num_rows(),
            columns = table.num_columns(),
            "read csv"
        );
        Ok(table)
    }
}

/// Read a table from `path`, rejecting formats other than CSV.
pub fn read_table(path: impl AsRef<Path>) -> Result<Table> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "xlsx" | "xls" | "parquet" | "pq" => Err(Error::Format(format!(
            "{}: only CSV input is supported",
            path.display()
        ))),
        _ => CsvReader::from_path(path)?.read_table(),
    }
}

fn sniff_column(name: String, values: Vec<Option<String>>) -> Column {
    let present = || values.iter().flatten();

    if present().next().is_none() {
        // nothing to sniff from; numeric like a dataframe reader would give
        return Column::new(name, DataType::Float64, vec![Scalar::Null; values.len()]);
    }

    if present().all(|s| s.parse::<i64>().is_ok()) {
        return Column::new(
            name,
            DataType::Int64,
            map_present(&values, |s| s.parse().ok().map(Scalar::I64)),
        );
    }

    if present().all(|s| s.parse::<f64>().is_ok_and(f64::is_finite)) {
        return Column::new(
            name,
            DataType::Float64,
            map_present(&values, |s| s.parse().ok().map(Scalar::F64)),
        );
    }

    if present().all(|s| s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("false")) {
        return Column::new(
            name,
            DataType::Boolean,
            map_present(&values, |s| Some(Scalar::Bool(s.eq_ignore_ascii_case("true")))),
        );
    }

    Column::utf8(name, values)
}

fn map_present(values: &[Option<String>], f: impl Fn(&str) -> Option<Scalar>) -> Vec<Scalar> {
    values
        .iter()
        .map(|v| v.as_deref().and_then(&f).unwrap_or(Scalar::Null))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(text: &str) -> Table {
        CsvReader::from_reader(text.as_bytes()).read_table().unwrap()
    }

    #[test]
    fn sniffs_each_column() {
        let t = read("n,x,flag,s\n1,1.5,true,a\n2,,FALSE, b \n,3,True,\n");
        let types: Vec<DataType> = t.columns.iter().map(|c| c.data_type).collect();
        assert_eq!(
            types,
            vec![DataType::Int64, DataType::Float64, DataType::Boolean, DataType::Utf8]
        );
        assert_eq!(t.columns[0].values[2], Scalar::Null);
        assert_eq!(t.columns[1].values[2], Scalar::F64(3.0));
        assert_eq!(t.columns[2].values[1], Scalar::Bool(false));
        assert_eq!(t.columns[3].values[1], Scalar::Str(" b ".into()));
        assert_eq!(t.columns[3].values[2], Scalar::Null);
    }

    #[test]
    fn padded_numbers_stay_text() {
        let t = read("n\n 5 \n6\n 7\n");
        assert_eq!(t.columns[0].data_type, DataType::Utf8);
    }

    #[test]
    fn dates_are_not_sniffed() {
        let t = read("d\n2024-01-01\n2024-01-02\n");
        assert_eq!(t.columns[0].data_type, DataType::Utf8);
    }

    #[test]
    fn all_empty_column_is_float_missing() {
        let t = read("a,b\n1,\n2,\n");
        assert_eq!(t.columns[1].data_type, DataType::Float64);
        assert_eq!(t.columns[1].null_count(), 2);
    }

    #[test]
    fn duplicate_headers_are_rejected() {
        let err = CsvReader::from_reader("a,a\n1,2\n".as_bytes())
            .read_table()
            .unwrap_err();
        assert!(matches!(err, Error::Core(_)));
    }

    #[test]
    fn excel_and_parquet_are_rejected() {
        assert!(matches!(read_table("sales.xlsx"), Err(Error::Format(_))));
        assert!(matches!(read_table("sales.parquet"), Err(Error::Format(_))));
    }
}
