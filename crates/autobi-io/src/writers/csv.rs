//! CSV writer for cleaned tables.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use autobi_core::types::{Scalar, Table};

use crate::error::Result;

pub struct CsvWriter<W: Write> {
    inner: csv::Writer<W>,
}

impl CsvWriter<File> {
    pub fn to_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        Ok(Self::to_writer(File::create(path)?))
    }
}

impl<W: Write> CsvWriter<W> {
    pub fn to_writer(writer: W) -> Self {
        Self {
            inner: csv::Writer::from_writer(writer),
        }
    }

    /// Header row, then one record per row. Missing values are empty fields.
    pub fn write_table(&mut self, table: &Table) -> Result<()> {
        self.inner.write_record(table.column_names())?;
        for r in 0..table.num_rows() {
            self.inner
                .write_record(table.columns.iter().map(|c| field(&c.values[r])))?;
        }
        self.inner.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> Result<W> {
        self.inner
            .into_inner()
            .map_err(|e| crate::error::Error::Io(e.into_error()))
    }
}

fn field(v: &Scalar) -> String {
    match v {
        // keep a decimal point so the column reads back as float
        Scalar::F64(x) => format!("{x:?}"),
        other => other.to_string(),
    }
}
