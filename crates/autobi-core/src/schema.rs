//! Declared element types. Pure data; no parsing here.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    Boolean,
    Int64,
    Float64,
    Datetime,
    Utf8,
}

impl DataType {
    /// The dtype tag written into `FieldSchema.dtype` and the export format.
    pub fn dtype_tag(self) -> &'static str {
        match self {
            DataType::Boolean => "bool",
            DataType::Int64 => "int64",
            DataType::Float64 => "float64",
            DataType::Datetime => "datetime64[ns]",
            DataType::Utf8 => "object",
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, DataType::Int64 | DataType::Float64)
    }
}

/// True when a dtype tag names a datetime type, whatever produced it.
pub fn is_datetime_tag(tag: &str) -> bool {
    tag.contains("datetime")
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dtype_tag())
    }
}
