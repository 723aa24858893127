//! Inferred schema types and their JSON shape.
//!
//! Serialized form:
//! ```json
//! { "row_count": 3,
//!   "fields": { "region": { "role": "dimension", "dtype": "object", "distinct": 2 } } }
//! ```
//! `fields` keeps the table's column order.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use autobi_core::schema::is_datetime_tag;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Categorical/grouping axis.
    Dimension,
    /// Aggregable continuous quantity.
    Measure,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    pub role: Role,
    pub dtype: String,
    /// Distinct present values; never exceeds the row count.
    pub distinct: usize,
}

impl FieldSchema {
    pub fn is_datetime(&self) -> bool {
        is_datetime_tag(&self.dtype)
    }
}

/// Column name → `FieldSchema`, in table column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    entries: Vec<(String, FieldSchema)>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace; a replaced entry keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, field: FieldSchema) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = field,
            None => self.entries.push((name, field)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldSchema> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, f)| f)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldSchema)> + '_ {
        self.entries.iter().map(|(n, f)| (n.as_str(), f))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for FieldMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, field) in &self.entries {
            map.serialize_entry(name, field)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FieldMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FieldMapVisitor;

        impl<'de> Visitor<'de> for FieldMapVisitor {
            type Value = FieldMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of column name to field schema")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<FieldMap, A::Error> {
                let mut fields = FieldMap::new();
                while let Some((name, field)) = access.next_entry::<String, FieldSchema>()? {
                    fields.insert(name, field);
                }
                Ok(fields)
            }
        }

        deserializer.deserialize_map(FieldMapVisitor)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub row_count: usize,
    pub fields: FieldMap,
}

impl Schema {
    /// Names of all fields with `role`, in column order.
    pub fn with_role(&self, role: Role) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|(_, f)| f.role == role)
            .map(|(n, _)| n)
            .collect()
    }

    pub fn dimensions(&self) -> Vec<&str> {
        self.with_role(Role::Dimension)
    }

    pub fn measures(&self) -> Vec<&str> {
        self.with_role(Role::Measure)
    }

    /// Axis choices offered when a user builds a chart by hand: dimensions
    /// first, then measures.
    pub fn axis_candidates(&self) -> Vec<&str> {
        let mut out = self.dimensions();
        out.extend(self.measures());
        out
    }
}
