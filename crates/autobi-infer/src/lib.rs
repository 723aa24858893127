#![forbid(unsafe_code)]
//! autobi-infer: classify each column as a dimension or a measure.
//!
//! Inference is a pure function of a table's current contents. A new table
//! needs a new `Schema`; nothing is cached between calls.

pub mod infer;
pub mod schema;

pub use infer::{classify_role, distinct_count, infer_schema, SchemaInferer};
pub use schema::{FieldMap, FieldSchema, Role, Schema};
