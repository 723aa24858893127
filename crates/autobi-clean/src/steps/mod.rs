//! The five cleaning steps, in pipeline order.

pub mod coerce;
pub mod dedup;
pub mod impute;
pub mod trim;

pub use coerce::CoerceTypes;
pub use dedup::DropDuplicates;
pub use impute::{ImputeNumeric, ImputeText};
pub use trim::TrimText;
