//! Readers that produce a whole `Table`.

pub mod csv;
