//! Edges of the system: CSV files in and out, and the read-only query surface.

pub mod csv;
pub mod query;
