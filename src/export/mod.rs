//! Table export formats.

pub mod delimited;

pub use delimited::{CsvOptions, write_table, write_table_to_path};
