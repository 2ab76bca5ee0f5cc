//! Types and utilities shared by the chart reader and the CSV exporter.

pub mod bom;
pub mod error;

pub use bom::{BomKind, skip_utf8_bom, write_bom};
pub use error::{Error, Result};
