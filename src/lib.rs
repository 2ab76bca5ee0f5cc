//! chartcsv - extract chart data from Office Open XML chart parts as CSV
//!
//! Office charts keep a cached copy of their source data inside the chart
//! XML: category labels and, for each series, one value per category. This
//! library reads that cache and lays it out as a table with one row per
//! category and one column per series.
//!
//! # Features
//!
//! - **Namespace-aware reader**: matches DrawingML chart elements by URI, so
//!   standalone chart parts and flat OPC packages both work
//! - **Category alignment**: rows follow first appearance across all series;
//!   a series without a value for a category gets `N/A`
//! - **Lenient values**: numbers are parsed, anything else is kept as text
//! - **Spreadsheet-friendly CSV**: UTF-8 with BOM, minimal quoting, CRLF
//!
//! # Example
//!
//! ```no_run
//! use chartcsv::{ConvertOptions, convert};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let table = convert("chart1.xml", "chart1.csv", &ConvertOptions::default())?;
//! println!("{} categories x {} series", table.row_count(), table.series_count());
//! # Ok(())
//! # }
//! ```

/// Chart XML reading and category/series alignment
pub mod charts;

/// Shared error type and byte-order mark helpers
pub mod common;

/// Chart XML to CSV pipeline
pub mod convert;

/// Table writers
pub mod export;

pub use charts::{ChartSeries, ChartTable, ExtractOptions, PointValue};
pub use common::{Error, Result};
pub use convert::{ConvertOptions, convert, export_chart_csv, export_chart_csv_with};
pub use export::CsvOptions;
