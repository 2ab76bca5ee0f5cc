//! Chart data extraction for Office Open XML chart parts.
//!
//! Reading a chart into a table is split in three steps:
//!
//! - [`reader`] streams the XML and collects each `c:ser` element into a
//!   [`ChartSeries`] (name, category labels, values)
//! - [`table::collect_categories`] gathers the category labels of all
//!   series in first-seen order
//! - [`ChartTable::from_series`] pairs each series' labels with its values
//!   and lays them out by category
//!
//! # Example
//!
//! ```rust
//! use chartcsv::charts::{ChartTable, ExtractOptions, read_series};
//!
//! let xml = r#"<c:chartSpace xmlns:c="http://schemas.openxmlformats.org/drawingml/2006/chart">
//!   <c:ser>
//!     <c:cat><c:strRef><c:strCache><c:pt idx="0"><c:v>Q1</c:v></c:pt></c:strCache></c:strRef></c:cat>
//!     <c:val><c:numRef><c:numCache><c:pt idx="0"><c:v>42.5</c:v></c:pt></c:numCache></c:numRef></c:val>
//!   </c:ser>
//! </c:chartSpace>"#;
//!
//! let series = read_series(xml.as_bytes(), &ExtractOptions::default())?;
//! let table = ChartTable::from_series(&series);
//! assert_eq!(table.series_names(), ["Series_1"]);
//! assert_eq!(table.categories(), ["Q1"]);
//! # Ok::<(), chartcsv::Error>(())
//! ```

pub mod reader;
pub mod series;
pub mod table;

pub use reader::{CHART_NS, ExtractOptions, read_series, read_series_from_path};
pub use series::{ChartSeries, PointValue};
pub use table::{ChartTable, TableRow, collect_categories};
