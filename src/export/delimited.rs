//! Delimited text (CSV) export of chart tables.

use crate::charts::table::{CATEGORY_HEADER, ChartTable, MISSING_VALUE};
use crate::common::{BomKind, Result, write_bom};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Settings for delimited table output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvOptions {
    /// Field separator byte
    pub delimiter: u8,
    /// BOM written before the first record, if any
    pub write_bom: Option<BomKind>,
    /// Text written where a series has no value for a category
    pub missing: String,
    /// First header cell
    pub header_label: String,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            write_bom: Some(BomKind::Utf8),
            missing: MISSING_VALUE.to_string(),
            header_label: CATEGORY_HEADER.to_string(),
        }
    }
}

impl CsvOptions {
    /// Comma-separated output with a UTF-8 BOM.
    pub fn csv() -> Self {
        Self::default()
    }

    /// Tab-separated output, otherwise as [`CsvOptions::csv`].
    pub fn tsv() -> Self {
        Self {
            delimiter: b'\t',
            ..Self::default()
        }
    }

    /// Set the field separator.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the BOM to write, or `None` for no BOM.
    pub fn with_write_bom(mut self, bom: Option<BomKind>) -> Self {
        self.write_bom = bom;
        self
    }

    /// Set the text written for missing values.
    pub fn with_missing(mut self, missing: impl Into<String>) -> Self {
        self.missing = missing.into();
        self
    }

    /// Set the first header cell.
    pub fn with_header_label(mut self, label: impl Into<String>) -> Self {
        self.header_label = label.into();
        self
    }
}

/// Write `table` as delimited text: a header row, then one row per category.
///
/// Fields are quoted only when they contain the delimiter, a quote or a line
/// break. Records end with CRLF.
pub fn write_table<W: Write>(table: &ChartTable, mut writer: W, options: &CsvOptions) -> Result<()> {
    if let Some(bom) = options.write_bom {
        write_bom(&mut writer, bom)?;
    }

    let mut csv_writer = ::csv::WriterBuilder::new()
        .delimiter(options.delimiter)
        .terminator(::csv::Terminator::CRLF)
        .quote_style(::csv::QuoteStyle::Necessary)
        .from_writer(writer);

    csv_writer.write_record(table.header(&options.header_label))?;

    for row in table.rows() {
        csv_writer.write_record(row.cells(&options.missing))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Create or truncate the file at `path` and write `table` into it.
pub fn write_table_to_path<P: AsRef<Path>>(
    table: &ChartTable,
    path: P,
    options: &CsvOptions,
) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_table(table, BufWriter::new(file), options)?;
    debug!(path = %path.display(), rows = table.row_count(), "wrote csv");
    Ok(())
}
