//! Chart XML to CSV conversion.
//!
//! [`convert`] runs the whole pipeline and returns the aligned table;
//! [`export_chart_csv`] wraps it for callers that only need a status.

use crate::charts::{ChartTable, ExtractOptions, read_series_from_path};
use crate::common::Result;
use crate::export::{CsvOptions, write_table_to_path};
use std::path::Path;
use tracing::{error, info};

/// Input used when no path is given.
pub const DEFAULT_INPUT: &str = "test.xml";
/// Output used when no path is given.
pub const DEFAULT_OUTPUT: &str = "test.csv";

/// Options for a complete conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    pub extract: ExtractOptions,
    pub csv: CsvOptions,
}

/// Read the chart at `input`, align its series and write the CSV to `output`.
///
/// The input is parsed completely before `output` is opened, so a parse
/// failure never touches the output file.
pub fn convert<I, O>(input: I, output: O, options: &ConvertOptions) -> Result<ChartTable>
where
    I: AsRef<Path>,
    O: AsRef<Path>,
{
    let series = read_series_from_path(input.as_ref(), &options.extract)?;
    let table = ChartTable::from_series(&series);
    write_table_to_path(&table, output.as_ref(), &options.csv)?;
    Ok(table)
}

/// Convert with default options, reporting the outcome instead of returning it.
pub fn export_chart_csv<I, O>(input: I, output: O) -> bool
where
    I: AsRef<Path>,
    O: AsRef<Path>,
{
    export_chart_csv_with(input, output, &ConvertOptions::default())
}

/// Convert `input` to `output` and print a one-line status.
///
/// Returns `true` on success. Errors are printed to stderr, never returned.
pub fn export_chart_csv_with<I, O>(input: I, output: O, options: &ConvertOptions) -> bool
where
    I: AsRef<Path>,
    O: AsRef<Path>,
{
    let (input, output) = (input.as_ref(), output.as_ref());
    match convert(input, output, options) {
        Ok(table) => {
            info!(
                input = %input.display(),
                output = %output.display(),
                rows = table.row_count(),
                series = table.series_count(),
                "chart exported"
            );
            println!("CSV written: {}", output.display());
            true
        },
        Err(e) => {
            error!(input = %input.display(), error = %e, "chart export failed");
            eprintln!("Conversion failed: {e}");
            false
        },
    }
}
