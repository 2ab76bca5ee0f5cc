//! Command-line tool that converts an Office chart XML part to CSV.
//!
//! # Usage
//!
//! Convert `test.xml` to `test.csv` in the current directory:
//! ```sh
//! chartcsv
//! ```
//!
//! Convert a specific chart, writing tab-separated output:
//! ```sh
//! chartcsv word/charts/chart1.xml chart1.tsv --delimiter tab
//! ```
//!
//! Log verbosity follows `-v`/`-q`, or `RUST_LOG` when it is set.

use chartcsv::convert::{DEFAULT_INPUT, DEFAULT_OUTPUT};
use chartcsv::{ConvertOptions, CsvOptions, ExtractOptions, export_chart_csv_with};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt};

/// Extract chart categories and series values into a CSV table
#[derive(Parser, Debug)]
#[command(name = "chartcsv", version)]
struct Args {
    /// Chart XML file (a chart part or a flat OPC package)
    #[arg(value_name = "INPUT", default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// CSV file to create or overwrite
    #[arg(value_name = "OUTPUT", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Field delimiter: a single ASCII character, or `tab`
    #[arg(short, long, default_value = ",", value_parser = parse_delimiter)]
    delimiter: u8,

    /// Text written where a series has no value for a category
    #[arg(long, value_name = "TEXT", default_value = "N/A")]
    missing: String,

    /// Do not start the output with a UTF-8 byte-order mark
    #[arg(long)]
    no_bom: bool,

    /// Read x/y values of scatter series as categories/values
    #[arg(long)]
    scatter: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }

    fn options(&self) -> ConvertOptions {
        let mut csv = CsvOptions::default()
            .with_delimiter(self.delimiter)
            .with_missing(self.missing.clone());
        if self.no_bom {
            csv = csv.with_write_bom(None);
        }
        ConvertOptions {
            extract: ExtractOptions::default().with_scatter_axes(self.scatter),
            csv,
        }
    }
}

fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        _ => match value.as_bytes() {
            [b] if b.is_ascii() && !matches!(*b, b'"' | b'\r' | b'\n') => Ok(*b),
            _ => Err(format!(
                "delimiter must be one ASCII character other than a quote or line break, got {value:?}"
            )),
        },
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("chartcsv={}", args.log_level())));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if export_chart_csv_with(&args.input, &args.output, &args.options()) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["chartcsv"]);
        assert_eq!(args.input, PathBuf::from("test.xml"));
        assert_eq!(args.output, PathBuf::from("test.csv"));
        assert_eq!(args.log_level(), "warn");
        assert_eq!(args.options(), ConvertOptions::default());
    }

    #[test]
    fn test_flags_map_to_options() {
        let args = Args::parse_from([
            "chartcsv", "in.xml", "out.tsv", "-d", "tab", "--missing", "", "--no-bom",
            "--scatter", "-vv",
        ]);
        let options = args.options();
        assert_eq!(options.csv.delimiter, b'\t');
        assert_eq!(options.csv.missing, "");
        assert_eq!(options.csv.write_bom, None);
        assert!(options.extract.scatter_axes);
        assert_eq!(args.log_level(), "debug");
    }

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter(";"), Ok(b';'));
        assert_eq!(parse_delimiter("\\t"), Ok(b'\t'));
        assert!(parse_delimiter("\"").is_err());
        assert!(parse_delimiter(";;").is_err());
        assert!(parse_delimiter("é").is_err());
    }
}
