//! Error types for chart extraction and CSV export.
use thiserror::Error;

/// Main error type for chartcsv operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error while reading the chart or writing the table
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Chart XML is not well-formed
    #[error("XML error: {0}")]
    Xml(String),

    /// Input starts with a byte-order mark for an encoding other than UTF-8
    #[error("Unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    /// CSV serialization error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Xml(err.to_string())
    }
}

/// Result type for chartcsv operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::Xml("unexpected end of document".to_string());
        assert_eq!(err.to_string(), "XML error: unexpected end of document");

        let err = Error::UnsupportedEncoding("UTF-16LE".to_string());
        assert_eq!(err.to_string(), "Unsupported encoding: UTF-16LE");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.xml");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().starts_with("IO error:"));
    }
}
