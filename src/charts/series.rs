//! Chart series and point value models.
//!
//! A [`ChartSeries`] holds exactly what the reader found under one `c:ser`
//! element: an optional name plus the category labels and values in
//! document order. Pairing labels with values happens later, when the
//! table is aligned.

use std::fmt;

/// Prefix of the name given to series without a cached name.
pub const SYNTHETIC_NAME_PREFIX: &str = "Series_";

/// Integral values below this magnitude are written without a fraction.
const INTEGRAL_LIMIT: f64 = 1e16;

/// A single value point.
#[derive(Debug, Clone, PartialEq)]
pub enum PointValue {
    /// Text that parsed as a double
    Number(f64),
    /// Text kept verbatim because it is not a number
    Text(String),
}

impl PointValue {
    /// Parse trimmed point text, keeping it verbatim when it is not numeric.
    pub fn parse(text: &str) -> Self {
        match fast_float2::parse::<f64, _>(text) {
            Ok(number) => PointValue::Number(number),
            Err(_) => PointValue::Text(text.to_string()),
        }
    }
}

impl fmt::Display for PointValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointValue::Number(n) => write_number(f, *n),
            PointValue::Text(s) => f.write_str(s),
        }
    }
}

/// `-0` keeps its sign; non-finite values print as `nan`, `inf` and `-inf`.
fn write_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.is_nan() {
        f.write_str("nan")
    } else if n == 0.0 && n.is_sign_negative() {
        f.write_str("-0")
    } else if n.fract() == 0.0 && n.abs() < INTEGRAL_LIMIT {
        write!(f, "{}", n as i64)
    } else {
        let mut buffer = ryu::Buffer::new();
        f.write_str(buffer.format(n))
    }
}

/// One series as extracted from the chart XML.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSeries {
    /// Trimmed cached name, `None` when absent or empty
    pub name: Option<String>,
    /// Category labels in document order
    pub categories: Vec<String>,
    /// Values in document order
    pub values: Vec<PointValue>,
}

impl ChartSeries {
    /// Create an empty, unnamed series.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the series name.
    #[inline]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the category labels.
    #[inline]
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    /// Set the values.
    #[inline]
    pub fn with_values(mut self, values: Vec<PointValue>) -> Self {
        self.values = values;
        self
    }

    /// Display name for the series at 1-based position `ordinal`.
    pub fn display_name(&self, ordinal: usize) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("{SYNTHETIC_NAME_PREFIX}{ordinal}"),
        }
    }

    /// Category/value pairs matched by position.
    ///
    /// Stops at the end of the shorter list.
    pub fn points(&self) -> impl Iterator<Item = (&str, &PointValue)> {
        self.categories
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    /// Number of entries dropped by positional pairing.
    #[inline]
    pub fn unpaired_len(&self) -> usize {
        self.categories.len().abs_diff(self.values.len())
    }
}
