//! Category alignment and table assembly.
//!
//! Series in a chart each carry their own category list, and those lists
//! need not agree. [`ChartTable`] reconciles them: rows follow the order in
//! which categories first appear across all series, columns follow series
//! order, and a category a series never mentions is reported as missing.

use crate::charts::series::{ChartSeries, PointValue};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Sentinel written for a category a series has no value for.
pub const MISSING_VALUE: &str = "N/A";

/// Label of the first header cell.
pub const CATEGORY_HEADER: &str = "Category";

/// Collect category labels across all series, de-duplicated in first-seen order.
///
/// Series are scanned in order, then points within each series.
pub fn collect_categories(series: &[ChartSeries]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut ordered = Vec::new();
    for category in series.iter().flat_map(|s| s.categories.iter()) {
        if seen.insert(category.as_str()) {
            ordered.push(category.clone());
        }
    }
    ordered
}

/// A dense category-by-series table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartTable {
    categories: Vec<String>,
    /// Column order; may contain repeated names
    series_names: Vec<String>,
    /// Lookup keyed by series name
    series_values: HashMap<String, HashMap<String, PointValue>>,
}

impl ChartTable {
    /// Align extracted series into a table.
    ///
    /// Categories and values of a series are paired by position; whatever is
    /// left over on the longer list is ignored. Within a series the last value
    /// for a repeated category wins. Unnamed series are called `Series_<n>`
    /// after their 1-based position.
    pub fn from_series(series: &[ChartSeries]) -> Self {
        let categories = collect_categories(series);
        let mut series_names = Vec::with_capacity(series.len());
        let mut series_values = HashMap::with_capacity(series.len());

        for (index, s) in series.iter().enumerate() {
            let name = s.display_name(index + 1);
            if s.unpaired_len() > 0 {
                warn!(
                    series = %name,
                    categories = s.categories.len(),
                    values = s.values.len(),
                    "category and value counts differ, extra points dropped"
                );
            }

            let mapping: HashMap<String, PointValue> = s
                .points()
                .map(|(category, value)| (category.to_string(), value.clone()))
                .collect();
            series_values.insert(name.clone(), mapping);
            series_names.push(name);
        }

        debug!(
            categories = categories.len(),
            series = series_names.len(),
            "aligned chart table"
        );

        Self {
            categories,
            series_names,
            series_values,
        }
    }

    /// Row labels in output order.
    #[inline]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Column names in output order.
    #[inline]
    pub fn series_names(&self) -> &[String] {
        &self.series_names
    }

    /// Number of data rows.
    #[inline]
    pub fn row_count(&self) -> usize {
        self.categories.len()
    }

    /// Number of series columns.
    #[inline]
    pub fn series_count(&self) -> usize {
        self.series_names.len()
    }

    /// Value recorded for `category` in the series called `series`.
    pub fn value(&self, series: &str, category: &str) -> Option<&PointValue> {
        self.series_values.get(series)?.get(category)
    }

    /// Header cells: `label` (usually [`CATEGORY_HEADER`]) followed by series names.
    pub fn header<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a str> {
        std::iter::once(label).chain(self.series_names.iter().map(String::as_str))
    }

    /// Data rows in category order.
    pub fn rows(&self) -> impl Iterator<Item = TableRow<'_>> {
        self.categories.iter().map(move |category| TableRow {
            category,
            values: self
                .series_names
                .iter()
                .map(|name| self.value(name, category))
                .collect(),
        })
    }
}

/// One category row with a slot per series.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow<'a> {
    pub category: &'a str,
    /// `None` where the series has no value for this category
    pub values: Vec<Option<&'a PointValue>>,
}

impl TableRow<'_> {
    /// Render the row as text cells, using `missing` for absent values.
    pub fn cells(&self, missing: &str) -> Vec<String> {
        let mut cells = Vec::with_capacity(self.values.len() + 1);
        cells.push(self.category.to_string());
        cells.extend(self.values.iter().map(|value| match value {
            Some(v) => v.to_string(),
            None => missing.to_string(),
        }));
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn numbers(values: &[f64]) -> Vec<PointValue> {
        values.iter().copied().map(PointValue::Number).collect()
    }

    fn quarterly() -> Vec<ChartSeries> {
        vec![
            ChartSeries::new()
                .with_name("A")
                .with_categories(["Q1", "Q2"])
                .with_values(numbers(&[10.0, 20.0])),
            ChartSeries::new()
                .with_name("B")
                .with_categories(["Q2", "Q3"])
                .with_values(numbers(&[30.0, 40.0])),
        ]
    }

    #[test]
    fn test_two_series_alignment() {
        let table = ChartTable::from_series(&quarterly());

        assert_eq!(table.categories(), ["Q1", "Q2", "Q3"]);
        assert_eq!(table.header(CATEGORY_HEADER).collect::<Vec<_>>(), ["Category", "A", "B"]);

        let rows: Vec<Vec<String>> = table.rows().map(|r| r.cells(MISSING_VALUE)).collect();
        assert_eq!(
            rows,
            vec![
                vec!["Q1", "10", "N/A"],
                vec!["Q2", "20", "30"],
                vec!["Q3", "N/A", "40"],
            ]
        );
    }

    #[test]
    fn test_category_seen_in_later_series() {
        let series = vec![
            ChartSeries::new().with_categories(["b", "a"]),
            ChartSeries::new().with_categories(["c", "a", "b", "d"]),
        ];
        assert_eq!(collect_categories(&series), ["b", "a", "c", "d"]);
    }

    #[test]
    fn test_synthetic_names_follow_position() {
        let series = vec![
            ChartSeries::new(),
            ChartSeries::new().with_name("Named"),
            ChartSeries::new(),
        ];
        let table = ChartTable::from_series(&series);
        assert_eq!(table.series_names(), ["Series_1", "Named", "Series_3"]);
    }

    #[test]
    fn test_repeated_category_last_value_wins() {
        let series = vec![
            ChartSeries::new()
                .with_name("S")
                .with_categories(["Q1", "Q1"])
                .with_values(numbers(&[1.0, 2.0])),
        ];
        let table = ChartTable::from_series(&series);
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.value("S", "Q1"), Some(&PointValue::Number(2.0)));
    }

    #[test]
    fn test_positional_truncation() {
        let series = vec![
            ChartSeries::new()
                .with_name("S")
                .with_categories(["Q1", "Q2", "Q3"])
                .with_values(numbers(&[1.0])),
        ];
        let table = ChartTable::from_series(&series);

        // Q2 and Q3 still get rows, just without values
        assert_eq!(table.categories(), ["Q1", "Q2", "Q3"]);
        assert_eq!(table.value("S", "Q2"), None);
        let last = table.rows().last().unwrap();
        assert_eq!(last.cells("-"), ["Q3", "-"]);
    }

    #[test]
    fn test_duplicate_series_names_share_lookup() {
        let series = vec![
            ChartSeries::new()
                .with_name("Dup")
                .with_categories(["Q1"])
                .with_values(numbers(&[1.0])),
            ChartSeries::new()
                .with_name("Dup")
                .with_categories(["Q1"])
                .with_values(numbers(&[2.0])),
        ];
        let table = ChartTable::from_series(&series);
        assert_eq!(table.series_count(), 2);

        let row = table.rows().next().unwrap();
        assert_eq!(row.cells(MISSING_VALUE), ["Q1", "2", "2"]);
    }

    #[test]
    fn test_text_values_pass_through() {
        let series = vec![
            ChartSeries::new()
                .with_name("S")
                .with_categories(["Q1"])
                .with_values(vec![PointValue::Text("abc".to_string())]),
        ];
        let table = ChartTable::from_series(&series);
        let row = table.rows().next().unwrap();
        assert_eq!(row.cells(MISSING_VALUE), ["Q1", "abc"]);
    }

    #[test]
    fn test_empty_input() {
        let table = ChartTable::from_series(&[]);
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.header(CATEGORY_HEADER).collect::<Vec<_>>(), ["Category"]);
    }

    fn series_strategy() -> impl Strategy<Value = ChartSeries> {
        (
            prop::option::of("[A-Z][a-z]{0,5}"),
            prop::collection::vec("[A-D][0-9]?", 0..6),
            prop::collection::vec(-1000.0f64..1000.0, 0..6),
        )
            .prop_map(|(name, categories, values)| ChartSeries {
                name,
                categories,
                values: numbers(&values),
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_rows_are_complete(series in prop::collection::vec(series_strategy(), 0..5)) {
            let table = ChartTable::from_series(&series);
            prop_assert_eq!(table.header(CATEGORY_HEADER).count(), series.len() + 1);
            for row in table.rows() {
                prop_assert_eq!(row.cells(MISSING_VALUE).len(), series.len() + 1);
            }
        }

        #[test]
        fn prop_categories_first_seen_and_unique(series in prop::collection::vec(series_strategy(), 0..5)) {
            let table = ChartTable::from_series(&series);
            let flat: Vec<&String> = series.iter().flat_map(|s| s.categories.iter()).collect();

            let unique: HashSet<&String> = table.categories().iter().collect();
            prop_assert_eq!(unique.len(), table.row_count());
            for category in &flat {
                prop_assert!(table.categories().contains(*category));
            }

            // Each category's row position follows its first appearance
            let first_seen: Vec<usize> = table
                .categories()
                .iter()
                .filter_map(|c| flat.iter().position(|f| *f == c))
                .collect();
            prop_assert!(first_seen.windows(2).all(|w| w[0] < w[1]));

            // Re-running gives the same order
            let rerun = ChartTable::from_series(&series);
            prop_assert_eq!(rerun.categories(), table.categories());
        }
    }
}
