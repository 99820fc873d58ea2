//! Feature frame: named columns aligned to a date index.

use crate::data::PriceTable;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};

/// Column-oriented feature container, aligned to the price index it was
/// computed from. Insertion order of columns is preserved.
#[derive(Debug, Clone, Default)]
pub struct FeatureFrame {
    index: Vec<NaiveDate>,
    names: Vec<String>,
    columns: HashMap<String, Vec<f64>>,
}

impl FeatureFrame {
    pub fn new(index: Vec<NaiveDate>) -> Self {
        Self {
            index,
            names: Vec::new(),
            columns: HashMap::new(),
        }
    }

    /// The empty frame served before the first feature refresh.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Raw-price fallback: one column per symbol, values copied verbatim.
    pub fn from_prices(prices: &PriceTable) -> Self {
        let mut frame = Self::new(prices.index().to_vec());
        for symbol in prices.symbols() {
            if let Some(column) = prices.column(symbol) {
                frame.push_column(symbol.clone(), column.to_vec());
            }
        }
        frame
    }

    /// Append a column. The name must be fresh and the length must match.
    pub fn push_column(&mut self, name: String, values: Vec<f64>) {
        assert_eq!(
            values.len(),
            self.index.len(),
            "feature column {name:?} length mismatch"
        );
        if self.columns.insert(name.clone(), values).is_none() {
            self.names.push(name);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn index(&self) -> &[NaiveDate] {
        &self.index
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns.get(name).map(|v| v.as_slice())
    }

    /// Last value of a column, NaN entries excluded.
    pub fn last(&self, name: &str) -> Option<f64> {
        self.columns
            .get(name)?
            .iter()
            .rev()
            .copied()
            .find(|v| !v.is_nan())
    }

    /// Frame-level model confidence: last value of the `confidence` column.
    pub fn confidence(&self) -> Option<f64> {
        self.last("confidence")
    }

    /// Snapshot of the final row, used as a position's feature snapshot.
    pub fn last_row(&self) -> BTreeMap<String, f64> {
        self.names
            .iter()
            .filter_map(|name| {
                let values = &self.columns[name];
                values.last().map(|&v| (name.clone(), v))
            })
            .filter(|(_, v)| !v.is_nan())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dates(n: usize) -> Vec<NaiveDate> {
        let base = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        (0..n).map(|i| base + chrono::Duration::days(i as i64)).collect()
    }

    #[test]
    fn empty_frame() {
        let frame = FeatureFrame::empty();
        assert!(frame.is_empty());
        assert!(frame.confidence().is_none());
        assert!(frame.last_row().is_empty());
    }

    #[test]
    fn last_skips_nan_tail() {
        let mut frame = FeatureFrame::new(dates(3));
        frame.push_column("x".into(), vec![1.0, 2.0, f64::NAN]);
        assert_eq!(frame.last("x"), Some(2.0));
    }

    #[test]
    fn confidence_column() {
        let mut frame = FeatureFrame::new(dates(2));
        frame.push_column("confidence".into(), vec![0.4, 0.8]);
        assert_eq!(frame.confidence(), Some(0.8));
    }

    #[test]
    fn last_row_drops_nan_cells() {
        let mut frame = FeatureFrame::new(dates(2));
        frame.push_column("a".into(), vec![1.0, 5.0]);
        frame.push_column("b".into(), vec![1.0, f64::NAN]);
        let row = frame.last_row();
        assert_eq!(row.get("a"), Some(&5.0));
        assert!(!row.contains_key("b"));
    }
}
