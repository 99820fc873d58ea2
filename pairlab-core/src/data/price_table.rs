//! Normalized price matrix: the read-only substrate of a backtest run.
//!
//! `build` forward-fills then backward-fills each column, so interior and
//! leading gaps disappear. After construction the table guarantees a strictly
//! increasing date index, a stable symbol set, and no NaN anywhere.

use super::DataError;
use chrono::NaiveDate;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct PriceTable {
    index: Vec<NaiveDate>,
    symbols: Vec<String>,
    columns: HashMap<String, Vec<f64>>,
}

impl PriceTable {
    /// Build a table from a date index and raw per-symbol columns.
    ///
    /// Raw values may contain NaN; gaps are eliminated by forward-fill then
    /// backward-fill. Fails on empty input, fewer than two symbols, duplicate
    /// symbols, length mismatches, a non-increasing index, or a column with
    /// no valid observation at all.
    pub fn build(
        index: Vec<NaiveDate>,
        raw_columns: Vec<(String, Vec<f64>)>,
    ) -> Result<Self, DataError> {
        if index.is_empty() || raw_columns.is_empty() {
            return Err(DataError::EmptyInput);
        }
        if raw_columns.len() < 2 {
            return Err(DataError::TooFewSymbols(raw_columns.len()));
        }
        for (row, pair) in index.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(DataError::UnsortedIndex(row + 1));
            }
        }

        let mut symbols = Vec::with_capacity(raw_columns.len());
        let mut columns = HashMap::with_capacity(raw_columns.len());
        for (symbol, mut values) in raw_columns {
            if columns.contains_key(&symbol) {
                return Err(DataError::DuplicateSymbol(symbol));
            }
            if values.len() != index.len() {
                return Err(DataError::LengthMismatch {
                    symbol,
                    len: values.len(),
                    expected: index.len(),
                });
            }
            fill_gaps(&mut values);
            if values.iter().any(|v| v.is_nan()) {
                return Err(DataError::NoValidData(symbol));
            }
            symbols.push(symbol.clone());
            columns.insert(symbol, values);
        }

        Ok(Self {
            index,
            symbols,
            columns,
        })
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn index(&self) -> &[NaiveDate] {
        &self.index
    }

    pub fn date(&self, step: usize) -> Option<NaiveDate> {
        self.index.get(step).copied()
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn has_symbol(&self, symbol: &str) -> bool {
        self.columns.contains_key(symbol)
    }

    pub fn column(&self, symbol: &str) -> Option<&[f64]> {
        self.columns.get(symbol).map(|v| v.as_slice())
    }

    pub fn price(&self, symbol: &str, step: usize) -> Option<f64> {
        self.columns.get(symbol).and_then(|v| v.get(step)).copied()
    }

    /// Snapshot of all symbol prices at one step, for risk-limit checks.
    pub fn prices_at(&self, step: usize) -> HashMap<String, f64> {
        self.symbols
            .iter()
            .filter_map(|s| self.price(s, step).map(|p| (s.clone(), p)))
            .collect()
    }

    /// Percentage-change table over the same index.
    ///
    /// The first row has no predecessor and is backfilled from the second,
    /// matching the fill policy applied to prices.
    pub fn returns(&self) -> PriceTable {
        let columns = self
            .symbols
            .iter()
            .map(|symbol| {
                let prices = &self.columns[symbol];
                let mut rets = vec![0.0; prices.len()];
                for i in 1..prices.len() {
                    rets[i] = if prices[i - 1] != 0.0 {
                        (prices[i] - prices[i - 1]) / prices[i - 1]
                    } else {
                        0.0
                    };
                }
                if rets.len() > 1 {
                    rets[0] = rets[1];
                }
                (symbol.clone(), rets)
            })
            .collect();

        PriceTable {
            index: self.index.clone(),
            symbols: self.symbols.clone(),
            columns,
        }
    }

    /// Copy of rows `0..=step`, the history visible at that step.
    pub fn slice_to(&self, step: usize) -> PriceTable {
        let end = (step + 1).min(self.index.len());
        let columns = self
            .symbols
            .iter()
            .map(|s| (s.clone(), self.columns[s][..end].to_vec()))
            .collect();
        PriceTable {
            index: self.index[..end].to_vec(),
            symbols: self.symbols.clone(),
            columns,
        }
    }
}

/// Forward-fill then backward-fill NaN gaps in place.
fn fill_gaps(values: &mut [f64]) {
    let mut last_valid = f64::NAN;
    for v in values.iter_mut() {
        if v.is_nan() {
            *v = last_valid;
        } else {
            last_valid = *v;
        }
    }
    let mut next_valid = f64::NAN;
    for v in values.iter_mut().rev() {
        if v.is_nan() {
            *v = next_valid;
        } else {
            next_valid = *v;
        }
    }
}
