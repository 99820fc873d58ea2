//! Pearson correlation matrix over return columns.
//!
//! Computed once at engine construction (the return table is immutable) and
//! handed to the risk manager's position sizing.

use super::price_table::PriceTable;

#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    symbols: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Pairwise Pearson correlation of the table's columns.
    pub fn from_table(table: &PriceTable) -> Self {
        let symbols: Vec<String> = table.symbols().to_vec();
        let n = symbols.len();
        let mut values = vec![vec![f64::NAN; n]; n];

        for i in 0..n {
            values[i][i] = 1.0;
            for j in (i + 1)..n {
                let a = table.column(&symbols[i]).unwrap_or(&[]);
                let b = table.column(&symbols[j]).unwrap_or(&[]);
                let corr = pearson(a, b);
                values[i][j] = corr;
                values[j][i] = corr;
            }
        }

        Self { symbols, values }
    }

    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.symbols.iter().position(|s| s == a)?;
        let j = self.symbols.iter().position(|s| s == b)?;
        Some(self.values[i][j])
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }
}

fn pearson(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len().min(b.len());
    if n < 2 {
        return f64::NAN;
    }
    let mean_a = a[..n].iter().sum::<f64>() / n as f64;
    let mean_b = b[..n].iter().sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for i in 0..n {
        let da = a[i] - mean_a;
        let db = b[i] - mean_b;
        cov += da * db;
        var_a += da * da;
        var_b += db * db;
    }
    if var_a == 0.0 || var_b == 0.0 {
        return f64::NAN;
    }
    cov / (var_a.sqrt() * var_b.sqrt())
}
