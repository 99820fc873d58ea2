//! Bollinger Bands with bandwidth and %B.

use super::sma::sma;

#[derive(Debug, Clone)]
pub struct BollingerBands {
    pub middle: Vec<f64>,
    pub upper: Vec<f64>,
    pub lower: Vec<f64>,
    /// (upper - lower) / middle.
    pub bandwidth: Vec<f64>,
    /// (value - lower) / (upper - lower).
    pub percent_b: Vec<f64>,
}

/// Bands at `num_std` sample standard deviations around the rolling mean.
pub fn bollinger_bands(
    values: &[f64],
    window: usize,
    num_std: f64,
    min_periods: usize,
) -> BollingerBands {
    let n = values.len();
    let middle = sma(values, window, min_periods);
    let std = rolling_std(values, window, min_periods);

    let mut upper = vec![f64::NAN; n];
    let mut lower = vec![f64::NAN; n];
    let mut bandwidth = vec![f64::NAN; n];
    let mut percent_b = vec![f64::NAN; n];

    for i in 0..n {
        if middle[i].is_nan() || std[i].is_nan() {
            continue;
        }
        upper[i] = middle[i] + std[i] * num_std;
        lower[i] = middle[i] - std[i] * num_std;
        if middle[i] != 0.0 {
            bandwidth[i] = (upper[i] - lower[i]) / middle[i];
        }
        let width = upper[i] - lower[i];
        if width != 0.0 {
            percent_b[i] = (values[i] - lower[i]) / width;
        }
    }

    BollingerBands {
        middle,
        upper,
        lower,
        bandwidth,
        percent_b,
    }
}

/// Rolling sample standard deviation (ddof = 1), expanding head like `sma`.
fn rolling_std(values: &[f64], window: usize, min_periods: usize) -> Vec<f64> {
    let n = values.len();
    let mut out = vec![f64::NAN; n];
    if window == 0 {
        return out;
    }
    let min_periods = min_periods.max(1);

    for i in 0..n {
        let count = (i + 1).min(window);
        if count < min_periods || count < 2 {
            continue;
        }
        let slice = &values[i + 1 - count..=i];
        let mean = slice.iter().sum::<f64>() / count as f64;
        let var = slice.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
        out[i] = var.sqrt();
    }
    out
}
