//! Moving Average Convergence Divergence.

use super::ema::ema;

#[derive(Debug, Clone)]
pub struct Macd {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

/// MACD line (fast EMA - slow EMA), its signal line, and the histogram.
///
/// `min_periods` masks the fast/slow EMAs; `signal_min_periods` masks the
/// signal line, counted over valid MACD observations.
pub fn macd(
    values: &[f64],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
    min_periods: usize,
    signal_min_periods: usize,
) -> Macd {
    let fast = ema(values, fast_period, min_periods);
    let slow = ema(values, slow_period, min_periods);

    let line: Vec<f64> = fast
        .iter()
        .zip(&slow)
        .map(|(&f, &s)| if f.is_nan() || s.is_nan() { f64::NAN } else { f - s })
        .collect();

    let signal = ema(&line, signal_period, signal_min_periods);
    let histogram: Vec<f64> = line
        .iter()
        .zip(&signal)
        .map(|(&m, &s)| if m.is_nan() || s.is_nan() { f64::NAN } else { m - s })
        .collect();

    Macd {
        macd: line,
        signal,
        histogram,
    }
}
