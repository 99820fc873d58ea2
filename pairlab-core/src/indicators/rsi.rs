//! Relative Strength Index, Wilder and Cutler variants.
//!
//! RSI = 100 - 100 / (1 + rs) where rs = avg_gain / (avg_loss + 1e-12).
//! Wilder smooths gains and losses exponentially with `alpha = 1/window`;
//! Cutler uses plain rolling means. The epsilon keeps an all-gain window at
//! ~100 instead of dividing by zero.

use super::ema::ewm;
use super::sma::sma;

/// Wilder-smoothed RSI. Output is NaN until `min_periods` observations.
pub fn rsi_wilder(values: &[f64], window: usize, min_periods: usize) -> Vec<f64> {
    let (gains, losses) = gains_losses(values);
    let alpha = 1.0 / window as f64;
    let avg_gain = ewm(&gains, alpha, min_periods);
    let avg_loss = ewm(&losses, alpha, min_periods);
    combine(&avg_gain, &avg_loss)
}

/// Cutler RSI: rolling-mean smoothing instead of exponential.
pub fn rsi_cutler(values: &[f64], window: usize, min_periods: usize) -> Vec<f64> {
    let (gains, losses) = gains_losses(values);
    let avg_gain = sma(&gains, window, min_periods);
    let avg_loss = sma(&losses, window, min_periods);
    combine(&avg_gain, &avg_loss)
}

/// Split first differences into gain/loss series. The first element has no
/// predecessor and contributes zero to both.
fn gains_losses(values: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let n = values.len();
    let mut gains = vec![0.0; n];
    let mut losses = vec![0.0; n];
    for i in 1..n {
        let delta = values[i] - values[i - 1];
        if delta > 0.0 {
            gains[i] = delta;
        } else {
            losses[i] = -delta;
        }
    }
    (gains, losses)
}

fn combine(avg_gain: &[f64], avg_loss: &[f64]) -> Vec<f64> {
    avg_gain
        .iter()
        .zip(avg_loss)
        .map(|(&g, &l)| {
            if g.is_nan() || l.is_nan() {
                f64::NAN
            } else {
                let rs = g / (l + 1e-12);
                100.0 - 100.0 / (1.0 + rs)
            }
        })
        .collect()
}
