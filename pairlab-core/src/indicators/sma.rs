//! Simple moving average.
//!
//! Rolling mean with an expanding head: once `min_periods` observations are
//! available the window grows until it reaches `window`, then slides.

/// Rolling mean of `values`. Output is NaN until `min_periods` observations.
pub fn sma(values: &[f64], window: usize, min_periods: usize) -> Vec<f64> {
    let n = values.len();
    let mut out = vec![f64::NAN; n];
    if window == 0 {
        return out;
    }
    let min_periods = min_periods.max(1);

    let mut sum = 0.0;
    for i in 0..n {
        sum += values[i];
        if i >= window {
            sum -= values[i - window];
        }
        let count = (i + 1).min(window);
        if count >= min_periods {
            out[i] = sum / count as f64;
        }
    }
    out
}
