//! Volume-derived indicators: OBV and volume-price trend.
//!
//! Both are cumulative series seeded at zero; the first element has no price
//! change and contributes nothing.

/// On-balance volume: cumulative sum of `sign(price change) * volume`.
pub fn on_balance_volume(prices: &[f64], volumes: &[f64]) -> Vec<f64> {
    let n = prices.len().min(volumes.len());
    let mut out = vec![0.0; n];
    let mut acc = 0.0;
    for i in 0..n {
        if i > 0 {
            let delta = prices[i] - prices[i - 1];
            // f64::signum maps 0.0 to 1.0; flat closes must contribute nothing.
            if delta > 0.0 {
                acc += volumes[i];
            } else if delta < 0.0 {
                acc -= volumes[i];
            }
        }
        out[i] = acc;
    }
    out
}

/// Volume-price trend: cumulative sum of `volume * pct_change(price)`.
pub fn volume_price_trend(prices: &[f64], volumes: &[f64]) -> Vec<f64> {
    let n = prices.len().min(volumes.len());
    let mut out = vec![0.0; n];
    let mut acc = 0.0;
    for i in 0..n {
        if i > 0 && prices[i - 1] != 0.0 {
            acc += volumes[i] * (prices[i] - prices[i - 1]) / prices[i - 1];
        }
        out[i] = acc;
    }
    out
}
