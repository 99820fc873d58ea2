//! Linearly weighted moving average.
//!
//! Weights 1..=window over the available window, most recent observation
//! weighted heaviest. Shorter head windows reuse the leading weights, so the
//! expanding phase stays well defined.

/// Weighted rolling mean. Output is NaN until `min_periods` observations.
pub fn wma(values: &[f64], window: usize, min_periods: usize) -> Vec<f64> {
    let n = values.len();
    let mut out = vec![f64::NAN; n];
    if window == 0 {
        return out;
    }
    let min_periods = min_periods.max(1);

    for i in 0..n {
        let count = (i + 1).min(window);
        if count < min_periods {
            continue;
        }
        let start = i + 1 - count;
        let mut num = 0.0;
        let mut den = 0.0;
        for (k, &v) in values[start..=i].iter().enumerate() {
            let w = (k + 1) as f64;
            num += w * v;
            den += w;
        }
        out[i] = num / den;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_favor_recent() {
        let out = wma(&[1.0, 2.0, 3.0], 3, 3);
        // (1*1 + 2*2 + 3*3) / 6 = 14/6
        assert!((out[2] - 14.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn expanding_head() {
        let out = wma(&[1.0, 2.0, 3.0], 3, 1);
        assert!((out[0] - 1.0).abs() < 1e-12);
        // (1*1 + 2*2) / 3 = 5/3
        assert!((out[1] - 5.0 / 3.0).abs() < 1e-12);
    }
}
