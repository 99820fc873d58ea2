//! Spread z-score mean-reversion strategy.
//!
//! Classic pairs logic: compute the rolling z-score of the spread
//! `price1 - price2`; short the spread when stretched high, long when
//! stretched low, flatten once it reverts inside the exit band, hold
//! otherwise. The stance machine is replayed from the start of history each
//! call, so the emitted series is a pure function of prices — two runs over
//! the same table produce identical signals.

use crate::data::PriceTable;
use crate::domain::{Pair, RawSignals};
use crate::engine::StepError;
use crate::strategy::Strategy;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct SpreadZScore {
    pairs: Vec<Pair>,
    window: usize,
    entry_z: f64,
    exit_z: f64,
    max_position_size: f64,
}

impl SpreadZScore {
    pub fn new(pairs: Vec<Pair>, window: usize) -> Self {
        Self {
            pairs,
            window,
            entry_z: 2.0,
            exit_z: 0.5,
            max_position_size: 0.1,
        }
    }

    pub fn with_thresholds(mut self, entry_z: f64, exit_z: f64) -> Self {
        self.entry_z = entry_z;
        self.exit_z = exit_z;
        self
    }

    pub fn with_max_position_size(mut self, fraction: f64) -> Self {
        self.max_position_size = fraction;
        self
    }

    /// Signal series for one pair over `0..=step`.
    fn pair_series(&self, prices: &PriceTable, pair: &Pair, step: usize) -> Option<Vec<f64>> {
        let p1 = prices.column(pair.first())?;
        let p2 = prices.column(pair.second())?;
        let end = (step + 1).min(p1.len().min(p2.len()));

        let spread: Vec<f64> = (0..end).map(|i| p1[i] - p2[i]).collect();
        let mut signals = vec![0.0; end];
        let mut stance = 0.0;

        for t in 0..end {
            if t + 1 >= self.window {
                let window = &spread[t + 1 - self.window..=t];
                let mean = window.iter().sum::<f64>() / self.window as f64;
                let var = window.iter().map(|v| (v - mean).powi(2)).sum::<f64>()
                    / (self.window - 1) as f64;
                let std = var.sqrt();
                if std > 0.0 {
                    let z = (spread[t] - mean) / std;
                    if z > self.entry_z {
                        stance = -1.0;
                    } else if z < -self.entry_z {
                        stance = 1.0;
                    } else if z.abs() < self.exit_z {
                        stance = 0.0;
                    }
                    // Between exit and entry bands the stance holds.
                }
            }
            signals[t] = stance;
        }
        Some(signals)
    }
}

impl Strategy for SpreadZScore {
    fn pairs(&self) -> Vec<Pair> {
        self.pairs.clone()
    }

    fn max_position_size(&self) -> f64 {
        self.max_position_size
    }

    fn generate_signals(&self, prices: &PriceTable, step: usize) -> Result<RawSignals, StepError> {
        if self.window < 2 {
            return Err(StepError::Signal(format!(
                "z-score window must be >= 2, got {}",
                self.window
            )));
        }
        let mut series = BTreeMap::new();
        for pair in &self.pairs {
            if let Some(signals) = self.pair_series(prices, pair, step) {
                series.insert(pair.clone(), signals);
            }
        }
        Ok(RawSignals::Mapped(series))
    }
}
