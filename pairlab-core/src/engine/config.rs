//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Configuration for a single backtest run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub initial_capital: f64,
    /// Proportional fee on notional, charged at entry and exit.
    pub transaction_cost: f64,
    /// Cap on simultaneously open pairs. `None` means unlimited.
    pub max_pairs: Option<usize>,
    /// Steps between feature recomputations.
    pub feature_refresh_interval: usize,
}

impl EngineConfig {
    pub fn new(initial_capital: f64) -> Self {
        Self {
            initial_capital,
            ..Default::default()
        }
    }

    pub fn with_transaction_cost(mut self, transaction_cost: f64) -> Self {
        self.transaction_cost = transaction_cost;
        self
    }

    pub fn with_max_pairs(mut self, max_pairs: usize) -> Self {
        self.max_pairs = Some(max_pairs);
        self
    }

    pub fn with_feature_refresh_interval(mut self, interval: usize) -> Self {
        self.feature_refresh_interval = interval;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            initial_capital: 100_000.0,
            transaction_cost: 0.001,
            max_pairs: None,
            feature_refresh_interval: 20,
        }
    }
}
