//! Result of a complete backtest run.

use crate::domain::{Pair, PairPerformanceRecord, PairPosition, TradeRecord};
use crate::engine::risk::RiskMetricRecord;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Terminal risk-limit breach marker.
///
/// The breach ends the run after the current step's bookkeeping, so the
/// equity curve stops at `step` while the price index continues — a stalled
/// tail means "halted", not "completed".
#[derive(Debug, Clone, PartialEq)]
pub struct RiskHalt {
    pub step: usize,
    pub date: NaiveDate,
    pub detail: String,
}

/// Everything a run produces.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// Dates covered by `equity_curve`, a prefix of the price index.
    pub dates: Vec<NaiveDate>,
    /// Portfolio value per realized step; first entry is initial capital.
    pub equity_curve: Vec<f64>,
    pub final_value: f64,
    pub trades: Vec<TradeRecord>,
    pub pair_performance: BTreeMap<Pair, Vec<PairPerformanceRecord>>,
    /// Positions still open when the run ended.
    pub open_positions: BTreeMap<Pair, PairPosition>,
    /// Risk manager's per-pair figures at end of run.
    pub risk_metrics: BTreeMap<Pair, RiskMetricRecord>,
    /// Drawdown as computed by the risk manager (positive fraction).
    pub max_drawdown: f64,
    pub halt: Option<RiskHalt>,
    /// Steps whose errors were contained (equity carried forward).
    pub failed_steps: usize,
}

impl RunResult {
    pub fn is_halted(&self) -> bool {
        self.halt.is_some()
    }

    pub fn initial_capital(&self) -> f64 {
        self.equity_curve.first().copied().unwrap_or(0.0)
    }

    /// Closed round trips across all pairs.
    pub fn closed_trade_count(&self) -> usize {
        self.pair_performance.values().map(Vec::len).sum()
    }
}
