//! Runner-level result: the engine's output flattened for serialization.

use crate::config::RunId;
use crate::report::BacktestReport;
use chrono::NaiveDate;
use pairlab_core::domain::TradeRecord;
use pairlab_core::engine::RunResult;
use serde::{Deserialize, Serialize};

/// Single point in the equity curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub equity: f64,
}

/// Complete serializable result of one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestResult {
    pub run_id: RunId,
    pub equity_curve: Vec<EquityPoint>,
    pub trades: Vec<TradeRecord>,
    pub report: BacktestReport,
    /// True when the run ended on a risk-limit breach; the equity curve then
    /// covers only a prefix of the price index.
    pub halted: bool,
    pub halt_detail: Option<String>,
    pub failed_steps: usize,
}

impl BacktestResult {
    pub fn from_run(run_id: RunId, run: &RunResult, report: BacktestReport) -> Self {
        let equity_curve = run
            .dates
            .iter()
            .zip(&run.equity_curve)
            .map(|(&date, &equity)| EquityPoint { date, equity })
            .collect();
        Self {
            run_id,
            equity_curve,
            trades: run.trades.clone(),
            report,
            halted: run.is_halted(),
            halt_detail: run.halt.as_ref().map(|h| h.detail.clone()),
            failed_steps: run.failed_steps,
        }
    }
}
