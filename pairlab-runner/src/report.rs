//! Report builder: pure aggregation over a finished run.
//!
//! Consumes the engine's `RunResult` and produces a serializable report with
//! headline metrics, per-pair rollups, and the risk manager's figures. Max
//! drawdown is taken from the run (which delegates to the risk manager), not
//! recomputed here.

use crate::metrics::{
    annual_return, annual_volatility, sharpe_ratio, total_return, win_rate, OverallMetrics,
};
use pairlab_core::domain::PairPerformanceRecord;
use pairlab_core::engine::{RiskMetricRecord, RunResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-pair rollup over that pair's closed round trips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairBreakdown {
    pub total_pnl: f64,
    pub trade_count: usize,
    pub win_rate: f64,
    pub average_return: f64,
    pub average_holding_period_days: f64,
    pub average_confidence: f64,
}

/// The full nested report handed to sinks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestReport {
    pub overall: OverallMetrics,
    /// Keyed by pair label ("A/B").
    pub pair_performance: BTreeMap<String, PairBreakdown>,
    /// Keyed by pair label; opaque figures owned by the risk manager.
    pub risk_analysis: BTreeMap<String, RiskMetricRecord>,
}

pub struct ReportBuilder;

impl ReportBuilder {
    pub fn build(result: &RunResult) -> BacktestReport {
        let closed: Vec<&PairPerformanceRecord> = result
            .pair_performance
            .values()
            .flat_map(|records| records.iter())
            .collect();

        let overall = OverallMetrics {
            total_return: total_return(&result.equity_curve),
            annual_return: annual_return(&result.equity_curve),
            annual_volatility: annual_volatility(&result.equity_curve),
            sharpe_ratio: sharpe_ratio(&result.equity_curve),
            max_drawdown: result.max_drawdown,
            win_rate: win_rate(&closed),
            trade_count: closed.len(),
            final_value: result.final_value,
        };

        let pair_performance = result
            .pair_performance
            .iter()
            .filter(|(_, records)| !records.is_empty())
            .map(|(pair, records)| (pair.label(), rollup(records)))
            .collect();

        let risk_analysis = result
            .risk_metrics
            .iter()
            .map(|(pair, record)| (pair.label(), record.clone()))
            .collect();

        BacktestReport {
            overall,
            pair_performance,
            risk_analysis,
        }
    }
}

fn rollup(records: &[PairPerformanceRecord]) -> PairBreakdown {
    let n = records.len() as f64;
    let winners = records.iter().filter(|r| r.is_winner()).count();
    PairBreakdown {
        total_pnl: records.iter().map(|r| r.pnl).sum(),
        trade_count: records.len(),
        win_rate: winners as f64 / n,
        average_return: records.iter().map(|r| r.return_pct).sum::<f64>() / n,
        average_holding_period_days: records
            .iter()
            .map(|r| r.holding_period_days as f64)
            .sum::<f64>()
            / n,
        average_confidence: records.iter().map(|r| r.confidence).sum::<f64>() / n,
    }
}
