//! Performance metrics — pure functions over the equity curve and trade log.
//!
//! Annualization assumes 252 trading days. A curve with fewer than two
//! points yields all-zero metrics rather than NaN.

use pairlab_core::domain::PairPerformanceRecord;
use serde::{Deserialize, Serialize};

/// Headline metrics of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallMetrics {
    pub total_return: f64,
    pub annual_return: f64,
    pub annual_volatility: f64,
    pub sharpe_ratio: f64,
    /// Positive fraction, as reported by the risk manager.
    pub max_drawdown: f64,
    pub win_rate: f64,
    pub trade_count: usize,
    pub final_value: f64,
}

/// Total return as a fraction: last / first - 1.
pub fn total_return(equity_curve: &[f64]) -> f64 {
    if equity_curve.len() < 2 {
        return 0.0;
    }
    let first = equity_curve[0];
    if first <= 0.0 {
        return 0.0;
    }
    equity_curve.last().unwrap() / first - 1.0
}

/// Mean daily return scaled to a 252-day year.
pub fn annual_return(equity_curve: &[f64]) -> f64 {
    let returns = daily_returns(equity_curve);
    if returns.is_empty() {
        return 0.0;
    }
    mean(&returns) * 252.0
}

/// Sample standard deviation of daily returns scaled by sqrt(252).
pub fn annual_volatility(equity_curve: &[f64]) -> f64 {
    let returns = daily_returns(equity_curve);
    if returns.len() < 2 {
        return 0.0;
    }
    std_dev(&returns) * (252.0_f64).sqrt()
}

/// Annualized Sharpe: mean / std of daily returns times sqrt(252).
pub fn sharpe_ratio(equity_curve: &[f64]) -> f64 {
    let returns = daily_returns(equity_curve);
    if returns.len() < 2 {
        return 0.0;
    }
    let std = std_dev(&returns);
    if std < 1e-15 {
        return 0.0;
    }
    (mean(&returns) / std) * (252.0_f64).sqrt()
}

/// Fraction of closed round trips with positive PnL.
pub fn win_rate(closed: &[&PairPerformanceRecord]) -> f64 {
    if closed.is_empty() {
        return 0.0;
    }
    let winners = closed.iter().filter(|r| r.is_winner()).count();
    winners as f64 / closed.len() as f64
}

/// Daily percentage changes of the equity curve.
pub fn daily_returns(equity_curve: &[f64]) -> Vec<f64> {
    if equity_curve.len() < 2 {
        return Vec::new();
    }
    equity_curve
        .windows(2)
        .map(|w| if w[0] > 0.0 { (w[1] - w[0]) / w[0] } else { 0.0 })
        .collect()
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

pub(crate) fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance =
        values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}
