//! Risk gating.
//!
//! The engine consults a `RiskManager` for sizing, the confidence gate, the
//! per-step portfolio breach check, metric updates, and the end-of-run
//! drawdown figure. Absent a real manager the engine runs against
//! `FixedFraction`, which sizes at a fixed fraction of portfolio value and
//! never gates or breaches — the collaborator is a capability interface with
//! a default implementation, not a runtime presence check.

use crate::data::{CorrelationMatrix, PriceTable};
use crate::domain::{Pair, PairPosition};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Opaque per-pair risk figures. The engine carries these through to the
/// report without interpreting them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskMetricRecord {
    pub figures: BTreeMap<String, f64>,
}

/// Portfolio risk collaborator.
pub trait RiskManager {
    /// Entries are gated on `confidence >= min_model_confidence()`.
    fn min_model_confidence(&self) -> f64;

    /// Portfolio-level limit check. A breach is terminal for the run;
    /// `detail` explains what tripped.
    fn check_risk_limits(
        &self,
        equity_curve: &[f64],
        open_positions: &BTreeMap<Pair, PairPosition>,
        current_prices: &HashMap<String, f64>,
    ) -> (bool, Option<String>);

    /// Called once per normalized pair per step, before the pair is traded.
    fn update_risk_metrics(
        &mut self,
        pair: &Pair,
        returns: &PriceTable,
        open_positions: &BTreeMap<Pair, PairPosition>,
        confidence: f64,
    );

    /// Position size (share count) for a prospective entry.
    fn calculate_position_size(
        &self,
        portfolio_value: f64,
        pair: &Pair,
        returns: &PriceTable,
        confidence: f64,
        correlations: &CorrelationMatrix,
    ) -> f64;

    /// Maximum decline from the running equity peak, as a positive fraction.
    fn calculate_drawdown(&self, equity_curve: &[f64]) -> f64;

    /// Snapshot of per-pair risk figures for reporting.
    fn risk_metrics(&self) -> BTreeMap<Pair, RiskMetricRecord> {
        BTreeMap::new()
    }
}

/// Default risk manager: fixed-fraction sizing, no limits, no gating.
#[derive(Debug, Clone)]
pub struct FixedFraction {
    max_position_size: f64,
}

impl FixedFraction {
    pub fn new(max_position_size: f64) -> Self {
        Self { max_position_size }
    }
}

impl RiskManager for FixedFraction {
    fn min_model_confidence(&self) -> f64 {
        0.0
    }

    fn check_risk_limits(
        &self,
        _equity_curve: &[f64],
        _open_positions: &BTreeMap<Pair, PairPosition>,
        _current_prices: &HashMap<String, f64>,
    ) -> (bool, Option<String>) {
        (false, None)
    }

    fn update_risk_metrics(
        &mut self,
        _pair: &Pair,
        _returns: &PriceTable,
        _open_positions: &BTreeMap<Pair, PairPosition>,
        _confidence: f64,
    ) {
    }

    fn calculate_position_size(
        &self,
        portfolio_value: f64,
        _pair: &Pair,
        _returns: &PriceTable,
        _confidence: f64,
        _correlations: &CorrelationMatrix,
    ) -> f64 {
        portfolio_value * self.max_position_size
    }

    fn calculate_drawdown(&self, equity_curve: &[f64]) -> f64 {
        peak_drawdown(equity_curve)
    }
}

/// Risk manager sizing every entry at a fixed unit count.
///
/// No limits, no gating; drawdown is the standard running-peak form. Handy
/// for scripted scenarios where the trade size must be pinned.
#[derive(Debug, Clone)]
pub struct FixedQuantity {
    quantity: f64,
}

impl FixedQuantity {
    pub fn new(quantity: f64) -> Self {
        Self { quantity }
    }
}

impl RiskManager for FixedQuantity {
    fn min_model_confidence(&self) -> f64 {
        0.0
    }

    fn check_risk_limits(
        &self,
        _equity_curve: &[f64],
        _open_positions: &BTreeMap<Pair, PairPosition>,
        _current_prices: &HashMap<String, f64>,
    ) -> (bool, Option<String>) {
        (false, None)
    }

    fn update_risk_metrics(
        &mut self,
        _pair: &Pair,
        _returns: &PriceTable,
        _open_positions: &BTreeMap<Pair, PairPosition>,
        _confidence: f64,
    ) {
    }

    fn calculate_position_size(
        &self,
        _portfolio_value: f64,
        _pair: &Pair,
        _returns: &PriceTable,
        _confidence: f64,
        _correlations: &CorrelationMatrix,
    ) -> f64 {
        self.quantity
    }

    fn calculate_drawdown(&self, equity_curve: &[f64]) -> f64 {
        peak_drawdown(equity_curve)
    }
}

/// Maximum decline from the running peak, as a positive fraction.
pub fn peak_drawdown(equity_curve: &[f64]) -> f64 {
    let mut peak = f64::NEG_INFINITY;
    let mut max_dd = 0.0_f64;
    for &value in equity_curve {
        if value > peak {
            peak = value;
        }
        if peak > 0.0 {
            let dd = (peak - value) / peak;
            if dd > max_dd {
                max_dd = dd;
            }
        }
    }
    max_dd
}

/// Thin adapter the engine talks to.
pub struct RiskGate {
    manager: Box<dyn RiskManager>,
}

impl RiskGate {
    pub fn new(manager: Box<dyn RiskManager>) -> Self {
        Self { manager }
    }

    /// Gate built on the default manager, sized off the strategy's
    /// capital-fraction cap.
    pub fn passive(max_position_size: f64) -> Self {
        Self::new(Box::new(FixedFraction::new(max_position_size)))
    }

    pub fn confidence_passes(&self, confidence: f64) -> bool {
        confidence >= self.manager.min_model_confidence()
    }

    /// Some(detail) when the portfolio breached a limit.
    pub fn check_limits(
        &self,
        equity_curve: &[f64],
        open_positions: &BTreeMap<Pair, PairPosition>,
        current_prices: &HashMap<String, f64>,
    ) -> Option<String> {
        let (breached, detail) =
            self.manager
                .check_risk_limits(equity_curve, open_positions, current_prices);
        if breached {
            Some(detail.unwrap_or_else(|| "risk limits exceeded".to_string()))
        } else {
            None
        }
    }

    pub fn update_metrics(
        &mut self,
        pair: &Pair,
        returns: &PriceTable,
        open_positions: &BTreeMap<Pair, PairPosition>,
        confidence: f64,
    ) {
        self.manager
            .update_risk_metrics(pair, returns, open_positions, confidence);
    }

    pub fn position_size(
        &self,
        portfolio_value: f64,
        pair: &Pair,
        returns: &PriceTable,
        confidence: f64,
        correlations: &CorrelationMatrix,
    ) -> f64 {
        self.manager
            .calculate_position_size(portfolio_value, pair, returns, confidence, correlations)
    }

    pub fn drawdown(&self, equity_curve: &[f64]) -> f64 {
        self.manager.calculate_drawdown(equity_curve)
    }

    pub fn metrics_snapshot(&self) -> BTreeMap<Pair, RiskMetricRecord> {
        self.manager.risk_metrics()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn returns() -> PriceTable {
        let base = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let index = (0..2).map(|i| base + chrono::Duration::days(i)).collect();
        PriceTable::build(
            index,
            vec![("A".into(), vec![0.0, 0.01]), ("B".into(), vec![0.0, -0.01])],
        )
        .unwrap()
    }

    #[test]
    fn fixed_fraction_sizes_off_portfolio_value() {
        let gate = RiskGate::passive(0.05);
        let returns = returns();
        let corr = CorrelationMatrix::from_table(&returns);
        let size = gate.position_size(
            100_000.0,
            &Pair::new("A", "B").unwrap(),
            &returns,
            1.0,
            &corr,
        );
        assert!((size - 5_000.0).abs() < 1e-9);
    }

    #[test]
    fn passive_gate_never_blocks() {
        let gate = RiskGate::passive(0.05);
        assert!(gate.confidence_passes(0.0));
        assert!(gate
            .check_limits(&[100_000.0, 90_000.0], &BTreeMap::new(), &HashMap::new())
            .is_none());
        assert!(gate.metrics_snapshot().is_empty());
    }

    #[test]
    fn peak_drawdown_known_curve() {
        let curve = vec![100_000.0, 110_000.0, 90_000.0, 95_000.0];
        let expected = (110_000.0 - 90_000.0) / 110_000.0;
        assert!((peak_drawdown(&curve) - expected).abs() < 1e-12);
    }

    #[test]
    fn peak_drawdown_monotonic_is_zero() {
        let curve: Vec<f64> = (0..10).map(|i| 1_000.0 + i as f64).collect();
        assert_eq!(peak_drawdown(&curve), 0.0);
        assert_eq!(peak_drawdown(&[]), 0.0);
    }
}
