//! Day-by-day backtest loop — the heart of the engine.
//!
//! Per step after the first: fetch the (throttled) feature snapshot, obtain
//! raw signals from the strategy, normalize into canonical pair order, then
//! for each pair update risk metrics and run the close/open transitions
//! gated by the risk gate. The step's portfolio value is appended to the
//! equity curve and the portfolio-level risk check runs last; a breach ends
//! the run after the step's bookkeeping.
//!
//! Steps are strictly sequential: step t+1 depends on the ledger and capital
//! state left by step t, and within a step pairs are processed in canonical
//! order because capital is a shared resource contended across pairs. A
//! failing step is contained: logged, equity carried forward, loop continues.

use crate::data::{CorrelationMatrix, PriceTable};
use crate::domain::{Pair, PairSignal};
use crate::engine::config::EngineConfig;
use crate::engine::errors::StepError;
use crate::engine::feature_cache::FeatureCache;
use crate::engine::ledger::PositionLedger;
use crate::engine::normalize::normalize_signals;
use crate::engine::result::{RiskHalt, RunResult};
use crate::engine::risk::{RiskGate, RiskManager};
use crate::features::{FeatureEngineer, FeatureFrame, TechnicalFeatureEngineer};
use crate::strategy::Strategy;
use chrono::NaiveDate;
use tracing::{info, warn};

pub struct BacktestEngine {
    config: EngineConfig,
    prices: PriceTable,
    returns: PriceTable,
    correlations: CorrelationMatrix,
    strategy: Box<dyn Strategy>,
    risk: RiskGate,
    feature_cache: FeatureCache,
    ledger: PositionLedger,
}

impl BacktestEngine {
    /// Build an engine over a validated price table.
    ///
    /// Defaults: fixed-fraction risk gate sized off the strategy's
    /// `max_position_size`, and the technical feature engineer.
    pub fn new(config: EngineConfig, prices: PriceTable, strategy: Box<dyn Strategy>) -> Self {
        let returns = prices.returns();
        let correlations = CorrelationMatrix::from_table(&returns);
        let risk = RiskGate::passive(strategy.max_position_size());
        let feature_cache = FeatureCache::new(
            Box::new(TechnicalFeatureEngineer::new()),
            config.feature_refresh_interval,
        );
        let ledger = PositionLedger::new(config.transaction_cost, config.max_pairs);
        Self {
            config,
            prices,
            returns,
            correlations,
            strategy,
            risk,
            feature_cache,
            ledger,
        }
    }

    pub fn with_risk_manager(mut self, manager: Box<dyn RiskManager>) -> Self {
        self.risk = RiskGate::new(manager);
        self
    }

    pub fn with_feature_engineer(mut self, engineer: Box<dyn FeatureEngineer>) -> Self {
        self.feature_cache = FeatureCache::new(engineer, self.config.feature_refresh_interval);
        self
    }

    /// Run the backtest to completion (or risk halt), consuming the engine.
    pub fn run(mut self) -> RunResult {
        let num_steps = self.prices.len();
        info!(steps = num_steps, "starting backtest");

        let mut equity_curve = Vec::with_capacity(num_steps);
        let mut portfolio_value = self.config.initial_capital;
        equity_curve.push(portfolio_value);

        let mut halt: Option<RiskHalt> = None;
        let mut failed_steps = 0usize;

        for step in 1..num_steps {
            let date = self.prices.index()[step];

            match self.process_step(step, date, portfolio_value) {
                Ok(value) => portfolio_value = value,
                Err(e) => {
                    // Contained: the step's intermediate actions are not
                    // reflected in equity; the prior value carries forward.
                    warn!(%date, error = %e, "step failed, carrying equity forward");
                    failed_steps += 1;
                }
            }
            equity_curve.push(portfolio_value);

            let current_prices = self.prices.prices_at(step);
            if let Some(detail) =
                self.risk
                    .check_limits(&equity_curve, self.ledger.open_positions(), &current_prices)
            {
                warn!(%date, detail = %detail, "risk limits exceeded, halting run");
                halt = Some(RiskHalt { step, date, detail });
                break;
            }
        }

        info!(
            final_value = portfolio_value,
            failed_steps,
            halted = halt.is_some(),
            "backtest completed"
        );

        let max_drawdown = self.risk.drawdown(&equity_curve);
        let risk_metrics = self.risk.metrics_snapshot();
        let dates = self.prices.index()[..equity_curve.len()].to_vec();
        let (trades, pair_performance, open_positions) = self.ledger.into_parts();

        RunResult {
            dates,
            final_value: portfolio_value,
            equity_curve,
            trades,
            pair_performance,
            open_positions,
            risk_metrics,
            max_drawdown,
            halt,
            failed_steps,
        }
    }

    /// One timestep: signals → normalize → per-pair transitions.
    fn process_step(
        &mut self,
        step: usize,
        date: NaiveDate,
        mut portfolio_value: f64,
    ) -> Result<f64, StepError> {
        let Self {
            prices,
            returns,
            correlations,
            strategy,
            risk,
            feature_cache,
            ledger,
            ..
        } = self;

        let features = feature_cache.features(prices, step);

        let raw = match strategy.predict_signals(features, step) {
            Some(result) => result?,
            None => strategy.generate_signals(prices, step)?,
        };

        let universe = strategy.pairs();
        let normalized = normalize_signals(&raw, &universe, step, prices, features);

        for (pair, signal) in &normalized {
            risk.update_metrics(pair, returns, ledger.open_positions(), signal.confidence);
            portfolio_value = apply_pair_signal(
                ledger,
                risk,
                correlations,
                prices,
                returns,
                features,
                pair,
                *signal,
                portfolio_value,
                date,
                step,
            )?;
        }

        Ok(portfolio_value)
    }
}

/// Close/open state transitions for one pair, close before open so freed
/// capital is available for re-entry within the same step.
#[allow(clippy::too_many_arguments)]
fn apply_pair_signal(
    ledger: &mut PositionLedger,
    risk: &RiskGate,
    correlations: &CorrelationMatrix,
    prices: &PriceTable,
    returns: &PriceTable,
    features: &FeatureFrame,
    pair: &Pair,
    signal: PairSignal,
    mut portfolio_value: f64,
    date: NaiveDate,
    step: usize,
) -> Result<f64, StepError> {
    let price1 = prices
        .price(pair.first(), step)
        .ok_or_else(|| StepError::MissingPrice {
            symbol: pair.first().to_string(),
            step,
        })?;
    let price2 = prices
        .price(pair.second(), step)
        .ok_or_else(|| StepError::MissingPrice {
            symbol: pair.second().to_string(),
            step,
        })?;

    // OPEN → FLAT on a zero signal or a sign flip against the stored side.
    if let Some(position) = ledger.position(pair) {
        let stored_sign = position.side.sign();
        if signal.value == 0.0 || signal.value * stored_sign < 0.0 {
            portfolio_value =
                ledger.close_position(pair, portfolio_value, date, price1, price2, "Signal change");
        }
    }

    // FLAT → OPEN when the signal is live, the confidence gate passes, and
    // sizing plus validation hold up.
    if signal.value != 0.0 && ledger.position(pair).is_none() {
        if !risk.confidence_passes(signal.confidence) {
            return Ok(portfolio_value);
        }
        let quantity =
            risk.position_size(portfolio_value, pair, returns, signal.confidence, correlations);
        if ledger.validate_entry(pair, quantity, returns) {
            portfolio_value = ledger.open_position(
                pair,
                signal.value,
                quantity,
                portfolio_value,
                date,
                price1,
                price2,
                signal.confidence,
                features.last_row(),
            );
        }
    }

    Ok(portfolio_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategies::scripted::{ScriptedShape, ScriptedSignals};
    use std::collections::BTreeMap;

    fn prices(n: usize) -> PriceTable {
        let base = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let index = (0..n).map(|i| base + chrono::Duration::days(i as i64)).collect();
        PriceTable::build(
            index,
            vec![
                ("A".into(), (0..n).map(|i| 100.0 + i as f64).collect()),
                ("B".into(), (0..n).map(|i| 100.0 - 0.1 * i as f64).collect()),
            ],
        )
        .unwrap()
    }

    #[test]
    fn flat_signals_leave_equity_constant() {
        let pair = Pair::new("A", "B").unwrap();
        let mut series = BTreeMap::new();
        series.insert(pair, vec![0.0; 10]);
        let strategy = ScriptedSignals::new(series, ScriptedShape::Mapped);

        let engine = BacktestEngine::new(
            EngineConfig::new(100_000.0),
            prices(10),
            Box::new(strategy),
        );
        let result = engine.run();

        assert_eq!(result.equity_curve.len(), 10);
        assert!(result.equity_curve.iter().all(|&v| v == 100_000.0));
        assert!(result.trades.is_empty());
        assert!(!result.is_halted());
    }

    #[test]
    fn equity_curve_length_matches_price_index() {
        let pair = Pair::new("A", "B").unwrap();
        let mut series = BTreeMap::new();
        series.insert(pair, vec![0.0, 1.0, 1.0, 0.0, 0.0, -1.0, -1.0, 0.0, 0.0, 0.0]);
        let strategy = ScriptedSignals::new(series, ScriptedShape::Mapped);

        let result = BacktestEngine::new(
            EngineConfig::new(100_000.0),
            prices(10),
            Box::new(strategy),
        )
        .run();

        assert_eq!(result.equity_curve.len(), 10);
        assert_eq!(result.dates.len(), 10);
    }
}
