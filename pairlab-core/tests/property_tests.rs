//! Property tests for engine invariants.
//!
//! Random signal scripts and price paths must never violate:
//! 1. Equity curve length — matches the price index for non-halting runs
//! 2. No phantom positions — every open position has an unmatched entry;
//!    every closed round trip is exactly one entry followed by one exit
//! 3. Ledger-implied accounting — the final value follows from the trade log
//! 4. Determinism — identical inputs give identical outputs

use chrono::NaiveDate;
use pairlab_core::data::PriceTable;
use pairlab_core::domain::{Pair, TradeAction};
use pairlab_core::engine::{BacktestEngine, EngineConfig, FixedQuantity};
use pairlab_core::strategies::{ScriptedShape, ScriptedSignals};
use proptest::prelude::*;
use std::collections::BTreeMap;

fn build_prices(a: &[f64], b: &[f64]) -> PriceTable {
    let base = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let index = (0..a.len())
        .map(|i| base + chrono::Duration::days(i as i64))
        .collect();
    PriceTable::build(
        index,
        vec![("A".into(), a.to_vec()), ("B".into(), b.to_vec())],
    )
    .unwrap()
}

fn run_scripted(a: &[f64], b: &[f64], signals: Vec<f64>) -> pairlab_core::engine::RunResult {
    let mut series = BTreeMap::new();
    series.insert(Pair::new("A", "B").unwrap(), signals);
    let strategy = ScriptedSignals::new(series, ScriptedShape::Mapped);
    let config = EngineConfig::new(1_000_000.0).with_transaction_cost(0.001);
    BacktestEngine::new(config, build_prices(a, b), Box::new(strategy))
        .with_risk_manager(Box::new(FixedQuantity::new(10.0)))
        .run()
}

fn arb_price() -> impl Strategy<Value = f64> {
    (50.0..150.0_f64).prop_map(|p| (p * 100.0).round() / 100.0)
}

fn arb_signal() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.0), Just(1.0), Just(-1.0)]
}

proptest! {
    #[test]
    fn equity_curve_length_matches_price_index(
        a in prop::collection::vec(arb_price(), 10..40),
        seed_b in prop::collection::vec(arb_price(), 10..40),
        signals in prop::collection::vec(arb_signal(), 40),
    ) {
        let n = a.len().min(seed_b.len());
        let a = &a[..n];
        let b = &seed_b[..n];
        let result = run_scripted(a, b, signals[..n].to_vec());

        // No risk manager breach in this setup, so the run never halts.
        prop_assert!(!result.is_halted());
        prop_assert_eq!(result.equity_curve.len(), n);
        prop_assert_eq!(result.dates.len(), n);
        prop_assert_eq!(result.equity_curve[0], 1_000_000.0);
    }

    #[test]
    fn no_phantom_positions(
        a in prop::collection::vec(arb_price(), 20..40),
        signals in prop::collection::vec(arb_signal(), 40),
    ) {
        let n = a.len();
        let b: Vec<f64> = a.iter().map(|p| p * 0.9).collect();
        let result = run_scripted(&a, &b, signals[..n].to_vec());

        let entries = result
            .trades
            .iter()
            .filter(|t| t.action == TradeAction::Entry)
            .count();
        let exits = result
            .trades
            .iter()
            .filter(|t| t.action == TradeAction::Exit)
            .count();

        // Every exit matches a prior entry; unmatched entries are exactly the
        // still-open positions.
        prop_assert_eq!(entries, exits + result.open_positions.len());
        prop_assert_eq!(result.closed_trade_count(), exits);

        // Walking the log per pair never closes a flat book or double-opens.
        let mut open = std::collections::BTreeSet::new();
        for trade in &result.trades {
            match trade.action {
                TradeAction::Entry => prop_assert!(open.insert(trade.pair.clone())),
                TradeAction::Exit => prop_assert!(open.remove(&trade.pair)),
            }
        }
        let leftovers: Vec<_> = result.open_positions.keys().cloned().collect();
        prop_assert_eq!(Vec::from_iter(open), leftovers);
    }

    #[test]
    fn ledger_implied_accounting_holds(
        a in prop::collection::vec(arb_price(), 20..40),
        signals in prop::collection::vec(arb_signal(), 40),
    ) {
        let n = a.len();
        let b: Vec<f64> = a.iter().rev().cloned().collect();
        let result = run_scripted(&a, &b, signals[..n].to_vec());

        let mut expected = result.initial_capital();
        for trade in &result.trades {
            match trade.action {
                TradeAction::Entry => {
                    expected -= trade.quantity.abs() * (trade.price1 + trade.price2) + trade.cost;
                }
                TradeAction::Exit => expected += trade.pnl.unwrap(),
            }
        }
        prop_assert!((result.final_value - expected).abs() < 1e-6);
    }

    #[test]
    fn determinism(
        a in prop::collection::vec(arb_price(), 10..25),
        signals in prop::collection::vec(arb_signal(), 25),
    ) {
        let n = a.len();
        let b: Vec<f64> = a.iter().map(|p| 200.0 - p).collect();
        let first = run_scripted(&a, &b, signals[..n].to_vec());
        let second = run_scripted(&a, &b, signals[..n].to_vec());

        prop_assert_eq!(first.equity_curve, second.equity_curve);
        prop_assert_eq!(
            serde_json::to_string(&first.trades).unwrap(),
            serde_json::to_string(&second.trades).unwrap()
        );
    }
}
