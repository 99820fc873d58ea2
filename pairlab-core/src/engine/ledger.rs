//! Position ledger: owns open positions, executes open/close transitions,
//! computes costs and spread PnL, and accumulates the trade history.
//!
//! Per pair the lifecycle is FLAT → OPEN → FLAT with no intermediate states;
//! both transitions complete atomically within one engine step. PnL is the
//! spread model: only the change in `price1 - price2` matters, so the legs'
//! common drift cancels out. Valuation uses price levels at both entry and
//! exit.

use crate::data::PriceTable;
use crate::domain::{
    Pair, PairPerformanceRecord, PairPosition, SpreadSide, TradeAction, TradeRecord,
};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::{debug, warn};

#[derive(Debug)]
pub struct PositionLedger {
    transaction_cost: f64,
    max_pairs: Option<usize>,
    open: BTreeMap<Pair, PairPosition>,
    trades: Vec<TradeRecord>,
    performance: BTreeMap<Pair, Vec<PairPerformanceRecord>>,
}

impl PositionLedger {
    pub fn new(transaction_cost: f64, max_pairs: Option<usize>) -> Self {
        Self {
            transaction_cost,
            max_pairs,
            open: BTreeMap::new(),
            trades: Vec::new(),
            performance: BTreeMap::new(),
        }
    }

    pub fn open_positions(&self) -> &BTreeMap<Pair, PairPosition> {
        &self.open
    }

    pub fn position(&self, pair: &Pair) -> Option<&PairPosition> {
        self.open.get(pair)
    }

    pub fn trades(&self) -> &[TradeRecord] {
        &self.trades
    }

    pub fn performance(&self) -> &BTreeMap<Pair, Vec<PairPerformanceRecord>> {
        &self.performance
    }

    /// Entry validation: positive size, below the open-pair cap, and both
    /// legs present in the return universe. A pair already open does not
    /// refresh; it is simply rejected by the caller's FLAT check, and the
    /// cap only rejects new entries.
    pub fn validate_entry(&self, pair: &Pair, quantity: f64, returns: &PriceTable) -> bool {
        if quantity <= 0.0 {
            return false;
        }
        if let Some(cap) = self.max_pairs {
            if self.open.len() >= cap {
                debug!(pair = %pair, cap, "max open pairs reached, rejecting entry");
                return false;
            }
        }
        returns.has_symbol(pair.first()) && returns.has_symbol(pair.second())
    }

    /// FLAT → OPEN. Returns the updated portfolio value.
    ///
    /// Charges `notional * transaction_cost` and debits notional plus cost.
    /// If the position plus cost exceeds available capital the open is a
    /// logged no-op and the portfolio is returned unchanged.
    #[allow(clippy::too_many_arguments)]
    pub fn open_position(
        &mut self,
        pair: &Pair,
        signal: f64,
        quantity: f64,
        portfolio_value: f64,
        date: NaiveDate,
        price1: f64,
        price2: f64,
        confidence: f64,
        feature_snapshot: BTreeMap<String, f64>,
    ) -> f64 {
        let side = match SpreadSide::from_signal(signal) {
            Some(side) => side,
            None => return portfolio_value,
        };
        if self.open.contains_key(pair) {
            return portfolio_value;
        }

        let position_value = quantity.abs() * (price1 + price2);
        let total_cost = position_value * self.transaction_cost;
        if position_value + total_cost > portfolio_value {
            warn!(
                pair = %pair,
                position_value,
                total_cost,
                portfolio_value,
                "insufficient capital for position, skipping entry"
            );
            return portfolio_value;
        }

        self.open.insert(
            pair.clone(),
            PairPosition {
                pair: pair.clone(),
                side,
                quantity: quantity.abs(),
                entry_date: date,
                entry_price1: price1,
                entry_price2: price2,
                confidence,
                feature_snapshot,
                entry_cost: total_cost,
            },
        );

        self.trades.push(TradeRecord {
            date,
            pair: pair.clone(),
            action: TradeAction::Entry,
            quantity: quantity.abs() * side.sign(),
            price1,
            price2,
            cost: total_cost,
            confidence,
            pnl: None,
            reason: None,
        });

        portfolio_value - total_cost - position_value
    }

    /// OPEN → FLAT. Returns the updated portfolio value.
    ///
    /// `pnl = quantity * sign * (exit_spread - entry_spread) - entry_cost
    /// - exit_cost`. Closing an unknown pair is a no-op.
    pub fn close_position(
        &mut self,
        pair: &Pair,
        portfolio_value: f64,
        date: NaiveDate,
        price1: f64,
        price2: f64,
        reason: &str,
    ) -> f64 {
        let position = match self.open.remove(pair) {
            Some(p) => p,
            None => return portfolio_value,
        };

        let entry_spread = position.entry_spread();
        let exit_spread = price1 - price2;
        let spread_pnl = position.quantity * position.side.sign() * (exit_spread - entry_spread);

        let exit_value = position.quantity * (price1 + price2);
        let exit_cost = exit_value * self.transaction_cost;
        let total_pnl = spread_pnl - position.entry_cost - exit_cost;

        self.trades.push(TradeRecord {
            date,
            pair: pair.clone(),
            action: TradeAction::Exit,
            quantity: -position.quantity * position.side.sign(),
            price1,
            price2,
            cost: exit_cost,
            confidence: position.confidence,
            pnl: Some(total_pnl),
            reason: Some(reason.to_string()),
        });

        self.performance.entry(pair.clone()).or_default().push(
            PairPerformanceRecord {
                entry_date: position.entry_date,
                exit_date: date,
                holding_period_days: (date - position.entry_date).num_days(),
                pnl: total_pnl,
                return_pct: if exit_value != 0.0 {
                    total_pnl / exit_value
                } else {
                    0.0
                },
                confidence: position.confidence,
                exit_reason: reason.to_string(),
            },
        );

        portfolio_value + total_pnl
    }

    /// Tear down into (trades, performance, still-open positions).
    pub fn into_parts(
        self,
    ) -> (
        Vec<TradeRecord>,
        BTreeMap<Pair, Vec<PairPerformanceRecord>>,
        BTreeMap<Pair, PairPosition>,
    ) {
        (self.trades, self.performance, self.open)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> Pair {
        Pair::new("A", "B").unwrap()
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn returns_table() -> PriceTable {
        let index = (0..3).map(|i| date(2) + chrono::Duration::days(i)).collect();
        PriceTable::build(
            index,
            vec![
                ("A".into(), vec![1.0, 2.0, 3.0]),
                ("B".into(), vec![4.0, 5.0, 6.0]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn open_debits_notional_and_cost() {
        let mut ledger = PositionLedger::new(0.001, None);
        let after = ledger.open_position(
            &pair(),
            1.0,
            10.0,
            100_000.0,
            date(3),
            101.0,
            100.0,
            1.0,
            BTreeMap::new(),
        );
        // 100000 - 2.01 - 2010
        assert!((after - 97_987.99).abs() < 1e-6);
        assert_eq!(ledger.open_positions().len(), 1);
        assert_eq!(ledger.trades().len(), 1);
        let entry = &ledger.trades()[0];
        assert_eq!(entry.action, TradeAction::Entry);
        assert!((entry.quantity - 10.0).abs() < 1e-12);
        assert!((entry.cost - 2.01).abs() < 1e-9);
    }

    #[test]
    fn close_realizes_spread_pnl_net_of_costs() {
        let mut ledger = PositionLedger::new(0.001, None);
        let after_open = ledger.open_position(
            &pair(),
            1.0,
            10.0,
            100_000.0,
            date(3),
            101.0,
            100.0,
            1.0,
            BTreeMap::new(),
        );
        let after_close =
            ledger.close_position(&pair(), after_open, date(5), 103.0, 101.0, "Signal change");

        // spread pnl = 10 * 1 * (2 - 1) = 10; exit cost = 2.04; pnl = 5.95
        assert!((after_close - (after_open + 5.95)).abs() < 1e-6);
        assert!(ledger.open_positions().is_empty());

        let exit = ledger.trades().last().unwrap();
        assert_eq!(exit.action, TradeAction::Exit);
        assert!((exit.pnl.unwrap() - 5.95).abs() < 1e-9);
        assert_eq!(exit.reason.as_deref(), Some("Signal change"));
        assert!((exit.quantity + 10.0).abs() < 1e-12);

        let perf = &ledger.performance()[&pair()][0];
        assert_eq!(perf.holding_period_days, 2);
        assert!((perf.return_pct - 5.95 / 2040.0).abs() < 1e-12);
    }

    #[test]
    fn short_side_flips_pnl_sign() {
        let mut ledger = PositionLedger::new(0.0, None);
        let after_open = ledger.open_position(
            &pair(),
            -1.0,
            10.0,
            100_000.0,
            date(3),
            101.0,
            100.0,
            1.0,
            BTreeMap::new(),
        );
        let after_close =
            ledger.close_position(&pair(), after_open, date(4), 103.0, 101.0, "Signal change");
        // Short the spread, spread widened by 1 → pnl = -10.
        assert!((after_close - (after_open - 10.0)).abs() < 1e-9);
    }

    #[test]
    fn insufficient_capital_is_a_noop() {
        let mut ledger = PositionLedger::new(0.001, None);
        let after = ledger.open_position(
            &pair(),
            1.0,
            10.0,
            1_000.0, // notional 2010 > 1000
            date(3),
            101.0,
            100.0,
            1.0,
            BTreeMap::new(),
        );
        assert_eq!(after, 1_000.0);
        assert!(ledger.open_positions().is_empty());
        assert!(ledger.trades().is_empty());
    }

    #[test]
    fn zero_signal_never_opens() {
        let mut ledger = PositionLedger::new(0.001, None);
        let after = ledger.open_position(
            &pair(),
            0.0,
            10.0,
            100_000.0,
            date(3),
            101.0,
            100.0,
            1.0,
            BTreeMap::new(),
        );
        assert_eq!(after, 100_000.0);
        assert!(ledger.open_positions().is_empty());
    }

    #[test]
    fn close_unknown_pair_is_a_noop() {
        let mut ledger = PositionLedger::new(0.001, None);
        let after = ledger.close_position(&pair(), 5_000.0, date(3), 1.0, 2.0, "whatever");
        assert_eq!(after, 5_000.0);
        assert!(ledger.trades().is_empty());
    }

    #[test]
    fn validate_entry_rules() {
        let returns = returns_table();
        let mut ledger = PositionLedger::new(0.001, Some(1));

        assert!(ledger.validate_entry(&pair(), 10.0, &returns));
        assert!(!ledger.validate_entry(&pair(), 0.0, &returns));
        assert!(!ledger.validate_entry(&pair(), -5.0, &returns));
        assert!(!ledger.validate_entry(&Pair::new("A", "Z").unwrap(), 10.0, &returns));

        // Fill the single slot; further entries are rejected.
        ledger.open_position(
            &pair(),
            1.0,
            1.0,
            100_000.0,
            date(3),
            101.0,
            100.0,
            1.0,
            BTreeMap::new(),
        );
        assert!(!ledger.validate_entry(&Pair::new("A", "C").unwrap(), 10.0, &returns));
    }

    #[test]
    fn reopen_after_close_records_two_round_trips() {
        let mut ledger = PositionLedger::new(0.0, None);
        let mut value = 100_000.0;
        value = ledger.open_position(
            &pair(), 1.0, 5.0, value, date(3), 100.0, 99.0, 1.0, BTreeMap::new(),
        );
        value = ledger.close_position(&pair(), value, date(4), 101.0, 99.0, "Signal change");
        value = ledger.open_position(
            &pair(), -1.0, 5.0, value, date(4), 101.0, 99.0, 1.0, BTreeMap::new(),
        );
        ledger.close_position(&pair(), value, date(5), 101.0, 100.0, "Signal change");

        assert_eq!(ledger.trades().len(), 4);
        assert_eq!(ledger.performance()[&pair()].len(), 2);
        // First trip long: spread 1 → 2, +5. Second trip short: spread 2 → 1, +5.
        assert!((ledger.performance()[&pair()][0].pnl - 5.0).abs() < 1e-9);
        assert!((ledger.performance()[&pair()][1].pnl - 5.0).abs() < 1e-9);
    }
}
