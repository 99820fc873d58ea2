//! Append-only trade log entries.

use super::pair::Pair;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeAction {
    Entry,
    Exit,
}

/// One entry in the trade history.
///
/// Entries and exits share a record type; `pnl` and `reason` are only present
/// on exits. Records are immutable once appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeRecord {
    pub date: NaiveDate,
    pub pair: Pair,
    pub action: TradeAction,
    /// Signed: positive for long-the-spread entries, negated on exit.
    pub quantity: f64,
    pub price1: f64,
    pub price2: f64,
    /// Transaction cost charged for this leg.
    pub cost: f64,
    pub confidence: f64,
    /// Realized PnL net of both legs' transaction costs. Exit only.
    pub pnl: Option<f64>,
    /// Exit only, e.g. "Signal change".
    pub reason: Option<String>,
}

impl TradeRecord {
    pub fn is_winner(&self) -> bool {
        self.pnl.is_some_and(|p| p > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_records_never_win() {
        let record = TradeRecord {
            date: NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
            pair: Pair::new("A", "B").unwrap(),
            action: TradeAction::Entry,
            quantity: 10.0,
            price1: 101.0,
            price2: 100.0,
            cost: 2.01,
            confidence: 1.0,
            pnl: None,
            reason: None,
        };
        assert!(!record.is_winner());
    }

    #[test]
    fn serialization_roundtrip() {
        let record = TradeRecord {
            date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            pair: Pair::new("A", "B").unwrap(),
            action: TradeAction::Exit,
            quantity: -10.0,
            price1: 103.0,
            price2: 101.0,
            cost: 2.04,
            confidence: 1.0,
            pnl: Some(5.95),
            reason: Some("Signal change".to_string()),
        };
        let json = serde_json::to_string(&record).unwrap();
        let back: TradeRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.pair, record.pair);
        assert_eq!(back.pnl, record.pnl);
        assert_eq!(back.action, TradeAction::Exit);
    }
}
