//! Per-trade performance records, one per closed position.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Summary of one completed round trip, keyed by pair in the ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairPerformanceRecord {
    pub entry_date: NaiveDate,
    pub exit_date: NaiveDate,
    pub holding_period_days: i64,
    pub pnl: f64,
    /// PnL over exit notional.
    pub return_pct: f64,
    pub confidence: f64,
    pub exit_reason: String,
}

impl PairPerformanceRecord {
    pub fn is_winner(&self) -> bool {
        self.pnl > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn holding_period_from_dates() {
        let entry = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        let exit = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let record = PairPerformanceRecord {
            entry_date: entry,
            exit_date: exit,
            holding_period_days: (exit - entry).num_days(),
            pnl: 5.95,
            return_pct: 5.95 / 2040.0,
            confidence: 1.0,
            exit_reason: "Signal change".to_string(),
        };
        assert_eq!(record.holding_period_days, 2);
        assert!(record.is_winner());
    }
}
