//! Open pair position.

use super::pair::Pair;
use super::signal::SpreadSide;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An open spread position.
///
/// Created by the ledger on entry and never mutated afterwards; closing a
/// position removes it and emits a trade record, so there is no intermediate
/// state between OPEN and FLAT.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairPosition {
    pub pair: Pair,
    pub side: SpreadSide,
    /// Always positive; direction lives in `side`.
    pub quantity: f64,
    pub entry_date: NaiveDate,
    pub entry_price1: f64,
    pub entry_price2: f64,
    /// Model confidence at entry.
    pub confidence: f64,
    /// Last feature row at entry, for post-hoc trade analysis.
    pub feature_snapshot: BTreeMap<String, f64>,
    /// Transaction cost paid at entry.
    pub entry_cost: f64,
}

impl PairPosition {
    /// Entry spread: `entry_price1 - entry_price2`.
    pub fn entry_spread(&self) -> f64 {
        self.entry_price1 - self.entry_price2
    }

    /// Notional at entry: `quantity * (entry_price1 + entry_price2)`.
    pub fn entry_notional(&self) -> f64 {
        self.quantity * (self.entry_price1 + self.entry_price2)
    }
}
