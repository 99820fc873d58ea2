//! Signal types: raw strategy output shapes and the normalized per-pair form.

use super::pair::Pair;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Direction of an open spread position.
///
/// Long-the-spread profits when `price1 - price2` widens; short profits when
/// it narrows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpreadSide {
    Long,
    Short,
}

impl SpreadSide {
    /// Classify a raw signal value. Zero means flat and carries no side.
    pub fn from_signal(value: f64) -> Option<Self> {
        if value > 0.0 {
            Some(SpreadSide::Long)
        } else if value < 0.0 {
            Some(SpreadSide::Short)
        } else {
            None
        }
    }

    pub fn sign(&self) -> f64 {
        match self {
            SpreadSide::Long => 1.0,
            SpreadSide::Short => -1.0,
        }
    }
}

/// Normalized per-pair instruction for one timestep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PairSignal {
    /// Positive = long the spread, negative = short, zero = flat.
    pub value: f64,
    /// Model confidence in [0, 1]. Defaults to 1.0 when the source shape
    /// carries none.
    pub confidence: f64,
}

/// One row of the long signal shape: the strategy publishes a table with a
/// `predicted_signal` column keyed by pair label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalRow {
    /// `"A/B"` label matching [`Pair::label`].
    pub pair: String,
    pub predicted_signal: f64,
    /// Per-row confidence; absent means 1.0.
    pub confidence: Option<f64>,
}

/// The three raw signal shapes strategies are allowed to emit.
///
/// The normalizer resolves the variant exactly once per step; the rest of the
/// engine only ever sees the canonical `BTreeMap<Pair, PairSignal>` form.
#[derive(Debug, Clone)]
pub enum RawSignals {
    /// Wide table: one series per pair, aligned to the price index.
    /// Confidence comes from the feature frame's `confidence` column.
    Wide(BTreeMap<Pair, Vec<f64>>),
    /// Long table with a `predicted_signal` column, filtered against the
    /// strategy's pair universe. The last row per pair wins.
    Long(Vec<SignalRow>),
    /// Mapping of pair to a per-time series. Confidence is fixed at 1.0.
    Mapped(BTreeMap<Pair, Vec<f64>>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_from_signal() {
        assert_eq!(SpreadSide::from_signal(0.7), Some(SpreadSide::Long));
        assert_eq!(SpreadSide::from_signal(-2.0), Some(SpreadSide::Short));
        assert_eq!(SpreadSide::from_signal(0.0), None);
    }

    #[test]
    fn signs() {
        assert_eq!(SpreadSide::Long.sign(), 1.0);
        assert_eq!(SpreadSide::Short.sign(), -1.0);
    }
}
