//! Signal normalization.
//!
//! Strategies emit one of three raw shapes; this module resolves the shape
//! exactly once per step into the canonical `BTreeMap<Pair, PairSignal>`.
//! The BTreeMap ordering is load-bearing: capital is allocated greedily, so
//! the pair ordering decides who wins contested capital, and it must be the
//! canonical pair ordering rather than whatever order the strategy emitted.

use crate::data::PriceTable;
use crate::domain::{Pair, PairSignal, RawSignals, SignalRow};
use crate::features::FeatureFrame;
use std::collections::BTreeMap;
use tracing::debug;

/// Resolve raw signals into per-pair (value, confidence) for `step`.
///
/// Pairs referencing a symbol absent from the price table are skipped — a
/// data-integrity gap, not an error. Missing confidence defaults to 1.0.
pub fn normalize_signals(
    raw: &RawSignals,
    universe: &[Pair],
    step: usize,
    prices: &PriceTable,
    features: &FeatureFrame,
) -> BTreeMap<Pair, PairSignal> {
    match raw {
        RawSignals::Wide(series) => {
            // Frame-level confidence applies to every pair in the wide shape.
            let confidence = features.confidence().unwrap_or(1.0);
            from_series(series, step, prices, confidence)
        }
        RawSignals::Mapped(series) => from_series(series, step, prices, 1.0),
        RawSignals::Long(rows) => from_rows(rows, universe, prices),
    }
}

fn from_series(
    series: &BTreeMap<Pair, Vec<f64>>,
    step: usize,
    prices: &PriceTable,
    confidence: f64,
) -> BTreeMap<Pair, PairSignal> {
    let mut out = BTreeMap::new();
    for (pair, values) in series {
        if !symbols_present(pair, prices) {
            continue;
        }
        let value = match values.get(step) {
            Some(&v) if !v.is_nan() => v,
            _ => {
                debug!(pair = %pair, step, "signal series has no value at step, skipping");
                continue;
            }
        };
        out.insert(pair.clone(), PairSignal { value, confidence });
    }
    out
}

fn from_rows(
    rows: &[SignalRow],
    universe: &[Pair],
    prices: &PriceTable,
) -> BTreeMap<Pair, PairSignal> {
    let mut out = BTreeMap::new();
    for pair in universe {
        if !symbols_present(pair, prices) {
            continue;
        }
        let label = pair.label();
        // Latest row per pair wins.
        if let Some(row) = rows.iter().rev().find(|r| r.pair == label) {
            out.insert(
                pair.clone(),
                PairSignal {
                    value: row.predicted_signal,
                    confidence: row.confidence.unwrap_or(1.0),
                },
            );
        }
    }
    out
}

fn symbols_present(pair: &Pair, prices: &PriceTable) -> bool {
    let present = prices.has_symbol(pair.first()) && prices.has_symbol(pair.second());
    if !present {
        debug!(pair = %pair, "pair references symbol absent from price table, skipping");
    }
    present
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn prices() -> PriceTable {
        let base = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let index = (0..3).map(|i| base + chrono::Duration::days(i)).collect();
        PriceTable::build(
            index,
            vec![
                ("A".into(), vec![1.0, 2.0, 3.0]),
                ("B".into(), vec![4.0, 5.0, 6.0]),
                ("C".into(), vec![7.0, 8.0, 9.0]),
            ],
        )
        .unwrap()
    }

    fn pair(a: &str, b: &str) -> Pair {
        Pair::new(a, b).unwrap()
    }

    #[test]
    fn mapped_defaults_confidence_to_one() {
        let mut series = BTreeMap::new();
        series.insert(pair("A", "B"), vec![0.0, 1.0, -1.0]);
        let raw = RawSignals::Mapped(series);
        let out = normalize_signals(&raw, &[], 1, &prices(), &FeatureFrame::empty());
        let sig = out[&pair("A", "B")];
        assert_eq!(sig.value, 1.0);
        assert_eq!(sig.confidence, 1.0);
    }

    #[test]
    fn wide_reads_confidence_from_features() {
        let mut series = BTreeMap::new();
        series.insert(pair("A", "B"), vec![0.0, 1.0, -1.0]);
        let raw = RawSignals::Wide(series);

        let base = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let mut features = FeatureFrame::new((0..2).map(|i| base + chrono::Duration::days(i)).collect());
        features.push_column("confidence".into(), vec![0.3, 0.7]);

        let out = normalize_signals(&raw, &[], 1, &prices(), &features);
        assert_eq!(out[&pair("A", "B")].confidence, 0.7);
    }

    #[test]
    fn long_filters_to_universe_and_takes_last_row() {
        let rows = vec![
            SignalRow {
                pair: "A/B".into(),
                predicted_signal: 1.0,
                confidence: Some(0.5),
            },
            SignalRow {
                pair: "A/B".into(),
                predicted_signal: -1.0,
                confidence: Some(0.9),
            },
            SignalRow {
                pair: "A/C".into(),
                predicted_signal: 1.0,
                confidence: None,
            },
            SignalRow {
                pair: "X/Y".into(),
                predicted_signal: 1.0,
                confidence: None,
            },
        ];
        let raw = RawSignals::Long(rows);
        let universe = vec![pair("A", "B"), pair("A", "C")];
        let out = normalize_signals(&raw, &universe, 1, &prices(), &FeatureFrame::empty());

        assert_eq!(out.len(), 2);
        let ab = out[&pair("A", "B")];
        assert_eq!(ab.value, -1.0);
        assert_eq!(ab.confidence, 0.9);
        assert_eq!(out[&pair("A", "C")].confidence, 1.0);
    }

    #[test]
    fn absent_symbol_skipped() {
        let mut series = BTreeMap::new();
        series.insert(pair("A", "Z"), vec![1.0, 1.0, 1.0]);
        series.insert(pair("A", "B"), vec![1.0, 1.0, 1.0]);
        let raw = RawSignals::Mapped(series);
        let out = normalize_signals(&raw, &[], 1, &prices(), &FeatureFrame::empty());
        assert_eq!(out.len(), 1);
        assert!(out.contains_key(&pair("A", "B")));
    }

    #[test]
    fn series_too_short_skipped() {
        let mut series = BTreeMap::new();
        series.insert(pair("A", "B"), vec![1.0]);
        let raw = RawSignals::Mapped(series);
        let out = normalize_signals(&raw, &[], 2, &prices(), &FeatureFrame::empty());
        assert!(out.is_empty());
    }

    #[test]
    fn output_is_canonically_ordered() {
        let mut series = BTreeMap::new();
        series.insert(pair("B", "C"), vec![1.0, 1.0, 1.0]);
        series.insert(pair("A", "B"), vec![1.0, 1.0, 1.0]);
        series.insert(pair("A", "C"), vec![1.0, 1.0, 1.0]);
        let raw = RawSignals::Mapped(series);
        let out = normalize_signals(&raw, &[], 0, &prices(), &FeatureFrame::empty());
        let keys: Vec<String> = out.keys().map(|p| p.label()).collect();
        assert_eq!(keys, vec!["A/B", "A/C", "B/C"]);
    }
}
