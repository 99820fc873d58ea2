//! Scripted signal playback.
//!
//! Replays fixed per-pair signal series, emitting whichever raw shape the
//! caller asks for. This is the harness strategy used by deterministic
//! scenario tests and benches; it never predicts from features.

use crate::data::PriceTable;
use crate::domain::{Pair, RawSignals, SignalRow};
use crate::engine::StepError;
use crate::strategy::Strategy;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptedShape {
    Wide,
    Long,
    Mapped,
}

#[derive(Debug, Clone)]
pub struct ScriptedSignals {
    series: BTreeMap<Pair, Vec<f64>>,
    shape: ScriptedShape,
    max_position_size: f64,
    confidence: Option<f64>,
}

impl ScriptedSignals {
    pub fn new(series: BTreeMap<Pair, Vec<f64>>, shape: ScriptedShape) -> Self {
        Self {
            series,
            shape,
            max_position_size: 0.1,
            confidence: None,
        }
    }

    pub fn with_max_position_size(mut self, fraction: f64) -> Self {
        self.max_position_size = fraction;
        self
    }

    /// Per-row confidence for the long shape. Other shapes ignore this.
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }
}

impl Strategy for ScriptedSignals {
    fn pairs(&self) -> Vec<Pair> {
        self.series.keys().cloned().collect()
    }

    fn max_position_size(&self) -> f64 {
        self.max_position_size
    }

    fn generate_signals(&self, _prices: &PriceTable, step: usize) -> Result<RawSignals, StepError> {
        match self.shape {
            ScriptedShape::Wide => Ok(RawSignals::Wide(self.series.clone())),
            ScriptedShape::Mapped => Ok(RawSignals::Mapped(self.series.clone())),
            ScriptedShape::Long => {
                let rows = self
                    .series
                    .iter()
                    .filter_map(|(pair, values)| {
                        values.get(step).map(|&v| SignalRow {
                            pair: pair.label(),
                            predicted_signal: v,
                            confidence: self.confidence,
                        })
                    })
                    .collect();
                Ok(RawSignals::Long(rows))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series() -> BTreeMap<Pair, Vec<f64>> {
        let mut map = BTreeMap::new();
        map.insert(Pair::new("A", "B").unwrap(), vec![0.0, 1.0, -1.0]);
        map
    }

    #[test]
    fn emits_requested_shape() {
        let prices = {
            let base = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
            PriceTable::build(
                (0..3).map(|i| base + chrono::Duration::days(i)).collect(),
                vec![
                    ("A".into(), vec![1.0, 2.0, 3.0]),
                    ("B".into(), vec![1.0, 2.0, 3.0]),
                ],
            )
            .unwrap()
        };

        let wide = ScriptedSignals::new(series(), ScriptedShape::Wide);
        assert!(matches!(
            wide.generate_signals(&prices, 1).unwrap(),
            RawSignals::Wide(_)
        ));

        let long = ScriptedSignals::new(series(), ScriptedShape::Long).with_confidence(0.8);
        match long.generate_signals(&prices, 1).unwrap() {
            RawSignals::Long(rows) => {
                assert_eq!(rows.len(), 1);
                assert_eq!(rows[0].pair, "A/B");
                assert_eq!(rows[0].predicted_signal, 1.0);
                assert_eq!(rows[0].confidence, Some(0.8));
            }
            other => panic!("expected long shape, got {other:?}"),
        }

        let mapped = ScriptedSignals::new(series(), ScriptedShape::Mapped);
        assert!(matches!(
            mapped.generate_signals(&prices, 1).unwrap(),
            RawSignals::Mapped(_)
        ));
    }

    #[test]
    fn universe_is_scripted_pairs() {
        let strategy = ScriptedSignals::new(series(), ScriptedShape::Mapped);
        assert_eq!(strategy.pairs(), vec![Pair::new("A", "B").unwrap()]);
    }
}
