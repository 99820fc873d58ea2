//! Strategy collaborator interface.

use crate::data::PriceTable;
use crate::domain::{Pair, RawSignals};
use crate::engine::StepError;
use crate::features::FeatureFrame;

/// Produces trading signals from price history or engineered features.
///
/// Strategies see the full price table plus the current step index and must
/// not read past `step` — the engine has no other lookahead guard.
pub trait Strategy {
    /// Pair universe this strategy trades. Used to filter long-shape signals.
    fn pairs(&self) -> Vec<Pair>;

    /// Fraction of portfolio value used by the fallback fixed-fraction sizer
    /// when no real risk manager is attached.
    fn max_position_size(&self) -> f64 {
        0.1
    }

    /// Signals from raw price history up to and including `step`.
    fn generate_signals(&self, prices: &PriceTable, step: usize) -> Result<RawSignals, StepError>;

    /// Feature-driven signals. The engine prefers this path and falls back
    /// to [`Strategy::generate_signals`] when it returns `None`; the default
    /// does not predict.
    fn predict_signals(
        &self,
        _features: &FeatureFrame,
        _step: usize,
    ) -> Option<Result<RawSignals, StepError>> {
        None
    }
}
