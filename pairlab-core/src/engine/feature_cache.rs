//! Throttled feature recomputation.
//!
//! Recomputing indicators on every step dominates the loop's cost, so the
//! cache refreshes only on steps that are multiples of the refresh interval
//! and serves the last snapshot in between. Stale features between refreshes
//! are the accepted price of throughput; do not "fix" this by refreshing
//! per step. Before the first refresh the snapshot is an empty frame.

use crate::data::PriceTable;
use crate::features::{FeatureEngineer, FeatureFrame, FeatureKind};
use tracing::warn;

pub struct FeatureCache {
    engineer: Box<dyn FeatureEngineer>,
    selected: Option<Vec<FeatureKind>>,
    refresh_interval: usize,
    snapshot: FeatureFrame,
}

impl FeatureCache {
    pub fn new(engineer: Box<dyn FeatureEngineer>, refresh_interval: usize) -> Self {
        Self {
            engineer,
            selected: None,
            refresh_interval: refresh_interval.max(1),
            snapshot: FeatureFrame::empty(),
        }
    }

    /// Restrict recomputation to a fixed indicator selection.
    pub fn with_selection(mut self, selected: Vec<FeatureKind>) -> Self {
        self.selected = Some(selected);
        self
    }

    /// Features as of `step`.
    ///
    /// On a refresh step the engineer runs over the history up to `step`; on
    /// failure the raw price slice is served instead (and cached), with a
    /// warning — a bad feature pass never aborts the run.
    pub fn features(&mut self, prices: &PriceTable, step: usize) -> &FeatureFrame {
        if step % self.refresh_interval == 0 {
            let history = prices.slice_to(step);
            match self
                .engineer
                .generate_features(&history, self.selected.as_deref())
            {
                Ok(frame) => self.snapshot = frame,
                Err(e) => {
                    warn!(step, error = %e, "feature generation failed, serving raw prices");
                    self.snapshot = FeatureFrame::from_prices(&history);
                }
            }
        }
        &self.snapshot
    }
}
