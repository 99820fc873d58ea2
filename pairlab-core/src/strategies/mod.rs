//! Bundled strategies: scripted playback for harnesses, spread z-score as
//! the reference pairs strategy.

pub mod scripted;
pub mod zscore;

pub use scripted::{ScriptedShape, ScriptedSignals};
pub use zscore::SpreadZScore;
