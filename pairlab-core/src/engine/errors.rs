//! Per-step error type.
//!
//! Anything that goes wrong inside one timestep is folded into `StepError`,
//! caught by the loop, logged, and contained: the step's equity carries the
//! prior value forward and the run continues.

#[derive(Debug, thiserror::Error)]
pub enum StepError {
    #[error("signal generation failed: {0}")]
    Signal(String),

    #[error("missing price for {symbol:?} at step {step}")]
    MissingPrice { symbol: String, step: usize },

    #[error("{0}")]
    Other(String),
}
