//! PairLab Runner — orchestration around the core engine.
//!
//! Owns the serializable run configuration (TOML + content-addressed run
//! ids), the report builder, artifact export (JSON/CSV/Parquet), and the
//! synthetic data generator used when no price file is at hand.

pub mod config;
pub mod metrics;
pub mod report;
pub mod reporting;
pub mod result;
pub mod runner;
pub mod synthetic;

pub use config::{ConfigError, RunConfig, RunId, StrategyConfig};
pub use report::{BacktestReport, PairBreakdown, ReportBuilder};
pub use reporting::{export_run, ArtifactManager, ArtifactPaths};
pub use result::{BacktestResult, EquityPoint};
pub use runner::{run_single_backtest, run_single_backtest_with};
