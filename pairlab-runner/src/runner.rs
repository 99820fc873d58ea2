//! Run orchestration: config + prices in, serializable result out.

use crate::config::RunConfig;
use crate::report::ReportBuilder;
use crate::result::BacktestResult;
use anyhow::{Context, Result};
use pairlab_core::data::PriceTable;
use pairlab_core::engine::{BacktestEngine, RiskManager};
use tracing::info;

/// Execute one backtest described by `config` over `prices`.
///
/// Construction failures (bad pairs, unreadable config) are fatal here;
/// everything inside the run itself is contained by the engine.
pub fn run_single_backtest(config: &RunConfig, prices: PriceTable) -> Result<BacktestResult> {
    run_single_backtest_with(config, prices, None)
}

/// Same, with an optional real risk manager replacing the fixed-fraction
/// default.
pub fn run_single_backtest_with(
    config: &RunConfig,
    prices: PriceTable,
    risk_manager: Option<Box<dyn RiskManager>>,
) -> Result<BacktestResult> {
    let run_id = config.run_id();
    info!(run_id = %run_id, symbols = prices.symbols().len(), "running backtest");

    let strategy = config
        .build_strategy()
        .context("failed to build strategy from config")?;

    let mut engine = BacktestEngine::new(config.engine_config(), prices, strategy);
    if let Some(manager) = risk_manager {
        engine = engine.with_risk_manager(manager);
    }
    let run = engine.run();

    let report = ReportBuilder::build(&run);
    Ok(BacktestResult::from_run(run_id, &run, report))
}
