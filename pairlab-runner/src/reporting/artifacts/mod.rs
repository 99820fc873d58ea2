//! Artifact manager for persisting run outputs.
//!
//! Layout per run: `<output_dir>/<run_id>/{report.json, result.json,
//! equity.csv, equity.parquet, trades.csv, trades.json}`. Directory creation
//! is this module's concern, not the caller's.

mod equity;
mod report_json;
mod trades;

use crate::result::BacktestResult;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Artifact paths returned after export.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub report_json: PathBuf,
    pub result_json: PathBuf,
    pub equity_csv: PathBuf,
    pub equity_parquet: PathBuf,
    pub trades_csv: PathBuf,
    pub trades_json: PathBuf,
}

/// Manages writing all artifacts for a run.
#[derive(Debug, Clone)]
pub struct ArtifactManager {
    output_dir: PathBuf,
}

impl ArtifactManager {
    pub fn new(output_dir: impl AsRef<Path>) -> Result<Self> {
        let output_dir = output_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&output_dir)
            .context("failed to create artifact output directory")?;
        Ok(Self { output_dir })
    }

    /// Save complete run artifacts.
    pub fn save_run(&self, result: &BacktestResult) -> Result<ArtifactPaths> {
        let run_dir = self.output_dir.join(&result.run_id);
        std::fs::create_dir_all(&run_dir).context("failed to create run artifact directory")?;

        let report_json = run_dir.join("report.json");
        let result_json = run_dir.join("result.json");
        report_json::write_report_json(&report_json, &result.report)?;
        report_json::write_result_json(&result_json, result)?;

        let equity_csv = run_dir.join("equity.csv");
        let equity_parquet = run_dir.join("equity.parquet");
        equity::write_equity_csv(&equity_csv, &result.equity_curve)?;
        equity::write_equity_parquet(&equity_parquet, &result.equity_curve)?;

        let trades_csv = run_dir.join("trades.csv");
        let trades_json = run_dir.join("trades.json");
        trades::write_trades_csv(&trades_csv, &result.trades)?;
        trades::write_trades_json(&trades_json, &result.trades)?;

        Ok(ArtifactPaths {
            report_json,
            result_json,
            equity_csv,
            equity_parquet,
            trades_csv,
            trades_json,
        })
    }
}
