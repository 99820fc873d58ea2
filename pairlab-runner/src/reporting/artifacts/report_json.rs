//! Report and full-result JSON export.

use crate::report::BacktestReport;
use crate::result::BacktestResult;
use anyhow::{Context, Result};
use std::path::Path;

pub fn write_report_json(path: &Path, report: &BacktestReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("failed to serialize report")?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write report JSON {}", path.display()))?;
    Ok(())
}

pub fn write_result_json(path: &Path, result: &BacktestResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result).context("failed to serialize result")?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write result JSON {}", path.display()))?;
    Ok(())
}
