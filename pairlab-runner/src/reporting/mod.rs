//! Artifact export for finished runs.

pub mod artifacts;

pub use artifacts::{ArtifactManager, ArtifactPaths};

use crate::result::BacktestResult;
use anyhow::Result;
use std::path::Path;

/// Persist all artifacts for a run under `output_dir/<run_id>/`.
pub fn export_run(output_dir: impl AsRef<Path>, result: &BacktestResult) -> Result<ArtifactPaths> {
    ArtifactManager::new(output_dir)?.save_run(result)
}
