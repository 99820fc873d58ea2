//! Serializable run configuration.

use pairlab_core::domain::Pair;
use pairlab_core::engine::EngineConfig;
use pairlab_core::strategies::SpreadZScore;
use pairlab_core::strategy::Strategy;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Unique identifier for a backtest run (content-addressable hash).
pub type RunId = String;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("bad pair in config: {0}")]
    BadPair(#[from] pairlab_core::domain::PairError),
}

/// Everything needed to reproduce a run: engine parameters plus the strategy.
///
/// Two identical configs hash to the same `RunId`, which names the artifact
/// directory and makes reruns trivially comparable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default = "default_initial_capital")]
    pub initial_capital: f64,

    #[serde(default = "default_transaction_cost")]
    pub transaction_cost: f64,

    #[serde(default)]
    pub max_pairs: Option<usize>,

    #[serde(default = "default_refresh_interval")]
    pub feature_refresh_interval: usize,

    pub strategy: StrategyConfig,
}

fn default_initial_capital() -> f64 {
    100_000.0
}

fn default_transaction_cost() -> f64 {
    0.001
}

fn default_refresh_interval() -> usize {
    20
}

/// Strategy configuration (serializable enum).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StrategyConfig {
    /// Rolling z-score of the pair spread with entry/exit bands.
    SpreadZscore {
        /// Symbol pairs, order-insensitive.
        pairs: Vec<[String; 2]>,
        window: usize,
        entry_z: f64,
        exit_z: f64,
        max_position_size: f64,
    },
}

impl RunConfig {
    /// Deterministic content hash of this configuration.
    ///
    /// Enables artifact lookups: identical configs share a `RunId`.
    pub fn run_id(&self) -> RunId {
        let json = serde_json::to_string(self).expect("RunConfig serialization failed");
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn engine_config(&self) -> EngineConfig {
        let mut config = EngineConfig::new(self.initial_capital)
            .with_transaction_cost(self.transaction_cost)
            .with_feature_refresh_interval(self.feature_refresh_interval);
        if let Some(cap) = self.max_pairs {
            config = config.with_max_pairs(cap);
        }
        config
    }

    pub fn build_strategy(&self) -> Result<Box<dyn Strategy>, ConfigError> {
        match &self.strategy {
            StrategyConfig::SpreadZscore {
                pairs,
                window,
                entry_z,
                exit_z,
                max_position_size,
            } => {
                let pairs = pairs
                    .iter()
                    .map(|[a, b]| Pair::new(a.clone(), b.clone()))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Box::new(
                    SpreadZScore::new(pairs, *window)
                        .with_thresholds(*entry_z, *exit_z)
                        .with_max_position_size(*max_position_size),
                ))
            }
        }
    }
}
