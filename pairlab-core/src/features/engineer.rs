//! Technical feature generation.
//!
//! `TechnicalFeatureEngineer` computes the selected indicator families per
//! symbol, prefixes every output column with the symbol name, and skips a
//! symbol entirely (with an error log) when one of its features cannot be
//! computed. NaN heads left by warm-up windows are backfilled by default.

use super::frame::FeatureFrame;
use crate::data::PriceTable;
use crate::indicators;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

#[derive(Debug, thiserror::Error)]
pub enum FeatureError {
    #[error("empty price table")]
    EmptyInput,

    #[error("no feature columns produced")]
    NoFeatures,

    #[error("symbol {symbol:?}: {detail}")]
    SymbolFailed { symbol: String, detail: String },
}

/// Indicator families the engineer knows how to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureKind {
    Sma,
    Ema,
    Wma,
    Rsi,
    Macd,
    Bbands,
    Volume,
}

impl FeatureKind {
    /// Everything except volume, which needs a volume table.
    pub const PRICE_ONLY: [FeatureKind; 6] = [
        FeatureKind::Sma,
        FeatureKind::Ema,
        FeatureKind::Wma,
        FeatureKind::Rsi,
        FeatureKind::Macd,
        FeatureKind::Bbands,
    ];
}

/// How to treat NaN warm-up heads in computed feature columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillMethod {
    #[default]
    Backfill,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RsiMethod {
    #[default]
    Wilder,
    Cutler,
}

/// Computes a feature frame from price history.
///
/// Implementations group by symbol and prefix output columns with the symbol
/// id; per-symbol failures are tolerated by skipping that symbol.
pub trait FeatureEngineer {
    fn generate_features(
        &self,
        prices: &PriceTable,
        selected: Option<&[FeatureKind]>,
    ) -> Result<FeatureFrame, FeatureError>;
}

/// Default feature engineer: moving averages, RSI, MACD, Bollinger Bands and
/// (when a volume table is attached) volume indicators.
#[derive(Debug, Clone)]
pub struct TechnicalFeatureEngineer {
    /// Minimum observations for rolling windows; `None` uses each window size.
    pub min_periods: Option<usize>,
    pub fill_method: FillMethod,
    pub rsi_method: RsiMethod,
    pub ma_window: usize,
    pub rsi_window: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub bb_window: usize,
    pub bb_num_std: f64,
    pub volume_window: usize,
    volumes: Option<PriceTable>,
}

impl Default for TechnicalFeatureEngineer {
    fn default() -> Self {
        Self {
            min_periods: None,
            fill_method: FillMethod::Backfill,
            rsi_method: RsiMethod::Wilder,
            ma_window: 20,
            rsi_window: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            bb_window: 20,
            bb_num_std: 2.0,
            volume_window: 20,
            volumes: None,
        }
    }
}

impl TechnicalFeatureEngineer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a per-symbol volume table, enabling the volume indicators.
    pub fn with_volumes(mut self, volumes: PriceTable) -> Self {
        self.volumes = Some(volumes);
        self
    }

    fn min_periods_or(&self, window: usize) -> usize {
        self.min_periods.unwrap_or(window)
    }

    /// Compute every selected feature for one symbol, prefixed columns.
    fn symbol_features(
        &self,
        symbol: &str,
        closes: &[f64],
        step: usize,
        selected: &[FeatureKind],
    ) -> Result<Vec<(String, Vec<f64>)>, FeatureError> {
        let mut columns: Vec<(String, Vec<f64>)> = Vec::new();

        for kind in selected {
            match kind {
                FeatureKind::Sma => {
                    let values =
                        indicators::sma(closes, self.ma_window, self.min_periods_or(self.ma_window));
                    columns.push((format!("{symbol}_SIMPLE_MA_{}", self.ma_window), values));
                }
                FeatureKind::Ema => {
                    let values =
                        indicators::ema(closes, self.ma_window, self.min_periods_or(self.ma_window));
                    columns.push((format!("{symbol}_EXP_MA_{}", self.ma_window), values));
                }
                FeatureKind::Wma => {
                    let values =
                        indicators::wma(closes, self.ma_window, self.min_periods_or(self.ma_window));
                    columns.push((format!("{symbol}_WEIGHTED_MA_{}", self.ma_window), values));
                }
                FeatureKind::Rsi => {
                    let min_periods = self.min_periods_or(self.rsi_window);
                    let values = match self.rsi_method {
                        RsiMethod::Wilder => {
                            indicators::rsi_wilder(closes, self.rsi_window, min_periods)
                        }
                        RsiMethod::Cutler => {
                            indicators::rsi_cutler(closes, self.rsi_window, min_periods)
                        }
                    };
                    columns.push((format!("{symbol}_RSI"), values));
                }
                FeatureKind::Macd => {
                    let out = indicators::macd(
                        closes,
                        self.macd_fast,
                        self.macd_slow,
                        self.macd_signal,
                        self.min_periods_or(self.macd_slow),
                        self.min_periods_or(self.macd_signal),
                    );
                    columns.push((format!("{symbol}_MACD"), out.macd));
                    columns.push((format!("{symbol}_Signal_Line"), out.signal));
                    columns.push((format!("{symbol}_MACD_Histogram"), out.histogram));
                }
                FeatureKind::Bbands => {
                    let out = indicators::bollinger_bands(
                        closes,
                        self.bb_window,
                        self.bb_num_std,
                        self.min_periods_or(self.bb_window),
                    );
                    columns.push((format!("{symbol}_BB_Middle"), out.middle));
                    columns.push((format!("{symbol}_BB_Upper"), out.upper));
                    columns.push((format!("{symbol}_BB_Lower"), out.lower));
                    columns.push((format!("{symbol}_BB_Bandwidth"), out.bandwidth));
                    columns.push((format!("{symbol}_%B"), out.percent_b));
                }
                FeatureKind::Volume => {
                    let volumes = self
                        .volumes
                        .as_ref()
                        .and_then(|t| t.column(symbol))
                        .ok_or_else(|| FeatureError::SymbolFailed {
                            symbol: symbol.to_string(),
                            detail: "volume features requested but no volume series".to_string(),
                        })?;
                    let volumes = &volumes[..(step + 1).min(volumes.len())];
                    if volumes.len() != closes.len() {
                        return Err(FeatureError::SymbolFailed {
                            symbol: symbol.to_string(),
                            detail: "volume series length mismatch".to_string(),
                        });
                    }
                    let min_periods = self.min_periods_or(self.volume_window);
                    columns.push((
                        format!("{symbol}_Volume_SMA"),
                        indicators::sma(volumes, self.volume_window, min_periods),
                    ));
                    columns.push((
                        format!("{symbol}_OBV"),
                        indicators::on_balance_volume(closes, volumes),
                    ));
                    columns.push((
                        format!("{symbol}_VPT"),
                        indicators::volume_price_trend(closes, volumes),
                    ));
                }
            }
        }

        Ok(columns)
    }
}

impl FeatureEngineer for TechnicalFeatureEngineer {
    fn generate_features(
        &self,
        prices: &PriceTable,
        selected: Option<&[FeatureKind]>,
    ) -> Result<FeatureFrame, FeatureError> {
        if prices.is_empty() {
            return Err(FeatureError::EmptyInput);
        }

        let default_kinds: Vec<FeatureKind> = if self.volumes.is_some() {
            let mut kinds = FeatureKind::PRICE_ONLY.to_vec();
            kinds.push(FeatureKind::Volume);
            kinds
        } else {
            FeatureKind::PRICE_ONLY.to_vec()
        };
        let selected = selected.unwrap_or(&default_kinds);

        let step = prices.len() - 1;
        let mut frame = FeatureFrame::new(prices.index().to_vec());
        let mut skipped = 0usize;

        for symbol in prices.symbols() {
            let closes = match prices.column(symbol) {
                Some(c) => c,
                None => continue,
            };
            match self.symbol_features(symbol, closes, step, selected) {
                Ok(columns) => {
                    for (name, mut values) in columns {
                        if self.fill_method == FillMethod::Backfill {
                            backfill(&mut values);
                        }
                        frame.push_column(name, values);
                    }
                }
                Err(e) => {
                    error!(symbol = %symbol, error = %e, "feature generation failed for symbol, skipping");
                    skipped += 1;
                }
            }
        }

        if frame.is_empty() {
            return Err(FeatureError::NoFeatures);
        }
        if skipped > 0 {
            debug!(skipped, "feature frame built with skipped symbols");
        }
        Ok(frame)
    }
}

/// Replace leading/interior NaN runs with the next valid value.
fn backfill(values: &mut [f64]) {
    let mut next_valid = f64::NAN;
    for v in values.iter_mut().rev() {
        if v.is_nan() {
            *v = next_valid;
        } else {
            next_valid = *v;
        }
    }
}
