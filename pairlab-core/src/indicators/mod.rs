//! Indicator math over plain `f64` series.
//!
//! These are the numeric kernels behind the feature engineer. Each function
//! mirrors the rolling/ewm semantics of the reference implementations:
//! values before `min_periods` observations are NaN, windows expand from
//! `min_periods` up to the full window size, and exponential averages use the
//! unadjusted recursive form.

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;
pub mod volume;
pub mod wma;

pub use bollinger::{bollinger_bands, BollingerBands};
pub use ema::ema;
pub use macd::{macd, Macd};
pub use rsi::{rsi_cutler, rsi_wilder};
pub use sma::sma;
pub use volume::{on_balance_volume, volume_price_trend};
pub use wma::wma;
