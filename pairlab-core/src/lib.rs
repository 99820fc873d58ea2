//! PairLab Core — multi-pair statistical-arbitrage backtest engine.
//!
//! This crate contains the simulation core:
//! - Domain types (pairs, signals, positions, trade and performance records)
//! - Normalized price table with forward/backward fill and derived returns
//! - Indicator kernels and the technical feature engineer
//! - Throttled feature cache
//! - Signal normalization over three raw shapes
//! - Position ledger with spread-model PnL and transaction costs
//! - Risk gate with fixed-fraction default sizing
//! - Sequential day-by-day backtest loop

pub mod data;
pub mod domain;
pub mod engine;
pub mod features;
pub mod indicators;
pub mod strategies;
pub mod strategy;
