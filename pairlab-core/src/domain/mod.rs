//! Domain types: pairs, signals, positions, trade and performance records.

pub mod pair;
pub mod performance;
pub mod position;
pub mod signal;
pub mod trade;

pub use pair::{Pair, PairError};
pub use performance::PairPerformanceRecord;
pub use position::PairPosition;
pub use signal::{PairSignal, RawSignals, SignalRow, SpreadSide};
pub use trade::{TradeAction, TradeRecord};
