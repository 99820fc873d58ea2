//! Price data: normalized price table, returns, correlation, CSV ingest.

pub mod correlation;
pub mod ingest;
pub mod price_table;

pub use correlation::CorrelationMatrix;
pub use ingest::read_wide_csv;
pub use price_table::PriceTable;

/// Errors raised while constructing or ingesting price data.
///
/// All of these are fatal: they fire at construction/entry points, before the
/// backtest loop starts.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("price table input is empty")]
    EmptyInput,

    #[error("price table needs at least 2 symbols, got {0}")]
    TooFewSymbols(usize),

    #[error("duplicate symbol column {0:?}")]
    DuplicateSymbol(String),

    #[error("column {symbol:?} has {len} rows, index has {expected}")]
    LengthMismatch {
        symbol: String,
        len: usize,
        expected: usize,
    },

    #[error("time index must be strictly increasing (violation at row {0})")]
    UnsortedIndex(usize),

    #[error("column {0:?} has no valid observations")]
    NoValidData(String),

    #[error("failed to read {path}: {detail}")]
    IngestFailed { path: String, detail: String },

    #[error("bad date {value:?} at row {row}: {detail}")]
    BadDate {
        value: String,
        row: usize,
        detail: String,
    },
}
