use thiserror::Error;

/// Validation errors exposed by `pricelens-core` domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol must start with an ASCII letter: '{ch}'")]
    SymbolInvalidStart { ch: char },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("invalid timeframe '{value}', expected one of 1D, 1W, 1M, 3M, 1Y, YTD, MTD, custom")]
    InvalidTimeframe { value: String },
    #[error("custom timeframe requires an explicit start/end date range")]
    MissingCustomRange,
    #[error("date range start {start} is after end {end}")]
    InvertedDateRange { start: String, end: String },

    #[error("timestamp must be an RFC3339 UTC instant or calendar date: '{value}'")]
    InvalidTimestamp { value: String },
}
