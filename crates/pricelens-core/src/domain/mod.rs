//! Canonical domain types for the pricelens pipeline.
//!
//! All types validate their invariants at construction time:
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Validated, uppercase-normalized ticker |
//! | [`Timeframe`] | Window selector (`1D` .. `MTD`, `custom`) |
//! | [`DateRange`] | Explicit start/end pair for custom windows |
//! | [`UtcDateTime`] | UTC-only bar timestamp |
//! | [`SeriesPoint`] | One OHLC sample, price fields optional |
//! | [`SeriesBundle`] | Ticker → series mapping for one fetch |

mod series;
mod symbol;
mod timeframe;
mod timestamp;

pub use series::{sort_by_date, SeriesBundle, SeriesPoint, TickerSeries};
pub use symbol::Symbol;
pub use timeframe::{DateRange, Timeframe};
pub use timestamp::UtcDateTime;
