//! Core contracts for pricelens.
//!
//! This crate contains:
//! - Canonical domain models and validation
//! - The stock data client with retry and latest-wins refresh
//! - Chart series derivation and summary aggregation
//! - HTTP transport and session abstractions

pub mod domain;
pub mod error;
pub mod fetcher;
pub mod http_client;
pub mod retry;
pub mod session;
pub mod summary;
pub mod transform;

pub use domain::{
    sort_by_date, DateRange, SeriesBundle, SeriesPoint, Symbol, TickerSeries, Timeframe,
    UtcDateTime,
};
pub use error::ValidationError;
pub use fetcher::{
    FetchError, FetchErrorKind, FetchRequest, FetchStatus, SeriesFeed, StockDataClient,
};
pub use http_client::{
    HttpClient, HttpError, HttpRequest, HttpResponse, NoopHttpClient, ReqwestHttpClient,
    DEFAULT_TIMEOUT_MS,
};
pub use retry::{Backoff, RetryPolicy};
pub use session::{NoSession, SessionProvider, SharedSession, StaticSession};
pub use summary::{summarize, SummaryMetrics, SummaryRow};
pub use transform::{chart_series, ChartData, ChartPoint, ChartSeries};
