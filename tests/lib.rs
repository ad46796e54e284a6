// Shared exports for the behavior test suites.
pub use pricelens_core::{
    chart_series, sort_by_date, summarize, ChartData, FetchError, FetchErrorKind, FetchRequest,
    FetchStatus, HttpClient, HttpError, HttpRequest, HttpResponse, SeriesBundle, SeriesFeed,
    SeriesPoint, StaticSession, StockDataClient, Symbol, Timeframe, UtcDateTime,
};
pub use std::sync::Arc;
