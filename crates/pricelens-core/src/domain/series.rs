use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Symbol, UtcDateTime};

/// One sampled OHLC bar for one ticker, immutable once received.
///
/// The backend omits or nulls price fields it has no sample for; a missing
/// `close` becomes a gap in the rendered line rather than being dropped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: UtcDateTime,
    #[serde(default)]
    pub open: Option<f64>,
    #[serde(default)]
    pub high: Option<f64>,
    #[serde(default)]
    pub low: Option<f64>,
    #[serde(default)]
    pub close: Option<f64>,
}

impl SeriesPoint {
    pub fn new(date: UtcDateTime, close: f64) -> Self {
        Self {
            date,
            open: None,
            high: None,
            low: None,
            close: Some(close),
        }
    }

    pub fn with_range(mut self, high: f64, low: f64) -> Self {
        self.high = Some(high);
        self.low = Some(low);
        self
    }

    /// Close price, treating NaN/infinite wire values the same as absent.
    pub fn close_value(&self) -> Option<f64> {
        self.close.filter(|value| value.is_finite())
    }

    pub fn high_value(&self) -> Option<f64> {
        self.high.filter(|value| value.is_finite())
    }

    pub fn low_value(&self) -> Option<f64> {
        self.low.filter(|value| value.is_finite())
    }
}

/// Date-ordered sequence of points for one ticker. Source order is not
/// guaranteed; consumers sort ascending before use.
pub type TickerSeries = Vec<SeriesPoint>;

/// Sort points ascending by date. Stable, so re-sorting sorted input is a
/// no-op.
pub fn sort_by_date(points: &mut [SeriesPoint]) {
    points.sort_by(|a, b| a.date.cmp(&b.date));
}

/// Mapping from ticker symbol to its time series for one fetch.
///
/// A bundle is created fresh per fetch and replaced whole, never merged.
/// Tickers the backend has no data for map to an empty series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeriesBundle(BTreeMap<String, TickerSeries>);

impl SeriesBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, symbol: &Symbol, series: TickerSeries) {
        self.0.insert(symbol.as_str().to_owned(), series);
    }

    /// The series for a ticker; absent tickers read as empty.
    pub fn series(&self, symbol: &Symbol) -> &[SeriesPoint] {
        self.0
            .get(symbol.as_str())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The ticker's points sorted ascending by date.
    pub fn sorted_series(&self, symbol: &Symbol) -> TickerSeries {
        let mut points = self.series(symbol).to_vec();
        sort_by_date(&mut points);
        points
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn tickers(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}
