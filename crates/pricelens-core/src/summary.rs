//! Per-ticker summary metrics over the active window.
//!
//! Works on raw closes rather than the normalized chart values, so the
//! table shows dollar prices while the chart shows percent change.

use serde::Serialize;
use tracing::{debug, warn};

use crate::{SeriesBundle, SeriesPoint, Symbol};

/// Price metrics for one ticker, absent entirely when the window has no
/// usable data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryMetrics {
    pub start_price: f64,
    pub end_price: f64,
    pub change: f64,
    pub percent_change: f64,
    pub high: f64,
    pub low: f64,
}

/// One summary table row. Rows come out in request order, one per
/// requested ticker, with `no_data` marking tickers the window could not
/// be summarized for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub symbol: Symbol,
    #[serde(rename = "noData")]
    pub no_data: bool,
    #[serde(flatten)]
    pub metrics: Option<SummaryMetrics>,
}

impl SummaryRow {
    fn no_data(symbol: Symbol) -> Self {
        Self {
            symbol,
            no_data: true,
            metrics: None,
        }
    }

    fn with_metrics(symbol: Symbol, metrics: SummaryMetrics) -> Self {
        Self {
            symbol,
            no_data: false,
            metrics: Some(metrics),
        }
    }
}

/// Summarize the window for each requested ticker, preserving request
/// order. Tickers with no usable data still get a row so the table shape
/// matches the request.
pub fn summarize(bundle: &SeriesBundle, tickers: &[Symbol]) -> Vec<SummaryRow> {
    tickers
        .iter()
        .map(|ticker| {
            let points = bundle.sorted_series(ticker);
            match compute_metrics(&points) {
                Some(metrics) => SummaryRow::with_metrics(ticker.clone(), metrics),
                None => {
                    if points.is_empty() {
                        debug!(ticker = %ticker, "no points in window; emitting no-data row");
                    } else {
                        warn!(
                            ticker = %ticker,
                            "window closes are unusable; emitting no-data row"
                        );
                    }
                    SummaryRow::no_data(ticker.clone())
                }
            }
        })
        .collect()
}

fn compute_metrics(points: &[SeriesPoint]) -> Option<SummaryMetrics> {
    let start_price = points.first()?.close_value().filter(|close| *close != 0.0)?;

    // Trailing bars may not have a close yet; walk back to the last one
    // that does.
    let end_price = points.iter().rev().find_map(SeriesPoint::close_value)?;

    let mut high = f64::NEG_INFINITY;
    let mut low = f64::INFINITY;
    for point in points {
        if let Some(value) = point.high_value().or_else(|| point.close_value()) {
            high = high.max(value);
        }
        if let Some(value) = point.low_value().or_else(|| point.close_value()) {
            low = low.min(value);
        }
    }

    let change = end_price - start_price;
    Some(SummaryMetrics {
        start_price,
        end_price,
        change,
        percent_change: change / start_price * 100.0,
        high,
        low,
    })
}
