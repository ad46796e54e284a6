//! Chart series derivation.
//!
//! Transforms a fetched [`SeriesBundle`] into percentage-change series
//! ready for a line chart: each ticker is normalized to its first close in
//! the active window, labels follow the timeframe's granularity, and a
//! failure in one ticker degrades that ticker alone.

use serde::Serialize;
use time::Date;
use tracing::warn;

use crate::{sort_by_date, SeriesBundle, SeriesPoint, Symbol, Timeframe};

/// One chart sample: x-axis label plus percent change since the window
/// start. `None` is a gap in the rendered line, not a dropped sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: Option<f64>,
}

/// Derived line for one ticker. An empty `points` list still renders the
/// ticker in the legend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub name: Symbol,
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    fn empty(name: Symbol) -> Self {
        Self {
            name,
            points: Vec::new(),
        }
    }
}

/// Chart-ready view over one fetched bundle.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "series")]
pub enum ChartData {
    /// Nothing was fetched at all; render a placeholder instead of axes.
    NoData,
    Series(Vec<ChartSeries>),
}

impl ChartData {
    pub const fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData)
    }

    pub fn series(&self) -> &[ChartSeries] {
        match self {
            Self::NoData => &[],
            Self::Series(series) => series,
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum TransformError {
    #[error("first close in window is missing or unusable")]
    InvalidBaseline,
}

/// Derive chart series for the requested tickers, in request order.
///
/// Sorting is idempotent, so callers may pass pre-sorted bundles. For the
/// `1D` timeframe every series is restricted to the reference ticker's most
/// recent trading session so all lines share one x-axis. A ticker whose
/// transformation fails yields an empty series and a warning; the rest of
/// the batch is unaffected.
pub fn chart_series(
    bundle: &SeriesBundle,
    tickers: &[Symbol],
    timeframe: Timeframe,
) -> ChartData {
    if bundle.is_empty() {
        return ChartData::NoData;
    }

    let session = if timeframe.is_intraday() {
        reference_session(bundle, tickers)
    } else {
        None
    };

    let series = tickers
        .iter()
        .map(|ticker| {
            build_series(bundle, ticker, timeframe, session).unwrap_or_else(|error| {
                warn!(ticker = %ticker, error = %error, "degrading ticker to empty chart series");
                ChartSeries::empty(ticker.clone())
            })
        })
        .collect();

    ChartData::Series(series)
}

/// Most recent calendar date of the reference ticker, which is the first
/// requested ticker with data. `None` when the window spans a single date,
/// in which case no filtering is needed.
fn reference_session(bundle: &SeriesBundle, tickers: &[Symbol]) -> Option<Date> {
    for ticker in tickers {
        let points = bundle.sorted_series(ticker);
        if points.is_empty() {
            continue;
        }

        let mut dates: Vec<Date> = points.iter().map(|p| p.date.calendar_date()).collect();
        dates.dedup();

        return if dates.len() > 1 { dates.last().copied() } else { None };
    }

    None
}

fn build_series(
    bundle: &SeriesBundle,
    ticker: &Symbol,
    timeframe: Timeframe,
    session: Option<Date>,
) -> Result<ChartSeries, TransformError> {
    let mut points: Vec<SeriesPoint> = bundle.series(ticker).to_vec();
    sort_by_date(&mut points);

    if let Some(day) = session {
        points.retain(|p| p.date.calendar_date() == day);
    }

    if points.is_empty() {
        return Ok(ChartSeries::empty(ticker.clone()));
    }

    // A missing or zero baseline would poison every normalized value, so
    // the whole series degrades instead.
    let baseline = points[0]
        .close_value()
        .filter(|close| *close != 0.0)
        .ok_or(TransformError::InvalidBaseline)?;

    let chart_points = points
        .iter()
        .map(|point| ChartPoint {
            label: timeframe.format_label(point.date),
            value: point
                .close_value()
                .map(|close| (close - baseline) / baseline * 100.0),
        })
        .collect();

    Ok(ChartSeries {
        name: ticker.clone(),
        points: chart_points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UtcDateTime;

    fn sym(raw: &str) -> Symbol {
        Symbol::parse(raw).expect("valid symbol")
    }

    fn point(date: &str, close: f64) -> SeriesPoint {
        SeriesPoint::new(UtcDateTime::parse(date).expect("timestamp"), close)
    }

    fn values(series: &ChartSeries) -> Vec<Option<f64>> {
        series.points.iter().map(|p| p.value).collect()
    }

    #[test]
    fn normalizes_to_percent_change_from_first_close() {
        let mut bundle = SeriesBundle::new();
        bundle.insert(
            &sym("AAPL"),
            vec![point("2024-01-01", 100.0), point("2024-01-02", 110.0)],
        );

        let data = chart_series(&bundle, &[sym("AAPL")], Timeframe::OneMonth);
        let series = data.series();
        assert_eq!(series.len(), 1);
        assert_eq!(values(&series[0]), vec![Some(0.0), Some(10.0)]);
    }

    #[test]
    fn unsorted_input_matches_presorted_output() {
        let aapl = sym("AAPL");
        let sorted = vec![
            point("2024-01-01", 100.0),
            point("2024-01-02", 105.0),
            point("2024-01-03", 95.0),
        ];
        let mut shuffled = sorted.clone();
        shuffled.swap(0, 2);

        let mut bundle_a = SeriesBundle::new();
        bundle_a.insert(&aapl, sorted);
        let mut bundle_b = SeriesBundle::new();
        bundle_b.insert(&aapl, shuffled);

        let a = chart_series(&bundle_a, &[aapl.clone()], Timeframe::OneMonth);
        let b = chart_series(&bundle_b, &[aapl], Timeframe::OneMonth);
        assert_eq!(a, b);
    }

    #[test]
    fn missing_close_becomes_gap_not_dropped_sample() {
        let aapl = sym("AAPL");
        let mut gap = point("2024-01-02", 0.0);
        gap.close = None;

        let mut bundle = SeriesBundle::new();
        bundle.insert(
            &aapl,
            vec![point("2024-01-01", 100.0), gap, point("2024-01-03", 120.0)],
        );

        let data = chart_series(&bundle, &[aapl], Timeframe::OneMonth);
        assert_eq!(
            values(&data.series()[0]),
            vec![Some(0.0), None, Some(20.0)]
        );
    }

    #[test]
    fn missing_baseline_degrades_whole_ticker_only() {
        let aapl = sym("AAPL");
        let msft = sym("MSFT");
        let mut broken = point("2024-01-01", 0.0);
        broken.close = None;

        let mut bundle = SeriesBundle::new();
        bundle.insert(&aapl, vec![broken, point("2024-01-02", 110.0)]);
        bundle.insert(
            &msft,
            vec![point("2024-01-01", 400.0), point("2024-01-02", 440.0)],
        );

        let data = chart_series(&bundle, &[aapl, msft], Timeframe::OneMonth);
        let series = data.series();
        assert!(series[0].points.is_empty());
        assert_eq!(values(&series[1]), vec![Some(0.0), Some(10.0)]);
    }

    #[test]
    fn zero_baseline_degrades_instead_of_dividing() {
        let aapl = sym("AAPL");
        let mut bundle = SeriesBundle::new();
        bundle.insert(
            &aapl,
            vec![point("2024-01-01", 0.0), point("2024-01-02", 5.0)],
        );

        let data = chart_series(&bundle, &[aapl], Timeframe::OneMonth);
        assert!(data.series()[0].points.is_empty());
    }

    #[test]
    fn empty_bundle_yields_no_data_placeholder() {
        let data = chart_series(&SeriesBundle::new(), &[sym("AAPL")], Timeframe::OneDay);
        assert!(data.is_no_data());
        assert!(data.series().is_empty());
    }

    #[test]
    fn absent_ticker_still_listed_with_empty_series() {
        let mut bundle = SeriesBundle::new();
        bundle.insert(
            &sym("AAPL"),
            vec![point("2024-01-01", 100.0), point("2024-01-02", 101.0)],
        );

        let data = chart_series(&bundle, &[sym("AAPL"), sym("TSLA")], Timeframe::OneMonth);
        let series = data.series();
        assert_eq!(series.len(), 2);
        assert_eq!(series[1].name.as_str(), "TSLA");
        assert!(series[1].points.is_empty());
    }

    #[test]
    fn intraday_aligns_all_series_to_reference_session() {
        let aapl = sym("AAPL");
        let msft = sym("MSFT");

        // Reference ticker spans two sessions; only the latest survives.
        let mut bundle = SeriesBundle::new();
        bundle.insert(
            &aapl,
            vec![
                point("2024-01-01T15:00:00Z", 99.0),
                point("2024-01-02T14:30:00Z", 100.0),
                point("2024-01-02T15:30:00Z", 101.0),
            ],
        );
        bundle.insert(
            &msft,
            vec![
                point("2024-01-01T15:00:00Z", 390.0),
                point("2024-01-02T14:30:00Z", 400.0),
                point("2024-01-02T15:30:00Z", 410.0),
            ],
        );

        let data = chart_series(&bundle, &[aapl, msft], Timeframe::OneDay);
        let series = data.series();
        assert_eq!(series[0].points.len(), 2);
        assert_eq!(series[1].points.len(), 2);
        // Normalization restarts at the session's first bar.
        assert_eq!(series[0].points[0].value, Some(0.0));
        assert_eq!(series[1].points[0].value, Some(0.0));
        // Intraday labels are time-of-day.
        assert_eq!(series[0].points[0].label, "2:30 PM");
    }

    #[test]
    fn single_session_intraday_window_is_not_filtered() {
        let aapl = sym("AAPL");
        let mut bundle = SeriesBundle::new();
        bundle.insert(
            &aapl,
            vec![
                point("2024-01-02T14:30:00Z", 100.0),
                point("2024-01-02T15:30:00Z", 102.0),
            ],
        );

        let data = chart_series(&bundle, &[aapl], Timeframe::OneDay);
        assert_eq!(data.series()[0].points.len(), 2);
    }
}
