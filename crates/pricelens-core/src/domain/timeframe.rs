use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::{UtcDateTime, ValidationError};

const TIME_OF_DAY: &[BorrowedFormatItem<'static>] =
    format_description!("[hour padding:none repr:12]:[minute] [period]");
const DAY_AND_TIME: &[BorrowedFormatItem<'static>] = format_description!(
    "[month repr:short] [day padding:none], [hour padding:none repr:12]:[minute] [period]"
);
const MONTH_DAY: &[BorrowedFormatItem<'static>] =
    format_description!("[month repr:short] [day padding:none]");
const FULL_DATE: &[BorrowedFormatItem<'static>] =
    format_description!("[month repr:short] [day padding:none], [year]");

/// Window selector controlling both the requested data range and the
/// granularity of x-axis labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1D")]
    OneDay,
    #[serde(rename = "1W")]
    OneWeek,
    #[serde(rename = "1M")]
    OneMonth,
    #[serde(rename = "3M")]
    ThreeMonths,
    #[serde(rename = "1Y")]
    OneYear,
    #[serde(rename = "YTD")]
    YearToDate,
    #[serde(rename = "MTD")]
    MonthToDate,
    #[serde(rename = "custom")]
    Custom,
}

impl Timeframe {
    pub const ALL: [Self; 8] = [
        Self::OneDay,
        Self::OneWeek,
        Self::OneMonth,
        Self::ThreeMonths,
        Self::OneYear,
        Self::YearToDate,
        Self::MonthToDate,
        Self::Custom,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneDay => "1D",
            Self::OneWeek => "1W",
            Self::OneMonth => "1M",
            Self::ThreeMonths => "3M",
            Self::OneYear => "1Y",
            Self::YearToDate => "YTD",
            Self::MonthToDate => "MTD",
            Self::Custom => "custom",
        }
    }

    /// Whether the window covers a single trading session.
    pub const fn is_intraday(self) -> bool {
        matches!(self, Self::OneDay)
    }

    /// Render one x-axis label at this timeframe's granularity.
    ///
    /// Intraday windows show time of day, a one-week window shows day plus
    /// time, and wider windows show calendar dates only.
    pub fn format_label(self, ts: UtcDateTime) -> String {
        let pattern = match self {
            Self::OneDay => TIME_OF_DAY,
            Self::OneWeek => DAY_AND_TIME,
            Self::OneMonth => MONTH_DAY,
            Self::ThreeMonths
            | Self::OneYear
            | Self::YearToDate
            | Self::MonthToDate
            | Self::Custom => FULL_DATE,
        };

        ts.into_inner()
            .format(pattern)
            .unwrap_or_else(|_| ts.format_rfc3339())
    }
}

impl Display for Timeframe {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "1D" | "1d" => Ok(Self::OneDay),
            "1W" | "1w" => Ok(Self::OneWeek),
            "1M" => Ok(Self::OneMonth),
            "3M" | "3m" => Ok(Self::ThreeMonths),
            "1Y" | "1y" => Ok(Self::OneYear),
            "YTD" | "ytd" => Ok(Self::YearToDate),
            "MTD" | "mtd" => Ok(Self::MonthToDate),
            "custom" => Ok(Self::Custom),
            other => Err(ValidationError::InvalidTimeframe {
                value: other.to_owned(),
            }),
        }
    }
}

/// Explicit inclusive date pair required by [`Timeframe::Custom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: UtcDateTime,
    end: UtcDateTime,
}

impl DateRange {
    pub fn new(start: UtcDateTime, end: UtcDateTime) -> Result<Self, ValidationError> {
        if start > end {
            return Err(ValidationError::InvertedDateRange {
                start: start.format_date(),
                end: end.format_date(),
            });
        }

        Ok(Self { start, end })
    }

    pub fn start(&self) -> UtcDateTime {
        self.start
    }

    pub fn end(&self) -> UtcDateTime {
        self.end
    }
}
