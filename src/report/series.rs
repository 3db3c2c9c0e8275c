//! Chart-ready series types
//!
//! The report builder emits series as plain data; drawing them is the
//! renderer's job (terminal sparklines, or a JS charting library for the
//! HTML export).

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;

/// Line color for a rendered series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesColor {
    Green,
    Red,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeriesPoint {
    pub at: NaiveDateTime,
    pub value: Decimal,
}

/// A named time series in file order.
#[derive(Debug, Clone, Serialize)]
pub struct TimeSeries {
    pub name: String,
    pub points: Vec<SeriesPoint>,
}

impl TimeSeries {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            points: Vec::new(),
        }
    }

    pub fn push(&mut self, at: NaiveDateTime, value: Decimal) {
        self.points.push(SeriesPoint { at, value });
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last_value(&self) -> Option<Decimal> {
        self.points.last().map(|p| p.value)
    }

    /// Smallest and largest values, for axis scaling and sparklines.
    pub fn min_max(&self) -> Option<(Decimal, Decimal)> {
        let mut iter = self.points.iter().map(|p| p.value);
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        Some((min, max))
    }
}
