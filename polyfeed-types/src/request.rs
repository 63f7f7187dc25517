//! Fetch request value objects.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::kind::{DataKind, Metric};
use crate::segment::MarketSegment;

/// Inclusive date range for historical requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    /// First day of the range (inclusive).
    pub start: NaiveDate,
    /// Last day of the range (inclusive).
    pub end: NaiveDate,
}

impl DateRange {
    /// Construct a range, normalizing a reversed pair.
    #[must_use]
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        if end < start {
            Self { start: end, end: start }
        } else {
            Self { start, end }
        }
    }

    /// Day-granular bucket label used in cache keys, e.g. `20240101-20240630`.
    #[must_use]
    pub fn bucket(&self) -> String {
        format!(
            "{}-{}",
            self.start.format("%Y%m%d"),
            self.end.format("%Y%m%d")
        )
    }
}

/// A single fetch request; constructed per call, never shared across calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchRequest {
    /// Symbol to fetch, as supplied by the caller.
    pub symbol: String,
    /// Kind of data requested.
    pub kind: DataKind,
    /// Date range for historical requests; `None` otherwise.
    pub range: Option<DateRange>,
    /// Metric whose provider preference should steer routing, if any.
    pub metric: Option<Metric>,
}

impl FetchRequest {
    /// A live quote request.
    #[must_use]
    pub fn quote(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            kind: DataKind::Quote,
            range: None,
            metric: None,
        }
    }

    /// A historical-bars request over `range`.
    #[must_use]
    pub fn history(symbol: impl Into<String>, range: DateRange) -> Self {
        Self {
            symbol: symbol.into(),
            kind: DataKind::HistoricalBars,
            range: Some(range),
            metric: None,
        }
    }

    /// A fundamentals request.
    #[must_use]
    pub fn fundamentals(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            kind: DataKind::Fundamentals,
            range: None,
            metric: None,
        }
    }

    /// A news request.
    #[must_use]
    pub fn news(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            kind: DataKind::News,
            range: None,
            metric: None,
        }
    }

    /// Attach a metric preference, steering the priority resolver.
    #[must_use]
    pub const fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = Some(metric);
        self
    }

    /// Market segment of the requested symbol (always recomputed).
    #[must_use]
    pub fn segment(&self) -> MarketSegment {
        MarketSegment::from_symbol(&self.symbol)
    }
}
