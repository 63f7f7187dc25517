//! Data kinds and routed metric labels.

use core::fmt;
use serde::{Deserialize, Serialize};

/// Kind of data a fetch request targets.
///
/// These map one-to-one with orchestrator endpoints and allow consistent
/// Display formatting, per-kind cache TTLs, and per-kind timeouts.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum DataKind {
    /// Point-in-time quote for a single symbol.
    Quote,
    /// Historical OHLCV bars over a date range.
    HistoricalBars,
    /// Valuation and statement fundamentals.
    Fundamentals,
    /// Recent news items for a symbol.
    News,
}

impl DataKind {
    /// Stable, kebab-case identifier for logs, errors, and cache keys.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Quote => "quote",
            Self::HistoricalBars => "historical-bars",
            Self::Fundamentals => "fundamentals",
            Self::News => "news",
        }
    }

    /// All kinds, in a fixed order.
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [
            Self::Quote,
            Self::HistoricalBars,
            Self::Fundamentals,
            Self::News,
        ]
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single routed metric, used by the metric router and cross-validation.
///
/// Metrics are fields of a quote payload that warrant provider steering of
/// their own: live-market metrics prefer low-latency providers while the
/// market is open, valuation metrics prefer the most complete provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Last traded / current price.
    CurrentPrice,
    /// Traded share volume.
    Volume,
    /// Traded value (price × volume).
    Turnover,
    /// Price-to-earnings ratio.
    PeRatio,
    /// Price-to-book ratio.
    PbRatio,
    /// Total market capitalization.
    MarketCap,
    /// 5-day moving average of close.
    Ma5,
    /// 10-day moving average of close.
    Ma10,
    /// 20-day moving average of close.
    Ma20,
}

impl Metric {
    /// Stable snake_case identifier, matching the configuration surface.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CurrentPrice => "current_price",
            Self::Volume => "volume",
            Self::Turnover => "turnover",
            Self::PeRatio => "pe_ratio",
            Self::PbRatio => "pb_ratio",
            Self::MarketCap => "market_cap",
            Self::Ma5 => "ma5",
            Self::Ma10 => "ma10",
            Self::Ma20 => "ma20",
        }
    }

    /// Whether the metric's best source differs between live and closed
    /// markets (price/volume/turnover move tick-by-tick; the rest do not).
    #[must_use]
    pub const fn is_session_sensitive(self) -> bool {
        matches!(self, Self::CurrentPrice | Self::Volume | Self::Turnover)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
