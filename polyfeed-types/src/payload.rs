//! Payload shapes returned by provider adapters.
//!
//! Fields are optional wherever real providers routinely omit them; the
//! quality scorer turns those gaps into completeness deductions instead of
//! parse failures.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::kind::{DataKind, Metric};

/// Point-in-time quote snapshot for a single symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct QuotePayload {
    /// Symbol the quote refers to.
    pub symbol: String,
    /// Display name, when the provider supplies one.
    pub name: Option<String>,
    /// Last traded price.
    pub price: Option<f64>,
    /// Previous session close.
    pub prev_close: Option<f64>,
    /// Session open.
    pub open: Option<f64>,
    /// Session high.
    pub high: Option<f64>,
    /// Session low.
    pub low: Option<f64>,
    /// Traded share volume.
    pub volume: Option<f64>,
    /// Traded value (price × volume).
    pub turnover: Option<f64>,
    /// Reported market capitalization.
    pub market_cap: Option<f64>,
    /// Shares outstanding.
    pub shares_outstanding: Option<f64>,
    /// Price-to-earnings ratio.
    pub pe_ratio: Option<f64>,
    /// Price-to-book ratio.
    pub pb_ratio: Option<f64>,
    /// Price-to-sales ratio.
    pub ps_ratio: Option<f64>,
    /// Trailing-twelve-month revenue.
    pub revenue_ttm: Option<f64>,
    /// 5-day moving average of close.
    pub ma5: Option<f64>,
    /// 10-day moving average of close.
    pub ma10: Option<f64>,
    /// 20-day moving average of close.
    pub ma20: Option<f64>,
    /// Provider-reported snapshot time.
    pub as_of: Option<DateTime<Utc>>,
}

impl QuotePayload {
    /// Extract the value of a routed metric from this quote, if present.
    #[must_use]
    pub const fn metric_value(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::CurrentPrice => self.price,
            Metric::Volume => self.volume,
            Metric::Turnover => self.turnover,
            Metric::PeRatio => self.pe_ratio,
            Metric::PbRatio => self.pb_ratio,
            Metric::MarketCap => self.market_cap,
            Metric::Ma5 => self.ma5,
            Metric::Ma10 => self.ma10,
            Metric::Ma20 => self.ma20,
        }
    }
}

/// One OHLCV bar. Fields a provider failed to supply stay `None` and are
/// penalized by the quality scorer rather than rejected at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Close date of the bar.
    pub date: NaiveDate,
    /// Open price.
    pub open: Option<f64>,
    /// High price.
    pub high: Option<f64>,
    /// Low price.
    pub low: Option<f64>,
    /// Close price.
    pub close: Option<f64>,
    /// Traded share volume.
    pub volume: Option<f64>,
}

/// Historical bars for one symbol, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BarSeries {
    /// Symbol the series refers to.
    pub symbol: String,
    /// Bars in ascending date order.
    pub bars: Vec<Bar>,
}

impl BarSeries {
    /// Close of the most recent bar, if any.
    #[must_use]
    pub fn latest_close(&self) -> Option<f64> {
        self.bars.iter().rev().find_map(|b| b.close)
    }
}

/// Valuation and statement fundamentals for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FundamentalsPayload {
    /// Symbol the fundamentals refer to.
    pub symbol: String,
    /// Price-to-earnings ratio.
    pub pe_ratio: Option<f64>,
    /// Price-to-book ratio.
    pub pb_ratio: Option<f64>,
    /// Price-to-sales ratio.
    pub ps_ratio: Option<f64>,
    /// Earnings per share (trailing).
    pub eps: Option<f64>,
    /// Return on equity, percent.
    pub roe: Option<f64>,
    /// Reported market capitalization.
    pub market_cap: Option<f64>,
    /// Shares outstanding.
    pub shares_outstanding: Option<f64>,
    /// Trailing-twelve-month revenue.
    pub revenue_ttm: Option<f64>,
    /// Trailing-twelve-month net income.
    pub net_income_ttm: Option<f64>,
    /// Reference price used by the provider for ratio computation.
    pub price: Option<f64>,
    /// Date of the underlying report period.
    pub report_date: Option<NaiveDate>,
}

/// A single news item for a symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct NewsItem {
    /// Headline.
    pub title: String,
    /// Publishing outlet, when known.
    pub source: Option<String>,
    /// Canonical article URL.
    pub url: Option<String>,
    /// Short summary or lede.
    pub summary: Option<String>,
    /// Publication time.
    pub published_at: Option<DateTime<Utc>>,
}

/// Uniform payload envelope for scoring and caching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "kebab-case")]
pub enum Payload {
    /// Quote snapshot.
    Quote(QuotePayload),
    /// Historical bar series.
    Bars(BarSeries),
    /// Fundamentals snapshot.
    Fundamentals(FundamentalsPayload),
    /// News batch.
    News(Vec<NewsItem>),
}

impl Payload {
    /// The data kind this payload carries.
    #[must_use]
    pub const fn kind(&self) -> DataKind {
        match self {
            Self::Quote(_) => DataKind::Quote,
            Self::Bars(_) => DataKind::HistoricalBars,
            Self::Fundamentals(_) => DataKind::Fundamentals,
            Self::News(_) => DataKind::News,
        }
    }

    /// Whether the payload carries no usable data. An empty payload from a
    /// successful call is a distinct failure mode from an error.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Quote(q) => q.price.is_none() && q.prev_close.is_none() && q.open.is_none(),
            Self::Bars(b) => b.bars.is_empty(),
            Self::Fundamentals(f) => {
                f.pe_ratio.is_none()
                    && f.pb_ratio.is_none()
                    && f.eps.is_none()
                    && f.market_cap.is_none()
                    && f.revenue_ttm.is_none()
            }
            Self::News(items) => items.is_empty(),
        }
    }

    /// Current price carried by the payload, if any. Feeds the price
    /// register opportunistically on every accepted fetch.
    #[must_use]
    pub fn current_price(&self) -> Option<f64> {
        match self {
            Self::Quote(q) => q.price,
            Self::Fundamentals(f) => f.price,
            Self::Bars(_) | Self::News(_) => None,
        }
    }
}

/// Conversion glue between concrete payload types and the [`Payload`] enum,
/// letting the orchestrator stay generic over what it fetches.
pub trait FeedPayload: Clone + Send + Sync + 'static {
    /// Data kind of this payload type.
    const KIND: DataKind;

    /// Wrap into the uniform envelope.
    fn into_payload(self) -> Payload;

    /// Unwrap from the uniform envelope; `None` on kind mismatch.
    fn from_payload(payload: Payload) -> Option<Self>;
}

impl FeedPayload for QuotePayload {
    const KIND: DataKind = DataKind::Quote;

    fn into_payload(self) -> Payload {
        Payload::Quote(self)
    }

    fn from_payload(payload: Payload) -> Option<Self> {
        match payload {
            Payload::Quote(q) => Some(q),
            _ => None,
        }
    }
}

impl FeedPayload for BarSeries {
    const KIND: DataKind = DataKind::HistoricalBars;

    fn into_payload(self) -> Payload {
        Payload::Bars(self)
    }

    fn from_payload(payload: Payload) -> Option<Self> {
        match payload {
            Payload::Bars(b) => Some(b),
            _ => None,
        }
    }
}

impl FeedPayload for FundamentalsPayload {
    const KIND: DataKind = DataKind::Fundamentals;

    fn into_payload(self) -> Payload {
        Payload::Fundamentals(self)
    }

    fn from_payload(payload: Payload) -> Option<Self> {
        match payload {
            Payload::Fundamentals(f) => Some(f),
            _ => None,
        }
    }
}

impl FeedPayload for Vec<NewsItem> {
    const KIND: DataKind = DataKind::News;

    fn into_payload(self) -> Payload {
        Payload::News(self)
    }

    fn from_payload(payload: Payload) -> Option<Self> {
        match payload {
            Payload::News(n) => Some(n),
            _ => None,
        }
    }
}
