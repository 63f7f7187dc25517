use std::collections::BTreeSet;

use async_trait::async_trait;

use polyfeed_types::{
    BarSeries, DataKind, DateRange, FeedError, FundamentalsPayload, MarketSegment, NewsItem,
    ProviderKey, QuotePayload,
};

/// Focused role trait for connectors that provide point-in-time quotes.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Fetch a quote snapshot for the given symbol.
    async fn quote(&self, symbol: &str) -> Result<QuotePayload, FeedError>;
}

/// Focused role trait for connectors that provide OHLCV history.
#[async_trait]
pub trait HistoryProvider: Send + Sync {
    /// Fetch daily bars for the given symbol over an inclusive date range.
    async fn history(&self, symbol: &str, range: DateRange) -> Result<BarSeries, FeedError>;
}

/// Focused role trait for connectors that provide fundamentals.
#[async_trait]
pub trait FundamentalsProvider: Send + Sync {
    /// Fetch valuation and statement fundamentals for the given symbol.
    async fn fundamentals(&self, symbol: &str) -> Result<FundamentalsPayload, FeedError>;
}

/// Focused role trait for connectors that provide news items.
#[async_trait]
pub trait NewsProvider: Send + Sync {
    /// Fetch up to `limit` recent news items for the given symbol.
    async fn news(&self, symbol: &str, limit: usize) -> Result<Vec<NewsItem>, FeedError>;
}

/// Main connector trait implemented by provider adapter crates.
///
/// Adapters own their wire protocol, authentication, and rate limiting;
/// the orchestrator only sees this uniform capability surface. Capability
/// discovery is via the `as_*_provider` accessors: returning `Some` both
/// advertises the capability and hands back a usable trait object, which
/// replaces any string-keyed dynamic dispatch with ordinary polymorphism.
pub trait FeedConnector: Send + Sync {
    /// A stable identifier for priority lists (e.g., "tushare", "sina").
    fn name(&self) -> &'static str;

    /// Canonical provider key constructed from the static name.
    ///
    /// Use this helper when configuring descriptors and metric routes.
    fn key(&self) -> ProviderKey {
        ProviderKey::new(self.name())
    }

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Whether this connector *claims* to serve a given market segment.
    ///
    /// Default: returns `false` for all segments. Connectors must
    /// explicitly override this to declare the markets they cover.
    fn supports_segment(&self, segment: MarketSegment) -> bool {
        let _ = segment;
        false
    }

    /// Advertise quote capability by returning a usable trait object.
    fn as_quote_provider(&self) -> Option<&dyn QuoteProvider> {
        None
    }

    /// Advertise history capability by returning a usable trait object.
    fn as_history_provider(&self) -> Option<&dyn HistoryProvider> {
        None
    }

    /// Advertise fundamentals capability by returning a usable trait object.
    fn as_fundamentals_provider(&self) -> Option<&dyn FundamentalsProvider> {
        None
    }

    /// Advertise news capability by returning a usable trait object.
    fn as_news_provider(&self) -> Option<&dyn NewsProvider> {
        None
    }

    /// Data kinds this connector advertises, derived from the accessors.
    /// Used by the registry when synthesizing default descriptors.
    fn capabilities(&self) -> BTreeSet<DataKind> {
        let mut kinds = BTreeSet::new();
        if self.as_quote_provider().is_some() {
            kinds.insert(DataKind::Quote);
        }
        if self.as_history_provider().is_some() {
            kinds.insert(DataKind::HistoricalBars);
        }
        if self.as_fundamentals_provider().is_some() {
            kinds.insert(DataKind::Fundamentals);
        }
        if self.as_news_provider().is_some() {
            kinds.insert(DataKind::News);
        }
        kinds
    }
}
