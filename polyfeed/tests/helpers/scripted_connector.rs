#![allow(dead_code)]
#![allow(clippy::type_complexity)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use polyfeed::{
    BarSeries, DateRange, FeedConnector, FeedError, FundamentalsPayload, MarketSegment, NewsItem,
    QuotePayload,
};
use polyfeed_core::connector::{
    FundamentalsProvider, HistoryProvider, NewsProvider, QuoteProvider,
};

type QuoteFn = dyn Fn(&str) -> Result<QuotePayload, FeedError> + Send + Sync;
type HistoryFn = dyn Fn(&str, DateRange) -> Result<BarSeries, FeedError> + Send + Sync;
type FundamentalsFn = dyn Fn(&str) -> Result<FundamentalsPayload, FeedError> + Send + Sync;
type NewsFn = dyn Fn(&str, usize) -> Result<Vec<NewsItem>, FeedError> + Send + Sync;

/// In-memory connector scripted per test: closures define each capability,
/// an optional delay simulates slow providers, and an atomic counter lets
/// tests assert exactly which providers were touched.
pub struct ScriptedConnector {
    name: &'static str,
    segments: Option<Vec<MarketSegment>>,
    delay: Option<Duration>,
    quote_fn: Option<Box<QuoteFn>>,
    history_fn: Option<Box<HistoryFn>>,
    fundamentals_fn: Option<Box<FundamentalsFn>>,
    news_fn: Option<Box<NewsFn>>,
    calls: AtomicUsize,
}

impl ScriptedConnector {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            segments: None,
            delay: None,
            quote_fn: None,
            history_fn: None,
            fundamentals_fn: None,
            news_fn: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_quote(
        mut self,
        f: impl Fn(&str) -> Result<QuotePayload, FeedError> + Send + Sync + 'static,
    ) -> Self {
        self.quote_fn = Some(Box::new(f));
        self
    }

    pub fn with_history(
        mut self,
        f: impl Fn(&str, DateRange) -> Result<BarSeries, FeedError> + Send + Sync + 'static,
    ) -> Self {
        self.history_fn = Some(Box::new(f));
        self
    }

    pub fn with_fundamentals(
        mut self,
        f: impl Fn(&str) -> Result<FundamentalsPayload, FeedError> + Send + Sync + 'static,
    ) -> Self {
        self.fundamentals_fn = Some(Box::new(f));
        self
    }

    pub fn with_news(
        mut self,
        f: impl Fn(&str, usize) -> Result<Vec<NewsItem>, FeedError> + Send + Sync + 'static,
    ) -> Self {
        self.news_fn = Some(Box::new(f));
        self
    }

    /// Sleep this long before answering any call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Restrict the connector to specific segments (default: all).
    pub fn with_segments(mut self, segments: &[MarketSegment]) -> Self {
        self.segments = Some(segments.to_vec());
        self
    }

    /// Number of capability calls that reached this connector.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn begin(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

impl FeedConnector for ScriptedConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn supports_segment(&self, segment: MarketSegment) -> bool {
        self.segments
            .as_ref()
            .is_none_or(|segments| segments.contains(&segment))
    }

    fn as_quote_provider(&self) -> Option<&dyn QuoteProvider> {
        self.quote_fn.as_ref().map(|_| self as &dyn QuoteProvider)
    }

    fn as_history_provider(&self) -> Option<&dyn HistoryProvider> {
        self.history_fn
            .as_ref()
            .map(|_| self as &dyn HistoryProvider)
    }

    fn as_fundamentals_provider(&self) -> Option<&dyn FundamentalsProvider> {
        self.fundamentals_fn
            .as_ref()
            .map(|_| self as &dyn FundamentalsProvider)
    }

    fn as_news_provider(&self) -> Option<&dyn NewsProvider> {
        self.news_fn.as_ref().map(|_| self as &dyn NewsProvider)
    }
}

#[async_trait]
impl QuoteProvider for ScriptedConnector {
    async fn quote(&self, symbol: &str) -> Result<QuotePayload, FeedError> {
        self.begin().await;
        match &self.quote_fn {
            Some(f) => f(symbol),
            None => Err(FeedError::unsupported("quote")),
        }
    }
}

#[async_trait]
impl HistoryProvider for ScriptedConnector {
    async fn history(&self, symbol: &str, range: DateRange) -> Result<BarSeries, FeedError> {
        self.begin().await;
        match &self.history_fn {
            Some(f) => f(symbol, range),
            None => Err(FeedError::unsupported("history")),
        }
    }
}

#[async_trait]
impl FundamentalsProvider for ScriptedConnector {
    async fn fundamentals(&self, symbol: &str) -> Result<FundamentalsPayload, FeedError> {
        self.begin().await;
        match &self.fundamentals_fn {
            Some(f) => f(symbol),
            None => Err(FeedError::unsupported("fundamentals")),
        }
    }
}

#[async_trait]
impl NewsProvider for ScriptedConnector {
    async fn news(&self, symbol: &str, limit: usize) -> Result<Vec<NewsItem>, FeedError> {
        self.begin().await;
        match &self.news_fn {
            Some(f) => f(symbol, limit),
            None => Err(FeedError::unsupported("news")),
        }
    }
}
