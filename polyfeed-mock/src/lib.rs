//! Mock connector for CI-safe tests and examples.
//!
//! Provides deterministic data from static fixtures. A few magic symbols
//! exercise failure paths end to end:
//!
//! - `"FAIL"`: every call returns an `Unavailable` error.
//! - `"SLOW"`: every call sleeps long enough that any realistic
//!   deadline turns it into a timeout.
//! - `"EMPTY"`: calls succeed but carry no usable data.
#![warn(missing_docs)]

use async_trait::async_trait;

use polyfeed_core::connector::{
    FeedConnector, FundamentalsProvider, HistoryProvider, NewsProvider, QuoteProvider,
};
use polyfeed_core::{
    BarSeries, DateRange, FeedError, FundamentalsPayload, MarketSegment, NewsItem, QuotePayload,
};

mod fixtures;

/// Deterministic mock connector serving every segment and capability.
pub struct MockConnector {
    name: &'static str,
}

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnector {
    /// Create a mock connector with the default name.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            name: "polyfeed-mock",
        }
    }

    /// Create a mock connector with a custom name, so several instances can
    /// coexist in one registry.
    #[must_use]
    pub const fn named(name: &'static str) -> Self {
        Self { name }
    }

    async fn maybe_fail(&self, symbol: &str, capability: &'static str) -> Result<(), FeedError> {
        match symbol {
            "FAIL" => Err(FeedError::unavailable(
                self.name,
                format!("forced failure: {capability}"),
            )),
            "SLOW" => {
                // Long enough that any realistic per-call deadline fires.
                tokio::time::sleep(std::time::Duration::from_secs(30)).await;
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

impl FeedConnector for MockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn supports_segment(&self, _segment: MarketSegment) -> bool {
        true
    }

    fn as_quote_provider(&self) -> Option<&dyn QuoteProvider> {
        Some(self)
    }
    fn as_history_provider(&self) -> Option<&dyn HistoryProvider> {
        Some(self)
    }
    fn as_fundamentals_provider(&self) -> Option<&dyn FundamentalsProvider> {
        Some(self)
    }
    fn as_news_provider(&self) -> Option<&dyn NewsProvider> {
        Some(self)
    }
}

#[async_trait]
impl QuoteProvider for MockConnector {
    async fn quote(&self, symbol: &str) -> Result<QuotePayload, FeedError> {
        self.maybe_fail(symbol, "quote").await?;
        if symbol == "EMPTY" {
            return Ok(QuotePayload {
                symbol: symbol.to_string(),
                ..QuotePayload::default()
            });
        }
        Ok(fixtures::quote(symbol))
    }
}

#[async_trait]
impl HistoryProvider for MockConnector {
    async fn history(&self, symbol: &str, range: DateRange) -> Result<BarSeries, FeedError> {
        self.maybe_fail(symbol, "history").await?;
        if symbol == "EMPTY" {
            return Ok(BarSeries {
                symbol: symbol.to_string(),
                bars: vec![],
            });
        }
        Ok(fixtures::history(symbol, range))
    }
}

#[async_trait]
impl FundamentalsProvider for MockConnector {
    async fn fundamentals(&self, symbol: &str) -> Result<FundamentalsPayload, FeedError> {
        self.maybe_fail(symbol, "fundamentals").await?;
        if symbol == "EMPTY" {
            return Ok(FundamentalsPayload {
                symbol: symbol.to_string(),
                ..FundamentalsPayload::default()
            });
        }
        Ok(fixtures::fundamentals(symbol))
    }
}

#[async_trait]
impl NewsProvider for MockConnector {
    async fn news(&self, symbol: &str, limit: usize) -> Result<Vec<NewsItem>, FeedError> {
        self.maybe_fail(symbol, "news").await?;
        if symbol == "EMPTY" {
            return Ok(vec![]);
        }
        Ok(fixtures::news(symbol, limit))
    }
}
