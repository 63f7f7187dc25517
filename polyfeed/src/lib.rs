//! Polyfeed orchestrates market-data requests across multiple unreliable
//! providers and exposes a single "get data for symbol X" call with
//! predictable latency and graded trust.
//!
//! Overview
//! - Routes requests to connectors that implement the `polyfeed_core`
//!   contracts, ordered by static reliability and per-metric preference.
//! - Probes a two-tier TTL cache before touching any provider, then walks
//!   candidates sequentially, stopping at the first result that clears the
//!   quality gate.
//! - Scores every payload along four axes (completeness, consistency,
//!   timeliness, source reliability) and records which provider answered.
//! - Cross-validates high-stakes metrics across providers in parallel and
//!   reports a consensus value with a confidence measure.
//!
//! Key behaviors and trade-offs
//! - Sequential fallback minimizes wasted calls against rate-limited
//!   providers; only cross-validation fans out in parallel, because its
//!   whole purpose is multi-source agreement.
//! - Exhaustion is not an exception: `FeedError::Exhausted` carries the
//!   ordered per-provider failure reasons so callers can render a degraded
//!   report rather than nothing. An empty candidate list is the distinct,
//!   operator-actionable `NoEligibleProviders`.
//! - Cache and configuration failures degrade (miss / defaults) and never
//!   take the engine down.
//!
//! Example
//! ```rust,ignore
//! use std::sync::Arc;
//! use polyfeed::Polyfeed;
//! use polyfeed_types::{EngineConfig, Metric};
//!
//! let engine = Polyfeed::builder()
//!     .with_connector(Arc::new(TushareConnector::new(key)))
//!     .with_connector(Arc::new(SinaConnector::new()))
//!     .config(EngineConfig::default())
//!     .build()?;
//!
//! let quote = engine.quote("600519.SS").await?;
//! println!("{} from {} (quality {})", quote.payload.symbol, quote.source, quote.quality.overall);
//!
//! let consensus = engine.cross_validate("600519.SS", Metric::CurrentPrice, None).await?;
//! if !consensus.is_consistent {
//!     eprintln!("providers disagree: {:?}", consensus.per_source);
//! }
//! ```
#![warn(missing_docs)]

pub(crate) mod core;
mod metric;
pub mod registry;
pub(crate) mod resolver;
mod router;

pub use core::{Polyfeed, PolyfeedBuilder};
pub use registry::{RegistrySnapshot, SourceRegistry};

pub use polyfeed_cache::{CacheKey, CacheLayer, JsonFileTier, PersistentTier};
pub use polyfeed_core::{
    FeedConnector, InMemoryPriceRegister, PriceRegister, is_market_open, sample_stats,
};

// Re-export the shared data model for convenience.
pub use polyfeed_types::{
    Attempt,
    Bar,
    BarSeries,
    CacheConfig,
    CachedFetch,
    CrossValidationResult,
    DataKind,
    DateRange,
    EngineConfig,
    FailureReason,
    FeedError,
    FetchOutcome,
    FetchRequest,
    FundamentalsPayload,
    MarketSegment,
    Metric,
    MetricRoute,
    NewsItem,
    Payload,
    ProviderDescriptor,
    ProviderKey,
    QualityReport,
    QuotePayload,
    SampleStats,
    ScoringConfig,
    TimeoutConfig,
};
