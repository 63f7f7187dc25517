//! Configuration types consumed by the source registry and orchestrator.
//!
//! All of these are hot-reloadable: the registry turns an [`EngineConfig`]
//! into an immutable snapshot, and a request started under the old snapshot
//! finishes under it.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::kind::{DataKind, Metric};
use crate::provider::{ProviderDescriptor, ProviderKey};

/// Scoring constants for the quality scorer.
///
/// The penalty magnitudes and the acceptance threshold are empirically
/// chosen defaults; they are configuration precisely so they can be
/// recalibrated against observed provider disagreement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Minimum overall quality for a payload to be accepted.
    pub acceptance_threshold: u8,
    /// Penalty for minor consistency findings.
    pub minor_penalty: u8,
    /// Penalty for moderate consistency findings.
    pub moderate_penalty: u8,
    /// Penalty for major consistency findings.
    pub major_penalty: u8,
    /// Penalty for severe consistency findings.
    pub severe_penalty: u8,
    /// Allowed relative gap between computed and reported market cap.
    pub market_cap_tolerance: f64,
    /// Allowed relative gap when recomputing valuation ratios.
    pub ratio_tolerance: f64,
    /// Allowed relative gap between a bar close and the price register hint.
    pub price_hint_tolerance: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            acceptance_threshold: 60,
            minor_penalty: 5,
            moderate_penalty: 10,
            major_penalty: 15,
            severe_penalty: 20,
            market_cap_tolerance: 0.15,
            ratio_tolerance: 0.10,
            price_hint_tolerance: 0.20,
        }
    }
}

/// Cache tier configuration. TTLs are per data kind because live quotes
/// need seconds-scale expiry while fundamentals tolerate hours; a TTL of
/// zero disables caching for that kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// TTL per data kind, in milliseconds. Missing kinds use the defaults.
    pub per_kind_ttl_ms: HashMap<DataKind, u64>,
    /// Maximum entries per in-memory store.
    pub max_entries: u64,
    /// Upper bound on a persistent-tier read before it is treated as a miss.
    pub persistent_read_timeout_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        let mut per_kind_ttl_ms = HashMap::new();
        per_kind_ttl_ms.insert(DataKind::Quote, 60_000);
        per_kind_ttl_ms.insert(DataKind::HistoricalBars, 3_600_000);
        per_kind_ttl_ms.insert(DataKind::Fundamentals, 21_600_000);
        per_kind_ttl_ms.insert(DataKind::News, 600_000);
        Self {
            per_kind_ttl_ms,
            max_entries: 10_000,
            persistent_read_timeout_ms: 250,
        }
    }
}

impl CacheConfig {
    /// TTL for a kind; `None` means caching is disabled for that kind.
    #[must_use]
    pub fn ttl_for(&self, kind: DataKind) -> Option<Duration> {
        let ms = self
            .per_kind_ttl_ms
            .get(&kind)
            .copied()
            .unwrap_or_else(|| *Self::default().per_kind_ttl_ms.get(&kind).unwrap_or(&0));
        (ms > 0).then(|| Duration::from_millis(ms))
    }

    /// Persistent-tier read deadline.
    #[must_use]
    pub const fn persistent_read_timeout(&self) -> Duration {
        Duration::from_millis(self.persistent_read_timeout_ms)
    }
}

/// Per-kind and fan-out deadlines, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Deadline for a single live-quote provider call.
    pub quote_ms: u64,
    /// Deadline for a single historical-bars provider call.
    pub history_ms: u64,
    /// Deadline for a single fundamentals provider call.
    pub fundamentals_ms: u64,
    /// Deadline for a single news provider call.
    pub news_ms: u64,
    /// Overall deadline for a cross-validation fan-out.
    pub crossval_ms: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            quote_ms: 5_000,
            history_ms: 10_000,
            fundamentals_ms: 10_000,
            news_ms: 10_000,
            crossval_ms: 30_000,
        }
    }
}

impl TimeoutConfig {
    /// Per-provider deadline for a data kind.
    #[must_use]
    pub const fn for_kind(&self, kind: DataKind) -> Duration {
        let ms = match kind {
            DataKind::Quote => self.quote_ms,
            DataKind::HistoricalBars => self.history_ms,
            DataKind::Fundamentals => self.fundamentals_ms,
            DataKind::News => self.news_ms,
        };
        Duration::from_millis(ms)
    }

    /// Overall cross-validation deadline.
    #[must_use]
    pub const fn crossval(&self) -> Duration {
        Duration::from_millis(self.crossval_ms)
    }
}

/// Preferred providers for one metric, branching on market phase.
///
/// `open` applies while the symbol's market session is live, `closed` once
/// it is not; `any` is the phase-independent fallback. All fields optional:
/// an empty route leaves ordering entirely to reliability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MetricRoute {
    /// Provider preferred while the market is open.
    pub open: Option<ProviderKey>,
    /// Provider preferred while the market is closed.
    pub closed: Option<ProviderKey>,
    /// Phase-independent fallback preference.
    pub any: Option<ProviderKey>,
}

/// Full engine configuration: providers, metric routing, scoring, caching,
/// deadlines, and cross-validation fan-out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    /// Configured providers, in priority-tie-break order.
    pub providers: Vec<ProviderDescriptor>,
    /// Per-metric provider preferences.
    pub metric_routes: HashMap<Metric, MetricRoute>,
    /// Quality scoring constants.
    pub scoring: ScoringConfig,
    /// Cache tier settings.
    pub cache: CacheConfig,
    /// Call deadlines.
    pub timeouts: TimeoutConfig,
    /// Maximum providers queried in parallel by a cross-validation fan-out.
    pub crossval_fanout: usize,
}

impl EngineConfig {
    /// Default fan-out when the configured value is zero.
    #[must_use]
    pub const fn effective_crossval_fanout(&self) -> usize {
        if self.crossval_fanout == 0 {
            4
        } else {
            self.crossval_fanout
        }
    }
}
