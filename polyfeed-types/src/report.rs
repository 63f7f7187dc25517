//! Result envelopes produced by the orchestrator.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::payload::Payload;
use crate::provider::ProviderKey;
use crate::quality::QualityReport;

/// An accepted fetch, handed to the caller by value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchOutcome<P> {
    /// The fetched payload.
    pub payload: P,
    /// Provider that actually answered (or originally produced the cached
    /// entry).
    pub source: ProviderKey,
    /// Quality report computed when the payload was accepted.
    pub quality: QualityReport,
    /// When the payload was fetched from its provider.
    pub fetched_at: DateTime<Utc>,
    /// Whether the payload was served from the cache layer.
    pub from_cache: bool,
}

/// A payload at rest in the cache layer, with enough context to rebuild a
/// [`FetchOutcome`] on a hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedFetch {
    /// The cached payload.
    pub payload: Payload,
    /// Provider that produced the payload.
    pub source: ProviderKey,
    /// Quality report at acceptance time.
    pub quality: QualityReport,
    /// When the payload was fetched.
    pub cached_at: DateTime<Utc>,
}

/// Descriptive statistics over per-source metric values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleStats {
    /// Smallest observed value.
    pub min: f64,
    /// Largest observed value.
    pub max: f64,
    /// Arithmetic mean.
    pub mean: f64,
    /// Median (robust to a single outlier provider).
    pub median: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    /// Coefficient of variation as a percentage of the mean.
    pub cv_percent: f64,
}

/// Outcome of fanning one metric out to several providers and reconciling
/// the answers. Built on demand and never cached: it is cheap to recompute
/// and staleness would be misleading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossValidationResult {
    /// Value each responding provider reported.
    pub per_source: BTreeMap<ProviderKey, f64>,
    /// Descriptive statistics over the responses, when at least one arrived.
    pub stats: Option<SampleStats>,
    /// Whether the sources agree (coefficient of variation below 5%).
    pub is_consistent: bool,
    /// Provider with the highest quality score among respondents.
    pub recommended_source: Option<ProviderKey>,
    /// Median of the responses.
    pub recommended_value: Option<f64>,
    /// Agreement confidence in 0..=1, derived from the coefficient of
    /// variation.
    pub confidence: f64,
}
