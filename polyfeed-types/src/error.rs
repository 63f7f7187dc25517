use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::kind::DataKind;
use crate::provider::ProviderKey;
use crate::segment::MarketSegment;

/// Why a single provider attempt did not produce an accepted result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "kebab-case")]
pub enum FailureReason {
    /// The adapter returned an error.
    Unavailable {
        /// Human-readable error message from the adapter.
        msg: String,
    },
    /// The adapter exceeded its per-call deadline.
    Timeout,
    /// The call succeeded but carried no usable data.
    Empty,
    /// The payload scored below the acceptance threshold.
    LowQuality {
        /// Overall quality score that failed the gate.
        overall: u8,
    },
}

impl core::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Unavailable { msg } => write!(f, "unavailable: {msg}"),
            Self::Timeout => f.write_str("timeout"),
            Self::Empty => f.write_str("empty"),
            Self::LowQuality { overall } => write!(f, "low quality (overall={overall})"),
        }
    }
}

/// One entry of the ordered failure report produced when every candidate
/// provider was attempted without an accepted result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attempt {
    /// Provider that was attempted.
    pub provider: ProviderKey,
    /// Why the attempt did not reach acceptance.
    pub reason: FailureReason,
}

/// Unified error type for the polyfeed workspace.
///
/// Individual provider failures are recovered locally by the fallback
/// orchestrator and only aggregate into `Exhausted` when every candidate
/// failed. Cache failures are absorbed (degrade to a miss) and never
/// surface here; configuration failures degrade to registry defaults.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FeedError {
    /// The requested capability is not implemented by the target provider.
    #[error("unsupported capability: {capability}")]
    Unsupported {
        /// A capability string describing what was requested.
        capability: String,
    },

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// An individual provider adapter returned an error.
    #[error("{provider} failed: {msg}")]
    Unavailable {
        /// Provider name that failed.
        provider: String,
        /// Human-readable error message.
        msg: String,
    },

    /// An individual provider call exceeded the configured timeout.
    #[error("provider timed out: {kind} via {provider}")]
    ProviderTimeout {
        /// Provider name that timed out.
        provider: String,
        /// Data kind being fetched.
        kind: DataKind,
    },

    /// A provider call succeeded but returned no usable data.
    #[error("{provider} returned no usable data")]
    Empty {
        /// Provider name that returned nothing.
        provider: String,
    },

    /// Every eligible provider was attempted and none reached acceptance.
    /// Callers are expected to render this as a degraded result, not a
    /// hard error: the ordered attempts say exactly what went wrong where.
    #[error("all providers exhausted after {} attempts", attempts.len())]
    Exhausted {
        /// Per-provider failure reasons, in attempt order.
        attempts: Vec<Attempt>,
    },

    /// No provider was even eligible for the segment/kind pair. This is a
    /// misconfiguration and deliberately distinct from `Exhausted`: the
    /// operator fix is configuration, not provider health.
    #[error("no eligible provider for {kind} in {segment}")]
    NoEligibleProviders {
        /// Market segment of the request.
        segment: MarketSegment,
        /// Data kind of the request.
        kind: DataKind,
    },

    /// The overall request exceeded the configured deadline.
    #[error("request timed out: {capability}")]
    RequestTimeout {
        /// Capability label for which the request timed out.
        capability: String,
    },

    /// Cache tier failure. Always absorbed internally; exposed only for
    /// cache-layer unit tests and diagnostics.
    #[error("cache unavailable: {0}")]
    Cache(String),

    /// Configuration could not be applied.
    #[error("configuration invalid: {0}")]
    Config(String),
}

impl FeedError {
    /// Helper: build an `Unsupported` error for a capability string.
    #[must_use]
    pub fn unsupported(cap: impl Into<String>) -> Self {
        Self::Unsupported {
            capability: cap.into(),
        }
    }

    /// Helper: build an `Unavailable` error with provider name and message.
    pub fn unavailable(provider: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Unavailable {
            provider: provider.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `ProviderTimeout` error.
    pub fn provider_timeout(provider: impl Into<String>, kind: DataKind) -> Self {
        Self::ProviderTimeout {
            provider: provider.into(),
            kind,
        }
    }

    /// Helper: build an `Empty` error.
    pub fn empty(provider: impl Into<String>) -> Self {
        Self::Empty {
            provider: provider.into(),
        }
    }

    /// The ordered failure report, when this error is an exhaustion.
    #[must_use]
    pub fn failure_report(&self) -> Option<&[Attempt]> {
        match self {
            Self::Exhausted { attempts } => Some(attempts),
            _ => None,
        }
    }

    /// Returns true if this error should be surfaced to operators as
    /// actionable. Exhaustion is expected degradation; an empty candidate
    /// list or invalid configuration requires intervention.
    #[must_use]
    pub const fn is_actionable(&self) -> bool {
        matches!(
            self,
            Self::NoEligibleProviders { .. } | Self::Config(_) | Self::InvalidArg(_)
        )
    }
}
