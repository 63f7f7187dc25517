//! Provider identity and static provider metadata.

use core::fmt;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::kind::DataKind;
use crate::segment::MarketSegment;

/// Typed key identifying a provider in configuration and priority lists.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ProviderKey(String);

impl ProviderKey {
    /// Construct a new typed provider key.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the inner name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProviderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProviderKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Static description of a configured provider.
///
/// Built from configuration at startup or on reload; immutable until the
/// next reload and owned exclusively by the source registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDescriptor {
    /// Stable provider identifier matching the registered connector name.
    pub id: ProviderKey,
    /// Human-friendly display name.
    pub display_name: String,
    /// Market segments the provider serves.
    pub markets: BTreeSet<MarketSegment>,
    /// Whether the provider participates in routing at all.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Static reliability weight, 0..=100. Feeds the quality scorer's
    /// source-reliability axis and the priority resolver's ordering.
    #[serde(default = "default_reliability")]
    pub reliability: u8,
    /// Data kinds the provider can serve.
    pub capabilities: BTreeSet<DataKind>,
}

const fn default_enabled() -> bool {
    true
}

const fn default_reliability() -> u8 {
    70
}

impl ProviderDescriptor {
    /// Construct a descriptor with all segments and kinds enabled and the
    /// default reliability weight. Intended for tests and registry defaults.
    #[must_use]
    pub fn new(id: impl Into<ProviderKey>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            markets: MarketSegment::all().into_iter().collect(),
            enabled: true,
            reliability: default_reliability(),
            capabilities: DataKind::all().into_iter().collect(),
        }
    }

    /// Set the static reliability weight, clamped to 0..=100.
    #[must_use]
    pub fn with_reliability(mut self, reliability: u8) -> Self {
        self.reliability = reliability.min(100);
        self
    }

    /// Restrict the descriptor to the given segments.
    #[must_use]
    pub fn with_markets(mut self, markets: impl IntoIterator<Item = MarketSegment>) -> Self {
        self.markets = markets.into_iter().collect();
        self
    }

    /// Restrict the descriptor to the given capabilities.
    #[must_use]
    pub fn with_capabilities(mut self, kinds: impl IntoIterator<Item = DataKind>) -> Self {
        self.capabilities = kinds.into_iter().collect();
        self
    }

    /// Disable the provider without removing it from configuration.
    #[must_use]
    pub const fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Whether this provider is eligible for a segment/kind pair.
    #[must_use]
    pub fn serves(&self, segment: MarketSegment, kind: DataKind) -> bool {
        self.enabled && self.markets.contains(&segment) && self.capabilities.contains(&kind)
    }
}
