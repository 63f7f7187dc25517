use std::sync::Arc;

use chrono::Utc;

use polyfeed_cache::{CacheKey, CacheLayer, PersistentTier};
use polyfeed_core::{FeedConnector, InMemoryPriceRegister, PriceRegister, quality};
use polyfeed_types::{
    Attempt, CachedFetch, DataKind, EngineConfig, FailureReason, FeedError, FeedPayload,
    FetchOutcome, FetchRequest, MarketSegment, Metric, ProviderKey,
};

use crate::registry::{RegistrySnapshot, SourceRegistry};
use crate::resolver;

/// Orchestrator that routes requests across registered providers with
/// cache-first fallback and quality gating.
pub struct Polyfeed {
    pub(crate) registry: SourceRegistry,
    pub(crate) cache: CacheLayer,
    pub(crate) register: Arc<dyn PriceRegister>,
}

/// Builder for constructing a `Polyfeed` orchestrator.
pub struct PolyfeedBuilder {
    connectors: Vec<Arc<dyn FeedConnector>>,
    config: EngineConfig,
    register: Option<Arc<dyn PriceRegister>>,
    persistent: Option<Arc<dyn PersistentTier>>,
}

impl Default for PolyfeedBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PolyfeedBuilder {
    /// Create a new builder with default configuration.
    ///
    /// Behavior and trade-offs:
    /// - Starts with no connectors; register at least one via
    ///   [`with_connector`](Self::with_connector).
    /// - Without an explicit configuration the registry derives descriptors
    ///   from the connectors themselves (enabled, default reliability).
    /// - The price register defaults to a fresh in-memory instance; inject
    ///   a shared one to pool price hints across engines, or a fake in
    ///   tests.
    #[must_use]
    pub fn new() -> Self {
        Self {
            connectors: vec![],
            config: EngineConfig::default(),
            register: None,
            persistent: None,
        }
    }

    /// Register a provider connector.
    ///
    /// Registration order is the tie-break order wherever configuration
    /// does not dictate one. Duplicates by name are not deduplicated here;
    /// the last registration wins in the registry map.
    #[must_use]
    pub fn with_connector(mut self, connector: Arc<dyn FeedConnector>) -> Self {
        self.connectors.push(connector);
        self
    }

    /// Supply the engine configuration (providers, metric routes, scoring,
    /// cache TTLs, timeouts).
    #[must_use]
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Inject a price register implementation.
    #[must_use]
    pub fn price_register(mut self, register: Arc<dyn PriceRegister>) -> Self {
        self.register = Some(register);
        self
    }

    /// Attach a persistent cache tier for cross-run reuse.
    #[must_use]
    pub fn persistent_cache(mut self, tier: Arc<dyn PersistentTier>) -> Self {
        self.persistent = Some(tier);
        self
    }

    /// Build the orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no connectors have been registered.
    pub fn build(self) -> Result<Polyfeed, FeedError> {
        if self.connectors.is_empty() {
            return Err(FeedError::InvalidArg(
                "no connectors registered; add at least one via with_connector(...)".to_string(),
            ));
        }
        let mut cache = CacheLayer::new(self.config.cache.clone());
        if let Some(tier) = self.persistent {
            cache = cache.with_persistent(tier);
        }
        let registry = SourceRegistry::new(self.connectors, self.config);
        let register = self
            .register
            .unwrap_or_else(|| Arc::new(InMemoryPriceRegister::new()));
        Ok(Polyfeed {
            registry,
            cache,
            register,
        })
    }
}

impl Polyfeed {
    /// Start building a new `Polyfeed` instance.
    #[must_use]
    pub fn builder() -> PolyfeedBuilder {
        PolyfeedBuilder::new()
    }

    /// Hot-reload the engine configuration. Atomic with respect to
    /// in-flight requests: a request started under the old configuration
    /// finishes under it.
    ///
    /// # Errors
    /// Returns `FeedError::Config` when the supplied provider list had no
    /// valid entry (the registry keeps serving on defaults).
    pub fn reload(&self, config: EngineConfig) -> Result<(), FeedError> {
        self.registry.reload(config)
    }

    /// Ordered provider candidates the engine would try for a request.
    /// Exposed for diagnostics; an empty list means no provider is
    /// eligible.
    #[must_use]
    pub fn resolve_providers(
        &self,
        segment: MarketSegment,
        kind: DataKind,
        metric: Option<Metric>,
    ) -> Vec<ProviderKey> {
        resolver::resolve(&self.registry.snapshot(), segment, kind, metric, Utc::now())
    }

    /// Core fallback walk shared by every endpoint.
    ///
    /// Cache probe first; on a usable hit no provider is touched. Otherwise
    /// candidates are tried strictly in order (provider `i + 1` is called
    /// only after provider `i` failed to reach acceptance), with each call
    /// bounded by the per-kind deadline. Acceptance requires a non-empty
    /// payload scoring at or above the configured threshold; it triggers a
    /// fire-and-forget cache write-back and a price-register update before
    /// the outcome is returned.
    pub(crate) async fn fetch_single<P, F, Fut>(
        &self,
        req: &FetchRequest,
        call: F,
    ) -> Result<FetchOutcome<P>, FeedError>
    where
        P: FeedPayload,
        F: Fn(Arc<dyn FeedConnector>, String) -> Option<Fut>,
        Fut: core::future::Future<Output = Result<P, FeedError>> + Send,
    {
        debug_assert_eq!(req.kind, P::KIND);
        let cache_key = CacheKey::from(req);
        if let Some(hit) = self.cache.get(&cache_key).await {
            let CachedFetch {
                payload,
                source,
                quality,
                cached_at,
            } = hit;
            if let Some(payload) = P::from_payload(payload) {
                tracing::debug!(symbol = %req.symbol, kind = %req.kind, source = %source, "served from cache");
                return Ok(FetchOutcome {
                    payload,
                    source,
                    quality,
                    fetched_at: cached_at,
                    from_cache: true,
                });
            }
        }

        let snapshot = self.registry.snapshot();
        let now = Utc::now();
        let segment = req.segment();
        let candidates = resolver::resolve(&snapshot, segment, req.kind, req.metric, now);
        if candidates.is_empty() {
            return Err(FeedError::NoEligibleProviders {
                segment,
                kind: req.kind,
            });
        }

        let deadline = snapshot.config().timeouts.for_kind(req.kind);
        let threshold = snapshot.config().scoring.acceptance_threshold;
        let mut attempts: Vec<Attempt> = Vec::new();

        for provider in candidates {
            let Some(connector) = snapshot.connector(&provider) else {
                // Descriptor validated against the connector map at reload;
                // a miss here means the map and snapshot diverged.
                continue;
            };
            let Some(fut) = call(Arc::clone(connector), req.symbol.clone()) else {
                tracing::warn!(provider = %provider, kind = %req.kind, "descriptor advertises a capability the connector lacks");
                attempts.push(Attempt {
                    provider,
                    reason: FailureReason::Unavailable {
                        msg: "capability not implemented".to_string(),
                    },
                });
                continue;
            };

            match tokio::time::timeout(deadline, fut).await {
                Err(_) => {
                    tracing::warn!(provider = %provider, symbol = %req.symbol, kind = %req.kind, "provider timed out; falling back");
                    attempts.push(Attempt {
                        provider,
                        reason: FailureReason::Timeout,
                    });
                }
                Ok(Err(e)) => {
                    tracing::warn!(provider = %provider, symbol = %req.symbol, kind = %req.kind, error = %e, "provider failed; falling back");
                    attempts.push(Attempt {
                        provider,
                        reason: FailureReason::Unavailable { msg: e.to_string() },
                    });
                }
                Ok(Ok(value)) => {
                    let payload = value.clone().into_payload();
                    if payload.is_empty() {
                        tracing::debug!(provider = %provider, symbol = %req.symbol, kind = %req.kind, "provider returned empty payload; falling back");
                        attempts.push(Attempt {
                            provider,
                            reason: FailureReason::Empty,
                        });
                        continue;
                    }
                    let reliability = snapshot
                        .descriptor(&provider)
                        .map_or(70, |d| d.reliability);
                    let hint = self.register.get(&req.symbol);
                    let report = quality::score(
                        &payload,
                        reliability,
                        now,
                        hint,
                        &snapshot.config().scoring,
                    );
                    if !report.meets(threshold) {
                        tracing::warn!(
                            provider = %provider,
                            symbol = %req.symbol,
                            kind = %req.kind,
                            overall = report.overall,
                            threshold,
                            "payload scored below acceptance threshold; falling back"
                        );
                        attempts.push(Attempt {
                            provider,
                            reason: FailureReason::LowQuality {
                                overall: report.overall,
                            },
                        });
                        continue;
                    }

                    if let Some(price) = payload.current_price() {
                        self.register.update(&req.symbol, price);
                    }
                    self.cache
                        .put(
                            cache_key.clone(),
                            CachedFetch {
                                payload,
                                source: provider.clone(),
                                quality: report.clone(),
                                cached_at: now,
                            },
                        )
                        .await;

                    return Ok(FetchOutcome {
                        payload: value,
                        source: provider,
                        quality: report,
                        fetched_at: now,
                        from_cache: false,
                    });
                }
            }
        }

        Err(FeedError::Exhausted { attempts })
    }

    pub(crate) fn snapshot(&self) -> Arc<RegistrySnapshot> {
        self.registry.snapshot()
    }
}
