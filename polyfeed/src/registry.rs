//! Source registry: validated provider configuration behind atomic snapshots.
//!
//! Business logic never reads raw configuration; it takes a snapshot and
//! works only with the already-validated descriptor set. A request started
//! under one snapshot finishes under it even if a reload lands mid-flight.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, RwLock};

use polyfeed_core::FeedConnector;
use polyfeed_types::{
    DataKind, EngineConfig, FeedError, MarketSegment, Metric, ProviderDescriptor, ProviderKey,
};

use crate::metric::MetricRouter;

/// Immutable view of the registry at one point in time.
pub struct RegistrySnapshot {
    descriptors: Vec<ProviderDescriptor>,
    connectors: HashMap<ProviderKey, Arc<dyn FeedConnector>>,
    config: EngineConfig,
    metric_router: MetricRouter,
}

impl RegistrySnapshot {
    /// Enabled descriptors serving `segment`/`kind`, in configuration order.
    pub fn list_enabled(
        &self,
        segment: MarketSegment,
        kind: DataKind,
    ) -> Vec<&ProviderDescriptor> {
        self.descriptors
            .iter()
            .filter(|d| d.serves(segment, kind))
            .collect()
    }

    /// Descriptor for a provider key, if configured.
    pub fn descriptor(&self, key: &ProviderKey) -> Option<&ProviderDescriptor> {
        self.descriptors.iter().find(|d| &d.id == key)
    }

    /// Connector registered under a provider key.
    pub fn connector(&self, key: &ProviderKey) -> Option<&Arc<dyn FeedConnector>> {
        self.connectors.get(key)
    }

    /// The validated configuration this snapshot was built from.
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Metric-preferred provider for a segment at `now`, if routed.
    pub fn route_metric(
        &self,
        metric: Metric,
        segment: MarketSegment,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Option<&ProviderKey> {
        self.metric_router.route(metric, segment, now)
    }
}

/// Holds the registered connectors and the current configuration snapshot.
pub struct SourceRegistry {
    connectors: HashMap<ProviderKey, Arc<dyn FeedConnector>>,
    registration_order: Vec<ProviderKey>,
    snapshot: RwLock<Arc<RegistrySnapshot>>,
}

impl SourceRegistry {
    /// Build the registry from connectors (in registration order) and the
    /// initial configuration. Configuration problems degrade to defaults.
    pub fn new(connectors: Vec<Arc<dyn FeedConnector>>, config: EngineConfig) -> Self {
        let registration_order: Vec<ProviderKey> = connectors.iter().map(|c| c.key()).collect();
        let connector_map: HashMap<ProviderKey, Arc<dyn FeedConnector>> =
            connectors.into_iter().map(|c| (c.key(), c)).collect();
        let (snapshot, _) = build_snapshot(&connector_map, &registration_order, config);
        log_enabled_set(&snapshot, None);
        Self {
            connectors: connector_map,
            registration_order,
            snapshot: RwLock::new(Arc::new(snapshot)),
        }
    }

    /// Current snapshot. The lock is held only to clone the `Arc`.
    pub fn snapshot(&self) -> Arc<RegistrySnapshot> {
        self.snapshot
            .read()
            .map(|guard| Arc::clone(&guard))
            .unwrap_or_else(|poisoned| Arc::clone(&poisoned.into_inner()))
    }

    /// Atomically swap in a new configuration.
    ///
    /// Unknown provider ids are dropped with a warning; a configuration
    /// whose provider list validates down to nothing falls back to
    /// defaults derived from the registered connectors, logs at error
    /// level, and keeps serving; the returned `Err` only signals that the
    /// supplied configuration was not applied as-is.
    ///
    /// # Errors
    /// Returns `FeedError::Config` when a non-empty provider list had no
    /// valid entry.
    pub fn reload(&self, config: EngineConfig) -> Result<(), FeedError> {
        let (snapshot, fell_back) =
            build_snapshot(&self.connectors, &self.registration_order, config);
        let previous = self.snapshot();
        log_enabled_set(&snapshot, Some(&previous));
        if let Ok(mut guard) = self.snapshot.write() {
            *guard = Arc::new(snapshot);
        }
        if fell_back {
            return Err(FeedError::Config(
                "no configured provider matched a registered connector; fell back to defaults"
                    .to_string(),
            ));
        }
        Ok(())
    }
}

/// Validate a configuration against the registered connectors. Returns the
/// snapshot and whether a non-empty provider list degraded to defaults.
fn build_snapshot(
    connectors: &HashMap<ProviderKey, Arc<dyn FeedConnector>>,
    registration_order: &[ProviderKey],
    mut config: EngineConfig,
) -> (RegistrySnapshot, bool) {
    let supplied_any = !config.providers.is_empty();
    let mut seen: BTreeSet<ProviderKey> = BTreeSet::new();
    let mut descriptors: Vec<ProviderDescriptor> = Vec::new();
    for descriptor in config.providers.drain(..) {
        if !connectors.contains_key(&descriptor.id) {
            tracing::warn!(provider = %descriptor.id, "dropping descriptor for unregistered connector");
            continue;
        }
        if !seen.insert(descriptor.id.clone()) {
            tracing::warn!(provider = %descriptor.id, "dropping duplicate descriptor");
            continue;
        }
        descriptors.push(descriptor);
    }

    let fell_back = supplied_any && descriptors.is_empty();
    if descriptors.is_empty() {
        if fell_back {
            tracing::error!(
                "provider configuration invalid; falling back to defaults from registered connectors"
            );
        }
        descriptors = default_descriptors(connectors, registration_order);
    }
    config.providers = descriptors.clone();

    let metric_router = MetricRouter::new(config.metric_routes.clone());
    (
        RegistrySnapshot {
            descriptors,
            connectors: connectors.clone(),
            config,
            metric_router,
        },
        fell_back,
    )
}

/// Hard-coded degradation path: every registered connector, enabled, with
/// the default reliability weight and whatever segments/capabilities it
/// advertises itself.
fn default_descriptors(
    connectors: &HashMap<ProviderKey, Arc<dyn FeedConnector>>,
    registration_order: &[ProviderKey],
) -> Vec<ProviderDescriptor> {
    let mut seen: BTreeSet<&ProviderKey> = BTreeSet::new();
    registration_order
        .iter()
        .filter(|key| seen.insert(*key))
        .filter_map(|key| connectors.get(key).map(|c| (key, c)))
        .map(|(key, connector)| {
            let markets: BTreeSet<MarketSegment> = MarketSegment::all()
                .into_iter()
                .filter(|&segment| connector.supports_segment(segment))
                .collect();
            ProviderDescriptor {
                id: key.clone(),
                display_name: connector.vendor().to_string(),
                markets,
                enabled: true,
                reliability: 70,
                capabilities: connector.capabilities(),
            }
        })
        .collect()
}

fn log_enabled_set(snapshot: &RegistrySnapshot, previous: Option<&RegistrySnapshot>) {
    let enabled: Vec<&str> = snapshot
        .descriptors
        .iter()
        .filter(|d| d.enabled)
        .map(|d| d.id.as_str())
        .collect();
    let changed = previous.is_none_or(|prev| {
        let before: Vec<&str> = prev
            .descriptors
            .iter()
            .filter(|d| d.enabled)
            .map(|d| d.id.as_str())
            .collect();
        before != enabled
    });
    if changed {
        tracing::info!(providers = ?enabled, "enabled provider set resolved");
    }
}
