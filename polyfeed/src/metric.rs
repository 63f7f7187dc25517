//! Metric router: per-metric provider preference, conditioned on whether
//! the symbol's market session is currently live.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use polyfeed_core::is_market_open;
use polyfeed_types::{MarketSegment, Metric, MetricRoute, ProviderKey};

/// Config-driven mapping from metric to a preferred provider.
pub(crate) struct MetricRouter {
    routes: HashMap<Metric, MetricRoute>,
}

impl MetricRouter {
    pub(crate) fn new(routes: HashMap<Metric, MetricRoute>) -> Self {
        Self { routes }
    }

    /// Preferred provider for `metric` in `segment` at `now`, if routed.
    ///
    /// The market-phase preference (`open`/`closed`) wins when configured;
    /// `any` is the phase-independent fallback. The result is only a hint:
    /// the priority resolver ignores it unless the provider is in the
    /// eligible set.
    pub(crate) fn route(
        &self,
        metric: Metric,
        segment: MarketSegment,
        now: DateTime<Utc>,
    ) -> Option<&ProviderKey> {
        let route = self.routes.get(&metric)?;
        let phase_pref = if is_market_open(segment, now) {
            route.open.as_ref()
        } else {
            route.closed.as_ref()
        };
        phase_pref.or(route.any.as_ref())
    }
}
