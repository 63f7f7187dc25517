//! Priority resolver: ordered provider candidates per request.

use chrono::{DateTime, Utc};

use polyfeed_types::{DataKind, MarketSegment, Metric, ProviderKey};

use crate::registry::RegistrySnapshot;

/// Ordered candidate providers for a segment/kind pair.
///
/// Algorithm: filter the snapshot's enabled descriptors to those serving
/// the segment and kind; order by descending static reliability with ties
/// broken by configuration order (deterministic, never random); then, when
/// a metric is given and the metric router names a provider already in the
/// set, move it to the front. An empty result means "exhausted before
/// starting", not an error; callers decide how to degrade.
pub(crate) fn resolve(
    snapshot: &RegistrySnapshot,
    segment: MarketSegment,
    kind: DataKind,
    metric: Option<Metric>,
    now: DateTime<Utc>,
) -> Vec<ProviderKey> {
    let mut eligible: Vec<(usize, &polyfeed_types::ProviderDescriptor)> = snapshot
        .list_enabled(segment, kind)
        .into_iter()
        .enumerate()
        .collect();
    eligible.sort_by_key(|(config_idx, d)| (std::cmp::Reverse(d.reliability), *config_idx));

    let mut ordered: Vec<ProviderKey> =
        eligible.into_iter().map(|(_, d)| d.id.clone()).collect();

    if let Some(metric) = metric
        && let Some(preferred) = snapshot.route_metric(metric, segment, now)
        && let Some(pos) = ordered.iter().position(|k| k == preferred)
        && pos > 0
    {
        let preferred = ordered.remove(pos);
        ordered.insert(0, preferred);
    }

    ordered
}
