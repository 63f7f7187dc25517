use std::collections::BTreeMap;

use chrono::Utc;
use futures::stream::{FuturesUnordered, StreamExt};

use polyfeed_core::{quality, sample_stats};
use polyfeed_types::{
    CrossValidationResult, DataKind, FeedError, MarketSegment, Metric, Payload, ProviderKey,
    QuotePayload,
};

use crate::{Polyfeed, resolver};

/// Sources agree when the coefficient of variation stays below this many
/// percent of the mean.
const CONSISTENT_CV_PERCENT: f64 = 5.0;

impl Polyfeed {
    /// Fan one metric out to several providers in parallel and reconcile
    /// the answers into a consensus value plus a confidence measure.
    ///
    /// Behavior and trade-offs:
    /// - An on-demand diagnostic for high-stakes single metrics, not for
    ///   bulk fetches: every call costs one quote per fanned-out provider.
    /// - The fan-out is capped by the configured limit and bounded by the
    ///   cross-validation deadline; respondents that arrive after the
    ///   deadline are simply not counted.
    /// - `recommended_value` is the median (robust to one outlier
    ///   provider); `recommended_source` is the respondent with the
    ///   highest quality score; `confidence` shrinks linearly as the
    ///   coefficient of variation grows.
    ///
    /// # Errors
    /// `NoEligibleProviders` when neither the caller nor the resolver
    /// yields any candidate.
    pub async fn cross_validate(
        &self,
        symbol: &str,
        metric: Metric,
        providers: Option<&[ProviderKey]>,
    ) -> Result<CrossValidationResult, FeedError> {
        let snapshot = self.snapshot();
        let now = Utc::now();
        let segment = MarketSegment::from_symbol(symbol);

        let candidates: Vec<ProviderKey> = providers.map_or_else(
            || resolver::resolve(&snapshot, segment, DataKind::Quote, Some(metric), now),
            <[ProviderKey]>::to_vec,
        );
        if candidates.is_empty() {
            return Err(FeedError::NoEligibleProviders {
                segment,
                kind: DataKind::Quote,
            });
        }

        let config = snapshot.config();
        let fanout = config.effective_crossval_fanout();
        let per_call_deadline = config.timeouts.for_kind(DataKind::Quote);
        let scoring = config.scoring;

        let mut futs = FuturesUnordered::new();
        for (order, provider) in candidates.into_iter().take(fanout).enumerate() {
            let Some(connector) = snapshot.connector(&provider) else {
                continue;
            };
            if connector.as_quote_provider().is_none() {
                continue;
            }
            let connector = std::sync::Arc::clone(connector);
            let symbol = symbol.to_string();
            futs.push(async move {
                let res = tokio::time::timeout(per_call_deadline, async {
                    match connector.as_quote_provider() {
                        Some(p) => p.quote(&symbol).await,
                        None => Err(FeedError::unsupported("quote")),
                    }
                })
                .await;
                (order, provider, res)
            });
        }

        // Collect within the overall deadline; stragglers are dropped with
        // their in-flight calls cancelled.
        let mut respondents: Vec<(usize, ProviderKey, QuotePayload)> = Vec::new();
        let overall = tokio::time::sleep(config.timeouts.crossval());
        tokio::pin!(overall);
        loop {
            tokio::select! {
                () = &mut overall => {
                    tracing::warn!(%symbol, metric = %metric, "cross-validation deadline reached; proceeding with respondents so far");
                    break;
                }
                next = futs.next() => {
                    match next {
                        None => break,
                        Some((order, provider, Ok(Ok(payload)))) => {
                            respondents.push((order, provider, payload));
                        }
                        Some((_, provider, Ok(Err(e)))) => {
                            tracing::debug!(%provider, %symbol, error = %e, "cross-validation respondent failed");
                        }
                        Some((_, provider, Err(_))) => {
                            tracing::debug!(%provider, %symbol, "cross-validation respondent timed out");
                        }
                    }
                }
            }
        }

        let mut per_source: BTreeMap<ProviderKey, f64> = BTreeMap::new();
        let mut scored: Vec<(usize, ProviderKey, u8)> = Vec::new();
        for (order, provider, quote) in respondents {
            let Some(value) = quote.metric_value(metric) else {
                tracing::debug!(%provider, %symbol, metric = %metric, "respondent lacks the requested metric");
                continue;
            };
            let reliability = snapshot.descriptor(&provider).map_or(70, |d| d.reliability);
            let hint = self.register.get(symbol);
            let report = quality::score(&Payload::Quote(quote), reliability, now, hint, &scoring);
            per_source.insert(provider.clone(), value);
            scored.push((order, provider, report.overall));
        }

        let stats = sample_stats(&per_source.values().copied().collect::<Vec<_>>());
        let (is_consistent, confidence) = stats.map_or((false, 0.0), |s| {
            (
                s.cv_percent < CONSISTENT_CV_PERCENT,
                (1.0 - s.cv_percent / 10.0).clamp(0.0, 1.0),
            )
        });

        // Highest quality wins; ties resolve by resolver order for
        // determinism.
        scored.sort_by_key(|(order, _, overall)| (std::cmp::Reverse(*overall), *order));
        let recommended_source = scored.first().map(|(_, provider, _)| provider.clone());

        Ok(CrossValidationResult {
            per_source,
            stats,
            is_consistent,
            recommended_source,
            recommended_value: stats.map(|s| s.median),
            confidence,
        })
    }
}
