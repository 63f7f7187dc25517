use polyfeed_types::{FeedError, FetchOutcome, FetchRequest, Metric, QuotePayload};

use crate::Polyfeed;

impl Polyfeed {
    /// Fetch a point-in-time quote for a single symbol.
    ///
    /// Behavior and trade-offs:
    /// - Cache-first: a fresh cached quote short-circuits the provider walk
    ///   entirely and returns `from_cache = true`.
    /// - Providers are tried sequentially in resolver order and each call
    ///   is bounded by the quote deadline; a timeout, an error, an empty
    ///   payload, or a below-threshold quality score all fall through to
    ///   the next candidate.
    ///
    /// # Errors
    /// `Exhausted` carries the ordered per-provider failure report when
    /// every candidate was tried; `NoEligibleProviders` flags the
    /// misconfiguration case where none was even eligible.
    pub async fn quote(&self, symbol: &str) -> Result<FetchOutcome<QuotePayload>, FeedError> {
        self.quote_request(FetchRequest::quote(symbol)).await
    }

    /// Fetch a quote with routing steered toward the provider preferred
    /// for `metric` (e.g. the lowest-latency source for `current_price`
    /// while the market is open).
    ///
    /// # Errors
    /// Same contract as [`quote`](Self::quote).
    pub async fn quote_for_metric(
        &self,
        symbol: &str,
        metric: Metric,
    ) -> Result<FetchOutcome<QuotePayload>, FeedError> {
        self.quote_request(FetchRequest::quote(symbol).with_metric(metric))
            .await
    }

    async fn quote_request(
        &self,
        req: FetchRequest,
    ) -> Result<FetchOutcome<QuotePayload>, FeedError> {
        self.fetch_single(&req, |connector, symbol| {
            connector.as_quote_provider()?;
            Some(async move {
                match connector.as_quote_provider() {
                    Some(p) => p.quote(&symbol).await,
                    None => Err(FeedError::unsupported("quote")),
                }
            })
        })
        .await
    }

    /// Fetch quotes for multiple symbols concurrently.
    ///
    /// Returns `(outcomes, failures)` so a partially successful batch does
    /// not fail as a whole; failures carry the symbol they belong to.
    pub async fn quotes(
        &self,
        symbols: &[&str],
    ) -> (Vec<FetchOutcome<QuotePayload>>, Vec<(String, FeedError)>) {
        let tasks = symbols.iter().map(|symbol| {
            let symbol = (*symbol).to_string();
            async move {
                let res = self.quote(&symbol).await;
                (symbol, res)
            }
        });
        let results = futures::future::join_all(tasks).await;

        let mut outcomes = Vec::new();
        let mut failures = Vec::new();
        for (symbol, res) in results {
            match res {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => failures.push((symbol, e)),
            }
        }
        (outcomes, failures)
    }
}
