use polyfeed_types::{FeedError, FetchOutcome, FetchRequest, NewsItem};

use crate::Polyfeed;

impl Polyfeed {
    /// Fetch up to `limit` recent news items for a symbol.
    ///
    /// News is cached per symbol, not per limit: a cached batch is
    /// truncated to the requested limit on the way out, trading a little
    /// freshness granularity for a much higher hit rate across report
    /// sections asking for different counts.
    ///
    /// # Errors
    /// `Exhausted` with the ordered failure report after the full candidate
    /// walk, or `NoEligibleProviders` when the candidate list was empty.
    pub async fn news(
        &self,
        symbol: &str,
        limit: usize,
    ) -> Result<FetchOutcome<Vec<NewsItem>>, FeedError> {
        let req = FetchRequest::news(symbol);
        let mut outcome = self
            .fetch_single(&req, move |connector, symbol| {
                connector.as_news_provider()?;
                Some(async move {
                    match connector.as_news_provider() {
                        Some(p) => p.news(&symbol, limit).await,
                        None => Err(FeedError::unsupported("news")),
                    }
                })
            })
            .await?;
        outcome.payload.truncate(limit);
        Ok(outcome)
    }
}
