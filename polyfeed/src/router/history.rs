use polyfeed_types::{BarSeries, DateRange, FeedError, FetchOutcome, FetchRequest};

use crate::Polyfeed;

impl Polyfeed {
    /// Fetch historical daily bars over an inclusive date range.
    ///
    /// Behavior and trade-offs:
    /// - The cache key buckets on the day-granular range, so overlapping
    ///   but distinct ranges are cached independently.
    /// - The consistency battery compares the latest cached close against
    ///   the price register's freshest hint for the symbol, catching
    ///   providers whose history has drifted from reality.
    ///
    /// # Errors
    /// `Exhausted` with the ordered failure report after the full candidate
    /// walk, or `NoEligibleProviders` when the candidate list was empty.
    pub async fn history(
        &self,
        symbol: &str,
        range: DateRange,
    ) -> Result<FetchOutcome<BarSeries>, FeedError> {
        let req = FetchRequest::history(symbol, range);
        self.fetch_single(&req, move |connector, symbol| {
            connector.as_history_provider()?;
            Some(async move {
                match connector.as_history_provider() {
                    Some(p) => p.history(&symbol, range).await,
                    None => Err(FeedError::unsupported("history")),
                }
            })
        })
        .await
    }
}
