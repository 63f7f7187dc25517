use polyfeed_types::{FeedError, FetchOutcome, FetchRequest, FundamentalsPayload};

use crate::Polyfeed;

impl Polyfeed {
    /// Fetch valuation and statement fundamentals for a symbol.
    ///
    /// Fundamentals tolerate long cache TTLs (hours by default); the
    /// consistency battery recomputes market cap and valuation ratios from
    /// their components and penalizes disagreement.
    ///
    /// # Errors
    /// `Exhausted` with the ordered failure report after the full candidate
    /// walk, or `NoEligibleProviders` when the candidate list was empty.
    pub async fn fundamentals(
        &self,
        symbol: &str,
    ) -> Result<FetchOutcome<FundamentalsPayload>, FeedError> {
        let req = FetchRequest::fundamentals(symbol);
        self.fetch_single(&req, |connector, symbol| {
            connector.as_fundamentals_provider()?;
            Some(async move {
                match connector.as_fundamentals_provider() {
                    Some(p) => p.fundamentals(&symbol).await,
                    None => Err(FeedError::unsupported("fundamentals")),
                }
            })
        })
        .await
    }
}
