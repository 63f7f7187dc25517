use polyfeed_types::{DataKind, FetchRequest};

/// Identity of a cached fetch: symbol, kind, and the day-granular bucket of
/// the requested date range.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    symbol: String,
    kind: DataKind,
    bucket: Option<String>,
}

impl CacheKey {
    /// Data kind this key belongs to.
    #[must_use]
    pub const fn kind(&self) -> DataKind {
        self.kind
    }

    /// Stable string form used by the persistent tier's map.
    #[must_use]
    pub fn storage_key(&self) -> String {
        match &self.bucket {
            Some(bucket) => format!("{}:{}:{}", self.kind, self.symbol, bucket),
            None => format!("{}:{}", self.kind, self.symbol),
        }
    }
}

impl From<&FetchRequest> for CacheKey {
    fn from(req: &FetchRequest) -> Self {
        Self {
            symbol: req.symbol.trim().to_ascii_uppercase(),
            kind: req.kind,
            bucket: req.range.as_ref().map(polyfeed_types::DateRange::bucket),
        }
    }
}
