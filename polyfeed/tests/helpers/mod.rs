// Re-export helpers so tests can `use helpers::*;`
pub mod scripted_connector;

pub use scripted_connector::ScriptedConnector;

use std::collections::BTreeSet;
use std::sync::Arc;

use polyfeed::{
    DataKind, EngineConfig, FeedConnector, MarketSegment, Polyfeed, ProviderDescriptor,
    QuotePayload,
};

/// Common symbol constants used across tests.
pub const MOUTAI: &str = "600519.SS";
#[allow(dead_code)]
pub const TENCENT: &str = "0700.HK";
#[allow(dead_code)]
pub const AAPL: &str = "AAPL";

/// A fully populated, internally consistent quote that clears the default
/// acceptance threshold for any reasonable reliability weight.
pub fn clean_quote(symbol: &str, price: f64) -> QuotePayload {
    let shares = 1.0e9;
    QuotePayload {
        symbol: symbol.to_string(),
        name: Some(format!("{symbol} Co.")),
        price: Some(price),
        prev_close: Some(price * 0.99),
        open: Some(price * 0.995),
        high: Some(price * 1.01),
        low: Some(price * 0.985),
        volume: Some(1_000_000.0),
        turnover: Some(price * 1_000_000.0),
        market_cap: Some(price * shares),
        shares_outstanding: Some(shares),
        pe_ratio: Some(20.0),
        pb_ratio: Some(3.0),
        ps_ratio: None,
        revenue_ttm: None,
        ma5: Some(price * 0.998),
        ma10: Some(price * 0.99),
        ma20: Some(price * 0.98),
        as_of: Some(chrono::Utc::now()),
    }
}

/// A quote whose session range is impossible and whose field coverage is
/// thin; at default-reliability weights it scores just below the 60-point
/// acceptance gate.
pub fn inconsistent_quote(symbol: &str) -> QuotePayload {
    QuotePayload {
        symbol: symbol.to_string(),
        price: Some(9.5),
        high: Some(9.0),
        low: Some(10.0),
        ..QuotePayload::default()
    }
}

/// Descriptor covering all segments for the given kinds.
pub fn descriptor(id: &str, reliability: u8, kinds: &[DataKind]) -> ProviderDescriptor {
    ProviderDescriptor::new(id, id)
        .with_reliability(reliability)
        .with_capabilities(kinds.iter().copied())
}

/// Descriptor restricted to specific segments.
#[allow(dead_code)]
pub fn descriptor_for(
    id: &str,
    reliability: u8,
    segments: &[MarketSegment],
    kinds: &[DataKind],
) -> ProviderDescriptor {
    let markets: BTreeSet<MarketSegment> = segments.iter().copied().collect();
    ProviderDescriptor::new(id, id)
        .with_reliability(reliability)
        .with_markets(markets)
        .with_capabilities(kinds.iter().copied())
}

/// Build an engine from connectors and configuration, panicking on builder
/// misuse (tests always register at least one connector).
pub fn engine_with(connectors: Vec<Arc<dyn FeedConnector>>, config: EngineConfig) -> Polyfeed {
    let mut builder = Polyfeed::builder().config(config);
    for connector in connectors {
        builder = builder.with_connector(connector);
    }
    builder.build().expect("engine builds")
}
