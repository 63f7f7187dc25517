//! polyfeed-core
//!
//! Contracts and pure domain logic shared across the polyfeed ecosystem.
//!
//! - `connector`: the `FeedConnector` trait and capability provider traits.
//! - `quality`: the deterministic payload quality scorer.
//! - `sessions`: market-session calendar (`is_market_open`).
//! - `register`: the injectable last-known-price register.
//! - `stats`: descriptive statistics for cross-source validation.
//!
//! Async runtime (Tokio)
//! ---------------------
//! Connector role traits are `async_trait` and are driven by the `polyfeed`
//! orchestrator under a Tokio 1.x runtime; everything else in this crate is
//! synchronous and runtime-agnostic.
#![warn(missing_docs)]

/// Connector capability traits and the primary `FeedConnector` interface.
pub mod connector;
/// Deterministic quality scoring of fetched payloads.
pub mod quality;
/// Injectable last-known-price register.
pub mod register;
/// Market-session calendar per segment.
pub mod sessions;
/// Descriptive statistics over per-source samples.
pub mod stats;

pub use connector::FeedConnector;
pub use quality::score;
pub use register::{InMemoryPriceRegister, PriceRegister};
pub use sessions::is_market_open;
pub use stats::sample_stats;

// Re-export the shared data model so downstream crates can depend on
// `polyfeed-core` only.
pub use polyfeed_types::*;
