//! Last-known-price register.
//!
//! Populated opportunistically by any accepted fetch that carries a current
//! price, and read by consistency checks that compare a historical close
//! against the freshest known price. It is a hint, not a source of truth:
//! lookups may be stale or absent and must never block the caller.

use std::collections::HashMap;
use std::sync::RwLock;

/// Injectable register of the freshest known price per symbol.
///
/// Implementations must be cheap and non-blocking; the lock (if any) is
/// held only for the map operation, never across I/O.
pub trait PriceRegister: Send + Sync {
    /// Freshest known price for `symbol`, if any.
    fn get(&self, symbol: &str) -> Option<f64>;

    /// Record a freshly observed price for `symbol`.
    fn update(&self, symbol: &str, price: f64);
}

/// Default in-process register backed by a `RwLock<HashMap>`.
#[derive(Debug, Default)]
pub struct InMemoryPriceRegister {
    inner: RwLock<HashMap<String, f64>>,
}

impl InMemoryPriceRegister {
    /// Create an empty register.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PriceRegister for InMemoryPriceRegister {
    fn get(&self, symbol: &str) -> Option<f64> {
        // A poisoned lock degrades to "no hint" rather than propagating.
        self.inner
            .read()
            .ok()
            .and_then(|map| map.get(symbol).copied())
    }

    fn update(&self, symbol: &str, price: f64) {
        if !price.is_finite() || price <= 0.0 {
            return;
        }
        if let Ok(mut map) = self.inner.write() {
            map.insert(symbol.to_string(), price);
        }
    }
}
