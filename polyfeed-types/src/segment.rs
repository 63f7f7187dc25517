//! Market segment classification derived from symbol strings.

use core::fmt;
use serde::{Deserialize, Serialize};

/// Market segment of a symbol, driving provider eligibility and session rules.
///
/// Always recomputed from the symbol string; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MarketSegment {
    /// Mainland China A-share markets (Shanghai / Shenzhen).
    AShares,
    /// Hong Kong Stock Exchange.
    HongKong,
    /// United States exchanges.
    Us,
}

impl MarketSegment {
    /// Derive the segment from a symbol string.
    ///
    /// Rules, checked in order:
    /// - suffixes `.SS`, `.SH`, `.SZ` → A-shares; `.HK` → Hong Kong
    /// - bare all-digit symbols: 6 digits → A-shares, 1–5 digits → Hong Kong
    /// - anything else → US
    ///
    /// The derivation is total: every symbol maps to some segment, so a
    /// mistyped symbol fails downstream at fetch time, not here.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Self {
        let upper = symbol.trim().to_ascii_uppercase();
        if let Some((_, suffix)) = upper.rsplit_once('.') {
            return match suffix {
                "SS" | "SH" | "SZ" => Self::AShares,
                "HK" => Self::HongKong,
                _ => Self::Us,
            };
        }
        if !upper.is_empty() && upper.bytes().all(|b| b.is_ascii_digit()) {
            return if upper.len() == 6 {
                Self::AShares
            } else {
                Self::HongKong
            };
        }
        Self::Us
    }

    /// Stable lowercase identifier for logs and cache keys.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AShares => "a-shares",
            Self::HongKong => "hong-kong",
            Self::Us => "us",
        }
    }

    /// All segments, in a fixed order.
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::AShares, Self::HongKong, Self::Us]
    }
}

impl fmt::Display for MarketSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
