//! Market-session calendar.
//!
//! `is_market_open` is a pure function of wall-clock time, weekday, and
//! segment-specific session windows; it performs no I/O and consults no
//! exchange holiday feed. Holidays therefore read as "open", acceptable
//! for routing preferences, which only steer provider ordering.

use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use chrono_tz::Tz;

use polyfeed_types::MarketSegment;

/// Trading session windows as minutes since local midnight, half-open.
const A_SHARES_SESSIONS: &[(u32, u32)] = &[(9 * 60 + 30, 11 * 60 + 30), (13 * 60, 15 * 60)];
const HONG_KONG_SESSIONS: &[(u32, u32)] = &[(9 * 60 + 30, 12 * 60), (13 * 60, 16 * 60)];
const US_SESSIONS: &[(u32, u32)] = &[(9 * 60 + 30, 16 * 60)];

const fn exchange_tz(segment: MarketSegment) -> Tz {
    match segment {
        MarketSegment::AShares => chrono_tz::Asia::Shanghai,
        MarketSegment::HongKong => chrono_tz::Asia::Hong_Kong,
        MarketSegment::Us => chrono_tz::America::New_York,
    }
}

const fn sessions(segment: MarketSegment) -> &'static [(u32, u32)] {
    match segment {
        MarketSegment::AShares => A_SHARES_SESSIONS,
        MarketSegment::HongKong => HONG_KONG_SESSIONS,
        MarketSegment::Us => US_SESSIONS,
    }
}

/// Whether the segment's market is in a live trading session at `now`.
///
/// Session starts are inclusive and ends exclusive, so 09:30:00 is open
/// and 15:00:00 (A-shares close) is not.
#[must_use]
pub fn is_market_open(segment: MarketSegment, now: DateTime<Utc>) -> bool {
    let local = now.with_timezone(&exchange_tz(segment));
    if matches!(local.weekday(), Weekday::Sat | Weekday::Sun) {
        return false;
    }
    let minute = local.hour() * 60 + local.minute();
    sessions(segment)
        .iter()
        .any(|&(start, end)| minute >= start && minute < end)
}
