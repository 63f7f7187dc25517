//! Deterministic fixture data keyed off the symbol string.

use chrono::{Datelike, Utc};

use polyfeed_core::{Bar, BarSeries, DateRange, FundamentalsPayload, NewsItem, QuotePayload};

/// Stable pseudo-price in the 20..100 range derived from the symbol bytes.
pub(crate) fn base_price(symbol: &str) -> f64 {
    let sum: u32 = symbol.bytes().map(u32::from).sum();
    20.0 + f64::from(sum % 80)
}

pub(crate) fn quote(symbol: &str) -> QuotePayload {
    let price = base_price(symbol);
    let shares = 1.0e9;
    QuotePayload {
        symbol: symbol.to_string(),
        name: Some(format!("{symbol} Holdings")),
        price: Some(price),
        prev_close: Some(price * 0.99),
        open: Some(price * 0.995),
        high: Some(price * 1.01),
        low: Some(price * 0.985),
        volume: Some(2_500_000.0),
        turnover: Some(price * 2_500_000.0),
        market_cap: Some(price * shares),
        shares_outstanding: Some(shares),
        pe_ratio: Some(18.0),
        pb_ratio: Some(2.4),
        ps_ratio: None,
        revenue_ttm: None,
        ma5: Some(price * 0.998),
        ma10: Some(price * 0.99),
        ma20: Some(price * 0.98),
        as_of: Some(Utc::now()),
    }
}

pub(crate) fn history(symbol: &str, range: DateRange) -> BarSeries {
    let base = base_price(symbol);
    let mut bars = Vec::new();
    let mut day = range.start;
    while day <= range.end {
        // Weekdays only; a deterministic wiggle keeps the series non-flat.
        if day.weekday().number_from_monday() <= 5 {
            let wiggle = f64::from(day.ordinal() % 11) / 100.0;
            let close = base * (0.97 + wiggle);
            bars.push(Bar {
                date: day,
                open: Some(close * 0.997),
                high: Some(close * 1.008),
                low: Some(close * 0.992),
                close: Some(close),
                volume: Some(1_800_000.0),
            });
        }
        let Some(next) = day.succ_opt() else { break };
        day = next;
    }
    BarSeries {
        symbol: symbol.to_string(),
        bars,
    }
}

pub(crate) fn fundamentals(symbol: &str) -> FundamentalsPayload {
    let price = base_price(symbol);
    let shares = 1.0e9;
    let eps = price / 18.0;
    FundamentalsPayload {
        symbol: symbol.to_string(),
        pe_ratio: Some(18.0),
        pb_ratio: Some(2.4),
        ps_ratio: Some(5.0),
        eps: Some(eps),
        roe: Some(14.2),
        market_cap: Some(price * shares),
        shares_outstanding: Some(shares),
        revenue_ttm: Some(price * shares / 5.0),
        net_income_ttm: Some(eps * shares),
        price: Some(price),
        report_date: Some(Utc::now().date_naive()),
    }
}

pub(crate) fn news(symbol: &str, limit: usize) -> Vec<NewsItem> {
    (0..limit.min(5))
        .map(|i| NewsItem {
            title: format!("{symbol} headline #{}", i + 1),
            source: Some("mock-wire".to_string()),
            url: Some(format!("https://news.example.com/{symbol}/{i}")),
            summary: Some("Deterministic fixture article.".to_string()),
            published_at: Some(Utc::now() - chrono::Duration::hours(i as i64)),
        })
        .collect()
}
