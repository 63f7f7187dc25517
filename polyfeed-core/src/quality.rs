//! Deterministic quality scoring of fetched payloads.
//!
//! `score` is a pure function: wall-clock time and the price-register hint
//! are explicit inputs, so identical inputs always yield byte-identical
//! reports. The four axes (completeness, consistency, timeliness, static
//! source reliability) are combined
//! 30/30/20/20 by [`QualityReport::from_axes`].

use chrono::{DateTime, Utc};

use polyfeed_types::{
    Bar, BarSeries, FundamentalsPayload, NewsItem, Payload, QualityReport, QuotePayload,
    ScoringConfig,
};

/// Score a payload fetched from a provider with the given static
/// reliability. `price_hint` is the freshest known price for the symbol,
/// when available; it feeds the historical-close sanity check.
#[must_use]
pub fn score(
    payload: &Payload,
    source_reliability: u8,
    now: DateTime<Utc>,
    price_hint: Option<f64>,
    cfg: &ScoringConfig,
) -> QualityReport {
    let completeness = completeness(payload);
    let mut ledger = Ledger::new();
    consistency(payload, price_hint, now, cfg, &mut ledger);
    let timeliness = timeliness(payload, now);
    QualityReport::from_axes(
        completeness,
        ledger.score(),
        timeliness,
        source_reliability,
        ledger.issues,
    )
}

/// Running consistency score: a 100 baseline with per-violation penalties,
/// floored at 0, plus the ordered findings.
struct Ledger {
    remaining: i32,
    issues: Vec<String>,
}

impl Ledger {
    const fn new() -> Self {
        Self {
            remaining: 100,
            issues: Vec::new(),
        }
    }

    fn penalize(&mut self, points: u8, issue: String) {
        self.remaining -= i32::from(points);
        self.issues.push(issue);
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    const fn score(&self) -> u8 {
        if self.remaining < 0 { 0 } else { self.remaining as u8 }
    }
}

/// Fraction of present fields scaled to 0..=100, with required fields
/// weighted 70% and optional fields 30%.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn weighted_presence(required_present: usize, required_total: usize, optional_present: usize, optional_total: usize) -> u8 {
    let req = if required_total == 0 {
        1.0
    } else {
        required_present as f64 / required_total as f64
    };
    let opt = if optional_total == 0 {
        1.0
    } else {
        optional_present as f64 / optional_total as f64
    };
    ((req * 70.0) + (opt * 30.0)).round() as u8
}

fn count_present(fields: &[bool]) -> usize {
    fields.iter().filter(|present| **present).count()
}

fn completeness(payload: &Payload) -> u8 {
    match payload {
        Payload::Quote(q) => quote_completeness(q),
        Payload::Bars(b) => bars_completeness(b),
        Payload::Fundamentals(f) => fundamentals_completeness(f),
        Payload::News(items) => news_completeness(items),
    }
}

fn quote_completeness(q: &QuotePayload) -> u8 {
    let required = [
        q.price.is_some(),
        q.open.is_some(),
        q.high.is_some(),
        q.low.is_some(),
        q.prev_close.is_some(),
        q.volume.is_some(),
    ];
    let optional = [
        q.name.is_some(),
        q.market_cap.is_some(),
        q.pe_ratio.is_some(),
        q.pb_ratio.is_some(),
        q.turnover.is_some(),
        q.ma5.is_some(),
        q.ma10.is_some(),
        q.ma20.is_some(),
    ];
    weighted_presence(
        count_present(&required),
        required.len(),
        count_present(&optional),
        optional.len(),
    )
}

fn bars_completeness(series: &BarSeries) -> u8 {
    if series.bars.is_empty() {
        return 0;
    }
    let full_ohlc = series
        .bars
        .iter()
        .filter(|b| b.open.is_some() && b.high.is_some() && b.low.is_some() && b.close.is_some())
        .count();
    let with_volume = series.bars.iter().filter(|b| b.volume.is_some()).count();
    weighted_presence(full_ohlc, series.bars.len(), with_volume, series.bars.len())
}

fn fundamentals_completeness(f: &FundamentalsPayload) -> u8 {
    let required = [
        f.pe_ratio.is_some(),
        f.eps.is_some(),
        f.market_cap.is_some(),
        f.revenue_ttm.is_some(),
    ];
    let optional = [
        f.pb_ratio.is_some(),
        f.ps_ratio.is_some(),
        f.roe.is_some(),
        f.shares_outstanding.is_some(),
        f.net_income_ttm.is_some(),
        f.report_date.is_some(),
    ];
    weighted_presence(
        count_present(&required),
        required.len(),
        count_present(&optional),
        optional.len(),
    )
}

fn news_completeness(items: &[NewsItem]) -> u8 {
    if items.is_empty() {
        return 0;
    }
    let titled = items
        .iter()
        .filter(|i| !i.title.trim().is_empty() && i.published_at.is_some())
        .count();
    let sourced = items
        .iter()
        .filter(|i| i.url.is_some() || i.source.is_some())
        .count();
    weighted_presence(titled, items.len(), sourced, items.len())
}

/// Relative difference of `actual` versus `reference`.
fn relative_gap(actual: f64, reference: f64) -> f64 {
    if reference.abs() < f64::EPSILON {
        return f64::INFINITY;
    }
    ((actual - reference) / reference).abs()
}

fn consistency(
    payload: &Payload,
    price_hint: Option<f64>,
    now: DateTime<Utc>,
    cfg: &ScoringConfig,
    ledger: &mut Ledger,
) {
    match payload {
        Payload::Quote(q) => quote_consistency(q, cfg, ledger),
        Payload::Bars(b) => bars_consistency(b, price_hint, cfg, ledger),
        Payload::Fundamentals(f) => fundamentals_consistency(f, cfg, ledger),
        Payload::News(items) => news_consistency(items, now, cfg, ledger),
    }
}

fn quote_consistency(q: &QuotePayload, cfg: &ScoringConfig, ledger: &mut Ledger) {
    if let (Some(high), Some(low)) = (q.high, q.low)
        && high < low
    {
        ledger.penalize(
            cfg.severe_penalty,
            format!("session high {high} below session low {low}"),
        );
    }
    if let (Some(price), Some(high), Some(low)) = (q.price, q.high, q.low)
        && high >= low
        && (price < low || price > high)
    {
        ledger.penalize(
            cfg.severe_penalty,
            format!("current price {price} outside session range [{low}, {high}]"),
        );
    }
    if let (Some(open), Some(high), Some(low)) = (q.open, q.high, q.low)
        && high >= low
        && (open < low || open > high)
    {
        ledger.penalize(
            cfg.moderate_penalty,
            format!("open {open} outside session range [{low}, {high}]"),
        );
    }
    for (label, value) in [("price", q.price), ("volume", q.volume)] {
        if let Some(v) = value
            && v < 0.0
        {
            ledger.penalize(cfg.severe_penalty, format!("negative {label}: {v}"));
        }
    }
    if let (Some(price), Some(shares), Some(reported)) =
        (q.price, q.shares_outstanding, q.market_cap)
    {
        let computed = price * shares;
        if relative_gap(computed, reported) > cfg.market_cap_tolerance {
            ledger.penalize(
                cfg.major_penalty,
                format!(
                    "market cap {reported} disagrees with price x shares {computed:.0}"
                ),
            );
        }
    }
    if let (Some(market_cap), Some(revenue), Some(reported_ps)) =
        (q.market_cap, q.revenue_ttm, q.ps_ratio)
        && revenue > 0.0
    {
        let computed = market_cap / revenue;
        if relative_gap(computed, reported_ps) > cfg.ratio_tolerance {
            ledger.penalize(
                cfg.moderate_penalty,
                format!("price-to-sales {reported_ps} disagrees with recomputed {computed:.2}"),
            );
        }
    }
    if let (Some(ma5), Some(ma10), Some(ma20)) = (q.ma5, q.ma10, q.ma20) {
        let ascending = ma5 <= ma10 && ma10 <= ma20;
        let descending = ma5 >= ma10 && ma10 >= ma20;
        if !ascending && !descending {
            ledger.penalize(
                cfg.minor_penalty,
                format!("moving averages interleave: ma5={ma5} ma10={ma10} ma20={ma20}"),
            );
        }
    }
}

fn bar_ohlc_is_ordered(bar: &Bar) -> bool {
    match (bar.open, bar.high, bar.low, bar.close) {
        (Some(o), Some(h), Some(l), Some(c)) => h >= l && o >= l && o <= h && c >= l && c <= h,
        // Partial bars are a completeness problem, not a consistency one.
        _ => true,
    }
}

fn bars_consistency(
    series: &BarSeries,
    price_hint: Option<f64>,
    cfg: &ScoringConfig,
    ledger: &mut Ledger,
) {
    let disordered = series.bars.iter().filter(|b| !bar_ohlc_is_ordered(b)).count();
    if disordered > 0 {
        ledger.penalize(
            cfg.severe_penalty,
            format!("{disordered} bar(s) with inconsistent OHLC ordering"),
        );
    }
    let out_of_order = series
        .bars
        .windows(2)
        .filter(|pair| pair[1].date <= pair[0].date)
        .count();
    if out_of_order > 0 {
        ledger.penalize(
            cfg.moderate_penalty,
            format!("{out_of_order} bar(s) out of chronological order"),
        );
    }
    let negative_volume = series
        .bars
        .iter()
        .filter(|b| b.volume.is_some_and(|v| v < 0.0))
        .count();
    if negative_volume > 0 {
        ledger.penalize(
            cfg.moderate_penalty,
            format!("{negative_volume} bar(s) with negative volume"),
        );
    }
    if let (Some(hint), Some(latest)) = (price_hint, series.latest_close())
        && relative_gap(latest, hint) > cfg.price_hint_tolerance
    {
        ledger.penalize(
            cfg.major_penalty,
            format!("latest close {latest} far from last known price {hint}"),
        );
    }
}

fn fundamentals_consistency(f: &FundamentalsPayload, cfg: &ScoringConfig, ledger: &mut Ledger) {
    for (label, value) in [
        ("market cap", f.market_cap),
        ("shares outstanding", f.shares_outstanding),
        ("revenue", f.revenue_ttm),
    ] {
        if let Some(v) = value
            && v < 0.0
        {
            ledger.penalize(cfg.severe_penalty, format!("negative {label}: {v}"));
        }
    }
    if let (Some(price), Some(shares), Some(reported)) =
        (f.price, f.shares_outstanding, f.market_cap)
    {
        let computed = price * shares;
        if relative_gap(computed, reported) > cfg.market_cap_tolerance {
            ledger.penalize(
                cfg.major_penalty,
                format!("market cap {reported} disagrees with price x shares {computed:.0}"),
            );
        }
    }
    if let (Some(price), Some(eps), Some(reported_pe)) = (f.price, f.eps, f.pe_ratio)
        && eps.abs() > f64::EPSILON
    {
        let computed = price / eps;
        if relative_gap(computed, reported_pe) > cfg.ratio_tolerance {
            ledger.penalize(
                cfg.moderate_penalty,
                format!("p/e {reported_pe} disagrees with recomputed {computed:.2}"),
            );
        }
    }
    if let (Some(market_cap), Some(revenue), Some(reported_ps)) =
        (f.market_cap, f.revenue_ttm, f.ps_ratio)
        && revenue > 0.0
    {
        let computed = market_cap / revenue;
        if relative_gap(computed, reported_ps) > cfg.ratio_tolerance {
            ledger.penalize(
                cfg.moderate_penalty,
                format!("price-to-sales {reported_ps} disagrees with recomputed {computed:.2}"),
            );
        }
    }
}

fn news_consistency(
    items: &[NewsItem],
    now: DateTime<Utc>,
    cfg: &ScoringConfig,
    ledger: &mut Ledger,
) {
    let untitled = items.iter().filter(|i| i.title.trim().is_empty()).count();
    if untitled > 0 {
        ledger.penalize(
            cfg.moderate_penalty,
            format!("{untitled} news item(s) without a headline"),
        );
    }
    let future = items
        .iter()
        .filter(|i| i.published_at.is_some_and(|ts| ts > now + chrono::Duration::days(1)))
        .count();
    if future > 0 {
        ledger.penalize(
            cfg.minor_penalty,
            format!("{future} news item(s) dated in the future"),
        );
    }
}

/// Age tiers shared by every kind: fresher payloads score higher, and a
/// missing/unparsable date scores a neutral 50: the absence of a date is
/// a different failure mode than staleness.
fn age_tier(age_days: i64) -> u8 {
    if age_days <= 1 {
        100
    } else if age_days <= 7 {
        80
    } else if age_days <= 30 {
        60
    } else {
        40
    }
}

fn timeliness(payload: &Payload, now: DateTime<Utc>) -> u8 {
    let reference: Option<DateTime<Utc>> = match payload {
        Payload::Quote(q) => q.as_of,
        Payload::Bars(b) => b
            .bars
            .iter()
            .map(|bar| bar.date)
            .max()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc()),
        Payload::Fundamentals(f) => f
            .report_date
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc()),
        Payload::News(items) => items.iter().filter_map(|i| i.published_at).max(),
    };
    reference.map_or(50, |ts| age_tier((now - ts).num_days()))
}
