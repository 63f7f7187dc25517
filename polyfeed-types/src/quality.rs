//! Quality report produced for every fetched payload.

use serde::{Deserialize, Serialize};

/// Composite 0–100 confidence measure for a single fetched payload.
///
/// `overall` is always the fixed 30/30/20/20 weighted combination of the
/// four sub-scores; the only way to build a report is through
/// [`QualityReport::from_axes`], so the combination can never drift.
/// Reports are immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityReport {
    /// Required/optional field coverage, 0..=100.
    pub completeness: u8,
    /// Cross-field plausibility, 0..=100.
    pub consistency: u8,
    /// Payload age versus wall clock, 0..=100.
    pub timeliness: u8,
    /// Static reliability of the producing provider, 0..=100.
    pub source_reliability: u8,
    /// Weighted overall score, 0..=100.
    pub overall: u8,
    /// Human-readable findings from the consistency battery, in check order.
    pub issues: Vec<String>,
}

/// Weights of the overall combination: completeness, consistency,
/// timeliness, source reliability.
pub(crate) const WEIGHTS: (f64, f64, f64, f64) = (0.3, 0.3, 0.2, 0.2);

impl QualityReport {
    /// Combine the four axes into a report. All inputs are clamped to
    /// 0..=100 before weighting.
    #[must_use]
    pub fn from_axes(
        completeness: u8,
        consistency: u8,
        timeliness: u8,
        source_reliability: u8,
        issues: Vec<String>,
    ) -> Self {
        let c = completeness.min(100);
        let k = consistency.min(100);
        let t = timeliness.min(100);
        let r = source_reliability.min(100);
        let (wc, wk, wt, wr) = WEIGHTS;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let overall = (wc * f64::from(c)
            + wk * f64::from(k)
            + wt * f64::from(t)
            + wr * f64::from(r))
        .round() as u8;
        Self {
            completeness: c,
            consistency: k,
            timeliness: t,
            source_reliability: r,
            overall,
            issues,
        }
    }

    /// Whether the report clears an acceptance threshold.
    #[must_use]
    pub const fn meets(&self, threshold: u8) -> bool {
        self.overall >= threshold
    }
}
