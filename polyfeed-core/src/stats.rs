//! Descriptive statistics over per-source samples.

use polyfeed_types::SampleStats;

/// Compute descriptive statistics over a sample of per-source values.
///
/// Non-finite values are discarded before computation. Returns `None` for
/// an empty (post-filter) sample. The standard deviation is the population
/// form, and the coefficient of variation is expressed as a percentage of
/// the absolute mean (zero when the mean is zero).
#[must_use]
pub fn sample_stats(values: &[f64]) -> Option<SampleStats> {
    let mut sample: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sample.is_empty() {
        return None;
    }
    sample.sort_by(f64::total_cmp);

    let n = sample.len();
    #[allow(clippy::cast_precision_loss)]
    let len = n as f64;
    let min = sample[0];
    let max = sample[n - 1];
    let mean = sample.iter().sum::<f64>() / len;
    let median = if n % 2 == 1 {
        sample[n / 2]
    } else {
        (sample[n / 2 - 1] + sample[n / 2]) / 2.0
    };
    let variance = sample.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / len;
    let std_dev = variance.sqrt();
    let cv_percent = if mean.abs() > f64::EPSILON {
        std_dev / mean.abs() * 100.0
    } else {
        0.0
    };

    Some(SampleStats {
        min,
        max,
        mean,
        median,
        std_dev,
        cv_percent,
    })
}
