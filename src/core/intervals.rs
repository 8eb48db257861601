use super::round2;
use crate::models::{DailySeries, ForecastPoint};

/// Two-sided 95% normal quantile.
pub const Z_95: f64 = 1.96;

/// Root-mean-square deviation of the last `window` days from `baseline`.
///
/// Residuals are `value - baseline`, so only a flat history yields a
/// zero-width band.
pub fn residual_std(series: &DailySeries, baseline: f64, window: usize) -> f64 {
    let tail = series.tail(window);
    if tail.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = tail.iter().map(|p| (p.value - baseline).powi(2)).sum();
    (sum_sq / tail.len() as f64).sqrt()
}

/// Set symmetric bounds around each prediction. Lower bound floors at 0.
pub fn apply_intervals(points: &mut [ForecastPoint], std: f64) {
    let half_width = Z_95 * std;
    for p in points {
        p.lower95 = round2((p.pred - half_width).max(0.0));
        p.upper95 = round2(p.pred + half_width);
    }
}
