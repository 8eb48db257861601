use super::round2;
use crate::models::DailySeries;

/// Trailing window for the fallback forecast and the baseline.
pub const TRAILING_WINDOW_DAYS: usize = 90;

/// Mean of the last `window` days (fewer if the series is shorter), 0 if empty.
pub fn trailing_mean(series: &DailySeries, window: usize) -> f64 {
    let tail = series.tail(window);
    if tail.is_empty() {
        return 0.0;
    }
    tail.iter().map(|p| p.value).sum::<f64>() / tail.len() as f64
}

/// Flat forecast at the trailing mean.
pub fn moving_average_forecast(series: &DailySeries, horizon: usize) -> Vec<f64> {
    vec![round2(trailing_mean(series, TRAILING_WINDOW_DAYS)); horizon]
}
