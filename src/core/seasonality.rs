use chrono::Datelike;
use serde::Serialize;

use super::outliers::{quartiles, Quartiles};
use crate::models::DailySeries;

pub const SEASON_LENGTH: usize = 7;

/// Average revenue per weekday, Sunday = 0 .. Saturday = 6, using each
/// point's local date. A weekday with no points averages to 0.
pub fn weekday_averages(series: &DailySeries) -> [f64; SEASON_LENGTH] {
    let mut sums = [0.0; SEASON_LENGTH];
    let mut counts = [0usize; SEASON_LENGTH];

    for p in series {
        let dow = p.date.weekday().num_days_from_sunday() as usize;
        sums[dow] += p.value;
        counts[dow] += 1;
    }

    let mut avgs = [0.0; SEASON_LENGTH];
    for dow in 0..SEASON_LENGTH {
        if counts[dow] > 0 {
            avgs[dow] = sums[dow] / counts[dow] as f64;
        }
    }
    avgs
}

/// `max(avg) / mean(avg)`; 0 when the mean is 0.
pub fn seasonality_strength(averages: &[f64; SEASON_LENGTH]) -> f64 {
    let mean = averages.iter().sum::<f64>() / SEASON_LENGTH as f64;
    if mean == 0.0 {
        return 0.0;
    }
    let max = averages.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    max / mean
}

/// Summary figures that drive model selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesStats {
    pub len: usize,
    pub non_zero_days: usize,
    pub quartiles: Option<Quartiles>,
    pub weekday_averages: [f64; SEASON_LENGTH],
    pub seasonality_strength: f64,
}

impl SeriesStats {
    pub fn compute(series: &DailySeries) -> Self {
        let weekday_averages = weekday_averages(series);
        Self {
            len: series.len(),
            non_zero_days: series.non_zero_days(),
            quartiles: quartiles(&series.values()),
            seasonality_strength: seasonality_strength(&weekday_averages),
            weekday_averages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{day, weekly_pattern};

    #[test]
    fn flat_series_has_unit_strength() {
        let s = DailySeries::from_values(day(2024, 1, 7), &[100.0; 28]);
        let avgs = weekday_averages(&s);
        assert!(avgs.iter().all(|a| (a - 100.0).abs() < 1e-9));
        assert!((seasonality_strength(&avgs) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn empty_series_has_zero_strength() {
        let avgs = weekday_averages(&DailySeries::default());
        assert_eq!(seasonality_strength(&avgs), 0.0);
    }

    #[test]
    fn monday_peak_is_detected() {
        // 2024-01-07 is a Sunday
        let s = weekly_pattern(day(2024, 1, 7), 140, 100.0, 300.0);
        let stats = SeriesStats::compute(&s);
        assert!((stats.weekday_averages[1] - 300.0).abs() < 1e-9);
        assert!((stats.weekday_averages[3] - 100.0).abs() < 1e-9);
        // 300 / (900 / 7)
        assert!((stats.seasonality_strength - 7.0 / 3.0).abs() < 1e-9);
        assert_eq!(stats.non_zero_days, 140);
        assert_eq!(stats.len, 140);
    }

    #[test]
    fn missing_weekday_averages_to_zero() {
        // Sunday and Monday only
        let s = DailySeries::from_values(day(2024, 1, 7), &[50.0, 70.0]);
        let avgs = weekday_averages(&s);
        assert!((avgs[0] - 50.0).abs() < 1e-9);
        assert!((avgs[1] - 70.0).abs() < 1e-9);
        assert_eq!(avgs[2], 0.0);
    }
}
