use chrono::NaiveDate;
use serde::Serialize;

use crate::models::DailySeries;

pub const IQR_FENCE: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quartiles {
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
}

impl Quartiles {
    pub fn lower_fence(&self) -> f64 {
        self.q1 - IQR_FENCE * self.iqr
    }

    pub fn upper_fence(&self) -> f64 {
        self.q3 + IQR_FENCE * self.iqr
    }

    pub fn is_outlier(&self, value: f64) -> bool {
        value > self.upper_fence() || value < self.lower_fence()
    }
}

/// Q1/Q3 by rank `floor(n * 0.25)` / `floor(n * 0.75)` of the sorted values.
/// No interpolation between ranks; stored predictions depend on this exact rule.
pub fn quartiles(values: &[f64]) -> Option<Quartiles> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let n = sorted.len() as f64;
    let q1 = sorted[(n * 0.25).floor() as usize];
    let q3 = sorted[(n * 0.75).floor() as usize];

    Some(Quartiles { q1, q3, iqr: q3 - q1 })
}

/// Dates whose revenue falls outside the IQR fence. Informational only.
pub fn detect_outliers(series: &DailySeries) -> Vec<NaiveDate> {
    let Some(q) = quartiles(&series.values()) else {
        return Vec::new();
    };

    series
        .iter()
        .filter(|p| q.is_outlier(p.value))
        .map(|p| p.date)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::series_of;

    #[test]
    fn spike_is_flagged() {
        let s = series_of(&[10.0, 10.0, 10.0, 10.0, 1000.0]);
        let out = detect_outliers(&s);
        assert_eq!(out, vec![s[4].date]);
    }

    #[test]
    fn rank_based_quartiles() {
        // n = 8: q1 = sorted[2], q3 = sorted[6]
        let q = quartiles(&[8.0, 1.0, 7.0, 2.0, 6.0, 3.0, 5.0, 4.0]).unwrap();
        assert!((q.q1 - 3.0).abs() < 1e-9);
        assert!((q.q3 - 7.0).abs() < 1e-9);
        assert!((q.iqr - 4.0).abs() < 1e-9);
        assert!((q.upper_fence() - 13.0).abs() < 1e-9);
        assert!((q.lower_fence() + 3.0).abs() < 1e-9);
    }

    #[test]
    fn low_outlier_is_flagged() {
        let s = series_of(&[100.0, 102.0, 98.0, 101.0, 99.0, 100.0, 1.0, 100.0]);
        let out = detect_outliers(&s);
        assert_eq!(out, vec![s[6].date]);
    }

    #[test]
    fn empty_and_flat_series_have_none() {
        assert!(detect_outliers(&DailySeries::default()).is_empty());
        assert!(detect_outliers(&series_of(&[5.0; 10])).is_empty());
    }
}
