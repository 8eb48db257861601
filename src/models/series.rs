use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Revenue for one local calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// One point per calendar day, ascending, no gaps. Values may be rewritten
/// in place (gap filling) but points are never reordered or removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct DailySeries {
    points: Vec<DailyPoint>,
}

impl DailySeries {
    pub fn new(points: Vec<DailyPoint>) -> Self {
        Self { points }
    }

    /// Build a series of consecutive days starting at `start`.
    pub fn from_values(start: NaiveDate, values: &[f64]) -> Self {
        let points = start
            .iter_days()
            .zip(values)
            .map(|(date, &value)| DailyPoint { date, value })
            .collect();
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&DailyPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&DailyPoint> {
        self.points.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DailyPoint> {
        self.points.iter()
    }

    /// Last `n` points (all of them if the series is shorter).
    pub fn tail(&self, n: usize) -> &[DailyPoint] {
        let start = self.points.len().saturating_sub(n);
        &self.points[start..]
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn set_value(&mut self, index: usize, value: f64) {
        if let Some(point) = self.points.get_mut(index) {
            point.value = value;
        }
    }

    /// Days with any recorded revenue.
    pub fn non_zero_days(&self) -> usize {
        self.points.iter().filter(|p| p.value != 0.0).count()
    }

    /// True when dates step by exactly one day from first to last.
    pub fn is_contiguous(&self) -> bool {
        self.points
            .windows(2)
            .all(|w| w[0].date.succ_opt() == Some(w[1].date))
    }
}

impl std::ops::Index<usize> for DailySeries {
    type Output = DailyPoint;
    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

impl IntoIterator for DailySeries {
    type Item = DailyPoint;
    type IntoIter = std::vec::IntoIter<DailyPoint>;
    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

impl<'a> IntoIterator for &'a DailySeries {
    type Item = &'a DailyPoint;
    type IntoIter = std::slice::Iter<'a, DailyPoint>;
    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
