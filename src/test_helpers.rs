use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

use crate::models::{DailySeries, SalesRecord};

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A sale at an RFC 3339 instant.
pub fn sale_at(ts: &str, total: f64) -> SalesRecord {
    let created_at = DateTime::parse_from_rfc3339(ts)
        .unwrap()
        .with_timezone(&Utc);
    SalesRecord::new(created_at, total)
}

/// Consecutive daily values starting 2024-01-01.
pub fn series_of(values: &[f64]) -> DailySeries {
    DailySeries::from_values(day(2024, 1, 1), values)
}

/// `days` of `base` revenue with Mondays at `monday`.
pub fn weekly_pattern(start: NaiveDate, days: usize, base: f64, monday: f64) -> DailySeries {
    let values: Vec<f64> = (0..days)
        .map(|i| {
            let date = start + Duration::days(i as i64);
            if date.weekday().num_days_from_sunday() == 1 {
                monday
            } else {
                base
            }
        })
        .collect();
    DailySeries::from_values(start, &values)
}

/// One mid-morning sale per day (10:00 UTC, noon in UTC+2).
pub fn daily_sales(start: NaiveDate, totals: &[f64]) -> Vec<SalesRecord> {
    totals
        .iter()
        .enumerate()
        .filter(|(_, total)| **total != 0.0)
        .map(|(i, &total)| {
            let date = start + Duration::days(i as i64);
            let ts = date.and_hms_opt(10, 0, 0).unwrap().and_utc();
            SalesRecord::new(ts, total)
        })
        .collect()
}
