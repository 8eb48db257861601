use chrono::NaiveDate;
use std::collections::HashMap;

use crate::models::{DailyPoint, DailySeries, SalesRecord};
use crate::zone::LocalZone;

/// Sum sale totals per local calendar day over `[start, end]` inclusive.
/// Days without sales get 0. Returns an empty series when `start > end`.
pub fn aggregate_daily(
    sales: &[SalesRecord],
    start: NaiveDate,
    end: NaiveDate,
    zone: &LocalZone,
) -> DailySeries {
    if start > end {
        return DailySeries::default();
    }

    let mut totals: HashMap<NaiveDate, f64> = HashMap::new();
    for sale in sales {
        let day = zone.date_of(sale.created_at);
        if day < start || day > end || !sale.total_price.is_finite() {
            continue;
        }
        *totals.entry(day).or_insert(0.0) += sale.total_price;
    }

    let points = start
        .iter_days()
        .take_while(|d| *d <= end)
        .map(|date| DailyPoint {
            date,
            // refunds can push a day negative; revenue is floored at zero
            value: totals.get(&date).copied().unwrap_or(0.0).max(0.0),
        })
        .collect();

    DailySeries::new(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{day, sale_at};

    #[test]
    fn one_point_per_day_inclusive() {
        let start = day(2024, 1, 1);
        let end = day(2024, 3, 31);
        let series = aggregate_daily(&[], start, end, &LocalZone::default());
        assert_eq!(series.len() as i64, (end - start).num_days() + 1);
        assert_eq!(series.first().unwrap().date, start);
        assert_eq!(series.last().unwrap().date, end);
        assert!(series.is_contiguous());
        assert!(series.iter().all(|p| p.value == 0.0));
    }

    #[test]
    fn sums_sales_on_the_shifted_day() {
        let sales = vec![
            sale_at("2024-03-10T08:00:00Z", 40.0),
            sale_at("2024-03-10T12:00:00Z", 60.0),
            // 22:30 UTC is 00:30 on the 11th in UTC+2
            sale_at("2024-03-10T22:30:00Z", 25.0),
        ];
        let series = aggregate_daily(&sales, day(2024, 3, 10), day(2024, 3, 11), &LocalZone::default());
        assert!((series[0].value - 100.0).abs() < 1e-9);
        assert!((series[1].value - 25.0).abs() < 1e-9);
    }

    #[test]
    fn ignores_sales_outside_range() {
        let sales = vec![
            sale_at("2024-02-28T10:00:00Z", 500.0),
            sale_at("2024-03-01T10:00:00Z", 10.0),
            sale_at("2024-03-05T10:00:00Z", 500.0),
        ];
        let series = aggregate_daily(&sales, day(2024, 3, 1), day(2024, 3, 2), &LocalZone::default());
        assert_eq!(series.len(), 2);
        assert!((series[0].value - 10.0).abs() < 1e-9);
        assert!((series[1].value).abs() < 1e-9);
    }

    #[test]
    fn inverted_range_is_empty() {
        let series = aggregate_daily(&[], day(2024, 3, 2), day(2024, 3, 1), &LocalZone::default());
        assert!(series.is_empty());
    }

    #[test]
    fn refunds_floor_at_zero_and_bad_prices_are_skipped() {
        let sales = [
            sale_at("2024-01-01T09:00:00Z", 40.0),
            sale_at("2024-01-01T11:00:00Z", -100.0),
            sale_at("2024-01-02T09:00:00Z", 75.0),
            sale_at("2024-01-02T10:00:00Z", f64::NAN),
            sale_at("2024-01-02T11:00:00Z", f64::INFINITY),
        ];
        let series = aggregate_daily(&sales, day(2024, 1, 1), day(2024, 1, 2), &LocalZone::default());
        assert_eq!(series[0].value, 0.0);
        assert!((series[1].value - 75.0).abs() < 1e-9);
    }
}
