use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use std::sync::Arc;

use sales_trends::models::{SalesRecord, TrendDefaults};
use sales_trends::pipeline::TrendService;
use sales_trends::sink::{MemorySink, PredictionSink};
use sales_trends::storage::{MemoryStore, SalesStore};
use sales_trends::zone::LocalZone;

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A fixed generation time so artifact names are stable.
pub fn generated_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 6, 30, 0).unwrap()
}

/// One sale per day at 10:00 UTC, skipping zero days.
pub fn daily_sales(start: NaiveDate, totals: &[f64]) -> Vec<SalesRecord> {
    totals
        .iter()
        .enumerate()
        .filter(|&(_, &t)| t != 0.0)
        .map(|(i, &t)| {
            let date = start + Duration::days(i as i64);
            let ts = Utc.from_utc_datetime(&date.and_hms_opt(10, 0, 0).unwrap());
            SalesRecord::new(ts, t)
        })
        .collect()
}

/// `days` of `base` sales with every Monday at `monday`.
pub fn monday_heavy_sales(start: NaiveDate, days: usize, base: f64, monday: f64) -> Vec<SalesRecord> {
    use chrono::{Datelike, Weekday};
    let totals: Vec<f64> = (0..days)
        .map(|i| {
            let date = start + Duration::days(i as i64);
            if date.weekday() == Weekday::Mon {
                monday
            } else {
                base
            }
        })
        .collect();
    daily_sales(start, &totals)
}

pub fn service_with(
    store: Arc<dyn SalesStore>,
    sink: Arc<dyn PredictionSink>,
) -> TrendService {
    TrendService::new(store, sink, LocalZone::default(), TrendDefaults::default())
}

pub fn memory_service(sales: Vec<SalesRecord>) -> (TrendService, Arc<MemoryStore>, Arc<MemorySink>) {
    let store = Arc::new(MemoryStore::new(sales));
    let sink = Arc::new(MemorySink::new());
    let service = service_with(store.clone(), sink.clone());
    (service, store, sink)
}

/// Store whose backend is unreachable.
pub struct FailingStore;

#[async_trait]
impl SalesStore for FailingStore {
    async fn get_sales(&self) -> Result<Vec<SalesRecord>> {
        Err(anyhow!("connection refused"))
    }

    async fn get_setting(&self, _key: &str) -> Result<Option<String>> {
        Err(anyhow!("connection refused"))
    }

    async fn set_setting(&self, _key: &str, _value: &str) -> Result<()> {
        Err(anyhow!("connection refused"))
    }
}
