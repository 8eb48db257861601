pub mod forecast;
pub mod params;
pub mod sale;
pub mod series;

pub use forecast::*;
pub use params::{Thresholds, TrendDefaults, TrendParams, TrendRequest};
pub use sale::SalesRecord;
pub use series::{DailyPoint, DailySeries};
