use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

use crate::models::params::{
    TrendDefaults, DEFAULT_HORIZON, DEFAULT_LOOKBACK_DAYS, DEFAULT_MIN_HISTORY,
};
use crate::zone::LocalZone;

pub type SharedConfig = Arc<Config>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SalesSource {
    File,
    Http,
}

impl SalesSource {
    pub fn from_str_loose(s: &str) -> Option<SalesSource> {
        match s.trim().to_lowercase().as_str() {
            "file" | "json" => Some(SalesSource::File),
            "http" | "api" => Some(SalesSource::Http),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub bind_addr: String,

    // Storage
    pub data_dir: String,
    pub predictions_dir: String,
    pub sales_source: SalesSource,
    pub sales_api_url: String,

    // Calendar
    pub local_tz: LocalZone,

    // Forecast defaults
    pub default_horizon: usize,
    pub default_min_history: usize,
    pub lookback_days: i64,

    // Logging
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let env = |key: &str, default: &str| -> String {
            std::env::var(key).unwrap_or_else(|_| default.to_string())
        };

        let data_dir = env("DATA_DIR", "data");
        let default_predictions = Path::new(&data_dir)
            .join("predictions")
            .to_string_lossy()
            .to_string();

        Config {
            bind_addr: env("BIND_ADDR", "0.0.0.0:8080"),
            predictions_dir: env("PREDICTIONS_DIR", &default_predictions),
            data_dir,
            sales_source: SalesSource::from_str_loose(&env("SALES_SOURCE", "file"))
                .unwrap_or(SalesSource::File),
            sales_api_url: env("SALES_API_URL", ""),
            local_tz: LocalZone::parse(&env("LOCAL_TZ", "+02:00")).unwrap_or_default(),
            default_horizon: env("DEFAULT_HORIZON", "30")
                .parse()
                .unwrap_or(DEFAULT_HORIZON),
            default_min_history: env("DEFAULT_MIN_HISTORY", "90")
                .parse()
                .unwrap_or(DEFAULT_MIN_HISTORY),
            lookback_days: env("DEFAULT_LOOKBACK_DAYS", "365")
                .parse()
                .unwrap_or(DEFAULT_LOOKBACK_DAYS),
            log_level: env("LOG_LEVEL", "info"),
        }
    }

    pub fn trend_defaults(&self) -> TrendDefaults {
        TrendDefaults {
            horizon: self.default_horizon,
            min_history: self.default_min_history,
            lookback_days: self.lookback_days,
        }
    }

    pub fn shared(self) -> SharedConfig {
        Arc::new(self)
    }
}
