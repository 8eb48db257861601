pub mod http;
pub mod json_file;
pub mod memory;

pub use http::HttpStore;
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use anyhow::{bail, Result};
use async_trait::async_trait;
use std::sync::Arc;

use crate::config::{Config, SalesSource};
use crate::models::SalesRecord;

/// The business data store as seen by the forecaster: bulk sales history
/// plus a small key-value settings table.
#[async_trait]
pub trait SalesStore: Send + Sync {
    /// All historical sales, unfiltered.
    async fn get_sales(&self) -> Result<Vec<SalesRecord>>;
    async fn get_setting(&self, key: &str) -> Result<Option<String>>;
    async fn set_setting(&self, key: &str, value: &str) -> Result<()>;
}

pub fn from_config(cfg: &Config) -> Result<Arc<dyn SalesStore>> {
    match cfg.sales_source {
        SalesSource::File => Ok(Arc::new(JsonFileStore::new(&cfg.data_dir))),
        SalesSource::Http => {
            if cfg.sales_api_url.is_empty() {
                bail!("SALES_SOURCE=http requires SALES_API_URL");
            }
            Ok(Arc::new(HttpStore::new(&cfg.sales_api_url)))
        }
    }
}
