pub mod file;
pub mod memory;

pub use file::FileSink;
pub use memory::MemorySink;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::models::ResultPayload;

/// Durable destination for a finished forecast run.
#[async_trait]
pub trait PredictionSink: Send + Sync {
    /// Persist the payload and return the artifact name it was saved under.
    async fn save(&self, payload: &ResultPayload) -> Result<String>;
}

/// `trends_<YYYY-MM-DD>.json`, keyed by generation date (UTC), not data range.
pub fn artifact_name(generated_at: DateTime<Utc>) -> String {
    format!("trends_{}.json", generated_at.format("%Y-%m-%d"))
}
