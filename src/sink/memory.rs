use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{artifact_name, PredictionSink};
use crate::models::ResultPayload;

/// Keeps saved payloads in memory. Lets the pipeline run without a disk.
#[derive(Default)]
pub struct MemorySink {
    saved: Mutex<Vec<(String, ResultPayload)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn saved(&self) -> Vec<(String, ResultPayload)> {
        self.saved.lock().await.clone()
    }
}

#[async_trait]
impl PredictionSink for MemorySink {
    async fn save(&self, payload: &ResultPayload) -> Result<String> {
        let name = artifact_name(payload.generated_at);
        self.saved.lock().await.push((name.clone(), payload.clone()));
        Ok(name)
    }
}
