use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::info;

use super::{artifact_name, PredictionSink};
use crate::models::ResultPayload;

/// Writes each run to `<dir>/trends_<date>.json`. A second run on the same
/// day overwrites the first.
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl PredictionSink for FileSink {
    async fn save(&self, payload: &ResultPayload) -> Result<String> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("creating {}", self.dir.display()))?;

        let name = artifact_name(payload.generated_at);
        let path = self.dir.join(&name);
        let json = serde_json::to_string_pretty(payload)?;
        tokio::fs::write(&path, json)
            .await
            .with_context(|| format!("writing {}", path.display()))?;

        info!("Predictions saved to {}", path.display());
        Ok(name)
    }
}
