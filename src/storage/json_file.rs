use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;

use crate::models::SalesRecord;
use crate::storage::SalesStore;

/// Sales and settings kept as JSON files in a data directory:
/// `sales.json` (array of sales) and `settings.json` (string map).
pub struct JsonFileStore {
    sales_path: PathBuf,
    settings_path: PathBuf,
    settings_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let dir = data_dir.as_ref();
        Self::with_paths(dir.join("sales.json"), dir.join("settings.json"))
    }

    pub fn with_paths(sales_path: impl Into<PathBuf>, settings_path: impl Into<PathBuf>) -> Self {
        Self {
            sales_path: sales_path.into(),
            settings_path: settings_path.into(),
            settings_lock: Mutex::new(()),
        }
    }

    async fn read_settings(&self) -> Result<BTreeMap<String, String>> {
        match tokio::fs::read_to_string(&self.settings_path).await {
            Ok(content) => serde_json::from_str(&content)
                .with_context(|| format!("parsing {}", self.settings_path.display())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => {
                Err(e).with_context(|| format!("reading {}", self.settings_path.display()))
            }
        }
    }
}

#[async_trait]
impl SalesStore for JsonFileStore {
    async fn get_sales(&self) -> Result<Vec<SalesRecord>> {
        let content = tokio::fs::read_to_string(&self.sales_path)
            .await
            .with_context(|| format!("reading {}", self.sales_path.display()))?;
        let sales: Vec<SalesRecord> = serde_json::from_str(&content)
            .with_context(|| format!("parsing {}", self.sales_path.display()))?;
        debug!("Loaded {} sales from {}", sales.len(), self.sales_path.display());
        Ok(sales)
    }

    async fn get_setting(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_settings().await?.get(key).cloned())
    }

    async fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.settings_lock.lock().await;
        let mut settings = self.read_settings().await?;
        settings.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.settings_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        // write aside then rename so a crash never leaves a truncated map
        let json = serde_json::to_string_pretty(&settings)?;
        let tmp = self.settings_path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .with_context(|| format!("writing {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &self.settings_path)
            .await
            .with_context(|| format!("replacing {}", self.settings_path.display()))?;
        Ok(())
    }
}
