use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::models::SalesRecord;
use crate::storage::SalesStore;

/// In-process store, for embedding and tests.
#[derive(Default)]
pub struct MemoryStore {
    sales: RwLock<Vec<SalesRecord>>,
    settings: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new(sales: Vec<SalesRecord>) -> Self {
        Self {
            sales: RwLock::new(sales),
            settings: RwLock::new(HashMap::new()),
        }
    }

    pub async fn settings(&self) -> HashMap<String, String> {
        self.settings.read().await.clone()
    }
}

#[async_trait]
impl SalesStore for MemoryStore {
    async fn get_sales(&self) -> Result<Vec<SalesRecord>> {
        Ok(self.sales.read().await.clone())
    }

    async fn get_setting(&self, key: &str) -> Result<Option<String>> {
        Ok(self.settings.read().await.get(key).cloned())
    }

    async fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        self.settings
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
