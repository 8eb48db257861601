use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::models::SalesRecord;
use crate::storage::SalesStore;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize, Deserialize)]
struct SettingBody {
    value: String,
}

/// Talks to the management app's REST API:
/// `GET /sales`, `GET /settings/{key}`, `PUT /settings/{key}`.
pub struct HttpStore {
    client: Client,
    base_url: String,
}

impl HttpStore {
    pub fn new(base_url: &str) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl SalesStore for HttpStore {
    async fn get_sales(&self) -> Result<Vec<SalesRecord>> {
        let url = self.url("/sales");
        let sales: Vec<SalesRecord> = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("GET {}", url))?
            .error_for_status()
            .with_context(|| format!("GET {}", url))?
            .json()
            .await
            .context("Failed to parse sales response")?;
        debug!("Fetched {} sales from {}", sales.len(), url);
        Ok(sales)
    }

    async fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let url = self.url(&format!("/settings/{}", key));
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("GET {}", url))?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body: SettingBody = resp
            .error_for_status()
            .with_context(|| format!("GET {}", url))?
            .json()
            .await
            .context("Failed to parse setting response")?;
        Ok(Some(body.value))
    }

    async fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        let url = self.url(&format!("/settings/{}", key));
        self.client
            .put(&url)
            .json(&SettingBody {
                value: value.to_string(),
            })
            .send()
            .await
            .with_context(|| format!("PUT {}", url))?
            .error_for_status()
            .with_context(|| format!("PUT {}", url))?;
        Ok(())
    }
}
