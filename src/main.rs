use anyhow::Result;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use sales_trends::api;
use sales_trends::config::Config;
use sales_trends::pipeline::TrendService;
use sales_trends::sink::FileSink;
use sales_trends::storage;

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .init();

    info!(
        "Sales source: {:?}, predictions in {}, local zone {}",
        cfg.sales_source, cfg.predictions_dir, cfg.local_tz
    );

    let cfg = cfg.shared();
    let store = storage::from_config(&cfg)?;
    let sink = Arc::new(FileSink::new(&cfg.predictions_dir));
    let service = Arc::new(TrendService::new(
        store,
        sink,
        cfg.local_tz,
        cfg.trend_defaults(),
    ));

    api::serve(service, &cfg.bind_addr).await
}
