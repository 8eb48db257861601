use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{fmt, EnvFilter};

use sales_trends::config::Config;
use sales_trends::models::params::ThresholdOverrides;
use sales_trends::models::TrendRequest;
use sales_trends::pipeline::TrendService;
use sales_trends::sink::FileSink;
use sales_trends::storage::{self, JsonFileStore, SalesStore};

/// Forecast daily sales and print the result payload as JSON.
#[derive(Parser, Debug)]
#[command(name = "predict-trends", version, long_about = None)]
struct Args {
    /// First day of history (YYYY-MM-DD or RFC 3339). Defaults to a year back.
    #[arg(long)]
    start: Option<String>,

    /// Last day of history. Defaults to today in the local zone.
    #[arg(long)]
    end: Option<String>,

    /// Only "daily" is supported.
    #[arg(long)]
    granularity: Option<String>,

    /// Days to forecast after `end`.
    #[arg(long, allow_negative_numbers = true)]
    horizon: Option<i64>,

    /// auto | holt-winters-weekly | moving-average
    #[arg(long)]
    method: Option<String>,

    /// Days with sales required before a model is trusted.
    #[arg(long, allow_negative_numbers = true)]
    min_history: Option<i64>,

    /// Ramp-up threshold as a fraction, e.g. 0.2.
    #[arg(long, allow_negative_numbers = true)]
    increase: Option<f64>,

    /// Scale-down threshold as a negative fraction, e.g. -0.15.
    #[arg(long, allow_negative_numbers = true)]
    decrease: Option<f64>,

    /// Also store the payload in the settings table.
    #[arg(long)]
    store_db: bool,

    /// Leave a notification marker in the settings table.
    #[arg(long)]
    notify: bool,

    /// Write the payload to this file as well.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Read sales from this JSON file instead of the configured source.
    #[arg(long, env = "SALES_FILE")]
    sales_file: Option<PathBuf>,
}

impl Args {
    fn to_request(&self) -> TrendRequest {
        let thresholds = if self.increase.is_some() || self.decrease.is_some() {
            Some(ThresholdOverrides {
                increase: self.increase,
                decrease: self.decrease,
            })
        } else {
            None
        };

        TrendRequest {
            start: self.start.clone(),
            end: self.end.clone(),
            granularity: self.granularity.clone(),
            horizon: self.horizon,
            method: self.method.clone(),
            min_history: self.min_history,
            thresholds,
            store_db: self.store_db,
            notify: self.notify,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let cfg = Config::from_env();

    // stdout carries the payload
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    let store: Arc<dyn SalesStore> = match &args.sales_file {
        Some(path) => Arc::new(JsonFileStore::with_paths(
            path,
            Path::new(&cfg.data_dir).join("settings.json"),
        )),
        None => storage::from_config(&cfg)?,
    };
    let sink = Arc::new(FileSink::new(&cfg.predictions_dir));
    let service = TrendService::new(store, sink, cfg.local_tz, cfg.trend_defaults());

    let run = service.predict(&args.to_request()).await?;
    let json = serde_json::to_string_pretty(&run.payload)?;

    if let Some(path) = &args.output {
        tokio::fs::write(path, &json)
            .await
            .with_context(|| format!("writing {}", path.display()))?;
    }
    println!("{}", json);

    Ok(())
}
