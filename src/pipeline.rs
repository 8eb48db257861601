use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info};

use crate::core::aggregate::aggregate_daily;
use crate::core::forecaster::forecast;
use crate::core::gap_fill::fill_short_gaps;
use crate::core::intervals::{apply_intervals, residual_std};
use crate::core::model_select::resolve_model;
use crate::core::moving_average::{trailing_mean, TRAILING_WINDOW_DAYS};
use crate::core::outliers::detect_outliers;
use crate::core::recommend::{baseline, recommend};
use crate::core::seasonality::SeriesStats;
use crate::error::TrendError;
use crate::models::{Prediction, ResultPayload, SalesRecord, TrendDefaults, TrendParams, TrendRequest};
use crate::sink::PredictionSink;
use crate::storage::SalesStore;
use crate::zone::LocalZone;

/// Run aggregation through recommendations. No I/O.
pub fn run_pipeline(
    sales: &[SalesRecord],
    params: &TrendParams,
    zone: &LocalZone,
    generated_at: DateTime<Utc>,
) -> ResultPayload {
    let mut series = aggregate_daily(sales, params.start, params.end, zone);
    let filled = fill_short_gaps(&mut series);
    let outliers = detect_outliers(&series);
    let stats = SeriesStats::compute(&series);
    debug!(
        "Series: {} days, {} with sales, {} gap days filled, {} outliers, seasonality {:.2}",
        stats.len,
        stats.non_zero_days,
        filled,
        outliers.len(),
        stats.seasonality_strength
    );

    let choice = resolve_model(&stats, params.method, params.min_history);
    debug!("Model: {} ({})", choice.kind, choice.reason);

    let mut points = forecast(&series, params.end, params.horizon, &choice);

    let mean = trailing_mean(&series, TRAILING_WINDOW_DAYS);
    let std = residual_std(&series, mean, TRAILING_WINDOW_DAYS);
    apply_intervals(&mut points, std);

    let base = baseline(&series);
    let predictions = points
        .into_iter()
        .map(|point| {
            let rec = recommend(&point, base, &params.thresholds);
            Prediction::new(point, rec)
        })
        .collect();

    ResultPayload {
        generated_at,
        params: params.clone(),
        series,
        predictions,
        outliers,
    }
}

/// Outcome of a persisted run.
#[derive(Debug, Clone)]
pub struct PredictionRun {
    pub payload: ResultPayload,
    /// Name the payload was saved under, e.g. `trends_2024-06-30.json`.
    pub artifact: String,
}

/// Loads sales, runs the pipeline and persists the result.
pub struct TrendService {
    store: Arc<dyn SalesStore>,
    sink: Arc<dyn PredictionSink>,
    zone: LocalZone,
    defaults: TrendDefaults,
}

impl TrendService {
    pub fn new(
        store: Arc<dyn SalesStore>,
        sink: Arc<dyn PredictionSink>,
        zone: LocalZone,
        defaults: TrendDefaults,
    ) -> Self {
        Self {
            store,
            sink,
            zone,
            defaults,
        }
    }

    pub async fn predict(&self, request: &TrendRequest) -> Result<PredictionRun, TrendError> {
        self.predict_at(request, Utc::now()).await
    }

    /// Same as [`predict`](Self::predict) with an explicit generation time.
    pub async fn predict_at(
        &self,
        request: &TrendRequest,
        generated_at: DateTime<Utc>,
    ) -> Result<PredictionRun, TrendError> {
        let today = self.zone.date_of(generated_at);
        let params = request.resolve(&self.zone, today, &self.defaults)?;

        let sales = self.store.get_sales().await.map_err(TrendError::Storage)?;
        info!(
            "Forecasting {} days from {} sales ({} to {}, method {})",
            params.horizon,
            sales.len(),
            params.start,
            params.end,
            params.method
        );

        let payload = run_pipeline(&sales, &params, &self.zone, generated_at);

        let artifact = self
            .sink
            .save(&payload)
            .await
            .map_err(TrendError::Persist)?;

        if params.store_db {
            let json = serde_json::to_string(&payload)
                .map_err(|e| TrendError::Persist(e.into()))?;
            self.store
                .set_setting(&format!("predictions:{}", artifact), &json)
                .await
                .map_err(TrendError::Persist)?;
            debug!("Stored predictions:{} in settings", artifact);
        }

        if params.notify {
            // marker only; delivery belongs to the notification service
            self.store
                .set_setting(
                    &format!("notifications:predictions:{}", artifact),
                    &generated_at.to_rfc3339(),
                )
                .await
                .map_err(TrendError::Persist)?;
        }

        if let Some(first) = payload.predictions.first() {
            info!(
                "Forecast ready: model={} first={} pred={:.2} [{:.2}, {:.2}]",
                first.point.model,
                first.point.date,
                first.point.pred,
                first.point.lower95,
                first.point.upper95
            );
        }

        Ok(PredictionRun { payload, artifact })
    }
}
