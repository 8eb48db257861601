use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::error::{TrendError, ValidationError};
use crate::models::{Prediction, TrendRequest};
use crate::pipeline::TrendService;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'static str>,
}

impl IntoResponse for TrendError {
    fn into_response(self) -> Response {
        let (status, field) = match &self {
            TrendError::Validation(v) => (StatusCode::BAD_REQUEST, Some(v.field)),
            TrendError::Storage(_) | TrendError::Persist(_) => {
                error!("Trend prediction failed: {}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, None)
            }
        };

        let body = ErrorBody {
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message: self.to_string(),
            field,
        };
        (status, Json(body)).into_response()
    }
}

pub fn router(service: Arc<TrendService>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/v1/predict/trends", post(predict_trends))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// Binds `addr` and serves until the process is stopped.
pub async fn serve(service: Arc<TrendService>, addr: &str) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Trends API listening on {}", addr);

    axum::serve(listener, router(service)).await?;

    Ok(())
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn predict_trends(
    State(service): State<Arc<TrendService>>,
    body: Bytes,
) -> Result<Json<Vec<Prediction>>, TrendError> {
    let request = parse_request(&body)?;
    let run = service.predict(&request).await?;
    Ok(Json(run.payload.predictions))
}

/// An empty body means "all defaults".
fn parse_request(body: &[u8]) -> Result<TrendRequest, ValidationError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(TrendRequest::default());
    }
    serde_json::from_slice(body).map_err(|e| ValidationError::new("body", e.to_string()))
}
