use serde::Serialize;

use super::seasonality::SeriesStats;
use crate::models::{Method, ModelKind};

/// Holt-Winters is only picked automatically on at least this many days.
pub const MIN_SEASONAL_SERIES_LEN: usize = 60;
/// Weekly pattern must be stronger than this to pick Holt-Winters.
pub const SEASONALITY_THRESHOLD: f64 = 1.1;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelChoice {
    pub kind: ModelKind,
    pub reason: String,
}

impl ModelChoice {
    fn new(kind: ModelKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            reason: reason.into(),
        }
    }
}

/// Decide which model to run.
///
/// Too little history always forces the moving average. Past that, an
/// explicit `holt-winters-weekly` request is honoured, `auto` picks
/// Holt-Winters only for a long enough series with a clear weekly pattern,
/// and everything else gets the moving average.
pub fn resolve_model(stats: &SeriesStats, method: Method, min_history: usize) -> ModelChoice {
    if stats.non_zero_days < min_history {
        return ModelChoice::new(
            ModelKind::InsufficientHistory,
            format!(
                "insufficient history: {} days with sales, {} required",
                stats.non_zero_days, min_history
            ),
        );
    }

    match method {
        Method::HoltWintersWeekly => {
            ModelChoice::new(ModelKind::HoltWintersWeekly, "holt-winters-weekly requested")
        }
        Method::Auto
            if stats.len >= MIN_SEASONAL_SERIES_LEN
                && stats.seasonality_strength > SEASONALITY_THRESHOLD =>
        {
            ModelChoice::new(
                ModelKind::HoltWintersWeekly,
                format!(
                    "weekly seasonality strength {:.2} above {}",
                    stats.seasonality_strength, SEASONALITY_THRESHOLD
                ),
            )
        }
        Method::Auto => ModelChoice::new(
            ModelKind::MovingAverage,
            format!(
                "weekly seasonality strength {:.2} over {} days does not justify a seasonal model",
                stats.seasonality_strength, stats.len
            ),
        ),
        Method::MovingAverage => {
            ModelChoice::new(ModelKind::MovingAverage, "moving average requested")
        }
    }
}
