use chrono::{Duration, NaiveDate};
use tracing::{debug, warn};

use super::holt_winters::HoltWinters;
use super::model_select::ModelChoice;
use super::moving_average::moving_average_forecast;
use super::seasonality::SEASON_LENGTH;
use crate::models::{DailySeries, ForecastPoint, ModelKind};

/// Point forecasts for `end + 1 ..= end + horizon` using the chosen model.
///
/// Bounds are left equal to `pred`; intervals are applied afterwards. If
/// Holt-Winters was chosen but the series is too short to fit it, the
/// moving average is used instead and the reason says so.
pub fn forecast(
    series: &DailySeries,
    end: NaiveDate,
    horizon: usize,
    choice: &ModelChoice,
) -> Vec<ForecastPoint> {
    let (kind, reason, preds) = match choice.kind {
        ModelKind::HoltWintersWeekly => match HoltWinters::fit(&series.values()) {
            Some(model) => {
                debug!(
                    "Holt-Winters fitted: level={:.2} trend={:.4}",
                    model.level(),
                    model.trend()
                );
                (choice.kind, choice.reason.clone(), model.forecast(horizon))
            }
            None => {
                warn!(
                    "Holt-Winters needs {} days, series has {}; using moving average",
                    2 * SEASON_LENGTH,
                    series.len()
                );
                (
                    ModelKind::MovingAverage,
                    format!(
                        "holt-winters needs at least {} days, series has {}; moving average used",
                        2 * SEASON_LENGTH,
                        series.len()
                    ),
                    moving_average_forecast(series, horizon),
                )
            }
        },
        kind => (kind, choice.reason.clone(), moving_average_forecast(series, horizon)),
    };

    preds
        .into_iter()
        .enumerate()
        // stops at the end of the calendar; requests are validated against it
        .map_while(|(i, pred)| {
            let date = end.checked_add_signed(Duration::days(i as i64 + 1))?;
            Some(ForecastPoint {
                date,
                pred,
                lower95: pred,
                upper95: pred,
                model: kind,
                reason: reason.clone(),
            })
        })
        .collect()
}
