use super::moving_average::{trailing_mean, TRAILING_WINDOW_DAYS};
use crate::models::{Action, DailySeries, ForecastPoint, Recommendation, Thresholds};

/// Trailing mean used as the reference level; 1 when there were no sales,
/// so that the relative change stays defined.
pub fn baseline(series: &DailySeries) -> f64 {
    let mean = trailing_mean(series, TRAILING_WINDOW_DAYS);
    if mean == 0.0 {
        1.0
    } else {
        mean
    }
}

/// Both thresholds are inclusive.
pub fn classify(change: f64, thresholds: &Thresholds) -> Action {
    if change >= thresholds.increase {
        Action::RampUp
    } else if change <= thresholds.decrease {
        Action::ScaleDown
    } else {
        Action::NoAction
    }
}

pub fn recommend(point: &ForecastPoint, baseline: f64, thresholds: &Thresholds) -> Recommendation {
    let change = (point.pred - baseline) / baseline;
    let action = classify(change, thresholds);
    let pct = (change * 100.0).round() as i64;

    let message = match action {
        Action::RampUp => format!(
            "ramp-up: forecast {:+}% vs baseline, increase stock and staffing",
            pct
        ),
        Action::ScaleDown => format!(
            "scale-down: forecast {:+}% vs baseline, reduce orders and staffing",
            pct
        ),
        Action::NoAction => format!("no action: forecast {:+}% vs baseline", pct),
    };

    Recommendation {
        date: point.date,
        action,
        change,
        message,
    }
}
