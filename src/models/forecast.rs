use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::params::TrendParams;
use super::series::DailySeries;

/// Model that actually produced a forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelKind {
    #[serde(rename = "holt-winters-weekly")]
    HoltWintersWeekly,
    #[serde(rename = "moving-average-fallback")]
    MovingAverage,
    /// Moving average forced because too few days had sales.
    #[serde(rename = "fallback_moving_average")]
    InsufficientHistory,
}

impl ModelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::HoltWintersWeekly => "holt-winters-weekly",
            ModelKind::MovingAverage => "moving-average-fallback",
            ModelKind::InsufficientHistory => "fallback_moving_average",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Requested forecasting method. Anything that is not `auto` or
/// `holt-winters-weekly` selects the moving average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Method {
    #[default]
    Auto,
    HoltWintersWeekly,
    MovingAverage,
}

impl Method {
    pub fn from_str_loose(s: &str) -> Method {
        match s.trim() {
            "auto" => Method::Auto,
            "holt-winters-weekly" => Method::HoltWintersWeekly,
            _ => Method::MovingAverage,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Auto => "auto",
            Method::HoltWintersWeekly => "holt-winters-weekly",
            Method::MovingAverage => "moving-average",
        }
    }
}

impl From<String> for Method {
    fn from(s: String) -> Self {
        Method::from_str_loose(&s)
    }
}

impl From<Method> for String {
    fn from(m: Method) -> Self {
        m.as_str().to_string()
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub pred: f64,
    pub lower95: f64,
    pub upper95: f64,
    pub model: ModelKind,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    #[serde(rename = "ramp-up")]
    RampUp,
    #[serde(rename = "scale-down")]
    ScaleDown,
    #[serde(rename = "no action")]
    NoAction,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::RampUp => "ramp-up",
            Action::ScaleDown => "scale-down",
            Action::NoAction => "no action",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub date: NaiveDate,
    pub action: Action,
    /// Fractional deviation from baseline, e.g. 0.2 for +20%.
    pub change: f64,
    pub message: String,
}

/// A forecast day as returned to callers: the point plus its recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    #[serde(flatten)]
    pub point: ForecastPoint,
    pub action: Action,
    pub recommended_action: String,
}

impl Prediction {
    pub fn new(point: ForecastPoint, recommendation: Recommendation) -> Self {
        Self {
            point,
            action: recommendation.action,
            recommended_action: recommendation.message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultPayload {
    pub generated_at: DateTime<Utc>,
    pub params: TrendParams,
    pub series: DailySeries,
    pub predictions: Vec<Prediction>,
    pub outliers: Vec<NaiveDate>,
}
