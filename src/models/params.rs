use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::forecast::Method;
use crate::error::ValidationError;
use crate::zone::LocalZone;

pub const DEFAULT_HORIZON: usize = 30;
pub const DEFAULT_MIN_HISTORY: usize = 90;
pub const DEFAULT_LOOKBACK_DAYS: i64 = 365;
pub const MAX_HORIZON_DAYS: i64 = 366;
/// Longest history window a single request may aggregate (about ten years).
pub const MAX_RANGE_DAYS: i64 = 3660;
pub const DEFAULT_INCREASE_THRESHOLD: f64 = 0.20;
pub const DEFAULT_DECREASE_THRESHOLD: f64 = -0.15;

/// Raw input from an HTTP body or CLI flags. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrendRequest {
    pub start: Option<String>,
    pub end: Option<String>,
    pub granularity: Option<String>,
    pub horizon: Option<i64>,
    pub method: Option<String>,
    pub min_history: Option<i64>,
    pub thresholds: Option<ThresholdOverrides>,
    pub store_db: bool,
    pub notify: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdOverrides {
    pub increase: Option<f64>,
    pub decrease: Option<f64>,
}

/// Fractional deviation from baseline that triggers a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub increase: f64,
    pub decrease: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            increase: DEFAULT_INCREASE_THRESHOLD,
            decrease: DEFAULT_DECREASE_THRESHOLD,
        }
    }
}

/// Server-side defaults applied to missing request fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendDefaults {
    pub horizon: usize,
    pub min_history: usize,
    pub lookback_days: i64,
}

impl Default for TrendDefaults {
    fn default() -> Self {
        Self {
            horizon: DEFAULT_HORIZON,
            min_history: DEFAULT_MIN_HISTORY,
            lookback_days: DEFAULT_LOOKBACK_DAYS,
        }
    }
}

/// Validated parameters, echoed back in the result payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendParams {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub granularity: String,
    pub horizon: usize,
    pub method: Method,
    pub min_history: usize,
    pub thresholds: Thresholds,
    pub store_db: bool,
    pub notify: bool,
    pub timezone: String,
}

impl TrendRequest {
    /// Fill defaults relative to `today` and reject malformed input.
    pub fn resolve(
        &self,
        zone: &LocalZone,
        today: NaiveDate,
        defaults: &TrendDefaults,
    ) -> Result<TrendParams, ValidationError> {
        let end = match self.end.as_deref() {
            Some(raw) => parse_date("end", raw, zone)?,
            None => today,
        };
        let start = match self.start.as_deref() {
            Some(raw) => parse_date("start", raw, zone)?,
            None => end
                .checked_sub_signed(Duration::days(defaults.lookback_days))
                .ok_or_else(|| {
                    ValidationError::new("start", format!("no default start before {}", end))
                })?,
        };
        if end < start {
            return Err(ValidationError::new(
                "end",
                format!("end {} is before start {}", end, start),
            ));
        }
        let span = (end - start).num_days();
        if span > MAX_RANGE_DAYS {
            return Err(ValidationError::new(
                "start",
                format!(
                    "range {} to {} spans {} days, at most {} allowed",
                    start, end, span, MAX_RANGE_DAYS
                ),
            ));
        }

        let granularity = self.granularity.as_deref().unwrap_or("daily").trim();
        if granularity != "daily" {
            return Err(ValidationError::new(
                "granularity",
                format!("only \"daily\" is supported, got {:?}", granularity),
            ));
        }

        let horizon = match self.horizon {
            Some(h) if !(1..=MAX_HORIZON_DAYS).contains(&h) => {
                return Err(ValidationError::new(
                    "horizon",
                    format!("must be between 1 and {} days, got {}", MAX_HORIZON_DAYS, h),
                ));
            }
            Some(h) => h as usize,
            None => defaults.horizon,
        };
        if end.checked_add_signed(Duration::days(horizon as i64)).is_none() {
            return Err(ValidationError::new(
                "end",
                format!("a {} day forecast after {} leaves the calendar", horizon, end),
            ));
        }

        let min_history = match self.min_history {
            Some(m) if m < 0 => {
                return Err(ValidationError::new(
                    "minHistory",
                    format!("must not be negative, got {}", m),
                ));
            }
            Some(m) => m as usize,
            None => defaults.min_history,
        };

        let overrides = self.thresholds.clone().unwrap_or_default();
        let thresholds = Thresholds {
            increase: overrides.increase.unwrap_or(DEFAULT_INCREASE_THRESHOLD),
            decrease: overrides.decrease.unwrap_or(DEFAULT_DECREASE_THRESHOLD),
        };
        if !thresholds.increase.is_finite() || thresholds.increase <= 0.0 {
            return Err(ValidationError::new(
                "thresholds.increase",
                format!("must be a positive fraction, got {}", thresholds.increase),
            ));
        }
        if !thresholds.decrease.is_finite() || thresholds.decrease >= 0.0 {
            return Err(ValidationError::new(
                "thresholds.decrease",
                format!("must be a negative fraction, got {}", thresholds.decrease),
            ));
        }

        Ok(TrendParams {
            start,
            end,
            granularity: granularity.to_string(),
            horizon,
            method: self
                .method
                .as_deref()
                .map(Method::from_str_loose)
                .unwrap_or_default(),
            min_history,
            thresholds,
            store_db: self.store_db,
            notify: self.notify,
            timezone: zone.name(),
        })
    }
}

/// `YYYY-MM-DD`, or an RFC 3339 timestamp mapped onto the local calendar.
fn parse_date(field: &'static str, raw: &str, zone: &LocalZone) -> Result<NaiveDate, ValidationError> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| zone.date_of(ts.with_timezone(&Utc)))
        .map_err(|_| {
            ValidationError::new(field, format!("expected an ISO date (YYYY-MM-DD), got {:?}", raw))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
    }

    fn resolve(req: &TrendRequest) -> Result<TrendParams, ValidationError> {
        req.resolve(&LocalZone::default(), today(), &TrendDefaults::default())
    }

    #[test]
    fn defaults_fill_a_year_ending_today() {
        let p = resolve(&TrendRequest::default()).unwrap();
        assert_eq!(p.end, today());
        assert_eq!(p.start, today() - Duration::days(365));
        assert_eq!(p.horizon, 30);
        assert_eq!(p.min_history, 90);
        assert_eq!(p.method, Method::Auto);
        assert_eq!(p.thresholds, Thresholds::default());
        assert_eq!(p.granularity, "daily");
        assert_eq!(p.timezone, "+02:00");
    }

    #[test]
    fn camel_case_body_is_honoured() {
        let body = r#"{
            "start": "2024-01-01",
            "end": "2024-03-31",
            "horizon": 14,
            "method": "holt-winters-weekly",
            "minHistory": 30,
            "thresholds": { "increase": 0.3 },
            "storeDb": true,
            "notify": true
        }"#;
        let req: TrendRequest = serde_json::from_str(body).unwrap();
        let p = resolve(&req).unwrap();
        assert_eq!(p.start, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(p.end, NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
        assert_eq!(p.horizon, 14);
        assert_eq!(p.method, Method::HoltWintersWeekly);
        assert_eq!(p.min_history, 30);
        assert!((p.thresholds.increase - 0.3).abs() < 1e-12);
        assert!((p.thresholds.decrease - DEFAULT_DECREASE_THRESHOLD).abs() < 1e-12);
        assert!(p.store_db);
        assert!(p.notify);
    }

    #[test]
    fn rfc3339_end_uses_local_calendar() {
        let req = TrendRequest {
            end: Some("2024-03-10T23:30:00Z".to_string()),
            ..Default::default()
        };
        let p = resolve(&req).unwrap();
        assert_eq!(p.end, NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());
    }

    #[test]
    fn end_before_start_names_end() {
        let req = TrendRequest {
            start: Some("2024-05-01".to_string()),
            end: Some("2024-04-01".to_string()),
            ..Default::default()
        };
        assert_eq!(resolve(&req).unwrap_err().field, "end");
    }

    #[test]
    fn bad_fields_are_named() {
        let cases = [
            (
                TrendRequest {
                    horizon: Some(0),
                    ..Default::default()
                },
                "horizon",
            ),
            (
                TrendRequest {
                    horizon: Some(-7),
                    ..Default::default()
                },
                "horizon",
            ),
            (
                TrendRequest {
                    min_history: Some(-1),
                    ..Default::default()
                },
                "minHistory",
            ),
            (
                TrendRequest {
                    start: Some("yesterday".to_string()),
                    ..Default::default()
                },
                "start",
            ),
            (
                TrendRequest {
                    granularity: Some("weekly".to_string()),
                    ..Default::default()
                },
                "granularity",
            ),
            (
                TrendRequest {
                    thresholds: Some(ThresholdOverrides {
                        increase: Some(-0.1),
                        decrease: None,
                    }),
                    ..Default::default()
                },
                "thresholds.increase",
            ),
            (
                TrendRequest {
                    thresholds: Some(ThresholdOverrides {
                        increase: None,
                        decrease: Some(0.1),
                    }),
                    ..Default::default()
                },
                "thresholds.decrease",
            ),
            (
                TrendRequest {
                    start: Some("+262142-12-01".to_string()),
                    end: Some("+262142-12-31".to_string()),
                    horizon: Some(3),
                    ..Default::default()
                },
                "end",
            ),
            (
                TrendRequest {
                    start: Some("-262143-01-01".to_string()),
                    end: Some("+262142-12-31".to_string()),
                    ..Default::default()
                },
                "start",
            ),
            (
                TrendRequest {
                    start: Some("2010-01-01".to_string()),
                    end: Some("2024-06-30".to_string()),
                    ..Default::default()
                },
                "start",
            ),
        ];

        for (req, field) in cases {
            assert_eq!(resolve(&req).unwrap_err().field, field, "request: {:?}", req);
        }
    }

    #[test]
    fn default_start_before_the_calendar_is_rejected() {
        let req = TrendRequest {
            end: Some(NaiveDate::MIN.to_string()),
            ..Default::default()
        };
        assert_eq!(resolve(&req).unwrap_err().field, "start");
    }

    #[test]
    fn ten_year_range_is_accepted() {
        let req = TrendRequest {
            start: Some("2014-07-03".to_string()),
            end: Some("2024-06-30".to_string()),
            ..Default::default()
        };
        let p = resolve(&req).unwrap();
        assert_eq!((p.end - p.start).num_days(), 3650);
    }

    #[test]
    fn start_equal_to_end_is_a_single_day() {
        let req = TrendRequest {
            start: Some("2024-05-01".to_string()),
            end: Some("2024-05-01".to_string()),
            ..Default::default()
        };
        let p = resolve(&req).unwrap();
        assert_eq!(p.start, p.end);
    }
}
