use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A completed sale as handed over by the store. Only the timestamp and the
/// order total matter for forecasting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    #[serde(rename = "createdAt", alias = "created_at", deserialize_with = "de_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "totalPrice", alias = "total_price", deserialize_with = "de_price")]
    pub total_price: f64,
}

impl SalesRecord {
    pub fn new(created_at: DateTime<Utc>, total_price: f64) -> Self {
        Self {
            created_at,
            total_price,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPrice {
    Number(f64),
    Text(String),
}

/// Prices come through as JSON numbers or as decimal strings ("12.50").
fn de_price<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    match RawPrice::deserialize(d)? {
        RawPrice::Number(v) => Ok(v),
        RawPrice::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| serde::de::Error::custom(format!("bad price {:?}: {}", s, e))),
    }
}

/// RFC 3339, or a naive `YYYY-MM-DD HH:MM:SS` taken as UTC (SQL datetime columns).
fn de_timestamp<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(d)?;
    if let Ok(ts) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S"))
        .map(|naive| naive.and_utc())
        .map_err(|e| serde::de::Error::custom(format!("bad timestamp {:?}: {}", raw, e)))
}
