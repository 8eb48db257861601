pub mod aggregate;
pub mod forecaster;
pub mod gap_fill;
pub mod holt_winters;
pub mod intervals;
pub mod model_select;
pub mod moving_average;
pub mod outliers;
pub mod recommend;
pub mod seasonality;

/// Round to cents.
pub(crate) fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
