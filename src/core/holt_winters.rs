use super::round2;
use super::seasonality::SEASON_LENGTH;

pub const ALPHA: f64 = 0.4;
pub const BETA: f64 = 0.05;
pub const GAMMA: f64 = 0.2;

/// Additive Holt-Winters with a weekly season and fixed smoothing constants.
///
/// - Level: `l_t = α(y_t - s_{t-m}) + (1-α)(l_{t-1} + b_{t-1})`
/// - Trend: `b_t = β(l_t - l_{t-1}) + (1-β)b_{t-1}`
/// - Seasonal: `s_t = γ(y_t - l_t) + (1-γ)s_{t-m}`
/// - Forecast: `ŷ_{n+h} = l_n + h·b_n + s_{(n+h-1) mod m}`
#[derive(Debug, Clone, PartialEq)]
pub struct HoltWinters {
    level: f64,
    trend: f64,
    seasonals: [f64; SEASON_LENGTH],
    n: usize,
}

impl HoltWinters {
    /// Fit on `values`. Needs two full seasons, otherwise `None`.
    pub fn fit(values: &[f64]) -> Option<Self> {
        Self::fit_with(values, ALPHA, BETA, GAMMA)
    }

    pub fn fit_with(values: &[f64], alpha: f64, beta: f64, gamma: f64) -> Option<Self> {
        let m = SEASON_LENGTH;
        let n = values.len();
        if n < 2 * m {
            return None;
        }

        let seasons = n / m;
        let season_avgs: Vec<f64> = values
            .chunks_exact(m)
            .map(|season| season.iter().sum::<f64>() / m as f64)
            .collect();

        let mut level = season_avgs[0];
        let mut trend = (season_avgs[1] - season_avgs[0]) / m as f64;

        let mut seasonals = [0.0; SEASON_LENGTH];
        for (i, slot) in seasonals.iter_mut().enumerate() {
            let deviation: f64 = (0..seasons)
                .map(|s| values[s * m + i] - season_avgs[s])
                .sum();
            *slot = deviation / seasons as f64;
        }

        for (t, &y) in values.iter().enumerate() {
            let idx = t % m;
            let last_level = level;
            level = alpha * (y - seasonals[idx]) + (1.0 - alpha) * (level + trend);
            trend = beta * (level - last_level) + (1.0 - beta) * trend;
            seasonals[idx] = gamma * (y - level) + (1.0 - gamma) * seasonals[idx];
        }

        Some(Self {
            level,
            trend,
            seasonals,
            n,
        })
    }

    /// Point forecasts for `h = 1..=horizon`, floored at 0, in cents.
    pub fn forecast(&self, horizon: usize) -> Vec<f64> {
        (1..=horizon)
            .map(|h| {
                let seasonal = self.seasonals[(self.n + h - 1) % SEASON_LENGTH];
                round2((self.level + h as f64 * self.trend + seasonal).max(0.0))
            })
            .collect()
    }

    pub fn level(&self) -> f64 {
        self.level
    }

    pub fn trend(&self) -> f64 {
        self.trend
    }
}
