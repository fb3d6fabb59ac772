//! Linear-regression trend forecasting

use serde::{Deserialize, Serialize};

use crate::insights::stats::round_half_up;
use crate::insights::types::*;

/// Minimum number of points needed before a forecast is attempted.
pub const MIN_FORECAST_POINTS: usize = 7;

/// Slope (value per day) beyond which a trend counts as up or down.
pub const TREND_SLOPE_THRESHOLD: f64 = 0.05;

/// Ordinary least-squares fit of value against index position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// Goodness of fit in `[0, 1]`. A perfectly flat series scores 1.
    pub r_squared: f64,
}

impl LinearFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    pub fn direction(&self) -> TrendDirection {
        if self.slope > TREND_SLOPE_THRESHOLD {
            TrendDirection::Up
        } else if self.slope < -TREND_SLOPE_THRESHOLD {
            TrendDirection::Down
        } else {
            TrendDirection::Stable
        }
    }
}

/// Fit `y = slope * x + intercept` with `x = 0..n`.
///
/// Returns `None` for fewer than two values.
pub fn linear_fit(values: &[f64]) -> Option<LinearFit> {
    if values.len() < 2 {
        return None;
    }

    let n = values.len() as f64;
    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_x2) = (0.0, 0.0, 0.0, 0.0);
    for (i, y) in values.iter().enumerate() {
        let x = i as f64;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_x2 += x * x;
    }

    let slope = (n * sum_xy - sum_x * sum_y) / (n * sum_x2 - sum_x * sum_x);
    let intercept = (sum_y - slope * sum_x) / n;

    let y_mean = sum_y / n;
    let mut ss_total = 0.0;
    let mut ss_residual = 0.0;
    for (i, y) in values.iter().enumerate() {
        let predicted = slope * i as f64 + intercept;
        ss_total += (y - y_mean).powi(2);
        ss_residual += (y - predicted).powi(2);
    }

    let r_squared = if ss_total == 0.0 {
        1.0
    } else {
        (1.0 - ss_residual / ss_total).clamp(0.0, 1.0)
    };

    Some(LinearFit {
        slope,
        intercept,
        r_squared,
    })
}

/// Project a history `days_ahead` steps past its end.
///
/// The projection is evaluated at `x = n + days_ahead`, floored at 0.
/// Histories shorter than [`MIN_FORECAST_POINTS`] get
/// [`ForecastResult::insufficient`].
pub fn forecast_trend(history: &[MetricPoint], days_ahead: u32) -> ForecastResult {
    if history.len() < MIN_FORECAST_POINTS {
        return ForecastResult::insufficient();
    }

    let Some(fit) = linear_fit(&values_of(history)) else {
        return ForecastResult::insufficient();
    };

    let future_x = (history.len() as u64 + u64::from(days_ahead)) as f64;
    let forecast = round_half_up(fit.predict(future_x)).max(0.0);

    ForecastResult {
        forecast: forecast as u64,
        confidence: fit.r_squared,
        trend: fit.direction(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn series(values: &[f64]) -> Vec<MetricPoint> {
        let start = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, v)| MetricPoint::new(start + Duration::days(i as i64), *v))
            .collect()
    }

    #[test]
    fn six_points_is_insufficient() {
        let result = forecast_trend(&series(&[1.0, 50.0, 3.0, 900.0, 5.0, 6.0]), 30);
        assert_eq!(result, ForecastResult::insufficient());
        assert_eq!(result.forecast, 0);
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.trend, TrendDirection::Stable);
    }

    #[test]
    fn perfect_line_projects_exactly() {
        let history = series(&[10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0]);
        let result = forecast_trend(&history, 30);
        assert_eq!(result.forecast, 380);
        assert_eq!(result.confidence, 1.0);
        assert_eq!(result.trend, TrendDirection::Up);
    }

    #[test]
    fn linear_fit_recovers_slope_and_intercept() {
        let fit = linear_fit(&[10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0]).unwrap();
        assert!((fit.slope - 10.0).abs() < 1e-9);
        assert!((fit.intercept - 10.0).abs() < 1e-9);
    }

    #[test]
    fn flat_series_has_full_confidence() {
        let result = forecast_trend(&series(&[42.0; 10]), 30);
        assert_eq!(result.forecast, 42);
        assert_eq!(result.confidence, 1.0);
        assert_eq!(result.trend, TrendDirection::Stable);
    }

    #[test]
    fn declining_series_is_floored_at_zero() {
        let history = series(&[70.0, 60.0, 50.0, 40.0, 30.0, 20.0, 10.0]);
        let result = forecast_trend(&history, 30);
        assert_eq!(result.forecast, 0);
        assert_eq!(result.trend, TrendDirection::Down);
    }

    #[test]
    fn tiny_slope_is_stable() {
        // slope 0.01 per day stays inside the +/-0.05 band
        let values: Vec<f64> = (0..10).map(|i| 1000.0 + i as f64 * 0.01).collect();
        let result = forecast_trend(&series(&values), 30);
        assert_eq!(result.trend, TrendDirection::Stable);
    }

    #[test]
    fn slope_threshold_is_exclusive() {
        let fit = |slope: f64| LinearFit {
            slope,
            intercept: 0.0,
            r_squared: 1.0,
        };
        assert_eq!(fit(TREND_SLOPE_THRESHOLD).direction(), TrendDirection::Stable);
        assert_eq!(fit(0.0501).direction(), TrendDirection::Up);
        assert_eq!(fit(-TREND_SLOPE_THRESHOLD).direction(), TrendDirection::Stable);
        assert_eq!(fit(-0.0501).direction(), TrendDirection::Down);
    }

    #[test]
    fn noisy_series_confidence_in_unit_range() {
        let result = forecast_trend(&series(&[5.0, 1.0, 9.0, 2.0, 8.0, 3.0, 7.0, 4.0]), 10);
        assert!((0.0..=1.0).contains(&result.confidence));
        assert!(result.confidence < 1.0);
    }
}
