//! Core data types for hype insights

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::insights::error::InsightsError;

/// One daily sample of a scalar metric (downloads, traffic, rank...)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricPoint {
    pub date: NaiveDate,
    pub value: f64,
}

impl MetricPoint {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// Direction of a fitted trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
}

/// Classification label attached to a detected spike
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpikeReason {
    #[serde(rename = "Viral growth")]
    ViralGrowth,
    #[serde(rename = "Strong momentum")]
    StrongMomentum,
    #[serde(rename = "Accelerated growth")]
    AcceleratedGrowth,
}

impl SpikeReason {
    /// Classify a spike by its magnitude (recent / baseline ratio).
    pub fn from_magnitude(magnitude: f64) -> Self {
        if magnitude >= 5.0 {
            Self::ViralGrowth
        } else if magnitude >= 3.0 {
            Self::StrongMomentum
        } else {
            Self::AcceleratedGrowth
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::ViralGrowth => "Viral growth",
            Self::StrongMomentum => "Strong momentum",
            Self::AcceleratedGrowth => "Accelerated growth",
        }
    }
}

impl fmt::Display for SpikeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A detected short-window surge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HypeSpike {
    pub detected_at: NaiveDate,
    pub magnitude: f64,
    /// Window length in days, always [`SPIKE_WINDOW_DAYS`].
    #[serde(rename = "duration")]
    pub duration_days: u32,
    pub reason: SpikeReason,
}

/// Number of trailing points treated as the "recent" window in spike detection.
pub const SPIKE_WINDOW_DAYS: u32 = 7;

/// Result of a linear-regression projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub forecast: u64,
    pub confidence: f64, // 0.0 to 1.0
    pub trend: TrendDirection,
}

impl ForecastResult {
    /// Neutral result returned when the history is too short to fit.
    pub fn insufficient() -> Self {
        Self {
            forecast: 0,
            confidence: 0.0,
            trend: TrendDirection::Stable,
        }
    }
}

/// Lifecycle position on the adoption curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdoptionStage {
    Early,
    Growth,
    Maturity,
    Decline,
}

/// One projection horizon for a product metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastData {
    pub metric: String,
    pub horizon_days: u32,
    pub current: f64,
    pub forecast: u64,
    pub confidence: f64,
    pub trend: TrendDirection,
}

/// Summary of where a metric is and where it is heading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendAnalysis {
    pub current: f64,
    pub change_30d: f64,
    pub change_90d: f64,
    pub prediction_30d: u64,
    pub prediction_90d: u64,
    pub volatility: f64,
    pub confidence: f64,
}

/// Average star rating, guaranteed finite and within `[0, 5]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Rating(f64);

impl Rating {
    pub const MAX: f64 = 5.0;

    pub fn new(value: f64) -> Result<Self, InsightsError> {
        if !value.is_finite() || !(0.0..=Self::MAX).contains(&value) {
            return Err(InsightsError::invalid_data(format!(
                "rating {} is outside [0, 5]",
                value
            )));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Rating {
    type Error = InsightsError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for f64 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

/// Check that a history is a well-formed lagging daily window.
///
/// Values must be finite and non-negative and each date must be exactly one
/// day after its predecessor.
pub fn validate_history(history: &[MetricPoint]) -> Result<(), InsightsError> {
    for (i, point) in history.iter().enumerate() {
        if !point.value.is_finite() || point.value < 0.0 {
            return Err(InsightsError::invalid_data(format!(
                "invalid metric value {} at index {}",
                point.value, i
            )));
        }

        if i > 0 {
            let previous = history[i - 1].date;
            if point.date.signed_duration_since(previous).num_days() != 1 {
                return Err(InsightsError::invalid_data(format!(
                    "non-consecutive date {} after {} at index {}",
                    point.date, previous, i
                )));
            }
        }
    }

    Ok(())
}

/// Extract the raw values of a history, oldest first.
pub fn values_of(history: &[MetricPoint]) -> Vec<f64> {
    history.iter().map(|p| p.value).collect()
}
