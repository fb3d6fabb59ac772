//! Configuration for the hype insights engine

use serde::{Deserialize, Serialize};

use crate::insights::error::InsightsError;

/// Configuration for the hype insights engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightsConfig {
    pub spike_detection: SpikeConfig,
    pub forecast: ForecastConfig,
    /// Mean category growth (percent) above which a category is trending.
    pub trending_growth_threshold: f64,
}

/// Configuration for spike detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpikeConfig {
    pub threshold_multiplier: f64,
}

/// Forecast horizons in days
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    pub short_horizon_days: u32,
    pub long_horizon_days: u32,
}

impl InsightsConfig {
    pub fn validate(&self) -> Result<(), InsightsError> {
        let threshold = self.spike_detection.threshold_multiplier;
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(InsightsError::config_error(format!(
                "spike threshold must be a positive number, got {}",
                threshold
            )));
        }

        if self.forecast.short_horizon_days == 0 || self.forecast.long_horizon_days == 0 {
            return Err(InsightsError::config_error("forecast horizons must be at least 1 day"));
        }

        if self.forecast.short_horizon_days > self.forecast.long_horizon_days {
            return Err(InsightsError::config_error(format!(
                "short horizon ({}d) exceeds long horizon ({}d)",
                self.forecast.short_horizon_days, self.forecast.long_horizon_days
            )));
        }

        if !self.trending_growth_threshold.is_finite() {
            return Err(InsightsError::config_error("trending growth threshold must be finite"));
        }

        Ok(())
    }
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            spike_detection: SpikeConfig::default(),
            forecast: ForecastConfig::default(),
            trending_growth_threshold: 100.0,
        }
    }
}

impl Default for SpikeConfig {
    fn default() -> Self {
        Self {
            threshold_multiplier: 2.0,
        }
    }
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            short_horizon_days: 30,
            long_horizon_days: 90,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(InsightsConfig::default().validate().is_ok());
    }

    #[test]
    fn non_positive_threshold_is_rejected() {
        let mut config = InsightsConfig::default();
        config.spike_detection.threshold_multiplier = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn inverted_horizons_are_rejected() {
        let mut config = InsightsConfig::default();
        config.forecast.short_horizon_days = 120;
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: InsightsConfig =
            serde_json::from_str(r#"{"spike_detection": {"threshold_multiplier": 3.0}}"#).unwrap();
        assert_eq!(config.spike_detection.threshold_multiplier, 3.0);
        assert_eq!(config.forecast.long_horizon_days, 90);
        assert_eq!(config.trending_growth_threshold, 100.0);
    }
}
