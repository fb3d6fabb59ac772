use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::cli::Cli;
use crate::insights::InsightsConfig;

/// Seed used for synthetic data when none is configured.
pub const DEFAULT_SYNTHETIC_SEED: u64 = 42;

#[derive(Debug, Clone)]
pub struct Config {
    pub insights: InsightsConfig,
    /// JSON product file; synthetic data is used when absent.
    pub input_path: Option<PathBuf>,
    pub synthetic_seed: u64,
    /// Reference date for app age and synthetic history; today when absent.
    pub as_of: Option<NaiveDate>,
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, String> {
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| format!("{} has an invalid value: {}", key, raw)),
        None => Ok(None),
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    ///
    /// Values are parsed but not validated; call [`Config::apply_cli`] or
    /// [`Config::validate`] before use.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let mut insights = InsightsConfig::default();

        if let Some(threshold) = parse_var::<f64>(&lookup, "HYPE_SPIKE_THRESHOLD")? {
            insights.spike_detection.threshold_multiplier = threshold;
        }
        if let Some(days) = parse_var::<u32>(&lookup, "HYPE_FORECAST_SHORT_DAYS")? {
            insights.forecast.short_horizon_days = days;
        }
        if let Some(days) = parse_var::<u32>(&lookup, "HYPE_FORECAST_LONG_DAYS")? {
            insights.forecast.long_horizon_days = days;
        }
        if let Some(growth) = parse_var::<f64>(&lookup, "HYPE_TRENDING_GROWTH")? {
            insights.trending_growth_threshold = growth;
        }

        let input_path = lookup("HYPE_INPUT_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let synthetic_seed =
            parse_var::<u64>(&lookup, "HYPE_SYNTHETIC_SEED")?.unwrap_or(DEFAULT_SYNTHETIC_SEED);

        let as_of = parse_var::<NaiveDate>(&lookup, "HYPE_AS_OF")?;

        Ok(Self {
            insights,
            input_path,
            synthetic_seed,
            as_of,
        })
    }

    /// Command-line arguments take precedence over the environment. The merged
    /// configuration is validated here.
    pub fn apply_cli(&mut self, cli: &Cli) -> Result<(), String> {
        if let Some(path) = &cli.input {
            self.input_path = Some(path.clone());
        }
        if let Some(seed) = cli.seed {
            self.synthetic_seed = seed;
        }
        if let Some(as_of) = cli.as_of {
            self.as_of = Some(as_of);
        }
        if let Some(threshold) = cli.spike_threshold {
            self.insights.spike_detection.threshold_multiplier = threshold;
        }
        self.validate()
    }

    pub fn validate(&self) -> Result<(), String> {
        self.insights.validate().map_err(|err| err.to_string())
    }
}
