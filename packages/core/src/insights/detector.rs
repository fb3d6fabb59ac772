//! Hype spike detection

use crate::insights::{
    config::SpikeConfig,
    stats::mean,
    types::*,
};

/// Detect a surge in the last [`SPIKE_WINDOW_DAYS`] points relative to the
/// points before them.
///
/// Returns `None` when the history has no baseline (7 points or fewer), when
/// the baseline mean is not positive, or when the ratio stays below
/// `threshold`.
pub fn detect_hype_spike(history: &[MetricPoint], threshold: f64) -> Option<HypeSpike> {
    let window = SPIKE_WINDOW_DAYS as usize;
    if history.len() <= window {
        return None;
    }

    let (baseline, recent) = history.split_at(history.len() - window);
    let baseline_avg = mean(&values_of(baseline))?;
    let recent_avg = mean(&values_of(recent))?;

    if baseline_avg <= 0.0 {
        return None;
    }

    let magnitude = recent_avg / baseline_avg;
    if magnitude < threshold {
        return None;
    }

    let detected_at = recent.last()?.date;
    Some(HypeSpike {
        detected_at,
        magnitude,
        duration_days: SPIKE_WINDOW_DAYS,
        reason: SpikeReason::from_magnitude(magnitude),
    })
}

/// Spike detector bound to a configured threshold
#[derive(Debug, Clone)]
pub struct SpikeDetector {
    config: SpikeConfig,
}

impl SpikeDetector {
    pub fn new(config: SpikeConfig) -> Self {
        Self { config }
    }

    pub fn threshold(&self) -> f64 {
        self.config.threshold_multiplier
    }

    pub fn detect(&self, history: &[MetricPoint]) -> Option<HypeSpike> {
        let spike = detect_hype_spike(history, self.config.threshold_multiplier);
        if let Some(spike) = &spike {
            tracing::debug!(
                "Spike detected at {}: {:.2}x ({})",
                spike.detected_at,
                spike.magnitude,
                spike.reason
            );
        }
        spike
    }
}

impl Default for SpikeDetector {
    fn default() -> Self {
        Self::new(SpikeConfig::default())
    }
}
