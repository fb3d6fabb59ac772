//! Adoption-curve stage classification

use crate::insights::stats::mean;
use crate::insights::types::*;

/// Points in each comparison window.
pub const STAGE_WINDOW: usize = 14;

/// Relative change between the mean of the last [`STAGE_WINDOW`] points and
/// the mean of the (up to) [`STAGE_WINDOW`] points before them.
///
/// `None` when either window is empty. A zero previous mean gives infinite
/// acceleration when the recent window is positive, and 0 when both are zero.
pub fn acceleration(history: &[MetricPoint]) -> Option<f64> {
    if history.len() < STAGE_WINDOW {
        return None;
    }

    let split = history.len() - STAGE_WINDOW;
    let previous = &history[split.saturating_sub(STAGE_WINDOW)..split];
    let recent = &history[split..];

    let previous_avg = mean(&values_of(previous))?;
    let recent_avg = mean(&values_of(recent))?;

    if previous_avg == 0.0 {
        // rising from nothing is unbounded acceleration
        return Some(if recent_avg > 0.0 { f64::INFINITY } else { 0.0 });
    }
    Some((recent_avg - previous_avg) / previous_avg)
}

/// Classify where a product sits on the adoption curve.
///
/// Rules are evaluated in order and the first match wins; anything left over
/// is a decline. Histories without two comparison windows are `Early`.
pub fn identify_adoption_stage(history: &[MetricPoint], current_growth_rate: f64) -> AdoptionStage {
    let Some(acceleration) = acceleration(history) else {
        return AdoptionStage::Early;
    };

    if current_growth_rate > 50.0 && acceleration > 0.2 {
        AdoptionStage::Early
    } else if current_growth_rate > 20.0 && acceleration > 0.0 {
        AdoptionStage::Growth
    } else if current_growth_rate > -10.0 && acceleration < 0.1 {
        AdoptionStage::Maturity
    } else {
        AdoptionStage::Decline
    }
}
