//! Composite scorers: hype, volatility, sentiment, growth rate

use serde::{Deserialize, Serialize};

use crate::insights::stats::{coefficient_of_variation, round_half_up, round_to};
use crate::insights::types::{values_of, MetricPoint, Rating};

pub const GROWTH_CAP: f64 = 40.0;
pub const VELOCITY_CAP: f64 = 25.0;
pub const SOCIAL_CAP: f64 = 20.0;
pub const VOLATILITY_CAP: f64 = 15.0;

/// Inputs to the hype score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HypeSignals {
    /// Percentage growth over 30 days, may be negative.
    pub growth_rate_30d: f64,
    /// Percentage growth over 7 days, may be negative.
    pub growth_rate_7d: f64,
    /// Reviews per day.
    pub review_velocity: f64,
    pub social_mentions: u64,
    /// 0.0 to 1.0, see [`calculate_volatility`].
    pub volatility: f64,
}

/// Per-component view of a hype score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HypeBreakdown {
    pub growth: f64,
    pub velocity: f64,
    pub social: f64,
    pub volatility: f64,
    pub total: u8,
}

/// Non-finite raw sub-scores count as 0; `f64::min` would otherwise turn a
/// NaN into the cap.
fn capped(raw: f64, cap: f64) -> f64 {
    if raw.is_finite() {
        raw.min(cap)
    } else {
        0.0
    }
}

/// Compute each capped sub-score and the clamped total.
///
/// The growth sub-score has no floor of its own, so strongly negative growth
/// can pull the total down to 0.
pub fn hype_breakdown(signals: &HypeSignals) -> HypeBreakdown {
    let growth = capped(signals.growth_rate_7d * 2.0 + signals.growth_rate_30d * 0.5, GROWTH_CAP);
    let velocity = capped(signals.review_velocity * 5.0, VELOCITY_CAP);
    let social = capped((signals.social_mentions as f64 + 1.0).log10() * 5.0, SOCIAL_CAP);
    let volatility = capped(signals.volatility * 15.0, VOLATILITY_CAP);

    let sum = growth + velocity + social + volatility;
    let total = round_half_up(sum.clamp(0.0, 100.0)) as u8;

    HypeBreakdown {
        growth,
        velocity,
        social,
        volatility,
        total,
    }
}

/// Composite 0-100 hype score.
pub fn calculate_hype_score(signals: &HypeSignals) -> u8 {
    hype_breakdown(signals).total
}

/// Coefficient of variation of a history, clamped to `[0, 1]`.
///
/// Fewer than two points, or a non-positive mean, yields 0.
pub fn calculate_volatility(history: &[MetricPoint]) -> f64 {
    if history.len() < 2 {
        return 0.0;
    }
    coefficient_of_variation(&values_of(history))
        .map(|cv| cv.min(1.0))
        .unwrap_or(0.0)
}

/// Aggregate review sentiment in `[-1, 1]`.
///
/// `rating_distribution` holds counts for 1 to 5 stars. A polarized
/// distribution (many 1 and 5 star reviews) shrinks the score toward 0.
/// An all-zero distribution is ignored.
pub fn calculate_sentiment_score(
    rating: Rating,
    _review_count: u64,
    rating_distribution: Option<&[u64; 5]>,
) -> f64 {
    let base = (rating.value() - 3.0) / 2.0;

    let Some(distribution) = rating_distribution else {
        return base;
    };

    // counts come straight from input files, so sum in f64 rather than u64
    let total: f64 = distribution.iter().map(|&count| count as f64).sum();
    if total == 0.0 {
        return base;
    }

    let polarization = (distribution[0] as f64 + distribution[4] as f64) / total;
    base * (1.0 - polarization * 0.3)
}

/// Percentage change from `previous_value` to `current_value`, one decimal.
///
/// A zero previous value yields 100 when current is positive, else 0.
pub fn calculate_growth_rate(current_value: f64, previous_value: f64) -> f64 {
    if previous_value == 0.0 {
        return if current_value > 0.0 { 100.0 } else { 0.0 };
    }
    let rate = (current_value - previous_value) / previous_value * 100.0;
    round_to(rate, 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn series(values: &[f64]) -> Vec<MetricPoint> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, v)| MetricPoint::new(start + chrono::Duration::days(i as i64), *v))
            .collect()
    }

    #[test]
    fn hype_caps_sum_to_one_hundred() {
        assert_eq!(GROWTH_CAP + VELOCITY_CAP + SOCIAL_CAP + VOLATILITY_CAP, 100.0);
    }

    #[test]
    fn hype_all_caps_hit_gives_one_hundred() {
        let signals = HypeSignals {
            growth_rate_30d: 100.0,
            growth_rate_7d: 50.0,
            review_velocity: 10.0,
            social_mentions: 1_000_000,
            volatility: 1.0,
        };
        assert_eq!(calculate_hype_score(&signals), 100);
    }

    #[test]
    fn hype_zero_signals_gives_zero() {
        assert_eq!(calculate_hype_score(&HypeSignals::default()), 0);
    }

    #[test]
    fn hype_negative_growth_clamps_to_zero() {
        let signals = HypeSignals {
            growth_rate_30d: -80.0,
            growth_rate_7d: -50.0,
            review_velocity: 2.0,
            social_mentions: 99,
            volatility: 0.2,
        };
        assert_eq!(calculate_hype_score(&signals), 0);
    }

    #[test]
    fn hype_breakdown_components() {
        let signals = HypeSignals {
            growth_rate_30d: 20.0,  // 10
            growth_rate_7d: 5.0,    // 10
            review_velocity: 1.0,   // 5
            social_mentions: 99,    // log10(100) * 5 = 10
            volatility: 0.2,        // 3
        };
        let breakdown = hype_breakdown(&signals);
        assert_eq!(breakdown.growth, 20.0);
        assert_eq!(breakdown.velocity, 5.0);
        assert!((breakdown.social - 10.0).abs() < 1e-9);
        assert!((breakdown.volatility - 3.0).abs() < 1e-9);
        assert_eq!(breakdown.total, 38);
    }

    #[test]
    fn volatility_of_constant_series_is_zero() {
        assert_eq!(calculate_volatility(&series(&[50.0; 10])), 0.0);
    }

    #[test]
    fn volatility_short_or_zero_mean_is_zero() {
        assert_eq!(calculate_volatility(&series(&[10.0])), 0.0);
        assert_eq!(calculate_volatility(&series(&[0.0, 0.0, 0.0])), 0.0);
    }

    #[test]
    fn volatility_is_clamped_to_one() {
        // mean 1, std 3 -> cv 3
        let values = [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 10.0];
        assert_eq!(calculate_volatility(&series(&values)), 1.0);
    }

    #[test]
    fn volatility_coefficient_of_variation() {
        // mean 10, std 5
        let v = calculate_volatility(&series(&[5.0, 15.0]));
        assert!((v - 0.5).abs() < 1e-12);
    }

    #[test]
    fn sentiment_maps_rating_linearly() {
        let s = |r: f64| calculate_sentiment_score(Rating::new(r).unwrap(), 0, None);
        assert_eq!(s(1.0), -1.0);
        assert_eq!(s(3.0), 0.0);
        assert_eq!(s(5.0), 1.0);
    }

    #[test]
    fn sentiment_polarization_shrinks_score() {
        let rating = Rating::new(5.0).unwrap();
        // all reviews are 5 star -> polarization 1 -> multiplier 0.7
        let score = calculate_sentiment_score(rating, 100, Some(&[0, 0, 0, 0, 100]));
        assert!((score - 0.7).abs() < 1e-12);
    }

    #[test]
    fn sentiment_empty_distribution_falls_back_to_base() {
        let rating = Rating::new(4.0).unwrap();
        assert_eq!(calculate_sentiment_score(rating, 0, Some(&[0; 5])), 0.5);
    }

    #[test]
    fn sentiment_handles_counts_near_u64_max() {
        let rating = Rating::new(4.0).unwrap();
        let score = calculate_sentiment_score(rating, 0, Some(&[u64::MAX, 0, 0, 0, 1]));
        // polarization is ~1, so 0.5 * 0.7
        assert!((score - 0.35).abs() < 1e-9);
    }

    #[test]
    fn hype_ignores_non_finite_signals() {
        let signals = HypeSignals {
            growth_rate_30d: f64::NAN,
            review_velocity: f64::INFINITY,
            ..HypeSignals::default()
        };
        let breakdown = hype_breakdown(&signals);
        assert_eq!(breakdown.growth, 0.0);
        assert_eq!(breakdown.velocity, 0.0);
        assert_eq!(breakdown.total, 0);

        let with_social = HypeSignals {
            social_mentions: 99,
            ..signals
        };
        assert_eq!(calculate_hype_score(&with_social), 10);
    }

    #[test]
    fn growth_rate_zero_previous_convention() {
        assert_eq!(calculate_growth_rate(50.0, 0.0), 100.0);
        assert_eq!(calculate_growth_rate(0.0, 0.0), 0.0);
    }

    #[test]
    fn growth_rate_rounds_to_one_decimal() {
        assert_eq!(calculate_growth_rate(150.0, 100.0), 50.0);
        assert_eq!(calculate_growth_rate(100.0, 300.0), -66.7);
        assert_eq!(calculate_growth_rate(1.0, 3.0), -66.7);
    }
}
