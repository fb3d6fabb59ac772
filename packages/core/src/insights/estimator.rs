//! Absolute-metric estimators
//!
//! Converts indirect signals (store rank, review counts, backlinks,
//! keywords) into estimated downloads, monthly revenue, and monthly web
//! traffic.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::insights::stats::round_half_up;
use crate::insights::types::Rating;

/// Downloads implied by a single review.
const DOWNLOADS_PER_REVIEW: f64 = 250.0;

/// Share of lifetime downloads that are active in a given month.
const MONTHLY_ACTIVE_RATIO: f64 = 0.3;

/// Floor for any web-traffic estimate (monthly visits).
pub const MIN_MONTHLY_VISITS: f64 = 1000.0;

/// Estimate lifetime downloads of a mobile app.
///
/// `category_rank` is 1 for the top app; the rank term is floored at 1.
/// A rating of 0 zeroes the whole estimate.
pub fn estimate_downloads(
    category_rank: NonZeroU32,
    review_count: u64,
    rating: Rating,
    days_since_launch: u64,
) -> u64 {
    let rank = f64::from(category_rank.get());
    let rank_factor = (10_000_000.0 / rank.powf(1.5)).max(1.0);
    let review_factor = review_count as f64 * DOWNLOADS_PER_REVIEW;
    let age_factor = (days_since_launch as f64).sqrt() * 100.0;
    let rating_multiplier = (rating.value() / Rating::MAX).powi(2);

    let estimated = (rank_factor + review_factor + age_factor) * rating_multiplier;
    round_half_up(estimated) as u64
}

/// Static category to ARPU mapping with a mandatory fallback.
pub struct ArpuTable;

impl ArpuTable {
    /// ARPU used for any category missing from [`ArpuTable::ENTRIES`].
    pub const DEFAULT_ARPU: f64 = 5.0;

    pub const ENTRIES: &'static [(&'static str, f64)] = &[
        ("Finance", 15.0),
        ("Business", 12.0),
        ("Productivity", 8.0),
        ("Health & Fitness", 10.0),
        ("Education", 7.0),
        ("Entertainment", 5.0),
        ("Games", 3.0),
        ("Social", 2.0),
        ("Utilities", 6.0),
    ];

    /// Look up the ARPU for a category. Matching is exact and case-sensitive.
    pub fn arpu_for(category: &str) -> f64 {
        Self::ENTRIES
            .iter()
            .find(|(name, _)| *name == category)
            .map(|(_, arpu)| *arpu)
            .unwrap_or(Self::DEFAULT_ARPU)
    }
}

/// Estimate monthly revenue of a mobile app.
pub fn estimate_revenue(
    estimated_downloads: u64,
    category: &str,
    rating: Rating,
    has_in_app_purchases: bool,
) -> u64 {
    let conversion_rate = if has_in_app_purchases { 0.03 } else { 0.01 };
    let arpu = ArpuTable::arpu_for(category);
    let rating_multiplier = (rating.value() / Rating::MAX).powf(1.5);

    let active_users = estimated_downloads as f64 * MONTHLY_ACTIVE_RATIO;
    let paying_users = active_users * conversion_rate;

    round_half_up(paying_users * arpu * rating_multiplier) as u64
}

/// Indirect signals available for a web product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WebTrafficSignals {
    pub backlinks: u64,
    pub referring_domains: u64,
    pub top_keywords: u64,
    pub github_stars: u64,
    pub product_hunt_votes: u64,
    pub technologies: u64,
}

/// Estimate monthly visits of a web product.
///
/// Purely additive across signals, floored at [`MIN_MONTHLY_VISITS`].
pub fn estimate_web_traffic(signals: &WebTrafficSignals) -> u64 {
    let backlink_factor = (signals.backlinks as f64).sqrt() * 500.0;
    let domain_factor = signals.referring_domains as f64 * 1000.0;
    let keyword_factor = signals.top_keywords as f64 * 800.0;
    let community_factor =
        signals.github_stars as f64 * 50.0 + signals.product_hunt_votes as f64 * 200.0;
    let tech_factor = signals.technologies as f64 * 500.0;

    let visits = backlink_factor + domain_factor + keyword_factor + community_factor + tech_factor;
    round_half_up(visits.max(MIN_MONTHLY_VISITS)) as u64
}
