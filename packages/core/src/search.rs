//! Catalog queries over analysed products: search, rankings, comparisons
//! and per-category aggregates.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::insights::engine::{AnalyzedProduct, Estimates};
use crate::insights::stats::{mean, round_half_up, round_to};
use crate::insights::InsightsError;
use crate::products::{Platform, Product};

/// Growth (percent) a product needs to count as a top grower.
pub const TOP_GROWER_THRESHOLD: f64 = 100.0;

/// Maximum number of products in one comparison.
pub const MAX_COMPARED_PRODUCTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Hype,
    Growth,
    Name,
    /// Estimated downloads, descending. Web products sort as 0.
    Downloads,
    /// Estimated monthly traffic, descending. Mobile apps sort as 0.
    Traffic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchQuery {
    /// Case-insensitive substring matched against name, description and category.
    pub query: String,
    pub platform: Option<Platform>,
    pub category: Option<String>,
    pub min_hype_score: Option<u8>,
    pub sort_by: SortBy,
    /// 1-based page number.
    pub page: usize,
    pub page_size: usize,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            query: String::new(),
            platform: None,
            category: None,
            min_hype_score: None,
            sort_by: SortBy::Hype,
            page: 1,
            page_size: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub results: Vec<AnalyzedProduct>,
    /// Matches before pagination.
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
}

fn matches(product: &AnalyzedProduct, query: &SearchQuery, needle: &str) -> bool {
    let info = product.product.info();

    let matches_query = needle.is_empty()
        || info.name.to_lowercase().contains(needle)
        || info.description.to_lowercase().contains(needle)
        || info.category.to_lowercase().contains(needle);

    let matches_platform = query
        .platform
        .map_or(true, |platform| product.product.platform() == platform);

    let matches_category = query
        .category
        .as_deref()
        .map_or(true, |category| info.category.eq_ignore_ascii_case(category));

    let matches_hype = query
        .min_hype_score
        .map_or(true, |min| product.insights.hype_score >= min);

    matches_query && matches_platform && matches_category && matches_hype
}

fn compare_by(sort_by: SortBy, a: &AnalyzedProduct, b: &AnalyzedProduct) -> Ordering {
    match sort_by {
        SortBy::Hype => b.insights.hype_score.cmp(&a.insights.hype_score),
        SortBy::Growth => b
            .insights
            .growth_rate
            .partial_cmp(&a.insights.growth_rate)
            .unwrap_or(Ordering::Equal),
        SortBy::Name => a
            .product
            .info()
            .name
            .to_lowercase()
            .cmp(&b.product.info().name.to_lowercase()),
        SortBy::Downloads => descending_by(ComparisonMetric::Downloads, a, b),
        SortBy::Traffic => descending_by(ComparisonMetric::Traffic, a, b),
    }
}

fn descending_by(metric: ComparisonMetric, a: &AnalyzedProduct, b: &AnalyzedProduct) -> Ordering {
    metric_value(b, metric)
        .partial_cmp(&metric_value(a, metric))
        .unwrap_or(Ordering::Equal)
}

/// Filter, sort and paginate analysed products.
///
/// Sorting is stable, so ties keep catalog order. A page past the end is
/// empty but still reports the full `total`.
pub fn search(products: &[AnalyzedProduct], query: &SearchQuery) -> SearchResult {
    let needle = query.query.trim().to_lowercase();

    let mut matched: Vec<&AnalyzedProduct> = products
        .iter()
        .filter(|p| matches(p, query, &needle))
        .collect();
    matched.sort_by(|a, b| compare_by(query.sort_by, a, b));

    let page = query.page.max(1);
    let page_size = query.page_size.max(1);
    let total = matched.len();

    let results = matched
        .into_iter()
        .skip((page - 1).saturating_mul(page_size))
        .take(page_size)
        .cloned()
        .collect();

    SearchResult {
        results,
        total,
        page,
        page_size,
    }
}

/// The `n` products with the highest hype score.
pub fn top_by_hype(products: &[AnalyzedProduct], n: usize) -> Vec<AnalyzedProduct> {
    let mut ranked: Vec<&AnalyzedProduct> = products.iter().collect();
    ranked.sort_by(|a, b| compare_by(SortBy::Hype, a, b));
    ranked.into_iter().take(n).cloned().collect()
}

/// Up to `n` products growing faster than [`TOP_GROWER_THRESHOLD`], fastest first.
pub fn top_growers(products: &[AnalyzedProduct], n: usize) -> Vec<AnalyzedProduct> {
    let mut growers: Vec<&AnalyzedProduct> = products
        .iter()
        .filter(|p| p.insights.growth_rate > TOP_GROWER_THRESHOLD)
        .collect();
    growers.sort_by(|a, b| compare_by(SortBy::Growth, a, b));
    growers.into_iter().take(n).cloned().collect()
}

/// Metrics available side by side in a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComparisonMetric {
    HypeScore,
    GrowthRate,
    Downloads,
    Traffic,
    Revenue,
}

impl ComparisonMetric {
    pub const ALL: [ComparisonMetric; 5] = [
        ComparisonMetric::HypeScore,
        ComparisonMetric::GrowthRate,
        ComparisonMetric::Downloads,
        ComparisonMetric::Traffic,
        ComparisonMetric::Revenue,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ComparisonMetric::HypeScore => "Hype Score",
            ComparisonMetric::GrowthRate => "Growth",
            ComparisonMetric::Downloads => "Downloads",
            ComparisonMetric::Traffic => "Traffic",
            ComparisonMetric::Revenue => "Revenue",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            ComparisonMetric::HypeScore => "points",
            ComparisonMetric::GrowthRate => "%",
            ComparisonMetric::Downloads => "downloads",
            ComparisonMetric::Traffic => "visits/month",
            ComparisonMetric::Revenue => "USD/month",
        }
    }
}

/// Value of `metric` for a product; 0 when its platform has no such metric.
pub fn metric_value(product: &AnalyzedProduct, metric: ComparisonMetric) -> f64 {
    let insights = &product.insights;
    match (metric, &insights.estimates) {
        (ComparisonMetric::HypeScore, _) => f64::from(insights.hype_score),
        (ComparisonMetric::GrowthRate, _) => insights.growth_rate,
        (ComparisonMetric::Downloads, Estimates::Mobile { estimated_downloads, .. }) => {
            *estimated_downloads as f64
        }
        (ComparisonMetric::Revenue, Estimates::Mobile { estimated_revenue, .. }) => {
            *estimated_revenue as f64
        }
        (ComparisonMetric::Traffic, Estimates::Web { estimated_traffic }) => *estimated_traffic as f64,
        _ => 0.0,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonValue {
    pub app_id: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub metric: ComparisonMetric,
    pub name: String,
    pub unit: String,
    pub values: Vec<ComparisonValue>,
}

/// Side-by-side metrics for up to [`MAX_COMPARED_PRODUCTS`] products.
pub fn compare(products: &[&AnalyzedProduct]) -> Result<Vec<ComparisonRow>, InsightsError> {
    if products.len() > MAX_COMPARED_PRODUCTS {
        return Err(InsightsError::invalid_data(format!(
            "cannot compare {} products, the limit is {}",
            products.len(),
            MAX_COMPARED_PRODUCTS
        )));
    }

    Ok(ComparisonMetric::ALL
        .iter()
        .map(|&metric| ComparisonRow {
            metric,
            name: metric.name().to_string(),
            unit: metric.unit().to_string(),
            values: products
                .iter()
                .map(|p| ComparisonValue {
                    app_id: p.insights.product_id.clone(),
                    value: metric_value(p, metric),
                })
                .collect(),
        })
        .collect())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInsight {
    pub category: String,
    pub growth_rate: f64,
    pub app_count: usize,
    pub avg_hype_score: u8,
    pub trending: bool,
}

/// Aggregate analysed products by category, fastest-growing first.
///
/// A category is trending when its mean growth exceeds `trending_threshold`.
pub fn category_insights(products: &[AnalyzedProduct], trending_threshold: f64) -> Vec<CategoryInsight> {
    let mut groups: BTreeMap<&str, Vec<&AnalyzedProduct>> = BTreeMap::new();
    for product in products {
        groups
            .entry(product.product.info().category.as_str())
            .or_default()
            .push(product);
    }

    let mut insights: Vec<CategoryInsight> = groups
        .into_iter()
        .map(|(category, members)| {
            let growth: Vec<f64> = members.iter().map(|p| p.insights.growth_rate).collect();
            let hype: Vec<f64> = members
                .iter()
                .map(|p| f64::from(p.insights.hype_score))
                .collect();

            let growth_rate = round_to(mean(&growth).unwrap_or(0.0), 1);
            CategoryInsight {
                category: category.to_string(),
                growth_rate,
                app_count: members.len(),
                avg_hype_score: round_half_up(mean(&hype).unwrap_or(0.0)) as u8,
                trending: growth_rate > trending_threshold,
            }
        })
        .collect();

    insights.sort_by(|a, b| b.growth_rate.partial_cmp(&a.growth_rate).unwrap_or(Ordering::Equal));
    insights
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnologyInsight {
    pub name: String,
    pub category: String,
    /// Web products using the technology.
    pub product_count: usize,
    /// Mean detection confidence, two decimals.
    pub avg_confidence: f64,
}

/// Technologies across analysed web products, most widely used first.
///
/// Ties are broken by name. The category is the one first seen for a name.
pub fn technology_insights(products: &[AnalyzedProduct]) -> Vec<TechnologyInsight> {
    let mut groups: BTreeMap<&str, (&str, Vec<f64>)> = BTreeMap::new();
    for product in products {
        if let Product::Web(app) = &product.product {
            for tech in &app.technologies {
                groups
                    .entry(tech.name.as_str())
                    .or_insert_with(|| (tech.category.as_str(), Vec::new()))
                    .1
                    .push(tech.confidence);
            }
        }
    }

    let mut insights: Vec<TechnologyInsight> = groups
        .into_iter()
        .map(|(name, (category, confidences))| TechnologyInsight {
            name: name.to_string(),
            category: category.to_string(),
            product_count: confidences.len(),
            avg_confidence: round_to(mean(&confidences).unwrap_or(0.0), 2),
        })
        .collect();

    // BTreeMap order is by name, and the sort is stable
    insights.sort_by(|a, b| b.product_count.cmp(&a.product_count));
    insights
}
