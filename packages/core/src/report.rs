//! Catalog report assembled for the presentation layer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::insights::AnalyzedProduct;
use crate::search::{
    category_insights, search, technology_insights, top_by_hype, top_growers, CategoryInsight,
    SearchQuery, SearchResult, TechnologyInsight,
};

/// Products in the trending listing.
pub const HOME_LISTING_SIZE: usize = 6;

/// Products in the top-growers listing.
pub const TOP_GROWERS_LISTING_SIZE: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogReport {
    pub as_of: NaiveDate,
    pub source: String,
    pub analyzed: usize,
    pub search: SearchResult,
    pub trending: Vec<AnalyzedProduct>,
    pub top_growers: Vec<AnalyzedProduct>,
    pub categories: Vec<CategoryInsight>,
    pub technologies: Vec<TechnologyInsight>,
}

pub fn build_report(
    products: &[AnalyzedProduct],
    query: &SearchQuery,
    trending_threshold: f64,
    as_of: NaiveDate,
    source: &str,
) -> CatalogReport {
    CatalogReport {
        as_of,
        source: source.to_string(),
        analyzed: products.len(),
        search: search(products, query),
        trending: top_by_hype(products, HOME_LISTING_SIZE),
        top_growers: top_growers(products, TOP_GROWERS_LISTING_SIZE),
        categories: category_insights(products, trending_threshold),
        technologies: technology_insights(products),
    }
}
