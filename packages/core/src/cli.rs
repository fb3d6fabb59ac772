use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;

use crate::products::Platform;
use crate::search::{SearchQuery, SortBy};

/// Hype Tracker CLI arguments
#[derive(Debug, Parser)]
#[command(
    name = "hype-tracker",
    version,
    about = "Estimate and forecast hype for mobile apps and web products"
)]
pub struct Cli {
    /// JSON file with an array of products (synthetic data when omitted)
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Seed for synthetic product histories
    #[arg(long)]
    pub seed: Option<u64>,

    /// Reference date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub as_of: Option<NaiveDate>,

    /// Free-text filter on name, description and category
    #[arg(long, default_value = "")]
    pub query: String,

    /// Restrict results to one platform
    #[arg(long, value_enum)]
    pub platform: Option<Platform>,

    /// Restrict results to one category
    #[arg(long)]
    pub category: Option<String>,

    /// Minimum hype score (0-100)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub min_hype: Option<u8>,

    /// Result ordering
    #[arg(long, value_enum, default_value_t = SortBy::Hype)]
    pub sort: SortBy,

    /// Result page (1-based)
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Results per page
    #[arg(long, default_value_t = 20)]
    pub page_size: usize,

    /// Spike threshold ratio (recent / baseline mean)
    #[arg(long)]
    pub spike_threshold: Option<f64>,

    /// Print Prometheus metrics to stderr after the report
    #[arg(long)]
    pub metrics: bool,
}

impl Cli {
    pub fn search_query(&self) -> SearchQuery {
        SearchQuery {
            query: self.query.clone(),
            platform: self.platform,
            category: self.category.clone(),
            min_hype_score: self.min_hype,
            sort_by: self.sort,
            page: self.page,
            page_size: self.page_size,
        }
    }
}
