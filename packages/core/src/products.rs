//! Product data model consumed by the insights engine.
//!
//! A [`Product`] is either a mobile app or a web product. Both carry the
//! shared [`ProductInfo`] plus the platform-specific signals the estimators
//! need and the daily history that trend analysis runs over.

use std::num::NonZeroU32;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::insights::estimator::WebTrafficSignals;
use crate::insights::types::{MetricPoint, Rating};

/// Fields shared by every product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInfo {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub first_seen: NaiveDate,
}

/// Store a mobile app is published on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MobilePlatform {
    Ios,
    Android,
    #[default]
    Both,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MobileApp {
    #[serde(flatten)]
    pub info: ProductInfo,
    #[serde(default)]
    pub mobile_platform: MobilePlatform,
    #[serde(default)]
    pub developer: String,
    pub category_rank: Option<NonZeroU32>,
    pub rating: Rating,
    pub review_count: u64,
    /// Review counts for 1 to 5 stars.
    #[serde(default)]
    pub rating_distribution: Option<[u64; 5]>,
    #[serde(default = "default_true")]
    pub has_in_app_purchases: bool,
    /// Reviews per day.
    #[serde(default)]
    pub review_velocity: f64,
    #[serde(default)]
    pub social_mentions: u64,
    pub download_history: Vec<MetricPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Keyword {
    pub keyword: String,
    pub volume: u64,
    pub position: u32,
    pub difficulty: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Technology {
    pub name: String,
    pub category: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebApp {
    #[serde(flatten)]
    pub info: ProductInfo,
    pub domain: String,
    pub backlinks: u64,
    pub referring_domains: u64,
    #[serde(default)]
    pub top_keywords: Vec<Keyword>,
    #[serde(default)]
    pub technologies: Vec<Technology>,
    #[serde(default)]
    pub github_stars: Option<u64>,
    #[serde(default)]
    pub product_hunt_votes: Option<u64>,
    #[serde(default)]
    pub social_mentions: u64,
    pub traffic_history: Vec<MetricPoint>,
}

impl WebApp {
    pub fn traffic_signals(&self) -> WebTrafficSignals {
        WebTrafficSignals {
            backlinks: self.backlinks,
            referring_domains: self.referring_domains,
            top_keywords: self.top_keywords.len() as u64,
            github_stars: self.github_stars.unwrap_or(0),
            product_hunt_votes: self.product_hunt_votes.unwrap_or(0),
            technologies: self.technologies.len() as u64,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Platform discriminant, used for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Mobile,
    Web,
}

/// A tracked mobile app or web product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "platform", rename_all = "lowercase")]
pub enum Product {
    Mobile(MobileApp),
    Web(WebApp),
}

impl Product {
    pub fn info(&self) -> &ProductInfo {
        match self {
            Product::Mobile(app) => &app.info,
            Product::Web(app) => &app.info,
        }
    }

    pub fn id(&self) -> &str {
        &self.info().id
    }

    pub fn platform(&self) -> Platform {
        match self {
            Product::Mobile(_) => Platform::Mobile,
            Product::Web(_) => Platform::Web,
        }
    }

    /// The history trend analysis runs over: downloads or traffic.
    pub fn primary_history(&self) -> &[MetricPoint] {
        match self {
            Product::Mobile(app) => &app.download_history,
            Product::Web(app) => &app.traffic_history,
        }
    }

    pub fn primary_metric(&self) -> &'static str {
        match self {
            Product::Mobile(_) => "downloads",
            Product::Web(_) => "traffic",
        }
    }

    pub fn social_mentions(&self) -> u64 {
        match self {
            Product::Mobile(app) => app.social_mentions,
            Product::Web(app) => app.social_mentions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WEB_JSON: &str = r#"{
        "platform": "web",
        "id": "web-1",
        "name": "CodeSnippet",
        "category": "Developer Tools",
        "firstSeen": "2023-07-22",
        "domain": "codesnippet.dev",
        "backlinks": 2180,
        "referringDomains": 423,
        "topKeywords": [
            { "keyword": "code snippet manager", "volume": 4200, "position": 5, "difficulty": 42 }
        ],
        "githubStars": 5420,
        "trafficHistory": [
            { "date": "2024-01-01", "value": 100.0 },
            { "date": "2024-01-02", "value": 120.0 }
        ]
    }"#;

    #[test]
    fn web_product_deserializes_from_tagged_json() {
        let product: Product = serde_json::from_str(WEB_JSON).unwrap();
        assert_eq!(product.platform(), Platform::Web);
        assert_eq!(product.id(), "web-1");
        assert_eq!(product.primary_history().len(), 2);
        assert_eq!(product.primary_metric(), "traffic");

        let Product::Web(web) = product else {
            panic!("expected web product");
        };
        let signals = web.traffic_signals();
        assert_eq!(signals.top_keywords, 1);
        assert_eq!(signals.github_stars, 5420);
        assert_eq!(signals.product_hunt_votes, 0);
    }

    #[test]
    fn mobile_product_defaults_and_validation() {
        let json = r#"{
            "platform": "mobile",
            "id": "app-1",
            "name": "FocusFlow",
            "category": "Productivity",
            "firstSeen": "2023-08-15",
            "categoryRank": 12,
            "rating": 4.7,
            "reviewCount": 8420,
            "downloadHistory": []
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        let Product::Mobile(app) = &product else {
            panic!("expected mobile product");
        };
        assert!(app.has_in_app_purchases);
        assert_eq!(app.mobile_platform, MobilePlatform::Both);
        assert_eq!(app.category_rank, NonZeroU32::new(12));

        let zero_rank = json.replace("\"categoryRank\": 12", "\"categoryRank\": 0");
        assert!(serde_json::from_str::<Product>(&zero_rank).is_err());

        let bad_rating = json.replace("\"rating\": 4.7", "\"rating\": 6.2");
        assert!(serde_json::from_str::<Product>(&bad_rating).is_err());
    }

    #[test]
    fn round_trip_keeps_platform_tag() {
        let product: Product = serde_json::from_str(WEB_JSON).unwrap();
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["platform"], "web");
        assert_eq!(value["referringDomains"], 423);
    }
}
