//! Hype Insights Engine - threads the estimators, scorers and trend
//! analyzers together for a single product or a whole catalog

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::insights::{
    adoption::identify_adoption_stage,
    config::InsightsConfig,
    detector::SpikeDetector,
    error::InsightsError,
    estimator::{estimate_downloads, estimate_revenue, estimate_web_traffic},
    forecaster::forecast_trend,
    scorer::{
        calculate_growth_rate, calculate_sentiment_score, calculate_volatility, hype_breakdown,
        HypeBreakdown, HypeSignals,
    },
    types::*,
};
use crate::metrics::AppMetrics;
use crate::products::{MobileApp, Product};

/// Absolute estimates for a product, by platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "platform", rename_all = "lowercase")]
pub enum Estimates {
    #[serde(rename_all = "camelCase")]
    Mobile {
        estimated_downloads: u64,
        estimated_revenue: u64,
    },
    #[serde(rename_all = "camelCase")]
    Web { estimated_traffic: u64 },
}

/// Everything the presentation layer needs about one product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInsights {
    pub product_id: String,
    pub hype_score: u8,
    pub hype_breakdown: HypeBreakdown,
    /// 30-day growth in percent.
    pub growth_rate: f64,
    pub growth_rate_7d: f64,
    pub trend_direction: TrendDirection,
    pub volatility: f64,
    pub spike: Option<HypeSpike>,
    pub forecasts: Vec<ForecastData>,
    pub trend_analysis: TrendAnalysis,
    pub adoption_stage: AdoptionStage,
    pub sentiment_score: Option<f64>,
    pub estimates: Estimates,
}

/// A product paired with its computed insights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedProduct {
    pub product: Product,
    pub insights: ProductInsights,
}

/// Value `days` steps before the last point, or the first point when the
/// history is shorter than that.
fn value_days_ago(history: &[MetricPoint], days: usize) -> Option<f64> {
    let last = history.len().checked_sub(1)?;
    Some(history[last.saturating_sub(days)].value)
}

/// Growth of the last point over the point `days` steps earlier.
fn growth_over(history: &[MetricPoint], days: usize) -> f64 {
    match (history.last(), value_days_ago(history, days)) {
        (Some(last), Some(previous)) if history.len() >= 2 => {
            calculate_growth_rate(last.value, previous)
        }
        _ => 0.0,
    }
}

/// Central insights engine that orchestrates all analysis operations
pub struct HypeInsightsEngine {
    config: InsightsConfig,
    detector: SpikeDetector,
    metrics: Option<Arc<AppMetrics>>,
    last_run: Option<DateTime<Utc>>,
}

impl HypeInsightsEngine {
    /// Create a new engine, rejecting invalid configuration
    pub fn new(config: InsightsConfig) -> Result<Self, InsightsError> {
        config.validate()?;
        let detector = SpikeDetector::new(config.spike_detection.clone());

        Ok(Self {
            config,
            detector,
            metrics: None,
            last_run: None,
        })
    }

    /// Record analysis counters and latency into `metrics`
    pub fn with_metrics(mut self, metrics: Arc<AppMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Validate product data for basic correctness
    pub fn validate_product(&self, product: &Product) -> Result<(), InsightsError> {
        let info = product.info();
        if info.id.trim().is_empty() {
            return Err(InsightsError::invalid_data("product id is empty"));
        }

        validate_history(product.primary_history()).map_err(|err| {
            InsightsError::invalid_data(format!("{} {}: {}", info.id, product.primary_metric(), err))
        })?;

        if let Product::Mobile(app) = product {
            if !app.review_velocity.is_finite() || app.review_velocity < 0.0 {
                return Err(InsightsError::invalid_data(format!(
                    "{}: review velocity {} must be a non-negative number",
                    info.id, app.review_velocity
                )));
            }
        }

        Ok(())
    }

    /// Analyse a single product as of `as_of` (used for app age)
    pub fn analyze(&self, product: &Product, as_of: NaiveDate) -> Result<ProductInsights, InsightsError> {
        let start_time = Instant::now();
        self.validate_product(product)?;

        let history = product.primary_history();
        let current = history.last().map(|p| p.value).unwrap_or(0.0);

        let growth_rate_30d = growth_over(history, 30);
        let growth_rate_7d = growth_over(history, 7);
        let change_90d = growth_over(history, 90);
        let volatility = calculate_volatility(history);

        let review_velocity = match product {
            Product::Mobile(app) => app.review_velocity,
            Product::Web(_) => 0.0,
        };
        let breakdown = hype_breakdown(&HypeSignals {
            growth_rate_30d,
            growth_rate_7d,
            review_velocity,
            social_mentions: product.social_mentions(),
            volatility,
        });

        let spike = self.detector.detect(history);

        let forecast_config = &self.config.forecast;
        let short = forecast_trend(history, forecast_config.short_horizon_days);
        let long = forecast_trend(history, forecast_config.long_horizon_days);
        let forecasts = vec![
            self.forecast_data(product, forecast_config.short_horizon_days, current, &short),
            self.forecast_data(product, forecast_config.long_horizon_days, current, &long),
        ];

        let trend_analysis = TrendAnalysis {
            current,
            change_30d: growth_rate_30d,
            change_90d,
            prediction_30d: short.forecast,
            prediction_90d: long.forecast,
            volatility,
            confidence: short.confidence,
        };

        let (sentiment_score, estimates) = match product {
            Product::Mobile(app) => (
                Some(calculate_sentiment_score(
                    app.rating,
                    app.review_count,
                    app.rating_distribution.as_ref(),
                )),
                self.mobile_estimates(app, current, as_of),
            ),
            Product::Web(app) => (
                None,
                Estimates::Web {
                    estimated_traffic: estimate_web_traffic(&app.traffic_signals()),
                },
            ),
        };

        let insights = ProductInsights {
            product_id: product.id().to_string(),
            hype_score: breakdown.total,
            hype_breakdown: breakdown,
            growth_rate: growth_rate_30d,
            growth_rate_7d,
            trend_direction: short.trend,
            volatility,
            spike,
            forecasts,
            trend_analysis,
            adoption_stage: identify_adoption_stage(history, growth_rate_30d),
            sentiment_score,
            estimates,
        };

        if let Some(metrics) = &self.metrics {
            metrics.products_analyzed_total.inc();
            if insights.spike.is_some() {
                metrics.spikes_detected_total.inc();
            }
            metrics
                .analysis_duration
                .observe(start_time.elapsed().as_secs_f64());
        }

        tracing::debug!(
            "Analysed {}: hype {}, stage {:?}, trend {:?}",
            insights.product_id,
            insights.hype_score,
            insights.adoption_stage,
            insights.trend_direction,
        );

        Ok(insights)
    }

    /// Analyse every product, skipping (and logging) the ones that fail
    /// validation
    pub fn analyze_catalog(&mut self, products: &[Product], as_of: NaiveDate) -> Vec<AnalyzedProduct> {
        let mut analyzed = Vec::with_capacity(products.len());

        for product in products {
            match self.analyze(product, as_of) {
                Ok(insights) => analyzed.push(AnalyzedProduct {
                    product: product.clone(),
                    insights,
                }),
                Err(err) => {
                    tracing::warn!("Skipping product {}: {}", product.id(), err);
                    if let Some(metrics) = &self.metrics {
                        metrics.products_rejected_total.inc();
                    }
                }
            }
        }

        if let Some(metrics) = &self.metrics {
            metrics.catalog_size.set(products.len() as f64);
        }

        self.last_run = Some(Utc::now());
        tracing::info!(
            "Catalog analysed: {} of {} products, {} spikes",
            analyzed.len(),
            products.len(),
            analyzed.iter().filter(|a| a.insights.spike.is_some()).count(),
        );

        analyzed
    }

    fn mobile_estimates(&self, app: &MobileApp, current: f64, as_of: NaiveDate) -> Estimates {
        let estimated_downloads = match app.category_rank {
            Some(rank) => {
                let days_since_launch = (as_of - app.info.first_seen).num_days().max(0) as u64;
                estimate_downloads(rank, app.review_count, app.rating, days_since_launch)
            }
            // no rank signal, fall back to the latest observed sample
            None => current.round() as u64,
        };

        Estimates::Mobile {
            estimated_downloads,
            estimated_revenue: estimate_revenue(
                estimated_downloads,
                &app.info.category,
                app.rating,
                app.has_in_app_purchases,
            ),
        }
    }

    fn forecast_data(
        &self,
        product: &Product,
        horizon_days: u32,
        current: f64,
        result: &ForecastResult,
    ) -> ForecastData {
        ForecastData {
            metric: product.primary_metric().to_string(),
            horizon_days,
            current,
            forecast: result.forecast,
            confidence: result.confidence,
            trend: result.trend,
        }
    }

    /// Get engine configuration
    pub fn get_config(&self) -> &InsightsConfig {
        &self.config
    }

    /// Time of the last completed catalog run
    pub fn get_last_run(&self) -> Option<DateTime<Utc>> {
        self.last_run
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::products::{ProductInfo, WebApp};
    use chrono::Duration;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
    }

    fn history(values: &[f64]) -> Vec<MetricPoint> {
        let start = as_of() - Duration::days(values.len() as i64 - 1);
        values
            .iter()
            .enumerate()
            .map(|(i, v)| MetricPoint::new(start + Duration::days(i as i64), *v))
            .collect()
    }

    fn info(id: &str) -> ProductInfo {
        ProductInfo {
            id: id.to_string(),
            name: id.to_uppercase(),
            category: "Finance".to_string(),
            description: String::new(),
            first_seen: as_of() - Duration::days(100),
        }
    }

    fn mobile(id: &str, values: &[f64]) -> Product {
        Product::Mobile(MobileApp {
            info: info(id),
            mobile_platform: Default::default(),
            developer: String::new(),
            category_rank: std::num::NonZeroU32::new(100),
            rating: Rating::new(5.0).unwrap(),
            review_count: 40,
            rating_distribution: None,
            has_in_app_purchases: true,
            review_velocity: 2.0,
            social_mentions: 99,
            download_history: history(values),
        })
    }

    fn web(id: &str, values: &[f64]) -> Product {
        Product::Web(WebApp {
            info: info(id),
            domain: format!("{}.dev", id),
            backlinks: 0,
            referring_domains: 0,
            top_keywords: vec![],
            technologies: vec![],
            github_stars: None,
            product_hunt_votes: None,
            social_mentions: 0,
            traffic_history: history(values),
        })
    }

    fn engine() -> HypeInsightsEngine {
        HypeInsightsEngine::new(InsightsConfig::default()).unwrap()
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = InsightsConfig::default();
        config.spike_detection.threshold_multiplier = -1.0;
        assert!(HypeInsightsEngine::new(config).is_err());
    }

    #[test]
    fn growth_over_uses_first_point_for_short_histories() {
        let h = history(&[100.0, 150.0]);
        assert_eq!(growth_over(&h, 30), 50.0);
        assert_eq!(growth_over(&h[..1], 30), 0.0);
        assert_eq!(growth_over(&[], 7), 0.0);
    }

    #[test]
    fn mobile_analysis_threads_all_components() {
        let mut values = vec![100.0; 23];
        values.extend([300.0; 7]);
        let insights = engine().analyze(&mobile("app-x", &values), as_of()).unwrap();

        assert_eq!(insights.product_id, "app-x");
        let spike = insights.spike.expect("spike expected");
        assert_eq!(spike.reason, SpikeReason::StrongMomentum);
        assert_eq!(insights.forecasts.len(), 2);
        assert_eq!(insights.forecasts[0].horizon_days, 30);
        assert_eq!(insights.forecasts[1].horizon_days, 90);
        assert_eq!(insights.forecasts[0].metric, "downloads");
        assert_eq!(insights.trend_direction, TrendDirection::Up);
        assert_eq!(insights.sentiment_score, Some(1.0));
        // 30-day growth compares against the first of 30 points
        assert_eq!(insights.growth_rate, 200.0);
        assert_eq!(insights.growth_rate_7d, 200.0);

        // rank 100 -> 10_000, 40 reviews -> 10_000, 100 days -> 1_000, rating 5 -> x1
        assert_eq!(
            insights.estimates,
            Estimates::Mobile {
                estimated_downloads: 21_000,
                estimated_revenue: estimate_revenue(21_000, "Finance", Rating::new(5.0).unwrap(), true),
            }
        );
    }

    #[test]
    fn mobile_without_rank_falls_back_to_latest_sample() {
        let mut product = mobile("app-y", &[10.0, 20.0, 1234.0]);
        if let Product::Mobile(app) = &mut product {
            app.category_rank = None;
        }
        let insights = engine().analyze(&product, as_of()).unwrap();
        let Estimates::Mobile { estimated_downloads, .. } = insights.estimates else {
            panic!("expected mobile estimates");
        };
        assert_eq!(estimated_downloads, 1234);
    }

    #[test]
    fn web_analysis_has_traffic_and_no_sentiment() {
        let insights = engine().analyze(&web("web-x", &[50.0; 10]), as_of()).unwrap();
        assert_eq!(insights.sentiment_score, None);
        assert_eq!(insights.estimates, Estimates::Web { estimated_traffic: 1000 });
        assert_eq!(insights.volatility, 0.0);
        assert_eq!(insights.trend_direction, TrendDirection::Stable);
        assert_eq!(insights.trend_analysis.confidence, 1.0);
        assert!(insights.spike.is_none());
    }

    #[test]
    fn short_history_gets_neutral_forecast_and_early_stage() {
        let insights = engine().analyze(&web("web-y", &[1.0, 2.0, 3.0]), as_of()).unwrap();
        assert_eq!(insights.forecasts[0].forecast, 0);
        assert_eq!(insights.forecasts[0].confidence, 0.0);
        assert_eq!(insights.adoption_stage, AdoptionStage::Early);
    }

    #[test]
    fn invalid_history_is_rejected() {
        let mut product = web("web-z", &[1.0, 2.0, 3.0]);
        if let Product::Web(app) = &mut product {
            app.traffic_history[1].value = -5.0;
        }
        let err = engine().analyze(&product, as_of()).unwrap_err();
        assert!(matches!(err, InsightsError::InvalidData { .. }));
    }

    #[test]
    fn catalog_skips_invalid_products_and_records_metrics() {
        let metrics = Arc::new(AppMetrics::new().unwrap());
        let mut engine = engine().with_metrics(metrics.clone());

        let mut broken = web("web-broken", &[1.0, 2.0]);
        if let Product::Web(app) = &mut broken {
            app.traffic_history[1].date = app.traffic_history[0].date;
        }
        let products = vec![mobile("app-1", &[10.0; 10]), broken, web("web-1", &[5.0; 10])];

        assert!(engine.get_last_run().is_none());
        let analyzed = engine.analyze_catalog(&products, as_of());

        assert_eq!(analyzed.len(), 2);
        assert_eq!(analyzed[0].insights.product_id, "app-1");
        assert_eq!(analyzed[1].insights.product_id, "web-1");
        assert!(engine.get_last_run().is_some());
        assert!((metrics.products_analyzed_total.get() - 2.0).abs() < f64::EPSILON);
        assert!((metrics.products_rejected_total.get() - 1.0).abs() < f64::EPSILON);
        assert!((metrics.catalog_size.get() - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn insights_serialize_with_presentation_field_names() {
        let insights = engine().analyze(&mobile("app-s", &[10.0; 10]), as_of()).unwrap();
        let value = serde_json::to_value(&insights).unwrap();
        assert!(value.get("hypeScore").is_some());
        assert!(value.get("adoptionStage").is_some());
        assert_eq!(value["estimates"]["platform"], "mobile");
        assert!(value["estimates"].get("estimatedDownloads").is_some());
    }
}
