//! Prometheus metrics registry for the hype tracker.
//!
//! [`AppMetrics`] owns all registered metrics and the [`Registry`] they
//! belong to. Construct it once at startup, wrap in `Arc`, and attach it to
//! the insights engine with `HypeInsightsEngine::with_metrics`.
//!
//! Rendered in Prometheus text exposition format by `--metrics`.

use prometheus::{Counter, Gauge, Histogram, HistogramOpts, Opts, Registry};

/// All application-level Prometheus metrics.
pub struct AppMetrics {
    /// Products analysed successfully.
    pub products_analyzed_total: Counter,
    /// Products skipped because their data failed validation.
    pub products_rejected_total: Counter,
    /// Hype spikes detected across all analyses.
    pub spikes_detected_total: Counter,
    /// Number of products in the most recent catalog run.
    pub catalog_size: Gauge,
    /// Per-product analysis latency in seconds.
    pub analysis_duration: Histogram,
    /// The registry that owns all of the above metrics.
    pub registry: Registry,
}

impl AppMetrics {
    /// Create and register all metrics. Returns an error if any metric
    /// name is invalid or duplicated.
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let products_analyzed_total = Counter::with_opts(Opts::new(
            "hype_tracker_products_analyzed_total",
            "Products analysed successfully",
        ))?;

        let products_rejected_total = Counter::with_opts(Opts::new(
            "hype_tracker_products_rejected_total",
            "Products rejected by input validation",
        ))?;

        let spikes_detected_total = Counter::with_opts(Opts::new(
            "hype_tracker_spikes_detected_total",
            "Total hype spikes detected",
        ))?;

        let catalog_size = Gauge::with_opts(Opts::new(
            "hype_tracker_catalog_size",
            "Products in the most recent catalog run",
        ))?;

        let analysis_duration = Histogram::with_opts(
            HistogramOpts::new(
                "hype_tracker_analysis_duration_seconds",
                "Per-product analysis latency in seconds",
            )
            .buckets(vec![0.00001, 0.00005, 0.0001, 0.0005, 0.001, 0.005, 0.01]),
        )?;

        registry.register(Box::new(products_analyzed_total.clone()))?;
        registry.register(Box::new(products_rejected_total.clone()))?;
        registry.register(Box::new(spikes_detected_total.clone()))?;
        registry.register(Box::new(catalog_size.clone()))?;
        registry.register(Box::new(analysis_duration.clone()))?;

        Ok(Self {
            products_analyzed_total,
            products_rejected_total,
            spikes_detected_total,
            catalog_size,
            analysis_duration,
            registry,
        })
    }

    /// Render all metrics as Prometheus text format.
    pub fn render(&self) -> Result<String, prometheus::Error> {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buf = Vec::new();
        encoder.encode(&metric_families, &mut buf)?;
        Ok(String::from_utf8(buf).unwrap_or_default())
    }
}
