use std::sync::Arc;

use chrono::Utc;
use clap::Parser;
use dotenvy::dotenv;

use hype_tracker::cli::Cli;
use hype_tracker::config::Config;
use hype_tracker::error::AppError;
use hype_tracker::insights::{HypeInsightsEngine, ProductSource};
use hype_tracker::logging::init_logging;
use hype_tracker::metrics::AppMetrics;
use hype_tracker::report::build_report;
use hype_tracker::services::{file_source::JsonFileSource, synthetic::SyntheticSource};
use hype_tracker::store::ProductCatalog;

fn main() {
    dotenv().ok();
    init_logging();

    if let Err(err) = run(Cli::parse()) {
        tracing::error!("{}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let mut config = Config::from_env().map_err(AppError::Config)?;
    config.apply_cli(&cli).map_err(AppError::Config)?;
    tracing::info!("Hype tracker started with config: {:?}", config);

    let as_of = config.as_of.unwrap_or_else(|| Utc::now().date_naive());

    let source: Box<dyn ProductSource> = match &config.input_path {
        Some(path) => Box::new(JsonFileSource::new(path)),
        None => Box::new(SyntheticSource::new(config.synthetic_seed, as_of)),
    };
    let catalog = ProductCatalog::from_products(source.load_products()?)?;
    tracing::info!("Loaded {} products from {}", catalog.len(), source.source_name());

    let metrics = Arc::new(
        AppMetrics::new().map_err(|err| AppError::Config(format!("metrics registry: {}", err)))?,
    );
    let mut engine = HypeInsightsEngine::new(config.insights.clone())?.with_metrics(metrics.clone());
    let analyzed = engine.analyze_catalog(catalog.products(), as_of);

    let report = build_report(
        &analyzed,
        &cli.search_query(),
        config.insights.trending_growth_threshold,
        as_of,
        source.source_name(),
    );
    let json = serde_json::to_string_pretty(&report).map_err(|err| AppError::Output(err.to_string()))?;
    println!("{}", json);

    if cli.metrics {
        let rendered = metrics.render().map_err(|err| AppError::Output(err.to_string()))?;
        eprintln!("{}", rendered);
    }

    Ok(())
}
