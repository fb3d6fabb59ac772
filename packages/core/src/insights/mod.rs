//! Hype Insights Module
//!
//! Pure estimation and forecasting functions over indirect popularity
//! signals: absolute-metric estimators, composite scores, spike detection,
//! regression forecasts and adoption-stage classification.

pub mod adoption;
pub mod config;
pub mod detector;
pub mod engine;
pub mod error;
pub mod estimator;
pub mod forecaster;
pub mod provider;
pub mod scorer;
pub mod stats;
pub mod types;


pub use config::InsightsConfig;
pub use engine::{AnalyzedProduct, HypeInsightsEngine, ProductInsights};
pub use error::{InsightsError, ProviderError};
pub use provider::ProductSource;
pub use types::*;
