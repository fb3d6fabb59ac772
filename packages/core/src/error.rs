use std::fmt;
use std::error::Error;

use crate::insights::{InsightsError, ProviderError};

/// Unified application error.
///
/// This ensures all layers (config, data loading, analysis, output)
/// fail in a predictable and debuggable way.
#[derive(Debug)]
pub enum AppError {
    Config(String),
    Source(String),
    Analysis(String),
    Output(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(msg) => write!(f, "Config error: {}", msg),
            AppError::Source(msg) => write!(f, "Source error: {}", msg),
            AppError::Analysis(msg) => write!(f, "Analysis error: {}", msg),
            AppError::Output(msg) => write!(f, "Output error: {}", msg),
        }
    }
}

impl Error for AppError {}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        AppError::Source(err.to_string())
    }
}

impl From<InsightsError> for AppError {
    fn from(err: InsightsError) -> Self {
        match err {
            InsightsError::ConfigError { message } => AppError::Config(message),
            other => AppError::Analysis(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_layer() {
        assert_eq!(AppError::Config("x".into()).to_string(), "Config error: x");
        assert_eq!(AppError::Output("y".into()).to_string(), "Output error: y");
    }

    #[test]
    fn insights_config_errors_map_to_config() {
        let err: AppError = InsightsError::config_error("bad threshold").into();
        assert!(matches!(err, AppError::Config(ref m) if m == "bad threshold"));

        let err: AppError = InsightsError::invalid_data("bad").into();
        assert!(matches!(err, AppError::Analysis(_)));
    }
}
