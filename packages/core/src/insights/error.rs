//! Error types for hype insights operations

use thiserror::Error;

/// Errors that can occur during insights processing
#[derive(Error, Debug)]
pub enum InsightsError {
    #[error("Invalid input data: {message}")]
    InvalidData { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Data provider error: {source}")]
    ProviderError {
        #[from]
        source: ProviderError,
    },

    #[error("Duplicate product id: {id}")]
    DuplicateProduct { id: String },
}

/// Errors from product data providers
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("I/O error reading {path}: {message}")]
    IoError { path: String, message: String },

    #[error("Data format error: {message}")]
    FormatError { message: String },
}

impl InsightsError {
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData { message: message.into() }
    }

    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError { message: message.into() }
    }

    pub fn duplicate_product(id: impl Into<String>) -> Self {
        Self::DuplicateProduct { id: id.into() }
    }
}

impl ProviderError {
    pub fn io_error(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::IoError {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn format_error(message: impl Into<String>) -> Self {
        Self::FormatError { message: message.into() }
    }
}
