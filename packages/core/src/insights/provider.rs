//! Product Data Source Interface
//!
//! Provides abstraction layer for the places product signals come from

use crate::insights::error::ProviderError;
use crate::products::Product;

/// Trait for product sources so the engine stays independent of where
/// signals and histories are produced (scraped files, synthetic fixtures...)
pub trait ProductSource {
    /// Load every product the source knows about
    fn load_products(&self) -> Result<Vec<Product>, ProviderError>;

    /// Get the name of this source for logging/debugging
    fn source_name(&self) -> &str;
}

/// Result type for source operations
pub type ProviderResult<T> = Result<T, ProviderError>;
