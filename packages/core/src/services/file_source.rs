use std::fs;
use std::path::{Path, PathBuf};

use crate::insights::error::ProviderError;
use crate::insights::provider::{ProductSource, ProviderResult};
use crate::products::Product;

/// Reads a JSON array of products from disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
    name: String,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = format!("file:{}", path.display());
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Parse a JSON array of products.
pub fn parse_products(json: &str) -> ProviderResult<Vec<Product>> {
    serde_json::from_str(json).map_err(|err| ProviderError::format_error(err.to_string()))
}

impl ProductSource for JsonFileSource {
    fn load_products(&self) -> ProviderResult<Vec<Product>> {
        let raw = fs::read_to_string(&self.path)
            .map_err(|err| ProviderError::io_error(self.path.display().to_string(), err.to_string()))?;

        let products = parse_products(&raw)?;
        tracing::debug!("Loaded {} products from {}", products.len(), self.path.display());
        Ok(products)
    }

    fn source_name(&self) -> &str {
        &self.name
    }
}
