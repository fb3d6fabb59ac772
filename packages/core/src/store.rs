//! In-memory product catalog.
//!
//! `ProductCatalog` keeps products in insertion order and indexes them by
//! id. Ids are unique: inserting a second product with an existing id is
//! rejected rather than silently replacing the first one.

use std::collections::HashMap;

use crate::insights::InsightsError;
use crate::products::{Platform, Product};

/// Insertion-ordered store of products keyed by id.
#[derive(Debug, Default)]
pub struct ProductCatalog {
    products: Vec<Product>,
    index: HashMap<String, usize>,
}

impl ProductCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog, failing on the first duplicate id.
    pub fn from_products(products: impl IntoIterator<Item = Product>) -> Result<Self, InsightsError> {
        let mut catalog = Self::new();
        for product in products {
            catalog.insert(product)?;
        }
        Ok(catalog)
    }

    /// Add a product. Returns an error if the id is already present.
    pub fn insert(&mut self, product: Product) -> Result<(), InsightsError> {
        let id = product.id().to_string();
        if self.index.contains_key(&id) {
            return Err(InsightsError::duplicate_product(id));
        }
        self.index.insert(id, self.products.len());
        self.products.push(product);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.index.get(id).map(|&i| &self.products[i])
    }

    /// All products, in insertion order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn by_platform(&self, platform: Platform) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.platform() == platform)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn clear(&mut self) {
        self.products.clear();
        self.index.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::synthetic::demo_catalog;
    use chrono::NaiveDate;
    use rand::{rngs::StdRng, SeedableRng};

    fn demo_products() -> Vec<Product> {
        let today = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        demo_catalog(today, &mut StdRng::seed_from_u64(7)).unwrap()
    }

    #[test]
    fn new_catalog_is_empty() {
        let catalog = ProductCatalog::new();
        assert!(catalog.is_empty());
        assert_eq!(catalog.len(), 0);
    }

    #[test]
    fn insert_and_get_by_id() {
        let catalog = ProductCatalog::from_products(demo_products()).unwrap();
        assert_eq!(catalog.len(), 8);
        assert_eq!(catalog.get("app-2").unwrap().info().name, "BudgetBuddy");
        assert!(catalog.get("missing").is_none());
    }

    #[test]
    fn insertion_order_is_preserved() {
        let catalog = ProductCatalog::from_products(demo_products()).unwrap();
        let ids: Vec<&str> = catalog.products().iter().map(|p| p.id()).collect();
        assert_eq!(ids[0], "app-1");
        assert_eq!(ids[7], "web-4");
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let mut products = demo_products();
        let duplicate = products[0].clone();
        products.push(duplicate);
        let err = ProductCatalog::from_products(products).unwrap_err();
        assert!(matches!(err, InsightsError::DuplicateProduct { ref id } if id == "app-1"));
    }

    #[test]
    fn by_platform_filters() {
        let catalog = ProductCatalog::from_products(demo_products()).unwrap();
        assert_eq!(catalog.by_platform(Platform::Mobile).len(), 4);
        assert_eq!(catalog.by_platform(Platform::Web).len(), 4);
    }

    #[test]
    fn clear_empties_the_catalog() {
        let mut catalog = ProductCatalog::from_products(demo_products()).unwrap();
        catalog.clear();
        assert!(catalog.is_empty());
        assert!(catalog.get("app-1").is_none());
    }
}
