//! # In-Memory Catalog
//!
//! The reference `Catalog` implementation: a product list behind a
//! `tokio::sync::RwLock`.
//!
//! ## Concurrency Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Stock Update Strategy                                │
//! │                                                                         │
//! │  The catalog is shared across sessions/tills. Every mutation takes     │
//! │  the single write lock, so a conditional decrement is atomic:          │
//! │                                                                         │
//! │  Till A: commit 3 ──► write lock ──► stock 10 >= 3 ──► stock = 7       │
//! │  Till B: commit 9 ──► write lock ──► stock  7 <  9 ──► REFUSED         │
//! │                                                                         │
//! │  Two commits can never both succeed past the stock limit, no matter    │
//! │  what each of them pre-checked before applying.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lookups scan the list linearly. The store holds one shop's catalog
//! (hundreds of products); an indexed/persistent backend belongs behind the
//! same trait, not here.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info};
use ts_rs::TS;
use uuid::Uuid;

use inframex_core::validation::{
    validate_barcode, validate_price_cents, validate_product_name, validate_search_query,
    validate_sku, validate_stock,
};
use inframex_core::{Product, ValidationError};

use crate::catalog::Catalog;
use crate::error::{CatalogError, CatalogResult};

// =============================================================================
// CRUD Input Types
// =============================================================================

/// Input for creating a product. The store assigns id and timestamps.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewProduct {
    pub sku: String,
    pub barcode: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub cost_cents: Option<i64>,
    pub stock: i64,
    pub min_stock: i64,
    pub unit: String,
    pub category: String,
}

/// Partial update for a product. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductPatch {
    pub sku: Option<String>,
    pub barcode: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price_cents: Option<i64>,
    pub cost_cents: Option<i64>,
    pub stock: Option<i64>,
    pub min_stock: Option<i64>,
    pub unit: Option<String>,
    pub category: Option<String>,
    pub is_active: Option<bool>,
}

// =============================================================================
// Memory Catalog
// =============================================================================

/// In-process product store.
///
/// ## Usage
/// ```rust,ignore
/// let catalog = MemoryCatalog::with_products(seed::demo_products());
///
/// let hits = catalog.search(Some("cemento"), None).await?;
/// catalog.decrement_stock(&hits[0].id, 2).await?;
/// ```
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    products: RwLock<Vec<Product>>,
}

impl MemoryCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        MemoryCatalog {
            products: RwLock::new(Vec::new()),
        }
    }

    /// Creates a catalog pre-loaded with products.
    pub fn with_products(products: Vec<Product>) -> Self {
        MemoryCatalog {
            products: RwLock::new(products),
        }
    }

    /// Creates a new product.
    ///
    /// Validates the business fields, rejects duplicate SKUs, and assigns
    /// a fresh UUID plus timestamps.
    pub async fn create(&self, new: NewProduct) -> CatalogResult<Product> {
        validate_sku(&new.sku)?;
        validate_product_name(&new.name)?;
        validate_price_cents(new.price_cents)?;
        validate_stock(new.stock)?;
        validate_stock(new.min_stock)?;
        if let Some(barcode) = &new.barcode {
            validate_barcode(barcode)?;
        }

        let mut products = self.products.write().await;

        if products.iter().any(|p| p.sku == new.sku) {
            return Err(CatalogError::DuplicateSku { sku: new.sku });
        }

        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4().to_string(),
            sku: new.sku,
            barcode: new.barcode,
            name: new.name,
            description: new.description,
            price_cents: new.price_cents,
            cost_cents: new.cost_cents,
            stock: new.stock,
            min_stock: new.min_stock,
            unit: new.unit,
            category: new.category,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        debug!(sku = %product.sku, id = %product.id, "Product created");
        products.push(product.clone());
        Ok(product)
    }

    /// Applies a partial update to a product.
    ///
    /// Finds the product by id regardless of active flag (an update may be
    /// exactly what reactivates it). Fails with `NotFound` for unknown ids.
    pub async fn update(&self, id: &str, patch: ProductPatch) -> CatalogResult<Product> {
        if let Some(sku) = &patch.sku {
            validate_sku(sku)?;
        }
        if let Some(name) = &patch.name {
            validate_product_name(name)?;
        }
        if let Some(price_cents) = patch.price_cents {
            validate_price_cents(price_cents)?;
        }
        if let Some(stock) = patch.stock {
            validate_stock(stock)?;
        }
        if let Some(min_stock) = patch.min_stock {
            validate_stock(min_stock)?;
        }
        if let Some(barcode) = &patch.barcode {
            validate_barcode(barcode)?;
        }

        let mut products = self.products.write().await;

        if let Some(sku) = &patch.sku {
            if products.iter().any(|p| p.sku == *sku && p.id != id) {
                return Err(CatalogError::DuplicateSku { sku: sku.clone() });
            }
        }

        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| CatalogError::not_found("Product", id))?;

        if let Some(sku) = patch.sku {
            product.sku = sku;
        }
        if let Some(barcode) = patch.barcode {
            product.barcode = Some(barcode);
        }
        if let Some(name) = patch.name {
            product.name = name;
        }
        if let Some(description) = patch.description {
            product.description = Some(description);
        }
        if let Some(price_cents) = patch.price_cents {
            product.price_cents = price_cents;
        }
        if let Some(cost_cents) = patch.cost_cents {
            product.cost_cents = Some(cost_cents);
        }
        if let Some(stock) = patch.stock {
            product.stock = stock;
        }
        if let Some(min_stock) = patch.min_stock {
            product.min_stock = min_stock;
        }
        if let Some(unit) = patch.unit {
            product.unit = unit;
        }
        if let Some(category) = patch.category {
            product.category = category;
        }
        if let Some(is_active) = patch.is_active {
            product.is_active = is_active;
        }
        product.updated_at = Utc::now();

        debug!(id = %id, "Product updated");
        Ok(product.clone())
    }

    /// Soft-deletes a product by setting `is_active = false`.
    ///
    /// Historical receipts and open cart lines still reference the product;
    /// it simply disappears from search and new cart additions.
    pub async fn remove(&self, id: &str) -> CatalogResult<()> {
        let mut products = self.products.write().await;

        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| CatalogError::not_found("Product", id))?;

        product.is_active = false;
        product.updated_at = Utc::now();

        info!(id = %id, sku = %product.sku, "Product deactivated");
        Ok(())
    }

    /// Looks up an active product by exact SKU.
    pub async fn find_by_sku(&self, sku: &str) -> Option<Product> {
        let products = self.products.read().await;
        products
            .iter()
            .find(|p| p.sku == sku && p.is_active)
            .cloned()
    }

    /// Active products at or below their low-stock threshold.
    pub async fn low_stock(&self) -> Vec<Product> {
        let products = self.products.read().await;
        products
            .iter()
            .filter(|p| p.is_active && p.is_low_stock())
            .cloned()
            .collect()
    }

    /// Counts active products (for diagnostics).
    pub async fn count(&self) -> usize {
        let products = self.products.read().await;
        products.iter().filter(|p| p.is_active).count()
    }
}

// =============================================================================
// Catalog Trait Implementation
// =============================================================================

impl Catalog for MemoryCatalog {
    async fn search(
        &self,
        query: Option<&str>,
        category: Option<&str>,
    ) -> CatalogResult<Vec<Product>> {
        let query = match query {
            Some(q) => Some(validate_search_query(q)?),
            None => None,
        };
        let needle = query
            .as_deref()
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase);

        let products = self.products.read().await;
        let results: Vec<Product> = products
            .iter()
            .filter(|p| p.is_active)
            .filter(|p| match &needle {
                Some(n) => {
                    p.name.to_lowercase().contains(n)
                        || p.sku.to_lowercase().contains(n)
                        || p.barcode.as_deref().is_some_and(|b| b.contains(n.as_str()))
                }
                None => true,
            })
            .filter(|p| match category {
                Some(c) => p.category == c,
                None => true,
            })
            .cloned()
            .collect();

        debug!(
            query = query.as_deref().unwrap_or(""),
            category = category.unwrap_or(""),
            count = results.len(),
            "Search returned products"
        );
        Ok(results)
    }

    async fn find_one(&self, id: &str) -> CatalogResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products
            .iter()
            .find(|p| p.id == id && p.is_active)
            .cloned())
    }

    async fn find_by_barcode(&self, barcode: &str) -> CatalogResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products
            .iter()
            .find(|p| p.barcode.as_deref() == Some(barcode) && p.is_active)
            .cloned())
    }

    async fn decrement_stock(&self, id: &str, amount: i64) -> CatalogResult<()> {
        if amount <= 0 {
            return Err(ValidationError::MustBePositive {
                field: "amount".to_string(),
            }
            .into());
        }

        let mut products = self.products.write().await;

        let product = products
            .iter_mut()
            .find(|p| p.id == id && p.is_active)
            .ok_or_else(|| CatalogError::not_found("Product", id))?;

        // Check and write under the same lock: the conditional decrement is
        // the final authority on stock, whatever the caller pre-checked.
        if product.stock < amount {
            return Err(CatalogError::InsufficientStock {
                sku: product.sku.clone(),
                available: product.stock,
                requested: amount,
            });
        }

        product.stock -= amount;
        product.updated_at = Utc::now();

        debug!(id = %id, amount = %amount, stock = %product.stock, "Stock decremented");
        Ok(())
    }

    async fn restock(&self, id: &str, amount: i64) -> CatalogResult<()> {
        if amount <= 0 {
            return Err(ValidationError::MustBePositive {
                field: "amount".to_string(),
            }
            .into());
        }

        let mut products = self.products.write().await;

        // No active filter: a restock may target a product that was
        // deactivated moments ago (e.g. commit compensation).
        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| CatalogError::not_found("Product", id))?;

        product.stock += amount;
        product.updated_at = Utc::now();

        debug!(id = %id, amount = %amount, stock = %product.stock, "Stock incremented");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    fn draft(sku: &str, name: &str) -> NewProduct {
        NewProduct {
            sku: sku.to_string(),
            barcode: None,
            name: name.to_string(),
            description: None,
            price_cents: 4550,
            cost_cents: Some(3200),
            stock: 150,
            min_stock: 20,
            unit: "pieza".to_string(),
            category: "Tubería".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_defaults() {
        let catalog = MemoryCatalog::new();

        let product = catalog.create(draft("TUBO-50-PVC", "Tubo PVC 50mm")).await.unwrap();

        assert!(!product.id.is_empty());
        assert!(product.is_active);
        assert_eq!(catalog.count().await, 1);
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_sku() {
        let catalog = MemoryCatalog::new();
        catalog.create(draft("TUBO-50-PVC", "Tubo PVC 50mm")).await.unwrap();

        let err = catalog
            .create(draft("TUBO-50-PVC", "Otro tubo"))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateSku { .. }));
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input() {
        let catalog = MemoryCatalog::new();

        let mut bad_price = draft("A", "A");
        bad_price.price_cents = -1;
        assert!(matches!(
            catalog.create(bad_price).await.unwrap_err(),
            CatalogError::Validation(_)
        ));

        let mut bad_barcode = draft("B", "B");
        bad_barcode.barcode = Some("not-digits".to_string());
        assert!(matches!(
            catalog.create(bad_barcode).await.unwrap_err(),
            CatalogError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn test_search_by_name_sku_and_barcode() {
        let catalog = MemoryCatalog::with_products(seed::demo_products());

        // Name match, case-insensitive
        let hits = catalog.search(Some("TUBO"), None).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].sku, "TUBO-50-PVC");

        // SKU match
        let hits = catalog.search(Some("cemex"), None).await.unwrap();
        assert_eq!(hits.len(), 1);

        // Barcode substring match
        let hits = catalog.search(Some("7501234567894"), None).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].sku, "GRAVA-M3");
    }

    #[tokio::test]
    async fn test_search_by_category() {
        let catalog = MemoryCatalog::with_products(seed::demo_products());

        let hits = catalog
            .search(None, Some("Materiales Básicos"))
            .await
            .unwrap();
        assert_eq!(hits.len(), 2);

        let hits = catalog.search(Some("arena"), Some("Acero")).await.unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn test_search_empty_query_lists_active() {
        let catalog = MemoryCatalog::with_products(seed::demo_products());

        let all = catalog.search(None, None).await.unwrap();
        assert_eq!(all.len(), 5);

        let all = catalog.search(Some("  "), None).await.unwrap();
        assert_eq!(all.len(), 5);
    }

    #[tokio::test]
    async fn test_find_one_hides_inactive() {
        let catalog = MemoryCatalog::with_products(seed::demo_products());
        let product = catalog.find_by_sku("ARENA-M3").await.unwrap();

        catalog.remove(&product.id).await.unwrap();

        assert!(catalog.find_one(&product.id).await.unwrap().is_none());
        let hits = catalog.search(Some("arena"), None).await.unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn test_remove_unknown_id_fails() {
        let catalog = MemoryCatalog::new();
        let err = catalog.remove("missing").await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_patches_fields() {
        let catalog = MemoryCatalog::with_products(seed::demo_products());
        let product = catalog.find_by_sku("TUBO-50-PVC").await.unwrap();

        let updated = catalog
            .update(
                &product.id,
                ProductPatch {
                    price_cents: Some(4999),
                    stock: Some(90),
                    ..ProductPatch::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.price_cents, 4999);
        assert_eq!(updated.stock, 90);
        assert_eq!(updated.name, product.name); // untouched
    }

    #[tokio::test]
    async fn test_update_rejects_sku_collision() {
        let catalog = MemoryCatalog::with_products(seed::demo_products());
        let product = catalog.find_by_sku("TUBO-50-PVC").await.unwrap();

        let err = catalog
            .update(
                &product.id,
                ProductPatch {
                    sku: Some("CEMEX-50KG".to_string()),
                    ..ProductPatch::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateSku { .. }));
    }

    #[tokio::test]
    async fn test_find_by_barcode() {
        let catalog = MemoryCatalog::with_products(seed::demo_products());

        let product = catalog
            .find_by_barcode("7501234567891")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(product.sku, "CEMEX-50KG");

        assert!(catalog
            .find_by_barcode("0000000000000")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_decrement_stock_conditional() {
        let catalog = MemoryCatalog::with_products(seed::demo_products());
        let grava = catalog.find_by_sku("GRAVA-M3").await.unwrap();
        assert_eq!(grava.stock, 12);

        catalog.decrement_stock(&grava.id, 2).await.unwrap();

        let err = catalog.decrement_stock(&grava.id, 11).await.unwrap_err();
        assert_eq!(
            err,
            CatalogError::InsufficientStock {
                sku: "GRAVA-M3".to_string(),
                available: 10,
                requested: 11,
            }
        );

        // Refused decrement left stock untouched
        let grava = catalog.find_by_sku("GRAVA-M3").await.unwrap();
        assert_eq!(grava.stock, 10);
    }

    #[tokio::test]
    async fn test_decrement_rejects_non_positive_amount() {
        let catalog = MemoryCatalog::with_products(seed::demo_products());
        let tubo = catalog.find_by_sku("TUBO-50-PVC").await.unwrap();

        assert!(catalog.decrement_stock(&tubo.id, 0).await.is_err());
        assert!(catalog.decrement_stock(&tubo.id, -5).await.is_err());
    }

    #[tokio::test]
    async fn test_restock() {
        let catalog = MemoryCatalog::with_products(seed::demo_products());
        let arena = catalog.find_by_sku("ARENA-M3").await.unwrap();

        catalog.restock(&arena.id, 10).await.unwrap();

        let arena = catalog.find_by_sku("ARENA-M3").await.unwrap();
        assert_eq!(arena.stock, 25);
    }

    #[tokio::test]
    async fn test_low_stock_report() {
        let catalog = MemoryCatalog::with_products(seed::demo_products());

        // Seed data has nothing at threshold yet
        assert!(catalog.low_stock().await.is_empty());

        // Drain Grava (stock 12, min 5) down to its threshold
        let grava = catalog.find_by_sku("GRAVA-M3").await.unwrap();
        catalog.decrement_stock(&grava.id, 7).await.unwrap();

        let report = catalog.low_stock().await;
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].sku, "GRAVA-M3");
    }
}
