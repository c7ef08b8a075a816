//! # Catalog Trait
//!
//! The transaction engine's abstract view of the product catalog.
//!
//! The engine never owns products; it reads them here and re-reads them at
//! commit time rather than trusting cached snapshots. The only mutations it
//! is allowed are the stock adjustments below, and `decrement_stock` is
//! reserved for checkout.
//!
//! ## Why a Trait?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SaleSession<C: Catalog>                                                │
//! │       │                                                                 │
//! │       ├── in this workspace ──► MemoryCatalog (in-process store)       │
//! │       │                                                                 │
//! │       └── in production ──────► any remote/persistent store behind     │
//! │                                 the same query/mutation contract       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Methods are async because catalog access may be remote; the engine's own
//! cart transitions stay synchronous and only suspend while awaiting the
//! catalog.

use inframex_core::Product;

use crate::error::CatalogResult;

/// Product lookup and stock mutation, as consumed by the transaction engine.
#[allow(async_fn_in_trait)]
pub trait Catalog: Send + Sync {
    /// Searches active products.
    ///
    /// `query` matches name and SKU case-insensitively and barcode by
    /// substring; `category` is an exact match. Both filters are optional;
    /// with neither, all active products are returned.
    async fn search(
        &self,
        query: Option<&str>,
        category: Option<&str>,
    ) -> CatalogResult<Vec<Product>>;

    /// Looks up an active product by id. Absence is `Ok(None)`, not an error.
    async fn find_one(&self, id: &str) -> CatalogResult<Option<Product>>;

    /// Looks up an active product by exact barcode. Absence is `Ok(None)`.
    async fn find_by_barcode(&self, barcode: &str) -> CatalogResult<Option<Product>>;

    /// Atomically decrements stock, refusing to go below zero.
    ///
    /// Used exclusively by checkout. Fails with
    /// [`crate::CatalogError::InsufficientStock`] when `stock < amount` at
    /// the moment of the decrement - the check and the write happen under
    /// one lock, so two concurrent commits cannot both succeed past the
    /// stock limit.
    async fn decrement_stock(&self, id: &str, amount: i64) -> CatalogResult<()>;

    /// Atomically increments stock (restock delivery, or compensation when
    /// a multi-line commit has to back out).
    async fn restock(&self, id: &str, amount: i64) -> CatalogResult<()>;
}
