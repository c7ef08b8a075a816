//! # Sale Session
//!
//! One in-progress sale: a cart plus the catalog it resolves products from.
//!
//! ## Thread Safety
//! The cart is wrapped in a `Mutex` because:
//! 1. The session may be shared (e.g. behind an `Arc`) with a UI layer
//! 2. Only one operation should modify the cart at a time
//!
//! The `committing` flag additionally freezes the cart while a commit is in
//! flight: the commit suspends on catalog calls, and no second operation may
//! interleave with it. Mutations and a concurrent second commit fail fast
//! with `CommitInProgress` instead of blocking.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  UI Action                SaleSession              Cart State Change    │
//! │  ─────────                ───────────              ─────────────────    │
//! │                                                                         │
//! │  Click Product ─────────► add_item(id) ──────────► line qty +1/append  │
//! │  Scan Barcode ──────────► add_by_barcode(code) ──► line qty +1/append  │
//! │  Edit Quantity ─────────► set_quantity(id, n) ───► qty = n (clamped)   │
//! │  Click Remove ──────────► remove_item(id) ───────► line removed        │
//! │  Cancel Sale ───────────► clear() ───────────────► lines emptied       │
//! │  View Cart ─────────────► cart() ────────────────► (read only)         │
//! │                                                                         │
//! │  add/set/scan resolve the product from the catalog first; the cart     │
//! │  mutation itself is synchronous under the lock.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use serde::Serialize;
use tracing::debug;
use ts_rs::TS;

use inframex_catalog::Catalog;
use inframex_core::{pricing, Cart, CartUpdate};

use crate::error::{EngineError, EngineResult};

// =============================================================================
// Cart Views
// =============================================================================

/// One cart line as shown to the caller, with its computed total.
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineView {
    pub product_id: String,
    pub sku: String,
    pub name: String,
    pub unit_price_cents: i64,
    pub quantity: i64,
    pub line_total_cents: i64,
}

/// Cart totals summary, recomputed on every view.
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    pub line_count: usize,
    pub total_quantity: i64,
    pub total_cents: i64,
}

/// Cart contents plus totals.
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartView {
    pub lines: Vec<LineView>,
    pub totals: CartTotals,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        let lines = cart
            .lines()
            .iter()
            .map(|line| LineView {
                product_id: line.product_id.clone(),
                sku: line.sku.clone(),
                name: line.name.clone(),
                unit_price_cents: line.unit_price_cents,
                quantity: line.quantity,
                line_total_cents: pricing::line_total(line).cents(),
            })
            .collect();

        CartView {
            lines,
            totals: CartTotals {
                line_count: cart.line_count(),
                total_quantity: cart.total_quantity(),
                total_cents: pricing::cart_total(cart.lines()).cents(),
            },
        }
    }
}

/// Quantity cap advisory: the mutation succeeded but gave less than asked.
#[derive(Debug, Clone, Copy, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ClampedQuantity {
    pub requested: i64,
    pub applied: i64,
}

/// Result of a cart mutation: the updated view, plus a clamp advisory when
/// the requested quantity was capped at the product's current stock.
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartMutation {
    pub cart: CartView,
    pub clamped: Option<ClampedQuantity>,
}

impl CartMutation {
    fn new(cart: CartView, update: CartUpdate) -> Self {
        let clamped = match update {
            CartUpdate::Clamped { requested, applied } => {
                Some(ClampedQuantity { requested, applied })
            }
            CartUpdate::Applied | CartUpdate::Removed => None,
        };
        CartMutation { cart, clamped }
    }
}

// =============================================================================
// Sale Session
// =============================================================================

/// One cart, one actor, one catalog.
///
/// ## Usage
/// ```rust,ignore
/// let catalog = Arc::new(MemoryCatalog::with_products(seed::demo_products()));
/// let session = SaleSession::new(catalog);
///
/// session.add_item(&product_id).await?;
/// session.set_quantity(&product_id, 3).await?;
/// let receipt = session.commit().await?;
/// ```
#[derive(Debug)]
pub struct SaleSession<C: Catalog> {
    pub(crate) catalog: Arc<C>,
    pub(crate) cart: Mutex<Cart>,
    pub(crate) committing: AtomicBool,
}

impl<C: Catalog> SaleSession<C> {
    /// Creates a session with an empty cart.
    pub fn new(catalog: Arc<C>) -> Self {
        SaleSession {
            catalog,
            cart: Mutex::new(Cart::new()),
            committing: AtomicBool::new(false),
        }
    }

    /// Gets the current cart contents and totals.
    pub fn cart(&self) -> CartView {
        self.with_cart(|c| CartView::from(c))
    }

    /// Adds one unit of a product by id.
    ///
    /// Resolves the product from the catalog first: an id that no longer
    /// resolves is `ProductGone`; an inactive or out-of-stock product is
    /// rejected by the cart with `StockUnavailable`.
    pub async fn add_item(&self, product_id: &str) -> EngineResult<CartMutation> {
        self.ensure_open()?;
        debug!(product_id = %product_id, "add_item");

        let product = self
            .catalog
            .find_one(product_id)
            .await?
            .ok_or_else(|| EngineError::ProductGone {
                product_id: product_id.to_string(),
            })?;

        let (update, view) = self.with_cart_guarded(|c| {
            let update = c.add_item(&product)?;
            Ok((update, CartView::from(&*c)))
        })?;
        Ok(CartMutation::new(view, update))
    }

    /// Adds one unit of a product by scanned barcode.
    ///
    /// An unknown barcode is `Ok(None)` - a mis-scan is a normal outcome,
    /// not a failure.
    pub async fn add_by_barcode(&self, barcode: &str) -> EngineResult<Option<CartMutation>> {
        self.ensure_open()?;
        debug!(barcode = %barcode, "add_by_barcode");

        let Some(product) = self.catalog.find_by_barcode(barcode).await? else {
            return Ok(None);
        };

        let (update, view) = self.with_cart_guarded(|c| {
            let update = c.add_item(&product)?;
            Ok((update, CartView::from(&*c)))
        })?;
        Ok(Some(CartMutation::new(view, update)))
    }

    /// Sets the quantity of an existing line.
    ///
    /// Zero or below removes the line (no catalog round-trip needed).
    /// Positive quantities are clamped to the product's current stock, with
    /// the clamp reported in the returned [`CartMutation`].
    pub async fn set_quantity(&self, product_id: &str, quantity: i64) -> EngineResult<CartMutation> {
        self.ensure_open()?;
        debug!(product_id = %product_id, quantity = %quantity, "set_quantity");

        if quantity <= 0 {
            let view = self.with_cart_guarded(|c| {
                c.remove_item(product_id);
                Ok(CartView::from(&*c))
            })?;
            return Ok(CartMutation {
                cart: view,
                clamped: None,
            });
        }

        let product = self
            .catalog
            .find_one(product_id)
            .await?
            .ok_or_else(|| EngineError::ProductGone {
                product_id: product_id.to_string(),
            })?;

        let (update, view) = self.with_cart_guarded(|c| {
            let update = c.set_quantity(&product, quantity)?;
            Ok((update, CartView::from(&*c)))
        })?;
        Ok(CartMutation::new(view, update))
    }

    /// Removes a line. Idempotent: removing an absent line is a no-op.
    pub fn remove_item(&self, product_id: &str) -> EngineResult<CartView> {
        debug!(product_id = %product_id, "remove_item");

        self.with_cart_guarded(|c| {
            c.remove_item(product_id);
            Ok(CartView::from(&*c))
        })
    }

    /// Clears the cart (cancelled sale). Idempotent.
    pub fn clear(&self) -> EngineResult<CartView> {
        debug!("clear_cart");

        self.with_cart_guarded(|c| {
            c.clear();
            Ok(CartView::from(&*c))
        })
    }

    /// Whether a commit is currently in flight.
    pub fn is_committing(&self) -> bool {
        self.committing.load(Ordering::SeqCst)
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    pub(crate) fn ensure_open(&self) -> EngineResult<()> {
        if self.is_committing() {
            return Err(EngineError::CommitInProgress);
        }
        Ok(())
    }

    /// Read access to the cart.
    pub(crate) fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().expect("Cart mutex poisoned");
        f(&cart)
    }

    /// Write access to the cart, refused while a commit is in flight.
    ///
    /// The flag is re-checked under the lock so a mutation can never slip
    /// between a commit's snapshot and its final clear.
    fn with_cart_guarded<F, R>(&self, f: F) -> EngineResult<R>
    where
        F: FnOnce(&mut Cart) -> EngineResult<R>,
    {
        let mut cart = self.cart.lock().expect("Cart mutex poisoned");
        self.ensure_open()?;
        f(&mut cart)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use inframex_catalog::{seed, MemoryCatalog};

    fn session() -> SaleSession<MemoryCatalog> {
        SaleSession::new(Arc::new(MemoryCatalog::with_products(seed::demo_products())))
    }

    async fn id_of(session: &SaleSession<MemoryCatalog>, sku: &str) -> String {
        session.catalog.find_by_sku(sku).await.unwrap().id
    }

    #[tokio::test]
    async fn test_add_item_builds_view_with_totals() {
        let session = session();
        let tubo = id_of(&session, "TUBO-50-PVC").await;

        let mutation = session.add_item(&tubo).await.unwrap();

        assert!(mutation.clamped.is_none());
        assert_eq!(mutation.cart.lines.len(), 1);
        assert_eq!(mutation.cart.lines[0].line_total_cents, 4550);
        assert_eq!(mutation.cart.totals.total_cents, 4550);
    }

    #[tokio::test]
    async fn test_add_unknown_id_is_product_gone() {
        let session = session();

        let err = session.add_item("no-such-id").await.unwrap_err();
        assert!(matches!(err, EngineError::ProductGone { .. }));
    }

    #[tokio::test]
    async fn test_add_by_barcode_unknown_is_none() {
        let session = session();

        assert!(session.add_by_barcode("9999999999999").await.unwrap().is_none());

        let mutation = session.add_by_barcode("7501234567890").await.unwrap().unwrap();
        assert_eq!(mutation.cart.lines[0].sku, "TUBO-50-PVC");
    }

    #[tokio::test]
    async fn test_set_quantity_reports_clamp() {
        let session = session();
        let grava = id_of(&session, "GRAVA-M3").await; // stock 12

        session.add_item(&grava).await.unwrap();
        let mutation = session.set_quantity(&grava, 20).await.unwrap();

        let clamp = mutation.clamped.unwrap();
        assert_eq!(clamp.requested, 20);
        assert_eq!(clamp.applied, 12);
        assert_eq!(mutation.cart.lines[0].quantity, 12);
    }

    #[tokio::test]
    async fn test_set_quantity_zero_removes_without_lookup() {
        let session = session();
        let tubo = id_of(&session, "TUBO-50-PVC").await;

        session.add_item(&tubo).await.unwrap();
        // Works even after the product disappears from the catalog
        session.catalog.remove(&tubo).await.unwrap();

        let mutation = session.set_quantity(&tubo, 0).await.unwrap();
        assert!(mutation.cart.lines.is_empty());
    }

    #[tokio::test]
    async fn test_remove_and_clear_are_idempotent() {
        let session = session();
        let tubo = id_of(&session, "TUBO-50-PVC").await;

        session.add_item(&tubo).await.unwrap();
        let view = session.remove_item(&tubo).unwrap();
        assert!(view.lines.is_empty());
        let view = session.remove_item(&tubo).unwrap();
        assert!(view.lines.is_empty());

        let view = session.clear().unwrap();
        assert!(view.lines.is_empty());
    }
}
