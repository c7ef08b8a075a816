//! # Cart
//!
//! The in-progress sale: an ordered collection of lines, each referencing a
//! catalog product by id with a price snapshot taken at add time.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Cart State Operations                             │
//! │                                                                         │
//! │  Cashier Action            Operation              Cart State Change     │
//! │  ──────────────            ─────────              ─────────────────     │
//! │                                                                         │
//! │  Click Product ──────────► add_item() ──────────► line qty +1 / append │
//! │                                                                         │
//! │  Edit Quantity ──────────► set_quantity() ──────► qty = n (clamped)    │
//! │                                                                         │
//! │  Click Remove ───────────► remove_item() ───────► line removed         │
//! │                                                                         │
//! │  Cancel Sale ────────────► clear() ─────────────► lines emptied        │
//! │                                                                         │
//! │  Checkout commit ────────► snapshot() + clear()                        │
//! │                                                                         │
//! │  INVARIANTS                                                             │
//! │  • At most one line per product_id (adding again increments)           │
//! │  • Line quantity is always >= 1 (zero or below removes the line)       │
//! │  • Line quantity never exceeds the product stock known at mutation     │
//! │  • Insertion order is preserved for display                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CartError, CartResult};
use crate::money::Money;
use crate::types::Product;
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

// =============================================================================
// Cart Line
// =============================================================================

/// One line in the cart.
///
/// ## Design Notes
/// - `product_id`: weak reference to the catalog product
/// - `sku`/`name`/`unit_price_cents`: frozen copies taken when the line was
///   created. A price change in the catalog does not reprice an open cart;
///   checkout re-reads the catalog for *stock*, never for price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLine {
    /// Product ID (UUID).
    pub product_id: String,

    /// SKU at time of adding (frozen).
    pub sku: String,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Price in cents at time of adding (frozen).
    pub unit_price_cents: i64,

    /// Quantity in cart. Always >= 1.
    pub quantity: i64,

    /// When this line was added to the cart.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    /// Creates a new line for a product with quantity 1, freezing the
    /// display fields.
    pub fn from_product(product: &Product) -> Self {
        CartLine {
            product_id: product.id.clone(),
            sku: product.sku.clone(),
            name: product.name.clone(),
            unit_price_cents: product.price_cents,
            quantity: 1,
            added_at: Utc::now(),
        }
    }

    /// Returns the frozen unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }
}

// =============================================================================
// Cart Update Outcome
// =============================================================================

/// What a successful cart mutation actually did.
///
/// Clamping is an advisory, not a failure: the operation succeeded but the
/// caller asked for more than the product's current stock allows, and the
/// UI should tell the cashier so.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartUpdate {
    /// The requested change was applied as-is.
    Applied,
    /// The change was applied, but the quantity was capped.
    Clamped { requested: i64, applied: i64 },
    /// The line was removed (quantity reached zero or below).
    Removed,
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart: an ordered sequence of [`CartLine`].
///
/// Lines are private; callers read them through [`Cart::lines`] and can
/// never mutate cart state except through the operations below.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    lines: Vec<CartLine>,

    /// When the cart was created/last cleared.
    created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            lines: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds one unit of a product, or increments the existing line.
    ///
    /// ## Behavior
    /// - Product inactive or out of stock: rejected with `StockUnavailable`,
    ///   cart unchanged.
    /// - Line already present: quantity +1, capped at the product's current
    ///   stock (and the per-line maximum). A capped increment reports
    ///   [`CartUpdate::Clamped`].
    /// - No line yet: appends a new line with quantity 1, freezing
    ///   sku/name/price from the product.
    pub fn add_item(&mut self, product: &Product) -> CartResult<CartUpdate> {
        if !product.is_sellable() {
            return Err(CartError::StockUnavailable {
                sku: product.sku.clone(),
                name: product.name.clone(),
            });
        }

        if let Some(line) = self.line_mut(&product.id) {
            let requested = line.quantity + 1;
            let ceiling = product.stock.min(MAX_ITEM_QUANTITY);
            if requested > ceiling {
                line.quantity = ceiling;
                return Ok(CartUpdate::Clamped {
                    requested,
                    applied: ceiling,
                });
            }
            line.quantity = requested;
            return Ok(CartUpdate::Applied);
        }

        if self.lines.len() >= MAX_CART_ITEMS {
            return Err(CartError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }

        self.lines.push(CartLine::from_product(product));
        Ok(CartUpdate::Applied)
    }

    /// Sets the quantity of an existing line.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: the line is removed entirely (a line is never left
    ///   at zero). Removing an absent line is a no-op, not an error.
    /// - `quantity > 0`: the line is set to `min(quantity, product.stock)`.
    ///   Asking for more than stock succeeds but clamps, reported via
    ///   [`CartUpdate::Clamped`]. If the clamp lands on zero (stock dried up
    ///   since the line was added), the line is removed.
    /// - `LineNotFound` when a positive quantity is requested for a product
    ///   that has no line.
    pub fn set_quantity(&mut self, product: &Product, quantity: i64) -> CartResult<CartUpdate> {
        if quantity <= 0 {
            self.remove_item(&product.id);
            return Ok(CartUpdate::Removed);
        }

        if quantity > MAX_ITEM_QUANTITY {
            return Err(CartError::QuantityTooLarge {
                requested: quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }

        let Some(idx) = self.lines.iter().position(|l| l.product_id == product.id) else {
            return Err(CartError::LineNotFound {
                product_id: product.id.clone(),
            });
        };

        let applied = quantity.min(product.stock);
        if applied <= 0 {
            // Stock dried up since the line was added; a line never sits at zero.
            self.lines.remove(idx);
            return Ok(CartUpdate::Removed);
        }

        self.lines[idx].quantity = applied;
        if applied < quantity {
            Ok(CartUpdate::Clamped {
                requested: quantity,
                applied,
            })
        } else {
            Ok(CartUpdate::Applied)
        }
    }

    /// Removes a line by product ID. Idempotent: removing an absent line is
    /// a no-op. Returns whether a line was actually removed.
    pub fn remove_item(&mut self, product_id: &str) -> bool {
        let initial_len = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);
        self.lines.len() != initial_len
    }

    /// Clears all lines from the cart. Idempotent.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.created_at = Utc::now();
    }

    /// Read-only ordered view of the lines.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Owned snapshot of the lines, for receipt construction.
    pub fn snapshot(&self) -> Vec<CartLine> {
        self.lines.clone()
    }

    /// When the cart was created or last cleared.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the number of unique lines in the cart.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the total quantity of units across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn line_mut(&mut self, product_id: &str) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|l| l.product_id == product_id)
    }
}

impl Default for Cart {
    fn default() -> Self {
        Cart::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
