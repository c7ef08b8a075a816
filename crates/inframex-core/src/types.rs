//! # Domain Types
//!
//! Core domain types used throughout Inframex POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐        ┌─────────────────┐                        │
//! │  │    Product      │        │   SaleReceipt   │                        │
//! │  │  ─────────────  │        │  ─────────────  │                        │
//! │  │  id (UUID)      │        │  receipt_number │                        │
//! │  │  sku (business) │        │  lines (frozen) │                        │
//! │  │  price_cents    │        │  total_cents    │                        │
//! │  │  stock          │        │  created_at     │                        │
//! │  └─────────────────┘        └─────────────────┘                        │
//! │                                                                         │
//! │  The catalog owns Products. Carts reference them by id and snapshot    │
//! │  the fields they display (see cart::CartLine).                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every product has:
//! - `id`: UUID v4 - immutable, used for references
//! - `sku`: business identifier - human-readable, potentially mutable

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::CartLine;
use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
///
/// Invariants maintained by the catalog: `price_cents >= 0` and `stock >= 0`
/// at all times. Stock is decremented only by a committed checkout (or an
/// explicit restock adjustment).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Stock Keeping Unit - business identifier.
    pub sku: String,

    /// Barcode (EAN-13, UPC-A, etc.).
    pub barcode: Option<String>,

    /// Display name shown to cashier and on receipt.
    pub name: String,

    /// Optional description for product details.
    pub description: Option<String>,

    /// Price in cents (smallest currency unit).
    pub price_cents: i64,

    /// Cost in cents (for profit margin calculations).
    pub cost_cents: Option<i64>,

    /// Current stock level. Never negative.
    pub stock: i64,

    /// Threshold below which the product shows up in the low-stock report.
    pub min_stock: i64,

    /// Selling unit: "pieza", "saco", "m3", ...
    pub unit: String,

    /// Category for filtered search ("Tubería", "Cementos", ...).
    pub category: String,

    /// Whether product is active (soft delete).
    /// Inactive products are invisible to search and new cart additions,
    /// but existing cart lines that reference them are kept.
    pub is_active: bool,

    /// When the product was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Checks if the product can receive a new cart line right now.
    ///
    /// A product is sellable when it is active and has at least one unit
    /// in stock.
    #[inline]
    pub fn is_sellable(&self) -> bool {
        self.is_active && self.stock > 0
    }

    /// Checks if current stock covers the given quantity.
    #[inline]
    pub fn covers(&self, quantity: i64) -> bool {
        self.stock >= quantity
    }

    /// Checks if the product is at or below its low-stock threshold.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.min_stock
    }
}

// =============================================================================
// Sale Receipt
// =============================================================================

/// The immutable record produced by a successful checkout.
///
/// ## Snapshot Pattern
/// `lines` are frozen copies of the cart lines at commit time. Catalog
/// changes after the commit (price updates, soft deletes) never alter a
/// receipt that has already been produced.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SaleReceipt {
    /// Human-readable receipt number (date + time + random suffix).
    pub receipt_number: String,

    /// Cart lines at the moment of commit (frozen).
    pub lines: Vec<CartLine>,

    /// Grand total in cents, computed from the frozen lines.
    pub total_cents: i64,

    /// When the sale was committed.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl SaleReceipt {
    /// Returns the total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Total quantity of units across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(stock: i64, min_stock: i64, is_active: bool) -> Product {
        Product {
            id: "p1".to_string(),
            sku: "TUBO-50-PVC".to_string(),
            barcode: Some("7501234567890".to_string()),
            name: "Tubo PVC 50mm".to_string(),
            description: None,
            price_cents: 4550,
            cost_cents: Some(3200),
            stock,
            min_stock,
            unit: "pieza".to_string(),
            category: "Tubería".to_string(),
            is_active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_sellable() {
        assert!(product(10, 2, true).is_sellable());
        assert!(!product(0, 2, true).is_sellable());
        assert!(!product(10, 2, false).is_sellable());
    }

    #[test]
    fn test_covers() {
        let p = product(5, 2, true);
        assert!(p.covers(5));
        assert!(!p.covers(6));
    }

    #[test]
    fn test_low_stock() {
        assert!(product(2, 2, true).is_low_stock());
        assert!(product(1, 2, true).is_low_stock());
        assert!(!product(3, 2, true).is_low_stock());
    }

    #[test]
    fn test_price_as_money() {
        assert_eq!(product(1, 0, true).price(), Money::from_cents(4550));
    }
}
