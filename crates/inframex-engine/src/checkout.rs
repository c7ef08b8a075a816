//! # Checkout
//!
//! The validate-then-apply transition from an open cart to a committed sale.
//!
//! ## Commit Phases
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        commit() phases                                  │
//! │                                                                         │
//! │  0. GATE      committing flag set (second commit → CommitInProgress)   │
//! │               snapshot cart lines (empty cart → EmptyCart)             │
//! │                                                                         │
//! │  1. VALIDATE  re-read every product from the live catalog              │
//! │               • gone/inactive        → ProductGone violation           │
//! │               • stock < line qty     → InsufficientStock violation     │
//! │               ALL violations are collected; any violation aborts       │
//! │               with the full list. Catalog untouched, cart unchanged.   │
//! │                                                                         │
//! │  2. APPLY     conditional decrement per line, in cart order.           │
//! │               A decrement can still refuse (stock moved between        │
//! │               validate and apply); already-applied decrements are      │
//! │               then compensated, so a failed commit never leaves the    │
//! │               catalog partially decremented.                           │
//! │                                                                         │
//! │  3. RECEIPT   totals from the frozen lines, receipt number, clear      │
//! │               the cart back to Open/empty.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validation narrows the race window; the atomic conditional decrement in
//! the catalog is the final authority (see `inframex-catalog`).

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use tracing::{debug, error, info};

use inframex_catalog::{Catalog, CatalogError};
use inframex_core::{pricing, CartLine, SaleReceipt};

use crate::error::{EngineError, EngineResult, LineViolation, ViolationKind};
use crate::session::SaleSession;

impl<C: Catalog> SaleSession<C> {
    /// Commits the cart: validates every line against live catalog stock,
    /// decrements stock all-or-nothing, and produces a [`SaleReceipt`].
    ///
    /// On success the cart is cleared and accepts mutations again. On any
    /// failure the cart and the catalog are left unchanged so the cashier
    /// can correct quantities and retry; a validation failure names every
    /// offending line, not just the first.
    pub async fn commit(&self) -> EngineResult<SaleReceipt> {
        if self.committing.swap(true, Ordering::SeqCst) {
            return Err(EngineError::CommitInProgress);
        }
        let _guard = CommitGuard(&self.committing);

        let lines = {
            let cart = self.cart.lock().expect("Cart mutex poisoned");
            if cart.is_empty() {
                return Err(EngineError::EmptyCart);
            }
            cart.snapshot()
        };
        debug!(lines = lines.len(), "commit started");

        // Phase 1: re-validate against live catalog state. Stock may have
        // moved since the lines were added (another till, a stock
        // adjustment), and products may have been deactivated.
        let mut violations = Vec::new();
        for line in &lines {
            match self.catalog.find_one(&line.product_id).await? {
                None => violations.push(LineViolation {
                    product_id: line.product_id.clone(),
                    name: line.name.clone(),
                    kind: ViolationKind::ProductGone,
                }),
                Some(product) if !product.covers(line.quantity) => {
                    violations.push(LineViolation {
                        product_id: line.product_id.clone(),
                        name: line.name.clone(),
                        kind: ViolationKind::InsufficientStock {
                            available: product.stock,
                            requested: line.quantity,
                        },
                    })
                }
                Some(_) => {}
            }
        }
        if !violations.is_empty() {
            info!(violations = violations.len(), "Checkout rejected");
            return Err(EngineError::CheckoutRejected { violations });
        }

        // Phase 2: apply the decrements. Each one is conditional; losing
        // the validate/apply race backs out what was already applied.
        let mut applied: Vec<(String, i64)> = Vec::new();
        for line in &lines {
            match self
                .catalog
                .decrement_stock(&line.product_id, line.quantity)
                .await
            {
                Ok(()) => applied.push((line.product_id.clone(), line.quantity)),
                Err(err) => {
                    self.roll_back(&applied).await;
                    return Err(rejection_for(line, err));
                }
            }
        }

        let total = pricing::cart_total(&lines);
        let receipt = SaleReceipt {
            receipt_number: generate_receipt_number(),
            lines,
            total_cents: total.cents(),
            created_at: Utc::now(),
        };

        {
            let mut cart = self.cart.lock().expect("Cart mutex poisoned");
            cart.clear();
        }

        info!(
            receipt_number = %receipt.receipt_number,
            total = %total,
            lines = receipt.lines.len(),
            "Sale committed"
        );
        Ok(receipt)
    }

    /// Compensates decrements already applied by an aborted commit.
    async fn roll_back(&self, applied: &[(String, i64)]) {
        for (product_id, quantity) in applied {
            if let Err(err) = self.catalog.restock(product_id, *quantity).await {
                // The store refused the compensation; stock for this product
                // now needs a manual adjustment.
                error!(product_id = %product_id, quantity = %quantity, %err,
                    "Failed to compensate stock after aborted commit");
            }
        }
    }
}

/// Maps an apply-phase decrement failure to a checkout rejection naming
/// the losing line.
fn rejection_for(line: &CartLine, err: CatalogError) -> EngineError {
    let kind = match err {
        CatalogError::InsufficientStock {
            available,
            requested,
            ..
        } => ViolationKind::InsufficientStock {
            available,
            requested,
        },
        CatalogError::NotFound { .. } => ViolationKind::ProductGone,
        other => return EngineError::Catalog(other),
    };
    EngineError::CheckoutRejected {
        violations: vec![LineViolation {
            product_id: line.product_id.clone(),
            name: line.name.clone(),
            kind,
        }],
    }
}

/// Resets the committing flag when the commit ends, on every exit path.
struct CommitGuard<'a>(&'a AtomicBool);

impl Drop for CommitGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Generates a human-readable receipt number: date, time, random suffix.
fn generate_receipt_number() -> String {
    let now = Utc::now();
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0);
    let random: u16 = (nanos % 10000) as u16;
    format!("{}-{:04}", now.format("%y%m%d-%H%M%S"), random)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_number_shape() {
        let number = generate_receipt_number();
        // yymmdd-HHMMSS-rrrr
        assert_eq!(number.len(), 18);
        assert_eq!(number.matches('-').count(), 2);
    }

    #[test]
    fn test_rejection_for_maps_stock_errors() {
        let line = CartLine {
            product_id: "p1".to_string(),
            sku: "GRAVA-M3".to_string(),
            name: "Grava".to_string(),
            unit_price_cents: 52000,
            quantity: 12,
            added_at: Utc::now(),
        };

        let err = rejection_for(
            &line,
            CatalogError::InsufficientStock {
                sku: "GRAVA-M3".to_string(),
                available: 10,
                requested: 12,
            },
        );
        match err {
            EngineError::CheckoutRejected { violations } => {
                assert_eq!(violations.len(), 1);
                assert_eq!(
                    violations[0].kind,
                    ViolationKind::InsufficientStock {
                        available: 10,
                        requested: 12
                    }
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
