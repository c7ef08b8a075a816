//! # Engine Error Types
//!
//! The error surface callers of a [`crate::SaleSession`] see.
//!
//! Every variant is recoverable: retry, adjust a quantity, or refresh the
//! catalog view. A rejected checkout names *every* violating line so the
//! caller can present one consolidated correction prompt instead of a
//! sequence of single errors.

use serde::Serialize;
use thiserror::Error;
use ts_rs::TS;

use inframex_catalog::CatalogError;
use inframex_core::CartError;

// =============================================================================
// Engine Error
// =============================================================================

/// Session and checkout errors.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Cart mutation rejected (stock gate, line limits).
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Catalog operation failed for a non-stock reason.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// A referenced product no longer resolves: it was deleted or
    /// deactivated since the reference was taken.
    #[error("Product no longer available: {product_id}")]
    ProductGone { product_id: String },

    /// Commit was requested on an empty cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// A commit is already in flight for this cart.
    ///
    /// One commit per cart at a time; the caller should wait for the
    /// outstanding commit to finish and re-inspect the cart.
    #[error("A commit is already in progress for this cart")]
    CommitInProgress,

    /// Checkout validation failed. The catalog was not touched and the
    /// cart is unchanged; `violations` names every offending line.
    #[error("Checkout rejected: {} line(s) failed validation", violations.len())]
    CheckoutRejected { violations: Vec<LineViolation> },
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

// =============================================================================
// Checkout Violations
// =============================================================================

/// One cart line that failed checkout validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineViolation {
    /// Product the line references.
    pub product_id: String,

    /// Frozen display name, so the message works even when the product
    /// is gone from the catalog.
    pub name: String,

    pub kind: ViolationKind,
}

/// Why a line failed checkout validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase", tag = "type")]
#[ts(export)]
pub enum ViolationKind {
    /// Product vanished or was deactivated since the line was added.
    ProductGone,

    /// Live stock no longer covers the line quantity.
    InsufficientStock { available: i64, requested: i64 },
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_message_counts_lines() {
        let err = EngineError::CheckoutRejected {
            violations: vec![
                LineViolation {
                    product_id: "a".to_string(),
                    name: "Arena".to_string(),
                    kind: ViolationKind::ProductGone,
                },
                LineViolation {
                    product_id: "b".to_string(),
                    name: "Grava".to_string(),
                    kind: ViolationKind::InsufficientStock {
                        available: 10,
                        requested: 12,
                    },
                },
            ],
        };
        assert_eq!(err.to_string(), "Checkout rejected: 2 line(s) failed validation");
    }

    #[test]
    fn test_cart_error_passes_through() {
        let err: EngineError = CartError::LineNotFound {
            product_id: "p".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Product p is not in the cart");
    }
}
