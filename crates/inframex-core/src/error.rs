//! # Error Types
//!
//! Domain-specific error types for inframex-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  inframex-core errors (this file)                                      │
//! │  ├── CartError        - Cart mutation rejections                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  inframex-catalog errors (separate crate)                              │
//! │  └── CatalogError     - Store lookup/mutation failures                 │
//! │                                                                         │
//! │  inframex-engine errors (separate crate)                               │
//! │  └── EngineError      - Session + checkout failures                    │
//! │                                                                         │
//! │  Flow: ValidationError → CatalogError → EngineError → caller           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (SKU, ID, quantities)
//! 3. Errors are enum variants, never String
//! 4. Every error here is recoverable by the caller - none is fatal

use thiserror::Error;

// =============================================================================
// Cart Error
// =============================================================================

/// Cart mutation errors.
///
/// These represent rejected cart operations. The cart is left unchanged
/// whenever one of these is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// Product cannot be added to a cart right now.
    ///
    /// ## When This Occurs
    /// - Product is inactive (soft-deleted)
    /// - Product has zero stock at the moment of the add
    #[error("{name} ({sku}) is not available for sale")]
    StockUnavailable { sku: String, name: String },

    /// A quantity change was requested for a product with no line in the cart.
    #[error("Product {product_id} is not in the cart")]
    LineNotFound { product_id: String },

    /// Cart has exceeded maximum allowed unique lines.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Requested quantity exceeds the per-line maximum.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., malformed barcode, malformed amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CartError.
pub type CartResult<T> = Result<T, CartError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_error_messages() {
        let err = CartError::StockUnavailable {
            sku: "GRAVA-M3".to_string(),
            name: "Grava triturada 3/4\"".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Grava triturada 3/4\" (GRAVA-M3) is not available for sale"
        );

        let err = CartError::LineNotFound {
            product_id: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "Product abc is not in the cart");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "sku".to_string(),
        };
        assert_eq!(err.to_string(), "sku is required");

        let err = ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        };
        assert_eq!(err.to_string(), "name must be at most 200 characters");
    }
}
