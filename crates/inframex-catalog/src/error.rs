//! # Catalog Error Types
//!
//! Error types for catalog operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Error Propagation                                 │
//! │                                                                         │
//! │  ValidationError (inframex-core)                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CatalogError (this module) ← Adds store context                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  EngineError (inframex-engine) ← What the session caller sees          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Note what is NOT an error: a lookup that finds nothing. `find_one` and
//! `find_by_barcode` return `Ok(None)` for absent products - absence is a
//! normal, representable result.

use thiserror::Error;

use inframex_core::ValidationError;

/// Catalog operation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Entity not found for a mutation (update, remove, stock adjustment).
    ///
    /// ## When This Occurs
    /// - Updating or removing an id that doesn't exist
    /// - Decrementing stock of an id that doesn't exist or is inactive
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// SKU already taken by another product.
    #[error("Duplicate SKU: '{sku}' already exists")]
    DuplicateSku { sku: String },

    /// Conditional stock decrement refused: stock would go negative.
    ///
    /// This is the final authority on the multi-till race: even when a
    /// caller pre-checked stock, the decrement itself re-checks under the
    /// write lock and can still refuse.
    #[error("Insufficient stock for {sku}: available {available}, requested {requested}")]
    InsufficientStock {
        sku: String,
        available: i64,
        requested: i64,
    },

    /// Input validation failed (wraps core ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CatalogError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        CatalogError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CatalogError::InsufficientStock {
            sku: "GRAVA-M3".to_string(),
            available: 10,
            requested: 12,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for GRAVA-M3: available 10, requested 12"
        );

        let err = CatalogError::not_found("Product", "abc");
        assert_eq!(err.to_string(), "Product not found: abc");
    }

    #[test]
    fn test_validation_converts_to_catalog_error() {
        let validation_err = ValidationError::Required {
            field: "sku".to_string(),
        };
        let err: CatalogError = validation_err.into();
        assert!(matches!(err, CatalogError::Validation(_)));
    }
}
