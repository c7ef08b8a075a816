//! # inframex-catalog: Product Catalog for Inframex POS
//!
//! This crate provides the product catalog: lookup, search, CRUD, and the
//! stock mutations that only a committed checkout may perform.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Inframex POS Data Flow                            │
//! │                                                                         │
//! │  SaleSession (inframex-engine)                                         │
//! │       │ Catalog trait (async)                                          │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 inframex-catalog (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │ Catalog trait │    │ MemoryCatalog │    │    seed      │  │   │
//! │  │   │ (catalog.rs)  │◄───│ (memory.rs)   │    │ (demo data)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ search        │    │ RwLock over   │    │ 5 Inframex   │  │   │
//! │  │   │ find_one      │    │ product list  │    │ products     │  │   │
//! │  │   │ decrement     │    │ + CRUD        │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`catalog`] - The `Catalog` trait: the engine's abstract dependency
//! - [`memory`] - `MemoryCatalog`, the in-process reference implementation
//! - [`seed`] - Demo product data
//! - [`error`] - Catalog error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use inframex_catalog::{Catalog, MemoryCatalog, seed};
//!
//! let catalog = MemoryCatalog::with_products(seed::demo_products());
//!
//! let hits = catalog.search(Some("tubo"), None).await?;
//! let product = catalog.find_by_barcode("7501234567890").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod memory;
pub mod seed;

// =============================================================================
// Re-exports
// =============================================================================

pub use catalog::Catalog;
pub use error::{CatalogError, CatalogResult};
pub use memory::{MemoryCatalog, NewProduct, ProductPatch};
