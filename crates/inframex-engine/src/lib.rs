//! # inframex-engine: The Transaction Engine
//!
//! Ties the pure cart logic from `inframex-core` to a live `Catalog` and
//! owns the checkout state transition.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Sale Session Lifecycle                             │
//! │                                                                         │
//! │  ┌──────────┐  add_item       ┌──────────┐   commit()   ┌───────────┐  │
//! │  │  Open    │  set_quantity   │  Open    │─────────────►│ Committing│  │
//! │  │  (empty) │────────────────►│ (lines)  │              │ (locked)  │  │
//! │  └──────────┘  remove_item    └──────────┘              └─────┬─────┘  │
//! │       ▲                            │                          │        │
//! │       │                       clear()                 success │ fail   │
//! │       │                            │                          │   │    │
//! │       └────────────────────────────┴──────────────────────────┘   │    │
//! │         (back to Open/empty; success also yields a SaleReceipt)   │    │
//! │                                                                   ▼    │
//! │                                      cart + catalog unchanged, retry   │
//! │                                                                         │
//! │  While a commit is in flight every other operation fails fast with     │
//! │  CommitInProgress - one commit per cart at a time, no interleaving.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`session`] - `SaleSession` and its cart views
//! - [`checkout`] - the validate-then-apply commit
//! - [`error`] - engine error types

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod error;
pub mod session;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{EngineError, EngineResult, LineViolation, ViolationKind};
pub use session::{CartMutation, CartTotals, CartView, ClampedQuantity, LineView, SaleSession};
