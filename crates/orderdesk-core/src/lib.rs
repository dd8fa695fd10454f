//! # orderdesk-core: Pure Business Logic for OrderDesk
//!
//! This crate is the **heart** of OrderDesk. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        OrderDesk Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Order Form (external collaborator)              │   │
//! │  │    Customer fields ──► Item rows ──► Review ──► Save / Export   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ raw strings / numbers                  │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    orderdesk-session                            │   │
//! │  │    Editing → Reviewing state machine, session object            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ orderdesk-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌──────┐ ┌────────┐ ┌──────┐ ┌─────┐ │   │
//! │  │   │ catalog │ │  money  │ │ cart │ │pricing │ │ledger│ │ csv │ │   │
//! │  │   │ Product │ │  Money  │ │ rows │ │shipping│ │Order │ │ BOM │ │   │
//! │  │   └─────────┘ └─────────┘ └──────┘ └────────┘ └──────┘ └─────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO RENDERING • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`catalog`] - Static product list, looked up by id
//! - [`cart`] - Editable line items and customer info
//! - [`pricing`] - Subtotal / shipping / total math
//! - [`validation`] - The gate in front of the review transition
//! - [`ledger`] - Immutable committed orders, append-only
//! - [`export`] - CSV serialization of the ledger
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: File system, network and clock access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are whole baht (i64), never floats
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use orderdesk_core::{Catalog, Cart, ProductId};
//! use orderdesk_core::pricing::Totals;
//!
//! let catalog = Catalog::balanc_water();
//! let mut cart = Cart::new();
//!
//! let row = cart.items()[0].id;
//! cart.set_line_item_product(row, Some(ProductId(1)), &catalog);
//! cart.set_line_item_quantity(row, 4);
//!
//! // 4 × 300 = 1200, at or above the 1000 threshold, so shipping is free
//! let totals = Totals::for_items(cart.items());
//! assert_eq!(totals.subtotal.units(), 1200);
//! assert_eq!(totals.shipping.units(), 0);
//! assert_eq!(totals.total.units(), 1200);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod export;
pub mod ledger;
pub mod money;
pub mod pricing;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use orderdesk_core::Money` instead of
// `use orderdesk_core::money::Money`

pub use cart::{Cart, CustomerField, CustomerInfo, LineItem, LineItemId};
pub use catalog::{Catalog, Product, ProductId};
pub use error::{ExportError, SubmitError};
pub use ledger::{Order, OrderItem, OrderLedger, OrderNumbers};
pub use money::Money;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Subtotal at or above which the shipping fee is waived.
///
/// ## Business Reason
/// "Spend 1,000 baht, we ship for free." The threshold is inclusive:
/// a subtotal of exactly 1000 already qualifies.
pub const FREE_SHIPPING_THRESHOLD: Money = Money::from_units(1000);

/// Flat shipping fee charged below the free-shipping threshold.
///
/// ## Business Reason
/// One courier rate nationwide; there is no weight- or zone-based
/// calculation anywhere in the system.
pub const SHIPPING_FEE: Money = Money::from_units(300);

/// Maximum quantity of a single line item.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g. typing 1000 instead of 10),
/// and keeps every line total comfortably inside i64 range no matter
/// what the operator types.
pub const MAX_LINE_ITEM_QUANTITY: i64 = 999;
