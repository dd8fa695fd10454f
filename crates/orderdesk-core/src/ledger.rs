//! # Ledger Module
//!
//! Immutable committed orders and the append-only ledger that holds them.
//!
//! ## Order Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Order Lifecycle                                      │
//! │                                                                         │
//! │  ReviewSnapshot ──► Order::from_review() ──► OrderLedger::append()      │
//! │                           │                                             │
//! │                           ├── fresh order number (counter-based)        │
//! │                           ├── commit timestamp (injected by caller)     │
//! │                           ├── name-bearing rows only                    │
//! │                           └── totals recomputed, never trusted          │
//! │                                                                         │
//! │  Orders are created ONLY here, never mutated, and live until the        │
//! │  session ends. The ledger exposes no removal operation at all.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cart::{CustomerInfo, LineItem};
use crate::money::Money;
use crate::pricing::Totals;

// =============================================================================
// Order Item
// =============================================================================

/// Frozen copy of one line item at commit time.
///
/// Uses the snapshot pattern: only the fields the ledger needs, detached
/// from row identity and catalog references entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub name: String,
    pub unit_price: Money,
    pub quantity: i64,
}

impl OrderItem {
    /// Line total (unit price × quantity).
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Order
// =============================================================================

/// A finalized order: one entry in the session ledger.
///
/// Immutable once created. Construction goes through [`Order::from_review`]
/// only, which is what upholds the ledger invariants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Internal identity (UUID v4).
    pub id: Uuid,

    /// Business identity, unique within the session, e.g. `ORD-000001`.
    pub order_number: String,

    /// When the order was committed.
    pub created_at: DateTime<Utc>,

    /// Customer info frozen at review time.
    pub customer: CustomerInfo,

    /// Name-bearing line items only, in form order.
    pub items: Vec<OrderItem>,

    /// Subtotal / shipping / total, consistent by construction.
    pub totals: Totals,

    /// Whether a payment slip was attached.
    pub slip_attached: bool,

    /// The slip's display name, or `-` when none was attached.
    pub slip_file_name: String,
}

impl Order {
    /// Builds an order from a frozen review snapshot.
    ///
    /// ## Invariants enforced here
    /// - Rows without a name are dropped, not carried into the ledger
    /// - Totals are recomputed from the full row set; since nameless rows
    ///   carry a zero price this equals the sum over the kept rows
    /// - A missing slip records `slip_attached = false` and the `-`
    ///   placeholder name
    pub fn from_review(
        order_number: String,
        created_at: DateTime<Utc>,
        customer: CustomerInfo,
        items: &[LineItem],
        slip_file_name: Option<String>,
    ) -> Self {
        let totals = Totals::for_items(items);
        let kept = items
            .iter()
            .filter(|item| !item.name.is_empty())
            .map(|item| OrderItem {
                name: item.name.clone(),
                unit_price: item.unit_price,
                quantity: item.quantity,
            })
            .collect();

        let slip_attached = slip_file_name.is_some();
        Order {
            id: Uuid::new_v4(),
            order_number,
            created_at,
            customer,
            items: kept,
            totals,
            slip_attached,
            slip_file_name: slip_file_name.unwrap_or_else(|| "-".to_string()),
        }
    }
}

// =============================================================================
// Order Numbers
// =============================================================================

/// Counter-based order number generator.
///
/// ## Why a counter and not a timestamp?
/// Two commits can land within the same millisecond; a timestamp-derived
/// number cannot guarantee distinctness at that resolution. A counter
/// makes collisions impossible by construction within a session.
#[derive(Debug, Clone)]
pub struct OrderNumbers {
    next: u64,
}

impl OrderNumbers {
    /// Starts the sequence at `ORD-000001`.
    pub fn new() -> Self {
        OrderNumbers { next: 1 }
    }

    /// Issues the next order number.
    pub fn issue(&mut self) -> String {
        let number = format!("ORD-{:06}", self.next);
        self.next += 1;
        number
    }
}

impl Default for OrderNumbers {
    fn default() -> Self {
        OrderNumbers::new()
    }
}

// =============================================================================
// Order Ledger
// =============================================================================

/// Append-only ordered sequence of committed orders.
///
/// Grows for the lifetime of the session; there is deliberately no way to
/// remove or rewrite an entry.
#[derive(Debug, Clone, Default)]
pub struct OrderLedger {
    orders: Vec<Order>,
}

impl OrderLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        OrderLedger { orders: Vec::new() }
    }

    /// Appends a committed order. No failure mode: orders are valid by
    /// construction.
    pub fn append(&mut self, order: Order) {
        self.orders.push(order);
    }

    /// All orders in insertion order.
    pub fn all(&self) -> &[Order] {
        &self.orders
    }

    /// Number of committed orders.
    pub fn count(&self) -> usize {
        self.orders.len()
    }

    /// Whether nothing has been committed yet.
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{Cart, CustomerField};
    use crate::catalog::{Catalog, ProductId};

    fn committed_cart() -> Cart {
        let catalog = Catalog::balanc_water();
        let mut cart = Cart::new();
        cart.set_customer_field(CustomerField::Name, "Somchai");
        cart.set_customer_field(CustomerField::Phone, "0812345678");
        let id = cart.items()[0].id;
        cart.set_line_item_product(id, Some(ProductId(1)), &catalog);
        cart.set_line_item_quantity(id, 4);
        cart
    }

    #[test]
    fn test_from_review_totals_and_items() {
        let cart = committed_cart();
        let order = Order::from_review(
            "ORD-000001".to_string(),
            Utc::now(),
            cart.customer().clone(),
            cart.items(),
            None,
        );

        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].name, "BALANC 600 ml");
        assert_eq!(order.items[0].quantity, 4);
        assert_eq!(order.totals.subtotal.units(), 1200);
        assert_eq!(order.totals.shipping.units(), 0);
        assert_eq!(order.totals.total.units(), 1200);
        assert!(!order.slip_attached);
        assert_eq!(order.slip_file_name, "-");
    }

    #[test]
    fn test_from_review_drops_nameless_rows() {
        let mut cart = committed_cart();
        cart.add_line_item(); // nameless, price 0

        let order = Order::from_review(
            "ORD-000001".to_string(),
            Utc::now(),
            cart.customer().clone(),
            cart.items(),
            Some("slip.jpg".to_string()),
        );

        // The nameless row is excluded but contributed zero anyway
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.totals.subtotal.units(), 1200);
        assert!(order.slip_attached);
        assert_eq!(order.slip_file_name, "slip.jpg");
    }

    #[test]
    fn test_order_numbers_are_distinct() {
        let mut numbers = OrderNumbers::new();
        let a = numbers.issue();
        let b = numbers.issue();
        assert_eq!(a, "ORD-000001");
        assert_eq!(b, "ORD-000002");
        assert_ne!(a, b);
    }

    #[test]
    fn test_ledger_appends_in_order() {
        let cart = committed_cart();
        let mut numbers = OrderNumbers::new();
        let mut ledger = OrderLedger::new();
        assert!(ledger.is_empty());

        for _ in 0..3 {
            ledger.append(Order::from_review(
                numbers.issue(),
                Utc::now(),
                cart.customer().clone(),
                cart.items(),
                None,
            ));
        }

        assert_eq!(ledger.count(), 3);
        let seen: Vec<&str> = ledger.all().iter().map(|o| o.order_number.as_str()).collect();
        assert_eq!(seen, vec!["ORD-000001", "ORD-000002", "ORD-000003"]);
    }
}
