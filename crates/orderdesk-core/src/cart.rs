//! # Cart Module
//!
//! The in-progress order: editable line items plus customer info.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Form Action               Operation                   State Change     │
//! │  ───────────               ─────────                   ────────────     │
//! │                                                                         │
//! │  Click "+ add row" ──────► add_line_item() ──────────► fresh empty row  │
//! │                                                                         │
//! │  Pick product ───────────► set_line_item_product() ──► resolve/clear    │
//! │                                                                         │
//! │  Type quantity ──────────► set_line_item_quantity() ─► clamp to 1..cap  │
//! │                                                                         │
//! │  Click trash icon ───────► remove_line_item() ───────► unless last row  │
//! │                                                                         │
//! │  Type name/phone/addr ───► set_customer_field() ─────► direct assign    │
//! │                                                                         │
//! │  Save or full reset ─────► reset() ──────────────────► one empty row    │
//! │                                                                         │
//! │  INVARIANTS:                                                            │
//! │  • The cart always holds at least one row (the form needs something     │
//! │    to edit), so removing the last row is a silent no-op                 │
//! │  • Quantity is never below 1 and never above MAX_LINE_ITEM_QUANTITY     │
//! │  • A row with a product reference carries that product's exact name     │
//! │    and price; a row without one carries "" and 0 and blocks submission  │
//! │  • Unknown row ids are no-ops: they only arise from stale references    │
//! │    after a reset, never from live UI state                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::{Catalog, ProductId};
use crate::money::Money;
use crate::MAX_LINE_ITEM_QUANTITY;

// =============================================================================
// Line Item
// =============================================================================

/// Identifier of one cart row.
///
/// ## Why UUID?
/// Row positions shift when rows are removed; the form needs a handle that
/// stays valid across reordering and can never be recycled onto a
/// different row within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineItemId(pub Uuid);

impl LineItemId {
    fn fresh() -> Self {
        LineItemId(Uuid::new_v4())
    }
}

/// One product-and-quantity row within the in-progress order.
///
/// ## Design Notes
/// - `product`: reference back to the catalog entry, or `None` while the
///   operator has not picked anything yet
/// - `name` / `unit_price`: denormalized copies frozen at selection time,
///   so the row stays stable even if the catalog changes later
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Row identifier, stable for the lifetime of the row.
    pub id: LineItemId,

    /// Selected catalog product, if any.
    pub product: Option<ProductId>,

    /// Product name at selection time (frozen). Empty while unselected.
    pub name: String,

    /// Unit price at selection time (frozen). Zero while unselected.
    pub unit_price: Money,

    /// Quantity ordered. Always >= 1.
    pub quantity: i64,
}

impl LineItem {
    /// A fresh empty row: nothing selected, quantity 1.
    fn empty() -> Self {
        LineItem {
            id: LineItemId::fresh(),
            product: None,
            name: String::new(),
            unit_price: Money::zero(),
            quantity: 1,
        }
    }

    /// Whether a product has been resolved onto this row.
    ///
    /// Incomplete rows block submission but still participate in the
    /// subtotal (contributing zero, since their price is zero).
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && self.unit_price.is_positive()
    }

    /// Line total (unit price × quantity).
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Customer Info
// =============================================================================

/// Who the order is for. Name and phone are required before review;
/// address is optional (pickup orders leave it blank).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    pub name: String,
    pub phone: String,
    pub address: String,
}

/// The closed set of customer fields the form can write.
///
/// ## Why an enum instead of `update(field_name, value)`?
/// A stringly-keyed setter would also accept "unitPrice" and friends,
/// silently bypassing product resolution. A closed enum makes the
/// writable surface exactly these three fields, checked at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CustomerField {
    Name,
    Phone,
    Address,
}

// =============================================================================
// Cart
// =============================================================================

/// The editable in-progress order.
///
/// Owned by the session; the presentation layer only ever sees read-only
/// projections of it.
#[derive(Debug, Clone)]
pub struct Cart {
    items: Vec<LineItem>,
    customer: CustomerInfo,
}

impl Cart {
    /// Creates a cart in its initial shape: one empty row, empty customer.
    pub fn new() -> Self {
        Cart {
            items: vec![LineItem::empty()],
            customer: CustomerInfo::default(),
        }
    }

    /// Appends a new empty row and returns its id. Always succeeds.
    pub fn add_line_item(&mut self) -> LineItemId {
        let item = LineItem::empty();
        let id = item.id;
        self.items.push(item);
        id
    }

    /// Removes the row with the given id.
    ///
    /// ## Behavior
    /// - Removing the last remaining row is a no-op (the cart must always
    ///   contain at least one row)
    /// - Unknown ids are a no-op
    ///
    /// ## Returns
    /// `true` if a row was actually removed.
    pub fn remove_line_item(&mut self, id: LineItemId) -> bool {
        if self.items.len() <= 1 {
            return false;
        }
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() < before
    }

    /// Resolves a product selection onto a row.
    ///
    /// ## Behavior
    /// - Catalog hit: freeze the product's name and price onto the row
    /// - Miss, or a cleared selection (`None`): clear reference, name and
    ///   price, leaving quantity untouched
    /// - Unknown row id: no-op
    ///
    /// ## Returns
    /// `true` if a row was touched.
    pub fn set_line_item_product(
        &mut self,
        id: LineItemId,
        product: Option<ProductId>,
        catalog: &Catalog,
    ) -> bool {
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            return false;
        };

        match product.and_then(|pid| catalog.lookup(pid)) {
            Some(found) => {
                item.product = Some(found.id);
                item.name = found.name.clone();
                item.unit_price = found.unit_price;
            }
            None => {
                item.product = None;
                item.name.clear();
                item.unit_price = Money::zero();
            }
        }
        true
    }

    /// Sets a row's quantity, clamping it into `1..=MAX_LINE_ITEM_QUANTITY`.
    ///
    /// The form sends whatever the operator typed; zero, negatives and
    /// unparseable input (which the collaborator maps to 0) all land on 1,
    /// and anything above the cap lands on the cap. The cap also keeps
    /// line totals well inside `i64` range.
    ///
    /// ## Returns
    /// `true` if a row was touched; unknown ids are a no-op.
    pub fn set_line_item_quantity(&mut self, id: LineItemId, quantity: i64) -> bool {
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            return false;
        };
        item.quantity = quantity.clamp(1, MAX_LINE_ITEM_QUANTITY);
        true
    }

    /// Writes one customer field. No validation at this layer; the gate
    /// in front of review is where required-ness is checked.
    pub fn set_customer_field(&mut self, field: CustomerField, value: impl Into<String>) {
        let value = value.into();
        match field {
            CustomerField::Name => self.customer.name = value,
            CustomerField::Phone => self.customer.phone = value,
            CustomerField::Address => self.customer.address = value,
        }
    }

    /// Replaces the whole cart with the initial shape.
    ///
    /// This is the terminal transition back to the initial editing state
    /// after a commit or a full form reset.
    pub fn reset(&mut self) {
        *self = Cart::new();
    }

    /// The current rows, in form order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// The current customer info.
    pub fn customer(&self) -> &CustomerInfo {
        &self.customer
    }

    /// Number of rows (always >= 1).
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false: a cart never has fewer than one row.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
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

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::balanc_water()
    }

    #[test]
    fn test_new_cart_has_one_empty_row() {
        let cart = Cart::new();
        assert_eq!(cart.len(), 1);
        let row = &cart.items()[0];
        assert!(row.product.is_none());
        assert_eq!(row.name, "");
        assert!(row.unit_price.is_zero());
        assert_eq!(row.quantity, 1);
    }

    #[test]
    fn test_add_line_item_always_succeeds() {
        let mut cart = Cart::new();
        let id = cart.add_line_item();
        assert_eq!(cart.len(), 2);
        assert!(cart.items().iter().any(|item| item.id == id));
    }

    #[test]
    fn test_remove_last_row_is_noop() {
        let mut cart = Cart::new();
        let id = cart.items()[0].id;
        assert!(!cart.remove_line_item(id));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_remove_with_multiple_rows() {
        let mut cart = Cart::new();
        let second = cart.add_line_item();
        assert!(cart.remove_line_item(second));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut cart = Cart::new();
        cart.add_line_item();
        assert!(!cart.remove_line_item(LineItemId::fresh()));
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_set_product_resolves_snapshot() {
        let mut cart = Cart::new();
        let id = cart.items()[0].id;
        cart.set_line_item_quantity(id, 3);

        assert!(cart.set_line_item_product(id, Some(ProductId(1)), &catalog()));

        let row = &cart.items()[0];
        assert_eq!(row.product, Some(ProductId(1)));
        assert_eq!(row.name, "BALANC 600 ml");
        assert_eq!(row.unit_price.units(), 300);
        // Quantity untouched by product resolution
        assert_eq!(row.quantity, 3);
        assert!(row.is_complete());
    }

    #[test]
    fn test_set_product_miss_clears_fields() {
        let mut cart = Cart::new();
        let id = cart.items()[0].id;
        cart.set_line_item_product(id, Some(ProductId(1)), &catalog());
        cart.set_line_item_quantity(id, 5);

        // Unknown product id clears the row but keeps the quantity
        cart.set_line_item_product(id, Some(ProductId(99)), &catalog());

        let row = &cart.items()[0];
        assert!(row.product.is_none());
        assert_eq!(row.name, "");
        assert!(row.unit_price.is_zero());
        assert_eq!(row.quantity, 5);
        assert!(!row.is_complete());
    }

    #[test]
    fn test_set_product_cleared_selection() {
        let mut cart = Cart::new();
        let id = cart.items()[0].id;
        cart.set_line_item_product(id, Some(ProductId(2)), &catalog());

        cart.set_line_item_product(id, None, &catalog());
        assert!(!cart.items()[0].is_complete());
    }

    #[test]
    fn test_set_product_unknown_row_is_noop() {
        let mut cart = Cart::new();
        assert!(!cart.set_line_item_product(LineItemId::fresh(), Some(ProductId(1)), &catalog()));
    }

    #[test]
    fn test_quantity_clamped_to_one() {
        let mut cart = Cart::new();
        let id = cart.items()[0].id;

        cart.set_line_item_quantity(id, 0);
        assert_eq!(cart.items()[0].quantity, 1);

        cart.set_line_item_quantity(id, -7);
        assert_eq!(cart.items()[0].quantity, 1);

        cart.set_line_item_quantity(id, 12);
        assert_eq!(cart.items()[0].quantity, 12);
    }

    #[test]
    fn test_quantity_clamped_to_cap() {
        let mut cart = Cart::new();
        let id = cart.items()[0].id;
        cart.set_line_item_product(id, Some(ProductId(1)), &catalog());

        cart.set_line_item_quantity(id, i64::MAX);
        assert_eq!(cart.items()[0].quantity, crate::MAX_LINE_ITEM_QUANTITY);
        // Line total stays well inside i64 range at the cap
        assert_eq!(cart.items()[0].line_total().units(), 300 * crate::MAX_LINE_ITEM_QUANTITY);
    }

    #[test]
    fn test_set_customer_fields() {
        let mut cart = Cart::new();
        cart.set_customer_field(CustomerField::Name, "Somchai");
        cart.set_customer_field(CustomerField::Phone, "0812345678");
        cart.set_customer_field(CustomerField::Address, "Bangkok");

        assert_eq!(cart.customer().name, "Somchai");
        assert_eq!(cart.customer().phone, "0812345678");
        assert_eq!(cart.customer().address, "Bangkok");
    }

    #[test]
    fn test_reset_restores_initial_shape() {
        let mut cart = Cart::new();
        let id = cart.items()[0].id;
        cart.set_line_item_product(id, Some(ProductId(1)), &catalog());
        cart.add_line_item();
        cart.set_customer_field(CustomerField::Name, "Somchai");

        cart.reset();

        assert_eq!(cart.len(), 1);
        assert!(!cart.items()[0].is_complete());
        assert_eq!(cart.customer().name, "");
        // Reset issues a fresh row id; the old handle is stale
        assert!(!cart.set_line_item_quantity(id, 2));
    }
}
