//! # Pricing Module
//!
//! Pure subtotal / shipping / total math over the current line items.
//!
//! ## The Free-Shipping Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  subtotal  = Σ unit_price × quantity     (incomplete rows add zero)     │
//! │  shipping  = 0    if subtotal ≥ 1000     (threshold INCLUSIVE)          │
//! │            = 300  otherwise              (flat fee, no special cases)   │
//! │  total     = subtotal + shipping                                        │
//! │                                                                         │
//! │  Note the empty cart: subtotal 0 → shipping 300 → total 300.            │
//! │  The rule does not special-case zero; validation upstream prevents      │
//! │  an empty order from ever being committed anyway.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::cart::LineItem;
use crate::money::Money;
use crate::{FREE_SHIPPING_THRESHOLD, SHIPPING_FEE};

/// Sums line totals over all rows, incomplete ones included.
///
/// Incomplete rows carry a zero unit price, so they contribute nothing;
/// including them keeps the function total (no filtering decisions here).
pub fn subtotal(items: &[LineItem]) -> Money {
    items.iter().map(LineItem::line_total).sum()
}

/// Shipping fee for a given subtotal. Zero at or above the threshold.
pub fn shipping(subtotal: Money) -> Money {
    if subtotal >= FREE_SHIPPING_THRESHOLD {
        Money::zero()
    } else {
        SHIPPING_FEE
    }
}

/// Grand total.
pub fn total(subtotal: Money, shipping: Money) -> Money {
    subtotal + shipping
}

// =============================================================================
// Totals
// =============================================================================

/// The three derived money values, computed together so they can never
/// drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub subtotal: Money,
    pub shipping: Money,
    pub total: Money,
}

impl Totals {
    /// Computes all three values from the given rows.
    pub fn for_items(items: &[LineItem]) -> Self {
        let subtotal = subtotal(items);
        let shipping = shipping(subtotal);
        Totals {
            subtotal,
            shipping,
            total: total(subtotal, shipping),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::Cart;
    use crate::catalog::{Catalog, ProductId};
    use proptest::prelude::*;

    fn cart_with(entries: &[(u32, i64)]) -> Cart {
        let catalog = Catalog::balanc_water();
        let mut cart = Cart::new();
        for (i, (pid, qty)) in entries.iter().enumerate() {
            let id = if i == 0 {
                cart.items()[0].id
            } else {
                cart.add_line_item()
            };
            cart.set_line_item_product(id, Some(ProductId(*pid)), &catalog);
            cart.set_line_item_quantity(id, *qty);
        }
        cart
    }

    #[test]
    fn test_shipping_boundary() {
        assert_eq!(shipping(Money::from_units(999)).units(), 300);
        assert_eq!(shipping(Money::from_units(1000)).units(), 0);
        assert_eq!(shipping(Money::from_units(1001)).units(), 0);
    }

    #[test]
    fn test_empty_cart_still_charges_shipping() {
        let cart = Cart::new();
        let totals = Totals::for_items(cart.items());
        assert_eq!(totals.subtotal.units(), 0);
        assert_eq!(totals.shipping.units(), 300);
        assert_eq!(totals.total.units(), 300);
    }

    #[test]
    fn test_subtotal_ignores_incomplete_rows() {
        let mut cart = cart_with(&[(1, 2)]);
        cart.add_line_item(); // never resolved, price 0
        assert_eq!(subtotal(cart.items()).units(), 600);
    }

    #[test]
    fn test_free_shipping_at_threshold() {
        // 4 × 300 = 1200 ≥ 1000
        let cart = cart_with(&[(1, 4)]);
        let totals = Totals::for_items(cart.items());
        assert_eq!(totals.subtotal.units(), 1200);
        assert_eq!(totals.shipping.units(), 0);
        assert_eq!(totals.total.units(), 1200);
    }

    #[test]
    fn test_below_threshold_pays_fee() {
        // 2 × 300 = 600 < 1000
        let cart = cart_with(&[(2, 2)]);
        let totals = Totals::for_items(cart.items());
        assert_eq!(totals.subtotal.units(), 600);
        assert_eq!(totals.shipping.units(), 300);
        assert_eq!(totals.total.units(), 900);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: the subtotal equals the sum of price × quantity and
        /// does not depend on row order.
        #[test]
        fn subtotal_is_order_independent(
            rows in prop::collection::vec((0i64..10_000, 1i64..100), 1..8)
        ) {
            let catalog = Catalog::new(
                rows.iter()
                    .enumerate()
                    .map(|(i, (price, _))| crate::catalog::Product {
                        id: ProductId(i as u32 + 1),
                        name: format!("P{}", i + 1),
                        unit_price: Money::from_units(*price),
                    })
                    .collect(),
            );

            let mut cart = Cart::new();
            for (i, (_, qty)) in rows.iter().enumerate() {
                let id = if i == 0 { cart.items()[0].id } else { cart.add_line_item() };
                cart.set_line_item_product(id, Some(ProductId(i as u32 + 1)), &catalog);
                cart.set_line_item_quantity(id, *qty);
            }

            let expected: i64 = rows.iter().map(|(p, q)| p * q).sum();
            prop_assert_eq!(subtotal(cart.items()).units(), expected);

            // Reversed insertion order produces the same subtotal
            let mut reversed = Cart::new();
            let mut first = true;
            for (i, (_, qty)) in rows.iter().enumerate().rev() {
                let id = if first {
                    first = false;
                    reversed.items()[0].id
                } else {
                    reversed.add_line_item()
                };
                reversed.set_line_item_product(id, Some(ProductId(i as u32 + 1)), &catalog);
                reversed.set_line_item_quantity(id, *qty);
            }
            prop_assert_eq!(subtotal(reversed.items()).units(), expected);
        }

        /// Property: total = subtotal + shipping for any generated cart,
        /// and shipping is 0 exactly when the subtotal reaches 1000.
        #[test]
        fn total_composes_for_generated_carts(sub in 0i64..5_000) {
            let sub = Money::from_units(sub);
            let ship = shipping(sub);
            prop_assert_eq!(total(sub, ship), sub + ship);
            prop_assert_eq!(ship.is_zero(), sub.units() >= 1000);
        }
    }
}
