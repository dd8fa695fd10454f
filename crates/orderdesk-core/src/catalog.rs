//! # Catalog Module
//!
//! The static list of purchasable products.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  lookup(product_id) → Some(&Product) | None                             │
//! │                                                                         │
//! │  • Read-only, defined once at session start                             │
//! │  • "Not found" is a NORMAL result, never an error: the cart reacts      │
//! │    by clearing the dependent fields on the row (see cart.rs)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// Identifier of a catalog product.
///
/// A plain small integer: the catalog is a handful of entries keyed the way
/// the order form's dropdown keys them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u32);

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A product available for sale.
///
/// Immutable once the catalog is built. Line items copy `name` and
/// `unit_price` out of here at selection time (snapshot pattern), so a
/// later catalog change can never rewrite an in-progress order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Identifier the order form selects by.
    pub id: ProductId,

    /// Display name shown to the operator and on the exported ledger.
    pub name: String,

    /// Price per unit in whole currency units.
    pub unit_price: Money,
}

// =============================================================================
// Catalog
// =============================================================================

/// Static, read-only product list.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Creates a catalog from a fixed product list.
    pub fn new(products: Vec<Product>) -> Self {
        Catalog { products }
    }

    /// The stock catalog the order form ships with.
    ///
    /// Two pack sizes of the same water brand, both at the same price.
    pub fn balanc_water() -> Self {
        Catalog::new(vec![
            Product {
                id: ProductId(1),
                name: "BALANC 600 ml".to_string(),
                unit_price: Money::from_units(300),
            },
            Product {
                id: ProductId(2),
                name: "BALANC 1500 ml".to_string(),
                unit_price: Money::from_units(300),
            },
        ])
    }

    /// Looks a product up by id.
    ///
    /// ## Returns
    /// `None` when no product carries that id. Callers must treat this as
    /// "no match" and clear dependent fields, not as a failure.
    pub fn lookup(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// All products, in catalog order (for the collaborator's dropdown).
    pub fn all(&self) -> &[Product] {
        &self.products
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_hit() {
        let catalog = Catalog::balanc_water();
        let product = catalog.lookup(ProductId(1)).unwrap();
        assert_eq!(product.name, "BALANC 600 ml");
        assert_eq!(product.unit_price.units(), 300);
    }

    #[test]
    fn test_lookup_miss_is_none_not_error() {
        let catalog = Catalog::balanc_water();
        assert!(catalog.lookup(ProductId(99)).is_none());
    }

    #[test]
    fn test_all_preserves_order() {
        let catalog = Catalog::balanc_water();
        let ids: Vec<u32> = catalog.all().iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
