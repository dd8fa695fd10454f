//! # Validation Module
//!
//! The gate in front of the Editing → Reviewing transition.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  submit_for_review()                                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_for_review(cart) ← THIS MODULE                                │
//! │       │                                                                 │
//! │       ├── name or phone blank? → Err(MissingCustomerInfo)               │
//! │       │                                                                 │
//! │       ├── any row unresolved?  → Err(IncompleteLineItems)               │
//! │       │                                                                 │
//! │       └── Ok → freeze the review snapshot                               │
//! │                                                                         │
//! │  Checked in this order (customer first), matching the order the         │
//! │  operator fills the form in.                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::cart::Cart;
use crate::error::SubmitError;

/// Checks that a cart is ready to be reviewed.
///
/// ## Rules
/// - Customer name and phone must be non-blank (whitespace-only counts
///   as blank; an operator hitting the spacebar did not enter a name)
/// - Every row must have a resolved product: non-empty name and a
///   positive unit price
///
/// The specific failure kind is returned so the caller can show a
/// targeted message rather than a generic "form invalid" flag.
pub fn validate_for_review(cart: &Cart) -> Result<(), SubmitError> {
    let customer = cart.customer();
    if customer.name.trim().is_empty() || customer.phone.trim().is_empty() {
        return Err(SubmitError::MissingCustomerInfo);
    }

    if cart.items().iter().any(|item| !item.is_complete()) {
        return Err(SubmitError::IncompleteLineItems);
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CustomerField;
    use crate::catalog::{Catalog, ProductId};

    fn filled_cart() -> Cart {
        let catalog = Catalog::balanc_water();
        let mut cart = Cart::new();
        cart.set_customer_field(CustomerField::Name, "Somchai");
        cart.set_customer_field(CustomerField::Phone, "0812345678");
        let id = cart.items()[0].id;
        cart.set_line_item_product(id, Some(ProductId(1)), &catalog);
        cart
    }

    #[test]
    fn test_valid_cart_passes() {
        assert!(validate_for_review(&filled_cart()).is_ok());
    }

    #[test]
    fn test_missing_name_fails_regardless_of_items() {
        let mut cart = filled_cart();
        cart.set_customer_field(CustomerField::Name, "");
        assert_eq!(
            validate_for_review(&cart),
            Err(SubmitError::MissingCustomerInfo)
        );
    }

    #[test]
    fn test_whitespace_name_counts_as_blank() {
        let mut cart = filled_cart();
        cart.set_customer_field(CustomerField::Name, "   ");
        assert_eq!(
            validate_for_review(&cart),
            Err(SubmitError::MissingCustomerInfo)
        );
    }

    #[test]
    fn test_missing_phone_fails() {
        let mut cart = filled_cart();
        cart.set_customer_field(CustomerField::Phone, "");
        assert_eq!(
            validate_for_review(&cart),
            Err(SubmitError::MissingCustomerInfo)
        );
    }

    #[test]
    fn test_incomplete_row_fails_even_with_complete_ones() {
        let mut cart = filled_cart();
        cart.add_line_item(); // left unresolved
        assert_eq!(
            validate_for_review(&cart),
            Err(SubmitError::IncompleteLineItems)
        );
    }

    #[test]
    fn test_customer_check_runs_before_item_check() {
        // Both problems present: the customer message wins
        let mut cart = Cart::new();
        cart.set_customer_field(CustomerField::Phone, "0812345678");
        assert_eq!(
            validate_for_review(&cart),
            Err(SubmitError::MissingCustomerInfo)
        );
    }

    #[test]
    fn test_address_is_optional() {
        let cart = filled_cart();
        assert_eq!(cart.customer().address, "");
        assert!(validate_for_review(&cart).is_ok());
    }
}
