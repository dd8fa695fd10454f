//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Units                                            │
//! │    Every price in the catalog is a whole number of baht, and every      │
//! │    derived value (line total, subtotal, shipping, grand total) is a     │
//! │    sum or product of whole numbers. There is nothing to round, ever.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use orderdesk_core::money::Money;
//!
//! // Create from whole currency units
//! let price = Money::from_units(300);
//!
//! // Arithmetic operations
//! let line_total = price * 4;                    // 1200
//! let total = line_total + Money::from_units(0); // shipping waived
//! assert_eq!(total.units(), 1200);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in whole currency units (baht).
///
/// ## Design Decisions
/// - **i64 (signed)**: Subtraction is closed; a bug producing a negative
///   value is representable and therefore testable, not silent wraparound
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **`serde(transparent)`**: Serializes as the bare number, which is what
///   both the projections and the CSV columns want
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole currency units.
    ///
    /// ## Example
    /// ```rust
    /// use orderdesk_core::money::Money;
    ///
    /// let price = Money::from_units(300);
    /// assert_eq!(price.units(), 300);
    /// ```
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units)
    }

    /// Returns the value in whole currency units.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use orderdesk_core::money::Money;
    ///
    /// let unit_price = Money::from_units(300);
    /// let line_total = unit_price.multiply_quantity(4);
    /// assert_eq!(line_total.units(), 1200);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money with thousands grouping, e.g. `฿1,200`.
///
/// ## Note
/// This is for logs and the CLI. The CSV export deliberately does NOT use
/// it: numeric columns there are bare integers.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let digits = self.0.abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        write!(f, "{sign}฿{grouped}")
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summation over iterators of Money (subtotals).
impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_units() {
        let money = Money::from_units(300);
        assert_eq!(money.units(), 300);
    }

    #[test]
    fn test_display_grouping() {
        assert_eq!(format!("{}", Money::from_units(300)), "฿300");
        assert_eq!(format!("{}", Money::from_units(1200)), "฿1,200");
        assert_eq!(format!("{}", Money::from_units(1234567)), "฿1,234,567");
        assert_eq!(format!("{}", Money::from_units(0)), "฿0");
        assert_eq!(format!("{}", Money::from_units(-550)), "-฿550");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_units(1000);
        let b = Money::from_units(500);

        assert_eq!((a + b).units(), 1500);
        assert_eq!((a - b).units(), 500);
        assert_eq!((a * 3).units(), 3000);
    }

    #[test]
    fn test_sum() {
        let parts = [Money::from_units(300), Money::from_units(900)];
        let total: Money = parts.iter().copied().sum();
        assert_eq!(total.units(), 1200);
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_units(300);
        assert_eq!(unit_price.multiply_quantity(4).units(), 1200);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());

        let positive = Money::from_units(100);
        assert!(!positive.is_zero());
        assert!(positive.is_positive());
    }
}
