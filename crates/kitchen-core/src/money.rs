//! # Money Module
//!
//! Provides the `Price` value object for product and menu prices.
//!
//! ## Why Decimal?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A menu priced at 0.30 built from two products at 0.10 and 0.20 would  │
//! │  be rejected as "more expensive than its parts".                        │
//! │                                                                         │
//! │  OUR SOLUTION: rust_decimal                                             │
//! │    Exact base-10 arithmetic, 28 significant digits.                    │
//! │    Prices go up to 10^17, which does not fit i64 cents.                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kitchen_core::money::Price;
//! use kitchen_core::validation::Quantity;
//! use rust_decimal::Decimal;
//!
//! let price = Price::new(Decimal::new(16_000, 0)).unwrap();
//! let line = price.times(Quantity::new(2).unwrap());
//! assert_eq!(line, Some(Decimal::new(32_000, 0)));
//!
//! assert!(Price::new(Decimal::new(-1, 0)).is_err());
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;
use crate::validation::Quantity;

/// Prices must stay strictly below this amount (10^17).
pub const MAX_PRICE_EXCLUSIVE: i64 = 100_000_000_000_000_000;

// =============================================================================
// Price Type
// =============================================================================

/// A validated, non-negative monetary amount below 10^17.
///
/// ## Where Price is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Product.price ──► × MenuLineItem.quantity ──► Σ composition            │
/// │                                                      │                  │
/// │  Menu.price ─────────────── must be ≤ ───────────────┘                  │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// Creates a price, rejecting negative amounts and amounts ≥ 10^17.
    ///
    /// ## Example
    /// ```rust
    /// use kitchen_core::money::Price;
    /// use rust_decimal::Decimal;
    ///
    /// assert!(Price::new(Decimal::ZERO).is_ok());
    /// assert!(Price::new(Decimal::new(1099, 2)).is_ok()); // 10.99
    /// assert!(Price::new(Decimal::from(100_000_000_000_000_000_i64)).is_err());
    /// ```
    pub fn new(amount: Decimal) -> Result<Self, ValidationError> {
        if amount < Decimal::ZERO {
            return Err(ValidationError::InvalidPrice {
                reason: format!("{} is negative", amount),
            });
        }

        if amount >= Decimal::from(MAX_PRICE_EXCLUSIVE) {
            return Err(ValidationError::InvalidPrice {
                reason: format!("{} is not below 10^17", amount),
            });
        }

        Ok(Price(amount))
    }

    /// Creates a price from an optional amount; `None` is rejected.
    ///
    /// Requests carry prices as `Option<Decimal>` so an omitted field is
    /// distinguishable from zero.
    pub fn required(amount: Option<Decimal>) -> Result<Self, ValidationError> {
        match amount {
            Some(amount) => Price::new(amount),
            None => Err(ValidationError::InvalidPrice {
                reason: "price is required".to_string(),
            }),
        }
    }

    /// Returns the underlying amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Multiplies the price by a quantity.
    ///
    /// Returns `None` only when the product leaves Decimal's range, which
    /// already means "far more than any valid price".
    #[inline]
    pub fn times(&self, quantity: Quantity) -> Option<Decimal> {
        self.0.checked_mul(Decimal::from(quantity.value()))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = ValidationError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Price::new(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

// =============================================================================
// Composition Sum
// =============================================================================

/// Sums `price × quantity` over every pair.
///
/// The whole list is folded before anything is compared. `None` means the
/// sum overflowed Decimal, i.e. it is larger than any representable price.
pub fn composition_total<I>(lines: I) -> Option<Decimal>
where
    I: IntoIterator<Item = (Price, Quantity)>,
{
    lines.into_iter().try_fold(Decimal::ZERO, |acc, (price, quantity)| {
        acc.checked_add(price.times(quantity)?)
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
