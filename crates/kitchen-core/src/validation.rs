//! # Validation Module
//!
//! Self-validating value objects for Kitchen POS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Calling layer                                                │
//! │  └── Deserializes requests (fields may be absent → Option)             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Value objects (THIS MODULE + money::Price)                   │
//! │  ├── Name, Quantity, GuestCount, Price                                 │
//! │  └── Construction is the ONLY way to obtain an instance                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Aggregate rules (catalog, seating, order)                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 4: Database (NOT NULL, FOREIGN KEY, guarded UPDATEs)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kitchen_core::validation::{GuestCount, Name, Quantity};
//!
//! assert!(Name::new("Fried Chicken").is_ok());
//! assert!(Name::new("").is_ok());
//! assert!(Quantity::new(-1).is_err());
//! assert!(GuestCount::new(4).is_ok());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted name, in characters.
pub const MAX_NAME_LENGTH: usize = 255;

// =============================================================================
// Name
// =============================================================================

/// A display name for products, menus and menu groups.
///
/// ## Rules
/// - Must be present (an empty string is a valid name)
/// - At most 255 characters (counted as chars, not bytes)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Name(String);

impl Name {
    /// Creates a name.
    ///
    /// ## Example
    /// ```rust
    /// use kitchen_core::validation::Name;
    ///
    /// assert!(Name::new("Half & Half Chicken").is_ok());
    /// assert!(Name::new("A".repeat(256)).is_err());
    /// ```
    pub fn new(text: impl Into<String>) -> ValidationResult<Self> {
        let text = text.into();

        let length = text.chars().count();
        if length > MAX_NAME_LENGTH {
            return Err(ValidationError::InvalidName {
                reason: format!("{} characters exceeds {}", length, MAX_NAME_LENGTH),
            });
        }

        Ok(Name(text))
    }

    /// Creates a name from an optional value; `None` is rejected.
    pub fn required(text: Option<String>) -> ValidationResult<Self> {
        match text {
            Some(text) => Name::new(text),
            None => Err(ValidationError::InvalidName {
                reason: "name is required".to_string(),
            }),
        }
    }

    /// Returns the name as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Name {
    type Error = ValidationError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        Name::new(text)
    }
}

impl From<Name> for String {
    fn from(name: Name) -> Self {
        name.0
    }
}

// =============================================================================
// Quantity
// =============================================================================

/// How many of a product a menu contains, or of a menu an order contains.
///
/// ## Rules
/// - Must not be negative (zero is accepted)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Quantity(i64);

impl Quantity {
    /// Creates a quantity.
    pub fn new(n: i64) -> ValidationResult<Self> {
        if n < 0 {
            return Err(ValidationError::InvalidQuantity(n));
        }
        Ok(Quantity(n))
    }

    /// Returns the raw value.
    #[inline]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for Quantity {
    type Error = ValidationError;

    fn try_from(n: i64) -> Result<Self, Self::Error> {
        Quantity::new(n)
    }
}

impl From<Quantity> for i64 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

// =============================================================================
// Guest Count
// =============================================================================

/// Number of guests seated at a table.
///
/// ## Rules
/// - Must not be negative (zero is accepted)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct GuestCount(i32);

impl GuestCount {
    /// Creates a guest count.
    pub fn new(n: i32) -> ValidationResult<Self> {
        if n < 0 {
            return Err(ValidationError::InvalidGuestCount(n));
        }
        Ok(GuestCount(n))
    }

    /// Returns the raw value.
    #[inline]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl TryFrom<i32> for GuestCount {
    type Error = ValidationError;

    fn try_from(n: i32) -> Result<Self, Self::Error> {
        GuestCount::new(n)
    }
}

impl From<GuestCount> for i32 {
    fn from(count: GuestCount) -> Self {
        count.0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
