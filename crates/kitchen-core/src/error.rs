//! # Error Types
//!
//! Domain-specific error types for kitchen-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  kitchen-core errors (this file)                                       │
//! │  ├── CoreError        - Catalog / Seating / Order rule violations      │
//! │  └── ValidationError  - Value-object construction failures             │
//! │                                                                         │
//! │  kitchen-db errors (separate crate)                                    │
//! │  ├── DbError          - Database operation failures                    │
//! │  └── ServiceError     - CoreError or DbError, what services return     │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ServiceError → calling layer      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every failure is deterministic for a given input, so nothing here is
//! retryable. [`CoreError::kind`] collapses the variants into the three
//! categories a caller maps to user-facing responses.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::order::OrderStatus;
use crate::types::{MenuGroupId, MenuId, OrderId, ProductId, TableGroupId, TableId};

// =============================================================================
// Error Kind
// =============================================================================

/// Coarse classification of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request itself is malformed (bad price, empty order, ...).
    InvalidInput,
    /// A referenced entity does not exist.
    NotFound,
    /// The request is well-formed but contradicts the current state.
    Conflict,
    /// Infrastructure failure. Never produced by kitchen-core itself.
    Internal,
}

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Menu group referenced by a menu does not exist.
    #[error("Menu group not found: {0}")]
    MenuGroupNotFound(MenuGroupId),

    /// Product referenced by a menu line item does not exist.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Menu price is higher than what its products are worth together.
    ///
    /// ## User Workflow
    /// ```text
    /// Product "Fried Chicken" 16,000 × 2
    ///      │
    ///      ▼
    /// composition = 32,000
    ///      │
    ///      ▼
    /// Menu price 33,000 > 32,000 → PriceExceedsComposition
    /// ```
    #[error("Menu price {price} exceeds the price of its products ({composition})")]
    PriceExceedsComposition { price: Decimal, composition: Decimal },

    /// Menu referenced by an order line item does not exist.
    #[error("Menu not found: {0}")]
    MenuNotFound(MenuId),

    /// Table does not exist.
    #[error("Table not found: {0}")]
    TableNotFound(TableId),

    /// Table group does not exist.
    #[error("Table group not found: {0}")]
    TableGroupNotFound(TableGroupId),

    /// Table already belongs to a group.
    ///
    /// ## When This Occurs
    /// - Changing guests or the empty flag of a grouped table
    /// - Grouping a table that is already in another group
    #[error("Table {0} already belongs to a table group")]
    TableAlreadyGrouped(TableId),

    /// A group needs at least two distinct tables.
    #[error("A table group needs at least 2 distinct tables, got {distinct} of {requested}")]
    InsufficientTables { requested: usize, distinct: usize },

    /// Only empty tables can be grouped.
    #[error("Table {0} is not empty")]
    TableNotEmpty(TableId),

    /// Orders can only be placed on occupied tables, and guest counts only
    /// changed on them.
    #[error("Table {0} is empty")]
    TableIsEmpty(TableId),

    /// A COOKING or MEAL order still touches the tables.
    #[error("An order is still in progress on the table(s)")]
    ActiveOrderPresent,

    /// Order was submitted without line items.
    #[error("An order needs at least one line item")]
    EmptyOrder,

    /// The same menu appears on two line items of one order.
    #[error("Menu {0} appears more than once in the order")]
    DuplicateMenuReference(MenuId),

    /// Order does not exist.
    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    /// Order reached COMPLETION and can no longer change.
    #[error("Order {0} is already completed")]
    OrderAlreadyCompleted(OrderId),

    /// Requested status is not the immediate successor of the current one.
    #[error("Order status cannot change from {from} to {to}")]
    InvalidStatusTransition { from: OrderStatus, to: OrderStatus },

    /// Status name is not one of COOKING, MEAL, COMPLETION.
    #[error("Unknown order status: '{0}'")]
    UnknownOrderStatus(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Returns the taxonomy bucket for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::Validation(_)
            | CoreError::EmptyOrder
            | CoreError::DuplicateMenuReference(_)
            | CoreError::InsufficientTables { .. }
            | CoreError::UnknownOrderStatus(_) => ErrorKind::InvalidInput,

            CoreError::MenuGroupNotFound(_)
            | CoreError::ProductNotFound(_)
            | CoreError::MenuNotFound(_)
            | CoreError::TableNotFound(_)
            | CoreError::TableGroupNotFound(_)
            | CoreError::OrderNotFound(_) => ErrorKind::NotFound,

            CoreError::PriceExceedsComposition { .. }
            | CoreError::TableAlreadyGrouped(_)
            | CoreError::TableNotEmpty(_)
            | CoreError::TableIsEmpty(_)
            | CoreError::ActiveOrderPresent
            | CoreError::OrderAlreadyCompleted(_)
            | CoreError::InvalidStatusTransition { .. } => ErrorKind::Conflict,
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Value-object construction failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Price is absent, negative, or not below 10^17.
    #[error("Invalid price: {reason}")]
    InvalidPrice { reason: String },

    /// Name is absent, empty, or longer than 255 characters.
    #[error("Invalid name: {reason}")]
    InvalidName { reason: String },

    /// Quantity is negative.
    #[error("Quantity must not be negative, got {0}")]
    InvalidQuantity(i64),

    /// Guest count is negative.
    #[error("Number of guests must not be negative, got {0}")]
    InvalidGuestCount(i32),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
