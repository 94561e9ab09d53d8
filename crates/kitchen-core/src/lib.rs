//! # kitchen-core: Consistency Rules for Kitchen POS
//!
//! This crate decides whether a catalog, seating or order change is allowed.
//! It holds no data and performs no I/O; references to other entities are
//! resolved through the collaborator traits in [`lookup`].
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Kitchen POS Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Calling layer (HTTP, CLI, tests)                   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ requests                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 kitchen-db services                             │   │
//! │  │    begin tx ──► prefetch ──► rule ──► write ──► commit          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ closures over prefetched rows          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ kitchen-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  catalog  │  │  seating  │  │   order   │  │ validation│  │   │
//! │  │   │  Product  │  │   Table   │  │   Order   │  │ Name, Qty │  │   │
//! │  │   │   Menu    │  │TableGroup │  │  Status   │  │   Price   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Entity identifiers
//! - [`validation`] - Name, Quantity, GuestCount
//! - [`money`] - Price and the menu composition sum
//! - [`catalog`] - Products, menu groups, menus
//! - [`seating`] - Tables and table groups
//! - [`order`] - Orders and the status machine
//! - [`lookup`] - Collaborator traits
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use kitchen_core::catalog::{Product, ProductCreate};
//! use rust_decimal::Decimal;
//!
//! let product = Product::create(ProductCreate {
//!     name: Some("Fried Chicken".to_string()),
//!     price: Some(Decimal::from(16_000)),
//! })
//! .unwrap();
//! assert_eq!(product.price().amount(), Decimal::from(16_000));
//!
//! // A product without a price is rejected.
//! assert!(Product::create(ProductCreate {
//!     name: Some("Free Lunch".to_string()),
//!     price: None,
//! })
//! .is_err());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod lookup;
pub mod money;
pub mod order;
pub mod seating;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ErrorKind, ValidationError};
pub use money::Price;
pub use order::OrderStatus;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Fewest distinct tables a table group may hold.
pub const MIN_TABLES_PER_GROUP: usize = 2;
