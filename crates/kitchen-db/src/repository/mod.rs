//! # Repository Module
//!
//! SQL for every Kitchen POS table.
//!
//! ## Repository Functions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Where SQL Lives                                      │
//! │                                                                         │
//! │  Service (owns the transaction)                                        │
//! │       │                                                                 │
//! │       │  let mut tx = pool.begin().await?;                             │
//! │       │  table::find_by_id(&mut tx, id).await?                         │
//! │       │  table::assign_group(&mut tx, id, group).await?                │
//! │       │  tx.commit().await?                                            │
//! │       ▼                                                                 │
//! │  Repository functions (this module)                                    │
//! │  ├── take `&mut SqliteConnection`, so the same function runs          │
//! │  │   inside a transaction or on a pooled connection                   │
//! │  ├── read rows into `*Record` structs                                  │
//! │  └── turn records back into kitchen-core entities                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Listing functions order by `rowid`, which follows insertion order.
//!
//! ## Available Repositories
//!
//! - [`product`] - Products
//! - [`menu_group`] - Menu groups
//! - [`menu`] - Menus and their line items
//! - [`table`] - Tables, including guarded seating updates
//! - [`table_group`] - Table groups
//! - [`order`] - Orders, their line items, activity checks

pub mod menu;
pub mod menu_group;
pub mod order;
pub mod product;
pub mod table;
pub mod table_group;

use kitchen_core::money::Price;
use kitchen_core::validation::{GuestCount, Name, Quantity};
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::{DbError, DbResult};

// =============================================================================
// Column Decoding
// =============================================================================
// Everything below re-validates stored text on the way out, so a row edited
// outside the services surfaces as DbError::Decode instead of a panic.

pub(crate) fn decode_id<T>(column: &str, value: &str) -> DbResult<T>
where
    T: FromStr<Err = uuid::Error>,
{
    value
        .parse()
        .map_err(|_| DbError::decode(column, value))
}

pub(crate) fn decode_name(column: &str, value: String) -> DbResult<Name> {
    Name::new(value.clone()).map_err(|_| DbError::decode(column, value))
}

pub(crate) fn decode_price(column: &str, value: &str) -> DbResult<Price> {
    Decimal::from_str(value)
        .ok()
        .and_then(|amount| Price::new(amount).ok())
        .ok_or_else(|| DbError::decode(column, value))
}

pub(crate) fn decode_quantity(column: &str, value: i64) -> DbResult<Quantity> {
    Quantity::new(value).map_err(|_| DbError::decode(column, value.to_string()))
}

pub(crate) fn decode_guest_count(column: &str, value: i64) -> DbResult<GuestCount> {
    i32::try_from(value)
        .ok()
        .and_then(|n| GuestCount::new(n).ok())
        .ok_or_else(|| DbError::decode(column, value.to_string()))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use kitchen_core::ProductId;

    #[test]
    fn test_decode_rejects_corrupt_values() {
        assert!(decode_id::<ProductId>("products.id", "not-a-uuid").is_err());
        assert!(decode_price("products.price", "-1").is_err());
        assert!(decode_price("products.price", "abc").is_err());
        assert!(decode_name("products.name", "A".repeat(256)).is_err());
        assert!(decode_name("products.name", String::new()).is_ok());
        assert!(decode_quantity("menu_line_items.quantity", -1).is_err());
        assert!(decode_guest_count("order_tables.number_of_guests", i64::MAX).is_err());
    }

    #[test]
    fn test_price_text_keeps_scale() {
        let price = decode_price("menus.price", "19000.50").unwrap();
        assert_eq!(price.to_string(), "19000.50");
    }
}
