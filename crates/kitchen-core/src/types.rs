//! # Identifier Types
//!
//! Strongly typed identifiers for every entity.
//!
//! ## Foreign-Key Style References
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     How Entities Refer To Each Other                    │
//! │                                                                         │
//! │  Menu { menu_group_id: MenuGroupId }     ──► MenuGroup                  │
//! │  MenuLineItem { product_id: ProductId }  ──► Product                    │
//! │  Table { table_group_id: Option<..> }    ──► TableGroup                 │
//! │  Order { order_table_id: TableId }       ──► Table                      │
//! │  OrderLineItem { menu_id: MenuId }       ──► Menu                       │
//! │                                                                         │
//! │  No entity holds another entity. References are ids, resolved through  │
//! │  the collaborator traits in `lookup`.                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why UUID v4?
//! Ids are assigned by the domain when an aggregate is created, so a
//! TableGroup can stamp its id onto member tables before anything is
//! written. The store only persists what it is handed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generates a fresh random identifier.
            pub fn new() -> Self {
                $name(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map($name)
            }
        }
    };
}

entity_id!(
    /// Identifies a [`Product`](crate::catalog::Product).
    ProductId
);
entity_id!(
    /// Identifies a [`MenuGroup`](crate::catalog::MenuGroup).
    MenuGroupId
);
entity_id!(
    /// Identifies a [`Menu`](crate::catalog::Menu).
    MenuId
);
entity_id!(
    /// Identifies a [`MenuLineItem`](crate::catalog::MenuLineItem).
    MenuLineItemId
);
entity_id!(
    /// Identifies a [`Table`](crate::seating::Table).
    TableId
);
entity_id!(
    /// Identifies a [`TableGroup`](crate::seating::TableGroup).
    TableGroupId
);
entity_id!(
    /// Identifies an [`Order`](crate::order::Order).
    OrderId
);
entity_id!(
    /// Identifies an [`OrderLineItem`](crate::order::OrderLineItem).
    OrderLineItemId
);

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(TableId::new(), TableId::new());
    }

    #[test]
    fn test_id_parse_roundtrip() {
        let id = MenuId::new();
        let parsed: MenuId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
        assert!("not-a-uuid".parse::<MenuId>().is_err());
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id: ProductId = "550e8400-e29b-41d4-a716-446655440000".parse().unwrap();
        assert_eq!(
            serde_json::to_string(&id).unwrap(),
            "\"550e8400-e29b-41d4-a716-446655440000\""
        );
    }
}
