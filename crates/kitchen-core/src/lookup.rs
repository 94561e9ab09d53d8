//! # Collaborator Traits
//!
//! The rules in this crate never load data themselves. Whatever the caller
//! uses as a store (SQLite transaction, in-memory map, test fixture) is
//! handed in through these traits.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Trait                  Answers                       Used by           │
//! │  ─────────────────────  ────────────────────────────  ───────────────── │
//! │  ProductLookup          id → Product?                 Menu::create      │
//! │  MenuGroupLookup        id → MenuGroup?               Menu::create      │
//! │  MenuExistenceCheck     id → bool                     Order::create     │
//! │  TableLookup            id → Table?                   Order, TableGroup │
//! │  OrderActivityLookup    [table ids] → any COOKING/MEAL?  ungroup, Table │
//! │  OrderLookup            id → Order?                   change_status     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every trait is implemented for plain closures, so a lookup can be as
//! small as `|id| products.get(&id).cloned()`.

use crate::catalog::{MenuGroup, Product};
use crate::order::Order;
use crate::seating::Table;
use crate::types::{MenuGroupId, MenuId, OrderId, ProductId, TableId};

/// Resolves products by id.
pub trait ProductLookup {
    fn find_product(&self, id: ProductId) -> Option<Product>;
}

/// Resolves menu groups by id.
pub trait MenuGroupLookup {
    fn find_menu_group(&self, id: MenuGroupId) -> Option<MenuGroup>;
}

/// Answers whether a menu exists.
pub trait MenuExistenceCheck {
    fn menu_exists(&self, id: MenuId) -> bool;
}

/// Resolves tables by id.
pub trait TableLookup {
    fn find_table(&self, id: TableId) -> Option<Table>;
}

/// Answers whether any COOKING or MEAL order is placed on one of the tables.
pub trait OrderActivityLookup {
    fn has_active_order(&self, table_ids: &[TableId]) -> bool;
}

/// Resolves orders by id.
pub trait OrderLookup {
    fn find_order(&self, id: OrderId) -> Option<Order>;
}

impl<F> ProductLookup for F
where
    F: Fn(ProductId) -> Option<Product>,
{
    fn find_product(&self, id: ProductId) -> Option<Product> {
        self(id)
    }
}

impl<F> MenuGroupLookup for F
where
    F: Fn(MenuGroupId) -> Option<MenuGroup>,
{
    fn find_menu_group(&self, id: MenuGroupId) -> Option<MenuGroup> {
        self(id)
    }
}

impl<F> MenuExistenceCheck for F
where
    F: Fn(MenuId) -> bool,
{
    fn menu_exists(&self, id: MenuId) -> bool {
        self(id)
    }
}

impl<F> TableLookup for F
where
    F: Fn(TableId) -> Option<Table>,
{
    fn find_table(&self, id: TableId) -> Option<Table> {
        self(id)
    }
}

impl<F> OrderActivityLookup for F
where
    F: Fn(&[TableId]) -> bool,
{
    fn has_active_order(&self, table_ids: &[TableId]) -> bool {
        self(table_ids)
    }
}

impl<F> OrderLookup for F
where
    F: Fn(OrderId) -> Option<Order>,
{
    fn find_order(&self, id: OrderId) -> Option<Order> {
        self(id)
    }
}
