//! # Menu Repository
//!
//! Menus and the line items they own. A menu is always written together
//! with its line items; callers pass a transaction so both land or neither.

use kitchen_core::catalog::{Menu, MenuLineItem};
use kitchen_core::MenuId;
use sqlx::SqliteConnection;
use std::collections::HashMap;
use tracing::debug;

use super::{decode_id, decode_name, decode_price, decode_quantity};
use crate::error::DbResult;

// =============================================================================
// Record Types
// =============================================================================

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MenuRecord {
    pub id: String,
    pub name: String,
    pub price: String,
    pub menu_group_id: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MenuLineItemRecord {
    pub id: String,
    pub menu_id: String,
    pub product_id: String,
    pub quantity: i64,
}

impl MenuLineItemRecord {
    pub fn into_line_item(self) -> DbResult<MenuLineItem> {
        Ok(MenuLineItem::restore(
            decode_id("menu_line_items.id", &self.id)?,
            decode_id("menu_line_items.menu_id", &self.menu_id)?,
            decode_id("menu_line_items.product_id", &self.product_id)?,
            decode_quantity("menu_line_items.quantity", self.quantity)?,
        ))
    }
}

impl MenuRecord {
    pub fn into_menu(self, line_items: Vec<MenuLineItem>) -> DbResult<Menu> {
        Ok(Menu::restore(
            decode_id("menus.id", &self.id)?,
            decode_name("menus.name", self.name)?,
            decode_price("menus.price", &self.price)?,
            decode_id("menus.menu_group_id", &self.menu_group_id)?,
            line_items,
        ))
    }
}

// =============================================================================
// Queries
// =============================================================================

/// Inserts a menu and all of its line items.
pub async fn insert(conn: &mut SqliteConnection, menu: &Menu) -> DbResult<()> {
    debug!(
        id = %menu.id(),
        name = %menu.name(),
        line_items = menu.line_items().len(),
        "Inserting menu"
    );

    sqlx::query("INSERT INTO menus (id, name, price, menu_group_id) VALUES (?1, ?2, ?3, ?4)")
        .bind(menu.id().to_string())
        .bind(menu.name().as_str())
        .bind(menu.price().to_string())
        .bind(menu.menu_group_id().to_string())
        .execute(&mut *conn)
        .await?;

    for item in menu.line_items() {
        sqlx::query(
            r#"
            INSERT INTO menu_line_items (id, menu_id, product_id, quantity)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(item.id().to_string())
        .bind(item.menu_id().to_string())
        .bind(item.product_id().to_string())
        .bind(item.quantity().value())
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}

/// Answers whether a menu with this id exists.
pub async fn exists(conn: &mut SqliteConnection, id: MenuId) -> DbResult<bool> {
    let found: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM menus WHERE id = ?1)")
        .bind(id.to_string())
        .fetch_one(&mut *conn)
        .await?;

    Ok(found != 0)
}

/// Lists every menu with its line items, both in insertion order.
pub async fn list(conn: &mut SqliteConnection) -> DbResult<Vec<Menu>> {
    let menus: Vec<MenuRecord> = sqlx::query_as(
        "SELECT id, name, price, menu_group_id FROM menus ORDER BY rowid",
    )
    .fetch_all(&mut *conn)
    .await?;

    let items: Vec<MenuLineItemRecord> = sqlx::query_as(
        "SELECT id, menu_id, product_id, quantity FROM menu_line_items ORDER BY rowid",
    )
    .fetch_all(&mut *conn)
    .await?;

    let mut by_menu: HashMap<String, Vec<MenuLineItem>> = HashMap::new();
    for item in items {
        let menu_id = item.menu_id.clone();
        by_menu
            .entry(menu_id)
            .or_default()
            .push(item.into_line_item()?);
    }

    menus
        .into_iter()
        .map(|menu| {
            let line_items = by_menu.remove(&menu.id).unwrap_or_default();
            menu.into_menu(line_items)
        })
        .collect()
}
