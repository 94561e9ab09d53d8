//! # Order Repository
//!
//! Orders, their line items, and the "is anything still cooking here?"
//! question seating asks before it lets go of a table.

use chrono::{DateTime, Utc};
use kitchen_core::order::{Order, OrderLineItem};
use kitchen_core::{OrderId, OrderStatus, TableId};
use sqlx::SqliteConnection;
use std::collections::HashMap;
use tracing::debug;

use super::{decode_id, decode_quantity};
use crate::error::{DbError, DbResult};

// =============================================================================
// Record Types
// =============================================================================

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OrderRecord {
    pub id: String,
    pub order_table_id: String,
    pub order_status: OrderStatus,
    pub ordered_time: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OrderLineItemRecord {
    pub id: String,
    pub order_id: String,
    pub menu_id: String,
    pub quantity: i64,
}

impl OrderLineItemRecord {
    pub fn into_line_item(self) -> DbResult<OrderLineItem> {
        Ok(OrderLineItem::restore(
            decode_id("order_line_items.id", &self.id)?,
            decode_id("order_line_items.order_id", &self.order_id)?,
            decode_id("order_line_items.menu_id", &self.menu_id)?,
            decode_quantity("order_line_items.quantity", self.quantity)?,
        ))
    }
}

impl OrderRecord {
    pub fn into_order(self, line_items: Vec<OrderLineItem>) -> DbResult<Order> {
        Ok(Order::restore(
            decode_id("orders.id", &self.id)?,
            decode_id("orders.order_table_id", &self.order_table_id)?,
            self.order_status,
            self.ordered_time,
            line_items,
        ))
    }
}

// =============================================================================
// Queries
// =============================================================================

/// Inserts an order and all of its line items.
pub async fn insert(conn: &mut SqliteConnection, order: &Order) -> DbResult<()> {
    debug!(
        id = %order.id(),
        table_id = %order.order_table_id(),
        line_items = order.line_items().len(),
        "Inserting order"
    );

    sqlx::query(
        r#"
        INSERT INTO orders (id, order_table_id, order_status, ordered_time)
        VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(order.id().to_string())
    .bind(order.order_table_id().to_string())
    .bind(order.status())
    .bind(order.ordered_time())
    .execute(&mut *conn)
    .await?;

    for item in order.line_items() {
        sqlx::query(
            r#"
            INSERT INTO order_line_items (id, order_id, menu_id, quantity)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(item.id().to_string())
        .bind(item.order_id().to_string())
        .bind(item.menu_id().to_string())
        .bind(item.quantity().value())
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}

/// Gets an order with its line items.
pub async fn find_by_id(conn: &mut SqliteConnection, id: OrderId) -> DbResult<Option<Order>> {
    let record: Option<OrderRecord> = sqlx::query_as(
        "SELECT id, order_table_id, order_status, ordered_time FROM orders WHERE id = ?1",
    )
    .bind(id.to_string())
    .fetch_optional(&mut *conn)
    .await?;

    let Some(record) = record else {
        return Ok(None);
    };

    let items: Vec<OrderLineItemRecord> = sqlx::query_as(
        r#"
        SELECT id, order_id, menu_id, quantity FROM order_line_items
        WHERE order_id = ?1
        ORDER BY rowid
        "#,
    )
    .bind(id.to_string())
    .fetch_all(&mut *conn)
    .await?;

    let line_items = items
        .into_iter()
        .map(OrderLineItemRecord::into_line_item)
        .collect::<DbResult<Vec<_>>>()?;

    record.into_order(line_items).map(Some)
}

/// Lists every order with its line items, both in insertion order.
pub async fn list(conn: &mut SqliteConnection) -> DbResult<Vec<Order>> {
    let orders: Vec<OrderRecord> = sqlx::query_as(
        "SELECT id, order_table_id, order_status, ordered_time FROM orders ORDER BY rowid",
    )
    .fetch_all(&mut *conn)
    .await?;

    let items: Vec<OrderLineItemRecord> = sqlx::query_as(
        "SELECT id, order_id, menu_id, quantity FROM order_line_items ORDER BY rowid",
    )
    .fetch_all(&mut *conn)
    .await?;

    let mut by_order: HashMap<String, Vec<OrderLineItem>> = HashMap::new();
    for item in items {
        let order_id = item.order_id.clone();
        by_order
            .entry(order_id)
            .or_default()
            .push(item.into_line_item()?);
    }

    orders
        .into_iter()
        .map(|order| {
            let line_items = by_order.remove(&order.id).unwrap_or_default();
            order.into_order(line_items)
        })
        .collect()
}

/// Answers whether any COOKING or MEAL order sits on one of the tables.
pub async fn has_active_order(
    conn: &mut SqliteConnection,
    table_ids: &[TableId],
) -> DbResult<bool> {
    for table_id in table_ids {
        let active: i64 = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM orders
                WHERE order_table_id = ?1 AND order_status IN (?2, ?3)
            )
            "#,
        )
        .bind(table_id.to_string())
        .bind(OrderStatus::Cooking)
        .bind(OrderStatus::Meal)
        .fetch_one(&mut *conn)
        .await?;

        if active != 0 {
            return Ok(true);
        }
    }

    Ok(false)
}

/// Moves an order from `from` to `to`.
///
/// Fails with `DbError::Conflict` if the stored status is no longer `from`.
pub async fn update_status(
    conn: &mut SqliteConnection,
    id: OrderId,
    from: OrderStatus,
    to: OrderStatus,
) -> DbResult<()> {
    debug!(id = %id, %from, %to, "Updating order status");

    let result = sqlx::query(
        "UPDATE orders SET order_status = ?3 WHERE id = ?1 AND order_status = ?2",
    )
    .bind(id.to_string())
    .bind(from)
    .bind(to)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::conflict("Order", id));
    }

    Ok(())
}
