//! # Table Repository
//!
//! Database operations for restaurant tables (`order_tables`).
//!
//! ## Guarded Writes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Every seating UPDATE repeats the rule it was checked against in its   │
//! │  WHERE clause. If another writer got there first, the UPDATE matches   │
//! │  0 rows and the caller gets DbError::Conflict instead of a lost update.│
//! │                                                                         │
//! │  update_guest_count   WHERE table_group_id IS NULL AND empty = 0       │
//! │  update_empty         WHERE table_group_id IS NULL                     │
//! │                         AND no COOKING/MEAL order on the table         │
//! │  assign_group         WHERE table_group_id IS NULL AND empty = 1       │
//! │  release_group        WHERE table_group_id = <group>                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use kitchen_core::seating::Table;
use kitchen_core::{TableGroupId, TableId};
use sqlx::SqliteConnection;
use tracing::debug;

use super::{decode_guest_count, decode_id};
use crate::error::{DbError, DbResult};

const SELECT_TABLE: &str = "SELECT id, table_group_id, number_of_guests, empty FROM order_tables";

// =============================================================================
// Record Types
// =============================================================================

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TableRecord {
    pub id: String,
    pub table_group_id: Option<String>,
    pub number_of_guests: i64,
    pub empty: bool,
}

impl TableRecord {
    pub fn into_table(self) -> DbResult<Table> {
        let table_group_id = self
            .table_group_id
            .as_deref()
            .map(|id| decode_id("order_tables.table_group_id", id))
            .transpose()?;

        Ok(Table::restore(
            decode_id("order_tables.id", &self.id)?,
            decode_guest_count("order_tables.number_of_guests", self.number_of_guests)?,
            self.empty,
            table_group_id,
        ))
    }
}

fn into_tables(records: Vec<TableRecord>) -> DbResult<Vec<Table>> {
    records.into_iter().map(TableRecord::into_table).collect()
}

// =============================================================================
// Queries
// =============================================================================

pub async fn insert(conn: &mut SqliteConnection, table: &Table) -> DbResult<()> {
    debug!(id = %table.id(), empty = table.is_empty(), "Inserting table");

    sqlx::query(
        r#"
        INSERT INTO order_tables (id, table_group_id, number_of_guests, empty)
        VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(table.id().to_string())
    .bind(table.table_group_id().map(|id| id.to_string()))
    .bind(table.number_of_guests().value())
    .bind(table.is_empty())
    .execute(&mut *conn)
    .await?;

    Ok(())
}

pub async fn find_by_id(conn: &mut SqliteConnection, id: TableId) -> DbResult<Option<Table>> {
    let record: Option<TableRecord> = sqlx::query_as(&format!("{SELECT_TABLE} WHERE id = ?1"))
        .bind(id.to_string())
        .fetch_optional(&mut *conn)
        .await?;

    record.map(TableRecord::into_table).transpose()
}

/// Member tables of a group, in insertion order.
pub async fn find_by_group(
    conn: &mut SqliteConnection,
    group_id: TableGroupId,
) -> DbResult<Vec<Table>> {
    let records: Vec<TableRecord> = sqlx::query_as(&format!(
        "{SELECT_TABLE} WHERE table_group_id = ?1 ORDER BY rowid"
    ))
    .bind(group_id.to_string())
    .fetch_all(&mut *conn)
    .await?;

    into_tables(records)
}

/// Lists every table in insertion order.
pub async fn list(conn: &mut SqliteConnection) -> DbResult<Vec<Table>> {
    let records: Vec<TableRecord> = sqlx::query_as(&format!("{SELECT_TABLE} ORDER BY rowid"))
        .fetch_all(&mut *conn)
        .await?;

    into_tables(records)
}

/// Writes a new guest count to an ungrouped, occupied table.
pub async fn update_guest_count(conn: &mut SqliteConnection, table: &Table) -> DbResult<()> {
    debug!(id = %table.id(), guests = table.number_of_guests().value(), "Updating guest count");

    let result = sqlx::query(
        r#"
        UPDATE order_tables SET number_of_guests = ?2
        WHERE id = ?1 AND table_group_id IS NULL AND empty = 0
        "#,
    )
    .bind(table.id().to_string())
    .bind(table.number_of_guests().value())
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::conflict("Table", table.id()));
    }

    Ok(())
}

/// Writes the empty flag of an ungrouped table with no active order.
pub async fn update_empty(conn: &mut SqliteConnection, table: &Table) -> DbResult<()> {
    debug!(id = %table.id(), empty = table.is_empty(), "Updating empty flag");

    let result = sqlx::query(
        r#"
        UPDATE order_tables SET empty = ?2
        WHERE id = ?1
          AND table_group_id IS NULL
          AND NOT EXISTS (
              SELECT 1 FROM orders
              WHERE order_table_id = ?1 AND order_status IN ('COOKING', 'MEAL')
          )
        "#,
    )
    .bind(table.id().to_string())
    .bind(table.is_empty())
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::conflict("Table", table.id()));
    }

    Ok(())
}

/// Puts an empty, ungrouped table into a group and marks it occupied.
pub async fn assign_group(
    conn: &mut SqliteConnection,
    table_id: TableId,
    group_id: TableGroupId,
) -> DbResult<()> {
    let result = sqlx::query(
        r#"
        UPDATE order_tables SET table_group_id = ?2, empty = 0
        WHERE id = ?1 AND table_group_id IS NULL AND empty = 1
        "#,
    )
    .bind(table_id.to_string())
    .bind(group_id.to_string())
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::conflict("Table", table_id));
    }

    Ok(())
}

/// Clears the group reference of a member table. `empty` is left alone.
pub async fn release_group(
    conn: &mut SqliteConnection,
    table_id: TableId,
    group_id: TableGroupId,
) -> DbResult<()> {
    let result = sqlx::query(
        "UPDATE order_tables SET table_group_id = NULL WHERE id = ?1 AND table_group_id = ?2",
    )
    .bind(table_id.to_string())
    .bind(group_id.to_string())
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::conflict("Table", table_id));
    }

    Ok(())
}
