//! # Table Group Repository
//!
//! Groups hold no member column of their own; membership is read back from
//! `order_tables.table_group_id`.

use chrono::{DateTime, Utc};
use kitchen_core::seating::{Table, TableGroup};
use kitchen_core::TableGroupId;
use sqlx::SqliteConnection;
use tracing::debug;

use super::{decode_id, table};
use crate::error::DbResult;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TableGroupRecord {
    pub id: String,
    pub created_date: DateTime<Utc>,
}

impl TableGroupRecord {
    pub fn into_table_group(self, tables: Vec<Table>) -> DbResult<TableGroup> {
        Ok(TableGroup::restore(
            decode_id("table_groups.id", &self.id)?,
            self.created_date,
            tables,
        ))
    }
}

/// Inserts the group row only. Members are assigned with
/// [`table::assign_group`].
pub async fn insert(conn: &mut SqliteConnection, group: &TableGroup) -> DbResult<()> {
    debug!(id = %group.id(), tables = group.tables().len(), "Inserting table group");

    sqlx::query("INSERT INTO table_groups (id, created_date) VALUES (?1, ?2)")
        .bind(group.id().to_string())
        .bind(group.created_date())
        .execute(&mut *conn)
        .await?;

    Ok(())
}

/// Gets a group together with its current member tables.
pub async fn find_by_id(
    conn: &mut SqliteConnection,
    id: TableGroupId,
) -> DbResult<Option<TableGroup>> {
    let record: Option<TableGroupRecord> =
        sqlx::query_as("SELECT id, created_date FROM table_groups WHERE id = ?1")
            .bind(id.to_string())
            .fetch_optional(&mut *conn)
            .await?;

    match record {
        Some(record) => {
            let tables = table::find_by_group(conn, id).await?;
            record.into_table_group(tables).map(Some)
        }
        None => Ok(None),
    }
}

/// Lists every group with its current members, in insertion order.
///
/// A group that was ungrouped is still listed, with no members.
pub async fn list(conn: &mut SqliteConnection) -> DbResult<Vec<TableGroup>> {
    let records: Vec<TableGroupRecord> =
        sqlx::query_as("SELECT id, created_date FROM table_groups ORDER BY rowid")
            .fetch_all(&mut *conn)
            .await?;

    let mut groups = Vec::with_capacity(records.len());
    for record in records {
        let id: TableGroupId = decode_id("table_groups.id", &record.id)?;
        let tables = table::find_by_group(conn, id).await?;
        groups.push(record.into_table_group(tables)?);
    }

    Ok(groups)
}
