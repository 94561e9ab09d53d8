//! # Menu Group Repository

use kitchen_core::catalog::MenuGroup;
use kitchen_core::MenuGroupId;
use sqlx::SqliteConnection;
use tracing::debug;

use super::{decode_id, decode_name};
use crate::error::DbResult;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MenuGroupRecord {
    pub id: String,
    pub name: String,
}

impl MenuGroupRecord {
    pub fn into_menu_group(self) -> DbResult<MenuGroup> {
        Ok(MenuGroup::restore(
            decode_id("menu_groups.id", &self.id)?,
            decode_name("menu_groups.name", self.name)?,
        ))
    }
}

pub async fn insert(conn: &mut SqliteConnection, group: &MenuGroup) -> DbResult<()> {
    debug!(id = %group.id(), name = %group.name(), "Inserting menu group");

    sqlx::query("INSERT INTO menu_groups (id, name) VALUES (?1, ?2)")
        .bind(group.id().to_string())
        .bind(group.name().as_str())
        .execute(&mut *conn)
        .await?;

    Ok(())
}

pub async fn find_by_id(
    conn: &mut SqliteConnection,
    id: MenuGroupId,
) -> DbResult<Option<MenuGroup>> {
    let record: Option<MenuGroupRecord> =
        sqlx::query_as("SELECT id, name FROM menu_groups WHERE id = ?1")
            .bind(id.to_string())
            .fetch_optional(&mut *conn)
            .await?;

    record.map(MenuGroupRecord::into_menu_group).transpose()
}

/// Lists every menu group in insertion order.
pub async fn list(conn: &mut SqliteConnection) -> DbResult<Vec<MenuGroup>> {
    let records: Vec<MenuGroupRecord> =
        sqlx::query_as("SELECT id, name FROM menu_groups ORDER BY rowid")
            .fetch_all(&mut *conn)
            .await?;

    records
        .into_iter()
        .map(MenuGroupRecord::into_menu_group)
        .collect()
}
