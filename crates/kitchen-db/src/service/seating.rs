//! # Seating Services
//!
//! Tables and table groups.

use kitchen_core::seating::{Table, TableCreate, TableGroup, TableGroupCreate};
use kitchen_core::{CoreError, TableGroupId, TableId};
use sqlx::SqlitePool;
use std::collections::HashMap;
use tracing::info;

use crate::error::ServiceResult;
use crate::repository::{order, table, table_group};

// =============================================================================
// Tables
// =============================================================================

#[derive(Debug, Clone)]
pub struct TableService {
    pool: SqlitePool,
}

impl TableService {
    pub fn new(pool: SqlitePool) -> Self {
        TableService { pool }
    }

    pub async fn create(&self, request: TableCreate) -> ServiceResult<Table> {
        let created = Table::create(request)?;

        let mut conn = self.pool.acquire().await?;
        table::insert(&mut conn, &created).await?;

        info!(id = %created.id(), empty = created.is_empty(), "Table created");
        Ok(created)
    }

    pub async fn list(&self) -> ServiceResult<Vec<Table>> {
        let mut conn = self.pool.acquire().await?;
        Ok(table::list(&mut conn).await?)
    }

    /// Changes the guest count of an ungrouped, occupied table.
    pub async fn set_guest_count(
        &self,
        table_id: TableId,
        number_of_guests: i32,
    ) -> ServiceResult<Table> {
        let mut tx = self.pool.begin().await?;

        let mut found = table::find_by_id(&mut tx, table_id)
            .await?
            .ok_or(CoreError::TableNotFound(table_id))?;
        found.set_guest_count(number_of_guests)?;

        table::update_guest_count(&mut tx, &found).await?;
        tx.commit().await?;

        info!(id = %table_id, guests = number_of_guests, "Guest count changed");
        Ok(found)
    }

    /// Marks an ungrouped table empty or occupied.
    pub async fn set_empty(&self, table_id: TableId, empty: bool) -> ServiceResult<Table> {
        let mut tx = self.pool.begin().await?;

        let mut found = table::find_by_id(&mut tx, table_id)
            .await?
            .ok_or(CoreError::TableNotFound(table_id))?;
        let active = order::has_active_order(&mut tx, &[table_id]).await?;
        found.set_empty(empty, &|_: &[TableId]| active)?;

        table::update_empty(&mut tx, &found).await?;
        tx.commit().await?;

        info!(id = %table_id, empty, "Table empty flag changed");
        Ok(found)
    }
}

// =============================================================================
// Table Groups
// =============================================================================

#[derive(Debug, Clone)]
pub struct TableGroupService {
    pool: SqlitePool,
}

impl TableGroupService {
    pub fn new(pool: SqlitePool) -> Self {
        TableGroupService { pool }
    }

    /// Groups empty, ungrouped tables and marks them occupied.
    pub async fn create(&self, request: TableGroupCreate) -> ServiceResult<TableGroup> {
        let mut tx = self.pool.begin().await?;

        let mut tables: HashMap<TableId, Table> = HashMap::new();
        for table_id in &request.table_ids {
            if let Some(found) = table::find_by_id(&mut tx, *table_id).await? {
                tables.insert(found.id(), found);
            }
        }

        let group = TableGroup::create(request, &|id: TableId| tables.get(&id).cloned())?;

        table_group::insert(&mut tx, &group).await?;
        for member in group.tables() {
            table::assign_group(&mut tx, member.id(), group.id()).await?;
        }
        tx.commit().await?;

        info!(id = %group.id(), tables = group.tables().len(), "Tables grouped");
        Ok(group)
    }

    /// Releases every member table of a group.
    ///
    /// Returns the released tables. Their `empty` flag stays `false`.
    pub async fn ungroup(&self, group_id: TableGroupId) -> ServiceResult<Vec<Table>> {
        let mut tx = self.pool.begin().await?;

        let group = table_group::find_by_id(&mut tx, group_id)
            .await?
            .ok_or(CoreError::TableGroupNotFound(group_id))?;
        let active = order::has_active_order(&mut tx, &group.table_ids()).await?;

        let released = group.ungroup(&|_: &[TableId]| active)?;
        for member in &released {
            table::release_group(&mut tx, member.id(), group_id).await?;
        }
        tx.commit().await?;

        info!(id = %group_id, tables = released.len(), "Table group released");
        Ok(released)
    }

    pub async fn list(&self) -> ServiceResult<Vec<TableGroup>> {
        let mut conn = self.pool.acquire().await?;
        Ok(table_group::list(&mut conn).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DbError, ServiceError};
    use crate::service::test_support::test_db;
    use crate::Database;

    async fn empty_table(db: &Database) -> Table {
        db.tables()
            .create(TableCreate {
                number_of_guests: 0,
                empty: true,
            })
            .await
            .unwrap()
    }

    async fn occupied_table(db: &Database) -> Table {
        db.tables()
            .create(TableCreate {
                number_of_guests: 4,
                empty: false,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_set_guest_count() {
        let db = test_db().await;
        let seated = occupied_table(&db).await;

        let updated = db.tables().set_guest_count(seated.id(), 6).await.unwrap();
        assert_eq!(updated.number_of_guests().value(), 6);

        let stored = db.tables().list().await.unwrap();
        assert_eq!(stored[0].number_of_guests().value(), 6);
    }

    #[tokio::test]
    async fn test_set_guest_count_rejections() {
        let db = test_db().await;
        let seated = occupied_table(&db).await;
        let empty = empty_table(&db).await;

        let err = db.tables().set_guest_count(seated.id(), -1).await.unwrap_err();
        assert!(matches!(err, ServiceError::Domain(CoreError::Validation(_))));

        let err = db.tables().set_guest_count(empty.id(), 2).await.unwrap_err();
        assert!(matches!(err, ServiceError::Domain(CoreError::TableIsEmpty(_))));

        let missing = TableId::new();
        let err = db.tables().set_guest_count(missing, 2).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Domain(CoreError::TableNotFound(id)) if id == missing
        ));
    }

    #[tokio::test]
    async fn test_set_empty() {
        let db = test_db().await;
        let seated = occupied_table(&db).await;

        let updated = db.tables().set_empty(seated.id(), true).await.unwrap();
        assert!(updated.is_empty());
        assert!(db.tables().list().await.unwrap()[0].is_empty());
    }

    #[tokio::test]
    async fn test_group_and_ungroup() {
        let db = test_db().await;
        let first = empty_table(&db).await;
        let second = empty_table(&db).await;

        let group = db
            .table_groups()
            .create(TableGroupCreate {
                table_ids: vec![first.id(), second.id()],
            })
            .await
            .unwrap();
        assert_eq!(group.table_ids(), vec![first.id(), second.id()]);

        let listed = db.table_groups().list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].table_ids(), vec![first.id(), second.id()]);

        for stored in db.tables().list().await.unwrap() {
            assert_eq!(stored.table_group_id(), Some(group.id()));
            assert!(!stored.is_empty());
        }

        let released = db.table_groups().ungroup(group.id()).await.unwrap();
        assert_eq!(released.len(), 2);

        for stored in db.tables().list().await.unwrap() {
            assert_eq!(stored.table_group_id(), None);
            assert!(!stored.is_empty());
        }
    }

    #[tokio::test]
    async fn test_grouped_table_cannot_change() {
        let db = test_db().await;
        let first = empty_table(&db).await;
        let second = empty_table(&db).await;
        db.table_groups()
            .create(TableGroupCreate {
                table_ids: vec![first.id(), second.id()],
            })
            .await
            .unwrap();

        let err = db.tables().set_empty(first.id(), true).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Domain(CoreError::TableAlreadyGrouped(_))
        ));

        let third = empty_table(&db).await;
        let err = db
            .table_groups()
            .create(TableGroupCreate {
                table_ids: vec![first.id(), third.id()],
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Domain(CoreError::TableAlreadyGrouped(_))
        ));
    }

    #[tokio::test]
    async fn test_failed_group_writes_nothing() {
        let db = test_db().await;
        let free = empty_table(&db).await;
        let seated = occupied_table(&db).await;

        let err = db
            .table_groups()
            .create(TableGroupCreate {
                table_ids: vec![free.id(), seated.id()],
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Domain(CoreError::TableNotEmpty(_))));

        assert!(db.table_groups().list().await.unwrap().is_empty());
        let stored = db.tables().list().await.unwrap();
        assert!(stored.iter().all(|t| t.table_group_id().is_none()));
        assert!(stored[0].is_empty());
    }

    #[tokio::test]
    async fn test_ungroup_unknown_group_fails() {
        let db = test_db().await;
        let missing = TableGroupId::new();

        let err = db.table_groups().ungroup(missing).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Domain(CoreError::TableGroupNotFound(id)) if id == missing
        ));
    }

    #[tokio::test]
    async fn test_guarded_update_reports_conflict() {
        let db = test_db().await;
        let first = empty_table(&db).await;
        let second = empty_table(&db).await;

        // Another writer groups the table after this one read it as free.
        let stale = first.clone();
        db.table_groups()
            .create(TableGroupCreate {
                table_ids: vec![first.id(), second.id()],
            })
            .await
            .unwrap();

        let mut conn = db.pool().acquire().await.unwrap();
        let err = table::update_empty(&mut conn, &stale).await.unwrap_err();
        assert!(matches!(err, DbError::Conflict { .. }));

        let err = table::assign_group(&mut conn, stale.id(), TableGroupId::new())
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Conflict { .. }));
    }
}
