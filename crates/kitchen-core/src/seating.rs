//! # Seating
//!
//! Tables and table groups.
//!
//! ## Table Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Table Lifecycle                                 │
//! │                                                                         │
//! │  Table::create(guests, empty)        group ref = None                  │
//! │       │                                                                 │
//! │       │  set_guest_count / set_empty   (only while ungrouped)          │
//! │       ▼                                                                 │
//! │  TableGroup::create([t1, t2, ...])   group ref = Some(g), empty = false│
//! │       │                                                                 │
//! │       │  set_guest_count / set_empty → TableAlreadyGrouped             │
//! │       ▼                                                                 │
//! │  TableGroup::ungroup()               group ref = None, empty stays     │
//! │                                      false (not restored)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A group does not own its tables. Membership lives on the table as
//! `table_group_id`; the group only carries the snapshot it was built from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{CoreError, CoreResult};
use crate::lookup::{OrderActivityLookup, TableLookup};
use crate::types::{TableGroupId, TableId};
use crate::validation::GuestCount;
use crate::MIN_TABLES_PER_GROUP;

// =============================================================================
// Table
// =============================================================================

/// Request to register a table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableCreate {
    pub number_of_guests: i32,
    pub empty: bool,
}

/// A physical table in the restaurant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    id: TableId,
    number_of_guests: GuestCount,
    empty: bool,
    table_group_id: Option<TableGroupId>,
}

impl Table {
    /// Creates a standalone table (no group).
    pub fn create(request: TableCreate) -> CoreResult<Self> {
        let number_of_guests = GuestCount::new(request.number_of_guests)?;

        Ok(Table {
            id: TableId::new(),
            number_of_guests,
            empty: request.empty,
            table_group_id: None,
        })
    }

    pub fn restore(
        id: TableId,
        number_of_guests: GuestCount,
        empty: bool,
        table_group_id: Option<TableGroupId>,
    ) -> Self {
        Table {
            id,
            number_of_guests,
            empty,
            table_group_id,
        }
    }

    /// Changes how many guests sit at the table.
    ///
    /// ## Fails When
    /// - the count is negative (`InvalidGuestCount`)
    /// - the table is grouped (`TableAlreadyGrouped`)
    /// - the table is empty (`TableIsEmpty`)
    pub fn set_guest_count(&mut self, number_of_guests: i32) -> CoreResult<()> {
        let number_of_guests = GuestCount::new(number_of_guests)?;
        self.ensure_ungrouped()?;

        if self.empty {
            return Err(CoreError::TableIsEmpty(self.id));
        }

        self.number_of_guests = number_of_guests;
        Ok(())
    }

    /// Marks the table empty or occupied.
    ///
    /// ## Fails When
    /// - the table is grouped (`TableAlreadyGrouped`)
    /// - a COOKING or MEAL order is placed on it (`ActiveOrderPresent`)
    pub fn set_empty(
        &mut self,
        empty: bool,
        orders: &impl OrderActivityLookup,
    ) -> CoreResult<()> {
        self.ensure_ungrouped()?;

        if orders.has_active_order(&[self.id]) {
            return Err(CoreError::ActiveOrderPresent);
        }

        self.empty = empty;
        Ok(())
    }

    fn ensure_ungrouped(&self) -> CoreResult<()> {
        if self.is_grouped() {
            return Err(CoreError::TableAlreadyGrouped(self.id));
        }
        Ok(())
    }

    pub fn id(&self) -> TableId {
        self.id
    }

    pub fn number_of_guests(&self) -> GuestCount {
        self.number_of_guests
    }

    pub fn is_empty(&self) -> bool {
        self.empty
    }

    pub fn table_group_id(&self) -> Option<TableGroupId> {
        self.table_group_id
    }

    pub fn is_grouped(&self) -> bool {
        self.table_group_id.is_some()
    }
}

// =============================================================================
// Table Group
// =============================================================================

/// Request to seat several tables together.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableGroupCreate {
    pub table_ids: Vec<TableId>,
}

/// Two or more tables managed as one seating unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableGroup {
    id: TableGroupId,
    created_date: DateTime<Utc>,
    tables: Vec<Table>,
}

impl TableGroup {
    /// Groups tables.
    ///
    /// ## Checks (in order)
    /// 1. at least 2 ids, all distinct (`InsufficientTables`)
    /// 2. every id resolves (`TableNotFound`)
    /// 3. per table: not grouped yet (`TableAlreadyGrouped`), currently
    ///    empty (`TableNotEmpty`)
    ///
    /// On success each returned table carries the new group id and
    /// `empty = false`, in request order.
    pub fn create(
        request: TableGroupCreate,
        tables: &impl TableLookup,
    ) -> CoreResult<Self> {
        let requested = request.table_ids.len();
        let distinct = request.table_ids.iter().collect::<HashSet<_>>().len();
        if requested < MIN_TABLES_PER_GROUP || distinct != requested {
            return Err(CoreError::InsufficientTables {
                requested,
                distinct,
            });
        }

        let mut members = Vec::with_capacity(requested);
        for table_id in &request.table_ids {
            let table = tables
                .find_table(*table_id)
                .ok_or(CoreError::TableNotFound(*table_id))?;
            members.push(table);
        }

        for table in &members {
            table.ensure_ungrouped()?;
            if !table.empty {
                return Err(CoreError::TableNotEmpty(table.id));
            }
        }

        let id = TableGroupId::new();
        for table in &mut members {
            table.table_group_id = Some(id);
            table.empty = false;
        }

        Ok(TableGroup {
            id,
            created_date: Utc::now(),
            tables: members,
        })
    }

    pub fn restore(id: TableGroupId, created_date: DateTime<Utc>, tables: Vec<Table>) -> Self {
        TableGroup {
            id,
            created_date,
            tables,
        }
    }

    /// Releases every member table.
    ///
    /// Fails with `ActiveOrderPresent` if any member has a COOKING or MEAL
    /// order. The returned tables have no group reference; `empty` keeps the
    /// value grouping gave it.
    pub fn ungroup(self, orders: &impl OrderActivityLookup) -> CoreResult<Vec<Table>> {
        let table_ids = self.table_ids();
        if orders.has_active_order(&table_ids) {
            return Err(CoreError::ActiveOrderPresent);
        }

        let released = self
            .tables
            .into_iter()
            .map(|mut table| {
                table.table_group_id = None;
                table
            })
            .collect();

        Ok(released)
    }

    pub fn id(&self) -> TableGroupId {
        self.id
    }

    pub fn created_date(&self) -> DateTime<Utc> {
        self.created_date
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn table_ids(&self) -> Vec<TableId> {
        self.tables.iter().map(Table::id).collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use std::collections::HashMap;

    fn table(guests: i32, empty: bool) -> Table {
        Table::create(TableCreate {
            number_of_guests: guests,
            empty,
        })
        .unwrap()
    }

    fn index(tables: &[Table]) -> HashMap<TableId, Table> {
        tables.iter().map(|t| (t.id(), t.clone())).collect()
    }

    fn group(tables: &[Table]) -> CoreResult<TableGroup> {
        let by_id = index(tables);
        TableGroup::create(
            TableGroupCreate {
                table_ids: tables.iter().map(Table::id).collect(),
            },
            &|id: TableId| by_id.get(&id).cloned(),
        )
    }

    fn no_orders(_: &[TableId]) -> bool {
        false
    }

    fn cooking(_: &[TableId]) -> bool {
        true
    }

    #[test]
    fn test_table_create() {
        let table = table(4, false);
        assert_eq!(table.number_of_guests().value(), 4);
        assert!(!table.is_empty());
        assert!(!table.is_grouped());
    }

    #[test]
    fn test_table_create_rejects_negative_guests() {
        let err = Table::create(TableCreate {
            number_of_guests: -1,
            empty: true,
        })
        .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::InvalidGuestCount(-1))
        ));
    }

    #[test]
    fn test_set_guest_count() {
        let mut table = table(0, false);
        table.set_guest_count(5).unwrap();
        assert_eq!(table.number_of_guests().value(), 5);

        assert!(table.set_guest_count(-3).is_err());
        assert_eq!(table.number_of_guests().value(), 5);
    }

    #[test]
    fn test_set_guest_count_on_empty_table_fails() {
        let mut table = table(0, true);
        assert!(matches!(
            table.set_guest_count(2),
            Err(CoreError::TableIsEmpty(_))
        ));
    }

    #[test]
    fn test_set_empty() {
        let mut table = table(3, false);
        table.set_empty(true, &no_orders).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_set_empty_with_active_order_fails() {
        let mut table = table(3, false);
        assert!(matches!(
            table.set_empty(true, &cooking),
            Err(CoreError::ActiveOrderPresent)
        ));
        assert!(!table.is_empty());
    }

    #[test]
    fn test_grouped_table_cannot_change() {
        let tables = [table(0, true), table(0, true)];
        let group = group(&tables).unwrap();
        let mut grouped = group.tables()[0].clone();

        assert!(matches!(
            grouped.set_guest_count(4),
            Err(CoreError::TableAlreadyGrouped(_))
        ));
        assert!(matches!(
            grouped.set_empty(true, &no_orders),
            Err(CoreError::TableAlreadyGrouped(_))
        ));
    }

    #[test]
    fn test_group_two_empty_tables() {
        let tables = [table(0, true), table(0, true)];
        let group = group(&tables).unwrap();

        assert_eq!(group.tables().len(), 2);
        assert_eq!(group.table_ids(), vec![tables[0].id(), tables[1].id()]);
        for member in group.tables() {
            assert_eq!(member.table_group_id(), Some(group.id()));
            assert!(!member.is_empty());
        }
    }

    #[test]
    fn test_group_needs_two_distinct_tables() {
        let single = [table(0, true)];
        assert!(matches!(
            group(&single),
            Err(CoreError::InsufficientTables {
                requested: 1,
                distinct: 1
            })
        ));

        let t = table(0, true);
        let by_id = index(&[t.clone()]);
        let err = TableGroup::create(
            TableGroupCreate {
                table_ids: vec![t.id(), t.id()],
            },
            &|id: TableId| by_id.get(&id).cloned(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CoreError::InsufficientTables {
                requested: 2,
                distinct: 1
            }
        ));
    }

    #[test]
    fn test_group_missing_table_fails() {
        let known = table(0, true);
        let missing = TableId::new();
        let by_id = index(&[known.clone()]);

        let err = TableGroup::create(
            TableGroupCreate {
                table_ids: vec![known.id(), missing],
            },
            &|id: TableId| by_id.get(&id).cloned(),
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::TableNotFound(id) if id == missing));
    }

    #[test]
    fn test_group_occupied_table_fails() {
        let tables = [table(0, true), table(2, false)];
        assert!(matches!(
            group(&tables),
            Err(CoreError::TableNotEmpty(id)) if id == tables[1].id()
        ));
    }

    #[test]
    fn test_group_already_grouped_table_fails() {
        let tables = [table(0, true), table(0, true)];
        let first = group(&tables).unwrap();

        let regrouped = [first.tables()[0].clone(), table(0, true)];
        assert!(matches!(
            group(&regrouped),
            Err(CoreError::TableAlreadyGrouped(_))
        ));
    }

    #[test]
    fn test_ungroup_clears_group_and_keeps_empty_false() {
        let tables = [table(0, true), table(0, true)];
        let group = group(&tables).unwrap();

        let released = group.ungroup(&no_orders).unwrap();
        assert_eq!(released.len(), 2);
        for table in &released {
            assert_eq!(table.table_group_id(), None);
            assert!(!table.is_empty());
        }
    }

    #[test]
    fn test_ungroup_with_active_order_fails() {
        let tables = [table(0, true), table(0, true)];
        let group = group(&tables).unwrap();
        let second = tables[1].id();

        let err = group
            .ungroup(&|ids: &[TableId]| ids.contains(&second))
            .unwrap_err();
        assert!(matches!(err, CoreError::ActiveOrderPresent));
    }
}
