//! # Order Service
//!
//! Placing orders and moving them through COOKING → MEAL → COMPLETION.

use kitchen_core::order::{self as rules, Order, OrderCreate};
use kitchen_core::{MenuId, OrderId, TableId};
use sqlx::SqlitePool;
use std::collections::HashSet;
use tracing::info;

use crate::error::ServiceResult;
use crate::repository::{menu, order, table};

#[derive(Debug, Clone)]
pub struct OrderService {
    pool: SqlitePool,
}

impl OrderService {
    pub fn new(pool: SqlitePool) -> Self {
        OrderService { pool }
    }

    /// Places an order on an occupied table.
    ///
    /// The order and its line items are written in one transaction.
    pub async fn create(&self, request: OrderCreate) -> ServiceResult<Order> {
        let mut tx = self.pool.begin().await?;

        let seated = table::find_by_id(&mut tx, request.order_table_id).await?;

        let mut known_menus: HashSet<MenuId> = HashSet::new();
        for item in &request.line_items {
            if menu::exists(&mut tx, item.menu_id).await? {
                known_menus.insert(item.menu_id);
            }
        }

        let placed = Order::create(
            request,
            &|id: TableId| seated.clone().filter(|t| t.id() == id),
            &|id: MenuId| known_menus.contains(&id),
        )?;

        order::insert(&mut tx, &placed).await?;
        tx.commit().await?;

        info!(
            id = %placed.id(),
            table_id = %placed.order_table_id(),
            line_items = placed.line_items().len(),
            "Order placed"
        );
        Ok(placed)
    }

    /// Moves an order to the named status.
    ///
    /// `status` must be `"COOKING"`, `"MEAL"` or `"COMPLETION"` and the
    /// immediate successor of the current status.
    pub async fn change_status(&self, order_id: OrderId, status: &str) -> ServiceResult<Order> {
        let mut tx = self.pool.begin().await?;

        let stored = order::find_by_id(&mut tx, order_id).await?;
        let previous = stored.as_ref().map(Order::status);

        let updated = rules::change_status(order_id, status, &|_: OrderId| stored.clone())?;

        if let Some(previous) = previous {
            order::update_status(&mut tx, order_id, previous, updated.status()).await?;
        }
        tx.commit().await?;

        info!(id = %order_id, status = %updated.status(), "Order status changed");
        Ok(updated)
    }

    pub async fn list(&self) -> ServiceResult<Vec<Order>> {
        let mut conn = self.pool.acquire().await?;
        Ok(order::list(&mut conn).await?)
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
    use kitchen_core::catalog::{
        Menu, MenuCreate, MenuGroupCreate, MenuLineItemRequest, ProductCreate,
    };
    use kitchen_core::order::OrderLineItemRequest;
    use kitchen_core::seating::{Table, TableCreate, TableGroupCreate};
    use kitchen_core::{CoreError, ErrorKind, OrderStatus};
    use rust_decimal::Decimal;

    async fn menu(db: &Database, name: &str) -> Menu {
        let product = db
            .products()
            .create(ProductCreate {
                name: Some(name.to_string()),
                price: Some(Decimal::from(16_000)),
            })
            .await
            .unwrap();
        let group = db
            .menu_groups()
            .create(MenuGroupCreate {
                name: Some("Singles".to_string()),
            })
            .await
            .unwrap();
        db.menus()
            .create(MenuCreate {
                name: Some(name.to_string()),
                price: Some(Decimal::from(16_000)),
                menu_group_id: group.id(),
                line_items: vec![MenuLineItemRequest {
                    product_id: product.id(),
                    quantity: 1,
                }],
            })
            .await
            .unwrap()
    }

    async fn table(db: &Database, empty: bool) -> Table {
        db.tables()
            .create(TableCreate {
                number_of_guests: if empty { 0 } else { 2 },
                empty,
            })
            .await
            .unwrap()
    }

    fn request(table_id: TableId, menus: &[MenuId]) -> OrderCreate {
        OrderCreate {
            order_table_id: table_id,
            line_items: menus
                .iter()
                .map(|menu_id| OrderLineItemRequest {
                    menu_id: *menu_id,
                    quantity: 1,
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_place_order() {
        let db = test_db().await;
        let fried = menu(&db, "Fried").await;
        let seasoned = menu(&db, "Seasoned").await;
        let seated = table(&db, false).await;

        let placed = db
            .orders()
            .create(request(seated.id(), &[fried.id(), seasoned.id()]))
            .await
            .unwrap();
        assert_eq!(placed.status(), OrderStatus::Cooking);

        let listed = db.orders().list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id(), placed.id());
        assert_eq!(listed[0].status(), OrderStatus::Cooking);
        let menus: Vec<MenuId> = listed[0].line_items().iter().map(|l| l.menu_id()).collect();
        assert_eq!(menus, vec![fried.id(), seasoned.id()]);
    }

    #[tokio::test]
    async fn test_rejected_orders_write_nothing() {
        let db = test_db().await;
        let fried = menu(&db, "Fried").await;
        let seated = table(&db, false).await;
        let empty = table(&db, true).await;

        let cases = [
            (request(seated.id(), &[]), "empty"),
            (request(seated.id(), &[fried.id(), fried.id()]), "duplicate"),
            (request(seated.id(), &[MenuId::new()]), "unknown menu"),
            (request(TableId::new(), &[fried.id()]), "unknown table"),
            (request(empty.id(), &[fried.id()]), "empty table"),
        ];

        for (req, case) in cases {
            let err = db.orders().create(req).await.unwrap_err();
            let expected = match case {
                "empty" => matches!(err, ServiceError::Domain(CoreError::EmptyOrder)),
                "duplicate" => matches!(
                    err,
                    ServiceError::Domain(CoreError::DuplicateMenuReference(_))
                ),
                "unknown menu" => matches!(err, ServiceError::Domain(CoreError::MenuNotFound(_))),
                "unknown table" => {
                    matches!(err, ServiceError::Domain(CoreError::TableNotFound(_)))
                }
                _ => matches!(err, ServiceError::Domain(CoreError::TableIsEmpty(_))),
            };
            assert!(expected, "{case}: unexpected {err:?}");
        }

        assert!(db.orders().list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_status_walk() {
        let db = test_db().await;
        let fried = menu(&db, "Fried").await;
        let seated = table(&db, false).await;
        let placed = db
            .orders()
            .create(request(seated.id(), &[fried.id()]))
            .await
            .unwrap();
        let orders = db.orders();

        let err = orders.change_status(placed.id(), "COMPLETION").await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Domain(CoreError::InvalidStatusTransition { .. })
        ));

        let err = orders.change_status(placed.id(), "DONE").await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Domain(CoreError::UnknownOrderStatus(_))
        ));

        orders.change_status(placed.id(), "MEAL").await.unwrap();
        let done = orders.change_status(placed.id(), "COMPLETION").await.unwrap();
        assert_eq!(done.status(), OrderStatus::Completion);

        let err = orders.change_status(placed.id(), "MEAL").await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Domain(CoreError::OrderAlreadyCompleted(_))
        ));
        assert_eq!(err.kind(), ErrorKind::Conflict);

        let stored = orders.list().await.unwrap();
        assert_eq!(stored[0].status(), OrderStatus::Completion);
    }

    #[tokio::test]
    async fn test_change_status_of_unknown_order_fails() {
        let db = test_db().await;
        let missing = OrderId::new();

        let err = db.orders().change_status(missing, "MEAL").await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Domain(CoreError::OrderNotFound(id)) if id == missing
        ));
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_active_order_blocks_ungroup() {
        let db = test_db().await;
        let fried = menu(&db, "Fried").await;
        let first = table(&db, true).await;
        let second = table(&db, true).await;

        let group = db
            .table_groups()
            .create(TableGroupCreate {
                table_ids: vec![first.id(), second.id()],
            })
            .await
            .unwrap();

        // Grouping marked the tables occupied, so an order can be placed.
        let placed = db
            .orders()
            .create(request(first.id(), &[fried.id()]))
            .await
            .unwrap();

        let err = db.table_groups().ungroup(group.id()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Domain(CoreError::ActiveOrderPresent)));

        let still_grouped = db.tables().list().await.unwrap();
        assert!(still_grouped.iter().all(|t| t.table_group_id() == Some(group.id())));

        db.orders().change_status(placed.id(), "MEAL").await.unwrap();
        assert!(db.table_groups().ungroup(group.id()).await.is_err());

        db.orders().change_status(placed.id(), "COMPLETION").await.unwrap();
        assert!(db.table_groups().ungroup(group.id()).await.is_ok());
    }

    #[tokio::test]
    async fn test_active_order_blocks_emptying_table() {
        let db = test_db().await;
        let fried = menu(&db, "Fried").await;
        let seated = table(&db, false).await;
        let placed = db
            .orders()
            .create(request(seated.id(), &[fried.id()]))
            .await
            .unwrap();

        let err = db.tables().set_empty(seated.id(), true).await.unwrap_err();
        assert!(matches!(err, ServiceError::Domain(CoreError::ActiveOrderPresent)));

        db.orders().change_status(placed.id(), "MEAL").await.unwrap();
        db.orders().change_status(placed.id(), "COMPLETION").await.unwrap();
        assert!(db.tables().set_empty(seated.id(), true).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_partial_order_write_rolls_back() {
        let db = test_db().await;
        let seated = table(&db, false).await;

        // The menu check is bypassed, so the order row lands and its line item does not.
        let placed = Order::create(
            request(seated.id(), &[MenuId::new()]),
            &|id: TableId| Some(seated.clone()).filter(|t| t.id() == id),
            &|_: MenuId| true,
        )
        .unwrap();

        {
            let mut tx = db.pool().begin().await.unwrap();
            assert!(order::insert(&mut tx, &placed).await.is_err());
        }

        assert!(db.orders().list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_stale_status_update_reports_conflict() {
        let db = test_db().await;
        let fried = menu(&db, "Fried").await;
        let seated = table(&db, false).await;
        let placed = db
            .orders()
            .create(request(seated.id(), &[fried.id()]))
            .await
            .unwrap();

        db.orders().change_status(placed.id(), "MEAL").await.unwrap();

        // A writer that still believes the order is COOKING loses.
        let mut conn = db.pool().acquire().await.unwrap();
        let err = order::update_status(
            &mut conn,
            placed.id(),
            OrderStatus::Cooking,
            OrderStatus::Meal,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, DbError::Conflict { .. }));
    }
}
