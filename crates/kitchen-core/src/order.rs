//! # Order Engine
//!
//! Order admission and the forward-only status machine.
//!
//! ## Status Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   ┌─────────┐  next   ┌──────┐  next   ┌────────────┐                  │
//! │   │ COOKING │ ──────► │ MEAL │ ──────► │ COMPLETION │  (terminal)      │
//! │   └─────────┘         └──────┘         └────────────┘                  │
//! │    initial                                                              │
//! │                                                                         │
//! │   COOKING and MEAL are "active": they block ungrouping and emptying   │
//! │   the table the order sits on.                                          │
//! │                                                                         │
//! │   Skipping, staying put, and going back are all rejected.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};
use crate::lookup::{MenuExistenceCheck, OrderLookup, TableLookup};
use crate::types::{MenuId, OrderId, OrderLineItemId, TableId};
use crate::validation::Quantity;

// =============================================================================
// Order Status
// =============================================================================

/// Where an order is in its lifecycle.
///
/// Declaration order is the progression order.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Placed, kitchen is preparing it.
    #[default]
    Cooking,
    /// Served, guests are eating.
    Meal,
    /// Paid and closed.
    Completion,
}

impl OrderStatus {
    /// The only status this one may move to.
    pub const fn next(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Cooking => Some(OrderStatus::Meal),
            OrderStatus::Meal => Some(OrderStatus::Completion),
            OrderStatus::Completion => None,
        }
    }

    /// COOKING or MEAL.
    pub const fn is_active(self) -> bool {
        !matches!(self, OrderStatus::Completion)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Cooking => "COOKING",
            OrderStatus::Meal => "MEAL",
            OrderStatus::Completion => "COMPLETION",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = CoreError;

    /// Exact, case-sensitive match on the three status names.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "COOKING" => Ok(OrderStatus::Cooking),
            "MEAL" => Ok(OrderStatus::Meal),
            "COMPLETION" => Ok(OrderStatus::Completion),
            other => Err(CoreError::UnknownOrderStatus(other.to_string())),
        }
    }
}

// =============================================================================
// Requests
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineItemRequest {
    pub menu_id: MenuId,
    pub quantity: i64,
}

/// Request to place an order on a table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub order_table_id: TableId,
    #[serde(default)]
    pub line_items: Vec<OrderLineItemRequest>,
}

// =============================================================================
// Order Line Item
// =============================================================================

/// A (menu, quantity) pairing within an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderLineItem {
    id: OrderLineItemId,
    order_id: OrderId,
    menu_id: MenuId,
    quantity: Quantity,
}

impl OrderLineItem {
    pub fn restore(
        id: OrderLineItemId,
        order_id: OrderId,
        menu_id: MenuId,
        quantity: Quantity,
    ) -> Self {
        OrderLineItem {
            id,
            order_id,
            menu_id,
            quantity,
        }
    }

    pub fn id(&self) -> OrderLineItemId {
        self.id
    }

    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    pub fn menu_id(&self) -> MenuId {
        self.menu_id
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }
}

// =============================================================================
// Order
// =============================================================================

/// An order placed on a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    id: OrderId,
    order_table_id: TableId,
    status: OrderStatus,
    ordered_time: DateTime<Utc>,
    line_items: Vec<OrderLineItem>,
}

impl Order {
    /// Admits a new order.
    ///
    /// ## Checks (in order)
    /// 1. at least one line item (`EmptyOrder`)
    /// 2. no menu twice (`DuplicateMenuReference`)
    /// 3. every menu exists (`MenuNotFound`)
    /// 4. table exists (`TableNotFound`) and is occupied (`TableIsEmpty`)
    /// 5. quantities are not negative
    ///
    /// The new order starts in COOKING, stamped with the current time.
    pub fn create(
        request: OrderCreate,
        tables: &impl TableLookup,
        menus: &impl MenuExistenceCheck,
    ) -> CoreResult<Self> {
        if request.line_items.is_empty() {
            return Err(CoreError::EmptyOrder);
        }

        let mut seen = HashSet::with_capacity(request.line_items.len());
        for item in &request.line_items {
            if !seen.insert(item.menu_id) {
                return Err(CoreError::DuplicateMenuReference(item.menu_id));
            }
        }

        for item in &request.line_items {
            if !menus.menu_exists(item.menu_id) {
                return Err(CoreError::MenuNotFound(item.menu_id));
            }
        }

        let table = tables
            .find_table(request.order_table_id)
            .ok_or(CoreError::TableNotFound(request.order_table_id))?;
        if table.is_empty() {
            return Err(CoreError::TableIsEmpty(table.id()));
        }

        let id = OrderId::new();
        let line_items = request
            .line_items
            .into_iter()
            .map(|item| -> CoreResult<OrderLineItem> {
                Ok(OrderLineItem {
                    id: OrderLineItemId::new(),
                    order_id: id,
                    menu_id: item.menu_id,
                    quantity: Quantity::new(item.quantity)?,
                })
            })
            .collect::<CoreResult<Vec<_>>>()?;

        Ok(Order {
            id,
            order_table_id: table.id(),
            status: OrderStatus::Cooking,
            ordered_time: Utc::now(),
            line_items,
        })
    }

    pub fn restore(
        id: OrderId,
        order_table_id: TableId,
        status: OrderStatus,
        ordered_time: DateTime<Utc>,
        line_items: Vec<OrderLineItem>,
    ) -> Self {
        Order {
            id,
            order_table_id,
            status,
            ordered_time,
            line_items,
        }
    }

    /// Moves the order to the named status.
    ///
    /// A completed order rejects everything, including unknown names.
    /// Otherwise the name must parse and be the immediate successor.
    pub fn change_status(&mut self, name: &str) -> CoreResult<()> {
        if self.status == OrderStatus::Completion {
            return Err(CoreError::OrderAlreadyCompleted(self.id));
        }

        let requested: OrderStatus = name.parse()?;
        if self.status.next() != Some(requested) {
            return Err(CoreError::InvalidStatusTransition {
                from: self.status,
                to: requested,
            });
        }

        self.status = requested;
        Ok(())
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn order_table_id(&self) -> TableId {
        self.order_table_id
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn ordered_time(&self) -> DateTime<Utc> {
        self.ordered_time
    }

    pub fn line_items(&self) -> &[OrderLineItem] {
        &self.line_items
    }
}

/// Looks the order up and applies [`Order::change_status`].
///
/// Returns the updated order for the caller to persist.
pub fn change_status(
    order_id: OrderId,
    name: &str,
    orders: &impl OrderLookup,
) -> CoreResult<Order> {
    let mut order = orders
        .find_order(order_id)
        .ok_or(CoreError::OrderNotFound(order_id))?;
    order.change_status(name)?;
    Ok(order)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::seating::{Table, TableCreate};

    fn occupied_table() -> Table {
        Table::create(TableCreate {
            number_of_guests: 3,
            empty: false,
        })
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

    fn place(table: &Table, menus: &[MenuId]) -> CoreResult<Order> {
        let known: HashSet<MenuId> = menus.iter().copied().collect();
        Order::create(
            request(table.id(), menus),
            &|id: TableId| (id == table.id()).then(|| table.clone()),
            &|id: MenuId| known.contains(&id),
        )
    }

    fn cooking_order() -> Order {
        place(&occupied_table(), &[MenuId::new()]).unwrap()
    }

    #[test]
    fn test_status_names() {
        assert_eq!("COOKING".parse::<OrderStatus>().unwrap(), OrderStatus::Cooking);
        assert_eq!("MEAL".parse::<OrderStatus>().unwrap(), OrderStatus::Meal);
        assert_eq!(
            "COMPLETION".parse::<OrderStatus>().unwrap(),
            OrderStatus::Completion
        );
        assert!(matches!(
            "cooking".parse::<OrderStatus>(),
            Err(CoreError::UnknownOrderStatus(name)) if name == "cooking"
        ));
        assert_eq!(OrderStatus::Meal.to_string(), "MEAL");
    }

    #[test]
    fn test_status_serde_uses_upper_case_names() {
        let json = serde_json::to_string(&OrderStatus::Completion).unwrap();
        assert_eq!(json, "\"COMPLETION\"");
        let status: OrderStatus = serde_json::from_str("\"MEAL\"").unwrap();
        assert_eq!(status, OrderStatus::Meal);
    }

    #[test]
    fn test_status_progression() {
        assert_eq!(OrderStatus::Cooking.next(), Some(OrderStatus::Meal));
        assert_eq!(OrderStatus::Meal.next(), Some(OrderStatus::Completion));
        assert_eq!(OrderStatus::Completion.next(), None);
        assert_eq!(OrderStatus::default(), OrderStatus::Cooking);

        assert!(OrderStatus::Cooking.is_active());
        assert!(OrderStatus::Meal.is_active());
        assert!(!OrderStatus::Completion.is_active());
    }

    #[test]
    fn test_create_order() {
        let table = occupied_table();
        let menus = [MenuId::new(), MenuId::new()];
        let order = place(&table, &menus).unwrap();

        assert_eq!(order.status(), OrderStatus::Cooking);
        assert_eq!(order.order_table_id(), table.id());
        assert_eq!(order.line_items().len(), 2);
        assert_eq!(order.line_items()[0].menu_id(), menus[0]);
        assert_eq!(order.line_items()[1].menu_id(), menus[1]);
        assert!(order.line_items().iter().all(|l| l.order_id() == order.id()));
    }

    #[test]
    fn test_empty_order_fails() {
        assert!(matches!(
            place(&occupied_table(), &[]),
            Err(CoreError::EmptyOrder)
        ));
    }

    #[test]
    fn test_duplicate_menu_fails_before_anything_else() {
        let menu = MenuId::new();
        // Neither the table nor the menu resolve; the duplicate still wins.
        let err = Order::create(
            request(TableId::new(), &[menu, menu]),
            &|_: TableId| -> Option<Table> { None },
            &|_: MenuId| false,
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::DuplicateMenuReference(id) if id == menu));
    }

    #[test]
    fn test_unknown_menu_fails() {
        let table = occupied_table();
        let known = MenuId::new();
        let unknown = MenuId::new();
        let err = Order::create(
            request(table.id(), &[known, unknown]),
            &|_: TableId| Some(table.clone()),
            &|id: MenuId| id == known,
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::MenuNotFound(id) if id == unknown));
    }

    #[test]
    fn test_unknown_table_fails() {
        let missing = TableId::new();
        let err = Order::create(
            request(missing, &[MenuId::new()]),
            &|_: TableId| -> Option<Table> { None },
            &|_: MenuId| true,
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::TableNotFound(id) if id == missing));
    }

    #[test]
    fn test_empty_table_fails() {
        let table = Table::create(TableCreate {
            number_of_guests: 0,
            empty: true,
        })
        .unwrap();
        assert!(matches!(
            place(&table, &[MenuId::new()]),
            Err(CoreError::TableIsEmpty(_))
        ));
    }

    #[test]
    fn test_negative_quantity_fails() {
        let table = occupied_table();
        let mut req = request(table.id(), &[MenuId::new()]);
        req.line_items[0].quantity = -2;

        let err = Order::create(req, &|_: TableId| Some(table.clone()), &|_: MenuId| true)
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::InvalidQuantity(-2))
        ));
    }

    #[test]
    fn test_status_moves_forward_one_step() {
        let mut order = cooking_order();
        order.change_status("MEAL").unwrap();
        assert_eq!(order.status(), OrderStatus::Meal);
        order.change_status("COMPLETION").unwrap();
        assert_eq!(order.status(), OrderStatus::Completion);
    }

    #[test]
    fn test_status_cannot_skip_stay_or_go_back() {
        let mut order = cooking_order();
        assert!(matches!(
            order.change_status("COMPLETION"),
            Err(CoreError::InvalidStatusTransition {
                from: OrderStatus::Cooking,
                to: OrderStatus::Completion
            })
        ));
        assert!(matches!(
            order.change_status("COOKING"),
            Err(CoreError::InvalidStatusTransition { .. })
        ));

        order.change_status("MEAL").unwrap();
        assert!(matches!(
            order.change_status("COOKING"),
            Err(CoreError::InvalidStatusTransition { .. })
        ));
        assert_eq!(order.status(), OrderStatus::Meal);
    }

    #[test]
    fn test_completed_order_is_frozen() {
        let mut order = cooking_order();
        order.change_status("MEAL").unwrap();
        order.change_status("COMPLETION").unwrap();

        for name in ["COOKING", "MEAL", "COMPLETION", "bogus"] {
            assert!(matches!(
                order.change_status(name),
                Err(CoreError::OrderAlreadyCompleted(_))
            ));
        }
    }

    #[test]
    fn test_unknown_status_name_fails() {
        let mut order = cooking_order();
        assert!(matches!(
            order.change_status("SERVED"),
            Err(CoreError::UnknownOrderStatus(_))
        ));
        assert_eq!(order.status(), OrderStatus::Cooking);
    }

    #[test]
    fn test_change_status_by_id() {
        let order = cooking_order();
        let stored = order.clone();

        let updated = change_status(order.id(), "MEAL", &|id: OrderId| {
            (id == stored.id()).then(|| stored.clone())
        })
        .unwrap();
        assert_eq!(updated.status(), OrderStatus::Meal);

        let missing = OrderId::new();
        assert!(matches!(
            change_status(missing, "MEAL", &|_: OrderId| -> Option<Order> { None }),
            Err(CoreError::OrderNotFound(id)) if id == missing
        ));
    }
}
