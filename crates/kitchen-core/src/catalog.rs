//! # Catalog
//!
//! Products, menu groups and menus, and the pricing rule that ties them.
//!
//! ## Composition Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Menu Price Composition                             │
//! │                                                                         │
//! │  MenuCreate { price: 19,000, line_items: [...] }                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Resolve every product ──► ProductNotFound?                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Σ product.price × quantity over ALL line items                        │
//! │       │         (exact decimal, folded before comparing)               │
//! │       ▼                                                                 │
//! │  price > Σ ? ──► PriceExceedsComposition                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Menu { id, line_items: [MenuLineItem { menu_id, product_id, qty }] }  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! An empty line-item list has a composition of zero, so it is only
//! accepted for a menu priced at exactly zero.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::lookup::{MenuGroupLookup, ProductLookup};
use crate::money::{composition_total, Price};
use crate::types::{MenuGroupId, MenuId, MenuLineItemId, ProductId};
use crate::validation::{Name, Quantity};

// =============================================================================
// Product
// =============================================================================

/// Request to register a product.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: Option<String>,
    pub price: Option<Decimal>,
}

/// A sellable item. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    id: ProductId,
    name: Name,
    price: Price,
}

impl Product {
    /// Validates the request and assigns a new id.
    pub fn create(request: ProductCreate) -> CoreResult<Self> {
        let name = Name::required(request.name)?;
        let price = Price::required(request.price)?;

        Ok(Product {
            id: ProductId::new(),
            name,
            price,
        })
    }

    /// Rebuilds a product that was already validated and stored.
    pub fn restore(id: ProductId, name: Name, price: Price) -> Self {
        Product { id, name, price }
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn price(&self) -> Price {
        self.price
    }
}

// =============================================================================
// Menu Group
// =============================================================================

/// Request to register a menu group.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuGroupCreate {
    pub name: Option<String>,
}

/// A named category menus belong to ("Set Menus", "Sides", ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuGroup {
    id: MenuGroupId,
    name: Name,
}

impl MenuGroup {
    pub fn create(request: MenuGroupCreate) -> CoreResult<Self> {
        let name = Name::required(request.name)?;
        Ok(MenuGroup {
            id: MenuGroupId::new(),
            name,
        })
    }

    pub fn restore(id: MenuGroupId, name: Name) -> Self {
        MenuGroup { id, name }
    }

    pub fn id(&self) -> MenuGroupId {
        self.id
    }

    pub fn name(&self) -> &Name {
        &self.name
    }
}

// =============================================================================
// Menu
// =============================================================================

/// One `(product, quantity)` pair requested for a new menu.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuLineItemRequest {
    pub product_id: ProductId,
    pub quantity: i64,
}

/// Request to register a menu together with its line items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuCreate {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub menu_group_id: MenuGroupId,
    #[serde(default)]
    pub line_items: Vec<MenuLineItemRequest>,
}

/// A product and how many of it a menu contains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuLineItem {
    id: MenuLineItemId,
    menu_id: MenuId,
    product_id: ProductId,
    quantity: Quantity,
}

impl MenuLineItem {
    pub fn restore(
        id: MenuLineItemId,
        menu_id: MenuId,
        product_id: ProductId,
        quantity: Quantity,
    ) -> Self {
        MenuLineItem {
            id,
            menu_id,
            product_id,
            quantity,
        }
    }

    pub fn id(&self) -> MenuLineItemId {
        self.id
    }

    pub fn menu_id(&self) -> MenuId {
        self.menu_id
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }
}

/// A sellable bundle of products. Owns its line items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Menu {
    id: MenuId,
    name: Name,
    price: Price,
    menu_group_id: MenuGroupId,
    line_items: Vec<MenuLineItem>,
}

impl Menu {
    /// Validates a menu against the catalog.
    ///
    /// ## Checks (in order)
    /// 1. name and price value objects
    /// 2. menu group exists
    /// 3. every product exists, every quantity is non-negative
    /// 4. price ≤ Σ(product.price × quantity)
    ///
    /// Nothing is persisted here. The caller writes the menu and its line
    /// items in one transaction and rolls back if any write fails.
    pub fn create(
        request: MenuCreate,
        products: &impl ProductLookup,
        menu_groups: &impl MenuGroupLookup,
    ) -> CoreResult<Self> {
        let name = Name::required(request.name)?;
        let price = Price::required(request.price)?;

        let menu_group = menu_groups
            .find_menu_group(request.menu_group_id)
            .ok_or(CoreError::MenuGroupNotFound(request.menu_group_id))?;

        let mut priced_lines = Vec::with_capacity(request.line_items.len());
        for line in &request.line_items {
            let product = products
                .find_product(line.product_id)
                .ok_or(CoreError::ProductNotFound(line.product_id))?;
            let quantity = Quantity::new(line.quantity)?;
            priced_lines.push((product, quantity));
        }

        let composition =
            composition_total(priced_lines.iter().map(|(p, q)| (p.price(), *q)));

        // None: the sum left Decimal's range, so no valid price can exceed it
        if let Some(composition) = composition {
            if price.amount() > composition {
                return Err(CoreError::PriceExceedsComposition {
                    price: price.amount(),
                    composition,
                });
            }
        }

        let id = MenuId::new();
        let line_items = priced_lines
            .into_iter()
            .map(|(product, quantity)| MenuLineItem {
                id: MenuLineItemId::new(),
                menu_id: id,
                product_id: product.id(),
                quantity,
            })
            .collect();

        Ok(Menu {
            id,
            name,
            price,
            menu_group_id: menu_group.id(),
            line_items,
        })
    }

    pub fn restore(
        id: MenuId,
        name: Name,
        price: Price,
        menu_group_id: MenuGroupId,
        line_items: Vec<MenuLineItem>,
    ) -> Self {
        Menu {
            id,
            name,
            price,
            menu_group_id,
            line_items,
        }
    }

    pub fn id(&self) -> MenuId {
        self.id
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn menu_group_id(&self) -> MenuGroupId {
        self.menu_group_id
    }

    pub fn line_items(&self) -> &[MenuLineItem] {
        &self.line_items
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
