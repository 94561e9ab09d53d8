//! # Catalog Services
//!
//! Products, menu groups, and menus.

use kitchen_core::catalog::{
    Menu, MenuCreate, MenuGroup, MenuGroupCreate, Product, ProductCreate,
};
use kitchen_core::{MenuGroupId, ProductId};
use sqlx::SqlitePool;
use std::collections::HashMap;
use tracing::info;

use crate::error::ServiceResult;
use crate::repository::{menu, menu_group, product};

// =============================================================================
// Products
// =============================================================================

#[derive(Debug, Clone)]
pub struct ProductService {
    pool: SqlitePool,
}

impl ProductService {
    pub fn new(pool: SqlitePool) -> Self {
        ProductService { pool }
    }

    /// Validates and stores a product.
    pub async fn create(&self, request: ProductCreate) -> ServiceResult<Product> {
        let product = Product::create(request)?;

        let mut conn = self.pool.acquire().await?;
        product::insert(&mut conn, &product).await?;

        info!(id = %product.id(), price = %product.price(), "Product created");
        Ok(product)
    }

    pub async fn list(&self) -> ServiceResult<Vec<Product>> {
        let mut conn = self.pool.acquire().await?;
        Ok(product::list(&mut conn).await?)
    }
}

// =============================================================================
// Menu Groups
// =============================================================================

#[derive(Debug, Clone)]
pub struct MenuGroupService {
    pool: SqlitePool,
}

impl MenuGroupService {
    pub fn new(pool: SqlitePool) -> Self {
        MenuGroupService { pool }
    }

    pub async fn create(&self, request: MenuGroupCreate) -> ServiceResult<MenuGroup> {
        let group = MenuGroup::create(request)?;

        let mut conn = self.pool.acquire().await?;
        menu_group::insert(&mut conn, &group).await?;

        info!(id = %group.id(), name = %group.name(), "Menu group created");
        Ok(group)
    }

    pub async fn list(&self) -> ServiceResult<Vec<MenuGroup>> {
        let mut conn = self.pool.acquire().await?;
        Ok(menu_group::list(&mut conn).await?)
    }
}

// =============================================================================
// Menus
// =============================================================================

#[derive(Debug, Clone)]
pub struct MenuService {
    pool: SqlitePool,
}

impl MenuService {
    pub fn new(pool: SqlitePool) -> Self {
        MenuService { pool }
    }

    /// Validates a menu against the stored catalog and writes it with its
    /// line items in one transaction.
    pub async fn create(&self, request: MenuCreate) -> ServiceResult<Menu> {
        let mut tx = self.pool.begin().await?;

        let group = menu_group::find_by_id(&mut tx, request.menu_group_id).await?;

        let mut products: HashMap<ProductId, Product> = HashMap::new();
        for line in &request.line_items {
            if let Some(found) = product::find_by_id(&mut tx, line.product_id).await? {
                products.insert(found.id(), found);
            }
        }

        let menu = Menu::create(
            request,
            &|id: ProductId| products.get(&id).cloned(),
            &|id: MenuGroupId| group.clone().filter(|g| g.id() == id),
        )?;

        menu::insert(&mut tx, &menu).await?;
        tx.commit().await?;

        info!(
            id = %menu.id(),
            price = %menu.price(),
            line_items = menu.line_items().len(),
            "Menu created"
        );
        Ok(menu)
    }

    pub async fn list(&self) -> ServiceResult<Vec<Menu>> {
        let mut conn = self.pool.acquire().await?;
        Ok(menu::list(&mut conn).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
