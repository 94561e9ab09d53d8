//! # Product Repository
//!
//! Database operations for products.
//!
//! Prices are stored as decimal text so the full `0 ≤ p < 10^17` range
//! round-trips exactly.

use kitchen_core::catalog::Product;
use kitchen_core::ProductId;
use sqlx::SqliteConnection;
use tracing::debug;

use super::{decode_id, decode_name, decode_price};
use crate::error::DbResult;

// =============================================================================
// Record Types
// =============================================================================

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    pub price: String,
}

impl ProductRecord {
    pub fn into_product(self) -> DbResult<Product> {
        Ok(Product::restore(
            decode_id("products.id", &self.id)?,
            decode_name("products.name", self.name)?,
            decode_price("products.price", &self.price)?,
        ))
    }
}

// =============================================================================
// Queries
// =============================================================================

/// Inserts a validated product.
pub async fn insert(conn: &mut SqliteConnection, product: &Product) -> DbResult<()> {
    debug!(id = %product.id(), name = %product.name(), "Inserting product");

    sqlx::query("INSERT INTO products (id, name, price) VALUES (?1, ?2, ?3)")
        .bind(product.id().to_string())
        .bind(product.name().as_str())
        .bind(product.price().to_string())
        .execute(&mut *conn)
        .await?;

    Ok(())
}

/// Gets a product by its ID.
///
/// ## Returns
/// * `Ok(Some(Product))` - Product found
/// * `Ok(None)` - Product not found
pub async fn find_by_id(conn: &mut SqliteConnection, id: ProductId) -> DbResult<Option<Product>> {
    let record: Option<ProductRecord> =
        sqlx::query_as("SELECT id, name, price FROM products WHERE id = ?1")
            .bind(id.to_string())
            .fetch_optional(&mut *conn)
            .await?;

    record.map(ProductRecord::into_product).transpose()
}

/// Lists every product in insertion order.
pub async fn list(conn: &mut SqliteConnection) -> DbResult<Vec<Product>> {
    let records: Vec<ProductRecord> =
        sqlx::query_as("SELECT id, name, price FROM products ORDER BY rowid")
            .fetch_all(&mut *conn)
            .await?;

    records.into_iter().map(ProductRecord::into_product).collect()
}
