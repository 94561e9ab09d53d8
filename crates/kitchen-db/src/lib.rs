//! # kitchen-db: Database Layer for Kitchen POS
//!
//! This crate stores the catalog, seating and orders in SQLite and runs
//! every kitchen-core rule inside a database transaction.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Kitchen POS Data Flow                            │
//! │                                                                         │
//! │  Calling layer (HTTP handler, CLI, seed binary)                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    kitchen-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │   Services    │    │ Repositories │  │   │
//! │  │   │   (pool.rs)   │───►│ ProductSvc    │───►│ product.rs   │  │   │
//! │  │   │               │    │ MenuSvc       │    │ menu.rs      │  │   │
//! │  │   │ SqlitePool    │    │ TableSvc      │    │ table.rs     │  │   │
//! │  │   │ Migrations    │    │ OrderSvc ...  │    │ order.rs ... │  │   │
//! │  │   └───────────────┘    └───────┬───────┘    └──────────────┘  │   │
//! │  │                                │                                │   │
//! │  │                                ▼                                │   │
//! │  │                     kitchen-core rules                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`config`] - kitchen.toml loading and environment overrides
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database and service error types
//! - [`repository`] - SQL per table
//! - [`service`] - Transactional operations per entity
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kitchen_db::{Database, KitchenConfig};
//!
//! let config = KitchenConfig::load(None)?;
//! let db = Database::new(config.db_config()).await?;
//!
//! let tables = db.tables().list().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod service;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{ConfigError, KitchenConfig};
pub use error::{DbError, ServiceError, ServiceResult};
pub use pool::{Database, DbConfig};

// Service re-exports for convenience
pub use service::{
    MenuGroupService, MenuService, OrderService, ProductService, TableGroupService, TableService,
};
