//! # Services
//!
//! One service per entity. Each write runs in a single SQLite transaction.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Service Write Path                                   │
//! │                                                                         │
//! │  request                                                               │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  let mut tx = pool.begin()                                             │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  prefetch referenced rows through the repositories                     │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  kitchen-core rule, fed with closures over the prefetched rows         │
//! │     │          │                                                        │
//! │     │          └── Err ──► tx dropped ──► ROLLBACK, nothing written     │
//! │     ▼                                                                   │
//! │  INSERT / guarded UPDATE (0 rows matched ──► DbError::Conflict)        │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  tx.commit()                                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//!
//! Rules are checked against the snapshot read inside the transaction.
//! SQLite admits one writer at a time, and every state-dependent UPDATE
//! repeats its precondition in the WHERE clause, so a writer that raced
//! past the check fails with a conflict instead of overwriting.
//!
//! Services never touch the pool while their transaction is open; the
//! in-memory configuration has a single connection.

pub mod catalog;
pub mod order;
pub mod seating;

pub use catalog::{MenuGroupService, MenuService, ProductService};
pub use order::OrderService;
pub use seating::{TableGroupService, TableService};

#[cfg(test)]
pub(crate) mod test_support {
    use crate::{Database, DbConfig};

    pub async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }
}
