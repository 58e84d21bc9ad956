//! Database layer - store seam, connection pool and repositories
//!
//! # Design Principles
//!
//! - Handlers depend on `TriviaStore`, never on a concrete backend
//! - Connection pool with a small, configurable limit
//! - Transactions for multi-step operations (lookup-then-delete,
//!   insert-then-relist)

pub mod memory;
pub mod migrations;
pub mod pool;
pub mod postgres;
pub mod repos;
pub mod seed;
pub mod store;

pub use memory::MemoryStore;
pub use pool::{create_pool, create_pool_with_options};
pub use postgres::PgStore;
pub use store::{DbError, Mutation, TriviaStore};
pub use sqlx::PgPool;
