//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Listings are ordered by id
//! - Multi-step writes run in one transaction

pub mod categories;
pub mod questions;

pub use categories::CategoryRepo;
pub use questions::QuestionRepo;
