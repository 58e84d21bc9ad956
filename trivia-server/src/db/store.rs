//! Store seam used by the HTTP handlers
//!
//! Handlers only see `dyn TriviaStore`; PostgreSQL and in-memory backends
//! implement it with the same observable behaviour.

use async_trait::async_trait;

use crate::models::{Category, NewQuestion, Question};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("category {category} does not exist")]
    UnknownCategory { category: i32 },
}

impl DbError {
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }
}

/// Result of a write: the affected id plus the full question listing read
/// inside the same transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutation {
    pub id: i32,
    pub questions: Vec<Question>,
}

/// Persistence operations for questions and categories.
///
/// Every listing is ordered by id ascending.
#[async_trait]
pub trait TriviaStore: Send + Sync + 'static {
    /// Check that the store is reachable.
    async fn ping(&self) -> Result<(), DbError>;

    /// All categories.
    async fn categories(&self) -> Result<Vec<Category>, DbError>;

    /// One category by id.
    async fn category(&self, id: i32) -> Result<Option<Category>, DbError>;

    /// All questions.
    async fn questions(&self) -> Result<Vec<Question>, DbError>;

    /// Questions whose `category` equals `category`.
    async fn questions_in_category(&self, category: i32) -> Result<Vec<Question>, DbError>;

    /// Questions whose text contains `term`, ignoring case. `%` and `_`
    /// match literally.
    async fn search_questions(&self, term: &str) -> Result<Vec<Question>, DbError>;

    /// Insert a question and relist, atomically.
    ///
    /// Fails with `UnknownCategory` when the category does not exist.
    async fn create_question(&self, new: NewQuestion) -> Result<Mutation, DbError>;

    /// Look up, delete and relist, atomically.
    ///
    /// Fails with `NotFound` (and changes nothing) when the id is absent.
    async fn delete_question(&self, id: i32) -> Result<Mutation, DbError>;

    /// Questions in `category` (all when `None`) whose id is not in `exclude`.
    async fn quiz_pool(
        &self,
        category: Option<i32>,
        exclude: &[i32],
    ) -> Result<Vec<Question>, DbError>;
}
