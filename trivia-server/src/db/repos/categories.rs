//! Category repository
//!
//! Categories are read-only from the API; they are created by seeding.

use sqlx::PgPool;

use crate::db::DbError;
use crate::models::Category;

/// Category repository
pub struct CategoryRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all categories ordered by id.
    pub async fn list(&self) -> Result<Vec<Category>, DbError> {
        let categories = sqlx::query_as::<_, Category>("SELECT id, type FROM categories ORDER BY id")
            .fetch_all(self.pool)
            .await?;
        Ok(categories)
    }

    /// Get a single category by id.
    pub async fn get(&self, id: i32) -> Result<Option<Category>, DbError> {
        let category =
            sqlx::query_as::<_, Category>("SELECT id, type FROM categories WHERE id = $1")
                .bind(id)
                .fetch_optional(self.pool)
                .await?;
        Ok(category)
    }
}
