//! PostgreSQL-backed store

use async_trait::async_trait;
use sqlx::PgPool;

use super::repos::{CategoryRepo, QuestionRepo};
use super::{DbError, Mutation, TriviaStore};
use crate::models::{Category, NewQuestion, Question};

/// `TriviaStore` over a sqlx connection pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TriviaStore for PgStore {
    async fn ping(&self) -> Result<(), DbError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn categories(&self) -> Result<Vec<Category>, DbError> {
        CategoryRepo::new(&self.pool).list().await
    }

    async fn category(&self, id: i32) -> Result<Option<Category>, DbError> {
        CategoryRepo::new(&self.pool).get(id).await
    }

    async fn questions(&self) -> Result<Vec<Question>, DbError> {
        QuestionRepo::new(&self.pool).list().await
    }

    async fn questions_in_category(&self, category: i32) -> Result<Vec<Question>, DbError> {
        QuestionRepo::new(&self.pool).list_for_category(category).await
    }

    async fn search_questions(&self, term: &str) -> Result<Vec<Question>, DbError> {
        QuestionRepo::new(&self.pool).search(term).await
    }

    async fn create_question(&self, new: NewQuestion) -> Result<Mutation, DbError> {
        QuestionRepo::new(&self.pool).create(new).await
    }

    async fn delete_question(&self, id: i32) -> Result<Mutation, DbError> {
        QuestionRepo::new(&self.pool).delete(id).await
    }

    async fn quiz_pool(
        &self,
        category: Option<i32>,
        exclude: &[i32],
    ) -> Result<Vec<Question>, DbError> {
        QuestionRepo::new(&self.pool).quiz_pool(category, exclude).await
    }
}
