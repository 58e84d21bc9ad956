//! Question repository
//!
//! Writes run in a transaction that also re-reads the listing, so callers
//! never observe a listing from before their own insert or delete.

use sqlx::{PgExecutor, PgPool};

use crate::db::{DbError, Mutation};
use crate::models::{NewQuestion, Question};

/// Question repository
pub struct QuestionRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> QuestionRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all questions ordered by id.
    pub async fn list(&self) -> Result<Vec<Question>, DbError> {
        Ok(list_all(self.pool).await?)
    }

    /// List questions of one category.
    pub async fn list_for_category(&self, category: i32) -> Result<Vec<Question>, DbError> {
        let questions = sqlx::query_as::<_, Question>(
            r#"
            SELECT id, question, answer, category, difficulty
            FROM questions
            WHERE category = $1
            ORDER BY id
            "#,
        )
        .bind(category)
        .fetch_all(self.pool)
        .await?;
        Ok(questions)
    }

    /// Case-insensitive substring search over question text.
    pub async fn search(&self, term: &str) -> Result<Vec<Question>, DbError> {
        let questions = sqlx::query_as::<_, Question>(
            r#"
            SELECT id, question, answer, category, difficulty
            FROM questions
            WHERE question ILIKE '%' || $1 || '%' ESCAPE '\'
            ORDER BY id
            "#,
        )
        .bind(escape_like(term))
        .fetch_all(self.pool)
        .await?;
        Ok(questions)
    }

    /// Insert a question and re-read the listing (atomic).
    pub async fn create(&self, new: NewQuestion) -> Result<Mutation, DbError> {
        let mut tx = self.pool.begin().await?;

        let (id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO questions (question, answer, category, difficulty)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(new.question())
        .bind(new.answer())
        .bind(new.category())
        .bind(new.difficulty())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            let fk_violation =
                matches!(&e, sqlx::Error::Database(db) if db.is_foreign_key_violation());
            if fk_violation {
                DbError::UnknownCategory {
                    category: new.category(),
                }
            } else {
                DbError::from(e)
            }
        })?;

        let questions = list_all(&mut *tx).await?;
        tx.commit().await?;

        tracing::debug!(id, "question created");
        Ok(Mutation { id, questions })
    }

    /// Look up and delete a question, then re-read the listing (atomic).
    pub async fn delete(&self, id: i32) -> Result<Mutation, DbError> {
        let mut tx = self.pool.begin().await?;

        let existing: Option<(i32,)> =
            sqlx::query_as("SELECT id FROM questions WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        if existing.is_none() {
            // Dropping the transaction rolls it back
            return Err(DbError::not_found("question", id));
        }

        sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let questions = list_all(&mut *tx).await?;
        tx.commit().await?;

        tracing::debug!(id, "question deleted");
        Ok(Mutation { id, questions })
    }

    /// Questions eligible for a quiz round.
    ///
    /// Category and exclusion filters are applied in a single query.
    pub async fn quiz_pool(
        &self,
        category: Option<i32>,
        exclude: &[i32],
    ) -> Result<Vec<Question>, DbError> {
        let questions = sqlx::query_as::<_, Question>(
            r#"
            SELECT id, question, answer, category, difficulty
            FROM questions
            WHERE ($1::INTEGER IS NULL OR category = $1)
              AND NOT (id = ANY($2))
            ORDER BY id
            "#,
        )
        .bind(category)
        .bind(exclude)
        .fetch_all(self.pool)
        .await?;
        Ok(questions)
    }
}

async fn list_all<'e, E>(executor: E) -> Result<Vec<Question>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Question>(
        "SELECT id, question, answer, category, difficulty FROM questions ORDER BY id",
    )
    .fetch_all(executor)
    .await
}

/// Escape LIKE wildcards so the term matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, migrations, seed};

    #[test]
    fn escapes_wildcards() {
        assert_eq!(escape_like("100%"), r"100\%");
        assert_eq!(escape_like("snake_case"), r"snake\_case");
        assert_eq!(escape_like(r"a\b"), r"a\\b");
        assert_eq!(escape_like("plain"), "plain");
    }

    async fn seeded_pool() -> PgPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");
        migrations::run(&pool).await.expect("migrations failed");
        seed::run(&pool).await.expect("seed failed");
        pool
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn create_then_delete_round_trip() {
        let pool = seeded_pool().await;
        let repo = QuestionRepo::new(&pool);
        let before = repo.list().await.expect("list failed").len();

        let new = NewQuestion::new("Repo test question?", "Yes", 1, 2).expect("valid question");
        let created = repo.create(new).await.expect("create failed");
        assert_eq!(created.questions.len(), before + 1);
        assert!(created.questions.iter().any(|q| q.id == created.id));

        let deleted = repo.delete(created.id).await.expect("delete failed");
        assert_eq!(deleted.questions.len(), before);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn create_with_unknown_category_is_rejected() {
        let pool = seeded_pool().await;
        let new = NewQuestion::new("Orphan?", "Yes", 9_999, 1).expect("valid question");
        let err = QuestionRepo::new(&pool).create(new).await.unwrap_err();
        assert!(matches!(err, DbError::UnknownCategory { category: 9_999 }));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn delete_missing_is_not_found() {
        let pool = seeded_pool().await;
        let err = QuestionRepo::new(&pool).delete(-1).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn quiz_pool_excludes_previous() {
        let pool = seeded_pool().await;
        let repo = QuestionRepo::new(&pool);
        let all = repo.quiz_pool(None, &[]).await.expect("pool failed");
        let first = all.first().expect("seeded questions").id;

        let rest = repo.quiz_pool(None, &[first]).await.expect("pool failed");
        assert_eq!(rest.len(), all.len() - 1);
        assert!(rest.iter().all(|q| q.id != first));
    }
}
