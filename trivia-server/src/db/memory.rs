//! In-process store
//!
//! Mirrors `PgStore` semantics, including the category foreign key, so the
//! HTTP layer can be exercised without PostgreSQL. Used by the router tests
//! and by `trivia serve --in-memory`.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::seed;
use super::{DbError, Mutation, TriviaStore};
use crate::models::{Category, NewQuestion, Question};

#[derive(Debug, Default)]
struct Tables {
    categories: BTreeMap<i32, Category>,
    questions: BTreeMap<i32, Question>,
    last_question_id: i32,
}

impl Tables {
    fn listing(&self) -> Vec<Question> {
        self.questions.values().cloned().collect()
    }

    fn filtered<F>(&self, keep: F) -> Vec<Question>
    where
        F: Fn(&Question) -> bool,
    {
        self.questions.values().filter(|q| keep(q)).cloned().collect()
    }
}

/// `TriviaStore` held in memory behind a single lock
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with the standard categories and sample questions.
    pub fn seeded() -> Self {
        let categories = seed::CATEGORIES
            .iter()
            .map(|(id, kind)| Category {
                id: *id,
                kind: (*kind).to_owned(),
            })
            .collect();

        let questions = seed::QUESTIONS
            .iter()
            .zip(1..)
            .map(|(s, id)| Question {
                id,
                question: s.question.to_owned(),
                answer: s.answer.to_owned(),
                category: s.category,
                difficulty: s.difficulty,
            })
            .collect();

        Self::with_data(categories, questions)
    }

    /// Store holding exactly these records. New ids continue after the
    /// highest given id.
    pub fn with_data(categories: Vec<Category>, questions: Vec<Question>) -> Self {
        let last_question_id = questions.iter().map(|q| q.id).max().unwrap_or(0);
        let tables = Tables {
            categories: categories.into_iter().map(|c| (c.id, c)).collect(),
            questions: questions.into_iter().map(|q| (q.id, q)).collect(),
            last_question_id,
        };

        Self {
            tables: Arc::new(RwLock::new(tables)),
        }
    }

    /// Number of stored questions.
    pub async fn question_count(&self) -> usize {
        self.tables.read().await.questions.len()
    }
}

#[async_trait]
impl TriviaStore for MemoryStore {
    async fn ping(&self) -> Result<(), DbError> {
        Ok(())
    }

    async fn categories(&self) -> Result<Vec<Category>, DbError> {
        Ok(self.tables.read().await.categories.values().cloned().collect())
    }

    async fn category(&self, id: i32) -> Result<Option<Category>, DbError> {
        Ok(self.tables.read().await.categories.get(&id).cloned())
    }

    async fn questions(&self) -> Result<Vec<Question>, DbError> {
        Ok(self.tables.read().await.listing())
    }

    async fn questions_in_category(&self, category: i32) -> Result<Vec<Question>, DbError> {
        Ok(self
            .tables
            .read()
            .await
            .filtered(|q| q.category == category))
    }

    async fn search_questions(&self, term: &str) -> Result<Vec<Question>, DbError> {
        let needle = term.to_lowercase();
        Ok(self
            .tables
            .read()
            .await
            .filtered(|q| q.question.to_lowercase().contains(&needle)))
    }

    async fn create_question(&self, new: NewQuestion) -> Result<Mutation, DbError> {
        let mut tables = self.tables.write().await;

        if !tables.categories.contains_key(&new.category()) {
            return Err(DbError::UnknownCategory {
                category: new.category(),
            });
        }

        tables.last_question_id += 1;
        let id = tables.last_question_id;
        tables.questions.insert(id, new.into_question(id));

        Ok(Mutation {
            id,
            questions: tables.listing(),
        })
    }

    async fn delete_question(&self, id: i32) -> Result<Mutation, DbError> {
        let mut tables = self.tables.write().await;

        if tables.questions.remove(&id).is_none() {
            return Err(DbError::not_found("question", id));
        }

        Ok(Mutation {
            id,
            questions: tables.listing(),
        })
    }

    async fn quiz_pool(
        &self,
        category: Option<i32>,
        exclude: &[i32],
    ) -> Result<Vec<Question>, DbError> {
        Ok(self.tables.read().await.filtered(|q| {
            category.map_or(true, |c| q.category == c) && !exclude.contains(&q.id)
        }))
    }
}
