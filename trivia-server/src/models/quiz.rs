//! Quiz round selection
//!
//! Selection is filter-then-pick: the candidate pool is reduced to questions
//! not yet asked, then one candidate is drawn uniformly. There is no retry
//! loop, so a round always finishes after a single pass over the pool.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;

use super::{IntOrString, Question, ValidationError};

/// Category id meaning "every category"
pub const ALL_CATEGORIES: i32 = 0;

/// Quiz category as sent by clients: either `{"id": .., "type": ..}` or a
/// bare id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum QuizCategory {
    Object {
        id: IntOrString,
        #[serde(rename = "type", default)]
        kind: Option<String>,
    },
    Id(IntOrString),
}

impl QuizCategory {
    pub fn id(&self) -> Result<i32, ValidationError> {
        match self {
            Self::Object { id, .. } | Self::Id(id) => id.to_i32("quiz_category.id"),
        }
    }

    /// Category to restrict the pool to, `None` for all categories.
    pub fn filter(&self) -> Result<Option<i32>, ValidationError> {
        let id = self.id()?;
        Ok((id != ALL_CATEGORIES).then_some(id))
    }
}

/// Outcome of a quiz round
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizPick {
    /// A question not asked before
    Next(Question),
    /// Every question in the pool has been asked
    GameOver,
}

/// Draw one question from `pool` whose id is not in `previous`.
pub fn pick_question<R>(pool: Vec<Question>, previous: &[i32], rng: &mut R) -> QuizPick
where
    R: Rng + ?Sized,
{
    let candidates: Vec<Question> = pool
        .into_iter()
        .filter(|q| !previous.contains(&q.id))
        .collect();

    match candidates.choose(rng) {
        Some(q) => QuizPick::Next(q.clone()),
        None => QuizPick::GameOver,
    }
}
