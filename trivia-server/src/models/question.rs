//! Question records and validated input for new questions

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::ValidationError;

/// Lowest accepted difficulty
pub const MIN_DIFFICULTY: i32 = 1;

/// Highest accepted difficulty
pub const MAX_DIFFICULTY: i32 = 5;

/// Question record as stored and as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Question {
    pub id: i32,
    pub question: String,
    pub answer: String,
    pub category: i32,
    pub difficulty: i32,
}

/// Integer field that clients send either as a JSON number or as a
/// numeric string (`"category": "1"`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum IntOrString {
    Int(i64),
    Str(String),
}

impl IntOrString {
    /// Read the value as an `i32`, naming `field` in any error.
    pub fn to_i32(&self, field: &'static str) -> Result<i32, ValidationError> {
        let value = match self {
            Self::Int(n) => *n,
            Self::Str(s) => {
                let s = s.trim();
                if s.is_empty() {
                    return Err(ValidationError::Empty { field });
                }
                s.parse::<i64>().map_err(|_| ValidationError::InvalidFormat {
                    field,
                    reason: "must be an integer",
                })?
            }
        };

        i32::try_from(value).map_err(|_| ValidationError::InvalidFormat {
            field,
            reason: "integer out of range",
        })
    }
}

impl From<i32> for IntOrString {
    fn from(n: i32) -> Self {
        Self::Int(i64::from(n))
    }
}

/// Validated question ready for insertion.
///
/// Text fields are trimmed and must be non-empty, difficulty must lie in
/// `MIN_DIFFICULTY..=MAX_DIFFICULTY`. Whether `category` exists is left to
/// the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    question: String,
    answer: String,
    category: i32,
    difficulty: i32,
}

impl NewQuestion {
    pub fn new(
        question: &str,
        answer: &str,
        category: i32,
        difficulty: i32,
    ) -> Result<Self, ValidationError> {
        let question = non_empty(question, "question")?;
        let answer = non_empty(answer, "answer")?;

        if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&difficulty) {
            return Err(ValidationError::OutOfRange {
                field: "difficulty",
                min: i64::from(MIN_DIFFICULTY),
                max: i64::from(MAX_DIFFICULTY),
                value: i64::from(difficulty),
            });
        }

        Ok(Self {
            question,
            answer,
            category,
            difficulty,
        })
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn category(&self) -> i32 {
        self.category
    }

    pub fn difficulty(&self) -> i32 {
        self.difficulty
    }

    /// Attach a store-assigned id.
    pub fn into_question(self, id: i32) -> Question {
        Question {
            id,
            question: self.question,
            answer: self.answer,
            category: self.category,
            difficulty: self.difficulty,
        }
    }
}

fn non_empty(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(trimmed.to_owned())
}
