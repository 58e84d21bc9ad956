//! Quiz endpoint

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::http::error::ApiError;
use crate::http::extractors::ApiJson;
use crate::http::server::AppState;
use crate::models::{pick_question, Question, QuizCategory, QuizPick};

const GAME_OVER: &str = "Game over";

/// Quiz round request
#[derive(Debug, Deserialize)]
pub struct QuizRequest {
    pub previous_questions: Vec<i32>,
    pub quiz_category: QuizCategory,
}

/// Quiz round response. `question` is null and `message` is set once the
/// pool is exhausted.
#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub success: bool,
    pub question: Option<Question>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

/// POST /quizzes - a random question not in `previous_questions`
async fn next_question(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<QuizRequest>,
) -> Result<Json<QuizResponse>, ApiError> {
    let category = req.quiz_category.filter()?;

    if let Some(id) = category {
        if state.store.category(id).await?.is_none() {
            return Err(ApiError::not_found("category", id));
        }
    }

    let pool = state
        .store
        .quiz_pool(category, &req.previous_questions)
        .await?;
    let pool_size = pool.len();
    let pick = pick_question(pool, &req.previous_questions, &mut rand::thread_rng());

    let response = match pick {
        QuizPick::Next(question) => {
            tracing::debug!(id = question.id, pool_size, "quiz question picked");
            QuizResponse {
                success: true,
                question: Some(question),
                message: None,
            }
        }
        QuizPick::GameOver => {
            tracing::debug!(
                asked = req.previous_questions.len(),
                "quiz pool exhausted"
            );
            QuizResponse {
                success: true,
                question: None,
                message: Some(GAME_OVER),
            }
        }
    };

    Ok(Json(response))
}

/// Quiz routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/quizzes", post(next_question))
}
