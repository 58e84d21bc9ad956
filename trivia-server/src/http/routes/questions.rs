//! Question endpoints: listing, search, creation and deletion

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::http::error::ApiError;
use crate::http::extractors::{ApiJson, PageNumber, QuestionId};
use crate::http::server::AppState;
use crate::models::{
    category_map, paginate, CategoryMap, IntOrString, NewQuestion, Question, ValidationError,
};

/// Add-question request. Every field is optional at the JSON level so a
/// missing field is reported by name.
#[derive(Debug, Deserialize)]
pub struct AddQuestionRequest {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<IntOrString>,
    pub difficulty: Option<IntOrString>,
}

impl TryFrom<AddQuestionRequest> for NewQuestion {
    type Error = ValidationError;

    fn try_from(req: AddQuestionRequest) -> Result<Self, Self::Error> {
        let question = req
            .question
            .ok_or(ValidationError::Empty { field: "question" })?;
        let answer = req.answer.ok_or(ValidationError::Empty { field: "answer" })?;
        let category = req
            .category
            .ok_or(ValidationError::Empty { field: "category" })?
            .to_i32("category")?;
        let difficulty = req
            .difficulty
            .ok_or(ValidationError::Empty { field: "difficulty" })?
            .to_i32("difficulty")?;

        NewQuestion::new(&question, &answer, category, difficulty)
    }
}

/// Search request
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(rename = "searchTerm", default)]
    pub search_term: Option<String>,
}

/// Paginated listing
#[derive(Serialize)]
pub struct QuestionListResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub categories: CategoryMap,
    pub current_category: Option<String>,
}

/// Search results
#[derive(Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    #[serde(rename = "totalQuestions")]
    pub total_questions: usize,
    pub current_category: Option<String>,
}

/// Result of an insert
#[derive(Serialize)]
pub struct CreatedResponse {
    pub success: bool,
    pub created: i32,
    pub questions: Vec<Question>,
    pub total_questions: usize,
}

/// Result of a delete
#[derive(Serialize)]
pub struct DeletedResponse {
    pub success: bool,
    pub deleted: i32,
    pub questions: Vec<Question>,
    pub total_questions: usize,
}

/// GET /questions?page=N - one page of questions plus the category map
async fn list_questions(
    State(state): State<Arc<AppState>>,
    PageNumber(page): PageNumber,
) -> Result<Json<QuestionListResponse>, ApiError> {
    let questions = state.store.questions().await?;
    let current_page = paginate(&questions, page, state.questions_per_page);

    if current_page.is_empty() {
        return Err(ApiError::not_found("page", page));
    }

    let categories = state.store.categories().await?;

    Ok(Json(QuestionListResponse {
        success: true,
        questions: current_page.to_vec(),
        total_questions: questions.len(),
        categories: category_map(&categories),
        current_category: None,
    }))
}

/// POST /questions - case-insensitive substring search
async fn search_questions(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let term = req.search_term.unwrap_or_default();
    let questions = state.store.search_questions(&term).await?;
    tracing::debug!(term = %term, hits = questions.len(), "question search");

    Ok(Json(SearchResponse {
        success: true,
        total_questions: questions.len(),
        questions,
        current_category: None,
    }))
}

/// POST /questions/add - validate, insert and relist
async fn add_question(
    State(state): State<Arc<AppState>>,
    PageNumber(page): PageNumber,
    ApiJson(req): ApiJson<AddQuestionRequest>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let new = NewQuestion::try_from(req)?;
    let mutation = state.store.create_question(new).await?;
    tracing::info!(id = mutation.id, "question created");

    Ok(Json(CreatedResponse {
        success: true,
        created: mutation.id,
        questions: paginate(&mutation.questions, page, state.questions_per_page).to_vec(),
        total_questions: mutation.questions.len(),
    }))
}

/// DELETE /questions/{question_id} - lookup, delete and relist
async fn delete_question(
    State(state): State<Arc<AppState>>,
    QuestionId(id): QuestionId,
    PageNumber(page): PageNumber,
) -> Result<Json<DeletedResponse>, ApiError> {
    let mutation = state.store.delete_question(id).await?;
    tracing::info!(id, "question deleted");

    Ok(Json(DeletedResponse {
        success: true,
        deleted: mutation.id,
        questions: paginate(&mutation.questions, page, state.questions_per_page).to_vec(),
        total_questions: mutation.questions.len(),
    }))
}

/// Question routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/questions", get(list_questions).post(search_questions))
        .route("/questions/add", post(add_question))
        .route("/questions/{question_id}", delete(delete_question))
}
