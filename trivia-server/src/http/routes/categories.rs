//! Category endpoints

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::http::error::ApiError;
use crate::http::extractors::CategoryId;
use crate::http::server::AppState;
use crate::models::{category_map, CategoryMap, Question};

/// Category listing response
#[derive(Serialize)]
pub struct CategoriesResponse {
    pub success: bool,
    pub categories: CategoryMap,
}

/// Questions of one category
#[derive(Serialize)]
pub struct CategoryQuestionsResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub current_category: String,
}

/// GET /categories - id → label mapping
async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CategoriesResponse>, ApiError> {
    let categories = state.store.categories().await?;

    if categories.is_empty() {
        return Err(ApiError::not_found("categories", "all"));
    }

    Ok(Json(CategoriesResponse {
        success: true,
        categories: category_map(&categories),
    }))
}

/// GET /categories/{category_id}/questions - every question in a category
async fn category_questions(
    State(state): State<Arc<AppState>>,
    CategoryId(id): CategoryId,
) -> Result<Json<CategoryQuestionsResponse>, ApiError> {
    let category = state
        .store
        .category(id)
        .await?
        .ok_or_else(|| ApiError::not_found("category", id))?;

    let questions = state.store.questions_in_category(id).await?;

    Ok(Json(CategoryQuestionsResponse {
        success: true,
        total_questions: questions.len(),
        questions,
        current_category: category.kind,
    }))
}

/// Category routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/categories/{category_id}/questions", get(category_questions))
}
