//! API error types with IntoResponse
//!
//! Every failure leaves the server as `{"success": false, "error": <status>,
//! "message": <text>}` with the matching status code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Malformed or missing input (400)
    BadRequest { detail: String },

    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// Route exists but not for this method (405)
    MethodNotAllowed,

    /// Well-formed request that cannot be applied (422)
    Unprocessable { detail: String },

    /// Database error (500, logged)
    Database(DbError),
}

impl ApiError {
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::BadRequest {
            detail: detail.into(),
        }
    }

    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Unprocessable { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message. Internal details are never included.
    pub fn message(&self) -> String {
        match self {
            Self::BadRequest { detail } => format!("Bad request: {}", detail),
            Self::NotFound { .. } => "The requested resource was not found.".to_owned(),
            Self::MethodNotAllowed => "The method is not allowed for this resource.".to_owned(),
            Self::Unprocessable { detail } => {
                format!("Your request was unprocessable: {}", detail)
            }
            Self::Database(_) => "Internal server error.".to_owned(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Database(e) => tracing::error!("Database error: {}", e),
            Self::NotFound { resource, id } => tracing::debug!(resource, %id, "not found"),
            Self::BadRequest { detail } | Self::Unprocessable { detail } => {
                tracing::warn!(%detail, "rejected request")
            }
            Self::MethodNotAllowed => {}
        }

        let status = self.status();
        let body = json!({
            "success": false,
            "error": status.as_u16(),
            "message": self.message(),
        });

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::BadRequest {
            detail: e.to_string(),
        }
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            DbError::UnknownCategory { .. } => Self::Unprocessable {
                detail: e.to_string(),
            },
            _ => Self::Database(e),
        }
    }
}
