//! Custom Axum extractors
//!
//! Each one turns framework rejections into `ApiError`, so clients always
//! get the JSON error body.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use crate::models::PageParams;

/// JSON body whose rejection is a 400 `ApiError`
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(json_rejection(rejection)),
        }
    }
}

fn json_rejection(rejection: JsonRejection) -> ApiError {
    let detail = match rejection {
        JsonRejection::JsonDataError(e) => e.body_text(),
        JsonRejection::JsonSyntaxError(_) => "request body is not valid JSON".to_owned(),
        JsonRejection::MissingJsonContentType(_) => {
            "expected Content-Type: application/json".to_owned()
        }
        other => other.body_text(),
    };
    ApiError::bad_request(detail)
}

/// Question id from the path. A malformed id is a 404, like a missing one.
pub struct QuestionId(pub i32);

impl<S> FromRequestParts<S> for QuestionId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        path_id(parts, state, "question").await.map(Self)
    }
}

/// Category id from the path. A malformed id is a 404, like a missing one.
pub struct CategoryId(pub i32);

impl<S> FromRequestParts<S> for CategoryId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        path_id(parts, state, "category").await.map(Self)
    }
}

async fn path_id<S>(parts: &mut Parts, state: &S, resource: &'static str) -> Result<i32, ApiError>
where
    S: Send + Sync,
{
    let Path(raw): Path<String> = Path::from_request_parts(parts, state)
        .await
        .map_err(|_| ApiError::not_found(resource, "<missing>"))?;

    let parsed = raw.trim().parse::<i32>();
    parsed.map_err(|_| ApiError::not_found(resource, raw))
}

/// `?page=N`, defaulting to 1 when absent or not an integer
pub struct PageNumber(pub i64);

impl<S> FromRequestParts<S> for PageNumber
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let page = Query::<PageParams>::try_from_uri(&parts.uri)
            .map(|Query(params)| params.page())
            .unwrap_or(1);
        Ok(Self(page))
    }
}
