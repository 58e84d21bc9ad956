//! Router tests over the seeded in-memory store

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use tracing_subscriber::EnvFilter;

use trivia_server::db::seed;
use trivia_server::{build_router, AppState, MemoryStore};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("trivia_server=debug"))
        .with_test_writer()
        .try_init();
}

fn app_with(store: MemoryStore) -> Router {
    init_tracing();
    build_router(AppState::new(Arc::new(store), 10))
}

fn app() -> Router {
    app_with(MemoryStore::seeded())
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn ids(body: &Value) -> Vec<i64> {
    body["questions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_health_endpoint() {
    let (status, body) = send(&app(), get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_categories_listing() {
    let (status, body) = send(&app(), get("/categories")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["categories"]["1"], "Science");
    assert_eq!(body["categories"]["6"], "Sports");
    assert_eq!(
        body["categories"].as_object().unwrap().len(),
        seed::CATEGORIES.len()
    );
}

#[tokio::test]
async fn test_categories_empty_store_is_404() {
    let (status, body) = send(&app_with(MemoryStore::new()), get("/categories")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], 404);
}

#[tokio::test]
async fn test_questions_first_page() {
    let (status, body) = send(&app(), get("/questions")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(ids(&body), (1..=10).collect::<Vec<_>>());
    assert_eq!(body["total_questions"], seed::QUESTIONS.len());
    assert_eq!(body["categories"]["3"], "Geography");
    assert!(body["current_category"].is_null());
}

#[tokio::test]
async fn test_questions_last_page_is_partial() {
    let (status, body) = send(&app(), get("/questions?page=2")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), (11..=19).collect::<Vec<_>>());
    assert_eq!(body["total_questions"], 19);
}

#[tokio::test]
async fn test_questions_page_out_of_range_is_404() {
    for uri in ["/questions?page=1000", "/questions?page=0", "/questions?page=-1"] {
        let (status, body) = send(&app(), get(uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body["message"], "The requested resource was not found.");
    }
}

#[tokio::test]
async fn test_questions_non_numeric_page_defaults_to_first() {
    let (status, body) = send(&app(), get("/questions?page=abc")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body)[0], 1);
}

#[tokio::test]
async fn test_questions_empty_store_is_404() {
    let (status, _) = send(&app_with(MemoryStore::new()), get("/questions")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_question() {
    let app = app();

    let (status, body) = send(&app, delete("/questions/5")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["deleted"], 5);
    assert_eq!(body["total_questions"], 18);
    assert!(!ids(&body).contains(&5));

    let (status, body) = send(&app, delete("/questions/5")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], 404);

    let (_, body) = send(&app, get("/questions")).await;
    assert_eq!(body["total_questions"], 18);
}

#[tokio::test]
async fn test_delete_malformed_id_is_404() {
    let (status, body) = send(&app(), delete("/questions/not-a-number")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_add_question() {
    let app = app();

    let (status, body) = send(
        &app,
        post_json(
            "/questions/add",
            json!({
                "question": "What is the color of the sky?",
                "answer": "Blue",
                "category": "1",
                "difficulty": "1"
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["created"], 20);
    assert_eq!(body["total_questions"], 20);
    assert_eq!(ids(&body).len(), 10);

    let (_, body) = send(&app, get("/questions?page=2")).await;
    let last = body["questions"].as_array().unwrap().last().unwrap().clone();
    assert_eq!(last["id"], 20);
    assert_eq!(last["answer"], "Blue");
    assert_eq!(last["category"], 1);
}

#[tokio::test]
async fn test_add_question_rejects_invalid_input() {
    let app = app();
    let cases = [
        json!({"question": "Q", "answer": "", "category": 1, "difficulty": 1}),
        json!({"question": "Q", "answer": "A", "category": 1}),
        json!({"question": "Q", "answer": "A", "category": 1, "difficulty": 9}),
        json!({"question": "Q", "answer": "A", "category": "science", "difficulty": 1}),
        json!({"question": 42, "answer": "A", "category": 1, "difficulty": 1}),
    ];

    for case in cases {
        let (status, body) = send(&app, post_json("/questions/add", case.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{case}");
        assert_eq!(body["error"], 400);
    }

    let (_, body) = send(&app, get("/questions")).await;
    assert_eq!(body["total_questions"], 19);
}

#[tokio::test]
async fn test_add_question_unknown_category_is_422() {
    let (status, body) = send(
        &app(),
        post_json(
            "/questions/add",
            json!({"question": "Q?", "answer": "A", "category": 99, "difficulty": 2}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], 422);
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let req = Request::builder()
        .method(Method::POST)
        .uri("/questions/add")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, body) = send(&app(), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_search_is_case_insensitive() {
    let (status, body) = send(&app(), post_json("/questions", json!({"searchTerm": "TITLE"}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(ids(&body), vec![3, 4]);
    assert_eq!(body["totalQuestions"], 2);
    assert!(body["current_category"].is_null());
}

#[tokio::test]
async fn test_search_single_match() {
    let (status, body) =
        send(&app(), post_json("/questions", json!({"searchTerm": "taj mahal"}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![11]);
    assert_eq!(body["totalQuestions"], 1);
    assert_eq!(body["questions"][0]["answer"], "Agra");
}

#[tokio::test]
async fn test_search_without_matches() {
    let (status, body) = send(&app(), post_json("/questions", json!({"searchTerm": "100%"}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalQuestions"], 0);
    assert!(ids(&body).is_empty());
}

#[tokio::test]
async fn test_search_without_term_matches_everything() {
    let (status, body) = send(&app(), post_json("/questions", json!({}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalQuestions"], 19);
}

#[tokio::test]
async fn test_category_questions() {
    let (status, body) = send(&app(), get("/categories/4/questions")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(ids(&body), vec![3, 5, 8, 19]);
    assert_eq!(body["total_questions"], 4);
    assert_eq!(body["current_category"], "History");
}

#[tokio::test]
async fn test_category_questions_unknown_category_is_404() {
    for uri in ["/categories/99/questions", "/categories/history/questions"] {
        let (status, _) = send(&app(), get(uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
    }
}

#[tokio::test]
async fn test_quiz_plays_category_to_exhaustion() {
    let app = app();
    let mut previous: Vec<i64> = Vec::new();

    for _ in 0..2 {
        let (status, body) = send(
            &app,
            post_json(
                "/quizzes",
                json!({
                    "previous_questions": previous,
                    "quiz_category": {"type": "Sports", "id": 6}
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let question = &body["question"];
        assert_eq!(question["category"], 6);
        let id = question["id"].as_i64().unwrap();
        assert!(!previous.contains(&id));
        previous.push(id);
    }

    previous.sort_unstable();
    assert_eq!(previous, vec![6, 7]);

    let (status, body) = send(
        &app,
        post_json(
            "/quizzes",
            json!({
                "previous_questions": previous,
                "quiz_category": {"type": "Sports", "id": "6"}
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "question": null, "message": "Game over"}));
}

#[tokio::test]
async fn test_quiz_all_categories() {
    let app = app();
    let previous: Vec<i32> = (1..=18).collect();

    let (status, body) = send(
        &app,
        post_json(
            "/quizzes",
            json!({"previous_questions": previous, "quiz_category": {"type": "click", "id": 0}}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["question"]["id"], 19);

    let (_, body) = send(
        &app,
        post_json(
            "/quizzes",
            json!({"previous_questions": (1..=19).collect::<Vec<i32>>(), "quiz_category": 0}),
        ),
    )
    .await;

    assert!(body["question"].is_null());
    assert_eq!(body["message"], "Game over");
}

#[tokio::test]
async fn test_quiz_unknown_category_is_404() {
    let (status, body) = send(
        &app(),
        post_json(
            "/quizzes",
            json!({"previous_questions": [], "quiz_category": {"type": "Cooking", "id": 99}}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], 404);
}

#[tokio::test]
async fn test_quiz_missing_fields_is_400() {
    let app = app();
    let cases = [
        json!({"quiz_category": {"type": "Science", "id": 1}}),
        json!({"previous_questions": []}),
        json!({"previous_questions": [], "quiz_category": {"id": "science"}}),
    ];

    for case in cases {
        let (status, _) = send(&app, post_json("/quizzes", case.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{case}");
    }
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let (status, body) = send(&app(), get("/nowhere")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({
            "success": false,
            "error": 404,
            "message": "The requested resource was not found."
        })
    );
}

#[tokio::test]
async fn test_wrong_method_is_json_405() {
    let (status, body) = send(&app(), get("/questions/1")).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["error"], 405);
}

#[tokio::test]
async fn test_cors_headers_on_every_response() {
    let app = app();

    for uri in ["/categories", "/nowhere"] {
        let req = Request::builder()
            .uri(uri)
            .header(header::ORIGIN, "http://localhost:3000")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(req).await.unwrap();
        let headers = response.headers();

        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_METHODS],
            "GET, POST, PATCH, DELETE, OPTIONS"
        );
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_HEADERS],
            "Content-Type, Authorization"
        );
    }
}

#[tokio::test]
async fn test_cors_preflight() {
    let req = Request::builder()
        .method(Method::OPTIONS)
        .uri("/questions/add")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(
        response
            .headers()
            .get_all(header::ACCESS_CONTROL_ALLOW_METHODS)
            .iter()
            .count(),
        1
    );
}
