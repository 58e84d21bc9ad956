//! trivia-server: HTTP API for a trivia question database
//!
//! Lists and paginates questions, lists categories, adds, deletes and
//! searches questions, and serves quiz rounds that never repeat a question.

pub mod config;
pub mod db;
pub mod http;
pub mod models;

pub use config::{ConfigError, TriviaConfig};
pub use db::{DbError, MemoryStore, PgStore, TriviaStore};
pub use http::{build_router, run_server, ApiError, AppState, ServerConfig, ServerError};
