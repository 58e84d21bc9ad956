//! Command implementations for the trivia CLI

pub mod migrate;
pub mod seed;
pub mod serve;

use anyhow::{Context, Result};
use clap::Args;

use trivia_server::db::{create_pool_with_options, PgPool};
use trivia_server::TriviaConfig;

pub use migrate::run_migrate;
pub use seed::run_seed;
pub use serve::run_serve;

/// Database connection flags shared by every command that talks to PostgreSQL
#[derive(Args, Debug, Clone, Default)]
pub struct DatabaseArgs {
    /// Database URL (overrides config file and DATABASE_URL)
    #[arg(long)]
    pub database_url: Option<String>,
}

impl DatabaseArgs {
    fn resolve_url(&self, config: &TriviaConfig) -> Result<String> {
        self.database_url
            .clone()
            .or_else(|| config.database.url.clone())
            .context(
                "DATABASE_URL not set. Set via --database-url, DATABASE_URL env, \
                 or [database] url in the config file",
            )
    }
}

/// Open a pool sized from config.
pub async fn connect(args: &DatabaseArgs, config: &TriviaConfig) -> Result<PgPool> {
    let url = args.resolve_url(config)?;

    create_pool_with_options(&url, config.database.max_connections)
        .await
        .context("Failed to create database pool")
}
