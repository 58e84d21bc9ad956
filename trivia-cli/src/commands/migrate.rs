//! Schema migration command

use anyhow::{Context, Result};

use trivia_server::db::migrations;
use trivia_server::TriviaConfig;

use super::{connect, DatabaseArgs};

pub async fn run_migrate(args: DatabaseArgs, config: &TriviaConfig) -> Result<()> {
    let pool = connect(&args, config).await?;

    migrations::run(&pool)
        .await
        .context("Failed to run migrations")?;

    tracing::info!("Schema is up to date");
    pool.close().await;
    Ok(())
}
